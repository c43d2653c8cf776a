use sea_orm::{ConnectionTrait, DbBackend, DbErr};

const SQLITE: &str = include_str!("schema/sqlite.sql");
const POSTGRES: &str = include_str!("schema/postgres.sql");

/// Creates all tables that do not exist yet. Safe to run on every start.
pub async fn setup_schema<C: ConnectionTrait>(conn: &C) -> Result<(), DbErr> {
    let schema = match conn.get_database_backend() {
        DbBackend::Postgres => POSTGRES,
        DbBackend::Sqlite => SQLITE,
        DbBackend::MySql => return Err(DbErr::Custom("mysql is not supported".to_owned())),
    };
    conn.execute_unprepared(schema).await.inspect_err(|error| {
        tracing::error!(error = error as &dyn std::error::Error, "failed to set up schema");
    })?;
    Ok(())
}
