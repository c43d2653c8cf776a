use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("DB error occurred")]
    SeaOrm(#[from] sea_orm::DbErr),

    #[error("Failed to delete database file")]
    Io(#[from] std::io::Error),

    #[error("Database of type {0} is not stored in a file")]
    NotAFile(String),
}
