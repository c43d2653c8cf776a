use edututor_entity::user::{Model as UserModel, Role};
use sea_orm::DatabaseConnection;

#[allow(dead_code)]
pub async fn create_test_user(db: &DatabaseConnection, username: &str, role: Role) -> UserModel {
    edututor_db::user::Mutation::create_user(
        db,
        username.to_owned(),
        format!("{username}@example.org"),
        "pbkdf2-sha256$1$AAAA$AAAA".to_owned(),
        role,
    )
    .await
    .unwrap()
}
