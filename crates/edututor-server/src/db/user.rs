use crate::routes::error::LoginError;
use edututor_core::password::{hash_password, verify_password};
use edututor_db::util::FlattenTransactionResultExt;
use edututor_db::{access_tokens, user};
use edututor_entity::user::{Model as UserModel, Role as RoleModel};
use edututor_model::login::Registration;
use edututor_model_tools::convert::IntoDbModel;
use sea_orm::{ConnectionTrait, TransactionTrait};

fn validate(registration: &Registration) -> Result<(), LoginError> {
    if registration.username.trim().is_empty() {
        return Err(LoginError::InvalidRegistration("username is empty"));
    }
    if !registration.email.contains('@') {
        return Err(LoginError::InvalidRegistration("email is invalid"));
    }
    if registration.password.is_empty() {
        return Err(LoginError::InvalidRegistration("password is empty"));
    }
    Ok(())
}

/// Creates a user with a hashed password. Usernames and emails are unique.
pub(crate) async fn register<C: ConnectionTrait + TransactionTrait>(
    conn: &C,
    registration: Registration,
) -> Result<UserModel, LoginError> {
    validate(&registration)?;
    let Registration {
        username,
        email,
        password,
        role,
    } = registration;
    let username = username.trim().to_owned();
    let email = email.trim().to_owned();
    let password_hash = hash_password(&password)?;
    let role: RoleModel = role.into_db_model();

    let user = conn
        .transaction(|txn| {
            Box::pin(async move {
                if user::Query::exists_with_username_or_email(txn, &username, &email).await? {
                    return Err(LoginError::UserExists);
                }
                Ok(user::Mutation::create_user(txn, username, email, password_hash, role).await?)
            })
        })
        .await
        .flatten_res()?;

    tracing::info!(user_id = %user.id, role = ?user.role, "registered user");
    Ok(user)
}

/// Checks the password and returns the access token of the user.
pub(crate) async fn login<C: ConnectionTrait + TransactionTrait>(
    conn: &C,
    username: &str,
    password: &str,
) -> Result<String, LoginError> {
    let Some(user) = user::Query::find_by_username(conn, username.trim()).await? else {
        tracing::debug!("login for unknown user");
        return Err(LoginError::InvalidCredentials);
    };
    if !verify_password(password, &user.password_hash)? {
        tracing::debug!(user_id = %user.id, "login with wrong password");
        return Err(LoginError::InvalidCredentials);
    }
    let token = access_tokens::Mutation::create_access_token(conn, user.id).await?;
    Ok(token.access_token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use edututor_model::user::Role;
    use sea_orm::{Database, DatabaseConnection};
    use test_log::test;

    async fn setup() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        edututor_db::schema::setup_schema(&db).await.unwrap();
        db
    }

    fn registration(username: &str, email: &str) -> Registration {
        Registration {
            username: username.to_owned(),
            email: email.to_owned(),
            password: "secret".to_owned(),
            role: Role::Student,
        }
    }

    #[test(tokio::test)]
    async fn test_register_and_login() {
        let db = setup().await;
        let user = register(&db, registration(" ada ", "ada@example.org")).await.unwrap();
        assert_eq!(user.username, "ada");
        assert_eq!(user.role, RoleModel::Student);
        assert_ne!(user.password_hash, "secret");

        let token = login(&db, "ada", "secret").await.unwrap();
        // The same token is handed out again
        assert_eq!(login(&db, "ada", "secret").await.unwrap(), token);
        let found = user::Query::find_by_token(&db, &token).await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
    }

    #[test(tokio::test)]
    async fn test_duplicate_registration() {
        let db = setup().await;
        register(&db, registration("ada", "ada@example.org")).await.unwrap();
        assert!(matches!(
            register(&db, registration("ada", "other@example.org")).await,
            Err(LoginError::UserExists)
        ));
        assert!(matches!(
            register(&db, registration("alan", "ada@example.org")).await,
            Err(LoginError::UserExists)
        ));
    }

    #[test(tokio::test)]
    async fn test_invalid_registration() {
        let db = setup().await;
        assert!(matches!(
            register(&db, registration(" ", "ada@example.org")).await,
            Err(LoginError::InvalidRegistration(_))
        ));
        assert!(matches!(
            register(&db, registration("ada", "not an email")).await,
            Err(LoginError::InvalidRegistration(_))
        ));
    }

    #[test(tokio::test)]
    async fn test_invalid_credentials() {
        let db = setup().await;
        register(&db, registration("ada", "ada@example.org")).await.unwrap();
        assert!(matches!(
            login(&db, "ada", "wrong").await,
            Err(LoginError::InvalidCredentials)
        ));
        assert!(matches!(
            login(&db, "nobody", "secret").await,
            Err(LoginError::InvalidCredentials)
        ));
    }
}
