use crate::util::FlattenTransactionResultExt;
use base64::Engine;
use edututor_entity::{
    access_tokens,
    access_tokens::{ActiveModel, Entity, Model},
};
use ring::rand::{self, SecureRandom};
use sea_orm::ActiveValue::Set;
use sea_orm::prelude::*;
use sea_orm::{TransactionTrait, sea_query};

pub struct Mutation;

fn generate_token() -> String {
    let rng = rand::SystemRandom::new();
    let mut bytes = [0u8; 64];
    // Only getentropy can fail here, which does not happen on supported systems
    rng.fill(&mut bytes).expect("Failed to generate random bytes");
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

impl Mutation {
    /// Returns the token of the user, creating one if none exists yet.
    pub async fn create_access_token<C: TransactionTrait>(conn: &C, user_id: Uuid) -> Result<Model, DbErr> {
        let token = ActiveModel {
            user_id: Set(user_id),
            access_token: Set(generate_token()),
            ..Default::default()
        };

        conn.transaction(|txn| {
            Box::pin(async move {
                Entity::insert(token)
                    .on_conflict(
                        sea_query::OnConflict::column(access_tokens::Column::UserId)
                            .do_nothing()
                            .clone(),
                    )
                    .do_nothing()
                    .exec(txn)
                    .await?;
                let token = Entity::find()
                    .filter(access_tokens::Column::UserId.eq(user_id))
                    .one(txn)
                    .await?;
                token.ok_or(DbErr::RecordNotFound("Token not found after insertion".to_owned()))
            })
        })
        .await
        .flatten_res()
        .inspect_err(|error| {
            tracing::error!(error = error as &dyn std::error::Error, %user_id, "failed to create access token");
        })
    }

    pub async fn delete_access_token<C: ConnectionTrait>(conn: &C, user_id: Uuid) -> Result<(), DbErr> {
        Entity::delete_many()
            .filter(access_tokens::Column::UserId.eq(user_id))
            .exec(conn)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_token() {
        let token = generate_token();
        let token = base64::engine::general_purpose::STANDARD.decode(&token).unwrap();
        assert_eq!(token.len(), 64);
        // An all zero token means the buffer was never filled
        assert!(token.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_tokens_differ() {
        assert_ne!(generate_token(), generate_token());
    }
}
