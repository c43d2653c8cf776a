use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    #[serde(alias = "Student")]
    Student,
    #[serde(alias = "Educator", alias = "teacher", alias = "Teacher")]
    Educator,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    #[schema(example = "username")]
    pub username: String,
    pub email: String,
    pub role: Role,
    pub created_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize() {
        assert_eq!(r#""student""#, serde_json::to_string(&Role::Student).unwrap());
        assert_eq!(r#""educator""#, serde_json::to_string(&Role::Educator).unwrap());
    }

    #[test]
    fn test_teacher_alias() {
        assert_eq!(Role::Educator, serde_json::from_str::<Role>(r#""teacher""#).unwrap());
        assert_eq!(Role::Educator, serde_json::from_str::<Role>(r#""Teacher""#).unwrap());
        assert!(serde_json::from_str::<Role>(r#""admin""#).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Role::Student.to_string(), "student");
        assert_eq!(Role::Educator.as_ref(), "educator");
    }
}
