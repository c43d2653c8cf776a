use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use utoipa::openapi::{RefOr, Schema};
use utoipa::{PartialSchema, ToSchema, schema};

#[derive(Debug, Serialize, ToSchema)]
pub struct Status {
    pub database: ComponentStatus,
    pub catalog: ComponentStatus,
}

impl Status {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.database.is_ok() && self.catalog.is_ok()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ToSchema, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentState {
    Ok,
    Error,
}

impl From<StatusCode> for ComponentState {
    fn from(value: StatusCode) -> Self {
        if value.is_success() { Self::Ok } else { Self::Error }
    }
}

/// Health of a single component, serialized as its message or, without one, its state.
#[derive(Debug, Clone)]
pub struct ComponentStatus {
    state: ComponentState,
    message: Option<Value>,
}

impl PartialSchema for ComponentStatus {
    fn schema() -> RefOr<Schema> {
        schema!(String).into()
    }
}

impl ToSchema for ComponentStatus {}

impl Serialize for ComponentStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match &self.message {
            Some(message) => message.serialize(serializer),
            None => self.state.serialize(serializer),
        }
    }
}

impl ComponentStatus {
    pub fn new<S: Into<ComponentState>>(state: S, message: Option<Value>) -> Self {
        Self {
            state: state.into(),
            message,
        }
    }

    #[must_use]
    pub fn ok() -> Self {
        Self::new(ComponentState::Ok, None)
    }

    #[must_use]
    pub fn from_ok_text(message: &str) -> Self {
        Self::new(ComponentState::Ok, Some(json!(message)))
    }

    #[must_use]
    pub fn from_error_text(message: &str) -> Self {
        Self::new(ComponentState::Error, Some(json!(message)))
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.state == ComponentState::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_component() {
        assert_eq!(r#""ok""#, serde_json::to_string(&ComponentStatus::ok()).unwrap());
        assert_eq!(
            r#""timeout""#,
            serde_json::to_string(&ComponentStatus::from_error_text("timeout")).unwrap()
        );
        assert!(!ComponentStatus::new(StatusCode::INTERNAL_SERVER_ERROR, None).is_ok());
    }

    #[test]
    fn test_status_requires_all_components() {
        let status = Status {
            database: ComponentStatus::ok(),
            catalog: ComponentStatus::from_error_text("empty"),
        };
        assert!(!status.is_ok());
    }
}
