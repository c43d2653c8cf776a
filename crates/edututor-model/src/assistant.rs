use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AskRequest {
    pub question: String,
    /// Text the answer has to be based on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DocumentQuestion {
    pub question: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Answer {
    pub answer: String,
}
