use crate::quiz::Difficulty;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Number of available questions per subject, topic and difficulty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CatalogIndex {
    #[schema(value_type = Object, example = json!({"math": {"algebra": {"easy": 5}}}))]
    pub subjects: BTreeMap<String, BTreeMap<String, BTreeMap<Difficulty, usize>>>,
}
