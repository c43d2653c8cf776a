pub mod analytics;
pub mod assistant;
pub mod document;
pub mod llm_config;
pub mod openai;
pub mod password;
pub mod quiz;
pub mod status;
