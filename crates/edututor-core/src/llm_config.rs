use async_openai::config::OpenAIConfig;
use edututor_utils::args::llm::LlmServices as LlmServiceArgs;

const DEFAULT_MODEL: &str = "gpt-4.1-mini";

#[derive(Debug, Clone, Default)]
pub struct LlmConfig {
    key: Option<String>,
    api_base: Option<String>,
    default_model: Option<String>,
    assistant_model: Option<String>,
    document_model: Option<String>,
}

impl From<LlmServiceArgs> for LlmConfig {
    fn from(config: LlmServiceArgs) -> LlmConfig {
        Self {
            key: config.openai_key,
            api_base: config.openai_api_base,
            default_model: config.openai_default_model,
            assistant_model: config.assistant_model,
            document_model: config.document_model,
        }
    }
}

impl LlmConfig {
    #[must_use]
    pub fn get_default_model(&self) -> &str {
        self.default_model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    #[must_use]
    pub fn get_openai_config(&self) -> OpenAIConfig {
        let mut openai_config = OpenAIConfig::default();
        if let Some(api_base) = &self.api_base {
            openai_config = openai_config.with_api_base(api_base);
        }
        if let Some(api_key) = &self.key {
            openai_config = openai_config.with_api_key(api_key);
        }
        openai_config
    }

    #[must_use]
    pub fn get_assistant_model(&self) -> &str {
        if let Some(model) = &self.assistant_model {
            model.as_str()
        } else {
            tracing::debug!("Using default model for assistant feature");
            self.get_default_model()
        }
    }

    #[must_use]
    pub fn get_document_model(&self) -> &str {
        if let Some(model) = &self.document_model {
            model.as_str()
        } else {
            tracing::debug!("Using default model for document feature");
            self.get_default_model()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_models_fall_back_to_default() {
        let config = LlmConfig::from(LlmServiceArgs {
            openai_key: None,
            openai_api_base: None,
            openai_default_model: Some("base".to_owned()),
            assistant_model: Some("chat".to_owned()),
            document_model: None,
        });
        assert_eq!(config.get_assistant_model(), "chat");
        assert_eq!(config.get_document_model(), "base");
        assert_eq!(LlmConfig::default().get_document_model(), DEFAULT_MODEL);
    }
}
