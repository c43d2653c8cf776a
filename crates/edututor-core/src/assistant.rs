use crate::llm_config::LlmConfig;
use crate::openai::error::OpenAiError;
use crate::openai::{CallConfig, openai_chat_with_timeout, system_message, user_message};
use async_openai::types::ChatCompletionRequestMessage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("the question is empty")]
    EmptyQuestion,
    #[error(transparent)]
    OpenAi(#[from] OpenAiError),
}

const TUTOR_PROMPT: &str = "You are a friendly tutor helping students learn. Answer clearly and concisely.";

const CONTEXT_PROMPT: &str = "You are a friendly tutor helping students learn. Answer the question using only the \
     provided context. If the context does not contain the answer, say that you cannot find it in the context.";

fn build_messages(question: &str, context: Option<&str>) -> Vec<ChatCompletionRequestMessage> {
    match context.map(str::trim).filter(|context| !context.is_empty()) {
        Some(context) => vec![
            system_message(CONTEXT_PROMPT.to_owned()),
            user_message(format!("Context:\n{context}\n\nQuestion: {question}")),
        ],
        None => vec![system_message(TUTOR_PROMPT.to_owned()), user_message(question.to_owned())],
    }
}

/// Answers a free-form question, restricted to `context` when one is given.
pub async fn ask(
    llm_config: &LlmConfig,
    model: &str,
    question: &str,
    context: Option<&str>,
) -> Result<String, AssistantError> {
    let question = question.trim();
    if question.is_empty() {
        return Err(AssistantError::EmptyQuestion);
    }
    let messages = build_messages(question, context);
    let answer = openai_chat_with_timeout(CallConfig::default(), llm_config.get_openai_config(), model, messages).await?;
    Ok(answer)
}
