use crate::assistant::{AssistantError, ask};
use crate::llm_config::LlmConfig;
use thiserror::Error;

/// Maximum number of words per chunk.
pub const CHUNK_WORDS: usize = 300;
/// Number of leading chunks passed to the model as context.
pub const CONTEXT_CHUNKS: usize = 3;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read pdf: {0}")]
    Pdf(#[from] pdf_extract::OutputError),
    #[error("pdf extraction aborted")]
    Extraction,
    #[error("the document contains no text")]
    NoText,
    #[error(transparent)]
    Assistant(#[from] AssistantError),
}

/// Extracts the text of a pdf on the blocking thread pool.
pub async fn extract_text(pdf: Vec<u8>) -> Result<String, DocumentError> {
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&pdf))
        .await
        .map_err(|error| {
            tracing::warn!(error = &error as &dyn std::error::Error, "pdf extraction panicked");
            DocumentError::Extraction
        })??;
    Ok(text)
}

/// Splits text into chunks of at most `words` whitespace separated words.
#[must_use]
pub fn chunk_text(text: &str, words: usize) -> Vec<String> {
    let words_in_text: Vec<&str> = text.split_whitespace().collect();
    words_in_text
        .chunks(words.max(1))
        .map(|chunk| chunk.join(" "))
        .collect()
}

/// Context built from the first chunks of the text, `None` if the text has no words.
#[must_use]
pub fn document_context(text: &str) -> Option<String> {
    let chunks = chunk_text(text, CHUNK_WORDS);
    if chunks.is_empty() {
        return None;
    }
    Some(chunks.into_iter().take(CONTEXT_CHUNKS).collect::<Vec<_>>().join("\n\n"))
}

/// Answers a question about an uploaded pdf.
pub async fn ask_document(llm_config: &LlmConfig, pdf: Vec<u8>, question: &str) -> Result<String, DocumentError> {
    if question.trim().is_empty() {
        return Err(AssistantError::EmptyQuestion.into());
    }
    let text = extract_text(pdf).await?;
    let context = document_context(&text).ok_or(DocumentError::NoText)?;
    tracing::debug!(context_len = context.len(), "asking question about document");
    Ok(ask(llm_config, llm_config.get_document_model(), question, Some(&context)).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn words(count: usize) -> String {
        (0..count).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" \n ")
    }

    #[test]
    fn test_chunk_text() {
        let chunks = chunk_text(&words(650), CHUNK_WORDS);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].split(' ').count(), 300);
        assert_eq!(chunks[2].split(' ').count(), 50);
        assert!(chunks[1].starts_with("w300 "));
        assert!(chunk_text("   \n\t", CHUNK_WORDS).is_empty());
    }

    #[test]
    fn test_context_uses_first_chunks() {
        let context = document_context(&words(1000)).unwrap();
        let chunks: Vec<_> = context.split("\n\n").collect();
        assert_eq!(chunks.len(), CONTEXT_CHUNKS);
        assert!(!context.contains("w900"));
        assert!(context.contains("w899"));
        assert!(document_context("").is_none());
    }

    #[test(tokio::test)]
    async fn test_not_a_pdf() {
        assert!(extract_text(b"plain text".to_vec()).await.is_err());
    }

    #[test(tokio::test)]
    async fn test_empty_question_is_rejected_before_extraction() {
        let result = ask_document(&LlmConfig::default(), vec![], " ").await;
        assert!(matches!(
            result,
            Err(DocumentError::Assistant(AssistantError::EmptyQuestion))
        ));
    }
}
