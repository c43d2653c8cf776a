use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),
    #[error("score {score} is outside of 0..={total}")]
    ScoreOutOfRange { score: i32, total: i32 },
}
