use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpeakBandError {
    #[error("No text provided for analysis")]
    EmptyText,

    #[error("Questions and answers are required ({questions} questions, {answers} answers)")]
    ShapeMismatch { questions: usize, answers: usize },

    #[error("Grammar API error: {0}")]
    GrammarApi(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SpeakBandError>;
