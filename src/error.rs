use thiserror::Error;

/// Raised when a raw question record cannot be turned into a card.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    #[error("question record is missing field `{0}`")]
    MissingField(&'static str),

    #[error("question record `{0}` has no options")]
    NoOptions(String),
}

/// Errors produced by a question source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("question endpoint returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("could not decode question: {0}")]
    Decode(String),

    #[error(transparent)]
    Card(#[from] CardError),
}

/// Errors surfaced by quiz bank files.
#[derive(Debug, Error)]
pub enum BankError {
    #[error("failed to read question bank: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse question bank: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported question bank format: {0}")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Card(#[from] CardError),
}

/// Errors returned by quiz flow operations. None of them end the session.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("failed to fetch question: {0}")]
    FetchFailed(#[from] SourceError),

    #[error("question {index} has already been answered")]
    AlreadyAnswered { index: usize },

    #[error("{unanswered} question(s) still unanswered")]
    IncompleteQuiz { unanswered: usize },

    #[error("no quiz in progress")]
    NotInProgress,

    #[error("questions can only be reloaded after a failed load")]
    NotRetryable,
}
