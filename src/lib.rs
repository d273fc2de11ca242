pub mod adapter;
pub mod app;
pub mod bank;
pub mod config;
pub mod controller;
pub mod error;
pub mod input;
pub mod logger;
pub mod models;
pub mod results;
pub mod source;
pub mod ui;
pub mod utils;


// Re-exports for convenience
pub use adapter::{flashcard_from_raw, to_flashcard, RawQuestion};
pub use app::App;
pub use config::{Config, SourceSpec};
pub use controller::{Phase, QuizController, QuizEvent};
pub use error::{BankError, CardError, QuizError, SourceError};
pub use input::{map_key, Action};
pub use models::{AnswerState, AppState, FlashCard, Question, QuizMode};
pub use results::QuizResults;
pub use source::{Difficulty, QuestionSource, RemoteSource, StaticSource};
pub use ui::draw;
