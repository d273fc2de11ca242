//! Where quiz questions come from.
//!
//! The controller only talks to [`QuestionSource`]; the concrete strategy is
//! picked once when a session is created.

mod remote;
mod static_list;

pub use remote::{Difficulty, RemoteSource, DEFAULT_ENDPOINT};
pub use static_list::StaticSource;

use crate::error::SourceError;
use crate::models::Question;
use async_trait::async_trait;

/// How the controller should pull cards out of a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStrategy {
    /// Load the whole requested slice up front.
    Eager,
    /// Load a small first batch, then one card at a time as the user moves on.
    Progressive,
}

#[async_trait]
pub trait QuestionSource: Send {
    /// Human-readable description shown on the start screen.
    fn describe(&self) -> String;

    fn strategy(&self) -> LoadStrategy;

    /// Restart from the first question. Called on every (re)initialization.
    fn rewind(&mut self);

    /// Returns the next question, or `None` once the source is exhausted.
    async fn fetch_next(&mut self) -> Result<Option<Question>, SourceError>;
}
