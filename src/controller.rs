//! Quiz flow controller.
//!
//! Owns one quiz session: the loaded cards, the answer recorded for each of
//! them, the current position and the transient feedback line. Every
//! operation that may hit the question source is `async` and takes
//! `&mut self`, so a session never has more than one fetch in flight.
//!
//! Simulation sessions move through
//! `Loading -> (Error | Empty | InProgress) -> Finished`; prepare sessions never
//! finish and wrap around in both directions instead.

use crate::adapter::to_flashcard;
use crate::error::QuizError;
use crate::logger;
use crate::models::{AnswerState, FlashCard, Question, QuizMode};
use crate::results::QuizResults;
use crate::source::{LoadStrategy, QuestionSource};

/// Cards fetched up front from a progressive source so the first screen
/// does not flash a loading state when moving to card two.
pub const EAGER_BATCH: usize = 2;

pub const FEEDBACK_CORRECT: &str = "Correct!";
pub const FEEDBACK_INCORRECT: &str = "Incorrect!";
pub const FEEDBACK_ALREADY_ANSWERED: &str = "You have already answered this question";
pub const FEEDBACK_INCOMPLETE: &str = "Answer all questions first";
pub const FEEDBACK_LOAD_FAILED: &str = "Could not load the next question";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Loading,
    /// Initial fetch failed; `retry` starts over.
    Error(String),
    /// Nothing to show: zero cards requested or the source had none.
    Empty,
    InProgress(usize),
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizEvent {
    Loaded { total: usize },
    LoadFailed { message: String },
    Answered { index: usize, state: AnswerState },
    Rejected { index: usize, notice: String },
    Moved { index: usize },
    Finished { correct: usize, total: usize },
}

pub type Observer = Box<dyn FnMut(&QuizEvent) + Send>;

pub struct QuizController {
    mode: QuizMode,
    requested: usize,
    source: Box<dyn QuestionSource>,
    cards: Vec<FlashCard>,
    answers: Vec<AnswerState>,
    answered_count: usize,
    feedback: Option<String>,
    phase: Phase,
    exhausted: bool,
    observers: Vec<Observer>,
}

impl std::fmt::Debug for QuizController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizController")
            .field("mode", &self.mode)
            .field("requested", &self.requested)
            .field("cards", &self.cards.len())
            .field("answered_count", &self.answered_count)
            .field("phase", &self.phase)
            .finish()
    }
}

impl QuizController {
    /// Creates a session in the `Loading` phase. Nothing is fetched until
    /// [`initialize`](Self::initialize) runs.
    pub fn new(mode: QuizMode, requested: usize, source: Box<dyn QuestionSource>) -> Self {
        Self {
            mode,
            requested,
            source,
            cards: Vec::new(),
            answers: Vec::new(),
            answered_count: 0,
            feedback: None,
            phase: Phase::Loading,
            exhausted: false,
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: Observer) {
        self.observers.push(observer);
    }

    /// Loads the first batch. Only valid while loading or after a failed load.
    pub async fn initialize(&mut self) -> Result<(), QuizError> {
        if !matches!(self.phase, Phase::Loading | Phase::Error(_)) {
            return Err(QuizError::NotRetryable);
        }

        self.cards.clear();
        self.answers.clear();
        self.answered_count = 0;
        self.feedback = None;
        self.exhausted = false;
        self.phase = Phase::Loading;
        self.source.rewind();

        let batch = match self.source.strategy() {
            LoadStrategy::Eager => self.requested,
            LoadStrategy::Progressive => EAGER_BATCH.min(self.requested),
        };

        for _ in 0..batch {
            match self.source.fetch_next().await {
                Ok(Some(question)) => self.push_card(question),
                Ok(None) => {
                    self.exhausted = true;
                    break;
                }
                Err(e) => {
                    let message = e.to_string();
                    logger::log(&format!("Initial load failed: {}", message));
                    self.cards.clear();
                    self.answers.clear();
                    self.phase = Phase::Error(message.clone());
                    self.notify(QuizEvent::LoadFailed { message });
                    return Err(e.into());
                }
            }
        }

        self.phase = if self.cards.is_empty() {
            Phase::Empty
        } else {
            Phase::InProgress(0)
        };
        self.notify(QuizEvent::Loaded {
            total: self.cards.len(),
        });
        Ok(())
    }

    /// Starts the session over after a failed initial load.
    pub async fn retry(&mut self) -> Result<(), QuizError> {
        if !matches!(self.phase, Phase::Error(_)) {
            return Err(QuizError::NotRetryable);
        }
        self.initialize().await
    }

    pub async fn answer(&mut self, selected: &str) -> Result<AnswerState, QuizError> {
        let index = self.current_index().ok_or(QuizError::NotInProgress)?;
        let card = &self.cards[index];
        let state = AnswerState::from_correctness(card.is_correct(selected));
        let feedback = self.answer_feedback(card, state);

        if self.answers[index].is_answered() {
            return match self.mode {
                QuizMode::Prepare => {
                    self.feedback = Some(feedback);
                    Ok(state)
                }
                QuizMode::Simulation => {
                    self.feedback = Some(FEEDBACK_ALREADY_ANSWERED.to_string());
                    self.notify(QuizEvent::Rejected {
                        index,
                        notice: FEEDBACK_ALREADY_ANSWERED.to_string(),
                    });
                    Err(QuizError::AlreadyAnswered { index })
                }
            };
        }

        self.answers[index] = state;
        self.answered_count += 1;
        self.feedback = Some(feedback);
        self.notify(QuizEvent::Answered { index, state });

        // Fetch the next card only once the last loaded one is answered.
        if index + 1 == self.cards.len()
            && let Err(e) = self.load_one().await
        {
            let message = e.to_string();
            self.feedback = Some(format!(
                "{} {}: {}",
                self.feedback.take().unwrap_or_default(),
                FEEDBACK_LOAD_FAILED,
                message
            ));
            self.notify(QuizEvent::LoadFailed { message });
        }

        Ok(state)
    }

    /// True when answering the current card would fetch the next one.
    pub fn needs_fetch_to_answer(&self) -> bool {
        matches!(self.phase, Phase::InProgress(i)
            if i + 1 == self.cards.len() && !self.answers[i].is_answered())
            && self.can_load_more()
    }

    /// True when `advance` would have to fetch before it can move.
    pub fn needs_fetch_to_advance(&self) -> bool {
        matches!(self.phase, Phase::InProgress(i) if i + 1 == self.cards.len())
            && self.can_load_more()
    }

    pub async fn advance(&mut self) -> Result<(), QuizError> {
        let index = self.current_index().ok_or(QuizError::NotInProgress)?;

        if index + 1 < self.cards.len() {
            self.move_to(index + 1);
            return Ok(());
        }

        if self.can_load_more() {
            match self.load_one().await {
                Ok(true) => {
                    self.move_to(index + 1);
                    return Ok(());
                }
                Ok(false) => {}
                Err(e) => {
                    let message = e.to_string();
                    self.feedback = Some(format!("{}: {}", FEEDBACK_LOAD_FAILED, message));
                    self.notify(QuizEvent::LoadFailed { message });
                    return Err(e);
                }
            }
        }

        match self.mode {
            QuizMode::Prepare => self.move_to(0),
            QuizMode::Simulation => {
                let unanswered = self.unanswered_count();
                if unanswered > 0 {
                    let notice = format!("{} ({} left)", FEEDBACK_INCOMPLETE, unanswered);
                    self.feedback = Some(notice.clone());
                    self.notify(QuizEvent::Rejected { index, notice });
                    return Err(QuizError::IncompleteQuiz { unanswered });
                }

                self.phase = Phase::Finished;
                self.feedback = None;
                self.notify(QuizEvent::Finished {
                    correct: self.correct_count(),
                    total: self.cards.len(),
                });
            }
        }

        Ok(())
    }

    pub fn retreat(&mut self) -> Result<(), QuizError> {
        let index = self.current_index().ok_or(QuizError::NotInProgress)?;

        if index > 0 {
            self.move_to(index - 1);
        } else if self.mode == QuizMode::Prepare {
            self.move_to(self.cards.len() - 1);
        }

        Ok(())
    }

    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    pub fn requested(&self) -> usize {
        self.requested
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn cards(&self) -> &[FlashCard] {
        &self.cards
    }

    pub fn answers(&self) -> &[AnswerState] {
        &self.answers
    }

    pub fn answered_count(&self) -> usize {
        self.answered_count
    }

    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    pub fn source_description(&self) -> String {
        self.source.describe()
    }

    pub fn current_index(&self) -> Option<usize> {
        match self.phase {
            Phase::InProgress(index) => Some(index),
            _ => None,
        }
    }

    pub fn current_card(&self) -> Option<&FlashCard> {
        self.current_index().map(|i| &self.cards[i])
    }

    pub fn current_answer(&self) -> Option<AnswerState> {
        self.current_index().map(|i| self.answers[i])
    }

    /// Number of cards the session will hold once fully loaded, as far as
    /// is known right now.
    pub fn expected_total(&self) -> usize {
        if self.exhausted {
            self.cards.len()
        } else {
            self.requested.max(self.cards.len())
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn correct_count(&self) -> usize {
        self.answers
            .iter()
            .filter(|a| **a == AnswerState::Correct)
            .count()
    }

    pub fn unanswered_count(&self) -> usize {
        self.answers.iter().filter(|a| !a.is_answered()).count()
    }

    /// Read-only results, available once the session has finished.
    pub fn results(&self) -> Option<QuizResults> {
        self.is_finished()
            .then(|| QuizResults::new(&self.cards, &self.answers))
    }

    fn answer_feedback(&self, card: &FlashCard, state: AnswerState) -> String {
        match (self.mode, state) {
            (_, AnswerState::Correct) => FEEDBACK_CORRECT.to_string(),
            (QuizMode::Prepare, _) => format!(
                "{} The correct answer is: {}",
                FEEDBACK_INCORRECT, card.correct_answer
            ),
            (QuizMode::Simulation, _) => FEEDBACK_INCORRECT.to_string(),
        }
    }

    fn can_load_more(&self) -> bool {
        !self.exhausted && self.cards.len() < self.requested
    }

    /// Fetches one more card if the session still wants one. Returns whether
    /// a card was appended.
    async fn load_one(&mut self) -> Result<bool, QuizError> {
        if !self.can_load_more() {
            return Ok(false);
        }

        match self.source.fetch_next().await? {
            Some(question) => {
                self.push_card(question);
                self.notify(QuizEvent::Loaded {
                    total: self.cards.len(),
                });
                Ok(true)
            }
            None => {
                self.exhausted = true;
                Ok(false)
            }
        }
    }

    fn push_card(&mut self, question: Question) {
        let id = self.cards.len() as u32 + 1;
        if !question.has_correct_option() {
            logger::log(&format!(
                "Card {} has no option matching its answer {:?}: {}",
                id, question.correct_answer, question.question
            ));
        }
        self.cards.push(to_flashcard(id, question));
        self.answers.push(AnswerState::Unanswered);
    }

    fn move_to(&mut self, index: usize) {
        self.phase = Phase::InProgress(index);
        self.feedback = None;
        self.notify(QuizEvent::Moved { index });
    }

    fn notify(&mut self, event: QuizEvent) {
        for observer in self.observers.iter_mut() {
            observer(&event);
        }
    }
}
