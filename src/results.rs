use crate::models::{AnswerState, FlashCard};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub number: usize,
    pub title: String,
    pub correct_answer: String,
    pub state: AnswerState,
}

/// Snapshot of a finished session, in original card order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResults {
    rows: Vec<ResultRow>,
    correct: usize,
}

impl QuizResults {
    pub fn new(cards: &[FlashCard], answers: &[AnswerState]) -> Self {
        let rows: Vec<ResultRow> = cards
            .iter()
            .zip(answers.iter())
            .enumerate()
            .map(|(i, (card, state))| ResultRow {
                number: i + 1,
                title: card.title.clone(),
                correct_answer: card.correct_answer.clone(),
                state: *state,
            })
            .collect();
        let correct = rows
            .iter()
            .filter(|r| r.state == AnswerState::Correct)
            .count();

        Self { rows, correct }
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn correct(&self) -> usize {
        self.correct
    }

    pub fn total(&self) -> usize {
        self.rows.len()
    }

    pub fn score_label(&self) -> String {
        format!("{}/{}", self.correct, self.total())
    }

    pub fn percentage(&self) -> f32 {
        if self.rows.is_empty() {
            0.0
        } else {
            self.correct as f32 * 100.0 / self.rows.len() as f32
        }
    }
}
