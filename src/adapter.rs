//! Maps question records into display-ready flashcards.
//!
//! Static banks name their fields `answers`/`correctAnswer` while the
//! question endpoint sends `options`/`correct_answer`. [`RawQuestion`] accepts
//! both and every other layer only ever sees [`Question`] and [`FlashCard`].

use crate::error::CardError;
use crate::models::{FlashCard, Question};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawQuestion {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default, alias = "answers")]
    pub options: Option<Vec<String>>,
    #[serde(default, rename = "correctAnswer", alias = "correct_answer")]
    pub correct_answer: Option<String>,
}

impl TryFrom<RawQuestion> for Question {
    type Error = CardError;

    fn try_from(raw: RawQuestion) -> Result<Self, Self::Error> {
        let question = raw.question.ok_or(CardError::MissingField("question"))?;
        let options = raw.options.ok_or(CardError::MissingField("options"))?;
        let correct_answer = raw
            .correct_answer
            .ok_or(CardError::MissingField("correct_answer"))?;

        if options.is_empty() {
            return Err(CardError::NoOptions(question));
        }

        Ok(Question {
            question,
            options,
            correct_answer,
        })
    }
}

pub fn to_flashcard(id: u32, question: Question) -> FlashCard {
    FlashCard {
        id,
        title: question.question,
        options: question.options,
        correct_answer: question.correct_answer,
    }
}

pub fn flashcard_from_raw(id: u32, raw: RawQuestion) -> Result<FlashCard, CardError> {
    Ok(to_flashcard(id, Question::try_from(raw)?))
}
