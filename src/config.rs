use crate::bank;
use crate::error::{BankError, SourceError};
use crate::logger::DEFAULT_LOG_FILE;
use crate::models::Question;
use crate::source::{Difficulty, QuestionSource, RemoteSource, StaticSource, DEFAULT_ENDPOINT};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "quiz-flashcards",
    version,
    about = "Multiple-choice flashcards with prepare and simulation modes"
)]
pub struct Config {
    /// Question-generation endpoint; questions are fetched one at a time.
    /// `--endpoint` without a value uses the local default.
    #[arg(
        long,
        env = "QUIZ_ENDPOINT",
        conflicts_with = "bank",
        num_args = 0..=1,
        default_missing_value = DEFAULT_ENDPOINT
    )]
    pub endpoint: Option<String>,

    /// Difficulty sent to the question endpoint
    #[arg(long, value_enum, env = "QUIZ_DIFFICULTY", default_value = "medium")]
    pub difficulty: Difficulty,

    /// Topic sent to the question endpoint
    #[arg(long, env = "QUIZ_TOPIC")]
    pub topic: Option<String>,

    /// JSON or CSV question bank to use instead of the bundled questions
    #[arg(long)]
    pub bank: Option<PathBuf>,

    /// Shuffle static questions at the start of every session
    #[arg(long)]
    pub shuffle: bool,

    /// Diagnostic log file
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,
}

/// Recipe for building a fresh question source for each session.
#[derive(Debug, Clone)]
pub enum SourceSpec {
    Static {
        label: String,
        questions: Vec<Question>,
        shuffle: bool,
    },
    Remote {
        endpoint: String,
        difficulty: Difficulty,
        topic: Option<String>,
    },
}

impl SourceSpec {
    pub fn open(&self) -> Result<Box<dyn QuestionSource>, SourceError> {
        match self {
            SourceSpec::Static {
                label,
                questions,
                shuffle,
            } => {
                let source = StaticSource::new(label.clone(), questions.clone());
                Ok(Box::new(if *shuffle { source.shuffled() } else { source }))
            }
            SourceSpec::Remote {
                endpoint,
                difficulty,
                topic,
            } => Ok(Box::new(
                RemoteSource::new(endpoint.clone())?
                    .with_difficulty(*difficulty)
                    .with_topic(topic.clone()),
            )),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            SourceSpec::Static {
                label, questions, ..
            } => format!("{} ({} questions)", label, questions.len()),
            SourceSpec::Remote {
                endpoint,
                difficulty,
                ..
            } => format!("{} ({:?})", endpoint, difficulty),
        }
    }
}

impl Config {
    /// Resolves where questions come from. Bank files are read here, once.
    pub fn source_spec(&self) -> Result<SourceSpec, BankError> {
        if let Some(endpoint) = &self.endpoint {
            return Ok(SourceSpec::Remote {
                endpoint: endpoint.clone(),
                difficulty: self.difficulty,
                topic: self.topic.clone(),
            });
        }

        let (label, questions) = match &self.bank {
            Some(path) => (path.display().to_string(), bank::load_bank(path)?),
            None => ("Bundled questions".to_string(), bank::bundled_questions()?),
        };

        Ok(SourceSpec::Static {
            label,
            questions,
            shuffle: self.shuffle,
        })
    }
}
