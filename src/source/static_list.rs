use super::{LoadStrategy, QuestionSource};
use crate::error::SourceError;
use crate::models::Question;
use async_trait::async_trait;
use rand::seq::SliceRandom;

/// A fixed, ordered list of questions.
#[derive(Debug, Clone)]
pub struct StaticSource {
    label: String,
    questions: Vec<Question>,
    cursor: usize,
    shuffle: bool,
}

impl StaticSource {
    pub fn new(label: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            label: label.into(),
            questions,
            cursor: 0,
            shuffle: false,
        }
    }

    /// Shuffle the list on every rewind instead of keeping file order.
    pub fn shuffled(mut self) -> Self {
        self.shuffle = true;
        self
    }
}

#[async_trait]
impl QuestionSource for StaticSource {
    fn describe(&self) -> String {
        format!("{} ({} questions)", self.label, self.questions.len())
    }

    fn strategy(&self) -> LoadStrategy {
        LoadStrategy::Eager
    }

    fn rewind(&mut self) {
        self.cursor = 0;
        if self.shuffle {
            self.questions.shuffle(&mut rand::thread_rng());
        }
    }

    async fn fetch_next(&mut self) -> Result<Option<Question>, SourceError> {
        let next = self.questions.get(self.cursor).cloned();
        if next.is_some() {
            self.cursor += 1;
        }
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(text: &str) -> Question {
        Question {
            question: text.to_string(),
            options: vec!["a".to_string(), "b".to_string()],
            correct_answer: "a".to_string(),
        }
    }

    #[tokio::test]
    async fn test_yields_in_order_then_exhausts() {
        let mut source = StaticSource::new("test", vec![question("Q1"), question("Q2")]);

        assert_eq!(source.fetch_next().await.unwrap().unwrap().question, "Q1");
        assert_eq!(source.fetch_next().await.unwrap().unwrap().question, "Q2");
        assert!(source.fetch_next().await.unwrap().is_none());
        assert!(source.fetch_next().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rewind_restarts() {
        let mut source = StaticSource::new("test", vec![question("Q1"), question("Q2")]);
        source.fetch_next().await.unwrap();
        source.fetch_next().await.unwrap();

        source.rewind();
        assert_eq!(source.fetch_next().await.unwrap().unwrap().question, "Q1");
    }

    #[tokio::test]
    async fn test_shuffled_keeps_every_question() {
        let questions: Vec<Question> = (0..20).map(|i| question(&format!("Q{i}"))).collect();
        let mut source = StaticSource::new("test", questions).shuffled();
        source.rewind();

        let mut seen = Vec::new();
        while let Some(q) = source.fetch_next().await.unwrap() {
            seen.push(q.question);
        }
        seen.sort();
        let mut expected: Vec<String> = (0..20).map(|i| format!("Q{i}")).collect();
        expected.sort();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_describe_and_strategy() {
        let source = StaticSource::new("Bundled questions", vec![question("Q1")]);
        assert_eq!(source.describe(), "Bundled questions (1 questions)");
        assert_eq!(source.strategy(), LoadStrategy::Eager);
    }
}
