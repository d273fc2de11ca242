/// A question as delivered by a question source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl Question {
    /// False when no option matches the correct answer, so the card can
    /// never be answered correctly.
    pub fn has_correct_option(&self) -> bool {
        self.options.contains(&self.correct_answer)
    }
}

/// Display-ready card derived from a [`Question`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashCard {
    pub id: u32,
    pub title: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl FlashCard {
    pub fn is_correct(&self, selected: &str) -> bool {
        selected == self.correct_answer
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnswerState {
    #[default]
    Unanswered,
    Correct,
    Incorrect,
}

impl AnswerState {
    pub fn is_answered(self) -> bool {
        self != AnswerState::Unanswered
    }

    pub fn from_correctness(correct: bool) -> Self {
        if correct {
            AnswerState::Correct
        } else {
            AnswerState::Incorrect
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizMode {
    /// Free navigation, no completion gate, no score.
    Prepare,
    /// Every card must be answered before results are shown.
    Simulation,
}

impl QuizMode {
    pub fn label(self) -> &'static str {
        match self {
            QuizMode::Prepare => "Prepare Mode",
            QuizMode::Simulation => "Simulation Mode",
        }
    }
}

/// Question counts offered on the start screen.
pub const QUESTION_COUNTS: [usize; 3] = [25, 50, 100];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Start,
    Quiz,
    Results,
}
