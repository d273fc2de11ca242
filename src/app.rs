use crate::config::SourceSpec;
use crate::controller::{Phase, QuizController};
use crate::input::Action;
use crate::logger;
use crate::models::{AppState, QuizMode, QUESTION_COUNTS};

/// Start screen selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StartMenu {
    pub mode_index: usize,
    pub count_index: usize,
}

impl StartMenu {
    pub fn mode(&self) -> QuizMode {
        if self.mode_index == 0 {
            QuizMode::Prepare
        } else {
            QuizMode::Simulation
        }
    }

    pub fn count(&self) -> usize {
        QUESTION_COUNTS[self.count_index]
    }
}

/// Controller call that may fetch. Queued so the screen can be redrawn with
/// a loading notice before the call suspends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingOp {
    Initialize,
    Answer(String),
    Advance,
}

#[derive(Debug)]
pub struct App {
    pub state: AppState,
    pub source: SourceSpec,
    pub menu: StartMenu,
    pub quiz: Option<QuizController>,
    pub selected_option: usize,
    pub results_scroll: u16,
    /// Loading notice or start-screen error, shown until the next action.
    pub status: Option<String>,
    pub should_quit: bool,
    pending: Option<PendingOp>,
}

impl App {
    pub fn new(source: SourceSpec) -> Self {
        Self {
            state: AppState::Start,
            source,
            menu: StartMenu::default(),
            quiz: None,
            selected_option: 0,
            results_scroll: 0,
            status: None,
            should_quit: false,
            pending: None,
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::None => return,
            Action::Quit => {
                self.should_quit = true;
                return;
            }
            _ => {}
        }

        match self.state {
            AppState::Start => self.handle_start_action(action),
            AppState::Quiz => self.handle_quiz_action(action),
            AppState::Results => self.handle_results_action(action),
        }
    }

    fn handle_start_action(&mut self, action: Action) {
        match action {
            Action::MenuUp => {
                self.menu.count_index = self.menu.count_index.saturating_sub(1);
            }
            Action::MenuDown => {
                if self.menu.count_index < QUESTION_COUNTS.len() - 1 {
                    self.menu.count_index += 1;
                }
            }
            Action::SwitchMode => {
                self.menu.mode_index = 1 - self.menu.mode_index;
            }
            Action::Start => self.start_session(),
            _ => {}
        }
    }

    fn start_session(&mut self) {
        let mode = self.menu.mode();
        let count = self.menu.count();

        let source = match self.source.open() {
            Ok(source) => source,
            Err(e) => {
                logger::log(&format!("Could not open question source: {}", e));
                self.status = Some(format!("Could not open question source: {}", e));
                return;
            }
        };

        logger::log(&format!(
            "Starting {} with {} questions from {}",
            mode.label(),
            count,
            source.describe()
        ));

        let mut quiz = QuizController::new(mode, count, source);
        quiz.subscribe(Box::new(|event| logger::log(&format!("Quiz event: {:?}", event))));

        self.quiz = Some(quiz);
        self.state = AppState::Quiz;
        self.selected_option = 0;
        self.status = None;
        self.pending = Some(PendingOp::Initialize);
    }

    fn handle_quiz_action(&mut self, action: Action) {
        if action == Action::BackToStart {
            self.back_to_start();
            return;
        }

        let Some(quiz) = self.quiz.as_ref() else {
            return;
        };

        if matches!(quiz.phase(), Phase::Error(_)) {
            if action == Action::Retry {
                self.status = Some("Retrying...".to_string());
                self.pending = Some(PendingOp::Initialize);
            }
            return;
        }

        if quiz.current_index().is_none() {
            return;
        }

        let option_count = quiz.current_card().map(|c| c.options.len()).unwrap_or(0);
        let needs_fetch = quiz.needs_fetch_to_advance();

        match action {
            Action::OptionUp => {
                self.selected_option = self.selected_option.saturating_sub(1);
            }
            Action::OptionDown => {
                if self.selected_option + 1 < option_count {
                    self.selected_option += 1;
                }
            }
            Action::Submit => self.queue_answer(self.selected_option),
            Action::Choose(i) if i < option_count => {
                self.selected_option = i;
                self.queue_answer(i);
            }
            Action::Next => {
                if needs_fetch {
                    self.status = Some("Loading next question...".to_string());
                }
                self.pending = Some(PendingOp::Advance);
            }
            Action::Previous => {
                if let Some(quiz) = self.quiz.as_mut() {
                    let _ = quiz.retreat();
                }
                self.selected_option = 0;
                self.status = None;
            }
            _ => {}
        }
    }

    fn queue_answer(&mut self, option: usize) {
        let selected = self
            .quiz
            .as_ref()
            .and_then(|q| q.current_card())
            .and_then(|c| c.options.get(option))
            .cloned();

        if let Some(selected) = selected {
            let needs_fetch = self.quiz.as_ref().is_some_and(|q| q.needs_fetch_to_answer());
            self.status = needs_fetch.then(|| "Loading next question...".to_string());
            self.pending = Some(PendingOp::Answer(selected));
        }
    }

    fn handle_results_action(&mut self, action: Action) {
        match action {
            Action::ScrollUp => {
                self.results_scroll = self.results_scroll.saturating_sub(1);
            }
            Action::ScrollDown => {
                self.results_scroll = self.results_scroll.saturating_add(1);
            }
            Action::BackToStart => self.back_to_start(),
            _ => {}
        }
    }

    /// Discards the session without confirmation.
    fn back_to_start(&mut self) {
        if self.quiz.take().is_some() {
            logger::log("Session discarded");
        }
        self.state = AppState::Start;
        self.pending = None;
        self.status = None;
        self.selected_option = 0;
        self.results_scroll = 0;
    }

    /// Runs the queued controller call. Errors are already reflected in the
    /// controller's phase or feedback, so they are only logged here.
    pub async fn run_pending(&mut self) {
        let Some(op) = self.pending.take() else {
            return;
        };
        let Some(quiz) = self.quiz.as_mut() else {
            return;
        };

        let before = quiz.current_index();
        let result = match op {
            PendingOp::Initialize => quiz.initialize().await,
            PendingOp::Answer(selected) => quiz.answer(&selected).await.map(|_| ()),
            PendingOp::Advance => quiz.advance().await,
        };

        if let Err(e) = result {
            logger::log(&format!("Quiz operation rejected: {}", e));
        }

        if quiz.current_index() != before {
            self.selected_option = 0;
        }
        if quiz.is_finished() {
            self.state = AppState::Results;
            self.results_scroll = 0;
        }
        self.status = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnswerState, Question};

    fn spec(questions: Vec<Question>) -> SourceSpec {
        SourceSpec::Static {
            label: "test".to_string(),
            questions,
            shuffle: false,
        }
    }

    fn two_questions() -> Vec<Question> {
        vec![
            Question {
                question: "Capital of France?".to_string(),
                options: vec!["Rome".to_string(), "Paris".to_string()],
                correct_answer: "Paris".to_string(),
            },
            Question {
                question: "6 x 7?".to_string(),
                options: vec!["42".to_string(), "7".to_string()],
                correct_answer: "42".to_string(),
            },
        ]
    }

    async fn act(app: &mut App, action: Action) {
        app.handle_action(action);
        app.run_pending().await;
    }

    #[tokio::test]
    async fn test_full_simulation_flow() {
        let mut app = App::new(spec(two_questions()));
        app.handle_action(Action::SwitchMode);
        assert_eq!(app.menu.mode(), QuizMode::Simulation);

        app.handle_action(Action::Start);
        assert_eq!(app.state, AppState::Quiz);
        assert!(app.has_pending());
        assert_eq!(app.quiz.as_ref().unwrap().phase(), &Phase::Loading);

        app.run_pending().await;
        assert_eq!(app.quiz.as_ref().unwrap().cards().len(), 2);

        act(&mut app, Action::Choose(1)).await;
        assert_eq!(
            app.quiz.as_ref().unwrap().answers(),
            &[AnswerState::Correct, AnswerState::Unanswered]
        );

        act(&mut app, Action::Next).await;
        assert_eq!(app.quiz.as_ref().unwrap().current_index(), Some(1));
        assert_eq!(app.selected_option, 0);

        act(&mut app, Action::OptionDown).await;
        act(&mut app, Action::Submit).await;
        assert_eq!(
            app.quiz.as_ref().unwrap().answers(),
            &[AnswerState::Correct, AnswerState::Incorrect]
        );

        act(&mut app, Action::Next).await;
        assert_eq!(app.state, AppState::Results);
        let results = app.quiz.as_ref().unwrap().results().unwrap();
        assert_eq!(results.score_label(), "1/2");

        act(&mut app, Action::BackToStart).await;
        assert_eq!(app.state, AppState::Start);
        assert!(app.quiz.is_none());
    }

    #[tokio::test]
    async fn test_answer_on_last_loaded_card_shows_loading() {
        use crate::source::Difficulty;
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/question"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "question": "6 x 7?",
                "options": ["42", "7"],
                "correct_answer": "42"
            })))
            .mount(&server)
            .await;

        let mut app = App::new(SourceSpec::Remote {
            endpoint: format!("{}/question", server.uri()),
            difficulty: Difficulty::Medium,
            topic: None,
        });
        app.menu.mode_index = 1;
        act(&mut app, Action::Start).await;
        assert_eq!(app.quiz.as_ref().unwrap().cards().len(), 2);

        // Card one is not the last loaded card, so nothing is fetched.
        app.handle_action(Action::Choose(0));
        assert_eq!(app.status, None);
        app.run_pending().await;

        act(&mut app, Action::Next).await;
        app.handle_action(Action::Choose(0));
        assert_eq!(app.status.as_deref(), Some("Loading next question..."));

        app.run_pending().await;
        assert_eq!(app.status, None);
        assert_eq!(app.quiz.as_ref().unwrap().cards().len(), 3);
    }

    #[tokio::test]
    async fn test_incomplete_simulation_stays_in_quiz() {
        let mut app = App::new(spec(two_questions()));
        app.menu.mode_index = 1;
        act(&mut app, Action::Start).await;

        act(&mut app, Action::Next).await;
        act(&mut app, Action::Next).await;

        assert_eq!(app.state, AppState::Quiz);
        let quiz = app.quiz.as_ref().unwrap();
        assert_eq!(quiz.current_index(), Some(1));
        assert!(quiz.feedback().unwrap().starts_with("Answer all questions first"));
    }

    #[tokio::test]
    async fn test_back_to_start_discards_session_mid_quiz() {
        let mut app = App::new(spec(two_questions()));
        act(&mut app, Action::Start).await;
        act(&mut app, Action::Choose(0)).await;

        act(&mut app, Action::BackToStart).await;
        assert_eq!(app.state, AppState::Start);
        assert!(app.quiz.is_none());
        assert!(!app.has_pending());
    }

    #[tokio::test]
    async fn test_out_of_range_choice_is_ignored() {
        let mut app = App::new(spec(two_questions()));
        act(&mut app, Action::Start).await;

        app.handle_action(Action::Choose(5));
        assert!(!app.has_pending());
    }

    #[tokio::test]
    async fn test_empty_bank_shows_nothing() {
        let mut app = App::new(spec(Vec::new()));
        act(&mut app, Action::Start).await;

        assert_eq!(app.state, AppState::Quiz);
        assert_eq!(app.quiz.as_ref().unwrap().phase(), &Phase::Empty);
        act(&mut app, Action::Next).await;
        assert_eq!(app.quiz.as_ref().unwrap().phase(), &Phase::Empty);
    }

    #[tokio::test]
    async fn test_prepare_previous_wraps() {
        let mut app = App::new(spec(two_questions()));
        act(&mut app, Action::Start).await;
        act(&mut app, Action::Previous).await;

        assert_eq!(app.quiz.as_ref().unwrap().current_index(), Some(1));
    }

    #[test]
    fn test_menu_bounds() {
        let mut app = App::new(spec(Vec::new()));
        app.handle_action(Action::MenuUp);
        assert_eq!(app.menu.count(), 25);
        for _ in 0..5 {
            app.handle_action(Action::MenuDown);
        }
        assert_eq!(app.menu.count(), 100);
        app.handle_action(Action::Quit);
        assert!(app.should_quit);
    }
}
