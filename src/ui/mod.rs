pub mod layout;
mod quiz;
mod results;
mod start;

pub use layout::{calculate_quiz_chunks, calculate_results_chunks, calculate_start_chunks};
pub use quiz::draw_quiz;
pub use results::draw_results;
pub use start::draw_start;

use crate::app::App;
use crate::models::AppState;
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    Frame,
};

pub fn draw(f: &mut Frame, app: &App) {
    match app.state {
        AppState::Start => draw_start(f, app),
        AppState::Quiz => draw_quiz(f, app),
        AppState::Results => draw_results(f, app),
    }
}

/// Highlighted key name for help lines.
pub(crate) fn key_span(key: &str) -> Span<'_> {
    Span::styled(
        key,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
}
