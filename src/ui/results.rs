use crate::app::App;
use crate::models::AnswerState;
use crate::ui::key_span;
use crate::ui::layout::calculate_results_chunks;
use crate::utils::{calculate_max_scroll, truncate_string};
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw_results(f: &mut Frame, app: &App) {
    let layout = calculate_results_chunks(f.area());
    let Some(results) = app.quiz.as_ref().and_then(|q| q.results()) else {
        return;
    };

    let title = Paragraph::new(format!(
        "FLASH CARD - {} ({:.0}%)",
        results.score_label(),
        results.percentage()
    ))
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let width = layout.content_area.width.saturating_sub(2) as usize;
    let mut text = Text::default();
    for row in results.rows() {
        let (label, color) = match row.state {
            AnswerState::Correct => ("Correct", Color::Green),
            _ => ("Incorrect", Color::Red),
        };
        text.push_line(Line::from(vec![
            Span::styled(
                format!("{:<10}", label),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::from(format!(
                "{}. {}",
                row.number,
                truncate_string(&row.title, width.saturating_sub(14))
            )),
        ]));
        text.push_line(Line::from(format!(
            "{:10}Answer: {}",
            "",
            truncate_string(&row.correct_answer, width.saturating_sub(18))
        )));
        text.push_line(Line::from(""));
    }

    let visible = layout.content_area.height.saturating_sub(2) as usize;
    let scroll = app
        .results_scroll
        .min(calculate_max_scroll(text.lines.len(), visible));

    let list = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(Block::default().borders(Borders::ALL).title("Results"));
    f.render_widget(list, layout.content_area);

    let help_text = vec![Line::from(vec![
        key_span("↑/↓"),
        Span::from(" Scroll  "),
        key_span("Enter/Esc"),
        Span::from(" Back to Start  "),
        key_span("q"),
        Span::from(" Quit"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.footer_area);
}
