use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::models::{QuizMode, QUESTION_COUNTS};
use crate::ui::layout::calculate_start_chunks;
use crate::ui::key_span;

fn draw_mode_panel(f: &mut Frame, area: Rect, mode: QuizMode, app: &App) {
    let focused = app.menu.mode() == mode;

    let items: Vec<ListItem> = QUESTION_COUNTS
        .iter()
        .enumerate()
        .map(|(i, count)| {
            let selected = focused && i == app.menu.count_index;
            let style = if selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let marker = if selected { "> " } else { "  " };
            ListItem::new(format!("{}{} questions", marker, count)).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(mode.label())
            .border_style(if focused {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            }),
    );
    f.render_widget(list, area);
}

pub fn draw_start(f: &mut Frame, app: &App) {
    let layout = calculate_start_chunks(f.area());

    let title = Paragraph::new("Flash Cards")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.title_area);

    draw_mode_panel(f, layout.prepare_area, QuizMode::Prepare, app);
    draw_mode_panel(f, layout.simulation_area, QuizMode::Simulation, app);

    let (source_text, source_color) = match &app.status {
        Some(error) => (error.clone(), Color::Red),
        None => (app.source.describe(), Color::Green),
    };
    let source = Paragraph::new(source_text)
        .style(Style::default().fg(source_color))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Questions"));
    f.render_widget(source, layout.source_area);

    let help_text = vec![Line::from(vec![
        key_span("←/→"),
        Span::from(" Mode  "),
        key_span("↑/↓"),
        Span::from(" Questions  "),
        key_span("Enter"),
        Span::from(" Start  "),
        key_span("Esc/Ctrl+C"),
        Span::from(" Quit"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}
