use crate::app::App;
use crate::controller::{Phase, QuizController, FEEDBACK_CORRECT};
use crate::models::{AnswerState, QuizMode};
use crate::ui::key_span;
use crate::ui::layout::{calculate_quiz_chunks, QuizLayout};
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

fn draw_header(f: &mut Frame, layout: &QuizLayout, text: String) {
    let header = Paragraph::new(text)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);
}

fn draw_help(f: &mut Frame, layout: &QuizLayout, spans: Vec<Span<'static>>) {
    let help = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}

fn draw_message(f: &mut Frame, layout: &QuizLayout, message: &str, color: Color) {
    let paragraph = Paragraph::new(message.to_string())
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, layout.question_area);
}

fn feedback_style(feedback: &str) -> Style {
    if feedback == FEEDBACK_CORRECT {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }
}

pub fn draw_quiz(f: &mut Frame, app: &App) {
    let layout = calculate_quiz_chunks(f.area());
    let Some(quiz) = app.quiz.as_ref() else {
        return;
    };
    let title = quiz.mode().label();

    match quiz.phase() {
        Phase::Loading => {
            draw_header(f, &layout, title.to_string());
            draw_message(f, &layout, "Loading questions...", Color::Cyan);
            draw_help(f, &layout, vec![key_span("Esc"), Span::from(" Back to Start")]);
        }
        Phase::Error(message) => {
            draw_header(f, &layout, title.to_string());
            let text = match &app.status {
                Some(status) => status.clone(),
                None => format!("Could not load questions: {}", message),
            };
            draw_message(f, &layout, &text, Color::Red);
            draw_help(
                f,
                &layout,
                vec![
                    key_span("r"),
                    Span::from(" Retry  "),
                    key_span("Esc"),
                    Span::from(" Back to Start"),
                ],
            );
        }
        Phase::Empty => {
            draw_header(f, &layout, title.to_string());
            draw_message(f, &layout, "No flashcards available", Color::DarkGray);
            draw_help(f, &layout, vec![key_span("Esc"), Span::from(" Back to Start")]);
        }
        Phase::InProgress(index) => draw_card(f, &layout, app, quiz, *index),
        Phase::Finished => {
            draw_header(f, &layout, title.to_string());
            draw_message(f, &layout, "Quiz finished", Color::Green);
        }
    }
}

fn draw_card(f: &mut Frame, layout: &QuizLayout, app: &App, quiz: &QuizController, index: usize) {
    let card = &quiz.cards()[index];

    let mut progress = format!(
        "Question {} / {} - {}",
        index + 1,
        quiz.expected_total(),
        quiz.mode().label()
    );
    if quiz.mode() == QuizMode::Simulation {
        progress.push_str(&format!(
            " - Answered {}/{}",
            quiz.answered_count(),
            quiz.expected_total()
        ));
    }
    draw_header(f, layout, progress);

    let question = Paragraph::new(Text::from(card.title.as_str()))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Question"));
    f.render_widget(question, layout.question_area);

    let answered = quiz.answers()[index];
    let items: Vec<ListItem> = card
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let selected = i == app.selected_option;
            let marker = if selected { ">" } else { " " };
            let style = if selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(format!("{} {}. {}", marker, i + 1, option)).style(style)
        })
        .collect();

    let options_title = match (quiz.mode(), answered) {
        (QuizMode::Simulation, AnswerState::Unanswered) => "Options",
        (QuizMode::Simulation, _) => "Options (answered)",
        (QuizMode::Prepare, _) => "Options",
    };
    let options = List::new(items).block(Block::default().borders(Borders::ALL).title(options_title));
    f.render_widget(options, layout.options_area);

    let (feedback_text, style) = match (&app.status, quiz.feedback()) {
        (Some(status), _) => (status.clone(), Style::default().fg(Color::Cyan)),
        (None, Some(feedback)) => (feedback.to_string(), feedback_style(feedback)),
        (None, None) => (String::new(), Style::default()),
    };
    let feedback = Paragraph::new(feedback_text)
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(feedback, layout.feedback_area);

    draw_help(
        f,
        layout,
        vec![
            key_span("↑/↓"),
            Span::from(" Select  "),
            key_span("Enter/1-9"),
            Span::from(" Answer  "),
            key_span("←/→"),
            Span::from(" Previous/Next  "),
            key_span("Esc"),
            Span::from(" Back to Start"),
        ],
    );
}
