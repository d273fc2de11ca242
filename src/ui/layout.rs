use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct QuizLayout {
    pub header_area: Rect,
    pub question_area: Rect,
    pub options_area: Rect,
    pub feedback_area: Rect,
    pub help_area: Rect,
}

pub struct ResultsLayout {
    pub header_area: Rect,
    pub content_area: Rect,
    pub footer_area: Rect,
}

pub struct StartLayout {
    pub title_area: Rect,
    pub prepare_area: Rect,
    pub simulation_area: Rect,
    pub source_area: Rect,
    pub help_area: Rect,
}

pub fn calculate_quiz_chunks(area: Rect) -> QuizLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Percentage(50),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(area);

    QuizLayout {
        header_area: chunks[0],
        question_area: chunks[1],
        options_area: chunks[2],
        feedback_area: chunks[3],
        help_area: chunks[4],
    }
}

pub fn calculate_results_chunks(area: Rect) -> ResultsLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);

    ResultsLayout {
        header_area: chunks[0],
        content_area: chunks[1],
        footer_area: chunks[2],
    }
}

pub fn calculate_start_chunks(area: Rect) -> StartLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(7),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(area);

    let modes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    StartLayout {
        title_area: rows[0],
        prepare_area: modes[0],
        simulation_area: modes[1],
        source_area: rows[2],
        help_area: rows[3],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_layout() {
        let area = Rect::new(0, 0, 100, 40);
        let layout = calculate_quiz_chunks(area);

        assert_eq!(layout.header_area.height, 3);
        assert_eq!(layout.feedback_area.height, 3);
        assert_eq!(layout.help_area.height, 3);
        assert!(layout.question_area.height >= 4);
        assert!(layout.options_area.height > 0);
    }

    #[test]
    fn test_results_layout() {
        let area = Rect::new(0, 0, 100, 100);
        let layout = calculate_results_chunks(area);

        assert_eq!(layout.header_area.height, 3);
        assert_eq!(layout.footer_area.height, 3);
        // Margin 1 leaves 98 rows, minus header and footer.
        assert_eq!(layout.content_area.height, 92);
    }

    #[test]
    fn test_start_layout_splits_modes_side_by_side() {
        let area = Rect::new(0, 0, 100, 30);
        let layout = calculate_start_chunks(area);

        assert_eq!(layout.title_area.height, 3);
        assert_eq!(layout.prepare_area.y, layout.simulation_area.y);
        assert!(layout.prepare_area.x < layout.simulation_area.x);
        assert_eq!(layout.help_area.height, 3);
    }
}
