use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use quiz_flashcards::{draw, logger, map_key, App, Config};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

#[tokio::main(flavor = "current_thread")]
async fn main() -> io::Result<()> {
    let config = Config::parse();
    logger::init(&config.log_file);

    let source = match config.source_spec() {
        Ok(source) => source,
        Err(e) => {
            eprintln!("quiz-flashcards: {}", e);
            std::process::exit(1);
        }
    };
    logger::log(&format!("Question source: {}", source.describe()));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(source);
    let result = run(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    while !app.should_quit {
        terminal.draw(|f| draw(f, app))?;

        // Fetches run after the loading state has been drawn.
        if app.has_pending() {
            app.run_pending().await;
            continue;
        }

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            let action = map_key(app.state, key);
            app.handle_action(action);
        }
    }

    Ok(())
}
