use std::io;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{error, info};

use random_picker::app::App;
use random_picker::config::PickerConfig;
use random_picker::error::PickerResult;
use random_picker::event::{Event, EventHandler};
use random_picker::{logging, ui};

#[tokio::main(flavor = "current_thread")]
async fn main() -> PickerResult<()> {
    let config = PickerConfig::from_env()?;
    logging::init(&config.log_path)?;
    info!(?config, "starting");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run(&mut terminal, config).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        error!(%err, "exited with error");
    }
    result
}

async fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, config: PickerConfig) -> PickerResult<()> {
    let mut events = EventHandler::new(config.frame_rate_ms);
    let mut app = App::new(config, events.sender());

    // Main loop
    loop {
        terminal.draw(|frame| ui::render(frame, &mut app))?;

        match events.next().await? {
            Event::Tick => app.on_tick(),
            Event::Key(key) => app.on_key(key),
            Event::Settled(item) => app.on_settled(item),
        }

        if app.should_quit {
            break;
        }
    }

    info!("quitting");
    Ok(())
}
