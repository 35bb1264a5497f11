use crate::config::Config;
use crate::error::AppError;
use crate::events::network::{Event as NetworkEvent, Handler as NetworkEventHandler};
use crate::events::terminal::Handler as TerminalEventHandler;
use crate::gateway::Gateway;
use crate::logger::{CustomLogger, LogBuffer, LOG_CAPACITY};
use crate::state::State;
use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::*;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::sync::Arc;
use tokio::sync::Mutex;

pub type NetworkEventSender = std::sync::mpsc::Sender<NetworkEvent>;
type NetworkEventReceiver = std::sync::mpsc::Receiver<NetworkEvent>;
pub type ConfigSaveSender = std::sync::mpsc::Sender<()>;
type ConfigSaveReceiver = std::sync::mpsc::Receiver<()>;

/// Oversees event processing, state management, and terminal output.
///
pub struct App {
    state: Arc<Mutex<State>>,
    config: Config,
}

impl App {
    /// Start a new application according to the given configuration. Returns
    /// the result of the application execution.
    ///
    pub async fn start(config: Config) -> Result<()> {
        let log_buffer = LogBuffer::new(LOG_CAPACITY);
        CustomLogger::install(LevelFilter::Info, log_buffer.clone())
            .map_err(|e| AppError::Logger(e.to_string()))?;

        info!("Starting application...");
        let (tx, rx) = std::sync::mpsc::channel::<NetworkEvent>();
        let (config_save_tx, config_save_rx) = std::sync::mpsc::channel::<()>();
        let state = State::new(tx, config_save_tx, &config, log_buffer);
        let app = App {
            state: Arc::new(Mutex::new(state)),
            config,
        };
        app.start_network(rx);
        app.start_config_saver(config_save_rx);
        app.start_ui().await?;

        info!("Exiting application...");
        Ok(())
    }

    /// Start a thread that persists the session token whenever state asks.
    ///
    fn start_config_saver(&self, receiver: ConfigSaveReceiver) {
        let state = Arc::clone(&self.state);
        let mut config = self.config.clone();
        std::thread::spawn(move || {
            while receiver.recv().is_ok() {
                let token = state.blocking_lock().access_token().map(str::to_owned);
                let result = match token {
                    Some(token) => config.save_token(token),
                    None => config.clear_token(),
                };
                if let Err(e) = result {
                    error!("Failed to save config: {}", e);
                }
            }
        });
    }

    /// Start a separate thread for asynchronous state mutations.
    ///
    fn start_network(&self, net_receiver: NetworkEventReceiver) {
        debug!("Creating new thread for asynchronous networking...");
        let cloned_state = Arc::clone(&self.state);
        let base_url = self.config.gateway_url.clone();
        let access_token = self.config.access_token.clone();
        std::thread::spawn(move || {
            let runtime = match tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(e) => {
                    error!("{}", AppError::RuntimeCreation(e.to_string()));
                    return;
                }
            };
            runtime.block_on(async {
                let mut gateway = Gateway::new(&base_url, access_token.as_deref());
                let mut network_event_handler =
                    NetworkEventHandler::new(&cloned_state, &mut gateway);
                while let Ok(network_event) = net_receiver.recv() {
                    match network_event_handler.handle(network_event).await {
                        Ok(_) => (),
                        Err(e) => error!("Failed to handle network event: {}", e),
                    }
                }
            })
        });
    }

    /// Begin the terminal event poll on a separate thread before starting the
    /// render loop on the main thread. Return the result following an exit
    /// request or unrecoverable error.
    ///
    async fn start_ui(&self) -> Result<()> {
        debug!("Starting user interface on main thread...");
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        enable_raw_mode()?;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))
            .map_err(|e| AppError::Terminal(e.to_string()))?;
        terminal.hide_cursor()?;

        self.state.lock().await.start();

        let terminal_event_handler = TerminalEventHandler::new();
        let result = loop {
            let mut state = self.state.lock().await;
            if let Err(e) = terminal.draw(|frame| crate::ui::render(frame, &mut state)) {
                break Err(e.into());
            }
            match terminal_event_handler.handle_next(&mut state) {
                Ok(true) => (),
                Ok(false) => {
                    debug!("Received application exit request.");
                    break Ok(());
                }
                Err(e) => break Err(e),
            }
        };

        disable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }
}
