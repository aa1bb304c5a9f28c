use std::sync::mpsc;

use eframe::egui;
use timeseek_core::{update, AppState, Effect, Msg};
use timeseek_engine::{EngineConfig, EngineHandle};
use timeseek_logging::{seek_error, seek_info};

use super::effects::EffectRunner;
use super::logging::{self, LogDestination};
use super::ui;
use super::ui::constants::{APP_NAME, PANEL_MIN_SIZE, PANEL_SIZE, WINDOW_TITLE};

pub fn run_app() -> eframe::Result<()> {
    // Load `.env` first so it can also select the log destination.
    let dotenv = dotenvy::dotenv();
    logging::initialize(LogDestination::from_env());
    if let Ok(path) = dotenv {
        seek_info!("Loaded environment from {:?}", path);
    }

    let config = match EngineConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            seek_error!("Invalid configuration: {}", err);
            std::process::exit(2);
        }
    };
    seek_info!(
        "Search endpoint {} (timeout {}s), browser at {}",
        config.endpoint,
        config.request_timeout.as_secs(),
        config.devtools_url
    );

    let (engine, events) = match EngineHandle::from_config(&config) {
        Ok(pair) => pair,
        Err(err) => {
            seek_error!("Engine setup failed: {}", err);
            std::process::exit(1);
        }
    };
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let state = AppState::new(config.user_id);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(PANEL_SIZE)
            .with_min_inner_size(PANEL_MIN_SIZE)
            .with_title(WINDOW_TITLE),
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| {
            let runner = EffectRunner::new(engine, events, msg_tx, cc.egui_ctx.clone());
            Ok(Box::new(SidePanelApp::new(state, runner, msg_rx)))
        }),
    )
}

struct SidePanelApp {
    state: AppState,
    runner: EffectRunner,
    msg_rx: mpsc::Receiver<Msg>,
    /// Text box buffer; re-synced from the state whenever the view changes.
    input: String,
    scroll_pending: bool,
}

impl SidePanelApp {
    fn new(state: AppState, runner: EffectRunner, msg_rx: mpsc::Receiver<Msg>) -> Self {
        let input = state.input().to_string();
        Self {
            state,
            runner,
            msg_rx,
            input,
            scroll_pending: false,
        }
    }

    fn process_pending_messages(&mut self) {
        let inbox: Vec<Msg> = self.msg_rx.try_iter().collect();
        for msg in inbox {
            self.dispatch_msg(msg);
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            self.input = state.input().to_string();
        }
        self.state = state;

        if effects.contains(&Effect::ScrollToLatest) {
            self.scroll_pending = true;
        }
        self.runner.enqueue(effects);
    }
}

impl eframe::App for SidePanelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_pending_messages();

        let view = self.state.view();
        let msgs = ui::render::render(ctx, &view, &mut self.input, &mut self.scroll_pending);
        if !msgs.is_empty() {
            ctx.request_repaint();
        }
        for msg in msgs {
            self.dispatch_msg(msg);
        }
    }
}
