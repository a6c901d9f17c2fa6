//! Application orchestration layer
//!
//! Wires the input thread, the session and the renderer together. The session owns all
//! state; this layer only moves actions in and frames out.

pub mod runtime;
pub mod session;

pub use session::Session;

use crate::error::Result;
use crate::input::InputAction;
use crate::render::UIRenderer;
use runtime::spawn_input_thread;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::time::MissedTickBehavior;

pub struct Application {
    session: Session,
    ui_renderer: Box<dyn UIRenderer>,
    /// Period of the debounce tick and of input polling
    tick: Duration,
}

impl Application {
    pub fn new(session: Session, ui_renderer: Box<dyn UIRenderer>, tick: Duration) -> Self {
        Self {
            session,
            ui_renderer,
            tick,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Take over the terminal and run until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        self.ui_renderer.initialize()?;

        let (tx, rx) = mpsc::unbounded_channel();
        let shutdown = Arc::new(AtomicBool::new(false));
        let input_thread = spawn_input_thread(tx, Arc::clone(&shutdown), self.tick);

        let result = self.event_loop(rx).await;

        shutdown.store(true, Ordering::SeqCst);
        if input_thread.join().is_err() {
            log::warn!("input thread panicked");
        }
        self.ui_renderer.cleanup()?;
        result
    }

    /// Apply actions from `rx` and debounce ticks until quit or the channel closes.
    pub async fn event_loop(&mut self, mut rx: UnboundedReceiver<InputAction>) -> Result<()> {
        let (width, height) = self.ui_renderer.get_terminal_size()?;
        self.session.resize(width, height);
        self.render()?;

        let mut ticker = tokio::time::interval(self.tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                action = rx.recv() => {
                    let Some(action) = action else { break };
                    if !self.session.apply(action, Instant::now()) {
                        break;
                    }
                    // Apply everything already queued before drawing.
                    let mut running = true;
                    while let Ok(action) = rx.try_recv() {
                        if !self.session.apply(action, Instant::now()) {
                            running = false;
                            break;
                        }
                    }
                    if !running {
                        break;
                    }
                    self.render()?;
                }
                _ = ticker.tick() => {
                    if self.session.tick(Instant::now()) {
                        self.render()?;
                    }
                }
            }
        }

        log::info!("session ended");
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        let table = self.session.table_view();
        self.ui_renderer.render(&table)
    }
}
