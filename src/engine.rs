//! Session lifecycle
//!
//! Owns the board, the win/loss counters and the platform capabilities, and
//! turns simulation events into storage writes and host messages:
//! - life lost: snapshot saved
//! - won: wins + 1, `saveStats` posted, snapshot cleared
//! - lost: losses + 1, `saveStats` posted, snapshot cleared
//!
//! Retry after a round and a viewport resize both rebuild the board from
//! scratch; nothing is soft-reset.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::layout::Layout;
use crate::persistence::SnapshotStore;
use crate::platform::{
    HostChannel, HostMessage, InputAdapter, InputMode, OutboundMessage, parse_host_message,
};
use crate::renderer::{self, Shape};
use crate::sim::{GameEvent, GameState, Rect, SessionPhase, tick};
use crate::stats::SessionStats;
use crate::tuning::Tuning;

/// One running game embedded in a host page
pub struct Engine<S: SnapshotStore, H: HostChannel> {
    state: GameState,
    stats: SessionStats,
    tuning: Tuning,
    input: InputAdapter,
    rng: Pcg32,
    store: S,
    host: H,
}

impl<S: SnapshotStore, H: HostChannel> Engine<S, H> {
    /// Build an engine for a canvas `width` pixels wide.
    ///
    /// Restores lives and bricks from the stored snapshot when it fits the
    /// board; otherwise starts fresh.
    pub fn new(
        width: u32,
        touch_capable: bool,
        seed: u64,
        tuning: Tuning,
        store: S,
        host: H,
    ) -> Self {
        let layout = Layout::for_width(width);
        let state = load_board(layout, &tuning, &store);
        log::info!(
            "Board ready: {}x{} bricks, {} lives",
            layout.rows,
            layout.columns,
            state.lives
        );

        Self {
            state,
            stats: SessionStats::default(),
            tuning,
            input: InputAdapter::new(InputMode::detect(touch_capable)),
            rng: Pcg32::seed_from_u64(seed),
            store,
            host,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct board access for tooling and scripted scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn input_mode(&self) -> InputMode {
        self.input.mode()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    // --- Input (collected, applied on the next frame) ---

    pub fn pointer_move(&mut self, x: f32) {
        self.input.pointer_move(x);
    }

    pub fn pointer_down(&mut self) {
        self.input.pointer_down();
    }

    /// Touch down at game-space (`x`, `y`).
    ///
    /// While an overlay is showing the tap goes to its control instead of
    /// the paddle.
    pub fn touch_start(&mut self, x: f32, y: f32) {
        if self.overlay_button().is_some() {
            self.click(x, y);
            return;
        }
        self.input.touch_start(x);
    }

    pub fn touch_move(&mut self, x: f32) {
        self.input.touch_move(x);
    }

    pub fn touch_end(&mut self) {
        self.input.touch_end();
    }

    /// Run one simulation step.
    ///
    /// `multiplier` is the elapsed time in nominal 60 Hz frames.
    pub fn frame(&mut self, multiplier: f32) -> Vec<GameEvent> {
        let input = self.input.take();
        let events = tick(&mut self.state, &input, multiplier, &self.tuning, &mut self.rng);
        for event in &events {
            self.handle_event(*event);
        }
        events
    }

    fn handle_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::Launched => log::debug!("Ball launched"),
            GameEvent::BrickCleared { row, col } => {
                log::debug!("Brick ({}, {}) cleared", row, col);
            }
            GameEvent::LifeLost { lives } => {
                log::info!("Life lost, {} remaining", lives);
                self.store.save(&self.state.snapshot());
            }
            GameEvent::Won => {
                self.stats.record_win();
                log::info!("Round won ({})", self.stats.summary());
                self.host.post(&OutboundMessage::SaveStats(self.stats));
                self.store.clear();
            }
            GameEvent::Lost => {
                self.stats.record_loss();
                log::info!("Game over ({})", self.stats.summary());
                self.host.post(&OutboundMessage::SaveStats(self.stats));
                self.store.clear();
            }
        }
    }

    /// Apply a raw message from the host page. Returns true if it was used.
    ///
    /// Stats are overwritten whenever a `startGame` arrives, whatever the
    /// current phase.
    pub fn receive_host_message(&mut self, json: &str) -> bool {
        match parse_host_message(json) {
            Some(HostMessage::StartGame(stats)) => {
                self.stats = stats;
                true
            }
            None => false,
        }
    }

    /// Overlay control: start a brand new board after a win or loss
    pub fn retry(&mut self) -> bool {
        if !matches!(self.state.phase, SessionPhase::Won | SessionPhase::Lost) {
            return false;
        }
        log::info!("Resetting game");
        self.store.clear();
        self.state = GameState::new(self.state.layout, &self.tuning);
        self.input.reset();
        true
    }

    /// Click/tap at game-space (`x`, `y`); triggers the overlay control if hit
    pub fn click(&mut self, x: f32, y: f32) -> bool {
        match self.overlay_button() {
            Some(button) if button.contains(glam::Vec2::new(x, y)) => self.retry(),
            _ => false,
        }
    }

    /// Tear down and rebuild the board for a new canvas width
    pub fn resize(&mut self, width: u32) {
        let layout = Layout::for_width(width);
        if layout == self.state.layout {
            return;
        }
        log::info!("Viewport width changed to {}", width);
        self.state = load_board(layout, &self.tuning, &self.store);
        self.input.reset();
    }

    /// Project the current model into drawing primitives
    pub fn draw_list(&self) -> Vec<Shape> {
        renderer::project(&self.state, &self.stats)
    }

    /// Rectangle of the Retry/Play Again control, if an overlay is showing
    pub fn overlay_button(&self) -> Option<Rect> {
        renderer::overlay_button(&self.state)
    }
}

/// Fresh board, with the stored snapshot applied when it fits
fn load_board<S: SnapshotStore>(layout: Layout, tuning: &Tuning, store: &S) -> GameState {
    let mut state = GameState::new(layout, tuning);
    if let Some(snapshot) = store.load() {
        if state.restore(&snapshot) {
            log::info!(
                "Restored snapshot: {} lives, {} bricks cleared",
                snapshot.lives,
                snapshot.cleared()
            );
        } else {
            log::warn!("Stored snapshot does not fit this board, starting fresh");
        }
    }
    state
}
