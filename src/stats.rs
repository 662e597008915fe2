//! Cumulative win/loss counters
//!
//! Durable storage belongs to the host page; the engine only keeps the
//! in-memory copy, bumps it on round end and ships it back.

use serde::{Deserialize, Serialize};

/// Wins and losses across sessions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub wins: u32,
    pub losses: u32,
}

impl SessionStats {
    pub fn new(wins: u32, losses: u32) -> Self {
        Self { wins, losses }
    }

    pub fn record_win(&mut self) {
        self.wins = self.wins.saturating_add(1);
    }

    pub fn record_loss(&mut self) {
        self.losses = self.losses.saturating_add(1);
    }

    /// HUD line
    pub fn summary(&self) -> String {
        format!("Wins: {} | Losses: {}", self.wins, self.losses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut stats = SessionStats::default();
        stats.record_win();
        stats.record_loss();
        stats.record_loss();
        assert_eq!(stats, SessionStats::new(1, 2));
        assert_eq!(stats.summary(), "Wins: 1 | Losses: 2");
    }

    #[test]
    fn test_wire_shape() {
        let json = serde_json::to_string(&SessionStats::new(5, 2)).unwrap();
        assert_eq!(json, r#"{"wins":5,"losses":2}"#);
    }
}
