//! Game state and core simulation types
//!
//! Phases, events, and the per-tick render snapshot handed to the host.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::Cell;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ticking
    Running,
    /// Run ended; only a restart leaves this phase
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// Head ran into the body
    Collision,
    /// No free cell left for food
    BoardFull,
}

/// Something that happened during a tick, in order of occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Head moved to a new cell
    Moved { head: Cell },
    /// Food eaten; `score` is the new score
    Ate { score: u32 },
    /// Tick interval shortened
    SpedUp { interval_ms: u32 },
    /// Run ended. Emitted exactly once per run.
    GameOver { final_score: u32, reason: GameOverReason },
}

/// Everything the 2D drawing surface needs for one frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderFrame {
    /// Snake body, head first
    pub body: Vec<Cell>,
    pub food: Cell,
    pub score: u32,
    pub game_over: bool,
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;
    use rand::Rng;

    #[test]
    fn test_rng_state_is_reproducible() {
        let state = RngState::new(42);
        let mut a = state.to_rng();
        let mut b = state.to_rng();
        for _ in 0..8 {
            assert_eq!(a.random::<u32>(), b.random::<u32>());
        }
    }

    #[test]
    fn test_render_frame_json_shape() {
        let frame = RenderFrame {
            body: vec![IVec2::new(2, 1), IVec2::new(1, 1)],
            food: IVec2::new(5, 4),
            score: 3,
            game_over: false,
        };
        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json["body"][0], serde_json::json!([2, 1]));
        assert_eq!(json["food"], serde_json::json!([5, 4]));
        assert_eq!(json["score"], 3);
        assert_eq!(json["game_over"], false);
    }
}
