//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-driven only (speeds are distances per tick)
//! - Seeded RNG only
//! - Stable iteration order (insertion order; the oldest word wins ties)
//! - No rendering or platform dependencies

pub mod input;
pub mod layout;
pub mod state;
pub mod tick;

pub use input::{KeyResult, apply_keystroke, recognized_key};
pub use layout::{ApproxMeasure, TextMeasure, Viewport, WordBounds};
pub use state::{
    Engine, FallingWord, FrameSnapshot, GamePhase, LetterParticle, SessionStats, WordStatus,
};
pub use tick::{spawn_text, spawn_word, tick};
