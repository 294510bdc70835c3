//! Word Rain - a falling-words typing game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (falling words, keystroke matching, scoring)
//! - `words`: Word bank with difficulty-weighted selection
//! - `variation`: Named gameplay presets selected once per session
//!
//! Rendering, audio and input focus management are external collaborators:
//! the crate exposes engine state and mutators, nothing here draws or plays
//! sound.

pub mod sim;
pub mod variation;
pub mod words;

pub use sim::{Engine, GamePhase, KeyResult, Viewport};
pub use variation::Variation;
pub use words::WordBank;

/// Game configuration constants
pub mod consts {
    /// Simulation tick rate. Fall speeds are distances per tick, so the game
    /// is frame-driven rather than wall-clock scaled.
    pub const TICK_RATE: u32 = 60;
    /// Seconds per tick, for particle lifetimes and spin animation
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Words spawn this far above the visible top edge
    pub const SPAWN_Y: f32 = -50.0;
    /// Missed words stay visible this far past the bottom before pruning
    pub const OFFSCREEN_GRACE: f32 = 200.0;
    /// Minimum padding from the viewport edges when choosing a spawn x
    pub const SPAWN_PADDING: f32 = 20.0;

    /// Score awarded per correct keystroke
    pub const HIT_BONUS: u64 = 10;
    /// Score awarded when a word is fully typed
    pub const COMPLETION_BONUS: u64 = 50;
    /// Missed words that end the session
    pub const MISS_LIMIT: u32 = 5;
    /// Words typed per difficulty level
    pub const WORDS_PER_LEVEL: u32 = 10;
    /// Seconds per pace level for elapsed-time paced variations
    pub const SECS_PER_ELAPSED_LEVEL: f32 = 30.0;

    /// Fallback character width as a fraction of font size
    pub const AVG_CHAR_WIDTH: f32 = 0.6;
    /// Line height as a fraction of font size for wrapped text
    pub const LINE_HEIGHT: f32 = 1.2;
    /// Hard cap on wrapped line width in pixels
    pub const MAX_LINE_WIDTH: f32 = 400.0;
    /// Wrapped lines never exceed this fraction of the viewport width
    pub const WRAP_FRACTION: f32 = 0.8;

    /// Rotation chance never exceeds this, no matter the pace
    pub const ROTATION_CHANCE_CAP: f32 = 0.8;
    /// Degrees added to the rotation angle bound per pace level
    pub const ROTATION_ANGLE_PER_PACE: f32 = 0.5;

    /// Spawn scheduler minimum-guarantee interval in seconds
    pub const MIN_SPAWN_INTERVAL: f32 = 0.1;

    /// Maximum live explosion particles (oldest evicted first)
    pub const MAX_PARTICLES: usize = 512;
    /// Particle velocity spread, scaled by word length
    pub const PARTICLE_VELOCITY_SCALE: f32 = 500.0;
    /// Particle spin spread in degrees/sec, scaled by word length
    pub const PARTICLE_SPIN_SCALE: f32 = 1200.0;
    /// Particle lifetime is MIN + random * RANGE seconds
    pub const PARTICLE_LIFE_MIN: f32 = 2.0;
    pub const PARTICLE_LIFE_RANGE: f32 = 4.0;

    /// Size of the collaborator-side font catalog; words carry an index into it
    pub const FONT_CATALOG_SIZE: usize = 64;
}
