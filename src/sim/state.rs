//! Engine state and core simulation types
//!
//! The engine is an explicit per-session instance: it exclusively owns the
//! live words, particles and stats, and all mutation goes through `sim`
//! operations. Collaborators read snapshots, they never reach in.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::layout::{ApproxMeasure, TextMeasure};
use crate::consts::*;
use crate::variation::{PaceSignal, Variation};
use crate::words::WordBank;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the player to start
    Ready,
    /// Active gameplay
    Playing,
    /// Five words missed; restart goes straight back to Playing
    Ended,
}

/// Lifecycle of a falling word. Terminal once completed or missed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WordStatus {
    Falling,
    Completed,
    Missed,
}

/// A word on its way down the screen
#[derive(Debug, Clone, Serialize)]
pub struct FallingWord {
    pub id: u32,
    /// The target string, possibly containing spaces and punctuation
    pub text: String,
    /// Top-left position; y increases downward
    pub pos: Vec2,
    /// Pixels per tick, fixed at spawn time
    pub fall_speed: f32,
    pub font_size: f32,
    /// Index into the collaborator's font catalog
    pub font: usize,
    /// Characters at index < cursor have been typed correctly
    pub cursor: usize,
    pub status: WordStatus,
    /// Tilt angle in degrees
    pub rotation: f32,
    /// Continuous spin direction: -1, 0 or +1
    pub spin_dir: f32,
    /// Degrees per second while spinning
    pub spin_speed: f32,
}

impl FallingWord {
    pub fn is_falling(&self) -> bool {
        self.status == WordStatus::Falling
    }

    /// Character count of the target text
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// The next character the player must type, None once complete
    pub fn next_char(&self) -> Option<char> {
        self.text.chars().nth(self.cursor)
    }
}

/// One letter of a completed word's explosion effect
#[derive(Debug, Clone, Serialize)]
pub struct LetterParticle {
    pub ch: char,
    pub pos: Vec2,
    /// Pixels per second
    pub vel: Vec2,
    /// Degrees per second
    pub spin: f32,
    /// Seconds remaining; pruned at zero
    pub life: f32,
    pub font_size: f32,
    pub font: usize,
}

/// Derived session counters, reset wholesale on start
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    pub score: u64,
    /// Completed words
    pub words_typed: u32,
    pub total_keystrokes: u32,
    pub correct_keystrokes: u32,
    /// Percentage, 100 before any keystroke
    pub accuracy: f32,
    pub missed_words: u32,
}

impl Default for SessionStats {
    fn default() -> Self {
        Self {
            score: 0,
            words_typed: 0,
            total_keystrokes: 0,
            correct_keystrokes: 0,
            accuracy: 100.0,
            missed_words: 0,
        }
    }
}

impl SessionStats {
    /// Recompute accuracy from the keystroke counters
    pub fn update_accuracy(&mut self) {
        self.accuracy = if self.total_keystrokes == 0 {
            100.0
        } else {
            self.correct_keystrokes as f32 / self.total_keystrokes as f32 * 100.0
        };
    }
}

/// Read-only view of one frame, handed to the external renderer
#[derive(Debug, Serialize)]
pub struct FrameSnapshot<'a> {
    pub phase: GamePhase,
    pub words: &'a [FallingWord],
    pub particles: &'a [LetterParticle],
    pub stats: &'a SessionStats,
}

/// One game session: falling words, particles, stats and the RNG that
/// drives all spawn decisions
pub struct Engine {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Immutable for the whole session
    pub variation: Variation,
    pub phase: GamePhase,
    pub words: Vec<FallingWord>,
    pub particles: Vec<LetterParticle>,
    pub stats: SessionStats,
    /// Ticks since the session started
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
    pub(crate) bank: WordBank,
    pub(crate) measure: Box<dyn TextMeasure>,
    pub(crate) ticks_until_spawn: u32,
    next_id: u32,
}

impl Engine {
    /// New session in the Ready phase with the standard word bank and the
    /// approximate text measurer
    pub fn new(seed: u64, variation: Variation) -> Self {
        Self::with_measure(seed, variation, Box::new(ApproxMeasure))
    }

    /// New session with an injected text-width capability (canvas-backed on
    /// the web)
    pub fn with_measure(seed: u64, variation: Variation, measure: Box<dyn TextMeasure>) -> Self {
        Self {
            seed,
            variation,
            phase: GamePhase::Ready,
            words: Vec::new(),
            particles: Vec::new(),
            stats: SessionStats::default(),
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            bank: WordBank::standard(),
            measure,
            ticks_until_spawn: 0,
            next_id: 1,
        }
    }

    /// Begin (or restart) play. Ready -> Playing and Ended -> Playing reset
    /// the whole engine; a no-op while already Playing.
    pub fn start(&mut self) {
        if self.phase == GamePhase::Playing {
            return;
        }
        self.words.clear();
        self.particles.clear();
        self.stats = SessionStats::default();
        self.time_ticks = 0;
        // First spawn after one base interval, no jitter
        self.ticks_until_spawn =
            (self.variation.spawn.base_interval * TICK_RATE as f32) as u32;
        self.phase = GamePhase::Playing;
        log::info!(
            "session started: variation={} seed={}",
            self.variation.id,
            self.seed
        );
    }

    /// End the session. Only meaningful from Playing.
    pub fn end(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Ended;
            log::info!(
                "game over: score={} words={} accuracy={:.1}",
                self.stats.score,
                self.stats.words_typed,
                self.stats.accuracy
            );
        }
    }

    /// Allocate a word id, stable for the word's lifetime
    pub(crate) fn next_word_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Current pace level per the variation's progress signal
    pub fn pace_level(&self) -> u32 {
        match self.variation.pace_signal {
            PaceSignal::WordsTyped => self.stats.words_typed / WORDS_PER_LEVEL,
            PaceSignal::Elapsed => {
                (self.time_ticks as f32 / (SECS_PER_ELAPSED_LEVEL * TICK_RATE as f32)) as u32
            }
        }
    }

    /// Completed words per minute of play, 0 before the first tick
    pub fn words_per_minute(&self) -> f32 {
        if self.time_ticks == 0 {
            return 0.0;
        }
        let minutes = self.time_ticks as f32 / (TICK_RATE as f32 * 60.0);
        self.stats.words_typed as f32 / minutes
    }

    /// Per-frame view for the external renderer
    pub fn snapshot(&self) -> FrameSnapshot<'_> {
        FrameSnapshot {
            phase: self.phase,
            words: &self.words,
            particles: &self.particles,
            stats: &self.stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_engine_is_ready_and_empty() {
        let engine = Engine::new(42, Variation::classic());
        assert_eq!(engine.phase, GamePhase::Ready);
        assert!(engine.words.is_empty());
        assert!(engine.particles.is_empty());
        assert_eq!(engine.stats.score, 0);
        assert_eq!(engine.stats.accuracy, 100.0);
    }

    #[test]
    fn test_start_transitions_and_end_gates() {
        let mut engine = Engine::new(42, Variation::classic());

        // end() from Ready is a no-op
        engine.end();
        assert_eq!(engine.phase, GamePhase::Ready);

        engine.start();
        assert_eq!(engine.phase, GamePhase::Playing);

        // start() while Playing is a no-op
        engine.stats.score = 123;
        engine.start();
        assert_eq!(engine.stats.score, 123);

        engine.end();
        assert_eq!(engine.phase, GamePhase::Ended);

        // Direct restart from Ended, wholesale reset
        engine.start();
        assert_eq!(engine.phase, GamePhase::Playing);
        assert_eq!(engine.stats.score, 0);
    }

    #[test]
    fn test_pace_level_words_typed() {
        let mut engine = Engine::new(42, Variation::classic());
        assert_eq!(engine.pace_level(), 0);
        engine.stats.words_typed = 9;
        assert_eq!(engine.pace_level(), 0);
        engine.stats.words_typed = 10;
        assert_eq!(engine.pace_level(), 1);
        engine.stats.words_typed = 35;
        assert_eq!(engine.pace_level(), 3);
    }

    #[test]
    fn test_pace_level_elapsed() {
        let mut engine = Engine::new(42, Variation::word_storm());
        assert_eq!(engine.pace_level(), 0);
        engine.time_ticks = (SECS_PER_ELAPSED_LEVEL * TICK_RATE as f32) as u64;
        assert_eq!(engine.pace_level(), 1);
    }

    #[test]
    fn test_next_char_walks_the_text() {
        let word = FallingWord {
            id: 1,
            text: "cat".into(),
            pos: Vec2::ZERO,
            fall_speed: 1.0,
            font_size: 20.0,
            font: 0,
            cursor: 0,
            status: WordStatus::Falling,
            rotation: 0.0,
            spin_dir: 0.0,
            spin_speed: 0.0,
        };
        assert_eq!(word.next_char(), Some('c'));
        let mut word = word;
        word.cursor = 3;
        assert_eq!(word.next_char(), None);
        assert_eq!(word.char_len(), 3);
    }
}
