//! Keystroke matching
//!
//! One keystroke advances at most one word: falling words are scanned in
//! insertion order and the first one whose next expected character matches
//! takes the hit, so older words win ties. Completing a word bursts it into
//! one particle per character, scaled by word length.

use glam::Vec2;
use rand::Rng;

use super::layout::{self, Viewport};
use super::state::{Engine, GamePhase, LetterParticle, WordStatus};
use crate::consts::*;

/// Outcome of a single keystroke, the collaborator's audio-cue signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyResult {
    pub hit: bool,
    pub completed: bool,
}

/// The character set the engine accepts: lowercase letters, digits, literal
/// space and a fixed punctuation set. Everything else is ignored.
pub fn recognized_key(key: char) -> bool {
    key == ' '
        || key.is_ascii_lowercase()
        || key.is_ascii_digit()
        || matches!(key, '.' | ',' | '!' | '?' | '\'' | '-')
}

/// Apply one keystroke against the current word set.
///
/// Outside the Playing phase, or for an unrecognized character, this is a
/// defensive no-op: nothing mutates and the result is all-false. A
/// recognized keystroke that matches no word still counts against accuracy.
pub fn apply_keystroke(state: &mut Engine, key: char, viewport: Viewport) -> KeyResult {
    if state.phase != GamePhase::Playing || !recognized_key(key) {
        return KeyResult::default();
    }

    let mut hit = false;
    let mut completed = false;

    let target = state
        .words
        .iter()
        .position(|w| w.is_falling() && w.next_char() == Some(key));

    if let Some(idx) = target {
        hit = true;
        let word = &mut state.words[idx];
        word.cursor += 1;
        if word.cursor == word.char_len() {
            word.status = WordStatus::Completed;
            completed = true;
        }
        state.stats.score += HIT_BONUS;
        if completed {
            state.stats.score += COMPLETION_BONUS;
            state.stats.words_typed += 1;
            explode_word(state, idx, viewport);
            log::debug!(
                "completed {:?}, {} words typed",
                state.words[idx].text,
                state.stats.words_typed
            );
        }
    }

    state.stats.total_keystrokes += 1;
    if hit {
        state.stats.correct_keystrokes += 1;
    }
    state.stats.update_accuracy();

    KeyResult { hit, completed }
}

/// Burst a completed word into one particle per character, laid out across
/// its wrapped display lines. Longer words explode proportionally harder.
fn explode_word(state: &mut Engine, idx: usize, viewport: Viewport) {
    let (text, pos, font_size, font) = {
        let word = &state.words[idx];
        (word.text.clone(), word.pos, word.font_size, word.font)
    };
    let lines = layout::display_lines(state.measure.as_ref(), &text, font_size, viewport);
    let size_factor = text.chars().count() as f32;
    let line_height = font_size * LINE_HEIGHT;

    for (line_idx, line) in lines.iter().enumerate() {
        for (char_idx, ch) in line.chars().enumerate() {
            if state.particles.len() >= MAX_PARTICLES {
                state.particles.remove(0);
            }
            let vel = Vec2::new(
                (state.rng.random::<f32>() - 0.5) * PARTICLE_VELOCITY_SCALE * size_factor,
                (state.rng.random::<f32>() - 0.5) * PARTICLE_VELOCITY_SCALE * size_factor,
            );
            let spin = (state.rng.random::<f32>() - 0.5) * PARTICLE_SPIN_SCALE * size_factor;
            let life = PARTICLE_LIFE_MIN + state.rng.random::<f32>() * PARTICLE_LIFE_RANGE;
            state.particles.push(LetterParticle {
                ch,
                pos: Vec2::new(
                    pos.x + char_idx as f32 * font_size * AVG_CHAR_WIDTH,
                    pos.y + line_idx as f32 * line_height,
                ),
                vel,
                spin,
                life,
                font_size,
                font,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick::{spawn_text, tick};
    use crate::variation::{
        FontSizeRange, PaceSignal, RotationProfile, SizeDistribution, SpawnPace, SpecialEffects,
        SpeedProfile, Variation,
    };
    use proptest::prelude::*;

    const VP: Viewport = Viewport {
        width: 800.0,
        height: 600.0,
    };

    fn quiet_variation() -> Variation {
        Variation {
            id: "quiet",
            name: "Quiet",
            description: "test preset",
            pace_signal: PaceSignal::WordsTyped,
            spawn: SpawnPace {
                base_interval: 1000.0,
                interval_jitter: 0.0,
                pace_scaling: 0.0,
            },
            length_weights: [0.60, 0.25, 0.10, 0.04, 0.01],
            rotation: RotationProfile {
                base_chance: 0.0,
                pace_scaling: 0.0,
                max_angle: 0.0,
                spin_speed: 0.0,
            },
            font_size: FontSizeRange {
                min: 20.0,
                max: 20.0,
                distribution: SizeDistribution::Uniform,
            },
            speed: SpeedProfile {
                base: 2.0,
                jitter: 0.0,
                pace_scaling: 0.0,
            },
            effects: SpecialEffects::default(),
        }
    }

    fn engine_with(words: &[&str]) -> Engine {
        let mut engine = Engine::new(42, quiet_variation());
        engine.start();
        for text in words {
            spawn_text(&mut engine, text, VP);
        }
        engine
    }

    #[test]
    fn test_simple_completion() {
        let mut engine = engine_with(&["cat"]);

        for key in ['c', 'a'] {
            let result = apply_keystroke(&mut engine, key, VP);
            assert!(result.hit);
            assert!(!result.completed);
        }
        let result = apply_keystroke(&mut engine, 't', VP);
        assert!(result.hit);
        assert!(result.completed);

        assert_eq!(engine.words[0].status, WordStatus::Completed);
        assert_eq!(engine.stats.words_typed, 1);
        assert_eq!(engine.stats.score, 3 * HIT_BONUS + COMPLETION_BONUS);
        assert_eq!(engine.stats.accuracy, 100.0);
        // One particle per character
        assert_eq!(engine.particles.len(), 3);
    }

    #[test]
    fn test_miss_then_hit_accuracy() {
        let mut engine = engine_with(&["dog"]);

        let result = apply_keystroke(&mut engine, 'x', VP);
        assert!(!result.hit);
        assert_eq!(engine.stats.total_keystrokes, 1);
        assert_eq!(engine.stats.correct_keystrokes, 0);
        assert_eq!(engine.stats.accuracy, 0.0);
        assert_eq!(engine.stats.score, 0);

        let result = apply_keystroke(&mut engine, 'd', VP);
        assert!(result.hit);
        assert_eq!(engine.stats.accuracy, 50.0);
        assert_eq!(engine.words[0].cursor, 1);
    }

    #[test]
    fn test_oldest_word_wins_ties() {
        let mut engine = engine_with(&["cat", "cab"]);
        let result = apply_keystroke(&mut engine, 'c', VP);
        assert!(result.hit);
        assert_eq!(engine.words[0].cursor, 1, "oldest word takes the hit");
        assert_eq!(engine.words[1].cursor, 0, "newer word untouched");
    }

    #[test]
    fn test_literal_space_in_phrases() {
        let mut engine = engine_with(&["type fast"]);
        for key in "type fast".chars() {
            let result = apply_keystroke(&mut engine, key, VP);
            assert!(result.hit, "missed on {key:?}");
        }
        assert_eq!(engine.stats.words_typed, 1);
        assert_eq!(engine.particles.len(), "type fast".len());
    }

    #[test]
    fn test_unrecognized_characters_do_not_count() {
        let mut engine = engine_with(&["cat"]);
        for key in ['C', 'é', '\n', '\t', ';'] {
            let result = apply_keystroke(&mut engine, key, VP);
            assert_eq!(result, KeyResult::default());
        }
        assert_eq!(engine.stats.total_keystrokes, 0);
        assert_eq!(engine.stats.accuracy, 100.0);
        assert_eq!(engine.words[0].cursor, 0);
    }

    #[test]
    fn test_keystrokes_ignored_outside_playing() {
        let mut engine = Engine::new(42, quiet_variation());
        // Ready phase
        assert_eq!(apply_keystroke(&mut engine, 'c', VP), KeyResult::default());
        assert_eq!(engine.stats.total_keystrokes, 0);

        engine.start();
        engine.end();
        // Ended phase
        assert_eq!(apply_keystroke(&mut engine, 'c', VP), KeyResult::default());
        assert_eq!(engine.stats.total_keystrokes, 0);
    }

    #[test]
    fn test_completed_word_stops_matching() {
        let mut engine = engine_with(&["cat"]);
        for key in ['c', 'a', 't'] {
            apply_keystroke(&mut engine, key, VP);
        }
        // The word is complete; a further 'c' matches nothing
        let result = apply_keystroke(&mut engine, 'c', VP);
        assert!(!result.hit);
        assert_eq!(engine.words[0].cursor, 3);
    }

    #[test]
    fn test_wrapped_phrase_explodes_per_display_character() {
        // A narrow viewport forces wrapping; line-break spaces drop out of
        // the burst
        let narrow = Viewport {
            width: 300.0,
            height: 600.0,
        };
        let text = "the quick brown fox jumps";
        let mut engine = Engine::new(42, quiet_variation());
        engine.start();
        spawn_text(&mut engine, text, narrow);
        for key in text.chars() {
            assert!(apply_keystroke(&mut engine, key, narrow).hit);
        }
        let lines = layout::display_lines(
            engine.measure.as_ref(),
            text,
            engine.words[0].font_size,
            narrow,
        );
        let expected: usize = lines.iter().map(|l| l.chars().count()).sum();
        assert!(lines.len() > 1);
        assert_eq!(engine.particles.len(), expected);
    }

    #[test]
    fn test_particle_lifetimes_and_pruning() {
        let mut engine = engine_with(&["cat"]);
        for key in ['c', 'a', 't'] {
            apply_keystroke(&mut engine, key, VP);
        }
        for p in &engine.particles {
            assert!(p.life >= PARTICLE_LIFE_MIN);
            assert!(p.life < PARTICLE_LIFE_MIN + PARTICLE_LIFE_RANGE);
        }
        // Longest possible lifetime is 6 s = 360 ticks
        for _ in 0..=360 {
            tick(&mut engine, VP);
        }
        assert!(engine.particles.is_empty());
    }

    proptest! {
        /// Cursor bounds and the completed-iff-fully-typed invariant hold for
        /// arbitrary keystroke sequences
        #[test]
        fn prop_cursor_invariant(keys in proptest::collection::vec(
            prop_oneof![
                Just('c'), Just('a'), Just('t'), Just('d'), Just('o'),
                Just('g'), Just('x'), Just(' '),
            ],
            0..80,
        )) {
            let mut engine = engine_with(&["cat", "dog", "cat"]);
            for key in keys {
                apply_keystroke(&mut engine, key, VP);
                for word in &engine.words {
                    prop_assert!(word.cursor <= word.char_len());
                    prop_assert_eq!(
                        word.status == WordStatus::Completed,
                        word.cursor == word.char_len()
                    );
                }
            }
        }

        /// Accuracy always equals correct/total * 100 (100 when untouched)
        #[test]
        fn prop_accuracy_formula(keys in proptest::collection::vec(
            prop_oneof![Just('c'), Just('a'), Just('t'), Just('z')],
            0..60,
        )) {
            let mut engine = engine_with(&["cat"]);
            for key in keys {
                apply_keystroke(&mut engine, key, VP);
            }
            let stats = &engine.stats;
            if stats.total_keystrokes == 0 {
                prop_assert_eq!(stats.accuracy, 100.0);
            } else {
                let want =
                    stats.correct_keystrokes as f32 / stats.total_keystrokes as f32 * 100.0;
                prop_assert!((stats.accuracy - want).abs() < 1e-4);
            }
            prop_assert!(stats.correct_keystrokes <= stats.total_keystrokes);
        }
    }
}
