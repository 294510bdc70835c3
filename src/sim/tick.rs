//! Per-frame simulation update and word spawning
//!
//! `tick` is invoked once per rendering frame by the external scheduler. It
//! advances every falling word, records first bottom-edge crossings as
//! misses, prunes dead entities, runs the spawn scheduler and checks the
//! loss threshold. One tick, one frame: fall speeds are distances per tick.

use glam::Vec2;
use rand::Rng;

use super::layout::{self, Viewport};
use super::state::{Engine, FallingWord, GamePhase, WordStatus};
use crate::consts::*;
use crate::variation::SizeDistribution;

/// Advance the session by one frame
pub fn tick(state: &mut Engine, viewport: Viewport) {
    if state.phase != GamePhase::Playing {
        return;
    }
    state.time_ticks += 1;

    for word in &mut state.words {
        word.pos.y += word.fall_speed;
        if word.spin_dir != 0.0 {
            word.rotation += word.spin_dir * word.spin_speed * SIM_DT;
        }
    }

    // A word's first crossing of the bottom edge flips it to Missed exactly
    // once; simultaneous misses are aggregated before the threshold check
    for word in &mut state.words {
        if word.status == WordStatus::Falling && word.pos.y > viewport.height {
            word.status = WordStatus::Missed;
            state.stats.missed_words += 1;
            log::debug!(
                "missed {:?} ({} of {})",
                word.text,
                state.stats.missed_words,
                MISS_LIMIT
            );
        }
    }

    // Completed words go immediately; missed words stay briefly visible
    // through the grace window below the bottom edge
    state.words.retain(|w| {
        w.status != WordStatus::Completed && w.pos.y < viewport.height + OFFSCREEN_GRACE
    });

    for particle in &mut state.particles {
        particle.pos += particle.vel * SIM_DT;
        particle.life -= SIM_DT;
    }
    state.particles.retain(|p| p.life > 0.0);

    // Single authoritative spawn scheduler with a minimum-guarantee interval
    if state.ticks_until_spawn == 0 {
        spawn_word(state, viewport);
        schedule_next_spawn(state);
    } else {
        state.ticks_until_spawn -= 1;
    }

    if state.stats.missed_words >= MISS_LIMIT {
        state.end();
    }
}

/// Pick the next spawn delay from the variation's pace parameters
fn schedule_next_spawn(state: &mut Engine) {
    let pace = state.pace_level() as f32;
    let sp = state.variation.spawn;
    let jitter = if sp.interval_jitter > 0.0 {
        state.rng.random_range(-sp.interval_jitter..=sp.interval_jitter)
    } else {
        0.0
    };
    let secs = (sp.base_interval - pace * sp.pace_scaling + jitter).max(MIN_SPAWN_INTERVAL);
    state.ticks_until_spawn = (secs * TICK_RATE as f32).round() as u32;
}

/// Spawn a word pulled from the bank, plus extras when the variation allows
/// simultaneous spawns
pub fn spawn_word(state: &mut Engine, viewport: Viewport) {
    if state.phase != GamePhase::Playing {
        return;
    }
    let anchor = spawn_from_bank(state, viewport, None);
    let effects = state.variation.effects;
    if effects.multi_spawn && state.rng.random_bool(0.25) {
        let extras = state.rng.random_range(1..=2);
        for _ in 0..extras {
            // Clustered extras land near the first word
            let cluster_anchor = effects.clusters.then_some(anchor);
            spawn_from_bank(state, viewport, cluster_anchor);
        }
    }
}

/// Spawn a specific word (debug and test hook; the scheduler uses the bank)
pub fn spawn_text(state: &mut Engine, text: &str, viewport: Viewport) {
    if state.phase != GamePhase::Playing {
        return;
    }
    push_word(state, text.to_string(), viewport, None);
}

fn spawn_from_bank(state: &mut Engine, viewport: Viewport, anchor_x: Option<f32>) -> f32 {
    let text = state.bank.select_word(
        state.stats.words_typed,
        &state.variation.length_weights,
        &mut state.rng,
    );
    push_word(state, text.to_string(), viewport, anchor_x)
}

/// Build the word entity: size, speed, rotation and a safe spawn position.
/// Returns the chosen x so clustered spawns can anchor to it.
fn push_word(state: &mut Engine, text: String, viewport: Viewport, anchor_x: Option<f32>) -> f32 {
    let pace = state.pace_level() as f32;

    let size_range = state.variation.font_size;
    let font_size = sample_font_size(&size_range, state);

    let sp = state.variation.speed;
    let fall_speed = sp.base + pace * sp.pace_scaling + state.rng.random::<f32>() * sp.jitter;

    // Rotation chance and intensity both ramp with pace
    let rot = state.variation.rotation;
    let chance = (rot.base_chance + pace * rot.pace_scaling).min(ROTATION_CHANCE_CAP);
    let spins = state.rng.random_bool(chance.clamp(0.0, 1.0) as f64);
    let angle_bound = (pace * ROTATION_ANGLE_PER_PACE).min(rot.max_angle);
    let rotation = if spins {
        (state.rng.random::<f32>() - 0.5) * angle_bound
    } else {
        0.0
    };
    let spin_dir = if spins {
        if state.rng.random_bool(0.5) { 1.0 } else { -1.0 }
    } else {
        0.0
    };

    let bounds = layout::word_bounds(state.measure.as_ref(), &text, font_size, rotation, viewport);
    let x = match anchor_x {
        Some(ax) => {
            let max_x = (viewport.width - bounds.max_width - SPAWN_PADDING).max(SPAWN_PADDING);
            (ax + state.rng.random_range(-80.0..=80.0)).clamp(SPAWN_PADDING, max_x)
        }
        None => layout::spawn_x(bounds.max_width, viewport, &mut state.rng),
    };

    let font = state.rng.random_range(0..FONT_CATALOG_SIZE);
    let id = state.next_word_id();
    log::debug!("spawn {:?} at x={:.0} speed={:.2}", text, x, fall_speed);
    state.words.push(FallingWord {
        id,
        text,
        pos: Vec2::new(x, SPAWN_Y),
        fall_speed,
        font_size,
        font,
        cursor: 0,
        status: WordStatus::Falling,
        rotation,
        spin_dir,
        spin_speed: rot.spin_speed,
    });
    x
}

/// Sample a font size from the variation's range and distribution shape
fn sample_font_size(range: &crate::variation::FontSizeRange, state: &mut Engine) -> f32 {
    let span = range.max - range.min;
    let r: f32 = state.rng.random();
    let shaped = match range.distribution {
        SizeDistribution::Uniform => r,
        SizeDistribution::SmallHeavy => r * r,
        SizeDistribution::LargeHeavy => 1.0 - (1.0 - r) * (1.0 - r),
        // Average of two uniforms peaks in the middle of the range
        SizeDistribution::MediumFocused => (r + state.rng.random::<f32>()) / 2.0,
    };
    range.min + shaped * span
}
