//! Named gameplay presets
//!
//! A `Variation` is selected once before a session starts (typically from a
//! URL path segment) and is immutable for the whole session. Unknown ids
//! resolve to the classic preset, never an error.

use serde::Serialize;

/// Shape of the font-size distribution within a preset's range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub enum SizeDistribution {
    #[default]
    Uniform,
    SmallHeavy,
    LargeHeavy,
    MediumFocused,
}

/// Progress signal that drives pace scaling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub enum PaceSignal {
    /// One pace level per ten completed words
    #[default]
    WordsTyped,
    /// One pace level per thirty seconds of play
    Elapsed,
}

/// Spawn scheduling parameters (seconds)
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SpawnPace {
    /// Base time between spawns
    pub base_interval: f32,
    /// Uniform jitter applied to each interval (± seconds)
    pub interval_jitter: f32,
    /// Seconds shaved off the interval per pace level
    pub pace_scaling: f32,
}

/// Word rotation parameters
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RotationProfile {
    /// Chance a freshly spawned word is tilted/spinning
    pub base_chance: f32,
    /// Added to the chance per pace level
    pub pace_scaling: f32,
    /// Hard bound on the tilt angle in degrees
    pub max_angle: f32,
    /// Continuous spin rate in degrees per second
    pub spin_speed: f32,
}

/// Font-size range in pixels
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FontSizeRange {
    pub min: f32,
    pub max: f32,
    pub distribution: SizeDistribution,
}

/// Fall-speed parameters (pixels per tick)
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SpeedProfile {
    pub base: f32,
    /// Random extra speed added at spawn
    pub jitter: f32,
    /// Added to the base per pace level
    pub pace_scaling: f32,
}

/// Optional spawn behaviors
#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct SpecialEffects {
    /// Occasionally spawn several words in the same frame
    pub multi_spawn: bool,
    /// Extra words from a multi-spawn land near the first one
    pub clusters: bool,
}

/// Immutable parameter bundle for one game session
#[derive(Debug, Clone, Serialize)]
pub struct Variation {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub pace_signal: PaceSignal,
    pub spawn: SpawnPace,
    /// Baseline word-length bucket weights (short .. extreme)
    pub length_weights: [f32; 5],
    pub rotation: RotationProfile,
    pub font_size: FontSizeRange,
    pub speed: SpeedProfile,
    pub effects: SpecialEffects,
}

impl Variation {
    /// The preset matching `id`, or [`Variation::classic`] when unrecognized
    pub fn resolve(id: &str) -> Variation {
        match id {
            "classic" | "default" => Self::classic(),
            "slow-steady" => Self::slow_steady(),
            "word-storm" => Self::word_storm(),
            "rotation-madness" => Self::rotation_madness(),
            "phrase-master" => Self::phrase_master(),
            _ => Self::classic(),
        }
    }

    /// Every available preset, for menu display
    pub fn all() -> Vec<Variation> {
        vec![
            Self::classic(),
            Self::slow_steady(),
            Self::word_storm(),
            Self::rotation_madness(),
            Self::phrase_master(),
        ]
    }

    /// The original balanced experience
    pub fn classic() -> Variation {
        Variation {
            id: "classic",
            name: "Classic",
            description: "The original word rain with balanced pace progression",
            pace_signal: PaceSignal::WordsTyped,
            spawn: SpawnPace {
                base_interval: 0.8,
                interval_jitter: 0.3,
                pace_scaling: 0.1,
            },
            length_weights: [0.60, 0.25, 0.10, 0.04, 0.01],
            rotation: RotationProfile {
                base_chance: 0.25,
                pace_scaling: 0.05,
                max_angle: 8.0,
                spin_speed: 1.0,
            },
            font_size: FontSizeRange {
                min: 20.0,
                max: 100.0,
                distribution: SizeDistribution::Uniform,
            },
            speed: SpeedProfile {
                base: 1.5,
                jitter: 1.5,
                pace_scaling: 0.3,
            },
            effects: SpecialEffects::default(),
        }
    }

    /// Longer text at a relaxed pace
    pub fn slow_steady() -> Variation {
        Variation {
            id: "slow-steady",
            name: "Slow & Steady",
            description: "Longer phrases at a relaxed pace, good for building vocabulary",
            pace_signal: PaceSignal::Elapsed,
            spawn: SpawnPace {
                base_interval: 1.5,
                interval_jitter: 0.5,
                pace_scaling: 0.05,
            },
            length_weights: [0.10, 0.20, 0.35, 0.25, 0.10],
            rotation: RotationProfile {
                base_chance: 0.1,
                pace_scaling: 0.02,
                max_angle: 5.0,
                spin_speed: 0.5,
            },
            font_size: FontSizeRange {
                min: 24.0,
                max: 80.0,
                distribution: SizeDistribution::MediumFocused,
            },
            speed: SpeedProfile {
                base: 1.0,
                jitter: 0.8,
                pace_scaling: 0.2,
            },
            effects: SpecialEffects::default(),
        }
    }

    /// A dense, slow rain of short words
    pub fn word_storm() -> Variation {
        Variation {
            id: "word-storm",
            name: "Word Storm",
            description: "A slow but dense rain of short words",
            pace_signal: PaceSignal::Elapsed,
            spawn: SpawnPace {
                base_interval: 0.15,
                interval_jitter: 0.1,
                pace_scaling: 0.01,
            },
            length_weights: [0.80, 0.15, 0.04, 0.01, 0.0],
            rotation: RotationProfile {
                base_chance: 0.1,
                pace_scaling: 0.02,
                max_angle: 4.0,
                spin_speed: 0.5,
            },
            font_size: FontSizeRange {
                min: 12.0,
                max: 40.0,
                distribution: SizeDistribution::SmallHeavy,
            },
            speed: SpeedProfile {
                base: 0.6,
                jitter: 0.3,
                pace_scaling: 0.05,
            },
            effects: SpecialEffects {
                multi_spawn: true,
                clusters: true,
            },
        }
    }

    /// Tilted, spinning words
    pub fn rotation_madness() -> Variation {
        Variation {
            id: "rotation-madness",
            name: "Rotation Madness",
            description: "Words tilt and spin as they fall",
            pace_signal: PaceSignal::WordsTyped,
            spawn: SpawnPace {
                base_interval: 1.5,
                interval_jitter: 0.4,
                pace_scaling: 0.12,
            },
            length_weights: [0.40, 0.35, 0.20, 0.04, 0.01],
            rotation: RotationProfile {
                base_chance: 0.8,
                pace_scaling: 0.1,
                max_angle: 25.0,
                spin_speed: 3.0,
            },
            font_size: FontSizeRange {
                min: 18.0,
                max: 90.0,
                distribution: SizeDistribution::Uniform,
            },
            speed: SpeedProfile {
                base: 1.8,
                jitter: 1.2,
                pace_scaling: 0.35,
            },
            effects: SpecialEffects::default(),
        }
    }

    /// Full phrases and long words dominate
    pub fn phrase_master() -> Variation {
        Variation {
            id: "phrase-master",
            name: "Phrase Master",
            description: "Master the art of typing complete phrases",
            pace_signal: PaceSignal::WordsTyped,
            spawn: SpawnPace {
                base_interval: 2.5,
                interval_jitter: 0.8,
                pace_scaling: 0.08,
            },
            length_weights: [0.05, 0.10, 0.25, 0.40, 0.20],
            rotation: RotationProfile {
                base_chance: 0.15,
                pace_scaling: 0.03,
                max_angle: 6.0,
                spin_speed: 0.8,
            },
            font_size: FontSizeRange {
                min: 20.0,
                max: 70.0,
                distribution: SizeDistribution::LargeHeavy,
            },
            speed: SpeedProfile {
                base: 1.2,
                jitter: 0.6,
                pace_scaling: 0.25,
            },
            effects: SpecialEffects::default(),
        }
    }
}

impl Default for Variation {
    fn default() -> Self {
        Self::classic()
    }
}
