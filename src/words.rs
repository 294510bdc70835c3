//! Word bank with difficulty-weighted selection
//!
//! Words and phrases are bucketed by character length at construction.
//! Selection walks a renormalized length-bucket distribution that shifts
//! toward longer text as the player completes words, then picks uniformly
//! among available lengths and words. All randomness comes from the caller's
//! RNG so selection is reproducible under a fixed seed.

use std::collections::BTreeMap;

use rand::Rng;

use crate::consts::WORDS_PER_LEVEL;

/// A length bucket with its baseline probability mass
#[derive(Debug, Clone, Copy)]
pub struct LengthBucket {
    pub min: usize,
    pub max: usize,
    pub base_weight: f32,
}

/// The five length buckets: short, medium, long, very long, extreme
pub const LENGTH_BUCKETS: [LengthBucket; 5] = [
    LengthBucket { min: 3, max: 5, base_weight: 0.60 },
    LengthBucket { min: 6, max: 8, base_weight: 0.25 },
    LengthBucket { min: 9, max: 12, base_weight: 0.10 },
    LengthBucket { min: 13, max: 20, base_weight: 0.04 },
    LengthBucket { min: 21, max: usize::MAX, base_weight: 0.01 },
];

/// Per-difficulty-level weight adjustment for each bucket
const LEVEL_ADJUST: [f32; 5] = [-0.08, 0.02, 0.03, 0.02, 0.01];
/// The short bucket never drops below this weight before renormalization
const SHORT_FLOOR: f32 = 0.10;

/// Returned if the bank was somehow constructed empty; selection is total
const FALLBACK_WORD: &str = "rain";

/// Compute the renormalized bucket weights for a given progress point.
///
/// `base` is the variation's baseline distribution; the difficulty level
/// (one per [`WORDS_PER_LEVEL`] completed words) shifts mass from the short
/// bucket toward the longer ones.
pub fn bucket_weights(base: &[f32; 5], words_typed: u32) -> [f32; 5] {
    let level = (words_typed / WORDS_PER_LEVEL) as f32;

    let mut adjusted = [0.0f32; 5];
    for (i, w) in adjusted.iter_mut().enumerate() {
        *w = base[i] + level * LEVEL_ADJUST[i];
        if i == 0 {
            *w = w.max(SHORT_FLOOR);
        }
    }

    let total: f32 = adjusted.iter().sum();
    if total > 0.0 {
        for w in &mut adjusted {
            *w /= total;
        }
    }
    adjusted
}

/// Immutable word corpus, bucketed by character length
#[derive(Debug, Clone)]
pub struct WordBank {
    by_length: BTreeMap<usize, Vec<&'static str>>,
    lengths: Vec<usize>,
    all: Vec<&'static str>,
}

impl WordBank {
    /// Build a bank from word lists. Entries shorter than 2 characters are
    /// dropped.
    pub fn new(lists: &[&[&'static str]]) -> Self {
        let mut by_length: BTreeMap<usize, Vec<&'static str>> = BTreeMap::new();
        let mut all = Vec::new();
        for list in lists {
            for &word in *list {
                let len = word.chars().count();
                if len < 2 {
                    continue;
                }
                by_length.entry(len).or_default().push(word);
                all.push(word);
            }
        }
        let lengths = by_length.keys().copied().collect();
        Self {
            by_length,
            lengths,
            all,
        }
    }

    /// The standard corpus: core words, long words, phrases, long phrases
    pub fn standard() -> Self {
        Self::new(&[CORE_WORDS, LONG_WORDS, PHRASES, LONG_PHRASES])
    }

    /// Number of distinct entries in the corpus
    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// Select a word for the current progress point.
    ///
    /// Walks the cumulative bucket distribution, picks a length uniformly
    /// among available lengths in the bucket, then a word uniformly at that
    /// length. Falls back to a corpus-wide uniform pick when the selected
    /// bucket holds no words. Never panics, always non-empty.
    pub fn select_word(
        &self,
        words_typed: u32,
        base: &[f32; 5],
        rng: &mut impl Rng,
    ) -> &'static str {
        let weights = bucket_weights(base, words_typed);

        let roll: f32 = rng.random();
        let mut cumulative = 0.0;
        let mut bucket = &LENGTH_BUCKETS[0];
        for (i, b) in LENGTH_BUCKETS.iter().enumerate() {
            cumulative += weights[i];
            if roll <= cumulative {
                bucket = b;
                break;
            }
        }

        let available: Vec<usize> = self
            .lengths
            .iter()
            .copied()
            .filter(|&len| len >= bucket.min && len <= bucket.max)
            .collect();

        if available.is_empty() {
            return self.any_word(rng);
        }

        let length = available[rng.random_range(0..available.len())];
        match self.by_length.get(&length) {
            Some(words) if !words.is_empty() => words[rng.random_range(0..words.len())],
            _ => self.any_word(rng),
        }
    }

    /// Uniform pick over the whole corpus
    fn any_word(&self, rng: &mut impl Rng) -> &'static str {
        if self.all.is_empty() {
            return FALLBACK_WORD;
        }
        self.all[rng.random_range(0..self.all.len())]
    }
}

impl Default for WordBank {
    fn default() -> Self {
        Self::standard()
    }
}

/// Short and medium words (3-8 characters)
pub const CORE_WORDS: &[&str] = &[
    "ant", "arc", "bay", "bee", "cat", "cog", "dew", "dog", "ear", "fog", "fox", "gem", "hat",
    "ice", "ink", "jar", "key", "kit", "log", "map", "mud", "net", "oak", "owl", "pen", "rug",
    "run", "saw", "sky", "sun", "tap", "urn", "van", "wax", "yak", "zip", "bird", "bold", "calm",
    "code", "dark", "desk", "east", "echo", "fast", "fern", "gate", "glow", "hill", "hope",
    "idle", "iron", "jade", "jolt", "keen", "kite", "lamp", "lush", "mild", "moon", "near",
    "nest", "opal", "pear", "quiz", "rain", "snow", "tree", "unit", "vine", "wolf", "yarn",
    "zero", "amber", "apple", "blaze", "bread", "cloud", "crisp", "dance", "drift", "eagle",
    "ember", "flame", "frost", "gleam", "grape", "haste", "house", "ideal", "image", "jewel",
    "juice", "knife", "koala", "lemon", "light", "magic", "money", "night", "noble", "ocean",
    "orbit", "piano", "prism", "queen", "quilt", "ridge", "river", "stone", "storm", "tiger",
    "trail", "ultra", "urban", "valor", "vivid", "water", "whale", "youth", "zebra", "anchor",
    "bridge", "camera", "dragon", "effort", "forest", "garden", "hammer", "insect", "jungle",
    "kitten", "ladder", "market", "nature", "orange", "pepper", "quartz", "rabbit", "silver",
    "temple", "united", "velvet", "window", "yellow", "zigzag", "balance", "caption", "diagram",
    "eastern", "factory", "gallery", "harvest", "imagine", "journey", "kingdom", "lantern",
    "machine", "network", "octopus", "pattern", "quality", "rainbow", "science", "thunder",
    "uniform", "village", "whisper", "absolute", "birthday", "calendar", "daughter", "elephant",
    "festival", "graceful", "hospital", "infinite", "junction", "keyboard", "language",
    "mountain", "notebook", "opposite", "particle", "question", "reaction", "sandwich",
    "together", "umbrella", "vacation", "washable",
];

/// Long and very long words (9-20 characters)
pub const LONG_WORDS: &[&str] = &[
    "adventure", "beautiful", "challenge", "dangerous", "education", "fantastic", "gathering",
    "happiness", "important", "knowledge", "landscape", "mechanism", "narrative", "paragraph",
    "structure", "xylophone", "yesterday", "zookeeper", "background", "basketball",
    "calculator", "dictionary", "experience", "journalism", "lighthouse", "restaurant",
    "skyscraper", "technology", "vocabulary", "watermelon", "wilderness", "electricity",
    "grasshopper", "handwriting", "imagination", "mathematics", "opportunity", "photography",
    "quarterback", "temperature", "underground", "architecture", "breakthrough",
    "championship", "developments", "encyclopedia", "headquarters", "intelligence",
    "neighborhood", "overwhelming", "professional", "thunderstorm", "communication",
    "concentration", "determination", "extraordinary", "sophisticated", "understanding",
    "approximately", "automatically", "circumstances", "comprehensive", "administration",
    "accomplishment", "acknowledgment", "congratulations", "characteristics",
    "extraordinarily", "internationally", "misunderstanding", "responsibilities",
    "uncharacteristically",
];

/// Short phrases with literal spaces the player must type
pub const PHRASES: &[&str] = &[
    "type fast", "unit test", "stay sharp", "word storm", "hello world", "open source",
    "keep typing", "code review", "rain of words", "catch the word", "speed and focus",
    "letters falling", "knowledge is power",
];

/// Long phrases that feed the extreme bucket (21+ characters)
pub const LONG_PHRASES: &[&str] = &[
    "incomprehensibilities", "electroencephalography", "counterrevolutionaries",
    "practice makes perfect", "better late than never", "fortune favors the bold",
    "the quick brown fox jumps", "rome was not built in a day",
    "strike while the iron is hot", "all that glitters is not gold",
    "a journey of a thousand miles", "the early bird catches the worm",
    "actions speak louder than words", "every cloud has a silver lining",
];
