//! Polarity lexicon
//!
//! Word weights in [-1, 1] plus the modifiers that scale the next word.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

pub static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-z']+").expect("token pattern is valid")
});

pub static POLARITY: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    HashMap::from([
        // positive
        ("great", 0.8),
        ("impressed", 1.0),
        ("thanks", 0.2),
        ("appreciate", 0.5),
        ("excellent", 1.0),
        ("clear", 0.1),
        ("forward", 0.3),
        ("new", 0.14),
        ("care", 0.3),
        // negative
        ("frustrated", -0.7),
        ("unacceptable", -0.8),
        ("nothing", -0.4),
        ("waste", -0.6),
        ("leaving", -0.3),
        ("disaster", -0.8),
        ("nowhere", -0.3),
        ("hate", -0.8),
        ("problems", -0.3),
        ("difficult", -0.5),
        ("unnecessary", -0.4),
    ])
});

const INTENSIFIERS: [&str; 7] = [
    "really",
    "very",
    "seriously",
    "completely",
    "so",
    "extremely",
    "totally",
];

pub const INTENSIFIER_FACTOR: f64 = 1.3;
pub const NEGATION_FACTOR: f64 = -0.5;

/// Multiplier a token applies to the word right after it
pub fn modifier(token: &str) -> Option<f64> {
    if INTENSIFIERS.contains(&token) {
        Some(INTENSIFIER_FACTOR)
    } else if token == "not" || token == "never" || token.ends_with("n't") {
        Some(NEGATION_FACTOR)
    } else {
        None
    }
}

pub fn weight(token: &str) -> Option<f64> {
    POLARITY.get(token).copied()
}
