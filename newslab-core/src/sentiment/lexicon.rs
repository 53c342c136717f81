//! Rule-based polarity from a financial word list.
//!
//! Words are looked up after lowercasing and light inflection stripping.
//! A negation flips the sign of the next scored word; an intensifier scales
//! the word right after it. The text score is the mean of matched word
//! scores, clamped to [-1, 1]; text with no matches scores 0.

use super::PolarityModel;
use std::collections::{HashMap, HashSet};

const POSITIVE: &[(&str, f64)] = &[
    ("bullish", 0.8),
    ("surge", 0.7),
    ("rally", 0.7),
    ("soar", 0.8),
    ("jump", 0.6),
    ("gain", 0.5),
    ("profit", 0.6),
    ("profitable", 0.6),
    ("growth", 0.6),
    ("grow", 0.5),
    ("rise", 0.5),
    ("increase", 0.5),
    ("improve", 0.5),
    ("outperform", 0.7),
    ("beat", 0.6),
    ("exceed", 0.6),
    ("strong", 0.5),
    ("positive", 0.5),
    ("optimistic", 0.6),
    ("upbeat", 0.6),
    ("confident", 0.5),
    ("record", 0.6),
    ("high", 0.4),
    ("upgrade", 0.6),
    ("buy", 0.5),
    ("breakout", 0.6),
    ("recovery", 0.5),
    ("rebound", 0.5),
    ("boost", 0.5),
    ("win", 0.5),
    ("success", 0.6),
    ("good", 0.5),
    ("great", 0.7),
    ("best", 0.7),
];

const NEGATIVE: &[(&str, f64)] = &[
    ("bearish", -0.8),
    ("crash", -0.9),
    ("plunge", -0.8),
    ("tumble", -0.7),
    ("slump", -0.7),
    ("drop", -0.6),
    ("fall", -0.5),
    ("decline", -0.6),
    ("loss", -0.6),
    ("down", -0.4),
    ("decrease", -0.5),
    ("weak", -0.5),
    ("negative", -0.5),
    ("pessimistic", -0.6),
    ("concern", -0.5),
    ("worry", -0.5),
    ("fear", -0.6),
    ("risk", -0.4),
    ("volatile", -0.3),
    ("uncertainty", -0.5),
    ("miss", -0.6),
    ("disappoint", -0.7),
    ("underperform", -0.6),
    ("downgrade", -0.6),
    ("sell", -0.5),
    ("cut", -0.4),
    ("lawsuit", -0.6),
    ("probe", -0.4),
    ("layoff", -0.6),
    ("bankruptcy", -0.9),
    ("crisis", -0.8),
    ("warning", -0.5),
    ("trouble", -0.6),
    ("problem", -0.5),
    ("fail", -0.7),
    ("fraud", -0.9),
    ("bad", -0.5),
    ("worst", -0.8),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "none", "nothing", "cannot", "cant", "can't",
    "don't", "dont", "doesn't", "doesnt", "didn't", "didnt", "won't", "wont", "isn't", "isnt",
    "aren't", "arent", "wasn't", "wasnt", "hardly", "barely",
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.5),
    ("extremely", 2.0),
    ("highly", 1.5),
    ("significantly", 1.5),
    ("sharply", 1.5),
    ("dramatically", 1.8),
    ("massively", 1.8),
    ("slightly", 0.5),
    ("somewhat", 0.7),
    ("marginally", 0.5),
];

/// Financial word-list polarity model.
#[derive(Debug, Clone)]
pub struct LexiconModel {
    words: HashMap<String, f64>,
    negations: HashSet<String>,
    intensifiers: HashMap<String, f64>,
}

impl Default for LexiconModel {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconModel {
    pub fn new() -> Self {
        let words = POSITIVE
            .iter()
            .chain(NEGATIVE)
            .map(|&(w, s)| (w.to_string(), s))
            .collect();
        Self {
            words,
            negations: NEGATIONS.iter().map(|w| w.to_string()).collect(),
            intensifiers: INTENSIFIERS
                .iter()
                .map(|&(w, m)| (w.to_string(), m))
                .collect(),
        }
    }

    /// Add or override a word score.
    pub fn with_word(mut self, word: &str, score: f64) -> Self {
        self.words.insert(word.to_lowercase(), score.clamp(-1.0, 1.0));
        self
    }

    /// Score of a single token, trying inflected forms after the exact one.
    pub fn word_score(&self, token: &str) -> Option<f64> {
        let token = token.to_lowercase();
        if let Some(&s) = self.words.get(&token) {
            return Some(s);
        }
        stems(&token)
            .into_iter()
            .find_map(|stem| self.words.get(&stem).copied())
    }
}

impl PolarityModel for LexiconModel {
    fn name(&self) -> &str {
        "lexicon"
    }

    fn polarity(&self, text: &str) -> f64 {
        let mut scores = Vec::new();
        let mut negate = false;
        let mut multiplier = 1.0;

        for token in tokenize(text) {
            if self.negations.contains(&token) {
                negate = true;
                continue;
            }
            if let Some(&m) = self.intensifiers.get(&token) {
                multiplier = m;
                continue;
            }
            match self.word_score(&token) {
                Some(mut score) => {
                    if negate {
                        score = -score;
                        negate = false;
                    }
                    scores.push(score * multiplier);
                    multiplier = 1.0;
                }
                None => multiplier = 1.0,
            }
        }

        if scores.is_empty() {
            return 0.0;
        }
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        mean.clamp(-1.0, 1.0)
    }
}

/// Lowercased tokens split on anything but letters, digits and apostrophes.
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '\u{2019}'))
        .map(|t| t.trim_matches(|c| c == '\'' || c == '\u{2019}'))
        .filter(|t| !t.is_empty())
        .map(|t| t.replace('\u{2019}', "'").to_lowercase())
}

/// Candidate base forms for a plural / past / progressive token.
fn stems(token: &str) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(base) = token.strip_suffix("ies").or_else(|| token.strip_suffix("ied")) {
        out.push(format!("{base}y"));
    }
    if let Some(base) = token.strip_suffix("es") {
        out.push(base.to_string());
    }
    if let Some(base) = token.strip_suffix('s') {
        out.push(base.to_string());
    }
    if let Some(base) = token.strip_suffix("ed") {
        out.push(base.to_string());
        out.push(format!("{base}e"));
    }
    if let Some(base) = token.strip_suffix("ing") {
        out.push(base.to_string());
        out.push(format!("{base}e"));
    }
    out.retain(|s| s.len() >= 2);
    out
}
