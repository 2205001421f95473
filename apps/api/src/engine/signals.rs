//! Signal extraction: turns raw answer text into the measurable signals
//! that drive every score, explanation, and suggestion downstream.
//!
//! Extraction is purely lexical: whitespace/terminator splitting plus fixed
//! phrase lexicons. No score is computed here; scorers consume the bundle.

use serde::Serialize;

use crate::bank::Question;
use crate::engine::round2;

/// Hedging phrases that dilute confidence. Matched on word boundaries,
/// duplicates counted.
const FILLER_PHRASES: &[&str] = &[
    "maybe",
    "perhaps",
    "i think",
    "i guess",
    "not sure",
    "possibly",
    "kind of",
    "sort of",
    "basically",
    "um",
    "uh",
    "probably",
    "i don't know",
    "might",
    "could be",
    "not really",
    "unsure",
    "i suppose",
    "honestly",
    "actually",
];

/// Ownership/confidence phrases that boost the confidence score.
const ASSERTIVE_PHRASES: &[&str] = &[
    "i am confident",
    "i believe",
    "i know",
    "i have",
    "i can",
    "i will",
    "i built",
    "i achieved",
    "i successfully",
    "definitely",
    "certainly",
    "clearly",
];

/// Phrases that introduce a concrete example.
const EXAMPLE_PHRASES: &[&str] = &[
    "for example",
    "for instance",
    "such as",
    "specifically",
    "in particular",
    "like when",
    "one time",
];

/// Legitimate short or vowel-less words the real-word rule would otherwise
/// reject.
const SHORT_REAL_WORDS: &[&str] = &["a", "i", "my", "by", "try", "why", "ok"];

/// Everything measurable about one answer. Immutable once computed; one
/// instance per answer, shared by scorers, explanations, and suggestions.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalBundle {
    pub word_count: usize,
    pub sentence_count: usize,
    pub unique_ratio: f64,
    pub matched_keywords: Vec<String>,
    pub total_keywords: usize,
    pub keyword_match_ratio: f64,
    pub filler_words_found: Vec<String>,
    pub filler_count: usize,
    pub assertive_found: Vec<String>,
    pub has_examples: bool,
    pub real_word_ratio: f64,
    pub is_gibberish: bool,
}

/// Extracts the full signal bundle for one answer against its question.
///
/// `gibberish_threshold` is the real-word ratio below which a non-empty
/// answer is flagged as gibberish; the flag must be set here so scorers can
/// short-circuit before any dimension logic runs.
pub fn extract_signals(answer: &str, question: &Question, gibberish_threshold: f64) -> SignalBundle {
    let lower = answer.to_lowercase();
    let words: Vec<&str> = answer.split_whitespace().collect();
    let word_count = words.len();

    let sentence_count = answer
        .split(['.', '!', '?'])
        .filter(|s| !s.trim().is_empty())
        .count();

    let unique_count = {
        let mut seen: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();
        seen.sort();
        seen.dedup();
        seen.len()
    };
    let unique_ratio = if word_count > 0 {
        round2(unique_count as f64 / word_count as f64)
    } else {
        0.0
    };

    let matched_keywords: Vec<String> = question
        .keywords
        .iter()
        .filter(|kw| lower.contains(&kw.to_lowercase()))
        .map(|kw| kw.to_string())
        .collect();
    let total_keywords = question.keywords.len();
    let keyword_match_ratio = if total_keywords > 0 {
        round2(matched_keywords.len() as f64 / total_keywords as f64)
    } else {
        0.0
    };

    let mut filler_words_found = Vec::new();
    let mut filler_count = 0;
    for filler in FILLER_PHRASES {
        let hits = count_boundary_hits(&lower, filler);
        if hits > 0 {
            filler_count += hits;
            filler_words_found.push(filler.to_string());
        }
    }

    let assertive_found: Vec<String> = ASSERTIVE_PHRASES
        .iter()
        .filter(|p| lower.contains(*p))
        .map(|p| p.to_string())
        .collect();

    let has_examples = EXAMPLE_PHRASES.iter().any(|p| lower.contains(p));

    let real_count = words.iter().filter(|w| is_real_word(w)).count();
    let real_word_ratio = if word_count > 0 {
        round2(real_count as f64 / word_count as f64)
    } else {
        0.0
    };
    let is_gibberish = word_count > 0 && real_word_ratio < gibberish_threshold;

    SignalBundle {
        word_count,
        sentence_count,
        unique_ratio,
        matched_keywords,
        total_keywords,
        keyword_match_ratio,
        filler_words_found,
        filler_count,
        assertive_found,
        has_examples,
        real_word_ratio,
        is_gibberish,
    }
}

/// A word counts as "real" if, after stripping edge punctuation, it is longer
/// than one character and contains a vowel, or sits in the short allow-list.
/// Guards against pure-consonant keyboard-mash tokens.
fn is_real_word(raw: &str) -> bool {
    let trimmed: String = raw
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();
    if trimmed.is_empty() {
        return false;
    }
    if SHORT_REAL_WORDS.contains(&trimmed.as_str()) {
        return true;
    }
    trimmed.chars().count() > 1 && trimmed.chars().any(|c| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u'))
}

/// Counts occurrences of `needle` in `haystack` that sit on word boundaries
/// (not embedded in a longer alphanumeric run). Case handling is the
/// caller's job; pass lowercased text.
fn count_boundary_hits(haystack: &str, needle: &str) -> usize {
    let mut count = 0;
    let mut offset = 0;
    while let Some(pos) = haystack[offset..].find(needle) {
        let begin = offset + pos;
        let end = begin + needle.len();
        let boundary_before = haystack[..begin]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let boundary_after = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        if boundary_before && boundary_after {
            count += 1;
        }
        offset = begin + needle.len().max(1);
    }
    count
}
