//! Dimension scorers: four deterministic pure functions over a
//! `SignalBundle`, each clamped to [0, 10] and rounded to one decimal.
//!
//! Every coefficient and threshold lives in `ScoringConfig`; the functions
//! fix only the shape (which signals move which dimension, and in which
//! direction). The gibberish gate runs before any of these; see
//! `engine::evaluate_answer`.

use serde::{Deserialize, Serialize};

use crate::engine::round1;
use crate::engine::signals::SignalBundle;

/// The four scoring axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Clarity,
    Accuracy,
    Completeness,
    Confidence,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Clarity,
        Dimension::Accuracy,
        Dimension::Completeness,
        Dimension::Confidence,
    ];

    /// Display label used in explanations, suggestions, and reports.
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Clarity => "Clarity",
            Dimension::Accuracy => "Technical Accuracy",
            Dimension::Completeness => "Completeness",
            Dimension::Confidence => "Confidence",
        }
    }
}

/// One score per dimension. Produced once per answer, never mutated.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSet {
    pub clarity: f64,
    pub accuracy: f64,
    pub completeness: f64,
    pub confidence: f64,
}

impl ScoreSet {
    pub fn zero() -> Self {
        ScoreSet {
            clarity: 0.0,
            accuracy: 0.0,
            completeness: 0.0,
            confidence: 0.0,
        }
    }

    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Clarity => self.clarity,
            Dimension::Accuracy => self.accuracy,
            Dimension::Completeness => self.completeness,
            Dimension::Confidence => self.confidence,
        }
    }
}

/// Tunable weights and thresholds for the four scorers. `Default` carries
/// the production values; tests construct variants to probe the shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Real-word ratio below which a non-empty answer is gibberish.
    pub gibberish_threshold: f64,

    // Clarity
    pub clarity_base: f64,
    /// (min sentence count, bonus) pairs, highest threshold first.
    pub clarity_sentence_bands: Vec<(usize, f64)>,
    /// (min word count, bonus) pairs, highest threshold first.
    pub clarity_word_bands: Vec<(usize, f64)>,
    /// Subtracted when the answer is below every word band.
    pub clarity_short_penalty: f64,
    /// Unique-word ratio below this costs `clarity_repetition_penalty`.
    pub clarity_repetition_cutoff: f64,
    pub clarity_repetition_penalty: f64,
    pub clarity_filler_penalty: f64,
    pub clarity_filler_penalty_cap: f64,

    // Accuracy
    /// (min keyword match ratio, score) pairs, highest threshold first.
    pub accuracy_bands: Vec<(f64, f64)>,
    /// Score when no band matches.
    pub accuracy_floor: f64,
    /// Matched-keyword count that earns the breadth bonus.
    pub accuracy_breadth_at: usize,
    pub accuracy_breadth_bonus: f64,

    // Completeness
    pub completeness_base: f64,
    pub completeness_word_bands: Vec<(usize, f64)>,
    pub completeness_short_penalty: f64,
    pub completeness_sentence_bands: Vec<(usize, f64)>,
    pub completeness_example_bonus: f64,

    // Confidence
    pub confidence_base: f64,
    pub confidence_word_bands: Vec<(usize, f64)>,
    pub confidence_short_penalty: f64,
    /// Per filler phrase, capped at `confidence_filler_penalty_cap`.
    pub confidence_filler_penalty: f64,
    pub confidence_filler_penalty_cap: f64,
    /// Per assertive phrase, capped at `confidence_assertive_bonus_cap`.
    pub confidence_assertive_bonus: f64,
    pub confidence_assertive_bonus_cap: f64,
    /// Real-word ratio at or above this earns `confidence_real_word_bonus`.
    pub confidence_real_word_at: f64,
    pub confidence_real_word_bonus: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            gibberish_threshold: 0.40,

            clarity_base: 5.0,
            clarity_sentence_bands: vec![(3, 2.0), (2, 1.0)],
            clarity_word_bands: vec![(30, 2.0), (15, 1.0)],
            clarity_short_penalty: 2.0,
            clarity_repetition_cutoff: 0.4,
            clarity_repetition_penalty: 2.0,
            clarity_filler_penalty: 0.3,
            clarity_filler_penalty_cap: 1.5,

            accuracy_bands: vec![(0.5, 9.0), (0.35, 7.5), (0.25, 6.0), (0.15, 4.5), (0.05, 3.0)],
            accuracy_floor: 1.5,
            accuracy_breadth_at: 6,
            accuracy_breadth_bonus: 1.0,

            completeness_base: 3.0,
            completeness_word_bands: vec![(80, 3.0), (50, 2.5), (30, 1.5), (15, 0.5)],
            completeness_short_penalty: 1.0,
            completeness_sentence_bands: vec![(5, 2.5), (3, 1.5), (2, 0.5)],
            completeness_example_bonus: 0.5,

            confidence_base: 5.0,
            confidence_word_bands: vec![(40, 2.0), (20, 1.5), (10, 0.5)],
            confidence_short_penalty: 2.0,
            confidence_filler_penalty: 0.8,
            confidence_filler_penalty_cap: 4.0,
            confidence_assertive_bonus: 0.5,
            confidence_assertive_bonus_cap: 2.0,
            confidence_real_word_at: 0.8,
            confidence_real_word_bonus: 0.5,
        }
    }
}

/// Computes all four dimension scores. Callers must have run the gibberish
/// gate first; this assumes a meaningful, non-empty answer.
pub fn compute_scores(signals: &SignalBundle, cfg: &ScoringConfig) -> ScoreSet {
    if signals.word_count == 0 {
        return ScoreSet::zero();
    }
    ScoreSet {
        clarity: score_clarity(signals, cfg),
        accuracy: score_accuracy(signals, cfg),
        completeness: score_completeness(signals, cfg),
        confidence: score_confidence(signals, cfg),
    }
}

/// Clarity: sentence structure and readable length, penalized for word
/// repetition and excessive hedging. Saturates at the top band.
fn score_clarity(signals: &SignalBundle, cfg: &ScoringConfig) -> f64 {
    let mut score = cfg.clarity_base;
    score += band_bonus(&cfg.clarity_sentence_bands, signals.sentence_count).unwrap_or(0.0);
    score += band_bonus(&cfg.clarity_word_bands, signals.word_count)
        .unwrap_or(-cfg.clarity_short_penalty);
    if signals.unique_ratio < cfg.clarity_repetition_cutoff {
        score -= cfg.clarity_repetition_penalty;
    }
    score -= (signals.filler_count as f64 * cfg.clarity_filler_penalty)
        .min(cfg.clarity_filler_penalty_cap);
    finalize(score)
}

/// Accuracy: keyword breadth relative to the question's keyword set, with
/// diminishing returns past the top band.
fn score_accuracy(signals: &SignalBundle, cfg: &ScoringConfig) -> f64 {
    let ratio = signals.keyword_match_ratio;
    let mut score = cfg
        .accuracy_bands
        .iter()
        .find(|(min, _)| ratio >= *min)
        .map(|(_, s)| *s)
        .unwrap_or(cfg.accuracy_floor);
    if signals.matched_keywords.len() >= cfg.accuracy_breadth_at {
        score += cfg.accuracy_breadth_bonus;
    }
    finalize(score)
}

/// Completeness: depth (word count up to a target), breadth (sentence
/// variety), and a bonus for concrete examples. Short answers stay capped
/// low regardless of other signals.
fn score_completeness(signals: &SignalBundle, cfg: &ScoringConfig) -> f64 {
    let mut score = cfg.completeness_base;
    score += band_bonus(&cfg.completeness_word_bands, signals.word_count)
        .unwrap_or(-cfg.completeness_short_penalty);
    score += band_bonus(&cfg.completeness_sentence_bands, signals.sentence_count).unwrap_or(0.0);
    if signals.has_examples {
        score += cfg.completeness_example_bonus;
    }
    finalize(score)
}

/// Confidence: assertive language and committed length, minus a per-filler
/// penalty (capped, floor at zero via the final clamp).
fn score_confidence(signals: &SignalBundle, cfg: &ScoringConfig) -> f64 {
    let mut score = cfg.confidence_base;
    score += band_bonus(&cfg.confidence_word_bands, signals.word_count)
        .unwrap_or(-cfg.confidence_short_penalty);
    score -= (signals.filler_count as f64 * cfg.confidence_filler_penalty)
        .min(cfg.confidence_filler_penalty_cap);
    score += (signals.assertive_found.len() as f64 * cfg.confidence_assertive_bonus)
        .min(cfg.confidence_assertive_bonus_cap);
    if signals.real_word_ratio >= cfg.confidence_real_word_at {
        score += cfg.confidence_real_word_bonus;
    }
    finalize(score)
}

/// First bonus whose threshold the value meets; bands are ordered highest
/// threshold first.
fn band_bonus(bands: &[(usize, f64)], value: usize) -> Option<f64> {
    bands
        .iter()
        .find(|(min, _)| value >= *min)
        .map(|(_, bonus)| *bonus)
}

fn finalize(score: f64) -> f64 {
    round1(score.clamp(0.0, 10.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::Question;
    use crate::engine::signals::extract_signals;

    const QUESTION: Question = Question {
        id: "backend-api",
        text: "Walk us through how you would design and test a REST API for a new service.",
        category: "Technical Knowledge",
        keywords: &[
            "api", "rest", "endpoint", "http", "json", "request", "response", "status code",
            "authentication", "versioning", "node", "server", "postman", "tested", "database",
        ],
    };

    fn signals_for(answer: &str) -> SignalBundle {
        extract_signals(answer, &QUESTION, 0.4)
    }

    #[test]
    fn test_zero_words_scores_zero_everywhere() {
        let cfg = ScoringConfig::default();
        let scores = compute_scores(&signals_for(""), &cfg);
        assert_eq!(scores.clarity, 0.0);
        assert_eq!(scores.accuracy, 0.0);
        assert_eq!(scores.completeness, 0.0);
        assert_eq!(scores.confidence, 0.0);
    }

    #[test]
    fn test_all_scores_in_range_and_one_decimal() {
        let cfg = ScoringConfig::default();
        let answers = [
            "Yes.",
            "I built a REST API with Node. I tested every endpoint with Postman. For example, \
             the authentication flow had integration tests covering each status code.",
            "maybe um i guess sort of probably",
        ];
        for answer in answers {
            let scores = compute_scores(&signals_for(answer), &cfg);
            for dim in Dimension::ALL {
                let s = scores.get(dim);
                assert!((0.0..=10.0).contains(&s), "{dim:?} out of range: {s}");
                assert_eq!(round1(s), s, "{dim:?} not rounded to one decimal: {s}");
            }
        }
    }

    #[test]
    fn test_clarity_monotone_in_sentence_count() {
        let cfg = ScoringConfig::default();
        let one = score_clarity(&signals_for("I designed the API endpoints carefully over weeks"), &cfg);
        let three = score_clarity(
            &signals_for("I designed the API. I tested endpoints. I shipped it carefully"),
            &cfg,
        );
        assert!(three >= one, "clarity dropped with more sentences: {three} < {one}");
    }

    #[test]
    fn test_clarity_penalizes_filler() {
        let cfg = ScoringConfig::default();
        let clean = score_clarity(
            &signals_for("I designed the API. I tested the endpoints. I shipped the service."),
            &cfg,
        );
        let hedged = score_clarity(
            &signals_for("Maybe I designed the API. I guess I tested endpoints. Um, probably shipped it."),
            &cfg,
        );
        assert!(hedged < clean);
    }

    #[test]
    fn test_accuracy_rewards_keyword_breadth() {
        let cfg = ScoringConfig::default();
        let none = score_accuracy(&signals_for("I worked hard on the project last year."), &cfg);
        let some = score_accuracy(
            &signals_for("I built the REST API endpoint and the database behind it."),
            &cfg,
        );
        let many = score_accuracy(
            &signals_for(
                "The REST API uses JSON over HTTP; every endpoint, request, response and \
                 status code is versioned, with authentication backed by the database and \
                 tested via Postman on the Node server.",
            ),
            &cfg,
        );
        assert!(none < some);
        assert!(some < many);
        assert_eq!(none, cfg.accuracy_floor);
    }

    #[test]
    fn test_accuracy_band_thresholds() {
        let cfg = ScoringConfig::default();
        let mut signals = signals_for("filler text of reasonable length for the scorer");
        signals.keyword_match_ratio = 0.5;
        assert_eq!(score_accuracy(&signals, &cfg), 9.0);
        signals.keyword_match_ratio = 0.35;
        assert_eq!(score_accuracy(&signals, &cfg), 7.5);
        signals.keyword_match_ratio = 0.04;
        assert_eq!(score_accuracy(&signals, &cfg), 1.5);
    }

    #[test]
    fn test_completeness_caps_short_answers_low() {
        let cfg = ScoringConfig::default();
        let short = score_completeness(&signals_for("API database endpoint."), &cfg);
        assert!(short <= 3.0, "short answer scored {short}");
    }

    #[test]
    fn test_completeness_example_bonus() {
        let cfg = ScoringConfig::default();
        let base = "I covered the design, the rollout plan, and the testing strategy in depth \
                    across the whole service and its consumers";
        let with_example = format!("{base}, for example the login flow");
        let without = score_completeness(&signals_for(base), &cfg);
        let with = score_completeness(&signals_for(&with_example), &cfg);
        assert!(with > without);
    }

    #[test]
    fn test_confidence_filler_floor_is_zero() {
        let cfg = ScoringConfig::default();
        let s = score_confidence(
            &signals_for("um uh maybe perhaps possibly probably might unsure honestly basically"),
            &cfg,
        );
        assert!(s >= 0.0);
    }

    #[test]
    fn test_confidence_rewards_assertive_language() {
        let cfg = ScoringConfig::default();
        let plain = score_confidence(
            &signals_for("The service was delivered on time and the tests passed in CI."),
            &cfg,
        );
        let assertive = score_confidence(
            &signals_for("I built the service, I achieved the deadline, and it definitely passed CI."),
            &cfg,
        );
        assert!(assertive > plain);
    }

    #[test]
    fn test_confidence_monotone_in_word_count() {
        let cfg = ScoringConfig::default();
        let short = score_confidence(&signals_for("I shipped the API."), &cfg);
        let long = score_confidence(
            &signals_for(
                "I shipped the API after a long stabilization period where I profiled the \
                 hot paths, rewrote the slowest queries, added regression tests around every \
                 endpoint, and documented the rollout so the team could operate it without me.",
            ),
            &cfg,
        );
        assert!(long >= short);
    }
}
