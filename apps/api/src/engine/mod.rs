// The answer-scoring pipeline: extract → gate → score → explain → suggest.
// Pure functions over immutable value types; no state is touched here, which
// keeps explanations and suggestions consistent with the scores they describe.

pub mod explain;
pub mod scoring;
pub mod signals;
pub mod suggest;

use serde::{Deserialize, Serialize};

use crate::bank::Question;
use crate::engine::explain::{explain_scores, Explanation};
use crate::engine::scoring::{compute_scores, ScoreSet, ScoringConfig};
use crate::engine::signals::{extract_signals, SignalBundle};
use crate::engine::suggest::{suggest, SuggestionBands, SuggestionSet};
use crate::report::ReadinessThresholds;

/// All tunable engine constants, carried in `AppState` so tests can override
/// any of them without touching the environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    pub scoring: ScoringConfig,
    pub bands: SuggestionBands,
    pub thresholds: ReadinessThresholds,
}

/// The full pipeline output for one answer.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub signals: SignalBundle,
    pub scores: ScoreSet,
    pub explanations: Vec<Explanation>,
    pub suggestions: SuggestionSet,
}

/// Runs the whole scoring pipeline for one answer.
///
/// The gibberish gate runs before any dimension scorer: a flagged answer gets
/// all-zero scores and could-not-parse explanations/suggestions, but is still
/// a valid, recordable evaluation; gibberish is not an error.
pub fn evaluate_answer(question: &Question, answer: &str, cfg: &EngineConfig) -> Evaluation {
    let signals = extract_signals(answer, question, cfg.scoring.gibberish_threshold);
    let scores = if signals.is_gibberish {
        ScoreSet::zero()
    } else {
        compute_scores(&signals, &cfg.scoring)
    };
    let explanations = explain_scores(&signals, &scores);
    let suggestions = suggest(&signals, &scores, &cfg.bands);
    Evaluation {
        signals,
        scores,
        explanations,
        suggestions,
    }
}

/// Rounds to one decimal place. All dimension scores and averages use this.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Rounds to two decimal places. Used for ratios in the signal bundle.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scoring::Dimension;
    use crate::engine::suggest::SuggestionLevel;

    const QUESTION: Question = Question {
        id: "backend-api",
        text: "Walk us through how you would design and test a REST API for a new service.",
        category: "Technical Knowledge",
        keywords: &[
            "api", "rest", "endpoint", "http", "json", "request", "response", "status code",
            "authentication", "versioning", "node", "server", "postman", "tested", "database",
        ],
    };

    #[test]
    fn test_gibberish_forces_all_zero_scores() {
        let cfg = EngineConfig::default();
        let eval = evaluate_answer(&QUESTION, "zxcv bnmp qwrt lkjh", &cfg);
        assert!(eval.signals.is_gibberish);
        for dim in Dimension::ALL {
            assert_eq!(eval.scores.get(dim), 0.0);
        }
        assert!(eval.explanations[0].text.contains("could not be parsed"));
        assert_eq!(eval.suggestions.clarity.level, SuggestionLevel::Low);
    }

    #[test]
    fn test_assertive_phrases_raise_confidence() {
        let cfg = EngineConfig::default();
        let answer =
            "I built a REST API for example using Node and definitely tested it with Postman";
        let eval = evaluate_answer(&QUESTION, answer, &cfg);

        assert!(!eval.signals.is_gibberish);
        assert!(eval.signals.matched_keywords.contains(&"api".to_string()));
        assert!(eval.signals.assertive_found.contains(&"i built".to_string()));
        assert!(eval
            .signals
            .assertive_found
            .contains(&"definitely".to_string()));
        assert!(eval.signals.has_examples);

        // Same answer with the assertive/example phrases removed must score
        // strictly lower on confidence.
        let stripped = "A REST API was made using Node and was tested with Postman";
        let stripped_eval = evaluate_answer(&QUESTION, stripped, &cfg);
        assert!(
            eval.scores.confidence > stripped_eval.scores.confidence,
            "{} vs {}",
            eval.scores.confidence,
            stripped_eval.scores.confidence
        );
    }

    #[test]
    fn test_explanations_match_scores_for_any_answer() {
        let cfg = EngineConfig::default();
        let answers = [
            "Short.",
            "I built a REST API. I tested the endpoints with Postman. For example, the \
             authentication flow has full coverage and the database layer is mocked.",
            "maybe um i guess it works",
        ];
        for answer in answers {
            let eval = evaluate_answer(&QUESTION, answer, &cfg);
            for (i, dim) in Dimension::ALL.iter().enumerate() {
                assert_eq!(eval.explanations[i].score, eval.scores.get(*dim));
            }
        }
    }
}
