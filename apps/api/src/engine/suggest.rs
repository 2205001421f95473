//! Suggestion engine: maps each dimension's score band to canned,
//! level-tagged advice. Stateless; a pure function of the score set and the
//! signal bundle that produced it.

use serde::{Deserialize, Serialize};

use crate::engine::scoring::{Dimension, ScoreSet};
use crate::engine::signals::SignalBundle;

/// Score band boundaries: low < `low_max`, medium `low_max..=medium_max`,
/// high > `medium_max`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionBands {
    pub low_max: f64,
    pub medium_max: f64,
}

impl Default for SuggestionBands {
    fn default() -> Self {
        SuggestionBands {
            low_max: 4.5,
            medium_max: 7.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionLevel {
    Low,
    Medium,
    High,
}

/// One advice record per dimension.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub level: SuggestionLevel,
    pub text: String,
    pub icon: &'static str,
    pub score: f64,
    pub dimension: &'static str,
}

/// All four suggestions, keyed by dimension on the wire.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionSet {
    pub clarity: Suggestion,
    pub accuracy: Suggestion,
    pub completeness: Suggestion,
    pub confidence: Suggestion,
}

/// Builds the suggestion set for one answer.
pub fn suggest(signals: &SignalBundle, scores: &ScoreSet, bands: &SuggestionBands) -> SuggestionSet {
    SuggestionSet {
        clarity: suggestion_for(Dimension::Clarity, scores.clarity, signals, bands),
        accuracy: suggestion_for(Dimension::Accuracy, scores.accuracy, signals, bands),
        completeness: suggestion_for(Dimension::Completeness, scores.completeness, signals, bands),
        confidence: suggestion_for(Dimension::Confidence, scores.confidence, signals, bands),
    }
}

fn suggestion_for(
    dimension: Dimension,
    score: f64,
    signals: &SignalBundle,
    bands: &SuggestionBands,
) -> Suggestion {
    if signals.is_gibberish {
        return Suggestion {
            level: SuggestionLevel::Low,
            text: "The response could not be parsed as meaningful text. Rewrite your answer \
                   in plain sentences that address the question."
                .to_string(),
            icon: "⚠️",
            score,
            dimension: dimension.label(),
        };
    }

    let (level, icon, text) = if score < bands.low_max {
        (SuggestionLevel::Low, "⚠️", low_text(dimension, signals))
    } else if score <= bands.medium_max {
        (SuggestionLevel::Medium, "💡", medium_text(dimension, signals))
    } else {
        (SuggestionLevel::High, "✅", high_text(dimension, signals))
    };

    Suggestion {
        level,
        text,
        icon,
        score,
        dimension: dimension.label(),
    }
}

fn low_text(dimension: Dimension, signals: &SignalBundle) -> String {
    match dimension {
        Dimension::Clarity => {
            if signals.word_count < 15 {
                "Your response is very brief. Aim for at least 3-4 complete sentences with a \
                 clear beginning, middle, and conclusion."
                    .to_string()
            } else if signals.unique_ratio < 0.4 {
                "There is noticeable word repetition. Vary your vocabulary and structure \
                 thoughts into distinct sentences."
                    .to_string()
            } else {
                "Improve clarity by organizing your answer into clear sentences. Start with \
                 your main point, support with details, then summarize."
                    .to_string()
            }
        }
        Dimension::Accuracy => {
            if signals.matched_keywords.is_empty() {
                "Your answer did not include key technical terms. Review the topic and \
                 incorporate specific terminology and concepts."
                    .to_string()
            } else {
                format!(
                    "Only {} relevant term(s) detected. Use more domain-specific vocabulary \
                     and reference concrete concepts.",
                    signals.matched_keywords.len()
                )
            }
        }
        Dimension::Completeness => {
            if signals.word_count < 15 {
                "Your response is too brief. Expand with at least 3-5 sentences covering \
                 different aspects of the question."
                    .to_string()
            } else {
                "Your answer covers limited ground. Address multiple facets and include \
                 specific examples to demonstrate depth."
                    .to_string()
            }
        }
        Dimension::Confidence => {
            if signals.filler_count > 3 {
                let fillers = signals
                    .filler_words_found
                    .iter()
                    .take(3)
                    .cloned()
                    .collect::<Vec<_>>()
                    .join("', '");
                format!(
                    "Multiple hesitation phrases detected ('{fillers}'). Practice delivering \
                     answers with direct, assertive language."
                )
            } else {
                "The response conveys uncertainty. Use definitive statements like 'I \
                 achieved...' or 'I built...' to project confidence."
                    .to_string()
            }
        }
    }
}

fn medium_text(dimension: Dimension, signals: &SignalBundle) -> String {
    match dimension {
        Dimension::Clarity => {
            if signals.sentence_count < 3 {
                "Your answer is reasonably clear but could benefit from additional sentences \
                 to fully develop your point."
                    .to_string()
            } else {
                "Good clarity foundation. Ensure each sentence transitions smoothly to the \
                 next for a cohesive narrative."
                    .to_string()
            }
        }
        Dimension::Accuracy => format!(
            "You referenced {} of {} expected concepts. Mentioning more domain-specific \
             terms would elevate accuracy.",
            signals.matched_keywords.len(),
            signals.total_keywords
        ),
        Dimension::Completeness => {
            if !signals.has_examples {
                "Solid answer overall. Adding a concrete example or use case would make it \
                 more complete and convincing."
                    .to_string()
            } else {
                "Good detail level. Consider expanding on additional angles or trade-offs to \
                 demonstrate comprehensive understanding."
                    .to_string()
            }
        }
        Dimension::Confidence => {
            if signals.filler_count > 0 {
                format!(
                    "Your answer is confident overall, but reducing hesitation phrases like \
                     '{}' would strengthen delivery.",
                    signals.filler_words_found[0]
                )
            } else {
                "Confident tone detected. Adding a personal achievement statement would \
                 further reinforce self-assurance."
                    .to_string()
            }
        }
    }
}

fn high_text(dimension: Dimension, signals: &SignalBundle) -> String {
    match dimension {
        Dimension::Clarity => "Excellent clarity! Well-structured and easy to follow. To reach \
                               the next level, consider using transition phrases between ideas."
            .to_string(),
        Dimension::Accuracy => format!(
            "Strong technical accuracy with {} relevant concepts. For even greater impact, \
             relate concepts to real-world applications.",
            signals.matched_keywords.len()
        ),
        Dimension::Completeness => {
            if signals.has_examples {
                "Very thorough response with examples included. Exceptional completeness — \
                 maintain this standard across all answers."
                    .to_string()
            } else {
                "Comprehensive answer. Adding a brief example would make it truly outstanding."
                    .to_string()
            }
        }
        Dimension::Confidence => {
            if !signals.assertive_found.is_empty() {
                "Highly confident delivery with assertive language. This projects \
                 professionalism — keep this approach."
                    .to_string()
            } else {
                "Strong confident tone. Consider adding quantified achievements to amplify \
                 impact."
                    .to_string()
            }
        }
    }
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
        keywords: &["api", "rest", "endpoint", "node", "tested", "database"],
    };

    fn scores(value: f64) -> ScoreSet {
        ScoreSet {
            clarity: value,
            accuracy: value,
            completeness: value,
            confidence: value,
        }
    }

    fn signals() -> SignalBundle {
        extract_signals(
            "I built a REST API with Node and tested every endpoint carefully.",
            &QUESTION,
            0.4,
        )
    }

    #[test]
    fn test_band_boundaries() {
        let bands = SuggestionBands::default();
        let s = signals();
        let low = suggestion_for(Dimension::Clarity, 4.4, &s, &bands);
        let medium_floor = suggestion_for(Dimension::Clarity, 4.5, &s, &bands);
        let medium_ceiling = suggestion_for(Dimension::Clarity, 7.0, &s, &bands);
        let high = suggestion_for(Dimension::Clarity, 7.1, &s, &bands);
        assert_eq!(low.level, SuggestionLevel::Low);
        assert_eq!(medium_floor.level, SuggestionLevel::Medium);
        assert_eq!(medium_ceiling.level, SuggestionLevel::Medium);
        assert_eq!(high.level, SuggestionLevel::High);
    }

    #[test]
    fn test_levels_carry_icons() {
        let bands = SuggestionBands::default();
        let s = signals();
        assert_eq!(suggestion_for(Dimension::Accuracy, 2.0, &s, &bands).icon, "⚠️");
        assert_eq!(suggestion_for(Dimension::Accuracy, 5.0, &s, &bands).icon, "💡");
        assert_eq!(suggestion_for(Dimension::Accuracy, 9.0, &s, &bands).icon, "✅");
    }

    #[test]
    fn test_suggestion_set_covers_every_dimension() {
        let bands = SuggestionBands::default();
        let set = suggest(&signals(), &scores(5.0), &bands);
        assert_eq!(set.clarity.dimension, "Clarity");
        assert_eq!(set.accuracy.dimension, "Technical Accuracy");
        assert_eq!(set.completeness.dimension, "Completeness");
        assert_eq!(set.confidence.dimension, "Confidence");
    }

    #[test]
    fn test_gibberish_gets_rewrite_advice_at_low_level() {
        let bands = SuggestionBands::default();
        let s = extract_signals("zxcv bnmp qwrt", &QUESTION, 0.4);
        assert!(s.is_gibberish);
        let set = suggest(&s, &ScoreSet::zero(), &bands);
        for suggestion in [set.clarity, set.accuracy, set.completeness, set.confidence] {
            assert_eq!(suggestion.level, SuggestionLevel::Low);
            assert!(suggestion.text.contains("could not be parsed"));
        }
    }

    #[test]
    fn test_medium_accuracy_mentions_keyword_counts() {
        let bands = SuggestionBands::default();
        let s = signals();
        let suggestion = suggestion_for(Dimension::Accuracy, 6.0, &s, &bands);
        assert!(suggestion.text.contains(&format!("{}", s.matched_keywords.len())));
        assert!(suggestion.text.contains(&format!("{}", s.total_keywords)));
    }
}
