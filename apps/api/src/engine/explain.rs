//! Explanation generation. Renders, per dimension, the score plus the
//! concrete signals that drove it.
//!
//! Everything here is derived from the already-computed `SignalBundle` and
//! `ScoreSet`, never recomputed, so an explanation can never disagree with
//! the score it justifies.

use serde::Serialize;

use crate::engine::scoring::{Dimension, ScoreSet};
use crate::engine::signals::SignalBundle;

/// A structured justification for one dimension's score.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    pub dimension: &'static str,
    pub score: f64,
    pub text: String,
    pub signals_detected: Vec<String>,
}

/// Builds explanations for all four dimensions, in `Dimension::ALL` order.
pub fn explain_scores(signals: &SignalBundle, scores: &ScoreSet) -> Vec<Explanation> {
    Dimension::ALL
        .iter()
        .map(|&dim| explain_dimension(dim, scores.get(dim), signals))
        .collect()
}

fn explain_dimension(dimension: Dimension, score: f64, signals: &SignalBundle) -> Explanation {
    if signals.is_gibberish {
        return Explanation {
            dimension: dimension.label(),
            score,
            text: "Response could not be parsed as meaningful text. Please provide a \
                   meaningful answer."
                .to_string(),
            signals_detected: vec![
                "non-meaningful content detected".to_string(),
                format!(
                    "only {}% recognizable words",
                    (signals.real_word_ratio * 100.0).round()
                ),
            ],
        };
    }

    let (text, signals_detected) = match dimension {
        Dimension::Clarity => explain_clarity(score, signals),
        Dimension::Accuracy => explain_accuracy(score, signals),
        Dimension::Completeness => explain_completeness(score, signals),
        Dimension::Confidence => explain_confidence(score, signals),
    };

    Explanation {
        dimension: dimension.label(),
        score,
        text,
        signals_detected,
    }
}

fn explain_clarity(score: f64, signals: &SignalBundle) -> (String, Vec<String>) {
    let mut detected = vec![
        format!("{} sentence(s) detected", signals.sentence_count),
        format!("{} words total", signals.word_count),
    ];
    if signals.unique_ratio < 0.4 {
        detected.push("high word repetition detected".to_string());
    } else if signals.unique_ratio > 0.7 {
        detected.push(format!("diverse vocabulary ({})", signals.unique_ratio));
    }
    if signals.filler_count > 0 {
        detected.push(format!("{} hedging phrase(s)", signals.filler_count));
    }

    let text = if score >= 7.0 {
        "Well-structured response with clear sentence organization."
    } else if score >= 4.0 {
        "Adequate structure. Additional sentences would improve readability."
    } else {
        "Response lacks sentence structure or is too brief for clear communication."
    };
    (text.to_string(), detected)
}

fn explain_accuracy(score: f64, signals: &SignalBundle) -> (String, Vec<String>) {
    let mut detected = vec![format!(
        "{} of {} keywords matched",
        signals.matched_keywords.len(),
        signals.total_keywords
    )];
    if !signals.matched_keywords.is_empty() {
        let mut preview = signals
            .matched_keywords
            .iter()
            .take(5)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        if signals.matched_keywords.len() > 5 {
            preview.push_str("...");
        }
        detected.push(format!("Found: {preview}"));
    }

    let text = if score >= 7.0 {
        "Strong keyword presence indicates solid understanding of the topic."
    } else if score >= 4.0 {
        "Some relevant concepts present but key terms are missing."
    } else {
        "Very few domain-relevant terms detected in the response."
    };
    (text.to_string(), detected)
}

fn explain_completeness(score: f64, signals: &SignalBundle) -> (String, Vec<String>) {
    let mut detected = vec![
        format!("{} words total", signals.word_count),
        format!("{} sentence(s)", signals.sentence_count),
    ];
    if signals.has_examples {
        detected.push("includes concrete examples".to_string());
    } else {
        detected.push("no specific examples detected".to_string());
    }

    let text = if score >= 7.0 {
        "Thorough response covering multiple facets of the question."
    } else if score >= 4.0 {
        "Covers the basics but could explore the topic further."
    } else {
        "Response is too brief or narrow to be considered complete."
    };
    (text.to_string(), detected)
}

fn explain_confidence(score: f64, signals: &SignalBundle) -> (String, Vec<String>) {
    let mut detected = Vec::new();
    if signals.filler_count == 0 {
        detected.push("no filler/hesitation words".to_string());
    } else {
        let fillers = signals
            .filler_words_found
            .iter()
            .take(4)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        detected.push(format!("{} filler word(s): {fillers}", signals.filler_count));
    }
    if signals.assertive_found.is_empty() {
        detected.push("no assertive phrases detected".to_string());
    } else {
        let phrases = signals
            .assertive_found
            .iter()
            .take(3)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        detected.push(format!("assertive phrases: {phrases}"));
    }

    let text = if score >= 7.0 {
        "Confident, assertive tone with minimal hesitation."
    } else if score >= 4.0 {
        "Moderate confidence. Some uncertainty phrases dilute the message."
    } else {
        "Response suggests significant uncertainty or excessive hedging."
    };
    (text.to_string(), detected)
}
