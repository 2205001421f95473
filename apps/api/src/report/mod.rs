//! Readiness classification and final-report aggregation.
//!
//! Everything here is a read-only derivation over a session's response
//! history: generating a report twice for an unmodified session yields the
//! same content apart from the generation timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::explain::Explanation;
use crate::engine::scoring::{Dimension, ScoreSet};
use crate::engine::suggest::SuggestionSet;
use crate::session::{Response, RunningAverages, SessionState};

pub const APP_NAME: &str = "Selectra";
pub const TAGLINE: &str = "Where interviews meet insight.";

/// Score boundaries for the readiness tiers, plus the "strong dimension"
/// threshold the report uses to split strengths from improvement areas and
/// the "weak dimension" boundary below which improvement notes escalate.
/// The strength threshold matches the suggestion high band so the report
/// never calls a dimension strong while per-answer advice says otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessThresholds {
    pub strong_candidate: f64,
    pub interview_ready: f64,
    pub strength: f64,
    pub weak_dimension: f64,
}

impl Default for ReadinessThresholds {
    fn default() -> Self {
        ReadinessThresholds {
            strong_candidate: 7.5,
            interview_ready: 5.0,
            strength: 7.0,
            weak_dimension: 4.0,
        }
    }
}

/// Readiness badge derived from the overall average.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessIndicator {
    pub label: &'static str,
    pub level: &'static str,
    pub description: &'static str,
    pub class_name: &'static str,
}

/// Pure step function of the current overall average. Recomputed after every
/// response and reused unchanged by the final report.
pub fn classify_readiness(overall: f64, thresholds: &ReadinessThresholds) -> ReadinessIndicator {
    if overall >= thresholds.strong_candidate {
        ReadinessIndicator {
            label: "Strong Candidate",
            level: "high",
            description: "Demonstrates excellent interview skills across all dimensions.",
            class_name: "readiness-high",
        }
    } else if overall >= thresholds.interview_ready {
        ReadinessIndicator {
            label: "Interview Ready",
            level: "medium",
            description: "Solid performance with room for targeted improvement.",
            class_name: "readiness-medium",
        }
    } else {
        ReadinessIndicator {
            label: "Needs Preparation",
            level: "low",
            description: "Additional practice recommended before proceeding to interviews.",
            class_name: "readiness-low",
        }
    }
}

/// A dimension called out in the report, with a qualitative note.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionNote {
    pub name: &'static str,
    pub score: f64,
    pub note: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewInsights {
    pub strengths: Vec<DimensionNote>,
    pub improvement_areas: Vec<DimensionNote>,
    pub actionable_next_steps: Vec<String>,
    pub summary: String,
}

/// Per-dimension final averages on the wire (overall is reported separately).
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionAverages {
    pub clarity: f64,
    pub accuracy: f64,
    pub completeness: f64,
    pub confidence: f64,
}

impl From<RunningAverages> for DimensionAverages {
    fn from(averages: RunningAverages) -> Self {
        DimensionAverages {
            clarity: averages.clarity,
            accuracy: averages.accuracy,
            completeness: averages.completeness,
            confidence: averages.confidence,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interviewer {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// One answered question as echoed in the final report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseView {
    pub question_id: &'static str,
    pub category: &'static str,
    pub question: &'static str,
    pub answer: String,
    pub scores: ScoreSet,
    pub explanations: Vec<Explanation>,
    pub suggestions: SuggestionSet,
}

impl From<&Response> for ResponseView {
    fn from(response: &Response) -> Self {
        ResponseView {
            question_id: response.question.id,
            category: response.question.category,
            question: response.question.text,
            answer: response.answer.clone(),
            scores: response.scores,
            explanations: response.explanations.clone(),
            suggestions: response.suggestions.clone(),
        }
    }
}

/// The full end-of-interview report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalReport {
    pub app_name: &'static str,
    pub tagline: &'static str,
    pub report_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub interviewer: Interviewer,
    pub overall_score: f64,
    pub dimension_averages: DimensionAverages,
    pub readiness_indicator: ReadinessIndicator,
    pub interview_insights: InterviewInsights,
    pub responses: Vec<ResponseView>,
}

/// Synthesizes the final report from the session's full response history.
/// Averages are the same exact means the session tracked while running.
pub fn build_final_report(
    session: &SessionState,
    interviewer: Interviewer,
    thresholds: &ReadinessThresholds,
) -> FinalReport {
    let averages = session.running_averages();
    let insights = compute_insights(&session.responses, averages, thresholds);

    FinalReport {
        app_name: APP_NAME,
        tagline: TAGLINE,
        report_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        interviewer,
        overall_score: averages.overall,
        dimension_averages: averages.into(),
        readiness_indicator: classify_readiness(averages.overall, thresholds),
        interview_insights: insights,
        responses: session.responses.iter().map(ResponseView::from).collect(),
    }
}

fn compute_insights(
    responses: &[Response],
    averages: RunningAverages,
    thresholds: &ReadinessThresholds,
) -> InterviewInsights {
    let mut scored: Vec<(Dimension, f64)> = Dimension::ALL
        .iter()
        .map(|&dim| (dim, dimension_average(dim, averages)))
        .collect();

    let mut strengths: Vec<DimensionNote> = scored
        .iter()
        .filter(|(_, score)| *score >= thresholds.strength)
        .map(|&(dim, score)| DimensionNote {
            name: dim.label(),
            score,
            note: strength_note(dim, score, thresholds),
        })
        .collect();
    strengths.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut improvement_areas: Vec<DimensionNote> = scored
        .iter()
        .filter(|(_, score)| *score < thresholds.strength)
        .map(|&(dim, score)| DimensionNote {
            name: dim.label(),
            score,
            note: improvement_note(dim, score, thresholds),
        })
        .collect();
    improvement_areas.sort_by(|a, b| a.score.total_cmp(&b.score));

    let summary = if strengths.is_empty() {
        "No dimension has reached the strong threshold yet; focus on the improvement areas \
         below."
            .to_string()
    } else if improvement_areas.is_empty() {
        "All four dimensions are at strength. Keep practicing to maintain consistency."
            .to_string()
    } else {
        format!(
            "{} of 4 dimensions at strength; targeted practice on the rest will lift the \
             overall score.",
            strengths.len()
        )
    };

    // Weakest first, strongest last: sort ascending once and reuse.
    scored.sort_by(|a, b| a.1.total_cmp(&b.1));
    let weakest = scored.first().map(|&(dim, _)| dim).unwrap_or(Dimension::Clarity);
    let strongest = scored.last().map(|&(dim, _)| dim).unwrap_or(Dimension::Clarity);

    InterviewInsights {
        strengths,
        improvement_areas,
        actionable_next_steps: next_steps(weakest, strongest, responses),
        summary,
    }
}

fn dimension_average(dimension: Dimension, averages: RunningAverages) -> f64 {
    match dimension {
        Dimension::Clarity => averages.clarity,
        Dimension::Accuracy => averages.accuracy,
        Dimension::Completeness => averages.completeness,
        Dimension::Confidence => averages.confidence,
    }
}

/// Strengths at or above `strong_candidate` get the emphatic phrasing;
/// those between `strength` and `strong_candidate` get the measured one.
fn strength_note(
    dimension: Dimension,
    score: f64,
    thresholds: &ReadinessThresholds,
) -> &'static str {
    let high = score >= thresholds.strong_candidate;
    match dimension {
        Dimension::Clarity => {
            if high {
                "Responses are well-structured and easy to follow."
            } else {
                "Answers show reasonable clarity in communication."
            }
        }
        Dimension::Accuracy => {
            if high {
                "Demonstrates strong domain knowledge with relevant terminology."
            } else {
                "Shows adequate understanding of technical concepts."
            }
        }
        Dimension::Completeness => {
            if high {
                "Provides thorough, multi-faceted responses with supporting detail."
            } else {
                "Covers the essential points in each answer."
            }
        }
        Dimension::Confidence => {
            if high {
                "Communicates with conviction and assertive, professional language."
            } else {
                "Maintains a generally confident tone throughout."
            }
        }
    }
}

fn improvement_note(
    dimension: Dimension,
    score: f64,
    thresholds: &ReadinessThresholds,
) -> &'static str {
    let weak = score < thresholds.weak_dimension;
    match dimension {
        Dimension::Clarity => {
            if weak {
                "Needs significantly more structure — practice organizing thoughts before \
                 responding."
            } else {
                "Could benefit from more polished sentence transitions and flow."
            }
        }
        Dimension::Accuracy => {
            if weak {
                "Technical vocabulary is lacking — review core concepts for the target role."
            } else {
                "Incorporating more specific terms and concepts would strengthen responses."
            }
        }
        Dimension::Completeness => {
            if weak {
                "Answers are too brief — practice expanding with examples and multiple \
                 perspectives."
            } else {
                "Adding concrete examples and covering more angles would improve depth."
            }
        }
        Dimension::Confidence => {
            if weak {
                "Excessive use of hedging language — practice direct, assertive phrasing."
            } else {
                "Minor hesitation phrases can be eliminated for a more polished delivery."
            }
        }
    }
}

fn next_steps(weakest: Dimension, strongest: Dimension, responses: &[Response]) -> Vec<String> {
    let mut steps = Vec::with_capacity(3);

    steps.push(
        match weakest {
            Dimension::Clarity => {
                "Practice the STAR method (Situation, Task, Action, Result) to structure \
                 answers more clearly."
            }
            Dimension::Accuracy => {
                "Review key technical concepts for your target role and practice using \
                 specific terminology."
            }
            Dimension::Completeness => {
                "Before answering, mentally outline 2-3 points to cover, then expand each \
                 with detail."
            }
            Dimension::Confidence => {
                "Record yourself answering practice questions and identify filler words to \
                 eliminate."
            }
        }
        .to_string(),
    );

    if !responses.is_empty() {
        let total_words: usize = responses.iter().map(|r| r.signals.word_count).sum();
        let avg_words = (total_words as f64 / responses.len() as f64).round() as usize;
        let has_any_examples = responses.iter().any(|r| r.signals.has_examples);

        if avg_words < 40 {
            steps.push(format!(
                "Your average response length is {avg_words} words. Aim for 50-100 words per \
                 answer for more thorough coverage."
            ));
        } else if !has_any_examples {
            steps.push(
                "None of your answers included specific examples. Practice incorporating \
                 real experiences to make responses more compelling."
                    .to_string(),
            );
        } else {
            steps.push(
                "Continue preparing with mock interviews to build consistency across all \
                 dimensions."
                    .to_string(),
            );
        }
    }

    steps.push(
        match strongest {
            Dimension::Clarity => {
                "Your communication clarity is a strength — leverage it in presentations and \
                 demos."
            }
            Dimension::Accuracy => {
                "Your technical knowledge is solid — consider deepening into specialized \
                 areas."
            }
            Dimension::Completeness => {
                "Your thoroughness stands out — channel this skill into technical \
                 documentation."
            }
            Dimension::Confidence => {
                "Your confident delivery is impressive — consider mentoring peers on \
                 interview prep."
            }
        }
        .to_string(),
    );

    steps
}
