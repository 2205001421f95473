//! Axum route handlers for the Interview API.
//!
//! Wire JSON uses camelCase field names. Handlers validate input, take the
//! per-session lock where state is touched, and delegate all scoring to the
//! pure engine pipeline.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::bank::{Question, ROLES};
use crate::engine::explain::Explanation;
use crate::engine::scoring::ScoreSet;
use crate::engine::signals::SignalBundle;
use crate::engine::suggest::SuggestionSet;
use crate::errors::AppError;
use crate::report::{build_final_report, classify_readiness, FinalReport, Interviewer, ReadinessIndicator};
use crate::session::{record_response, RunningAverages, SessionState};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct RoleView {
    pub id: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RolesResponse {
    pub roles: Vec<RoleView>,
    pub total: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionsRequest {
    pub role: String,
    pub session_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    pub id: &'static str,
    pub text: &'static str,
    pub category: &'static str,
}

impl From<&Question> for QuestionView {
    fn from(q: &Question) -> Self {
        QuestionView {
            id: q.id,
            text: q.text,
            category: q.category,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionsResponse {
    pub session_id: String,
    pub role: &'static str,
    pub questions: Vec<QuestionView>,
    pub total: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateRequest {
    pub session_id: String,
    pub question_id: String,
    pub answer: String,
}

/// The subset of extracted signals echoed to the caller.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalSummary {
    pub word_count: usize,
    pub sentence_count: usize,
    pub matched_keywords: Vec<String>,
    pub filler_words_found: Vec<String>,
    pub has_examples: bool,
    pub is_gibberish: bool,
    pub real_word_ratio: f64,
}

impl From<&SignalBundle> for SignalSummary {
    fn from(signals: &SignalBundle) -> Self {
        SignalSummary {
            word_count: signals.word_count,
            sentence_count: signals.sentence_count,
            matched_keywords: signals.matched_keywords.clone(),
            filler_words_found: signals.filler_words_found.clone(),
            has_examples: signals.has_examples,
            is_gibberish: signals.is_gibberish,
            real_word_ratio: signals.real_word_ratio,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateResponse {
    pub question_id: String,
    pub scores: ScoreSet,
    pub explanations: Vec<Explanation>,
    pub suggestions: SuggestionSet,
    pub signals: SignalSummary,
    pub running_averages: RunningAverages,
    pub readiness: ReadinessIndicator,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalReportRequest {
    pub session_id: String,
    #[serde(default)]
    pub interviewer: Option<Interviewer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetRequest {
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub message: &'static str,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/roles
///
/// The fixed, ordered role set.
pub async fn handle_list_roles(State(_state): State<AppState>) -> Json<RolesResponse> {
    let roles: Vec<RoleView> = ROLES
        .iter()
        .map(|r| RoleView {
            id: r.id,
            label: r.label,
        })
        .collect();
    let total = roles.len();
    Json(RolesResponse { roles, total })
}

/// POST /api/v1/questions
///
/// On the first call for a sessionId, creates the session (random question
/// draw) and returns its ordered question list. Repeat calls return the
/// existing draw unchanged; the supplied role must resolve either way.
pub async fn handle_fetch_questions(
    State(state): State<AppState>,
    Json(request): Json<QuestionsRequest>,
) -> Result<Json<QuestionsResponse>, AppError> {
    let role = state.bank.resolve_role(&request.role)?;

    if let Some(existing) = state.sessions.get(&request.session_id).await {
        let session = existing.lock().await;
        return Ok(Json(questions_response(&request.session_id, &session)));
    }

    let questions = {
        let mut rng = state
            .draw_rng
            .lock()
            .map_err(|_| anyhow::anyhow!("question draw rng lock poisoned"))?;
        state.bank.draw(role.id, &mut *rng)?
    };

    let shared = state
        .sessions
        .insert_if_absent(&request.session_id, SessionState::new(role, questions))
        .await;
    let session = shared.lock().await;
    tracing::info!(
        session_id = %request.session_id,
        role = role.id,
        questions = session.questions.len(),
        "session created"
    );
    Ok(Json(questions_response(&request.session_id, &session)))
}

fn questions_response(session_id: &str, session: &SessionState) -> QuestionsResponse {
    let questions: Vec<QuestionView> = session.questions.iter().map(QuestionView::from).collect();
    let total = questions.len();
    QuestionsResponse {
        session_id: session_id.to_string(),
        role: session.role.id,
        questions,
        total,
    }
}

/// POST /api/v1/evaluate
///
/// Scores one answer against the session's expected next question. The
/// session lock is held from the expected-question check through the
/// history append, so duplicate submits are serialized.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<EvaluateResponse>, AppError> {
    let shared = state
        .sessions
        .get(&request.session_id)
        .await
        .ok_or_else(|| {
            AppError::UnknownSession(format!(
                "No active session with id '{}'",
                request.session_id
            ))
        })?;

    let mut session = shared.lock().await;
    let response = record_response(
        &mut session,
        &request.question_id,
        &request.answer,
        &state.engine,
    )?;

    let readiness = classify_readiness(
        response.running_averages.overall,
        &state.engine.thresholds,
    );

    Ok(Json(EvaluateResponse {
        question_id: request.question_id,
        signals: SignalSummary::from(&response.signals),
        scores: response.scores,
        explanations: response.explanations,
        suggestions: response.suggestions,
        running_averages: response.running_averages,
        readiness,
    }))
}

/// POST /api/v1/final-report
///
/// Synthesizes the end-of-interview report from the full response history.
pub async fn handle_final_report(
    State(state): State<AppState>,
    Json(request): Json<FinalReportRequest>,
) -> Result<Json<FinalReport>, AppError> {
    let shared = state
        .sessions
        .get(&request.session_id)
        .await
        .ok_or_else(|| {
            AppError::UnknownSession(format!(
                "No active session with id '{}'",
                request.session_id
            ))
        })?;

    let session = shared.lock().await;
    if session.responses.is_empty() {
        return Err(AppError::UnknownSession(format!(
            "No interview data recorded for session '{}'",
            request.session_id
        )));
    }

    let interviewer = request.interviewer.unwrap_or(Interviewer {
        name: String::new(),
        email: String::new(),
    });
    Ok(Json(build_final_report(
        &session,
        interviewer,
        &state.engine.thresholds,
    )))
}

/// POST /api/v1/reset
///
/// Discards the session entirely. Idempotent: resetting a non-existent or
/// already-reset session succeeds with the same message.
pub async fn handle_reset(
    State(state): State<AppState>,
    Json(request): Json<ResetRequest>,
) -> Json<ResetResponse> {
    let removed = state.sessions.remove(&request.session_id).await;
    if removed {
        tracing::info!(session_id = %request.session_id, "session reset");
    }
    Json(ResetResponse {
        message: "Session reset successfully",
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
