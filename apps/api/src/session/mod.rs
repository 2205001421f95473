//! Session tracking: per-session ordered response history, exact running
//! averages, and the injectable session store.
//!
//! The store is an explicit abstraction (`Arc<dyn SessionStore>` in
//! `AppState`), not a process-wide global. Each session entry is wrapped in
//! its own `Mutex` so concurrent evaluate calls for the same sessionId are
//! serialized (the expected-next-question check and the history append are
//! atomic) while unrelated sessions never contend.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::bank::{Question, Role};
use crate::engine::explain::Explanation;
use crate::engine::round1;
use crate::engine::scoring::ScoreSet;
use crate::engine::signals::SignalBundle;
use crate::engine::suggest::SuggestionSet;
use crate::engine::{evaluate_answer, EngineConfig};
use crate::errors::AppError;

/// Exact per-dimension means over all responses so far, plus their overall
/// mean. Reproducible from the stored history alone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunningAverages {
    pub clarity: f64,
    pub accuracy: f64,
    pub completeness: f64,
    pub confidence: f64,
    pub overall: f64,
}

impl RunningAverages {
    pub fn zero() -> Self {
        RunningAverages {
            clarity: 0.0,
            accuracy: 0.0,
            completeness: 0.0,
            confidence: 0.0,
            overall: 0.0,
        }
    }

    /// Arithmetic mean of the given score sets, each dimension rounded to one
    /// decimal, overall the rounded mean of the four.
    pub fn over(scores: &[ScoreSet]) -> Self {
        if scores.is_empty() {
            return Self::zero();
        }
        let n = scores.len() as f64;
        let clarity = round1(scores.iter().map(|s| s.clarity).sum::<f64>() / n);
        let accuracy = round1(scores.iter().map(|s| s.accuracy).sum::<f64>() / n);
        let completeness = round1(scores.iter().map(|s| s.completeness).sum::<f64>() / n);
        let confidence = round1(scores.iter().map(|s| s.confidence).sum::<f64>() / n);
        let overall = round1((clarity + accuracy + completeness + confidence) / 4.0);
        RunningAverages {
            clarity,
            accuracy,
            completeness,
            confidence,
            overall,
        }
    }
}

/// The durable record of one answered question. Appended to the session
/// history, never edited afterwards.
#[derive(Debug, Clone)]
pub struct Response {
    pub id: Uuid,
    pub question: Question,
    pub answer: String,
    pub signals: SignalBundle,
    pub scores: ScoreSet,
    pub explanations: Vec<Explanation>,
    pub suggestions: SuggestionSet,
    /// Running averages as of this response, inclusive.
    pub running_averages: RunningAverages,
    pub answered_at: DateTime<Utc>,
}

/// One candidate's interview attempt. Created on first question fetch,
/// mutated only by `record_response`, discarded by reset.
#[derive(Debug)]
pub struct SessionState {
    pub role: Role,
    pub questions: Vec<Question>,
    pub current_index: usize,
    pub responses: Vec<Response>,
    #[allow(dead_code)]
    pub created_at: DateTime<Utc>,
}

impl SessionState {
    pub fn new(role: Role, questions: Vec<Question>) -> Self {
        SessionState {
            role,
            questions,
            current_index: 0,
            responses: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.current_index >= self.questions.len()
    }

    pub fn expected_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    pub fn running_averages(&self) -> RunningAverages {
        let scores: Vec<ScoreSet> = self.responses.iter().map(|r| r.scores).collect();
        RunningAverages::over(&scores)
    }
}

/// Validates the submission, runs the full scoring pipeline, appends the
/// response, and advances the session.
///
/// Callers must hold the session's lock across this call. On any error the
/// session is left untouched; no partial response is ever persisted.
pub fn record_response(
    state: &mut SessionState,
    question_id: &str,
    answer: &str,
    cfg: &EngineConfig,
) -> Result<Response, AppError> {
    let answer = answer.trim();
    if answer.is_empty() {
        return Err(AppError::EmptyAnswer);
    }
    if state.is_complete() {
        return Err(AppError::AlreadyComplete);
    }
    let expected = state.questions[state.current_index];
    if expected.id != question_id {
        return Err(AppError::OutOfOrderQuestion {
            expected: expected.id.to_string(),
            got: question_id.to_string(),
        });
    }

    let evaluation = evaluate_answer(&expected, answer, cfg);

    let mut scores: Vec<ScoreSet> = state.responses.iter().map(|r| r.scores).collect();
    scores.push(evaluation.scores);
    let running_averages = RunningAverages::over(&scores);

    let response = Response {
        id: Uuid::new_v4(),
        question: expected,
        answer: answer.to_string(),
        signals: evaluation.signals,
        scores: evaluation.scores,
        explanations: evaluation.explanations,
        suggestions: evaluation.suggestions,
        running_averages,
        answered_at: Utc::now(),
    };
    state.responses.push(response.clone());
    state.current_index += 1;
    Ok(response)
}

pub type SharedSession = Arc<Mutex<SessionState>>;

/// Injectable session store. Exactly one `SessionState` per sessionId at any
/// time; implementations must make `insert_if_absent` atomic.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, session_id: &str) -> Option<SharedSession>;

    /// Inserts `state` for `session_id` unless an entry already exists;
    /// returns the entry that ended up in the store either way.
    async fn insert_if_absent(&self, session_id: &str, state: SessionState) -> SharedSession;

    /// Removes the session. Returns whether anything was removed; removing a
    /// non-existent session is a no-op, not an error.
    async fn remove(&self, session_id: &str) -> bool;
}

/// In-memory store: a read/write-locked map of per-session mutexes. The map
/// lock is held only for insert/lookup/delete; evaluation work happens under
/// the individual session's lock.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, SharedSession>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, session_id: &str) -> Option<SharedSession> {
        self.sessions.read().await.get(session_id).cloned()
    }

    async fn insert_if_absent(&self, session_id: &str, state: SessionState) -> SharedSession {
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(state)))
            .clone()
    }

    async fn remove(&self, session_id: &str) -> bool {
        self.sessions.write().await.remove(session_id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::QuestionBank;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fresh_session() -> SessionState {
        let bank = QuestionBank::new();
        let role = bank.resolve_role("backend").unwrap();
        let questions = bank.draw("backend", &mut StdRng::seed_from_u64(11)).unwrap();
        SessionState::new(role, questions)
    }

    fn answer_for(n: usize) -> String {
        format!(
            "I built and tested answer number {n}. I can describe the approach in detail. \
             For example, I profiled the system and definitely improved performance."
        )
    }

    #[test]
    fn test_running_averages_are_exact_means() {
        let cfg = EngineConfig::default();
        let mut state = fresh_session();
        for n in 0..3 {
            let qid = state.expected_question().unwrap().id;
            record_response(&mut state, qid, &answer_for(n), &cfg).unwrap();

            let averages = state.running_averages();
            let count = state.responses.len() as f64;
            let expected_clarity = crate::engine::round1(
                state.responses.iter().map(|r| r.scores.clarity).sum::<f64>() / count,
            );
            assert_eq!(averages.clarity, expected_clarity);
        }
    }

    #[test]
    fn test_response_snapshot_matches_session_averages() {
        let cfg = EngineConfig::default();
        let mut state = fresh_session();
        let qid = state.expected_question().unwrap().id;
        let response = record_response(&mut state, qid, &answer_for(0), &cfg).unwrap();
        assert_eq!(response.running_averages, state.running_averages());
    }

    #[test]
    fn test_out_of_order_question_leaves_state_untouched() {
        let cfg = EngineConfig::default();
        let mut state = fresh_session();
        let qid = state.expected_question().unwrap().id;
        record_response(&mut state, qid, &answer_for(0), &cfg).unwrap();
        let before = state.running_averages();

        let wrong_id = state.questions.last().unwrap().id;
        let err = record_response(&mut state, wrong_id, &answer_for(1), &cfg).unwrap_err();
        assert!(matches!(err, AppError::OutOfOrderQuestion { .. }));
        assert_eq!(state.responses.len(), 1);
        assert_eq!(state.current_index, 1);
        assert_eq!(state.running_averages(), before);
    }

    #[test]
    fn test_empty_answer_records_nothing() {
        let cfg = EngineConfig::default();
        let mut state = fresh_session();
        let qid = state.expected_question().unwrap().id;
        let err = record_response(&mut state, qid, "   \n  ", &cfg).unwrap_err();
        assert!(matches!(err, AppError::EmptyAnswer));
        assert!(state.responses.is_empty());
        assert_eq!(state.current_index, 0);
    }

    #[test]
    fn test_gibberish_still_records_a_response() {
        let cfg = EngineConfig::default();
        let mut state = fresh_session();
        let qid = state.expected_question().unwrap().id;
        let response = record_response(&mut state, qid, "zxcv bnmp qwrt lkjh", &cfg).unwrap();
        assert!(response.signals.is_gibberish);
        assert_eq!(response.scores.clarity, 0.0);
        assert_eq!(state.responses.len(), 1);
    }

    #[test]
    fn test_already_complete_rejects_further_answers() {
        let cfg = EngineConfig::default();
        let mut state = fresh_session();
        for n in 0..state.questions.len() {
            let qid = state.expected_question().unwrap().id;
            record_response(&mut state, qid, &answer_for(n), &cfg).unwrap();
        }
        assert!(state.is_complete());
        let first_id = state.questions[0].id;
        let err = record_response(&mut state, first_id, &answer_for(9), &cfg).unwrap_err();
        assert!(matches!(err, AppError::AlreadyComplete));
    }

    #[tokio::test]
    async fn test_store_keeps_first_insert() {
        let store = InMemorySessionStore::new();
        let first = store.insert_if_absent("s1", fresh_session()).await;
        let second = store.insert_if_absent("s1", fresh_session()).await;
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_store_remove_is_idempotent() {
        let store = InMemorySessionStore::new();
        store.insert_if_absent("s1", fresh_session()).await;
        assert!(store.remove("s1").await);
        assert!(!store.remove("s1").await);
        assert!(store.get("s1").await.is_none());
    }

    #[tokio::test]
    async fn test_concurrent_same_session_submits_record_exactly_one() {
        let cfg = Arc::new(EngineConfig::default());
        let store = Arc::new(InMemorySessionStore::new());
        let session = store.insert_if_absent("s1", fresh_session()).await;
        let qid = session.lock().await.expected_question().unwrap().id;

        // Two duplicate submits for the same expected question: the session
        // mutex serializes them, so exactly one succeeds.
        let mut handles = Vec::new();
        for _ in 0..2 {
            let session = session.clone();
            let cfg = cfg.clone();
            handles.push(tokio::spawn(async move {
                let mut guard = session.lock().await;
                record_response(&mut guard, qid, &answer_for(0), &cfg).is_ok()
            }));
        }
        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap() {
                successes += 1;
            }
        }
        assert_eq!(successes, 1);
        assert_eq!(session.lock().await.responses.len(), 1);
    }
}
