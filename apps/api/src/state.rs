use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::bank::QuestionBank;
use crate::engine::EngineConfig;
use crate::session::{InMemorySessionStore, SessionStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Immutable question bank, shared read-only for the process lifetime.
    pub bank: Arc<QuestionBank>,
    /// Injectable session store. Default: in-memory with per-session locking.
    pub sessions: Arc<dyn SessionStore>,
    /// Scoring weights, suggestion bands, and readiness thresholds.
    pub engine: Arc<EngineConfig>,
    /// Seedable source for the session question draw. Seeded from
    /// `QUESTION_SEED` when set (reproducible runs), entropy otherwise.
    pub draw_rng: Arc<Mutex<StdRng>>,
}

impl AppState {
    pub fn new(question_seed: Option<u64>) -> Self {
        let draw_rng = match question_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        AppState {
            bank: Arc::new(QuestionBank::new()),
            sessions: Arc::new(InMemorySessionStore::new()),
            engine: Arc::new(EngineConfig::default()),
            draw_rng: Arc::new(Mutex::new(draw_rng)),
        }
    }
}
