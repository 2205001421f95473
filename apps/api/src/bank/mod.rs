//! Question bank: fixed roles, question templates, and the per-session draw.
//!
//! The bank is immutable for the process lifetime. A session's question
//! sequence is drawn once at creation: a fixed number of common questions
//! plus a role-specific remainder, without replacement. The draw takes the
//! RNG as a parameter so tests can seed it deterministically.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::collections::HashMap;

use crate::errors::AppError;

/// A selectable interview role. The set is fixed and ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Role {
    pub id: &'static str,
    pub label: &'static str,
}

pub const ROLES: &[Role] = &[
    Role {
        id: "backend",
        label: "Backend Engineer",
    },
    Role {
        id: "frontend",
        label: "Frontend Engineer",
    },
    Role {
        id: "data",
        label: "Data Engineer",
    },
    Role {
        id: "devops",
        label: "DevOps Engineer",
    },
];

/// One question template. Keywords drive the accuracy scorer; they are
/// matched case-insensitively against the answer text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub id: &'static str,
    pub text: &'static str,
    pub category: &'static str,
    pub keywords: &'static [&'static str],
}

const COMMON_QUESTIONS: &[Question] = &[
    Question {
        id: "common-intro",
        text: "Tell us about yourself and your most relevant experience for this role.",
        category: "Introduction",
        keywords: &[
            "experience", "skills", "projects", "team", "work", "developed", "built", "managed",
            "led", "design", "engineering", "technology", "software", "programming", "role",
            "company", "university", "degree",
        ],
    },
    Question {
        id: "common-problem",
        text: "Describe a challenging technical problem you faced and how you solved it.",
        category: "Problem Solving",
        keywords: &[
            "problem", "solution", "debug", "fix", "analyze", "approach", "algorithm", "optimize",
            "issue", "resolved", "implemented", "strategy", "code", "tested", "performance",
            "architecture", "system", "logic",
        ],
    },
    Question {
        id: "common-team",
        text: "How do you approach working in a team? Can you give an example of a team collaboration?",
        category: "Teamwork",
        keywords: &[
            "team", "collaborate", "communication", "agile", "scrum", "feedback", "conflict",
            "resolution", "together", "shared", "responsibility", "deadline", "meeting", "review",
            "code review", "pair", "support",
        ],
    },
    Question {
        id: "common-goals",
        text: "Where do you see yourself in 3 years, and how does this role align with your goals?",
        category: "Career Goals",
        keywords: &[
            "goal", "growth", "learn", "career", "leadership", "impact", "skill", "advance",
            "contribute", "develop", "mentor", "specialize", "expertise", "passion", "opportunity",
            "industry", "vision",
        ],
    },
];

const BACKEND_QUESTIONS: &[Question] = &[
    Question {
        id: "backend-api",
        text: "Walk us through how you would design and test a REST API for a new service.",
        category: "Technical Knowledge",
        keywords: &[
            "api", "rest", "endpoint", "http", "json", "request", "response", "status code",
            "authentication", "versioning", "node", "server", "postman", "tested", "database",
        ],
    },
    Question {
        id: "backend-data",
        text: "What do you understand about data structures and when would you use a hash map vs an array?",
        category: "Technical Knowledge",
        keywords: &[
            "data structure", "hash", "map", "array", "lookup", "time complexity", "O(1)", "O(n)",
            "key", "value", "index", "search", "insert", "collision", "list", "memory",
            "performance", "access",
        ],
    },
    Question {
        id: "backend-db",
        text: "How do you decide between a relational database and a document store for a service?",
        category: "Technical Knowledge",
        keywords: &[
            "database", "sql", "relational", "schema", "transaction", "index", "query", "join",
            "document", "nosql", "consistency", "scaling", "normalization", "migration",
        ],
    },
    Question {
        id: "backend-scale",
        text: "Describe how you would scale a service that is struggling under increased load.",
        category: "Technical Knowledge",
        keywords: &[
            "scale", "load", "cache", "queue", "horizontal", "replica", "latency", "throughput",
            "bottleneck", "load balancer", "shard", "monitoring", "profiling", "async",
        ],
    },
];

const FRONTEND_QUESTIONS: &[Question] = &[
    Question {
        id: "frontend-state",
        text: "How do you manage state in a large single-page application?",
        category: "Technical Knowledge",
        keywords: &[
            "state", "component", "react", "props", "store", "redux", "context", "hook", "render",
            "immutable", "data flow", "update", "subscribe",
        ],
    },
    Question {
        id: "frontend-perf",
        text: "What techniques do you use to keep a web page fast and responsive?",
        category: "Technical Knowledge",
        keywords: &[
            "performance", "bundle", "lazy", "render", "cache", "lighthouse", "image", "defer",
            "minify", "paint", "layout", "memoize", "network", "compression",
        ],
    },
    Question {
        id: "frontend-a11y",
        text: "How do you make sure the interfaces you build are accessible?",
        category: "Technical Knowledge",
        keywords: &[
            "accessibility", "aria", "semantic", "keyboard", "screen reader", "contrast", "focus",
            "label", "wcag", "alt text", "tab", "form",
        ],
    },
    Question {
        id: "frontend-css",
        text: "Describe how you structure CSS for a project that several teams contribute to.",
        category: "Technical Knowledge",
        keywords: &[
            "css", "layout", "flexbox", "grid", "responsive", "variable", "naming", "component",
            "scope", "design system", "token", "media query", "specificity",
        ],
    },
];

const DATA_QUESTIONS: &[Question] = &[
    Question {
        id: "data-pipeline",
        text: "Walk us through a data pipeline you built, from ingestion to serving.",
        category: "Technical Knowledge",
        keywords: &[
            "pipeline", "etl", "ingest", "transform", "schema", "batch", "stream", "warehouse",
            "airflow", "spark", "sql", "partition", "quality", "orchestration",
        ],
    },
    Question {
        id: "data-modeling",
        text: "How do you approach modeling data for analytics versus transactional workloads?",
        category: "Technical Knowledge",
        keywords: &[
            "model", "dimension", "fact", "star schema", "normalization", "denormalized",
            "warehouse", "olap", "oltp", "aggregate", "query", "index", "column",
        ],
    },
    Question {
        id: "data-quality",
        text: "What do you do to detect and handle bad or missing data in production?",
        category: "Technical Knowledge",
        keywords: &[
            "quality", "validation", "null", "missing", "anomaly", "test", "monitor", "alert",
            "contract", "schema", "duplicate", "outlier", "backfill",
        ],
    },
    Question {
        id: "data-scale",
        text: "Describe a time you had to make a slow analytical query or job dramatically faster.",
        category: "Technical Knowledge",
        keywords: &[
            "optimize", "partition", "index", "query plan", "join", "shuffle", "cache", "cluster",
            "parallel", "cost", "scan", "predicate", "materialized",
        ],
    },
];

const DEVOPS_QUESTIONS: &[Question] = &[
    Question {
        id: "devops-ci",
        text: "Describe the CI/CD setup you would put in place for a team shipping daily.",
        category: "Technical Knowledge",
        keywords: &[
            "ci", "cd", "pipeline", "build", "deploy", "test", "artifact", "rollback", "release",
            "docker", "environment", "automation", "branch", "merge",
        ],
    },
    Question {
        id: "devops-incident",
        text: "Walk us through how you handled a production incident end to end.",
        category: "Technical Knowledge",
        keywords: &[
            "incident", "alert", "monitor", "logs", "metrics", "rollback", "postmortem",
            "on-call", "root cause", "mitigate", "dashboard", "runbook", "escalate",
        ],
    },
    Question {
        id: "devops-infra",
        text: "How do you manage infrastructure so that environments stay reproducible?",
        category: "Technical Knowledge",
        keywords: &[
            "terraform", "infrastructure", "code", "kubernetes", "container", "image", "config",
            "secret", "drift", "module", "provision", "immutable", "version",
        ],
    },
    Question {
        id: "devops-observe",
        text: "What does good observability look like for a distributed system you operate?",
        category: "Technical Knowledge",
        keywords: &[
            "observability", "metrics", "logs", "traces", "slo", "sli", "alert", "dashboard",
            "latency", "error rate", "saturation", "sampling", "correlation",
        ],
    },
];

/// Immutable mapping from role id to its question pool, shared read-only for
/// the process lifetime.
#[derive(Debug)]
pub struct QuestionBank {
    common: &'static [Question],
    by_role: HashMap<&'static str, &'static [Question]>,
    /// Common questions drawn per session.
    pub common_count: usize,
    /// Role-specific questions drawn per session.
    pub role_count: usize,
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionBank {
    pub fn new() -> Self {
        let mut by_role: HashMap<&'static str, &'static [Question]> = HashMap::new();
        by_role.insert("backend", BACKEND_QUESTIONS);
        by_role.insert("frontend", FRONTEND_QUESTIONS);
        by_role.insert("data", DATA_QUESTIONS);
        by_role.insert("devops", DEVOPS_QUESTIONS);
        QuestionBank {
            common: COMMON_QUESTIONS,
            by_role,
            common_count: 2,
            role_count: 3,
        }
    }

    /// Resolves a caller-supplied role id to the canonical `Role`.
    pub fn resolve_role(&self, role_id: &str) -> Result<Role, AppError> {
        ROLES
            .iter()
            .copied()
            .find(|r| r.id == role_id)
            .ok_or_else(|| AppError::InvalidRole(role_id.to_string()))
    }

    /// Role-specific question pool, for inspection and tests.
    #[allow(dead_code)]
    pub fn role_pool(&self, role_id: &str) -> Option<&'static [Question]> {
        self.by_role.get(role_id).copied()
    }

    /// Draws a session's question sequence without replacement:
    /// `common_count` common questions followed by `role_count` role-specific
    /// ones. Same RNG state produces the same draw.
    pub fn draw<R: Rng + ?Sized>(
        &self,
        role_id: &str,
        rng: &mut R,
    ) -> Result<Vec<Question>, AppError> {
        let role = self.resolve_role(role_id)?;
        let pool = self
            .by_role
            .get(role.id)
            .ok_or_else(|| AppError::InvalidRole(role_id.to_string()))?;

        let mut questions: Vec<Question> = self
            .common
            .choose_multiple(rng, self.common_count)
            .copied()
            .collect();
        questions.extend(pool.choose_multiple(rng, self.role_count).copied());
        Ok(questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_roles_are_fixed_and_ordered() {
        let ids: Vec<&str> = ROLES.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["backend", "frontend", "data", "devops"]);
    }

    #[test]
    fn test_resolve_unknown_role_fails() {
        let bank = QuestionBank::new();
        let err = bank.resolve_role("astronaut").unwrap_err();
        assert!(matches!(err, AppError::InvalidRole(_)));
    }

    #[test]
    fn test_draw_returns_common_then_role_specific() {
        let bank = QuestionBank::new();
        let mut rng = StdRng::seed_from_u64(7);
        let draw = bank.draw("backend", &mut rng).unwrap();
        assert_eq!(draw.len(), bank.common_count + bank.role_count);
        for q in &draw[..bank.common_count] {
            assert!(q.id.starts_with("common-"), "got {}", q.id);
        }
        for q in &draw[bank.common_count..] {
            assert!(q.id.starts_with("backend-"), "got {}", q.id);
        }
    }

    #[test]
    fn test_draw_is_without_replacement() {
        let bank = QuestionBank::new();
        let mut rng = StdRng::seed_from_u64(42);
        let draw = bank.draw("devops", &mut rng).unwrap();
        let mut ids: Vec<&str> = draw.iter().map(|q| q.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), draw.len(), "duplicate question in draw");
    }

    #[test]
    fn test_same_seed_same_draw() {
        let bank = QuestionBank::new();
        let a = bank
            .draw("data", &mut StdRng::seed_from_u64(99))
            .unwrap();
        let b = bank
            .draw("data", &mut StdRng::seed_from_u64(99))
            .unwrap();
        let a_ids: Vec<&str> = a.iter().map(|q| q.id).collect();
        let b_ids: Vec<&str> = b.iter().map(|q| q.id).collect();
        assert_eq!(a_ids, b_ids);
    }

    #[test]
    fn test_draw_unknown_role_fails() {
        let bank = QuestionBank::new();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            bank.draw("astronaut", &mut rng),
            Err(AppError::InvalidRole(_))
        ));
    }

    #[test]
    fn test_backend_pool_covers_api_terms() {
        // The accuracy scorer depends on role pools carrying real terminology.
        let bank = QuestionBank::new();
        let pool = bank.role_pool("backend").unwrap();
        let api_q = pool.iter().find(|q| q.id == "backend-api").unwrap();
        assert!(api_q.keywords.contains(&"api"));
        assert!(api_q.keywords.contains(&"node"));
    }

    #[test]
    fn test_every_role_pool_is_large_enough() {
        let bank = QuestionBank::new();
        for role in ROLES {
            let pool = bank.role_pool(role.id).unwrap();
            assert!(pool.len() >= bank.role_count, "pool too small for {}", role.id);
        }
    }
}
