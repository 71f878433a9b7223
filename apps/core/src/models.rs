use serde::{Deserialize, Serialize};

/// Body of `POST /query`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct QueryRequest {
    /// The user's utterance. Empty text is accepted.
    pub query: String,
}

/// Reply of `POST /query`. The answer is never empty.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct QueryResponse {
    pub answer: String,
}

/// Reply of `GET /health`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}
