use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::prompts::StructuredRequest;

/// Raw text returned by a model for one structured request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelResponse {
    pub model: String,
    pub text: String,
}

#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Send one schema-constrained request and return the model's JSON text
    async fn generate(&self, request: &StructuredRequest) -> Result<ModelResponse>;
}
