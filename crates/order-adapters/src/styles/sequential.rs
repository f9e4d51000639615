use crate::artifacts::OrderRequest;
use crate::pipeline::OrderPipeline;

use super::{settle, PipelineError};

/// Cada step se espera en orden; cualquier fallo sale por `?` una sola vez.
pub async fn process_order(pipeline: &OrderPipeline, request: &OrderRequest) -> Result<String, PipelineError> {
    let outcome = pipeline.run(request).await?;
    settle(outcome)
}
