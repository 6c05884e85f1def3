use crate::domain::model::{ModelComparisonParams, ModelComparisonResult};
use crate::utils::error::Result;
use async_trait::async_trait;

/// The remote model-comparison service. It owns the comparison itself and
/// the storage of its output; callers only see the returned reference.
#[async_trait]
pub trait ModelComparisonService: Send + Sync {
    async fn compare(&self, params: &ModelComparisonParams) -> Result<ModelComparisonResult>;
}
