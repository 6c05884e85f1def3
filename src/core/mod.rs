pub mod dispatcher;

pub use crate::domain::model::{Extra, ModelComparisonParams, ModelComparisonResult};
pub use crate::domain::ports::ModelComparisonService;
pub use crate::utils::error::Result;
