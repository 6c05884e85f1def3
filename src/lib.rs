pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::toml_config::ValidationConfig;
pub use core::dispatcher::ComparisonDispatcher;
pub use domain::model::{Extra, ModelComparisonParams, ModelComparisonResult};
pub use domain::ports::ModelComparisonService;
pub use utils::error::{ComparisonError, Result};
pub use utils::validation::{CompiledRules, ReferenceRules, Validate};
