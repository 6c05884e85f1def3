use crate::utils::error::{ComparisonError, Result};
use crate::utils::validation::{ReferenceRules, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings file for the validation layer.
///
/// ```toml
/// [validation]
/// require_models = true
/// reference_pattern = "^\\d+/\\d+(/\\d+)?$"
/// max_models = 20
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(default)]
    pub validation: ReferenceRules,
}

impl ValidationConfig {
    /// 從檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ComparisonError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ComparisonError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${REF_PATTERN})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ComparisonError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn rules(&self) -> &ReferenceRules {
        &self.validation
    }

    pub fn into_rules(self) -> ReferenceRules {
        self.validation
    }
}

impl Validate for ValidationConfig {
    fn validate(&self) -> Result<()> {
        self.validation.validate()
    }
}
