use crate::config::toml_config::ValidationConfig;
use crate::domain::model::{ModelComparisonParams, ModelComparisonResult};
use crate::utils::error::Result;
use crate::utils::validation::{ReferenceRules, Validate};
use clap::ValueEnum;
use std::io::Read;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RecordKind {
    Params,
    Result,
}

/// Reads the whole input; `-` means stdin.
pub fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        return Ok(buffer);
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Rules to apply, or `None` when validation is switched off. The config file
/// is not touched in that case.
pub fn load_rules(config_path: Option<&str>, no_validate: bool) -> Result<Option<ReferenceRules>> {
    if no_validate {
        tracing::debug!("Reference validation disabled");
        return Ok(None);
    }

    match config_path {
        Some(path) => {
            tracing::info!("📁 Loading validation rules from: {}", path);
            let config = ValidationConfig::from_file(path)?;
            config.validate()?;
            Ok(Some(config.into_rules()))
        }
        None => Ok(Some(ReferenceRules::default())),
    }
}

/// Decodes `input` as `kind`, checks it against `rules` when given and
/// returns the canonical encoding.
pub fn normalize(
    input: &str,
    kind: RecordKind,
    rules: Option<&ReferenceRules>,
    pretty: bool,
) -> Result<String> {
    match kind {
        RecordKind::Params => {
            let params = ModelComparisonParams::from_json_str(input)?;
            tracing::debug!("Decoded {}", params);
            if let Some(rules) = rules {
                rules.check_params(&params)?;
            }
            if pretty {
                params.to_json_string_pretty()
            } else {
                params.to_json_string()
            }
        }
        RecordKind::Result => {
            let result = ModelComparisonResult::from_json_str(input)?;
            tracing::debug!("Decoded {}", result);
            if let Some(rules) = rules {
                rules.check_result(&result)?;
            }
            if pretty {
                result.to_json_string_pretty()
            } else {
                result.to_json_string()
            }
        }
    }
}
