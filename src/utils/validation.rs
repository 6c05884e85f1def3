use crate::domain::model::{ModelComparisonParams, ModelComparisonResult};
use crate::utils::error::{ComparisonError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(ComparisonError::InvalidFieldValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| ComparisonError::MissingFieldError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ComparisonError::InvalidFieldValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_pattern(field_name: &str, value: &str, pattern: &Regex) -> Result<()> {
    if !pattern.is_match(value) {
        return Err(ComparisonError::InvalidFieldValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value does not match reference pattern {}", pattern.as_str()),
        });
    }
    Ok(())
}

/// Opt-in checks applied before a record crosses the service boundary.
/// Decoding never runs these; references stay opaque unless
/// `reference_pattern` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceRules {
    pub require_models: bool,
    pub require_non_empty_refs: bool,
    pub reference_pattern: Option<String>,
    pub max_models: Option<usize>,
}

impl Default for ReferenceRules {
    fn default() -> Self {
        Self {
            require_models: true,
            require_non_empty_refs: true,
            reference_pattern: None,
            max_models: None,
        }
    }
}

impl ReferenceRules {
    /// Rules that accept anything decoding accepts.
    pub fn permissive() -> Self {
        Self {
            require_models: false,
            require_non_empty_refs: false,
            reference_pattern: None,
            max_models: None,
        }
    }

    fn compiled_pattern(&self) -> Result<Option<Regex>> {
        self.reference_pattern
            .as_deref()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| ComparisonError::ConfigValidationError {
                    field: "validation.reference_pattern".to_string(),
                    message: format!("Invalid regular expression: {}", e),
                })
            })
            .transpose()
    }

    /// Compiles `reference_pattern` once so the result can be reused for
    /// every request.
    pub fn compile(&self) -> Result<CompiledRules> {
        Ok(CompiledRules {
            pattern: self.compiled_pattern()?,
            rules: self.clone(),
        })
    }

    pub fn check_params(&self, params: &ModelComparisonParams) -> Result<()> {
        self.compile()?.check_params(params)
    }

    pub fn check_result(&self, result: &ModelComparisonResult) -> Result<()> {
        self.compile()?.check_result(result)
    }
}

/// [`ReferenceRules`] with the reference pattern already compiled.
#[derive(Debug, Clone, Default)]
pub struct CompiledRules {
    rules: ReferenceRules,
    pattern: Option<Regex>,
}

impl CompiledRules {
    pub fn rules(&self) -> &ReferenceRules {
        &self.rules
    }

    fn check_reference(&self, field_name: &str, value: &str) -> Result<()> {
        if self.rules.require_non_empty_refs {
            validate_non_empty_string(field_name, value)?;
        }
        if let Some(pattern) = &self.pattern {
            validate_pattern(field_name, value, pattern)?;
        }
        Ok(())
    }

    pub fn check_params(&self, params: &ModelComparisonParams) -> Result<()> {
        match params.models() {
            Some(models) => {
                if self.rules.require_models {
                    validate_positive_number("models", models.len(), 1)?;
                }
                if let Some(max) = self.rules.max_models {
                    if models.len() > max {
                        return Err(ComparisonError::InvalidFieldValueError {
                            field: "models".to_string(),
                            value: models.len().to_string(),
                            reason: format!("At most {} models can be compared at once", max),
                        });
                    }
                }
                for (index, model) in models.iter().enumerate() {
                    self.check_reference(&format!("models[{}]", index), model)?;
                }
            }
            None if self.rules.require_models => {
                return Err(ComparisonError::MissingFieldError {
                    field: "models".to_string(),
                });
            }
            None => {}
        }

        if let Some(protcomp_ref) = params.protcomp_ref() {
            self.check_reference("protcomp_ref", protcomp_ref)?;
        }
        if let Some(pangenome_ref) = params.pangenome_ref() {
            self.check_reference("pangenome_ref", pangenome_ref)?;
        }

        Ok(())
    }

    /// A successful result must carry `mc_ref`.
    pub fn check_result(&self, result: &ModelComparisonResult) -> Result<()> {
        let mc_ref = result.mc_ref();
        let mc_ref = validate_required_field("mc_ref", &mc_ref)?;
        self.check_reference("mc_ref", mc_ref)
    }
}

impl Validate for ReferenceRules {
    fn validate(&self) -> Result<()> {
        self.compiled_pattern()?;
        if let Some(max) = self.max_models {
            validate_positive_number("validation.max_models", max, 1)?;
        }
        Ok(())
    }
}

impl Validate for ModelComparisonParams {
    fn validate(&self) -> Result<()> {
        ReferenceRules::default().check_params(self)
    }
}

impl Validate for ModelComparisonResult {
    fn validate(&self) -> Result<()> {
        ReferenceRules::default().check_result(self)
    }
}
