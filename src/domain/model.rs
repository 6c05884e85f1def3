use crate::utils::error::{ComparisonError, Result};
use serde::de::DeserializeOwned;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Keys the schema does not name, kept so they survive a decode/encode cycle.
pub type Extra = Map<String, Value>;

/// Parameters of a model-comparison request.
///
/// `models` is required by the service schema but the type does not enforce
/// it; see [`crate::utils::validation::ReferenceRules`] for the opt-in checks.
///
/// Serde decoding goes through [`ModelComparisonParams::from_json_value`], so
/// errors name the offending key whichever entry point is used.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "Value")]
pub struct ModelComparisonParams {
    models: Option<Vec<String>>,
    protcomp_ref: Option<String>,
    pangenome_ref: Option<String>,
    extra: Extra,
}

impl ModelComparisonParams {
    /// Named keys in canonical order.
    pub const FIELDS: &'static [&'static str] = &["models", "protcomp_ref", "pangenome_ref"];

    pub fn new() -> Self {
        Self::default()
    }

    pub fn models(&self) -> Option<&[String]> {
        self.models.as_deref()
    }

    pub fn set_models(&mut self, models: Option<Vec<String>>) {
        self.models = models;
    }

    pub fn with_models<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.models = Some(models.into_iter().map(Into::into).collect());
        self
    }

    pub fn protcomp_ref(&self) -> Option<&str> {
        self.protcomp_ref.as_deref()
    }

    pub fn set_protcomp_ref(&mut self, protcomp_ref: Option<String>) {
        self.protcomp_ref = protcomp_ref;
    }

    pub fn with_protcomp_ref(mut self, protcomp_ref: impl Into<String>) -> Self {
        self.protcomp_ref = Some(protcomp_ref.into());
        self
    }

    pub fn pangenome_ref(&self) -> Option<&str> {
        self.pangenome_ref.as_deref()
    }

    pub fn set_pangenome_ref(&mut self, pangenome_ref: Option<String>) {
        self.pangenome_ref = pangenome_ref;
    }

    pub fn with_pangenome_ref(mut self, pangenome_ref: impl Into<String>) -> Self {
        self.pangenome_ref = Some(pangenome_ref.into());
        self
    }

    pub fn extra(&self) -> &Extra {
        &self.extra
    }

    /// Live handle on the open mapping. Entries named like a schema field
    /// are never encoded.
    pub fn extra_mut(&mut self) -> &mut Extra {
        &mut self.extra
    }

    pub fn set_extra(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        insert_extra(&mut self.extra, Self::FIELDS, key.into(), value.into());
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_extra(key, value);
        self
    }

    pub fn from_json_str(input: &str) -> Result<Self> {
        decode_str(input, Self::from_json_value)
    }

    pub fn from_json_value(value: Value) -> Result<Self> {
        let mut object = checked_object(
            value,
            &[
                ("models", is_string_list as ShapeCheck, "an array of strings"),
                ("protcomp_ref", is_optional_string as ShapeCheck, "a string"),
                ("pangenome_ref", is_optional_string as ShapeCheck, "a string"),
            ],
        )?;
        Ok(Self {
            models: take_field(&mut object, "models")?,
            protcomp_ref: take_field(&mut object, "protcomp_ref")?,
            pangenome_ref: take_field(&mut object, "pangenome_ref")?,
            extra: object,
        })
    }

    pub fn to_json_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_string_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Serialize for ModelComparisonParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(models) = &self.models {
            map.serialize_entry("models", models)?;
        }
        if let Some(protcomp_ref) = &self.protcomp_ref {
            map.serialize_entry("protcomp_ref", protcomp_ref)?;
        }
        if let Some(pangenome_ref) = &self.pangenome_ref {
            map.serialize_entry("pangenome_ref", pangenome_ref)?;
        }
        serialize_extra(&mut map, &self.extra, Self::FIELDS)?;
        map.end()
    }
}

impl TryFrom<Value> for ModelComparisonParams {
    type Error = ComparisonError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_json_value(value)
    }
}

// Named keys left in the live map are invisible on the wire, so they do not
// take part in equality either.
impl PartialEq for ModelComparisonParams {
    fn eq(&self, other: &Self) -> bool {
        self.models == other.models
            && self.protcomp_ref == other.protcomp_ref
            && self.pangenome_ref == other.pangenome_ref
            && same_extra(&self.extra, &other.extra, Self::FIELDS)
    }
}

impl fmt::Display for ModelComparisonParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ModelComparisonParams [models={:?}, protcomp_ref={:?}, pangenome_ref={:?}, extra={}]",
            self.models,
            self.protcomp_ref,
            self.pangenome_ref,
            extra_text(&self.extra, Self::FIELDS)?
        )
    }
}

/// Output of a model-comparison run: the reference of the stored comparison.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "Value")]
pub struct ModelComparisonResult {
    mc_ref: Option<String>,
    extra: Extra,
}

impl ModelComparisonResult {
    pub const FIELDS: &'static [&'static str] = &["mc_ref"];

    pub fn new() -> Self {
        Self::default()
    }

    pub fn mc_ref(&self) -> Option<&str> {
        self.mc_ref.as_deref()
    }

    pub fn set_mc_ref(&mut self, mc_ref: Option<String>) {
        self.mc_ref = mc_ref;
    }

    pub fn with_mc_ref(mut self, mc_ref: impl Into<String>) -> Self {
        self.mc_ref = Some(mc_ref.into());
        self
    }

    pub fn extra(&self) -> &Extra {
        &self.extra
    }

    pub fn extra_mut(&mut self) -> &mut Extra {
        &mut self.extra
    }

    pub fn set_extra(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        insert_extra(&mut self.extra, Self::FIELDS, key.into(), value.into());
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_extra(key, value);
        self
    }

    pub fn from_json_str(input: &str) -> Result<Self> {
        decode_str(input, Self::from_json_value)
    }

    pub fn from_json_value(value: Value) -> Result<Self> {
        let mut object = checked_object(value, &[("mc_ref", is_optional_string as ShapeCheck, "a string")])?;
        Ok(Self {
            mc_ref: take_field(&mut object, "mc_ref")?,
            extra: object,
        })
    }

    pub fn to_json_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_string_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Serialize for ModelComparisonResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(mc_ref) = &self.mc_ref {
            map.serialize_entry("mc_ref", mc_ref)?;
        }
        serialize_extra(&mut map, &self.extra, Self::FIELDS)?;
        map.end()
    }
}

impl TryFrom<Value> for ModelComparisonResult {
    type Error = ComparisonError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_json_value(value)
    }
}

impl PartialEq for ModelComparisonResult {
    fn eq(&self, other: &Self) -> bool {
        self.mc_ref == other.mc_ref && same_extra(&self.extra, &other.extra, Self::FIELDS)
    }
}

impl fmt::Display for ModelComparisonResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ModelComparisonResult [mc_ref={:?}, extra={}]",
            self.mc_ref,
            extra_text(&self.extra, Self::FIELDS)?
        )
    }
}

type ShapeCheck = fn(&Value) -> bool;

fn is_optional_string(value: &Value) -> bool {
    matches!(value, Value::Null | Value::String(_))
}

fn is_string_list(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.iter().all(Value::is_string),
        _ => false,
    }
}

fn insert_extra(extra: &mut Extra, named: &[&str], key: String, value: Value) {
    if named.contains(&key.as_str()) {
        tracing::debug!("Ignoring open-mapping entry '{}': it names a schema field", key);
        return;
    }
    extra.insert(key, value);
}

fn visible_extra<'a>(
    extra: &'a Extra,
    named: &'a [&'a str],
) -> impl Iterator<Item = (&'a String, &'a Value)> {
    extra
        .iter()
        .filter(move |(key, _)| !named.contains(&key.as_str()))
}

fn same_extra(left: &Extra, right: &Extra, named: &[&str]) -> bool {
    visible_extra(left, named).count() == visible_extra(right, named).count()
        && visible_extra(left, named).all(|(key, value)| right.get(key) == Some(value))
}

fn serialize_extra<M: SerializeMap>(
    map: &mut M,
    extra: &Extra,
    named: &[&str],
) -> std::result::Result<(), M::Error> {
    for (key, value) in visible_extra(extra, named) {
        map.serialize_entry(key, value)?;
    }
    Ok(())
}

fn extra_text(extra: &Extra, named: &[&str]) -> std::result::Result<String, fmt::Error> {
    let visible: Extra = visible_extra(extra, named)
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    serde_json::to_string(&visible).map_err(|_| fmt::Error)
}

fn decode_str<T>(input: &str, from_value: fn(Value) -> Result<T>) -> Result<T> {
    let value: Value = serde_json::from_str(input).map_err(|e| ComparisonError::decode(e.to_string()))?;
    from_value(value)
}

/// Checks the shape of every recognized key so a failure can name the
/// offending key and value.
fn checked_object(value: Value, fields: &[(&str, ShapeCheck, &str)]) -> Result<Extra> {
    let object = match value {
        Value::Object(object) => object,
        other => {
            return Err(ComparisonError::DecodeError {
                field: None,
                value: Some(other.to_string()),
                message: "expected a JSON object".to_string(),
            })
        }
    };

    for (name, check, expected) in fields {
        if let Some(found) = object.get(*name) {
            if !check(found) {
                return Err(ComparisonError::DecodeError {
                    field: Some(name.to_string()),
                    value: Some(found.to_string()),
                    message: format!("expected {}", expected),
                });
            }
        }
    }

    Ok(object)
}

/// Moves a named key out of the object; `null` counts as absent.
fn take_field<T: DeserializeOwned>(object: &mut Extra, name: &str) -> Result<Option<T>> {
    match object.remove(name) {
        None | Some(Value::Null) => Ok(None),
        Some(found) => {
            let text = found.to_string();
            serde_json::from_value(found)
                .map(Some)
                .map_err(|e| ComparisonError::DecodeError {
                    field: Some(name.to_string()),
                    value: Some(text),
                    message: e.to_string(),
                })
        }
    }
}
