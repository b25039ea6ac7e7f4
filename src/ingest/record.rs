use std::collections::BTreeMap;

use crate::foundation::error::{PictolayError, PictolayResult};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
/// A single field value in a flat survey row.
///
/// Survey exports mix categorical codes (kept as text, e.g. `"4"`) and
/// numeric measures. Predicates compare against the textual code form, so
/// numbers expose a canonical code rendering via [`FieldValue::code`].
pub enum FieldValue {
    /// Numeric measure.
    Number(f64),
    /// Categorical code or free text.
    Text(String),
}

impl FieldValue {
    /// Canonical code form used by predicate comparisons.
    ///
    /// Text values compare as-is; numeric values compare as their shortest
    /// decimal rendering (`1.0` matches the code `"1"`).
    pub fn code(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
        }
    }

    /// True when the value is present but blank (empty or whitespace text).
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Number(_) => false,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
/// An immutable flat row of named fields.
///
/// Records are produced by an external ingestion collaborator (CSV/table
/// parsing is not this crate's concern) and are read-only to the engine.
/// An absent key means the field is missing on that row.
pub struct Record {
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    /// Build a record from `(field, value)` pairs.
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, FieldValue)>,
        K: Into<String>,
    {
        Self {
            fields: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Look up a field by name.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Code form of a field, if present and non-blank.
    pub fn code_of(&self, field: &str) -> Option<String> {
        let value = self.fields.get(field)?;
        if value.is_blank() { None } else { Some(value.code()) }
    }
}

/// Parse an array of flat JSON objects into records.
///
/// Each element must be an object whose values are strings or numbers;
/// `null` values are treated as missing fields. Anything else is an error.
pub fn records_from_json(json: &str) -> PictolayResult<Vec<Record>> {
    let rows: Vec<BTreeMap<String, serde_json::Value>> =
        serde_json::from_str(json).map_err(|e| PictolayError::serde(e.to_string()))?;

    let mut records = Vec::with_capacity(rows.len());
    for (row_idx, row) in rows.into_iter().enumerate() {
        let mut fields = BTreeMap::new();
        for (key, value) in row {
            let parsed = match value {
                serde_json::Value::Null => continue,
                serde_json::Value::String(s) => FieldValue::Text(s),
                serde_json::Value::Number(n) => {
                    let Some(f) = n.as_f64() else {
                        return Err(PictolayError::serde(format!(
                            "row {row_idx}: field '{key}' is not a representable number"
                        )));
                    };
                    FieldValue::Number(f)
                }
                other => {
                    return Err(PictolayError::serde(format!(
                        "row {row_idx}: field '{key}' has unsupported type ({other})"
                    )));
                }
            };
            fields.insert(key, parsed);
        }
        records.push(Record { fields });
    }
    Ok(records)
}

#[cfg(test)]
#[path = "../../tests/unit/ingest/record.rs"]
mod tests;
