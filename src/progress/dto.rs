use serde::{Deserialize, Deserializer, Serialize};

/// Candidate record sent to the create operation: a [`ProgressRecord`] minus
/// the store-assigned `id` and `createdAt`. Doubles as the client-side draft
/// form, so it serializes with the same wire names it is parsed from.
///
/// [`ProgressRecord`]: super::record::ProgressRecord
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressDraft {
    pub date: String,
    #[serde(default)]
    pub food: String,
    #[serde(default)]
    pub exercise: String,
    #[serde(default, deserialize_with = "grams_or_zero")]
    pub whey_grams: f64,
    #[serde(default, deserialize_with = "grams_or_zero")]
    pub creatine_grams: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_name: Option<String>,
}

/// Envelope for every successful response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct DataBody<T> {
    pub data: T,
}

/// Gram quantities are coerced, not rejected: a JSON number is taken as-is, a
/// numeric string is parsed, and anything else (null, non-numeric string,
/// absent field) falls back to zero.
fn grams_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}
