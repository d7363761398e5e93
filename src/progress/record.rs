use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// One logged day of food, exercise and supplement intake.
///
/// Records are append-only: once inserted they are never updated or deleted,
/// and several records may share the same `date`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub id: Uuid,
    /// Day-granularity date string as supplied by the caller. Not validated
    /// against any calendar range.
    pub date: String,
    pub food: String,
    pub exercise: String,
    pub whey_grams: f64,
    pub creatine_grams: f64,
    /// Opaque data URL. The server stores and returns it untouched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_name: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A record as it exists just before insertion: everything except the
/// store-assigned `id`. `created_at` is stamped by the handler.
#[derive(Debug, Clone)]
pub struct NewProgressRecord {
    pub date: String,
    pub food: String,
    pub exercise: String,
    pub whey_grams: f64,
    pub creatine_grams: f64,
    pub image_data: Option<String>,
    pub image_name: Option<String>,
    pub created_at: OffsetDateTime,
}

impl NewProgressRecord {
    pub fn into_record(self, id: Uuid) -> ProgressRecord {
        ProgressRecord {
            id,
            date: self.date,
            food: self.food,
            exercise: self.exercise,
            whey_grams: self.whey_grams,
            creatine_grams: self.creatine_grams,
            image_data: self.image_data,
            image_name: self.image_name,
            created_at: self.created_at,
        }
    }
}

/// Canonical list order: `date` descending, `created_at` descending within
/// equal dates. The SQL store mirrors this in its `ORDER BY`.
pub fn sort_newest_first(records: &mut [ProgressRecord]) {
    records.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}
