use std::path::{Path, PathBuf};

use time::macros::format_description;
use time::OffsetDateTime;

use crate::progress::dto::ProgressDraft;
use crate::progress::record::ProgressRecord;

use super::api::ProgressApi;
use super::chart::{activity_series, DayActivity};
use super::image;
use super::pdf;
use super::format_date_label;

/// Client-side state holder behind the logging UI.
///
/// Holds the full record list in memory: loaded once at startup, extended
/// locally after each successful create. There is no refresh, retry or
/// in-flight submit guard.
pub struct ProgressViewModel {
    api: ProgressApi,
    pub entries: Vec<ProgressRecord>,
    pub form: ProgressDraft,
    pub selected_date: String,
    pub image_preview: Option<String>,
    pub status: String,
}

impl ProgressViewModel {
    pub fn new(api: ProgressApi) -> Self {
        let today = today_string();
        Self {
            api,
            entries: Vec::new(),
            form: empty_form(today.clone()),
            selected_date: today,
            image_preview: None,
            status: "Loading your logs...".to_string(),
        }
    }

    /// One list request at startup. Failure only flips the status string.
    pub async fn load(&mut self) {
        match self.api.fetch_progress().await {
            Ok(records) => {
                self.status = if records.is_empty() {
                    "No entries yet. Add your first day.".to_string()
                } else {
                    "Ready".to_string()
                };
                self.entries = records;
            }
            Err(_) => {
                self.status =
                    "Could not reach backend. Check DATABASE_URL / server settings.".to_string();
            }
        }
    }

    /// Entries logged on the selected calendar day, in list order.
    pub fn selected_day_entries(&self) -> Vec<&ProgressRecord> {
        self.entries
            .iter()
            .filter(|entry| entry.date == self.selected_date)
            .collect()
    }

    /// Food/exercise bar-chart series over the last 14 logged dates.
    pub fn chart_data(&self) -> Vec<DayActivity> {
        activity_series(&self.entries)
    }

    /// Decode a local image file into the draft and the preview slot.
    pub async fn attach_image(&mut self, path: &Path) -> anyhow::Result<()> {
        let attached = image::read_as_data_url(path).await?;
        self.image_preview = Some(attached.data_url.clone());
        self.form.image_data = Some(attached.data_url);
        self.form.image_name = Some(attached.file_name);
        Ok(())
    }

    /// Send the draft to the create operation. On success the returned record
    /// is prepended, the draft resets keeping its date, and the calendar jumps
    /// to the saved day. On failure the draft is left untouched.
    pub async fn submit(&mut self) {
        match self.api.create_progress(&self.form).await {
            Ok(saved) => {
                self.status = format!("Saved progress for {}.", format_date_label(&saved.date));
                self.selected_date = saved.date.clone();
                self.form = empty_form(self.form.date.clone());
                self.image_preview = None;
                self.entries.insert(0, saved);
            }
            Err(_) => {
                self.status = "Failed to save progress.".to_string();
            }
        }
    }

    /// Write the PDF summary into `out_dir`, named after the latest logged
    /// date. Returns `None` when there is nothing to export.
    pub fn export_pdf(&mut self, out_dir: &Path) -> anyhow::Result<Option<PathBuf>> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| a.date.cmp(&b.date));
        let Some(latest) = sorted.last() else {
            self.status = "Nothing to export yet.".to_string();
            return Ok(None);
        };

        let path = out_dir.join(format!("fitracker-progress-{}.pdf", latest.date));
        pdf::write_pdf(&sorted, &path)?;
        Ok(Some(path))
    }
}

fn empty_form(date: String) -> ProgressDraft {
    ProgressDraft {
        date,
        food: String::new(),
        exercise: String::new(),
        whey_grams: 0.0,
        creatine_grams: 0.0,
        image_data: None,
        image_name: None,
    }
}

fn today_string() -> String {
    let fmt = format_description!("[year]-[month]-[day]");
    OffsetDateTime::now_utc()
        .date()
        .format(&fmt)
        .unwrap_or_default()
}
