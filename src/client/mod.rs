pub mod api;
pub mod chart;
pub mod image;
pub mod pdf;
pub mod viewmodel;

pub use api::ProgressApi;
pub use viewmodel::ProgressViewModel;

use time::macros::format_description;

/// `M/D/YYYY` label used by the chart axis, the PDF export and status lines.
/// Falls back to the raw string when the date does not parse.
pub fn format_date_label(date: &str) -> String {
    let fmt = format_description!("[year]-[month]-[day]");
    match time::Date::parse(date, &fmt) {
        Ok(parsed) => format!(
            "{}/{}/{}",
            u8::from(parsed.month()),
            parsed.day(),
            parsed.year()
        ),
        Err(_) => date.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_render_without_zero_padding() {
        assert_eq!(format_date_label("2024-01-05"), "1/5/2024");
        assert_eq!(format_date_label("2024-12-31"), "12/31/2024");
    }

    #[test]
    fn unparsable_dates_fall_back_to_raw_string() {
        assert_eq!(format_date_label("someday"), "someday");
        assert_eq!(format_date_label(""), "");
    }
}
