use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::Context;
use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::progress::record::ProgressRecord;

use super::format_date_label;

const PAGE_WIDTH_MM: f64 = 210.0;
const PAGE_HEIGHT_MM: f64 = 297.0;
const LEFT_MARGIN_MM: f64 = 12.0;
const TOP_START_MM: f64 = 20.0;
/// An entry starting below this cursor position goes onto a fresh page.
const PAGE_BREAK_MM: f64 = 250.0;
const LINE_STEP_MM: f64 = 8.0;
const BLOCK_GAP_MM: f64 = 12.0;
const SEPARATOR_GAP_MM: f64 = 10.0;
const FONT_SIZE_PT: f64 = 12.0;

/// One line of page text, positioned by its distance from the top edge.
#[derive(Debug, Clone)]
pub struct TextLine {
    pub y_mm: f64,
    pub text: String,
}

/// Fixed-layout pagination over records already sorted ascending by date.
///
/// Each record renders as one block of seven lines; the vertical cursor
/// advances per field and the page-break check happens at entry boundaries
/// only, so a block that starts above the threshold may run past it.
pub fn layout_pages(entries: &[ProgressRecord]) -> Vec<Vec<TextLine>> {
    let mut pages: Vec<Vec<TextLine>> = Vec::new();
    let mut page: Vec<TextLine> = Vec::new();
    let mut y = TOP_START_MM;

    for (index, entry) in entries.iter().enumerate() {
        if y > PAGE_BREAK_MM {
            pages.push(std::mem::take(&mut page));
            y = TOP_START_MM;
        }

        let mut line = |y_mm: f64, text: String| page.push(TextLine { y_mm, text });
        line(y, format!("DATE: {}", format_date_label(&entry.date)));
        y += LINE_STEP_MM;
        line(y, format!("DAY {}", index + 1));
        y += LINE_STEP_MM;
        line(y, format!("FOOD: {}", or_dash(&entry.food)));
        y += LINE_STEP_MM;
        line(y, format!("EXERCISE: {}", or_dash(&entry.exercise)));
        y += LINE_STEP_MM;
        line(y, format!("WHEY GRAMS: {}", entry.whey_grams));
        y += LINE_STEP_MM;
        line(y, format!("CREATINE GRAMS: {}", entry.creatine_grams));
        y += BLOCK_GAP_MM;
        line(y, "---".to_string());
        y += SEPARATOR_GAP_MM;
    }

    if !page.is_empty() {
        pages.push(page);
    }
    pages
}

fn or_dash(text: &str) -> &str {
    if text.is_empty() {
        "-"
    } else {
        text
    }
}

/// Render the laid-out pages through the PDF library and write the file.
pub fn write_pdf(entries: &[ProgressRecord], path: &Path) -> anyhow::Result<()> {
    let pages = layout_pages(entries);

    let (doc, first_page, first_layer) = PdfDocument::new(
        "Fitracker Progress",
        Mm(PAGE_WIDTH_MM as f32),
        Mm(PAGE_HEIGHT_MM as f32),
        "Layer 1",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|err| anyhow::anyhow!("load builtin font: {err}"))?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    for (page_number, lines) in pages.iter().enumerate() {
        if page_number > 0 {
            let (page, new_layer) =
                doc.add_page(Mm(PAGE_WIDTH_MM as f32), Mm(PAGE_HEIGHT_MM as f32), "Layer 1");
            layer = doc.get_page(page).get_layer(new_layer);
        }
        for line in lines {
            layer.use_text(
                line.text.clone(),
                FONT_SIZE_PT as f32,
                Mm(LEFT_MARGIN_MM as f32),
                Mm((PAGE_HEIGHT_MM - line.y_mm) as f32),
                &font,
            );
        }
    }

    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|err| anyhow::anyhow!("write pdf: {err}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn entry(date: &str, food: &str) -> ProgressRecord {
        ProgressRecord {
            id: Uuid::new_v4(),
            date: date.to_string(),
            food: food.to_string(),
            exercise: String::new(),
            whey_grams: 30.0,
            creatine_grams: 5.0,
            image_data: None,
            image_name: None,
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    fn entries(n: usize) -> Vec<ProgressRecord> {
        (1..=n)
            .map(|d| entry(&format!("2024-01-{d:02}"), "chicken + rice"))
            .collect()
    }

    #[test]
    fn empty_input_yields_no_pages() {
        assert!(layout_pages(&[]).is_empty());
    }

    #[test]
    fn one_entry_lays_out_seven_lines_from_the_top() {
        let pages = layout_pages(&entries(1));
        assert_eq!(pages.len(), 1);
        let lines = &pages[0];
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0].y_mm, 20.0);
        assert_eq!(lines[0].text, "DATE: 1/1/2024");
        assert_eq!(lines[1].text, "DAY 1");
        assert_eq!(lines[2].text, "FOOD: chicken + rice");
        assert_eq!(lines[3].text, "EXERCISE: -");
        assert_eq!(lines[4].text, "WHEY GRAMS: 30");
        assert_eq!(lines[5].text, "CREATINE GRAMS: 5");
        assert_eq!(lines[6].text, "---");
        assert_eq!(lines[6].y_mm, 20.0 + 5.0 * 8.0 + 12.0);
    }

    #[test]
    fn page_breaks_exactly_when_the_cursor_passes_the_threshold() {
        // Each block advances the cursor 62 mm from a 20 mm start, so entries
        // begin at 20, 82, 144, 206, 268, ... The fourth entry (206 <= 250)
        // stays on page one; the fifth (268 > 250) opens page two.
        assert_eq!(layout_pages(&entries(4)).len(), 1);

        let pages = layout_pages(&entries(5));
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].len(), 4 * 7);
        assert_eq!(pages[1].len(), 7);
        assert_eq!(pages[1][0].y_mm, 20.0);
        assert_eq!(pages[1][0].text, "DATE: 1/5/2024");
    }

    #[test]
    fn day_index_keeps_counting_across_pages() {
        let pages = layout_pages(&entries(5));
        assert_eq!(pages[1][1].text, "DAY 5");
    }

    #[test]
    fn writes_a_pdf_file() {
        let mut path = std::env::temp_dir();
        path.push(format!("fitracker_pdf_{}.pdf", std::process::id()));
        write_pdf(&entries(5), &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        std::fs::remove_file(&path).unwrap();
    }
}
