//! Spreadsheet rendering of classified sprint rows.

use crate::models::ReportRow;
use rust_xlsxwriter::{
    ConditionalFormatText, ConditionalFormatTextRule, Format, Url, Workbook, XlsxError,
};
use std::path::Path;

pub const COLUMNS: [&str; 5] = ["Issue key", "Summary", "Reporter", "Department", "Theme"];

const ISSUE_KEY_COLUMN: u16 = 0;
const DEPARTMENT_COLUMN: u16 = 3;
const HIGHLIGHT_TEXT: &str = "Content";
const HIGHLIGHT_COLOR: u32 = 0x92C47C;
const COLUMN_PADDING: usize = 2;

pub struct ReportRenderer {
    tracker_base_url: String,
}

impl ReportRenderer {
    pub fn new(tracker_base_url: &str) -> Self {
        Self {
            tracker_base_url: tracker_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn issue_url(&self, issue_key: &str) -> String {
        format!("{}/browse/{}", self.tracker_base_url, issue_key)
    }

    pub fn render(&self, rows: &[ReportRow], path: &Path) -> Result<(), XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Sheet1")?;

        let header = Format::new().set_bold();
        for (col, title) in COLUMNS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *title, &header)?;
        }

        for (index, row) in rows.iter().enumerate() {
            let row_num = index as u32 + 1;
            for (col, value) in row.cells().iter().enumerate() {
                let col = col as u16;
                if col == ISSUE_KEY_COLUMN {
                    let link = Url::new(self.issue_url(value)).set_text(*value);
                    worksheet.write_url(row_num, col, link)?;
                } else {
                    worksheet.write_string(row_num, col, *value)?;
                }
            }
        }

        if !rows.is_empty() {
            let highlight = Format::new().set_background_color(HIGHLIGHT_COLOR);
            let rule = ConditionalFormatText::new()
                .set_rule(ConditionalFormatTextRule::Contains(HIGHLIGHT_TEXT.to_string()))
                .set_format(highlight);
            worksheet.add_conditional_format(
                1,
                DEPARTMENT_COLUMN,
                rows.len() as u32,
                DEPARTMENT_COLUMN,
                &rule,
            )?;
        }

        for (col, width) in column_widths(rows).iter().enumerate() {
            worksheet.set_column_width(col as u16, *width as f64)?;
        }

        workbook.save(path)?;
        tracing::info!("Spreadsheet with {} rows written to {}", rows.len(), path.display());
        Ok(())
    }
}

/// Longest header or cell text per column, in characters, plus padding.
pub fn column_widths(rows: &[ReportRow]) -> [usize; 5] {
    let mut widths = COLUMNS.map(|title| title.chars().count());
    for row in rows {
        for (width, value) in widths.iter_mut().zip(row.cells()) {
            *width = (*width).max(value.chars().count());
        }
    }
    widths.map(|width| width + COLUMN_PADDING)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::TempDir;

    fn report_row(key: &str, summary: &str, department: &str, theme: &str) -> ReportRow {
        ReportRow {
            issue_key: key.to_string(),
            summary: summary.to_string(),
            reporter: "Adriana Novo".to_string(),
            department: department.to_string(),
            theme: theme.to_string(),
        }
    }

    fn read_entry(path: &Path, name: &str) -> String {
        let file = std::fs::File::open(path).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        let mut entry = archive.by_name(name).unwrap();
        let mut content = String::new();
        entry.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn widths_cover_header_and_longest_value() {
        let rows = vec![
            report_row("AB-1", "Launch KCS page", "Content", "KCS"),
            report_row("AB-1234", "Short", "", "Kaffiliate"),
        ];

        assert_eq!(column_widths(&rows), [9 + 2, 15 + 2, 12 + 2, 10 + 2, 10 + 2]);
    }

    #[test]
    fn widths_count_characters_not_bytes() {
        let rows = vec![report_row("AB-1", "Ünïcödé ümlauts", "", "KCS")];

        assert_eq!(column_widths(&rows)[1], 15 + 2);
    }

    #[test]
    fn widths_without_rows_fall_back_to_headers() {
        assert_eq!(column_widths(&[]), [11, 9, 10, 12, 7]);
    }

    #[test]
    fn issue_url_points_at_browse_page() {
        let renderer = ReportRenderer::new("https://kaferocks.atlassian.net/");
        assert_eq!(
            renderer.issue_url("AB-1"),
            "https://kaferocks.atlassian.net/browse/AB-1"
        );
    }

    #[test]
    fn render_writes_links_highlight_and_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sprint_42.xlsx");
        let renderer = ReportRenderer::new("https://kaferocks.atlassian.net");

        renderer
            .render(
                &[report_row("AB-1", "Launch KCS page", "Content", "KCS")],
                &path,
            )
            .unwrap();

        let sheet = read_entry(&path, "xl/worksheets/sheet1.xml");
        assert!(sheet.contains("<hyperlink ref=\"A2\""));
        assert!(sheet.contains("containsText"));

        let rels = read_entry(&path, "xl/worksheets/_rels/sheet1.xml.rels");
        assert!(rels.contains("https://kaferocks.atlassian.net/browse/AB-1"));

        let strings = read_entry(&path, "xl/sharedStrings.xml");
        for value in ["Issue key", "AB-1", "Launch KCS page", "Adriana Novo", "Content", "KCS"] {
            assert!(strings.contains(value), "missing {value}");
        }
    }

    #[test]
    fn render_without_rows_skips_highlight() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sprint_empty.xlsx");

        ReportRenderer::new("https://example.atlassian.net")
            .render(&[], &path)
            .unwrap();

        let sheet = read_entry(&path, "xl/worksheets/sheet1.xml");
        assert!(!sheet.contains("conditionalFormatting"));
        assert!(!sheet.contains("<hyperlink"));
    }

    #[test]
    fn render_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("sprint_1.xlsx");

        let result = ReportRenderer::new("https://example.atlassian.net")
            .render(&[report_row("AB-1", "x", "", "Kaffiliate")], &path);

        assert!(result.is_err());
    }
}
