//! Output formatting and persistence for report bundles.
//!
//! Supports pretty-printing, JSON serialization, and the two-sheet xlsx report.

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, FormatBorder, Workbook, Worksheet};
use std::path::Path;
use tracing::{debug, info};

use crate::report::{CITY_SLOTS, Cell, ReportBundle, ReportSummary, YEARLY_SLOTS};

pub const YEARLY_SHEET: &str = "Статистика по годам";
pub const CITY_SHEET: &str = "Статистика по городам";

/// Extra characters added to the widest value of each column.
pub const WIDTH_PADDING: usize = 2;

/// Rows 2..=11 of the share column get the percent format.
const PERCENT_ROWS: std::ops::RangeInclusive<u32> = 1..=10;
const PERCENT_FORMAT: &str = "0.00%";

/// Turns a bundle into a report artifact.
pub trait ReportRenderer {
    fn render(&self, bundle: &ReportBundle, profession: &str, path: &Path) -> Result<()>;
}

/// Logs a bundle using Rust's debug pretty-print format.
pub fn print_pretty(bundle: &ReportBundle) {
    debug!("{:#?}", bundle);
}

/// Logs a report summary as pretty-printed JSON.
pub fn print_json(summary: &ReportSummary<'_>) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

pub fn yearly_titles(profession: &str) -> Vec<String> {
    vec![
        "Год".to_string(),
        "Средняя зарплата".to_string(),
        format!("Средняя зарплата - {profession}"),
        "Количество вакансий".to_string(),
        format!("Количество вакансий - {profession}"),
    ]
}

pub fn city_titles() -> Vec<String> {
    ["Город", "Уровень зарплат", "", "Город", "Доля вакансий"]
        .map(String::from)
        .to_vec()
}

/// Cell range `(first_row, first_col, last_row, last_col)`, zero-based and inclusive.
pub type CellRange = (u32, u16, u32, u16);

/// One worksheet laid out column by column before it is written.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    pub name: String,
    pub titles: Vec<String>,
    pub columns: Vec<Vec<Cell>>,
    pub borders: Vec<CellRange>,
    /// Zero-based column whose rows in [`PERCENT_ROWS`] are formatted as percentages.
    pub percent_column: Option<u16>,
}

impl SheetLayout {
    pub fn yearly(bundle: &ReportBundle, profession: &str) -> Self {
        let slots = bundle.slots();
        let columns: Vec<Vec<Cell>> = slots[YEARLY_SLOTS].to_vec();
        let rows = columns[0].len() as u32;

        Self {
            name: YEARLY_SHEET.to_string(),
            titles: yearly_titles(profession),
            columns,
            borders: vec![(0, 0, rows, 4)],
            percent_column: None,
        }
    }

    pub fn cities(bundle: &ReportBundle) -> Self {
        let slots = bundle.slots();
        let columns: Vec<Vec<Cell>> = slots[CITY_SLOTS].to_vec();
        let salary_rows = columns[0].len() as u32;
        let share_rows = columns[3].len() as u32;

        Self {
            name: CITY_SHEET.to_string(),
            titles: city_titles(),
            columns,
            borders: vec![(0, 0, salary_rows, 1), (0, 3, share_rows, 4)],
            percent_column: Some(4),
        }
    }

    /// Width per column: the longest header or value, in characters, plus padding.
    pub fn column_widths(&self) -> Vec<usize> {
        self.titles
            .iter()
            .zip(&self.columns)
            .map(|(title, column)| {
                column
                    .iter()
                    .map(|cell| cell.to_string().chars().count())
                    .chain(std::iter::once(title.chars().count()))
                    .max()
                    .unwrap_or(0)
                    + WIDTH_PADDING
            })
            .collect()
    }

    fn has_border(&self, row: u32, col: u16) -> bool {
        self.borders
            .iter()
            .any(|&(r0, c0, r1, c1)| (r0..=r1).contains(&row) && (c0..=c1).contains(&col))
    }

    fn is_percent(&self, row: u32, col: u16) -> bool {
        self.percent_column == Some(col) && PERCENT_ROWS.contains(&row)
    }

    fn format_for(&self, row: u32, col: u16) -> Format {
        let mut format = Format::new();
        if row == 0 {
            format = format.set_bold();
        }
        if self.has_border(row, col) {
            format = format.set_border(FormatBorder::Thin);
        }
        if self.is_percent(row, col) {
            format = format.set_num_format(PERCENT_FORMAT);
        }
        format
    }

    pub fn write_to(&self, sheet: &mut Worksheet) -> Result<()> {
        sheet.set_name(&self.name)?;

        let rows = self
            .columns
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
            .max(*PERCENT_ROWS.end() as usize) as u32;

        for (col, title) in self.titles.iter().enumerate() {
            let col = col as u16;
            let column = &self.columns[col as usize];

            sheet.write_string_with_format(0, col, title, &self.format_for(0, col))?;

            for row in 1..=rows {
                let format = self.format_for(row, col);
                match column.get(row as usize - 1) {
                    Some(Cell::Int(v)) => {
                        sheet.write_number_with_format(row, col, *v as f64, &format)?;
                    }
                    Some(Cell::Ratio(v)) => {
                        sheet.write_number_with_format(row, col, *v, &format)?;
                    }
                    Some(Cell::Text(v)) => {
                        sheet.write_string_with_format(row, col, v, &format)?;
                    }
                    None if self.has_border(row, col) || self.is_percent(row, col) => {
                        sheet.write_blank(row, col, &format)?;
                    }
                    None => {}
                }
            }
        }

        for (col, width) in self.column_widths().into_iter().enumerate() {
            sheet.set_column_width(col as u16, width as f64)?;
        }

        Ok(())
    }
}

/// Writes the yearly and city sheets into an `.xlsx` workbook.
#[derive(Debug, Default, Clone, Copy)]
pub struct XlsxRenderer;

impl ReportRenderer for XlsxRenderer {
    #[tracing::instrument(skip(self, bundle), fields(path = %path.display()))]
    fn render(&self, bundle: &ReportBundle, profession: &str, path: &Path) -> Result<()> {
        let mut workbook = Workbook::new();

        for layout in [
            SheetLayout::yearly(bundle, profession),
            SheetLayout::cities(bundle),
        ] {
            let sheet = workbook.add_worksheet();
            layout
                .write_to(sheet)
                .with_context(|| format!("failed to fill sheet {:?}", layout.name))?;
        }

        workbook
            .save(path)
            .with_context(|| format!("failed to save workbook to {}", path.display()))?;

        info!(path = %path.display(), years = bundle.years.len(), "Report written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn bundle() -> ReportBundle {
        ReportBundle {
            years: vec![2021, 2022],
            avg_salary: vec![95_000, 123_456],
            profession_avg_salary: vec![0, 150_000],
            vacancies: vec![10, 12],
            profession_vacancies: vec![0, 3],
            salary_cities: vec!["Москва".into(), "Санкт-Петербург".into()],
            city_salaries: vec![130_000, 110_000],
            separator: vec![String::new()],
            share_cities: vec!["Москва".into()],
            city_shares: vec![0.4545],
        }
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&bundle());
    }

    #[test]
    fn test_print_json_does_not_panic() {
        let bundle = bundle();
        let summary = ReportSummary {
            generated_at: Utc::now(),
            profession: "Программист",
            total_vacancies: 22,
            skipped_rows: 1,
            bundle: &bundle,
        };
        print_json(&summary).unwrap();
    }

    #[test]
    fn test_yearly_layout_widths() {
        let layout = SheetLayout::yearly(&bundle(), "Dev");

        assert_eq!(layout.titles[2], "Средняя зарплата - Dev");
        assert_eq!(
            layout.column_widths(),
            vec![
                "Год".chars().count().max(4) + 2,
                "Средняя зарплата".chars().count() + 2,
                "Средняя зарплата - Dev".chars().count() + 2,
                "Количество вакансий".chars().count() + 2,
                "Количество вакансий - Dev".chars().count() + 2,
            ]
        );
        assert_eq!(layout.borders, vec![(0, 0, 2, 4)]);
    }

    #[test]
    fn test_city_layout_borders_and_widths() {
        let layout = SheetLayout::cities(&bundle());

        assert_eq!(layout.borders, vec![(0, 0, 2, 1), (0, 3, 1, 4)]);
        let widths = layout.column_widths();
        assert_eq!(widths[0], "Санкт-Петербург".chars().count() + 2);
        assert_eq!(widths[2], 2);
        assert_eq!(widths[4], "Доля вакансий".chars().count() + 2);
    }

    #[test]
    fn test_render_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.xlsx");

        XlsxRenderer.render(&bundle(), "Программист", &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        // xlsx is a zip container
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_render_empty_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.xlsx");

        let empty = ReportBundle {
            separator: vec![String::new()],
            ..Default::default()
        };
        XlsxRenderer.render(&empty, "Dev", &path).unwrap();
        assert!(path.exists());
    }
}
