//! Expense Report
//!
//! Lays a filtered view of the expenses out as a printable document: title,
//! generation date, optional filter line, the expense table, a total line
//! placed below wherever the table ended, and a footer on every page.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use tracing::{debug, error, info};

use super::layout;
use crate::config::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{CategoryFilter, Expense, Money};
use crate::render::{Align, Canvas, Column, TableSpec};
use crate::services::{view, ExpenseService};
use crate::storage::Storage;

/// A report over one filtered view
#[derive(Debug, Clone)]
pub struct ExpenseReport<'a> {
    expenses: &'a [Expense],
    selection: CategoryFilter,
    total: Money,
    currency: String,
    generated_on: NaiveDate,
    date_format: String,
}

impl<'a> ExpenseReport<'a> {
    /// Build a report over `expenses`
    ///
    /// Fails with [`ExpenseError::EmptyReport`] when there is nothing to show.
    pub fn new(
        expenses: &'a [Expense],
        selection: CategoryFilter,
        total: Money,
    ) -> ExpenseResult<Self> {
        if expenses.is_empty() {
            return Err(ExpenseError::EmptyReport);
        }

        let settings = Settings::default();
        Ok(Self {
            expenses,
            selection,
            total,
            currency: settings.currency_symbol,
            generated_on: Local::now().date_naive(),
            date_format: settings.report_date_format,
        })
    }

    pub fn with_currency(mut self, symbol: impl Into<String>) -> Self {
        self.currency = symbol.into();
        self
    }

    /// Set the generation date and the format it is printed in
    pub fn generated_on(mut self, date: NaiveDate, format: impl Into<String>) -> Self {
        self.generated_on = date;
        self.date_format = format.into();
        self
    }

    /// `expense-report-<YYYY-MM-DD>.<extension>`
    pub fn file_name(&self, extension: &str) -> String {
        format!(
            "expense-report-{}.{}",
            self.generated_on.format("%Y-%m-%d"),
            extension
        )
    }

    /// Columns and formatted cells of the expense table
    pub fn table_spec(&self) -> TableSpec {
        TableSpec {
            columns: vec![
                Column::new("Date", Align::Left),
                Column::new("Category", Align::Left),
                Column::new(format!("Amount ({})", self.currency), Align::Right),
                Column::new("Description", Align::Left),
            ],
            rows: self
                .expenses
                .iter()
                .map(|e| {
                    vec![
                        e.date_display(),
                        e.category.to_string(),
                        e.amount.to_string(),
                        e.description_display().to_string(),
                    ]
                })
                .collect(),
        }
    }

    /// `Generated on: <date>` in the configured format
    ///
    /// An unusable format string is a render error, not a panic.
    pub fn generated_line(&self) -> ExpenseResult<String> {
        let mut line = String::from("Generated on: ");
        write!(line, "{}", self.generated_on.format(&self.date_format)).map_err(|_| {
            ExpenseError::Render(format!(
                "Invalid report date format '{}'",
                self.date_format
            ))
        })?;
        Ok(line)
    }

    pub fn total_line(&self) -> String {
        format!("Total Amount: {}", self.total.format_with_symbol(&self.currency))
    }

    /// Draw the whole report onto `canvas`
    pub fn render(&self, canvas: &mut dyn Canvas) -> ExpenseResult<()> {
        canvas.text(layout::TITLE, layout::TITLE_Y, Align::Center, layout::TITLE_FONT)?;

        let generated = self.generated_line()?;
        canvas.text(&generated, layout::TIMESTAMP_Y, Align::Center, layout::BODY_FONT)?;

        let start_y = match self.selection {
            CategoryFilter::All => layout::TABLE_START_Y,
            CategoryFilter::Only(category) => {
                let line = format!("Category Filter: {}", category);
                canvas.text(&line, layout::FILTER_Y, Align::Center, layout::BODY_FONT)?;
                layout::TABLE_START_FILTERED_Y
            }
        };

        let table_layout = canvas.table(&self.table_spec(), start_y, &layout::table_style())?;
        debug!(
            final_y = table_layout.final_y,
            page = table_layout.final_page,
            "Expense table drawn"
        );

        let mut total_y = table_layout.final_y + layout::TOTAL_GAP;
        if total_y > layout::CONTENT_BOTTOM_Y {
            canvas.add_page();
            total_y = layout::TOTAL_TOP_Y;
        }
        canvas.text(&self.total_line(), total_y, Align::Center, layout::TOTAL_FONT)?;

        for page in 1..=canvas.page_count() {
            canvas.set_page(page)?;
            canvas.text(layout::FOOTER, layout::FOOTER_Y, Align::Center, layout::FOOTER_FONT)?;
        }

        Ok(())
    }

    /// Render onto `canvas` and save it into `dir`
    pub fn write(&self, canvas: &mut dyn Canvas, dir: &Path) -> ExpenseResult<PathBuf> {
        self.render(canvas)?;
        let file_name = self.file_name(canvas.extension());
        canvas.save(dir, &file_name)
    }
}

/// Generate the report for the current filter selection and save it into `dir`
///
/// An empty view is rejected with [`ExpenseError::EmptyReport`]. Any other
/// failure is logged and reported as a generic export error; nothing is
/// written in that case.
pub fn export_report(
    storage: &Storage,
    settings: &Settings,
    selection: CategoryFilter,
    canvas: &mut dyn Canvas,
    dir: &Path,
) -> ExpenseResult<PathBuf> {
    let expenses = ExpenseService::new(storage).list(&selection)?;
    let total = view::total(&expenses);

    let report = ExpenseReport::new(&expenses, selection, total)?
        .with_currency(settings.currency_symbol.clone())
        .generated_on(Local::now().date_naive(), settings.report_date_format.clone());

    match report.write(canvas, dir) {
        Ok(path) => {
            info!(path = %path.display(), count = expenses.len(), "Report exported");
            Ok(path)
        }
        Err(e) => {
            error!("Report generation failed: {}", e);
            Err(ExpenseError::Export(
                "Failed to generate the report. Please try again.".into(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use crate::render::{PageSize, TableLayout, TableStyle, TextCanvas};
    use crate::services::ExpenseForm;
    use tempfile::TempDir;

    fn expense(category: Category, cents: i64, description: &str) -> Expense {
        Expense::new(
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            category,
            Money::from_cents(cents),
            description,
        )
    }

    fn report_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
    }

    fn row_of(canvas: &TextCanvas, needle: &str) -> Option<usize> {
        canvas
            .page_lines(1)
            .unwrap()
            .iter()
            .position(|l| l.contains(needle))
    }

    #[test]
    fn test_empty_view_rejected() {
        let result = ExpenseReport::new(&[], CategoryFilter::All, Money::zero());
        assert!(matches!(result, Err(ExpenseError::EmptyReport)));
    }

    #[test]
    fn test_table_cells() {
        let expenses = vec![expense(Category::Food, 25050, "")];
        let report = ExpenseReport::new(&expenses, CategoryFilter::All, Money::from_cents(25050))
            .unwrap()
            .with_currency("Rs.");

        let spec = report.table_spec();
        let headers: Vec<_> = spec.columns.iter().map(|c| c.header.as_str()).collect();
        assert_eq!(headers, ["Date", "Category", "Amount (Rs.)", "Description"]);
        assert_eq!(spec.columns[2].align, Align::Right);
        assert_eq!(spec.rows[0], ["2024-01-05", "Food", "250.50", "-"]);
    }

    #[test]
    fn test_file_name_embeds_date() {
        let expenses = vec![expense(Category::Food, 100, "")];
        let report = ExpenseReport::new(&expenses, CategoryFilter::All, Money::from_cents(100))
            .unwrap()
            .generated_on(report_date(), "%-m/%-d/%Y");
        assert_eq!(report.file_name("txt"), "expense-report-2024-02-01.txt");
    }

    #[test]
    fn test_render_unfiltered() {
        let expenses = vec![expense(Category::Food, 10000, "Groceries")];
        let report = ExpenseReport::new(&expenses, CategoryFilter::All, Money::from_cents(10000))
            .unwrap()
            .generated_on(report_date(), "%-m/%-d/%Y");

        let mut canvas = TextCanvas::new();
        report.render(&mut canvas).unwrap();

        assert_eq!(row_of(&canvas, "Expense Tracker Report"), Some(2));
        assert_eq!(row_of(&canvas, "Generated on: 2/1/2024"), Some(3));
        assert_eq!(row_of(&canvas, "Category Filter"), None);
        assert_eq!(row_of(&canvas, "| Date"), Some(6));
        assert!(row_of(&canvas, "Total Amount: $ 100.00").is_some());
        assert_eq!(row_of(&canvas, layout::FOOTER), Some(47));
    }

    #[test]
    fn test_render_filtered_shifts_table() {
        let expenses = vec![expense(Category::Health, 1500, "")];
        let report = ExpenseReport::new(
            &expenses,
            CategoryFilter::Only(Category::Health),
            Money::from_cents(1500),
        )
        .unwrap();

        let mut canvas = TextCanvas::new();
        report.render(&mut canvas).unwrap();

        assert_eq!(row_of(&canvas, "Category Filter: Health"), Some(4));
        assert_eq!(row_of(&canvas, "| Date"), Some(7));
    }

    #[test]
    fn test_total_placed_below_table_end() {
        let expenses: Vec<_> = (0..3).map(|i| expense(Category::Food, 100 * i, "")).collect();
        let report =
            ExpenseReport::new(&expenses, CategoryFilter::All, Money::from_cents(300)).unwrap();

        let mut canvas = TextCanvas::new();
        report.render(&mut canvas).unwrap();

        // Table starts on row 5 and takes 2 * 3 + 3 lines; the gap adds one blank row
        let total_row = row_of(&canvas, "Total Amount").unwrap();
        assert_eq!(total_row, 5 + 9 + 1);
        assert!(canvas.page_lines(1).unwrap()[total_row - 1].is_empty());
    }

    #[test]
    fn test_footer_on_every_page() {
        let expenses: Vec<_> = (0..80).map(|i| expense(Category::Other, i, "")).collect();
        let total = view::total(&expenses);
        let report = ExpenseReport::new(&expenses, CategoryFilter::All, total).unwrap();

        let mut canvas = TextCanvas::new();
        report.render(&mut canvas).unwrap();

        assert!(canvas.page_count() > 1);
        for page in 1..=canvas.page_count() {
            let lines = canvas.page_lines(page).unwrap();
            assert!(lines.iter().any(|l| l.contains(layout::FOOTER)), "page {}", page);
        }
    }

    /// Canvas that records calls and fails on save
    struct FailingCanvas {
        inner: TextCanvas,
    }

    impl Canvas for FailingCanvas {
        fn page_size(&self) -> PageSize {
            self.inner.page_size()
        }
        fn page_count(&self) -> usize {
            self.inner.page_count()
        }
        fn set_page(&mut self, page: usize) -> ExpenseResult<()> {
            self.inner.set_page(page)
        }
        fn add_page(&mut self) {
            self.inner.add_page()
        }
        fn text(
            &mut self,
            text: &str,
            y: f32,
            align: Align,
            font: crate::render::Font,
        ) -> ExpenseResult<()> {
            self.inner.text(text, y, align, font)
        }
        fn table(
            &mut self,
            table: &TableSpec,
            start_y: f32,
            style: &TableStyle,
        ) -> ExpenseResult<TableLayout> {
            self.inner.table(table, start_y, style)
        }
        fn extension(&self) -> &'static str {
            "txt"
        }
        fn save(&self, _dir: &Path, _file_name: &str) -> ExpenseResult<PathBuf> {
            Err(ExpenseError::Io("disk full".into()))
        }
    }

    fn storage_with(entries: &[(&str, &str)]) -> Storage {
        let mut storage = Storage::in_memory();
        storage.load_all().unwrap();
        let service = ExpenseService::new(&storage);
        for (category, amount) in entries {
            let mut form = ExpenseForm::filled("2024-01-05", *category, *amount, "");
            service.add(&mut form).unwrap();
        }
        storage
    }

    #[test]
    fn test_export_writes_dated_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage_with(&[("Food", "100"), ("Transport", "50"), ("Food", "75")]);

        let path = export_report(
            &storage,
            &Settings::default(),
            CategoryFilter::Only(Category::Food),
            &mut TextCanvas::new(),
            temp_dir.path(),
        )
        .unwrap();

        let expected = format!("expense-report-{}.txt", Local::now().date_naive().format("%Y-%m-%d"));
        assert_eq!(path.file_name().unwrap().to_str().unwrap(), expected);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("Total Amount: $ 175.00"));
        assert!(!contents.contains("Transport"));
    }

    #[test]
    fn test_export_empty_view_produces_no_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage_with(&[("Food", "100")]);

        let err = export_report(
            &storage,
            &Settings::default(),
            CategoryFilter::Only(Category::Shopping),
            &mut TextCanvas::new(),
            temp_dir.path(),
        )
        .unwrap_err();

        assert!(matches!(err, ExpenseError::EmptyReport));
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_export_failure_is_generic() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage_with(&[("Food", "100")]);
        let mut canvas = FailingCanvas {
            inner: TextCanvas::new(),
        };

        let err = export_report(
            &storage,
            &Settings::default(),
            CategoryFilter::All,
            &mut canvas,
            temp_dir.path(),
        )
        .unwrap_err();

        assert!(matches!(err, ExpenseError::Export(_)));
        assert!(!err.to_string().contains("disk full"));
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_invalid_date_format_is_render_error() {
        let expenses = vec![expense(Category::Food, 100, "")];
        let report = ExpenseReport::new(&expenses, CategoryFilter::All, Money::from_cents(100))
            .unwrap()
            .generated_on(report_date(), "%Q");

        assert!(matches!(report.generated_line(), Err(ExpenseError::Render(_))));
        assert!(matches!(
            report.render(&mut TextCanvas::new()),
            Err(ExpenseError::Render(_))
        ));
    }

    #[test]
    fn test_export_with_invalid_date_format_is_generic() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage_with(&[("Food", "100")]);
        let settings = Settings {
            report_date_format: "%Q".to_string(),
            ..Settings::default()
        };

        let err = export_report(
            &storage,
            &settings,
            CategoryFilter::All,
            &mut TextCanvas::new(),
            temp_dir.path(),
        )
        .unwrap_err();

        assert!(matches!(err, ExpenseError::Export(_)));
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    /// Canvas that remembers the fonts and table styles it was asked to use
    #[derive(Default)]
    struct RecordingCanvas {
        inner: TextCanvas,
        fonts: Vec<(String, crate::render::Font)>,
        styles: Vec<TableStyle>,
    }

    impl Canvas for RecordingCanvas {
        fn page_size(&self) -> PageSize {
            self.inner.page_size()
        }
        fn page_count(&self) -> usize {
            self.inner.page_count()
        }
        fn set_page(&mut self, page: usize) -> ExpenseResult<()> {
            self.inner.set_page(page)
        }
        fn add_page(&mut self) {
            self.inner.add_page()
        }
        fn text(
            &mut self,
            text: &str,
            y: f32,
            align: Align,
            font: crate::render::Font,
        ) -> ExpenseResult<()> {
            self.fonts.push((text.to_string(), font));
            self.inner.text(text, y, align, font)
        }
        fn table(
            &mut self,
            table: &TableSpec,
            start_y: f32,
            style: &TableStyle,
        ) -> ExpenseResult<TableLayout> {
            self.styles.push(style.clone());
            self.inner.table(table, start_y, style)
        }
        fn extension(&self) -> &'static str {
            self.inner.extension()
        }
        fn save(&self, dir: &Path, file_name: &str) -> ExpenseResult<PathBuf> {
            self.inner.save(dir, file_name)
        }
    }

    #[test]
    fn test_report_requests_table_styling() {
        let expenses = vec![expense(Category::Food, 100, ""), expense(Category::Other, 200, "")];
        let report =
            ExpenseReport::new(&expenses, CategoryFilter::All, Money::from_cents(300)).unwrap();

        let mut canvas = RecordingCanvas::default();
        report.render(&mut canvas).unwrap();

        assert_eq!(canvas.styles.len(), 1);
        let style = &canvas.styles[0];
        assert_eq!(style.header_fill, layout::HEADER_FILL);
        assert_eq!(style.header_text, layout::HEADER_TEXT);
        assert!(style.header_bold);
        assert_eq!(style.alternate_fill, Some(layout::ALTERNATE_FILL));
        assert!(style.grid);
        assert_eq!(style.margin_left, layout::MARGIN);
        assert_eq!(style.margin_right, layout::MARGIN);
    }

    #[test]
    fn test_report_requests_fonts() {
        let expenses = vec![expense(Category::Food, 100, "")];
        let report =
            ExpenseReport::new(&expenses, CategoryFilter::All, Money::from_cents(100)).unwrap();

        let mut canvas = RecordingCanvas::default();
        report.render(&mut canvas).unwrap();

        let font_of = |prefix: &str| {
            canvas
                .fonts
                .iter()
                .find(|(text, _)| text.starts_with(prefix))
                .map(|(_, font)| *font)
        };
        assert_eq!(font_of(layout::TITLE), Some(layout::TITLE_FONT));
        assert_eq!(font_of("Total Amount"), Some(layout::TOTAL_FONT));
        assert_eq!(font_of(layout::FOOTER), Some(layout::FOOTER_FONT));
        assert!(font_of("Total Amount").unwrap().bold);
    }
}
