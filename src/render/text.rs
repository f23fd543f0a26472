//! Plain-text canvas
//!
//! Lays pages out as fixed-width text: one text row per [`ROW_PITCH`] layout
//! units and one character per [`CHAR_WIDTH`] units. Tables are drawn with
//! `tabled`. Colour fills and bold weights have no plain-text form and are
//! ignored; alignment, grid borders, and margins are honoured. Pages are
//! separated by a form feed.

use std::path::{Path, PathBuf};

use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style, Width};

use super::{Align, Canvas, Font, PageSize, TableLayout, TableSpec, TableStyle};
use crate::error::ExpenseError;
use crate::storage::write_atomic;

/// Layout units per text row
pub const ROW_PITCH: f32 = 6.0;

/// Layout units per character column
pub const CHAR_WIDTH: f32 = 2.5;

/// Inset for left- and right-aligned text
const TEXT_MARGIN: f32 = 14.0;

/// Where tables resume on continuation pages
const CONTINUATION_TOP: f32 = 15.0;

/// Tables stop this far above the bottom edge, leaving room for a footer
const BOTTOM_MARGIN: f32 = 17.0;

const PAGE_BREAK: &str = "\u{000C}\n";

/// A document rendered as paged plain text
#[derive(Debug, Clone)]
pub struct TextCanvas {
    size: PageSize,
    pages: Vec<Vec<String>>,
    current: usize,
}

impl TextCanvas {
    pub fn new() -> Self {
        Self::with_size(PageSize::A4)
    }

    pub fn with_size(size: PageSize) -> Self {
        let mut canvas = Self {
            size,
            pages: Vec::new(),
            current: 0,
        };
        canvas.add_page();
        canvas
    }

    fn rows_per_page(&self) -> usize {
        (self.size.height / ROW_PITCH).ceil() as usize
    }

    fn columns(&self) -> usize {
        (self.size.width / CHAR_WIDTH).floor() as usize
    }

    /// Last row (exclusive) a table may occupy
    fn table_row_limit(&self) -> usize {
        row_for(self.size.height - BOTTOM_MARGIN)
    }

    /// The rendered document
    pub fn render(&self) -> String {
        self.pages
            .iter()
            .map(|page| {
                let last = page.iter().rposition(|l| !l.is_empty()).map_or(0, |i| i + 1);
                let mut out = page[..last].join("\n");
                out.push('\n');
                out
            })
            .collect::<Vec<_>>()
            .join(PAGE_BREAK)
    }

    /// Lines of page `page` (1-based), trailing blank rows included
    pub fn page_lines(&self, page: usize) -> Option<&[String]> {
        page.checked_sub(1)
            .and_then(|i| self.pages.get(i))
            .map(|p| p.as_slice())
    }

    fn put_line(&mut self, row: usize, line: String) -> Result<(), ExpenseError> {
        let page = &mut self.pages[self.current];
        let slot = page.get_mut(row).ok_or_else(|| {
            ExpenseError::Render(format!("Row {} is outside the page", row))
        })?;
        *slot = line;
        Ok(())
    }

    /// Render the header plus `rows` as one table block
    fn render_chunk(&self, spec: &TableSpec, rows: &[Vec<String>], style: &TableStyle) -> Vec<String> {
        let mut builder = Builder::default();
        builder.push_record(spec.columns.iter().map(|c| c.header.clone()));
        for row in rows {
            builder.push_record(row.iter().cloned());
        }

        let mut table = builder.build();
        if style.grid {
            table.with(Style::ascii());
        } else {
            table.with(Style::blank());
        }

        for (index, column) in spec.columns.iter().enumerate() {
            let alignment = match column.align {
                Align::Left => Alignment::left(),
                Align::Center => Alignment::center(),
                Align::Right => Alignment::right(),
            };
            table.modify(Columns::single(index), alignment);
        }

        let width = self
            .columns()
            .saturating_sub(chars_for(style.margin_left) + chars_for(style.margin_right));
        table.with(Width::wrap(width));

        let indent = " ".repeat(chars_for(style.margin_left));
        table
            .to_string()
            .lines()
            .map(|l| format!("{}{}", indent, l))
            .collect()
    }
}

impl Default for TextCanvas {
    fn default() -> Self {
        Self::new()
    }
}

fn row_for(y: f32) -> usize {
    (y / ROW_PITCH).floor().max(0.0) as usize
}

fn chars_for(units: f32) -> usize {
    (units / CHAR_WIDTH).round().max(0.0) as usize
}

impl Canvas for TextCanvas {
    fn page_size(&self) -> PageSize {
        self.size
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn set_page(&mut self, page: usize) -> Result<(), ExpenseError> {
        if page == 0 || page > self.pages.len() {
            return Err(ExpenseError::Render(format!(
                "Page {} does not exist ({} pages)",
                page,
                self.pages.len()
            )));
        }
        self.current = page - 1;
        Ok(())
    }

    fn add_page(&mut self) {
        self.pages.push(vec![String::new(); self.rows_per_page()]);
        self.current = self.pages.len() - 1;
    }

    fn text(&mut self, text: &str, y: f32, align: Align, _font: Font) -> Result<(), ExpenseError> {
        let columns = self.columns();
        let len = text.chars().count();
        let margin = chars_for(TEXT_MARGIN);

        let pad = match align {
            Align::Left => margin,
            Align::Center => columns.saturating_sub(len) / 2,
            Align::Right => columns.saturating_sub(len + margin),
        };

        self.put_line(row_for(y), format!("{}{}", " ".repeat(pad), text))
    }

    fn table(
        &mut self,
        spec: &TableSpec,
        start_y: f32,
        style: &TableStyle,
    ) -> Result<TableLayout, ExpenseError> {
        let top_row = row_for(CONTINUATION_TOP);
        let limit = self.table_row_limit();
        let mut row = row_for(start_y);
        let mut remaining: &[Vec<String>] = &spec.rows;

        loop {
            let available = limit.saturating_sub(row);

            // Take as many rows as fit in the space left on this page
            let mut lines = Vec::new();
            let mut taken = 0;
            for count in 1..=remaining.len() {
                let candidate = self.render_chunk(spec, &remaining[..count], style);
                if candidate.len() > available {
                    break;
                }
                lines = candidate;
                taken = count;
            }

            if remaining.is_empty() {
                lines = self.render_chunk(spec, &[], style);
            } else if taken == 0 {
                if row > top_row {
                    self.add_page();
                    row = top_row;
                    continue;
                }
                // A single row taller than a whole page; draw it anyway
                lines = self.render_chunk(spec, &remaining[..1], style);
                lines.truncate(available);
                taken = 1;
            }

            for line in lines {
                self.put_line(row, line)?;
                row += 1;
            }

            remaining = &remaining[taken..];
            if remaining.is_empty() {
                break;
            }
            self.add_page();
            row = top_row;
        }

        Ok(TableLayout {
            final_y: row as f32 * ROW_PITCH,
            final_page: self.current + 1,
        })
    }

    fn extension(&self) -> &'static str {
        "txt"
    }

    fn save(&self, dir: &Path, file_name: &str) -> Result<PathBuf, ExpenseError> {
        let path = dir.join(file_name);
        write_atomic(&path, self.render().as_bytes())?;
        Ok(path)
    }
}
