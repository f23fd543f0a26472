//! Page-level document drawing
//!
//! Reports describe what goes on a page through the [`Canvas`] trait: text
//! placed at a vertical position, and styled grid tables. Positions are in
//! layout units on an A4-sized page (210 x 297). Drawing a table returns
//! where it ended so callers can place content below it.

pub mod text;

use std::path::{Path, PathBuf};

use crate::error::ExpenseError;

pub use text::TextCanvas;

/// Horizontal placement of text or cell content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// An RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Font settings for a run of text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub size: f32,
    pub bold: bool,
}

impl Font {
    pub const fn regular(size: f32) -> Self {
        Self { size, bold: false }
    }

    pub const fn bold(size: f32) -> Self {
        Self { size, bold: true }
    }
}

/// Page dimensions in layout units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    pub const A4: PageSize = PageSize {
        width: 210.0,
        height: 297.0,
    };
}

/// One table column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub header: String,
    pub align: Align,
}

impl Column {
    pub fn new(header: impl Into<String>, align: Align) -> Self {
        Self {
            header: header.into(),
            align,
        }
    }
}

/// Table contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSpec {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

/// Table styling
#[derive(Debug, Clone, PartialEq)]
pub struct TableStyle {
    pub header_fill: Rgb,
    pub header_text: Rgb,
    pub header_bold: bool,
    /// Fill for every second body row, if any
    pub alternate_fill: Option<Rgb>,
    /// Borders around every cell
    pub grid: bool,
    pub font_size: f32,
    pub margin_left: f32,
    pub margin_right: f32,
}

/// Where a drawn table ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableLayout {
    /// Vertical position just below the last drawn line
    pub final_y: f32,
    /// Page (1-based) the table ended on
    pub final_page: usize,
}

/// A paged document being drawn
///
/// Drawing happens on the current page. Tables that overflow continue on new
/// pages and leave the last of them current.
pub trait Canvas {
    fn page_size(&self) -> PageSize;

    /// Number of pages drawn so far (at least one)
    fn page_count(&self) -> usize;

    /// Make page `page` (1-based) current
    fn set_page(&mut self, page: usize) -> Result<(), ExpenseError>;

    /// Append a blank page and make it current
    fn add_page(&mut self);

    /// Place a single line of text with its baseline at `y`
    fn text(&mut self, text: &str, y: f32, align: Align, font: Font) -> Result<(), ExpenseError>;

    /// Draw a table starting at `start_y`, paginating as needed
    fn table(
        &mut self,
        table: &TableSpec,
        start_y: f32,
        style: &TableStyle,
    ) -> Result<TableLayout, ExpenseError>;

    /// File extension for saved documents, without the dot
    fn extension(&self) -> &'static str;

    /// Write the finished document into `dir` as `file_name`
    ///
    /// Either the whole file is written or nothing is.
    fn save(&self, dir: &Path, file_name: &str) -> Result<PathBuf, ExpenseError>;
}
