//! Fixed positions and styling for the expense report page

use crate::render::{Font, Rgb, TableStyle};

pub const TITLE: &str = "Expense Tracker Report";
pub const FOOTER: &str = "Generated by Expense Tracker. For personal record keeping only.";

pub const TITLE_Y: f32 = 15.0;
pub const TIMESTAMP_Y: f32 = 22.0;
pub const FILTER_Y: f32 = 29.0;

/// Table start without and with the filter line
pub const TABLE_START_Y: f32 = 30.0;
pub const TABLE_START_FILTERED_Y: f32 = 36.0;

/// Gap between the end of the table and the total line
pub const TOTAL_GAP: f32 = 10.0;

/// Total line position when it has to move to a fresh page
pub const TOTAL_TOP_Y: f32 = 20.0;

pub const FOOTER_Y: f32 = 287.0;

/// Lowest position the total line may take before spilling onto a new page
pub const CONTENT_BOTTOM_Y: f32 = 280.0;

pub const MARGIN: f32 = 14.0;

pub const TITLE_FONT: Font = Font::bold(20.0);
pub const BODY_FONT: Font = Font::regular(10.0);
pub const TOTAL_FONT: Font = Font::bold(12.0);
pub const FOOTER_FONT: Font = Font::regular(8.0);

pub const HEADER_FILL: Rgb = Rgb(44, 62, 80);
pub const HEADER_TEXT: Rgb = Rgb(255, 255, 255);
pub const ALTERNATE_FILL: Rgb = Rgb(245, 245, 245);

/// Dark bold header, zebra rows, full grid
pub fn table_style() -> TableStyle {
    TableStyle {
        header_fill: HEADER_FILL,
        header_text: HEADER_TEXT,
        header_bold: true,
        alternate_fill: Some(ALTERNATE_FILL),
        grid: true,
        font_size: BODY_FONT.size,
        margin_left: MARGIN,
        margin_right: MARGIN,
    }
}
