//! Row breaking for wrapped tag chips.
//!
//! Works on caller-measured widths; nothing is inspected at runtime.

use std::ops::Range;

/// Width assumed per chip when nothing is measured.
pub const ESTIMATED_CHIP_WIDTH: f32 = 80.0;

/// Greedily packs items left to right into rows no wider than `max_width`.
///
/// `spacing` is inserted between neighbours on a row. An item wider than
/// `max_width` still gets a row of its own. Rows are returned as index ranges
/// into `item_widths` and are never empty.
pub fn flow_rows(item_widths: &[f32], max_width: f32, spacing: f32) -> Vec<Range<usize>> {
    let mut rows = Vec::new();
    let mut row_start = 0;
    let mut row_width = 0.0_f32;

    for (index, &width) in item_widths.iter().enumerate() {
        if index > row_start {
            let needed = row_width + spacing + width;
            if needed > max_width {
                rows.push(row_start..index);
                row_start = index;
                row_width = width;
                continue;
            }
            row_width = needed;
        } else {
            row_width = width;
        }
    }

    if row_start < item_widths.len() {
        rows.push(row_start..item_widths.len());
    }
    rows
}

/// Packs `count` chips of one fixed width with no spacing.
pub fn flow_rows_uniform(count: usize, item_width: f32, max_width: f32) -> Vec<Range<usize>> {
    flow_rows(&vec![item_width; count], max_width, 0.0)
}
