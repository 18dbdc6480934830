use super::layout::{PAYOUT_COLUMN, ReportLayout};

pub const CURRENCY_PATTERN: &str = "$#,##0.00";

const HEADER_BACKGROUND: Rgb = Rgb {
    red: 0.9,
    green: 0.9,
    blue: 0.9,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFormatType {
    Currency,
}

impl NumberFormatType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NumberFormatType::Currency => "CURRENCY",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberPattern {
    pub type_: NumberFormatType,
    pub pattern: String,
}

/// Zero-based, half-open rectangle of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub start_row: usize,
    pub end_row: usize,
    pub start_col: usize,
    pub end_col: usize,
}

impl CellRange {
    pub fn cell(row: usize, col: usize) -> Self {
        Self {
            start_row: row,
            end_row: row + 1,
            start_col: col,
            end_col: col + 1,
        }
    }

    #[cfg(test)]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        (self.start_row..self.end_row).contains(&row) && (self.start_col..self.end_col).contains(&col)
    }
}

/// Properties to set on a range. `None` leaves the property untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellStyle {
    pub bold: Option<bool>,
    pub background: Option<Rgb>,
    pub number_format: Option<NumberPattern>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormatEdit {
    pub range: CellRange,
    pub style: CellStyle,
}

/// Cell edits for a written report, committed together in one batch.
pub fn format_plan(layout: &ReportLayout) -> Vec<FormatEdit> {
    let header = FormatEdit {
        range: CellRange {
            start_row: 0,
            end_row: 1,
            start_col: 0,
            end_col: layout.column_count(),
        },
        style: CellStyle {
            bold: Some(true),
            background: Some(HEADER_BACKGROUND),
            ..Default::default()
        },
    };

    // Every data row plus the total row
    let payout_column = FormatEdit {
        range: CellRange {
            start_row: 1,
            end_row: layout.total_row_index() + 1,
            start_col: PAYOUT_COLUMN,
            end_col: PAYOUT_COLUMN + 1,
        },
        style: CellStyle {
            number_format: Some(NumberPattern {
                type_: NumberFormatType::Currency,
                pattern: CURRENCY_PATTERN.to_string(),
            }),
            ..Default::default()
        },
    };

    let total_label = FormatEdit {
        range: CellRange::cell(layout.total_row_index(), 0),
        style: CellStyle {
            bold: Some(true),
            ..Default::default()
        },
    };

    vec![header, payout_column, total_label]
}

/// Style a cell ends up with once every edit in `edits` has been applied in order.
#[cfg(test)]
pub fn effective_style(edits: &[FormatEdit], row: usize, col: usize) -> CellStyle {
    edits
        .iter()
        .filter(|edit| edit.range.contains(row, col))
        .fold(CellStyle::default(), |mut acc, edit| {
            if edit.style.bold.is_some() {
                acc.bold = edit.style.bold;
            }
            if edit.style.background.is_some() {
                acc.background = edit.style.background;
            }
            if edit.style.number_format.is_some() {
                acc.number_format = edit.style.number_format.clone();
            }
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::payout::test_helpers::{mock_record, scenario_records};
    use rust_decimal::prelude::dec;

    fn layout_of(n: usize) -> ReportLayout {
        let records: Vec<_> = (0..n)
            .map(|i| mock_record(&format!("article {i}"), dec!(3.50)))
            .collect();
        ReportLayout::new(&records)
    }

    #[test]
    fn test_header_cells_bold_with_grey_background() {
        for n in [1, 2, 25] {
            let plan = format_plan(&layout_of(n));
            for col in 0..5 {
                let style = effective_style(&plan, 0, col);
                assert_eq!(style.bold, Some(true), "header col {col} for n={n}");
                assert_eq!(style.background, Some(HEADER_BACKGROUND));
                assert_eq!(style.number_format, None);
            }
        }
    }

    #[test]
    fn test_payout_cells_use_currency_pattern() {
        for n in [1, 3, 40] {
            let plan = format_plan(&layout_of(n));
            for row in 1..=n + 1 {
                let number_format = effective_style(&plan, row, PAYOUT_COLUMN)
                    .number_format
                    .unwrap_or_else(|| panic!("row {row} has no number format for n={n}"));
                assert_eq!(number_format.type_, NumberFormatType::Currency);
                assert_eq!(number_format.pattern, "$#,##0.00");
            }
            assert_eq!(
                effective_style(&plan, n + 2, PAYOUT_COLUMN),
                CellStyle::default(),
                "nothing below the total row is formatted"
            );
        }
    }

    #[test]
    fn test_total_label_bold_only() {
        let layout = ReportLayout::new(&scenario_records());
        let plan = format_plan(&layout);

        assert_eq!(effective_style(&plan, 3, 0).bold, Some(true));
        for col in 1..4 {
            assert_eq!(effective_style(&plan, 3, col), CellStyle::default());
        }
        for row in 1..3 {
            assert_eq!(effective_style(&plan, row, 0).bold, None);
        }
    }

    #[test]
    fn test_plan_stays_inside_used_range() {
        let layout = layout_of(4);
        for edit in format_plan(&layout) {
            assert!(edit.range.end_row <= layout.row_count(), "{:?}", edit);
            assert!(edit.range.end_col <= layout.column_count(), "{:?}", edit);
            assert!(edit.range.start_row < edit.range.end_row);
            assert!(edit.range.start_col < edit.range.end_col);
        }
    }
}
