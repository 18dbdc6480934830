use crate::report::{CellRange, FormatEdit};
use google_sheets4::FieldMask;
use google_sheets4::api::{
    CellData, CellFormat, Color, GridRange, NumberFormat, RepeatCellRequest, Request, TextFormat,
};

pub(super) fn grid_range(sheet_id: i32, range: &CellRange) -> GridRange {
    GridRange {
        sheet_id: Some(sheet_id),
        start_row_index: Some(range.start_row as i32),
        end_row_index: Some(range.end_row as i32),
        start_column_index: Some(range.start_col as i32),
        end_column_index: Some(range.end_col as i32),
    }
}

/// Translate one edit into a repeatCell request touching only the fields it sets.
///
/// Returns `None` for an edit that sets nothing.
pub(super) fn format_request(sheet_id: i32, edit: &FormatEdit) -> Option<Request> {
    let mut format = CellFormat::default();
    let mut fields = Vec::new();

    if let Some(bold) = edit.style.bold {
        format.text_format = Some(TextFormat {
            bold: Some(bold),
            ..Default::default()
        });
        fields.push("userEnteredFormat.textFormat.bold");
    }

    if let Some(rgb) = edit.style.background {
        format.background_color = Some(Color {
            red: Some(rgb.red),
            green: Some(rgb.green),
            blue: Some(rgb.blue),
            alpha: None,
        });
        fields.push("userEnteredFormat.backgroundColor");
    }

    if let Some(number_format) = &edit.style.number_format {
        format.number_format = Some(NumberFormat {
            type_: Some(number_format.type_.as_str().to_string()),
            pattern: Some(number_format.pattern.clone()),
        });
        fields.push("userEnteredFormat.numberFormat");
    }

    if fields.is_empty() {
        return None;
    }

    Some(Request {
        repeat_cell: Some(RepeatCellRequest {
            range: Some(grid_range(sheet_id, &edit.range)),
            cell: Some(CellData {
                user_entered_format: Some(format),
                ..Default::default()
            }),
            fields: Some(FieldMask::new(&fields)),
        }),
        ..Default::default()
    })
}

pub(super) fn format_requests(sheet_id: i32, edits: &[FormatEdit]) -> Vec<Request> {
    edits
        .iter()
        .filter_map(|edit| format_request(sheet_id, edit))
        .collect()
}
