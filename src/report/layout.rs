use crate::models::PayoutRecord;
use rust_decimal::Decimal;

pub const SHEET_TITLE: &str = "Payout Report";
pub const HEADERS: [&str; 5] = ["Title", "Author", "Type", "Date", "Payout"];
pub const TOTAL_LABEL: &str = "TOTAL";

/// Index of the payout column within [`HEADERS`].
pub const PAYOUT_COLUMN: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(Decimal),
}

impl CellValue {
    fn text(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

pub type Row = Vec<CellValue>;

/// Rows of a payout report, split into the three writes the exporter makes.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLayout {
    pub header: Vec<String>,
    pub data: Vec<Row>,
    pub total: Row,
}

impl ReportLayout {
    pub fn new(records: &[PayoutRecord]) -> Self {
        Self {
            header: HEADERS.iter().map(|h| h.to_string()).collect(),
            data: records.iter().map(data_row).collect(),
            total: total_row(total_payout(records)),
        }
    }

    /// Header, data and total rows.
    pub fn row_count(&self) -> usize {
        self.data.len() + 2
    }

    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    /// Zero-based index of the total row.
    pub fn total_row_index(&self) -> usize {
        self.data.len() + 1
    }

    /// A1 notation covering every written cell, e.g. `A1:E4`.
    pub fn used_range_a1(&self) -> String {
        format!(
            "A1:{}{}",
            column_letter(self.column_count() - 1),
            self.row_count()
        )
    }
}

pub fn total_payout(records: &[PayoutRecord]) -> Decimal {
    records.iter().map(|r| r.payout).sum()
}

fn data_row(record: &PayoutRecord) -> Row {
    vec![
        CellValue::text(&record.title),
        CellValue::text(&record.author),
        CellValue::text(&record.type_),
        CellValue::text(&record.date),
        CellValue::Number(record.payout),
    ]
}

fn total_row(total: Decimal) -> Row {
    vec![
        CellValue::text(TOTAL_LABEL),
        CellValue::text(""),
        CellValue::text(""),
        CellValue::text(""),
        CellValue::Number(total),
    ]
}

fn column_letter(index: usize) -> char {
    // Reports never exceed 26 columns
    (b'A' + index as u8) as char
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::payout::test_helpers::{mock_record, scenario_records};
    use rust_decimal::prelude::dec;

    #[test]
    fn test_scenario_layout() {
        let layout = ReportLayout::new(&scenario_records());

        assert_eq!(layout.header, HEADERS);
        assert_eq!(
            layout.data,
            vec![
                vec![
                    CellValue::text("A"),
                    CellValue::text("X"),
                    CellValue::text("news"),
                    CellValue::text("2024-01-01"),
                    CellValue::Number(dec!(10)),
                ],
                vec![
                    CellValue::text("B"),
                    CellValue::text("Y"),
                    CellValue::text("blog"),
                    CellValue::text("2024-01-02"),
                    CellValue::Number(dec!(20)),
                ],
            ]
        );
        assert_eq!(
            layout.total,
            vec![
                CellValue::text("TOTAL"),
                CellValue::text(""),
                CellValue::text(""),
                CellValue::text(""),
                CellValue::Number(dec!(30)),
            ]
        );
        assert_eq!(layout.used_range_a1(), "A1:E4");
    }

    #[test]
    fn test_dimensions_follow_record_count() {
        for n in [1, 2, 7, 50] {
            let records: Vec<_> = (0..n)
                .map(|i| mock_record(&format!("article {i}"), dec!(1.25)))
                .collect();
            let layout = ReportLayout::new(&records);

            assert_eq!(layout.row_count(), n + 2);
            assert_eq!(layout.total_row_index(), n + 1);
            assert!(layout.data.iter().all(|row| row.len() == 5));
            assert_eq!(layout.total.len(), 5);
            assert_eq!(layout.column_count(), 5);
        }
    }

    #[test]
    fn test_total_is_exact_sum() {
        let records = vec![
            mock_record("a", dec!(0.1)),
            mock_record("b", dec!(0.2)),
            mock_record("c", dec!(1234.567)),
            mock_record("d", dec!(-5)),
        ];

        assert_eq!(total_payout(&records), dec!(1229.867));
        assert_eq!(
            ReportLayout::new(&records).total[PAYOUT_COLUMN],
            CellValue::Number(dec!(1229.867))
        );
    }

    #[test]
    fn test_data_rows_keep_input_order() {
        let records = vec![
            mock_record("z", dec!(1)),
            mock_record("a", dec!(2)),
            mock_record("m", dec!(3)),
        ];
        let titles: Vec<_> = ReportLayout::new(&records)
            .data
            .into_iter()
            .map(|row| row[0].clone())
            .collect();

        assert_eq!(
            titles,
            vec![
                CellValue::text("z"),
                CellValue::text("a"),
                CellValue::text("m")
            ]
        );
    }
}
