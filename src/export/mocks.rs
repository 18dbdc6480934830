use crate::error::{AppError, Result};
use crate::report::{CellValue, FormatEdit, Row};
use crate::sheets::{
    CreatedFile, DriveOperations, FileMetadata, SheetOperations, SpreadsheetHandle, Worksheet,
};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Call {
    CreateFile,
    Load,
    AddSheet,
    AddRows,
    AddRow,
    LoadCells,
    SaveUpdatedCells,
}

/// In-memory stand-in for Drive and Sheets. Rows land in `grid`, format
/// edits in `saved_edits`.
#[derive(Clone)]
pub(crate) struct MockGoogleClient {
    pub created_id: Option<String>,
    pub fail_on: Option<Call>,
    /// Rows silently dropped by `add_rows`, to simulate a short write.
    pub drop_rows: bool,
    pub calls: Arc<Mutex<Vec<Call>>>,
    pub created_files: Arc<Mutex<Vec<FileMetadata>>>,
    pub grid: Arc<Mutex<Vec<Row>>>,
    pub saved_edits: Arc<Mutex<Vec<Vec<FormatEdit>>>>,
    pub loaded_ranges: Arc<Mutex<Vec<String>>>,
}

impl MockGoogleClient {
    pub(crate) fn new(id: &str) -> Self {
        Self {
            created_id: Some(id.to_string()),
            fail_on: None,
            drop_rows: false,
            calls: Arc::new(Mutex::new(Vec::new())),
            created_files: Arc::new(Mutex::new(Vec::new())),
            grid: Arc::new(Mutex::new(Vec::new())),
            saved_edits: Arc::new(Mutex::new(Vec::new())),
            loaded_ranges: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn failing_on(id: &str, call: Call) -> Self {
        Self {
            fail_on: Some(call),
            ..Self::new(id)
        }
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        match self.fail_on {
            Some(failing) if failing == call => Err(AppError::RemoteOperation(format!(
                "simulated failure in {:?}",
                call
            ))),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl DriveOperations for MockGoogleClient {
    async fn create_file(&self, metadata: &FileMetadata) -> Result<CreatedFile> {
        self.record(Call::CreateFile)?;
        self.created_files.lock().unwrap().push(metadata.clone());
        Ok(CreatedFile {
            id: self.created_id.clone(),
        })
    }
}

#[async_trait]
impl SheetOperations for MockGoogleClient {
    async fn load(&self, spreadsheet_id: &str) -> Result<SpreadsheetHandle> {
        self.record(Call::Load)?;
        Ok(SpreadsheetHandle {
            id: spreadsheet_id.to_string(),
            title: "mock spreadsheet".to_string(),
        })
    }

    async fn add_sheet(
        &self,
        _handle: &SpreadsheetHandle,
        title: &str,
        header: &[String],
    ) -> Result<Worksheet> {
        self.record(Call::AddSheet)?;
        let header_row = header.iter().cloned().map(CellValue::Text).collect();
        self.grid.lock().unwrap().push(header_row);
        Ok(Worksheet {
            sheet_id: 99,
            title: title.to_string(),
        })
    }

    async fn add_rows(
        &self,
        _handle: &SpreadsheetHandle,
        _worksheet: &Worksheet,
        rows: &[Row],
    ) -> Result<()> {
        self.record(Call::AddRows)?;
        if !self.drop_rows {
            self.grid.lock().unwrap().extend_from_slice(rows);
        }
        Ok(())
    }

    async fn add_row(
        &self,
        _handle: &SpreadsheetHandle,
        _worksheet: &Worksheet,
        row: &Row,
    ) -> Result<()> {
        self.record(Call::AddRow)?;
        if !self.drop_rows {
            self.grid.lock().unwrap().push(row.clone());
        }
        Ok(())
    }

    async fn load_cells(
        &self,
        _handle: &SpreadsheetHandle,
        _worksheet: &Worksheet,
        range: &str,
    ) -> Result<usize> {
        self.record(Call::LoadCells)?;
        self.loaded_ranges.lock().unwrap().push(range.to_string());
        Ok(self.grid.lock().unwrap().len())
    }

    async fn save_updated_cells(
        &self,
        _handle: &SpreadsheetHandle,
        _worksheet: &Worksheet,
        edits: &[FormatEdit],
    ) -> Result<()> {
        self.record(Call::SaveUpdatedCells)?;
        self.saved_edits.lock().unwrap().push(edits.to_vec());
        Ok(())
    }
}
