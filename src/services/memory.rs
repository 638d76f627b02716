//! In-memory stand-in for the remote spreadsheet.
//!
//! Same contract as the Google client, no network. Failure injection per
//! pipeline stage lets tests exercise every error path of the handlers.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::{Row, SheetClient, SheetError, Worksheet};

#[derive(Clone, Default)]
pub struct MemorySheetClient {
    inner: Arc<Mutex<MemorySheet>>,
}

#[derive(Default)]
struct MemorySheet {
    rows: Vec<(String, String)>,
    fail_connect: bool,
    fail_fetch: bool,
    fail_mutation: bool,
}

impl MemorySheetClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<(String, String)>) -> Self {
        let client = Self::default();
        client.lock().rows = rows;
        client
    }

    pub fn fail_connect(&self, fail: bool) {
        self.lock().fail_connect = fail;
    }

    pub fn fail_fetch(&self, fail: bool) {
        self.lock().fail_fetch = fail;
    }

    pub fn fail_mutation(&self, fail: bool) {
        self.lock().fail_mutation = fail;
    }

    /// Current sheet contents, in row order.
    pub fn snapshot(&self) -> Vec<(String, String)> {
        self.lock().rows.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemorySheet> {
        self.inner.lock().expect("sheet lock poisoned")
    }
}

#[async_trait]
impl SheetClient for MemorySheetClient {
    async fn connect(&self) -> Result<Box<dyn Worksheet>, SheetError> {
        if self.lock().fail_connect {
            return Err(SheetError::Unavailable("connect refused".to_string()));
        }
        Ok(Box::new(MemoryWorksheet {
            inner: self.inner.clone(),
        }))
    }
}

struct MemoryWorksheet {
    inner: Arc<Mutex<MemorySheet>>,
}

impl MemoryWorksheet {
    fn lock(&self) -> std::sync::MutexGuard<'_, MemorySheet> {
        self.inner.lock().expect("sheet lock poisoned")
    }
}

// Data rows share the real sheet's convention: row 1 is the header, so the
// backing vector index is row_number - 2.
#[async_trait]
impl Worksheet for MemoryWorksheet {
    async fn rows(&self) -> Result<Vec<Row>, SheetError> {
        let sheet = self.lock();
        if sheet.fail_fetch {
            return Err(SheetError::Unavailable("fetch refused".to_string()));
        }
        Ok(sheet
            .rows
            .iter()
            .enumerate()
            .map(|(i, (key, value))| Row {
                row_number: i as u32 + 2,
                key: key.clone(),
                value: value.clone(),
            })
            .collect())
    }

    async fn update_value(&self, row: &Row, value: &str) -> Result<(), SheetError> {
        let mut sheet = self.lock();
        if sheet.fail_mutation {
            return Err(SheetError::Unavailable("update refused".to_string()));
        }
        let idx = row.row_number.saturating_sub(2) as usize;
        match sheet.rows.get_mut(idx) {
            Some(slot) => {
                slot.1 = value.to_string();
                Ok(())
            }
            None => Err(SheetError::Api {
                status: 400,
                message: format!("row {} out of range", row.row_number),
            }),
        }
    }

    async fn append(&self, key: &str, value: &str) -> Result<(), SheetError> {
        let mut sheet = self.lock();
        if sheet.fail_mutation {
            return Err(SheetError::Unavailable("append refused".to_string()));
        }
        sheet.rows.push((key.to_string(), value.to_string()));
        Ok(())
    }

    async fn delete(&self, row: &Row) -> Result<(), SheetError> {
        let mut sheet = self.lock();
        if sheet.fail_mutation {
            return Err(SheetError::Unavailable("delete refused".to_string()));
        }
        let idx = row.row_number.saturating_sub(2) as usize;
        if idx >= sheet.rows.len() {
            return Err(SheetError::Api {
                status: 400,
                message: format!("row {} out of range", row.row_number),
            });
        }
        sheet.rows.remove(idx);
        Ok(())
    }
}
