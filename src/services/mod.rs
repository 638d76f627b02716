//! Spreadsheet access: the remote Google Sheets client and its in-memory
//! stand-in for tests.

pub mod google;
pub mod memory;
pub mod sheets;

pub use google::GoogleSheetClient;
pub use memory::MemorySheetClient;
pub use sheets::{Row, SheetClient, SheetError, Worksheet};
