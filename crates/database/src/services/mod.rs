pub mod dashboard;
pub mod grade;
pub mod schedule;

use serde::Serialize;

/// A row of a bulk import that was not written
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowError {
    /// 1-based position of the row in the submitted batch
    pub row: usize,
    pub message: String,
}

/// Outcome of a bulk import
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportSummary {
    pub inserted: usize,
    pub updated: usize,
    pub skipped: Vec<RowError>,
}

impl ImportSummary {
    fn skip(&mut self, row: usize, message: impl Into<String>) {
        self.skipped.push(RowError {
            row,
            message: message.into(),
        });
    }

    pub fn processed(&self) -> usize {
        self.inserted + self.updated + self.skipped.len()
    }
}
