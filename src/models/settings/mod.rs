// Settings module
// Row budget configuration for a date content row

use serde::{Deserialize, Serialize};

/// Row budget and header configuration.
///
/// `max_rows` counts every visible row, including the one reserved for the
/// "+N more" indicator; `None` means unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RowSettings {
    pub min_rows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rows: Option<usize>,
    pub show_header: bool,
}

impl Default for RowSettings {
    fn default() -> Self {
        Self {
            min_rows: 0,
            max_rows: None,
            show_header: true,
        }
    }
}

impl RowSettings {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(max_rows) = self.max_rows {
            if max_rows == 0 {
                return Err("max_rows must be at least 1".to_string());
            }
            if self.min_rows > max_rows {
                return Err(format!(
                    "min_rows ({}) cannot exceed max_rows ({})",
                    self.min_rows, max_rows
                ));
            }
        }
        Ok(())
    }

    /// Upper bound on levels, `usize::MAX` when unbounded
    pub fn max_rows_or_unbounded(&self) -> usize {
        self.max_rows.unwrap_or(usize::MAX)
    }
}
