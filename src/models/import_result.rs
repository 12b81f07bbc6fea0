use serde::{Deserialize, Serialize};

/// Separator the SXAPI uses for multi-value message strings.
pub const MULTI_VALUE_DELIMITER: char = '|';

/// Accumulated outcome of a maintenance import across all of its batches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResult {
    #[serde(rename = "ErrorMessage")]
    pub error_message: Vec<String>,
    #[serde(rename = "ReturnData")]
    pub return_data: Vec<String>,
}

impl ImportResult {
    /// Append one batch's raw `cErrorMessage` / `returnData` strings.
    ///
    /// Null or empty fields contribute nothing. Non-empty fields are split on
    /// `|` with empty segments kept, so `"A||B"` yields three entries.
    pub fn absorb(&mut self, error_message: Option<&str>, return_data: Option<&str>) {
        if let Some(errors) = error_message.filter(|s| !s.is_empty()) {
            self.error_message.extend(split_multi_value(errors));
        }
        if let Some(data) = return_data.filter(|s| !s.is_empty()) {
            self.return_data.extend(split_multi_value(data));
        }
    }

    pub fn merge(&mut self, other: ImportResult) {
        self.error_message.extend(other.error_message);
        self.return_data.extend(other.return_data);
    }

    pub fn has_errors(&self) -> bool {
        !self.error_message.is_empty()
    }
}

pub fn split_multi_value(raw: &str) -> impl Iterator<Item = String> + '_ {
    raw.split(MULTI_VALUE_DELIMITER).map(str::to_string)
}
