use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Whether the ERP should create the keyed record or modify an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateMode {
    #[serde(rename = "add")]
    Add,
    #[serde(rename = "chg")]
    Change,
}

impl UpdateMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateMode::Add => "add",
            UpdateMode::Change => "chg",
        }
    }

    /// `chg` for a record the ERP already has, `add` otherwise.
    pub fn for_existing(exists: bool) -> Self {
        if exists {
            UpdateMode::Change
        } else {
            UpdateMode::Add
        }
    }
}

impl std::fmt::Display for UpdateMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field update inside a maintenance (`t-mnt-tt`) payload.
///
/// `set_no` identifies the input row, `seq_no` the field's position within it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldOperation {
    pub field_name: String,
    pub field_value: Value,
    pub key1: String,
    pub key2: String,
    pub seq_no: u32,
    pub set_no: u32,
    pub update_mode: UpdateMode,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_operation_wire_shape() {
        let op = FieldOperation {
            field_name: "stndcost".to_string(),
            field_value: json!("57.05"),
            key1: "AME1715100".to_string(),
            key2: "200P".to_string(),
            seq_no: 1,
            set_no: 2,
            update_mode: UpdateMode::Change,
        };

        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({
                "fieldName": "stndcost",
                "fieldValue": "57.05",
                "key1": "AME1715100",
                "key2": "200P",
                "seqNo": 1,
                "setNo": 2,
                "updateMode": "chg"
            })
        );
    }

    #[test]
    fn test_update_mode_for_existing() {
        assert_eq!(UpdateMode::for_existing(true), UpdateMode::Change);
        assert_eq!(UpdateMode::for_existing(false), UpdateMode::Add);
        assert_eq!(UpdateMode::Add.to_string(), "add");
    }
}
