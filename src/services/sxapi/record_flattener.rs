// Record flattening
// One input row becomes one field operation per non-key column

use crate::error::{Result, SxApiError};
use crate::models::{FieldOperation, Row, UpdateMode};
use crate::services::sxapi::import_kind::KeyColumns;

/// `(key1, key2)` of a row. `key2` is empty when the secondary column is
/// absent; `key1` is empty only for kinds that do not require it.
///
/// `row_number` is the 1-based position used in `MissingKey` errors.
pub fn extract_keys(row: &Row, keys: &KeyColumns, row_number: usize) -> Result<(String, String)> {
    let key1 = match row.text(keys.primary) {
        Some(key) => key,
        None if keys.primary_required => {
            return Err(SxApiError::MissingKey {
                column: keys.primary.to_string(),
                row: row_number,
            })
        }
        None => String::new(),
    };

    let key2 = keys
        .secondary
        .and_then(|column| row.text(column))
        .unwrap_or_default();

    Ok((key1, key2))
}

/// Expand `row` into its field operations for set `set_no`.
///
/// Non-key columns are emitted in row order with `seq_no` counting from 1
/// among emitted fields; field names are lower-cased and every operation
/// carries `update_mode`.
pub fn flatten(
    row: &Row,
    keys: &KeyColumns,
    set_no: u32,
    update_mode: UpdateMode,
) -> Result<Vec<FieldOperation>> {
    let (key1, key2) = extract_keys(row, keys, set_no as usize)?;

    Ok(row
        .iter()
        .filter(|(column, _)| !keys.is_key(column))
        .zip(1u32..)
        .map(|((column, value), seq_no)| FieldOperation {
            field_name: column.to_lowercase(),
            field_value: value.clone(),
            key1: key1.clone(),
            key2: key2.clone(),
            seq_no,
            set_no,
            update_mode,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::sxapi::ImportKind;
    use serde_json::json;

    fn product_keys() -> KeyColumns {
        ImportKind::Product.key_columns()
    }

    #[test]
    fn test_flatten_without_secondary_key() {
        let row = Row::from_pairs([
            ("prod", "A1"),
            ("StndCost", "10.00"),
            ("descrip", "Widget"),
            ("lifo", "N"),
        ]);

        let ops = flatten(&row, &product_keys(), 4, UpdateMode::Add).unwrap();

        assert_eq!(ops.len(), row.len() - 1);
        for (idx, op) in ops.iter().enumerate() {
            assert_eq!(op.key1, "A1");
            assert_eq!(op.key2, "");
            assert_eq!(op.set_no, 4);
            assert_eq!(op.seq_no, idx as u32 + 1);
            assert_eq!(op.update_mode, UpdateMode::Add);
        }
        let names: Vec<&str> = ops.iter().map(|op| op.field_name.as_str()).collect();
        assert_eq!(names, vec!["stndcost", "descrip", "lifo"]);
    }

    #[test]
    fn test_flatten_skips_key_columns_anywhere_in_row() {
        let row = Row::from_pairs([
            ("stndcost", "10.00"),
            ("whse", "100P"),
            ("prod", "A1"),
            ("listprice", "12.00"),
        ]);

        let ops = flatten(&row, &product_keys(), 1, UpdateMode::Change).unwrap();

        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].field_name, "stndcost");
        assert_eq!(ops[0].seq_no, 1);
        assert_eq!(ops[1].field_name, "listprice");
        assert_eq!(ops[1].seq_no, 2);
        assert!(ops.iter().all(|op| op.key1 == "A1" && op.key2 == "100P"));
    }

    #[test]
    fn test_flatten_passes_values_through() {
        let row = Row::from_pairs([("prod", json!("A1")), ("qty", json!(5))]);
        let ops = flatten(&row, &product_keys(), 1, UpdateMode::Change).unwrap();
        assert_eq!(ops[0].field_value, json!(5));
    }

    #[test]
    fn test_missing_primary_key() {
        let row = Row::from_pairs([("whse", "100P"), ("stndcost", "10.00")]);
        let err = flatten(&row, &product_keys(), 7, UpdateMode::Add).unwrap_err();
        assert!(matches!(err, SxApiError::MissingKey { ref column, row: 7 } if column == "prod"));
    }

    #[test]
    fn test_optional_primary_key_defaults_to_empty() {
        let row = Row::from_pairs([("prod", "A1"), ("price", "3.50")]);
        let ops = flatten(&row, &ImportKind::Pricing.key_columns(), 2, UpdateMode::Add).unwrap();

        assert_eq!(ops.len(), 2);
        assert!(ops.iter().all(|op| op.key1.is_empty() && op.key2.is_empty()));
    }

    #[test]
    fn test_row_with_only_keys_yields_nothing() {
        let row = Row::from_pairs([("prod", "A1"), ("whse", "100P")]);
        assert!(flatten(&row, &product_keys(), 1, UpdateMode::Add).unwrap().is_empty());
    }

    #[test]
    fn test_flatten_is_deterministic() {
        let row = Row::from_pairs([("custno", "1001"), ("shipto", "2"), ("slsrepout", "SR1")]);
        let keys = ImportKind::Customer.key_columns();
        assert_eq!(
            flatten(&row, &keys, 3, UpdateMode::Change).unwrap(),
            flatten(&row, &keys, 3, UpdateMode::Change).unwrap()
        );
    }
}
