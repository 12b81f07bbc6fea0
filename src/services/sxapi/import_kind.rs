use serde::{Deserialize, Serialize};

use crate::models::{Row, UpdateMode};

/// How an import decides between `add` and `chg` for a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatePolicy {
    /// Ask the ERP whether the keyed record exists (one lookup per row).
    ResolveExistence,
    /// Every row modifies an existing record.
    AlwaysChange,
    /// `chg` when the primary key column is present and non-empty, else `add`.
    ChangeWhenKeyPresent,
}

/// Key column names of an import kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyColumns {
    pub primary: &'static str,
    pub secondary: Option<&'static str>,
    /// A row without the primary column is rejected with `MissingKey`.
    pub primary_required: bool,
}

impl KeyColumns {
    pub fn is_key(&self, column: &str) -> bool {
        column == self.primary || self.secondary == Some(column)
    }
}

/// The entity families the maintenance calls can import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportKind {
    /// Products (ICSP) and warehouse products (ICSW), keyed `prod` / `whse`.
    Product,
    /// Customers and ship-tos, keyed `custno` / `shipto`.
    Customer,
    /// Pricing records, keyed `pdrecno`.
    Pricing,
}

impl ImportKind {
    pub fn key_columns(&self) -> KeyColumns {
        match self {
            ImportKind::Product => KeyColumns { primary: "prod", secondary: Some("whse"), primary_required: true },
            ImportKind::Customer => KeyColumns { primary: "custno", secondary: Some("shipto"), primary_required: true },
            ImportKind::Pricing => KeyColumns { primary: "pdrecno", secondary: None, primary_required: false },
        }
    }

    pub fn update_policy(&self) -> UpdatePolicy {
        match self {
            ImportKind::Product => UpdatePolicy::ResolveExistence,
            ImportKind::Customer => UpdatePolicy::AlwaysChange,
            ImportKind::Pricing => UpdatePolicy::ChangeWhenKeyPresent,
        }
    }

    /// SXAPI maintenance function the flattened operations are sent to.
    pub fn maintenance_function(&self) -> &'static str {
        match self {
            ImportKind::Product => "sxapiicproductmnt",
            ImportKind::Customer => "sxapiarcustomermnt",
            ImportKind::Pricing => "sxapipdpricingmnt",
        }
    }

    /// Label used in the request log summary lines.
    pub fn log_label(&self) -> &'static str {
        match self {
            ImportKind::Product => "ICProductMnt",
            ImportKind::Customer => "ARCustomerMnt",
            ImportKind::Pricing => "PDPricingMnt",
        }
    }

    /// Update mode for policies that need no remote lookup.
    ///
    /// Returns `None` for `ResolveExistence`, which the pipeline decides with
    /// the existence resolver instead.
    pub fn static_update_mode(&self, row: &Row) -> Option<UpdateMode> {
        match self.update_policy() {
            UpdatePolicy::ResolveExistence => None,
            UpdatePolicy::AlwaysChange => Some(UpdateMode::Change),
            UpdatePolicy::ChangeWhenKeyPresent => {
                let key_present = row
                    .text(self.key_columns().primary)
                    .map_or(false, |key| !key.is_empty());
                Some(UpdateMode::for_existing(key_present))
            }
        }
    }
}

impl std::fmt::Display for ImportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportKind::Product => write!(f, "product"),
            ImportKind::Customer => write!(f, "customer"),
            ImportKind::Pricing => write!(f, "pricing"),
        }
    }
}
