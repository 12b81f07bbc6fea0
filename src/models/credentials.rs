use serde::{Deserialize, Serialize};

/// Operator identity passed through on every SXAPI call.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub company_number: u32,
    pub operator_init: String,
    pub operator_password: String,
}

impl Credentials {
    pub fn new(
        company_number: u32,
        operator_init: impl Into<String>,
        operator_password: impl Into<String>,
    ) -> Self {
        Self {
            company_number,
            operator_init: operator_init.into(),
            operator_password: operator_password.into(),
        }
    }
}

// Keep the password out of `{:?}` output.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("company_number", &self.company_number)
            .field("operator_init", &self.operator_init)
            .field("operator_password", &"[REDACTED]")
            .finish()
    }
}
