// Pricing Query
// One sxapioepricing lookup per input row, reshaped into PriceQuote records

use std::borrow::Borrow;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, SxApiError};
use crate::models::{Credentials, PriceQuote, PricingDefaults, PricingOutcome, Row};
use crate::services::sxapi::client::SxApiClient;
use crate::services::sxapi::transport::Transport;

pub const PRICING_FUNCTION: &str = "sxapioepricing";

const PRODUCT_COLUMN: &str = "prod";
const UNIT_COLUMN: &str = "unit";
const QUANTITY_COLUMN: &str = "qty";
const DEFAULT_UNIT: &str = "each";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PricingRequest<'a> {
    customer_number: &'a str,
    ship_to: &'a str,
    warehouse: &'a str,
    quantity: Value,
    product_code: &'a str,
    unit_of_measure: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PricingResponse {
    #[serde(default)]
    price: Option<Decimal>,
    #[serde(default)]
    discount_amount: Option<Decimal>,
    #[serde(default)]
    discount_type: Option<String>,
    #[serde(default)]
    net_available: Option<Decimal>,
}

/// Customer, ship-to and warehouse actually sent, after configured defaults
/// replace blank (or `"0"`) caller values.
fn pricing_scope<'a>(
    defaults: &'a PricingDefaults,
    customer_number: &'a str,
    ship_to: &'a str,
    warehouse: &'a str,
) -> (&'a str, &'a str, &'a str) {
    let blank = |value: &str| value.trim().is_empty() || value.trim() == "0";

    let customer_number = match &defaults.customer_number {
        Some(default) if blank(customer_number) => default.as_str(),
        _ => customer_number,
    };
    let ship_to = match &defaults.ship_to {
        Some(default) if blank(ship_to) => default.as_str(),
        _ => ship_to,
    };
    let warehouse = match &defaults.warehouse {
        Some(default) if warehouse.trim().is_empty() => default.as_str(),
        _ => warehouse,
    };

    (customer_number, ship_to, warehouse)
}

impl<T: Transport> SxApiClient<T> {
    /// Price every row for one customer/ship-to/warehouse.
    ///
    /// Rows carry `prod` and optionally `unit` (default `each`) and `qty`
    /// (default 1). A single row yields `PricingOutcome::Single`.
    pub async fn get_prices<I>(
        &self,
        rows: I,
        customer_number: &str,
        ship_to: &str,
        warehouse: &str,
        credentials: Option<&Credentials>,
    ) -> Result<PricingOutcome>
    where
        I: IntoIterator,
        I::Item: Borrow<Row>,
    {
        let credentials = self.resolve_credentials(credentials)?;
        let (customer_number, ship_to, warehouse) =
            pricing_scope(&self.config().pricing_defaults, customer_number, ship_to, warehouse);

        let mut quotes = Vec::new();

        for (idx, row) in rows.into_iter().enumerate() {
            let row = row.borrow();

            let product_code = row.text(PRODUCT_COLUMN).ok_or_else(|| SxApiError::MissingKey {
                column: PRODUCT_COLUMN.to_string(),
                row: idx + 1,
            })?;
            let unit = row.text(UNIT_COLUMN).unwrap_or_else(|| DEFAULT_UNIT.to_string());
            let quantity = row.get(QUANTITY_COLUMN).cloned().unwrap_or_else(|| Value::from(1));

            let response: PricingResponse = self
                .call(
                    PRICING_FUNCTION,
                    credentials,
                    PricingRequest {
                        customer_number,
                        ship_to,
                        warehouse,
                        quantity,
                        product_code: &product_code,
                        unit_of_measure: &unit,
                    },
                )
                .await?;

            quotes.push(PriceQuote {
                product_code,
                price: response.price,
                discount_amount: response.discount_amount,
                discount_type: response.discount_type.unwrap_or_default(),
                net_available: response.net_available,
            });
        }

        tracing::info!("Priced {} products for customer {}", quotes.len(), customer_number);

        Ok(PricingOutcome::from_quotes(quotes))
    }
}
