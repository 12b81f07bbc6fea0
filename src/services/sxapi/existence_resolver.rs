// Existence checks
// Decide whether a keyed ERP record already exists, one lookup per call, no caching

use serde::{Deserialize, Serialize};

use crate::error::{Result, SxApiError};
use crate::models::Credentials;
use crate::services::sxapi::client::SxApiClient;
use crate::services::sxapi::transport::Transport;
use crate::utils::log_sanitizer::sanitize_for_log;

pub const PRODUCT_LIST_FUNCTION: &str = "sxapiicgetproductlistv2";
pub const WAREHOUSE_PRODUCT_FUNCTION: &str = "sxapiicgetwhseproductdatageneralv2";

/// Error text the warehouse product lookup returns for a product/warehouse
/// pair that does not exist. Any other error text is a failure.
pub const WAREHOUSE_PRODUCT_NOT_SET_UP: &str =
    "Product/Warehouse Not Set Up in Warehouse Products - ICSW (4602)";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProductListRequest<'a> {
    product_code: &'a str,
}

#[derive(Debug, Serialize)]
struct WarehouseProductRequest<'a> {
    product: &'a str,
    whse: &'a str,
}

#[derive(Debug, Deserialize)]
struct ProductListResponse {
    #[serde(rename = "tProdv2", default)]
    t_prodv2: Option<ProductTable>,
}

#[derive(Debug, Deserialize)]
struct ProductTable {
    #[serde(rename = "t-prodv2", default)]
    rows: Option<Vec<ProductListRow>>,
}

#[derive(Debug, Deserialize)]
struct ProductListRow {
    #[serde(default)]
    prod: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WarehouseProductResponse {
    #[serde(rename = "cErrorMessage", default)]
    c_error_message: Option<String>,
}

impl<T: Transport> SxApiClient<T> {
    /// True iff the product list lookup for `product` returns `product` itself.
    pub async fn exists_by_primary(&self, product: &str, credentials: Option<&Credentials>) -> Result<bool> {
        let credentials = self.resolve_credentials(credentials)?;

        let response: ProductListResponse = self
            .call(PRODUCT_LIST_FUNCTION, credentials, ProductListRequest { product_code: product })
            .await?;

        let exists = response
            .t_prodv2
            .and_then(|table| table.rows)
            .unwrap_or_default()
            .iter()
            .any(|row| row.prod.as_deref() == Some(product));

        tracing::debug!("Product {} exists: {}", sanitize_for_log(product), exists);
        Ok(exists)
    }

    /// True iff `product` is set up in `warehouse`.
    ///
    /// The "not set up" error text means false; any other non-empty error
    /// text fails with `Validation`.
    pub async fn exists_by_primary_secondary(
        &self,
        product: &str,
        warehouse: &str,
        credentials: Option<&Credentials>,
    ) -> Result<bool> {
        let credentials = self.resolve_credentials(credentials)?;

        let response: WarehouseProductResponse = self
            .call(
                WAREHOUSE_PRODUCT_FUNCTION,
                credentials,
                WarehouseProductRequest { product, whse: warehouse },
            )
            .await?;

        match response.c_error_message.as_deref().unwrap_or_default() {
            "" => Ok(true),
            WAREHOUSE_PRODUCT_NOT_SET_UP => Ok(false),
            other => {
                tracing::error!(
                    "Warehouse product check for {}/{} failed: {}",
                    sanitize_for_log(product),
                    sanitize_for_log(warehouse),
                    sanitize_for_log(other)
                );
                Err(SxApiError::Validation(format!(
                    "cannot validate ICSW record {}/{}: {}",
                    product, warehouse, other
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SxApiConfig;
    use crate::services::sxapi::transport::testing::ScriptedTransport;
    use serde_json::json;

    fn client(transport: ScriptedTransport) -> SxApiClient<ScriptedTransport> {
        SxApiClient::with_transport(
            SxApiConfig::new("http://sx/").with_default_credentials(Credentials::new(1, "atst", "pw")),
            transport,
        )
    }

    fn warehouse_reply(message: &str) -> serde_json::Value {
        json!({"response": {"cErrorMessage": message}})
    }

    #[tokio::test]
    async fn test_product_found_in_list() {
        let transport = ScriptedTransport::new().respond(json!({
            "response": {"tProdv2": {"t-prodv2": [{"prod": "A10"}, {"prod": "A1"}]}}
        }));
        let client = client(transport);

        assert!(client.exists_by_primary("A1", None).await.unwrap());

        let calls = client.transport().calls();
        assert_eq!(calls[0].0, PRODUCT_LIST_FUNCTION);
        assert_eq!(calls[0].1["request"]["productCode"], "A1");
    }

    #[tokio::test]
    async fn test_product_list_requires_exact_match() {
        let transport = ScriptedTransport::new()
            .respond(json!({"response": {"tProdv2": {"t-prodv2": [{"prod": "A10"}]}}}))
            .respond(json!({"response": {"tProdv2": {"t-prodv2": []}}}))
            .respond(json!({"response": {"tProdv2": null}}));
        let client = client(transport);

        assert!(!client.exists_by_primary("A1", None).await.unwrap());
        assert!(!client.exists_by_primary("A1", None).await.unwrap());
        assert!(!client.exists_by_primary("A1", None).await.unwrap());
    }

    #[tokio::test]
    async fn test_warehouse_not_set_up_is_false() {
        let client = client(ScriptedTransport::new().respond(warehouse_reply(WAREHOUSE_PRODUCT_NOT_SET_UP)));
        assert!(!client.exists_by_primary_secondary("A1", "100P", None).await.unwrap());

        let body = &client.transport().calls()[0].1;
        assert_eq!(body["request"]["product"], "A1");
        assert_eq!(body["request"]["whse"], "100P");
    }

    #[tokio::test]
    async fn test_warehouse_empty_message_is_true() {
        let client = client(ScriptedTransport::new().respond(warehouse_reply("")));
        assert!(client.exists_by_primary_secondary("A1", "100P", None).await.unwrap());
    }

    #[tokio::test]
    async fn test_warehouse_missing_message_is_true() {
        let client = client(ScriptedTransport::new().respond(json!({"response": {}})));
        assert!(client.exists_by_primary_secondary("A1", "100P", None).await.unwrap());
    }

    #[tokio::test]
    async fn test_warehouse_other_message_is_validation_error() {
        let client = client(ScriptedTransport::new().respond(warehouse_reply("Invalid Warehouse (4601)")));
        let err = client.exists_by_primary_secondary("A1", "ZZZ", None).await.unwrap_err();
        assert!(matches!(err, SxApiError::Validation(ref msg) if msg.contains("Invalid Warehouse")));
    }

    #[tokio::test]
    async fn test_each_check_is_a_round_trip() {
        let transport = ScriptedTransport::new()
            .respond(warehouse_reply(""))
            .respond(warehouse_reply(""));
        let client = client(transport);

        client.exists_by_primary_secondary("A1", "100P", None).await.unwrap();
        client.exists_by_primary_secondary("A1", "100P", None).await.unwrap();

        assert_eq!(client.transport().calls().len(), 2);
    }
}
