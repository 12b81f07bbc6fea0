/// Batch maintenance import
/// Rows are resolved to add/chg, flattened into field operations, chunked and
/// sent to the kind's maintenance function one batch at a time

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SxApiError};
use crate::models::{Credentials, FieldOperation, ImportResult, Row, UpdateMode};
use crate::services::sxapi::client::SxApiClient;
use crate::services::sxapi::import_kind::{ImportKind, KeyColumns};
use crate::services::sxapi::record_flattener::{extract_keys, flatten};
use crate::services::sxapi::transport::Transport;
use crate::utils::log_sanitizer::sanitize_for_log;

#[derive(Debug, Serialize)]
struct MaintenanceRequest<'a> {
    #[serde(rename = "tMntTt")]
    t_mnt_tt: MaintenanceTable<'a>,
}

#[derive(Debug, Serialize)]
struct MaintenanceTable<'a> {
    #[serde(rename = "t-mnt-tt")]
    operations: &'a [FieldOperation],
}

#[derive(Debug, Deserialize)]
struct MaintenanceResponse {
    #[serde(rename = "cErrorMessage", default)]
    c_error_message: Option<String>,
    #[serde(rename = "returnData", default)]
    return_data: Option<String>,
}

/// Contiguous, order-preserving slices of at most `size` items.
///
/// Operations are chunked by count only, so one row's fields may straddle two
/// batches.
pub fn chunk<T>(items: &[T], size: usize) -> std::slice::Chunks<'_, T> {
    items.chunks(size)
}

impl<T: Transport> SxApiClient<T> {
    /// Run a full maintenance import using the configured chunk size.
    pub async fn import_records<I>(
        &self,
        kind: ImportKind,
        rows: I,
        credentials: Option<&Credentials>,
    ) -> Result<ImportResult>
    where
        I: IntoIterator,
        I::Item: Borrow<Row>,
    {
        self.import_records_chunked(kind, rows, credentials, self.config().chunk_size)
            .await
    }

    /// Run a full maintenance import with an explicit batch size.
    ///
    /// Any resolver, key or transport failure aborts the import; batches sent
    /// before the failure stay applied on the ERP side.
    pub async fn import_records_chunked<I>(
        &self,
        kind: ImportKind,
        rows: I,
        credentials: Option<&Credentials>,
        chunk_size: usize,
    ) -> Result<ImportResult>
    where
        I: IntoIterator,
        I::Item: Borrow<Row>,
    {
        if chunk_size == 0 {
            return Err(SxApiError::ConfigError("chunk_size must be at least 1".to_string()));
        }
        let credentials = self.resolve_credentials(credentials)?;

        let operations = self.build_operations(kind, rows, Some(credentials)).await?;
        self.send_batches(kind, &operations, credentials, chunk_size).await
    }

    /// Resolve each row's update mode and flatten it, in input order.
    pub async fn build_operations<I>(
        &self,
        kind: ImportKind,
        rows: I,
        credentials: Option<&Credentials>,
    ) -> Result<Vec<FieldOperation>>
    where
        I: IntoIterator,
        I::Item: Borrow<Row>,
    {
        let keys = kind.key_columns();
        let mut operations = Vec::new();

        for (set_no, row) in (1u32..).zip(rows) {
            let row = row.borrow();
            let update_mode = match kind.static_update_mode(row) {
                Some(mode) => mode,
                None => self.resolve_update_mode(row, &keys, set_no, credentials).await?,
            };

            operations.extend(flatten(row, &keys, set_no, update_mode)?);
        }

        Ok(operations)
    }

    /// `chg` when the ERP already has the row's record, `add` otherwise.
    /// A non-empty secondary key scopes the lookup to that warehouse.
    async fn resolve_update_mode(
        &self,
        row: &Row,
        keys: &KeyColumns,
        set_no: u32,
        credentials: Option<&Credentials>,
    ) -> Result<UpdateMode> {
        let (key1, key2) = extract_keys(row, keys, set_no as usize)?;

        let exists = if key2.is_empty() {
            self.exists_by_primary(&key1, credentials).await?
        } else {
            self.exists_by_primary_secondary(&key1, &key2, credentials).await?
        };

        Ok(UpdateMode::for_existing(exists))
    }

    /// Send `operations` in batches of `chunk_size`, merging every batch's
    /// messages into one result in batch order.
    pub async fn send_batches(
        &self,
        kind: ImportKind,
        operations: &[FieldOperation],
        credentials: &Credentials,
        chunk_size: usize,
    ) -> Result<ImportResult> {
        if chunk_size == 0 {
            return Err(SxApiError::ConfigError("chunk_size must be at least 1".to_string()));
        }

        let function = kind.maintenance_function();
        let total_batches = operations.len().div_ceil(chunk_size);
        let mut result = ImportResult::default();

        tracing::info!(
            "Starting {} import: {} field operations in {} batches",
            kind,
            operations.len(),
            total_batches
        );

        for (batch_idx, batch) in chunk(operations, chunk_size).enumerate() {
            tracing::info!(
                "Sending {} batch {}/{} ({} operations)",
                function,
                batch_idx + 1,
                total_batches,
                batch.len()
            );

            let response: MaintenanceResponse = self
                .call(
                    function,
                    credentials,
                    MaintenanceRequest {
                        t_mnt_tt: MaintenanceTable { operations: batch },
                    },
                )
                .await?;

            if let Some(errors) = response.c_error_message.as_deref().filter(|s| !s.is_empty()) {
                tracing::warn!("{} batch {} reported errors: {}", function, batch_idx + 1, sanitize_for_log(errors));
            }

            result.absorb(response.c_error_message.as_deref(), response.return_data.as_deref());

            if let Some(log) = self.request_log() {
                log.summary(kind.log_label(), &serde_json::to_value(&result)?);
            }
        }

        tracing::info!(
            "{} import completed: {} error messages, {} return data entries",
            kind,
            result.error_message.len(),
            result.return_data.len()
        );

        Ok(result)
    }

    /// Product (ICSP/ICSW) import through `sxapiicproductmnt`.
    pub async fn item_import<I>(&self, rows: I, credentials: Option<&Credentials>) -> Result<ImportResult>
    where
        I: IntoIterator,
        I::Item: Borrow<Row>,
    {
        self.import_records(ImportKind::Product, rows, credentials).await
    }

    /// Customer import through `sxapiarcustomermnt`; every row is a change.
    pub async fn customer_import<I>(&self, rows: I, credentials: Option<&Credentials>) -> Result<ImportResult>
    where
        I: IntoIterator,
        I::Item: Borrow<Row>,
    {
        self.import_records(ImportKind::Customer, rows, credentials).await
    }

    /// Pricing record import through `sxapipdpricingmnt`.
    pub async fn pricing_import<I>(&self, rows: I, credentials: Option<&Credentials>) -> Result<ImportResult>
    where
        I: IntoIterator,
        I::Item: Borrow<Row>,
    {
        self.import_records(ImportKind::Pricing, rows, credentials).await
    }
}
