use std::path::PathBuf;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use tokio::{io::AsyncWriteExt, sync::OnceCell};

use crate::{
    errors::{AppError, AppResult},
    models::domain::Response,
};

/// A destination for recorded responses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResponseSink: Send + Sync {
    fn name(&self) -> &'static str;
    async fn append(&self, response: &Response) -> AppResult<()>;
}

#[derive(Debug, Default, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

/// Appends rows through a spreadsheet values API
/// (`.../spreadsheets/{id}/values/{sheet}`), writing the header row first
/// when the sheet is empty. Concurrent first appends share one header check.
pub struct SheetsResponseSink {
    client: reqwest::Client,
    values_url: String,
    token: SecretString,
    header_checked: OnceCell<()>,
}

impl SheetsResponseSink {
    pub fn new(values_url: String, token: SecretString) -> Self {
        Self {
            client: reqwest::Client::new(),
            values_url: values_url.trim_end_matches('/').to_string(),
            token,
            header_checked: OnceCell::new(),
        }
    }

    async fn ensure_header(&self) -> AppResult<()> {
        self.header_checked
            .get_or_try_init(|| async {
                let first_row: ValueRange = self
                    .client
                    .get(format!("{}!1:1", self.values_url))
                    .bearer_auth(self.token.expose_secret())
                    .send()
                    .await?
                    .error_for_status()?
                    .json()
                    .await?;

                if first_row.values.iter().all(|row| row.is_empty()) {
                    log::info!("Response sheet is empty, writing header row");
                    self.append_row(Response::HEADER.iter().map(|h| h.to_string()).collect())
                        .await?;
                }
                Ok::<(), AppError>(())
            })
            .await?;
        Ok(())
    }

    async fn append_row(&self, row: Vec<String>) -> AppResult<()> {
        self.client
            .post(format!("{}:append", self.values_url))
            .query(&[
                ("valueInputOption", "RAW"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .bearer_auth(self.token.expose_secret())
            .json(&json!({ "values": [row] }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[async_trait]
impl ResponseSink for SheetsResponseSink {
    fn name(&self) -> &'static str {
        "sheets"
    }

    async fn append(&self, response: &Response) -> AppResult<()> {
        self.ensure_header().await?;
        self.append_row(response.to_row()).await
    }
}

/// Local durable log: one JSON object per line.
pub struct JsonlBackupSink {
    path: PathBuf,
}

impl JsonlBackupSink {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl ResponseSink for JsonlBackupSink {
    fn name(&self) -> &'static str {
        "local_backup"
    }

    async fn append(&self, response: &Response) -> AppResult<()> {
        let mut line = serde_json::to_string(response)
            .map_err(|e| AppError::PersistenceError(format!("Cannot encode response: {}", e)))?;
        line.push('\n');

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| {
                AppError::PersistenceError(format!("Cannot open {}: {}", self.path.display(), e))
            })?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| AppError::PersistenceError(format!("Cannot write backup: {}", e)))?;
        file.flush()
            .await
            .map_err(|e| AppError::PersistenceError(format!("Cannot flush backup: {}", e)))?;
        Ok(())
    }
}
