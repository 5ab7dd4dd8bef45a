//! Record fetcher backed by JSON files, one per title

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize};

use super::{FetchOutcome, RecordFetcher};
use crate::{
    error::{HoldingsError, HoldingsResult},
    models::{RawHoldingRecord, RawItemAvailability, RawSerialSubscription},
};

/// Reads `<dir>/<title>.json`:
///
/// ```json
/// { "items": [...], "holdings": [...], "serials": [...] }
/// ```
///
/// A missing file or section is reported as [`FetchOutcome::NotFound`].
#[derive(Debug, Clone)]
pub struct JsonFileFetcher {
    dir: PathBuf,
}

#[derive(Debug, Deserialize)]
struct TitleFile {
    #[serde(default)]
    items: Option<serde_json::Value>,
    #[serde(default)]
    holdings: Option<serde_json::Value>,
    #[serde(default)]
    serials: Option<serde_json::Value>,
}

impl JsonFileFetcher {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, title_id: &str) -> HoldingsResult<PathBuf> {
        let valid = !title_id.is_empty()
            && title_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !title_id.starts_with('.');
        if !valid {
            return Err(HoldingsError::Fetch(format!("Invalid title id '{}'", title_id)));
        }
        Ok(self.dir.join(format!("{}.json", title_id)))
    }

    async fn read_title(&self, title_id: &str) -> HoldingsResult<Option<TitleFile>> {
        let path = self.path_for(title_id)?;
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No fixture for title {} at {}", title_id, path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        let file = serde_json::from_str(&content)
            .map_err(|e| HoldingsError::Fetch(format!("Invalid fixture {}: {}", path.display(), e)))?;
        Ok(Some(file))
    }

    async fn section<T, F>(&self, title_id: &str, pick: F) -> HoldingsResult<FetchOutcome<T>>
    where
        T: DeserializeOwned,
        F: FnOnce(TitleFile) -> Option<serde_json::Value>,
    {
        let Some(section) = self.read_title(title_id).await?.and_then(pick) else {
            return Ok(FetchOutcome::NotFound);
        };
        let records = serde_json::from_value(section)
            .map_err(|e| HoldingsError::Fetch(format!("Invalid records for title {}: {}", title_id, e)))?;
        Ok(FetchOutcome::Found(records))
    }
}

#[async_trait]
impl RecordFetcher for JsonFileFetcher {
    async fn fetch_item_availabilities(
        &self,
        title_id: &str,
    ) -> HoldingsResult<FetchOutcome<RawItemAvailability>> {
        self.section(title_id, |f| f.items).await
    }

    async fn fetch_holding_records(&self, title_id: &str) -> HoldingsResult<FetchOutcome<RawHoldingRecord>> {
        self.section(title_id, |f| f.holdings).await
    }

    async fn fetch_serial_subscriptions(
        &self,
        title_id: &str,
    ) -> HoldingsResult<FetchOutcome<RawSerialSubscription>> {
        self.section(title_id, |f| f.serials).await
    }
}
