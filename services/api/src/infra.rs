use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use reputation::profiles::{
    MessagingPayloads, ProfileSources, RepositoryError, ScoreRecord, ScoreRepository,
    SourceError, UserId,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::debug;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryScoreRepository {
    records: Arc<Mutex<HashMap<UserId, ScoreRecord>>>,
}

fn poisoned<T>(_: T) -> RepositoryError {
    RepositoryError::Unavailable("repository mutex poisoned".to_string())
}

impl ScoreRepository for InMemoryScoreRepository {
    fn fetch(&self, user_id: &UserId) -> Result<Option<ScoreRecord>, RepositoryError> {
        let guard = self.records.lock().map_err(poisoned)?;
        Ok(guard.get(user_id).cloned())
    }

    fn save(&self, record: ScoreRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().map_err(poisoned)?;
        guard.insert(record.user_id.clone(), record);
        Ok(())
    }
}

/// Payload source reading `<root>/{social,wallet,messaging}/<id>.json`.
///
/// Messaging fixtures hold `{ "groups": ..., "messages": ... }`. Without a
/// root every fetch reports the source as unavailable.
#[derive(Debug, Clone, Default)]
pub(crate) struct FixtureSources {
    root: Option<PathBuf>,
}

impl FixtureSources {
    pub(crate) fn new(root: Option<PathBuf>) -> Self {
        Self { root }
    }

    fn fixture_path(&self, domain: &'static str, id: &str) -> Result<PathBuf, SourceError> {
        let root = self.root.as_ref().ok_or_else(|| SourceError::Unavailable {
            domain,
            reason: "no fixture directory configured".to_string(),
        })?;

        let safe = !id.is_empty()
            && id != "."
            && id != ".."
            && !id.contains(['/', '\\'])
            && !id.contains("..");
        if !safe {
            return Err(SourceError::Malformed {
                domain,
                reason: format!("identifier '{id}' cannot name a fixture"),
            });
        }

        Ok(root.join(domain).join(format!("{id}.json")))
    }

    async fn load<T>(&self, domain: &'static str, id: &str) -> Result<T, SourceError>
    where
        T: DeserializeOwned,
    {
        let path = self.fixture_path(domain, id)?;
        let raw = read_fixture(&path).await.map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                SourceError::NotFound {
                    domain,
                    id: id.to_string(),
                }
            } else {
                SourceError::Unavailable {
                    domain,
                    reason: err.to_string(),
                }
            }
        })?;
        debug!(domain, path = %path.display(), "loaded fixture");
        serde_json::from_str(&raw).map_err(|err| SourceError::Malformed {
            domain,
            reason: err.to_string(),
        })
    }
}

async fn read_fixture(path: &Path) -> std::io::Result<String> {
    tokio::fs::read_to_string(path).await
}

impl ProfileSources for FixtureSources {
    async fn social(&self, handle: &str) -> Result<Value, SourceError> {
        self.load("social", handle).await
    }

    async fn wallet(&self, address: &str) -> Result<Value, SourceError> {
        self.load("wallet", address).await
    }

    async fn messaging(&self, account: &str) -> Result<MessagingPayloads, SourceError> {
        self.load("messaging", account).await
    }
}

/// Accepts RFC 3339 instants or bare `YYYY-MM-DD` dates (midnight UTC).
pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| format!("failed to parse '{raw}' as RFC 3339 or YYYY-MM-DD"))
}
