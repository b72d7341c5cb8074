use std::future::Future;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::domain::EvaluationRequest;
use crate::scoring::DomainPayloads;

/// Group and message containers fetched from the messaging platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessagingPayloads {
    #[serde(default)]
    pub groups: Value,
    #[serde(default)]
    pub messages: Value,
}

/// Upstream providers for the three payload domains.
///
/// Implementations own transport concerns; the collector only cares whether a
/// fetch produced a payload.
pub trait ProfileSources: Send + Sync {
    fn social(&self, handle: &str) -> impl Future<Output = Result<Value, SourceError>> + Send;

    fn wallet(&self, address: &str) -> impl Future<Output = Result<Value, SourceError>> + Send;

    fn messaging(
        &self,
        account: &str,
    ) -> impl Future<Output = Result<MessagingPayloads, SourceError>> + Send;
}

/// Fetch failure for one source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("no {domain} profile found for '{id}'")]
    NotFound { domain: &'static str, id: String },
    #[error("{domain} source unavailable: {reason}")]
    Unavailable { domain: &'static str, reason: String },
    #[error("{domain} source returned malformed data: {reason}")]
    Malformed { domain: &'static str, reason: String },
}

/// Fetch all three domains concurrently. Missing identifiers skip their fetch;
/// failed fetches are logged and replaced by an empty payload.
pub async fn collect_payloads<S>(sources: &S, request: &EvaluationRequest) -> DomainPayloads
where
    S: ProfileSources,
{
    let social = async {
        match request.social_handle() {
            Some(handle) => sources.social(handle).await.map(Some),
            None => Ok(None),
        }
    };
    let wallet = async {
        match request.primary_wallet() {
            Some(address) => sources.wallet(address).await.map(Some),
            None => Ok(None),
        }
    };
    let messaging = async {
        match request.messaging_account() {
            Some(account) => sources.messaging(account).await.map(Some),
            None => Ok(None),
        }
    };

    let (social, wallet, messaging) = tokio::join!(social, wallet, messaging);
    let user = request.user_id.as_str();

    let social = settle(user, "social", social).unwrap_or(Value::Null);
    let wallet = settle(user, "wallet", wallet).unwrap_or(Value::Null);
    let messaging = settle(user, "messaging", messaging).unwrap_or_default();

    DomainPayloads {
        social,
        wallet,
        messaging_groups: messaging.groups,
        messaging_messages: messaging.messages,
    }
}

fn settle<T>(user: &str, domain: &str, outcome: Result<Option<T>, SourceError>) -> Option<T> {
    match outcome {
        Ok(Some(payload)) => Some(payload),
        Ok(None) => {
            debug!(user, domain, "no identifier supplied; skipping fetch");
            None
        }
        Err(err) => {
            warn!(user, domain, error = %err, "source fetch failed; using empty payload");
            None
        }
    }
}
