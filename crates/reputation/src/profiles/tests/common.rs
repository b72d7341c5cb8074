use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};

use crate::profiles::domain::{EvaluationRequest, UserId};
use crate::profiles::repository::{RepositoryError, ScoreRecord, ScoreRepository};
use crate::profiles::sources::{MessagingPayloads, ProfileSources, SourceError};
use crate::profiles::ReputationService;
use crate::scoring::{ReputationEngine, ScoringRules};

pub(super) fn as_of() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
        .single()
        .expect("valid instant")
}

pub(super) fn social_payload() -> Value {
    json!({
        "result": {
            "is_blue_verified": true,
            "creator_subscriptions_count": 1,
            "legacy": {
                "created_at": "Wed May 15 14:22:15 +0000 2019",
                "followers_count": 1500,
                "statuses_count": 1200,
                "favourites_count": 3000,
                "retweet_count": 120
            }
        }
    })
}

/// Crypto 30.5 and NFT 20 under the standard weights.
pub(super) fn wallet_payload() -> Value {
    json!({
        "Native Balance Result": 0.5,
        "Token Balances Result": [{}, {}, {}],
        "Active Chains Result": { "activeChains": ["ethereum", "polygon"] },
        "Wallet NFTs Result": [{}, {}, {}, {}],
        "Transaction Count": 150,
        "Unique Token Interactions": 8
    })
}

pub(super) fn messaging_payloads() -> MessagingPayloads {
    MessagingPayloads {
        groups: json!({
            "items": [
                { "sourceData": { "permissions": { "can_pin_messages": true, "can_send_polls": true } } },
                { "sourceData": {} }
            ]
        }),
        messages: json!({
            "items": [
                { "sourceData": { "is_pinned": true, "content": { "_": "messagePhoto" } } },
                { "sourceData": { "content": { "_": "messageText" } } }
            ]
        }),
    }
}

pub(super) fn request() -> EvaluationRequest {
    EvaluationRequest {
        user_id: UserId("did:privy:alice".to_string()),
        email: Some("alice@example.com".to_string()),
        social_handle: Some("alice".to_string()),
        wallet_addresses: vec!["0xprimary".to_string(), "0xsecondary".to_string()],
        messaging_account: Some("alice-tg".to_string()),
    }
}

/// Sources backed by fixed payloads. A `None` payload fails that fetch.
pub(super) struct MemorySources {
    pub(super) social: Option<Value>,
    pub(super) wallet: Option<Value>,
    pub(super) messaging: Option<MessagingPayloads>,
    calls: Mutex<Vec<String>>,
}

impl MemorySources {
    pub(super) fn complete() -> Self {
        Self {
            social: Some(social_payload()),
            wallet: Some(wallet_payload()),
            messaging: Some(messaging_payloads()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn offline() -> Self {
        Self {
            social: None,
            wallet: None,
            messaging: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn calls(&self) -> Vec<String> {
        let mut calls = self.calls.lock().expect("calls mutex poisoned").clone();
        calls.sort();
        calls
    }

    fn record(&self, call: String) {
        self.calls.lock().expect("calls mutex poisoned").push(call);
    }
}

fn unavailable(domain: &'static str) -> SourceError {
    SourceError::Unavailable {
        domain,
        reason: "connection refused".to_string(),
    }
}

impl ProfileSources for MemorySources {
    async fn social(&self, handle: &str) -> Result<Value, SourceError> {
        self.record(format!("social:{handle}"));
        self.social.clone().ok_or_else(|| unavailable("social"))
    }

    async fn wallet(&self, address: &str) -> Result<Value, SourceError> {
        self.record(format!("wallet:{address}"));
        self.wallet.clone().ok_or_else(|| unavailable("wallet"))
    }

    async fn messaging(&self, account: &str) -> Result<MessagingPayloads, SourceError> {
        self.record(format!("messaging:{account}"));
        self.messaging.clone().ok_or_else(|| unavailable("messaging"))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    records: Arc<Mutex<HashMap<UserId, ScoreRecord>>>,
}

impl ScoreRepository for MemoryRepository {
    fn fetch(&self, user_id: &UserId) -> Result<Option<ScoreRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(user_id).cloned())
    }

    fn save(&self, record: ScoreRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.user_id.clone(), record);
        Ok(())
    }
}

pub(super) struct UnavailableRepository;

impl ScoreRepository for UnavailableRepository {
    fn fetch(&self, _user_id: &UserId) -> Result<Option<ScoreRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn save(&self, _record: ScoreRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) type MemoryService = ReputationService<MemorySources, MemoryRepository>;

pub(super) fn build_service(
    sources: MemorySources,
) -> (MemoryService, Arc<MemorySources>, MemoryRepository) {
    let sources = Arc::new(sources);
    let repository = MemoryRepository::default();
    let service = ReputationService::new(
        sources.clone(),
        Arc::new(repository.clone()),
        ReputationEngine::new(ScoringRules::standard()),
    );
    (service, sources, repository)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("valid json")
}
