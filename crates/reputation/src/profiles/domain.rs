use serde::{Deserialize, Serialize};

/// Identifier wrapper for scored users.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifiers needed to gather one user's payloads. Absent identifiers skip
/// the matching source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub user_id: UserId,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub social_handle: Option<String>,
    #[serde(default)]
    pub wallet_addresses: Vec<String>,
    #[serde(default)]
    pub messaging_account: Option<String>,
}

impl EvaluationRequest {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: UserId(user_id.into()),
            email: None,
            social_handle: None,
            wallet_addresses: Vec::new(),
            messaging_account: None,
        }
    }

    pub fn validate(&self) -> Result<(), RequestError> {
        if self.user_id.0.trim().is_empty() {
            return Err(RequestError::MissingUserId);
        }
        if let Some(email) = present(&self.email) {
            if !looks_like_email(email) {
                return Err(RequestError::InvalidEmail(email.to_string()));
            }
        }
        Ok(())
    }

    /// First non-blank wallet address; it receives the crypto and NFT score.
    pub fn primary_wallet(&self) -> Option<&str> {
        self.wallets().next()
    }

    /// Non-blank wallet addresses, trimmed, in request order.
    pub fn wallets(&self) -> impl Iterator<Item = &str> {
        self.wallet_addresses
            .iter()
            .map(|address| address.trim())
            .filter(|address| !address.is_empty())
    }

    pub fn social_handle(&self) -> Option<&str> {
        present(&self.social_handle)
    }

    pub fn messaging_account(&self) -> Option<&str> {
        present(&self.messaging_account)
    }

    pub fn email(&self) -> Option<&str> {
        present(&self.email)
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .map(|(host, tld)| !host.is_empty() && !tld.is_empty())
                    .unwrap_or(false)
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

/// Request validation failures.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("user_id must not be blank")]
    MissingUserId,
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
}
