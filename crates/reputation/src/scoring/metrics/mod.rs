//! Flat metric records extracted from raw provider payloads.
//!
//! Each source domain owns a fixed key set. Extraction always fills every key
//! of its domain, so downstream scoring and badge rules can rely on presence.

mod field;
pub mod messaging;
pub mod social;
pub mod wallet;

pub use messaging::extract_messaging;
pub use social::extract_social;
pub use wallet::extract_wallet;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Independent input source contributing to an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceDomain {
    Social,
    Wallet,
    Messaging,
}

impl SourceDomain {
    pub fn label(&self) -> &'static str {
        match self {
            SourceDomain::Social => "social",
            SourceDomain::Wallet => "wallet",
            SourceDomain::Messaging => "messaging",
        }
    }
}

/// Every metric the extractors produce.
///
/// Declaration order is the iteration order of a [`MetricRecord`] and therefore
/// the summation order used by the scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricKey {
    Followers,
    Friends,
    Statuses,
    Favourites,
    Media,
    Listed,
    Retweets,
    Quotes,
    Replies,
    Engagement,
    Verified,
    Pinned,
    SuperFollow,
    Subscriptions,
    AccountAge,
    EngagementRatio,

    ActiveChains,
    NativeBalance,
    TokenHoldings,
    NftHoldings,
    DefiPositions,
    Web3Domains,
    TransactionCount,
    UniqueTokenInteractions,
    GasSpent,
    StakingPositions,
    Airdrops,
    DaoVotes,

    GroupCount,
    MessageCount,
    PinnedMessages,
    MediaMessages,
    Hashtags,
    Polls,
    Leadership,
    AdminGroups,
    BotInteractions,
    StickerMessages,
    GifMessages,
    MentionCount,
}

impl MetricKey {
    /// Name used by weight tables and JSON output.
    pub fn name(&self) -> &'static str {
        match self {
            MetricKey::Followers => "followers",
            MetricKey::Friends => "friends",
            MetricKey::Statuses => "statuses",
            MetricKey::Favourites => "favourites",
            MetricKey::Media => "media",
            MetricKey::Listed => "listed",
            MetricKey::Retweets => "retweets",
            MetricKey::Quotes => "quotes",
            MetricKey::Replies => "replies",
            MetricKey::Engagement => "engagement",
            MetricKey::Verified => "verified",
            MetricKey::Pinned => "pinned",
            MetricKey::SuperFollow => "superFollow",
            MetricKey::Subscriptions => "subscriptions",
            MetricKey::AccountAge => "accountAge",
            MetricKey::EngagementRatio => "engagementRatio",
            MetricKey::ActiveChains => "activeChains",
            MetricKey::NativeBalance => "nativeBalance",
            MetricKey::TokenHoldings => "tokenHoldings",
            MetricKey::NftHoldings => "nftHoldings",
            MetricKey::DefiPositions => "defiPositions",
            MetricKey::Web3Domains => "web3Domains",
            MetricKey::TransactionCount => "transactionCount",
            MetricKey::UniqueTokenInteractions => "uniqueTokenInteractions",
            MetricKey::GasSpent => "gasSpent",
            MetricKey::StakingPositions => "stakingPositions",
            MetricKey::Airdrops => "airdrops",
            MetricKey::DaoVotes => "daoVotes",
            MetricKey::GroupCount => "groupCount",
            MetricKey::MessageCount => "messageCount",
            MetricKey::PinnedMessages => "pinnedMessages",
            MetricKey::MediaMessages => "mediaMessages",
            MetricKey::Hashtags => "hashtags",
            MetricKey::Polls => "polls",
            MetricKey::Leadership => "leadership",
            MetricKey::AdminGroups => "adminGroups",
            MetricKey::BotInteractions => "botInteractions",
            MetricKey::StickerMessages => "stickerMessages",
            MetricKey::GifMessages => "gifMessages",
            MetricKey::MentionCount => "mentionCount",
        }
    }

    pub fn domain(&self) -> SourceDomain {
        use MetricKey::*;
        match self {
            Followers | Friends | Statuses | Favourites | Media | Listed | Retweets | Quotes
            | Replies | Engagement | Verified | Pinned | SuperFollow | Subscriptions
            | AccountAge | EngagementRatio => SourceDomain::Social,
            ActiveChains | NativeBalance | TokenHoldings | NftHoldings | DefiPositions
            | Web3Domains | TransactionCount | UniqueTokenInteractions | GasSpent
            | StakingPositions | Airdrops | DaoVotes => SourceDomain::Wallet,
            GroupCount | MessageCount | PinnedMessages | MediaMessages | Hashtags | Polls
            | Leadership | AdminGroups | BotInteractions | StickerMessages | GifMessages
            | MentionCount => SourceDomain::Messaging,
        }
    }
}

/// Numeric or boolean reading for a single metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Flag(bool),
}

impl MetricValue {
    /// Flags contribute `1.0` when set so they can be weighted like counts.
    pub fn as_f64(&self) -> f64 {
        match self {
            MetricValue::Number(value) => *value,
            MetricValue::Flag(true) => 1.0,
            MetricValue::Flag(false) => 0.0,
        }
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<usize> for MetricValue {
    fn from(value: usize) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for MetricValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

/// Ordered metric readings for one or more source domains.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricRecord {
    values: BTreeMap<MetricKey, MetricValue>,
}

impl MetricRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: MetricKey, value: impl Into<MetricValue>) {
        self.values.insert(key, value.into());
    }

    pub fn get(&self, key: MetricKey) -> Option<MetricValue> {
        self.values.get(&key).copied()
    }

    /// Numeric view of a metric, `None` when the key was never extracted.
    pub fn number(&self, key: MetricKey) -> Option<f64> {
        self.get(key).map(|value| value.as_f64())
    }

    pub fn iter(&self) -> impl Iterator<Item = (MetricKey, MetricValue)> + '_ {
        self.values.iter().map(|(key, value)| (*key, *value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Union of several records; later records win on key collisions.
    pub fn merged<'a>(records: impl IntoIterator<Item = &'a MetricRecord>) -> MetricRecord {
        let mut merged = MetricRecord::new();
        for record in records {
            merged
                .values
                .extend(record.values.iter().map(|(key, value)| (*key, *value)));
        }
        merged
    }
}

/// Extracted records for all three source domains of one evaluation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainMetrics {
    pub social: MetricRecord,
    pub wallet: MetricRecord,
    pub messaging: MetricRecord,
}

impl DomainMetrics {
    pub fn record(&self, domain: SourceDomain) -> &MetricRecord {
        match domain {
            SourceDomain::Social => &self.social,
            SourceDomain::Wallet => &self.wallet,
            SourceDomain::Messaging => &self.messaging,
        }
    }
}
