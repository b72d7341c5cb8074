use super::metrics::{DomainMetrics, MetricKey, MetricRecord, SourceDomain};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Discrete badge level, ordered from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BadgeTier {
    Silver,
    Gold,
    Platinum,
}

impl BadgeTier {
    pub fn label(&self) -> &'static str {
        match self {
            BadgeTier::Silver => "Silver",
            BadgeTier::Gold => "Gold",
            BadgeTier::Platinum => "Platinum",
        }
    }
}

impl fmt::Display for BadgeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Silver, gold, and platinum cutoffs. Serialized as a three-element array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 3]", into = "[f64; 3]")]
pub struct Thresholds {
    silver: f64,
    gold: f64,
    platinum: f64,
}

impl Thresholds {
    /// Cutoffs must be finite and non-decreasing. Equal cutoffs are allowed so
    /// flag badges (`[1, 1, 1]`) go straight to platinum.
    pub fn new(silver: f64, gold: f64, platinum: f64) -> Result<Self, ThresholdError> {
        if !(silver.is_finite() && gold.is_finite() && platinum.is_finite()) {
            return Err(ThresholdError::NonFinite);
        }
        if silver > gold || gold > platinum {
            return Err(ThresholdError::Descending {
                silver,
                gold,
                platinum,
            });
        }
        Ok(Self {
            silver,
            gold,
            platinum,
        })
    }

    pub fn silver(&self) -> f64 {
        self.silver
    }

    pub fn gold(&self) -> f64 {
        self.gold
    }

    pub fn platinum(&self) -> f64 {
        self.platinum
    }

    /// Highest tier whose cutoff `value` meets, checking platinum first.
    pub fn tier_for(&self, value: f64) -> Option<BadgeTier> {
        if value >= self.platinum {
            Some(BadgeTier::Platinum)
        } else if value >= self.gold {
            Some(BadgeTier::Gold)
        } else if value >= self.silver {
            Some(BadgeTier::Silver)
        } else {
            None
        }
    }
}

impl TryFrom<[f64; 3]> for Thresholds {
    type Error = ThresholdError;

    fn try_from([silver, gold, platinum]: [f64; 3]) -> Result<Self, Self::Error> {
        Self::new(silver, gold, platinum)
    }
}

impl From<Thresholds> for [f64; 3] {
    fn from(value: Thresholds) -> Self {
        [value.silver, value.gold, value.platinum]
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ThresholdError {
    #[error("badge thresholds must be finite numbers")]
    NonFinite,
    #[error("badge thresholds must not descend (silver {silver}, gold {gold}, platinum {platinum})")]
    Descending {
        silver: f64,
        gold: f64,
        platinum: f64,
    },
}

/// Tier earned and the raw metric value that earned it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeAward {
    pub tier: BadgeTier,
    pub raw_value: f64,
}

/// Award the highest tier `value` reaches, or nothing below silver.
pub fn assign(value: f64, thresholds: &Thresholds) -> Option<BadgeAward> {
    thresholds.tier_for(value).map(|tier| BadgeAward {
        tier,
        raw_value: value,
    })
}

/// Formula turning a metric record into a badge's input value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BadgeInput {
    Metric(MetricKey),
    Ratio { metric: MetricKey, divisor: f64 },
    Sum(&'static [MetricKey]),
    /// `base` plus `bonus` when `flag` is set.
    Boosted {
        base: MetricKey,
        flag: MetricKey,
        bonus: f64,
    },
    /// `metric` divided by `years`; an age of zero counts as one year.
    PerYear { metric: MetricKey, years: MetricKey },
}

impl BadgeInput {
    /// `None` signals a local failure: a missing metric or a non-finite result.
    pub fn compute(&self, record: &MetricRecord) -> Option<f64> {
        let value = match *self {
            BadgeInput::Metric(key) => record.number(key)?,
            BadgeInput::Ratio { metric, divisor } => {
                if divisor == 0.0 {
                    return None;
                }
                record.number(metric)? / divisor
            }
            BadgeInput::Sum(keys) => keys
                .iter()
                .map(|key| record.number(*key))
                .sum::<Option<f64>>()?,
            BadgeInput::Boosted { base, flag, bonus } => {
                let boost = if record.number(flag)? > 0.0 { bonus } else { 0.0 };
                record.number(base)? + boost
            }
            BadgeInput::PerYear { metric, years } => {
                let years = record.number(years)?;
                let years = if years > 0.0 { years } else { 1.0 };
                record.number(metric)? / years
            }
        };
        value.is_finite().then_some(value)
    }
}

/// Canonical badge entry: one name, one input formula, one default threshold.
#[derive(Debug, Clone, Copy)]
pub struct BadgeDefinition {
    pub name: &'static str,
    pub domain: SourceDomain,
    pub input: BadgeInput,
    pub thresholds: [f64; 3],
}

const fn badge(
    name: &'static str,
    domain: SourceDomain,
    input: BadgeInput,
    thresholds: [f64; 3],
) -> BadgeDefinition {
    BadgeDefinition {
        name,
        domain,
        input,
        thresholds,
    }
}

use BadgeInput::{Boosted, Metric, PerYear, Ratio, Sum};
use MetricKey as K;
use SourceDomain::{Messaging as Msg, Social, Wallet};

#[rustfmt::skip]
pub const BADGE_CATALOG: &[BadgeDefinition] = &[
    badge("Influence Investor", Social, Metric(K::Followers), [1_000_000.0, 5_000_000.0, 10_000_000.0]),
    badge("Tweet Trader", Social, Ratio { metric: K::Statuses, divisor: 100.0 }, [5.0, 10.0, 20.0]),
    badge("Engagement Economist", Social, Metric(K::Favourites), [1_000.0, 5_000.0, 10_000.0]),
    badge("Media Mogul", Social, Metric(K::Media), [100.0, 500.0, 1_000.0]),
    badge("List Legend", Social, Metric(K::Listed), [100.0, 500.0, 1_000.0]),
    badge("Verified Visionary", Social, Metric(K::Verified), [1.0, 1.0, 1.0]),
    badge("Pinned Post Pro", Social, Metric(K::Pinned), [1.0, 1.0, 1.0]),
    badge("Super Follower", Social, Metric(K::SuperFollow), [1.0, 1.0, 1.0]),
    badge("Creator Subscriber", Social, Metric(K::Subscriptions), [5.0, 10.0, 20.0]),
    badge("Twitter Veteran", Social, Metric(K::AccountAge), [5.0, 10.0, 15.0]),
    badge("Retweet Riches", Social, Metric(K::Retweets), [100.0, 500.0, 1_000.0]),
    badge("Crypto Communicator", Social, Ratio { metric: K::Statuses, divisor: 100.0 }, [50.0, 100.0, 200.0]),
    badge("Social Connector", Social, Metric(K::Friends), [1_000.0, 5_000.0, 10_000.0]),
    badge("Engagement Star", Social, Sum(&[K::Favourites, K::Retweets]), [2_000.0, 10_000.0, 20_000.0]),
    badge("Fast Grower", Social, PerYear { metric: K::Followers, years: K::AccountAge }, [100_000.0, 500_000.0, 1_000_000.0]),
    badge("Viral Validator", Social, Metric(K::Retweets), [500.0, 2_000.0, 5_000.0]),
    badge("Chain Explorer", Wallet, Metric(K::ActiveChains), [2.0, 5.0, 10.0]),
    badge("Token Holder", Wallet, Metric(K::TokenHoldings), [5.0, 20.0, 50.0]),
    badge("NFT Networker", Wallet, Metric(K::NftHoldings), [1.0, 5.0, 10.0]),
    badge("DeFi Drifter", Wallet, Metric(K::DefiPositions), [1.0, 3.0, 5.0]),
    badge("Gas Spender", Wallet, Metric(K::GasSpent), [100.0, 500.0, 1_000.0]),
    badge("Staking Veteran", Wallet, Metric(K::StakingPositions), [1.0, 3.0, 5.0]),
    badge("Airdrop Veteran", Wallet, Metric(K::Airdrops), [1.0, 5.0, 10.0]),
    badge("DAO Diplomat", Wallet, Metric(K::DaoVotes), [1.0, 5.0, 10.0]),
    badge("Web3 Domain Owner", Wallet, Metric(K::Web3Domains), [1.0, 1.0, 1.0]),
    badge("Degen Dualist", Wallet, Metric(K::TransactionCount), [10_000.0, 50_000.0, 100_000.0]),
    badge("Transaction Titan", Wallet, Metric(K::TransactionCount), [100.0, 500.0, 1_000.0]),
    badge("Token Interactor", Wallet, Metric(K::UniqueTokenInteractions), [10.0, 50.0, 100.0]),
    badge("NFT Whale", Wallet, Metric(K::NftHoldings), [10.0, 50.0, 100.0]),
    badge("DeFi Master", Wallet, Metric(K::DefiPositions), [5.0, 10.0, 20.0]),
    badge("Bridge Blazer", Wallet, Metric(K::ActiveChains), [5.0, 10.0, 20.0]),
    badge("Social HODLer", Wallet, Metric(K::NativeBalance), [1.0, 10.0, 50.0]),
    badge("Liquidity Laureate", Wallet, Metric(K::DefiPositions), [1.0, 3.0, 5.0]),
    badge("Group Guru", Msg, Metric(K::GroupCount), [5.0, 10.0, 20.0]),
    badge("Message Maestro", Msg, Metric(K::MessageCount), [100.0, 500.0, 1_000.0]),
    badge("Pinned Message Master", Msg, Metric(K::PinnedMessages), [1.0, 5.0, 10.0]),
    badge("Media Messenger", Msg, Metric(K::MediaMessages), [10.0, 50.0, 100.0]),
    badge("Hashtag Hero", Msg, Metric(K::Hashtags), [10.0, 50.0, 100.0]),
    badge("Poll Creator", Msg, Metric(K::Polls), [1.0, 5.0, 10.0]),
    badge("Community Leader", Msg, Metric(K::AdminGroups), [1.0, 3.0, 5.0]),
    badge("Bot Interactor", Msg, Metric(K::BotInteractions), [10.0, 50.0, 100.0]),
    badge("Sticker Star", Msg, Metric(K::StickerMessages), [10.0, 50.0, 100.0]),
    badge("GIF Guru", Msg, Metric(K::GifMessages), [10.0, 50.0, 100.0]),
    badge("Mention Magnet", Msg, Metric(K::MentionCount), [10.0, 50.0, 100.0]),
    badge("Telegram Titan", Msg, Boosted { base: K::MessageCount, flag: K::Polls, bonus: 1_000.0 }, [500.0, 1_000.0, 2_000.0]),
    badge("Governance Griot", Msg, Sum(&[K::Polls, K::Leadership]), [2.0, 5.0, 10.0]),
    badge("Dapp Diplomat", Msg, Metric(K::BotInteractions), [50.0, 100.0, 200.0]),
];

pub fn definition(name: &str) -> Option<&'static BadgeDefinition> {
    BADGE_CATALOG.iter().find(|definition| definition.name == name)
}

/// Badge name to cutoffs. Badges missing from the table are never awarded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BadgeThresholdTable(BTreeMap<String, Thresholds>);

impl BadgeThresholdTable {
    /// Thresholds straight from [`BADGE_CATALOG`].
    pub fn standard() -> Self {
        Self(
            BADGE_CATALOG
                .iter()
                .filter_map(|definition| {
                    let [silver, gold, platinum] = definition.thresholds;
                    Thresholds::new(silver, gold, platinum)
                        .ok()
                        .map(|thresholds| (definition.name.to_string(), thresholds))
                })
                .collect(),
        )
    }

    pub fn get(&self, badge: &str) -> Option<&Thresholds> {
        self.0.get(badge)
    }

    pub fn insert(&mut self, badge: impl Into<String>, thresholds: Thresholds) {
        self.0.insert(badge.into(), thresholds);
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Evaluate every catalog badge independently.
///
/// A badge whose input cannot be computed is skipped without affecting the
/// others.
pub(crate) fn assign_badges(
    metrics: &DomainMetrics,
    thresholds: &BadgeThresholdTable,
) -> BTreeMap<String, BadgeAward> {
    BADGE_CATALOG
        .iter()
        .filter_map(|definition| {
            let cutoffs = thresholds.get(definition.name)?;
            let Some(value) = definition.input.compute(metrics.record(definition.domain)) else {
                tracing::debug!(badge = definition.name, "badge input unavailable");
                return None;
            };
            assign(value, cutoffs).map(|award| (definition.name.to_string(), award))
        })
        .collect()
}
