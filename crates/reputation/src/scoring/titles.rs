use super::badges::BadgeAward;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Title returned when no requirement set is fully satisfied.
pub const DEFAULT_TITLE: &str = "All Rounder";

/// Named title earned by holding every badge in `required`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleRule {
    pub title: String,
    pub required: Vec<String>,
}

impl TitleRule {
    pub fn new(title: &str, required: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            required: required.iter().map(|badge| badge.to_string()).collect(),
        }
    }

    /// Empty requirement sets never match; they would shadow every later rule.
    pub fn is_satisfied_by(&self, badges: &BTreeMap<String, BadgeAward>) -> bool {
        !self.required.is_empty() && self.required.iter().all(|badge| badges.contains_key(badge))
    }
}

/// Ordered title list; earlier entries take precedence.
pub fn standard_titles() -> Vec<TitleRule> {
    vec![
        TitleRule::new(
            "Crypto Connoisseur",
            &["Crypto Communicator", "Social Connector", "Liquidity Laureate", "Telegram Titan"],
        ),
        TitleRule::new(
            "Blockchain Baron",
            &["DeFi Master", "Liquidity Laureate", "Governance Griot", "Staking Veteran", "Gas Spender"],
        ),
        TitleRule::new(
            "Digital Dynamo",
            &["Twitter Veteran", "Fast Grower", "Engagement Star", "Verified Visionary", "Degen Dualist"],
        ),
        TitleRule::new("DeFi Dynamo", &["DeFi Master", "Airdrop Veteran", "Dapp Diplomat"]),
        TitleRule::new("NFT Aficionado", &["NFT Networker", "NFT Whale"]),
        TitleRule::new(
            "Social Savant",
            &[
                "Crypto Communicator",
                "Social Connector",
                "Twitter Veteran",
                "Engagement Economist",
                "Retweet Riches",
            ],
        ),
        TitleRule::new("Protocol Pioneer", &["Chain Explorer", "Bridge Blazer", "DeFi Drifter"]),
        TitleRule::new("Token Titan", &["Influence Investor", "NFT Networker", "Tweet Trader"]),
        TitleRule::new("Chain Champion", &["Bridge Blazer", "Viral Validator", "Social HODLer"]),
        TitleRule::new(
            "Governance Guru",
            &["DAO Diplomat", "Community Leader", "Governance Griot"],
        ),
    ]
}

/// First rule whose requirement set is covered by `badges`, else `default_title`.
pub fn resolve_title(
    badges: &BTreeMap<String, BadgeAward>,
    rules: &[TitleRule],
    default_title: &str,
) -> String {
    rules
        .iter()
        .find(|rule| rule.is_satisfied_by(badges))
        .map(|rule| rule.title.clone())
        .unwrap_or_else(|| default_title.to_string())
}
