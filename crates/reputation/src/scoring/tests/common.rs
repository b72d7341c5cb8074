use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};

use crate::scoring::{DomainPayloads, ReputationEngine, ScoringRules};

pub(super) const EPSILON: f64 = 1e-9;

pub(super) fn as_of() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
        .single()
        .expect("valid instant")
}

pub(super) fn engine() -> ReputationEngine {
    ReputationEngine::new(ScoringRules::standard())
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

pub(super) fn social_payload() -> Value {
    json!({
        "result": {
            "is_blue_verified": true,
            "super_follow_eligible": false,
            "creator_subscriptions_count": 2,
            "legacy": {
                "created_at": "2019-05-15T14:22:15.000Z",
                "followers_count": 1500,
                "friends_count": 500,
                "statuses_count": 1200,
                "favourites_count": 3000,
                "media_count": 60,
                "listed_count": 10,
                "retweet_count": 120,
                "quote_count": 10,
                "reply_count": 40,
                "pinned_tweet_ids_str": ["1790000000000000000"]
            }
        }
    })
}

/// Two chains, 0.5 native, three tokens, no DeFi, four NFTs, 150 transactions,
/// eight unique token interactions.
pub(super) fn wallet_payload() -> Value {
    json!({
        "Native Balance Result": 0.5,
        "Token Balances Result": [
            { "token_address": "0x1", "name": "Token1" },
            { "token_address": "0x2", "name": "Token2" },
            { "token_address": "0x3", "name": "Token3" }
        ],
        "Active Chains Result": { "activeChains": ["ethereum", "polygon"] },
        "DeFi Positions Summary Result": [],
        "Resolved Address Result": null,
        "Wallet NFTs Result": [
            { "token_address": "0xnft1", "token_id": "1" },
            { "token_address": "0xnft2", "token_id": "2" },
            { "token_address": "0xnft3", "token_id": "3" },
            { "token_address": "0xnft4", "token_id": "4" }
        ],
        "Transaction Count": 150,
        "Unique Token Interactions": 8
    })
}

pub(super) fn groups_payload() -> Value {
    json!({
        "items": [
            { "sourceData": { "permissions": { "can_send_polls": true, "can_pin_messages": true } } },
            { "sourceData": { "permissions": { "can_pin_messages": true } } },
            { "name": "lurker group" }
        ]
    })
}

/// Six items: one pinned photo with two hashtags, one bot-relayed text with a
/// mention, a sticker, a GIF, and two unusable entries.
pub(super) fn messages_payload() -> Value {
    json!({
        "items": [
            {
                "sourceData": {
                    "is_pinned": true,
                    "via_bot_user_id": 0,
                    "content": {
                        "_": "messagePhoto",
                        "caption": {
                            "entities": [
                                { "type": { "_": "textEntityTypeHashtag" } },
                                { "type": { "_": "textEntityTypeHashtag" } }
                            ]
                        }
                    }
                }
            },
            {
                "sourceData": {
                    "via_bot_user_id": 4242,
                    "content": {
                        "_": "messageText",
                        "entities": [
                            { "type": { "_": "textEntityTypeMention" } },
                            { "type": { "_": "textEntityTypeUrl" } }
                        ]
                    }
                }
            },
            { "sourceData": { "content": { "_": "messageSticker" } } },
            { "sourceData": { "content": { "_": "messageAnimation" } } },
            "not a message",
            null
        ]
    })
}

pub(super) fn full_payloads() -> DomainPayloads {
    DomainPayloads {
        social: social_payload(),
        wallet: wallet_payload(),
        messaging_groups: groups_payload(),
        messaging_messages: messages_payload(),
    }
}
