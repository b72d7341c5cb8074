use super::common::*;
use crate::scoring::badges::assign_badges;
use crate::scoring::metrics::{extract_messaging, extract_social, extract_wallet};
use crate::scoring::{
    assign, BadgeInput, BadgeThresholdTable, BadgeTier, DomainMetrics, MetricKey, MetricRecord,
    Thresholds,
};
use serde_json::Value;

fn tiers() -> Thresholds {
    Thresholds::new(5.0, 10.0, 20.0).expect("ascending thresholds")
}

#[test]
fn tier_boundaries_are_inclusive() {
    let cases = [
        (0.0, None),
        (4.999, None),
        (5.0, Some(BadgeTier::Silver)),
        (9.999, Some(BadgeTier::Silver)),
        (10.0, Some(BadgeTier::Gold)),
        (19.999, Some(BadgeTier::Gold)),
        (20.0, Some(BadgeTier::Platinum)),
        (1e12, Some(BadgeTier::Platinum)),
    ];

    for (value, expected) in cases {
        let award = assign(value, &tiers());
        assert_eq!(award.map(|award| award.tier), expected, "value {value}");
        if let Some(award) = award {
            assert_eq!(award.raw_value, value);
        }
    }
}

#[test]
fn flag_thresholds_award_platinum_directly() {
    let flag = Thresholds::new(1.0, 1.0, 1.0).expect("equal cutoffs allowed");
    assert_eq!(assign(0.0, &flag), None);
    assert_eq!(assign(1.0, &flag).map(|award| award.tier), Some(BadgeTier::Platinum));
}

#[test]
fn descending_or_non_finite_thresholds_are_rejected() {
    assert!(Thresholds::new(10.0, 5.0, 20.0).is_err());
    assert!(Thresholds::new(1.0, 2.0, f64::NAN).is_err());
}

#[test]
fn nft_networker_depends_only_on_the_nft_count() {
    let metrics = DomainMetrics {
        social: extract_social(&Value::Null, as_of()),
        wallet: extract_wallet(&wallet_payload()),
        messaging: extract_messaging(&Value::Null, &Value::Null),
    };

    let badges = assign_badges(&metrics, &BadgeThresholdTable::standard());

    let networker = badges.get("NFT Networker").expect("four NFTs earn silver");
    assert_eq!(networker.tier, BadgeTier::Silver);
    assert_eq!(networker.raw_value, 4.0);
    assert!(badges.contains_key("Chain Explorer"));
    assert!(badges.contains_key("Transaction Titan"));
    assert!(!badges.contains_key("NFT Whale"));
    assert!(!badges.contains_key("Token Holder"));
}

#[test]
fn one_unavailable_input_does_not_block_other_badges() {
    let mut wallet = MetricRecord::new();
    wallet.insert(MetricKey::ActiveChains, 6.0);
    let metrics = DomainMetrics {
        wallet,
        ..DomainMetrics::default()
    };

    let badges = assign_badges(&metrics, &BadgeThresholdTable::standard());

    assert_eq!(
        badges.get("Chain Explorer").map(|award| award.tier),
        Some(BadgeTier::Gold)
    );
    assert_eq!(
        badges.get("Bridge Blazer").map(|award| award.tier),
        Some(BadgeTier::Silver)
    );
    assert!(!badges.contains_key("NFT Networker"));
    assert_eq!(badges.len(), 2);
}

#[test]
fn badges_without_thresholds_are_never_awarded() {
    let metrics = DomainMetrics {
        wallet: extract_wallet(&wallet_payload()),
        ..DomainMetrics::default()
    };
    let mut table = BadgeThresholdTable::default();
    table.insert("NFT Networker", Thresholds::new(1.0, 5.0, 10.0).expect("valid"));

    let badges = assign_badges(&metrics, &table);

    assert_eq!(badges.keys().collect::<Vec<_>>(), vec!["NFT Networker"]);
}

#[test]
fn composite_inputs_combine_their_metrics() {
    let mut messaging = MetricRecord::new();
    messaging.insert(MetricKey::MessageCount, 6.0);
    messaging.insert(MetricKey::Polls, true);
    messaging.insert(MetricKey::Leadership, false);

    let titan = BadgeInput::Boosted {
        base: MetricKey::MessageCount,
        flag: MetricKey::Polls,
        bonus: 1_000.0,
    };
    let griot = BadgeInput::Sum(&[MetricKey::Polls, MetricKey::Leadership]);

    assert_eq!(titan.compute(&messaging), Some(1_006.0));
    assert_eq!(griot.compute(&messaging), Some(1.0));
    assert_eq!(
        BadgeInput::Metric(MetricKey::GifMessages).compute(&messaging),
        None
    );
}

#[test]
fn follower_growth_treats_unknown_age_as_one_year() {
    let mut social = MetricRecord::new();
    social.insert(MetricKey::Followers, 250_000.0);
    social.insert(MetricKey::AccountAge, 0.0);
    let growth = BadgeInput::PerYear {
        metric: MetricKey::Followers,
        years: MetricKey::AccountAge,
    };

    assert_eq!(growth.compute(&social), Some(250_000.0));

    social.insert(MetricKey::AccountAge, 0.5);
    assert_eq!(growth.compute(&social), Some(500_000.0));
}

#[test]
fn empty_payloads_award_no_badges() {
    let metrics = DomainMetrics {
        social: extract_social(&Value::Null, as_of()),
        wallet: extract_wallet(&Value::Null),
        messaging: extract_messaging(&Value::Null, &Value::Null),
    };

    assert!(assign_badges(&metrics, &BadgeThresholdTable::standard()).is_empty());
}
