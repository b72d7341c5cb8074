use crate::scoring::titles::standard_titles;
use crate::scoring::{resolve_title, BadgeAward, BadgeTier, TitleRule, DEFAULT_TITLE};
use std::collections::BTreeMap;

fn awarded(names: &[&str]) -> BTreeMap<String, BadgeAward> {
    names
        .iter()
        .map(|name| {
            (
                name.to_string(),
                BadgeAward {
                    tier: BadgeTier::Silver,
                    raw_value: 1.0,
                },
            )
        })
        .collect()
}

#[test]
fn full_requirement_set_earns_the_title() {
    let badges = awarded(&["NFT Networker", "NFT Whale", "Chain Explorer"]);
    assert_eq!(
        resolve_title(&badges, &standard_titles(), DEFAULT_TITLE),
        "NFT Aficionado"
    );
}

#[test]
fn partial_requirement_sets_fall_back_to_the_default() {
    let badges = awarded(&["NFT Networker", "Chain Explorer", "Bridge Blazer"]);
    assert_eq!(
        resolve_title(&badges, &standard_titles(), DEFAULT_TITLE),
        DEFAULT_TITLE
    );
}

#[test]
fn earlier_titles_take_precedence() {
    let badges = awarded(&[
        "DeFi Master",
        "Airdrop Veteran",
        "Dapp Diplomat",
        "NFT Networker",
        "NFT Whale",
    ]);
    assert_eq!(
        resolve_title(&badges, &standard_titles(), DEFAULT_TITLE),
        "DeFi Dynamo"
    );
}

#[test]
fn empty_requirement_sets_never_match() {
    let rules = vec![
        TitleRule::new("Freebie", &[]),
        TitleRule::new("Group Regular", &["Group Guru"]),
    ];

    assert_eq!(resolve_title(&awarded(&[]), &rules, "Newcomer"), "Newcomer");
    assert_eq!(
        resolve_title(&awarded(&["Group Guru"]), &rules, "Newcomer"),
        "Group Regular"
    );
}

#[test]
fn no_badges_yield_the_default_title() {
    assert_eq!(
        resolve_title(&BTreeMap::new(), &standard_titles(), DEFAULT_TITLE),
        DEFAULT_TITLE
    );
}
