use super::field::Field;
use super::{MetricKey, MetricRecord};
use chrono::{DateTime, Utc};
use serde_json::Value;

const FOLLOWERS: Field = Field::at(&["result", "legacy", "followers_count"]);
const FRIENDS: Field = Field::at(&["result", "legacy", "friends_count"]);
const STATUSES: Field = Field::at(&["result", "legacy", "statuses_count"]);
const FAVOURITES: Field = Field::at(&["result", "legacy", "favourites_count"]);
const MEDIA: Field = Field::at(&["result", "legacy", "media_count"]);
const LISTED: Field = Field::at(&["result", "legacy", "listed_count"]);
const RETWEETS: Field = Field::at(&["result", "legacy", "retweet_count"]);
const QUOTES: Field = Field::at(&["result", "legacy", "quote_count"]);
const REPLIES: Field = Field::at(&["result", "legacy", "reply_count"]);
const PINNED_TWEETS: Field = Field::at(&["result", "legacy", "pinned_tweet_ids_str"]);
const CREATED_AT: Field = Field::at(&["result", "legacy", "created_at"]);
const BLUE_VERIFIED: Field = Field::at(&["result", "is_blue_verified"]);
const SUPER_FOLLOW: Field = Field::at(&["result", "super_follow_eligible"]);
const SUBSCRIPTIONS: Field = Field::at(&["result", "creator_subscriptions_count"]);

const SECONDS_PER_YEAR: f64 = 365.0 * 24.0 * 60.0 * 60.0;
const PROVIDER_TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Statuses count triple in the engagement numerator.
const STATUS_ENGAGEMENT_WEIGHT: f64 = 3.0;

/// Normalize a social profile payload.
///
/// `as_of` anchors the account-age metric so identical inputs always produce
/// identical records.
pub fn extract_social(payload: &Value, as_of: DateTime<Utc>) -> MetricRecord {
    let followers = FOLLOWERS.number(payload);
    let statuses = STATUSES.number(payload);
    let favourites = FAVOURITES.number(payload);
    let media = MEDIA.number(payload);
    let listed = LISTED.number(payload);

    let mut record = MetricRecord::new();
    record.insert(MetricKey::Followers, followers);
    record.insert(MetricKey::Friends, FRIENDS.number(payload));
    record.insert(MetricKey::Statuses, statuses);
    record.insert(MetricKey::Favourites, favourites);
    record.insert(MetricKey::Media, media);
    record.insert(MetricKey::Listed, listed);
    record.insert(MetricKey::Retweets, RETWEETS.number(payload));
    record.insert(MetricKey::Quotes, QUOTES.number(payload));
    record.insert(MetricKey::Replies, REPLIES.number(payload));
    record.insert(MetricKey::Engagement, favourites + media + listed);
    record.insert(MetricKey::Verified, BLUE_VERIFIED.flag(payload));
    record.insert(MetricKey::Pinned, PINNED_TWEETS.len(payload) > 0);
    record.insert(MetricKey::SuperFollow, SUPER_FOLLOW.flag(payload));
    record.insert(MetricKey::Subscriptions, SUBSCRIPTIONS.number(payload));
    record.insert(
        MetricKey::AccountAge,
        account_age_years(CREATED_AT.text(payload), as_of),
    );
    record.insert(
        MetricKey::EngagementRatio,
        engagement_ratio(favourites, statuses, followers),
    );
    record
}

/// Years between account creation and `as_of`; `0.0` when the timestamp is
/// missing, unparseable, or later than `as_of`.
pub(crate) fn account_age_years(created_at: Option<&str>, as_of: DateTime<Utc>) -> f64 {
    let Some(created) = created_at.and_then(parse_created_at) else {
        return 0.0;
    };

    let elapsed = as_of.signed_duration_since(created).num_seconds();
    if elapsed <= 0 {
        return 0.0;
    }
    elapsed as f64 / SECONDS_PER_YEAR
}

fn parse_created_at(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, PROVIDER_TIMESTAMP_FORMAT))
        .ok()
        .map(|timestamp| timestamp.with_timezone(&Utc))
}

fn engagement_ratio(favourites: f64, statuses: f64, followers: f64) -> f64 {
    if followers <= 0.0 {
        return 0.0;
    }
    (favourites + statuses * STATUS_ENGAGEMENT_WEIGHT) / followers
}
