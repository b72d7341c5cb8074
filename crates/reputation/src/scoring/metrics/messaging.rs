use super::field::Field;
use super::{MetricKey, MetricRecord};
use serde_json::Value;

const ITEMS: Field = Field::at(&["items"]);

const PINNED: Field = Field::at(&["sourceData", "is_pinned"]);
const CONTENT_KIND: Field = Field::at(&["sourceData", "content", "_"]);
const CAPTION_ENTITIES: Field = Field::at(&["sourceData", "content", "caption", "entities"]);
const TEXT_ENTITIES: Field = Field::at(&["sourceData", "content", "entities"]);
const VIA_BOT: Field = Field::at(&["sourceData", "via_bot_user_id"]);
const CAN_SEND_POLLS: Field = Field::at(&["sourceData", "permissions", "can_send_polls"]);
const CAN_PIN_MESSAGES: Field = Field::at(&["sourceData", "permissions", "can_pin_messages"]);
const ENTITY_KIND: Field = Field::at(&["type", "_"]);

const PHOTO: &str = "messagePhoto";
const STICKER: &str = "messageSticker";
const ANIMATION: &str = "messageAnimation";
const HASHTAG: &str = "textEntityTypeHashtag";
const MENTION: &str = "textEntityTypeMention";

/// Normalize the messaging group and message containers.
///
/// Both arguments are expected to look like `{ "items": [...] }`; anything else
/// is read as an empty collection.
pub fn extract_messaging(groups: &Value, messages: &Value) -> MetricRecord {
    let groups = ITEMS.items(groups);
    let messages = ITEMS.items(messages);

    let admin_groups = groups
        .iter()
        .filter(|group| CAN_PIN_MESSAGES.flag(group))
        .count();
    let can_send_polls = groups.iter().any(|group| CAN_SEND_POLLS.flag(group));

    let mut record = MetricRecord::new();
    record.insert(MetricKey::GroupCount, groups.len());
    record.insert(MetricKey::MessageCount, messages.len());
    record.insert(
        MetricKey::PinnedMessages,
        messages.iter().filter(|message| PINNED.flag(message)).count(),
    );
    record.insert(MetricKey::MediaMessages, count_kind(messages, PHOTO));
    record.insert(
        MetricKey::Hashtags,
        count_entities(messages, CAPTION_ENTITIES, HASHTAG),
    );
    record.insert(MetricKey::Polls, can_send_polls);
    record.insert(MetricKey::Leadership, admin_groups > 0);
    record.insert(MetricKey::AdminGroups, admin_groups);
    record.insert(
        MetricKey::BotInteractions,
        messages
            .iter()
            .filter(|message| VIA_BOT.number(message) != 0.0)
            .count(),
    );
    record.insert(MetricKey::StickerMessages, count_kind(messages, STICKER));
    record.insert(MetricKey::GifMessages, count_kind(messages, ANIMATION));
    record.insert(
        MetricKey::MentionCount,
        count_entities(messages, TEXT_ENTITIES, MENTION),
    );
    record
}

fn count_kind(messages: &[Value], kind: &str) -> usize {
    messages
        .iter()
        .filter(|message| CONTENT_KIND.text(message) == Some(kind))
        .count()
}

fn count_entities(messages: &[Value], entities: Field, kind: &str) -> usize {
    messages
        .iter()
        .map(|message| {
            entities.count_where(message, |entity| ENTITY_KIND.text(entity) == Some(kind))
        })
        .sum()
}
