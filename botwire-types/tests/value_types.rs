use botwire_types::deserialize::Error;
use botwire_types::{Deserializable, MaskPoint, Record, Serializable, StickerType, types};
use serde_json::{Value, json};

fn rights() -> types::ChatAdministratorRights {
    types::ChatAdministratorRights {
        is_anonymous: false,
        can_manage_chat: true,
        can_delete_messages: true,
        can_manage_video_chats: false,
        can_restrict_members: true,
        can_promote_members: false,
        can_change_info: true,
        can_invite_users: true,
        can_post_messages: None,
        can_edit_messages: None,
        can_pin_messages: Some(true),
        can_manage_topics: None,
    }
}

#[test]
fn record_roundtrip() {
    let value = rights();
    assert_eq!(types::ChatAdministratorRights::deserialize(&value.serialize()).unwrap(), value);
}

#[test]
fn encode_emits_every_wire_key() {
    let map = rights().to_map();
    assert_eq!(map.len(), 12);
    assert_eq!(map["can_manage_chat"], json!(true));
    assert_eq!(map["can_pin_messages"], json!(true));
    assert_eq!(map["can_manage_topics"], Value::Null);
}

#[test]
fn decode_ignores_unknown_keys() {
    let mut encoded = rights().serialize();
    encoded["can_fly"] = json!(true);
    assert_eq!(types::ChatAdministratorRights::deserialize(&encoded).unwrap(), rights());
}

#[test]
fn missing_required_field_is_named() {
    let mut encoded = rights().serialize();
    encoded.as_object_mut().unwrap().remove("can_invite_users");
    let err = types::ChatAdministratorRights::deserialize(&encoded).unwrap_err();
    assert_eq!(
        err,
        Error::MissingField { ty: "ChatAdministratorRights", field: "can_invite_users" }
    );
}

#[test]
fn mistyped_field_is_named() {
    let err = types::KeyboardButton::deserialize(&json!({"text": 5})).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidField { ty: "KeyboardButton", field: "text", .. }
    ));
    assert_eq!(
        err.innermost(),
        &Error::UnexpectedValue { expected: "string", found: "number" }
    );
}

#[test]
fn nested_values_decode_recursively() {
    let button = types::KeyboardButton::deserialize(&json!({
        "text": "Open",
        "web_app": {"url": "https://example.org/app"},
        "request_poll": {"type": "quiz"},
    }))
    .unwrap();

    assert_eq!(button.text, "Open");
    assert_eq!(button.request_contact, None);
    assert_eq!(
        button.web_app,
        Some(types::WebAppInfo { url: "https://example.org/app".into() })
    );
    assert_eq!(button.request_poll.unwrap().r#type.as_deref(), Some("quiz"));
}

#[test]
fn nested_error_points_into_the_child() {
    let err = types::KeyboardButton::deserialize(&json!({
        "text": "Open",
        "web_app": {},
    }))
    .unwrap_err();
    assert_eq!(
        err,
        Error::InvalidField {
            ty: "KeyboardButton",
            field: "web_app",
            source: Box::new(Error::MissingField { ty: "WebAppInfo", field: "url" }),
        }
    );
}

#[test]
fn keyboard_rows_keep_their_shape() {
    let markup = types::ReplyKeyboardMarkup::deserialize(&json!({
        "keyboard": [[{"text": "a"}, {"text": "b"}], [{"text": "c"}]],
        "resize_keyboard": true,
    }))
    .unwrap();
    let rows: Vec<Vec<&str>> = markup
        .keyboard
        .iter()
        .map(|row| row.iter().map(|b| b.text.as_str()).collect())
        .collect();
    assert_eq!(rows, vec![vec!["a", "b"], vec!["c"]]);
}

fn sticker_json(kind: &str) -> Value {
    json!({
        "file_id": "CAACAgIAAxkBAAIB",
        "file_unique_id": "AgADJgADqGkQ",
        "type": kind,
        "width": 512,
        "height": 512,
        "is_animated": false,
        "is_video": true,
        "emoji": "🙂",
        "mask_position": {"point": "eyes", "x_shift": -0.5, "y_shift": 0.25, "scale": 1.5},
    })
}

#[test]
fn sticker_type_lookup() {
    let sticker = types::Sticker::deserialize(&sticker_json("custom_emoji")).unwrap();
    assert_eq!(sticker.sticker_type(), StickerType::CustomEmoji);
    assert!(sticker.is_moving());
    assert_eq!(sticker.mask_position.unwrap().mask_point(), MaskPoint::Eyes);
}

#[test]
fn unknown_sticker_type_still_decodes() {
    let sticker = types::Sticker::deserialize(&sticker_json("hologram")).unwrap();
    assert_eq!(sticker.r#type, "hologram");
    assert_eq!(sticker.sticker_type(), StickerType::Unknown);
    assert_eq!(sticker.serialize()["type"], json!("hologram"));
}

#[test]
fn sticker_set_type_lookup() {
    let set = types::StickerSet::deserialize(&json!({
        "name": "animals",
        "title": "Animals",
        "sticker_type": "regular",
        "is_animated": false,
        "is_video": false,
        "stickers": [sticker_json("regular")],
    }))
    .unwrap();
    assert_eq!(set.sticker_type(), StickerType::Regular);
    assert_eq!(set.stickers.len(), 1);
    assert_eq!(set.thumb, None);
}

#[test]
fn empty_record_encodes_to_empty_object() {
    assert_eq!(types::CallbackGame {}.serialize(), json!({}));
    assert_eq!(types::CallbackGame::deserialize(&json!({"x": 1})).unwrap(), types::CallbackGame {});
    assert!(types::CallbackGame::deserialize(&json!("nope")).is_err());
}

#[test]
fn api_version_comes_from_schema_header() {
    assert_eq!(botwire_types::API_VERSION, "6.3");
}
