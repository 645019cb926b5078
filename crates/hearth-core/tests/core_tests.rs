//! Tests for hearth-core: canonical keys, identifiers, home records, errors

use hearth_core::*;
use uuid::Uuid;

fn sample_home(name: &str) -> Home {
    Home::new(name, WorldId::random(), 12.5, 64.0, -3.25, 90.0, -12.5)
}

// ===========================================================================
// Canonical keys
// ===========================================================================

#[test]
fn home_key_lowercases() {
    assert_eq!(HomeKey::new("Base").as_str(), "base");
    assert_eq!(HomeKey::new("BEACH").as_str(), "beach");
}

#[test]
fn home_key_replaces_spaces_with_underscores() {
    assert_eq!(HomeKey::new("My House").as_str(), "my_house");
    assert_eq!(HomeKey::new("far  away").as_str(), "far__away");
}

#[test]
fn home_key_is_idempotent() {
    let once = HomeKey::new("Nether Hub");
    let twice = HomeKey::new(once.as_str());
    assert_eq!(once, twice);
}

#[test]
fn home_key_treats_spelling_variants_as_equal() {
    assert_eq!(HomeKey::new("My House"), HomeKey::new("my_house"));
    assert_eq!(HomeKey::new("MY HOUSE"), HomeKey::new("My house"));
    assert_ne!(HomeKey::new("my-house"), HomeKey::new("my_house"));
}

#[test]
fn home_key_from_str_and_display() {
    let key: HomeKey = "Spawn Base".into();
    assert_eq!(key.to_string(), "spawn_base");
}

// ===========================================================================
// Identifiers
// ===========================================================================

#[test]
fn user_id_displays_as_uuid() {
    let raw = Uuid::new_v4();
    let user = UserId::new(raw);
    assert_eq!(user.to_string(), raw.to_string());
    assert_eq!(user.as_uuid(), &raw);
}

#[test]
fn world_id_round_trips_through_from() {
    let raw = Uuid::new_v4();
    let world: WorldId = raw.into();
    assert_eq!(world, WorldId::new(raw));
}

#[test]
fn ids_serialize_transparently() {
    let raw = Uuid::parse_str("00000000-0000-0000-0000-000000000001").unwrap();
    let json = serde_json::to_string(&UserId::new(raw)).unwrap();
    assert_eq!(json, "\"00000000-0000-0000-0000-000000000001\"");

    let back: UserId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, UserId::new(raw));
}

// ===========================================================================
// Home records
// ===========================================================================

#[test]
fn home_key_comes_from_display_name() {
    let home = sample_home("Spawn Base");
    assert_eq!(home.key(), HomeKey::new("spawn_base"));
    assert_eq!(home.name, "Spawn Base");
}

#[test]
fn home_equality_covers_every_field() {
    let home = sample_home("base");
    let same = home.clone();
    assert_eq!(home, same);

    let mut moved = home.clone();
    moved.x += 1.0;
    assert_ne!(home, moved);

    let mut renamed = home.clone();
    renamed.name = "Base".to_string();
    assert_ne!(home, renamed);
}

#[test]
fn home_serializes_fields_in_declaration_order() {
    let world = WorldId::new(Uuid::parse_str("00000000-0000-0000-0000-000000000001").unwrap());
    let home = Home::new("Spawn Base", world, 12.5, -3.25, 0.0, 90.0, -12.5);
    let json = serde_json::to_string(&home).unwrap();
    assert_eq!(
        json,
        "{\"name\":\"Spawn Base\",\"world\":\"00000000-0000-0000-0000-000000000001\",\
         \"x\":12.5,\"y\":-3.25,\"z\":0.0,\"yaw\":90.0,\"pitch\":-12.5}"
    );
}

// ===========================================================================
// Errors
// ===========================================================================

#[test]
fn error_display_is_descriptive() {
    let err = Error::vault("backing store offline");
    assert_eq!(err.to_string(), "vault error: backing store offline");

    let user = UserId::random();
    let err = Error::vault_rejected(user, "blob too large");
    assert!(err.to_string().contains(&user.to_string()));
    assert!(err.to_string().contains("blob too large"));
}

#[test]
fn decode_error_carries_the_parser_message() {
    let parse_err = serde_json::from_str::<Vec<Home>>("not json").unwrap_err();
    let err = Error::Decode(parse_err);
    assert!(err.to_string().starts_with("malformed home blob"));
}
