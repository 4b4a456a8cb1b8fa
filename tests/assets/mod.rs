#![allow(dead_code)]

use once_cell::sync::Lazy;
use quartz_nbt::{NbtCompound, NbtList};

// Stored with CRLF line endings
pub const LEVEL_JSON: &[u8] = include_bytes!("level.json");
pub const LEVEL_ROOT_NAME: &str = "Level";
pub static LEVEL_VALIDATE: Lazy<NbtCompound> = Lazy::new(|| {
    let mut data = NbtCompound::new();
    data.insert("LevelName", "New World");
    data.insert("version", 19133i32);
    data.insert("DataVersion", 2586i32);
    data.insert("hardcore", 0i8);
    data.insert("allowCommands", 1i8);
    data.insert("Difficulty", 2i8);
    data.insert("DayTime", 6000i64);
    data.insert("RandomSeed", -1493628389734513711i64);
    data.insert("BorderSize", 59999968.0f64);
    data.insert("BorderDamagePerBlock", 0.2f64);
    data.insert("SpawnX", -112i32);
    data.insert("SpawnY", 64i32);
    data.insert("clearWeatherTime", 0i32);
    data.insert("rainTime", 0i32);

    let mut player = NbtCompound::new();
    player.insert("Health", 20.0f32);
    player.insert("foodLevel", 20i32);
    player.insert("XpLevel", 5i32);
    player.insert("SelectedItemSlot", 0i32);
    player.insert("Pos", NbtList::from(vec![-111.5f64, 64.0, 230.25]));
    player.insert("Rotation", NbtList::from(vec![90.0f32, -12.5]));

    let mut inventory = NbtList::new();
    let mut sword = NbtCompound::new();
    sword.insert("Slot", 0i8);
    sword.insert("id", "minecraft:diamond_sword");
    sword.insert("Count", 1i8);
    inventory.push(sword);
    let mut torches = NbtCompound::new();
    torches.insert("Slot", 1i8);
    torches.insert("id", "minecraft:torch");
    torches.insert("Count", 64i8);
    inventory.push(torches);
    player.insert("Inventory", inventory);
    player.insert("Attributes", NbtList::new());
    data.insert("Player", player);

    let mut game_rules = NbtCompound::new();
    game_rules.insert("doDaylightCycle", "true");
    game_rules.insert("randomTickSpeed", "3");
    data.insert("GameRules", game_rules);

    data.insert("ServerBrands", NbtList::from(vec!["vanilla"]));
    data.insert("unicode test", "a\u{E9}\u{65E5}");

    let mut level = NbtCompound::new();
    level.insert("Data", data);
    level
});

/// Builds the binary form of a named tag header: kind byte, name length, name bytes.
pub fn header(kind: u8, name: &str) -> Vec<u8> {
    let mut bytes = vec![kind];
    bytes.extend_from_slice(&(name.len() as u16).to_be_bytes());
    bytes.extend_from_slice(name.as_bytes());
    bytes
}

/// Builds a complete document with an unnamed root from the given entries.
pub fn document(entries: &[&[u8]]) -> Vec<u8> {
    let mut bytes = vec![0x0A, 0x00, 0x00];
    for entry in entries {
        bytes.extend_from_slice(entry);
    }
    bytes.push(0x00);
    bytes
}

/// Concatenates the given byte segments.
pub fn concat(segments: &[&[u8]]) -> Vec<u8> {
    segments.concat()
}
