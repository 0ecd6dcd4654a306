//! Sell properties → `ItemIdentity`.

use super::{ItemAttribute, ItemIdentity};
use crate::domain::order::SellProperties;
use crate::shared::serde_util::value_to_string;

const NAME: &[&str] = &["name"];
const IMAGE: &[&str] = &["image", "image_url", "imageUrl"];
const RARITY: &[&str] = &["rarity"];
const ITEM_TYPE: &[&str] = &["item_type", "itemType", "type"];
const SUBTYPE: &[&str] = &["subtype", "sub_type", "subType"];
const MATERIAL: &[&str] = &["material"];
const SERIAL_NUMBER: &[&str] = &["serial_number", "serialNumber", "serial"];
const PRODUCT_CODE: &[&str] = &["productCode", "product_code"];

const IDENTITY_KEYS: &[&[&str]] = &[
    NAME,
    IMAGE,
    RARITY,
    ITEM_TYPE,
    SUBTYPE,
    MATERIAL,
    SERIAL_NUMBER,
    PRODUCT_CODE,
];

/// First alias holding a non-empty scalar.
fn pick(properties: &SellProperties, aliases: &[&str]) -> Option<String> {
    aliases
        .iter()
        .filter_map(|key| properties.get(*key))
        .filter_map(value_to_string)
        .map(|s| s.trim().to_string())
        .find(|s| !s.is_empty())
}

fn is_identity_key(name: &str) -> bool {
    IDENTITY_KEYS.iter().any(|aliases| aliases.contains(&name))
}

pub fn identity_from_properties(properties: &SellProperties) -> ItemIdentity {
    // BTreeMap iteration keeps the attributes sorted by name
    let attributes = properties
        .iter()
        .filter(|(name, _)| !is_identity_key(name))
        .filter_map(|(name, value)| {
            value_to_string(value).map(|value| ItemAttribute {
                name: name.clone(),
                value,
            })
        })
        .collect();

    ItemIdentity {
        name: pick(properties, NAME),
        image: pick(properties, IMAGE),
        rarity: pick(properties, RARITY),
        item_type: pick(properties, ITEM_TYPE),
        subtype: pick(properties, SUBTYPE),
        material: pick(properties, MATERIAL),
        serial_number: pick(properties, SERIAL_NUMBER),
        product_code: pick(properties, PRODUCT_CODE),
        attributes,
    }
}
