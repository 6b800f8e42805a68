//! Intake of the item to edit and persistence of the finished cutout.
//!
//! An item moves from "pending" (picked by the user, not yet edited) into the wardrobe
//! once the edited image is exported.

use std::io;

use futures::future::BoxFuture;

use crate::PixelBuffer;

pub mod file;
pub mod in_memory;

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct ItemInfo {
    pub name: String,
    pub category: String,
}

/// Decoded image waiting to be edited.
#[derive(Debug, Clone)]
pub struct PendingImage {
    pub info: ItemInfo,
    pub image: PixelBuffer,
}

/// Finished item, `png` holds the encoded cutout.
#[derive(Debug, Clone)]
pub struct WardrobeItem {
    pub info: ItemInfo,
    pub png: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct WardrobeEntry {
    #[serde(flatten)]
    pub info: ItemInfo,
    pub image: String,
}

pub trait Storage {
    fn load_pending(&self) -> BoxFuture<'static, io::Result<PendingImage>>;
    /// Adds the item to the wardrobe and clears the pending item.
    fn store_item(&self, item: WardrobeItem) -> BoxFuture<'static, io::Result<()>>;
    /// Wardrobe entries in the order they were stored.
    fn list_items(&self) -> BoxFuture<'static, io::Result<Vec<WardrobeEntry>>>;
}

fn file_stem_for(name: &str) -> String {
    let stem = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect::<String>();
    if stem.is_empty() {
        "item".into()
    } else {
        stem
    }
}
