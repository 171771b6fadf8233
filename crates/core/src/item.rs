//! Item system - item kinds and inventory stacks

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Namespace used for persisted item identifiers (`milldustry:coal`).
pub const ITEM_NAMESPACE: &str = "milldustry";

/// Item type identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemType {
    /// Plain stone block.
    Stone,
    /// Cobblestone block.
    Cobblestone,
    /// Granite block.
    Granite,
    /// Andesite block.
    Andesite,
    /// Gravel block.
    Gravel,
    /// Sand block.
    Sand,
    /// Harvested wheat.
    Wheat,
    /// Ground flour.
    Flour,
    /// Raw iron ore.
    IronOre,
    /// Raw gold ore.
    GoldOre,
    /// Coal.
    Coal,
    /// Charcoal.
    Charcoal,
    /// Oak log.
    OakLog,
    /// Oak planks.
    OakPlanks,
    /// Stick.
    Stick,
    /// Empty bucket.
    Bucket,
    /// Bucket of lava.
    LavaBucket,
    /// Ender pearl.
    EnderPearl,
    /// Iron pickaxe.
    IronPickaxe,
}

impl ItemType {
    /// Every known item kind.
    pub const ALL: [ItemType; 19] = [
        ItemType::Stone,
        ItemType::Cobblestone,
        ItemType::Granite,
        ItemType::Andesite,
        ItemType::Gravel,
        ItemType::Sand,
        ItemType::Wheat,
        ItemType::Flour,
        ItemType::IronOre,
        ItemType::GoldOre,
        ItemType::Coal,
        ItemType::Charcoal,
        ItemType::OakLog,
        ItemType::OakPlanks,
        ItemType::Stick,
        ItemType::Bucket,
        ItemType::LavaBucket,
        ItemType::EnderPearl,
        ItemType::IronPickaxe,
    ];

    /// Path component of the persisted identifier.
    pub const fn path(self) -> &'static str {
        match self {
            ItemType::Stone => "stone",
            ItemType::Cobblestone => "cobblestone",
            ItemType::Granite => "granite",
            ItemType::Andesite => "andesite",
            ItemType::Gravel => "gravel",
            ItemType::Sand => "sand",
            ItemType::Wheat => "wheat",
            ItemType::Flour => "flour",
            ItemType::IronOre => "iron_ore",
            ItemType::GoldOre => "gold_ore",
            ItemType::Coal => "coal",
            ItemType::Charcoal => "charcoal",
            ItemType::OakLog => "oak_log",
            ItemType::OakPlanks => "oak_planks",
            ItemType::Stick => "stick",
            ItemType::Bucket => "bucket",
            ItemType::LavaBucket => "lava_bucket",
            ItemType::EnderPearl => "ender_pearl",
            ItemType::IronPickaxe => "iron_pickaxe",
        }
    }

    /// Namespaced identifier, e.g. `milldustry:oak_log`.
    pub fn key(self) -> String {
        format!("{ITEM_NAMESPACE}:{}", self.path())
    }

    /// Resolve a persisted identifier.
    ///
    /// Accepts either `namespace:path` or a bare `path` (which uses
    /// [`ITEM_NAMESPACE`]). Foreign namespaces are rejected.
    pub fn from_key(key: &str) -> Result<Self, UnknownItemKey> {
        let key = key.trim();
        let path = match key.split_once(':') {
            Some((ns, path)) if ns == ITEM_NAMESPACE => path,
            Some(_) => return Err(UnknownItemKey(key.to_string())),
            None => key,
        };
        ItemType::ALL
            .into_iter()
            .find(|item| item.path() == path)
            .ok_or_else(|| UnknownItemKey(key.to_string()))
    }

    /// Maximum number of items of this kind that fit in one stack.
    pub const fn max_stack_size(self) -> u32 {
        match self {
            ItemType::IronPickaxe | ItemType::LavaBucket => 1, // Tools and filled buckets don't stack
            ItemType::Bucket | ItemType::EnderPearl => 16,
            _ => 64,
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{ITEM_NAMESPACE}:{}", self.path())
    }
}

impl FromStr for ItemType {
    type Err = UnknownItemKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s)
    }
}

/// Error returned when an item identifier does not name a known item kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown item `{0}`")]
pub struct UnknownItemKey(pub String);

/// An item stack in inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Type of item
    pub item_type: ItemType,
    /// Quantity in stack. A count of zero means the stack is spent.
    pub count: u32,
    /// Item-specific sub-data (durability, custom names, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<Value>,
}

impl ItemStack {
    /// Create a new item stack
    pub fn new(item_type: ItemType, count: u32) -> Self {
        Self {
            item_type,
            count,
            tag: None,
        }
    }

    /// Create a stack carrying item-specific sub-data.
    ///
    /// A `null` tag is the same as no tag.
    pub fn with_tag(item_type: ItemType, count: u32, tag: Value) -> Self {
        Self {
            item_type,
            count,
            tag: Some(tag),
        }
        .normalized()
    }

    /// Drop a `null` tag, which persists identically to an absent one.
    pub fn normalized(mut self) -> Self {
        if self.tag.as_ref().is_some_and(Value::is_null) {
            self.tag = None;
        }
        self
    }

    /// Maximum stack size for this item type
    pub fn max_stack_size(&self) -> u32 {
        self.item_type.max_stack_size()
    }

    /// A spent stack holds no items.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Get remaining space in this stack.
    pub fn remaining_space(&self) -> u32 {
        self.max_stack_size().saturating_sub(self.count)
    }

    /// Stacks merge when kind and sub-data agree.
    pub fn can_merge(&self, other: &ItemStack) -> bool {
        self.item_type == other.item_type && self.tag == other.tag
    }

    /// Clone of this stack with a different count.
    pub fn copy_with_count(&self, count: u32) -> ItemStack {
        ItemStack {
            item_type: self.item_type,
            count,
            tag: self.tag.clone(),
        }
    }

    /// Remove up to `amount` items, returning how many were actually removed.
    pub fn decrement(&mut self, amount: u32) -> u32 {
        let removed = amount.min(self.count);
        self.count -= removed;
        removed
    }

    /// Split off up to `amount` items into a new stack.
    ///
    /// Returns `None` when nothing could be taken.
    pub fn split(&mut self, amount: u32) -> Option<ItemStack> {
        let taken = self.decrement(amount);
        (taken > 0).then(|| self.copy_with_count(taken))
    }

    /// Lower the count to the item kind's maximum if it exceeds it.
    ///
    /// Returns `true` when the count was changed.
    pub fn clamp_to_max(&mut self) -> bool {
        let max = self.max_stack_size();
        if self.count > max {
            self.count = max;
            true
        } else {
            false
        }
    }
}
