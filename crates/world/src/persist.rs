//! Structured-document codec for mill state.
//!
//! Layout:
//!
//! ```text
//! {
//!   "Items":     [ { "Slot": 0, "id": "milldustry:coal", "Count": 12 }, ... ],
//!   "Millstone": { "id": "milldustry:stone", "Count": 1 }      // only when attached
//! }
//! ```
//!
//! Empty slots are omitted from `Items`. Decoding is lenient: a damaged slot
//! entry or `Millstone` value is logged and treated as empty, never fatal.

use crate::slots::{MillSlots, MILL_SLOT_COUNT};
use milldustry_core::{ItemStack, ItemType, UnknownItemKey};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

/// A persisted compound document.
pub type Document = Map<String, Value>;

/// Key holding the slot list.
pub const ITEMS_KEY: &str = "Items";

/// Key holding the attached millstone. Absent when nothing is attached.
pub const MILLSTONE_KEY: &str = "Millstone";

/// Errors raised while decoding persisted state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PersistError {
    /// A value does not have the expected structure.
    #[error("malformed persisted data at `{key}`: {reason}")]
    MalformedPersistedData {
        /// Where in the document the problem was found.
        key: String,
        /// What was wrong with it.
        reason: String,
    },
    /// A stack names an item kind this build does not know.
    #[error(transparent)]
    UnknownItem(#[from] UnknownItemKey),
}

impl PersistError {
    fn malformed(key: impl Into<String>, reason: impl ToString) -> Self {
        PersistError::MalformedPersistedData {
            key: key.into(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StackRecord {
    id: String,
    #[serde(rename = "Count")]
    count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tag: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SlotRecord {
    #[serde(rename = "Slot")]
    slot: u8,
    #[serde(flatten)]
    stack: StackRecord,
}

impl From<&ItemStack> for StackRecord {
    fn from(stack: &ItemStack) -> Self {
        Self {
            id: stack.item_type.key(),
            count: stack.count,
            tag: stack.tag.clone(),
        }
    }
}

impl StackRecord {
    fn into_stack(self) -> Result<Option<ItemStack>, PersistError> {
        let item_type = ItemType::from_key(&self.id)?;
        if self.count == 0 {
            return Ok(None);
        }
        Ok(Some(ItemStack {
            item_type,
            count: self.count,
            tag: self.tag,
        }))
    }
}

/// Serialize a single stack to its document form.
pub fn encode_stack(stack: &ItemStack) -> Value {
    // StackRecord only holds strings, integers and JSON values.
    serde_json::to_value(StackRecord::from(stack)).unwrap_or(Value::Null)
}

/// Strictly decode a single stack. A zero count decodes to `None`.
pub fn decode_stack(value: &Value) -> Result<Option<ItemStack>, PersistError> {
    if !value.is_object() {
        return Err(PersistError::malformed("stack", "expected a compound"));
    }
    let record = StackRecord::deserialize(value).map_err(|e| PersistError::malformed("stack", e))?;
    record.into_stack()
}

/// Strictly decode one `Items` entry into `(slot, stack)`.
pub fn decode_slot_entry(value: &Value) -> Result<(usize, Option<ItemStack>), PersistError> {
    if !value.is_object() {
        return Err(PersistError::malformed(ITEMS_KEY, "expected a compound entry"));
    }
    let record =
        SlotRecord::deserialize(value).map_err(|e| PersistError::malformed(ITEMS_KEY, e))?;
    let slot = usize::from(record.slot);
    if slot >= MILL_SLOT_COUNT {
        return Err(PersistError::malformed(
            ITEMS_KEY,
            format!("slot {slot} is outside 0..{MILL_SLOT_COUNT}"),
        ));
    }
    Ok((slot, record.stack.into_stack()?))
}

/// Everything a mill persists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MillSnapshot {
    /// Fuel, input and output slots.
    pub slots: MillSlots,
    /// Attached millstone, if any.
    pub millstone: Option<ItemStack>,
}

impl MillSnapshot {
    /// Encode to a persisted document.
    pub fn to_document(&self) -> Document {
        let items = self
            .slots
            .occupied()
            .filter_map(|(slot, stack)| {
                let record = SlotRecord {
                    slot: u8::try_from(slot).ok()?,
                    stack: StackRecord::from(stack),
                };
                serde_json::to_value(record).ok()
            })
            .collect();

        let mut doc = Document::new();
        doc.insert(ITEMS_KEY.to_string(), Value::Array(items));
        if let Some(millstone) = self.millstone.as_ref().filter(|s| !s.is_empty()) {
            doc.insert(MILLSTONE_KEY.to_string(), encode_stack(millstone));
        }
        doc
    }

    /// Rebuild from a persisted document.
    ///
    /// Missing or damaged slot entries become empty slots. The millstone is
    /// read only when the key holds a compound; otherwise it is empty.
    pub fn from_document(doc: &Document) -> Self {
        Self {
            slots: read_slots(doc),
            millstone: read_millstone(doc),
        }
    }
}

fn read_slots(doc: &Document) -> MillSlots {
    let mut slots = MillSlots::new();
    let entries: &[Value] = match doc.get(ITEMS_KEY) {
        Some(Value::Array(entries)) => entries.as_slice(),
        Some(other) => {
            warn!(key = ITEMS_KEY, found = value_kind(other), "expected a list; slots left empty");
            &[]
        }
        None => &[],
    };

    for (idx, entry) in entries.iter().enumerate() {
        match decode_slot_entry(entry) {
            Ok((slot, stack)) => {
                // Index already validated by decode_slot_entry.
                if let Err(err) = slots.put(slot, stack) {
                    warn!(%err, "dropping slot entry");
                }
            }
            Err(err) => warn!(entry = idx, %err, "dropping damaged slot entry"),
        }
    }
    slots
}

fn read_millstone(doc: &Document) -> Option<ItemStack> {
    let value = doc.get(MILLSTONE_KEY)?;
    if !value.is_object() {
        warn!(key = MILLSTONE_KEY, found = value_kind(value), "expected a compound; treating as empty");
        return None;
    }
    match decode_stack(value) {
        Ok(stack) => stack,
        Err(err) => {
            warn!(key = MILLSTONE_KEY, %err, "treating damaged millstone as empty");
            None
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "compound",
    }
}
