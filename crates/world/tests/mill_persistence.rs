//! Persistence integration tests: golden document layout, on-disk store
//! round trips, and tolerance of damaged documents.

use milldustry_core::{BlockPos, Facing, ItemStack, ItemType, SimTick};
use milldustry_testkit::{assert_json_snapshot, EventRecord, JsonlSink, RecordingSink};
use milldustry_world::{
    BlockEntityStore, ChangeKind, Container, Document, FuelTable, MillBlockEntity, MillSnapshot,
    FUEL_SLOT, INPUT_SLOT, ITEMS_KEY, MILLSTONE_KEY,
};
use serde_json::{json, Value};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(label: &str) -> PathBuf {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    env::temp_dir().join(format!("milldustry_it_{label}_{timestamp}"))
}

fn object(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

fn stocked_mill() -> MillBlockEntity {
    let mut mill = MillBlockEntity::detached(
        BlockPos::new(4, 70, 9),
        Facing::North,
        Arc::new(FuelTable::default()),
    );
    mill.set(FUEL_SLOT, Some(ItemStack::new(ItemType::Coal, 12)))
        .unwrap();
    mill.set(INPUT_SLOT, Some(ItemStack::new(ItemType::Wheat, 40)))
        .unwrap();
    mill.set(
        4,
        Some(ItemStack::with_tag(
            ItemType::Flour,
            5,
            json!({ "Quality": "fine" }),
        )),
    )
    .unwrap();
    mill.interact(&mut ItemStack::new(ItemType::Granite, 3));
    mill
}

#[test]
fn document_layout_matches_golden() {
    let path = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/snapshots/mill_document.json"
    );
    assert_json_snapshot(path, &stocked_mill().to_document()).unwrap();
}

#[test]
fn store_roundtrip_restores_a_fresh_mill() {
    let dir = temp_dir("store");
    let store = BlockEntityStore::new(&dir).unwrap();
    let original = stocked_mill();

    store.save(original.pos(), &original.to_document()).unwrap();
    assert!(store.path_for(original.pos()).ends_with("be.4.70.9.mbe"));

    let recorder = RecordingSink::new();
    let mut restored = MillBlockEntity::new(
        original.pos(),
        Facing::North,
        Arc::new(FuelTable::default()),
        Box::new(recorder.clone()),
    );
    restored.load_document(&store.load(original.pos()).unwrap());

    assert_eq!(restored.snapshot(), original.snapshot());
    assert_eq!(recorder.kinds(), vec![ChangeKind::Loaded]);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn damaged_entries_are_skipped_not_fatal() {
    let doc = object(json!({
        ITEMS_KEY: [
            { "Slot": 0, "id": "milldustry:charcoal", "Count": 8 },
            { "Slot": 12, "id": "milldustry:flour", "Count": 1 },
            { "Slot": 2, "id": "othermod:gear", "Count": 1 },
            { "Slot": 3, "Count": 1 },
            "not a compound",
            { "Slot": 5, "id": "milldustry:flour", "Count": 0 },
            { "Slot": 9, "id": "milldustry:flour", "Count": 64 }
        ],
        MILLSTONE_KEY: "stone"
    }));

    let snapshot = MillSnapshot::from_document(&doc);
    let occupied: Vec<_> = snapshot
        .slots
        .occupied()
        .map(|(slot, stack)| (slot, stack.item_type, stack.count))
        .collect();
    assert_eq!(
        occupied,
        vec![(0, ItemType::Charcoal, 8), (9, ItemType::Flour, 64)]
    );
    assert_eq!(snapshot.millstone, None);
}

#[test]
fn oversized_persisted_stacks_are_clamped() {
    let doc = object(json!({
        ITEMS_KEY: [ { "Slot": 1, "id": "milldustry:ender_pearl", "Count": 99 } ]
    }));
    let snapshot = MillSnapshot::from_document(&doc);
    assert_eq!(
        snapshot.slots.get(INPUT_SLOT).unwrap().map(|s| s.count),
        Some(16)
    );
}

#[test]
fn non_list_items_leave_slots_empty() {
    let doc = object(json!({
        ITEMS_KEY: { "Slot": 0 },
        MILLSTONE_KEY: { "id": "milldustry:stone", "Count": 1 }
    }));
    let snapshot = MillSnapshot::from_document(&doc);
    assert_eq!(snapshot.slots.occupied().count(), 0);
    assert_eq!(snapshot.millstone, Some(ItemStack::new(ItemType::Stone, 1)));
}

#[test]
fn jsonl_log_records_each_change() {
    let dir = temp_dir("jsonl");
    let path = dir.join("events.jsonl");
    let mut sink = JsonlSink::create(&path).unwrap();
    sink.set_tick(SimTick(7));

    let mut mill = stocked_mill();
    let doc = mill.to_document();
    mill.attach(Box::new(sink));
    mill.clear();
    mill.load_document(&doc);
    drop(mill);

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["tick"], json!(7));
    assert_eq!(lines[0]["change"]["kind"], json!("inventory"));
    assert_eq!(lines[1]["change"]["kind"], json!("loaded"));
    assert_eq!(
        lines[1]["change"]["state"][MILLSTONE_KEY]["id"],
        json!("milldustry:granite")
    );

    // Records serialize the same way when built directly.
    let change = milldustry_world::BlockChange {
        pos: BlockPos::new(0, 0, 0),
        kind: ChangeKind::Resync,
        state: Document::new(),
    };
    let record = serde_json::to_value(EventRecord {
        tick: SimTick(1),
        change: &change,
    })
    .unwrap();
    assert_eq!(record["change"]["kind"], json!("resync"));

    fs::remove_dir_all(&dir).ok();
}
