use milldustry_core::{BlockPos, Facing, ItemStack, ItemType, SimTick};
use milldustry_testkit::JsonlSink;
use milldustry_world::{FuelTable, MillBlockEntity};
use std::sync::Arc;

#[test]
fn deterministic_event_stream_can_be_written() {
    let path = std::env::temp_dir().join("milldustry_eventlog.jsonl");
    let mut sink = JsonlSink::create(&path).expect("can create temp log");
    sink.set_tick(SimTick::ZERO.advance(1));

    let mut mill = MillBlockEntity::new(
        BlockPos::new(0, 64, 0),
        Facing::South,
        Arc::new(FuelTable::default()),
        Box::new(sink),
    );
    mill.interact(&mut ItemStack::new(ItemType::Stone, 1));
    drop(mill);

    let log = std::fs::read_to_string(&path).expect("can read log back");
    assert_eq!(log.lines().count(), 1);
    assert!(log.contains("\"millstone\""));
}
