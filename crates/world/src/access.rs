//! Per-face slot access rules for the mill.
//!
//! The front face feeds raw material, the back and underside collect output,
//! and the remaining faces (top and both flanks) load fuel.
//!
//! | side            | visible | insert            | extract |
//! |-----------------|---------|-------------------|---------|
//! | front           | input   | input             | -       |
//! | back, down      | outputs | -                 | outputs |
//! | left, right, up | fuel    | fuel (fuel items) | -       |

use crate::fuel::FuelRegistry;
use crate::slots::{SlotRole, FUEL_SLOTS, INPUT_SLOTS, OUTPUT_SLOTS};
use milldustry_core::{Direction, Facing, ItemType};

/// Which face of the mill `side` is, relative to `facing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    /// The face the mill points out of.
    Front,
    /// Directly behind the front.
    Back,
    /// Underside.
    Bottom,
    /// Top and both flanks.
    Service,
}

impl Face {
    /// Classify `side` for a mill facing `facing`.
    pub fn classify(facing: Facing, side: Direction) -> Self {
        if side == facing.direction() {
            Face::Front
        } else if side == facing.back() {
            Face::Back
        } else if side == Direction::Down {
            Face::Bottom
        } else {
            Face::Service
        }
    }
}

/// Slots reachable from `side`.
pub fn available_slots(facing: Facing, side: Direction) -> &'static [usize] {
    match Face::classify(facing, side) {
        Face::Front => &INPUT_SLOTS,
        Face::Back | Face::Bottom => &OUTPUT_SLOTS,
        Face::Service => &FUEL_SLOTS,
    }
}

/// Whether `item` may be inserted into `slot` from `side`.
pub fn can_insert(
    facing: Facing,
    slot: usize,
    item: ItemType,
    side: Direction,
    fuel: &dyn FuelRegistry,
) -> bool {
    let face = Face::classify(facing, side);
    match SlotRole::of(slot) {
        Some(SlotRole::Input) => face == Face::Front,
        // Down is not a fuel face: it only exposes the outputs.
        Some(SlotRole::Fuel) => fuel.is_fuel(item) && face == Face::Service,
        Some(SlotRole::Output) | None => false,
    }
}

/// Whether items may be pulled from `slot` through `side`.
pub fn can_extract(facing: Facing, slot: usize, side: Direction) -> bool {
    match SlotRole::of(slot) {
        Some(SlotRole::Output) => matches!(
            Face::classify(facing, side),
            Face::Back | Face::Bottom
        ),
        _ => false,
    }
}
