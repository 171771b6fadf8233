pub mod access;
mod container;
mod fuel;
mod mill;
mod notify;
pub mod persist;
mod process;
mod slots;
mod store;
pub mod transfer;

pub use container::*;
pub use fuel::*;
pub use mill::*;
pub use notify::*;
pub use persist::{Document, MillSnapshot, PersistError, ITEMS_KEY, MILLSTONE_KEY};
pub use process::*;
pub use slots::*;
pub use store::*;
