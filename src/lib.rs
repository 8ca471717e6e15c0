//! Container and pallet load planning: expands a cargo list into units and
//! packs them into as many identical containers as needed.

pub mod error;
pub mod expand;
pub mod free_space;
pub mod metrics;
pub mod orientation;
pub mod packer;
pub mod planner;
pub mod presets;
pub mod render;
pub mod store;
pub mod types;

pub use planner::{Planner, plan};
