//! Weekly schedule logic shared by the portal pages.
//!
//! - `grid`: the Monday–Friday × hourly-slot axis and cell placement
//! - `clash`: grouping a student's entries that start together
//! - `slots`: lecturer slot-selection rules and per-duration tables
//! - `summary`: dashboard figures derived from fetched lists

pub mod clash;
pub mod grid;
pub mod slots;
pub mod summary;

pub use clash::{detect_clashes, Clash};
pub use grid::{Grid, GridCell, DAYS, TIME_SLOTS};
pub use slots::{SlotSelection, SlotSelectionError, SlotTable, MAX_SLOTS_PER_UNIT};
