//! Shared UI components for the portals.

pub mod cards;
pub mod form;
pub mod guard;
pub mod layout;
pub mod sidebar;
pub mod timetable_grid;
pub mod toaster;

pub use cards::{CourseCard, EmptyState, ErrorNotice, Modal, Spinner, StatsCard, StatusBadge};
pub use form::{NumberField, SelectField, TextField};
pub use guard::{push_path, Redirect, RequireAuth};
pub use layout::{DashboardLayout, PageHeader, PublicLayout};
pub use sidebar::Sidebar;
pub use timetable_grid::TimetableGrid;
pub use toaster::Toaster;
