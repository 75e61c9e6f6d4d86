//! Wire types for the university timetable REST API.
//!
//! Serde mirrors of the entities the backend owns and of the request and
//! response bodies of its `/auth`, `/student`, `/lecturer`, `/admin` and
//! `/timetable` routes.
//!
//! # Modules
//! - [`user`] - Roles, users and auth payloads
//! - [`course`] - Courses, units and departments
//! - [`room`] - Rooms
//! - [`timetable`] - Timetable entries, time slots and generation
//! - [`enrollment`] - Student enrollments
//! - [`lecturer`] - Assignments, bookable slots and availability
//! - [`envelope`] - `{"data": [...]}` / bare-array list responses

pub mod course;
pub mod enrollment;
pub mod envelope;
pub mod lecturer;
pub mod room;
pub mod timetable;
pub mod user;

// Re-export commonly used types at crate root
pub use course::{Course, Department, Unit};
pub use enrollment::Enrollment;
pub use envelope::ListResponse;
pub use lecturer::{Assignment, AvailableSlot, ClassStatus, SlotStatus, UnitAvailability};
pub use room::Room;
pub use timetable::TimetableEntry;
pub use user::{Role, User};
