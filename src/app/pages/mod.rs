//! Routed page components, grouped by portal.

mod account;
mod admin;
mod auth;
mod lecturer;
mod public;
mod student;

pub use account::{AdminAccount, LecturerAccount, StudentAccount};
pub use admin::{
    AdminCourseDetail, AdminCourses, AdminDashboard, AdminDepartments, AdminRooms, AdminSettings,
    AdminTimetable, AdminUsers,
};
pub use auth::{
    AdminLogin, AdminRegister, LecturerLogin, LecturerRegister, Login, Register, StudentLogin,
    StudentRegister,
};
pub use lecturer::{LecturerAvailability, LecturerCourses, LecturerDashboard, LecturerSchedule};
pub use public::{Forbidden, Index, NotFound};
pub use student::{StudentClashes, StudentCourses, StudentDashboard, StudentTimetable};
