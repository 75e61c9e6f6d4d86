//! # Form validation
//!
//! Checks run in the browser before a form is submitted. Every failure
//! carries a short title and a description, shown together as a toast.
//! The backend validates again; these only save a round trip.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use timetable_types::course::{NewCourse, NewUnit};
use timetable_types::user::{AdminRegistration, LecturerRegistration, PasswordChange, StudentRegistration};
use timetable_types::room::RoomForm;
use timetable_types::timetable::NewTimeslot;
use timetable_types::Role;

pub const MIN_PASSWORD_LEN: usize = 6;

/// `ABC001-2345/2024`: three letters, three digits, four digits, four-digit year.
static REGISTRATION_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3}\d{3}-\d{4}/\d{4}$").expect("Invalid regex"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{title}: {message}")]
pub struct ValidationError {
    pub title: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(title: &'static str, message: impl Into<String>) -> Self {
        Self {
            title,
            message: message.into(),
        }
    }
}

type Validated<T> = Result<T, ValidationError>;

fn ensure(ok: bool, title: &'static str, message: &str) -> Validated<()> {
    if ok {
        Ok(())
    } else {
        Err(ValidationError::new(title, message))
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn is_student_email(email: &str) -> bool {
    email.contains("@students.")
}

pub fn is_valid_registration_number(value: &str) -> bool {
    REGISTRATION_NUMBER.is_match(&value.trim().to_uppercase())
}

fn check_passwords(password: &str, confirm: &str, mismatch: &str) -> Validated<()> {
    ensure(password == confirm, "Passwords Don't Match", mismatch)?;
    ensure(
        password.len() >= MIN_PASSWORD_LEN,
        "Weak Password",
        "Password must be at least 6 characters",
    )
}

pub fn validate_login(email: &str, password: &str) -> Validated<()> {
    ensure(
        !is_blank(email) && !password.is_empty(),
        "Missing Fields",
        "Please enter your email and password",
    )
}

/// Sign-in checks for a role's own login page.
pub fn validate_role_login(role: Role, email: &str, password: &str) -> Validated<()> {
    validate_login(email, password)?;
    match role {
        Role::Student => ensure(
            is_student_email(email),
            "Invalid Email",
            "Student emails must be in format: name@students.domain",
        ),
        Role::Lecturer => ensure(
            !is_student_email(email),
            "Invalid Email",
            "Lecturer emails should not contain @students",
        ),
        Role::Admin => Ok(()),
    }
}

/// Student self-registration form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentSignup {
    pub email: String,
    pub name: String,
    pub registration_number: String,
    pub password: String,
    pub confirm_password: String,
}

impl StudentSignup {
    pub fn validate(&self) -> Validated<StudentRegistration> {
        ensure(
            is_student_email(&self.email),
            "Invalid Email",
            "Student emails must be in format: name@students.domain",
        )?;
        ensure(
            is_valid_registration_number(&self.registration_number),
            "Invalid Registration Number",
            "Format must be: ABC001-2345/2024 (3 letters, 3 numbers, dash, 4 numbers, slash, 4-digit year)",
        )?;
        check_passwords(
            &self.password,
            &self.confirm_password,
            "Please ensure both passwords are the same",
        )?;
        Ok(StudentRegistration {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            name: self.name.trim().to_string(),
            registration_number: self.registration_number.trim().to_uppercase(),
        })
    }
}

/// Lecturer or admin account form, used for self-registration and for
/// accounts an admin creates.
#[derive(Debug, Clone, PartialEq)]
pub struct StaffSignup {
    pub role: Role,
    pub email: String,
    pub name: String,
    /// Lecturer id or admin id, depending on `role`
    pub identifier: String,
    pub password: String,
    pub confirm_password: String,
}

/// A validated staff account payload.
#[derive(Debug, Clone, PartialEq)]
pub enum NewStaff {
    Lecturer(LecturerRegistration),
    Admin(AdminRegistration),
}

impl StaffSignup {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            email: String::new(),
            name: String::new(),
            identifier: String::new(),
            password: String::new(),
            confirm_password: String::new(),
        }
    }

    /// Checks for the lecturer and admin registration pages.
    pub fn validate_registration(&self) -> Validated<NewStaff> {
        match self.role {
            Role::Admin => {
                ensure(
                    !is_blank(&self.email)
                        && !is_blank(&self.name)
                        && !is_blank(&self.identifier)
                        && !self.password.is_empty()
                        && !self.confirm_password.is_empty(),
                    "Missing Fields",
                    "All fields are required",
                )?;
                ensure(self.email.contains('@'), "Invalid Email", "Please enter a valid email address")?;
                ensure(
                    self.name.trim().chars().count() >= 2,
                    "Invalid Name",
                    "Name must be at least 2 characters",
                )?;
                ensure(
                    self.identifier.trim().chars().count() >= 3,
                    "Invalid Admin ID",
                    "Admin ID must be at least 3 characters",
                )?;
                check_passwords(&self.password, &self.confirm_password, "Please ensure your passwords match")?;
            }
            Role::Lecturer => {
                ensure(
                    !is_student_email(&self.email),
                    "Invalid Email",
                    "Lecturer emails should not contain @students",
                )?;
                ensure(self.email.contains('@'), "Invalid Email", "Please enter a valid email address")?;
                check_passwords(
                    &self.password,
                    &self.confirm_password,
                    "Please ensure both passwords are the same",
                )?;
                ensure(
                    !is_blank(&self.identifier),
                    "Missing Lecturer ID",
                    "Please enter the lecturer ID assigned by your admin",
                )?;
            }
            Role::Student => {
                return Err(ValidationError::new(
                    "Invalid Role",
                    "Students register with a registration number",
                ))
            }
        }
        Ok(self.payload())
    }

    /// Checks for the admin "create user" dialog.
    pub fn validate_creation(&self) -> Validated<NewStaff> {
        ensure(
            !is_blank(&self.email) && !is_blank(&self.name),
            "Missing Fields",
            "Email and name are required",
        )?;
        ensure(self.email.contains('@'), "Invalid Email", "Please enter a valid email address")?;

        let (label, id_title, id_message, pw_message) = match self.role {
            Role::Lecturer => (
                "Lecturer",
                "Missing Lecturer ID",
                "Please enter the lecturer ID",
                "Please enter a password for the lecturer",
            ),
            Role::Admin => (
                "Admin",
                "Missing Admin ID",
                "Please enter the admin ID",
                "Please set an initial password for the admin",
            ),
            Role::Student => {
                return Err(ValidationError::new(
                    "Invalid Role",
                    "Only lecturer and admin accounts can be created here",
                ))
            }
        };
        ensure(
            !is_student_email(&self.email),
            "Invalid Email",
            &format!("{label} emails should not contain @students"),
        )?;
        ensure(!is_blank(&self.identifier), id_title, id_message)?;
        ensure(!self.password.is_empty(), "Missing Password", pw_message)?;
        ensure(
            self.password.len() >= MIN_PASSWORD_LEN,
            "Weak Password",
            "Password must be at least 6 characters long",
        )?;
        ensure(
            self.password == self.confirm_password,
            "Passwords Don't Match",
            "Please ensure both passwords match",
        )?;
        Ok(self.payload())
    }

    fn payload(&self) -> NewStaff {
        let email = self.email.trim().to_string();
        let name = self.name.trim().to_string();
        let id = self.identifier.trim().to_string();
        match self.role {
            Role::Admin => NewStaff::Admin(AdminRegistration {
                email,
                password: self.password.clone(),
                name,
                admin_id: id,
            }),
            _ => NewStaff::Lecturer(LecturerRegistration {
                email,
                password: self.password.clone(),
                name,
                lecturer_id: id,
            }),
        }
    }
}

pub fn validate_password_change(current: &str, new: &str, confirm: &str) -> Validated<PasswordChange> {
    ensure(
        !current.is_empty() && !new.is_empty() && !confirm.is_empty(),
        "Missing Fields",
        "All password fields are required",
    )?;
    ensure(
        new.len() >= MIN_PASSWORD_LEN,
        "Weak Password",
        "New password must be at least 6 characters",
    )?;
    ensure(
        new == confirm,
        "Passwords Don't Match",
        "New password and confirm password must match",
    )?;
    Ok(PasswordChange {
        current_password: current.to_string(),
        new_password: new.to_string(),
    })
}

pub fn validate_enrollment(course_id: Option<&str>, unit_ids: &[String]) -> Validated<()> {
    ensure(
        course_id.is_some_and(|c| !is_blank(c)),
        "Error",
        "Please select a course",
    )?;
    ensure(!unit_ids.is_empty(), "Error", "Please select at least one unit")
}

pub fn validate_department_name(name: &str) -> Validated<String> {
    ensure(!is_blank(name), "Missing Fields", "Department name is required")?;
    Ok(name.trim().to_string())
}

pub fn validate_course(course: &NewCourse) -> Validated<()> {
    ensure(
        !is_blank(&course.code) && !is_blank(&course.name),
        "Missing Fields",
        "Course code and name are required",
    )?;
    ensure(
        !is_blank(&course.department_id),
        "Missing Fields",
        "Please select a department",
    )?;
    ensure(
        course.duration_years > 0,
        "Invalid Duration",
        "Course duration must be at least one year",
    )
}

pub fn validate_unit(unit: &NewUnit) -> Validated<()> {
    ensure(
        !is_blank(&unit.code) && !is_blank(&unit.name),
        "Missing Fields",
        "Unit code and name are required",
    )?;
    ensure(
        (1..=2).contains(&unit.semester),
        "Invalid Semester",
        "Semester must be 1 or 2",
    )
}

pub fn validate_room(room: &RoomForm) -> Validated<()> {
    ensure(
        !is_blank(&room.code) && !is_blank(&room.name),
        "Missing Fields",
        "Room code and name are required",
    )?;
    ensure(room.capacity > 0, "Invalid Capacity", "Capacity must be greater than zero")
}

fn parse_time(value: &str) -> Option<chrono::NaiveTime> {
    chrono::NaiveTime::parse_from_str(value.trim(), "%H:%M").ok()
}

pub fn validate_timeslot(slot: &NewTimeslot) -> Validated<()> {
    let (Some(start), Some(end)) = (parse_time(&slot.start_time), parse_time(&slot.end_time)) else {
        return Err(ValidationError::new("Invalid Time", "Times must be in HH:MM format"));
    };
    ensure(start < end, "Invalid Time", "End time must be after start time")?;
    ensure(
        (1..=2).contains(&slot.semester),
        "Invalid Semester",
        "Semester must be 1 or 2",
    )?;
    let hours = (end - start).num_minutes() as f64 / 60.0;
    ensure(
        f64::from(slot.duration_hours) == hours,
        "Invalid Duration",
        "Duration must match the start and end times",
    )
}

pub fn validate_lecturer_email(email: &str) -> Validated<String> {
    let email = email.trim();
    ensure(email.contains('@'), "Invalid Email", "Please enter a valid email address")?;
    ensure(
        !is_student_email(email),
        "Invalid Email",
        "Lecturer emails should not contain @students",
    )?;
    Ok(email.to_string())
}
