//! # Query cache
//!
//! Fetched API data keyed by a hierarchical [`QueryKey`]. Writes invalidate
//! every entry whose key starts with one of the prefixes the write declares
//! (see [`Mutation::invalidates`]), so `["lecturer"]` drops
//! `["lecturer", "assignments"]` and `["lecturer", "dashboard"]` alike.
//!
//! The cache itself is plain data. `app::state` wraps it in signals so that
//! an invalidation re-runs the affected queries.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Hierarchical cache key, e.g. `["student", "timetable"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(parts.into_iter().map(Into::into).collect())
    }

    /// Extend with one more segment.
    pub fn with(mut self, part: impl Into<String>) -> Self {
        self.0.push(part.into());
        self
    }

    pub fn parts(&self) -> &[String] {
        &self.0
    }

    /// True if `prefix` matches this key's leading segments.
    pub fn starts_with(&self, prefix: &[&str]) -> bool {
        prefix.len() <= self.0.len() && self.0.iter().zip(prefix).all(|(a, b)| a == b)
    }
}

impl From<&[&str]> for QueryKey {
    fn from(parts: &[&str]) -> Self {
        Self::new(parts.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for QueryKey {
    fn from(parts: [&str; N]) -> Self {
        Self::new(parts)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

/// Cache keys used by the data hooks.
pub mod keys {
    pub const COURSES: &[&str] = &["courses"];
    pub const AVAILABLE_COURSES: &[&str] = &["available_courses"];
    pub const DEPARTMENTS: &[&str] = &["departments"];
    pub const ROOMS: &[&str] = &["rooms"];
    pub const USERS: &[&str] = &["users"];
    pub const TIMETABLE: &[&str] = &["timetable"];
    pub const TIMETABLE_STATS: &[&str] = &["timetable", "stats"];
    pub const STUDENT_TIMETABLE: &[&str] = &["student", "timetable"];
    pub const STUDENT_ENROLLMENTS: &[&str] = &["student", "enrollments"];
    pub const STUDENT_DEPARTMENTS: &[&str] = &["student", "departments"];
    pub const LECTURER_ASSIGNMENTS: &[&str] = &["lecturer", "assignments"];
    pub const LECTURER_ASSIGNMENT: &[&str] = &["lecturer", "assignment"];
    pub const LECTURER_AVAILABLE_SLOTS: &[&str] = &["lecturer", "available_slots"];
    pub const LECTURER_DASHBOARD: &[&str] = &["lecturer", "dashboard"];
    pub const LECTURER_AVAILABILITY: &[&str] = &["lecturer", "availability"];
    pub const LECTURER_UNIT_AVAILABILITY: &[&str] = &["lecturer", "unit_availability"];
    pub const ALL_UNIT_AVAILABILITY: &[&str] = &["unit_availability", "all"];
}

/// Every write the client performs, for invalidation purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    AddCourse,
    UpdateCourse,
    DeleteCourse,
    AddUnit,
    AssignUnitLecturer,
    SetCourseRoom,
    AddRoom,
    UpdateRoom,
    DeleteRoom,
    CreateDepartment,
    AddTimeslot,
    GenerateTimetable,
    EnrollInCourse,
    SetLecturerAvailability,
    SelectTimeSlot,
    SetUnitAvailability,
    AssignRoomsToUnits,
    CreateUser,
    DeleteUser,
}

impl Mutation {
    /// Key prefixes made stale by a successful write.
    pub fn invalidates(self) -> &'static [&'static [&'static str]] {
        use keys::*;
        match self {
            Self::AddCourse
            | Self::UpdateCourse
            | Self::DeleteCourse
            | Self::AddUnit
            | Self::AssignUnitLecturer
            | Self::SetCourseRoom => &[COURSES],
            Self::AddRoom | Self::UpdateRoom | Self::DeleteRoom => &[ROOMS],
            Self::CreateDepartment => &[DEPARTMENTS],
            Self::AddTimeslot | Self::GenerateTimetable => &[TIMETABLE],
            Self::EnrollInCourse => &[STUDENT_ENROLLMENTS, STUDENT_TIMETABLE],
            Self::SetLecturerAvailability => &[LECTURER_AVAILABILITY],
            Self::SelectTimeSlot => &[
                LECTURER_ASSIGNMENTS,
                LECTURER_ASSIGNMENT,
                LECTURER_AVAILABLE_SLOTS,
            ],
            Self::SetUnitAvailability => &[
                LECTURER_ASSIGNMENTS,
                LECTURER_UNIT_AVAILABILITY,
                ALL_UNIT_AVAILABILITY,
            ],
            Self::AssignRoomsToUnits => &[COURSES, LECTURER_ASSIGNMENTS, LECTURER_ASSIGNMENT],
            Self::CreateUser | Self::DeleteUser => &[USERS],
        }
    }
}

struct Entry {
    generation: u64,
    value: Option<Rc<dyn Any>>,
}

/// Values by key, each with a generation counter bumped on invalidation.
///
/// A fetch records the generation it started under and stores its result
/// with [`QueryCache::insert_if_current`]; a response that raced with an
/// invalidation is dropped instead of resurrecting stale data.
#[derive(Default)]
pub struct QueryCache {
    entries: HashMap<QueryKey, Entry>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached value for `key`, if present and of type `T`.
    pub fn get<T: Clone + 'static>(&self, key: &QueryKey) -> Option<T> {
        self.entries
            .get(key)?
            .value
            .as_ref()?
            .downcast_ref::<T>()
            .cloned()
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.entries.get(key).is_some_and(|e| e.value.is_some())
    }

    /// Current generation of `key` (0 if never seen).
    pub fn generation(&self, key: &QueryKey) -> u64 {
        self.entries.get(key).map_or(0, |e| e.generation)
    }

    /// Register an in-flight fetch for `key` and return the generation to
    /// hand back to [`QueryCache::insert_if_current`].
    pub fn begin(&mut self, key: &QueryKey) -> u64 {
        self.entries
            .entry(key.clone())
            .or_insert(Entry {
                generation: 0,
                value: None,
            })
            .generation
    }

    pub fn insert<T: 'static>(&mut self, key: QueryKey, value: T) {
        let entry = self.entries.entry(key).or_insert(Entry {
            generation: 0,
            value: None,
        });
        entry.value = Some(Rc::new(value));
    }

    /// Store `value` only if `key` has not been invalidated since
    /// `generation` was read. Returns whether it was stored.
    pub fn insert_if_current<T: 'static>(&mut self, key: QueryKey, generation: u64, value: T) -> bool {
        if self.generation(&key) != generation {
            tracing::debug!("Dropping stale response for {}", key);
            return false;
        }
        self.insert(key, value);
        true
    }

    /// Drop every entry under `prefix`. Returns how many held a value.
    pub fn invalidate(&mut self, prefix: &[&str]) -> usize {
        let mut dropped = 0;
        for (key, entry) in self.entries.iter_mut() {
            if key.starts_with(prefix) {
                entry.generation += 1;
                if entry.value.take().is_some() {
                    dropped += 1;
                }
            }
        }
        dropped
    }

    /// Apply a mutation's invalidation table.
    pub fn invalidate_for(&mut self, mutation: Mutation) -> usize {
        mutation
            .invalidates()
            .iter()
            .map(|prefix| self.invalidate(prefix))
            .sum()
    }

    /// Drop everything (sign-out).
    pub fn clear(&mut self) {
        for entry in self.entries.values_mut() {
            entry.generation += 1;
            entry.value = None;
        }
    }

    pub fn len(&self) -> usize {
        self.entries.values().filter(|e| e.value.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryCache")
            .field("entries", &self.len())
            .finish()
    }
}
