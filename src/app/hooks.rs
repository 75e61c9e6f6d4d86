//! Data hooks: one cached query per read endpoint.
//!
//! Writes go through [`AppState::mutate`](super::state::AppState::mutate)
//! with the matching [`Mutation`](crate::query::Mutation), which invalidates
//! the keys below by prefix.

use std::future::Future;

use dioxus::prelude::*;
use timetable_types::lecturer::LecturerDashboard;
use timetable_types::timetable::TimetableStats;
use timetable_types::{
    Assignment, AvailableSlot, Course, Department, Enrollment, Room, TimetableEntry,
    UnitAvailability, User,
};

use super::state::use_app;
use crate::api::{ApiClient, ApiResult};
use crate::query::{keys, QueryKey};

/// Handle to a cached query. `Copy`, like the resource it wraps.
pub struct Query<T: 'static> {
    resource: Resource<Result<T, String>>,
}

impl<T: 'static> Clone for Query<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for Query<T> {}

impl<T: Clone + 'static> Query<T> {
    /// The data, once loaded successfully.
    pub fn data(&self) -> Option<T> {
        match &*self.resource.read() {
            Some(Ok(value)) => Some(value.clone()),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.resource.read().is_none()
    }

    pub fn error(&self) -> Option<String> {
        match &*self.resource.read() {
            Some(Err(message)) => Some(message.clone()),
            _ => None,
        }
    }

    pub fn restart(&mut self) {
        self.resource.restart();
    }
}

impl<T: Clone + Default + 'static> Query<T> {
    /// The data, or the empty value while loading or after a failure.
    pub fn data_or_default(&self) -> T {
        self.data().unwrap_or_default()
    }
}

/// Bind `fetch` to `key`.
///
/// Answers from the cache when it holds `key`; otherwise fetches, stores
/// the result (unless invalidated meanwhile) and reports failures. Failures
/// are not cached.
pub fn use_query<T, F, Fut>(key: QueryKey, fallback: &'static str, fetch: F) -> Query<T>
where
    T: Clone + 'static,
    F: Fn(ApiClient) -> Fut + 'static,
    Fut: Future<Output = ApiResult<T>> + 'static,
{
    let state = use_app();
    let queries = state.queries;

    let resource = use_resource(move || {
        queries.subscribe();
        let key = key.clone();
        let cached = queries.cached::<T>(&key);
        let generation = queries.begin(&key);
        // Futures are lazy: nothing is sent unless this is awaited
        let request = fetch(state.api());

        async move {
            if let Some(value) = cached {
                return Ok(value);
            }
            tracing::debug!("Fetching {}", key);
            match request.await {
                Ok(value) => {
                    queries.store(key, generation, value.clone());
                    Ok(value)
                }
                Err(e) => {
                    tracing::warn!("Query {} failed: {}", key, e);
                    let message = e.to_string();
                    state.report(&e, fallback);
                    Err(message)
                }
            }
        }
    });

    Query { resource }
}

// ==================== Admin ====================

pub fn use_courses() -> Query<Vec<Course>> {
    use_query(keys::COURSES.into(), "Failed to load courses", |api| async move {
        api.courses().await
    })
}

pub fn use_departments() -> Query<Vec<Department>> {
    use_query(
        keys::DEPARTMENTS.into(),
        "Failed to load departments",
        |api| async move { api.departments().await },
    )
}

pub fn use_rooms() -> Query<Vec<Room>> {
    use_query(keys::ROOMS.into(), "Failed to load rooms", |api| async move {
        api.rooms().await
    })
}

pub fn use_users() -> Query<Vec<User>> {
    use_query(keys::USERS.into(), "Failed to load users", |api| async move {
        api.list_users().await
    })
}

pub fn use_timetable() -> Query<Vec<TimetableEntry>> {
    use_query(keys::TIMETABLE.into(), "Failed to load timetable", |api| async move {
        api.timetable().await
    })
}

pub fn use_timetable_stats(semester: u32, academic_year: u32) -> Query<TimetableStats> {
    let key = QueryKey::from(keys::TIMETABLE_STATS)
        .with(semester.to_string())
        .with(academic_year.to_string());
    use_query(key, "Failed to load timetable statistics", move |api| async move {
        api.timetable_stats(semester, academic_year).await
    })
}

pub fn use_all_unit_availability() -> Query<Vec<UnitAvailability>> {
    use_query(
        keys::ALL_UNIT_AVAILABILITY.into(),
        "Failed to load lecturer availability",
        |api| async move { api.all_unit_availability().await },
    )
}

// ==================== Student ====================

pub fn use_student_timetable() -> Query<Vec<TimetableEntry>> {
    use_query(
        keys::STUDENT_TIMETABLE.into(),
        "Failed to load your timetable",
        |api| async move { api.student_timetable().await },
    )
}

pub fn use_student_enrollments() -> Query<Vec<Enrollment>> {
    use_query(
        keys::STUDENT_ENROLLMENTS.into(),
        "Failed to load your enrollments",
        |api| async move { api.student_enrollments().await },
    )
}

pub fn use_available_courses() -> Query<Vec<Course>> {
    use_query(
        keys::AVAILABLE_COURSES.into(),
        "Failed to load courses",
        |api| async move { api.available_courses().await },
    )
}

pub fn use_student_departments() -> Query<Vec<Department>> {
    use_query(
        keys::STUDENT_DEPARTMENTS.into(),
        "Failed to load departments",
        |api| async move { api.student_departments().await },
    )
}

// ==================== Lecturer ====================

pub fn use_lecturer_assignments() -> Query<Vec<Assignment>> {
    use_query(
        keys::LECTURER_ASSIGNMENTS.into(),
        "Failed to load your assignments",
        |api| async move { api.lecturer_assignments().await },
    )
}

/// One assignment, fetched fresh. Mount under a component keyed by the id.
pub fn use_lecturer_assignment(assignment_id: String) -> Query<Assignment> {
    let key = QueryKey::from(keys::LECTURER_ASSIGNMENT).with(assignment_id.clone());
    use_query(key, "Failed to load assignment", move |api| {
        let id = assignment_id.clone();
        async move { api.lecturer_assignment(&id).await }
    })
}

/// Slots for one assignment. Mount under a component keyed by the id.
pub fn use_available_slots(assignment_id: String) -> Query<Vec<AvailableSlot>> {
    let key = QueryKey::from(keys::LECTURER_AVAILABLE_SLOTS).with(assignment_id.clone());
    use_query(key, "Failed to load available slots", move |api| {
        let id = assignment_id.clone();
        async move { api.available_slots(&id).await }
    })
}

pub fn use_lecturer_dashboard() -> Query<LecturerDashboard> {
    use_query(
        keys::LECTURER_DASHBOARD.into(),
        "Failed to load dashboard",
        |api| async move { api.lecturer_dashboard().await },
    )
}

pub fn use_unit_availability() -> Query<Vec<UnitAvailability>> {
    use_query(
        keys::LECTURER_UNIT_AVAILABILITY.into(),
        "Failed to load unit availability",
        |api| async move { api.unit_availability().await },
    )
}
