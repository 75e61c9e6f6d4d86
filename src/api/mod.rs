//! # API Client
//!
//! HTTP client for the timetable REST API.
//!
//! Every call goes through [`ApiClient::request`], which joins the base URL
//! and endpoint, attaches the bearer token (read fresh from the
//! [`TokenStore`] on each call) and turns non-success responses into
//! [`ApiError`]s. No retry, no timeout: a failed request surfaces as-is.

mod error;

pub use error::{extract_server_message, ApiError, ApiResult};

use std::sync::Arc;

use reqwest::{Client, Method};
use serde::{de::DeserializeOwned, Serialize};

use timetable_types::course::{
    AssignLecturer, Course, CourseUpdate, Department, NewCourse, NewDepartment, NewUnit,
    SetCourseRoom,
};
use timetable_types::enrollment::{EnrollRequest, EnrollResponse, Enrollment};
use timetable_types::lecturer::{
    Assignment, AvailabilityRequest, AvailableSlot, LecturerDashboard, SelectSlotRequest,
    SelectSlotResponse, UnitAvailability,
};
use timetable_types::room::{Room, RoomForm};
use timetable_types::timetable::{
    GenerateRequest, GenerateResponse, NewTimeslot, RoomAssignmentResponse, TimetableEntry,
    TimetableStats,
};
use timetable_types::user::{
    AdminRegistration, GoogleSignInRequest, LecturerRegistration, LoginRequest, LoginResponse,
    MeResponse, MessageResponse, NotificationPreferences, PasswordChange, ProfileUpdate,
    StudentRegistration, User,
};
use timetable_types::ListResponse;

use crate::auth::TokenStore;

/// What kind of body a request carries. Decides the `Content-Type` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Empty,
    Json,
    /// The transport writes its own `multipart/form-data; boundary=...` header.
    Multipart,
}

impl BodyKind {
    /// Explicit `Content-Type` to send, if any.
    pub fn content_type(self) -> Option<&'static str> {
        match self {
            Self::Empty | Self::Json => Some("application/json"),
            Self::Multipart => None,
        }
    }
}

enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Multipart(reqwest::multipart::Form),
}

impl RequestBody {
    fn kind(&self) -> BodyKind {
        match self {
            Self::Empty => BodyKind::Empty,
            Self::Json(_) => BodyKind::Json,
            Self::Multipart(_) => BodyKind::Multipart,
        }
    }
}

/// Join a base URL (no trailing slash) and an endpoint path.
pub fn join_url(base_url: &str, endpoint: &str) -> String {
    if endpoint.starts_with('/') {
        format!("{base_url}{endpoint}")
    } else {
        format!("{base_url}/{endpoint}")
    }
}

/// Percent-encode one path segment (ids come from the backend verbatim).
fn seg(value: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(value)
}

/// HTTP client for the timetable API.
///
/// Cheaply cloneable; share one instance through the Dioxus context.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
    tokens: Arc<dyn TokenStore>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
            tokens,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The token store this client reads on every request.
    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    pub fn set_token(&self, token: &str) {
        self.tokens.set(token);
    }

    pub fn clear_token(&self) {
        self.tokens.clear();
    }

    pub fn has_token(&self) -> bool {
        self.tokens.get().is_some()
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: RequestBody,
    ) -> ApiResult<T> {
        let url = join_url(&self.base_url, endpoint);
        tracing::debug!(%method, %url, "API request");

        let mut req = self.http.request(method.clone(), &url);
        if let Some(content_type) = body.kind().content_type() {
            req = req.header(reqwest::header::CONTENT_TYPE, content_type);
        }
        if let Some(token) = self.tokens.get() {
            req = req.bearer_auth(token);
        }
        req = match body {
            RequestBody::Empty => req,
            RequestBody::Json(value) => req.body(value.to_string()),
            RequestBody::Multipart(form) => req.multipart(form),
        };

        let res = req.send().await.map_err(|e| {
            tracing::warn!(%method, %url, "API request failed: {}", e);
            ApiError::Network(e)
        })?;

        let status = res.status();
        let text = res.text().await?;

        if !status.is_success() {
            let err = ApiError::from_status(status.as_u16(), &text);
            tracing::warn!(%method, %url, status = status.as_u16(), "API error: {}", err);
            return Err(err);
        }

        // Some endpoints answer 2xx with an empty body
        let text = if text.trim().is_empty() { "{}" } else { &text };
        serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        self.request(Method::GET, endpoint, RequestBody::Empty).await
    }

    async fn get_list<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<Vec<T>> {
        self.get::<ListResponse<T>>(endpoint)
            .await
            .map(ListResponse::into_vec)
    }

    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: &B,
    ) -> ApiResult<T> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.request(method, endpoint, RequestBody::Json(value)).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.send_json(Method::POST, endpoint, body).await
    }

    async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.send_json(Method::PUT, endpoint, body).await
    }

    async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        self.request(Method::DELETE, endpoint, RequestBody::Empty).await
    }

    /// POST a multipart form (file uploads). No JSON content type is sent.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        form: reqwest::multipart::Form,
    ) -> ApiResult<T> {
        self.request(Method::POST, endpoint, RequestBody::Multipart(form))
            .await
    }

    // ==================== Auth ====================

    pub async fn login(&self, req: &LoginRequest) -> ApiResult<LoginResponse> {
        self.post("/auth/login", req).await
    }

    pub async fn register_student(&self, req: &StudentRegistration) -> ApiResult<MessageResponse> {
        self.post("/auth/register/student", req).await
    }

    pub async fn register_lecturer(
        &self,
        req: &LecturerRegistration,
    ) -> ApiResult<MessageResponse> {
        self.post("/auth/register/lecturer", req).await
    }

    pub async fn register_admin(&self, req: &AdminRegistration) -> ApiResult<MessageResponse> {
        self.post("/auth/register/admin", req).await
    }

    /// `GET /auth/me`: the user behind the current token.
    pub async fn me(&self) -> ApiResult<User> {
        self.get::<MeResponse>("/auth/me").await.map(|r| r.user)
    }

    pub async fn google_sign_in(&self, req: &GoogleSignInRequest) -> ApiResult<LoginResponse> {
        self.post("/auth/google/signin", req).await
    }

    pub async fn list_users(&self) -> ApiResult<Vec<User>> {
        self.get_list("/auth/users").await
    }

    pub async fn create_lecturer(&self, req: &LecturerRegistration) -> ApiResult<MessageResponse> {
        self.post("/auth/create/lecturer", req).await
    }

    pub async fn create_admin(&self, req: &AdminRegistration) -> ApiResult<MessageResponse> {
        self.post("/auth/create/admin", req).await
    }

    pub async fn delete_user(&self, user_id: &str) -> ApiResult<MessageResponse> {
        self.delete(&format!("/auth/users/{}", seg(user_id))).await
    }

    pub async fn update_profile(&self, req: &ProfileUpdate) -> ApiResult<MessageResponse> {
        self.put("/auth/profile", req).await
    }

    pub async fn set_notification_preferences(
        &self,
        prefs: &NotificationPreferences,
    ) -> ApiResult<MessageResponse> {
        self.post("/auth/notification-preferences", prefs).await
    }

    pub async fn change_password(&self, req: &PasswordChange) -> ApiResult<MessageResponse> {
        self.post("/auth/change-password", req).await
    }

    pub async fn delete_account(&self) -> ApiResult<MessageResponse> {
        self.delete("/auth/account").await
    }

    /// Everything the backend holds about the current user, as raw JSON.
    pub async fn data_export(&self) -> ApiResult<serde_json::Value> {
        self.get("/auth/data-export").await
    }

    // ==================== Student ====================

    pub async fn student_timetable(&self) -> ApiResult<Vec<TimetableEntry>> {
        self.get_list("/student/timetable").await
    }

    pub async fn student_enrollments(&self) -> ApiResult<Vec<Enrollment>> {
        self.get_list("/student/enrollments").await
    }

    pub async fn enroll(
        &self,
        course_id: &str,
        unit_ids: Vec<String>,
    ) -> ApiResult<EnrollResponse> {
        self.post(
            &format!("/student/enroll/{}", seg(course_id)),
            &EnrollRequest { unit_ids },
        )
        .await
    }

    pub async fn available_courses(&self) -> ApiResult<Vec<Course>> {
        self.get_list("/student/courses").await
    }

    pub async fn student_departments(&self) -> ApiResult<Vec<Department>> {
        self.get_list("/student/departments").await
    }

    // ==================== Lecturer ====================

    pub async fn lecturer_assignments(&self) -> ApiResult<Vec<Assignment>> {
        self.get_list("/lecturer/assignments").await
    }

    pub async fn lecturer_assignment(&self, assignment_id: &str) -> ApiResult<Assignment> {
        self.get(&format!("/lecturer/assignments/{}", seg(assignment_id)))
            .await
    }

    pub async fn available_slots(&self, assignment_id: &str) -> ApiResult<Vec<AvailableSlot>> {
        self.get_list(&format!("/lecturer/available-slots/{}", seg(assignment_id)))
            .await
    }

    pub async fn select_time_slot(&self, req: &SelectSlotRequest) -> ApiResult<SelectSlotResponse> {
        self.post("/lecturer/select-time-slot", req).await
    }

    pub async fn lecturer_dashboard(&self) -> ApiResult<LecturerDashboard> {
        self.get("/lecturer/dashboard").await
    }

    pub async fn set_lecturer_availability(
        &self,
        req: &AvailabilityRequest,
    ) -> ApiResult<MessageResponse> {
        self.post("/lecturer/availability", req).await
    }

    pub async fn set_unit_availability(
        &self,
        unit_id: &str,
        available: bool,
    ) -> ApiResult<MessageResponse> {
        let body = UnitAvailability {
            unit_id: unit_id.to_string(),
            available,
        };
        self.post("/lecturer/availability/unit", &body).await
    }

    pub async fn unit_availability(&self) -> ApiResult<Vec<UnitAvailability>> {
        self.get_list("/lecturer/availability/unit").await
    }

    pub async fn all_unit_availability(&self) -> ApiResult<Vec<UnitAvailability>> {
        self.get_list("/lecturer/availability/unit/all").await
    }

    // ==================== Admin ====================

    pub async fn courses(&self) -> ApiResult<Vec<Course>> {
        self.get_list("/admin/courses").await
    }

    pub async fn create_course(&self, course: &NewCourse) -> ApiResult<MessageResponse> {
        self.post("/admin/course", course).await
    }

    pub async fn update_course(&self, course_id: &str, update: &CourseUpdate) -> ApiResult<Course> {
        self.put(&format!("/admin/course/{}", seg(course_id)), update)
            .await
    }

    pub async fn delete_course(&self, course_id: &str) -> ApiResult<MessageResponse> {
        self.delete(&format!("/admin/course/{}", seg(course_id))).await
    }

    pub async fn add_unit(&self, course_id: &str, unit: &NewUnit) -> ApiResult<Course> {
        self.post(&format!("/admin/course/{}/unit", seg(course_id)), unit)
            .await
    }

    pub async fn assign_unit_lecturer(
        &self,
        course_id: &str,
        unit_id: &str,
        lecturer_email: &str,
    ) -> ApiResult<Course> {
        let body = AssignLecturer {
            lecturer_email: lecturer_email.to_string(),
        };
        self.put(
            &format!(
                "/admin/course/{}/unit/{}/assign",
                seg(course_id),
                seg(unit_id)
            ),
            &body,
        )
        .await
    }

    pub async fn set_course_room(&self, course_id: &str, room_id: &str) -> ApiResult<Course> {
        let body = SetCourseRoom {
            room_id: room_id.to_string(),
        };
        self.put(&format!("/admin/course/{}/room", seg(course_id)), &body)
            .await
    }

    pub async fn departments(&self) -> ApiResult<Vec<Department>> {
        self.get_list("/admin/departments").await
    }

    pub async fn create_department(&self, name: &str) -> ApiResult<MessageResponse> {
        let body = NewDepartment {
            name: name.to_string(),
        };
        self.post("/admin/department", &body).await
    }

    pub async fn rooms(&self) -> ApiResult<Vec<Room>> {
        self.get_list("/admin/rooms").await
    }

    pub async fn create_room(&self, room: &RoomForm) -> ApiResult<MessageResponse> {
        self.post("/admin/room", room).await
    }

    pub async fn update_room(&self, room_id: &str, room: &RoomForm) -> ApiResult<Room> {
        self.put(&format!("/admin/room/{}", seg(room_id)), room).await
    }

    pub async fn delete_room(&self, room_id: &str) -> ApiResult<MessageResponse> {
        self.delete(&format!("/admin/room/{}", seg(room_id))).await
    }

    pub async fn timetable(&self) -> ApiResult<Vec<TimetableEntry>> {
        self.get_list("/admin/timetable").await
    }

    pub async fn create_timeslot(&self, slot: &NewTimeslot) -> ApiResult<MessageResponse> {
        self.post("/admin/timeslot", slot).await
    }

    pub async fn assign_rooms_to_units(&self) -> ApiResult<RoomAssignmentResponse> {
        self.request(
            Method::POST,
            "/admin/assign-rooms-to-units",
            RequestBody::Empty,
        )
        .await
    }

    // ==================== Timetable ====================

    pub async fn generate_timetable(&self, req: &GenerateRequest) -> ApiResult<GenerateResponse> {
        self.post("/timetable/generate", req).await
    }

    pub async fn timetable_stats(
        &self,
        semester: u32,
        academic_year: u32,
    ) -> ApiResult<TimetableStats> {
        self.get(&format!(
            "/timetable/stats?semester={semester}&academic_year={academic_year}"
        ))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multipart_gets_no_json_content_type() {
        assert_eq!(BodyKind::Json.content_type(), Some("application/json"));
        assert_eq!(BodyKind::Empty.content_type(), Some("application/json"));
        assert_eq!(BodyKind::Multipart.content_type(), None);
    }

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("http://localhost:8000", "/auth/me"),
            "http://localhost:8000/auth/me"
        );
        assert_eq!(
            join_url("http://localhost:8000", "auth/me"),
            "http://localhost:8000/auth/me"
        );
    }

    #[test]
    fn test_source_fits_line_width() {
        let long: Vec<usize> = include_str!("mod.rs")
            .lines()
            .enumerate()
            .filter(|(_, line)| line.chars().count() > 100)
            .map(|(i, _)| i + 1)
            .collect();
        assert!(long.is_empty(), "lines over 100 columns: {long:?}");
    }

    #[test]
    fn test_path_segments_are_encoded() {
        assert_eq!(seg("65f0c0ffee"), "65f0c0ffee");
        assert_eq!(seg("a/b c"), "a%2Fb%20c");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new(
            "http://api.local/",
            Arc::new(crate::auth::MemoryTokenStore::default()),
        );
        assert_eq!(client.base_url(), "http://api.local");
        assert!(!client.has_token());
        client.set_token("t");
        assert!(client.has_token());
        client.clear_token();
        assert!(!client.has_token());
    }
}
