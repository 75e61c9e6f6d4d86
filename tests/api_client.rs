//! ApiClient against a local mock of the timetable API.

mod common;

use common::MockApi;
use timetable_portal::api::ApiError;

#[tokio::test]
async fn test_bearer_token_attached_when_stored() {
    let mock = MockApi::start(vec![("GET", "/admin/departments", 200, "[]")]).await;

    mock.client_with_token("tok-123").departments().await.unwrap();
    assert_eq!(mock.last().authorization.as_deref(), Some("Bearer tok-123"));

    mock.client().departments().await.unwrap();
    assert_eq!(mock.last().authorization, None);
}

#[tokio::test]
async fn test_token_read_fresh_on_each_call() {
    let mock = MockApi::start(vec![("GET", "/admin/rooms", 200, "[]")]).await;
    let api = mock.client();

    api.set_token("first");
    api.rooms().await.unwrap();
    assert_eq!(mock.last().authorization.as_deref(), Some("Bearer first"));

    api.clear_token();
    api.rooms().await.unwrap();
    assert_eq!(mock.last().authorization, None);
}

#[tokio::test]
async fn test_json_body_and_content_type() {
    let mock = MockApi::start(vec![(
        "POST",
        "/admin/department",
        200,
        r#"{"message": "Department created"}"#,
    )])
    .await;

    let resp = mock.client().create_department("Physics").await.unwrap();
    assert_eq!(resp.message.as_deref(), Some("Department created"));

    let req = mock.last();
    assert_eq!(req.method, "POST");
    assert_eq!(req.content_type.as_deref(), Some("application/json"));
    let body: serde_json::Value = serde_json::from_str(&req.body).unwrap();
    assert_eq!(body, serde_json::json!({"name": "Physics"}));
}

#[tokio::test]
async fn test_multipart_uses_transport_content_type() {
    let mock = MockApi::start(vec![("POST", "/uploads", 200, "{}")]).await;

    let form = reqwest::multipart::Form::new().text("note", "timetable.csv");
    let _: serde_json::Value = mock.client().post_multipart("/uploads", form).await.unwrap();

    let content_type = mock.last().content_type.unwrap();
    assert!(
        content_type.starts_with("multipart/form-data; boundary="),
        "unexpected content type {content_type}"
    );
}

#[tokio::test]
async fn test_list_envelope_and_bare_array() {
    let mock = MockApi::start(vec![
        (
            "GET",
            "/admin/departments",
            200,
            r#"{"data": [{"id": "d1", "name": "Physics"}, {"_id": "d2", "name": "Maths"}]}"#,
        ),
        (
            "GET",
            "/admin/rooms",
            200,
            r#"[{"id": "r1", "code": "LT-01", "name": "Lecture Theatre 1", "capacity": 120}]"#,
        ),
    ])
    .await;
    let api = mock.client();

    let departments = api.departments().await.unwrap();
    let ids: Vec<_> = departments.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, ["d1", "d2"]);

    let rooms = api.rooms().await.unwrap();
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0].capacity, 120);
}

#[tokio::test]
async fn test_error_status_mapping() {
    let mock = MockApi::start(vec![
        ("GET", "/admin/rooms", 401, r#"{"detail": "Could not validate credentials"}"#),
        ("GET", "/admin/timetable", 403, r#"{"detail": "Admin access required"}"#),
        ("DELETE", "/admin/course/c9", 404, r#"{"detail": "Course not found"}"#),
        ("GET", "/admin/departments", 502, "<html>Bad Gateway</html>"),
    ])
    .await;
    let api = mock.client();

    let err = api.rooms().await.unwrap_err();
    assert!(err.is_unauthenticated());
    assert_eq!(err.to_string(), "Could not validate credentials");

    let err = api.timetable().await.unwrap_err();
    assert!(err.is_forbidden());
    assert_eq!(err.status(), Some(403));

    let err = api.delete_course("c9").await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 404, .. }));
    assert_eq!(err.to_string(), "Course not found");

    let err = api.departments().await.unwrap_err();
    assert_eq!(err.server_message(), None);
    assert_eq!(err.to_string(), "API Error: 502");
}

#[tokio::test]
async fn test_validation_detail_list_joined() {
    let mock = MockApi::start(vec![(
        "POST",
        "/admin/department",
        422,
        r#"{"detail": [{"loc": ["body", "name"], "msg": "field required", "type": "missing"}]}"#,
    )])
    .await;

    let err = mock.client().create_department("").await.unwrap_err();
    assert_eq!(err.status(), Some(422));
    assert_eq!(err.to_string(), "field required");
}

#[tokio::test]
async fn test_single_assignment_fetch() {
    let mock = MockApi::start(vec![(
        "GET",
        "/lecturer/assignments/a1",
        200,
        r#"{"_id": "a1", "course_id": "c1", "unit_id": "u1", "unit_name": "Mechanics", "room_name": "LT-01", "student_count": 40}"#,
    )])
    .await;

    let assignment = mock.client_with_token("tok").lecturer_assignment("a1").await.unwrap();
    assert_eq!(assignment.id, "a1");
    assert_eq!(assignment.unit_label(), "Mechanics");
    assert_eq!(assignment.room_label(), "LT-01");
    assert_eq!(assignment.student_count, 40);
    assert_eq!(mock.last().method, "GET");
}

#[tokio::test]
async fn test_empty_success_body() {
    let mock = MockApi::start(vec![("DELETE", "/admin/room/r1", 200, "")]).await;

    let resp = mock.client().delete_room("r1").await.unwrap();
    assert_eq!(resp.message, None);
}

#[tokio::test]
async fn test_path_segments_are_encoded() {
    let mock = MockApi::start(vec![]).await;

    let _ = mock.client().delete_room("a/b c").await;
    assert_eq!(mock.last().path, "/admin/room/a%2Fb%20c");
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = timetable_portal::api::ApiClient::new(
        format!("http://{addr}/"),
        std::sync::Arc::new(timetable_portal::auth::MemoryTokenStore::default()),
    );
    assert_eq!(api.base_url(), format!("http://{addr}"));

    let err = api.rooms().await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
    assert_eq!(err.status(), None);
}
