//! Router tests
//!
//! Drive the full axum router (middleware included) with in-memory requests
//! against the sample directory.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use directory_core::Directory;
use directory_server::http::{build_router, AppState, REQUEST_ID_HEADER};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    build_router(
        AppState::new(Directory::with_sample_data()),
        &["http://localhost:4200".to_string()],
    )
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn names(value: &Value) -> Vec<&str> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["fullName"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_health() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn test_list_departments_with_unassigned_row() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/departments", None).await;

    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0], json!({ "id": 1, "name": "Engineering", "employeeCount": 3 }));
    assert_eq!(rows[4], json!({ "id": null, "name": "Unassigned", "employeeCount": 2 }));
}

#[tokio::test]
async fn test_search_departments() {
    let app = app();

    let (_, body) = send(&app, Method::GET, "/api/departments?search=fin", None).await;

    assert_eq!(body, json!([{ "id": 4, "name": "Finance", "employeeCount": 1 }]));
}

#[tokio::test]
async fn test_create_department_and_validation() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/departments",
        Some(json!({ "name": "  Legal " })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "id": 5, "name": "Legal" }));

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/departments",
        Some(json!({ "name": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "ERR_VALIDATION");
}

#[tokio::test]
async fn test_get_missing_department_is_404() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/departments/99", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "ERR_NOT_FOUND");
    assert_eq!(body["message"], "Department not found with id: 99");
}

#[tokio::test]
async fn test_delete_department_cascades() {
    // GIVEN the sample directory
    let app = app();

    // WHEN Engineering is deleted
    let (status, _) = send(&app, Method::DELETE, "/api/departments/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // THEN its three members join the two already unassigned
    let (_, body) = send(&app, Method::GET, "/api/employees/unassigned", None).await;
    assert_eq!(
        names(&body),
        vec![
            "John Doe",
            "Jane Smith",
            "Charlie Wilson",
            "Eve Anderson",
            "Frank Miller"
        ]
    );

    // AND a second delete is a 404
    let (status, _) = send(&app, Method::DELETE, "/api/departments/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rename_department() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/departments/2",
        Some(json!({ "name": "People" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": 2, "name": "People", "employeeCount": 1 }));
}

#[tokio::test]
async fn test_employee_listing_and_search() {
    let app = app();

    let (_, all) = send(&app, Method::GET, "/api/employees", None).await;
    assert_eq!(all.as_array().unwrap().len(), 8);
    assert_eq!(all[0]["departmentName"], "Engineering");
    assert_eq!(all[6]["departmentName"], "Unassigned");
    assert_eq!(all[6]["departmentId"], Value::Null);

    let (_, found) = send(&app, Method::GET, "/api/employees?search=jo", None).await;
    assert_eq!(names(&found), vec!["John Doe", "Bob Johnson"]);

    let (_, blank) = send(&app, Method::GET, "/api/employees?search=", None).await;
    assert_eq!(blank.as_array().unwrap().len(), 8);

    let (_, scoped) = send(
        &app,
        Method::GET,
        "/api/employees/department/1?search=jane",
        None,
    )
    .await;
    assert_eq!(names(&scoped), vec!["Jane Smith"]);
}

#[tokio::test]
async fn test_list_employees_of_missing_department_is_404() {
    let app = app();

    let (status, _) = send(&app, Method::GET, "/api/employees/department/42", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_employee() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/employees",
        Some(json!({
            "fullName": "Grace Hopper",
            "email": "grace.hopper@company.com",
            "department": { "id": 1 }
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 9);
    assert_eq!(body["departmentName"], "Engineering");
    assert_eq!(body["address"], Value::Null);
}

#[tokio::test]
async fn test_create_employee_with_bad_department_is_400() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/employees",
        Some(json!({ "fullName": "Grace Hopper", "department": { "id": 77 } })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "ERR_REFERENCE");
}

#[tokio::test]
async fn test_update_employee_partial() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/employees/7",
        Some(json!({ "phone": "+1-555-9999", "department": { "id": 4 } })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fullName"], "Eve Anderson");
    assert_eq!(body["phone"], "+1-555-9999");
    assert_eq!(body["departmentName"], "Finance");
}

#[tokio::test]
async fn test_reassign_routes() {
    let app = app();

    // reassigning to a missing department is a 404 on this route
    let (status, body) = send(&app, Method::PUT, "/api/employees/1/department/77", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "ERR_REFERENCE");

    let (status, body) = send(&app, Method::PUT, "/api/employees/1/department/3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["departmentName"], "Marketing");

    let (status, body) = send(&app, Method::DELETE, "/api/employees/1/department", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["departmentId"], Value::Null);
    assert_eq!(body["departmentName"], "Unassigned");
}

#[tokio::test]
async fn test_delete_employee() {
    let app = app();

    let (status, _) = send(&app, Method::DELETE, "/api/employees/8", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, "/api/employees/8", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_request_id_is_generated_and_propagated() {
    let app = app();

    let generated = app
        .clone()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(generated.headers().contains_key(REQUEST_ID_HEADER));

    let echoed = app
        .oneshot(
            Request::get("/health")
                .header(REQUEST_ID_HEADER, "req-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(echoed.headers()[REQUEST_ID_HEADER], "req-123");
}

#[tokio::test]
async fn test_null_names_fail_validation_not_parsing() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/departments",
        Some(json!({ "name": null })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "ERR_VALIDATION");
    assert!(body["message"].as_str().unwrap().contains("department name"));

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/employees",
        Some(json!({ "fullName": null })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "ERR_VALIDATION");
    assert!(body["message"].as_str().unwrap().contains("full name"));
}

#[tokio::test]
async fn test_unparseable_requests_get_structured_errors() {
    // GIVEN the sample directory
    let app = app();

    // WHEN the body, the path, or the JSON itself is malformed
    let (bad_link, link_body) = send(
        &app,
        Method::POST,
        "/api/employees",
        Some(json!({ "fullName": "Grace Hopper", "department": { "id": -1 } })),
    )
    .await;
    let (bad_path, path_body) = send(&app, Method::GET, "/api/departments/abc", None).await;
    let broken = app
        .clone()
        .oneshot(
            Request::post("/api/departments")
                .header("content-type", "application/json")
                .body(Body::from("{\"name\":"))
                .unwrap(),
        )
        .await
        .unwrap();

    // THEN each is a 400 with the usual error body
    for (status, body) in [(bad_link, link_body), (bad_path, path_body)] {
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "ERR_VALIDATION");
        assert!(!body["message"].as_str().unwrap().is_empty());
    }
    assert_eq!(broken.status(), StatusCode::BAD_REQUEST);
    let bytes = broken.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], "ERR_VALIDATION");

    // AND nothing was created
    let (_, all) = send(&app, Method::GET, "/api/employees", None).await;
    assert_eq!(all.as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn test_unknown_route_is_structured_404() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/nowhere", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "ERR_NOT_FOUND");
}

#[tokio::test]
async fn test_error_body_carries_request_id() {
    let app = app();

    let response = app
        .clone()
        .oneshot(
            Request::get("/api/employees/99")
                .header(REQUEST_ID_HEADER, "req-404")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers()[REQUEST_ID_HEADER], "req-404");
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["requestId"], "req-404");
    assert_eq!(body["code"], "ERR_NOT_FOUND");

    // a generated id is echoed too
    let (_, body) = send(&app, Method::GET, "/api/departments/99", None).await;
    assert!(!body["requestId"].as_str().unwrap().is_empty());
}
