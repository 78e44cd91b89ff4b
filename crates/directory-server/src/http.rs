use std::sync::Arc;

use anyhow::Context;
use axum::{
    body::Body,
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts, Path, Query, State,
    },
    http::{header, HeaderName, HeaderValue, Method, Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, put},
    Json, Router,
};
use directory_core::{
    Department, DepartmentId, DepartmentRef, DepartmentSummary, Directory, DirectoryError,
    EmployeeId, EmployeePatch, EmployeeSummary, ExError, ExErrorKind, NewEmployee,
};
use directory_core_types::{RequestContext, RequestId};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{error, info};

use crate::config::ServeConfig;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<Directory>,
}

impl AppState {
    pub fn new(directory: Directory) -> Self {
        Self {
            directory: Arc::new(directory),
        }
    }
}

pub async fn serve(config: ServeConfig, state: AppState) -> anyhow::Result<()> {
    let router = build_router(state, &config.cors_origins);
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;

    info!(addr = %config.addr, "directory server listening");
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;
    info!("directory server stopped");
    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed = origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect::<Vec<_>>();
    let allow_origin = if allowed.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(allowed)
    };
    CorsLayer::new()
        .allow_headers([header::CONTENT_TYPE])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_origin(allow_origin)
}

fn request_span(request: &Request<Body>) -> tracing::Span {
    let context = RequestContext::from_header(
        request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok()),
    );
    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %context.request_id,
    )
}

pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    let header_name = HeaderName::from_static(REQUEST_ID_HEADER);

    let api = Router::new()
        .route(
            "/departments",
            get(list_departments_handler).post(create_department_handler),
        )
        .route(
            "/departments/:id",
            get(get_department_handler)
                .put(rename_department_handler)
                .delete(delete_department_handler),
        )
        .route(
            "/employees",
            get(list_employees_handler).post(create_employee_handler),
        )
        .route("/employees/unassigned", get(list_unassigned_handler))
        .route(
            "/employees/department/:id",
            get(list_department_employees_handler),
        )
        .route(
            "/employees/:id",
            get(get_employee_handler)
                .put(update_employee_handler)
                .delete(delete_employee_handler),
        )
        .route(
            "/employees/:id/department",
            delete(unassign_employee_handler),
        )
        .route(
            "/employees/:id/department/:department_id",
            put(reassign_employee_handler),
        );

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api)
        .fallback(fallback_handler)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(header_name.clone(), MakeRequestUuid))
                .layer(PropagateRequestIdLayer::new(header_name))
                .layer(TraceLayer::new_for_http().make_span_with(request_span))
                .layer(cors_layer(cors_origins))
                .layer(middleware::from_fn(attach_request_id)),
        )
        .with_state(state)
}

/// Stamp the request id onto error bodies
///
/// Runs inside `SetRequestIdLayer`, so the header is always present by the
/// time a handler has failed.
async fn attach_request_id(request: Request<Body>, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(RequestId::from_header);

    let mut response = next.run(request).await;
    match (request_id, response.extensions_mut().remove::<HttpError>()) {
        (Some(request_id), Some(err)) => err.with_request_id(request_id).into_response(),
        _ => response,
    }
}

// ===== Extractors =====

/// `Json` whose rejection is a structured `HttpError`
#[derive(FromRequest)]
#[from_request(via(Json), rejection(HttpError))]
struct ApiJson<T>(T);

/// `Path` whose rejection is a structured `HttpError`
#[derive(FromRequestParts)]
#[from_request(via(Path), rejection(HttpError))]
struct ApiPath<T>(T);

/// `Query` whose rejection is a structured `HttpError`
#[derive(FromRequestParts)]
#[from_request(via(Query), rejection(HttpError))]
struct ApiQuery<T>(T);

// ===== DTOs =====

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    version: &'static str,
}

#[derive(Deserialize, Default)]
pub struct SearchParams {
    pub search: Option<String>,
}

#[derive(Deserialize)]
pub struct DepartmentRequest {
    /// Missing or `null` is treated like blank so it fails validation, not
    /// parsing
    #[serde(default)]
    pub name: Option<String>,
}

impl DepartmentRequest {
    fn into_name(self) -> String {
        self.name.unwrap_or_default()
    }
}

/// `{ "id": 3 }` or `{ "id": null }` (Unassigned)
#[derive(Deserialize, Debug, Clone, Copy)]
pub struct DepartmentLink {
    #[serde(default)]
    pub id: Option<u64>,
}

impl From<DepartmentLink> for DepartmentRef {
    fn from(link: DepartmentLink) -> Self {
        link.id.map(DepartmentId::new).into()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    /// Missing or `null` fails name validation like a blank name
    #[serde(default)]
    pub full_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub department: Option<DepartmentLink>,
}

impl From<CreateEmployeeRequest> for NewEmployee {
    fn from(request: CreateEmployeeRequest) -> Self {
        NewEmployee {
            full_name: request.full_name.unwrap_or_default(),
            address: request.address,
            phone: request.phone,
            email: request.email,
            department: request.department.map(Into::into).unwrap_or_default(),
        }
    }
}

/// Partial update; absent fields are left unchanged
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRequest {
    pub full_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub department: Option<DepartmentLink>,
}

impl From<UpdateEmployeeRequest> for EmployeePatch {
    fn from(request: UpdateEmployeeRequest) -> Self {
        EmployeePatch {
            full_name: request.full_name,
            address: request.address,
            phone: request.phone,
            email: request.email,
            department: request.department.map(Into::into),
        }
    }
}

// ===== Errors =====

type HttpResult<T> = Result<T, HttpError>;

/// A failed request, rendered as `{ code, message, requestId }`
#[derive(Debug, Clone)]
pub struct HttpError {
    status: StatusCode,
    error: ExError,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody<'a> {
    code: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    request_id: Option<&'a str>,
}

impl HttpError {
    fn new(status: StatusCode, error: ExError) -> Self {
        Self { status, error }
    }

    /// A request that could not be parsed into the shape a handler expects
    fn malformed(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            ExError::new(ExErrorKind::Validation).with_message(message),
        )
    }

    /// Map a directory error, choosing the status for reference failures
    ///
    /// A bad department id in a request body is a bad request; the same id in
    /// the URL of the reassignment route is a missing resource.
    fn from_directory(err: DirectoryError, reference_status: StatusCode) -> Self {
        let ex: ExError = err.into();
        let status = match ex.kind() {
            ExErrorKind::Validation => StatusCode::BAD_REQUEST,
            ExErrorKind::NotFound => StatusCode::NOT_FOUND,
            ExErrorKind::Reference => reference_status,
            ExErrorKind::Internal => {
                error!(err_code = ex.code(), error = %ex, "internal directory error");
                return Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ExError::new(ExErrorKind::Internal).with_message("internal server error"),
                );
            }
        };
        Self::new(status, ex)
    }

    fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.error = self.error.with_request_id(request_id);
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn error(&self) -> &ExError {
        &self.error
    }
}

impl From<DirectoryError> for HttpError {
    fn from(err: DirectoryError) -> Self {
        Self::from_directory(err, StatusCode::BAD_REQUEST)
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        Self::malformed(rejection.body_text())
    }
}

impl From<PathRejection> for HttpError {
    fn from(rejection: PathRejection) -> Self {
        Self::malformed(rejection.body_text())
    }
}

impl From<QueryRejection> for HttpError {
    fn from(rejection: QueryRejection) -> Self {
        Self::malformed(rejection.body_text())
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            code: self.error.code(),
            message: self.error.message(),
            request_id: self.error.request_id().map(RequestId::as_str),
        };
        let mut response = (self.status, Json(body)).into_response();
        // picked up by `attach_request_id`
        response.extensions_mut().insert(self);
        response
    }
}

// ===== Handlers =====

async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        ok: true,
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn list_departments_handler(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> HttpResult<Json<Vec<DepartmentSummary>>> {
    let summaries = match params.search.as_deref().map(str::trim) {
        Some(query) if !query.is_empty() => state.directory.search_departments(query)?,
        _ => state.directory.list_department_summaries()?,
    };
    Ok(Json(summaries))
}

async fn get_department_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
) -> HttpResult<Json<Department>> {
    Ok(Json(state.directory.get_department(DepartmentId::new(id))?))
}

async fn create_department_handler(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<DepartmentRequest>,
) -> HttpResult<(StatusCode, Json<Department>)> {
    let department = state.directory.create_department(&request.into_name())?;
    Ok((StatusCode::CREATED, Json(department)))
}

async fn rename_department_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
    ApiJson(request): ApiJson<DepartmentRequest>,
) -> HttpResult<Json<DepartmentSummary>> {
    let summary = state
        .directory
        .rename_department(DepartmentId::new(id), &request.into_name())?;
    Ok(Json(summary))
}

async fn delete_department_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
) -> HttpResult<StatusCode> {
    state
        .directory
        .delete_department(DepartmentId::new(id).into())?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_employees_handler(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> HttpResult<Json<Vec<EmployeeSummary>>> {
    let employees = state
        .directory
        .list_employees(None, params.search.as_deref())?;
    Ok(Json(employees))
}

async fn list_unassigned_handler(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> HttpResult<Json<Vec<EmployeeSummary>>> {
    let employees = state
        .directory
        .list_employees(Some(DepartmentRef::Unassigned), params.search.as_deref())?;
    Ok(Json(employees))
}

async fn list_department_employees_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> HttpResult<Json<Vec<EmployeeSummary>>> {
    let scope = DepartmentRef::Assigned(DepartmentId::new(id));
    let employees = state
        .directory
        .list_employees(Some(scope), params.search.as_deref())?;
    Ok(Json(employees))
}

async fn get_employee_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
) -> HttpResult<Json<EmployeeSummary>> {
    Ok(Json(state.directory.get_employee(EmployeeId::new(id))?))
}

async fn create_employee_handler(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateEmployeeRequest>,
) -> HttpResult<(StatusCode, Json<EmployeeSummary>)> {
    let employee = state.directory.create_employee(request.into())?;
    Ok((StatusCode::CREATED, Json(employee)))
}

async fn update_employee_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
    ApiJson(request): ApiJson<UpdateEmployeeRequest>,
) -> HttpResult<Json<EmployeeSummary>> {
    let employee = state
        .directory
        .update_employee(EmployeeId::new(id), request.into())?;
    Ok(Json(employee))
}

async fn delete_employee_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
) -> HttpResult<StatusCode> {
    state.directory.delete_employee(EmployeeId::new(id))?;
    Ok(StatusCode::NO_CONTENT)
}

async fn reassign_employee_handler(
    State(state): State<AppState>,
    ApiPath((id, department_id)): ApiPath<(u64, u64)>,
) -> HttpResult<Json<EmployeeSummary>> {
    let employee = state
        .directory
        .reassign_employee(EmployeeId::new(id), DepartmentId::new(department_id).into())
        .map_err(|err| HttpError::from_directory(err, StatusCode::NOT_FOUND))?;
    Ok(Json(employee))
}

async fn unassign_employee_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
) -> HttpResult<Json<EmployeeSummary>> {
    let employee = state
        .directory
        .reassign_employee(EmployeeId::new(id), DepartmentRef::Unassigned)?;
    Ok(Json(employee))
}

async fn fallback_handler(request: Request<Body>) -> HttpError {
    HttpError::new(
        StatusCode::NOT_FOUND,
        ExError::new(ExErrorKind::NotFound)
            .with_message(format!("no route for {} {}", request.method(), request.uri().path())),
    )
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "failed to listen for CTRL+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    ctrl_c.await;

    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    };

    info!("shutdown signal received");
}
