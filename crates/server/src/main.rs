// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod freezer;

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use clap::Parser;
use freezer::FreezeScheduler;
use rotascope_api::{
    ActiveShiftsResponse, ApiError, AvailabilityResponse, CreateDepartmentRequest,
    CreatePorterRequest, CreateServiceRequest, CreateShiftRequest, CreatedResponse, FreezeResponse,
    FrozenScheduleResponse, ReplacePorterHoursRequest,
};
use rotascope_domain::{Department, Porter, PorterHours, ScheduleView, Service, Shift, parse_date};
use rotascope_persistence::{Persistence, SqlitePersistence};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::Date;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Rotascope Server - HTTP server for the Rotascope porter tracking system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// The persistence layer is wrapped in a Mutex for safe concurrent access;
/// the freeze scheduler is the single long-lived instance for the process.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for entities and frozen snapshots.
    persistence: Arc<Mutex<Persistence>>,
    /// The daily freeze scheduler.
    freezer: Arc<FreezeScheduler>,
}

/// API request body for the manual freeze trigger.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct FreezeApiRequest {
    /// The date to freeze (`YYYY-MM-DD`). Defaults to today (local time).
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<String>,
}

/// API response for the health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    /// Service status indicator.
    status: String,
    /// The running server version.
    version: String,
}

/// API response for soft-delete operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MessageResponse {
    /// A success message.
    message: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::InvalidInput { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            ApiError::DomainRuleViolation { .. } => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: err.to_string(),
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: err.to_string(),
                }
            }
        }
    }
}

/// Handler for GET `/health` endpoint.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("OK"),
        version: String::from(env!("CARGO_PKG_VERSION")),
    })
}

/// Handler for POST `/departments` endpoint.
async fn handle_create_department(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateDepartmentRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: CreatedResponse = rotascope_api::create_department(&mut persistence, req)?;
    drop(persistence);
    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for GET `/departments` endpoint.
async fn handle_list_departments(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<Department>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(rotascope_api::list_departments(&mut persistence)?))
}

/// Handler for DELETE `/departments/{id}` endpoint.
async fn handle_delete_department(
    AxumState(app_state): AxumState<AppState>,
    Path(department_id): Path<i64>,
) -> Result<Json<MessageResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    rotascope_api::deactivate_department(&mut persistence, department_id)?;
    drop(persistence);
    Ok(Json(MessageResponse {
        message: String::from("Department deleted successfully"),
    }))
}

/// Handler for POST `/services` endpoint.
async fn handle_create_service(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateServiceRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: CreatedResponse = rotascope_api::create_service(&mut persistence, req)?;
    drop(persistence);
    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for GET `/services` endpoint.
async fn handle_list_services(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<Service>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(rotascope_api::list_services(&mut persistence)?))
}

/// Handler for DELETE `/services/{id}` endpoint.
async fn handle_delete_service(
    AxumState(app_state): AxumState<AppState>,
    Path(service_id): Path<i64>,
) -> Result<Json<MessageResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    rotascope_api::deactivate_service(&mut persistence, service_id)?;
    drop(persistence);
    Ok(Json(MessageResponse {
        message: String::from("Service deleted successfully"),
    }))
}

/// Handler for POST `/shifts` endpoint.
async fn handle_create_shift(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateShiftRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: CreatedResponse = rotascope_api::create_shift(&mut persistence, req)?;
    drop(persistence);
    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for GET `/shifts` endpoint.
async fn handle_list_shifts(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<Shift>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(rotascope_api::list_shifts(&mut persistence)?))
}

/// Handler for DELETE `/shifts/{id}` endpoint.
async fn handle_delete_shift(
    AxumState(app_state): AxumState<AppState>,
    Path(shift_id): Path<i64>,
) -> Result<Json<MessageResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    rotascope_api::deactivate_shift(&mut persistence, shift_id)?;
    drop(persistence);
    Ok(Json(MessageResponse {
        message: String::from("Shift deleted successfully"),
    }))
}

/// Handler for POST `/porters` endpoint.
async fn handle_create_porter(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreatePorterRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: CreatedResponse = rotascope_api::create_porter(&mut persistence, req)?;
    drop(persistence);
    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for GET `/porters` endpoint.
async fn handle_list_porters(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<Porter>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(rotascope_api::list_porters(&mut persistence)?))
}

/// Handler for DELETE `/porters/{id}` endpoint.
async fn handle_delete_porter(
    AxumState(app_state): AxumState<AppState>,
    Path(porter_id): Path<i64>,
) -> Result<Json<MessageResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    rotascope_api::deactivate_porter(&mut persistence, porter_id)?;
    drop(persistence);
    Ok(Json(MessageResponse {
        message: String::from("Porter deleted successfully"),
    }))
}

/// Handler for GET `/porters/{id}/hours` endpoint.
async fn handle_get_porter_hours(
    AxumState(app_state): AxumState<AppState>,
    Path(porter_id): Path<i64>,
) -> Result<Json<Vec<PorterHours>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(rotascope_api::get_porter_hours(
        &mut persistence,
        porter_id,
    )?))
}

/// Handler for PUT `/porters/{id}/hours` endpoint.
///
/// Replaces the porter's full set of custom working windows
/// (last-write-wins).
async fn handle_put_porter_hours(
    AxumState(app_state): AxumState<AppState>,
    Path(porter_id): Path<i64>,
    Json(req): Json<ReplacePorterHoursRequest>,
) -> Result<Json<MessageResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    rotascope_api::replace_porter_hours(&mut persistence, porter_id, req)?;
    drop(persistence);
    Ok(Json(MessageResponse {
        message: String::from("Porter hours updated successfully"),
    }))
}

/// Handler for GET `/shifts/active/{date}` endpoint.
async fn handle_active_shifts(
    AxumState(app_state): AxumState<AppState>,
    Path(date): Path<String>,
) -> Result<Json<ActiveShiftsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(rotascope_api::list_active_shifts(
        &mut persistence,
        &date,
    )?))
}

/// Handler for GET `/availability/{date}` endpoint.
async fn handle_availability(
    AxumState(app_state): AxumState<AppState>,
    Path(date): Path<String>,
) -> Result<Json<AvailabilityResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(rotascope_api::get_availability(
        &mut persistence,
        &date,
    )?))
}

/// Handler for GET `/schedule/{date}` endpoint.
async fn handle_schedule(
    AxumState(app_state): AxumState<AppState>,
    Path(date): Path<String>,
) -> Result<Json<ScheduleView>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(rotascope_api::get_schedule(&mut persistence, &date)?))
}

/// Handler for GET `/schedule/frozen/{date}` endpoint.
async fn handle_frozen_schedule(
    AxumState(app_state): AxumState<AppState>,
    Path(date): Path<String>,
) -> Result<Json<FrozenScheduleResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(rotascope_api::get_frozen_schedule(
        &mut persistence,
        &date,
    )?))
}

/// Handler for POST `/admin/freeze` endpoint.
///
/// Manually triggers the freeze for an explicit date, or today when the
/// body carries no date. Errors surface to the caller, unlike the
/// scheduler's automatic path.
async fn handle_manual_freeze(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<FreezeApiRequest>,
) -> Result<Json<FreezeResponse>, HttpError> {
    let date: Option<Date> = match req.date.as_deref() {
        Some(value) => Some(parse_date(value).map_err(|e| HttpError {
            status: StatusCode::BAD_REQUEST,
            message: e.to_string(),
        })?),
        None => None,
    };

    let response: FreezeResponse = app_state.freezer.run_manually(date).await?;
    Ok(Json(response))
}

/// Builds the application router.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/departments", post(handle_create_department))
        .route("/departments", get(handle_list_departments))
        .route("/departments/{id}", delete(handle_delete_department))
        .route("/services", post(handle_create_service))
        .route("/services", get(handle_list_services))
        .route("/services/{id}", delete(handle_delete_service))
        .route("/shifts", post(handle_create_shift))
        .route("/shifts", get(handle_list_shifts))
        .route("/shifts/{id}", delete(handle_delete_shift))
        .route("/shifts/active/{date}", get(handle_active_shifts))
        .route("/porters", post(handle_create_porter))
        .route("/porters", get(handle_list_porters))
        .route("/porters/{id}", delete(handle_delete_porter))
        .route("/porters/{id}/hours", get(handle_get_porter_hours))
        .route("/porters/{id}/hours", put(handle_put_porter_hours))
        .route("/availability/{date}", get(handle_availability))
        .route("/schedule/{date}", get(handle_schedule))
        .route("/schedule/frozen/{date}", get(handle_frozen_schedule))
        .route("/admin/freeze", post(handle_manual_freeze))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Rotascope server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: SqlitePersistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        SqlitePersistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        SqlitePersistence::new_in_memory()?
    };
    let persistence: Arc<Mutex<Persistence>> = Arc::new(Mutex::new(persistence));

    // The single freeze scheduler instance for the process
    let freezer: Arc<FreezeScheduler> = Arc::new(FreezeScheduler::new(Arc::clone(&persistence)));
    freezer.start();

    let app_state: AppState = AppState {
        persistence,
        freezer,
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
