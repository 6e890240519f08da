use crate::availability::compute_day_view;
use crate::backend::BookingBackend;
use crate::error::BackendError;
use crate::slot_time::HourLabel;
use crate::types::{Booking, NewBooking, SlotView, StoredSlot};
use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState<T: BookingBackend> {
    pub backend: T,
    pub admin_password: String,
}

/// The booking request wire shape. Field names are PascalCase and the date
/// and hour labels arrive as strings; parsing them is the validation step,
/// done before the backend is touched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct BookSlotRequest {
    user_id: i32,
    booking_date: String,
    slot_time_from: String,
    slot_time_to: String,
    amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MaintenanceSlotRequest {
    slot_date: String,
    slot_time: String,
}

pub async fn start_server<T: BookingBackend>(state: AppState<T>, port: u16) {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .unwrap();
    serve(state, listener).await;
}

pub async fn serve<T: BookingBackend>(state: AppState<T>, listener: tokio::net::TcpListener) {
    tracing::info!("listening on {}", listener.local_addr().unwrap());
    axum::serve(listener, router(state)).await.unwrap();
}

pub fn router<T: BookingBackend>(state: AppState<T>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public = Router::new()
        .route("/slots/date/:date", get(slots_by_date::<T>))
        .route("/slots/exceptions", get(slot_exceptions::<T>))
        .route("/slots/view/:date", get(day_view::<T>))
        .route("/booking/book", post(book_slot::<T>))
        .route("/booking/user/:user_id", get(bookings_by_user::<T>));

    let admin = Router::new()
        .route("/slots/maintenance", post(add_maintenance_slot::<T>))
        .route("/slots/:slot_id", delete(remove_slot::<T>))
        .route_layer(middleware::from_fn_with_state(state.clone(), admin_auth::<T>));

    Router::new()
        .merge(public)
        .merge(admin)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn admin_auth<T: BookingBackend>(
    State(state): State<AppState<T>>,
    request: Request,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    match request.headers().get("x-admin-password") {
        Some(header) if header.to_str().unwrap_or("") == state.admin_password => {
            Ok(next.run(request).await)
        }
        Some(_) => Err((StatusCode::UNAUTHORIZED, "Unauthorized".to_string())),
        None => Err((StatusCode::UNAUTHORIZED, "Missing credentials".to_string())),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, BackendError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        BackendError::Validation(format!("'{raw}' is not a valid date (expected yyyy-MM-dd)"))
    })
}

async fn slots_by_date<T: BookingBackend>(
    State(state): State<AppState<T>>,
    Path(raw_date): Path<String>,
) -> Result<Json<Vec<StoredSlot>>, BackendError> {
    let date = parse_date(&raw_date)?;
    Ok(Json(state.backend.slots_for_date(date)?))
}

async fn slot_exceptions<T: BookingBackend>(
    State(state): State<AppState<T>>,
) -> Result<Json<Vec<StoredSlot>>, BackendError> {
    Ok(Json(state.backend.slot_exceptions()?))
}

async fn day_view<T: BookingBackend>(
    State(state): State<AppState<T>>,
    Path(raw_date): Path<String>,
) -> Result<Json<Vec<SlotView>>, BackendError> {
    let date = parse_date(&raw_date)?;
    let stored = state.backend.slots_for_date(date)?;
    Ok(Json(compute_day_view(
        date,
        Local::now().naive_local(),
        &stored,
    )))
}

async fn book_slot<T: BookingBackend>(
    State(state): State<AppState<T>>,
    Json(request): Json<BookSlotRequest>,
) -> Response {
    let booking = match parse_booking(&request) {
        Ok(booking) => booking,
        Err(err) => return err.into_response(),
    };

    match state.backend.create_booking(&booking) {
        Ok(booking_id) => {
            tracing::info!(booking_id, user_id = booking.user_id, "booking created");
            (
                StatusCode::OK,
                Json(json!({ "message": "Booking successful", "bookingId": booking_id })),
            )
                .into_response()
        }
        Err(BackendError::Storage { cause }) => {
            tracing::error!("booking failed: {cause}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "Booking failed", "error": cause })),
            )
                .into_response()
        }
        Err(client_fault) => client_fault.into_response(),
    }
}

fn parse_booking(request: &BookSlotRequest) -> Result<NewBooking, BackendError> {
    Ok(NewBooking {
        user_id: request.user_id,
        date: parse_date(&request.booking_date)?,
        from: HourLabel::parse(&request.slot_time_from)?,
        to: HourLabel::parse(&request.slot_time_to)?,
        amount: request.amount,
    })
}

async fn bookings_by_user<T: BookingBackend>(
    State(state): State<AppState<T>>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<Booking>>, BackendError> {
    Ok(Json(state.backend.bookings_for_user(user_id)?))
}

async fn add_maintenance_slot<T: BookingBackend>(
    State(state): State<AppState<T>>,
    Json(request): Json<MaintenanceSlotRequest>,
) -> Result<Json<serde_json::Value>, BackendError> {
    let date = parse_date(&request.slot_date)?;
    let time = HourLabel::parse(&request.slot_time)?;
    let slot_id = state.backend.add_maintenance_slot(date, time)?;
    Ok(Json(
        json!({ "message": "Maintenance slot added", "slotId": slot_id }),
    ))
}

async fn remove_slot<T: BookingBackend>(
    State(state): State<AppState<T>>,
    Path(slot_id): Path<i32>,
) -> Result<Json<serde_json::Value>, BackendError> {
    state.backend.remove_slot(slot_id)?;
    Ok(Json(json!({ "message": "Slot removed" })))
}
