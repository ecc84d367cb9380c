//! HTTP request handlers for the rental catalog API
//!
//! This module implements:
//! - Searching and browsing the property catalog
//! - Adding, updating and deleting properties from the admin back-office
//! - Recording and managing bookings
//! - Listing and editing admin users
//! - The dashboard summary

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use redb::Database;
use serde_json::json;
use tracing::info;

use crate::bookings::BookingFilter;
use crate::database::{self, AppState};
use crate::error::{AppError, StoreError};
use crate::extract::{ApiJson, ApiQuery};
use crate::model::{
    BookingListParams, BookingStatusUpdate, NewBooking, NewProperty, PropertyUpdate,
    SearchParams, UserListParams, UserUpdate,
};
use crate::search::{self, FilterCriteria};
use crate::users::UserFilter;

/// Default page size for the search listing
pub const DEFAULT_LIMIT: usize = 50;

/// Largest page size accepted by the search listing
pub const MAX_LIMIT: usize = 100;

/// Searches the catalog
///
/// # Query Parameters
///
/// - `q` (optional) - Free text matched against title, location and description
/// - `location` (optional) - Matched against the location only
/// - `min_price`, `max_price` (optional) - Inclusive price bounds
/// - `min_bedrooms` (optional) - Minimum bedroom count
/// - `guests` (optional) - Minimum guest capacity
/// - `featured` (optional) - `true` for featured listings only
/// - `page` (optional) - Page number, starts from 1 (default: 1)
/// - `limit` (optional) - Items per page, max 100 (default: 50)
///
/// # Example Request
///
/// `GET /api/properties?q=villa&min_price=100&page=1`
///
/// # Response
///
/// ```json
/// {
///   "page": 1,
///   "limit": 50,
///   "total_matched": 1,
///   "total_fetched": 1,
///   "data": [...]
/// }
/// ```
///
/// Matches keep catalog order; pagination applies after filtering.
/// Non-finite price bounds answer **400 Bad Request**.
pub async fn search_properties(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> Result<impl IntoResponse, AppError> {
    params.validate()?;

    let page = params.page.unwrap_or(1).max(1);
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = (page - 1).saturating_mul(limit);

    let criteria = FilterCriteria::from(&params);
    let matched = search::filter_properties(state.catalog.read().all(), &criteria);
    let total_matched = matched.len();

    let data: Vec<_> = matched.into_iter().skip(offset).take(limit).collect();

    Ok(Json(json!({
        "page": page,
        "limit": limit,
        "total_matched": total_matched,
        "total_fetched": data.len(),
        "data": data
    })))
}

/// Lists featured properties in catalog order
pub async fn featured_properties(State(state): State<AppState>) -> impl IntoResponse {
    let data = search::featured(state.catalog.read().all());
    Json(json!({ "total": data.len(), "data": data }))
}

/// Returns one property
///
/// - **200 OK** - The property record
/// - **404 Not Found** - Unknown id
pub async fn get_property(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let catalog = state.catalog.read();
    match catalog.get(&id) {
        Some(property) => Ok(Json(property.clone())),
        None => Err(AppError::not_found("Property", id)),
    }
}

/// Runs a redb write on the blocking pool
///
/// Commits fsync, so they stay off the async workers. Callers hold
/// `catalog_writer` for the whole clone, persist and swap sequence.
async fn persist<F>(state: &AppState, write: F) -> Result<(), AppError>
where
    F: FnOnce(&Database) -> Result<(), StoreError> + Send + 'static,
{
    let db = state.db.clone();
    tokio::task::spawn_blocking(move || write(&db)).await??;
    Ok(())
}

/// Adds a property to the catalog
///
/// The catalog assigns the id; rating and review count start at zero.
///
/// # Request Body
///
/// ```json
/// {
///   "title": "Sea View Villa",
///   "location": "Martil, Morocco",
///   "price": 200,
///   "price_unit": "night",
///   "bedrooms": 3,
///   "bathrooms": 2,
///   "capacity": 6,
///   "featured": true
/// }
/// ```
///
/// # Response
///
/// - **201 Created** - The stored record, including its id
/// - **400 Bad Request** - Empty title or negative price
/// - **422 Unprocessable Entity** - Unknown or mistyped fields
pub async fn create_property(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewProperty>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let _writer = state.catalog_writer.lock().await;

    // Mutate a copy so a failed write leaves the shared catalog untouched
    let mut next = state.catalog.read().clone();
    let record = next.add(payload);
    let stored = record.clone();
    persist(&state, move |db| database::insert_property(db, &stored)).await?;
    *state.catalog.write() = next;

    info!(id = %record.id, title = %record.title, "property added");
    Ok((StatusCode::CREATED, Json(record)))
}

/// Updates a property in place
///
/// Present fields replace the stored values; the id and catalog position are
/// preserved.
///
/// # Response
///
/// - **200 OK** - The updated record
/// - **404 Not Found** - Unknown id, nothing changed
pub async fn update_property(
    Path(id): Path<String>,
    State(state): State<AppState>,
    ApiJson(changes): ApiJson<PropertyUpdate>,
) -> Result<impl IntoResponse, AppError> {
    changes.validate()?;

    let _writer = state.catalog_writer.lock().await;

    let mut next = state.catalog.read().clone();
    let record = next
        .update(&id, changes)
        .ok_or_else(|| AppError::not_found("Property", id.as_str()))?;
    let stored = record.clone();
    persist(&state, move |db| database::update_property(db, &stored)).await?;
    *state.catalog.write() = next;

    info!(id = %record.id, "property updated");
    Ok(Json(record))
}

/// Deletes a property
///
/// # Response
///
/// - **200 OK** - Property deleted
/// - **404 Not Found** - Unknown id
pub async fn delete_property(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let _writer = state.catalog_writer.lock().await;

    let mut next = state.catalog.read().clone();
    if next.delete(&id).is_none() {
        return Err(AppError::not_found("Property", id));
    }
    let stored_id = id.clone();
    persist(&state, move |db| database::delete_property(db, &stored_id)).await?;
    *state.catalog.write() = next;

    info!(%id, "property deleted");
    Ok(Json(json!({
        "message": "Property deleted successfully",
        "deleted_id": id
    })))
}

/// Records a booking request
///
/// The property id is stored as given. New bookings start as `pending`.
///
/// # Response
///
/// - **201 Created** - The stored booking
/// - **400 Bad Request** - Empty guest name, bad dates or zero guests
pub async fn create_booking(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewBooking>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let booking = state.bookings.write().add(payload);

    info!(id = %booking.id, property_id = %booking.property_id, "booking received");
    Ok((StatusCode::CREATED, Json(booking)))
}

/// Lists bookings, optionally by `status` and `property_id`
pub async fn list_bookings(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<BookingListParams>,
) -> impl IntoResponse {
    let filter = BookingFilter {
        status: params.status,
        property_id: params.property_id,
    };
    let data = state.bookings.read().list(&filter);

    Json(json!({ "total": data.len(), "data": data }))
}

/// Changes a booking's status
pub async fn update_booking_status(
    Path(id): Path<String>,
    State(state): State<AppState>,
    ApiJson(update): ApiJson<BookingStatusUpdate>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state
        .bookings
        .write()
        .set_status(&id, update.status)
        .ok_or_else(|| AppError::not_found("Booking", id.as_str()))?;

    info!(%id, status = ?booking.status, "booking status changed");
    Ok(Json(booking))
}

pub async fn delete_booking(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    if state.bookings.write().delete(&id).is_none() {
        return Err(AppError::not_found("Booking", id));
    }

    info!(%id, "booking deleted");
    Ok(Json(json!({
        "message": "Booking deleted successfully",
        "deleted_id": id
    })))
}

/// Lists users
///
/// `GET /api/admin/users?q=martilhaven&role=staff`
///
/// `q` matches name or email; `role` is one of `all`, `customer`, `staff`,
/// `admin` (default: `all`).
pub async fn list_users(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<UserListParams>,
) -> impl IntoResponse {
    let filter = UserFilter {
        term: params.q.unwrap_or_default(),
        role: params.role,
    };
    let data = state.users.read().filter(&filter);

    Json(json!({ "total": data.len(), "data": data }))
}

/// Changes a user's role and/or status
pub async fn update_user(
    Path(id): Path<String>,
    State(state): State<AppState>,
    ApiJson(changes): ApiJson<UserUpdate>,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .users
        .write()
        .update(&id, changes)
        .ok_or_else(|| AppError::not_found("User", id.as_str()))?;

    info!(%id, role = ?user.role, status = ?user.status, "user updated");
    Ok(Json(user))
}

/// Dashboard summary for the admin home page
///
/// ```json
/// {
///   "properties": { "total": 4, "featured": 2 },
///   "bookings": { "total": 3, "pending": 1, "confirmed": 2, "cancelled": 0 },
///   "users": { "total": 5, "active": 4, "inactive": 1 }
/// }
/// ```
pub async fn dashboard_stats(State(state): State<AppState>) -> impl IntoResponse {
    let (total_properties, featured) = {
        let catalog = state.catalog.read();
        let featured = catalog.all().iter().filter(|p| p.featured).count();
        (catalog.len(), featured)
    };
    let (total_bookings, by_status) = {
        let bookings = state.bookings.read();
        (bookings.len(), bookings.count_by_status())
    };
    let (total_users, user_counts) = {
        let users = state.users.read();
        (users.len(), users.counts())
    };

    Json(json!({
        "properties": { "total": total_properties, "featured": featured },
        "bookings": {
            "total": total_bookings,
            "pending": by_status.pending,
            "confirmed": by_status.confirmed,
            "cancelled": by_status.cancelled
        },
        "users": {
            "total": total_users,
            "active": user_counts.active,
            "inactive": user_counts.inactive
        }
    }))
}
