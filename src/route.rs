//! Route definitions for the rental catalog API
//!
//! This module maps HTTP routes to their handlers and injects the
//! application state.

use axum::routing::{get, patch, post, put};
use axum::Router;

use crate::database::AppState;
use crate::handler::{
    create_booking, create_property, dashboard_stats, delete_booking, delete_property,
    featured_properties, get_property, list_bookings, list_users, search_properties,
    update_booking_status, update_property, update_user,
};

/// Creates and configures the Axum application router with all routes
///
/// # Route Definitions
///
/// Public:
/// - `GET /api/properties` - Search the catalog
/// - `GET /api/properties/featured` - Featured listings
/// - `GET /api/properties/{id}` - Property details
/// - `POST /api/bookings` - Request a booking
///
/// Admin back-office:
/// - `POST /api/admin/properties` - Add a property
/// - `PUT|PATCH|DELETE /api/admin/properties/{id}` - Update or delete a property
/// - `GET /api/admin/bookings` - List bookings
/// - `PATCH|DELETE /api/admin/bookings/{id}` - Change status or delete a booking
/// - `GET /api/admin/users` - List users
/// - `PATCH /api/admin/users/{id}` - Change role or status
/// - `GET /api/admin/stats` - Dashboard summary
///
/// # Example Usage
///
/// ```no_run
/// # use rentals::database::{init_db, AppState};
/// # use rentals::route::create_app;
/// # let db = init_db("rentals.db").unwrap();
/// let state = AppState::new(db).unwrap();
/// let app = create_app(state);
/// // axum::serve(listener, app).await.unwrap();
/// ```
pub fn create_app(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/properties", post(create_property))
        .route(
            "/properties/{id}",
            put(update_property)
                .patch(update_property)
                .delete(delete_property),
        )
        .route("/bookings", get(list_bookings))
        .route(
            "/bookings/{id}",
            patch(update_booking_status).delete(delete_booking),
        )
        .route("/users", get(list_users))
        .route("/users/{id}", patch(update_user))
        .route("/stats", get(dashboard_stats));

    let api_routes = Router::new()
        .route("/properties", get(search_properties))
        .route("/properties/featured", get(featured_properties))
        .route("/properties/{id}", get(get_property))
        .route("/bookings", post(create_booking))
        .nest("/admin", admin_routes);

    Router::new()
        // Mount API routes under /api
        .nest("/api", api_routes)
        // Inject the application state into all handlers
        .with_state(state)
}
