//! Data models for the rental catalog service
//!
//! This module defines the records kept by the catalog, bookings and user
//! directory, plus the request payloads and query parameters accepted by the
//! HTTP handlers. Payloads reject unknown fields so a caller cannot set
//! server-owned values such as `id` or `rating`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Billing granularity of a property's price
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PriceUnit {
    #[default]
    Night,
    Week,
    Month,
}

/// One rental listing in the catalog
///
/// # Example
/// ```json
/// {
///   "id": "k2Jd9XqA",
///   "title": "Sea View Villa",
///   "location": "Martil, Morocco",
///   "description": "Three bedrooms facing the beach",
///   "price": 200.0,
///   "price_unit": "night",
///   "bedrooms": 3,
///   "bathrooms": 2,
///   "capacity": 6,
///   "featured": true,
///   "rating": 4.9,
///   "reviews": 42,
///   "images": ["https://images.example.com/villa-1.jpg"],
///   "amenities": ["Private Pool", "Ocean View"]
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Property {
    /// Catalog-assigned identifier, never changes after creation
    pub id: String,

    pub title: String,

    pub location: String,

    #[serde(default)]
    pub description: String,

    /// Price per `price_unit`, always finite and non-negative
    pub price: f64,

    #[serde(default)]
    pub price_unit: PriceUnit,

    pub bedrooms: u32,

    pub bathrooms: u32,

    /// Maximum number of guests
    pub capacity: u32,

    /// Marks the listing for promotional placement on the home page
    #[serde(default)]
    pub featured: bool,

    #[serde(default)]
    pub rating: f64,

    /// Number of reviews behind `rating`
    #[serde(default)]
    pub reviews: u32,

    /// Image URLs in display order, the first one is the cover
    #[serde(default)]
    pub images: Vec<String>,

    #[serde(default)]
    pub amenities: Vec<String>,
}

/// Request payload for adding a property
///
/// Rating and review count are not accepted here; new listings start at zero.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct NewProperty {
    pub title: String,
    pub location: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub price_unit: PriceUnit,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub capacity: u32,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
}

impl NewProperty {
    /// Checks the invariants the catalog relies on
    pub fn validate(&self) -> Result<(), AppError> {
        validate_title(&self.title)?;
        validate_amount("price", self.price)
    }
}

/// Request payload for updating a property
///
/// Every field is optional: present fields replace the stored value, absent
/// fields keep it. The identifier cannot be changed.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct PropertyUpdate {
    pub title: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub price_unit: Option<PriceUnit>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub capacity: Option<u32>,
    pub featured: Option<bool>,
    pub rating: Option<f64>,
    pub reviews: Option<u32>,
    pub images: Option<Vec<String>>,
    pub amenities: Option<Vec<String>>,
}

impl PropertyUpdate {
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(price) = self.price {
            validate_amount("price", price)?;
        }
        if let Some(rating) = self.rating {
            validate_amount("rating", rating)?;
        }
        Ok(())
    }
}

fn validate_title(title: &str) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::invalid("title must not be empty"));
    }
    Ok(())
}

fn validate_amount(field: &str, value: f64) -> Result<(), AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::invalid(format!(
            "{field} must be a finite, non-negative number"
        )));
    }
    Ok(())
}

/// Query parameters for searching the catalog
///
/// # Example
/// Query string: `?q=villa&min_price=100&max_price=400&min_bedrooms=2&featured=true`
#[derive(Deserialize, Debug, Default)]
pub struct SearchParams {
    /// Free text matched against title, location and description
    pub q: Option<String>,

    /// Matched against the location only
    pub location: Option<String>,

    pub min_price: Option<f64>,

    pub max_price: Option<f64>,

    pub min_bedrooms: Option<u32>,

    /// Minimum guest capacity
    pub guests: Option<u32>,

    /// Only featured listings when `true`
    pub featured: Option<bool>,

    /// Page number for pagination (starts from 1)
    pub page: Option<usize>,

    /// Items per page, defaults to 50 and is capped at 100
    pub limit: Option<usize>,
}

impl SearchParams {
    /// Rejects price bounds such as `NaN` or `inf` that would silently
    /// match nothing
    pub fn validate(&self) -> Result<(), AppError> {
        for (name, bound) in [("min_price", self.min_price), ("max_price", self.max_price)] {
            if bound.is_some_and(|value| !value.is_finite()) {
                return Err(AppError::invalid(format!("{name} must be a finite number")));
            }
        }
        Ok(())
    }
}

/// Lifecycle state of a reservation
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

/// A reservation request for a property
///
/// `property_id` is recorded as given; it is not checked against the catalog.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Booking {
    pub id: String,
    pub property_id: String,
    pub guest_name: String,
    pub guest_email: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
    pub total_price: f64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

/// Request payload for creating a booking
///
/// # Example
/// ```json
/// {
///   "property_id": "k2Jd9XqA",
///   "guest_name": "Laura Wilson",
///   "guest_email": "lwilson@example.com",
///   "check_in": "2026-07-01",
///   "check_out": "2026-07-08",
///   "guests": 4,
///   "total_price": 1400.0
/// }
/// ```
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct NewBooking {
    pub property_id: String,
    pub guest_name: String,
    pub guest_email: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
    pub total_price: f64,
}

impl NewBooking {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.guest_name.trim().is_empty() {
            return Err(AppError::invalid("guest_name must not be empty"));
        }
        if self.check_out <= self.check_in {
            return Err(AppError::invalid("check_out must be after check_in"));
        }
        if self.guests == 0 {
            return Err(AppError::invalid("guests must be at least 1"));
        }
        validate_amount("total_price", self.total_price)
    }
}

/// Request payload for changing a booking's status
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct BookingStatusUpdate {
    pub status: BookingStatus,
}

/// Query parameters for listing bookings
#[derive(Deserialize, Debug, Default)]
pub struct BookingListParams {
    pub status: Option<BookingStatus>,
    pub property_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Customer,
    Staff,
    Admin,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
}

/// An account shown in the admin users page
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub registered_date: NaiveDate,
    #[serde(default)]
    pub last_login: Option<NaiveDate>,
}

/// Role selector for the users list, `all` disables the role constraint
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RoleFilter {
    #[default]
    All,
    Customer,
    Staff,
    Admin,
}

impl RoleFilter {
    pub fn accepts(self, role: UserRole) -> bool {
        match self {
            RoleFilter::All => true,
            RoleFilter::Customer => role == UserRole::Customer,
            RoleFilter::Staff => role == UserRole::Staff,
            RoleFilter::Admin => role == UserRole::Admin,
        }
    }
}

/// Query parameters for listing users
///
/// Query string: `?q=amina&role=admin`
#[derive(Deserialize, Debug, Default)]
pub struct UserListParams {
    /// Matched against name and email
    pub q: Option<String>,
    #[serde(default)]
    pub role: RoleFilter,
}

/// Request payload for changing a user's role or status
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct UserUpdate {
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
}
