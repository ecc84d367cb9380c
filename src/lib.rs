//! Library exports for the rental catalog service
//!
//! This module exposes internal components for testing and potential library usage.

pub mod bookings;
pub mod catalog;
pub mod config;
pub mod database;
pub mod error;
pub mod extract;
pub mod handler;
pub mod model;
pub mod route;
pub mod search;
pub mod seed;
pub mod users;
