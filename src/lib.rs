//! Movie rating service with collaborative-filtering predictions.
//!
//! The engine in [`services`] is pure: it reads ratings through
//! [`store::RatingStore`] and never writes. [`api`] exposes it over HTTP on
//! top of the in-memory arena store.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
pub mod store;
