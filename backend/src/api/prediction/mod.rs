//! Module for the churn prediction API.
//!
//! This module defines the single-record and batch prediction endpoints.

pub mod handlers;
pub mod routes;
