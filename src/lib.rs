//! Timetable Portal
//!
//! Role-based web front end for a university timetable management system.
//!
//! This library provides:
//! - A typed client for the timetable REST API
//! - Session handling and role-based route guards
//! - A query cache with prefix invalidation
//! - Weekly grid placement, clash alerts and lecturer slot selection
//! - Student, lecturer and admin portals (Dioxus)

// =============================================================================
// Lints - Enforce code quality and consistency
// =============================================================================

// Deny truly dangerous patterns (these will fail the build)
#![deny(unsafe_code)]
#![deny(unused_must_use)]

// Dioxus UI app (shared between server SSR and WASM client)
pub mod app;

// Shared modules (compiled for both server and WASM)
pub mod api;
pub mod auth;
pub mod config;
pub mod notify;
pub mod query;
pub mod schedule;
pub mod validation;
