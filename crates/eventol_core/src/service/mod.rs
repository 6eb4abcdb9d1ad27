//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate identity resolution, scoping and rendering into
//!   request-level APIs.
//! - Keep CLI callers decoupled from storage details.

pub mod admin_service;
