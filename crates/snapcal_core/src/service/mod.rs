//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate extraction, scheduling and collaborator calls into
//!   use-case level APIs.
//! - Keep UI/FFI layers decoupled from collaborator details.

pub mod event_pipeline;
