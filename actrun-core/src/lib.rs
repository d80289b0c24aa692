//! Actrun Core
//!
//! Core types and abstractions shared across the actrun services.
//!
//! This crate contains:
//! - Domain types: actors, runs, user accounts
//! - DTOs: the JSON envelopes exposed by the local gateway API
//! - Schema: typed model of an actor's declared input schema
//! - Input: the editable input configuration with form/raw-text sync

pub mod domain;
pub mod dto;
pub mod input;
pub mod schema;
