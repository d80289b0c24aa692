//! Core domain types
//!
//! These types represent the fundamental entities of the system and are
//! shared between the gateway (reshaping upstream responses) and the
//! client-side crates (rendering and run monitoring).

pub mod actor;
pub mod run;
pub mod user;
