//! Data transfer objects for the local gateway API
//!
//! Every gateway response carries a `success` flag; error paths use
//! [`envelope::ErrorBody`] with a human-readable message. The shapes here
//! are shared between the gateway (serializing) and the gateway client
//! (deserializing).

pub mod actor;
pub mod auth;
pub mod envelope;
pub mod run;
