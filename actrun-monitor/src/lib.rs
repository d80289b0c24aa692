//! Actrun Run Monitor
//!
//! Owns the lifecycle of one actor run: starting it, polling its status at
//! a fixed cadence, fetching results on success, and tearing the poll loop
//! down deterministically.
//!
//! The monitor talks to the gateway through the [`RunApi`] trait so tests
//! can script status sequences; production uses the blanket implementation
//! for [`actrun_client::GatewayClient`].
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use actrun_client::GatewayClient;
//! use actrun_monitor::{RunEvent, RunMonitor};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GatewayClient::new("http://localhost:3000").with_api_key("my-key");
//!     let monitor = RunMonitor::new(Arc::new(client));
//!
//!     let mut watch = monitor.start("my-actor", serde_json::json!({})).await?;
//!     while let Some(event) = watch.next_event().await {
//!         if let RunEvent::Finished { status } = event {
//!             println!("run ended: {}", status);
//!             break;
//!         }
//!     }
//!     Ok(())
//! }
//! ```

mod api;
mod lifecycle;

pub use api::{RunApi, RunApiError};
pub use lifecycle::{
    MonitorConfig, PollHandle, RunEvent, RunMonitor, RunPhase, RunWatch, StartError,
};
