//! HTTP server for the mock KYC service.
//!
//! Two protocol families share one identity store:
//! - Structured-data API (JSON): `/api/otp/request`, `/api/otp/verify`
//! - Legacy-markup API (XML, form-encoded requests):
//!   `/uidotp/2.5/{version}/{variant}`, `/uidkyc/kyc/2.5/{version}/{variant}`
//! - Liveness: `/health`

pub mod config;
pub mod error;
pub mod legacy;
pub mod projection;
pub mod server;
pub mod shutdown;
pub mod state;
pub mod structured;

pub use config::ServerConfig;
pub use error::RpcError;
pub use server::{build_router, RpcServer};
pub use shutdown::ShutdownController;
pub use state::AppState;
