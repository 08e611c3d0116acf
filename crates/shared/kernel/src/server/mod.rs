//! HTTP plumbing shared by feature routers: application state, error envelope, health.

mod error;
mod health;
pub mod router;
mod state;

pub use error::ApiError;
pub use state::{ApiState, ApiStateBuilder, ApiStateError, ApiStateInner};
