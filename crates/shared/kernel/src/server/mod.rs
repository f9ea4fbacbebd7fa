//! Transport primitives shared by every slice's HTTP handlers.

mod error;
mod health;
pub mod router;
mod state;

pub use error::{ApiError, ApiResult, ErrorBody, MessageBody};
pub use state::{ApiState, ApiStateBuilder, ApiStateError, ApiStateInner};
