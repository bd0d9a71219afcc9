//! API interface implementations

pub mod callbacks_handler;
pub mod calls_handler;
pub mod dto;
pub mod error;
pub mod health_handler;
pub mod metrics_handler;
pub mod router;
pub mod state;

pub use dto::ApiResponse;
pub use error::ApiError;
pub use metrics_handler::init_metrics;
pub use router::build_router;
pub use state::AppState;
