//! Web layer for the transit planner.
//!
//! Provides HTTP endpoints for listing stops and planning arrive-by journeys.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
