pub mod api;
pub mod config;
pub mod consumers;
pub mod error;
pub mod lifecycle;
mod main_lib;
pub mod shutdown;

pub use main_lib::{build_state, build_state_with_publisher, init_tracing, AppState};
