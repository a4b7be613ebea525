pub mod error;
pub mod inversion;
pub mod odds;
pub mod poisson;
pub mod projection;
pub mod request;
pub mod types;

pub use projection::ProjectionEngine;
pub use request::{goal_minutes_from_strs, ProjectionRequest};
pub use types::ProjectionResult;
