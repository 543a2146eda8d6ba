pub mod error;
pub mod handler;
pub mod models;
pub mod routes;

pub use error::InsightError;
pub use routes::insight_routes;
