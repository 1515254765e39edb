pub mod aggregate;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;

pub use error::SeiyuuError;
pub use pipeline::{run_query, QueryOptions};
