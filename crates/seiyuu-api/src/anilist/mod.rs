pub mod client;
pub mod error;
pub mod paginate;
pub mod transport;
pub mod types;

pub use client::{AniListClient, ClientSettings};
pub use error::AniListError;
pub use paginate::{PaginationSettings, Paginator};
pub use transport::ReqwestTransport;
