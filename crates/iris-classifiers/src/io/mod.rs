//! Input helpers: remote/local resource fetching and Iris CSV parsing.
pub mod fetch;
pub mod iris_csv;

pub use fetch::{default_cache_dir, fetch_resource, FetchConfig};
pub use iris_csv::{load_table, parse_iris_csv};
