//! Core utilities for the roster dashboard
//!
//! - `cache`: in-memory query cache with resource invalidation
//! - `files`: config file read/write helpers
//! - `http`: default headers and backend error decoding

pub mod cache;
pub mod files;
pub mod http;

pub use cache::{CacheKey, CacheStatus, QueryCache, QueryKey, Resource};
pub use files::{try_read_to_string, write_string};
pub use http::{default_header_map, error_message};
