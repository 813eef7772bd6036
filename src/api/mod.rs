//! Backend REST boundary: typed records and the HTTP client.

pub mod http;
pub mod types;

pub use http::{BackendClient, InjuryListParams, PlayerListParams};
pub use types::{
    DashboardStats, Health, InjuryRecord, Normalize, PlayerRecord, Severity, SquadPlayer,
};
