//! Backend API access: the request dispatcher, list fetching and resource types.

pub mod client;
pub mod list;
pub mod models;
