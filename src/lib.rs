//! In-memory product catalog: import spreadsheets or CSV into normalized
//! records, then filter, sort and paginate them.

pub mod config;
pub mod data;
pub mod import;
pub mod state;
