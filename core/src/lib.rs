pub mod batch;
pub mod config;
pub mod coord;
pub mod dir;
pub mod error;
pub mod extract;
pub mod file;
pub mod line;
pub mod reconcile;
pub mod store;
pub mod trace;
pub mod utils;
