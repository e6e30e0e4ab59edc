//! Command handlers -- one module per subcommand

pub mod analyze;
pub mod batch;
pub mod bulk;
pub mod check;
pub mod config;
pub mod repos;
pub mod vendor;
