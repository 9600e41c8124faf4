/// Database connection and table creation
pub mod database;

/// School-level settings loaded from config.toml
pub mod school;

/// Fixed sample data applied at startup
pub mod seed;
