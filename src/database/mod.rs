//! # Database Operations
//!
//! Connection pool management for the PostgreSQL entity store.

pub mod connection;

pub use connection::DatabaseConnection;
