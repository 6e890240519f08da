//! Turf slot booking service: fixed one-hour slots per calendar day, booked
//! over a small REST API and persisted in PostgreSQL (or an in-memory store
//! when no database is configured).

pub mod availability;
pub mod backend;
pub mod configuration;
pub mod configuration_handler;
pub mod database;
pub mod error;
pub mod http;
pub mod local_store;
pub mod schema;
pub mod slot_time;
pub mod types;

#[cfg(test)]
mod testutils;
