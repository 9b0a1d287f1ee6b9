//! chatterd - a line-oriented multi-user chat server.
//!
//! Clients connect over TCP, pick a unique name and then every line they
//! send is either a `!command` or chat relayed to everyone else.

pub mod config;
pub mod handlers;
pub mod network;
pub mod state;
pub mod telemetry;
