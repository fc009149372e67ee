//! Inbound adapters that translate external requests into domain service
//! calls while keeping framework details at the edge.
//!
//! The REST adapter lives under [`http`].

pub mod http;
