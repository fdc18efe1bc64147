//! Boundary adapters

pub mod http;
