//! Database entities module

pub mod company;
pub mod user;
