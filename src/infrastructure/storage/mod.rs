//! In-process stores for development and testing

mod memory;

pub use memory::{InMemoryCompanyRepository, InMemoryUserRepository};
