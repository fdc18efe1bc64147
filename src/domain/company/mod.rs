//! Company aggregate
//!
//! Contains the Company entity and its repository interface.

pub mod model;
pub mod repository;

pub use model::{Company, CompanyType, DESCRIPTION_MAX_LEN, NAME_MAX_LEN};
pub use repository::CompanyRepository;
