//! Usecases: what the HTTP adapter calls

pub mod auth;
pub mod company;

pub use auth::{AuthUsecase, AuthUsecases};
pub use company::{CompanyUsecase, CompanyUsecases};
