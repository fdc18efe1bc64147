pub mod pagination;
pub mod shutdown;

pub use pagination::*;
pub use shutdown::*;
