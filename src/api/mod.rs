//! Handler-facing response types and pagination helpers

pub mod pagination;
pub mod response;

pub use pagination::PageRequest;
pub use response::{Created, ResultSet, TotalCount};
