//! Wire DTOs shared between the price-audit frontend and the REST backend.

pub mod domain;
pub mod shared;
