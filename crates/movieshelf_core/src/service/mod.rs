//! Use-case services built on top of the repository layer.
//!
//! # Responsibility
//! - Host the library facade that enforces domain invariants transactionally.
//! - Host boundary-layer input helpers (user rating parsing).

pub mod library_service;
pub mod rating;
