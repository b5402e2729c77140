//! # Graph Model
//!
//! The two primitives every other layer is built from: guids and values.
//! A node is not a type here; it is whatever labels happen to be set under
//! a guid in the store.
//!
//! This module is pure data: no I/O, no state.

pub mod guid;
pub mod value;

pub use guid::Guid;
pub use value::Value;
