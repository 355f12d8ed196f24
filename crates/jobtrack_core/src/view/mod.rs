//! Client-visible list state and its synchronization protocol.
//!
//! # Responsibility
//! - Hold the ordered record list shown to the caller.
//! - Re-synchronize it from the store after every confirmed mutation.
//!
//! # Invariants
//! - The held list only ever reflects a confirmed store read.
//! - A failed operation leaves the held list untouched.

pub mod dashboard;
