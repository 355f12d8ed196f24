//! Session identity resolution and the pre-operation access gate.
//!
//! # Responsibility
//! - Define the identity oracle contract answering "who is signed in".
//! - Gate every data operation on a freshly resolved principal.
//!
//! # Invariants
//! - No repository call runs without a principal resolved for that call.
//! - The guard never caches identity across operations.

pub mod guard;
pub mod oracle;
