//! Pre-operation authentication gate.
//!
//! # Responsibility
//! - Resolve the current principal before every data operation.
//! - Reject operations without a principal before any store access.
//!
//! # Invariants
//! - The wrapped operation never runs when resolution fails.
//! - Resolution happens per call; sessions may expire between calls.

use crate::auth::oracle::{IdentityOracle, PrincipalId};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Outcome signaled when no authenticated principal is available.
///
/// Presentation layers translate this into a redirect to sign-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unauthenticated;

impl Display for Unauthenticated {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "no authenticated principal; sign-in is required")
    }
}

impl Error for Unauthenticated {}

/// Identity gate wrapped around every repository operation.
///
/// A pure gate: beyond resolving identity it has no side effects and
/// keeps no per-operation state.
pub struct AccessGuard<O: IdentityOracle> {
    oracle: O,
}

impl<O: IdentityOracle> AccessGuard<O> {
    pub fn new(oracle: O) -> Self {
        Self { oracle }
    }

    /// Resolves the current principal and runs `op` with it injected.
    ///
    /// # Contract
    /// - Resolution is performed on every invocation, never cached.
    /// - Without a principal, `op` is not invoked and `Unauthenticated`
    ///   is surfaced through the caller's error type.
    pub fn with_principal<T, E>(
        &self,
        op: impl FnOnce(PrincipalId) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<Unauthenticated>,
    {
        match self.oracle.current_principal() {
            Some(principal) => op(principal),
            None => {
                warn!("event=access_gate module=auth status=denied reason=no_principal");
                Err(E::from(Unauthenticated))
            }
        }
    }

    /// Ends the active session through the oracle.
    pub fn sign_out(&self) {
        self.oracle.sign_out();
        info!("event=sign_out module=auth status=ok");
    }
}
