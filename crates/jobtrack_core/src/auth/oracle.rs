//! Identity oracle contract and in-process session implementation.
//!
//! # Responsibility
//! - Answer which principal, if any, is currently authenticated.
//! - Own sign-out semantics for the active session.
//!
//! # Invariants
//! - A principal is only reported while its session is active.
//! - `sign_out` is idempotent.

use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

/// Opaque identifier of the authenticated caller.
///
/// Supplied by the identity oracle; never defaulted or cached by core code.
pub type PrincipalId = Uuid;

/// External authority answering "who, if anyone, is authenticated".
///
/// Sign-in itself happens outside this core; implementations only expose
/// the current session state and session teardown.
pub trait IdentityOracle {
    /// Returns the currently authenticated principal, if any.
    ///
    /// Called before every data operation; sessions can expire between
    /// calls, so results must never be cached by callers.
    fn current_principal(&self) -> Option<PrincipalId>;

    /// Clears the active session.
    fn sign_out(&self);
}

impl<O: IdentityOracle + ?Sized> IdentityOracle for &O {
    fn current_principal(&self) -> Option<PrincipalId> {
        (**self).current_principal()
    }

    fn sign_out(&self) {
        (**self).sign_out();
    }
}

impl<O: IdentityOracle + ?Sized> IdentityOracle for Arc<O> {
    fn current_principal(&self) -> Option<PrincipalId> {
        (**self).current_principal()
    }

    fn sign_out(&self) {
        (**self).sign_out();
    }
}

/// In-process session holder backing the oracle contract.
///
/// Serves embedded deployments and tests; production deployments adapt
/// their auth provider behind the same trait.
#[derive(Debug, Default)]
pub struct MemorySessionOracle {
    current: Mutex<Option<PrincipalId>>,
}

impl MemorySessionOracle {
    /// Creates an oracle with no active session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an oracle with an already-active session.
    pub fn signed_in(principal: PrincipalId) -> Self {
        Self {
            current: Mutex::new(Some(principal)),
        }
    }

    /// Activates a session for `principal`, replacing any existing one.
    pub fn sign_in(&self, principal: PrincipalId) {
        *self.slot() = Some(principal);
    }

    fn slot(&self) -> MutexGuard<'_, Option<PrincipalId>> {
        match self.current.lock() {
            Ok(guard) => guard,
            // Session state is a plain Option; a poisoned lock cannot hold
            // a torn value, so recover instead of propagating the panic.
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl IdentityOracle for MemorySessionOracle {
    fn current_principal(&self) -> Option<PrincipalId> {
        *self.slot()
    }

    fn sign_out(&self) {
        *self.slot() = None;
    }
}
