//! Scoped elevation of the execution context.
//!
//! Batches arrive on a thread owned by the transport, possibly still carrying
//! the caller's identity. Processing runs inside an [`ElevatedScope`], which
//! switches to the process's own identity and switches back when dropped,
//! whichever way processing ends.

/// Opaque handle to the identity that was active before elevation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityToken(pub u64);

/// Platform hook for swapping the calling identity.
pub trait CallingIdentity: Send + Sync {
    /// Switches to the process's own identity, returning the previous one.
    fn clear(&self) -> IdentityToken;

    /// Reinstates an identity previously returned by `clear`.
    fn restore(&self, token: IdentityToken);
}

/// Identity hook for hosts without a cross-process caller identity.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessIdentity;

impl CallingIdentity for ProcessIdentity {
    fn clear(&self) -> IdentityToken {
        IdentityToken(0)
    }

    fn restore(&self, _token: IdentityToken) {}
}

/// Guard that keeps the process identity in effect until dropped.
pub struct ElevatedScope<'a> {
    identity: &'a dyn CallingIdentity,
    token: IdentityToken,
}

impl<'a> ElevatedScope<'a> {
    pub fn enter(identity: &'a dyn CallingIdentity) -> Self {
        let token = identity.clear();
        Self { identity, token }
    }
}

impl Drop for ElevatedScope<'_> {
    fn drop(&mut self) {
        self.identity.restore(self.token);
    }
}
