use crate::error::{Result, ReviewError};

/// Where the current viewer's identity comes from. Identities are opaque
/// strings compared for equality only.
pub trait IdentitySource {
    fn current_user(&self) -> Option<String>;
}

/// A fixed identity, as passed on the command line.
#[derive(Debug, Clone, Default)]
pub struct FixedIdentity(pub Option<String>);

impl FixedIdentity {
    pub fn new(user: impl Into<String>) -> Self {
        Self(Some(user.into()))
    }

    pub fn anonymous() -> Self {
        Self(None)
    }
}

impl IdentitySource for FixedIdentity {
    fn current_user(&self) -> Option<String> {
        self.0.clone().filter(|u| !u.trim().is_empty())
    }
}

/// Resolve the viewer or fail with [`ReviewError::MissingIdentity`].
pub fn require_user(source: &dyn IdentitySource) -> Result<String> {
    source.current_user().ok_or(ReviewError::MissingIdentity)
}
