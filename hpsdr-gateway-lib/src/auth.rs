use async_trait::async_trait;

/// Identity bound to a session. The reference gateway only ever
/// assigns [`Principal::Anonymous`]; this type exists so a real
/// authenticator has somewhere to put the identity it establishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    Anonymous,
    Token(String),
}

impl Default for Principal {
    fn default() -> Self {
        Principal::Anonymous
    }
}

/// External collaborator deciding session identity. Consulted on
/// session creation only when a token is supplied; for the sentinel
/// anonymous path the engine calls `create_anonymous_principal`
/// directly, with no suspension point.
///
/// Kept as a trait rather than baked into the engine because real
/// authentication (JWT validation, a backing user database) is
/// explicitly out of scope for the core gateway: Protocol 1 carries no
/// wire-level token field, so `validate_token` exists as a forward
/// extension seam for deployments that wrap the wire format.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn validate_token(&self, token: &str) -> Option<Principal>;

    fn create_anonymous_principal(&self) -> Principal;
}

/// Default [`Authenticator`]. `validate_token` always returns `None`,
/// forcing anonymous-or-drop per `security.require_authentication`;
/// `create_anonymous_principal` returns the anonymous sentinel.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAuthenticator;

#[async_trait]
impl Authenticator for NoopAuthenticator {
    async fn validate_token(&self, _token: &str) -> Option<Principal> {
        None
    }

    fn create_anonymous_principal(&self) -> Principal {
        Principal::Anonymous
    }
}

/// Safety-default [`Authenticator`] wired in when `security.require_authentication`
/// is set but no real authenticator was supplied. Identical wire
/// behavior to [`NoopAuthenticator`] (there is no token to validate
/// either way), but its own type name documents that a deployment
/// relying on it is misconfigured: every client is dropped rather than
/// ever granted an anonymous session, since the engine only calls
/// `create_anonymous_principal` on the `require_authentication = false`
/// path.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyAllAuthenticator;

#[async_trait]
impl Authenticator for DenyAllAuthenticator {
    async fn validate_token(&self, _token: &str) -> Option<Principal> {
        None
    }

    fn create_anonymous_principal(&self) -> Principal {
        Principal::Anonymous
    }
}
