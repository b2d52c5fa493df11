//! Operator session: restore, login, logout.
//!
//! One SessionStore instance gates every screen. The identity is persisted
//! as JSON under the config directory and restored at startup; a restored
//! session is trusted without re-validation (no token or expiry yet).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Who is signed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub display_name: String,
    pub role: String,
}

/// Session lifecycle. `Loading` only exists between construction and the
/// first `restore()`; there is no way back into it afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Loading,
    Unauthenticated,
    Authenticated(Identity),
}

/// Credential check, kept behind a trait so a real backend call can replace
/// the local pair without touching the session state machine.
pub trait Authenticator: Send {
    /// Returns the identity to sign in as, or `None` for bad credentials.
    fn verify(&self, identifier: &str, secret: &str) -> Option<Identity>;
}

/// Fixed-credential check standing in for a future backend call.
pub struct LocalAuthenticator {
    identifier: String,
    secret: String,
}

impl LocalAuthenticator {
    pub fn new(identifier: &str, secret: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            secret: secret.to_string(),
        }
    }
}

impl Default for LocalAuthenticator {
    fn default() -> Self {
        Self::new(LOCAL_OPERATOR_IDENTIFIER, LOCAL_OPERATOR_SECRET)
    }
}

impl Authenticator for LocalAuthenticator {
    fn verify(&self, identifier: &str, secret: &str) -> Option<Identity> {
        if identifier == self.identifier && secret == self.secret {
            Some(Identity {
                display_name: LOCAL_OPERATOR_NAME.to_string(),
                role: LOCAL_OPERATOR_ROLE.to_string(),
            })
        } else {
            None
        }
    }
}

/// Owns the current session and its persisted copy.
pub struct SessionStore {
    state: SessionState,
    path: PathBuf,
    authenticator: Box<dyn Authenticator>,
}

impl SessionStore {
    pub fn new(path: PathBuf, authenticator: Box<dyn Authenticator>) -> Self {
        Self {
            state: SessionState::Loading,
            path,
            authenticator,
        }
    }

    /// Store at the default path with the local credential check.
    pub fn open_default() -> Self {
        Self::new(session_file_path(), Box::<LocalAuthenticator>::default())
    }

    /// Read the persisted identity, if any. Resolves the `Loading` state;
    /// must run before any gated screen renders.
    pub fn restore(&mut self) {
        self.state = match std::fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str::<Identity>(&content) {
                Ok(identity) => SessionState::Authenticated(identity),
                // Malformed file: treat as signed out
                Err(_) => SessionState::Unauthenticated,
            },
            Err(_) => SessionState::Unauthenticated,
        };
    }

    /// Attempt a sign-in. On success the identity is persisted and the state
    /// becomes `Authenticated`; on failure the state is left untouched.
    pub fn login(&mut self, identifier: &str, secret: &str) -> bool {
        let Some(identity) = self.authenticator.verify(identifier, secret) else {
            return false;
        };
        self.persist(&identity);
        self.state = SessionState::Authenticated(identity);
        true
    }

    /// Clear the in-memory identity and the persisted copy.
    pub fn logout(&mut self) {
        self.state = SessionState::Unauthenticated;
        // A missing file is already the desired end state
        let _ = std::fs::remove_file(&self.path);
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn identity(&self) -> Option<&Identity> {
        match &self.state {
            SessionState::Authenticated(identity) => Some(identity),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated(_))
    }

    fn persist(&self, identity: &Identity) {
        if let Some(parent) = self.path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        // Best-effort: a failed write only costs the next restore
        let _ = std::fs::write(
            &self.path,
            serde_json::to_string_pretty(identity).unwrap_or_default(),
        );
    }
}
