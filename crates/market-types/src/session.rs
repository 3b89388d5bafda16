//! The signed-in user as seen by the pages.
//!
//! Authentication itself happens elsewhere; the pages only read who is
//! signed in and which roles they hold.

use serde::{Deserialize, Serialize};

use crate::types::MemberId;

/// Role name that marks a member as a freelancer
pub const FREELANCER_ROLE: &str = "FREELANCER";

/// Snapshot of the authentication context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub member_id: Option<MemberId>,
    pub username: Option<String>,
    pub roles: Vec<String>,
    /// False while the auth context is still being resolved
    pub loaded: bool,
}

impl Session {
    /// A resolved session with nobody signed in
    pub fn anonymous() -> Self {
        Self {
            loaded: true,
            ..Self::default()
        }
    }

    /// A resolved session for a signed-in member
    pub fn signed_in(member_id: MemberId, username: impl Into<String>, roles: Vec<String>) -> Self {
        Self {
            member_id: Some(member_id),
            username: Some(username.into()),
            roles,
            loaded: true,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.loaded && self.username.is_some()
    }

    /// Member id of the signed-in user, `None` when not authenticated
    pub fn current_user_id(&self) -> Option<MemberId> {
        if self.is_authenticated() {
            self.member_id
        } else {
            None
        }
    }

    pub fn is_freelancer(&self) -> bool {
        self.roles.iter().any(|role| role == FREELANCER_ROLE)
    }
}
