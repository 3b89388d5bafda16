//! User-visible effects produced by the controllers.
//!
//! Controllers never let an error escape. They turn it into effects the host
//! renders: an alert, a redirect to sign-in, a scroll to the top of the list.

use tracing::{error, warn};

use market_types::ClientError;

/// An effect for the host to carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    Alert(String),
    RedirectToSignIn,
    ScrollToTop,
}

/// Effects queued during one trigger, taken by the host afterwards.
#[derive(Debug, Default)]
pub struct Notices {
    effects: Vec<UiEffect>,
}

impl Notices {
    pub fn push(&mut self, effect: UiEffect) {
        self.effects.push(effect);
    }

    pub fn alert(&mut self, message: impl Into<String>) {
        self.effects.push(UiEffect::Alert(message.into()));
    }

    /// Turn a failed action into an alert, plus a sign-in redirect when the
    /// action needed a user.
    pub fn report(&mut self, context: &str, err: &ClientError) {
        match err {
            ClientError::AuthRequired { action } => {
                warn!("{}: sign-in required to {}", context, action);
                self.alert("Sign-in required.");
                self.push(UiEffect::RedirectToSignIn);
            }
            other => {
                error!("{}: {}", context, other);
                self.alert(format!("{context}: {other}"));
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn take(&mut self) -> Vec<UiEffect> {
        std::mem::take(&mut self.effects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_required_redirects() {
        let mut notices = Notices::default();
        notices.report("Sort by favorite", &ClientError::auth_required("sort by favorite"));

        assert_eq!(
            notices.take(),
            vec![
                UiEffect::Alert("Sign-in required.".to_string()),
                UiEffect::RedirectToSignIn
            ]
        );
        assert!(notices.is_empty());
    }

    #[test]
    fn test_other_errors_alert_only() {
        let mut notices = Notices::default();
        notices.report(
            "Failed to load projects",
            &ClientError::Status {
                status: 500,
                body: "boom".to_string(),
            },
        );

        let effects = notices.take();
        assert_eq!(effects.len(), 1);
        assert!(matches!(&effects[0], UiEffect::Alert(msg) if msg.contains("500")));
    }
}
