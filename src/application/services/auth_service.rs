//! Authorization gate for privileged commands

use crate::domain::entities::User;
use crate::infrastructure::config::SharedConfig;

/// Decides whether an identity may run gated commands
#[derive(Clone)]
pub struct AuthorizationGate {
    config: SharedConfig,
}

impl AuthorizationGate {
    pub fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    /// True iff `identity` is the currently configured owner.
    ///
    /// Reads the shared config on every call; a poisoned lock denies.
    pub fn authorize(&self, identity: &str) -> bool {
        self.config
            .read()
            .map(|config| config.is_owner(identity))
            .unwrap_or(false)
    }

    /// Senders the platform did not identify are never authorized
    pub fn authorize_sender(&self, sender: Option<&User>) -> bool {
        sender.is_some_and(|user| self.authorize(&user.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::Config;

    fn gate(owner: &str) -> (AuthorizationGate, SharedConfig) {
        let config = Config {
            owner_id: owner.to_string(),
            ..Config::default()
        }
        .into_shared();
        (AuthorizationGate::new(config.clone()), config)
    }

    #[test]
    fn test_owner_only() {
        let (gate, _) = gate("42");
        assert!(gate.authorize("42"));
        assert!(!gate.authorize("7"));
        assert!(!gate.authorize(""));
    }

    #[test]
    fn test_sender() {
        let (gate, _) = gate("42");
        assert!(gate.authorize_sender(Some(&User::new("42"))));
        assert!(!gate.authorize_sender(Some(&User::new("7"))));
        assert!(!gate.authorize_sender(None));
    }

    #[test]
    fn test_rereads_owner() {
        let (gate, config) = gate("42");
        config.write().unwrap().owner_id = "7".to_string();

        assert!(gate.authorize("7"));
        assert!(!gate.authorize("42"));
    }

    #[test]
    fn test_concurrent_reads() {
        let (gate, _) = gate("42");
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let gate = gate.clone();
                std::thread::spawn(move || gate.authorize(if i % 2 == 0 { "42" } else { "7" }))
            })
            .collect();

        let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results, vec![true, false, true, false]);
    }
}
