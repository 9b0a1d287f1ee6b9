//! The name → session table.
//!
//! Every operation that decides on or changes membership runs under one
//! write lock, so name uniqueness cannot be violated by interleaving: two
//! claims of the same name, or a claim racing a rename onto that name,
//! serialize and exactly one wins. Enumeration copies the table under the
//! read lock and hands the copy back, so callers never do per-session I/O
//! while holding it.

use super::session::Session;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Characters a display name must not contain.
pub const RESERVED_NAME_CHARS: [char; 4] = [' ', ':', '\n', '\r'];

/// Reasons a name cannot be claimed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimError {
    #[error("invalid name: {0:?}")]
    Invalid(String),
    #[error("name is taken: {0}")]
    Taken(String),
    #[error("no such name: {0}")]
    NotFound(String),
}

/// Check a candidate display name.
pub fn validate_name(name: &str) -> Result<(), ClaimError> {
    if name.is_empty() || name.contains(RESERVED_NAME_CHARS) {
        return Err(ClaimError::Invalid(name.to_string()));
    }
    Ok(())
}

#[derive(Default)]
pub struct Registry {
    by_name: RwLock<HashMap<String, Arc<Session>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `session`.
    ///
    /// The session's own name is updated inside the same critical section.
    pub fn try_claim(&self, session: &Arc<Session>, name: &str) -> Result<(), ClaimError> {
        validate_name(name)?;

        let mut by_name = self.by_name.write();
        if by_name.contains_key(name) {
            return Err(ClaimError::Taken(name.to_string()));
        }
        session.set_name(name);
        by_name.insert(name.to_string(), Arc::clone(session));
        Ok(())
    }

    /// Remove the binding for `name`, if any.
    pub fn release(&self, name: &str) -> Option<Arc<Session>> {
        self.by_name.write().remove(name)
    }

    /// Remove `session`'s binding, if it still holds one.
    ///
    /// Unlike [`release`](Self::release) this never touches a binding that
    /// another session has since claimed under the same name.
    pub fn release_session(&self, session: &Session) -> bool {
        let mut by_name = self.by_name.write();
        let name = session.name();
        match by_name.get(&name) {
            Some(bound) if bound.id() == session.id() => {
                by_name.remove(&name);
                true
            }
            _ => false,
        }
    }

    /// Move the session bound to `old` over to `new`.
    ///
    /// Either both the removal of `old` and the insertion of `new` happen, or
    /// neither does. Returns the renamed session.
    pub fn rename(&self, old: &str, new: &str) -> Result<Arc<Session>, ClaimError> {
        validate_name(new)?;

        let mut by_name = self.by_name.write();
        if by_name.contains_key(new) {
            return Err(ClaimError::Taken(new.to_string()));
        }
        let session = by_name
            .remove(old)
            .ok_or_else(|| ClaimError::NotFound(old.to_string()))?;
        session.set_name(new);
        by_name.insert(new.to_string(), Arc::clone(&session));
        Ok(session)
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<Session>> {
        self.by_name.read().get(name).cloned()
    }

    /// Point-in-time copy of every registered session.
    pub fn snapshot_all(&self) -> Vec<Arc<Session>> {
        self.by_name.read().values().cloned().collect()
    }

    /// Point-in-time copy of every registered name, sorted.
    pub fn snapshot_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.by_name.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.by_name.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SessionIdGenerator;
    use crate::state::session::test_support::session;
    use std::sync::Barrier;
    use std::thread;

    #[test]
    fn test_claim_and_lookup() {
        let ids = SessionIdGenerator::new();
        let registry = Registry::new();
        let (alice, _rx) = session(&ids, 4);

        registry.try_claim(&alice, "alice").unwrap();
        assert_eq!(alice.name(), "alice");
        let found = registry.lookup("alice").unwrap();
        assert!(Arc::ptr_eq(&found, &alice));
        assert!(registry.lookup("bob").is_none());
    }

    #[test]
    fn test_claim_rejects_reserved_characters() {
        let ids = SessionIdGenerator::new();
        let registry = Registry::new();
        let (s, _rx) = session(&ids, 4);

        for bad in ["", "a b", "a:b", "a\nb", "a\r"] {
            assert_eq!(
                registry.try_claim(&s, bad),
                Err(ClaimError::Invalid(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
        assert!(registry.is_empty());
        assert_eq!(s.name(), "");
    }

    #[test]
    fn test_claim_taken() {
        let ids = SessionIdGenerator::new();
        let registry = Registry::new();
        let (first, _a) = session(&ids, 4);
        let (second, _b) = session(&ids, 4);

        registry.try_claim(&first, "alice").unwrap();
        assert_eq!(
            registry.try_claim(&second, "alice"),
            Err(ClaimError::Taken("alice".into()))
        );
        assert_eq!(second.name(), "");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_release_is_idempotent() {
        let ids = SessionIdGenerator::new();
        let registry = Registry::new();
        let (alice, _rx) = session(&ids, 4);

        registry.try_claim(&alice, "alice").unwrap();
        assert!(registry.release("alice").is_some());
        assert!(registry.release("alice").is_none());
        assert!(registry.lookup("alice").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_release_session_leaves_new_owner_alone() {
        let ids = SessionIdGenerator::new();
        let registry = Registry::new();
        let (old, _a) = session(&ids, 4);
        let (new, _b) = session(&ids, 4);

        registry.try_claim(&old, "alice").unwrap();
        assert!(registry.release_session(&old));
        registry.try_claim(&new, "alice").unwrap();

        assert!(!registry.release_session(&old));
        assert!(Arc::ptr_eq(&registry.lookup("alice").unwrap(), &new));
    }

    #[test]
    fn test_rename_moves_binding() {
        let ids = SessionIdGenerator::new();
        let registry = Registry::new();
        let (bob, _rx) = session(&ids, 4);

        registry.try_claim(&bob, "bob").unwrap();
        let renamed = registry.rename("bob", "robert").unwrap();

        assert!(Arc::ptr_eq(&renamed, &bob));
        assert_eq!(bob.name(), "robert");
        assert!(registry.lookup("bob").is_none());
        assert!(registry.lookup("robert").is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_rename_failures_leave_state_untouched() {
        let ids = SessionIdGenerator::new();
        let registry = Registry::new();
        let (alice, _a) = session(&ids, 4);
        let (bob, _b) = session(&ids, 4);
        registry.try_claim(&alice, "alice").unwrap();
        registry.try_claim(&bob, "bob").unwrap();

        assert_eq!(
            registry.rename("bob", "alice").unwrap_err(),
            ClaimError::Taken("alice".into())
        );
        assert_eq!(
            registry.rename("bob", "bob").unwrap_err(),
            ClaimError::Taken("bob".into())
        );
        assert_eq!(
            registry.rename("bob", "b:b").unwrap_err(),
            ClaimError::Invalid("b:b".into())
        );
        assert_eq!(
            registry.rename("nobody", "zed").unwrap_err(),
            ClaimError::NotFound("nobody".into())
        );

        assert_eq!(bob.name(), "bob");
        assert_eq!(registry.snapshot_names(), vec!["alice", "bob"]);
    }

    #[test]
    fn test_concurrent_claims_are_unique() {
        const THREADS: usize = 16;
        let ids = SessionIdGenerator::new();
        let registry = Arc::new(Registry::new());
        let barrier = Arc::new(Barrier::new(THREADS));
        let names = ["ann", "ben", "cat"];

        let handles: Vec<_> = (0..THREADS)
            .map(|i| {
                let (s, rx) = session(&ids, 1);
                let registry = registry.clone();
                let barrier = barrier.clone();
                let name = names[i % names.len()];
                thread::spawn(move || {
                    let _rx = rx;
                    barrier.wait();
                    (name, registry.try_claim(&s, name))
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for name in names {
            let wins = results
                .iter()
                .filter(|(n, r)| *n == name && r.is_ok())
                .count();
            assert_eq!(wins, 1, "{name} claimed {wins} times");
            assert!(
                results
                    .iter()
                    .filter(|(n, r)| *n == name && r.is_err())
                    .all(|(_, r)| *r == Err(ClaimError::Taken(name.to_string())))
            );
        }
        assert_eq!(registry.len(), names.len());
    }

    #[test]
    fn test_rename_races_claim() {
        let ids = SessionIdGenerator::new();
        for _ in 0..200 {
            let registry = Arc::new(Registry::new());
            let (a, _ra) = session(&ids, 1);
            let (other, _ro) = session(&ids, 1);
            registry.try_claim(&a, "A").unwrap();
            let barrier = Arc::new(Barrier::new(2));

            let renamer = {
                let registry = registry.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    registry.rename("A", "X").is_ok()
                })
            };
            let claimer = {
                let registry = registry.clone();
                let barrier = barrier.clone();
                let other = other.clone();
                thread::spawn(move || {
                    barrier.wait();
                    registry.try_claim(&other, "X").is_ok()
                })
            };

            let renamed = renamer.join().unwrap();
            let claimed = claimer.join().unwrap();
            assert!(renamed ^ claimed, "exactly one of rename/claim must win");

            let holder = registry.lookup("X").unwrap();
            if renamed {
                assert!(Arc::ptr_eq(&holder, &a));
                assert!(registry.lookup("A").is_none());
            } else {
                assert!(Arc::ptr_eq(&holder, &other));
                assert!(registry.lookup("A").is_some());
            }
        }
    }
}
