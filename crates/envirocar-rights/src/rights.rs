//! Per-request access rights.

use std::sync::Arc;

use envirocar_auth::{Principal, SecurityContext};
use envirocar_core::{FriendService, GroupService};

use crate::permission::Permission;
use crate::policy::{authorize, Relations, Target};

/// Access rights of one viewer, closed over the social services.
///
/// Created per request. Nothing is cached: every [`allows`](Self::allows)
/// call consults the services again.
#[derive(Clone)]
pub struct AccessRights {
    viewer: Option<Principal>,
    friends: Arc<dyn FriendService>,
    groups: Arc<dyn GroupService>,
}

impl std::fmt::Debug for AccessRights {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessRights")
            .field("viewer", &self.viewer)
            .finish_non_exhaustive()
    }
}

impl AccessRights {
    /// Rights of `viewer` (`None` for anonymous callers).
    pub fn new(
        viewer: Option<Principal>,
        friends: Arc<dyn FriendService>,
        groups: Arc<dyn GroupService>,
    ) -> Self {
        Self {
            viewer,
            friends,
            groups,
        }
    }

    /// Rights of the caller described by a security context.
    pub fn for_context(
        ctx: &SecurityContext,
        friends: Arc<dyn FriendService>,
        groups: Arc<dyn GroupService>,
    ) -> Self {
        Self::new(ctx.principal().cloned(), friends, groups)
    }

    /// The viewer, if authenticated.
    pub fn viewer(&self) -> Option<&Principal> {
        self.viewer.as_ref()
    }

    /// Whether the viewer is an admin.
    pub fn is_admin(&self) -> bool {
        self.viewer.as_ref().is_some_and(|v| v.is_admin)
    }

    /// Whether the viewer is the user named `name`.
    pub fn is_self(&self, name: &str) -> bool {
        self.viewer.as_ref().is_some_and(|v| v.name == name)
    }

    /// Whether the viewer holds `permission` on `target`.
    pub fn allows(&self, target: Target<'_>, permission: Permission) -> bool {
        authorize(self.viewer.as_ref(), &target, permission, self)
    }
}

impl Relations for AccessRights {
    fn is_friend(&self, owner: &str, viewer: &str) -> bool {
        self.friends.is_friend(owner, viewer).unwrap_or_else(|e| {
            log::debug!("Friend lookup {owner} -> {viewer} failed: {e}");
            false
        })
    }

    fn shares_group(&self, a: &str, b: &str) -> bool {
        self.groups.shares_group(a, b).unwrap_or_else(|e| {
            log::debug!("Group lookup {a} <-> {b} failed: {e}");
            false
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use envirocar_core::{Group, InMemoryStore, User, UserService};

    fn store() -> Arc<InMemoryStore> {
        let store = InMemoryStore::new();
        for name in ["alice", "bob", "carol", "dave"] {
            store
                .create_user(
                    User::new(name)
                        .with_mail(format!("{name}@example.org"))
                        .with_full_name("First", "Last"),
                )
                .unwrap();
        }
        store.add_friend("bob", "alice").unwrap();
        store.create_group(Group::new("drivers", "bob")).unwrap();
        store.add_member("drivers", "carol").unwrap();
        Arc::new(store)
    }

    fn rights(store: &Arc<InMemoryStore>, viewer: Option<&str>) -> AccessRights {
        let viewer = viewer.map(|name| Principal {
            name: name.to_string(),
            is_admin: false,
            is_secure: false,
        });
        AccessRights::new(viewer, store.clone(), store.clone())
    }

    #[test]
    fn test_anonymous_request_for_bob() {
        let store = store();
        let bob = store.get_user("bob").unwrap();
        let rights = rights(&store, None);
        assert!(!rights.allows(Target::User(&bob), Permission::Mail));
        assert!(rights.allows(Target::User(&bob), Permission::Nickname));
    }

    #[test]
    fn test_friend_and_group_mate() {
        let store = store();
        let bob = store.get_user("bob").unwrap();

        let alice = rights(&store, Some("alice"));
        assert!(alice.allows(Target::User(&bob), Permission::FirstName));
        assert!(alice.allows(Target::User(&bob), Permission::Groups));
        assert!(!alice.allows(Target::User(&bob), Permission::Mail));

        let carol = rights(&store, Some("carol"));
        assert!(!carol.allows(Target::User(&bob), Permission::FirstName));
        assert!(carol.allows(Target::User(&bob), Permission::Groups));

        let dave = rights(&store, Some("dave"));
        assert!(!dave.allows(Target::User(&bob), Permission::Groups));
    }

    #[test]
    fn test_rights_are_not_cached() {
        let store = store();
        let dave_user = store.get_user("dave").unwrap();
        let bob = rights(&store, Some("bob"));
        assert!(!bob.allows(Target::User(&dave_user), Permission::LastName));
        store.add_friend("dave", "bob").unwrap();
        assert!(bob.allows(Target::User(&dave_user), Permission::LastName));
    }

    #[test]
    fn test_lookup_failure_denies() {
        let store = store();
        let ghost = User::new("ghost");
        let alice = rights(&store, Some("alice"));
        assert!(!alice.allows(Target::User(&ghost), Permission::Groups));
    }

    #[test]
    fn test_is_self() {
        let store = store();
        let alice = rights(&store, Some("alice"));
        assert!(alice.is_self("alice"));
        assert!(!alice.is_self("bob"));
        assert!(!alice.is_admin());
        assert!(alice.viewer().is_some());
    }
}
