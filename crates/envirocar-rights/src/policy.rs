//! Targets and the single authorization dispatcher.

use envirocar_auth::Principal;
use envirocar_core::{Fueling, Group, Measurement, Phenomenon, Track, User};

use crate::permission::{Audience, Permission};

/// The entity a permission is checked against.
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    /// A user profile; the user owns itself.
    User(&'a User),
    /// A group, owned by its creator.
    Group(&'a Group),
    /// A track.
    Track(&'a Track),
    /// A single measurement.
    Measurement(&'a Measurement),
    /// A fueling.
    Fueling(&'a Fueling),
    /// A phenomenon. Has no owner.
    Phenomenon(&'a Phenomenon),
    /// The service as a whole, for operations without an entity.
    Service,
    /// A user known only by name (e.g. before the record is loaded).
    Named(&'a str),
}

impl<'a> Target<'a> {
    /// Name of the user owning the target, if any.
    pub fn owner(&self) -> Option<&'a str> {
        match *self {
            Target::User(u) => Some(u.name.as_str()),
            Target::Group(g) => Some(g.owner.as_str()),
            Target::Track(t) => Some(t.owner.as_str()),
            Target::Measurement(m) => Some(m.owner.as_str()),
            Target::Fueling(f) => Some(f.owner.as_str()),
            Target::Named(name) => Some(name),
            Target::Phenomenon(_) | Target::Service => None,
        }
    }
}

/// Social relations consulted by [`authorize`].
pub trait Relations {
    /// Whether `owner` lists `viewer` as a friend.
    fn is_friend(&self, owner: &str, viewer: &str) -> bool;

    /// Whether `a` and `b` are members of a common group.
    fn shares_group(&self, a: &str, b: &str) -> bool;
}

/// Decides whether `viewer` holds `permission` on `target`.
///
/// Anonymous viewers hold public permissions only. Admins hold everything.
/// Owners hold everything but admin-only permissions. Everybody else is
/// judged by the permission's [`Audience`], consulting `relations` lazily.
pub fn authorize(
    viewer: Option<&Principal>,
    target: &Target<'_>,
    permission: Permission,
    relations: &dyn Relations,
) -> bool {
    let audience = permission.audience();
    let Some(viewer) = viewer else {
        return audience == Audience::Public;
    };
    if viewer.is_admin {
        return true;
    }
    let owner = target.owner();
    let is_owner = owner == Some(viewer.name.as_str());

    match audience {
        Audience::Public | Audience::Authenticated => true,
        Audience::Admin => false,
        Audience::Owner => is_owner,
        Audience::Friends => {
            is_owner || owner.is_some_and(|o| relations.is_friend(o, &viewer.name))
        }
        Audience::FriendsOrGroupMates => {
            is_owner
                || owner.is_some_and(|o| {
                    relations.is_friend(o, &viewer.name) || relations.shares_group(o, &viewer.name)
                })
        }
    }
}
