//! Permission definitions and the audience each one is granted to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Who, besides admins, holds a permission on a target.
///
/// Admins hold every permission. The owner of a target (the user itself,
/// or the owner of a group, track, measurement or fueling) holds every
/// permission except [`Audience::Admin`] ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Audience {
    /// Everybody, including anonymous callers.
    Public,
    /// Any authenticated caller.
    Authenticated,
    /// Users the owner lists as friends.
    Friends,
    /// Friends of the owner, or users sharing a group with the owner.
    FriendsOrGroupMates,
    /// Only the owner.
    Owner,
    /// Only admins.
    Admin,
}

/// Permissions checked against a target before a field is emitted or an
/// operation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    // =========================================================================
    // User fields
    // =========================================================================
    /// The nickname (user name).
    Nickname,
    /// The avatar link.
    Avatar,
    /// Given name.
    FirstName,
    /// Family name.
    LastName,
    /// Mail address.
    Mail,
    /// Whether the user is an admin.
    Role,
    /// Day of birth.
    DayOfBirth,
    /// Gender.
    Gender,
    /// Homepage.
    Url,
    /// Country.
    Country,
    /// Language.
    Language,
    /// Self description.
    AboutMe,
    /// The friend list.
    Friends,
    /// Group memberships.
    Groups,
    /// The user's tracks.
    Tracks,
    /// The user's fuelings.
    Fuelings,

    // =========================================================================
    // Entity visibility
    // =========================================================================
    /// Read a group, track, measurement or phenomenon.
    View,
    /// Who owns a track, measurement or fueling.
    Owner,

    // =========================================================================
    // Mutations
    // =========================================================================
    /// Modify a user profile.
    ModifyUser,
    /// Delete a user.
    DeleteUser,
    /// Add or remove friends of a user.
    ManageFriends,
    /// Create a group.
    CreateGroup,
    /// Add a user to a group.
    JoinGroup,
    /// Remove a user from a group.
    LeaveGroup,
    /// Modify a group.
    ModifyGroup,
    /// Delete a group.
    DeleteGroup,
    /// Upload a track.
    CreateTrack,
    /// Delete a track.
    DeleteTrack,
    /// Log a fueling.
    CreateFueling,
    /// Delete a fueling.
    DeleteFueling,
    /// Register a phenomenon.
    CreatePhenomenon,
}

impl Permission {
    /// Returns the permission name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::Nickname => "user:nickname",
            Permission::Avatar => "user:avatar",
            Permission::FirstName => "user:first_name",
            Permission::LastName => "user:last_name",
            Permission::Mail => "user:mail",
            Permission::Role => "user:role",
            Permission::DayOfBirth => "user:day_of_birth",
            Permission::Gender => "user:gender",
            Permission::Url => "user:url",
            Permission::Country => "user:country",
            Permission::Language => "user:language",
            Permission::AboutMe => "user:about_me",
            Permission::Friends => "user:friends",
            Permission::Groups => "user:groups",
            Permission::Tracks => "user:tracks",
            Permission::Fuelings => "user:fuelings",
            Permission::View => "entity:view",
            Permission::Owner => "entity:owner",
            Permission::ModifyUser => "user:modify",
            Permission::DeleteUser => "user:delete",
            Permission::ManageFriends => "user:manage_friends",
            Permission::CreateGroup => "group:create",
            Permission::JoinGroup => "group:join",
            Permission::LeaveGroup => "group:leave",
            Permission::ModifyGroup => "group:modify",
            Permission::DeleteGroup => "group:delete",
            Permission::CreateTrack => "track:create",
            Permission::DeleteTrack => "track:delete",
            Permission::CreateFueling => "fueling:create",
            Permission::DeleteFueling => "fueling:delete",
            Permission::CreatePhenomenon => "phenomenon:create",
        }
    }

    /// The audience holding this permission.
    pub fn audience(&self) -> Audience {
        match self {
            Permission::Nickname
            | Permission::Avatar
            | Permission::View => Audience::Public,

            Permission::CreateGroup | Permission::CreateTrack => Audience::Authenticated,

            Permission::FirstName
            | Permission::LastName
            | Permission::DayOfBirth
            | Permission::Gender
            | Permission::Url
            | Permission::Country
            | Permission::Language
            | Permission::AboutMe
            | Permission::Friends
            | Permission::Tracks
            | Permission::Owner => Audience::Friends,

            Permission::Groups => Audience::FriendsOrGroupMates,

            Permission::Mail
            | Permission::Role
            | Permission::Fuelings
            | Permission::ModifyUser
            | Permission::DeleteUser
            | Permission::ManageFriends
            | Permission::JoinGroup
            | Permission::LeaveGroup
            | Permission::ModifyGroup
            | Permission::DeleteGroup
            | Permission::DeleteTrack
            | Permission::CreateFueling
            | Permission::DeleteFueling => Audience::Owner,

            Permission::CreatePhenomenon => Audience::Admin,
        }
    }

    /// Returns all permissions.
    pub fn all() -> &'static [Permission] {
        &[
            Permission::Nickname,
            Permission::Avatar,
            Permission::FirstName,
            Permission::LastName,
            Permission::Mail,
            Permission::Role,
            Permission::DayOfBirth,
            Permission::Gender,
            Permission::Url,
            Permission::Country,
            Permission::Language,
            Permission::AboutMe,
            Permission::Friends,
            Permission::Groups,
            Permission::Tracks,
            Permission::Fuelings,
            Permission::View,
            Permission::Owner,
            Permission::ModifyUser,
            Permission::DeleteUser,
            Permission::ManageFriends,
            Permission::CreateGroup,
            Permission::JoinGroup,
            Permission::LeaveGroup,
            Permission::ModifyGroup,
            Permission::DeleteGroup,
            Permission::CreateTrack,
            Permission::DeleteTrack,
            Permission::CreateFueling,
            Permission::DeleteFueling,
            Permission::CreatePhenomenon,
        ]
    }

    /// Returns `true` if this permission guards a mutation.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Permission::ModifyUser
                | Permission::DeleteUser
                | Permission::ManageFriends
                | Permission::CreateGroup
                | Permission::JoinGroup
                | Permission::LeaveGroup
                | Permission::ModifyGroup
                | Permission::DeleteGroup
                | Permission::CreateTrack
                | Permission::DeleteTrack
                | Permission::CreateFueling
                | Permission::DeleteFueling
                | Permission::CreatePhenomenon
        )
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
