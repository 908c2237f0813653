//! Domain service interfaces.
//!
//! The REST layer only talks to these traits. Implementations must be
//! thread-safe; a single instance is shared by all request handlers.

use crate::entities::{
    Fueling, Fuelings, Group, Groups, Measurement, Measurements, Phenomena, Phenomenon, Track,
    TrackDetails, Tracks, User, UserUpdate, Users,
};
use crate::error::Result;
use crate::filter::{FuelingFilter, MeasurementFilter, Pagination, TrackFilter};

/// User accounts.
pub trait UserService: Send + Sync {
    /// Looks up a user by name.
    fn get_user(&self, name: &str) -> Result<User>;

    /// Lists users in registration order.
    fn get_users(&self, pagination: Option<Pagination>) -> Result<Users>;

    /// Registers a new user. Fails with `Conflict` if the name is taken.
    fn create_user(&self, user: User) -> Result<User>;

    /// Applies a partial update and returns the stored result.
    fn modify_user(&self, name: &str, update: UserUpdate) -> Result<User>;

    /// Removes a user together with their friendships and memberships.
    fn delete_user(&self, name: &str) -> Result<()>;
}

/// Directed friendship links. `user` lists `friend` as a friend.
pub trait FriendService: Send + Sync {
    /// Friends of a user.
    fn get_friends(&self, user: &str) -> Result<Users>;

    /// Whether `user` lists `friend` as a friend.
    fn is_friend(&self, user: &str, friend: &str) -> Result<bool>;

    /// Adds `friend` to the friends of `user`.
    fn add_friend(&self, user: &str, friend: &str) -> Result<()>;

    /// Removes `friend` from the friends of `user`.
    fn remove_friend(&self, user: &str, friend: &str) -> Result<()>;
}

/// Groups and their membership.
pub trait GroupService: Send + Sync {
    /// Looks up a group by name.
    fn get_group(&self, name: &str) -> Result<Group>;

    /// Lists all groups.
    fn get_groups(&self, pagination: Option<Pagination>) -> Result<Groups>;

    /// Lists the groups a user is a member of.
    fn get_groups_of(&self, user: &str, pagination: Option<Pagination>) -> Result<Groups>;

    /// Creates a group; its owner becomes the first member.
    fn create_group(&self, group: Group) -> Result<Group>;

    /// Removes a group.
    fn delete_group(&self, name: &str) -> Result<()>;

    /// Members of a group.
    fn get_members(&self, group: &str) -> Result<Users>;

    /// Whether `user` is a member of `group`.
    fn is_member(&self, group: &str, user: &str) -> Result<bool>;

    /// Adds a member.
    fn add_member(&self, group: &str, user: &str) -> Result<()>;

    /// Removes a member.
    fn remove_member(&self, group: &str, user: &str) -> Result<()>;

    /// Whether two users are members of at least one common group.
    fn shares_group(&self, a: &str, b: &str) -> Result<bool> {
        let groups = self.get_groups_of(a, None)?;
        for group in &groups {
            if self.is_member(&group.name, b)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Tracks, measurements, phenomena and fuelings.
pub trait DataService: Send + Sync {
    // -- tracks ----------------------------------------------------------

    /// Looks up a track.
    fn get_track(&self, id: &str) -> Result<Track>;

    /// Lists tracks matching a filter, newest first.
    fn get_tracks(&self, filter: &TrackFilter) -> Result<Tracks>;

    /// Stores a track with its measurements. Ids are assigned when empty.
    fn create_track(&self, track: Track, measurements: Vec<Measurement>) -> Result<Track>;

    /// Removes a track and its measurements.
    fn delete_track(&self, id: &str) -> Result<()>;

    /// A track bundled with all of its measurements.
    fn get_track_details(&self, id: &str) -> Result<TrackDetails> {
        let track = self.get_track(id)?;
        let measurements = self.get_measurements(&MeasurementFilter {
            track: Some(track.id.clone()),
            ..MeasurementFilter::default()
        })?;
        Ok(TrackDetails::new(track, measurements.items))
    }

    // -- measurements ----------------------------------------------------

    /// Looks up a measurement.
    fn get_measurement(&self, id: &str) -> Result<Measurement>;

    /// Lists measurements matching a filter, in time order.
    fn get_measurements(&self, filter: &MeasurementFilter) -> Result<Measurements>;

    // -- phenomena -------------------------------------------------------

    /// Looks up a phenomenon.
    fn get_phenomenon(&self, name: &str) -> Result<Phenomenon>;

    /// Lists phenomena.
    fn get_phenomena(&self, pagination: Option<Pagination>) -> Result<Phenomena>;

    /// Registers a phenomenon.
    fn create_phenomenon(&self, phenomenon: Phenomenon) -> Result<Phenomenon>;

    // -- fuelings --------------------------------------------------------

    /// Looks up a fueling of `owner`.
    fn get_fueling(&self, owner: &str, id: &str) -> Result<Fueling>;

    /// Lists fuelings matching a filter, newest first.
    fn get_fuelings(&self, filter: &FuelingFilter) -> Result<Fuelings>;

    /// Stores a fueling. The id is assigned when empty.
    fn create_fueling(&self, fueling: Fueling) -> Result<Fueling>;

    /// Removes a fueling of `owner`.
    fn delete_fueling(&self, owner: &str, id: &str) -> Result<()>;
}
