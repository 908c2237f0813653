//! In-memory implementation of every domain service.
//!
//! Used by the server binary (optionally pre-loaded from a JSON seed) and by
//! tests. All state lives behind a single `RwLock`; a poisoned lock surfaces
//! as [`Error::Storage`].

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use indexmap::{IndexMap, IndexSet};
use serde::Deserialize;
use uuid::Uuid;

use crate::entities::{
    Collection, Fueling, Fuelings, Group, Groups, Measurement, Measurements, Phenomena,
    Phenomenon, Track, Tracks, User, UserUpdate, Users,
};
use crate::error::{Error, Result};
use crate::filter::{FuelingFilter, MeasurementFilter, Pagination, TrackFilter};
use crate::service::{DataService, FriendService, GroupService, UserService};

// ============================================================================
// Seed document
// ============================================================================

/// A group in a seed document, with its members.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedGroup {
    /// The group itself.
    #[serde(flatten)]
    pub group: Group,
    /// Member names; the owner is always added.
    #[serde(default)]
    pub members: Vec<String>,
}

/// A track in a seed document, with its measurements.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedTrack {
    /// Track metadata.
    #[serde(flatten)]
    pub track: Track,
    /// Measurements of the track.
    #[serde(default)]
    pub measurements: Vec<Measurement>,
}

/// Initial content for an [`InMemoryStore`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Seed {
    /// Users to register.
    pub users: Vec<User>,
    /// Friend lists keyed by user name.
    pub friends: BTreeMap<String, Vec<String>>,
    /// Groups with members.
    pub groups: Vec<SeedGroup>,
    /// Phenomena to register.
    pub phenomena: Vec<Phenomenon>,
    /// Tracks with measurements.
    pub tracks: Vec<SeedTrack>,
    /// Fuelings.
    pub fuelings: Vec<Fueling>,
}

impl Seed {
    /// Parses a seed from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

// ============================================================================
// Store
// ============================================================================

#[derive(Debug, Default)]
struct State {
    users: IndexMap<String, User>,
    friends: HashMap<String, IndexSet<String>>,
    groups: IndexMap<String, Group>,
    members: HashMap<String, IndexSet<String>>,
    tracks: IndexMap<String, Track>,
    measurements: IndexMap<String, Measurement>,
    phenomena: IndexMap<String, Phenomenon>,
    fuelings: IndexMap<String, Fueling>,
}

impl State {
    fn user(&self, name: &str) -> Result<&User> {
        self.users
            .get(name)
            .ok_or_else(|| Error::user_not_found(name))
    }

    fn group(&self, name: &str) -> Result<&Group> {
        self.groups
            .get(name)
            .ok_or_else(|| Error::group_not_found(name))
    }

    fn users_named<'a>(&self, names: impl IntoIterator<Item = &'a String>) -> Vec<User> {
        names
            .into_iter()
            .filter_map(|n| self.users.get(n))
            .cloned()
            .collect()
    }
}

/// Thread-safe in-memory store implementing [`UserService`],
/// [`FriendService`], [`GroupService`] and [`DataService`].
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
}

fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store and loads a seed into it.
    ///
    /// Entities go through the regular service operations, so a seed that
    /// references unknown users or phenomena is rejected.
    pub fn from_seed(seed: Seed) -> Result<Self> {
        let store = Self::new();
        for user in seed.users {
            store.create_user(user)?;
        }
        for (user, friends) in &seed.friends {
            for friend in friends {
                store.add_friend(user, friend)?;
            }
        }
        for SeedGroup { group, members } in seed.groups {
            let name = group.name.clone();
            store.create_group(group)?;
            for member in &members {
                store.add_member(&name, member)?;
            }
        }
        for phenomenon in seed.phenomena {
            store.create_phenomenon(phenomenon)?;
        }
        for SeedTrack {
            track,
            measurements,
        } in seed.tracks
        {
            store.create_track(track, measurements)?;
        }
        for fueling in seed.fuelings {
            store.create_fueling(fueling)?;
        }
        Ok(store)
    }

    /// Reads a JSON seed file and builds a store from it.
    pub fn load_seed(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Loading seed from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_seed(Seed::from_json(&json)?)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, State>> {
        self.state
            .read()
            .map_err(|_| Error::storage("store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, State>> {
        self.state
            .write()
            .map_err(|_| Error::storage("store lock poisoned"))
    }
}

// ============================================================================
// Users and friends
// ============================================================================

impl UserService for InMemoryStore {
    fn get_user(&self, name: &str) -> Result<User> {
        self.read()?.user(name).cloned()
    }

    fn get_users(&self, pagination: Option<Pagination>) -> Result<Users> {
        let state = self.read()?;
        let users = state.users.values().cloned().collect();
        Ok(Collection::paginate(users, pagination))
    }

    fn create_user(&self, user: User) -> Result<User> {
        user.validate()?;
        let mut state = self.write()?;
        if state.users.contains_key(&user.name) {
            return Err(Error::conflict(format!("user '{}' already exists", user.name)));
        }
        log::debug!("Created user {}", user.name);
        state.users.insert(user.name.clone(), user.clone());
        Ok(user)
    }

    fn modify_user(&self, name: &str, update: UserUpdate) -> Result<User> {
        let mut state = self.write()?;
        let user = state
            .users
            .get_mut(name)
            .ok_or_else(|| Error::user_not_found(name))?;
        user.apply(update)?;
        Ok(user.clone())
    }

    fn delete_user(&self, name: &str) -> Result<()> {
        let mut state = self.write()?;
        if state.users.shift_remove(name).is_none() {
            return Err(Error::user_not_found(name));
        }
        state.friends.remove(name);
        for friends in state.friends.values_mut() {
            friends.shift_remove(name);
        }
        let owned: Vec<String> = state
            .groups
            .values()
            .filter(|g| g.owner == name)
            .map(|g| g.name.clone())
            .collect();
        for group in &owned {
            state.groups.shift_remove(group);
            state.members.remove(group);
            log::debug!("Deleted group {group} with its owner");
        }
        for members in state.members.values_mut() {
            members.shift_remove(name);
        }
        state.tracks.retain(|_, t| t.owner != name);
        state.measurements.retain(|_, m| m.owner != name);
        state.fuelings.retain(|_, f| f.owner != name);
        log::debug!("Deleted user {name}");
        Ok(())
    }
}

impl FriendService for InMemoryStore {
    fn get_friends(&self, user: &str) -> Result<Users> {
        let state = self.read()?;
        state.user(user)?;
        let friends = state
            .friends
            .get(user)
            .map(|names| state.users_named(names))
            .unwrap_or_default();
        Ok(Collection::new(friends))
    }

    fn is_friend(&self, user: &str, friend: &str) -> Result<bool> {
        let state = self.read()?;
        Ok(state
            .friends
            .get(user)
            .is_some_and(|names| names.contains(friend)))
    }

    fn add_friend(&self, user: &str, friend: &str) -> Result<()> {
        if user == friend {
            return Err(Error::validation_field("friend", "users cannot befriend themselves"));
        }
        let mut state = self.write()?;
        state.user(user)?;
        state.user(friend)?;
        state
            .friends
            .entry(user.to_string())
            .or_default()
            .insert(friend.to_string());
        Ok(())
    }

    fn remove_friend(&self, user: &str, friend: &str) -> Result<()> {
        let mut state = self.write()?;
        state.user(user)?;
        let removed = state
            .friends
            .get_mut(user)
            .is_some_and(|names| names.shift_remove(friend));
        if removed {
            Ok(())
        } else {
            Err(Error::user_not_found(friend))
        }
    }
}

// ============================================================================
// Groups
// ============================================================================

impl GroupService for InMemoryStore {
    fn get_group(&self, name: &str) -> Result<Group> {
        self.read()?.group(name).cloned()
    }

    fn get_groups(&self, pagination: Option<Pagination>) -> Result<Groups> {
        let state = self.read()?;
        let groups = state.groups.values().cloned().collect();
        Ok(Collection::paginate(groups, pagination))
    }

    fn get_groups_of(&self, user: &str, pagination: Option<Pagination>) -> Result<Groups> {
        let state = self.read()?;
        state.user(user)?;
        let groups = state
            .groups
            .values()
            .filter(|g| {
                state
                    .members
                    .get(&g.name)
                    .is_some_and(|m| m.contains(user))
            })
            .cloned()
            .collect();
        Ok(Collection::paginate(groups, pagination))
    }

    fn create_group(&self, group: Group) -> Result<Group> {
        group.validate()?;
        let mut state = self.write()?;
        state.user(&group.owner)?;
        if state.groups.contains_key(&group.name) {
            return Err(Error::conflict(format!("group '{}' already exists", group.name)));
        }
        let mut members = IndexSet::new();
        members.insert(group.owner.clone());
        state.members.insert(group.name.clone(), members);
        state.groups.insert(group.name.clone(), group.clone());
        log::debug!("Created group {} owned by {}", group.name, group.owner);
        Ok(group)
    }

    fn delete_group(&self, name: &str) -> Result<()> {
        let mut state = self.write()?;
        if state.groups.shift_remove(name).is_none() {
            return Err(Error::group_not_found(name));
        }
        state.members.remove(name);
        log::debug!("Deleted group {name}");
        Ok(())
    }

    fn get_members(&self, group: &str) -> Result<Users> {
        let state = self.read()?;
        state.group(group)?;
        let members = state
            .members
            .get(group)
            .map(|names| state.users_named(names))
            .unwrap_or_default();
        Ok(Collection::new(members))
    }

    fn is_member(&self, group: &str, user: &str) -> Result<bool> {
        let state = self.read()?;
        state.group(group)?;
        Ok(state.members.get(group).is_some_and(|m| m.contains(user)))
    }

    fn add_member(&self, group: &str, user: &str) -> Result<()> {
        let mut state = self.write()?;
        state.group(group)?;
        state.user(user)?;
        state
            .members
            .entry(group.to_string())
            .or_default()
            .insert(user.to_string());
        Ok(())
    }

    fn remove_member(&self, group: &str, user: &str) -> Result<()> {
        let mut state = self.write()?;
        state.group(group)?;
        let removed = state
            .members
            .get_mut(group)
            .is_some_and(|m| m.shift_remove(user));
        if removed {
            Ok(())
        } else {
            Err(Error::user_not_found(user))
        }
    }
}

// ============================================================================
// Tracks, measurements, phenomena, fuelings
// ============================================================================

impl DataService for InMemoryStore {
    fn get_track(&self, id: &str) -> Result<Track> {
        self.read()?
            .tracks
            .get(id)
            .cloned()
            .ok_or_else(|| Error::track_not_found(id))
    }

    fn get_tracks(&self, filter: &TrackFilter) -> Result<Tracks> {
        let state = self.read()?;
        let mut tracks: Vec<Track> = state
            .tracks
            .values()
            .filter(|t| filter.owner.as_ref().is_none_or(|o| &t.owner == o))
            .filter(|t| filter.time.is_none_or(|w| w.contains(t.created)))
            .cloned()
            .collect();
        tracks.sort_by(|a, b| b.created.cmp(&a.created));
        Ok(Collection::paginate(tracks, filter.pagination))
    }

    fn create_track(&self, mut track: Track, measurements: Vec<Measurement>) -> Result<Track> {
        let mut state = self.write()?;
        state.user(&track.owner)?;
        if track.id.is_empty() {
            track.id = new_id();
        } else if state.tracks.contains_key(&track.id) {
            return Err(Error::conflict(format!("track '{}' already exists", track.id)));
        }

        let mut prepared = Vec::with_capacity(measurements.len());
        for mut m in measurements {
            m.geometry.validate()?;
            for value in &mut m.values {
                let phenomenon = state.phenomena.get(&value.phenomenon).ok_or_else(|| {
                    Error::validation_field(
                        "phenomenon",
                        format!("unknown phenomenon '{}'", value.phenomenon),
                    )
                })?;
                if value.unit.is_none() {
                    value.unit = phenomenon.unit.clone();
                }
            }
            if m.id.is_empty() {
                m.id = new_id();
            }
            m.owner = track.owner.clone();
            m.track = Some(track.id.clone());
            prepared.push(m);
        }

        log::debug!(
            "Created track {} with {} measurements",
            track.id,
            prepared.len()
        );
        for m in prepared {
            state.measurements.insert(m.id.clone(), m);
        }
        state.tracks.insert(track.id.clone(), track.clone());
        Ok(track)
    }

    fn delete_track(&self, id: &str) -> Result<()> {
        let mut state = self.write()?;
        if state.tracks.shift_remove(id).is_none() {
            return Err(Error::track_not_found(id));
        }
        state
            .measurements
            .retain(|_, m| m.track.as_deref() != Some(id));
        log::debug!("Deleted track {id}");
        Ok(())
    }

    fn get_measurement(&self, id: &str) -> Result<Measurement> {
        self.read()?
            .measurements
            .get(id)
            .cloned()
            .ok_or_else(|| Error::measurement_not_found(id))
    }

    fn get_measurements(&self, filter: &MeasurementFilter) -> Result<Measurements> {
        let state = self.read()?;
        let mut measurements: Vec<Measurement> = state
            .measurements
            .values()
            .filter(|m| filter.track.is_none() || m.track == filter.track)
            .filter(|m| filter.owner.as_ref().is_none_or(|o| &m.owner == o))
            .filter(|m| filter.time.is_none_or(|w| w.contains(m.time)))
            .cloned()
            .collect();
        measurements.sort_by_key(|m| m.time);
        Ok(Collection::paginate(measurements, filter.pagination))
    }

    fn get_phenomenon(&self, name: &str) -> Result<Phenomenon> {
        self.read()?
            .phenomena
            .get(name)
            .cloned()
            .ok_or_else(|| Error::phenomenon_not_found(name))
    }

    fn get_phenomena(&self, pagination: Option<Pagination>) -> Result<Phenomena> {
        let state = self.read()?;
        let phenomena = state.phenomena.values().cloned().collect();
        Ok(Collection::paginate(phenomena, pagination))
    }

    fn create_phenomenon(&self, phenomenon: Phenomenon) -> Result<Phenomenon> {
        if phenomenon.name.trim().is_empty() {
            return Err(Error::validation_field("name", "must not be empty"));
        }
        let mut state = self.write()?;
        if state.phenomena.contains_key(&phenomenon.name) {
            return Err(Error::conflict(format!(
                "phenomenon '{}' already exists",
                phenomenon.name
            )));
        }
        state
            .phenomena
            .insert(phenomenon.name.clone(), phenomenon.clone());
        Ok(phenomenon)
    }

    fn get_fueling(&self, owner: &str, id: &str) -> Result<Fueling> {
        self.read()?
            .fuelings
            .get(id)
            .filter(|f| f.owner == owner)
            .cloned()
            .ok_or_else(|| Error::fueling_not_found(id))
    }

    fn get_fuelings(&self, filter: &FuelingFilter) -> Result<Fuelings> {
        let state = self.read()?;
        let mut fuelings: Vec<Fueling> = state
            .fuelings
            .values()
            .filter(|f| f.owner == filter.owner)
            .filter(|f| filter.time.is_none_or(|w| w.contains(f.time)))
            .cloned()
            .collect();
        fuelings.sort_by(|a, b| b.time.cmp(&a.time));
        Ok(Collection::paginate(fuelings, filter.pagination))
    }

    fn create_fueling(&self, mut fueling: Fueling) -> Result<Fueling> {
        fueling.validate()?;
        let mut state = self.write()?;
        state.user(&fueling.owner)?;
        if fueling.id.is_empty() {
            fueling.id = new_id();
        } else if state.fuelings.contains_key(&fueling.id) {
            return Err(Error::conflict(format!("fueling '{}' already exists", fueling.id)));
        }
        fueling.modified = Utc::now();
        state.fuelings.insert(fueling.id.clone(), fueling.clone());
        Ok(fueling)
    }

    fn delete_fueling(&self, owner: &str, id: &str) -> Result<()> {
        let mut state = self.write()?;
        match state.fuelings.get(id) {
            Some(f) if f.owner == owner => {
                state.fuelings.shift_remove(id);
                Ok(())
            }
            _ => Err(Error::fueling_not_found(id)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::Point;
    use crate::error::ErrorKind;
    use crate::filter::TemporalFilter;
    use chrono::TimeZone;

    fn store() -> InMemoryStore {
        let store = InMemoryStore::new();
        store.create_user(User::new("alice").with_token("a")).unwrap();
        store.create_user(User::new("bob").with_token("b")).unwrap();
        store.create_user(User::new("carol")).unwrap();
        store
            .create_phenomenon(Phenomenon::new("Speed").with_unit("km/h"))
            .unwrap();
        store
    }

    #[test]
    fn test_duplicate_user_conflicts() {
        let store = store();
        let err = store.create_user(User::new("alice")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_invalid_user_rejected() {
        let err = InMemoryStore::new().create_user(User::new("x")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_friendship_is_directed() {
        let store = store();
        store.add_friend("alice", "bob").unwrap();
        assert!(store.is_friend("alice", "bob").unwrap());
        assert!(!store.is_friend("bob", "alice").unwrap());
        let friends = store.get_friends("alice").unwrap();
        assert_eq!(friends.items[0].name, "bob");
        store.remove_friend("alice", "bob").unwrap();
        assert!(store.remove_friend("alice", "bob").unwrap_err().is_not_found());
    }

    #[test]
    fn test_cannot_befriend_self() {
        assert!(store().add_friend("alice", "alice").is_err());
    }

    #[test]
    fn test_group_membership() {
        let store = store();
        store.create_group(Group::new("drivers", "alice")).unwrap();
        store.add_member("drivers", "bob").unwrap();
        assert!(store.shares_group("alice", "bob").unwrap());
        assert!(!store.shares_group("alice", "carol").unwrap());
        assert_eq!(store.get_members("drivers").unwrap().total, 2);
        assert_eq!(store.get_groups_of("bob", None).unwrap().total, 1);
        store.remove_member("drivers", "bob").unwrap();
        assert!(!store.shares_group("alice", "bob").unwrap());
    }

    #[test]
    fn test_delete_user_cascades() {
        let store = store();
        store.add_friend("bob", "alice").unwrap();
        store.create_group(Group::new("drivers", "bob")).unwrap();
        store.add_member("drivers", "alice").unwrap();
        store.delete_user("alice").unwrap();
        assert!(store.get_friends("bob").unwrap().is_empty());
        assert_eq!(store.get_members("drivers").unwrap().total, 1);
        assert!(store.get_user("alice").unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete_user_removes_owned_groups() {
        let store = store();
        store.create_group(Group::new("drivers", "alice")).unwrap();
        store.add_member("drivers", "alice").unwrap();
        store.add_member("drivers", "bob").unwrap();
        store.create_group(Group::new("riders", "bob")).unwrap();
        store.add_member("riders", "alice").unwrap();

        store.delete_user("alice").unwrap();
        assert!(store.get_group("drivers").unwrap_err().is_not_found());
        assert!(store.is_member("drivers", "bob").unwrap_err().is_not_found());
        assert_eq!(store.get_group("riders").unwrap().owner, "bob");
        assert_eq!(store.get_members("riders").unwrap().total, 0);
    }

    #[test]
    fn test_create_track_assigns_ids_and_units() {
        let store = store();
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let m = Measurement::new("", "whoever", t0, Point::new(7.6, 51.9))
            .with_value("Speed", None, 30.0);
        let track = store.create_track(Track::new("", "alice"), vec![m]).unwrap();
        assert!(!track.id.is_empty());

        let details = store.get_track_details(&track.id).unwrap();
        assert_eq!(details.measurements.len(), 1);
        let stored = &details.measurements[0];
        assert_eq!(stored.owner, "alice");
        assert_eq!(stored.track.as_deref(), Some(track.id.as_str()));
        assert_eq!(stored.values[0].unit.as_deref(), Some("km/h"));

        store.delete_track(&track.id).unwrap();
        assert!(store.get_measurement(&stored.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_create_track_rejects_unknown_phenomenon() {
        let store = store();
        let m = Measurement::new("", "alice", Utc::now(), Point::new(7.6, 51.9))
            .with_value("Warp", None, 9.0);
        let err = store
            .create_track(Track::new("", "alice"), vec![m])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_measurement_filter_by_time() {
        let store = store();
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2024, 5, 2, 8, 0, 0).unwrap();
        let ms = vec![
            Measurement::new("m0", "alice", t0, Point::new(7.0, 51.0)),
            Measurement::new("m1", "alice", t1, Point::new(7.0, 51.0)),
        ];
        store.create_track(Track::new("t", "alice"), ms).unwrap();
        let filter = MeasurementFilter {
            time: Some(TemporalFilter {
                after: Some(t1),
                before: None,
            }),
            ..MeasurementFilter::default()
        };
        let found = store.get_measurements(&filter).unwrap();
        assert_eq!(found.total, 1);
        assert_eq!(found.items[0].id, "m1");
    }

    #[test]
    fn test_fueling_scoped_to_owner() {
        let store = store();
        let json = r#"{
            "owner": "alice", "id": "", "time": "2024-05-01T08:00:00Z",
            "fuel_type": "diesel",
            "volume": {"value": 40.0, "unit": "l"},
            "mileage": {"value": 1000.0, "unit": "km"}
        }"#;
        let fueling: Fueling = serde_json::from_str(json).unwrap();
        let created = store.create_fueling(fueling).unwrap();
        assert!(store.get_fueling("alice", &created.id).is_ok());
        assert!(store.get_fueling("bob", &created.id).unwrap_err().is_not_found());
        let list = store
            .get_fuelings(&FuelingFilter {
                owner: "alice".into(),
                ..FuelingFilter::default()
            })
            .unwrap();
        assert_eq!(list.total, 1);
    }

    #[test]
    fn test_seed_file() {
        let seed = r#"{
            "users": [
                {"name": "alice", "token": "a", "mail": "alice@example.org"},
                {"name": "bob", "token": "b", "is_admin": true}
            ],
            "friends": {"alice": ["bob"]},
            "groups": [{"name": "drivers", "owner": "alice", "members": ["bob"]}],
            "phenomena": [{"name": "Speed", "unit": "km/h"}],
            "tracks": [{
                "id": "t1", "owner": "alice",
                "measurements": [{
                    "id": "m1", "time": "2024-05-01T08:00:00Z",
                    "geometry": {"lon": 7.6, "lat": 51.9},
                    "values": [{"phenomenon": "Speed", "value": 42.0}]
                }]
            }]
        }"#;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.json");
        std::fs::write(&path, seed).unwrap();

        let store = InMemoryStore::load_seed(&path).unwrap();
        assert!(store.get_user("bob").unwrap().is_admin);
        assert!(store.is_friend("alice", "bob").unwrap());
        assert!(store.is_member("drivers", "bob").unwrap());
        assert_eq!(store.get_measurement("m1").unwrap().owner, "alice");
    }

    #[test]
    fn test_seed_with_unknown_friend_fails() {
        let seed = Seed::from_json(r#"{"users":[{"name":"alice"}],"friends":{"alice":["nobody"]}}"#)
            .unwrap();
        assert!(InMemoryStore::from_seed(seed).unwrap_err().is_not_found());
    }
}
