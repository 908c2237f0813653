//! Shared fixture for the encoder tests.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};
use envirocar_auth::Principal;
use envirocar_core::{
    DataService, FriendService, FuelType, Fueling, Gender, Group, GroupService, InMemoryStore,
    Measurement, Phenomenon, Point, Quantity, Track, User, UserService,
};
use envirocar_rights::AccessRights;

use crate::context::EncodeContext;
use crate::media::MediaType;
use crate::uri::LinkBuilder;

/// Users `alice`, `bob` (lists alice as friend, owns group `drivers`,
/// track `t1` and fueling `f1`) and `carol` (member of `drivers`).
pub(crate) struct Fixture {
    pub store: Arc<InMemoryStore>,
    pub links: LinkBuilder,
    pub media_type: MediaType,
}

impl Fixture {
    pub fn new() -> Self {
        let store = InMemoryStore::new();
        store
            .create_user(
                User::new("alice")
                    .with_token("a")
                    .with_mail("alice@example.org")
                    .with_full_name("Alice", "Liddell"),
            )
            .unwrap();
        let mut bob = User::new("bob")
            .with_token("b")
            .with_mail("bob@example.org")
            .with_full_name("Bob", "Builder");
        bob.gender = Some(Gender::Male);
        bob.day_of_birth = NaiveDate::from_ymd_opt(1980, 2, 3);
        bob.url = Some("https://bob.example.org".to_string());
        store.create_user(bob).unwrap();
        store.create_user(User::new("carol").with_token("c")).unwrap();

        store.add_friend("bob", "alice").unwrap();
        store
            .create_group(Group::new("drivers", "bob").with_description("Daily commuters"))
            .unwrap();
        store.add_member("drivers", "carol").unwrap();

        store
            .create_phenomenon(Phenomenon::new("Speed").with_unit("km/h"))
            .unwrap();
        store
            .create_phenomenon(Phenomenon::new("Rpm").with_unit("u/min"))
            .unwrap();

        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let measurements = (0..3_u32)
            .map(|i| {
                let offset = f64::from(i) * 0.001;
                Measurement::new(
                    format!("m{i}"),
                    "bob",
                    t0 + chrono::Duration::seconds(i64::from(i) * 5),
                    Point::new(7.6 + offset, 51.9 + offset),
                )
                .with_value("Speed", None, 30.0 + f64::from(i))
                .with_value("Rpm", None, 2000.0)
            })
            .collect();
        store
            .create_track(Track::new("t1", "bob").with_name("Morning"), measurements)
            .unwrap();

        store
            .create_fueling(Fueling {
                id: "f1".to_string(),
                owner: "bob".to_string(),
                time: t0,
                fuel_type: FuelType::Diesel,
                volume: Quantity::new(40.0, "l"),
                cost: Some(Quantity::new(62.5, "EUR")),
                mileage: Quantity::new(12345.0, "km"),
                missed_fuel_stop: false,
                partial_fueling: true,
                comment: None,
                created: t0,
                modified: t0,
            })
            .unwrap();

        Self {
            store: Arc::new(store),
            links: LinkBuilder::new("https://envirocar.org/api/stable").unwrap(),
            media_type: MediaType::new("application", "json"),
        }
    }

    /// Rights of a stored user, or anonymous rights.
    pub fn rights(&self, viewer: Option<&str>) -> AccessRights {
        let viewer = viewer.map(|name| Principal {
            name: name.to_string(),
            is_admin: self.store.get_user(name).map(|u| u.is_admin).unwrap_or(false),
            is_secure: false,
        });
        let friends: Arc<dyn FriendService> = self.store.clone();
        let groups: Arc<dyn GroupService> = self.store.clone();
        AccessRights::new(viewer, friends, groups)
    }

    pub fn ctx<'a>(&'a self, rights: &'a AccessRights) -> EncodeContext<'a> {
        EncodeContext::new(rights, &self.links, &self.media_type)
    }
}
