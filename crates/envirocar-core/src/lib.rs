//! enviroCar Core: entities, filters, domain service traits and errors.
//!
//! This crate is the domain layer the REST API talks to. It has no
//! internal enviroCar dependencies and knows nothing about HTTP or
//! encodings.
//!
//! # Modules
//!
//! - [`entities`]: users, groups, tracks, measurements, phenomena, fuelings
//! - [`filter`]: pagination and temporal filters
//! - [`service`]: the `UserService`, `FriendService`, `GroupService` and
//!   `DataService` traits
//! - [`memory`]: an in-memory implementation of all services
//! - [`error`]: Error types and Result alias

pub mod entities;
pub mod error;
pub mod filter;
pub mod memory;
pub mod service;

// Re-export key types at crate root for convenience
pub use entities::{
    Collection, FuelType, Fueling, Fuelings, Gender, Group, Groups, Measurement,
    MeasurementValue, Measurements, Phenomena, Phenomenon, Point, Quantity, Track, TrackDetails,
    Tracks, User, UserUpdate, Users,
};
pub use error::{Error, ErrorKind, Result};
pub use filter::{FuelingFilter, MeasurementFilter, Pagination, TemporalFilter, TrackFilter};
pub use memory::{InMemoryStore, Seed};
pub use service::{DataService, FriendService, GroupService, UserService};
