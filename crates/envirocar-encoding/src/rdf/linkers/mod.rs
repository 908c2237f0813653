//! The standard linkers.
//!
//! Stateless linkers are plain functions; linkers that consult relation
//! services hold them behind `Arc`s.

mod fueling;
mod group;
mod phenomenon;
mod track;
mod user;

pub use fueling::{fueling_dcterms, fueling_quantities};
pub use group::{GroupFoafLinker, group_dcterms};
pub use phenomenon::phenomenon_dcterms;
pub use track::{measurement_dcterms, measurement_geo, measurement_values, track_dcterms};
pub use user::{UserFoafLinker, user_dcterms};
