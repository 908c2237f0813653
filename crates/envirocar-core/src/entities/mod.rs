//! Domain entities.
//!
//! Entities are plain data owned by the domain services. Optional fields are
//! `Option<T>`; consumers check presence before reading.

mod fueling;
mod group;
mod measurement;
mod phenomenon;
mod track;
mod user;

pub use fueling::{FuelType, Fueling, Quantity};
pub use group::Group;
pub use measurement::{Measurement, MeasurementValue, Point};
pub use phenomenon::Phenomenon;
pub use track::{Track, TrackDetails};
pub use user::{Gender, User, UserUpdate};

use serde::{Deserialize, Serialize};

use crate::filter::Pagination;

/// A (possibly paginated) list of entities in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection<T> {
    /// Items of the current page.
    pub items: Vec<T>,
    /// Page that was requested, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    /// Total number of items across all pages.
    pub total: usize,
}

impl<T> Collection<T> {
    /// Wraps a full, unpaginated list.
    pub fn new(items: Vec<T>) -> Self {
        let total = items.len();
        Self {
            items,
            pagination: None,
            total,
        }
    }

    /// Slices `items` down to one page.
    pub fn paginate(items: Vec<T>, pagination: Option<Pagination>) -> Self {
        let total = items.len();
        let items = match pagination {
            Some(p) => items.into_iter().skip(p.offset()).take(p.limit).collect(),
            None => items,
        };
        Self {
            items,
            pagination,
            total,
        }
    }

    /// Number of items on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this page is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over the items in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Whether a page follows this one.
    pub fn has_next(&self) -> bool {
        self.pagination
            .is_some_and(|p| p.offset() + self.items.len() < self.total)
    }

    /// Whether a page precedes this one.
    pub fn has_previous(&self) -> bool {
        self.pagination.is_some_and(|p| p.page > 1)
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Users collection.
pub type Users = Collection<User>;
/// Groups collection.
pub type Groups = Collection<Group>;
/// Fuelings collection.
pub type Fuelings = Collection<Fueling>;
/// Tracks collection.
pub type Tracks = Collection<Track>;
/// Phenomena collection.
pub type Phenomena = Collection<Phenomenon>;
/// Measurements collection.
pub type Measurements = Collection<Measurement>;
