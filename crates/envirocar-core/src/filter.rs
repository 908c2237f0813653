//! Query filters for listing operations.
//!
//! Filters are parsed from raw query parameter values by the REST layer and
//! handed to the domain services unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default page size when a client asks for a page without a limit.
pub const DEFAULT_LIMIT: usize = 100;

/// Upper bound on a page size.
pub const MAX_LIMIT: usize = 1000;

// ============================================================================
// Pagination
// ============================================================================

/// A 1-based page of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Page number, starting at 1.
    pub page: usize,
    /// Items per page.
    pub limit: usize,
}

impl Pagination {
    /// Creates a page; `page` and `limit` are clamped to at least 1.
    pub fn new(page: usize, limit: usize) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Parses `page` and `limit` query values.
    ///
    /// Returns `None` when neither is given. A missing limit falls back to
    /// `default_limit`; any limit is capped at `max_limit`.
    pub fn parse(
        page: Option<&str>,
        limit: Option<&str>,
        default_limit: usize,
        max_limit: usize,
    ) -> Result<Option<Self>> {
        if page.is_none() && limit.is_none() {
            return Ok(None);
        }
        let page = match page {
            Some(p) => parse_positive("page", p)?,
            None => 1,
        };
        let limit = match limit {
            Some(l) => parse_positive("limit", l)?,
            None => default_limit,
        };
        Ok(Some(Self::new(page, limit.min(max_limit))))
    }

    /// The page after this one.
    pub fn next(&self) -> Self {
        Self::new(self.page + 1, self.limit)
    }

    /// The page before this one, if any.
    pub fn previous(&self) -> Option<Self> {
        (self.page > 1).then(|| Self::new(self.page - 1, self.limit))
    }
}

fn parse_positive(name: &str, value: &str) -> Result<usize> {
    match value.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(Error::bad_request(format!(
            "'{name}' must be a positive integer, got '{value}'"
        ))),
    }
}

// ============================================================================
// Temporal filter
// ============================================================================

/// Half-open time window `[after, before)`; either end may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TemporalFilter {
    /// Lower bound (inclusive).
    pub after: Option<DateTime<Utc>>,
    /// Upper bound (exclusive).
    pub before: Option<DateTime<Utc>>,
}

impl TemporalFilter {
    /// Parses the `after`, `before` and `during` query values.
    ///
    /// `during` is `start,end` and overrides the other two. All times are
    /// RFC 3339.
    pub fn parse(
        after: Option<&str>,
        before: Option<&str>,
        during: Option<&str>,
    ) -> Result<Option<Self>> {
        let filter = if let Some(during) = during {
            let (start, end) = during.split_once(',').ok_or_else(|| {
                Error::bad_request(format!("'during' must be 'start,end', got '{during}'"))
            })?;
            Self {
                after: Some(parse_time("during", start)?),
                before: Some(parse_time("during", end)?),
            }
        } else {
            Self {
                after: after.map(|s| parse_time("after", s)).transpose()?,
                before: before.map(|s| parse_time("before", s)).transpose()?,
            }
        };
        if let (Some(a), Some(b)) = (filter.after, filter.before)
            && a > b
        {
            return Err(Error::bad_request("time window ends before it starts"));
        }
        Ok((!filter.is_open()).then_some(filter))
    }

    /// Whether neither bound is set.
    pub fn is_open(&self) -> bool {
        self.after.is_none() && self.before.is_none()
    }

    /// Whether `time` falls in the window.
    pub fn contains(&self, time: DateTime<Utc>) -> bool {
        self.after.is_none_or(|a| time >= a) && self.before.is_none_or(|b| time < b)
    }
}

fn parse_time(name: &str, value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| Error::bad_request(format!("invalid '{name}' time '{value}': {e}")))
}

// ============================================================================
// Resource filters
// ============================================================================

/// Filter for a user's fuelings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FuelingFilter {
    /// Owner whose fuelings are listed.
    pub owner: String,
    /// Restrict to a time window.
    pub time: Option<TemporalFilter>,
    /// Page to return.
    pub pagination: Option<Pagination>,
}

/// Filter for track listings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackFilter {
    /// Only tracks of this user.
    pub owner: Option<String>,
    /// Only tracks whose creation time falls in this window.
    pub time: Option<TemporalFilter>,
    /// Page to return.
    pub pagination: Option<Pagination>,
}

/// Filter for measurement listings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasurementFilter {
    /// Only measurements of this track.
    pub track: Option<String>,
    /// Only measurements of this user.
    pub owner: Option<String>,
    /// Only measurements taken in this window.
    pub time: Option<TemporalFilter>,
    /// Page to return.
    pub pagination: Option<Pagination>,
}
