//! Resource URIs.
//!
//! Every URI is a pure function of the configured base URL and the
//! identifiers of the resource, so encoders, linkers and handlers agree on
//! them without coordination.

use url::Url;

use envirocar_core::Pagination;

use crate::error::{Error, Result};

/// Builds absolute URIs for the REST resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkBuilder {
    base: Url,
}

impl LinkBuilder {
    /// Creates a builder for a base URL such as `https://envirocar.org/api/stable`.
    pub fn new(base: &str) -> Result<Self> {
        let base = Url::parse(base)
            .map_err(|e| Error::invalid_document(format!("invalid base URL '{base}': {e}")))?;
        if base.cannot_be_a_base() {
            return Err(Error::invalid_document(format!(
                "base URL '{base}' cannot carry paths"
            )));
        }
        Ok(Self { base })
    }

    /// The base URL.
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Appends path segments to the base. Segments are percent-encoded.
    pub fn build<I, S>(&self, segments: I) -> Url
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            for segment in segments {
                path.push(segment.as_ref());
            }
        }
        url
    }

    /// Appends a request path, already percent-encoded, to the base path.
    pub fn resolve(&self, path: &str) -> Url {
        let mut url = self.base.clone();
        let joined = format!(
            "{}/{}",
            self.base.path().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        url.set_path(&joined);
        url.set_query(None);
        url
    }

    /// The API root.
    pub fn root(&self) -> Url {
        self.build(std::iter::empty::<&str>())
    }

    /// `/users`
    pub fn users(&self) -> Url {
        self.build(["users"])
    }

    /// `/users/{name}`
    pub fn user(&self, name: &str) -> Url {
        self.build(["users", name])
    }

    /// `/users/{name}/avatar`
    pub fn user_avatar(&self, name: &str) -> Url {
        self.build(["users", name, "avatar"])
    }

    /// `/users/{name}/friends`
    pub fn user_friends(&self, name: &str) -> Url {
        self.build(["users", name, "friends"])
    }

    /// `/users/{name}/groups`
    pub fn user_groups(&self, name: &str) -> Url {
        self.build(["users", name, "groups"])
    }

    /// `/users/{name}/tracks`
    pub fn user_tracks(&self, name: &str) -> Url {
        self.build(["users", name, "tracks"])
    }

    /// `/users/{name}/fuelings`
    pub fn user_fuelings(&self, name: &str) -> Url {
        self.build(["users", name, "fuelings"])
    }

    /// `/users/{owner}/fuelings/{id}`
    pub fn fueling(&self, owner: &str, id: &str) -> Url {
        self.build(["users", owner, "fuelings", id])
    }

    /// `/groups`
    pub fn groups(&self) -> Url {
        self.build(["groups"])
    }

    /// `/groups/{name}`
    pub fn group(&self, name: &str) -> Url {
        self.build(["groups", name])
    }

    /// `/groups/{name}/members`
    pub fn group_members(&self, name: &str) -> Url {
        self.build(["groups", name, "members"])
    }

    /// `/tracks`
    pub fn tracks(&self) -> Url {
        self.build(["tracks"])
    }

    /// `/tracks/{id}`
    pub fn track(&self, id: &str) -> Url {
        self.build(["tracks", id])
    }

    /// `/tracks/{id}/measurements`
    pub fn track_measurements(&self, id: &str) -> Url {
        self.build(["tracks", id, "measurements"])
    }

    /// `/phenomena`
    pub fn phenomena(&self) -> Url {
        self.build(["phenomena"])
    }

    /// `/phenomena/{name}`
    pub fn phenomenon(&self, name: &str) -> Url {
        self.build(["phenomena", name])
    }

    /// `/measurements`
    pub fn measurements(&self) -> Url {
        self.build(["measurements"])
    }

    /// `/measurements/{id}`
    pub fn measurement(&self, id: &str) -> Url {
        self.build(["measurements", id])
    }

    /// `url` with `page` and `limit` query parameters set.
    pub fn page(&self, url: &Url, pagination: Pagination) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair("page", &pagination.page.to_string())
            .append_pair("limit", &pagination.limit.to_string());
        url
    }
}
