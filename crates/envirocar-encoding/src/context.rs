//! Per-call encoding context.

use envirocar_rights::{AccessRights, Permission, Target};
use url::Url;

use crate::media::MediaType;
use crate::uri::LinkBuilder;

/// Everything an encoder needs besides the entity: the viewer's rights,
/// the link builder and the negotiated media type.
#[derive(Debug, Clone, Copy)]
pub struct EncodeContext<'a> {
    /// Rights of the viewer.
    pub rights: &'a AccessRights,
    /// Link builder.
    pub links: &'a LinkBuilder,
    /// Negotiated media type.
    pub media_type: &'a MediaType,
    /// URI of the requested resource, used for pagination links.
    pub resource: Option<&'a Url>,
}

impl<'a> EncodeContext<'a> {
    /// Bundles the parts of a context.
    pub fn new(rights: &'a AccessRights, links: &'a LinkBuilder, media_type: &'a MediaType) -> Self {
        Self {
            rights,
            links,
            media_type,
            resource: None,
        }
    }

    /// Sets the URI of the requested resource.
    pub fn with_resource(mut self, resource: &'a Url) -> Self {
        self.resource = Some(resource);
        self
    }

    /// Shorthand for `self.rights.allows(target, permission)`.
    pub fn allows(&self, target: Target<'_>, permission: Permission) -> bool {
        self.rights.allows(target, permission)
    }
}
