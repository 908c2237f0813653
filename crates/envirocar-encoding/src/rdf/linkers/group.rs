//! FOAF and DCMI linkers for groups.

use std::fmt;
use std::sync::Arc;

use envirocar_core::{Group, GroupService};
use envirocar_rights::{Permission, Target};

use crate::context::EncodeContext;
use crate::json::encode::format_time;
use crate::rdf::linker::Linker;
use crate::rdf::model::{Graph, Literal, Term};
use crate::rdf::vocab::{dcterms, foaf};

/// Describes a group as a `foaf:Group` with `foaf:member` references.
pub struct GroupFoafLinker {
    groups: Arc<dyn GroupService>,
}

impl GroupFoafLinker {
    /// Creates the linker over the group service.
    pub fn new(groups: Arc<dyn GroupService>) -> Self {
        Self { groups }
    }
}

impl fmt::Debug for GroupFoafLinker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupFoafLinker").finish_non_exhaustive()
    }
}

impl Linker<Group> for GroupFoafLinker {
    fn link(&self, graph: &mut Graph, g: &Group, ctx: &EncodeContext<'_>) {
        graph.set_prefix(foaf::PREFIX, foaf::NS);
        let group = Term::from(ctx.links.group(&g.name));
        graph.add_type(group.clone(), foaf::GROUP);
        graph.add_literal(group.clone(), foaf::NAME, g.name.clone());

        match self.groups.get_members(&g.name) {
            Ok(members) => {
                for member in &members {
                    graph.add(group.clone(), foaf::MEMBER, ctx.links.user(&member.name));
                }
            }
            Err(e) => log::warn!("Skipping members of '{}': {e}", g.name),
        }
    }
}

/// Adds description, creator and timestamps.
pub fn group_dcterms(graph: &mut Graph, g: &Group, ctx: &EncodeContext<'_>) {
    graph.set_prefix(dcterms::PREFIX, dcterms::NS);
    let group = Term::from(ctx.links.group(&g.name));
    if let Some(description) = &g.description {
        graph.add_literal(group.clone(), dcterms::DESCRIPTION, description.clone());
    }
    if ctx.allows(Target::Group(g), Permission::Owner) {
        graph.add(group.clone(), dcterms::CREATOR, ctx.links.user(&g.owner));
    }
    graph.add(group.clone(), dcterms::CREATED, Literal::date_time(format_time(g.created)));
    graph.add(group, dcterms::MODIFIED, Literal::date_time(format_time(g.modified)));
}
