//! FOAF and DCMI linkers for users.

use std::fmt;
use std::sync::Arc;

use envirocar_core::{FriendService, GroupService, User};
use envirocar_rights::{Permission, Target};

use crate::context::EncodeContext;
use crate::json::encode::format_time;
use crate::rdf::linker::Linker;
use crate::rdf::model::{Graph, Literal, Term};
use crate::rdf::vocab::{dcterms, foaf, xsd};

/// Describes a user as a `foaf:Person`.
///
/// Friends appear as `foaf:knows` edges and groups as `foaf:member` edges
/// from the group; both only as typed references.
pub struct UserFoafLinker {
    friends: Arc<dyn FriendService>,
    groups: Arc<dyn GroupService>,
}

impl UserFoafLinker {
    /// Creates the linker over the relation services.
    pub fn new(friends: Arc<dyn FriendService>, groups: Arc<dyn GroupService>) -> Self {
        Self { friends, groups }
    }

    fn link_friends(&self, graph: &mut Graph, user: &Term, name: &str, ctx: &EncodeContext<'_>) {
        match self.friends.get_friends(name) {
            Ok(friends) => {
                for friend in &friends {
                    let friend_uri = Term::from(ctx.links.user(&friend.name));
                    graph.add(user.clone(), foaf::KNOWS, friend_uri.clone());
                    graph.add_type(friend_uri, foaf::PERSON);
                }
            }
            Err(e) => log::warn!("Skipping friends of '{name}': {e}"),
        }
    }

    fn link_groups(&self, graph: &mut Graph, user: &Term, name: &str, ctx: &EncodeContext<'_>) {
        match self.groups.get_groups_of(name, None) {
            Ok(groups) => {
                for group in &groups {
                    let group_uri = Term::from(ctx.links.group(&group.name));
                    graph.add_type(group_uri.clone(), foaf::GROUP);
                    graph.add(group_uri, foaf::MEMBER, user.clone());
                }
            }
            Err(e) => log::warn!("Skipping groups of '{name}': {e}"),
        }
    }
}

impl fmt::Debug for UserFoafLinker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserFoafLinker").finish_non_exhaustive()
    }
}

impl Linker<User> for UserFoafLinker {
    fn link(&self, graph: &mut Graph, u: &User, ctx: &EncodeContext<'_>) {
        graph.set_prefix(foaf::PREFIX, foaf::NS);
        let target = Target::User(u);
        let allows = |p: Permission| ctx.allows(target, p);
        let user = Term::from(ctx.links.user(&u.name));

        graph.add_type(user.clone(), foaf::PERSON);
        if allows(Permission::Nickname) {
            graph.add_literal(user.clone(), foaf::NICK, u.name.clone());
        }
        if let Some(first) = &u.first_name
            && allows(Permission::FirstName)
        {
            graph.add_literal(user.clone(), foaf::FIRST_NAME, first.clone());
            graph.add_literal(user.clone(), foaf::GIVENNAME, first.clone());
        }
        if let Some(last) = &u.last_name
            && allows(Permission::LastName)
        {
            graph.add_literal(user.clone(), foaf::SURNAME, last.clone());
            graph.add_literal(user.clone(), foaf::FAMILY_NAME, last.clone());
        }
        if let Some(dob) = u.day_of_birth
            && allows(Permission::DayOfBirth)
        {
            graph.add(
                user.clone(),
                foaf::BIRTHDAY,
                Literal::typed(dob.format("%Y-%m-%d").to_string(), xsd::DATE),
            );
        }
        if let Some(gender) = u.gender
            && allows(Permission::Gender)
        {
            graph.add_literal(user.clone(), foaf::GENDER, gender.as_str());
        }
        if let Some(url) = &u.url
            && allows(Permission::Url)
        {
            graph.add(user.clone(), foaf::HOMEPAGE, Term::iri(url.clone()));
        }
        if allows(Permission::Avatar) {
            graph.add(user.clone(), foaf::IMG, ctx.links.user_avatar(&u.name));
        }
        if let Some(mail) = &u.mail
            && allows(Permission::Mail)
        {
            graph.add(user.clone(), foaf::MBOX, Term::iri(format!("mailto:{mail}")));
        }
        if allows(Permission::Friends) {
            self.link_friends(graph, &user, &u.name, ctx);
        }
        if allows(Permission::Groups) {
            self.link_groups(graph, &user, &u.name, ctx);
        }
    }
}

/// Adds creation and modification times.
pub fn user_dcterms(graph: &mut Graph, u: &User, ctx: &EncodeContext<'_>) {
    graph.set_prefix(dcterms::PREFIX, dcterms::NS);
    let user = Term::from(ctx.links.user(&u.name));
    graph.add_literal(user.clone(), dcterms::IDENTIFIER, u.name.clone());
    graph.add(user.clone(), dcterms::CREATED, Literal::date_time(format_time(u.created)));
    graph.add(user, dcterms::MODIFIED, Literal::date_time(format_time(u.modified)));
}
