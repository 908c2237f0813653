//! Linker for phenomena.

use envirocar_core::Phenomenon;

use crate::context::EncodeContext;
use crate::rdf::model::{Graph, Term};
use crate::rdf::vocab::{dcterms, envirocar};

/// Phenomenon name and unit.
pub fn phenomenon_dcterms(graph: &mut Graph, p: &Phenomenon, ctx: &EncodeContext<'_>) {
    graph.set_prefix(dcterms::PREFIX, dcterms::NS);
    graph.set_prefix(envirocar::PREFIX, envirocar::NS);
    let phenomenon = Term::from(ctx.links.phenomenon(&p.name));
    graph.add_type(phenomenon.clone(), envirocar::PHENOMENON);
    graph.add_literal(phenomenon.clone(), dcterms::TITLE, p.name.clone());
    if let Some(unit) = &p.unit {
        graph.add_literal(phenomenon, envirocar::UNIT, unit.clone());
    }
}
