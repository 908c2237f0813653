//! Linkers for fuelings.

use envirocar_core::{Fueling, Quantity};
use envirocar_rights::{Permission, Target};

use crate::context::EncodeContext;
use crate::json::encode::format_time;
use crate::rdf::model::{Graph, Literal, Term};
use crate::rdf::vocab::{dcterms, envirocar};

/// Fueling time, creator, comment and timestamps.
pub fn fueling_dcterms(graph: &mut Graph, f: &Fueling, ctx: &EncodeContext<'_>) {
    graph.set_prefix(dcterms::PREFIX, dcterms::NS);
    graph.set_prefix(envirocar::PREFIX, envirocar::NS);
    let fueling = Term::from(ctx.links.fueling(&f.owner, &f.id));
    graph.add_type(fueling.clone(), envirocar::FUELING);
    graph.add_literal(fueling.clone(), dcterms::IDENTIFIER, f.id.clone());
    graph.add(fueling.clone(), dcterms::DATE, Literal::date_time(format_time(f.time)));
    if ctx.allows(Target::Fueling(f), Permission::Owner) {
        graph.add(fueling.clone(), dcterms::CREATOR, ctx.links.user(&f.owner));
    }
    if let Some(comment) = &f.comment {
        graph.add_literal(fueling.clone(), envirocar::COMMENT, comment.clone());
    }
    graph.add(fueling.clone(), dcterms::CREATED, Literal::date_time(format_time(f.created)));
    graph.add(fueling, dcterms::MODIFIED, Literal::date_time(format_time(f.modified)));
}

fn add_quantity(graph: &mut Graph, subject: &Term, predicate: &str, q: &Quantity) {
    let node = graph.blank();
    graph.add(subject.clone(), predicate, node.clone());
    graph.add(node.clone(), envirocar::NUMERIC_VALUE, Literal::double(q.value));
    graph.add_literal(node, envirocar::UNIT, q.unit.clone());
}

/// Fuel type, quantities and flags.
pub fn fueling_quantities(graph: &mut Graph, f: &Fueling, ctx: &EncodeContext<'_>) {
    graph.set_prefix(envirocar::PREFIX, envirocar::NS);
    let fueling = Term::from(ctx.links.fueling(&f.owner, &f.id));
    graph.add_literal(fueling.clone(), envirocar::FUEL_TYPE, f.fuel_type.as_str());
    add_quantity(graph, &fueling, envirocar::VOLUME, &f.volume);
    if let Some(cost) = &f.cost {
        add_quantity(graph, &fueling, envirocar::COST, cost);
    }
    add_quantity(graph, &fueling, envirocar::MILEAGE, &f.mileage);
    graph.add(
        fueling.clone(),
        envirocar::MISSED_FUEL_STOP,
        Literal::boolean(f.missed_fuel_stop),
    );
    graph.add(
        fueling,
        envirocar::PARTIAL_FUELING,
        Literal::boolean(f.partial_fueling),
    );
}
