//! Linkers for tracks and measurements.

use envirocar_core::{Measurement, Track};
use envirocar_rights::{Permission, Target};

use crate::context::EncodeContext;
use crate::json::encode::format_time;
use crate::rdf::model::{Graph, Literal, Term};
use crate::rdf::vocab::{dcterms, envirocar, geo};

/// Track metadata in DCMI terms.
pub fn track_dcterms(graph: &mut Graph, t: &Track, ctx: &EncodeContext<'_>) {
    graph.set_prefix(dcterms::PREFIX, dcterms::NS);
    graph.set_prefix(envirocar::PREFIX, envirocar::NS);
    let track = Term::from(ctx.links.track(&t.id));
    graph.add_type(track.clone(), envirocar::TRACK);
    graph.add_literal(track.clone(), dcterms::IDENTIFIER, t.id.clone());
    if let Some(name) = &t.name {
        graph.add_literal(track.clone(), dcterms::TITLE, name.clone());
    }
    if let Some(description) = &t.description {
        graph.add_literal(track.clone(), dcterms::DESCRIPTION, description.clone());
    }
    if ctx.allows(Target::Track(t), Permission::Owner) {
        graph.add(track.clone(), dcterms::CREATOR, ctx.links.user(&t.owner));
    }
    graph.add(track.clone(), dcterms::CREATED, Literal::date_time(format_time(t.created)));
    graph.add(track, dcterms::MODIFIED, Literal::date_time(format_time(t.modified)));
}

/// Measurement time, track and creator.
pub fn measurement_dcterms(graph: &mut Graph, m: &Measurement, ctx: &EncodeContext<'_>) {
    graph.set_prefix(dcterms::PREFIX, dcterms::NS);
    graph.set_prefix(envirocar::PREFIX, envirocar::NS);
    let measurement = Term::from(ctx.links.measurement(&m.id));
    graph.add_type(measurement.clone(), envirocar::MEASUREMENT);
    graph.add(
        measurement.clone(),
        dcterms::DATE,
        Literal::date_time(format_time(m.time)),
    );
    if let Some(track) = &m.track {
        graph.add(measurement.clone(), dcterms::IS_PART_OF, ctx.links.track(track));
    }
    if ctx.allows(Target::Measurement(m), Permission::Owner) {
        graph.add(measurement, dcterms::CREATOR, ctx.links.user(&m.owner));
    }
}

/// Measurement position as a `geo:Point` node.
pub fn measurement_geo(graph: &mut Graph, m: &Measurement, ctx: &EncodeContext<'_>) {
    graph.set_prefix(geo::PREFIX, geo::NS);
    let measurement = Term::from(ctx.links.measurement(&m.id));
    let point = graph.blank();
    graph.add(measurement, geo::LOCATION, point.clone());
    graph.add_type(point.clone(), geo::POINT);
    graph.add(point.clone(), geo::LAT, Literal::double(m.geometry.lat));
    graph.add(point, geo::LONG, Literal::double(m.geometry.lon));
}

/// One `envirocar:Value` node per recorded value.
pub fn measurement_values(graph: &mut Graph, m: &Measurement, ctx: &EncodeContext<'_>) {
    graph.set_prefix(envirocar::PREFIX, envirocar::NS);
    let measurement = Term::from(ctx.links.measurement(&m.id));
    for v in &m.values {
        let value = graph.blank();
        graph.add(measurement.clone(), envirocar::HAS_VALUE, value.clone());
        graph.add_type(value.clone(), envirocar::VALUE_CLASS);
        graph.add(value.clone(), envirocar::OBSERVED, ctx.links.phenomenon(&v.phenomenon));
        graph.add(value.clone(), envirocar::NUMERIC_VALUE, Literal::double(v.value));
        if let Some(unit) = &v.unit {
            graph.add_literal(value, envirocar::UNIT, unit.clone());
        }
    }
}
