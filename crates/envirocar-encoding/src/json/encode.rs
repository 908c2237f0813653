//! JSON encoders.
//!
//! Every field guarded by a permission is checked for presence first and
//! then against the viewer's rights; denied fields are left out entirely.
//! Related entities appear as `{"name", "href"}` references only.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use envirocar_core::{
    Collection, Fueling, Fuelings, Group, Groups, Measurement, Measurements, Phenomena,
    Phenomenon, Quantity, Track, TrackDetails, Tracks, User, Users,
};
use envirocar_rights::{Permission, Target};
use serde_json::{json, Map, Value};

use crate::context::EncodeContext;
use crate::uri::LinkBuilder;

/// RFC 3339 timestamp with second precision and a `Z` suffix.
pub fn format_time(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn user_ref(name: &str, links: &LinkBuilder) -> Value {
    json!({ "name": name, "href": links.user(name).as_str() })
}

fn quantity(q: &Quantity) -> Value {
    json!({ "value": q.value, "unit": q.unit })
}

/// Adds `value` under `key` when `value` is present.
fn put<V: Into<Value>>(j: &mut Map<String, Value>, key: &str, value: Option<V>) {
    if let Some(v) = value {
        j.insert(key.to_string(), v.into());
    }
}

// ============================================================================
// Collections
// ============================================================================

/// Wraps encoded items as `{key: [...], "total": n, "links": [...]}`.
fn collection<T>(
    key: &str,
    items: &Collection<T>,
    ctx: &EncodeContext<'_>,
    encode: impl Fn(&T) -> Value,
) -> Value {
    let mut j = Map::new();
    j.insert(
        key.to_string(),
        Value::Array(items.iter().map(encode).collect()),
    );
    j.insert("total".to_string(), json!(items.total));
    if let Some(links) = pagination_links(items, ctx) {
        j.insert("links".to_string(), links);
    }
    Value::Object(j)
}

/// `first`, `prev`, `next`, `last` links for a paginated collection.
fn pagination_links<T>(items: &Collection<T>, ctx: &EncodeContext<'_>) -> Option<Value> {
    let (pagination, resource) = (items.pagination?, ctx.resource?);
    let last_page = items.total.div_ceil(pagination.limit).max(1);
    let link = |rel: &str, page: usize| {
        let mut p = pagination;
        p.page = page;
        json!({ "rel": rel, "href": ctx.links.page(resource, p).as_str() })
    };

    let mut links = vec![link("first", 1)];
    if let Some(prev) = pagination.previous() {
        links.push(link("prev", prev.page));
    }
    if items.has_next() {
        links.push(link("next", pagination.next().page));
    }
    links.push(link("last", last_page));
    Some(Value::Array(links))
}

// ============================================================================
// Root
// ============================================================================

/// Links to the top-level collections.
pub fn root(links: &LinkBuilder) -> Value {
    json!({
        "users": links.users().as_str(),
        "groups": links.groups().as_str(),
        "tracks": links.tracks().as_str(),
        "phenomena": links.phenomena().as_str(),
        "measurements": links.measurements().as_str(),
    })
}

// ============================================================================
// Users
// ============================================================================

/// A full user profile, filtered by the viewer's rights.
pub fn user(u: &User, ctx: &EncodeContext<'_>) -> Value {
    let target = Target::User(u);
    let allows = |p: Permission| ctx.allows(target, p);
    let mut j = Map::new();

    j.insert("name".into(), json!(u.name));
    j.insert("href".into(), json!(ctx.links.user(&u.name).as_str()));
    if let Some(mail) = &u.mail
        && allows(Permission::Mail)
    {
        j.insert("mail".into(), json!(mail));
    }
    if let Some(first) = &u.first_name
        && allows(Permission::FirstName)
    {
        j.insert("firstName".into(), json!(first));
    }
    if let Some(last) = &u.last_name
        && allows(Permission::LastName)
    {
        j.insert("lastName".into(), json!(last));
    }
    if let Some(gender) = u.gender
        && allows(Permission::Gender)
    {
        j.insert("gender".into(), json!(gender.as_str()));
    }
    if let Some(dob) = u.day_of_birth
        && allows(Permission::DayOfBirth)
    {
        j.insert("dayOfBirth".into(), json!(format_date(dob)));
    }
    if let Some(url) = &u.url
        && allows(Permission::Url)
    {
        j.insert("url".into(), json!(url));
    }
    if let Some(country) = &u.country
        && allows(Permission::Country)
    {
        j.insert("country".into(), json!(country));
    }
    if let Some(language) = &u.language
        && allows(Permission::Language)
    {
        j.insert("language".into(), json!(language));
    }
    if let Some(about) = &u.about_me
        && allows(Permission::AboutMe)
    {
        j.insert("aboutMe".into(), json!(about));
    }
    if allows(Permission::Avatar) {
        j.insert("avatar".into(), json!(ctx.links.user_avatar(&u.name).as_str()));
    }
    if allows(Permission::Friends) {
        j.insert("friends".into(), json!(ctx.links.user_friends(&u.name).as_str()));
    }
    if allows(Permission::Groups) {
        j.insert("groups".into(), json!(ctx.links.user_groups(&u.name).as_str()));
    }
    if allows(Permission::Tracks) {
        j.insert("tracks".into(), json!(ctx.links.user_tracks(&u.name).as_str()));
    }
    if allows(Permission::Fuelings) {
        j.insert("fuelings".into(), json!(ctx.links.user_fuelings(&u.name).as_str()));
    }
    if allows(Permission::Role) {
        j.insert("admin".into(), json!(u.is_admin));
    }
    j.insert("created".into(), json!(format_time(u.created)));
    j.insert("modified".into(), json!(format_time(u.modified)));
    Value::Object(j)
}

/// A list of user references.
pub fn users(c: &Users, ctx: &EncodeContext<'_>) -> Value {
    collection("users", c, ctx, |u| user_ref(&u.name, ctx.links))
}

// ============================================================================
// Groups
// ============================================================================

/// A group.
pub fn group(g: &Group, ctx: &EncodeContext<'_>) -> Value {
    let mut j = Map::new();
    j.insert("name".into(), json!(g.name));
    j.insert("href".into(), json!(ctx.links.group(&g.name).as_str()));
    put(&mut j, "description", g.description.as_deref());
    if ctx.allows(Target::Group(g), Permission::Owner) {
        j.insert("owner".into(), user_ref(&g.owner, ctx.links));
    }
    j.insert(
        "members".into(),
        json!(ctx.links.group_members(&g.name).as_str()),
    );
    j.insert("created".into(), json!(format_time(g.created)));
    j.insert("modified".into(), json!(format_time(g.modified)));
    Value::Object(j)
}

/// A list of group references.
pub fn groups(c: &Groups, ctx: &EncodeContext<'_>) -> Value {
    collection("groups", c, ctx, |g| {
        json!({ "name": g.name, "href": ctx.links.group(&g.name).as_str() })
    })
}

// ============================================================================
// Phenomena
// ============================================================================

/// A phenomenon.
pub fn phenomenon(p: &Phenomenon, ctx: &EncodeContext<'_>) -> Value {
    let mut j = Map::new();
    j.insert("name".into(), json!(p.name));
    j.insert("href".into(), json!(ctx.links.phenomenon(&p.name).as_str()));
    put(&mut j, "unit", p.unit.as_deref());
    j.insert("created".into(), json!(format_time(p.created)));
    j.insert("modified".into(), json!(format_time(p.modified)));
    Value::Object(j)
}

/// A list of phenomenon references.
pub fn phenomena(c: &Phenomena, ctx: &EncodeContext<'_>) -> Value {
    collection("phenomena", c, ctx, |p| {
        json!({ "name": p.name, "href": ctx.links.phenomenon(&p.name).as_str() })
    })
}

// ============================================================================
// Measurements (GeoJSON)
// ============================================================================

/// A measurement as a GeoJSON `Feature`.
pub fn measurement(m: &Measurement, ctx: &EncodeContext<'_>) -> Value {
    let mut props = Map::new();
    props.insert("id".into(), json!(m.id));
    props.insert("href".into(), json!(ctx.links.measurement(&m.id).as_str()));
    props.insert("time".into(), json!(format_time(m.time)));
    if let Some(track) = &m.track {
        props.insert("track".into(), json!(ctx.links.track(track).as_str()));
    }
    if ctx.allows(Target::Measurement(m), Permission::Owner) {
        props.insert("user".into(), user_ref(&m.owner, ctx.links));
    }
    let mut values = Map::new();
    for v in &m.values {
        let mut value = Map::new();
        value.insert("value".into(), json!(v.value));
        put(&mut value, "unit", v.unit.as_deref());
        values.insert(v.phenomenon.clone(), Value::Object(value));
    }
    props.insert("phenomena".into(), Value::Object(values));

    json!({
        "type": "Feature",
        "geometry": {
            "type": "Point",
            "coordinates": [m.geometry.lon, m.geometry.lat],
        },
        "properties": props,
    })
}

/// Measurements as a GeoJSON `FeatureCollection`.
pub fn measurements(c: &Measurements, ctx: &EncodeContext<'_>) -> Value {
    let mut j = Map::new();
    j.insert("type".into(), json!("FeatureCollection"));
    j.insert(
        "features".into(),
        Value::Array(c.iter().map(|m| measurement(m, ctx)).collect()),
    );
    j.insert("total".into(), json!(c.total));
    if let Some(links) = pagination_links(c, ctx) {
        j.insert("links".into(), links);
    }
    Value::Object(j)
}

// ============================================================================
// Tracks
// ============================================================================

fn track_properties(t: &Track, ctx: &EncodeContext<'_>) -> Map<String, Value> {
    let mut props = Map::new();
    props.insert("id".into(), json!(t.id));
    props.insert("href".into(), json!(ctx.links.track(&t.id).as_str()));
    put(&mut props, "name", t.name.as_deref());
    put(&mut props, "description", t.description.as_deref());
    if ctx.allows(Target::Track(t), Permission::Owner) {
        props.insert("owner".into(), user_ref(&t.owner, ctx.links));
    }
    props.insert("created".into(), json!(format_time(t.created)));
    props.insert("modified".into(), json!(format_time(t.modified)));
    props
}

/// A track with its measurements as a GeoJSON `FeatureCollection`.
pub fn track_details(d: &TrackDetails, ctx: &EncodeContext<'_>) -> Value {
    let mut props = track_properties(&d.track, ctx);
    put(&mut props, "begin", d.begin().map(format_time));
    put(&mut props, "end", d.end().map(format_time));
    props.insert("phenomena".into(), json!(d.phenomena()));
    props.insert(
        "measurements".into(),
        json!(ctx.links.track_measurements(&d.track.id).as_str()),
    );
    json!({
        "type": "FeatureCollection",
        "properties": props,
        "features": d.measurements.iter().map(|m| measurement(m, ctx)).collect::<Vec<_>>(),
    })
}

/// Track metadata without measurements.
pub fn track(t: &Track, ctx: &EncodeContext<'_>) -> Value {
    Value::Object(track_properties(t, ctx))
}

/// A list of track summaries.
pub fn tracks(c: &Tracks, ctx: &EncodeContext<'_>) -> Value {
    collection("tracks", c, ctx, |t| {
        let mut j = Map::new();
        j.insert("id".into(), json!(t.id));
        put(&mut j, "name", t.name.as_deref());
        j.insert("href".into(), json!(ctx.links.track(&t.id).as_str()));
        j.insert("modified".into(), json!(format_time(t.modified)));
        Value::Object(j)
    })
}

// ============================================================================
// Fuelings
// ============================================================================

/// A fueling.
pub fn fueling(f: &Fueling, ctx: &EncodeContext<'_>) -> Value {
    let mut j = Map::new();
    j.insert("id".into(), json!(f.id));
    j.insert("href".into(), json!(ctx.links.fueling(&f.owner, &f.id).as_str()));
    j.insert("time".into(), json!(format_time(f.time)));
    j.insert("fuelType".into(), json!(f.fuel_type.as_str()));
    j.insert("volume".into(), quantity(&f.volume));
    put(&mut j, "cost", f.cost.as_ref().map(quantity));
    j.insert("mileage".into(), quantity(&f.mileage));
    j.insert("missedFuelStop".into(), json!(f.missed_fuel_stop));
    j.insert("partialFueling".into(), json!(f.partial_fueling));
    put(&mut j, "comment", f.comment.as_deref());
    if ctx.allows(Target::Fueling(f), Permission::Owner) {
        j.insert("user".into(), user_ref(&f.owner, ctx.links));
    }
    j.insert("created".into(), json!(format_time(f.created)));
    j.insert("modified".into(), json!(format_time(f.modified)));
    Value::Object(j)
}

/// A list of fuelings, encoded in full.
pub fn fuelings(c: &Fuelings, ctx: &EncodeContext<'_>) -> Value {
    collection("fuelings", c, ctx, |f| fueling(f, ctx))
}
