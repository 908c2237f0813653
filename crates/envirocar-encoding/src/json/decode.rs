//! JSON decoders for request bodies.
//!
//! Decoders build domain entities from the documents clients send and run
//! the entity's own validation. Server-managed fields (ids, owners,
//! timestamps, the admin flag) are never taken from the document.

use chrono::{DateTime, NaiveDate, Utc};
use envirocar_core::{
    FuelType, Fueling, Gender, Group, Measurement, Phenomenon, Point, Quantity, Track, User,
    UserUpdate,
};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

fn parse<'de, T: Deserialize<'de>>(body: &'de [u8]) -> Result<T> {
    Ok(serde_json::from_slice(body)?)
}

fn parse_gender(value: Option<String>) -> Result<Option<Gender>> {
    value
        .map(|g| {
            Gender::parse(&g).ok_or_else(|| {
                Error::from(envirocar_core::Error::validation_field(
                    "gender",
                    format!("unknown gender '{g}'"),
                ))
            })
        })
        .transpose()
}

// ============================================================================
// Users
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserDocument {
    name: Option<String>,
    mail: Option<String>,
    token: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    gender: Option<String>,
    day_of_birth: Option<NaiveDate>,
    url: Option<String>,
    country: Option<String>,
    language: Option<String>,
    about_me: Option<String>,
}

/// Decodes a registration document into a new user.
///
/// `name`, `mail` and `token` are required.
pub fn user(body: &[u8]) -> Result<User> {
    let doc: UserDocument = parse(body)?;
    let name = doc
        .name
        .ok_or_else(|| envirocar_core::Error::validation_field("name", "is required"))?;
    let mail = doc
        .mail
        .ok_or_else(|| envirocar_core::Error::validation_field("mail", "is required"))?;
    let token = doc
        .token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| envirocar_core::Error::validation_field("token", "is required"))?;

    let mut user = User::new(name).with_mail(mail).with_token(token);
    user.first_name = doc.first_name;
    user.last_name = doc.last_name;
    user.gender = parse_gender(doc.gender)?;
    user.day_of_birth = doc.day_of_birth;
    user.url = doc.url;
    user.country = doc.country;
    user.language = doc.language;
    user.about_me = doc.about_me;
    user.validate()?;
    Ok(user)
}

/// Decodes a partial update of the user named `name`.
///
/// A `name` field, if present, must match: users cannot be renamed.
pub fn user_update(body: &[u8], name: &str) -> Result<UserUpdate> {
    let doc: UserDocument = parse(body)?;
    if let Some(new_name) = &doc.name
        && new_name != name
    {
        return Err(envirocar_core::Error::validation_field("name", "users cannot be renamed").into());
    }
    let update = UserUpdate {
        mail: doc.mail,
        token: doc.token,
        first_name: doc.first_name,
        last_name: doc.last_name,
        gender: parse_gender(doc.gender)?,
        day_of_birth: doc.day_of_birth,
        url: doc.url,
        country: doc.country,
        language: doc.language,
        about_me: doc.about_me,
    };
    update.validate()?;
    Ok(update)
}

// ============================================================================
// Groups and phenomena
// ============================================================================

#[derive(Debug, Deserialize)]
struct GroupDocument {
    name: String,
    description: Option<String>,
}

/// Decodes a group owned by `owner`.
pub fn group(body: &[u8], owner: &str) -> Result<Group> {
    let doc: GroupDocument = parse(body)?;
    let mut group = Group::new(doc.name, owner);
    group.description = doc.description;
    group.validate()?;
    Ok(group)
}

#[derive(Debug, Deserialize)]
struct PhenomenonDocument {
    name: String,
    unit: Option<String>,
}

/// Decodes a phenomenon.
pub fn phenomenon(body: &[u8]) -> Result<Phenomenon> {
    let doc: PhenomenonDocument = parse(body)?;
    let mut phenomenon = Phenomenon::new(doc.name);
    phenomenon.unit = doc.unit;
    Ok(phenomenon)
}

// ============================================================================
// Fuelings
// ============================================================================

#[derive(Debug, Deserialize)]
struct QuantityDocument {
    value: f64,
    unit: String,
}

impl From<QuantityDocument> for Quantity {
    fn from(q: QuantityDocument) -> Self {
        Quantity::new(q.value, q.unit)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FuelingDocument {
    time: DateTime<Utc>,
    fuel_type: FuelType,
    volume: QuantityDocument,
    cost: Option<QuantityDocument>,
    mileage: QuantityDocument,
    #[serde(default)]
    missed_fuel_stop: bool,
    #[serde(default)]
    partial_fueling: bool,
    comment: Option<String>,
}

/// Decodes a fueling logged by `owner`. The id is left for the store to
/// assign.
pub fn fueling(body: &[u8], owner: &str) -> Result<Fueling> {
    let doc: FuelingDocument = parse(body)?;
    let now = Utc::now();
    let fueling = Fueling {
        id: String::new(),
        owner: owner.to_string(),
        time: doc.time,
        fuel_type: doc.fuel_type,
        volume: doc.volume.into(),
        cost: doc.cost.map(Into::into),
        mileage: doc.mileage.into(),
        missed_fuel_stop: doc.missed_fuel_stop,
        partial_fueling: doc.partial_fueling,
        comment: doc.comment,
        created: now,
        modified: now,
    };
    fueling.validate()?;
    Ok(fueling)
}

// ============================================================================
// Tracks (GeoJSON)
// ============================================================================

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    properties: Map<String, Value>,
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(rename = "type")]
    kind: String,
    geometry: Geometry,
    properties: FeatureProperties,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    kind: String,
    coordinates: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct FeatureProperties {
    time: DateTime<Utc>,
    #[serde(default)]
    phenomena: Map<String, Value>,
}

fn string_property(properties: &Map<String, Value>, key: &str) -> Option<String> {
    properties.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Decodes an uploaded track: a GeoJSON `FeatureCollection` of `Point`
/// features, each with a `time` and a `phenomena` map of
/// `{"Name": {"value": n}}` (or bare numbers).
pub fn track(body: &[u8], owner: &str) -> Result<(Track, Vec<Measurement>)> {
    let doc: FeatureCollection = parse(body)?;
    if doc.kind != "FeatureCollection" {
        return Err(Error::invalid_document(format!(
            "expected a FeatureCollection, got '{}'",
            doc.kind
        )));
    }

    let mut track = Track::new(String::new(), owner);
    track.name = string_property(&doc.properties, "name");
    track.description = string_property(&doc.properties, "description");

    let mut measurements = Vec::with_capacity(doc.features.len());
    for (i, feature) in doc.features.into_iter().enumerate() {
        if feature.kind != "Feature" || feature.geometry.kind != "Point" {
            return Err(Error::invalid_document(format!(
                "feature {i} is not a Point feature"
            )));
        }
        let [lon, lat] = feature.geometry.coordinates[..] else {
            return Err(Error::invalid_document(format!(
                "feature {i} must have exactly two coordinates"
            )));
        };
        let mut m = Measurement::new(String::new(), owner, feature.properties.time, Point::new(lon, lat));
        for (phenomenon, value) in feature.properties.phenomena {
            let number = match &value {
                Value::Number(n) => n.as_f64(),
                Value::Object(o) => o.get("value").and_then(Value::as_f64),
                _ => None,
            };
            let number = number.ok_or_else(|| {
                Error::invalid_document(format!(
                    "feature {i}: value of '{phenomenon}' is not a number"
                ))
            })?;
            let unit = match &value {
                Value::Object(o) => o.get("unit").and_then(Value::as_str),
                _ => None,
            };
            m = m.with_value(phenomenon.clone(), unit, number);
        }
        measurements.push(m);
    }
    Ok((track, measurements))
}

/// Measurements are created through track uploads only.
pub fn measurements(_body: &[u8]) -> Result<Vec<Measurement>> {
    Err(Error::unsupported("reading measurements from JSON"))
}
