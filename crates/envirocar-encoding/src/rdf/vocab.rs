//! Vocabulary IRIs used by the linkers.

/// RDF syntax terms.
pub mod rdf {
    /// Conventional prefix.
    pub const PREFIX: &str = "rdf";
    /// Namespace.
    pub const NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    /// `rdf:type`
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
}

/// XML Schema datatypes.
pub mod xsd {
    /// Conventional prefix.
    pub const PREFIX: &str = "xsd";
    /// Namespace.
    pub const NS: &str = "http://www.w3.org/2001/XMLSchema#";
    /// `xsd:double`
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
    /// `xsd:dateTime`
    pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
    /// `xsd:date`
    pub const DATE: &str = "http://www.w3.org/2001/XMLSchema#date";
    /// `xsd:boolean`
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
}

/// Friend of a Friend.
pub mod foaf {
    /// Conventional prefix.
    pub const PREFIX: &str = "foaf";
    /// Namespace.
    pub const NS: &str = "http://xmlns.com/foaf/0.1/";
    /// `foaf:Person`
    pub const PERSON: &str = "http://xmlns.com/foaf/0.1/Person";
    /// `foaf:Group`
    pub const GROUP: &str = "http://xmlns.com/foaf/0.1/Group";
    /// `foaf:nick`
    pub const NICK: &str = "http://xmlns.com/foaf/0.1/nick";
    /// `foaf:name`
    pub const NAME: &str = "http://xmlns.com/foaf/0.1/name";
    /// `foaf:firstName`
    pub const FIRST_NAME: &str = "http://xmlns.com/foaf/0.1/firstName";
    /// `foaf:givenname`
    pub const GIVENNAME: &str = "http://xmlns.com/foaf/0.1/givenname";
    /// `foaf:surname`
    pub const SURNAME: &str = "http://xmlns.com/foaf/0.1/surname";
    /// `foaf:family_name`
    pub const FAMILY_NAME: &str = "http://xmlns.com/foaf/0.1/family_name";
    /// `foaf:birthday`
    pub const BIRTHDAY: &str = "http://xmlns.com/foaf/0.1/birthday";
    /// `foaf:gender`
    pub const GENDER: &str = "http://xmlns.com/foaf/0.1/gender";
    /// `foaf:homepage`
    pub const HOMEPAGE: &str = "http://xmlns.com/foaf/0.1/homepage";
    /// `foaf:img`
    pub const IMG: &str = "http://xmlns.com/foaf/0.1/img";
    /// `foaf:mbox`
    pub const MBOX: &str = "http://xmlns.com/foaf/0.1/mbox";
    /// `foaf:knows`
    pub const KNOWS: &str = "http://xmlns.com/foaf/0.1/knows";
    /// `foaf:member`
    pub const MEMBER: &str = "http://xmlns.com/foaf/0.1/member";
    /// `foaf:maker`
    pub const MAKER: &str = "http://xmlns.com/foaf/0.1/maker";
}

/// DCMI metadata terms.
pub mod dcterms {
    /// Conventional prefix.
    pub const PREFIX: &str = "dcterms";
    /// Namespace.
    pub const NS: &str = "http://purl.org/dc/terms/";
    /// `dcterms:identifier`
    pub const IDENTIFIER: &str = "http://purl.org/dc/terms/identifier";
    /// `dcterms:title`
    pub const TITLE: &str = "http://purl.org/dc/terms/title";
    /// `dcterms:description`
    pub const DESCRIPTION: &str = "http://purl.org/dc/terms/description";
    /// `dcterms:creator`
    pub const CREATOR: &str = "http://purl.org/dc/terms/creator";
    /// `dcterms:created`
    pub const CREATED: &str = "http://purl.org/dc/terms/created";
    /// `dcterms:modified`
    pub const MODIFIED: &str = "http://purl.org/dc/terms/modified";
    /// `dcterms:date`
    pub const DATE: &str = "http://purl.org/dc/terms/date";
    /// `dcterms:isPartOf`
    pub const IS_PART_OF: &str = "http://purl.org/dc/terms/isPartOf";
    /// `dcterms:hasPart`
    pub const HAS_PART: &str = "http://purl.org/dc/terms/hasPart";
    /// `dcterms:temporal`
    pub const TEMPORAL: &str = "http://purl.org/dc/terms/temporal";
}

/// W3C basic geo vocabulary.
pub mod geo {
    /// Conventional prefix.
    pub const PREFIX: &str = "geo";
    /// Namespace.
    pub const NS: &str = "http://www.w3.org/2003/01/geo/wgs84_pos#";
    /// `geo:Point`
    pub const POINT: &str = "http://www.w3.org/2003/01/geo/wgs84_pos#Point";
    /// `geo:lat`
    pub const LAT: &str = "http://www.w3.org/2003/01/geo/wgs84_pos#lat";
    /// `geo:long`
    pub const LONG: &str = "http://www.w3.org/2003/01/geo/wgs84_pos#long";
    /// `geo:location`
    pub const LOCATION: &str = "http://www.w3.org/2003/01/geo/wgs84_pos#location";
}

/// enviroCar terms.
pub mod envirocar {
    /// Conventional prefix.
    pub const PREFIX: &str = "envirocar";
    /// Namespace.
    pub const NS: &str = "http://envirocar.org/ontology#";
    /// `envirocar:Track`
    pub const TRACK: &str = "http://envirocar.org/ontology#Track";
    /// `envirocar:Measurement`
    pub const MEASUREMENT: &str = "http://envirocar.org/ontology#Measurement";
    /// `envirocar:Phenomenon`
    pub const PHENOMENON: &str = "http://envirocar.org/ontology#Phenomenon";
    /// `envirocar:Fueling`
    pub const FUELING: &str = "http://envirocar.org/ontology#Fueling";
    /// `envirocar:Value`
    pub const VALUE_CLASS: &str = "http://envirocar.org/ontology#Value";
    /// `envirocar:hasValue`
    pub const HAS_VALUE: &str = "http://envirocar.org/ontology#hasValue";
    /// `envirocar:numericValue`
    pub const NUMERIC_VALUE: &str = "http://envirocar.org/ontology#numericValue";
    /// `envirocar:phenomenon`
    pub const OBSERVED: &str = "http://envirocar.org/ontology#phenomenon";
    /// `envirocar:unit`
    pub const UNIT: &str = "http://envirocar.org/ontology#unit";
    /// `envirocar:fuelType`
    pub const FUEL_TYPE: &str = "http://envirocar.org/ontology#fuelType";
    /// `envirocar:volume`
    pub const VOLUME: &str = "http://envirocar.org/ontology#volume";
    /// `envirocar:cost`
    pub const COST: &str = "http://envirocar.org/ontology#cost";
    /// `envirocar:mileage`
    pub const MILEAGE: &str = "http://envirocar.org/ontology#mileage";
    /// `envirocar:missedFuelStop`
    pub const MISSED_FUEL_STOP: &str = "http://envirocar.org/ontology#missedFuelStop";
    /// `envirocar:partialFueling`
    pub const PARTIAL_FUELING: &str = "http://envirocar.org/ontology#partialFueling";
    /// `envirocar:comment`
    pub const COMMENT: &str = "http://envirocar.org/ontology#comment";
}
