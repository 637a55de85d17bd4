use serde::{Deserialize, Serialize};

use crate::geopoint::GeoPoint;

/// Latitude keys, in resolution order.
const LATITUDE_KEYS: [&str; 2] = ["y", "lat"];
/// Longitude keys, in resolution order.
const LONGITUDE_KEYS: [&str; 2] = ["x", "lon"];
/// Primary edge weight key.
const LENGTH_KEY: &str = "length";
/// Opt-in fallback edge weight key.
const DISTANCE_KEY: &str = "distance";

/// A single attribute as delivered by the map-loading collaborator. Values
/// arrive either as numbers or as raw tag text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    Float(f64),
    Int(i64),
    Text(String),
}

impl AttributeValue {
    /// Coerce to a finite float. Text is parsed; a non-finite or unparsable
    /// value is unusable.
    fn as_finite_f64(&self) -> Option<f64> {
        let value = match self {
            AttributeValue::Float(value) => *value,
            AttributeValue::Int(value) => *value as f64,
            AttributeValue::Text(text) => text.trim().parse::<f64>().ok()?,
        };

        value.is_finite().then_some(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> AttributeValue {
        AttributeValue::Float(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> AttributeValue {
        AttributeValue::Int(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> AttributeValue {
        AttributeValue::Text(value.to_owned())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> AttributeValue {
        AttributeValue::Text(value)
    }
}

/// Key/value pairs stored inline. Attribute maps stay tiny (a handful of
/// tags per node or edge), so a linear scan beats hashing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
struct SmallMap(Vec<(String, AttributeValue)>);

impl SmallMap {
    fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, value)| value)
    }

    fn insert(&mut self, key: &str, value: AttributeValue) {
        match self.0.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value,
            None => self.0.push((key.to_owned(), value)),
        }
    }

    /// Value of the first key present in `keys`, coerced to a finite float.
    /// Once a key is found the search stops; a present but unusable value
    /// does not fall through to the next key.
    fn resolve(&self, keys: &[&str]) -> Option<f64> {
        let value = keys.iter().find_map(|key| self.get(key))?;
        value.as_finite_f64()
    }
}

/// Attributes attached to a graph node.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeAttributes {
    values: SmallMap,
}

impl NodeAttributes {
    pub fn new() -> NodeAttributes {
        NodeAttributes::default()
    }

    /// A node carrying only a coordinate pair, stored under the primary
    /// `y`/`x` keys.
    pub fn at(lat: f64, lon: f64) -> NodeAttributes {
        let mut attributes = NodeAttributes::new();
        attributes.insert("y", lat);
        attributes.insert("x", lon);
        attributes
    }

    pub fn insert(&mut self, key: &str, value: impl Into<AttributeValue>) {
        self.values.insert(key, value.into());
    }

    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.values.get(key)
    }

    /// Resolve the coordinate pair. Latitude comes from `y`, falling back to
    /// `lat`; longitude from `x`, falling back to `lon`. Per axis the first
    /// key present wins and must hold a finite float.
    pub fn coordinates(&self) -> Option<GeoPoint> {
        let lat = self.values.resolve(&LATITUDE_KEYS)?;
        let lon = self.values.resolve(&LONGITUDE_KEYS)?;

        Some(GeoPoint::new(lat, lon))
    }
}

/// Attributes attached to a directed edge.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeAttributes {
    values: SmallMap,
}

impl EdgeAttributes {
    pub fn new() -> EdgeAttributes {
        EdgeAttributes::default()
    }

    /// An edge carrying only a `length` in meters.
    pub fn with_length(meters: f64) -> EdgeAttributes {
        let mut attributes = EdgeAttributes::new();
        attributes.insert(LENGTH_KEY, meters);
        attributes
    }

    pub fn insert(&mut self, key: &str, value: impl Into<AttributeValue>) {
        self.values.insert(key, value.into());
    }

    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.values.get(key)
    }

    /// Traversal cost of the edge in meters under `policy`, or `None` when
    /// no usable weight is stored. A usable weight is finite and
    /// non-negative; there is no implicit zero for weightless edges.
    pub fn weight(&self, policy: WeightPolicy) -> Option<f64> {
        let resolved = match policy {
            WeightPolicy::LengthRequired => self.values.resolve(&[LENGTH_KEY]),
            WeightPolicy::LengthOrDistance => self.values.resolve(&[LENGTH_KEY, DISTANCE_KEY]),
        }?;

        (resolved >= 0.0).then_some(resolved)
    }
}

/// Controls which edge attribute supplies the traversal cost.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightPolicy {
    /// Only `length` is consulted. The default.
    #[default]
    LengthRequired,
    /// `length` first, `distance` for edges that carry no `length` at all.
    LengthOrDistance,
}
