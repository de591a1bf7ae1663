use exoscout_api::ArchiveRow;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Archive column names
pub const FIELD_NAME: &str = "pl_name";
pub const FIELD_ORBITAL_PERIOD: &str = "pl_orbper";
pub const FIELD_RADIUS: &str = "pl_rade";
pub const FIELD_DISCOVERY_YEAR: &str = "disc_year";

/// One row exactly as the archive returned it
///
/// Keys can be missing and values can be null; nothing is validated until
/// the row goes through [`crate::processor::process`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The value under `key`, but only if it counts as present
    pub fn present(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|value| is_truthy(value))
    }

    /// A present value that is also a JSON number
    pub fn present_number(&self, key: &str) -> Option<f64> {
        self.present(key).and_then(Value::as_f64)
    }

    /// Planet name, or "" when the archive left it out
    pub fn name(&self) -> &str {
        self.0.get(FIELD_NAME).and_then(Value::as_str).unwrap_or("")
    }
}

impl From<ArchiveRow> for RawRecord {
    fn from(row: ArchiveRow) -> Self {
        Self(row)
    }
}

impl From<&PlanetRecord> for RawRecord {
    fn from(planet: &PlanetRecord) -> Self {
        let mut fields = Map::new();
        fields.insert(FIELD_NAME.to_string(), Value::from(planet.name.as_str()));
        fields.insert(
            FIELD_ORBITAL_PERIOD.to_string(),
            Value::from(planet.orbital_period_days),
        );
        fields.insert(FIELD_RADIUS.to_string(), Value::from(planet.radius_earth));
        fields.insert(
            FIELD_DISCOVERY_YEAR.to_string(),
            Value::from(planet.discovery_year),
        );
        Self(fields)
    }
}

/// Presence rule for archive values
///
/// A value is present only if it is truthy: not null, not zero, not false,
/// not an empty string, array or object. A radius or period of exactly zero
/// counts as missing.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

/// A planet with both plotting fields present
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetRecord {
    pub name: String,
    pub orbital_period_days: f64,
    pub radius_earth: f64,
    pub discovery_year: Option<i64>,
}

impl PlanetRecord {
    /// `None` unless orbital period and radius are both present numbers
    pub fn from_raw(raw: &RawRecord) -> Option<Self> {
        let orbital_period_days = raw.present_number(FIELD_ORBITAL_PERIOD)?;
        let radius_earth = raw.present_number(FIELD_RADIUS)?;

        Some(Self {
            name: raw.name().to_string(),
            orbital_period_days,
            radius_earth,
            discovery_year: raw.get(FIELD_DISCOVERY_YEAR).and_then(whole_number),
        })
    }

    pub fn class(&self) -> PlanetClass {
        PlanetClass::from_radius(self.radius_earth)
    }
}

// The archive sometimes serializes integer columns as 2010.0
fn whole_number(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite() && f.fract() == 0.0)
            .map(|f| f as i64)
    })
}

/// Rough size class by radius in Earth radii
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlanetClass {
    /// Below 1.5 R⊕
    EarthLike,
    /// 1.5 to 3 R⊕ inclusive
    SuperEarth,
    /// Above 3 R⊕
    GasGiant,
}

impl PlanetClass {
    pub fn from_radius(radius_earth: f64) -> Self {
        if radius_earth < 1.5 {
            PlanetClass::EarthLike
        } else if radius_earth <= 3.0 {
            PlanetClass::SuperEarth
        } else {
            PlanetClass::GasGiant
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlanetClass::EarthLike => "Earth-like",
            PlanetClass::SuperEarth => "Super-Earth",
            PlanetClass::GasGiant => "Gas giant",
        }
    }
}

impl std::fmt::Display for PlanetClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
