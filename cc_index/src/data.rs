//! Record and value types held by the component index.

use std::collections::HashMap;

use rand::{distributions::Alphanumeric, Rng};
use serde::{Serialize, Deserialize};

/// Element symbol (upper-case) to atom count. An absent element means a
/// count of zero; a zero count is never stored as an entry.
pub type ElementCounts = HashMap<String, u32>;

/// A single attribute value: free text or a number.
///
/// Equality is type-sensitive. A numeric value never compares equal to its
/// string rendering, so numeric search targets must be passed as numbers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
}

impl Scalar {
    /// Natural string form used by substring and similarity comparisons.
    pub fn as_string(&self) -> String {
        match self {
            Scalar::Text(s) => s.clone(),
            Scalar::Number(n) => format!("{}", n),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) => Some(*n),
            Scalar::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Scalar {
        Scalar::Text(s.to_string())
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Scalar {
        Scalar::Number(n)
    }
}

/// Attribute values are either a single scalar or a sequence of scalars
/// (e.g. multiple synonyms). On the wire a JSON array is a sequence and
/// anything else is a scalar.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum AttributeValue {
    Sequence(Vec<Scalar>),
    Scalar(Scalar),
}

impl AttributeValue {
    pub fn text(s: &str) -> AttributeValue {
        AttributeValue::Scalar(Scalar::Text(s.to_string()))
    }

    pub fn number(n: f64) -> AttributeValue {
        AttributeValue::Scalar(Scalar::Number(n))
    }

    pub fn sequence(items: Vec<&str>) -> AttributeValue {
        AttributeValue::Sequence(items.into_iter().map(Scalar::from).collect())
    }

    /// Numeric view of the value. Sequences have no numeric form.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Scalar(s) => s.as_f64(),
            AttributeValue::Sequence(_) => None,
        }
    }
}

/// One indexed component definition: a flat attribute map plus the derived
/// per-element atom count table.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct IndexRecord {
    #[serde(default)]
    pub attributes: HashMap<String, AttributeValue>,
    #[serde(rename = "typeCounts", default)]
    pub type_counts: ElementCounts,
}

impl IndexRecord {
    pub fn new() -> Self {
        Self {
            attributes: HashMap::new(),
            type_counts: HashMap::new(),
        }
    }

    pub fn set(&mut self, name: &str, value: AttributeValue) {
        self.attributes.insert(name.to_string(), value);
    }

    /// Randomized record for tests and query timing runs. The typeCounts
    /// table is kept consistent with the formula attribute.
    pub fn random() -> Self {
        let mut rng = rand::thread_rng();

        let name: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(12)
            .map(char::from)
            .collect();

        let c = rng.gen_range(1..30u32);
        let o = rng.gen_range(1..8u32);
        let n = rng.gen_range(0..6u32);

        let mut type_counts: ElementCounts = HashMap::new();
        type_counts.insert("C".to_string(), c);
        type_counts.insert("O".to_string(), o);
        if n > 0 {
            type_counts.insert("N".to_string(), n);
        }

        let formula = if n > 0 {
            format!("C{} N{} O{}", c, n, o)
        } else {
            format!("C{} O{}", c, o)
        };

        let weight = (c * 12 + n * 14 + o * 16) as f64;

        let mut record = Self::new();
        record.set("name", AttributeValue::text(&name));
        record.set("formula", AttributeValue::text(&formula));
        record.set("formulaWeight", AttributeValue::number(weight));
        record.type_counts = type_counts;

        record
    }

    /// Random three-letter component identifier, e.g. "QZX".
    pub fn random_id() -> String {
        let mut rng = rand::thread_rng();
        let mut id = String::new();

        for _ in 0..3 {
            let x: u8 = rng.gen_range(65..91);
            id.push(char::from(x));
        }

        id
    }
}
