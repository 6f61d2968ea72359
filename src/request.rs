use std::fmt;

use serde::Serialize;

/// Value type for a request keyword.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RequestValue {
    Str(String),
    Int(i64),
    StrList(Vec<String>),
    IntList(Vec<i64>),
    FloatList(Vec<f64>),
}

impl From<&str> for RequestValue {
    fn from(value: &str) -> Self {
        RequestValue::Str(value.to_string())
    }
}

impl From<String> for RequestValue {
    fn from(value: String) -> Self {
        RequestValue::Str(value)
    }
}

impl From<i64> for RequestValue {
    fn from(value: i64) -> Self {
        RequestValue::Int(value)
    }
}

impl From<i32> for RequestValue {
    fn from(value: i32) -> Self {
        RequestValue::Int(value as i64)
    }
}

impl From<Vec<String>> for RequestValue {
    fn from(value: Vec<String>) -> Self {
        RequestValue::StrList(value)
    }
}

impl From<Vec<&str>> for RequestValue {
    fn from(value: Vec<&str>) -> Self {
        RequestValue::StrList(value.into_iter().map(|s| s.to_string()).collect())
    }
}

impl From<Vec<i32>> for RequestValue {
    fn from(value: Vec<i32>) -> Self {
        RequestValue::IntList(value.into_iter().map(|x| x as i64).collect())
    }
}

impl From<Vec<u32>> for RequestValue {
    fn from(value: Vec<u32>) -> Self {
        RequestValue::IntList(value.into_iter().map(|x| x as i64).collect())
    }
}

impl From<Vec<f64>> for RequestValue {
    fn from(value: Vec<f64>) -> Self {
        RequestValue::FloatList(value)
    }
}

/// Dict-literal style, as printed by `--dryrun`: `'a'`, `1`, `['a', 'b']`.
impl fmt::Display for RequestValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestValue::Str(s) => write!(f, "'{s}'"),
            RequestValue::Int(i) => write!(f, "{i}"),
            RequestValue::StrList(xs) => write_list(f, xs.iter().map(|x| format!("'{x}'"))),
            RequestValue::IntList(xs) => write_list(f, xs.iter().map(|x| x.to_string())),
            RequestValue::FloatList(xs) => write_list(f, xs.iter().map(|x| format!("{x:?}"))),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: impl Iterator<Item = String>) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        f.write_str(&item)?;
    }
    f.write_str("]")
}

/// CDS request payload: keyword/value pairs kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Request {
    pub(crate) inner: Vec<(String, RequestValue)>,
}

impl Request {
    pub fn new() -> Self {
        Self { inner: Vec::new() }
    }

    /// Insert a keyword/value pair. An existing keyword keeps its position.
    pub fn kw(mut self, key: impl Into<String>, value: impl Into<RequestValue>) -> Self {
        self.set(key, value.into());
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: RequestValue) {
        let key = key.into();
        match self.inner.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.inner.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&RequestValue> {
        self.inner.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &RequestValue)> {
        self.inner.iter().map(|(k, v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Serialize for Request {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.inner.len()))?;
        for (k, v) in &self.inner {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.inner.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "'{k}': {v}")?;
        }
        f.write_str("}")
    }
}
