//! Document model and the YAML ingestion boundary.
//!
//! Merged configuration is held as `serde_json::Value`: `Object` is the
//! mapping case, `Array` the sequence case, everything else a scalar. YAML
//! text is converted here so the merge engine only ever sees values it can
//! address; anything it cannot (non-string mapping keys, tagged values) is
//! rejected at this boundary instead of guessed at during a merge.

use std::fmt;

use serde_json::Value;

use crate::error::ResolveError;

/// Nested mapping/sequence/scalar structure representing one configuration
/// source or a merged result.
pub type Document = Value;

/// One segment of a document path: a mapping key or a sequence index.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Ordered key/index sequence addressing a location within a document.
///
/// Two paths are equal iff their segment sequences are equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Path(Vec<PathSegment>);

impl Path {
    /// The root path (empty segment sequence).
    pub fn root() -> Self {
        Path(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// This path extended with a mapping key.
    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Key(key.into()));
        Path(segments)
    }

    /// This path extended with a sequence index.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        Path(segments)
    }
}

impl From<Vec<PathSegment>> for Path {
    fn from(segments: Vec<PathSegment>) -> Self {
        Path(segments)
    }
}

impl fmt::Display for Path {
    /// Dotted rendering: `services.web.ports[1]`. The root renders as `(root)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "(root)");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(key) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", key)?;
                }
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

/// Parse YAML text into a document.
///
/// Empty input parses as `Value::Null`.
pub fn from_yaml_str(text: &str) -> Result<Document, ResolveError> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(text)?;
    let mut path = Vec::new();
    yaml_to_json(&yaml, &mut path)
}

/// Serialize a document to YAML text.
pub fn to_yaml_string(document: &Document) -> Result<String, ResolveError> {
    Ok(serde_yaml::to_string(document)?)
}

fn yaml_to_json(yaml: &serde_yaml::Value, path: &mut Vec<PathSegment>) -> Result<Value, ResolveError> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => Ok(number_to_json(n)),
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                path.push(PathSegment::Index(i));
                out.push(yaml_to_json(item, path)?);
                path.pop();
            }
            Ok(Value::Array(out))
        }
        serde_yaml::Value::Mapping(map) => {
            let mut out = serde_json::Map::with_capacity(map.len());
            for (key, value) in map {
                let key = match key {
                    serde_yaml::Value::String(s) => s.clone(),
                    other => {
                        return Err(ResolveError::UnsupportedValue {
                            path: Path::from(path.clone()).to_string(),
                            reason: format!("mapping keys must be strings, got {}", yaml_kind(other)),
                        })
                    }
                };
                path.push(PathSegment::Key(key.clone()));
                let value = yaml_to_json(value, path)?;
                path.pop();
                out.insert(key, value);
            }
            Ok(Value::Object(out))
        }
        serde_yaml::Value::Tagged(tagged) => Err(ResolveError::UnsupportedValue {
            path: Path::from(path.clone()).to_string(),
            reason: format!("tagged value '{}'", tagged.tag),
        }),
    }
}

fn number_to_json(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Number(i.into())
    } else if let Some(u) = n.as_u64() {
        Value::Number(u.into())
    } else {
        n.as_f64()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "a boolean",
        serde_yaml::Value::Number(_) => "a number",
        serde_yaml::Value::String(_) => "a string",
        serde_yaml::Value::Sequence(_) => "a sequence",
        serde_yaml::Value::Mapping(_) => "a mapping",
        serde_yaml::Value::Tagged(_) => "a tagged value",
    }
}
