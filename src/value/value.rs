//! Core value types and get-or-absent accessors.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_yaml::value::{Tag, TaggedValue};

/// Value represents one node of a parsed YAML document.
///
/// Lookups never fail loudly: every accessor returns `None` when the node has
/// the wrong shape or the key is absent, so callers decide whether absence is
/// an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    /// Integers above `i64::MAX`.
    UInt(u64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(Map),
    Tagged(Box<Tagged>),
}

/// Tagged is a node carrying an explicit YAML tag such as `!custom`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tagged {
    pub tag: Tag,
    pub value: Value,
}

/// Map is a mapping that keeps the key order of its source.
///
/// Keys are addressed as strings. Keys that were not strings in the source
/// (`80: http`, `true: x`) are looked up by their plain text and written back
/// in their original form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Map {
    pub fields: IndexMap<String, Value>,
    original_keys: HashMap<String, serde_yaml::Value>,
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&Vec<Value>> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut Map> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the value stored under `key` if this is a map holding it.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map()?.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.as_map_mut()?.get_mut(key)
    }

    /// Follows `keys` through nested maps.
    pub fn lookup<'a>(&self, keys: impl IntoIterator<Item = &'a str>) -> Option<&Value> {
        keys.into_iter().try_fold(self, |node, key| node.get(key))
    }

    pub fn lookup_mut<'a>(
        &mut self,
        keys: impl IntoIterator<Item = &'a str>,
    ) -> Option<&mut Value> {
        keys.into_iter().try_fold(self, |node, key| node.get_mut(key))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Map> for Value {
    fn from(m: Map) -> Self {
        Value::Map(m)
    }
}

impl From<serde_yaml::Number> for Value {
    fn from(n: serde_yaml::Number) -> Self {
        if let Some(i) = n.as_i64() {
            Value::Int(i)
        } else if let Some(u) = n.as_u64() {
            Value::UInt(u)
        } else {
            Value::Float(n.as_f64().unwrap_or(f64::NAN))
        }
    }
}

impl From<serde_yaml::Value> for Value {
    fn from(v: serde_yaml::Value) -> Self {
        match v {
            serde_yaml::Value::Null => Value::Null,
            serde_yaml::Value::Bool(b) => Value::Bool(b),
            serde_yaml::Value::Number(n) => n.into(),
            serde_yaml::Value::String(s) => Value::String(s),
            serde_yaml::Value::Sequence(seq) => {
                Value::List(seq.into_iter().map(Value::from).collect())
            }
            serde_yaml::Value::Mapping(m) => Value::Map(m.into()),
            serde_yaml::Value::Tagged(t) => Value::Tagged(Box::new(Tagged {
                tag: t.tag,
                value: t.value.into(),
            })),
        }
    }
}

impl From<&Value> for serde_yaml::Value {
    fn from(v: &Value) -> Self {
        match v {
            Value::Null => serde_yaml::Value::Null,
            Value::Bool(b) => serde_yaml::Value::Bool(*b),
            Value::Int(i) => serde_yaml::Value::Number((*i).into()),
            Value::UInt(u) => serde_yaml::Value::Number((*u).into()),
            Value::Float(f) => serde_yaml::Value::Number((*f).into()),
            Value::String(s) => serde_yaml::Value::String(s.clone()),
            Value::List(l) => serde_yaml::Value::Sequence(l.iter().map(Into::into).collect()),
            Value::Map(m) => serde_yaml::Value::Mapping(m.into()),
            Value::Tagged(t) => serde_yaml::Value::Tagged(Box::new(TaggedValue {
                tag: t.tag.clone(),
                value: (&t.value).into(),
            })),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde_yaml::Value::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_yaml::Value::deserialize(deserializer).map(Value::from)
    }
}

/// Plain text used to address a non-string key.
fn key_text(key: &serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::Null => "null".to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

impl From<serde_yaml::Mapping> for Map {
    fn from(mapping: serde_yaml::Mapping) -> Self {
        let mut map = Map::new();
        for (key, value) in mapping {
            let text = match key {
                serde_yaml::Value::String(s) => s,
                other => {
                    let text = key_text(&other);
                    map.original_keys.insert(text.clone(), other);
                    text
                }
            };
            map.fields.insert(text, value.into());
        }
        map
    }
}

impl From<&Map> for serde_yaml::Mapping {
    fn from(map: &Map) -> Self {
        map.fields
            .iter()
            .map(|(k, v)| {
                let key = map
                    .original_keys
                    .get(k)
                    .cloned()
                    .unwrap_or_else(|| serde_yaml::Value::String(k.clone()));
                (key, v.into())
            })
            .collect()
    }
}

impl Map {
    pub fn new() -> Self {
        Map {
            fields: IndexMap::new(),
            original_keys: HashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.fields.get_mut(key)
    }

    /// Sets `key`, keeping its position if it already exists.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn has(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Removes `key`, keeping the order of the remaining keys.
    pub fn delete(&mut self, key: &str) -> Option<Value> {
        self.original_keys.remove(key);
        self.fields.shift_remove(key)
    }

    /// Runs `f` on the map stored under `key`. An absent or non-map value is
    /// replaced by an empty map first; the key keeps its position.
    pub fn update_map<R>(&mut self, key: &str, f: impl FnOnce(&mut Map) -> R) -> R {
        let slot = self.fields.entry(key.to_string()).or_default();
        let mut map = match std::mem::take(slot) {
            Value::Map(m) => m,
            _ => Map::new(),
        };
        let result = f(&mut map);
        *slot = Value::Map(map);
        result
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Map {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Map {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            original_keys: HashMap::new(),
        }
    }
}
