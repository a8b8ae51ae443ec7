//! Typed JSON locator and its read/write operations.

use std::fmt;

use gemini_normalizer_types::PathError;
use serde_json::{Map, Value};

/// One step of a [`JsonPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Object member
    Key(String),
    /// Array element
    Index(usize),
    /// One past the last array element; only meaningful for writes
    Append,
}

/// Ordered list of segments addressing a value inside a JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct JsonPath {
    segments: Vec<Segment>,
}

impl JsonPath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse `a.b.0.c` style paths. Numeric segments become indices, `-1` appends.
    pub fn parse(dotted: &str) -> Self {
        let segments = dotted
            .split('.')
            .filter(|s| !s.is_empty())
            .map(|s| {
                if s == "-1" {
                    Segment::Append
                } else if let Ok(i) = s.parse::<usize>() {
                    Segment::Index(i)
                } else {
                    Segment::Key(s.to_string())
                }
            })
            .collect();
        Self { segments }
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.segments.push(Segment::Key(key.into()));
        self
    }

    pub fn index(mut self, index: usize) -> Self {
        self.segments.push(Segment::Index(index));
        self
    }

    pub fn append(mut self) -> Self {
        self.segments.push(Segment::Append);
        self
    }

    /// Child path with one more key segment, leaving `self` intact.
    pub fn join_key(&self, key: impl Into<String>) -> Self {
        self.clone().key(key)
    }

    pub fn join_index(&self, index: usize) -> Self {
        self.clone().index(index)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn get<'a>(&self, doc: &'a Value) -> Option<&'a Value> {
        self.segments.iter().try_fold(doc, |cur, seg| match (seg, cur) {
            (Segment::Key(k), Value::Object(map)) => map.get(k),
            (Segment::Index(i), Value::Array(arr)) => arr.get(*i),
            _ => None,
        })
    }

    pub fn get_mut<'a>(&self, doc: &'a mut Value) -> Option<&'a mut Value> {
        self.segments.iter().try_fold(doc, |cur, seg| match (seg, cur) {
            (Segment::Key(k), Value::Object(map)) => map.get_mut(k),
            (Segment::Index(i), Value::Array(arr)) => arr.get_mut(*i),
            _ => None,
        })
    }

    /// True when a value (including `null`) lives at this path.
    pub fn exists(&self, doc: &Value) -> bool {
        self.get(doc).is_some()
    }

    /// Length of the array at this path, `None` when absent or not an array.
    pub fn array_len(&self, doc: &Value) -> Option<usize> {
        self.get(doc).and_then(Value::as_array).map(Vec::len)
    }

    /// Write `value` at this path, creating missing (or `null`) intermediate
    /// containers. The document is left untouched when the write fails.
    pub fn set(&self, doc: &mut Value, value: Value) -> Result<(), PathError> {
        if self.segments.is_empty() {
            return Err(PathError::EmptyPath);
        }
        self.probe(doc)?;
        self.write(doc, value)
    }

    /// Remove the value at this path, keeping sibling order.
    pub fn remove(&self, doc: &mut Value) -> Option<Value> {
        let (last, parent) = self.segments.split_last()?;
        let parent = Self { segments: parent.to_vec() }.get_mut(doc)?;
        match (last, parent) {
            (Segment::Key(k), Value::Object(map)) => map.shift_remove(k),
            (Segment::Index(i), Value::Array(arr)) if *i < arr.len() => Some(arr.remove(*i)),
            _ => None,
        }
    }

    /// Move the value at `from` to `to`, overwriting whatever `to` held.
    ///
    /// Returns `Ok(false)` when `from` is absent. On error nothing is changed.
    pub fn rename(doc: &mut Value, from: &JsonPath, to: &JsonPath) -> Result<bool, PathError> {
        let Some(value) = from.get(doc).cloned() else {
            return Ok(false);
        };
        to.set(doc, value)?;
        from.remove(doc);
        Ok(true)
    }

    fn prefix(&self, len: usize) -> String {
        Self { segments: self.segments[..len].to_vec() }.to_string()
    }

    /// Check every segment against the document without mutating it.
    fn probe(&self, doc: &Value) -> Result<(), PathError> {
        let mut cur = Some(doc);
        for (pos, seg) in self.segments.iter().enumerate() {
            let at = || self.prefix(pos + 1);
            cur = match (seg, cur) {
                // Missing or null slots get a fresh container, which can only
                // take a key, index 0 or an append.
                (Segment::Index(i), None | Some(Value::Null)) if *i > 0 => {
                    return Err(PathError::IndexOutOfBounds { path: at(), index: *i, len: 0 });
                }
                (_, None | Some(Value::Null)) => None,
                (Segment::Key(k), Some(Value::Object(map))) => map.get(k),
                (Segment::Key(_), Some(other)) => {
                    return Err(PathError::type_mismatch(at(), "object", kind(other)));
                }
                (Segment::Index(i), Some(Value::Array(arr))) => {
                    if *i > arr.len() {
                        return Err(PathError::IndexOutOfBounds {
                            path: at(),
                            index: *i,
                            len: arr.len(),
                        });
                    }
                    arr.get(*i)
                }
                (Segment::Append, Some(Value::Array(_))) => None,
                (Segment::Index(_) | Segment::Append, Some(other)) => {
                    return Err(PathError::type_mismatch(at(), "array", kind(other)));
                }
            };
        }
        Ok(())
    }

    fn write(&self, doc: &mut Value, value: Value) -> Result<(), PathError> {
        let Some((last, parents)) = self.segments.split_last() else {
            return Err(PathError::EmptyPath);
        };
        let mut cur = doc;
        for (pos, seg) in parents.iter().enumerate() {
            cur = self.slot(cur, seg, pos)?;
        }
        *self.slot(cur, last, parents.len())? = value;
        Ok(())
    }

    /// Mutable slot for `seg` inside `cur`, created as `null` if missing.
    fn slot<'a>(&self, cur: &'a mut Value, seg: &Segment, pos: usize) -> Result<&'a mut Value, PathError> {
        if cur.is_null() {
            *cur = match seg {
                Segment::Key(_) => Value::Object(Map::new()),
                Segment::Index(_) | Segment::Append => Value::Array(Vec::new()),
            };
        }
        let found = kind(cur);
        match (seg, cur) {
            (Segment::Key(k), Value::Object(map)) => Ok(map.entry(k.clone()).or_insert(Value::Null)),
            (Segment::Index(i), Value::Array(arr)) => {
                if *i == arr.len() {
                    arr.push(Value::Null);
                }
                let len = arr.len();
                arr.get_mut(*i).ok_or(PathError::IndexOutOfBounds {
                    path: self.prefix(pos + 1),
                    index: *i,
                    len,
                })
            }
            (Segment::Append, Value::Array(arr)) => {
                let end = arr.len();
                arr.push(Value::Null);
                arr.get_mut(end).ok_or(PathError::IndexOutOfBounds {
                    path: self.prefix(pos + 1),
                    index: end,
                    len: end,
                })
            }
            (Segment::Key(_), _) => Err(PathError::type_mismatch(self.prefix(pos + 1), "object", found)),
            (Segment::Index(_) | Segment::Append, _) => {
                Err(PathError::type_mismatch(self.prefix(pos + 1), "array", found))
            }
        }
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (pos, seg) in self.segments.iter().enumerate() {
            if pos > 0 {
                f.write_str(".")?;
            }
            match seg {
                Segment::Key(k) => f.write_str(k)?,
                Segment::Index(i) => write!(f, "{}", i)?,
                Segment::Append => f.write_str("-1")?,
            }
        }
        Ok(())
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
