use std::{collections::HashMap, fmt, rc::Rc};

use ordered_float::OrderedFloat;

use crate::{
    ast::Position,
    error::InterpreterError,
    interpreter::{
        evaluator::core::EvalResult,
        value::core::{Value, fmt_float},
    },
};

/// A hashable map key.
///
/// Only `null`, numbers and strings may be used as keys. Floats with an
/// integral value are stored as `Int`, so `m[1]` and `m[1.0]` name the same
/// entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MapKey {
    /// `null`
    Null,
    /// An integer, or an integral float.
    Int(i64),
    /// A float with a fractional part, or a non-finite float.
    Float(OrderedFloat<f64>),
    /// A string.
    Str(Rc<str>),
}

impl MapKey {
    /// Converts a value into a key.
    ///
    /// # Errors
    /// `MemberAccess` if the value is not `null`, a number or a string.
    ///
    /// # Example
    /// ```
    /// use toylang::{
    ///     ast::Position,
    ///     interpreter::value::{core::Value, map_value::MapKey},
    /// };
    ///
    /// let pos = Position::new(1, 1);
    ///
    /// assert_eq!(MapKey::from_value(&Value::Float(2.0), pos).unwrap(), MapKey::Int(2));
    /// assert!(MapKey::from_value(&Value::from(Vec::new()), pos).is_err());
    /// ```
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn from_value(value: &Value, pos: Position) -> EvalResult<Self> {
        match value {
            Value::Null => Ok(Self::Null),
            Value::Int(n) => Ok(Self::Int(*n)),
            Value::Float(r) => {
                if r.fract() == 0.0 && *r >= i64::MIN as f64 && *r < i64::MAX as f64 {
                    Ok(Self::Int(*r as i64))
                } else {
                    Ok(Self::Float(OrderedFloat(*r)))
                }
            },
            Value::Str(s) => Ok(Self::Str(Rc::clone(s))),
            _ => Err(InterpreterError::MemberAccess { details: format!("`{}` cannot be used as a map key",
                                                                       value.type_name()),
                                                      pos }),
        }
    }

    /// Converts the key back into a value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Int(n) => Value::Int(*n),
            Self::Float(r) => Value::Float(r.into_inner()),
            Self::Str(s) => Value::Str(Rc::clone(s)),
        }
    }
}

impl fmt::Display for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(r) => fmt_float(f, r.into_inner()),
            Self::Str(s) => write!(f, "{s:?}"),
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    /// Insertion sequence number; orders iteration.
    seq:   u64,
    value: Value,
}

/// An insertion-ordered map from [`MapKey`] to [`Value`].
///
/// The ordered key list is materialized on first use and cached; any write
/// that changes the key set drops the cache so it is rebuilt lazily.
/// Overwriting an existing key keeps its position.
#[derive(Debug, Clone, Default)]
pub struct MapValue {
    entries:   HashMap<MapKey, Entry>,
    next_seq:  u64,
    key_cache: Option<Rc<[MapKey]>>,
}

impl MapValue {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &MapKey) -> Option<&Value> {
        self.entries.get(key).map(|entry| &entry.value)
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &MapKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Stores `value` under `key`, appending the key if it is new.
    pub fn insert(&mut self, key: MapKey, value: Value) {
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.value = value;
            return;
        }
        self.entries.insert(key,
                            Entry { seq: self.next_seq,
                                    value });
        self.next_seq += 1;
        self.key_cache = None;
    }

    /// Returns the keys in insertion order.
    ///
    /// The returned list is a snapshot: later inserts do not show up in it.
    pub fn keys(&mut self) -> Rc<[MapKey]> {
        if let Some(keys) = &self.key_cache {
            return Rc::clone(keys);
        }
        let keys: Rc<[MapKey]> = self.sorted_entries()
                                     .into_iter()
                                     .map(|(key, _)| key.clone())
                                     .collect();
        self.key_cache = Some(Rc::clone(&keys));
        keys
    }

    /// Iterates over the values in no particular order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.values().map(|entry| &entry.value)
    }

    /// Returns `true` if both maps hold the same keys with equal values.
    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        self.len() == other.len()
        && self.entries
               .iter()
               .all(|(key, entry)| other.get(key).is_some_and(|value| entry.value.equals(value)))
    }

    fn sorted_entries(&self) -> Vec<(&MapKey, &Value)> {
        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort_by_key(|(_, entry)| entry.seq);
        entries.into_iter()
               .map(|(key, entry)| (key, &entry.value))
               .collect()
    }
}

impl fmt::Display for MapValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (index, (key, value)) in self.sorted_entries().into_iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}: ")?;
            value.fmt_nested(f)?;
        }
        write!(f, "}}")
    }
}
