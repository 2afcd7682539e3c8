//! Composite generators for structured domain values.

mod cards;
mod profile;
mod queue;
mod text;

pub use cards::*;
pub use profile::*;
pub use queue::*;
pub use text::*;

use crate::{Gen, Range};

/// Keys in the collision-heavy pool are `1..=HOT_KEYS`.
pub const HOT_KEYS: i64 = 10;

/// One primitive value of any supported kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Bool(bool),
    Char(char),
    Int(i64),
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    Char,
    Int,
    Text,
}

impl ValueKind {
    pub const ALL: [ValueKind; 4] = [
        ValueKind::Bool,
        ValueKind::Char,
        ValueKind::Int,
        ValueKind::Text,
    ];
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::Char(_) => ValueKind::Char,
            Value::Int(_) => ValueKind::Int,
            Value::Text(_) => ValueKind::Text,
        }
    }
}

/// Keys from the hot pool or the whole `i64` domain, half the time each.
///
/// The hot pool keeps duplicate keys common in generated lists.
pub fn keys() -> Gen<i64> {
    hot_keys() | Gen::<i64>::any()
}

/// Keys from `1..=HOT_KEYS`, shrinking towards 1.
pub fn hot_keys() -> Gen<i64> {
    Gen::<i64>::from_range(Range::new(1, HOT_KEYS))
}

/// Values of a single kind.
pub fn value_of(kind: ValueKind) -> Gen<Value> {
    match kind {
        ValueKind::Bool => Gen::bool().map(Value::Bool),
        ValueKind::Char => Gen::<char>::unicode().map(Value::Char),
        ValueKind::Int => Gen::<i64>::any().map(Value::Int),
        ValueKind::Text => Gen::<String>::unicode().map(Value::Text),
    }
}

/// One value per sample, each kind equally likely; shrinks towards
/// `Bool(false)`.
pub fn vals() -> Gen<Value> {
    Gen::<usize>::from_range(Range::new(0, ValueKind::ALL.len() - 1))
        .bind(|index| value_of(ValueKind::ALL[index]))
}

/// Key/value lists for exercising map construction under key collisions.
pub fn kv_pairs() -> Gen<Vec<(i64, Value)>> {
    Gen::vec_of(keys().zip(vals()))
}

/// Byte strings over the full byte domain.
pub fn blobs() -> Gen<Vec<u8>> {
    Gen::vec_of(Gen::<u8>::from_range(Range::new(0, u8::MAX)))
}
