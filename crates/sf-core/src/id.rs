//! Shape handles.
//!
//! A `ShapeId` is the shape's kind plus a serial number handed out by the
//! scene controller. It is `Copy` and carries no heap data, so spawning and
//! dropping shapes never leaves anything behind.

use crate::shape::ShapeKind;
use serde::{Serialize, Serializer};
use std::fmt;

/// Handle for a shape owned by the scene. Prints as `kind_N`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeId {
    kind: ShapeKind,
    serial: u64,
}

impl ShapeId {
    pub const fn new(kind: ShapeKind, serial: u64) -> Self {
        Self { kind, serial }
    }

    pub fn kind(self) -> ShapeKind {
        self.kind
    }

    pub fn serial(self) -> u64 {
        self.serial
    }
}

impl fmt::Debug for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{self}")
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.kind.name(), self.serial)
    }
}

impl Serialize for ShapeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn prints_kind_and_serial() {
        let id = ShapeId::new(ShapeKind::Triangle, 7);
        assert_eq!(id.to_string(), "triangle_7");
        assert_eq!(format!("{id:?}"), "#triangle_7");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"triangle_7\"");
    }

    #[test]
    fn serial_and_kind_both_distinguish() {
        let a = ShapeId::new(ShapeKind::Circle, 1);
        assert_ne!(a, ShapeId::new(ShapeKind::Circle, 2));
        assert_ne!(a, ShapeId::new(ShapeKind::Rectangle, 1));
        assert_eq!(a, ShapeId::new(ShapeKind::Circle, 1));
    }
}
