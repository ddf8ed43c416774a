// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Participant color assignment.
//!
//! WhatsApp renders each group participant's name in a distinct color. This
//! module reproduces that: a [`Palette`] is a fixed ordered list of colors,
//! and a [`ParticipantRegistry`] maps each sender name to a palette slot in
//! first-seen order. Slot assignment is a pure function of first-seen order;
//! when there are more participants than colors, slots wrap around and
//! colors repeat.
//!
//! The registry is a per-parse value, created by
//! [`parse_transcript`](crate::parser::parse_transcript) and carried inside
//! the resulting [`Transcript`](crate::parser::Transcript). It is never
//! shared between parses.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

/// Default sender-name colors, approximating the WhatsApp group chat UI.
pub const DEFAULT_COLORS: &[&str] = &[
    "#e542a3", "#1f7aec", "#26c4dc", "#07bc4c", "#dfb610", "#fa6533", "#8b7add", "#ff2e74",
];

/// A fixed, ordered list of colors available for participant assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<String>,
}

impl Palette {
    /// Creates a palette from an ordered list of CSS color values.
    ///
    /// An empty list would make slot arithmetic meaningless, so it falls
    /// back to the default palette.
    #[must_use]
    pub fn new(colors: Vec<String>) -> Self {
        if colors.is_empty() {
            Self::default()
        } else {
            Self { colors }
        }
    }

    /// Number of colors in the palette.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`: a palette is never empty (see [`Palette::new`]).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Returns the color for a slot, wrapping on out-of-range slots.
    #[must_use]
    pub fn color(&self, slot: usize) -> &str {
        &self.colors[slot % self.colors.len()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS.iter().map(|&c| c.to_owned()).collect(),
        }
    }
}

/// Per-parse mapping from sender name to assigned palette slot.
///
/// Names are case-sensitive and stored in first-seen order. The first
/// distinct sender gets slot 0, the next slot 1, and so on modulo the
/// palette size. Within one parse the same name always resolves to the
/// same slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantRegistry {
    palette: Palette,
    order: Vec<String>,
    slots: HashMap<String, usize>,
}

impl ParticipantRegistry {
    /// Creates an empty registry backed by the given palette.
    #[must_use]
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            order: Vec::new(),
            slots: HashMap::new(),
        }
    }

    /// Returns the slot for `name`, allocating the next one on first sight.
    pub fn assign(&mut self, name: &str) -> usize {
        if let Some(&slot) = self.slots.get(name) {
            return slot;
        }
        let slot = self.order.len() % self.palette.len();
        self.order.push(name.to_owned());
        self.slots.insert(name.to_owned(), slot);
        slot
    }

    /// Returns the slot previously assigned to `name`, if any.
    #[must_use]
    pub fn slot(&self, name: &str) -> Option<usize> {
        self.slots.get(name).copied()
    }

    /// Returns the palette color for `name`, if it has been assigned.
    #[must_use]
    pub fn color(&self, name: &str) -> Option<&str> {
        self.slot(name).map(|slot| self.palette.color(slot))
    }

    /// Participant names in first-seen order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Number of distinct participants seen so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if no participant has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The palette backing this registry.
    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }
}

impl Serialize for ParticipantRegistry {
    /// Serializes as a `name -> slot` map in first-seen order.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.order.len()))?;
        for name in &self.order {
            map.serialize_entry(name, &self.slots[name])?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_palette() -> Palette {
        Palette::new(vec!["#111111".into(), "#222222".into()])
    }

    #[test]
    fn assigns_slots_in_first_seen_order() {
        let mut registry = ParticipantRegistry::new(Palette::default());

        assert_eq!(registry.assign("Alice"), 0);
        assert_eq!(registry.assign("Bob"), 1);
        assert_eq!(registry.assign("Carol"), 2);

        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, ["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn repeated_assign_returns_same_slot() {
        let mut registry = ParticipantRegistry::new(Palette::default());

        let first = registry.assign("Alice");
        registry.assign("Bob");
        let again = registry.assign("Alice");

        assert_eq!(first, again);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn wraps_slots_when_participants_exceed_palette() {
        let mut registry = ParticipantRegistry::new(small_palette());

        assert_eq!(registry.assign("Alice"), 0);
        assert_eq!(registry.assign("Bob"), 1);
        assert_eq!(registry.assign("Carol"), 0);
        assert_eq!(registry.assign("Dave"), 1);
    }

    #[test]
    fn names_are_case_sensitive() {
        let mut registry = ParticipantRegistry::new(Palette::default());

        let lower = registry.assign("alice");
        let upper = registry.assign("Alice");

        assert_ne!(lower, upper);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn color_resolves_through_palette() {
        let mut registry = ParticipantRegistry::new(small_palette());
        registry.assign("Alice");
        registry.assign("Bob");
        registry.assign("Carol");

        assert_eq!(registry.color("Alice"), Some("#111111"));
        assert_eq!(registry.color("Bob"), Some("#222222"));
        assert_eq!(registry.color("Carol"), Some("#111111"));
        assert_eq!(registry.color("Nobody"), None);
    }

    #[test]
    fn empty_palette_falls_back_to_default() {
        let palette = Palette::new(Vec::new());
        assert_eq!(palette.len(), DEFAULT_COLORS.len());
        assert_eq!(palette.color(0), DEFAULT_COLORS[0]);
    }

    #[test]
    fn palette_color_wraps_out_of_range_slots() {
        let palette = small_palette();
        assert_eq!(palette.color(0), palette.color(2));
        assert_eq!(palette.color(1), palette.color(3));
    }

    #[test]
    fn serializes_as_ordered_name_to_slot_map() {
        let mut registry = ParticipantRegistry::new(Palette::default());
        registry.assign("Alice");
        registry.assign("Bob");

        let json = serde_json::to_string(&registry).unwrap();
        assert_eq!(json, r#"{"Alice":0,"Bob":1}"#);
    }
}
