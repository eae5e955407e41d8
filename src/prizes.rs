//! Ordered prize records for one wheel configuration
//!
//! Loaded fresh on every wheel open; the core consumes an already-parsed
//! table and never touches the persisted file format itself.

use serde::{Deserialize, Serialize};

/// One prize-bearing slot; corresponds to exactly one arc of the wheel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrizeSlot {
    /// Display title, e.g. "100 coins"
    pub title: String,
    /// Reference to the slot's artwork, resolved by the presentation layer
    pub image: String,
    /// Numeric value of the prize (0 for non-currency prizes)
    pub amount: i64,
}

impl PrizeSlot {
    pub fn new(title: impl Into<String>, image: impl Into<String>, amount: i64) -> Self {
        Self {
            title: title.into(),
            image: image.into(),
            amount,
        }
    }
}

/// Immutable ordered list of prize slots; `slots[i]` pairs with slot arc `i`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrizeTable {
    slots: Vec<PrizeSlot>,
}

impl PrizeTable {
    pub fn new(slots: Vec<PrizeSlot>) -> Self {
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PrizeSlot> {
        self.slots.get(index)
    }

    pub fn slots(&self) -> &[PrizeSlot] {
        &self.slots
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PrizeSlot> {
        self.slots.iter()
    }
}
