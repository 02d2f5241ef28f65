// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use nml_offers_domain::{
    LineItemId, LineItemUpdate, NewLineItem, OutletId, ProductLineItem, Totals, compute_totals,
};

/// Result of an edit that tolerates a missing target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The item was changed.
    Updated,
    /// The item exists but the edit had no effect.
    Unchanged,
    /// No item carries the given id; nothing happened.
    NotFound,
}

/// Working set of products for an offer that has not been submitted yet.
///
/// Line items keep insertion order. Totals are always recomputed from the
/// items and never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftStore {
    items: Vec<ProductLineItem>,
    outlet: Option<OutletId>,
    next_id: u64,
}

impl DraftStore {
    /// Creates an empty draft.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            outlet: None,
            next_id: 1,
        }
    }

    /// Appends a bare product and returns its id.
    pub fn add_product(&mut self, name: &str, icon: &str) -> LineItemId {
        self.add_item(NewLineItem::new(name, icon))
    }

    /// Appends a product with caller-supplied defaults and returns its id.
    ///
    /// Defaults that fail validation are left unset.
    pub fn add_item(&mut self, new: NewLineItem) -> LineItemId {
        let id: LineItemId = LineItemId::new(self.next_id);
        self.next_id += 1;
        self.items.push(ProductLineItem::from_new(id, new));
        id
    }

    /// Merges `update` into the item with the given id.
    ///
    /// # Returns
    ///
    /// * `Ok(UpdateOutcome::Updated)` if the item was found and changed
    /// * `Ok(UpdateOutcome::NotFound)` if no item has this id
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the item untouched, if any supplied field
    /// is invalid (for example a quantity below 1).
    pub fn update_product(
        &mut self,
        id: LineItemId,
        update: &LineItemUpdate,
    ) -> Result<UpdateOutcome, CoreError> {
        let Some(item) = self.item_mut(id) else {
            return Ok(UpdateOutcome::NotFound);
        };
        item.apply_update(update)?;
        Ok(UpdateOutcome::Updated)
    }

    /// Stepper "+" action. An unset quantity becomes 1.
    pub fn increment_quantity(&mut self, id: LineItemId) -> UpdateOutcome {
        let Some(item) = self.item_mut(id) else {
            return UpdateOutcome::NotFound;
        };
        match item.quantity {
            None => item.quantity = Some(1),
            Some(u32::MAX) => return UpdateOutcome::Unchanged,
            Some(quantity) => item.quantity = Some(quantity + 1),
        }
        UpdateOutcome::Updated
    }

    /// Stepper "-" action. Quantity never drops below 1.
    pub fn decrement_quantity(&mut self, id: LineItemId) -> UpdateOutcome {
        let Some(item) = self.item_mut(id) else {
            return UpdateOutcome::NotFound;
        };
        match item.quantity {
            Some(quantity) if quantity > 1 => {
                item.quantity = Some(quantity - 1);
                UpdateOutcome::Updated
            }
            _ => UpdateOutcome::Unchanged,
        }
    }

    /// Deletes the item with the given id. Returns false if it was absent.
    pub fn remove_product(&mut self, id: LineItemId) -> bool {
        let before: usize = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Empties the draft and forgets the outlet.
    ///
    /// Ids are not reset, so an id handed out before the clear can never
    /// match an item added after it.
    pub fn clear(&mut self) {
        self.items.clear();
        self.outlet = None;
    }

    pub const fn set_outlet(&mut self, outlet: OutletId) {
        self.outlet = Some(outlet);
    }

    #[must_use]
    pub const fn outlet(&self) -> Option<OutletId> {
        self.outlet
    }

    #[must_use]
    pub fn items(&self) -> &[ProductLineItem] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, id: LineItemId) -> Option<&ProductLineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Aggregates over the current items.
    #[must_use]
    pub fn totals(&self) -> Totals {
        compute_totals(&self.items)
    }

    fn item_mut(&mut self, id: LineItemId) -> Option<&mut ProductLineItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }
}

impl Default for DraftStore {
    fn default() -> Self {
        Self::new()
    }
}
