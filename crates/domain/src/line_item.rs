// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Product line items and the totals derived from them.

use crate::error::DomainError;
use crate::types::LineItemId;
use crate::validation::{validate_commission, validate_price, validate_quantity};
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Quantity pre-filled by the add-product screen.
pub const DEFAULT_QUANTITY: u32 = 10;

/// Commission rate (percent) pre-filled by the add-product screen.
pub const DEFAULT_COMMISSION: f64 = 2.0;

/// One product entry within a draft or a submitted offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductLineItem {
    /// Identity within the owning draft.
    pub id: LineItemId,
    /// Display name. Duplicates are allowed.
    pub name: String,
    /// Emoji or image reference shown next to the name.
    pub icon: String,
    /// Catalog product this line refers to, required for backend submission.
    pub product_id: Option<i64>,
    /// Unit price, absent until priced.
    pub price: Option<f64>,
    /// Quantity, absent until set. Never below 1 when present.
    pub quantity: Option<u32>,
    /// Commission rate in percent.
    pub commission: Option<f64>,
}

impl ProductLineItem {
    /// Builds a line item from insertion input.
    ///
    /// Caller-supplied values that fail validation are left unset rather
    /// than stored.
    #[must_use]
    pub fn from_new(id: LineItemId, new: NewLineItem) -> Self {
        Self {
            id,
            name: new.name,
            icon: new.icon,
            product_id: new.product_id,
            price: new.price.and_then(|p| validate_price(p).ok()),
            quantity: new.quantity.and_then(|q| validate_quantity(q).ok()),
            commission: new.commission.and_then(|c| validate_commission(c).ok()),
        }
    }

    /// Price multiplied by quantity; zero when either is unset.
    #[must_use]
    pub fn line_total(&self) -> f64 {
        match (self.price, self.quantity) {
            (Some(price), Some(quantity)) => price * f64::from(quantity),
            _ => 0.0,
        }
    }

    /// Merges an update into this item.
    ///
    /// Every supplied field is validated before any is written, so a
    /// rejected update leaves the item exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns the first validation error among the supplied fields.
    pub fn apply_update(&mut self, update: &LineItemUpdate) -> Result<(), DomainError> {
        let quantity: Option<u32> = update.quantity.map(validate_quantity).transpose()?;
        let price: Option<f64> = update.price.map(validate_price).transpose()?;
        let commission: Option<f64> = update.commission.map(validate_commission).transpose()?;

        if let Some(quantity) = quantity {
            self.quantity = Some(quantity);
        }
        if let Some(price) = price {
            self.price = Some(price);
        }
        if let Some(commission) = commission {
            self.commission = Some(commission);
        }
        Ok(())
    }
}

/// Input for appending a line item to a draft.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewLineItem {
    /// Display name.
    pub name: String,
    /// Emoji or image reference.
    pub icon: String,
    /// Catalog product id.
    pub product_id: Option<i64>,
    /// Initial unit price.
    pub price: Option<f64>,
    /// Initial quantity, as entered.
    pub quantity: Option<i64>,
    /// Initial commission rate.
    pub commission: Option<f64>,
}

impl NewLineItem {
    /// A bare item with every optional field unset.
    #[must_use]
    pub fn new(name: &str, icon: &str) -> Self {
        Self {
            name: name.to_string(),
            icon: icon.to_string(),
            ..Self::default()
        }
    }

    /// An item pre-filled the way the add-product screen does.
    #[must_use]
    pub fn with_screen_defaults(name: &str, icon: &str) -> Self {
        Self::new(name, icon)
            .quantity(i64::from(DEFAULT_QUANTITY))
            .commission(DEFAULT_COMMISSION)
    }

    #[must_use]
    pub const fn product_id(mut self, product_id: i64) -> Self {
        self.product_id = Some(product_id);
        self
    }

    #[must_use]
    pub const fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    #[must_use]
    pub const fn quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    #[must_use]
    pub const fn commission(mut self, commission: f64) -> Self {
        self.commission = Some(commission);
        self
    }
}

/// A partial edit of a line item. Unset fields are left untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LineItemUpdate {
    /// New quantity, as entered.
    pub quantity: Option<i64>,
    /// New unit price.
    pub price: Option<f64>,
    /// New commission rate.
    pub commission: Option<f64>,
}

impl LineItemUpdate {
    #[must_use]
    pub const fn quantity(quantity: i64) -> Self {
        Self {
            quantity: Some(quantity),
            price: None,
            commission: None,
        }
    }

    #[must_use]
    pub const fn price(price: f64) -> Self {
        Self {
            quantity: None,
            price: Some(price),
            commission: None,
        }
    }

    #[must_use]
    pub const fn commission(commission: f64) -> Self {
        Self {
            quantity: None,
            price: None,
            commission: Some(commission),
        }
    }

    #[must_use]
    pub const fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    #[must_use]
    pub const fn with_commission(mut self, commission: f64) -> Self {
        self.commission = Some(commission);
        self
    }
}

/// Aggregates over a set of line items.
///
/// Always computed from the items, never stored alongside them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    /// Number of lines.
    pub item_count: usize,
    /// Sum of quantities, unset counted as zero.
    pub total_quantity: u64,
    /// Sum of price × quantity over all lines.
    pub total_price: f64,
    /// Arithmetic mean of commission rates; zero for an empty set.
    pub avg_commission: f64,
}

/// Computes the totals of a set of line items.
#[must_use]
pub fn compute_totals(items: &[ProductLineItem]) -> Totals {
    let item_count: usize = items.len();
    let total_quantity: u64 = items
        .iter()
        .map(|item| u64::from(item.quantity.unwrap_or(0)))
        .sum();
    let total_price: f64 = items.iter().map(ProductLineItem::line_total).sum();

    let avg_commission: f64 = if item_count == 0 {
        0.0
    } else {
        let commission_sum: f64 = items.iter().filter_map(|item| item.commission).sum();
        item_count
            .to_f64()
            .map_or(0.0, |count| commission_sum / count)
    };

    Totals {
        item_count,
        total_quantity,
        total_price,
        avg_commission,
    }
}
