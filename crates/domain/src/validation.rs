// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::line_item::ProductLineItem;

/// Validates a quantity entered for a line item.
///
/// # Arguments
///
/// * `quantity` - The raw quantity as entered
///
/// # Returns
///
/// * `Ok(u32)` with the accepted quantity
/// * `Err(DomainError::InvalidQuantity)` if the quantity is below 1 or too large
///
/// # Errors
///
/// Returns an error if the quantity is below 1 or does not fit in a `u32`.
pub fn validate_quantity(quantity: i64) -> Result<u32, DomainError> {
    if quantity < 1 {
        return Err(DomainError::InvalidQuantity { quantity });
    }
    u32::try_from(quantity).map_err(|_| DomainError::InvalidQuantity { quantity })
}

/// Validates a unit price.
///
/// # Errors
///
/// Returns an error if the price is negative, NaN or infinite.
pub fn validate_price(price: f64) -> Result<f64, DomainError> {
    if !price.is_finite() || price < 0.0 {
        return Err(DomainError::InvalidPrice { price });
    }
    Ok(price)
}

/// Validates a commission rate expressed in percent.
///
/// # Errors
///
/// Returns an error if the rate is outside `0..=100` or not finite.
pub fn validate_commission(commission: f64) -> Result<f64, DomainError> {
    if !commission.is_finite() || !(0.0..=100.0).contains(&commission) {
        return Err(DomainError::InvalidCommission { commission });
    }
    Ok(commission)
}

/// Validates that a line item carries everything the backend needs to
/// accept it as part of an offer.
///
/// # Returns
///
/// * `Ok((product_id, quantity, unit_price))` when the item is complete
///
/// # Errors
///
/// Returns `DomainError::IncompleteLineItem` naming the first missing field.
pub fn validate_submittable(item: &ProductLineItem) -> Result<(i64, u32, f64), DomainError> {
    let missing = |field: &'static str| DomainError::IncompleteLineItem {
        name: item.name.clone(),
        field,
    };

    let product_id: i64 = item.product_id.ok_or_else(|| missing("product id"))?;
    let quantity: u32 = item.quantity.ok_or_else(|| missing("quantity"))?;
    let price: f64 = item.price.ok_or_else(|| missing("price"))?;

    Ok((product_id, quantity, price))
}
