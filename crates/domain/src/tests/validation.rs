// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DomainError, LineItemId, NewLineItem, ProductLineItem, validate_commission, validate_price,
    validate_quantity, validate_submittable,
};

#[test]
fn test_quantity_must_be_at_least_one() {
    assert_eq!(validate_quantity(1), Ok(1));
    assert_eq!(validate_quantity(250), Ok(250));
    assert_eq!(
        validate_quantity(0),
        Err(DomainError::InvalidQuantity { quantity: 0 })
    );
    assert_eq!(
        validate_quantity(-3),
        Err(DomainError::InvalidQuantity { quantity: -3 })
    );
}

#[test]
fn test_quantity_must_fit_u32() {
    let too_big: i64 = i64::from(u32::MAX) + 1;
    assert!(validate_quantity(too_big).is_err());
}

#[test]
fn test_price_rejects_negative_and_non_finite() {
    assert_eq!(validate_price(0.0), Ok(0.0));
    assert_eq!(validate_price(25.5), Ok(25.5));
    assert!(validate_price(-0.01).is_err());
    assert!(validate_price(f64::NAN).is_err());
    assert!(validate_price(f64::INFINITY).is_err());
}

#[test]
fn test_commission_is_a_percentage() {
    assert_eq!(validate_commission(2.5), Ok(2.5));
    assert_eq!(validate_commission(100.0), Ok(100.0));
    assert!(validate_commission(100.5).is_err());
    assert!(validate_commission(-1.0).is_err());
}

#[test]
fn test_submittable_requires_product_id_quantity_and_price() {
    let complete: ProductLineItem = ProductLineItem::from_new(
        LineItemId::new(1),
        NewLineItem::new("كرواسون", "🥐")
            .product_id(7)
            .quantity(15)
            .price(12.0),
    );
    assert_eq!(validate_submittable(&complete), Ok((7, 15, 12.0)));

    let no_product: ProductLineItem = ProductLineItem::from_new(
        LineItemId::new(2),
        NewLineItem::new("دونات", "🍩").quantity(20).price(15.0),
    );
    assert_eq!(
        validate_submittable(&no_product),
        Err(DomainError::IncompleteLineItem {
            name: String::from("دونات"),
            field: "product id",
        })
    );

    let no_price: ProductLineItem = ProductLineItem::from_new(
        LineItemId::new(3),
        NewLineItem::new("دونات", "🍩").product_id(3).quantity(20),
    );
    assert_eq!(
        validate_submittable(&no_price),
        Err(DomainError::IncompleteLineItem {
            name: String::from("دونات"),
            field: "price",
        })
    );
}
