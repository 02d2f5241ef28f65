// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ApiError, CreateOfferPayload, ErrorBody, OfferFilters, PaginationMeta, ProductFilters,
    SellingOffer,
};
use nml_offers::DraftStore;
use nml_offers_domain::{
    DomainError, NewLineItem, OfferStatus, OutletId, PinState, SubmittedOffer,
};

use super::helpers::create_test_selling_offer;

#[test]
fn test_selling_offer_maps_to_domain_offer() {
    let wire: SellingOffer = create_test_selling_offer(9, "بنده", OfferStatus::Accepted);

    let offer: SubmittedOffer = wire.to_submitted_offer();

    assert_eq!(offer.id.value(), 9);
    assert_eq!(offer.outlet.name, "بنده");
    assert_eq!(offer.outlet.location, "حي الروضة, شارع الأمير");
    assert_eq!(offer.outlet.neighborhood, "الروضة");
    assert_eq!(offer.outlet.id, Some(OutletId::new(9)));
    assert_eq!(offer.items.len(), 2);
    assert_eq!(offer.items[0].product_id, Some(1));
    assert_eq!(offer.total_price, 405.0);
    assert_eq!(offer.total_quantity, 15);
    assert_eq!(offer.pin_state(), PinState::Accepted);
}

#[test]
fn test_branch_without_name_falls_back_to_address() {
    let mut wire: SellingOffer = create_test_selling_offer(1, "x", OfferStatus::Pending);
    wire.outlet_branch.name = None;
    wire.outlet_branch.address_line2 = None;

    let offer: SubmittedOffer = wire.to_submitted_offer();

    assert_eq!(offer.outlet.name, "حي الروضة");
    assert_eq!(offer.outlet.location, "حي الروضة");
}

#[test]
fn test_selling_offer_decodes_backend_json() {
    let json: &str = r#"{
        "id": 12,
        "supplier_id": 3,
        "outlet_branch_id": 4,
        "outlet_branch": {
            "id": 4, "outlet_id": 2, "address_line1": "Olaya St",
            "city": {"id": 1, "name": "Riyadh"},
            "district": {"id": 5, "name": "Olaya"},
            "latitude": 24.69, "longitude": 46.68
        },
        "status": "processing",
        "total_amount": 120.5,
        "products_count": 1,
        "notes": null,
        "is_expired": false,
        "created_at": "2026-02-01T10:00:00.000000Z",
        "updated_at": "2026-02-01T10:00:00.000000Z",
        "products": [{
            "id": 1, "product_id": 8, "quantity": 5, "unit_price": 24.1,
            "total_price": 120.5,
            "product": {"id": 8, "sku": 1001, "name": "Croissant"}
        }]
    }"#;

    let wire: SellingOffer = serde_json::from_str(json).unwrap();

    assert_eq!(wire.status, OfferStatus::Pending);
    assert_eq!(wire.products.as_ref().unwrap()[0].product.sku.to_string(), "1001");
    assert_eq!(wire.to_submitted_offer().outlet.name, "Olaya St");
}

#[test]
fn test_offer_filters_geo_all_or_nothing() {
    let partial: OfferFilters = OfferFilters {
        latitude: Some(24.7),
        longitude: Some(46.6),
        ..OfferFilters::default()
    };
    assert!(matches!(
        partial.query_pairs(),
        Err(ApiError::InvalidInput { .. })
    ));

    let full: OfferFilters = OfferFilters::default()
        .with_status(OfferStatus::Pending)
        .near(24.7, 46.6, 5.0);
    let pairs = full.query_pairs().unwrap();
    let keys: Vec<&str> = pairs.iter().map(|(key, _)| *key).collect();
    assert_eq!(keys, vec!["status", "latitude", "longitude", "radius"]);
    assert_eq!(pairs[0].1, "pending");
}

#[test]
fn test_offer_filters_reject_non_positive_radius() {
    let filters: OfferFilters = OfferFilters::default().near(24.7, 46.6, 0.0);
    assert!(filters.query_pairs().is_err());
}

#[test]
fn test_product_filters_defaults_and_cap() {
    let defaults: Vec<(&str, String)> = ProductFilters::default().query_pairs();
    assert_eq!(
        defaults,
        vec![("page", String::from("1")), ("per_page", String::from("20"))]
    );

    let capped: Vec<(&str, String)> = ProductFilters::default()
        .page(3)
        .per_page(500)
        .search("كيك")
        .active(true)
        .query_pairs();
    assert_eq!(
        capped,
        vec![
            ("page", String::from("3")),
            ("per_page", String::from("100")),
            ("search", String::from("كيك")),
            ("is_active", String::from("1")),
        ]
    );
}

#[test]
fn test_pagination_next_page() {
    let meta: PaginationMeta = PaginationMeta {
        current_page: 2,
        last_page: 3,
        per_page: 20,
        total: 45,
    };
    assert_eq!(meta.next_page(), Some(3));

    let last: PaginationMeta = PaginationMeta {
        current_page: 3,
        ..meta
    };
    assert_eq!(last.next_page(), None);
}

#[test]
fn test_create_payload_requires_complete_lines() {
    let mut draft: DraftStore = DraftStore::new();
    draft.add_item(NewLineItem::new("كيك", "🍰").product_id(1).price(25.5).quantity(10));
    draft.add_item(NewLineItem::new("دونات", "🍩").product_id(2).quantity(4));

    let result = CreateOfferPayload::from_items(OutletId::new(4), draft.items(), None, None);

    assert_eq!(
        result,
        Err(DomainError::IncompleteLineItem {
            name: String::from("دونات"),
            field: "price",
        })
    );
}

#[test]
fn test_create_payload_serializes_without_empty_optionals() {
    let mut draft: DraftStore = DraftStore::new();
    draft.add_item(NewLineItem::new("كيك", "🍰").product_id(1).price(25.5).quantity(10));

    let payload: CreateOfferPayload =
        CreateOfferPayload::from_items(OutletId::new(4), draft.items(), None, None).unwrap();
    let json: serde_json::Value = serde_json::to_value(&payload).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "outlet_branch_id": 4,
            "products": [{"product_id": 1, "quantity": 10, "unit_price": 25.5}]
        })
    );
}

#[test]
fn test_error_body_collects_field_errors() {
    let body: ErrorBody = ErrorBody::new("The given data was invalid.")
        .with_field_error("products", "The products field is required.")
        .with_field_error("products", "At least one product.");

    let errors = body.errors.unwrap();
    assert_eq!(errors["products"].len(), 2);
    assert!(!body.success);
}
