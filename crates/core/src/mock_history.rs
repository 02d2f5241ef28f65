// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Seed offers for running without a backend.

use nml_offers_domain::{
    LineItemId, NewLineItem, OfferId, OfferStatus, Outlet, ProductLineItem, SubmittedOffer,
    compute_totals,
};
use time::{Duration, OffsetDateTime};

struct SeedProduct {
    id: u64,
    name: &'static str,
    icon: &'static str,
    price: f64,
    quantity: i64,
    commission: f64,
}

struct SeedOffer {
    id: i64,
    outlet: (&'static str, &'static str, &'static str),
    products: &'static [SeedProduct],
    status: OfferStatus,
    age: Duration,
}

const fn product(
    id: u64,
    name: &'static str,
    icon: &'static str,
    price: f64,
    quantity: i64,
    commission: f64,
) -> SeedProduct {
    SeedProduct {
        id,
        name,
        icon,
        price,
        quantity,
        commission,
    }
}

// The legacy "accepted" pins showed three of five steps done, which is
// `with_courier`; "no_offers" pins are modeled as rejected offers.
const SEED: [SeedOffer; 5] = [
    SeedOffer {
        id: 1,
        outlet: ("بنده", "حي الروضة، شارع الأمير", "الروضة"),
        products: &[
            product(1, "كيك المربل", "🍰", 25.5, 10, 2.0),
            product(2, "تشيز كيك", "🎂", 30.0, 5, 2.5),
        ],
        status: OfferStatus::WithCourier,
        age: Duration::days(2),
    },
    SeedOffer {
        id: 2,
        outlet: ("العثيم", "حي النزهة، شارع التحلية", "النزهة"),
        products: &[
            product(3, "دونات", "🍩", 15.0, 20, 1.5),
            product(4, "كرواسون", "🥐", 12.0, 15, 2.0),
        ],
        status: OfferStatus::Pending,
        age: Duration::days(1),
    },
    SeedOffer {
        id: 3,
        outlet: ("الدانوب", "حي الصفا، شارع الكورنيش", "الصفا"),
        products: &[product(5, "بسكويت الشوكولاتة", "🍪", 18.5, 30, 2.0)],
        status: OfferStatus::Pending,
        age: Duration::hours(3),
    },
    SeedOffer {
        id: 4,
        outlet: ("بازار", "حي الزهراء، شارع الملك فهد", "الزهراء"),
        products: &[
            product(6, "كيك الفانيليا", "🧁", 22.0, 12, 1.8),
            product(7, "كيك المربل", "🍰", 25.5, 8, 2.0),
        ],
        status: OfferStatus::Rejected,
        age: Duration::days(5),
    },
    SeedOffer {
        id: 5,
        outlet: ("كارفور", "حي الحمراء، شارع الأمير سلطان", "الحمراء"),
        products: &[
            product(8, "تشيز كيك", "🎂", 30.0, 10, 2.5),
            product(9, "دونات", "🍩", 15.0, 25, 1.5),
            product(10, "كرواسون", "🥐", 12.0, 20, 2.0),
        ],
        status: OfferStatus::WithCourier,
        age: Duration::hours(12),
    },
];

/// The five sample offers, created relative to `now`, in display order.
#[must_use]
pub fn mock_offers(now: OffsetDateTime) -> Vec<SubmittedOffer> {
    SEED.iter()
        .map(|seed| {
            let items: Vec<ProductLineItem> = seed
                .products
                .iter()
                .map(|p| {
                    ProductLineItem::from_new(
                        LineItemId::new(p.id),
                        NewLineItem::new(p.name, p.icon)
                            .price(p.price)
                            .quantity(p.quantity)
                            .commission(p.commission),
                    )
                })
                .collect();
            let totals = compute_totals(&items);
            let (name, location, neighborhood) = seed.outlet;
            SubmittedOffer::new(
                OfferId::new(seed.id),
                Outlet::new(name, location, neighborhood),
                items,
                totals,
                seed.status,
                now - seed.age,
            )
        })
        .collect()
}
