// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::DraftStore;
use nml_offers_domain::{LineItemId, NewLineItem, Outlet};
use time::OffsetDateTime;
use time::macros::datetime;

pub fn create_test_now() -> OffsetDateTime {
    datetime!(2026-03-01 09:30 UTC)
}

pub fn create_test_outlet() -> Outlet {
    Outlet::new("بنده", "حي الروضة، شارع الأمير", "الروضة")
}

/// The two-cake draft: 25.5 × 10 and 30 × 5.
pub fn create_cake_draft() -> (DraftStore, LineItemId, LineItemId) {
    let mut draft: DraftStore = DraftStore::new();
    let marble: LineItemId = draft.add_item(
        NewLineItem::new("كيك المربل", "🍰")
            .price(25.5)
            .quantity(10)
            .commission(2.0),
    );
    let cheesecake: LineItemId = draft.add_item(
        NewLineItem::new("تشيز كيك", "🎂")
            .price(30.0)
            .quantity(5)
            .commission(2.5),
    );
    (draft, marble, cheesecake)
}
