// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ApiError, ApiResult, CreateOfferPayload, NamedRef, OfferFilters, OffersBackend,
    OfferProductSummary, OutletBranch, SellingOffer, SellingOfferProduct, Sku,
};
use axum::Router;
use nml_offers_domain::OfferStatus;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::Mutex;
use time::macros::datetime;
use tokio::sync::oneshot;

pub fn create_test_branch(id: i64, name: &str) -> OutletBranch {
    OutletBranch {
        id,
        outlet_id: 100 + id,
        name: Some(name.to_string()),
        address_line1: String::from("حي الروضة"),
        address_line2: Some(String::from("شارع الأمير")),
        city: NamedRef::new(1, "جدة"),
        district: NamedRef::new(7, "الروضة"),
        latitude: 21.5433,
        longitude: 39.1728,
        is_active: Some(true),
        branch_type: None,
    }
}

pub fn create_test_offer_product(
    id: i64,
    product_id: i64,
    quantity: u32,
    unit_price: f64,
) -> SellingOfferProduct {
    SellingOfferProduct {
        id,
        product_id,
        quantity,
        unit_price,
        total_price: f64::from(quantity) * unit_price,
        product: OfferProductSummary {
            id: product_id,
            sku: Sku::Text(format!("SKU-{product_id}")),
            name: format!("منتج {product_id}"),
            image_url: None,
        },
    }
}

pub fn create_test_selling_offer(id: i64, branch_name: &str, status: OfferStatus) -> SellingOffer {
    let products: Vec<SellingOfferProduct> = vec![
        create_test_offer_product(id * 10, 1, 10, 25.5),
        create_test_offer_product(id * 10 + 1, 2, 5, 30.0),
    ];
    SellingOffer {
        id,
        supplier_id: 3,
        outlet_branch_id: id,
        outlet_branch: create_test_branch(id, branch_name),
        status,
        total_amount: 405.0,
        products_count: 2,
        notes: None,
        valid_until: None,
        is_expired: false,
        created_at: datetime!(2026-02-01 10:00 UTC),
        updated_at: datetime!(2026-02-01 10:00 UTC),
        products: Some(products),
    }
}

/// One canned response, optionally held back until `gate` fires.
pub struct ScriptedFetch {
    pub gate: Option<oneshot::Receiver<()>>,
    pub result: ApiResult<Vec<SellingOffer>>,
}

/// Backend that replays scripted responses in order.
#[derive(Default)]
pub struct ScriptedBackend {
    fetches: Mutex<VecDeque<ScriptedFetch>>,
    creates: Mutex<VecDeque<ApiResult<SellingOffer>>>,
    pub payloads: Mutex<Vec<CreateOfferPayload>>,
}

impl ScriptedBackend {
    pub fn push_fetch(&self, result: ApiResult<Vec<SellingOffer>>) {
        self.fetches
            .lock()
            .unwrap()
            .push_back(ScriptedFetch { gate: None, result });
    }

    /// Queues a response that is only delivered once the returned sender fires.
    pub fn push_gated_fetch(&self, result: ApiResult<Vec<SellingOffer>>) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.fetches.lock().unwrap().push_back(ScriptedFetch {
            gate: Some(rx),
            result,
        });
        tx
    }

    pub fn push_create(&self, result: ApiResult<SellingOffer>) {
        self.creates.lock().unwrap().push_back(result);
    }
}

impl OffersBackend for ScriptedBackend {
    fn fetch_offers(
        &self,
        _filters: &OfferFilters,
    ) -> impl Future<Output = ApiResult<Vec<SellingOffer>>> + Send {
        let next: Option<ScriptedFetch> = self.fetches.lock().unwrap().pop_front();
        async move {
            let scripted: ScriptedFetch = next.expect("no scripted fetch left");
            if let Some(gate) = scripted.gate {
                gate.await.unwrap();
            }
            scripted.result
        }
    }

    fn create_offer(
        &self,
        payload: &CreateOfferPayload,
    ) -> impl Future<Output = ApiResult<SellingOffer>> + Send {
        self.payloads.lock().unwrap().push(payload.clone());
        let next: Option<ApiResult<SellingOffer>> = self.creates.lock().unwrap().pop_front();
        async move { next.expect("no scripted create left") }
    }
}

pub fn network_error() -> ApiError {
    ApiError::Network {
        message: String::from("connection refused"),
    }
}

/// Serves `router` on an ephemeral localhost port and returns its base URL.
pub async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}
