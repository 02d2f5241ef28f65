// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Wire types of the supplier-app REST surface.
//!
//! These mirror the backend's JSON exactly and are shared with the mock
//! server. Conversion into domain records happens here and nowhere else.

use crate::error::{ApiError, ApiResult};
use nml_offers_domain::{
    DomainError, LineItemId, NewLineItem, OfferId, OfferStatus, Outlet, OutletId,
    ProductLineItem, SubmittedOffer, compute_totals, validate_submittable,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use time::OffsetDateTime;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Largest page size the client will request.
pub const MAX_PER_PAGE: u32 = 100;

/// Standard success envelope: `{ success, message, data }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    #[must_use]
    pub fn ok(message: &str, data: T) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            data: Some(data),
        }
    }

    /// Unwraps the payload.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Decode` if the envelope carries no data.
    pub fn into_data(self) -> ApiResult<T> {
        self.data.ok_or_else(|| ApiError::Decode {
            message: format!("response has no data: {}", self.message),
        })
    }
}

/// Error body: `{ success: false, message, errors? }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
    /// Field-level validation messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ErrorBody {
    #[must_use]
    pub fn new(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            errors: None,
        }
    }

    #[must_use]
    pub fn with_field_error(mut self, field: &str, message: &str) -> Self {
        self.errors
            .get_or_insert_with(BTreeMap::new)
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
        self
    }
}

/// Page position returned with paginated lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub current_page: u32,
    pub last_page: u32,
    pub per_page: u32,
    pub total: u64,
}

impl PaginationMeta {
    /// The page after this one, if there is one.
    #[must_use]
    pub const fn next_page(&self) -> Option<u32> {
        if self.current_page < self.last_page {
            Some(self.current_page + 1)
        } else {
            None
        }
    }
}

/// Paginated envelope: `{ success, message, data: [...], pagination }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

/// `{ id, name }` reference used for cities, districts, brands and
/// sub-categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: i64,
    pub name: String,
}

impl NamedRef {
    #[must_use]
    pub fn new(id: i64, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }
}

/// SKUs arrive as either numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Sku {
    Number(i64),
    Text(String),
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Offers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutletBranch {
    pub id: i64,
    pub outlet_id: i64,
    /// Display name; older payloads omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub address_line1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    pub city: NamedRef,
    pub district: NamedRef,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub branch_type: Option<String>,
}

impl OutletBranch {
    /// Domain view of the branch.
    #[must_use]
    pub fn to_outlet(&self) -> Outlet {
        let name: &str = self.name.as_deref().unwrap_or(&self.address_line1);
        let location: String = match self.address_line2.as_deref() {
            Some(line2) if !line2.is_empty() => format!("{}, {line2}", self.address_line1),
            _ => self.address_line1.clone(),
        };
        Outlet::new(name, &location, &self.district.name).with_id(OutletId::new(self.id))
    }
}

/// Product summary embedded in an offer line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferProductSummary {
    pub id: i64,
    pub sku: Sku,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellingOfferProduct {
    pub id: i64,
    pub product_id: i64,
    pub quantity: u32,
    pub unit_price: f64,
    pub total_price: f64,
    pub product: OfferProductSummary,
}

impl SellingOfferProduct {
    fn to_line_item(&self) -> ProductLineItem {
        let icon: &str = self.product.image_url.as_deref().unwrap_or_default();
        ProductLineItem::from_new(
            LineItemId::new(u64::try_from(self.id).unwrap_or_default()),
            NewLineItem::new(&self.product.name, icon)
                .product_id(self.product_id)
                .price(self.unit_price)
                .quantity(i64::from(self.quantity)),
        )
    }
}

/// An offer as the backend stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellingOffer {
    pub id: i64,
    pub supplier_id: i64,
    pub outlet_branch_id: i64,
    pub outlet_branch: OutletBranch,
    pub status: OfferStatus,
    pub total_amount: f64,
    pub products_count: u32,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub valid_until: Option<String>,
    pub is_expired: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    /// Present on detail and create responses; lists may omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<SellingOfferProduct>>,
}

impl SellingOffer {
    /// Maps the wire record onto a domain offer.
    ///
    /// The backend's `total_amount` is taken as the offer total; quantities
    /// are summed from whatever product lines were included.
    #[must_use]
    pub fn to_submitted_offer(&self) -> SubmittedOffer {
        let items: Vec<ProductLineItem> = self
            .products
            .iter()
            .flatten()
            .map(SellingOfferProduct::to_line_item)
            .collect();
        let totals = compute_totals(&items);

        let mut offer: SubmittedOffer = SubmittedOffer::new(
            OfferId::new(self.id),
            self.outlet_branch.to_outlet(),
            items,
            totals,
            self.status,
            self.created_at,
        );
        offer.total_price = self.total_amount;
        offer.notes.clone_from(&self.notes);
        offer.valid_until.clone_from(&self.valid_until);
        offer
    }
}

/// Query for `GET /selling-offers`.
///
/// The geographic filter is all-or-nothing: latitude, longitude and radius
/// must be given together.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OfferFilters {
    pub status: Option<OfferStatus>,
    pub outlet_branch_id: Option<i64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Kilometres.
    pub radius: Option<f64>,
}

impl OfferFilters {
    #[must_use]
    pub const fn with_status(mut self, status: OfferStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub const fn with_outlet_branch(mut self, outlet_branch_id: i64) -> Self {
        self.outlet_branch_id = Some(outlet_branch_id);
        self
    }

    #[must_use]
    pub const fn near(mut self, latitude: f64, longitude: f64, radius_km: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self.radius = Some(radius_km);
        self
    }

    /// Query-string pairs for the request.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` if only part of the geographic
    /// filter is set, or the radius is not positive.
    pub fn query_pairs(&self) -> ApiResult<Vec<(&'static str, String)>> {
        let mut pairs: Vec<(&'static str, String)> = Vec::new();
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(outlet_branch_id) = self.outlet_branch_id {
            pairs.push(("outlet_branch_id", outlet_branch_id.to_string()));
        }

        match (self.latitude, self.longitude, self.radius) {
            (None, None, None) => {}
            (Some(latitude), Some(longitude), Some(radius)) => {
                if !(radius.is_finite() && radius > 0.0) {
                    return Err(ApiError::invalid_input(
                        "radius",
                        "radius must be a positive number of kilometres",
                    ));
                }
                pairs.push(("latitude", latitude.to_string()));
                pairs.push(("longitude", longitude.to_string()));
                pairs.push(("radius", radius.to_string()));
            }
            _ => {
                return Err(ApiError::invalid_input(
                    "latitude",
                    "latitude, longitude and radius must be given together",
                ));
            }
        }
        Ok(pairs)
    }
}

/// One product line of `POST /selling-offers`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CreateOfferProduct {
    pub product_id: i64,
    pub quantity: u32,
    pub unit_price: f64,
}

/// Body of `POST /selling-offers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOfferPayload {
    pub outlet_branch_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<String>,
    pub products: Vec<CreateOfferProduct>,
}

impl CreateOfferPayload {
    /// Builds the payload from draft line items.
    ///
    /// # Errors
    ///
    /// * `DomainError::EmptyOffer` if there are no items
    /// * `DomainError::IncompleteLineItem` if any line lacks a product id,
    ///   price or quantity
    pub fn from_items(
        outlet: OutletId,
        items: &[ProductLineItem],
        notes: Option<String>,
        valid_until: Option<String>,
    ) -> Result<Self, DomainError> {
        if items.is_empty() {
            return Err(DomainError::EmptyOffer);
        }
        let products: Vec<CreateOfferProduct> = items
            .iter()
            .map(|item| {
                validate_submittable(item).map(|(product_id, quantity, unit_price)| {
                    CreateOfferProduct {
                        product_id,
                        quantity,
                        unit_price,
                    }
                })
            })
            .collect::<Result<_, _>>()?;

        Ok(Self {
            outlet_branch_id: outlet.value(),
            notes,
            valid_until,
            products,
        })
    }
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

/// Catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub sku: Sku,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub cost_price: f64,
    pub selling_price: f64,
    pub is_active: bool,
    pub sub_category: NamedRef,
    pub brand: NamedRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Product {
    /// Draft input for this product at its selling price.
    #[must_use]
    pub fn to_new_line_item(&self) -> NewLineItem {
        NewLineItem::with_screen_defaults(&self.name, self.image_url.as_deref().unwrap_or_default())
            .product_id(self.id)
            .price(self.selling_price)
    }
}

/// Query for `GET /products`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilters {
    pub page: Option<u32>,
    /// Defaults to 20; values above 100 are capped.
    pub per_page: Option<u32>,
    pub search: Option<String>,
    pub is_active: Option<bool>,
}

impl ProductFilters {
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub const fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    #[must_use]
    pub fn search(mut self, search: &str) -> Self {
        self.search = Some(search.to_string());
        self
    }

    #[must_use]
    pub const fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    /// Page size that will actually be requested.
    #[must_use]
    pub fn effective_per_page(&self) -> u32 {
        self.per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE)
    }

    /// Query-string pairs for the request. `is_active` is sent as 0/1.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs: Vec<(&'static str, String)> = vec![
            ("page", self.page.unwrap_or(1).max(1).to_string()),
            ("per_page", self.effective_per_page().to_string()),
        ];
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("search", search.to_string()));
        }
        if let Some(is_active) = self.is_active {
            pairs.push(("is_active", u8::from(is_active).to_string()));
        }
        pairs
    }
}

/// One page of products.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub pagination: PaginationMeta,
}

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    #[default]
    SupplierAgent,
    Supplier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Coordinator,
    Accountant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRequestPayload {
    /// Already normalized to `966XXXXXXXXX`.
    pub phone: String,
    pub user_type: UserType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRequestResponse {
    pub success: bool,
    pub message: String,
    pub expires_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpVerifyPayload {
    pub phone: String,
    pub otp: String,
    pub user_type: UserType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierAgent {
    pub id: i64,
    pub supplier_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub role: UserRole,
    pub is_active: bool,
    pub is_admin: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    pub user: SupplierAgent,
    pub access_token: String,
    /// Always `Bearer`.
    pub token_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub success: bool,
    pub message: String,
}
