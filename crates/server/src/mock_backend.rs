// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory stand-in for the supplier-app backend.
//!
//! Holds seeded outlet branches, a product catalog, offers and sessions,
//! and applies the same rules the real backend does.

use nml_offers_api::{
    AuthResponse, CreateOfferPayload, ErrorBody, NamedRef, OfferProductSummary, OtpRequestResponse,
    OutletBranch, PaginatedEnvelope, PaginationMeta, Product, SellingOffer, SellingOfferProduct,
    Sku, SupplierAgent, UserRole, format_phone_for_api, is_valid_saudi_phone,
};
use nml_offers_domain::{DomainError, OfferStatus, validate_price, validate_quantity};
use std::collections::HashMap;
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};
use tracing::{info, warn};

/// Code accepted by `verify-otp`.
pub const DEBUG_OTP: &str = "1111";

const DEFAULT_PER_PAGE: u32 = 20;
const MAX_PER_PAGE: u32 = 100;
const EARTH_RADIUS_KM: f64 = 6371.0;
const SUPPLIER_ID: i64 = 3;
const OTP_LIFETIME: Duration = Duration::minutes(5);

/// Errors the mock backend reports, each mapping to one HTTP status.
#[derive(Debug, Clone, PartialEq)]
pub enum MockError {
    /// 404.
    NotFound { resource: &'static str, id: i64 },
    /// 409: the status change is not allowed from the offer's current state.
    Conflict(DomainError),
    /// 422.
    Validation { field: &'static str, message: String },
}

impl MockError {
    fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// The backend's JSON error body for this error.
    #[must_use]
    pub fn to_body(&self) -> ErrorBody {
        match self {
            Self::NotFound { resource, id } => {
                ErrorBody::new(&format!("{resource} {id} not found"))
            }
            Self::Conflict(err) => ErrorBody::new(&err.to_string()),
            Self::Validation { field, message } => {
                ErrorBody::new(message).with_field_error(field, message)
            }
        }
    }
}

impl std::fmt::Display for MockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_body().message)
    }
}

impl std::error::Error for MockError {}

/// Query of `GET /selling-offers`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OfferQuery {
    pub status: Option<OfferStatus>,
    pub outlet_branch_id: Option<i64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius: Option<f64>,
}

/// Query of `GET /products`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub search: Option<String>,
    pub is_active: Option<bool>,
}

/// Great-circle distance in kilometres.
#[must_use]
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat: f64 = (lat2 - lat1).to_radians();
    let d_lon: f64 = (lon2 - lon1).to_radians();
    let a: f64 = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

fn rfc3339(at: OffsetDateTime) -> String {
    at.format(&Rfc3339).unwrap_or_default()
}

#[derive(Debug)]
pub struct MockBackend {
    branches: Vec<OutletBranch>,
    products: Vec<Product>,
    /// Newest first.
    offers: Vec<SellingOffer>,
    agent: SupplierAgent,
    sessions: HashMap<String, i64>,
    next_offer_id: i64,
    next_line_id: i64,
}

impl MockBackend {
    /// An empty backend with one agent and no data.
    #[must_use]
    pub fn new(now: OffsetDateTime) -> Self {
        Self {
            branches: Vec::new(),
            products: Vec::new(),
            offers: Vec::new(),
            agent: SupplierAgent {
                id: 1,
                supplier_id: SUPPLIER_ID,
                first_name: String::from("مندوب"),
                last_name: String::from("تجريبي"),
                email: String::from("agent@nmlapp.test"),
                phone: String::from("966500000000"),
                role: UserRole::Coordinator,
                is_active: true,
                is_admin: false,
                created_at: rfc3339(now),
                updated_at: rfc3339(now),
            },
            sessions: HashMap::new(),
            next_offer_id: 1,
            next_line_id: 1,
        }
    }

    /// Five Jeddah outlets, a small bakery catalog and a history of offers
    /// covering pending, accepted and rejected outlets.
    #[must_use]
    pub fn seeded(now: OffsetDateTime) -> Self {
        let mut backend: Self = Self::new(now);

        let branches: [(&str, &str, &str, f64, f64); 5] = [
            ("بنده", "شارع الأمير", "الروضة", 21.4858, 39.2025),
            ("العثيم", "شارع التحلية", "النزهة", 21.4858, 39.2145),
            ("الدانوب", "شارع الكورنيش", "الصفا", 21.4613, 39.2165),
            ("بازار", "شارع الملك فهد", "الزهراء", 21.4758, 39.1825),
            ("كارفور", "شارع الأمير سلطان", "الحمراء", 21.4658, 39.1725),
        ];
        for (index, (name, street, district, latitude, longitude)) in (1_i64..).zip(branches) {
            backend.branches.push(OutletBranch {
                id: index,
                outlet_id: index,
                name: Some(name.to_string()),
                address_line1: street.to_string(),
                address_line2: Some(format!("حي {district}")),
                city: NamedRef::new(1, "جدة"),
                district: NamedRef::new(index, district),
                latitude,
                longitude,
                is_active: Some(true),
                branch_type: Some(String::from("branch")),
            });
        }

        let catalog: [(&str, f64, f64, bool); 7] = [
            ("كيك المربل", 20.0, 25.5, true),
            ("تشيز كيك", 24.0, 30.0, true),
            ("دونات", 11.0, 15.0, true),
            ("كرواسون", 9.0, 12.0, true),
            ("بسكويت الشوكولاتة", 14.0, 18.5, true),
            ("كيك الفانيليا", 17.0, 22.0, true),
            ("كيك التمر", 15.0, 21.0, false),
        ];
        for (index, (name, cost_price, selling_price, is_active)) in (1_i64..).zip(catalog) {
            backend.products.push(Product {
                id: index,
                sku: Sku::Text(format!("NML-{index:04}")),
                name: name.to_string(),
                image_url: None,
                cost_price,
                selling_price,
                is_active,
                sub_category: NamedRef::new(1, "مخبوزات"),
                brand: NamedRef::new(1, "نمل"),
                supplier_id: Some(SUPPLIER_ID),
                description: None,
            });
        }

        // Oldest first so the newest ends up at the front.
        let history: [(i64, &[(i64, u32)], OfferStatus, Duration); 5] = [
            (4, &[(6, 12), (1, 8)], OfferStatus::Rejected, Duration::days(5)),
            (1, &[(1, 10), (2, 5)], OfferStatus::WithCourier, Duration::days(2)),
            (2, &[(3, 20), (4, 15)], OfferStatus::Pending, Duration::days(1)),
            (5, &[(2, 10), (3, 25), (4, 20)], OfferStatus::WithCourier, Duration::hours(12)),
            (3, &[(5, 30)], OfferStatus::Pending, Duration::hours(3)),
        ];
        for (branch_id, lines, status, age) in history {
            let payload: CreateOfferPayload = CreateOfferPayload {
                outlet_branch_id: branch_id,
                notes: None,
                valid_until: None,
                products: lines
                    .iter()
                    .map(|&(product_id, quantity)| nml_offers_api::CreateOfferProduct {
                        product_id,
                        quantity,
                        unit_price: backend
                            .product(product_id)
                            .map_or(0.0, |product| product.selling_price),
                    })
                    .collect(),
            };
            if let Ok(offer) = backend.create_offer(&payload, now - age) {
                backend.force_status(offer.id, status);
            }
        }

        backend
    }

    // -- sessions -----------------------------------------------------------

    /// Accepts an OTP request for a valid Saudi mobile number. No code is
    /// sent; [`DEBUG_OTP`] always verifies.
    ///
    /// # Errors
    ///
    /// `MockError::Validation` for an invalid phone number.
    pub fn request_otp(
        &self,
        phone: &str,
        now: OffsetDateTime,
    ) -> Result<OtpRequestResponse, MockError> {
        let phone: String = format_phone_for_api(phone);
        if !is_valid_saudi_phone(&phone) {
            return Err(MockError::validation(
                "phone",
                "The phone must be a valid Saudi mobile number.",
            ));
        }
        let expires_at: OffsetDateTime = now + OTP_LIFETIME;
        info!(%phone, "OTP requested");
        Ok(OtpRequestResponse {
            success: true,
            message: String::from("OTP sent successfully"),
            expires_at: rfc3339(expires_at),
        })
    }

    /// Accepts the debug code and opens a session.
    ///
    /// # Errors
    ///
    /// `MockError::Validation` if the phone is invalid or the code is wrong.
    pub fn verify_otp(&mut self, phone: &str, otp: &str) -> Result<AuthResponse, MockError> {
        let phone: String = format_phone_for_api(phone);
        if !is_valid_saudi_phone(&phone) {
            return Err(MockError::validation(
                "phone",
                "The phone must be a valid Saudi mobile number.",
            ));
        }
        if otp != DEBUG_OTP {
            warn!(%phone, "Rejected OTP");
            return Err(MockError::validation("otp", "Invalid or expired OTP."));
        }

        let token: String = format!(
            "nml_{:016x}{:016x}",
            rand::random::<u64>(),
            rand::random::<u64>()
        );
        self.sessions.insert(token.clone(), self.agent.id);
        info!(%phone, "Opened session");

        let mut user: SupplierAgent = self.agent.clone();
        user.phone = phone;
        Ok(AuthResponse {
            success: true,
            message: String::from("Login successful"),
            user,
            access_token: token,
            token_type: String::from("Bearer"),
        })
    }

    /// The agent owning `token`, if the session is open.
    #[must_use]
    pub fn validate_session(&self, token: &str) -> Option<&SupplierAgent> {
        self.sessions
            .get(token)
            .filter(|&&agent_id| agent_id == self.agent.id)
            .map(|_| &self.agent)
    }

    /// Closes a session. Returns false if it was not open.
    pub fn logout(&mut self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }

    // -- offers -------------------------------------------------------------

    /// Offers matching `query`, newest first.
    ///
    /// # Errors
    ///
    /// `MockError::Validation` if only part of the geo filter is given.
    pub fn list_offers(&self, query: &OfferQuery) -> Result<Vec<SellingOffer>, MockError> {
        let centre: Option<(f64, f64, f64)> = match (query.latitude, query.longitude, query.radius)
        {
            (None, None, None) => None,
            (Some(latitude), Some(longitude), Some(radius)) if radius > 0.0 => {
                Some((latitude, longitude, radius))
            }
            _ => {
                return Err(MockError::validation(
                    "latitude",
                    "latitude, longitude and a positive radius are required together.",
                ));
            }
        };

        Ok(self
            .offers
            .iter()
            .filter(|offer| query.status.is_none_or(|status| offer.status == status))
            .filter(|offer| {
                query
                    .outlet_branch_id
                    .is_none_or(|id| offer.outlet_branch_id == id)
            })
            .filter(|offer| {
                centre.is_none_or(|(latitude, longitude, radius)| {
                    distance_km(
                        latitude,
                        longitude,
                        offer.outlet_branch.latitude,
                        offer.outlet_branch.longitude,
                    ) <= radius
                })
            })
            .map(Self::summary)
            .collect())
    }

    /// # Errors
    ///
    /// `MockError::NotFound` for an unknown id.
    pub fn get_offer(&self, id: i64) -> Result<SellingOffer, MockError> {
        self.offers
            .iter()
            .find(|offer| offer.id == id)
            .cloned()
            .ok_or(MockError::NotFound {
                resource: "Selling offer",
                id,
            })
    }

    /// Validates and stores a new `pending` offer.
    ///
    /// # Errors
    ///
    /// `MockError::Validation` for an unknown branch or product, no
    /// products, a quantity below 1 or a negative price.
    pub fn create_offer(
        &mut self,
        payload: &CreateOfferPayload,
        now: OffsetDateTime,
    ) -> Result<SellingOffer, MockError> {
        let branch: OutletBranch = self
            .branches
            .iter()
            .find(|branch| branch.id == payload.outlet_branch_id)
            .cloned()
            .ok_or_else(|| {
                MockError::validation(
                    "outlet_branch_id",
                    "The selected outlet branch id is invalid.",
                )
            })?;
        if payload.products.is_empty() {
            return Err(MockError::validation(
                "products",
                DomainError::EmptyOffer.to_string(),
            ));
        }

        let mut lines: Vec<SellingOfferProduct> = Vec::with_capacity(payload.products.len());
        for line in &payload.products {
            let quantity: u32 = validate_quantity(i64::from(line.quantity))
                .map_err(|err| MockError::validation("products.quantity", err.to_string()))?;
            let unit_price: f64 = validate_price(line.unit_price)
                .map_err(|err| MockError::validation("products.unit_price", err.to_string()))?;
            let product: &Product = self.product(line.product_id).ok_or_else(|| {
                MockError::validation("products.product_id", "The selected product id is invalid.")
            })?;

            lines.push(SellingOfferProduct {
                id: self.next_line_id + i64::try_from(lines.len()).unwrap_or_default(),
                product_id: product.id,
                quantity,
                unit_price,
                total_price: f64::from(quantity) * unit_price,
                product: OfferProductSummary {
                    id: product.id,
                    sku: product.sku.clone(),
                    name: product.name.clone(),
                    image_url: product.image_url.clone(),
                },
            });
        }

        let offer: SellingOffer = SellingOffer {
            id: self.next_offer_id,
            supplier_id: SUPPLIER_ID,
            outlet_branch_id: branch.id,
            outlet_branch: branch,
            status: OfferStatus::Pending,
            total_amount: lines.iter().map(|line| line.total_price).sum(),
            products_count: u32::try_from(lines.len()).unwrap_or(u32::MAX),
            notes: payload.notes.clone(),
            valid_until: payload.valid_until.clone(),
            is_expired: false,
            created_at: now,
            updated_at: now,
            products: Some(lines),
        };

        self.next_offer_id += 1;
        self.next_line_id += i64::from(offer.products_count);
        self.offers.insert(0, offer.clone());
        info!(
            offer_id = offer.id,
            outlet_branch_id = offer.outlet_branch_id,
            total_amount = offer.total_amount,
            "Created selling offer"
        );
        Ok(offer)
    }

    /// Moves an offer along its lifecycle.
    ///
    /// # Errors
    ///
    /// * `MockError::NotFound` for an unknown id
    /// * `MockError::Conflict` if the lifecycle does not allow the change
    pub fn update_status(
        &mut self,
        id: i64,
        status: OfferStatus,
        now: OffsetDateTime,
    ) -> Result<SellingOffer, MockError> {
        let offer: &mut SellingOffer = self
            .offers
            .iter_mut()
            .find(|offer| offer.id == id)
            .ok_or(MockError::NotFound {
                resource: "Selling offer",
                id,
            })?;

        offer.status.validate_transition(status).map_err(|err| {
            warn!(offer_id = id, from = %offer.status, to = %status, "Rejected status change");
            MockError::Conflict(err)
        })?;
        offer.status = status;
        offer.updated_at = now;
        info!(offer_id = id, %status, "Updated offer status");
        Ok(offer.clone())
    }

    /// Seeds a status without going through the lifecycle.
    fn force_status(&mut self, id: i64, status: OfferStatus) {
        if let Some(offer) = self.offers.iter_mut().find(|offer| offer.id == id) {
            offer.status = status;
        }
    }

    /// List rows carry no product lines, like the real backend.
    fn summary(offer: &SellingOffer) -> SellingOffer {
        SellingOffer {
            products: None,
            ..offer.clone()
        }
    }

    // -- products -----------------------------------------------------------

    fn product(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// # Errors
    ///
    /// `MockError::NotFound` for an unknown id.
    pub fn get_product(&self, id: i64) -> Result<Product, MockError> {
        self.product(id).cloned().ok_or(MockError::NotFound {
            resource: "Product",
            id,
        })
    }

    /// One page of the catalog. Search is case-insensitive on name or SKU.
    #[must_use]
    pub fn list_products(&self, query: &ProductQuery) -> PaginatedEnvelope<Product> {
        let needle: Option<String> = query
            .search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);
        let matching: Vec<&Product> = self
            .products
            .iter()
            .filter(|product| query.is_active.is_none_or(|active| product.is_active == active))
            .filter(|product| {
                needle.as_deref().is_none_or(|needle| {
                    product.name.to_lowercase().contains(needle)
                        || product.sku.to_string().to_lowercase().contains(needle)
                })
            })
            .collect();

        let per_page: u32 = query
            .per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE);
        let total: u64 = u64::try_from(matching.len()).unwrap_or(u64::MAX);
        let last_page: u32 = u32::try_from(total.div_ceil(u64::from(per_page)))
            .unwrap_or(u32::MAX)
            .max(1);
        let current_page: u32 = query.page.unwrap_or(1).max(1);
        let skip: usize =
            usize::try_from((current_page - 1).saturating_mul(per_page)).unwrap_or(usize::MAX);
        let take: usize = usize::try_from(per_page).unwrap_or(usize::MAX);

        PaginatedEnvelope {
            success: true,
            message: String::from("Products retrieved successfully"),
            data: matching.into_iter().skip(skip).take(take).cloned().collect(),
            pagination: PaginationMeta {
                current_page,
                last_page,
                per_page,
                total,
            },
        }
    }
}
