use serde::{Deserialize, Serialize};

use super::form::{parse_number, Category, ListingFormState, PromotionTier, RentType};

pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Nested document the marketplace backend stores for a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyListingPayload {
    pub category: Option<Category>,
    pub property_type: String,
    pub condition: String,
    pub pet_policy: String,
    pub location: Location,
    pub media: Media,
    pub property_details: PropertyDetails,
    pub contact_info: ContactInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_promotion: Option<AdPromotion>,
    pub is_available: bool,
    pub status: String,
    pub views: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub country: String,
    pub state: String,
    pub city: String,
    pub address: String,
    pub postal_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub cover_photo: Option<String>,
    pub uploads: Vec<String>,
    pub video_tour_link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDetails {
    pub price: PriceDetails,
    pub rooms: Rooms,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_sqm: Option<f64>,
    pub amenities: Vec<String>,
    pub infrastructure: Vec<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing_duration: Option<String>,
}

/// Exactly one variant is populated, chosen by the listing category.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<SalePrice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rent: Option<PeriodPrice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swap: Option<PeriodPrice>,
}

impl PriceDetails {
    /// False when a derived period overflowed, e.g. a huge monthly rent times twelve.
    pub fn is_finite(&self) -> bool {
        self.sale_price
            .map_or(true, |sale| sale.sale_price.is_finite())
            && self.rent.map_or(true, |rent| rent.is_finite())
            && self.swap.map_or(true, |swap| swap.is_finite())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalePrice {
    pub sale_price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodPrice {
    pub monthly: f64,
    pub yearly: f64,
}

impl PeriodPrice {
    /// Derive the other period from the one entered. Values are not rounded.
    pub fn from_entered(amount: f64, rent_type: RentType) -> Self {
        match rent_type {
            RentType::Monthly => Self {
                monthly: amount,
                yearly: amount * MONTHS_PER_YEAR,
            },
            RentType::Yearly => Self {
                monthly: amount / MONTHS_PER_YEAR,
                yearly: amount,
            },
        }
    }

    pub fn is_finite(&self) -> bool {
        self.monthly.is_finite() && self.yearly.is_finite()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Rooms {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toilets: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdPromotion {
    pub tier: PromotionTier,
    pub duration_days: u16,
    pub price: u32,
}

impl From<PromotionTier> for AdPromotion {
    fn from(tier: PromotionTier) -> Self {
        Self {
            tier,
            duration_days: tier.duration_days(),
            price: tier.price(),
        }
    }
}

pub const NEW_LISTING_STATUS: &str = "pending";

/// Build the price block for the listing's category.
pub fn price_details(state: &ListingFormState) -> PriceDetails {
    let amount = state.price_amount();
    match state.category {
        Some(Category::Sale) => PriceDetails {
            sale_price: Some(SalePrice {
                sale_price: amount,
            }),
            ..PriceDetails::default()
        },
        Some(Category::Rent) => PriceDetails {
            rent: Some(PeriodPrice::from_entered(amount, state.rent_type)),
            ..PriceDetails::default()
        },
        Some(Category::Swap) => PriceDetails {
            swap: Some(PeriodPrice::from_entered(amount, state.rent_type)),
            ..PriceDetails::default()
        },
        None => PriceDetails::default(),
    }
}

/// Shape flat wizard state into the nested listing document. Never fails; missing input
/// becomes empty text or an absent number.
pub fn transform_form_data_to_payload(state: &ListingFormState) -> PropertyListingPayload {
    let coordinates = match (state.latitude, state.longitude) {
        (Some(latitude), Some(longitude)) => Some(Coordinates {
            latitude,
            longitude,
        }),
        _ => None,
    };

    let listing_duration = match state.category {
        Some(Category::Swap) => Some(state.listing_duration.trim().to_string()),
        _ => None,
    };

    PropertyListingPayload {
        category: state.category,
        property_type: state.property_type.trim().to_string(),
        condition: state.condition.trim().to_string(),
        pet_policy: state.pet_policy.trim().to_string(),
        location: Location {
            country: state.country.trim().to_string(),
            state: state.state.trim().to_string(),
            city: state.city.trim().to_string(),
            address: state.street_address.trim().to_string(),
            postal_code: state.postal_code.trim().to_string(),
            coordinates,
        },
        media: Media {
            cover_photo: state
                .cover_photo
                .as_ref()
                .map(|photo| photo.file_name.clone()),
            uploads: state
                .uploads
                .iter()
                .map(|upload| upload.file_name.clone())
                .collect(),
            video_tour_link: state.video_tour_link.trim().to_string(),
        },
        property_details: PropertyDetails {
            price: price_details(state),
            rooms: Rooms {
                bedrooms: parse_number(&state.bedrooms),
                bathrooms: parse_number(&state.bathrooms),
                toilets: parse_number(&state.toilets),
            },
            size_sqm: parse_number(&state.size_sqm),
            amenities: state.amenities.clone(),
            infrastructure: state.infrastructure.clone(),
            description: state.description.trim().to_string(),
            listing_duration,
        },
        contact_info: ContactInfo {
            name: state.contact_name.trim().to_string(),
            email: state.contact_email.trim().to_string(),
            phone: state.contact_phone.trim().to_string(),
        },
        ad_promotion: state.promotion_tier.map(AdPromotion::from),
        is_available: true,
        status: NEW_LISTING_STATUS.to_string(),
        views: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rent_state(price: &str, rent_type: RentType) -> ListingFormState {
        ListingFormState {
            category: Some(Category::Rent),
            price: price.to_string(),
            rent_type,
            ..ListingFormState::default()
        }
    }

    #[test]
    fn monthly_rent_derives_yearly() {
        let payload = transform_form_data_to_payload(&rent_state("950", RentType::Monthly));
        let rent = payload.property_details.price.rent.expect("rent populated");
        assert_eq!(rent.monthly, 950.0);
        assert_eq!(rent.yearly, 11_400.0);
    }

    #[test]
    fn yearly_rent_is_not_rounded() {
        let payload = transform_form_data_to_payload(&rent_state("1000", RentType::Yearly));
        let rent = payload.property_details.price.rent.expect("rent populated");
        assert_eq!(rent.monthly, 1000.0 / 12.0);
        assert_eq!(rent.yearly, 1000.0);
    }

    #[test]
    fn sale_serializes_only_sale_price() {
        let state = ListingFormState {
            category: Some(Category::Sale),
            price: "250000".to_string(),
            ..ListingFormState::default()
        };
        let value = serde_json::to_value(transform_form_data_to_payload(&state)).expect("json");
        assert_eq!(
            value["propertyDetails"]["price"],
            json!({ "salePrice": { "salePrice": 250000.0 } })
        );
        assert!(value["propertyDetails"].get("listingDuration").is_none());
    }

    #[test]
    fn swap_carries_listing_duration_and_swap_price() {
        let state = ListingFormState {
            category: Some(Category::Swap),
            price: "600".to_string(),
            listing_duration: " 6 months ".to_string(),
            ..ListingFormState::default()
        };
        let payload = transform_form_data_to_payload(&state);
        assert_eq!(
            payload.property_details.listing_duration.as_deref(),
            Some("6 months")
        );
        let swap = payload.property_details.price.swap.expect("swap populated");
        assert_eq!(swap.yearly, 7200.0);
        assert!(payload.property_details.price.rent.is_none());
    }

    #[test]
    fn empty_state_is_best_effort() {
        let payload = transform_form_data_to_payload(&ListingFormState::default());
        assert_eq!(payload.category, None);
        assert_eq!(payload.property_details.price, PriceDetails::default());
        assert_eq!(payload.location.country, "");
        assert!(payload.location.coordinates.is_none());
        assert!(payload.property_details.rooms.bedrooms.is_none());
        assert!(payload.ad_promotion.is_none());
        assert!(payload.is_available);
        assert_eq!(payload.status, "pending");
        assert_eq!(payload.views, 0);
    }

    #[test]
    fn promotion_tier_expands_package_terms() {
        let state = ListingFormState {
            promotion_tier: Some(PromotionTier::TurboBoost),
            ..ListingFormState::default()
        };
        let value = serde_json::to_value(transform_form_data_to_payload(&state)).expect("json");
        assert_eq!(
            value["adPromotion"],
            json!({ "tier": "Turbo Boost", "durationDays": 30, "price": 30 })
        );
    }
}
