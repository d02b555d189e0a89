use serde::{Deserialize, Serialize};

/// Marketplace section a listing is published under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Rent,
    Sale,
    Swap,
}

impl Category {
    pub const fn label(self) -> &'static str {
        match self {
            Category::Rent => "Rent",
            Category::Sale => "Sale",
            Category::Swap => "Swap",
        }
    }
}

/// Which period the entered price refers to for Rent and Swap listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RentType {
    #[default]
    Monthly,
    Yearly,
}

impl RentType {
    pub const fn label(self) -> &'static str {
        match self {
            RentType::Monthly => "Monthly",
            RentType::Yearly => "Yearly",
        }
    }
}

/// Paid visibility package picked on the promotion step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PromotionTier {
    #[serde(rename = "Easy Start")]
    EasyStart,
    #[serde(rename = "Fast Sale")]
    FastSale,
    #[serde(rename = "Turbo Boost")]
    TurboBoost,
}

impl PromotionTier {
    pub const ALL: [PromotionTier; 3] = [
        PromotionTier::EasyStart,
        PromotionTier::FastSale,
        PromotionTier::TurboBoost,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            PromotionTier::EasyStart => "Easy Start",
            PromotionTier::FastSale => "Fast Sale",
            PromotionTier::TurboBoost => "Turbo Boost",
        }
    }

    pub const fn duration_days(self) -> u16 {
        match self {
            PromotionTier::EasyStart => 7,
            PromotionTier::FastSale => 14,
            PromotionTier::TurboBoost => 30,
        }
    }

    /// Package price in whole currency units; Easy Start is free.
    pub const fn price(self) -> u32 {
        match self {
            PromotionTier::EasyStart => 0,
            PromotionTier::FastSale => 15,
            PromotionTier::TurboBoost => 30,
        }
    }
}

/// File picked in the media step. Bytes stay out of JSON; only the multipart form carries them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaFile {
    pub file_name: String,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl MediaFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes,
        }
    }

    /// Declared content type, falling back to a guess from the file extension.
    pub fn mime(&self) -> mime::Mime {
        self.content_type
            .as_deref()
            .and_then(|raw| raw.parse::<mime::Mime>().ok())
            .unwrap_or_else(|| mime_guess::from_path(&self.file_name).first_or_octet_stream())
    }

    pub fn is_image_or_video(&self) -> bool {
        let mime = self.mime();
        mime.type_() == mime::IMAGE || mime.type_() == mime::VIDEO
    }
}

/// Flat accumulator the listing wizard writes into. Numeric inputs arrive as text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListingFormState {
    pub category: Option<Category>,
    pub property_type: String,
    pub condition: String,
    pub pet_policy: String,

    pub country: String,
    pub state: String,
    pub city: String,
    pub street_address: String,
    pub postal_code: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    pub cover_photo: Option<MediaFile>,
    pub uploads: Vec<MediaFile>,
    pub video_tour_link: String,

    pub price: String,
    pub rent_type: RentType,
    pub bedrooms: String,
    pub bathrooms: String,
    pub toilets: String,
    pub size_sqm: String,
    pub amenities: Vec<String>,
    pub infrastructure: Vec<String>,
    pub description: String,
    pub listing_duration: String,

    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: String,

    pub promotion_tier: Option<PromotionTier>,
}

/// Fields owned by a single wizard step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ListingStepInput {
    Category {
        category: Category,
    },
    Details {
        property_type: String,
        condition: String,
        #[serde(default)]
        pet_policy: String,
        #[serde(default)]
        bedrooms: String,
        #[serde(default)]
        bathrooms: String,
        #[serde(default)]
        toilets: String,
        #[serde(default)]
        size_sqm: String,
        #[serde(default)]
        amenities: Vec<String>,
        #[serde(default)]
        infrastructure: Vec<String>,
        #[serde(default)]
        description: String,
    },
    Location {
        country: String,
        #[serde(default)]
        state: String,
        city: String,
        street_address: String,
        #[serde(default)]
        postal_code: String,
        #[serde(default)]
        latitude: Option<f64>,
        #[serde(default)]
        longitude: Option<f64>,
    },
    Media {
        cover_photo: Option<MediaFile>,
        #[serde(default)]
        uploads: Vec<MediaFile>,
        #[serde(default)]
        video_tour_link: String,
    },
    Pricing {
        price: String,
        #[serde(default)]
        rent_type: RentType,
        #[serde(default)]
        listing_duration: String,
    },
    Contact {
        name: String,
        email: String,
        phone: String,
    },
    Promotion {
        tier: Option<PromotionTier>,
    },
}

impl ListingFormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the fields the given step owns. Later writes win.
    pub fn apply(&mut self, input: ListingStepInput) {
        match input {
            ListingStepInput::Category { category } => self.category = Some(category),
            ListingStepInput::Details {
                property_type,
                condition,
                pet_policy,
                bedrooms,
                bathrooms,
                toilets,
                size_sqm,
                amenities,
                infrastructure,
                description,
            } => {
                self.property_type = property_type;
                self.condition = condition;
                self.pet_policy = pet_policy;
                self.bedrooms = bedrooms;
                self.bathrooms = bathrooms;
                self.toilets = toilets;
                self.size_sqm = size_sqm;
                self.amenities = amenities;
                self.infrastructure = infrastructure;
                self.description = description;
            }
            ListingStepInput::Location {
                country,
                state,
                city,
                street_address,
                postal_code,
                latitude,
                longitude,
            } => {
                self.country = country;
                self.state = state;
                self.city = city;
                self.street_address = street_address;
                self.postal_code = postal_code;
                self.latitude = latitude;
                self.longitude = longitude;
            }
            ListingStepInput::Media {
                cover_photo,
                uploads,
                video_tour_link,
            } => {
                self.cover_photo = cover_photo;
                self.uploads = uploads;
                self.video_tour_link = video_tour_link;
            }
            ListingStepInput::Pricing {
                price,
                rent_type,
                listing_duration,
            } => {
                self.price = price;
                self.rent_type = rent_type;
                self.listing_duration = listing_duration;
            }
            ListingStepInput::Contact { name, email, phone } => {
                self.contact_name = name;
                self.contact_email = email;
                self.contact_phone = phone;
            }
            ListingStepInput::Promotion { tier } => self.promotion_tier = tier,
        }
    }

    /// Price as entered, or 0 when blank or not a number.
    pub fn price_amount(&self) -> f64 {
        parse_number(&self.price).unwrap_or(0.0)
    }
}

/// Lenient numeric parse for form text: trims, drops thousands separators.
pub(crate) fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_overwrite_only_their_fields() {
        let mut state = ListingFormState::new();
        state.apply(ListingStepInput::Category {
            category: Category::Rent,
        });
        state.apply(ListingStepInput::Pricing {
            price: "1200".to_string(),
            rent_type: RentType::Yearly,
            listing_duration: String::new(),
        });
        state.apply(ListingStepInput::Category {
            category: Category::Swap,
        });

        assert_eq!(state.category, Some(Category::Swap));
        assert_eq!(state.price, "1200");
        assert_eq!(state.rent_type, RentType::Yearly);
    }

    #[test]
    fn price_amount_is_lenient() {
        let mut state = ListingFormState::new();
        assert_eq!(state.price_amount(), 0.0);
        state.price = " 1,250.5 ".to_string();
        assert_eq!(state.price_amount(), 1250.5);
        state.price = "call me".to_string();
        assert_eq!(state.price_amount(), 0.0);
    }

    #[test]
    fn media_type_falls_back_to_extension() {
        let photo = MediaFile::new("front.JPG", Vec::new());
        assert_eq!(photo.mime(), mime::IMAGE_JPEG);
        assert!(photo.is_image_or_video());

        let brochure = MediaFile {
            file_name: "brochure".to_string(),
            content_type: Some("application/pdf".to_string()),
            bytes: Vec::new(),
        };
        assert!(!brochure.is_image_or_video());
    }

    #[test]
    fn promotion_tiers_serialize_with_display_names() {
        let json = serde_json::to_string(&PromotionTier::TurboBoost).expect("serializes");
        assert_eq!(json, "\"Turbo Boost\"");
        assert_eq!(PromotionTier::FastSale.duration_days(), 14);
    }

    #[test]
    fn step_input_deserializes_from_tagged_json() {
        let input: ListingStepInput = serde_json::from_str(
            r#"{"step":"contact","name":"Ada","email":"ada@example.com","phone":"+44 20"}"#,
        )
        .expect("tagged step parses");
        let mut state = ListingFormState::new();
        state.apply(input);
        assert_eq!(state.contact_email, "ada@example.com");

        let location: ListingStepInput = serde_json::from_str(
            r#"{"step":"location","country":"Kenya","city":"Nairobi","streetAddress":"Moi Ave 12","postalCode":"00100"}"#,
        )
        .expect("camelCase step fields parse");
        state.apply(location);
        assert_eq!(state.street_address, "Moi Ave 12");
        assert_eq!(state.postal_code, "00100");
    }

    #[test]
    fn form_state_reads_camel_case_keys() {
        let state: ListingFormState = serde_json::from_str(
            r#"{"propertyType":"Flat","rentType":"Yearly","coverPhoto":{"fileName":"a.jpg","contentType":"image/jpeg"},"contactEmail":"x@y.io"}"#,
        )
        .expect("camelCase state parses");
        assert_eq!(state.property_type, "Flat");
        assert_eq!(state.rent_type, RentType::Yearly);
        assert_eq!(
            state.cover_photo.expect("cover").content_type.as_deref(),
            Some("image/jpeg")
        );
        assert_eq!(state.contact_email, "x@y.io");
    }
}
