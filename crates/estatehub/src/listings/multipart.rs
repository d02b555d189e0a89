use serde::Serialize;

use super::form::{parse_number, Category, ListingFormState, MediaFile};
use super::payload::{price_details, NEW_LISTING_STATUS};

/// Single part of a `multipart/form-data` submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormField {
    pub key: String,
    pub value: FormValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum FormValue {
    Text { value: String },
    File {
        file_name: String,
        content_type: String,
        #[serde(skip)]
        bytes: Vec<u8>,
    },
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MultipartError {
    #[error("boundary must be 1-70 characters without line breaks")]
    InvalidBoundary,
    #[error("boundary '{0}' occurs inside a form part")]
    BoundaryCollision(String),
}

/// Ordered multipart fields keyed by dotted paths.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FormDataPayload {
    fields: Vec<FormField>,
}

impl FormDataPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_text(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.push(FormField {
            key: key.into(),
            value: FormValue::Text {
                value: value.into(),
            },
        });
    }

    /// Appends only when the trimmed value is non-empty.
    pub fn append_present(&mut self, key: &str, value: &str) {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            self.append_text(key, trimmed);
        }
    }

    pub fn append_file(&mut self, key: impl Into<String>, file: &MediaFile) {
        self.fields.push(FormField {
            key: key.into(),
            value: FormValue::File {
                file_name: file.file_name.clone(),
                content_type: file.mime().essence_str().to_string(),
                bytes: file.bytes.clone(),
            },
        });
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// First text value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .filter(|field| field.key == key)
            .find_map(|field| match &field.value {
                FormValue::Text { value } => Some(value.as_str()),
                FormValue::File { .. } => None,
            })
    }

    pub fn get_all(&self, key: &str) -> Vec<&FormValue> {
        self.fields
            .iter()
            .filter(|field| field.key == key)
            .map(|field| &field.value)
            .collect()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.iter().any(|field| field.key == key)
    }

    pub fn content_type(boundary: &str) -> String {
        format!("multipart/form-data; boundary={boundary}")
    }

    /// Render the RFC 7578 body for the given boundary.
    pub fn encode(&self, boundary: &str) -> Result<Vec<u8>, MultipartError> {
        if boundary.is_empty()
            || boundary.len() > 70
            || boundary.contains(['\r', '\n'])
        {
            return Err(MultipartError::InvalidBoundary);
        }

        let delimiter = format!("--{boundary}");
        let mut body = Vec::new();

        for field in &self.fields {
            let content: &[u8] = match &field.value {
                FormValue::Text { value } => value.as_bytes(),
                FormValue::File { bytes, .. } => bytes,
            };
            if contains_subslice(content, delimiter.as_bytes()) {
                return Err(MultipartError::BoundaryCollision(boundary.to_string()));
            }

            body.extend_from_slice(delimiter.as_bytes());
            body.extend_from_slice(b"\r\n");
            match &field.value {
                FormValue::Text { .. } => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                            escape_header_value(&field.key)
                        )
                        .as_bytes(),
                    );
                }
                FormValue::File {
                    file_name,
                    content_type,
                    ..
                } => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                            escape_header_value(&field.key),
                            escape_header_value(file_name),
                            content_type
                        )
                        .as_bytes(),
                    );
                }
            }
            body.extend_from_slice(content);
            body.extend_from_slice(b"\r\n");
        }

        body.extend_from_slice(delimiter.as_bytes());
        body.extend_from_slice(b"--\r\n");
        Ok(body)
    }
}

fn escape_header_value(raw: &str) -> String {
    raw.replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn contains_subslice(haystack: &[u8], needle: &[u8]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|window| window == needle)
}

/// Numbers as the backend expects them in form text: shortest round-trip form, no
/// trailing `.0` on whole values.
pub fn format_number(value: f64) -> String {
    format!("{value}")
}

/// Same leniency as the JSON payload: unparseable text is left out.
fn append_number(form: &mut FormDataPayload, key: &str, raw: &str) {
    if let Some(value) = parse_number(raw) {
        form.append_text(key, format_number(value));
    }
}

/// Flatten wizard state into multipart fields for the file-upload endpoint.
pub fn create_form_data_payload(state: &ListingFormState) -> FormDataPayload {
    let mut form = FormDataPayload::new();

    if let Some(category) = state.category {
        form.append_text("category", category.label());
    }
    form.append_present("propertyType", &state.property_type);
    form.append_present("condition", &state.condition);
    form.append_present("petPolicy", &state.pet_policy);

    form.append_present("location.country", &state.country);
    form.append_present("location.state", &state.state);
    form.append_present("location.city", &state.city);
    form.append_present("location.address", &state.street_address);
    form.append_present("location.postalCode", &state.postal_code);
    if let (Some(latitude), Some(longitude)) = (state.latitude, state.longitude) {
        form.append_text("location.coordinates.latitude", format_number(latitude));
        form.append_text("location.coordinates.longitude", format_number(longitude));
    }

    if let Some(cover) = &state.cover_photo {
        form.append_file("media.coverPhoto", cover);
    }
    for upload in &state.uploads {
        form.append_file("media.uploads[]", upload);
    }
    form.append_present("media.videoTourLink", &state.video_tour_link);

    let price = price_details(state);
    if let Some(sale) = price.sale_price {
        form.append_text(
            "propertyDetails.price.salePrice.salePrice",
            format_number(sale.sale_price),
        );
    }
    if let Some(rent) = price.rent {
        form.append_text("propertyDetails.price.rent.monthly", format_number(rent.monthly));
        form.append_text("propertyDetails.price.rent.yearly", format_number(rent.yearly));
    }
    if let Some(swap) = price.swap {
        form.append_text("propertyDetails.price.swap.monthly", format_number(swap.monthly));
        form.append_text("propertyDetails.price.swap.yearly", format_number(swap.yearly));
    }

    append_number(&mut form, "propertyDetails.rooms.bedrooms", &state.bedrooms);
    append_number(&mut form, "propertyDetails.rooms.bathrooms", &state.bathrooms);
    append_number(&mut form, "propertyDetails.rooms.toilets", &state.toilets);
    append_number(&mut form, "propertyDetails.sizeSqm", &state.size_sqm);
    for amenity in &state.amenities {
        form.append_present("propertyDetails.amenities[]", amenity);
    }
    for item in &state.infrastructure {
        form.append_present("propertyDetails.infrastructure[]", item);
    }
    form.append_present("propertyDetails.description", &state.description);
    if state.category == Some(Category::Swap) {
        form.append_present("propertyDetails.listingDuration", &state.listing_duration);
    }

    form.append_present("contactInfo.name", &state.contact_name);
    form.append_present("contactInfo.email", &state.contact_email);
    form.append_present("contactInfo.phone", &state.contact_phone);

    if let Some(tier) = state.promotion_tier {
        form.append_text("adPromotion.tier", tier.label());
        form.append_text("adPromotion.durationDays", tier.duration_days().to_string());
        form.append_text("adPromotion.price", tier.price().to_string());
    }

    form.append_text("isAvailable", "true");
    form.append_text("status", NEW_LISTING_STATUS);
    form.append_text("views", "0");

    form
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::form::{PromotionTier, RentType};

    #[test]
    fn yearly_rent_splits_into_monthly() {
        let state = ListingFormState {
            category: Some(Category::Rent),
            price: "1200".to_string(),
            rent_type: RentType::Yearly,
            ..ListingFormState::default()
        };
        let form = create_form_data_payload(&state);
        assert_eq!(form.get("propertyDetails.price.rent.monthly"), Some("100"));
        assert_eq!(form.get("propertyDetails.price.rent.yearly"), Some("1200"));
        assert!(!form.contains_key("propertyDetails.price.swap.monthly"));
    }

    #[test]
    fn fractional_months_keep_full_precision() {
        assert_eq!(format_number(1000.0 / 12.0), "83.33333333333333");
        assert_eq!(format_number(0.0), "0");
    }

    #[test]
    fn room_counts_match_the_json_payload() {
        let state = ListingFormState {
            bedrooms: "3 bedrooms".to_string(),
            bathrooms: " 2 ".to_string(),
            size_sqm: "1,250.5".to_string(),
            ..ListingFormState::default()
        };
        let form = create_form_data_payload(&state);
        let payload = super::super::payload::transform_form_data_to_payload(&state);

        assert!(payload.property_details.rooms.bedrooms.is_none());
        assert!(!form.contains_key("propertyDetails.rooms.bedrooms"));
        assert_eq!(form.get("propertyDetails.rooms.bathrooms"), Some("2"));
        assert_eq!(form.get("propertyDetails.sizeSqm"), Some("1250.5"));
        assert!(!form.contains_key("propertyDetails.rooms.toilets"));
    }

    #[test]
    fn arrays_use_bracket_suffix() {
        let state = ListingFormState {
            amenities: vec!["Pool".to_string(), " ".to_string(), "Gym".to_string()],
            uploads: vec![
                MediaFile::new("kitchen.png", vec![1, 2]),
                MediaFile::new("tour.mp4", vec![3]),
            ],
            ..ListingFormState::default()
        };
        let form = create_form_data_payload(&state);
        assert_eq!(form.get_all("propertyDetails.amenities[]").len(), 2);
        let uploads = form.get_all("media.uploads[]");
        assert_eq!(uploads.len(), 2);
        match uploads[1] {
            FormValue::File { content_type, .. } => assert_eq!(content_type, "video/mp4"),
            other => panic!("expected file part, got {other:?}"),
        }
    }

    #[test]
    fn listing_duration_only_sent_for_swap() {
        let mut state = ListingFormState {
            category: Some(Category::Sale),
            listing_duration: "3 months".to_string(),
            ..ListingFormState::default()
        };
        assert!(!create_form_data_payload(&state).contains_key("propertyDetails.listingDuration"));
        state.category = Some(Category::Swap);
        assert_eq!(
            create_form_data_payload(&state).get("propertyDetails.listingDuration"),
            Some("3 months")
        );
    }

    #[test]
    fn promotion_and_status_flags_present() {
        let state = ListingFormState {
            promotion_tier: Some(PromotionTier::FastSale),
            ..ListingFormState::default()
        };
        let form = create_form_data_payload(&state);
        assert_eq!(form.get("adPromotion.tier"), Some("Fast Sale"));
        assert_eq!(form.get("isAvailable"), Some("true"));
        assert_eq!(form.get("status"), Some("pending"));
        assert_eq!(form.get("views"), Some("0"));
        assert!(!form.contains_key("category"));
    }

    #[test]
    fn encode_renders_text_and_file_parts() {
        let mut form = FormDataPayload::new();
        form.append_text("location.country", "Kenya");
        form.append_file("media.coverPhoto", &MediaFile::new("front.jpg", b"JPEG".to_vec()));

        let body = form.encode("XyZ").expect("encodes");
        let text = String::from_utf8(body).expect("utf8 body");
        assert_eq!(
            text,
            "--XyZ\r\nContent-Disposition: form-data; name=\"location.country\"\r\n\r\nKenya\r\n\
             --XyZ\r\nContent-Disposition: form-data; name=\"media.coverPhoto\"; filename=\"front.jpg\"\r\nContent-Type: image/jpeg\r\n\r\nJPEG\r\n\
             --XyZ--\r\n"
        );
        assert_eq!(
            FormDataPayload::content_type("XyZ"),
            "multipart/form-data; boundary=XyZ"
        );
    }

    #[test]
    fn encode_rejects_bad_boundaries() {
        let mut form = FormDataPayload::new();
        form.append_text("propertyDetails.description", "see --edge inside");
        assert_eq!(form.encode(""), Err(MultipartError::InvalidBoundary));
        assert_eq!(form.encode("a\r\nb"), Err(MultipartError::InvalidBoundary));
        assert_eq!(
            form.encode("edge"),
            Err(MultipartError::BoundaryCollision("edge".to_string()))
        );
    }
}
