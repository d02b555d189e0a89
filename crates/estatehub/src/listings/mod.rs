//! Listing wizard pipeline: accumulate step input, check it, then shape it into the
//! nested JSON document or the dotted-key multipart form the marketplace backend accepts.

pub mod form;
pub mod multipart;
pub mod payload;
pub mod router;
pub mod service;
pub mod validation;

pub use form::{
    Category, ListingFormState, ListingStepInput, MediaFile, PromotionTier, RentType,
};
pub use multipart::{
    create_form_data_payload, FormDataPayload, FormField, FormValue, MultipartError,
};
pub use payload::{transform_form_data_to_payload, PriceDetails, PropertyListingPayload};
pub use router::listing_router;
pub use service::{ListingSubmissionService, PreparedListing, SubmissionError};
pub use validation::{validate_form_data, ValidationReport};
