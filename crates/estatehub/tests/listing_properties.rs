//! Price-conversion and category invariants checked across generated wizard states.

use estatehub::listings::{
    create_form_data_payload, transform_form_data_to_payload, validate_form_data, Category,
    ListingFormState, RentType,
};
use proptest::prelude::*;

fn category() -> impl Strategy<Value = Category> {
    prop_oneof![
        Just(Category::Rent),
        Just(Category::Sale),
        Just(Category::Swap)
    ]
}

proptest! {
    #[test]
    fn monthly_rent_yearly_is_twelve_times(monthly in 1u32..5_000_000) {
        let state = ListingFormState {
            category: Some(Category::Rent),
            price: monthly.to_string(),
            rent_type: RentType::Monthly,
            ..ListingFormState::default()
        };
        let rent = transform_form_data_to_payload(&state)
            .property_details
            .price
            .rent
            .expect("rent populated");
        prop_assert_eq!(rent.monthly, f64::from(monthly));
        prop_assert!((rent.yearly - 12.0 * rent.monthly).abs() < 1e-6);
    }

    #[test]
    fn yearly_rent_monthly_is_a_twelfth(yearly in 1u32..60_000_000) {
        let state = ListingFormState {
            category: Some(Category::Rent),
            price: yearly.to_string(),
            rent_type: RentType::Yearly,
            ..ListingFormState::default()
        };
        let rent = transform_form_data_to_payload(&state)
            .property_details
            .price
            .rent
            .expect("rent populated");
        prop_assert!((rent.monthly * 12.0 - rent.yearly).abs() < 1e-6);
    }

    #[test]
    fn exactly_one_price_shape_per_category(
        category in category(),
        price in 0u32..1_000_000,
        yearly in any::<bool>(),
    ) {
        let state = ListingFormState {
            category: Some(category),
            price: price.to_string(),
            rent_type: if yearly { RentType::Yearly } else { RentType::Monthly },
            ..ListingFormState::default()
        };
        let price = transform_form_data_to_payload(&state).property_details.price;
        let populated = [
            price.sale_price.is_some(),
            price.rent.is_some(),
            price.swap.is_some(),
        ];
        prop_assert_eq!(populated.iter().filter(|set| **set).count(), 1);
        match category {
            Category::Sale => prop_assert!(price.sale_price.is_some()),
            Category::Rent => prop_assert!(price.rent.is_some()),
            Category::Swap => prop_assert!(price.swap.is_some()),
        }
    }

    #[test]
    fn sale_form_data_has_no_rent_or_swap_keys(price in 1u32..10_000_000) {
        let state = ListingFormState {
            category: Some(Category::Sale),
            price: price.to_string(),
            ..ListingFormState::default()
        };
        let form = create_form_data_payload(&state);
        let sale_price = price.to_string();
        prop_assert_eq!(
            form.get("propertyDetails.price.salePrice.salePrice"),
            Some(sale_price.as_str())
        );
        prop_assert!(form
            .fields()
            .iter()
            .all(|field| !field.key.starts_with("propertyDetails.price.rent")
                && !field.key.starts_with("propertyDetails.price.swap")));
    }

    #[test]
    fn blank_required_field_always_invalid(blank in "[ \t]{0,4}") {
        let state = ListingFormState {
            category: Some(Category::Sale),
            city: blank,
            ..ListingFormState::default()
        };
        let report = validate_form_data(&state);
        prop_assert!(!report.is_valid);
        prop_assert!(report.contains("City is required"));
    }
}
