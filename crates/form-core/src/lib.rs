mod field;
mod prediction;
mod purpose;
mod rules;
mod theme;
mod validator;

pub use field::{FieldName, FieldValues};
pub use prediction::{realtor_search_url, PredictionRecord, PredictionResult, REALTOR_PRICE_BAND};
pub use purpose::{Purpose, PurposeSelector, PurposeState, PurposeTransition};
pub use rules::{rule_for, FieldRule, FIELD_RULES};
pub use theme::{preferred_theme, Theme};
pub use validator::{
    check_form_validity, parse_leading_number, validate_field, FieldCheck, FieldEntry, FormState,
    ValidationError,
};

pub fn module_ready() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::{check_form_validity, FieldName, FormState, FIELD_RULES};

    #[test]
    fn rule_bounds_match_form_contract() {
        let bounds: Vec<_> = FIELD_RULES
            .iter()
            .map(|rule| (rule.field.as_str(), rule.min, rule.max))
            .collect();

        assert_eq!(
            bounds,
            vec![
                ("sqft_living", 200.0, 10_000.0),
                ("no_of_bedrooms", 1.0, 25.0),
                ("no_of_bathrooms", 1.0, 15.0),
                ("sqft_lot", 500.0, 50_000.0),
                ("no_of_floors", 0.0, 10.0),
                ("house_age", 0.0, 150.0),
                ("zipcode", 98_001.0, 99_001.0),
            ]
        );
    }

    #[test]
    fn sample_listing_validates_fully() {
        let mut form = FormState::new();
        for (name, raw) in [
            (FieldName::SqftLiving, "2000"),
            (FieldName::Bedrooms, "3"),
            (FieldName::Bathrooms, "2"),
            (FieldName::SqftLot, "5000"),
            (FieldName::Floors, "1"),
            (FieldName::HouseAge, "10"),
            (FieldName::Zipcode, "98101"),
        ] {
            assert!(form.set(name, raw).is_ok());
        }

        assert!(check_form_validity(&form));
    }
}
