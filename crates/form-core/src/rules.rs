use crate::field::FieldName;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRule {
    pub field: FieldName,
    pub min: f64,
    pub max: f64,
    pub message: &'static str,
}

impl FieldRule {
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

pub const FIELD_RULES: [FieldRule; 7] = [
    FieldRule {
        field: FieldName::SqftLiving,
        min: 200.0,
        max: 10_000.0,
        message: "Living area must be between 200 and 10,000 sqft.",
    },
    FieldRule {
        field: FieldName::Bedrooms,
        min: 1.0,
        max: 25.0,
        message: "Number of bedrooms must be between 1 and 25.",
    },
    FieldRule {
        field: FieldName::Bathrooms,
        min: 1.0,
        max: 15.0,
        message: "Number of bathrooms must be between 1 and 15.",
    },
    FieldRule {
        field: FieldName::SqftLot,
        min: 500.0,
        max: 50_000.0,
        message: "Lot size must be between 500 and 50,000 sqft.",
    },
    FieldRule {
        field: FieldName::Floors,
        min: 0.0,
        max: 10.0,
        message: "Floors must be between 0 and 10.",
    },
    FieldRule {
        field: FieldName::HouseAge,
        min: 0.0,
        max: 150.0,
        message: "House age must be between 0 and 150 years.",
    },
    FieldRule {
        field: FieldName::Zipcode,
        min: 98_001.0,
        max: 99_001.0,
        message: "Invalid ZIP code. Must be between 98001 and 99001.",
    },
];

pub fn rule_for(field: FieldName) -> &'static FieldRule {
    &FIELD_RULES[field.index()]
}
