use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldName {
    SqftLiving,
    Bedrooms,
    Bathrooms,
    SqftLot,
    Floors,
    HouseAge,
    Zipcode,
}

impl FieldName {
    /// Form order, which is also the order of the history table columns.
    pub const ALL: [FieldName; 7] = [
        FieldName::SqftLiving,
        FieldName::Bedrooms,
        FieldName::Bathrooms,
        FieldName::SqftLot,
        FieldName::Floors,
        FieldName::HouseAge,
        FieldName::Zipcode,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "sqft_living" => Some(Self::SqftLiving),
            "no_of_bedrooms" => Some(Self::Bedrooms),
            "no_of_bathrooms" => Some(Self::Bathrooms),
            "sqft_lot" => Some(Self::SqftLot),
            "no_of_floors" => Some(Self::Floors),
            "house_age" => Some(Self::HouseAge),
            "zipcode" => Some(Self::Zipcode),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SqftLiving => "sqft_living",
            Self::Bedrooms => "no_of_bedrooms",
            Self::Bathrooms => "no_of_bathrooms",
            Self::SqftLot => "sqft_lot",
            Self::Floors => "no_of_floors",
            Self::HouseAge => "house_age",
            Self::Zipcode => "zipcode",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::SqftLiving => "Living area (sqft)",
            Self::Bedrooms => "Bedrooms",
            Self::Bathrooms => "Bathrooms",
            Self::SqftLot => "Lot size (sqft)",
            Self::Floors => "Floors",
            Self::HouseAge => "House age (years)",
            Self::Zipcode => "ZIP code",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Raw string values of the seven form inputs, keyed by their wire names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValues {
    pub sqft_living: String,
    pub no_of_bedrooms: String,
    pub no_of_bathrooms: String,
    pub sqft_lot: String,
    pub no_of_floors: String,
    pub house_age: String,
    pub zipcode: String,
}

impl FieldValues {
    pub fn get(&self, name: FieldName) -> &str {
        match name {
            FieldName::SqftLiving => &self.sqft_living,
            FieldName::Bedrooms => &self.no_of_bedrooms,
            FieldName::Bathrooms => &self.no_of_bathrooms,
            FieldName::SqftLot => &self.sqft_lot,
            FieldName::Floors => &self.no_of_floors,
            FieldName::HouseAge => &self.house_age,
            FieldName::Zipcode => &self.zipcode,
        }
    }

    pub fn set(&mut self, name: FieldName, value: impl Into<String>) {
        let slot = match name {
            FieldName::SqftLiving => &mut self.sqft_living,
            FieldName::Bedrooms => &mut self.no_of_bedrooms,
            FieldName::Bathrooms => &mut self.no_of_bathrooms,
            FieldName::SqftLot => &mut self.sqft_lot,
            FieldName::Floors => &mut self.no_of_floors,
            FieldName::HouseAge => &mut self.house_age,
            FieldName::Zipcode => &mut self.zipcode,
        };
        *slot = value.into();
    }
}
