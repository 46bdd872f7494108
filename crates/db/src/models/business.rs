use serde::{Deserialize, Serialize};
use sqlx::Type;
use strum_macros::{Display, EnumString};
use ts_rs::TS;

/// Tenant-level tag selecting which vocabulary, defaults, and optional
/// fields apply. Stored on every resource row at creation time; the wire
/// strings are the human-readable multi-word names.
#[derive(
    Debug, Clone, Copy, Type, Serialize, Deserialize, PartialEq, Eq, Hash, TS, EnumString, Display,
    Default,
)]
#[sqlx(type_name = "business_type")]
pub enum BusinessType {
    Hospital,
    #[serde(rename = "Medical Store")]
    #[strum(serialize = "Medical Store")]
    #[sqlx(rename = "Medical Store")]
    MedicalStore,
    Warehouse,
    #[serde(rename = "Retail Store")]
    #[strum(serialize = "Retail Store")]
    #[sqlx(rename = "Retail Store")]
    RetailStore,
    Automotive,
    #[default]
    #[serde(rename = "General Business")]
    #[strum(serialize = "General Business")]
    #[sqlx(rename = "General Business")]
    GeneralBusiness,
}

impl BusinessType {
    pub const ALL: [BusinessType; 6] = [
        BusinessType::Hospital,
        BusinessType::MedicalStore,
        BusinessType::Warehouse,
        BusinessType::RetailStore,
        BusinessType::Automotive,
        BusinessType::GeneralBusiness,
    ];
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn multi_word_tags_round_trip() {
        assert_eq!(BusinessType::MedicalStore.to_string(), "Medical Store");
        assert_eq!(
            BusinessType::from_str("Medical Store").unwrap(),
            BusinessType::MedicalStore
        );
        assert_eq!(
            BusinessType::from_str("General Business").unwrap(),
            BusinessType::GeneralBusiness
        );
    }

    #[test]
    fn unknown_tag_is_an_error() {
        assert!(BusinessType::from_str("Carnival").is_err());
    }
}
