//! Data-driven registry mapping each business type to its configuration:
//! label vocabulary, navigation, default record types, and the extra fields
//! each view surfaces. Adding a business type means adding one profile here.

use db::models::business::BusinessType;
use serde::Serialize;
use ts_rs::TS;

/// Canonical fallback whenever a business-type tag cannot be resolved.
pub const DEFAULT_BUSINESS_TYPE: BusinessType = BusinessType::GeneralBusiness;

#[derive(Debug, Clone, Serialize, TS)]
pub struct TypeOption {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Serialize, TS)]
pub struct NavEntry {
    pub label: &'static str,
    pub path: &'static str,
}

#[derive(Debug, Clone, Serialize, TS)]
pub struct BusinessProfile {
    pub business_type: BusinessType,
    pub customer_label: &'static str,
    pub customer_label_plural: &'static str,
    pub default_order_type: &'static str,
    pub order_types: &'static [TypeOption],
    pub default_appointment_type: &'static str,
    pub appointment_types: &'static [TypeOption],
    /// Medical sub-fields shown on customer forms (hospital only).
    pub customer_extra_fields: &'static [&'static str],
    /// Clinical fields shown on appointment forms (healthcare types).
    pub appointment_extra_fields: &'static [&'static str],
    /// Conditional product fields (pharmacy expiry/batch vs warehouse
    /// weight/dimensions).
    pub product_extra_fields: &'static [&'static str],
    pub nav: &'static [NavEntry],
}

const fn option(value: &'static str, label: &'static str) -> TypeOption {
    TypeOption { value, label }
}

const fn nav(label: &'static str, path: &'static str) -> NavEntry {
    NavEntry { label, path }
}

const CLINICAL_FIELDS: &[&str] = &[
    "symptoms",
    "diagnosis",
    "treatment",
    "prescription",
    "follow_up_date",
];

const PHARMACY_PRODUCT_FIELDS: &[&str] = &["expiry_date", "batch_number", "prescription_required"];

const GENERAL_APPOINTMENT_TYPES: &[TypeOption] = &[
    option("meeting", "Meeting"),
    option("consultation", "Consultation"),
    option("presentation", "Presentation"),
];

const GENERAL_ORDER_TYPES: &[TypeOption] = &[
    option("general", "General"),
    option("sales", "Sales"),
    option("purchase", "Purchase"),
    option("return", "Return"),
];

static HOSPITAL: BusinessProfile = BusinessProfile {
    business_type: BusinessType::Hospital,
    customer_label: "Patient",
    customer_label_plural: "Patients",
    default_order_type: "medical_supply",
    order_types: &[
        option("medical_supply", "Medical Supply"),
        option("equipment", "Equipment"),
        option("pharmacy", "Pharmacy"),
    ],
    default_appointment_type: "consultation",
    appointment_types: &[
        option("consultation", "Consultation"),
        option("follow_up", "Follow-up"),
        option("surgery", "Surgery"),
        option("diagnostic", "Diagnostic"),
        option("emergency", "Emergency"),
    ],
    customer_extra_fields: &[
        "date_of_birth",
        "gender",
        "emergency_contact",
        "emergency_phone",
    ],
    appointment_extra_fields: CLINICAL_FIELDS,
    product_extra_fields: PHARMACY_PRODUCT_FIELDS,
    nav: &[
        nav("Dashboard", "/"),
        nav("Patients", "/patients"),
        nav("Appointments", "/appointments"),
        nav("Medical Records", "/records"),
        nav("Medical Supplies", "/supplies"),
        nav("Settings", "/settings"),
    ],
};

static MEDICAL_STORE: BusinessProfile = BusinessProfile {
    business_type: BusinessType::MedicalStore,
    customer_label: "Customer",
    customer_label_plural: "Customers",
    default_order_type: "prescription",
    order_types: &[
        option("prescription", "Prescription"),
        option("otc_sale", "OTC Sale"),
        option("bulk_order", "Bulk Order"),
    ],
    default_appointment_type: "consultation",
    appointment_types: &[
        option("consultation", "Consultation"),
        option("prescription_review", "Prescription Review"),
        option("health_checkup", "Health Checkup"),
    ],
    customer_extra_fields: &[],
    appointment_extra_fields: CLINICAL_FIELDS,
    product_extra_fields: PHARMACY_PRODUCT_FIELDS,
    nav: &[
        nav("Dashboard", "/"),
        nav("Customers", "/customers"),
        nav("Medicines", "/medicines"),
        nav("Prescriptions", "/prescriptions"),
        nav("Settings", "/settings"),
    ],
};

static WAREHOUSE: BusinessProfile = BusinessProfile {
    business_type: BusinessType::Warehouse,
    customer_label: "Customer",
    customer_label_plural: "Customers",
    default_order_type: "inventory",
    order_types: &[
        option("inventory", "Inventory"),
        option("transfer", "Transfer"),
        option("return", "Return"),
    ],
    default_appointment_type: "meeting",
    appointment_types: GENERAL_APPOINTMENT_TYPES,
    customer_extra_fields: &[],
    appointment_extra_fields: &[],
    product_extra_fields: &["weight", "dimensions"],
    nav: &[
        nav("Dashboard", "/"),
        nav("Customers", "/customers"),
        nav("Inventory", "/inventory"),
        nav("Locations", "/locations"),
        nav("Orders", "/orders"),
        nav("Settings", "/settings"),
    ],
};

static RETAIL_STORE: BusinessProfile = BusinessProfile {
    business_type: BusinessType::RetailStore,
    customer_label: "Customer",
    customer_label_plural: "Customers",
    default_order_type: "sales",
    order_types: &[
        option("sales", "Sales"),
        option("purchase", "Purchase"),
        option("return", "Return"),
    ],
    default_appointment_type: "meeting",
    appointment_types: GENERAL_APPOINTMENT_TYPES,
    customer_extra_fields: &[],
    appointment_extra_fields: &[],
    product_extra_fields: &[],
    nav: &[
        nav("Dashboard", "/"),
        nav("Customers", "/customers"),
        nav("Products", "/products"),
        nav("Sales", "/sales"),
        nav("Analytics", "/analytics"),
        nav("Settings", "/settings"),
    ],
};

static AUTOMOTIVE: BusinessProfile = BusinessProfile {
    business_type: BusinessType::Automotive,
    customer_label: "Customer",
    customer_label_plural: "Customers",
    default_order_type: "general",
    order_types: GENERAL_ORDER_TYPES,
    default_appointment_type: "meeting",
    appointment_types: GENERAL_APPOINTMENT_TYPES,
    customer_extra_fields: &[],
    appointment_extra_fields: &[],
    product_extra_fields: &[],
    nav: &[
        nav("Dashboard", "/"),
        nav("Customers", "/customers"),
        nav("Products", "/products"),
        nav("Orders", "/orders"),
        nav("Settings", "/settings"),
    ],
};

static GENERAL_BUSINESS: BusinessProfile = BusinessProfile {
    business_type: BusinessType::GeneralBusiness,
    customer_label: "Customer",
    customer_label_plural: "Customers",
    default_order_type: "general",
    order_types: GENERAL_ORDER_TYPES,
    default_appointment_type: "meeting",
    appointment_types: GENERAL_APPOINTMENT_TYPES,
    customer_extra_fields: &[],
    appointment_extra_fields: &[],
    product_extra_fields: &[],
    nav: &[
        nav("Dashboard", "/"),
        nav("Customers", "/customers"),
        nav("Products", "/products"),
        nav("Orders", "/orders"),
        nav("Settings", "/settings"),
    ],
};

/// Pure lookup; recomputed state-free on every call.
pub fn profile(business_type: BusinessType) -> &'static BusinessProfile {
    match business_type {
        BusinessType::Hospital => &HOSPITAL,
        BusinessType::MedicalStore => &MEDICAL_STORE,
        BusinessType::Warehouse => &WAREHOUSE,
        BusinessType::RetailStore => &RETAIL_STORE,
        BusinessType::Automotive => &AUTOMOTIVE,
        BusinessType::GeneralBusiness => &GENERAL_BUSINESS,
    }
}

/// Resolves a raw tag, falling back to the canonical default for anything
/// unrecognized.
pub fn profile_for_tag(tag: &str) -> &'static BusinessProfile {
    tag.parse::<BusinessType>()
        .map(profile)
        .unwrap_or_else(|_| profile(DEFAULT_BUSINESS_TYPE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hospital_uses_patient_vocabulary() {
        let hospital = profile(BusinessType::Hospital);
        assert_eq!(hospital.customer_label, "Patient");
        assert_eq!(hospital.default_appointment_type, "consultation");
        assert_eq!(hospital.default_order_type, "medical_supply");
        assert!(!hospital.appointment_extra_fields.is_empty());
    }

    #[test]
    fn unknown_tags_resolve_to_the_single_default() {
        let fallback = profile_for_tag("Space Station");
        assert_eq!(fallback.business_type, DEFAULT_BUSINESS_TYPE);
        assert_eq!(fallback.business_type, BusinessType::GeneralBusiness);
    }

    #[test]
    fn every_default_type_appears_in_its_own_options() {
        for business_type in BusinessType::ALL {
            let p = profile(business_type);
            assert!(
                p.order_types.iter().any(|o| o.value == p.default_order_type),
                "{business_type}: default order type missing from options"
            );
            assert!(
                p.appointment_types
                    .iter()
                    .any(|o| o.value == p.default_appointment_type),
                "{business_type}: default appointment type missing from options"
            );
        }
    }
}
