//! CSV export/import for the entity list views.
//!
//! Export writes a fixed header row per entity with every field properly
//! quoted. Import is positional, not header-matched: missing values fall
//! back to generated codes and defaults, each row issues one independent
//! create, and failures are reported in aggregate with no rollback of rows
//! already created in the same batch.

use chrono::Utc;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use db::{
    models::{
        appointment::Appointment,
        customer::{CreateCustomer, Customer},
        medical_record::MedicalRecord,
        order::{CreateOrder, Order},
        product::{CreateProduct, Product},
        supplier::{CreateSupplier, Supplier},
    },
    resource::Resource,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
use ts_rs::TS;

use super::{
    auth::CurrentUser,
    resources::{ResourceError, ResourceService},
};

#[derive(Debug, Error)]
pub enum CsvError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to build export: {0}")]
    Write(String),
}

/// Aggregate import result; per-row details are not surfaced.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct ImportOutcome {
    pub imported: usize,
    pub failed: usize,
}

/// An entity that can be flattened to one CSV row.
pub trait CsvExport {
    const HEADERS: &'static [&'static str];
    fn record(&self) -> Vec<String>;
}

/// An entity whose create bundle can be rebuilt from one positional row.
/// `row` is the 1-based data row number and `seed` a batch timestamp; both
/// feed the generated fallback codes.
pub trait CsvImport: Resource {
    fn from_record(record: &StringRecord, row: usize, seed: i64) -> Self::Create;
}

pub fn export<T: CsvExport>(rows: &[T]) -> Result<String, CsvError> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(T::HEADERS)?;
    for row in rows {
        writer.write_record(row.record())?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| CsvError::Write(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| CsvError::Write(e.to_string()))
}

/// Imports one CSV document, creating each data row independently. The
/// header row is skipped; blank rows are ignored. A missing identity fails
/// the whole call before anything is read.
pub async fn import<R: CsvImport>(
    resources: &ResourceService,
    user: Option<&CurrentUser>,
    text: &str,
    invalidate: &[&'static str],
) -> Result<ImportOutcome, ResourceError> {
    if user.is_none() {
        return Err(ResourceError::Unauthenticated);
    }

    let seed = Utc::now().timestamp_millis();
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut imported = 0usize;
    let mut failed = 0usize;

    for (index, record) in reader.records().enumerate() {
        let row = index + 1;
        let record = match record {
            Ok(record) => record,
            Err(error) => {
                warn!(%error, row, entity = R::TABLE, "unreadable import row");
                failed += 1;
                continue;
            }
        };
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        let data = R::from_record(&record, row, seed);
        match resources.create::<R>(user, &data, invalidate).await {
            Ok(_) => imported += 1,
            Err(ResourceError::Unauthenticated) => return Err(ResourceError::Unauthenticated),
            Err(error) => {
                warn!(%error, row, entity = R::TABLE, "import row failed");
                failed += 1;
            }
        }
    }

    Ok(ImportOutcome { imported, failed })
}

fn field(record: &StringRecord, index: usize) -> Option<String> {
    record
        .get(index)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
}

fn float(record: &StringRecord, index: usize) -> Option<f64> {
    field(record, index).and_then(|value| value.parse().ok())
}

fn integer(record: &StringRecord, index: usize) -> Option<i64> {
    field(record, index).and_then(|value| value.parse().ok())
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn amount(value: Option<f64>) -> String {
    value.unwrap_or(0.0).to_string()
}

impl CsvExport for Customer {
    const HEADERS: &'static [&'static str] = &[
        "Code", "Name", "Email", "Phone", "City", "Status", "Address", "DOB", "Gender",
    ];

    fn record(&self) -> Vec<String> {
        vec![
            self.customer_code.clone(),
            self.name.clone(),
            text(&self.email),
            text(&self.phone),
            text(&self.city),
            self.status.to_string(),
            text(&self.address),
            text(&self.date_of_birth),
            text(&self.gender),
        ]
    }
}

impl CsvImport for Customer {
    fn from_record(record: &StringRecord, row: usize, seed: i64) -> CreateCustomer {
        CreateCustomer {
            customer_code: field(record, 0).unwrap_or_else(|| format!("CUST-{seed}{row}")),
            name: field(record, 1).unwrap_or_else(|| format!("Customer {row}")),
            email: field(record, 2),
            phone: field(record, 3),
            city: field(record, 4),
            status: field(record, 5).and_then(|value| value.parse().ok()),
            address: field(record, 6),
            date_of_birth: field(record, 7),
            gender: field(record, 8),
            ..Default::default()
        }
    }
}

impl CsvExport for Product {
    const HEADERS: &'static [&'static str] = &[
        "Product Code",
        "Name",
        "Category",
        "Stock",
        "Unit Price",
        "Status",
        "Description",
        "Brand",
        "Location",
    ];

    fn record(&self) -> Vec<String> {
        vec![
            self.product_code.clone(),
            self.name.clone(),
            text(&self.category),
            self.quantity_in_stock.unwrap_or(0).to_string(),
            amount(self.unit_price),
            self.status.to_string(),
            text(&self.description),
            text(&self.brand),
            text(&self.location),
        ]
    }
}

impl CsvImport for Product {
    fn from_record(record: &StringRecord, row: usize, seed: i64) -> CreateProduct {
        CreateProduct {
            product_code: field(record, 0).unwrap_or_else(|| format!("PRD-{seed}{row}")),
            name: field(record, 1).unwrap_or_else(|| format!("Product {row}")),
            category: field(record, 2).or_else(|| Some("General".to_string())),
            quantity_in_stock: integer(record, 3).or(Some(0)),
            unit_price: float(record, 4).or(Some(0.0)),
            status: field(record, 5).and_then(|value| value.parse().ok()),
            description: field(record, 6),
            brand: field(record, 7),
            location: field(record, 8),
            ..Default::default()
        }
    }
}

impl CsvExport for Supplier {
    const HEADERS: &'static [&'static str] = &[
        "Code",
        "Name",
        "Contact Person",
        "Email",
        "Phone",
        "City",
        "Payment Terms",
        "Status",
    ];

    fn record(&self) -> Vec<String> {
        vec![
            self.supplier_code.clone(),
            self.name.clone(),
            text(&self.contact_person),
            text(&self.email),
            text(&self.phone),
            text(&self.city),
            text(&self.payment_terms),
            self.status.to_string(),
        ]
    }
}

impl CsvImport for Supplier {
    fn from_record(record: &StringRecord, row: usize, seed: i64) -> CreateSupplier {
        CreateSupplier {
            supplier_code: field(record, 0).unwrap_or_else(|| format!("SUP-{seed}{row}")),
            name: field(record, 1).unwrap_or_else(|| format!("Supplier {row}")),
            contact_person: field(record, 2),
            email: field(record, 3),
            phone: field(record, 4),
            city: field(record, 5),
            payment_terms: field(record, 6),
            status: field(record, 7).and_then(|value| value.parse().ok()),
            ..Default::default()
        }
    }
}

impl CsvExport for Order {
    const HEADERS: &'static [&'static str] = &[
        "Order Number",
        "Type",
        "Customer",
        "Supplier",
        "Subtotal",
        "Tax",
        "Discount",
        "Total",
        "Status",
        "Payment Status",
    ];

    fn record(&self) -> Vec<String> {
        vec![
            self.order_number.clone(),
            self.order_type.clone(),
            text(&self.customer_name),
            text(&self.supplier_name),
            amount(self.subtotal),
            amount(self.tax_amount),
            amount(self.discount_amount),
            amount(self.total_amount),
            self.status.clone(),
            self.payment_status.clone(),
        ]
    }
}

impl CsvImport for Order {
    /// Customer and supplier columns hold display names, which cannot be
    /// resolved back to ids positionally; re-imported orders are unlinked.
    fn from_record(record: &StringRecord, row: usize, seed: i64) -> CreateOrder {
        CreateOrder {
            order_number: field(record, 0).unwrap_or_else(|| format!("ORD-{seed}{row}")),
            order_type: field(record, 1),
            subtotal: float(record, 4).or(Some(0.0)),
            tax_amount: float(record, 5).or(Some(0.0)),
            discount_amount: float(record, 6).or(Some(0.0)),
            total_amount: float(record, 7).or(Some(0.0)),
            status: field(record, 8),
            payment_status: field(record, 9),
            ..Default::default()
        }
    }
}

impl CsvExport for Appointment {
    const HEADERS: &'static [&'static str] = &[
        "Appointment Number",
        "Date",
        "Type",
        "Customer",
        "Duration",
        "Status",
    ];

    fn record(&self) -> Vec<String> {
        vec![
            self.appointment_number.clone(),
            self.appointment_date.clone(),
            text(&self.appointment_type),
            text(&self.customer_name),
            self.duration_minutes.unwrap_or(0).to_string(),
            self.status.to_string(),
        ]
    }
}

impl CsvExport for MedicalRecord {
    const HEADERS: &'static [&'static str] = &[
        "Record Number",
        "Patient Name",
        "Date of Birth",
        "Gender",
        "Blood Type",
        "Diagnosis",
        "Status",
    ];

    fn record(&self) -> Vec<String> {
        vec![
            self.record_number.clone(),
            self.patient_name.clone(),
            text(&self.date_of_birth),
            text(&self.gender),
            text(&self.blood_type),
            text(&self.diagnosis),
            self.status.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use db::{
        DBService,
        models::{business::BusinessType, customer::CustomerStatus, profile::Profile},
    };

    use super::*;
    use crate::services::cache::ResourceCache;

    async fn setup() -> (ResourceService, CurrentUser) {
        let db = DBService::new_in_memory().await.unwrap();
        let profile = Profile::create(
            &db.pool,
            "owner@example.com",
            None,
            BusinessType::Hospital,
            "digest",
            "salt",
        )
        .await
        .unwrap();
        let user = CurrentUser {
            id: profile.id,
            business_type: profile.business_type,
        };
        (ResourceService::new(db, ResourceCache::new()), user)
    }

    async fn second_account(service: &ResourceService) -> CurrentUser {
        let profile = Profile::create(
            &service.db().pool,
            "other@example.com",
            None,
            BusinessType::Hospital,
            "digest",
            "salt",
        )
        .await
        .unwrap();
        CurrentUser {
            id: profile.id,
            business_type: profile.business_type,
        }
    }

    #[test]
    fn every_field_containing_a_comma_is_quoted() {
        let customer = Customer {
            id: uuid::Uuid::new_v4(),
            user_id: uuid::Uuid::new_v4(),
            business_type: BusinessType::Hospital,
            customer_code: "C-1".to_string(),
            name: "Doe, Jane".to_string(),
            email: None,
            phone: None,
            address: Some("1 Main St, Springfield".to_string()),
            city: Some("Springfield".to_string()),
            state: None,
            postal_code: None,
            date_of_birth: None,
            gender: None,
            emergency_contact: None,
            emergency_phone: None,
            status: CustomerStatus::Active,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let output = export(&[customer]).unwrap();
        assert!(output.contains("\"Doe, Jane\""));
        assert!(output.contains("\"1 Main St, Springfield\""));
    }

    #[tokio::test]
    async fn import_generates_codes_for_missing_values() {
        let (service, user) = setup().await;

        let text = "Code,Name,Email\n,Ada,ada@example.com\n";
        let outcome = import::<Customer>(&service, Some(&user), text, &["customers"])
            .await
            .unwrap();
        assert_eq!(outcome.imported, 1);
        assert_eq!(outcome.failed, 0);

        let rows = service
            .list::<Customer>(Some(&user), None)
            .await
            .unwrap();
        assert!(rows[0].customer_code.starts_with("CUST-"));
        assert_eq!(rows[0].name, "Ada");
    }

    #[tokio::test]
    async fn import_without_identity_fails_before_reading() {
        let (service, _) = setup().await;
        let outcome = import::<Customer>(&service, None, "Code,Name\nC-1,Ada\n", &[]).await;
        assert!(matches!(outcome, Err(ResourceError::Unauthenticated)));
    }

    #[tokio::test]
    async fn failed_rows_are_aggregated_without_rolling_back_the_batch() {
        let (service, user) = setup().await;

        // Second row reuses the first row's code and trips the per-account
        // uniqueness constraint; the first row must survive.
        let text = "Code,Name\nC-1,Ada\nC-1,Bel\nC-2,Cyd\n";
        let outcome = import::<Customer>(&service, Some(&user), text, &["customers"])
            .await
            .unwrap();
        assert_eq!(outcome.imported, 2);
        assert_eq!(outcome.failed, 1);

        let rows = service.list::<Customer>(Some(&user), None).await.unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn round_trip_preserves_row_count_but_not_unexported_fields() {
        let (service, user) = setup().await;

        let original = db::models::customer::CreateCustomer {
            customer_code: "C-1".to_string(),
            name: "Doe, Jane".to_string(),
            email: Some("jane@example.com".to_string()),
            state: Some("Springfield".to_string()),
            notes: Some("never exported".to_string()),
            ..Default::default()
        };
        service
            .create::<Customer>(Some(&user), &original, &["customers"])
            .await
            .unwrap();

        let exported = {
            let rows = service.list::<Customer>(Some(&user), None).await.unwrap();
            export(rows.as_slice()).unwrap()
        };

        // Re-import into an empty list under a fresh account.
        let other = second_account(&service).await;
        let outcome = import::<Customer>(&service, Some(&other), &exported, &["customers"])
            .await
            .unwrap();
        assert_eq!(outcome.imported, 1);

        let reimported = service.list::<Customer>(Some(&other), None).await.unwrap();
        assert_eq!(reimported.len(), 1);
        let row = &reimported[0];
        // Exported columns survive the round trip...
        assert_eq!(row.customer_code, "C-1");
        assert_eq!(row.name, "Doe, Jane");
        assert_eq!(row.email.as_deref(), Some("jane@example.com"));
        // ...but the import is positional over the export's column set, so
        // everything outside it is gone. The row count matches; the field
        // values do not.
        assert_eq!(row.state, None);
        assert_eq!(row.notes, None);
    }
}
