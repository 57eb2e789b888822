//! Widget catalog served by `GET /api/v1/dashboard/widgets`.
//!
//! Loaded once at startup, either from a JSON file shaped like the API
//! payload (`{ "<module>": [WidgetDefinition, ...] }`) or from the built-in
//! clinic catalog below.

use std::collections::HashSet;
use std::path::Path;

use medboard_core::error::CoreError;
use medboard_core::{WidgetCatalog, WidgetDefinition};

/// The catalog of a clinic with every module enabled.
pub fn builtin_catalog() -> WidgetCatalog {
    WidgetCatalog::from_definitions(vec![
        WidgetDefinition::new("financial_summary", "Financial Summary", "invoicing")
            .with_type("stat")
            .with_size(2, 2)
            .with_description("Revenue, payments and outstanding balances for the period"),
        WidgetDefinition::new("unpaid_invoices", "Unpaid Invoices", "invoicing")
            .with_type("list")
            .with_size(2, 1)
            .with_description("Invoices past their due date"),
        WidgetDefinition::new("revenue_chart", "Revenue Chart", "invoicing")
            .with_type("chart")
            .with_size(4, 2)
            .with_description("Daily revenue over the selected period"),
        WidgetDefinition::new("appointments_today", "Today's Appointments", "appointments")
            .with_type("list")
            .with_size(2, 1),
        WidgetDefinition::new("patient_alerts", "Patient Alerts", "patients")
            .with_type("list")
            .with_size(2, 1)
            .with_description("Allergies and follow-ups needing attention"),
        WidgetDefinition::new("new_patients", "New Patients", "patients")
            .with_type("stat")
            .with_size(1, 1),
        WidgetDefinition::new("pending_lab_orders", "Pending Lab Orders", "laboratory")
            .with_type("list")
            .with_size(2, 1)
            .with_description("Orders awaiting results"),
        WidgetDefinition::new("low_stock_medicines", "Low Stock Medicines", "pharmacy")
            .with_type("list")
            .with_size(2, 1)
            .with_description("Medicines below their reorder level"),
        WidgetDefinition::new("dispensing_today", "Dispensing Today", "pharmacy")
            .with_type("stat")
            .with_size(1, 1),
        WidgetDefinition::new("ai_suggestions", "AI Suggestions", "ai")
            .with_type("list")
            .with_size(4, 1)
            .with_description("Suggested follow-ups based on recent activity"),
    ])
}

/// Parse a catalog from its JSON representation.
///
/// Widget codes must be unique across all modules.
pub fn parse_catalog(json: &str) -> Result<WidgetCatalog, CoreError> {
    let catalog: WidgetCatalog = serde_json::from_str(json)
        .map_err(|e| CoreError::Validation(format!("Invalid widget catalog: {e}")))?;

    let mut seen = HashSet::new();
    for def in catalog.definitions() {
        if def.code.trim().is_empty() {
            return Err(CoreError::Validation(
                "Widget catalog contains an empty code".to_string(),
            ));
        }
        if !seen.insert(def.code.as_str()) {
            return Err(CoreError::Validation(format!(
                "Widget code '{}' appears more than once in the catalog",
                def.code
            )));
        }
    }
    Ok(catalog)
}

/// Load the catalog from `path`, or the built-in one when `path` is `None`.
pub async fn load_catalog(path: Option<&Path>) -> Result<WidgetCatalog, CoreError> {
    let Some(path) = path else {
        return Ok(builtin_catalog());
    };

    let json = tokio::fs::read_to_string(path).await.map_err(|e| {
        CoreError::Internal(format!("Failed to read widget catalog {}: {e}", path.display()))
    })?;
    let catalog = parse_catalog(&json)?;

    tracing::info!(
        path = %path.display(),
        widgets = catalog.len(),
        "Loaded widget catalog from file"
    );
    Ok(catalog)
}
