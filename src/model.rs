//! # Request Model
//!
//! The input representation for the composition engine. A [`RenderRequest`]
//! is one already-validated business record plus a theme selection; the
//! engine performs no field validation of its own. Dates arrive as
//! preformatted strings, monetary fields arrive as numbers (or as strings,
//! which are coerced; see [`LineItem`]).
//!
//! This is designed to be easily produced by a form layer, a CRUD API, or
//! direct JSON construction.

use serde::{Deserialize, Serialize};

/// The twelve business document kinds the engine can compose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    Invoice,
    Estimate,
    WorkOrder,
    DailyReport,
    TimeSheet,
    MaterialLog,
    ExpenseLog,
    Warranty,
    Note,
    Receipt,
    ChangeOrder,
    PurchaseOrder,
}

impl DocumentKind {
    /// The banner/title text drawn in the header block.
    ///
    /// Invoices in progress-billing mode announce themselves as such; every
    /// other kind has a fixed display name.
    pub fn display_title(&self, mode: ValuationMode) -> &'static str {
        match self {
            DocumentKind::Invoice => match mode {
                ValuationMode::ProgressBilling => "PROGRESS INVOICE",
                ValuationMode::QuantityRate => "INVOICE",
            },
            DocumentKind::Estimate => "ESTIMATE",
            DocumentKind::WorkOrder => "WORK ORDER",
            DocumentKind::DailyReport => "DAILY REPORT",
            DocumentKind::TimeSheet => "TIME SHEET",
            DocumentKind::MaterialLog => "MATERIAL LOG",
            DocumentKind::ExpenseLog => "EXPENSE LOG",
            DocumentKind::Warranty => "WARRANTY",
            DocumentKind::Note => "NOTE",
            DocumentKind::Receipt => "RECEIPT",
            DocumentKind::ChangeOrder => "CHANGE ORDER",
            DocumentKind::PurchaseOrder => "PURCHASE ORDER",
        }
    }

    /// Single-word form used for deterministic artifact file names.
    pub fn slug(&self) -> &'static str {
        match self {
            DocumentKind::Invoice => "Invoice",
            DocumentKind::Estimate => "Estimate",
            DocumentKind::WorkOrder => "WorkOrder",
            DocumentKind::DailyReport => "DailyReport",
            DocumentKind::TimeSheet => "TimeSheet",
            DocumentKind::MaterialLog => "MaterialLog",
            DocumentKind::ExpenseLog => "ExpenseLog",
            DocumentKind::Warranty => "Warranty",
            DocumentKind::Note => "Note",
            DocumentKind::Receipt => "Receipt",
            DocumentKind::ChangeOrder => "ChangeOrder",
            DocumentKind::PurchaseOrder => "PurchaseOrder",
        }
    }

    /// Kinds whose line items carry a unit cost column when one is present.
    pub fn tracks_unit_cost(&self) -> bool {
        matches!(self, DocumentKind::MaterialLog | DocumentKind::ExpenseLog)
    }
}

/// How a line item's amount is derived.
///
/// Exactly one of the two formulas applies to every item in a document;
/// the mode is set per request, never per item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ValuationMode {
    /// amount = quantity × rate
    #[default]
    QuantityRate,
    /// amount = scheduled value × (percent complete / 100)
    ProgressBilling,
}

/// One contact block: the issuer, the counterparty, or an extra
/// purchase-order party. All fields optional; an entirely empty party is
/// legal and still reserves its column in the layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub email: String,
}

impl Party {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.address.is_empty()
            && self.phone.is_empty()
            && self.website.is_empty()
            && self.email.is_empty()
    }
}

/// A single table row. Which numeric fields are meaningful depends on the
/// owning document's [`ValuationMode`]; the others are ignored, never mixed.
///
/// Numeric fields deserialize leniently: a JSON number, a numeric string
/// (currency symbols and thousands separators tolerated), or anything else,
/// which coerces to zero. Upstream form layers validate; this engine only
/// defends the totals arithmetic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub quantity: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub rate: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub scheduled_value: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub percent_complete: f64,
    /// Cost-tracking documents only (material and expense logs).
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub unit_cost: Option<f64>,
}

impl LineItem {
    /// The item amount under the given valuation mode.
    pub fn amount(&self, mode: ValuationMode) -> f64 {
        match mode {
            ValuationMode::QuantityRate => self.quantity * self.rate,
            ValuationMode::ProgressBilling => self.scheduled_value * self.percent_complete / 100.0,
        }
    }
}

/// Document-level adjustments applied after the line items.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Charges {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub discount: f64,
    /// Percentage, e.g. `8.25` for 8.25%.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub tax_rate: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub shipping: f64,
}

/// The fully derived totals cascade. Never stored in a request; always
/// recomputed from the line items and charges at draw time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    pub subtotal: f64,
    pub discount: f64,
    pub tax_rate: f64,
    pub tax: f64,
    pub shipping: f64,
    pub total: f64,
}

impl Totals {
    pub fn compute(items: &[LineItem], mode: ValuationMode, charges: &Charges) -> Totals {
        let subtotal: f64 = items.iter().map(|it| it.amount(mode)).sum();
        let subtotal = round2(subtotal);
        let discount = round2(charges.discount);
        let tax = round2((subtotal - discount) * charges.tax_rate / 100.0);
        let shipping = round2(charges.shipping);
        Totals {
            subtotal,
            discount,
            tax_rate: charges.tax_rate,
            tax,
            shipping,
            total: round2(subtotal - discount + tax + shipping),
        }
    }
}

/// Round to two decimal places (cents).
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Format a monetary value as `$1,234.50` / `-$1,234.50`.
pub fn format_money(v: f64) -> String {
    let negative = v < -0.004999;
    let cents = (v.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, frac)
}

/// The free-form rich-content block of body-driven documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BodyContent {
    /// Markup handed to the configured rasterizer collaborator.
    Markup { content: String },
    /// A pre-rendered raster supplied by the caller: data URI, base64,
    /// file path, or remote URL.
    Image { src: String },
}

/// Document metadata embedded in the PDF Info dictionary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    pub title: Option<String>,
    pub author: Option<String>,
}

/// A complete, already-validated render request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    pub kind: DocumentKind,

    /// Document number, e.g. `"INV-1024"`. Used in the header and in the
    /// deterministic artifact file name.
    #[serde(default)]
    pub number: String,

    /// Preformatted issue date line, e.g. `"March 4, 2026"`.
    #[serde(default)]
    pub issued: String,

    /// Preformatted due / valid-until date line. Empty means not shown.
    #[serde(default)]
    pub due: String,

    #[serde(default)]
    pub issuer: Party,
    #[serde(default)]
    pub counterparty: Party,

    /// Purchase orders insert a vendor / ship-to / bill-to grid; these two
    /// are ignored for every other kind.
    #[serde(default)]
    pub vendor: Party,
    #[serde(default)]
    pub ship_to: Party,

    #[serde(default)]
    pub valuation: ValuationMode,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub charges: Charges,

    #[serde(default)]
    pub body: Option<BodyContent>,

    /// Logo reference: data URI, base64, file path, or remote URL.
    #[serde(default)]
    pub logo: Option<String>,

    /// Signature image reference, same forms as `logo`.
    #[serde(default)]
    pub signature: Option<String>,
    #[serde(default = "default_signature_label")]
    pub signature_label: String,

    #[serde(default = "default_theme_id")]
    pub theme: String,
    /// Per-request color overrides as hex strings; applied at draw time
    /// without touching the registry entry.
    #[serde(default)]
    pub primary_override: Option<String>,
    #[serde(default)]
    pub secondary_override: Option<String>,

    /// Free-form note / terms paragraph drawn after the main content.
    #[serde(default)]
    pub notes: String,

    #[serde(default)]
    pub metadata: Metadata,
}

fn default_theme_id() -> String {
    "standard".to_string()
}

fn default_signature_label() -> String {
    "Authorized Signature".to_string()
}

/// Deserialize a numeric field that upstream may deliver as a number, a
/// string, or garbage. Garbage coerces to zero rather than failing the
/// whole request.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    let raw: Option<Raw> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(Raw::Num(n)) if n.is_finite() => n,
        Some(Raw::Text(s)) => parse_loose_number(&s),
        _ => 0.0,
    })
}

fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(lenient_f64(deserializer).ok().filter(|v| *v != 0.0))
}

fn parse_loose_number(s: &str) -> f64 {
    s.trim()
        .trim_start_matches('$')
        .replace(',', "")
        .parse()
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_identity() {
        // total == (s − d) × (1 + r/100) + sh, to 2 decimal places
        let items = vec![
            LineItem {
                description: "Framing labor".into(),
                quantity: 10.0,
                rate: 50.0,
                ..Default::default()
            },
            LineItem {
                description: "Materials".into(),
                quantity: 5.0,
                rate: 100.0,
                ..Default::default()
            },
        ];
        let charges = Charges {
            tax_rate: 10.0,
            ..Default::default()
        };
        let t = Totals::compute(&items, ValuationMode::QuantityRate, &charges);
        assert_eq!(t.subtotal, 1000.00);
        assert_eq!(t.tax, 100.00);
        assert_eq!(t.total, 1100.00);
    }

    #[test]
    fn test_totals_with_discount_and_shipping() {
        let items = vec![LineItem {
            quantity: 4.0,
            rate: 250.0,
            ..Default::default()
        }];
        let charges = Charges {
            discount: 100.0,
            tax_rate: 8.25,
            shipping: 45.50,
        };
        let t = Totals::compute(&items, ValuationMode::QuantityRate, &charges);
        assert_eq!(t.subtotal, 1000.00);
        assert_eq!(t.tax, 74.25); // (1000 − 100) × 8.25%
        assert_eq!(t.total, 1019.75);
    }

    #[test]
    fn test_valuation_mode_exclusivity() {
        // Both field pairs populated; only the mode-selected pair counts.
        let item = LineItem {
            quantity: 3.0,
            rate: 100.0,
            scheduled_value: 20_000.0,
            percent_complete: 25.0,
            ..Default::default()
        };
        assert_eq!(item.amount(ValuationMode::QuantityRate), 300.0);
        assert_eq!(item.amount(ValuationMode::ProgressBilling), 5_000.0);
    }

    #[test]
    fn test_lenient_numeric_coercion() {
        let item: LineItem = serde_json::from_str(
            r#"{ "description": "Drywall", "quantity": "12", "rate": "$1,050.25" }"#,
        )
        .unwrap();
        assert_eq!(item.quantity, 12.0);
        assert_eq!(item.rate, 1050.25);

        let bad: LineItem = serde_json::from_str(
            r#"{ "description": "Misc", "quantity": "a dozen", "rate": null }"#,
        )
        .unwrap();
        assert_eq!(bad.quantity, 0.0);
        assert_eq!(bad.rate, 0.0);
    }

    #[test]
    fn test_progress_invoice_title() {
        assert_eq!(
            DocumentKind::Invoice.display_title(ValuationMode::ProgressBilling),
            "PROGRESS INVOICE"
        );
        assert_eq!(
            DocumentKind::Invoice.display_title(ValuationMode::QuantityRate),
            "INVOICE"
        );
        assert_eq!(
            DocumentKind::Warranty.display_title(ValuationMode::ProgressBilling),
            "WARRANTY"
        );
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(1234.5), "$1,234.50");
        assert_eq!(format_money(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_money(-42.0), "-$42.00");
        assert_eq!(format_money(999.999), "$1,000.00");
    }

    #[test]
    fn test_request_minimal_json() {
        let req: RenderRequest = serde_json::from_str(r#"{ "kind": "Invoice" }"#).unwrap();
        assert_eq!(req.kind, DocumentKind::Invoice);
        assert_eq!(req.theme, "standard");
        assert!(req.items.is_empty());
        assert!(req.body.is_none());
    }
}
