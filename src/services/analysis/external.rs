use crate::models::{ExternalMapping, FieldType};

use super::random::RandomSource;
use super::rules::{capitalize, first_match, Predicate, Rule};

const TEMPORAL: &[FieldType] = &[FieldType::Date, FieldType::DateTime];
const NUMBER: &[FieldType] = &[FieldType::Number];

const OUTLIER_DROP_CHANCE: f64 = 0.3;
const DERIVED_OUTLIER_DROP_CHANCE: f64 = 0.5;
const OUTLIER_PENALTY: u32 = 30;
const CONFIDENCE_FLOOR: u32 = 30;

/// Confidence is `base + floor(r * span)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfidenceRange {
    pub base: u32,
    pub span: u32,
}

impl ConfidenceRange {
    pub const fn new(base: u32, span: u32) -> Self {
        Self { base, span }
    }

    pub fn sample<R: RandomSource + ?Sized>(&self, rng: &mut R) -> u32 {
        self.base + rng.offset(self.span)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ExternalTarget {
    /// Path below the model namespace, e.g. `Customer.Identifier`.
    pub path: &'static str,
    pub confidence: ConfidenceRange,
}

const fn target(path: &'static str, base: u32, span: u32) -> ExternalTarget {
    ExternalTarget {
        path,
        confidence: ConfidenceRange::new(base, span),
    }
}

/// Used when no rule accepts the header.
pub const DERIVED_CONFIDENCE: ConfidenceRange = ConfidenceRange::new(40, 30);

/// Each category ends with a catch-all for its keyword, so a header that
/// enters a category never falls through to a later one.
pub const EXTERNAL_RULES: &[Rule<ExternalTarget>] = &[
    // Identifiers
    Rule::new(Predicate::all(&["id", "customer"]), target("Customer.Identifier", 85, 15)),
    Rule::new(Predicate::all(&["id", "transaction"]), target("Transaction.Identifier", 85, 15)),
    Rule::new(Predicate::all(&["id", "product"]), target("Product.Identifier", 85, 15)),
    Rule::new(Predicate::all(&["id", "order"]), target("Order.Identifier", 85, 15)),
    Rule::new(Predicate::all(&["id"]), target("Core.Identifier", 70, 20)),
    // Names
    Rule::new(Predicate::all(&["name", "first"]), target("Person.FirstName", 90, 10)),
    Rule::new(Predicate::all(&["name", "last"]), target("Person.LastName", 90, 10)),
    Rule::new(Predicate::all(&["name", "product"]), target("Product.Name", 85, 15)),
    Rule::new(Predicate::all(&["name"]), target("Core.Name", 75, 15)),
    // Contact
    Rule::new(Predicate::all(&["email"]), target("Contact.EmailAddress", 90, 10)),
    Rule::new(Predicate::all(&["phone"]), target("Contact.PhoneNumber", 85, 15)),
    // Address
    Rule::new(Predicate::all(&["address", "street"]), target("Address.Street", 85, 15)),
    Rule::new(Predicate::all(&["address", "city"]), target("Address.City", 90, 10)),
    Rule::new(Predicate::all(&["address", "state"]), target("Address.State", 90, 10)),
    Rule::new(
        Predicate::all(&["address"]).with_any(&["zip", "postal"]),
        target("Address.PostalCode", 90, 10),
    ),
    Rule::new(Predicate::all(&["address", "country"]), target("Address.Country", 90, 10)),
    Rule::new(Predicate::all(&["address"]), target("Address.FullAddress", 75, 15)),
    // Temporal
    Rule::new(
        Predicate::typed(TEMPORAL).with_any(&["created", "creation"]),
        target("Temporal.CreationDate", 85, 15),
    ),
    Rule::new(
        Predicate::typed(TEMPORAL).with_any(&["updated", "modified"]),
        target("Temporal.ModificationDate", 85, 15),
    ),
    Rule::new(Predicate::typed(TEMPORAL).with_any(&["birth"]), target("Person.BirthDate", 90, 10)),
    Rule::new(
        Predicate::typed(TEMPORAL).with_any(&["order", "purchase"]),
        target("Order.Date", 85, 15),
    ),
    Rule::new(Predicate::typed(TEMPORAL), target("Temporal.Timestamp", 70, 20)),
    // Numeric
    Rule::new(Predicate::typed(NUMBER).with_any(&["price"]), target("Product.Price", 85, 15)),
    Rule::new(
        Predicate::typed(NUMBER).with_any(&["amount", "total"]),
        target("Transaction.Amount", 85, 15),
    ),
    Rule::new(
        Predicate::typed(NUMBER).with_any(&["quantity", "count"]),
        target("Product.Quantity", 85, 15),
    ),
    Rule::new(Predicate::typed(NUMBER).with_any(&["age"]), target("Person.Age", 90, 10)),
    Rule::new(Predicate::typed(NUMBER), target("Core.NumericValue", 60, 20)),
    // Status
    Rule::new(Predicate::all(&["status", "order"]), target("Order.Status", 85, 15)),
    Rule::new(Predicate::all(&["status", "payment"]), target("Payment.Status", 85, 15)),
    Rule::new(Predicate::all(&["status"]), target("Core.Status", 75, 15)),
    // Description
    Rule::new(Predicate::all(&["description", "product"]), target("Product.Description", 85, 15)),
    Rule::new(Predicate::all(&["description"]), target("Core.Description", 75, 15)),
];

/// Maps a header into the external data model under `namespace`.
pub fn map_external<R: RandomSource + ?Sized>(
    header: &str,
    field_type: FieldType,
    is_outlier: bool,
    namespace: &str,
    rng: &mut R,
) -> Option<ExternalMapping> {
    if is_outlier && rng.chance(OUTLIER_DROP_CHANCE) {
        return None;
    }

    let (path, confidence) = match first_match(EXTERNAL_RULES, header, field_type) {
        Some(target) => (target.path.to_string(), target.confidence.sample(rng)),
        None => {
            if is_outlier && rng.chance(DERIVED_OUTLIER_DROP_CHANCE) {
                return None;
            }
            (
                format!("Derived.{}", capitalize(header)),
                DERIVED_CONFIDENCE.sample(rng),
            )
        }
    };

    let confidence = if is_outlier {
        confidence.saturating_sub(OUTLIER_PENALTY).max(CONFIDENCE_FLOOR)
    } else {
        confidence
    };

    Some(ExternalMapping {
        field: format!("{}.{}", namespace, path),
        confidence,
    })
}
