use crate::models::FieldType;

use super::random::RandomSource;
use super::rules::{capitalize, first_match, Predicate, Rule};

const TEMPORAL: &[FieldType] = &[FieldType::Date, FieldType::DateTime];

/// Share of rule-less headers reported as unmapped.
const UNMAPPED_CHANCE: f64 = 0.3;

pub const STANDARD_RULES: &[Rule<&str>] = &[
    Rule::new(Predicate::all(&["id", "customer"]), "Standard.CustomerID"),
    Rule::new(Predicate::all(&["id", "transaction"]), "Standard.TransactionID"),
    Rule::new(Predicate::all(&["id", "product"]), "Standard.ProductID"),
    Rule::new(Predicate::exact("id"), "Standard.ID"),
    Rule::new(Predicate::all(&["name", "first"]), "Standard.Person.FirstName"),
    Rule::new(Predicate::all(&["name", "last"]), "Standard.Person.LastName"),
    Rule::new(Predicate::exact("name"), "Standard.Name"),
    Rule::new(Predicate::all(&["email"]), "Standard.Contact.Email"),
    Rule::new(Predicate::all(&["phone"]), "Standard.Contact.Phone"),
    Rule::new(Predicate::typed(TEMPORAL).with_all(&["created"]), "Standard.Timestamp.Created"),
    Rule::new(Predicate::typed(TEMPORAL).with_all(&["updated"]), "Standard.Timestamp.Updated"),
    Rule::new(Predicate::typed(TEMPORAL).with_all(&["birth"]), "Standard.Person.BirthDate"),
    Rule::new(Predicate::typed(TEMPORAL), "Standard.Timestamp.Date"),
    Rule::new(
        Predicate::typed(&[FieldType::Number]).with_any(&["amount", "price"]),
        "Standard.Currency.Amount",
    ),
    Rule::new(Predicate::all(&["status"]), "Standard.Status"),
    Rule::new(Predicate::all(&["description"]), "Standard.Description"),
];

/// Maps a header to a canonical `Standard.*` path. Headers no rule covers are
/// either left unmapped or given a derived `Standard.<Header>` path.
pub fn map_standard<R: RandomSource + ?Sized>(
    header: &str,
    field_type: FieldType,
    rng: &mut R,
) -> Option<String> {
    if let Some(path) = first_match(STANDARD_RULES, header, field_type) {
        return Some((*path).to_string());
    }

    if rng.chance(UNMAPPED_CHANCE) {
        None
    } else {
        Some(format!("Standard.{}", capitalize(header)))
    }
}
