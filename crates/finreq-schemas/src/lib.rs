//! finreq-schemas
//!
//! Data types shared by every finreq crate: the financing-request draft as it
//! is bound to the form, the currency enumeration, and the field identifiers
//! used to key validation errors.
//!
//! No behaviour lives here beyond parsing and naming. Validation rules live in
//! `finreq-rules`; mutation and submission live in `finreq-form`.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Currency
// ---------------------------------------------------------------------------

/// Currencies offered by the amount selector.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Jpy,
    Inr,
}

impl Currency {
    /// Every selectable currency, in selector order.
    pub const ALL: [Currency; 5] = [
        Currency::Usd,
        Currency::Eur,
        Currency::Gbp,
        Currency::Jpy,
        Currency::Inr,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
            Currency::Inr => "INR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the selectable currency codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCurrency(pub String);

impl fmt::Display for UnknownCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown currency '{}'. expected one of: USD | EUR | GBP | JPY | INR",
            self.0
        )
    }
}

impl std::error::Error for UnknownCurrency {}

impl FromStr for Currency {
    type Err = UnknownCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "GBP" => Ok(Currency::Gbp),
            "JPY" => Ok(Currency::Jpy),
            "INR" => Ok(Currency::Inr),
            _ => Err(UnknownCurrency(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// Identifies one input of the financing-request form.
///
/// The serialized name is the form's input name (camelCase), which is also the
/// key under which validation errors are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Surname,
    Country,
    ProjectCode,
    Description,
    Amount,
    Currency,
    StartDate,
    EndDate,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Field; 9] = [
        Field::Name,
        Field::Surname,
        Field::Country,
        Field::ProjectCode,
        Field::Description,
        Field::Amount,
        Field::Currency,
        Field::StartDate,
        Field::EndDate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Surname => "surname",
            Field::Country => "country",
            Field::ProjectCode => "projectCode",
            Field::Description => "description",
            Field::Amount => "amount",
            Field::Currency => "currency",
            Field::StartDate => "startDate",
            Field::EndDate => "endDate",
        }
    }

    /// Look up a field by its form input name. Exact match only.
    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.as_str() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FinancingRequestDraft
// ---------------------------------------------------------------------------

/// Form values for one financing request.
///
/// Text inputs are kept exactly as typed (dates as `YYYY-MM-DD`) so validation
/// can report on what the user entered. The amount is the numeric input's
/// parsed value and is posted as a JSON number. This is also the payload posted
/// to the submission endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancingRequestDraft {
    pub name: String,
    pub surname: String,
    pub country: String,
    pub project_code: String,
    pub description: String,
    /// `None` while the amount input is empty.
    pub amount: Option<f64>,
    /// `None` only when the selector has been cleared explicitly.
    pub currency: Option<Currency>,
    pub start_date: String,
    pub end_date: String,
}

impl Default for FinancingRequestDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            surname: String::new(),
            country: String::new(),
            project_code: String::new(),
            description: String::new(),
            amount: None,
            currency: Some(Currency::Usd),
            start_date: String::new(),
            end_date: String::new(),
        }
    }
}

impl FinancingRequestDraft {
    /// Current value of `field` rendered as form text.
    ///
    /// Typed fields render their input text: the currency its code, the amount
    /// its number. Both render as an empty string when unset.
    pub fn value(&self, field: Field) -> Cow<'_, str> {
        match field {
            Field::Name => Cow::Borrowed(&self.name),
            Field::Surname => Cow::Borrowed(&self.surname),
            Field::Country => Cow::Borrowed(&self.country),
            Field::ProjectCode => Cow::Borrowed(&self.project_code),
            Field::Description => Cow::Borrowed(&self.description),
            Field::Amount => match self.amount {
                Some(n) => Cow::Owned(n.to_string()),
                None => Cow::Borrowed(""),
            },
            Field::Currency => Cow::Borrowed(self.currency.map(|c| c.as_str()).unwrap_or("")),
            Field::StartDate => Cow::Borrowed(&self.start_date),
            Field::EndDate => Cow::Borrowed(&self.end_date),
        }
    }

    /// Mutable slot for a text field. `None` for the typed fields (`amount`,
    /// `currency`), which are set through their own struct fields.
    pub fn text_slot_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Name => Some(&mut self.name),
            Field::Surname => Some(&mut self.surname),
            Field::Country => Some(&mut self.country),
            Field::ProjectCode => Some(&mut self.project_code),
            Field::Description => Some(&mut self.description),
            Field::Amount | Field::Currency => None,
            Field::StartDate => Some(&mut self.start_date),
            Field::EndDate => Some(&mut self.end_date),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
