use std::fmt;

/// Rejected field mutation. The draft is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInputError {
    /// No form input has this name.
    UnknownField(String),
    /// The amount input only takes a finite number.
    InvalidAmount(String),
    /// The currency selector does not offer this code.
    UnknownCurrency(String),
    /// The country is not in the fetched country list.
    UnknownCountry(String),
}

impl fmt::Display for FieldInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldInputError::UnknownField(name) => write!(f, "unknown form field '{name}'"),
            FieldInputError::InvalidAmount(raw) => write!(f, "amount '{raw}' is not a number"),
            FieldInputError::UnknownCurrency(code) => {
                write!(f, "currency '{code}' is not offered by the form")
            }
            FieldInputError::UnknownCountry(name) => {
                write!(f, "country '{name}' is not in the country list")
            }
        }
    }
}

impl std::error::Error for FieldInputError {}
