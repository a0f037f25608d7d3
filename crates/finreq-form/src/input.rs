//! Binding of typed input text into a draft.
//!
//! Shared by [`crate::FormSession`] and callers that build a draft without a
//! session. The country-list check is not done here; it needs the fetched list.

use finreq_rules::{apply_currency_rule, DESCRIPTION_MAX_CHARS};
use finreq_schemas::{Currency, Field, FinancingRequestDraft};

use crate::error::FieldInputError;

/// Parse the amount input. Empty text unsets the amount.
pub fn parse_amount(raw: &str) -> Result<Option<f64>, FieldInputError> {
    let raw_trimmed = raw.trim();
    if raw_trimmed.is_empty() {
        return Ok(None);
    }
    match raw_trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(Some(n)),
        _ => Err(FieldInputError::InvalidAmount(raw.to_string())),
    }
}

/// Set `field` from its input text, then re-derive the currency.
///
/// - `amount` takes a number; empty text unsets it.
/// - `currency` takes the selector's codes; empty text clears it.
/// - `description` is cut at 150 characters.
///
/// On error the draft is unchanged. Returns `true` when the OPEC rule changed
/// the currency.
pub fn bind_input(
    draft: &mut FinancingRequestDraft,
    field: Field,
    value: &str,
) -> Result<bool, FieldInputError> {
    match field {
        Field::Amount => draft.amount = parse_amount(value)?,
        Field::Currency => {
            draft.currency = if value.trim().is_empty() {
                None
            } else {
                Some(
                    value
                        .parse::<Currency>()
                        .map_err(|_| FieldInputError::UnknownCurrency(value.to_string()))?,
                )
            };
        }
        Field::Description => {
            draft.description = value.chars().take(DESCRIPTION_MAX_CHARS).collect();
        }
        other => {
            if let Some(slot) = draft.text_slot_mut(other) {
                *slot = value.to_string();
            }
        }
    }
    Ok(apply_currency_rule(draft))
}
