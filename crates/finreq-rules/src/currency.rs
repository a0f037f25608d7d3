use finreq_schemas::{Currency, FinancingRequestDraft};

use crate::opec::is_opec_member;

/// Prefix shown in front of the amount input.
pub fn currency_symbol(currency: Currency) -> &'static str {
    match currency {
        Currency::Usd => "$",
        Currency::Eur => "€",
        Currency::Gbp => "£",
        Currency::Jpy => "¥",
        Currency::Inr => "₹",
    }
}

/// Currency the form should hold after `country` is selected.
///
/// OPEC members force USD. Any other country keeps `current` as it is: the
/// rule never resets a user's earlier choice.
pub fn currency_for_country(country: &str, current: Option<Currency>) -> Option<Currency> {
    if is_opec_member(country) {
        Some(Currency::Usd)
    } else {
        current
    }
}

/// Apply the OPEC currency rule to `draft` in place.
///
/// Returns `true` when the currency changed.
pub fn apply_currency_rule(draft: &mut FinancingRequestDraft) -> bool {
    let next = currency_for_country(&draft.country, draft.currency);
    let changed = next != draft.currency;
    draft.currency = next;
    changed
}
