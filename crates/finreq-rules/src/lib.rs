//! finreq-rules
//!
//! Decision logic of the financing-request form:
//! - OPEC membership lookup
//! - currency symbols and the OPEC currency rule
//! - field validation
//!
//! Deterministic, pure logic. No IO, no clock: "today" is always a parameter.

mod currency;
mod opec;
mod validation;

pub use currency::{apply_currency_rule, currency_for_country, currency_symbol};
pub use opec::{is_opec_member, OPEC_MEMBERS};
pub use validation::{
    add_calendar_years, is_valid_project_code, parse_form_date, validate, ValidationErrors,
    DESCRIPTION_MAX_CHARS, MAX_END_YEARS, MIN_END_YEARS, MIN_START_LEAD_DAYS,
};
