//! Field validation for a financing-request draft.
//!
//! [`validate`] maps a draft to the set of fields that fail their rule. An
//! empty [`ValidationErrors`] means the draft may be submitted.
//!
//! Rules, per field:
//! - `projectCode`: required, then `^[A-Z]{4}-[1-9]{4}$`
//! - `startDate`: required, valid date, then `>= today + 15 days`
//! - `endDate`: required, valid date, then (only when `startDate` is a valid
//!   date) strictly after start, `>= start + 1 year`, `<= start + 3 years`
//! - `amount`: required (unset, zero and NaN count as missing), then positive
//! - everything else: required only
//!
//! "Required" means non-empty: a value of only spaces is present.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::{Datelike, Days, NaiveDate};
use finreq_schemas::{Field, FinancingRequestDraft};
use regex::Regex;
use serde::Serialize;

/// Minimum lead time between "today" and the requested start date.
pub const MIN_START_LEAD_DAYS: u64 = 15;
/// Shortest allowed financing window, in calendar years.
pub const MIN_END_YEARS: i32 = 1;
/// Longest allowed financing window, in calendar years.
pub const MAX_END_YEARS: i32 = 3;
/// Input cap on the description text, in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 150;

const DATE_FORMAT: &str = "%Y-%m-%d";

static PROJECT_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{4}-[1-9]{4}$").expect("project code pattern"));

// ---------------------------------------------------------------------------
// ValidationErrors
// ---------------------------------------------------------------------------

/// Field name -> human-readable message, for every field that failed.
///
/// Iteration follows form order. Serializes as a plain JSON object keyed by
/// the form input names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }

    /// Keep only the errors whose field satisfies `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(Field) -> bool) {
        self.0.retain(|f, _| keep(*f));
    }

    fn insert(&mut self, field: Field, message: &str) {
        self.0.insert(field, message.to_string());
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a date input value (`YYYY-MM-DD`). Surrounding whitespace is ignored.
pub fn parse_form_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

pub fn is_valid_project_code(code: &str) -> bool {
    PROJECT_CODE.is_match(code)
}

/// Add `years` calendar years to `date`, keeping month and day.
///
/// Feb 29 landing in a non-leap year rolls over to Mar 1, the way a calendar
/// `setFullYear` does. `None` only when the result leaves chrono's range.
pub fn add_calendar_years(date: NaiveDate, years: i32) -> Option<NaiveDate> {
    let year = date.year().checked_add(years)?;
    NaiveDate::from_ymd_opt(year, date.month(), date.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Validate `draft` as of `today`.
pub fn validate(draft: &FinancingRequestDraft, today: NaiveDate) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if draft.project_code.is_empty() {
        errors.insert(Field::ProjectCode, "Project code is required.");
    } else if !is_valid_project_code(&draft.project_code) {
        errors.insert(
            Field::ProjectCode,
            "Project Code should be in the format XXXX-XXXX (e.g., ABCD-1234)",
        );
    }

    let start = check_start_date(draft, today, &mut errors);
    check_end_date(draft, start, &mut errors);

    let required: [(Field, &str); 5] = [
        (Field::Name, "First Name is required."),
        (Field::Surname, "Last Name is required."),
        (Field::Country, "Country is required."),
        (Field::Description, "Description is required."),
        (Field::Currency, "Currency is required."),
    ];
    for (field, message) in required {
        if draft.value(field).is_empty() {
            errors.insert(field, message);
        }
    }
    check_amount(draft.amount, &mut errors);

    errors
}

fn check_amount(amount: Option<f64>, errors: &mut ValidationErrors) {
    // Zero and NaN are what an emptied numeric input parses to.
    match amount.filter(|n| *n != 0.0 && !n.is_nan()) {
        None => errors.insert(Field::Amount, "Amount is required."),
        Some(n) if n < 0.0 || n.is_infinite() => {
            errors.insert(Field::Amount, "Amount must be a positive number.")
        }
        Some(_) => {}
    }
}

/// Returns the parsed start date when it is a valid date, whether or not it
/// satisfies the lead-time rule; the end-date window is measured from it.
fn check_start_date(
    draft: &FinancingRequestDraft,
    today: NaiveDate,
    errors: &mut ValidationErrors,
) -> Option<NaiveDate> {
    if draft.start_date.is_empty() {
        errors.insert(Field::StartDate, "Start date is required.");
        return None;
    }
    let Some(start) = parse_form_date(&draft.start_date) else {
        errors.insert(
            Field::StartDate,
            "Start date must be a valid date (YYYY-MM-DD).",
        );
        return None;
    };

    let earliest = today.checked_add_days(Days::new(MIN_START_LEAD_DAYS));
    if earliest.is_some_and(|min| start < min) {
        errors.insert(
            Field::StartDate,
            "Start date must be at least 15 days from today.",
        );
    }
    Some(start)
}

fn check_end_date(
    draft: &FinancingRequestDraft,
    start: Option<NaiveDate>,
    errors: &mut ValidationErrors,
) {
    if draft.end_date.is_empty() {
        errors.insert(Field::EndDate, "End date is required.");
        return;
    }
    let Some(end) = parse_form_date(&draft.end_date) else {
        errors.insert(Field::EndDate, "End date must be a valid date (YYYY-MM-DD).");
        return;
    };
    // Without a usable start date the window cannot be measured; the start
    // field already carries its own error.
    let Some(start) = start else {
        return;
    };

    let min_end = add_calendar_years(start, MIN_END_YEARS);
    let max_end = add_calendar_years(start, MAX_END_YEARS);

    if end <= start {
        errors.insert(Field::EndDate, "End date must be after the start date.");
    } else if min_end.is_some_and(|min| end < min) {
        errors.insert(
            Field::EndDate,
            "End date must be at least one year after the start date.",
        );
    } else if max_end.is_some_and(|max| end > max) {
        errors.insert(
            Field::EndDate,
            "End date must be no more than three years from the start date.",
        );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use finreq_schemas::Currency;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn valid_draft() -> FinancingRequestDraft {
        FinancingRequestDraft {
            name: "Ada".to_string(),
            surname: "Lovelace".to_string(),
            country: "France".to_string(),
            project_code: "ABCD-1234".to_string(),
            description: "Analytical engine prototype".to_string(),
            amount: Some(250000.0),
            currency: Some(Currency::Eur),
            start_date: "2024-02-01".to_string(),
            end_date: "2025-02-01".to_string(),
        }
    }

    fn today() -> NaiveDate {
        ymd(2024, 1, 1)
    }

    #[test]
    fn project_code_pattern_compiles_and_matches() {
        assert!(is_valid_project_code("ABCD-1234"));
        assert!(is_valid_project_code("ZZZZ-9999"));
        assert!(!is_valid_project_code("abcd-1234"));
        assert!(!is_valid_project_code("ABC-1234"));
        assert!(!is_valid_project_code("ABCD-0000"));
        assert!(!is_valid_project_code("ABCD-1204"));
        assert!(!is_valid_project_code("ABCD-12345"));
        assert!(!is_valid_project_code(" ABCD-1234"));
    }

    #[test]
    fn valid_draft_has_no_errors() {
        let errs = validate(&valid_draft(), today());
        assert!(errs.is_empty(), "unexpected errors: {errs:?}");
    }

    #[test]
    fn empty_draft_reports_every_text_field() {
        let errs = validate(&FinancingRequestDraft::default(), today());
        for f in Field::ALL {
            if f == Field::Currency {
                assert!(!errs.contains(f), "currency defaults to USD");
            } else {
                assert!(errs.contains(f), "missing error for {f}");
            }
        }
        assert_eq!(errs.get(Field::Name), Some("First Name is required."));
        assert_eq!(errs.get(Field::ProjectCode), Some("Project code is required."));
    }

    #[test]
    fn cleared_currency_is_required() {
        let mut d = valid_draft();
        d.currency = None;
        let errs = validate(&d, today());
        assert_eq!(errs.get(Field::Currency), Some("Currency is required."));
        assert_eq!(errs.len(), 1);
    }

    #[test]
    fn whitespace_only_is_present() {
        let mut d = valid_draft();
        d.surname = "   ".to_string();
        d.name = " ".to_string();
        assert!(validate(&d, today()).is_empty());

        d.project_code = "  ".to_string();
        assert_eq!(
            validate(&d, today()).get(Field::ProjectCode),
            Some("Project Code should be in the format XXXX-XXXX (e.g., ABCD-1234)")
        );
    }

    #[test]
    fn amount_must_be_a_positive_number() {
        let cases = [
            (None, Some("Amount is required.")),
            (Some(0.0), Some("Amount is required.")),
            (Some(f64::NAN), Some("Amount is required.")),
            (Some(-5.0), Some("Amount must be a positive number.")),
            (Some(f64::INFINITY), Some("Amount must be a positive number.")),
            (Some(0.01), None),
            (Some(250000.0), None),
        ];
        for (amount, expected) in cases {
            let mut d = valid_draft();
            d.amount = amount;
            assert_eq!(
                validate(&d, today()).get(Field::Amount),
                expected,
                "amount={amount:?}"
            );
        }
    }

    #[test]
    fn start_date_lead_time_boundary() {
        let mut d = valid_draft();
        d.start_date = "2024-01-10".to_string();
        d.end_date = "2025-01-10".to_string();
        assert_eq!(
            validate(&d, today()).get(Field::StartDate),
            Some("Start date must be at least 15 days from today.")
        );

        d.start_date = "2024-01-15".to_string();
        d.end_date = "2025-01-15".to_string();
        assert!(validate(&d, today()).contains(Field::StartDate));

        d.start_date = "2024-01-16".to_string();
        d.end_date = "2025-01-16".to_string();
        assert!(validate(&d, today()).is_empty());
    }

    #[test]
    fn unparsable_dates_are_reported() {
        let mut d = valid_draft();
        d.start_date = "01/02/2024".to_string();
        let errs = validate(&d, today());
        assert_eq!(
            errs.get(Field::StartDate),
            Some("Start date must be a valid date (YYYY-MM-DD).")
        );
        // no usable start: the end date window is not evaluated
        assert!(!errs.contains(Field::EndDate));

        let mut d = valid_draft();
        d.end_date = "2025-02-30".to_string();
        assert_eq!(
            validate(&d, today()).get(Field::EndDate),
            Some("End date must be a valid date (YYYY-MM-DD).")
        );
    }

    #[test]
    fn end_date_window() {
        let cases = [
            ("2024-02-01", Some("End date must be after the start date.")),
            ("2024-01-20", Some("End date must be after the start date.")),
            (
                "2024-06-01",
                Some("End date must be at least one year after the start date."),
            ),
            ("2025-01-31", Some("End date must be at least one year after the start date.")),
            ("2025-02-01", None),
            ("2026-07-15", None),
            ("2027-02-01", None),
            (
                "2027-02-02",
                Some("End date must be no more than three years from the start date."),
            ),
        ];
        for (end, expected) in cases {
            let mut d = valid_draft();
            d.end_date = end.to_string();
            assert_eq!(
                validate(&d, today()).get(Field::EndDate),
                expected,
                "endDate={end}"
            );
        }
    }

    #[test]
    fn end_window_is_measured_from_a_too_early_start() {
        let mut d = valid_draft();
        d.start_date = "2024-01-05".to_string();
        d.end_date = "2024-06-01".to_string();
        let errs = validate(&d, today());
        assert!(errs.contains(Field::StartDate));
        assert_eq!(
            errs.get(Field::EndDate),
            Some("End date must be at least one year after the start date.")
        );
    }

    #[test]
    fn calendar_years_not_day_offsets() {
        // 2024 is a leap year: +1 year from 2024-02-01 is 2025-02-01, not 2025-01-31.
        assert_eq!(add_calendar_years(ymd(2024, 2, 1), 1), Some(ymd(2025, 2, 1)));
        assert_eq!(add_calendar_years(ymd(2023, 3, 1), 1), Some(ymd(2024, 3, 1)));
        // Feb 29 rolls to Mar 1 when the target year has no Feb 29.
        assert_eq!(add_calendar_years(ymd(2024, 2, 29), 1), Some(ymd(2025, 3, 1)));
        assert_eq!(add_calendar_years(ymd(2024, 2, 29), 4), Some(ymd(2028, 2, 29)));
    }

    #[test]
    fn leap_day_start_window() {
        let mut d = valid_draft();
        d.start_date = "2024-02-29".to_string();
        d.end_date = "2025-02-28".to_string();
        assert!(validate(&d, today()).contains(Field::EndDate));
        d.end_date = "2025-03-01".to_string();
        assert!(validate(&d, today()).is_empty());
    }

    #[test]
    fn errors_serialize_keyed_by_form_names() {
        let mut d = valid_draft();
        d.project_code = "abcd-1234".to_string();
        d.name.clear();
        let v = serde_json::to_value(validate(&d, today())).unwrap();
        assert_eq!(v["name"], "First Name is required.");
        assert_eq!(
            v["projectCode"],
            "Project Code should be in the format XXXX-XXXX (e.g., ABCD-1234)"
        );
        assert_eq!(v.as_object().unwrap().len(), 2);
    }

    #[test]
    fn retain_filters_fields() {
        let mut errs = validate(&FinancingRequestDraft::default(), today());
        errs.retain(|f| f == Field::Country);
        assert_eq!(errs.fields().collect::<Vec<_>>(), vec![Field::Country]);
    }
}
