//! One open financing-request form.
//!
//! The session owns the draft and is the only thing that mutates it. Every
//! mutation goes through [`FormSession::set_field`], which applies the input
//! constraints of the rendered controls and then re-runs the OPEC currency
//! rule, so the amount prefix always matches the selected currency.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use finreq_directory::{load_countries_or_empty, CountryDirectory};
use finreq_rules::{currency_symbol, validate, ValidationErrors};
use finreq_schemas::{Field, FinancingRequestDraft};
use tracing::debug;

use crate::error::FieldInputError;
use crate::input::bind_input;
use crate::notification::Notification;
use crate::workflow::{SubmissionWorkflow, SubmitAttempt};

pub struct FormSession {
    draft: FinancingRequestDraft,
    countries: Vec<String>,
    touched: BTreeSet<Field>,
    workflow: Arc<SubmissionWorkflow>,
    notification: Option<Notification>,
    dismiss_after: Duration,
}

impl FormSession {
    /// Open a session, fetching the country list once.
    ///
    /// A failed fetch leaves the list empty; see
    /// [`finreq_directory::load_countries_or_empty`].
    pub async fn open(
        directory: &dyn CountryDirectory,
        workflow: Arc<SubmissionWorkflow>,
        dismiss_after: Duration,
    ) -> Self {
        let countries = load_countries_or_empty(directory).await;
        Self::with_countries(countries, workflow, dismiss_after)
    }

    pub fn with_countries(
        countries: Vec<String>,
        workflow: Arc<SubmissionWorkflow>,
        dismiss_after: Duration,
    ) -> Self {
        Self {
            draft: FinancingRequestDraft::default(),
            countries,
            touched: BTreeSet::new(),
            workflow,
            notification: None,
            dismiss_after,
        }
    }

    pub fn draft(&self) -> &FinancingRequestDraft {
        &self.draft
    }

    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Change handler keyed by form input name (e.g. `"projectCode"`).
    pub fn set_field_by_name(&mut self, name: &str, value: &str) -> Result<(), FieldInputError> {
        let field =
            Field::from_name(name).ok_or_else(|| FieldInputError::UnknownField(name.to_string()))?;
        self.set_field(field, value)
    }

    /// Set `field` to `value` and re-derive the currency.
    ///
    /// `country` accepts names from the fetched list; an empty value clears
    /// it. Every other field is bound by [`bind_input`].
    pub fn set_field(&mut self, field: Field, value: &str) -> Result<(), FieldInputError> {
        if field == Field::Country
            && !value.is_empty()
            && !self.countries.iter().any(|c| c == value)
        {
            return Err(FieldInputError::UnknownCountry(value.to_string()));
        }
        if bind_input(&mut self.draft, field, value)? {
            debug!(country = %self.draft.country, "currency forced to USD for OPEC member");
        }
        self.touched.insert(field);
        Ok(())
    }

    /// Mark `field` as visited without changing it (blur).
    pub fn touch(&mut self, field: Field) {
        self.touched.insert(field);
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    /// Clear the draft and touched set. The country list is kept.
    pub fn reset(&mut self) {
        self.draft = FinancingRequestDraft::default();
        self.touched.clear();
    }

    // -----------------------------------------------------------------------
    // Derived views
    // -----------------------------------------------------------------------

    /// Symbol shown in front of the amount input; empty with no currency.
    pub fn amount_prefix(&self) -> &'static str {
        self.draft.currency.map(currency_symbol).unwrap_or("")
    }

    pub fn errors(&self, today: NaiveDate) -> ValidationErrors {
        validate(&self.draft, today)
    }

    /// Errors for touched fields only, as displayed inline.
    pub fn visible_errors(&self, today: NaiveDate) -> ValidationErrors {
        let mut errors = self.errors(today);
        errors.retain(|f| self.touched.contains(&f));
        errors
    }

    /// `true` while a request is in flight; the submit control is disabled.
    pub fn is_submitting(&self) -> bool {
        self.workflow.is_submitting()
    }

    /// The last notification, while it is still on screen.
    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref().filter(|n| n.is_visible())
    }

    // -----------------------------------------------------------------------
    // Submit
    // -----------------------------------------------------------------------

    /// Submit the current draft.
    ///
    /// Every field is marked touched so all errors become visible. A finished
    /// request replaces the notification. The draft is left as it was.
    pub async fn submit(&mut self, today: NaiveDate) -> SubmitAttempt {
        self.touched.extend(Field::ALL);

        let attempt = self.workflow.submit(&self.draft, today).await;
        if let Some(outcome) = attempt.outcome() {
            self.notification = Some(Notification::for_outcome(outcome, self.dismiss_after));
        }
        attempt
    }
}
