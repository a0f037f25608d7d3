//! `finreq submit`: open a form session against the configured endpoints,
//! fill it from a draft file and submit once.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{bail, Result};
use chrono::NaiveDate;
use finreq_config::FormConfig;
use finreq_directory::RestCountriesDirectory;
use finreq_form::{
    FormSession, Notification, SubmissionOutcome, SubmissionWorkflow, SubmitAttempt,
};
use finreq_schemas::Field;
use tracing::warn;

use super::reject_unknown_names;

pub async fn run(
    cfg: &FormConfig,
    fields: &BTreeMap<String, String>,
    today: NaiveDate,
) -> Result<()> {
    reject_unknown_names(fields)?;

    let directory = RestCountriesDirectory::new_with_base_url(cfg.countries.base_url.clone());
    let workflow = Arc::new(SubmissionWorkflow::from_config(cfg));
    let mut session = FormSession::open(&directory, workflow, cfg.dismiss_after()).await;

    for field in Field::ALL {
        let Some(value) = fields.get(field.as_str()) else {
            continue;
        };
        // No list means no selectable country; validation reports it as missing.
        if field == Field::Country && session.countries().is_empty() {
            warn!(country = %value, "country list unavailable, country left unselected");
            continue;
        }
        session.set_field(field, value)?;
    }

    match session.submit(today).await {
        SubmitAttempt::Invalid(errors) => {
            println!("{}", serde_json::to_string_pretty(&errors)?);
            bail!("draft has {} invalid field(s)", errors.len());
        }
        SubmitAttempt::AlreadySubmitting => bail!("a submission is already in flight"),
        SubmitAttempt::Completed {
            submission_id,
            outcome,
        } => {
            let banner = Notification::for_outcome(&outcome, cfg.dismiss_after());
            println!("submission_id={submission_id}");
            println!("{}", serde_json::to_string(&banner)?);
            if let SubmissionOutcome::Failure(reason) = outcome {
                bail!("submission failed: {reason}");
            }
            Ok(())
        }
    }
}
