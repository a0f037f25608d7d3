//! Command handler modules for finreq.
//!
//! Shared utilities used by multiple command paths live here.
//! Command-specific logic lives in the submodules.

pub mod submit;

use std::collections::BTreeMap;
use std::fs;

use anyhow::{bail, Context, Result};
use finreq_config::FormConfig;
use finreq_form::bind_input;
use finreq_schemas::{Field, FinancingRequestDraft};
use serde_json::Value;
use tracing::info;

// ---------------------------------------------------------------------------
// Draft files
// ---------------------------------------------------------------------------

/// Load a draft file: one JSON object keyed by form input name.
///
/// String, number and bool values are taken as typed text; `null` is empty.
pub fn load_draft_fields(path: &str) -> Result<BTreeMap<String, String>> {
    let bytes = fs::read(path).with_context(|| format!("read draft file failed: {path}"))?;
    let bytes = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(&bytes);
    let raw = String::from_utf8(bytes.to_vec()).context("draft file must be UTF-8 text")?;
    let v: Value = serde_json::from_str(raw.trim()).context("draft file must contain valid JSON")?;

    let Value::Object(map) = v else {
        bail!("draft file must contain a JSON object");
    };

    let mut fields = BTreeMap::new();
    for (name, value) in map {
        let text = match value {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null => String::new(),
            _ => bail!("draft field '{name}' must be a scalar"),
        };
        fields.insert(name, text);
    }
    Ok(fields)
}

/// Build a draft from named values without a country list.
///
/// Fields are bound in form order, exactly as a session binds them.
pub fn draft_from_fields(fields: &BTreeMap<String, String>) -> Result<FinancingRequestDraft> {
    reject_unknown_names(fields)?;

    let mut draft = FinancingRequestDraft::default();
    for field in Field::ALL {
        if let Some(value) = fields.get(field.as_str()) {
            bind_input(&mut draft, field, value)?;
        }
    }
    Ok(draft)
}

pub fn reject_unknown_names(fields: &BTreeMap<String, String>) -> Result<()> {
    let unknown: Vec<&str> = fields
        .keys()
        .filter(|k| Field::from_name(k).is_none())
        .map(|k| k.as_str())
        .collect();
    if !unknown.is_empty() {
        bail!("unknown draft field(s): {}", unknown.join(", "));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Load layered config and apply env overrides.
pub fn load_form_config(paths: &[String]) -> Result<FormConfig> {
    let mut cfg = if paths.is_empty() {
        FormConfig::default()
    } else {
        let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
        finreq_config::load_layered_yaml(&path_refs)?
    };
    cfg.apply_env_overrides();
    info!(
        config_hash = %cfg.config_hash()?,
        layers = paths.len(),
        submission_url = %cfg.submission_url(),
        "config loaded"
    );
    Ok(cfg)
}
