//! finreq-config
//!
//! Layered YAML configuration for the financing-request form.
//!
//! Layers are applied in order, later documents overriding earlier ones key
//! by key, and the result is read into [`FormConfig`]. A key the form does not
//! read is an error, so a misspelt key cannot fall back to its default
//! unnoticed. [`FormConfig::config_hash`] identifies the effective settings in
//! logs.

mod form;

pub use form::{
    CountriesConfig, FormConfig, NotificationConfig, SubmissionConfig, ENV_COUNTRIES_URL,
    ENV_SUBMIT_URL,
};

use std::fs;

use anyhow::{Context, Result};
use serde_yaml::{Mapping, Value};

/// Read and layer the YAML files at `paths`, first to last.
pub fn load_layered_yaml(paths: &[&str]) -> Result<FormConfig> {
    let mut docs: Vec<String> = Vec::with_capacity(paths.len());
    for p in paths {
        let raw =
            fs::read_to_string(p).with_context(|| format!("failed to read yaml path: {p}"))?;
        docs.push(raw);
    }

    let doc_refs: Vec<&str> = docs.iter().map(|s| s.as_str()).collect();
    load_layered_yaml_from_strings(&doc_refs)
}

pub fn load_layered_yaml_from_strings(yaml_docs: &[&str]) -> Result<FormConfig> {
    let mut merged = Value::Mapping(Mapping::new());
    for (layer_no, raw) in yaml_docs.iter().enumerate() {
        let layer: Value = serde_yaml::from_str(raw)
            .with_context(|| format!("invalid yaml in config layer {layer_no}"))?;
        // An empty document carries no settings.
        if layer.is_null() {
            continue;
        }
        overlay(&mut merged, layer);
    }
    serde_yaml::from_value(merged).context("config does not match the form config shape")
}

/// Apply `layer` over `base`: mappings merge per key, anything else replaces.
fn overlay(base: &mut Value, layer: Value) {
    match (base, layer) {
        (Value::Mapping(base_map), Value::Mapping(layer_map)) => {
            for (key, value) in layer_map {
                match base_map.get_mut(&key) {
                    Some(slot) => overlay(slot, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
