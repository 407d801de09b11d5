//! Structural validation of a raw config and conversion into `UserConfig`.

use indexmap::IndexMap;
use thiserror::Error;

use crate::schema::{
    ModelSpec, ProviderSpec, RawProvider, RawUserConfig, UserConfig, VirtualModelSpec,
};

/// Upper bound on the number of structural errors collected in one pass.
pub const MAX_REPORTED_ERRORS: usize = 20;

/// Fatal config defect. Any of these aborts resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error("configuration is missing 'providers'")]
    MissingProviders,

    #[error("'providers' must declare at least one provider")]
    EmptyProviders,

    #[error("provider id '{provider}' must be non-empty and must not contain '.' (providers.{provider})")]
    InvalidProviderId { provider: String },

    #[error("provider '{provider}' declares a model with an empty id (providers.{provider}.models)")]
    EmptyModelId { provider: String },

    #[error("provider '{provider}' is missing 'models' (providers.{provider}.models)")]
    MissingModels { provider: String },

    #[error("model '{model}' of provider '{provider}' is missing 'keys' (providers.{provider}.models.{model}.keys)")]
    MissingKeys { provider: String, model: String },

    #[error("model '{model}' of provider '{provider}' must declare at least one key (providers.{provider}.models.{model}.keys)")]
    EmptyKeys { provider: String, model: String },
}

/// Validation outcome: `is_valid` is true iff `errors` is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<StructuralError>,
}

impl ValidationReport {
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }
}

/// Check `raw` for structural defects, collecting up to [`MAX_REPORTED_ERRORS`]
/// in declaration order.
pub fn validate(raw: &RawUserConfig) -> ValidationReport {
    let mut errors = Vec::new();
    match raw.providers.as_ref() {
        None => errors.push(StructuralError::MissingProviders),
        Some(providers) if providers.is_empty() => errors.push(StructuralError::EmptyProviders),
        Some(providers) => {
            for (provider_id, provider) in providers {
                check_provider(provider_id, provider, &mut errors);
                if errors.len() >= MAX_REPORTED_ERRORS {
                    errors.truncate(MAX_REPORTED_ERRORS);
                    break;
                }
            }
        }
    }
    ValidationReport {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// Provider ids end at the first `.` of a pipeline id, so they may not contain
/// one. Model ids may: the key index is always the last segment.
fn check_provider(provider_id: &str, provider: &RawProvider, errors: &mut Vec<StructuralError>) {
    if provider_id.is_empty() || provider_id.contains('.') {
        errors.push(StructuralError::InvalidProviderId {
            provider: provider_id.to_string(),
        });
    }
    let Some(models) = provider.models.as_ref() else {
        errors.push(StructuralError::MissingModels {
            provider: provider_id.to_string(),
        });
        return;
    };
    for (model_id, model) in models {
        if model_id.is_empty() {
            errors.push(StructuralError::EmptyModelId {
                provider: provider_id.to_string(),
            });
        }
        match model.keys.as_ref() {
            None => errors.push(StructuralError::MissingKeys {
                provider: provider_id.to_string(),
                model: model_id.to_string(),
            }),
            Some(keys) if keys.is_empty() => errors.push(StructuralError::EmptyKeys {
                provider: provider_id.to_string(),
                model: model_id.to_string(),
            }),
            Some(_) => {}
        }
    }
}

/// Validate and convert. On failure returns the report so callers can
/// surface every collected message.
pub fn into_user_config(raw: &RawUserConfig) -> Result<UserConfig, ValidationReport> {
    let report = validate(raw);
    if !report.is_valid {
        return Err(report);
    }

    let mut providers = IndexMap::new();
    for (provider_id, provider) in raw.providers.iter().flatten() {
        let mut models = IndexMap::new();
        for (model_id, model) in provider.models.iter().flatten() {
            models.insert(
                model_id.clone(),
                ModelSpec {
                    keys: model.keys.clone().unwrap_or_default(),
                },
            );
        }
        providers.insert(
            provider_id.clone(),
            ProviderSpec {
                provider_type: provider.provider_type.clone(),
                endpoint: provider.endpoint.clone(),
                name: provider.name.clone(),
                enabled: provider.enabled.unwrap_or(true),
                models,
            },
        );
    }

    let virtual_models = raw
        .virtual_models
        .iter()
        .flatten()
        .map(|(name, vm)| (name.clone(), VirtualModelSpec::from(vm)))
        .collect();

    Ok(UserConfig {
        providers,
        virtual_models,
    })
}
