//! Subcommand definitions and handlers
//!
//! Every handler returns the JSON document printed on stdout.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Subcommand, ValueEnum};
use serde_json::{json, Value};
use zone_settings_provider::{
    validate_record_content, validate_record_type, Diagnostic, Registry, Resource, ResourceData,
    ZoneSettingsApi,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Kind {
    DataSource,
    Resource,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the schema of every registered data source and resource
    Schema,

    /// Check a configuration against a schema without calling the API
    Validate {
        /// Whether the type names a data source or a resource
        #[arg(value_enum)]
        kind: Kind,
        /// Type name, e.g. `cloudflare_zone_cache_reserve`
        type_name: String,
        /// JSON file holding the configuration attributes
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Read a data source
    Read {
        type_name: String,
        /// JSON file holding the configuration attributes
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Create or update a resource so it matches the configuration
    Apply {
        type_name: String,
        /// JSON file holding the configuration attributes
        #[arg(short, long)]
        config: PathBuf,
        /// Prior state as printed by an earlier `apply` or `import`
        #[arg(short, long)]
        state: Option<PathBuf>,
    },

    /// Delete a resource
    Destroy {
        type_name: String,
        /// State as printed by an earlier `apply` or `import`
        #[arg(short, long)]
        state: PathBuf,
    },

    /// Build state for an existing remote object
    Import {
        type_name: String,
        /// Import id (the zone id for Cache Reserve)
        id: String,
    },

    /// Validate a DNS record type and its content
    CheckRecord {
        /// Record type tag, e.g. `A` or `TXT`
        #[arg(short = 't', long = "type")]
        record_type: String,
        /// Record content
        #[arg(short, long)]
        content: String,
        /// Whether the record is proxied
        #[arg(long)]
        proxied: bool,
    },
}

impl Command {
    /// Whether the command talks to the remote API.
    pub fn needs_api(&self) -> bool {
        matches!(
            self,
            Self::Read { .. } | Self::Apply { .. } | Self::Destroy { .. } | Self::Import { .. }
        )
    }
}

/// Runs `command`. `api` must be present when [`Command::needs_api`] holds.
pub async fn execute(
    command: &Command,
    registry: &Registry,
    api: Option<&dyn ZoneSettingsApi>,
) -> Result<Value> {
    match command {
        Command::Schema => Ok(serde_json::to_value(registry.schemas())?),

        Command::Validate {
            kind,
            type_name,
            config,
        } => {
            let schema = match kind {
                Kind::DataSource => registry.data_source(type_name)?.schema(),
                Kind::Resource => registry.resource(type_name)?.schema(),
            };
            schema.validate(&load_attributes(config)?)?;
            Ok(json!({ "valid": true }))
        }

        Command::Read { type_name, config } => {
            let data_source = registry.data_source(type_name)?;
            let config = load_attributes(config)?;
            let state = data_source.read(require_api(api)?, &config).await?;
            Ok(serde_json::to_value(state)?)
        }

        Command::Apply {
            type_name,
            config,
            state,
        } => {
            let resource = registry.resource(type_name)?;
            let planned = load_attributes(config)?;
            let prior = state.as_deref().map(load_state).transpose()?;
            let state = apply(resource.as_ref(), require_api(api)?, &planned, prior).await?;
            Ok(serde_json::to_value(state)?)
        }

        Command::Destroy { type_name, state } => {
            let resource = registry.resource(type_name)?;
            let state = load_state(state)?;
            resource.delete(require_api(api)?, &state).await?;
            Ok(serde_json::to_value(ResourceData::new())?)
        }

        Command::Import { type_name, id } => {
            let resource = registry.resource(type_name)?;
            let state = resource.import(require_api(api)?, id).await?;
            Ok(serde_json::to_value(state)?)
        }

        Command::CheckRecord {
            record_type,
            content,
            proxied,
        } => {
            validate_record_type(record_type, *proxied)?;
            validate_record_content(record_type, content)?;
            Ok(json!({ "valid": true }))
        }
    }
}

/// Brings the remote object in line with `planned`.
///
/// Without prior state, or when the object vanished since, the resource is
/// created. Changes to force-new attributes delete and recreate it.
pub async fn apply(
    resource: &dyn Resource,
    api: &dyn ZoneSettingsApi,
    planned: &ResourceData,
    prior: Option<ResourceData>,
) -> Result<ResourceData> {
    let current = match prior {
        Some(prior) if prior.id().is_some() => resource.read(api, &prior).await?,
        _ => ResourceData::new(),
    };

    if current.id().is_none() {
        tracing::info!("Creating {}", resource.type_name());
        return Ok(resource.create(api, planned).await?);
    }

    match resource.update(api, &current, planned).await {
        Err(Diagnostic::RequiresReplacement { fields }) => {
            tracing::info!(
                "Replacing {} (changed: {})",
                resource.type_name(),
                fields.join(", ")
            );
            resource.delete(api, &current).await?;
            Ok(resource.create(api, planned).await?)
        }
        other => Ok(other?),
    }
}

fn require_api(api: Option<&dyn ZoneSettingsApi>) -> Result<&dyn ZoneSettingsApi> {
    api.context("command requires an API client")
}

fn read_json(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

/// Configuration file: a JSON object of attributes.
fn load_attributes(path: &Path) -> Result<ResourceData> {
    Ok(ResourceData::from_value(read_json(path)?)?)
}

/// State file: `{ "id": ..., "attributes": { ... } }`.
fn load_state(path: &Path) -> Result<ResourceData> {
    serde_json::from_value(read_json(path)?)
        .with_context(|| format!("{} is not a state document", path.display()))
}
