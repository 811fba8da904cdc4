//! Configuration loading with layered precedence.
//!
//! This module resolves a [`BuildConfig`] from three layers, lowest to
//! highest precedence: application defaults, environment variables, and
//! command-line arguments. Each layer is expressed as a JSON value and merged
//! with `ortho_config`'s `MergeComposer`.
//!
//! # Environment Variable Handling
//!
//! Every option `x` is looked up under three candidate names, in priority
//! order: `X`, `SQ_X` and `INPUT_X` (the form CI actions expose their inputs
//! under). The first candidate present wins. `GITHUB_WORKSPACE` supplies the
//! repository root when none of the `REPO` candidates is set.
//!
//! Booleans follow a permissive grammar: `0`, `false`, `no` and the empty
//! string (in any case) are false, anything else is true. Integer options
//! fail fast: an unparseable value aborts loading with
//! [`ConfigError::InvalidValue`] naming the offending variable.

use ortho_config::MergeComposer;
use ortho_config::serde_json::{self, Map, Value};
use tracing::info;

use crate::config::{BuildConfig, Cli};
use crate::error::{ConfigError, Result};
use crate::redact::to_redacted_json;

// ============================================================================
// Environment Variable Specification Table
// ============================================================================

/// The type of value expected from an environment variable.
#[derive(Clone, Copy)]
enum EnvVarType {
    /// String value (always accepted).
    String,
    /// Filesystem path (always accepted).
    Path,
    /// Boolean value using the permissive CI grammar.
    Bool,
    /// Unsigned 32-bit integer. Invalid values return an error.
    U32,
}

/// Specification for a single configuration field's environment mapping.
struct EnvVarSpec {
    /// The configuration field name (e.g., `build_dir`).
    field: &'static str,
    /// The expected value type.
    var_type: EnvVarType,
}

/// Prefixes tried, in priority order, in front of the uppercased field name.
const ENV_PREFIXES: &[&str] = &["", "SQ_", "INPUT_"];

/// Variable set by GitHub Actions to the checked-out repository root.
const GITHUB_WORKSPACE: &str = "GITHUB_WORKSPACE";

/// Table of all configuration fields readable from the environment.
const ENV_VAR_SPECS: &[EnvVarSpec] = &[
    EnvVarSpec {
        field: "build_dir",
        var_type: EnvVarType::Path,
    },
    EnvVarSpec {
        field: "build_type",
        var_type: EnvVarType::String,
    },
    EnvVarSpec {
        field: "clang_tidy",
        var_type: EnvVarType::Bool,
    },
    EnvVarSpec {
        field: "coverage",
        var_type: EnvVarType::Bool,
    },
    EnvVarSpec {
        field: "coveralls_repo_token",
        var_type: EnvVarType::String,
    },
    EnvVarSpec {
        field: "cxx_compiler",
        var_type: EnvVarType::String,
    },
    EnvVarSpec {
        field: "install_prefix",
        var_type: EnvVarType::String,
    },
    EnvVarSpec {
        field: "jobs",
        var_type: EnvVarType::U32,
    },
    EnvVarSpec {
        field: "repo",
        var_type: EnvVarType::Path,
    },
    EnvVarSpec {
        field: "test",
        var_type: EnvVarType::Bool,
    },
];

/// Returns the candidate environment variable names for `field`, highest
/// priority first.
#[must_use]
pub fn env_var_candidates(field: &str) -> Vec<String> {
    let upper = field.to_ascii_uppercase();
    ENV_PREFIXES
        .iter()
        .map(|prefix| format!("{prefix}{upper}"))
        .collect()
}

/// Returns every environment variable name recognised by the config loader.
///
/// Tests use this to clear the process environment before exercising
/// [`load_config`] against real variables.
#[must_use]
pub fn env_var_names() -> Vec<String> {
    std::iter::once(String::from(GITHUB_WORKSPACE))
        .chain(
            ENV_VAR_SPECS
                .iter()
                .flat_map(|spec| env_var_candidates(spec.field)),
        )
        .collect()
}

/// Parses a boolean environment value.
///
/// `0`, `false`, `no` and the empty string are false regardless of case;
/// every other value, including typos, is true.
#[must_use]
pub fn parse_env_bool(raw: &str) -> bool {
    !matches!(
        raw.to_ascii_uppercase().as_str(),
        "0" | "FALSE" | "NO" | ""
    )
}

// ============================================================================
// Layer collection
// ============================================================================

/// Load configuration with full layer precedence.
///
/// Each layer and the merged result are logged at `info` with secrets
/// redacted.
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - an integer environment variable holds an unparseable value
/// - a layer cannot be serialised or the layers cannot be merged
pub fn load_config<E: mockable::Env>(cli: &Cli, env: &E) -> Result<BuildConfig> {
    let mut composer = MergeComposer::new();

    // Layer 1: Defaults (serialised from BuildConfig::default()).
    let defaults =
        serde_json::to_value(BuildConfig::default()).map_err(|e| ConfigError::Serialise {
            layer: "defaults",
            message: e.to_string(),
        })?;
    log_layer("defaults", &defaults);
    composer.push_defaults(defaults);

    // Layer 2: Environment variables.
    let env_values = collect_env_vars(env)?;
    log_layer("environment", &env_values);
    composer.push_environment(env_values);

    // Layer 3: CLI overrides.
    let cli_overrides = build_cli_overrides(cli);
    log_layer("command line", &cli_overrides);
    composer.push_cli(cli_overrides);

    // The post-merge hook rebases a relative build directory under the repo.
    let config =
        BuildConfig::merge_from_layers(composer.layers()).map_err(ConfigError::OrthoConfig)?;

    let merged = serde_json::to_value(&config).map_err(|e| ConfigError::Serialise {
        layer: "merged",
        message: e.to_string(),
    })?;
    info!(config = %to_redacted_json(&merged), "resolved configuration");

    Ok(config)
}

fn log_layer(layer: &str, values: &Value) {
    info!(layer, values = %to_redacted_json(values), "configuration layer");
}

/// Collect recognised environment variables into a JSON object.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` if an integer variable cannot be
/// parsed.
fn collect_env_vars<E: mockable::Env>(env: &E) -> Result<Value> {
    let mut root = Map::new();

    if let Some(workspace) = env.string(GITHUB_WORKSPACE) {
        root.insert(String::from("repo"), Value::String(workspace));
    }

    for spec in ENV_VAR_SPECS {
        let Some((var_name, raw_value)) = env_var_candidates(spec.field)
            .into_iter()
            .find_map(|name| env.string(&name).map(|value| (name, value)))
        else {
            continue;
        };

        let json_value = convert_env_value(spec.var_type, &var_name, raw_value)?;
        root.insert(spec.field.to_owned(), json_value);
    }

    Ok(Value::Object(root))
}

/// Convert a raw environment string according to the field's declared type.
fn convert_env_value(var_type: EnvVarType, var_name: &str, raw_value: String) -> Result<Value> {
    let value = match var_type {
        EnvVarType::String | EnvVarType::Path => Value::String(raw_value),
        EnvVarType::Bool => Value::Bool(parse_env_bool(&raw_value)),
        EnvVarType::U32 => match raw_value.trim().parse::<u32>() {
            Ok(n) => Value::Number(n.into()),
            Err(_) => {
                return Err(ConfigError::InvalidValue {
                    field: var_name.to_owned(),
                    reason: format!("expected unsigned integer, got '{raw_value}'"),
                }
                .into());
            }
        },
    };
    Ok(value)
}

/// Build a JSON value containing CLI overrides.
///
/// Only options the user actually passed are included. Boolean flags are
/// presence-triggered, so an absent flag never resets a value from a lower
/// layer.
fn build_cli_overrides(cli: &Cli) -> Value {
    let mut overrides = Map::new();

    let strings = [
        ("build_dir", cli.build_dir.as_ref().map(ToString::to_string)),
        ("build_type", cli.build_type.clone()),
        ("coveralls_repo_token", cli.coveralls_repo_token.clone()),
        ("cxx_compiler", cli.cxx_compiler.clone()),
        ("install_prefix", cli.install_prefix.clone()),
        ("repo", cli.repo.as_ref().map(ToString::to_string)),
    ];
    for (field, value) in strings {
        if let Some(value) = value {
            overrides.insert(field.to_owned(), Value::String(value));
        }
    }

    let flags = [
        ("clang_tidy", cli.clang_tidy),
        ("coverage", cli.coverage),
        ("test", cli.test),
    ];
    for (field, set) in flags {
        if set {
            overrides.insert(field.to_owned(), Value::Bool(true));
        }
    }

    if let Some(jobs) = cli.jobs {
        overrides.insert(String::from("jobs"), Value::Number(jobs.into()));
    }

    Value::Object(overrides)
}
