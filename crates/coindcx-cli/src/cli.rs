//! Command-line definition
//!
//! Global options are regular clap flags. Everything after the method name is
//! captured raw and parsed against the method schema, which also accepts the
//! client options in `--key=value` form.

use clap::{Args, Parser, Subcommand};
use coindcx_rest::{ClientConfig, Credentials, DEFAULT_TIMEOUT_SECS};

use crate::error::CliError;
use crate::schema::{convert, split_arg, ArgValue, ParamKind};

/// CoinDCX exchange command-line client
#[derive(Debug, Parser)]
#[command(name = "coindcx")]
#[command(about = "Call CoinDCX REST API methods from the command line")]
#[command(version)]
#[command(after_help = "Run `coindcx methods` to list every method and its parameters.")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Options that apply to every method
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// API key
    #[arg(long, env = "COINDCX_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// API secret
    #[arg(long, env = "COINDCX_API_SECRET", hide_env_values = true)]
    pub api_secret: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Print single-line JSON
    #[arg(long)]
    pub compact: bool,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List every method with its parameters and defaults
    Methods,

    /// Call a method: `coindcx <method> [--param=value ...]`
    #[command(external_subcommand)]
    Call(Vec<String>),
}

/// Resolved client options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub timeout_secs: u64,
    pub compact: bool,
}

impl From<&GlobalArgs> for ClientOptions {
    fn from(args: &GlobalArgs) -> Self {
        Self {
            api_key: args.api_key.clone(),
            api_secret: args.api_secret.clone(),
            timeout_secs: args.timeout,
            compact: args.compact,
        }
    }
}

impl ClientOptions {
    /// Apply a client option given among the method arguments
    ///
    /// Returns `Ok(false)` when `name` is not a client option.
    pub fn apply(&mut self, name: &str, raw: &str) -> Result<bool, CliError> {
        match name {
            "api_key" => self.api_key = Some(raw.to_string()),
            "api_secret" => self.api_secret = Some(raw.to_string()),
            "timeout" => {
                self.timeout_secs = match convert(ParamKind::Int, raw)? {
                    ArgValue::Int(secs) if secs > 0 => secs as u64,
                    ArgValue::Int(secs) => {
                        return Err(CliError::usage(format!(
                            "Invalid value for --timeout: {secs} (must be at least 1 second)"
                        )))
                    }
                    _ => self.timeout_secs,
                }
            }
            "pretty" => {
                if let ArgValue::Bool(pretty) = convert(ParamKind::Bool, raw)? {
                    self.compact = !pretty;
                }
            }
            "compact" => {
                if let ArgValue::Bool(compact) = convert(ParamKind::Bool, raw)? {
                    self.compact = compact;
                }
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// Client configuration for these options
    ///
    /// Empty strings count as unset credentials.
    pub fn to_config(&self) -> ClientConfig {
        let credentials = Credentials::from_parts(self.api_key.clone(), self.api_secret.clone());
        ClientConfig::new()
            .with_credentials(credentials)
            .with_timeout(self.timeout_secs)
    }
}

/// Split raw method arguments into client options and method parameters
pub fn split_method_args(
    options: &mut ClientOptions,
    raw: &[String],
) -> Result<Vec<(String, String)>, CliError> {
    let mut params = Vec::with_capacity(raw.len());
    for arg in raw {
        let (name, value) = split_arg(arg)?;
        if !options.apply(&name, value)? {
            params.push((name, value.to_string()));
        }
    }
    Ok(params)
}
