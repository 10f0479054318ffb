//! `coindcx` command-line client
//!
//! Calls any client method by name:
//!
//! ```text
//! coindcx get_orderbook --pair=B-BTC_USDT
//! coindcx --compact create_order --side=buy --order_type=limit_order \
//!     --market=SNTBTC --total_quantity=400 --price_per_unit=0.03244
//! coindcx methods
//! ```
//!
//! Results are printed as JSON on stdout. Failures go to stderr with an exit
//! code per error kind (see [`CliError::exit_code`]).

pub mod cli;
pub mod error;
pub mod methods;
pub mod schema;

pub use cli::{Cli, ClientOptions, Commands, GlobalArgs};
pub use error::{CliError, EXIT_USAGE};
pub use schema::{convert, ArgValue, MethodArgs, MethodSpec, ParamKind, ParamSpec};

use coindcx_rest::CoinDcxClient;
use serde_json::Value;
use tracing::debug;

/// A fully parsed method call
#[derive(Debug, Clone)]
pub struct Invocation {
    pub method: &'static MethodSpec,
    pub args: MethodArgs,
    pub options: ClientOptions,
}

/// Resolve `raw` (method name followed by `--key=value` arguments)
///
/// # Errors
/// `CliError::Usage` for an unknown method or bad arguments
pub fn prepare(global: &GlobalArgs, raw: &[String]) -> Result<Invocation, CliError> {
    let (name, rest) = raw
        .split_first()
        .ok_or_else(|| CliError::usage("No method given").with_usage("Usage: coindcx <method> [--param=value ...]"))?;

    let method = methods::find(name).ok_or_else(|| {
        CliError::usage(format!("Unknown method: {name}"))
            .with_usage("Run `coindcx methods` to list available methods")
    })?;

    let mut options = ClientOptions::from(global);
    let params = cli::split_method_args(&mut options, rest).map_err(|e| e.with_usage(method.usage()))?;
    let args = MethodArgs::parse(method, &params).map_err(|e| e.with_usage(method.usage()))?;

    Ok(Invocation {
        method,
        args,
        options,
    })
}

/// Run a prepared call against `client`
pub async fn invoke(client: &CoinDcxClient, invocation: &Invocation) -> Result<Value, CliError> {
    debug!(
        method = invocation.method.name,
        authenticated = invocation.method.authenticated,
        "Invoking method"
    );
    methods::dispatch(client, invocation.method, &invocation.args)
        .await
        .map_err(|e| e.with_usage(invocation.method.usage()))
}

/// Render a result as JSON text
pub fn render(value: &Value, compact: bool) -> Result<String, CliError> {
    let text = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    text.map_err(CliError::Output)
}

/// Execute a parsed command line and return the text for stdout
pub async fn run(cli: Cli) -> Result<String, CliError> {
    match cli.command {
        Commands::Methods => Ok(methods::render_method_list()),
        Commands::Call(raw) => {
            let invocation = prepare(&cli.global, &raw)?;
            let client = CoinDcxClient::with_config(invocation.options.to_config())?;
            let result = invoke(&client, &invocation).await;
            client.close();
            render(&result?, invocation.options.compact)
        }
    }
}
