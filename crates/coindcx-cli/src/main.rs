//! CoinDCX CLI
//!
//! - `coindcx <method> [--param=value ...]`: call a client method
//! - `coindcx methods`: list every method with its parameters

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use coindcx_cli::{Cli, EXIT_USAGE};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays JSON
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive("coindcx=warn".parse()?)
                .from_env_lossy(),
        )
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { EXIT_USAGE } else { 0 };
            e.print()?;
            std::process::exit(code);
        }
    };

    match coindcx_cli::run(cli).await {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", e.report());
            std::process::exit(e.exit_code());
        }
    }
}
