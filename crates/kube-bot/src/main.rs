//! kube-bot CLI
//!
//! Binary name: `kube-bot`

use std::process;

mod cli;

use cli::handlers::{format_error, run_cli};

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        #[allow(clippy::print_stderr)]
        {
            eprintln!("Error: {}", format_error(&err));
        }

        let code = err
            .downcast_ref::<kube_bot_core::Error>()
            .map_or(1, kube_bot_core::Error::exit_code);

        #[allow(clippy::exit)]
        process::exit(code);
    }
}
