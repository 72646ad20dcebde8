use anyhow::Result;
use clap::Parser;

use heritage::cli::args::CliArgs;

fn main() -> Result<()> {
    // Initialize tracing if HERITAGE_LOG or RUST_LOG is set.
    heritage::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    heritage::cli::run(&args, &mut out)
}
