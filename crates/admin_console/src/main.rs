#![forbid(unsafe_code)]

//! Entry point for the `admin-console` binary.

use admin_console::app::App;
use admin_console::cli::Cli;
use admin_console::config::Config;
use admin_console::logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    logging::init(cli.verbose).map_err(|err| anyhow::anyhow!(err))?;

    let config = Config::load(&cli)?;

    let output = App::new(config).run(&cli.command)?;
    println!("{output}");
    Ok(())
}
