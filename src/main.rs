use std::io;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{bail, Context};
use config::Config;
use filter::{FilterEngine, MAX_ITEM_LEN};
use present::Presenter;

mod charset;
mod config;
mod filter;
mod logging;
mod matching;
mod present;
mod source;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The key to filter by; every item matches when omitted
    key: Option<String>,

    /// Candidate items; read line by line from stdin when none are
    /// given
    items: Vec<String>,

    /// Export default config to default config directory
    /// (usually ~/.config/keyhint/config.yaml)
    #[clap(long, short, action)]
    export_default_config: bool,

    /// Enable diagnostic logging
    #[clap(long, short, action)]
    verbose: bool,

    /// Path at which to write diagnostic logs, instead of the default
    /// log directory
    #[clap(long)]
    log_to: Option<PathBuf>,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let config = Config::new(&args.export_default_config, args.verbose, args.log_to)
        .context("failed to load config")?;

    if config.logging {
        logging::initialize_logging(&config.log_path)
            .context("failed to initialise logging")?;
    }

    let key = args.key.unwrap_or_default();
    if key.len() > MAX_ITEM_LEN {
        bail!("key `{key}` is too long");
    }

    let engine = FilterEngine::new(config.logging);
    let result = if args.items.is_empty() {
        engine.run(&key, source::from_reader(io::stdin().lock()))
    } else {
        engine.run(&key, source::from_args(args.items))
    }
    .context("failed to filter candidate items")?;

    Presenter::new(&config).render(&mut io::stdout().lock(), &result)
}
