use std::path::PathBuf;

use gumdrop::Options as _;
use ircbot::{config::Config, stock::Stock};
use ircbot_core::prelude::{Dispatcher, Registry};

#[derive(Debug, gumdrop::Options)]
struct Args {
    /// prints the help message
    help: bool,

    /// increases the log verbosity, can be repeated
    #[options(count)]
    verbose: u32,

    /// configuration file to use
    #[options(meta = "<PATH>", default = "ircbot.toml")]
    config: PathBuf,
}

fn init_logger(verbose: u32) -> anyhow::Result<()> {
    let level = match verbose {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Warn,
        2 => log::LevelFilter::Info,
        3 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    let from_env = std::env::var_os("RUST_LOG").is_some();
    if !from_env {
        std::env::set_var("RUST_LOG", level.as_str().to_ascii_lowercase());
    }

    alto_logger::TermLogger::new(
        alto_logger::Options::default()
            .with_time(alto_logger::TimeConfig::relative_now())
            .with_style(alto_logger::StyleConfig::SingleLine),
    )?
    .init()?;

    if !from_env {
        log::set_max_level(level);
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    simple_env_load::load_env_from([".env", ".dev.env"]);
    let Args {
        verbose, config, ..
    } = Args::parse_args_default_or_exit();

    init_logger(verbose)?;

    log::info!("loading configuration from {}", config.display());
    let config = Config::load(&config)?;

    log::trace!("binding commands");
    let registry = Stock::bind(Registry::new(), &config.stock)?;
    for cmd in registry.commands() {
        log::info!("registered {cmd}");
    }

    let dispatcher = Dispatcher::new(registry).with_timeout(config.bot.handler_timeout());

    ircbot_irc::create_bot(&config.irc, dispatcher).await
}
