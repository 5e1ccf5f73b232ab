use clap::Parser;
use portfolio_rust::{browse, cli, commands, config, error};
use cli::{Cli, Commands};
use commands::ListOptions;
use config::Config;
use error::Result;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load()?;
    if let Some(store) = cli.store.clone() {
        config.store_path = Some(store);
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::List { category, status, technologies, pages, json } => {
            let mut portfolio = commands::open_portfolio(&config)?;
            let options = ListOptions { category, status, technologies, pages };
            commands::list(&mut portfolio, &options, json, &mut out)?;
        }

        Commands::Open { id, json } => {
            let portfolio = commands::open_portfolio(&config)?;
            commands::open(&portfolio, id, json, &mut out)?;
        }

        Commands::Views { normalize, json } => {
            let portfolio = commands::open_portfolio(&config)?;
            commands::views(&portfolio, normalize, json, &mut out)?;
        }

        Commands::Techs => {
            let portfolio = commands::open_portfolio(&config)?;
            commands::techs(&portfolio, &mut out)?;
        }

        Commands::Stats => {
            let portfolio = commands::open_portfolio(&config)?;
            commands::stats(&portfolio, &mut out)?;
        }

        Commands::Validate => {
            let portfolio = commands::open_portfolio(&config)?;
            commands::validate(&portfolio, &mut out)?;
        }

        Commands::Config { set_store, show } => {
            if let Some(path) = set_store {
                config.set_store_path(path)?;
                println!("✔ 閲覧数ストアを設定しました");
            }

            if show {
                commands::show_config(&config, &mut out)?;
            }
        }

        Commands::Browse => {
            println!("📁 portfolio - ブラウズ\n");
            let mut portfolio = commands::open_portfolio(&config)?;
            browse::run_interactive_browse(&mut portfolio)?;
        }
    }

    Ok(())
}
