mod adapters;
mod cli;
mod config;
mod core;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands};

fn main() {
    let args = Cli::parse();

    let default_filter = if args.verbose {
        "vpnport=debug"
    } else {
        "vpnport=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    cli::context::init(&args.dir);

    let result = match &args.command {
        Commands::Init => cli::commands::init::execute(),
        Commands::Import {
            file,
            name,
            passphrase,
            unknown_directives,
        } => cli::commands::import::execute(
            file,
            name.as_deref(),
            passphrase.as_deref(),
            *unknown_directives,
        ),
        Commands::Imported => cli::commands::imported::execute(),
        Commands::List => cli::commands::list::execute(),
        Commands::AddProvider { name } => cli::commands::add_provider::execute(name.as_deref()),
        Commands::Activate { context, id } => cli::commands::activate::execute(context, id),
        Commands::Remove { context, id } => cli::commands::remove::execute(context, id),
        Commands::Status => cli::commands::status::execute(),
        Commands::Uninstall { yes } => cli::commands::uninstall::execute(*yes),
        Commands::Seal {
            file,
            output,
            passphrase,
        } => cli::commands::seal::execute(file, output.as_deref(), passphrase.as_deref()),
    };

    if let Err(e) = result {
        cli::output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}
