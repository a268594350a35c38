use clap::Parser;
use tracing_subscriber::EnvFilter;
use yamlvault::cli::{Cli, Commands};

fn main() {
    // Diagnostics go to stderr; stdout carries the transformed block.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Encrypt {
            ref file,
            ref context_line,
            ref vault_id,
        } => yamlvault::cli::commands::encrypt::execute(
            &cli,
            file.as_deref(),
            context_line,
            vault_id.as_deref(),
        ),
        Commands::Decrypt { ref file } => {
            yamlvault::cli::commands::decrypt::execute(&cli, file.as_deref())
        }
    };

    if let Err(e) = result {
        yamlvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
