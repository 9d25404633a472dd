mod cli;
mod commands;
mod logging;
mod output;
mod token;

use admin_client::config::ClientConfig;
use admin_client::routes::{ADMIN_ROOT, LOGIN_PATH};
use admin_client::session::Session;
use admin_client::AdminClient;
use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::rc::Rc;
use token::{CliNavigator, TokenManager};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let mut config = ClientConfig::from_env();
    if let Some(server) = cli.server {
        config.base_url = server;
    }
    tracing::debug!("Using API at {}", config.base_url);

    let tokens = Rc::new(TokenManager::new(cli.token_file)?);
    let start = match cli.command {
        Commands::Login { .. } => LOGIN_PATH,
        _ => ADMIN_ROOT,
    };
    let session = Session::new(tokens.clone(), Rc::new(CliNavigator::new(start)));
    let client = AdminClient::native(config, session);

    if let Err(e) = commands::run(&client, &tokens, cli.command).await {
        output::error(format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
