//! Headless client for Thousand Online: watch a game from the terminal or
//! send single commands.

#[cfg(not(target_arch = "wasm32"))]
mod cli;

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use clap::Parser;
    use cli::{Cli, CliConfig, Commands, Printer};
    use thousand::GameClient;

    let args = Cli::parse();

    // If debug is on: show everything at DEBUG level
    // If debug is off: our crates at INFO, everything else at WARN
    let log_filter = if args.debug {
        "debug".to_string()
    } else {
        "thousand=info,thousand_cli=info,warn".to_string()
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(args.debug)
        .with_writer(std::io::stderr)
        .init();

    let config_path = args.config.clone();
    let mut cfg = CliConfig::load_or_create(&config_path)
        .with_context(|| format!("loading or creating config '{}'", config_path.display()))?;

    // CLI overrides are in-memory unless --persist is given
    if let Some(server) = args.server.clone() {
        cfg.server = server;
    }
    if let Some(session) = args.session.clone() {
        cfg.session = Some(session);
    }
    if let Some(ms) = args.interval_ms {
        cfg.poll_interval_ms = ms;
    }
    if args.persist {
        cfg.save(&config_path)
            .with_context(|| format!("saving updated config '{}'", config_path.display()))?;
    }

    let client_cfg = cfg.client_config()?;
    tracing::info!(server = %client_cfg.server, session = %client_cfg.session, "client configured");

    let client = GameClient::new(&client_cfg);
    let mut printer = Printer::new(args.json);
    let wait = cfg.wait();

    match &args.command {
        Commands::Watch => {
            cli::watch(&client, client_cfg.poll_interval(), wait, &mut printer).await?;
        }
        Commands::State => {
            cli::show_state(&client, wait, &mut printer).await?;
        }
        other => {
            cli::act_and_show(&client, other, wait, &mut printer).await?;
        }
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
