//! Entry point: parse CLI and dispatch to command handlers.

use anyhow::Context;
use clap::Parser;
use football_manager::{
    cli::{Commands, FootballManager},
    commands::{
        create_superuser::{handle_create_superuser, SuperuserParams},
        open_database,
        seed::handle_seed,
        serve::handle_serve,
    },
    logging::init_logging,
};

/// Run the CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = FootballManager::parse();
    init_logging(app.global.log_json)?;

    let mut db = open_database(app.global.database.as_deref(), app.global.settings.as_deref())
        .context("failed to open database")?;

    match app.command {
        Commands::Serve { bind } => handle_serve(db, bind)
            .await
            .with_context(|| format!("server on {bind} failed"))?,

        Commands::CreateSuperuser {
            email,
            password,
            first_name,
            last_name,
        } => {
            handle_create_superuser(
                &mut db,
                SuperuserParams {
                    email,
                    password,
                    first_name,
                    last_name,
                },
            )
            .context("failed to create superuser")?;
        }

        Commands::Seed => handle_seed(&mut db).context("failed to seed reference data")?,
    }

    Ok(())
}
