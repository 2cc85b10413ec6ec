// src/main.rs

mod cli;
mod commands;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use cli::{CategoryCommands, Cli, Commands, UserCommands};

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init { db_path }) => commands::cmd_init(&db_path),

        #[cfg(feature = "server")]
        Some(Commands::Serve {
            config,
            bind,
            db_path,
        }) => commands::cmd_serve(config.as_deref(), bind.as_deref(), db_path.as_deref()),

        Some(Commands::User { command }) => match command {
            UserCommands::Add {
                username,
                email,
                db_path,
            } => commands::cmd_user_add(&db_path, &username, &email),
            UserCommands::List { db_path } => commands::cmd_user_list(&db_path),
            UserCommands::Remove { id, db_path } => commands::cmd_user_remove(&db_path, id),
        },

        Some(Commands::Category { command }) => match command {
            CategoryCommands::Add {
                name,
                slug,
                db_path,
            } => commands::cmd_category_add(&db_path, &name, slug.as_deref()),
            CategoryCommands::List { db_path } => commands::cmd_category_list(&db_path),
        },

        Some(Commands::Completions { shell }) => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "recipebox",
                &mut std::io::stdout(),
            );
            Ok(())
        }

        None => {
            // No command provided, show help
            println!("recipebox v{}", env!("CARGO_PKG_VERSION"));
            println!("Run 'recipebox --help' for usage information");
            Ok(())
        }
    }
}
