// src/cli.rs
//! CLI definitions for recipebox
//!
//! This module contains all command-line interface definitions using clap.
//! The actual command implementations are in the `commands` module.

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Default database location
pub const DEFAULT_DB_PATH: &str = "/var/lib/recipebox/recipebox.db";

#[derive(Parser)]
#[command(name = "recipebox")]
#[command(author = "Recipebox Contributors")]
#[command(version)]
#[command(about = "Recipe sharing service with drafts, publishing and favourites", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new recipebox database
    Init {
        /// Path to the database file
        #[arg(short, long, default_value = DEFAULT_DB_PATH)]
        db_path: String,
    },

    /// Start the HTTP server
    #[cfg(feature = "server")]
    Serve {
        /// TOML configuration file
        #[arg(short, long)]
        config: Option<String>,

        /// Address to bind to (host:port), overrides the config file
        #[arg(short, long)]
        bind: Option<String>,

        /// Path to the database file, overrides the config file
        #[arg(short, long)]
        db_path: Option<String>,
    },

    /// Manage user accounts
    User {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Manage recipe categories
    Category {
        #[command(subcommand)]
        command: CategoryCommands,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Register a user
    Add {
        /// Unique username
        username: String,

        /// Unique email address
        #[arg(short, long)]
        email: String,

        /// Path to the database file
        #[arg(short, long, default_value = DEFAULT_DB_PATH)]
        db_path: String,
    },

    /// List users
    List {
        /// Path to the database file
        #[arg(short, long, default_value = DEFAULT_DB_PATH)]
        db_path: String,
    },

    /// Remove a user; their recipes and comments stay with no author
    Remove {
        /// User id
        id: i64,

        /// Path to the database file
        #[arg(short, long, default_value = DEFAULT_DB_PATH)]
        db_path: String,
    },
}

#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Add a category
    Add {
        /// Display name
        name: String,

        /// URL slug (derived from the name if omitted)
        #[arg(long)]
        slug: Option<String>,

        /// Path to the database file
        #[arg(short, long, default_value = DEFAULT_DB_PATH)]
        db_path: String,
    },

    /// List categories
    List {
        /// Path to the database file
        #[arg(short, long, default_value = DEFAULT_DB_PATH)]
        db_path: String,
    },
}
