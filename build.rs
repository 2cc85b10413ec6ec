// build.rs

use clap::{Arg, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Common argument: database path
fn db_path_arg() -> Arg {
    Arg::new("db_path")
        .short('d')
        .long("db-path")
        .value_name("PATH")
        .default_value("/var/lib/recipebox/recipebox.db")
        .help("Database path")
}

fn build_cli() -> Command {
    Command::new("recipebox")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Recipebox Contributors")
        .about("Recipe sharing service with drafts, publishing and favourites")
        .subcommand_required(false)
        .subcommand(
            Command::new("init")
                .about("Initialize the recipebox database")
                .arg(db_path_arg()),
        )
        .subcommand(
            Command::new("serve")
                .about("Start the HTTP server")
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .value_name("FILE")
                        .help("TOML configuration file"),
                )
                .arg(
                    Arg::new("bind")
                        .short('b')
                        .long("bind")
                        .value_name("ADDR")
                        .help("Address to bind to (host:port)"),
                )
                .arg(
                    Arg::new("db_path")
                        .short('d')
                        .long("db-path")
                        .value_name("PATH")
                        .help("Database path, overrides the config file"),
                ),
        )
        .subcommand(
            Command::new("user")
                .about("Manage user accounts")
                .subcommand(
                    Command::new("add")
                        .about("Register a user")
                        .arg(Arg::new("username").required(true).help("Unique username"))
                        .arg(
                            Arg::new("email")
                                .short('e')
                                .long("email")
                                .required(true)
                                .help("Unique email address"),
                        )
                        .arg(db_path_arg()),
                )
                .subcommand(
                    Command::new("list")
                        .about("List users")
                        .arg(db_path_arg()),
                )
                .subcommand(
                    Command::new("remove")
                        .about("Remove a user")
                        .arg(Arg::new("id").required(true).help("User id"))
                        .arg(db_path_arg()),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Manage recipe categories")
                .subcommand(
                    Command::new("add")
                        .about("Add a category")
                        .arg(Arg::new("name").required(true).help("Display name"))
                        .arg(Arg::new("slug").long("slug").help("URL slug"))
                        .arg(db_path_arg()),
                )
                .subcommand(
                    Command::new("list")
                        .about("List categories")
                        .arg(db_path_arg()),
                ),
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(
                    Arg::new("shell")
                        .required(true)
                        .value_parser(["bash", "zsh", "fish", "powershell", "elvish"])
                        .help("Shell type"),
                ),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("recipebox.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
