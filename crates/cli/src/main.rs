// Notekeep CLI
//
// Design Decision: Use clap derive for ergonomic argument parsing.
// Design Decision: Support text/json/yaml output formats for scripting.
// Design Decision: The token is passed per invocation (flag or env), never written to disk.

mod client;
mod commands;
mod output;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "notekeep")]
#[command(about = "Notekeep CLI - Register, log in and manage your notes")]
#[command(version)]
pub struct Cli {
    /// API base URL, including the API prefix
    #[arg(
        long,
        env = "NOTEKEEP_API_URL",
        default_value = "http://localhost:8000/api"
    )]
    pub api_url: String,

    /// Auth token from register or login
    #[arg(long, env = "NOTEKEEP_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(long, short, default_value = "text", value_parser = ["text", "json", "yaml"])]
    pub output: String,

    /// Suppress non-essential output
    #[arg(long, short)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account and print its token
    Register {
        #[arg(long, short)]
        username: String,

        #[arg(long, short)]
        email: String,

        #[arg(long, short, env = "NOTEKEEP_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Log in and print your token
    Login {
        #[arg(long, short)]
        username: String,

        #[arg(long, short, env = "NOTEKEEP_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Show the current user's profile
    Profile,

    /// Manage notes
    Notes {
        #[command(subcommand)]
        command: commands::notes::NotesCommand,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = client::Client::new(&cli.api_url, cli.token.clone());
    let output_format = output::OutputFormat::from_str(&cli.output);

    match cli.command {
        Commands::Register {
            username,
            email,
            password,
        } => {
            commands::auth::register(
                &client,
                output_format,
                cli.quiet,
                &username,
                &email,
                &password,
            )
            .await
        }
        Commands::Login { username, password } => {
            commands::auth::login(&client, output_format, cli.quiet, &username, &password).await
        }
        Commands::Profile => commands::auth::profile(&client, output_format).await,
        Commands::Notes { command } => {
            commands::notes::run(command, &client, output_format, cli.quiet).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_notes_update() {
        let cli = Cli::try_parse_from([
            "notekeep",
            "--token",
            "abc",
            "notes",
            "update",
            "3",
            "--title",
            "New title",
        ])
        .unwrap();
        assert_eq!(cli.token.as_deref(), Some("abc"));
        match cli.command {
            Commands::Notes {
                command: commands::notes::NotesCommand::Update { note_id, title, content },
            } => {
                assert_eq!(note_id, 3);
                assert_eq!(title, "New title");
                assert!(content.is_none());
            }
            _ => panic!("expected notes update"),
        }
    }
}
