use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "consort", version, about = "Consort multi-party JWT CLI")]
struct Cli {
    /// Configuration file with the `jwt` section
    #[arg(
        long,
        short,
        global = true,
        env = "CONSORT_CONFIG",
        default_value = "consort.yaml"
    )]
    config: PathBuf,

    /// Log at debug level (RUST_LOG overrides)
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the local issuing identity
    Info {
        /// Also print the signing secret
        #[arg(long, default_value_t = false)]
        show_secret: bool,
    },

    /// Show a trusted party's record
    Party { app_id: String },

    /// Build, verify and inspect tokens
    Token {
        #[command(subcommand)]
        cmd: TokenCommand,
    },

    /// Secret helpers
    Secret {
        #[command(subcommand)]
        cmd: SecretCommand,
    },
}

#[derive(Subcommand, Debug)]
enum TokenCommand {
    /// Build a token for the local application
    Build {
        /// Write the token to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Verify a token (given inline or as a file path)
    Verify { token: String },

    /// Decode a token without verifying it
    Inspect { token: String },
}

#[derive(Subcommand, Debug)]
enum SecretCommand {
    /// Generate a random alphanumeric secret
    Generate {
        #[arg(long, default_value_t = 32)]
        length: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let ok = match cli.cmd {
        Command::Info { show_secret } => {
            let config = commands::load_config(&cli.config)?;
            commands::identity::info(&config, show_secret)?;
            true
        }
        Command::Party { app_id } => {
            let config = commands::load_config(&cli.config)?;
            commands::identity::party(&config, &app_id)
        }
        Command::Token { cmd } => {
            let config = commands::load_config(&cli.config)?;
            match cmd {
                TokenCommand::Build { output } => {
                    commands::token::build(&config, output)?;
                    true
                }
                TokenCommand::Verify { token } => commands::token::verify(&config, token)?,
                TokenCommand::Inspect { token } => {
                    commands::token::inspect(token)?;
                    true
                }
            }
        }
        Command::Secret { cmd } => match cmd {
            SecretCommand::Generate { length } => {
                println!("{}", commands::secret::generate(length));
                true
            }
        },
    };

    if !ok {
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_generate_length_flag() {
        let cli = Cli::try_parse_from(["consort", "secret", "generate", "--length", "16"]).unwrap();
        match cli.cmd {
            Command::Secret {
                cmd: SecretCommand::Generate { length },
            } => assert_eq!(length, 16),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_secret_generate_default_length() {
        let cli = Cli::try_parse_from(["consort", "secret", "generate"]).unwrap();
        assert!(matches!(
            cli.cmd,
            Command::Secret {
                cmd: SecretCommand::Generate { length: 32 }
            }
        ));
    }
}
