use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use dialoguer::Password;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::services::help_text;
use crate::domain::services::SessionStore;
use crate::infrastructure::http::auth::AuthClient;
use crate::infrastructure::http::auth::SignupRequest;

const INGEST_SOURCES: [&str; 6] = ["wiki", "web", "arxiv", "duckduckgo", "csv", "pdf"];

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if !config_file_path.parent().unwrap().exists() {
        fs::create_dir_all(config_file_path.parent().unwrap()).await?;
    }

    let mut file = fs::File::create(config_file_path.clone()).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    let config_path_display = config_file_path.as_os_str().to_str().unwrap();
    println!("Created default config file at {config_path_display}");
    return Ok(());
}

async fn login(google: bool) -> Result<()> {
    let auth = AuthClient::default();

    if google {
        let url = auth.google_login_url().await?;
        println!("Open the following URL in your browser to continue with Google:\n\n{url}");
        return Ok(());
    }

    let username: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Username")
        .interact_text()?;
    let password = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Password")
        .interact()?;

    let res = auth.login(&username, &password).await?;
    let user = match res.user {
        Some(user) => user,
        None => auth.me(&res.access_token).await?,
    };

    SessionStore::default()
        .save(&res.access_token, Some(user.clone()))
        .await?;

    println!(
        "{}",
        Paint::green(format!("Logged in as {}.", user.display_name()))
    );

    return Ok(());
}

async fn signup() -> Result<()> {
    let name: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Name")
        .interact_text()?;
    let email: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Email")
        .interact_text()?;
    let phone: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Phone")
        .allow_empty(true)
        .interact_text()?;
    let password = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords don't match.")
        .interact()?;

    AuthClient::default()
        .signup(&SignupRequest {
            name,
            email,
            phone,
            password,
        })
        .await?;

    println!(
        "{}",
        Paint::green("Account created. You can now log in with `dossier login`.")
    );

    return Ok(());
}

async fn logout() -> Result<()> {
    SessionStore::default().clear().await?;
    println!("Logged out.");
    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for Dossier")
        .hide(true)
        .subcommand(Command::new("log-path").about(
            "Output path to debug log file generated when running Dossier with environment variable RUST_LOG=dossier",
        ))
        .subcommand(Command::new("enum-config").about("List all config keys as strings."));
}

fn subcommand_login() -> Command {
    return Command::new("login")
        .about("Log in to the report backend and cache the session locally.")
        .arg(
            clap::Arg::new("google")
                .long("google")
                .help("Print the Google single sign-on URL instead of prompting for credentials.")
                .action(ArgAction::SetTrue),
        );
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:") || line.starts_with("HOTKEYS:") {
                return Paint::new(format!("CHAT {line}")).underline().bold().to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    return Command::new("dossier")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .subcommand(subcommand_login())
        .subcommand(Command::new("logout").about("Clear the cached login session."))
        .subcommand(Command::new("signup").about("Create a new account on the report backend."))
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("DOSSIER_CONFIG_FILE")
                .num_args(1)
                .help(format!(
                    "Path to configuration file [default: {}]",
                    Config::default(ConfigKey::ConfigFile)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::BaseURL.to_string())
                .long(ConfigKey::BaseURL.to_string())
                .env("DOSSIER_BASE_URL")
                .num_args(1)
                .help(format!(
                    "The report backend API URL. [default: {}]",
                    Config::default(ConfigKey::BaseURL)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::HealthCheckTimeout.to_string())
                .long(ConfigKey::HealthCheckTimeout.to_string())
                .env("DOSSIER_HEALTH_CHECK_TIMEOUT")
                .num_args(1)
                .help(format!(
                    "Time to wait in milliseconds before timing out when doing a healthcheck for the backend. [default: {}]",
                    Config::default(ConfigKey::HealthCheckTimeout)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::IngestSource.to_string())
                .short('s')
                .long(ConfigKey::IngestSource.to_string())
                .env("DOSSIER_INGEST_SOURCE")
                .num_args(1)
                .help(format!(
                    "Which source the pipeline should research from. [default: {}]",
                    Config::default(ConfigKey::IngestSource)
                ))
                .value_parser(PossibleValuesParser::new(INGEST_SOURCES))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ReportTitle.to_string())
                .long(ConfigKey::ReportTitle.to_string())
                .env("DOSSIER_REPORT_TITLE")
                .num_args(1)
                .help(format!(
                    "Title given to generated reports. [default: {}]",
                    Config::default(ConfigKey::ReportTitle)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ReportAudience.to_string())
                .long(ConfigKey::ReportAudience.to_string())
                .env("DOSSIER_REPORT_AUDIENCE")
                .num_args(1)
                .help(format!(
                    "Audience generated reports are written for. [default: {}]",
                    Config::default(ConfigKey::ReportAudience)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Username.to_string())
                .short('u')
                .long(ConfigKey::Username.to_string())
                .env("DOSSIER_USERNAME")
                .num_args(1)
                .help("Your user name displayed in the chat transcript.")
                .global(true),
        );
}

pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    let log_path = dirs::cache_dir().unwrap().join("dossier/debug.log");
                    println!("{}", log_path.to_str().unwrap());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("login", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            login(subcmd_matches.get_flag("google")).await?;
            return Ok(false);
        }
        Some(("logout", _)) => {
            logout().await?;
            return Ok(false);
        }
        Some(("signup", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            signup().await?;
            return Ok(false);
        }
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(true);
}
