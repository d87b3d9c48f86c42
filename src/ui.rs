// UI layer: runs one account-generation pass in the terminal.
// Prompts use `dialoguer`, long-running requests show an `indicatif`
// spinner, and the actual HTTP work is delegated to `api`.

use crate::api::{ApiClient, BulkGenerationSummary};
use crate::cli::Args;
use crate::config::Config;
use crate::error::AppError;
use crate::{output, preview, rooms};
use crossterm::style::Stylize;
use crossterm::tty::IsTty;
use dialoguer::{Confirm, Password};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::info;

/// Whether prompts may be shown. Without a terminal, anything that would
/// need an answer fails instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    Terminal,
    Disabled,
}

impl Interaction {
    /// Prompts need both a readable stdin and stderr to draw on.
    pub fn detect() -> Self {
        if std::io::stdin().is_tty() && std::io::stderr().is_tty() {
            Interaction::Terminal
        } else {
            Interaction::Disabled
        }
    }
}

/// Run with prompts enabled when attached to a terminal.
pub fn run(args: Args) -> Result<(), AppError> {
    run_with(args, Interaction::detect())
}

/// Validate the arguments, work out the room list, then either preview or
/// generate the accounts and print the result.
pub fn run_with(args: Args, interaction: Interaction) -> Result<(), AppError> {
    args.validate()?;
    let config = Config::load(args.config.as_deref())?;

    let room_list = rooms::collect_rooms(&args.room_sources())?;
    info!(count = room_list.len(), "collected rooms");

    let summary = if args.dry_run {
        preview::preview(&room_list, args.password_length)
    } else {
        generate(&args, &config, room_list, interaction)?
    };

    println!("{}", output::render_table(&summary.credentials));
    println!();
    println!("{}", output::summary_line(&summary));

    if let Some(path) = &args.output {
        output::write_csv(path, &summary.credentials).map_err(|source| AppError::Output {
            path: path.clone(),
            source,
        })?;
        println!("Credentials written to {}", path.display().to_string().green());
    }
    Ok(())
}

/// Log in as the admin and call the bulk-generate endpoint.
fn generate(
    args: &Args,
    config: &Config,
    room_list: Vec<String>,
    interaction: Interaction,
) -> Result<BulkGenerationSummary, AppError> {
    let host = config.host_or_default(args.host.as_deref());
    let admin_room = config.admin_room_or_default(args.admin_room.as_deref());
    let password = admin_password(args, &admin_room, interaction)?;

    if args.overwrite && !args.yes {
        if interaction == Interaction::Disabled {
            return Err(AppError::NotInteractive(
                "--overwrite needs confirmation; pass --yes to skip it.",
            ));
        }
        if !confirm_overwrite(room_list.len())? {
            return Err(AppError::Aborted);
        }
    }

    let api = ApiClient::new(&host)?;

    let spinner = start_spinner(format!("Logging in to {host}..."));
    let login = api.login(&admin_room, &password);
    spinner.finish_and_clear();
    login?;

    let request = args.generate_request(room_list);
    let spinner = start_spinner(format!("Generating {} accounts...", request.rooms.len()));
    let summary = api.bulk_generate(&request);
    spinner.finish_and_clear();
    summary
}

/// Password from the flag or environment, otherwise ask for it with hidden
/// input. There is no built-in fallback password.
fn admin_password(
    args: &Args,
    admin_room: &str,
    interaction: Interaction,
) -> Result<String, AppError> {
    if let Some(password) = &args.admin_password {
        return Ok(password.clone());
    }
    // dialoguer re-prompts forever on an empty line, so never reach it
    // without a terminal.
    if interaction == Interaction::Disabled {
        return Err(AppError::NotInteractive(
            "no admin password given; pass --admin-password or set LAUNDRY_APP_ADMIN_PASSWORD.",
        ));
    }
    Password::new()
        .with_prompt(format!("Admin password for {admin_room}"))
        .interact()
        .map_err(AppError::Prompt)
}

fn confirm_overwrite(count: usize) -> Result<bool, AppError> {
    Confirm::new()
        .with_prompt(format!(
            "Existing accounts will get new passwords ({count} rooms requested). Continue?"
        ))
        .default(false)
        .interact()
        .map_err(AppError::Prompt)
}

fn start_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
