//! Command dispatch: maps parsed arguments onto service calls

use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::application::services::{CategoryService, Operation};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{expand_path, global_config_path, Settings, LOCAL_CONFIG_FILE};
use crate::domain::{CategoryId, CategoryPatch, NewCategory};
use crate::infrastructure::di::ServiceContainer;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        Some(Commands::Config { command }) => execute_config(cli, command),
        Some(command) => {
            let settings = load_settings(cli)?;
            debug!(data_file = %settings.data_file.display(), "using store");
            let container = ServiceContainer::new(settings);
            execute_category(cli, command, &container.categories)
        }
        None => Err(CliError::Usage(
            "no command given, run with --help for usage".to_string(),
        )),
    }
}

/// Layered settings plus command-line overrides.
fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(path) = &cli.data_file {
        settings.data_file = expand_path(path);
    }
    if let Some(cascade) = cli.cascade {
        settings.cascade = cascade;
    }
    Ok(settings)
}

fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    output::info(&serde_json::to_string_pretty(value)?);
    Ok(())
}

fn succeeded(operation: Operation) {
    debug!(?operation, code = operation.success_code(), "operation succeeded");
}

#[instrument(skip_all)]
fn execute_category(cli: &Cli, command: &Commands, service: &CategoryService) -> CliResult<()> {
    match command {
        Commands::Create { name, parent } => {
            let created = service.create(NewCategory {
                name: Some(name.clone()),
                parent: parent.as_deref().map(CategoryId::from),
            })?;
            succeeded(Operation::Create);
            if cli.json {
                print_json(&created)
            } else {
                output::success(&format!("created {} ({})", created.name, created.id));
                Ok(())
            }
        }
        Commands::List { naive } => {
            let forest = if *naive {
                service.list_naive()?
            } else {
                service.list()?
            };
            succeeded(Operation::List);
            if cli.json {
                print_json(&forest)
            } else {
                output::info(&output::render_forest(&forest));
                Ok(())
            }
        }
        Commands::Show { id } => {
            let category = service.get(&CategoryId::from(id.as_str()))?;
            if cli.json {
                print_json(&category)
            } else {
                output::category(&category);
                Ok(())
            }
        }
        Commands::Update { id, name, status } => {
            if name.is_none() && status.is_none() {
                return Err(CliError::InvalidArgs(
                    "update needs --name and/or --status".to_string(),
                ));
            }
            let updated = service.update(
                &CategoryId::from(id.as_str()),
                CategoryPatch {
                    name: name.clone(),
                    status: *status,
                },
            )?;
            succeeded(Operation::Update);
            if cli.json {
                print_json(&updated)
            } else {
                output::success(&format!(
                    "updated {} ({}, {})",
                    updated.name, updated.id, updated.status
                ));
                Ok(())
            }
        }
        Commands::Delete { id } => {
            let confirmation = service.delete(&CategoryId::from(id.as_str()))?;
            succeeded(Operation::Delete);
            if cli.json {
                print_json(&confirmation)
            } else {
                output::success(&format!("{} ({})", confirmation.message, confirmation.id));
                Ok(())
            }
        }
        Commands::Config { .. } | Commands::Completion { .. } => Err(CliError::Usage(
            "not a category command".to_string(),
        )),
    }
}

fn execute_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => {
            let global = global_config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(unavailable)".to_string());
            let local = cli
                .config
                .clone()
                .unwrap_or_else(|| LOCAL_CONFIG_FILE.into());
            output::action("global", &global);
            output::action("local", &local.display());
        }
    }
    Ok(())
}
