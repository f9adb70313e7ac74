//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

use crate::domain::{CascadeMode, CategoryStatus};

/// Category hierarchy engine: forest views, cascading inactivation and reparenting deletes
#[derive(Parser, Debug)]
#[command(name = "cathier")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Local config file (default: ./.cathier.toml if present)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Category data file (overrides config)
    #[arg(long, global = true, env = "CATHIER_DATA_FILE", value_hint = ValueHint::FilePath)]
    pub data_file: Option<PathBuf>,

    /// Inactivation cascade depth (overrides config)
    #[arg(long, global = true, value_parser = clap::value_parser!(CascadeMode))]
    pub cascade: Option<CascadeMode>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a category
    Create {
        /// Category name
        name: String,
        /// Parent category id (omit for a root)
        #[arg(short, long)]
        parent: Option<String>,
    },

    /// Show all categories as a forest
    List {
        /// Use the quadratic builder
        #[arg(long, hide = true)]
        naive: bool,
    },

    /// Show one category record
    Show {
        /// Category id
        id: String,
    },

    /// Rename a category and/or change its status
    Update {
        /// Category id
        id: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New status: active | inactive (inactive cascades)
        #[arg(short, long, value_parser = clap::value_parser!(CategoryStatus))]
        status: Option<CategoryStatus>,
    },

    /// Delete a category; its children move up to its parent
    Delete {
        /// Category id
        id: String,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Print config template
    Template,

    /// Show config paths
    Path,
}
