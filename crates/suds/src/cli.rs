//! CLI argument definitions for `suds`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser.
#[derive(Debug, Parser)]
#[command(
    name = "suds",
    version,
    about = "Cold-process soap formulation calculator"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Flags accepted by every subcommand.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Path to the .suds data directory (default: discovered upward from the
    /// working directory)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Output JSON instead of human-readable text
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a .suds data directory seeded with the stock catalogs
    Init,

    /// Calculate the formulation for a recipe
    Calc(CalcArgs),

    /// Manage the oil catalog
    Oil(OilArgs),

    /// Manage recipes
    Recipe(RecipeArgs),

    /// Import a snapshot file (oil, recipe, or full backup)
    Import(ImportArgs),

    /// Export a snapshot file (oil, recipe, or full backup)
    Export(ExportArgs),

    /// Back up to / restore from a remote document store
    Sync(SyncArgs),

    /// Print version information
    Version,
}

#[derive(Debug, Args)]
pub struct CalcArgs {
    /// ID of a stored recipe
    pub recipe_id: Option<String>,

    /// Calculate a recipe read from a JSON file instead (plain recipe or
    /// recipe snapshot)
    #[arg(long, conflicts_with = "recipe_id")]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct OilArgs {
    #[command(subcommand)]
    pub command: OilCommands,
}

#[derive(Debug, Subcommand)]
pub enum OilCommands {
    /// Add an oil to the catalog
    Add {
        /// Display name
        name: String,

        /// Explicit id (default: generated)
        #[arg(long)]
        id: Option<String>,

        /// Grams of NaOH to saponify 1 g of this oil
        #[arg(long)]
        sap_naoh: Option<f64>,

        /// Grams of KOH to saponify 1 g of this oil
        #[arg(long)]
        sap_koh: Option<f64>,

        /// Iodine value (g I2 per 100 g oil)
        #[arg(long)]
        iodine: Option<f64>,

        /// Free-text notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// List the oil catalog
    List,

    /// Show one oil in detail
    Show { id: String },

    /// Remove an oil from the catalog
    Remove { id: String },
}

#[derive(Debug, Args)]
pub struct RecipeArgs {
    #[command(subcommand)]
    pub command: RecipeCommands,
}

#[derive(Debug, Subcommand)]
pub enum RecipeCommands {
    /// Create a recipe (500 g fat, 5% superfat, 33% water, NaOH by default)
    New {
        /// Display name
        name: String,

        /// Explicit id (default: generated)
        #[arg(long)]
        id: Option<String>,

        #[command(flatten)]
        settings: RecipeSettings,
    },

    /// List stored recipes
    List,

    /// Show a recipe's settings and items
    Show { id: String },

    /// Remove a stored recipe
    Remove { id: String },

    /// Change a recipe's settings
    Set {
        id: String,

        #[command(flatten)]
        settings: RecipeSettings,

        /// Set the scent from the fragrance library (id), requires --fragrance-pct
        #[arg(long, requires = "fragrance_pct")]
        fragrance: Option<String>,

        /// Percentage of total fat mass allocated to scent
        #[arg(long)]
        fragrance_pct: Option<f64>,

        /// Remove the scent settings
        #[arg(long, conflicts_with = "fragrance")]
        no_fragrance: bool,
    },

    /// Add an oil line to a recipe
    AddOil {
        recipe_id: String,
        oil_id: String,
        /// Share of total fat mass, 0-100
        percentage: f64,
    },

    /// Remove an oil line from a recipe
    RemoveOil { recipe_id: String, item_id: String },
}

/// Recipe settings shared by `recipe new` and `recipe set`.
#[derive(Debug, Args)]
pub struct RecipeSettings {
    /// Total fat mass in grams
    #[arg(long = "fat")]
    pub total_fat_weight: Option<f64>,

    /// Superfat percentage (0-100)
    #[arg(long = "superfat")]
    pub super_fat: Option<f64>,

    /// Water ratio as a percentage of fat mass
    #[arg(long = "water")]
    pub water_ratio: Option<f64>,

    /// Lye type: NaOH, KOH, or Mixed
    #[arg(long = "lye")]
    pub lye_type: Option<String>,

    /// KOH share of the alkali in percent (Mixed recipes)
    #[arg(long = "koh-ratio")]
    pub ratio_koh: Option<f64>,

    /// Free-text notes
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Snapshot file to import
    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[command(subcommand)]
    pub command: ExportCommands,
}

#[derive(Debug, Subcommand)]
pub enum ExportCommands {
    /// Export one oil
    Oil {
        id: String,

        /// Destination file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export one recipe
    Recipe {
        id: String,

        /// Destination file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export a full backup of both catalogs
    Backup {
        /// Destination file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
pub struct SyncArgs {
    #[command(subcommand)]
    pub command: SyncCommands,
}

#[derive(Debug, Subcommand)]
pub enum SyncCommands {
    /// Show the stored magic key, store a given one, or generate a new one
    Key {
        /// An existing ID-PASSWORD key to store (e.g. from another device)
        key: Option<String>,
    },

    /// Push the local backup to the remote document store
    Push {
        /// Base URL of the document store
        #[arg(long, env = "SUDS_REMOTE")]
        remote: String,
    },

    /// Pull the remote backup and merge it into the local store
    Pull {
        /// Base URL of the document store
        #[arg(long, env = "SUDS_REMOTE")]
        remote: String,
    },
}
