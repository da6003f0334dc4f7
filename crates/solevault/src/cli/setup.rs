use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use solevaultapp::query::SortOption;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "solevault",
    bin_name = "solevault",
    version,
    disable_help_subcommand = true,
    after_help = "Enable shell completions:\n  eval \"$(solevault completions bash)\"  # add to ~/.bashrc\n  eval \"$(solevault completions zsh)\"   # add to ~/.zshrc"
)]
#[command(about = "Track your sneaker collection from the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $SOLEVAULT_DATA, then the OS data dir)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text, help_heading = "Options")]
    pub output: OutputFormat,

    /// Verbose output (debug logs on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Newest,
    Oldest,
    PriceHigh,
    PriceLow,
}

impl From<SortArg> for SortOption {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Newest => SortOption::Newest,
            SortArg::Oldest => SortOption::Oldest,
            SortArg::PriceHigh => SortOption::PriceHigh,
            SortArg::PriceLow => SortOption::PriceLow,
        }
    }
}

/// Fields shared by `add` and `edit`.
#[derive(Args, Debug, Default, Clone)]
pub struct SneakerFields {
    /// Brand (e.g. Nike, Adidas)
    #[arg(long, short)]
    pub brand: Option<String>,

    /// Model (e.g. "Dunk Low")
    #[arg(long, short)]
    pub model: Option<String>,

    /// Colorway (e.g. Panda)
    #[arg(long, short)]
    pub colorway: Option<String>,

    /// US size; anything unparsable keeps the previous or default size
    #[arg(long, short)]
    pub size: Option<String>,

    /// Price in USD; an empty value clears it
    #[arg(long, short)]
    pub price: Option<String>,

    /// Photo of the pair (jpg, png, webp, gif)
    #[arg(long, value_name = "PATH")]
    pub image: Option<PathBuf>,

    /// Ask the AI service to fill in brand, model, colorway and price.
    /// Implied by --image when neither --brand nor --model is given
    #[arg(long)]
    pub identify: bool,

    /// Text hint for --identify (e.g. "travis scott mocha")
    #[arg(long, requires = "identify")]
    pub hint: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the collection, optionally filtered by a search term
    #[command(alias = "ls", display_order = 1)]
    List {
        /// Search words, matched against "brand model colorway"
        #[arg(trailing_var_arg = true)]
        search: Vec<String>,

        /// Sort order (defaults to the configured default_sort)
        #[arg(long, value_enum)]
        sort: Option<SortArg>,
    },

    /// Show one or more pairs in full
    #[command(alias = "v", display_order = 2)]
    View {
        /// Ids or unique id prefixes
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Add a pair
    #[command(alias = "a", display_order = 3)]
    Add {
        #[command(flatten)]
        fields: SneakerFields,
    },

    /// Edit a pair; omitted fields keep their current values
    #[command(alias = "e", display_order = 4)]
    Edit {
        /// Id or unique id prefix
        id: String,

        #[command(flatten)]
        fields: SneakerFields,

        /// Remove the stored image
        #[arg(long, conflicts_with = "image")]
        clear_image: bool,
    },

    /// Delete one or more pairs
    #[command(alias = "rm", display_order = 5)]
    Delete {
        /// Ids or unique id prefixes
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Identify a pair from a photo and/or text without adding it
    #[command(display_order = 6)]
    Identify {
        /// Photo of the pair
        #[arg(long, value_name = "PATH")]
        image: Option<PathBuf>,

        /// Text hint (e.g. "jordan 4 bred")
        #[arg(long)]
        hint: Option<String>,
    },

    /// Collection totals and brand distribution
    #[command(display_order = 7)]
    Stats,

    /// Write a JSON backup (default: solevault-backup-YYYY-MM-DD.json, "-" for stdout)
    #[command(display_order = 10)]
    Export {
        /// Target file
        path: Option<PathBuf>,
    },

    /// Load a JSON backup, replacing the collection (or merging with --merge)
    #[command(display_order = 11)]
    Import {
        /// Backup file
        path: PathBuf,

        /// Keep existing pairs; overwrite matching ids and add new ones
        #[arg(long)]
        merge: bool,
    },

    /// Show or change configuration
    #[command(display_order = 20)]
    Config {
        #[command(subcommand)]
        action: Option<ConfigCommands>,
    },

    /// Print a shell completion script
    #[command(display_order = 21)]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Get a configuration value
    Get { key: String },

    /// Set a configuration value in the data directory's solevault.toml
    Set { key: String, value: String },

    /// Generate a commented sample solevault.toml
    Gen {
        /// Write to this file instead of stdout
        #[arg(long, short)]
        file: Option<PathBuf>,
    },
}
