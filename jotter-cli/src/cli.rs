use clap::{Args, Parser, Subcommand, ValueEnum};
use jotter_core::{FilterOption, SortOption};
use std::path::PathBuf;

#[derive(Clone, Debug, Parser)]
#[command(name = "jotter", version, about = "Local-first note taking")]
pub struct CliConfig {
    /// Directory holding the notes database; overrides the settings file.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// List notes, important ones first unless sorting a-z.
    List(ListArgs),
    /// Print a single note.
    Show { id: String },
    /// Create a note.
    Add(AddArgs),
    /// Change fields of an existing note.
    Edit(EditArgs),
    /// Delete a note.
    Delete { id: String },
    /// Write a note from stdin with debounced autosave.
    Compose(ComposeArgs),
    /// Show or change the remembered font zoom.
    Zoom {
        #[arg(value_enum, default_value_t = ZoomAction::Show)]
        action: ZoomAction,
    },
    /// Print this device's identifier.
    DeviceId,
    /// Print the effective settings.
    Settings {
        /// Write a settings file with default values if none exists.
        #[arg(long)]
        init: bool,
    },
}

#[derive(Clone, Debug, Args)]
pub struct ListArgs {
    /// Case-insensitive text to look for in titles and contents.
    #[arg(long, short, default_value = "")]
    pub search: String,

    /// `all` or `important`.
    #[arg(long, short, default_value = "all")]
    pub filter: FilterOption,

    /// `newest`, `oldest` or `a-z`.
    #[arg(long, default_value = "newest")]
    pub sort: SortOption,
}

#[derive(Clone, Debug, Args)]
pub struct AddArgs {
    #[arg(long, short)]
    pub title: String,

    #[arg(long, short, default_value = "")]
    pub content: String,

    /// Palette name (e.g. `blue`) or a raw color token.
    #[arg(long)]
    pub color: Option<String>,

    #[arg(long)]
    pub important: bool,

    /// Font zoom percentage; defaults to the remembered zoom.
    #[arg(long)]
    pub zoom: Option<u32>,
}

#[derive(Clone, Debug, Args)]
pub struct EditArgs {
    pub id: String,

    #[arg(long, short)]
    pub title: Option<String>,

    #[arg(long, short)]
    pub content: Option<String>,

    #[arg(long)]
    pub color: Option<String>,

    #[arg(long)]
    pub important: Option<bool>,

    #[arg(long)]
    pub zoom: Option<u32>,
}

#[derive(Clone, Debug, Args)]
pub struct ComposeArgs {
    /// Title of the note. Required for a new note; replaces the title of
    /// an existing one.
    #[arg(long, short)]
    pub title: Option<String>,

    /// Append to this note instead of creating a new one.
    #[arg(long)]
    pub id: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ZoomAction {
    Show,
    In,
    Out,
    Reset,
}
