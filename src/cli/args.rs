use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the heritage binary.
#[derive(Parser, Debug)]
#[command(
    name = "heritage",
    version,
    about = "Ancestor closures over a generic class hierarchy"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print every type an instance of TYPE is registered under.
    Resolve(ResolveArgs),
    /// Print the linearization of CLASS.
    Mro(MroArgs),
}

/// Where the class hierarchy comes from.
#[derive(Args, Debug)]
pub struct HierarchyArgs {
    /// JSON hierarchy description.
    #[arg(long = "hierarchy", value_name = "FILE")]
    pub hierarchy: PathBuf,
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub hierarchy: HierarchyArgs,

    /// Type expression, e.g. `A2[int]`.
    #[arg(value_name = "TYPE")]
    pub ty: String,

    /// Keep one entry per path for ancestors reachable more than once.
    #[arg(long = "keep-duplicates")]
    pub keep_duplicates: bool,

    /// Print the closure as a JSON array.
    #[arg(long)]
    pub json: bool,

    /// Fail instead of walking deeper than this many levels.
    #[arg(long = "max-depth", value_name = "N")]
    pub max_depth: Option<u32>,
}

#[derive(Args, Debug)]
pub struct MroArgs {
    #[command(flatten)]
    pub hierarchy: HierarchyArgs,

    /// Class name.
    #[arg(value_name = "CLASS")]
    pub class: String,

    /// Print the linearization as a JSON array.
    #[arg(long)]
    pub json: bool,
}
