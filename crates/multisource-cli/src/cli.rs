//! CLI argument definitions for Multisource.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "multisource",
    version,
    about = "Multi-loader source sets and jar-in-jar packaging",
    long_about = "Multisource resolves parent closures between loader-specific units, \
                  picks the dependency jars to nest from a resolved dependency graph, \
                  and packages them into an archive with Fabric or NeoForge metadata."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the ancestors whose output folds into a unit
    Closure {
        /// Unit name
        unit: String,
        /// Path to Multisource.toml (default: search upwards)
        #[arg(long)]
        manifest: Option<PathBuf>,
    },

    /// Print the build plan of every unit, parents first
    Plan {
        /// Path to Multisource.toml (default: search upwards)
        #[arg(long)]
        manifest: Option<PathBuf>,
    },

    /// Show the jars a resolution snapshot would nest
    Resolve {
        /// Resolution snapshot (JSON)
        #[arg(long)]
        snapshot: PathBuf,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Copy an archive and nest the snapshot's jars into it
    Nest {
        /// Resolution snapshot (JSON)
        #[arg(long)]
        snapshot: PathBuf,
        /// Archive to copy
        #[arg(long)]
        input: PathBuf,
        /// Destination directory
        #[arg(long)]
        dest: PathBuf,
        /// Archive base name
        #[arg(long)]
        base_name: String,
        /// Archive version
        #[arg(long)]
        archive_version: String,
        /// Archive classifier
        #[arg(long, default_value = "")]
        classifier: String,
        /// Generate fabric.mod.json for nested jars and list them in the host descriptor
        #[arg(long)]
        fabric: bool,
        /// Write META-INF/jarjar/metadata.json
        #[arg(long)]
        neoforge: bool,
        /// Scratch directory for generated jars
        #[arg(long)]
        work_dir: Option<PathBuf>,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}
