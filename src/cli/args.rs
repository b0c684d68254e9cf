use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "trilha", version, author, about = "A terminal companion for a 32-week theology study plan")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a week's header, stats and daily checklist
    Week {
        /// Week number (defaults to the current week in config)
        week: Option<u32>,
    },
    /// Mark one activity of a day as done (or undone with --off)
    Check {
        /// Week number
        week: u32,
        /// Task id ("3-2"), day position (2) or day name (terça)
        day: String,
        /// estudo, pratica, teste, revisao or devocional
        flag: String,
        /// Clear the flag instead of setting it
        #[arg(long)]
        off: bool,
    },
    /// Show overall, per-phase and per-week progress
    Progress,
    /// List a week's additional resources
    Resources {
        /// Week number (defaults to the current week in config)
        #[arg(long)]
        week: Option<u32>,
        /// Only titles containing this text
        #[arg(long, short)]
        search: Option<String>,
        /// todos, leitura or video
        #[arg(long = "type", short, default_value = "todos")]
        kind: String,
    },
    /// Show or set the weekly goal
    Goal {
        /// New goal text
        text: Option<String>,
        /// Remove the current goal
        #[arg(long, conflicts_with = "text")]
        clear: bool,
    },
    /// Show or set the personal feedback note
    Feedback {
        /// New feedback text
        text: Option<String>,
        /// Remove the current note
        #[arg(long, conflicts_with = "text")]
        clear: bool,
    },
    /// Browse the bibliography
    Catalog {
        /// Only materials whose name or details contain this text
        #[arg(long, short)]
        search: Option<String>,
    },
    /// Export the bibliography to PDF
    Export {
        /// Only materials whose name or details contain this text
        #[arg(long, short)]
        search: Option<String>,
        /// Output file (defaults to the path in config)
        #[arg(long, short)]
        output: Option<std::path::PathBuf>,
    },
    /// Show the suggested daily schedule
    Schedule,
    /// Discard all task progress
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Show config and data paths
    Config,
}
