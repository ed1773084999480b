//! # Stickies
//!
//! A sticky-notes board and a drag-to-reorder to-do list in the terminal.
//!
//! ## Usage
//!
//! ### Interactive Mode (TUI)
//!
//! Run without arguments to open the board:
//!
//! ```bash
//! stickies
//! # or start on the to-do list
//! stickies ui --tasks
//! ```
//!
//! Notes can be dragged with the mouse; clicking a note raises it above the
//! others. On the to-do list, drag a row onto another row to move it there.
//!
//! #### TUI Key Bindings
//!
//! **Global**
//! *   `q`: Quit
//! *   `m`: Toggle dark mode
//! *   `v`: Switch between board and tasks
//!
//! **Board**
//! *   `a`: Add note
//! *   `e`: Edit text
//! *   `t`: Edit due date
//! *   `Space`: Toggle done
//! *   `d`: Delete note
//! *   `Tab`: Select (and raise) the next note
//! *   Arrow keys: Move the selected note
//!
//! **Tasks**
//! *   `i`: New task
//! *   `Space`: Toggle done
//! *   `d`: Delete task
//! *   `J` / `K`: Move the selected task down / up
//!
//! ### Command Line Interface (CLI)
//!
//! ```bash
//! stickies add "Call the bank" --due 2025-12-01
//! stickies list
//! stickies edit 3f2a --text "Call the bank at 9"
//! stickies move 3f2a 40 120
//! stickies done 3f2a
//! ```
//!
//! Note ids can be shortened to any unique prefix.
//!
//! ## Data Storage
//!
//! State is kept in a key-value JSON file in your local data directory
//! (`~/.local/share/stickies/storage.json` on Linux). Override it with the
//! `STICKIES_DB` environment variable. Set `RUST_LOG` to write a
//! `stickies.log` beside it.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use stickies::commands::*;
use stickies::config::Config;
use stickies::logging::init_logging;
use stickies::tui::{app::View, run_tui};

#[derive(Parser)]
#[command(name = "stickies")]
#[command(about = "Sticky notes and a to-do list for the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new note
    Add {
        /// Note text (quoted if it has spaces)
        text: Option<String>,
        /// Due date in YYYY-MM-DD
        #[arg(short, long)]
        due: Option<String>,
    },
    /// List notes, topmost first
    List,
    /// Edit a note's text or due date
    Edit {
        id: String,
        /// New text
        #[arg(short, long)]
        text: Option<String>,
        /// New due date in YYYY-MM-DD
        #[arg(short, long, conflicts_with = "clear_due")]
        due: Option<String>,
        /// Remove the due date
        #[arg(long)]
        clear_due: bool,
    },
    /// Toggle a note between done and open
    Done {
        id: String,
    },
    /// Move a note's top-left corner to X, Y (pixels)
    Move {
        id: String,
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },
    /// Bring a note to the front
    Raise {
        id: String,
    },
    /// Remove a note
    Remove {
        id: String,
    },
    /// Show or change dark mode
    DarkMode {
        #[arg(value_enum)]
        change: Option<DarkModeChange>,
    },
    /// Reset storage (delete all notes and preferences)
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,
    },
    /// Open interactive TUI
    Ui {
        /// Start on the to-do list instead of the board
        #[arg(long)]
        tasks: bool,
    },
}

fn main() {
    let config = Config::from_env();
    init_logging(&config.log_path());

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Add { text, due }) => cmd_add(text, due, false),
        Some(Commands::List) => cmd_list(),
        Some(Commands::Edit { id, text, due, clear_due }) => cmd_edit(id, text, due, clear_due, false),
        Some(Commands::Done { id }) => cmd_done(id, false),
        Some(Commands::Move { id, x, y }) => cmd_move(id, x, y, false),
        Some(Commands::Raise { id }) => cmd_raise(id, false),
        Some(Commands::Remove { id }) => cmd_remove(id, false),
        Some(Commands::DarkMode { change }) => cmd_dark_mode(change, false),
        Some(Commands::Reset { force }) => cmd_reset(force),
        Some(Commands::Completions { shell }) => {
            let shell_enum = match shell.as_str() {
                "bash" => Shell::Bash,
                "zsh" => Shell::Zsh,
                "fish" => Shell::Fish,
                "powershell" => Shell::PowerShell,
                "elvish" => Shell::Elvish,
                _ => {
                    eprintln!("Unsupported shell: {}", shell);
                    return;
                }
            };
            let mut cmd = Cli::command();
            generate(shell_enum, &mut cmd, "stickies", &mut io::stdout());
        }
        Some(Commands::Ui { tasks }) => {
            let view = if tasks { View::Tasks } else { View::Board };
            if let Err(e) = run_tui(&config, view) {
                eprintln!("Error running TUI: {}", e);
            }
        }
        None => {
            if let Err(e) = run_tui(&config, View::Board) {
                eprintln!("Error running TUI: {}", e);
            }
        }
    }
}
