// Entrypoint for the `pocket` binary.
// - Parses the command line, sets up logging and settings, then runs the
//   chosen script.
// - Returns `anyhow::Result` so any failure ends the process with a report
//   on stderr and exit code 1.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing::info;

use pocket_scripts::api::ApiClient;
use pocket_scripts::config::Settings;
use pocket_scripts::console::{Console, LineConsole, TermConsole};
use pocket_scripts::{logging, ui};

#[derive(Parser)]
#[command(
    name = "pocket",
    version,
    about = "A pocketful of small command-line scripts",
    long_about = "Small everyday scripts: a BMI calculator, a temperature converter, \
                  an expense tracker, a shopping cart, and dictionary, recipe and \
                  book lookups against public APIs."
)]
struct Cli {
    /// Increase log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Settings file (JSON) overriding the default location
    #[arg(long, global = true, env = "POCKET_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute body mass index
    Bmi {
        /// Weight in kilograms
        #[arg(long)]
        weight: Option<f64>,
        /// Height in metres
        #[arg(long)]
        height: Option<f64>,
    },

    /// Convert between Celsius and Fahrenheit
    #[command(alias = "temperature")]
    Temp {
        /// Temperature to convert
        #[arg(long, allow_negative_numbers = true)]
        value: Option<f64>,
        /// Target unit, C or F
        #[arg(long)]
        to: Option<String>,
    },

    /// Track expenses for this session
    Expenses,

    /// Simulate a shopping cart
    #[command(alias = "cart")]
    Shop,

    /// Look up the meaning of a word
    #[command(alias = "dictionary")]
    Define {
        word: Option<String>,
    },

    /// Find a recipe by dish name
    Recipe {
        dish: Vec<String>,
    },

    /// Search for books
    Books {
        query: Vec<String>,
    },
}

fn joined(words: Vec<String>) -> Option<String> {
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

/// Settings are only read by the scripts that make requests.
fn api_client(config: Option<&Path>) -> Result<ApiClient> {
    let settings = Settings::load(config)?;
    ApiClient::new(settings)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = cli.config;

    // Prompts go through dialoguer on a terminal, plain lines otherwise.
    let interactive = std::io::stdin().is_terminal();
    let mut console: Box<dyn Console> = if interactive {
        Box::new(TermConsole::new())
    } else {
        Box::new(LineConsole::new(std::io::stdin().lock(), std::io::stdout()))
    };
    let console = console.as_mut();

    match cli.command {
        Some(Commands::Bmi { weight, height }) => {
            info!("running bmi calculator");
            ui::run_bmi(console, weight, height)?;
        }
        Some(Commands::Temp { value, to }) => {
            info!("running temperature converter");
            ui::run_temperature(console, value, to)?;
        }
        Some(Commands::Expenses) => {
            info!("running expense tracker");
            ui::run_expense_tracker(console)?;
        }
        Some(Commands::Shop) => {
            info!("running shopping cart");
            ui::run_shopping_cart(console)?;
        }
        Some(Commands::Define { word }) => {
            info!("running dictionary lookup");
            let api = api_client(config.as_deref())?;
            ui::run_dictionary(console, &api, word)?;
        }
        Some(Commands::Recipe { dish }) => {
            info!("running recipe lookup");
            let api = api_client(config.as_deref())?;
            ui::run_recipe(console, &api, joined(dish))?;
        }
        Some(Commands::Books { query }) => {
            info!("running book finder");
            let api = api_client(config.as_deref())?;
            ui::run_book_finder(console, &api, joined(query))?;
        }
        None => {
            if !interactive {
                bail!("No script chosen; run `pocket --help` to list them");
            }
            let api = api_client(config.as_deref())?;
            ui::main_menu(console, &api)?;
        }
    }
    Ok(())
}
