// Library root
// -----------
// The binary (`main.rs`) parses the command line and hands off to these
// modules.
//
// Module responsibilities:
// - `bmi`, `temperature`: the two arithmetic scripts.
// - `money`, `ledger`: line items and totals for the expense tracker and
//   the shopping cart.
// - `api`: blocking HTTP lookups (dictionary, recipes, books).
// - `console`: prompts and output, on a terminal or over a pipe.
// - `ui`: the interactive flow of each script and the launcher menu.
// - `config`, `logging`, `error`: settings, tracing setup, error types.
pub mod api;
pub mod bmi;
pub mod config;
pub mod console;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod money;
pub mod temperature;
pub mod ui;

pub use error::{AppError, AppResult};
