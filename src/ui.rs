// UI layer: one function per script plus the launcher menu. Every flow
// talks to the user through a `Console` so the same code runs on a
// terminal and over a pipe.

use std::time::Duration;

use anyhow::Result;
use dialoguer::Select;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::api::{Lookup, Meal, VolumeInfo, VolumeSearch};
use crate::bmi;
use crate::console::Console;
use crate::ledger::{Ledger, LineItem};
use crate::temperature::{self, Unit};

const INSTRUCTIONS_PREVIEW_CHARS: usize = 200;

/// Launcher shown when `pocket` runs without a subcommand. Loops over a
/// keyboard-driven `Select` until the user chooses "Exit".
pub fn main_menu(console: &mut dyn Console, api: &dyn Lookup) -> Result<()> {
    let items = vec![
        "BMI calculator",
        "Temperature converter",
        "Expense tracker",
        "Shopping cart",
        "Dictionary lookup",
        "Recipe lookup",
        "Book finder",
        "Exit",
    ];
    loop {
        let selection = Select::new().items(&items).default(0).interact()?;
        match selection {
            0 => run_bmi(console, None, None)?,
            1 => run_temperature(console, None, None)?,
            2 => {
                run_expense_tracker(console)?;
            }
            3 => {
                run_shopping_cart(console)?;
            }
            4 => run_dictionary(console, api, None)?,
            5 => run_recipe(console, api, None)?,
            6 => run_book_finder(console, api, None)?,
            _ => break,
        }
        console.say("")?;
    }
    Ok(())
}

/// Prompt for weight and height (unless given) and print BMI and category.
pub fn run_bmi(console: &mut dyn Console, weight: Option<f64>, height: Option<f64>) -> Result<()> {
    console.heading("BMI Calculator")?;
    let weight = match weight {
        Some(w) => w,
        None => console.read_number("Enter weight (kg)")?,
    };
    let height = match height {
        Some(h) => h,
        None => console.read_number("Enter height (m)")?,
    };

    let bmi = bmi::compute(weight, height)?;
    info!(weight, height, bmi = bmi.value(), "computed bmi");
    console.say(&format!("Your BMI is: {:.2}", bmi.rounded()))?;
    console.say(bmi.category().label())?;
    Ok(())
}

/// Convert one temperature. An unknown target unit prints "Invalid choice".
pub fn run_temperature(
    console: &mut dyn Console,
    value: Option<f64>,
    unit: Option<String>,
) -> Result<()> {
    console.heading("Temperature Converter")?;
    let value = match value {
        Some(v) => v,
        None => console.read_number("Enter temperature")?,
    };
    let unit = match unit {
        Some(u) => u,
        None => console.read_line("Convert to (C/F)")?,
    };

    match unit.parse::<Unit>() {
        Ok(target) => {
            let converted = temperature::convert(value, target);
            console.say(&format!("{}: {:.2}", target.name(), converted))?;
        }
        Err(_) => console.say("Invalid choice")?,
    }
    Ok(())
}

fn show_items(console: &mut dyn Console, title: &str, ledger: &Ledger) -> Result<()> {
    console.say("")?;
    console.say(title)?;
    for LineItem { label, amount } in ledger.items() {
        console.say(&format!("{} - {}", label, amount))?;
    }
    console.say(&format!("Total: {}", ledger.total()))?;
    Ok(())
}

/// Expense tracker loop. Returns the expenses entered once the user quits.
pub fn run_expense_tracker(console: &mut dyn Console) -> Result<Ledger> {
    let mut expenses = Ledger::new();
    console.heading("Expense Tracker")?;

    loop {
        console.say("")?;
        console.say("1. Add Expense")?;
        console.say("2. View Expenses")?;
        console.say("3. Quit")?;
        let choice = match console.read_line("Choose") {
            Ok(choice) => choice,
            Err(e) if e.is_end_of_input() => break,
            Err(e) => return Err(e.into()),
        };

        match choice.trim() {
            "1" => {
                let item = console.read_line("Enter item")?;
                let amount = console.read_amount("Enter amount")?;
                match expenses.add(item, amount) {
                    Ok(added) => {
                        console.say(&format!("Added: {} - {}", added.label, added.amount))?
                    }
                    Err(e) => console.say(&e.to_string())?,
                }
            }
            "2" => show_items(console, "Expenses:", &expenses)?,
            "3" => break,
            _ => console.say("Invalid choice")?,
        }
    }
    Ok(expenses)
}

/// Shopping cart loop. Returns whatever is left in the cart on quit.
pub fn run_shopping_cart(console: &mut dyn Console) -> Result<Ledger> {
    let mut cart = Ledger::new();
    console.heading("Online Shopping")?;

    loop {
        console.say("")?;
        console.say("1. Add Item")?;
        console.say("2. View Cart")?;
        console.say("3. Checkout")?;
        console.say("4. Quit")?;
        let choice = match console.read_line("Choose") {
            Ok(choice) => choice,
            Err(e) if e.is_end_of_input() => break,
            Err(e) => return Err(e.into()),
        };

        match choice.trim() {
            "1" => {
                let item = console.read_line("Enter item")?;
                let price = console.read_amount("Enter price")?;
                if let Err(e) = cart.add(item, price) {
                    console.say(&e.to_string())?;
                }
            }
            "2" => show_items(console, "Your Cart:", &cart)?,
            "3" => {
                let count = cart.len();
                let total = cart.checkout();
                info!(items = count, %total, "checkout");
                console.say(&format!("Checkout complete. Total amount: {}", total))?;
            }
            "4" => break,
            _ => console.say("Invalid choice")?,
        }
    }
    Ok(cart)
}

/// Run `request` with a spinner on stderr. indicatif hides the spinner
/// when stderr is not a terminal.
fn with_spinner<T>(message: &'static str, request: impl FnOnce() -> Result<T>) -> Result<T> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = request();
    spinner.finish_and_clear();
    result
}

pub fn run_dictionary(
    console: &mut dyn Console,
    api: &dyn Lookup,
    word: Option<String>,
) -> Result<()> {
    let word = match word {
        Some(w) => w,
        None => console.read_line("Enter a word")?,
    };
    let word = word.trim();

    match with_spinner("Looking up...", || api.define(word))? {
        Some(meaning) => console.say(&format!("Meaning: {}", meaning))?,
        None => console.say("Word not found")?,
    }
    Ok(())
}

/// The recipe lines printed for a meal, instructions cut to a preview.
pub fn describe_meal(meal: &Meal) -> Vec<String> {
    let instructions = meal.instructions.as_deref().unwrap_or_default();
    let preview: String = instructions
        .chars()
        .take(INSTRUCTIONS_PREVIEW_CHARS)
        .collect();
    vec![
        format!("Recipe: {}", meal.name.as_deref().unwrap_or("(no name)")),
        format!("Instructions: {} ...", preview),
    ]
}

pub fn run_recipe(console: &mut dyn Console, api: &dyn Lookup, dish: Option<String>) -> Result<()> {
    let dish = match dish {
        Some(d) => d,
        None => console.read_line("Enter a dish name")?,
    };
    let dish = dish.trim();

    match with_spinner("Searching recipes...", || api.find_recipe(dish))? {
        Some(meal) => {
            for line in describe_meal(&meal) {
                console.say(&line)?;
            }
        }
        None => console.say("Recipe not found")?,
    }
    Ok(())
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lines printed for one book, numbered from 1.
pub fn describe_book(number: usize, info: &VolumeInfo) -> Vec<String> {
    let title = info.title.as_deref().unwrap_or("(no title)");
    let authors = match &info.authors {
        Some(authors) if !authors.is_empty() => authors.join(", "),
        _ => "(no authors)".to_string(),
    };
    let publisher = info.publisher.as_deref().unwrap_or("(no publisher)");
    let description = match &info.description {
        Some(d) => collapse_whitespace(d),
        None => "(no description)".to_string(),
    };

    vec![
        format!("--- Book {} ---", number),
        format!("Title: {}", title),
        format!("Authors: {}", authors),
        format!("Publisher: {}", publisher),
        format!("Description: {}", description),
        String::new(),
    ]
}

/// Every line printed for a search result.
pub fn describe_search(search: &VolumeSearch) -> Vec<String> {
    let Some(items) = &search.items else {
        return vec!["No items found for query.".to_string()];
    };

    let mut lines = Vec::new();
    let books = items.iter().filter_map(|item| item.volume_info.as_ref());
    for (index, info) in books.enumerate() {
        lines.extend(describe_book(index + 1, info));
    }
    if lines.is_empty() {
        lines.push("No books returned.".to_string());
    }
    lines
}

pub fn run_book_finder(
    console: &mut dyn Console,
    api: &dyn Lookup,
    query: Option<String>,
) -> Result<()> {
    let query = match query {
        Some(q) => q,
        None => console.read_line("Enter search terms")?,
    };
    let query = query.trim();
    if query.is_empty() {
        console.say("No query provided. Exiting.")?;
        return Ok(());
    }

    let search = with_spinner("Searching books...", || api.search_books(query))?;
    for line in describe_search(&search) {
        console.say(&line)?;
    }
    Ok(())
}
