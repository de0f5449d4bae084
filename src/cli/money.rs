//! Money CLI commands
//!
//! Direct access to the decimal engine from the shell. Each command prints
//! its result on stdout.

use clap::Subcommand;

use crate::money::{
    format_decimal, multiply_value, parse_decimal, round_two_places, subtract_values, sum_values,
    validate_monetary_value, MoneyInput,
};

/// Money subcommands
#[derive(Subcommand)]
pub enum MoneyCommands {
    /// Normalize a value to a number with at most two decimals
    Parse {
        /// Raw value, with "." or "," as decimal separator
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Treat the value as a binary number instead of decimal text
        #[arg(short, long)]
        numeric: bool,
    },
    /// Render a number as a two-decimal string
    Format {
        #[arg(allow_hyphen_values = true)]
        value: f64,
    },
    /// Check that a value is a well-formed non-negative amount
    Validate {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Sum values exactly
    Sum {
        #[arg(allow_hyphen_values = true)]
        values: Vec<String>,
    },
    /// Subtract the second value from the first
    Sub {
        #[arg(allow_hyphen_values = true)]
        a: String,
        #[arg(allow_hyphen_values = true)]
        b: String,
    },
    /// Multiply a value by a unitless multiplier
    Mul {
        #[arg(allow_hyphen_values = true)]
        value: String,
        #[arg(allow_hyphen_values = true)]
        multiplier: f64,
    },
    /// Round a value to cents and print it as text
    Round {
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Treat the value as a binary number instead of decimal text
        #[arg(short, long)]
        numeric: bool,
    },
}

fn input(value: &str, numeric: bool) -> MoneyInput<'_> {
    if numeric {
        value
            .trim()
            .parse::<f64>()
            .map(MoneyInput::Number)
            .unwrap_or(MoneyInput::Missing)
    } else {
        MoneyInput::Text(value)
    }
}

/// Handle a money command
///
/// Returns `false` when the command reports a negative result (an invalid
/// value for `validate`), so the binary can exit non-zero.
pub fn handle_money_command(cmd: MoneyCommands) -> bool {
    match cmd {
        MoneyCommands::Parse { value, numeric } => {
            println!("{}", parse_decimal(input(&value, numeric)));
        }
        MoneyCommands::Format { value } => {
            println!("{}", format_decimal(value));
        }
        MoneyCommands::Validate { value } => {
            let valid = validate_monetary_value(&value);
            println!("{}", if valid { "valid" } else { "invalid" });
            tracing::debug!(value = %value, valid, "validated");
            return valid;
        }
        MoneyCommands::Sum { values } => {
            println!("{}", format_decimal(sum_values(&values)));
        }
        MoneyCommands::Sub { a, b } => {
            println!("{}", format_decimal(subtract_values(&a, &b)));
        }
        MoneyCommands::Mul { value, multiplier } => {
            println!("{}", format_decimal(multiply_value(&value, multiplier)));
        }
        MoneyCommands::Round { value, numeric } => {
            println!("{}", round_two_places(input(&value, numeric)));
        }
    }
    true
}
