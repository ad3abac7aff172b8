//! Line-oriented read-evaluate-print loop around the parser, printer and
//! compiler.

use crate::ast::{Compiler, Parser};
use crate::printer;
use log::debug;
use std::io::{self, BufRead, Write};

/// Tunables for [`run`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReplConfig {
    pub prompt: String,
    /// Input line that ends the session.
    pub quit: String,
    /// Results closer to zero than this are displayed as `0`.
    pub epsilon: f64,
    /// Print the tree description before each result.
    pub show_details: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: "Expression or 'q' to quit > ".to_string(),
            quit: "q".to_string(),
            epsilon: 1e-8,
            show_details: true,
        }
    }
}

/// Maps values within `epsilon` of zero, including `-0.0`, to `+0.0`.
pub fn round_to_zero(value: f64, epsilon: f64) -> f64 {
    if value.abs() < epsilon {
        0.0
    } else {
        value
    }
}

/// Significant digits shown for a result.
const SIGNIFICANT_DIGITS: usize = 15;

/// Formats a result for display with at most 15 significant digits.
///
/// Decimal exponents from -4 up to 14 print in positional notation with
/// trailing zeros removed (`0.5`, `1024`, `0.0001`). Anything else prints as
/// `d.dddE+XX` (`1E+15`, `1.5E-07`). Non-finite values print as `NaN`, `∞`
/// and `-∞`.
pub fn format_result(value: f64, epsilon: f64) -> String {
    let value = round_to_zero(value, epsilon);
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let scientific = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exponent) => (mantissa, exponent),
            Err(_) => return value.to_string(),
        },
        None => return value.to_string(),
    };

    let sign = if value < 0.0 { "-" } else { "" };
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let digits = digits.trim_end_matches('0');

    if (-4..SIGNIFICANT_DIGITS as i32).contains(&exponent) {
        if exponent < 0 {
            let zeros = "0".repeat((-exponent - 1) as usize);
            format!("{}0.{}{}", sign, zeros, digits)
        } else {
            let integral = exponent as usize + 1;
            if digits.len() <= integral {
                format!("{}{}{}", sign, digits, "0".repeat(integral - digits.len()))
            } else {
                format!("{}{}.{}", sign, &digits[..integral], &digits[integral..])
            }
        }
    } else {
        let (lead, rest) = digits.split_at(1);
        let exponent_sign = if exponent < 0 { '-' } else { '+' };
        if rest.is_empty() {
            format!("{}{}E{}{:02}", sign, lead, exponent_sign, exponent.abs())
        } else {
            format!("{}{}.{}E{}{:02}", sign, lead, rest, exponent_sign, exponent.abs())
        }
    }
}

/// Runs the loop until the quit sentinel or end of input.
pub fn run<R: BufRead, W: Write>(config: &ReplConfig, input: R, mut output: W) -> io::Result<()> {
    let mut lines = input.lines();

    loop {
        write!(output, "\n{}", config.prompt)?;
        output.flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        let line = line.trim();
        if line == config.quit {
            break;
        }
        if line.is_empty() {
            continue;
        }

        debug!("REPL input: {}", line);
        let ast = match Parser::parse_expression(line) {
            Ok(ast) => ast,
            Err(err) => {
                writeln!(output, "ERROR: {}", err)?;
                continue;
            }
        };

        if config.show_details {
            writeln!(output, "Details:")?;
            for detail in printer::render(&ast, "> ") {
                writeln!(output, "{}", detail)?;
            }
            writeln!(output)?;
        }

        let result = Compiler::compile(&ast).call();
        writeln!(output, "Result:")?;
        writeln!(
            output,
            "({})() = {}",
            ast,
            format_result(result, config.epsilon)
        )?;
    }

    writeln!(output)?;
    Ok(())
}
