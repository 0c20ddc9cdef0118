use colored::*;

/// Print a diagnostic line when running verbose
pub fn trace(verbose: bool, message: &str) {
    if verbose {
        eprintln!("{}", format!("[plutus] {}", message).dimmed());
    }
}

pub fn warn(message: &str) {
    eprintln!("{} {}", "Warning:".yellow(), message);
}

pub fn display_error(message: &str) {
    eprintln!("{} {}", "Error:".red(), message);
}

/// Report a finished export
pub fn display_saved(destination: &str, rows: usize) {
    let noun = if rows == 1 { "row" } else { "rows" };
    eprintln!(
        "{}",
        format!("Exported {} {} to {}", rows, noun, destination).green()
    );
}
