//! Terminal output helpers.
//!
//! Status lines keep the `[+]`/`[-]` markers of the session log; the marker
//! is colored when stdout is a terminal.

use crate::batch::RunTally;
use crate::error::TargetError;
use crate::session::{LOG_FILE, PORT_SCAN_FILE, SERVICE_SCAN_FILE};
use console::style;
use std::path::Path;

/// Print a rejected-target diagnostic.
pub fn print_invalid(err: &TargetError) {
    println!("{} Invalid input: {}", style("[-]").red(), err);
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("[-]").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("[!]").yellow().bold(), msg);
}

/// Render the end-of-run summary.
///
/// "Total with open ports" counts sessions where both tools completed; the
/// label is historical.
pub fn render_summary(tally: &RunTally, scans_root: &Path) -> String {
    let root = scans_root.display();
    let mut output = String::new();

    output.push_str("\n[+] Summary Report\n");
    output.push_str(&format!("    Total scans completed: {}\n", tally.scanned));
    output.push_str(&format!("    Total with open ports: {}\n", tally.completed));
    if tally.rejected > 0 {
        output.push_str(&format!("    Invalid targets skipped: {}\n", tally.rejected));
    }

    output.push_str("\n[+] Detailed Scan Results:\n");
    for target in &tally.targets {
        output.push_str(&format!("    - Target: {}\n", target));
        output.push_str(&format!(
            "      Naabu Output: {}/{}/*/{}\n",
            root, target, PORT_SCAN_FILE
        ));
        output.push_str(&format!(
            "      Nmap Output:  {}/{}/*/{}\n",
            root, target, SERVICE_SCAN_FILE
        ));
        output.push_str(&format!(
            "      Log File:     {}/{}/*/{}\n",
            root, target, LOG_FILE
        ));
    }

    output
}

/// Print the end-of-run summary.
pub fn print_summary(tally: &RunTally, scans_root: &Path) {
    print!("{}", render_summary(tally, scans_root));
}
