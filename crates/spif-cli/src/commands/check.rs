//! Check command - validate a definition file against the standard.

use std::path::PathBuf;

use colored::Colorize;
use spif::{Severity, Spif};

pub fn run(
    file: PathBuf,
    json_output: bool,
    strict: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let spif = Spif::new();
    let result = spif.check_file(&file)?;

    if json_output {
        println!("{}", result.to_json()?);
    } else {
        println!(
            "{} {}",
            "Checking".cyan().bold(),
            file.display().to_string().white()
        );

        if verbose {
            println!();
            println!("{}", "Groups:".yellow().bold());
            for group in &result.dataset.groups {
                print_group(group, 1);
            }
            println!();
        }

        for violation in &result.violations {
            let label = match violation.severity {
                Severity::Error => violation.severity.label().red().bold(),
                Severity::Warning => violation.severity.label().yellow().bold(),
            };
            println!("  {:7} {} {}", label, violation.path.white(), violation.message);
        }

        let counts = &result.summary.violations_by_severity;
        println!(
            "Found {} violations ({} errors, {} warnings)",
            result.violations.len().to_string().white().bold(),
            counts.error.to_string().red(),
            counts.warning.to_string().yellow()
        );

        if result.is_valid() && (!strict || counts.warning == 0) {
            println!("{}", "Definition conforms to the standard".green().bold());
        }
    }

    let counts = &result.summary.violations_by_severity;
    if !result.is_valid() {
        return Err(format!("{} standard violation(s) found", counts.error).into());
    }
    if strict && counts.warning > 0 {
        return Err(format!("{} warning(s) found (strict mode)", counts.warning).into());
    }

    Ok(())
}

fn print_group(group: &spif::Group, depth: usize) {
    println!(
        "{}{} {:12} {} variables",
        "  ".repeat(depth),
        group.meta.name.white(),
        format!("({})", group.kind().label()),
        group.variables.len()
    );
    for child in &group.groups {
        print_group(child, depth + 1);
    }
}
