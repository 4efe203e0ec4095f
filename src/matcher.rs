//! Control-to-rule matching over the content checkout.
//!
//! For each control the checkout is walked independently: files named
//! `rule.yml` are scanned line by line, and a line matches when it carries
//! the `nist:` reference marker together with the control identifier as an
//! unanchored substring. Substring matching means a control that prefixes a
//! longer one (`AC-2` inside `AC-20`) also matches — that is the contract,
//! not an accident to paper over.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

const RULE_FILENAME: &str = "rule.yml";
const NIST_MARKER: &str = "nist:";

/// Rule files under `content_path` referencing `control`.
///
/// Returns paths relative to `content_path`, one entry per matching line, in
/// directory traversal order — no sorting, no de-duplication.
pub fn rules_for_control(control: &str, content_path: &Path) -> Result<Vec<String>> {
    let mut rules = Vec::new();
    scan_dir(content_path, content_path, control, &mut rules)?;
    Ok(rules)
}

fn scan_dir(dir: &Path, root: &Path, control: &str, rules: &mut Vec<String>) -> Result<()> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("failed to read directory {}", dir.display()))?;

    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            scan_dir(&path, root, control, rules)?;
        } else if entry.file_name() == RULE_FILENAME {
            scan_rule_file(&path, root, control, rules)?;
        }
    }
    Ok(())
}

fn scan_rule_file(path: &Path, root: &Path, control: &str, rules: &mut Vec<String>) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let text = String::from_utf8_lossy(&bytes);

    let relative = path
        .strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned();

    for line in text.lines() {
        if line.contains(NIST_MARKER) && line.contains(control) {
            rules.push(relative.clone());
        }
    }
    Ok(())
}

// ─── Reporting ───────────────────────────────────────────────────────────────

/// Print the per-control report blocks to stdout.
pub fn print_rules_for_controls(controls: &[String], content_path: &Path) -> Result<()> {
    let stdout = std::io::stdout();
    write_rule_report(&mut stdout.lock(), controls, content_path)
}

/// Write one block per control with at least one match:
/// a header line, a blank line, the relative rule paths, a trailing blank
/// line. Controls with no matches produce no output at all.
pub fn write_rule_report(
    out: &mut impl Write,
    controls: &[String],
    content_path: &Path,
) -> Result<()> {
    for control in controls {
        let rules = rules_for_control(control, content_path)?;
        if rules.is_empty() {
            continue;
        }
        debug!(control = %control, matches = rules.len(), "control referenced by rules");

        writeln!(out, "The control '{control}' is mentioned in the following rules:\n")?;
        for rule in &rules {
            writeln!(out, "{rule}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}
