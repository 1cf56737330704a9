use colored::Colorize;

/// Print an info message
pub fn info(msg: &str) {
    println!("{} {}", "ℹ".blue(), msg);
}

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a warning message
pub fn warn(msg: &str) {
    println!("{} {}", "⚠".yellow(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a dim/muted message
pub fn dim(msg: &str) {
    println!("  {}", msg.dimmed());
}

/// Print a header/title
pub fn header(title: &str) {
    println!();
    println!("{}", title.bold());
    println!("{}", "─".repeat(title.chars().count()).dimmed());
}

/// Print a section header
pub fn section(title: &str) {
    println!();
    println!("{}", title.cyan().bold());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("  {}: {}", key.dimmed(), value);
}

// ============================================================================
// Value Formatting
// ============================================================================

/// Hide a secret value, keeping only its length visible
pub fn mask(value: &str) -> String {
    match value.chars().count() {
        0 => "(empty)".to_string(),
        n => "•".repeat(n.min(8)),
    }
}

/// Collapse a value to a single display line
pub fn one_line(value: &str, max_len: usize) -> String {
    let lines = value.lines().count();
    let first = value.lines().next().unwrap_or("");

    let mut out: String = first.chars().take(max_len).collect();
    if first.chars().count() > max_len {
        out.push('…');
    }
    if lines > 1 {
        out.push_str(&format!(" (+{} lines)", lines - 1));
    }
    out
}

/// Render the set flags of a variable, e.g. `[build, literal]`
pub fn flag_list(build_time: bool, literal: bool, multiline: bool, runtime: bool) -> String {
    let flags: Vec<&str> = [
        (build_time, "build"),
        (runtime, "runtime"),
        (literal, "literal"),
        (multiline, "multiline"),
    ]
    .into_iter()
    .filter_map(|(set, name)| set.then_some(name))
    .collect();

    if flags.is_empty() {
        String::new()
    } else {
        format!("[{}]", flags.join(", "))
    }
}

// ============================================================================
// Tests
// ============================================================================
