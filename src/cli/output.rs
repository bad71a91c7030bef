//! Output formatting and progress bars for CLI

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar for repeated trials
pub fn create_trial_progress(total_trials: u64) -> anyhow::Result<ProgressBar> {
    let pb = ProgressBar::new(total_trials);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} trials ({msg})")?
            .progress_chars("=>-"),
    );
    Ok(pb)
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Seconds with four decimals, e.g. `0.0123s`
pub fn format_duration(duration: Duration) -> String {
    format!("{:.4}s", duration.as_secs_f64())
}

/// Percentage of `part` in `total`, e.g. `42.0%`
pub fn format_rate(part: usize, total: usize) -> String {
    if total == 0 {
        return "n/a".to_string();
    }
    format!("{:.1}%", 100.0 * part as f64 / total as f64)
}
