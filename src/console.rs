//! Colorful console output for roster generation.

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::time::Duration;

use crate::constraints::Analysis;
use crate::domain::RosterProblem;
use crate::generator::GenerationStats;

/// ASCII art banner for server startup.
pub fn print_banner() {
    let banner = r#"
  ____  _     _  __ _     ____            _
 / ___|| |__ (_)/ _| |_  |  _ \ ___  ___| |_ ___ _ __
 \___ \| '_ \| | |_| __| | |_) / _ \/ __| __/ _ \ '__|
  ___) | | | | |  _| |_  |  _ < (_) \__ \ ||  __/ |
 |____/|_| |_|_|_|  \__| |_| \_\___/|___/\__\___|_|
"#;
    println!("{}", banner.cyan().bold());
    println!(
        "  {} {}\n",
        format!("v{}", env!("CARGO_PKG_VERSION")).bright_black(),
        "Monthly Shift Roster".bright_cyan()
    );
}

/// Prints the server address once listening.
pub fn print_listening(addr: &std::net::SocketAddr) {
    println!(
        "{} {} {} Listening on {}",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Server]".bright_cyan(),
        format!("http://{}", addr).bright_yellow()
    );
}

/// Prints a summary box after a roster is generated.
pub fn print_generation_summary(
    problem: &RosterProblem,
    stats: &GenerationStats,
    analysis: &Analysis,
) {
    let cells = problem.employees.len() * problem.month.days_in_month() as usize;
    let score = analysis.score.to_string();

    println!(
        "{} {} {} Generation ended: month ({}), employees ({}), cells ({}), time spent ({}), score ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Generator]".bright_cyan(),
        problem.month.to_string().white().bold(),
        problem.employees.len().to_formatted_string(&Locale::en).bright_yellow(),
        cells.to_formatted_string(&Locale::en).bright_yellow(),
        format_duration(stats.duration).yellow(),
        format_score(&score)
    );

    // 60 chars wide, 56 char content area
    println!();
    println!("{}", "╔══════════════════════════════════════════════════════════╗".bright_cyan());

    let feasible = analysis.is_feasible();
    let status_text = if feasible {
        "✓ FEASIBLE ROSTER"
    } else {
        "✗ INFEASIBLE (hard constraints violated)"
    };
    let status_colored = if feasible {
        status_text.bright_green().bold().to_string()
    } else {
        status_text.bright_red().bold().to_string()
    };
    let status_padding = 56 - status_text.chars().count();
    let left_pad = status_padding / 2;
    let right_pad = status_padding - left_pad;
    println!(
        "{}{}{}{}{}",
        "║".bright_cyan(),
        " ".repeat(left_pad),
        status_colored,
        " ".repeat(right_pad),
        "║".bright_cyan()
    );

    println!("{}", "╠══════════════════════════════════════════════════════════╣".bright_cyan());

    let rows = [
        ("Final Score:", score),
        ("Generation Time:", format_duration(stats.duration)),
        ("Pre-marked:", stats.premarked.to_formatted_string(&Locale::en)),
        (
            "Fixed / Rotated:",
            format!(
                "{} / {}",
                stats.fixed.to_formatted_string(&Locale::en),
                stats.rotated.to_formatted_string(&Locale::en)
            ),
        ),
        ("Coverage Picks:", stats.covered.to_formatted_string(&Locale::en)),
        ("Defaulted:", stats.defaulted.to_formatted_string(&Locale::en)),
        ("Unmet Headcount:", stats.unmet.to_formatted_string(&Locale::en)),
        (
            "Violations:",
            analysis.violation_count().to_formatted_string(&Locale::en),
        ),
    ];
    for (label, value) in rows {
        println!(
            "{}  {:<18}{:>36}  {}",
            "║".bright_cyan(),
            label,
            value,
            "║".bright_cyan()
        );
    }

    println!("{}", "╚══════════════════════════════════════════════════════════╝".bright_cyan());
    println!();
}

/// Formats a duration nicely.
fn format_duration(d: Duration) -> String {
    let total_ms = d.as_millis();
    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", d.as_secs_f64())
    } else {
        let mins = total_ms / 60_000;
        let secs = (total_ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

/// Formats a score with colors based on feasibility.
fn format_score(score: &str) -> String {
    // "-2hard/-5soft" or "0hard/0soft"
    let parts: Vec<&str> = score.split('/').collect();
    if parts.len() != 2 {
        return score.white().to_string();
    }
    let hard = parts[0].trim_end_matches("hard");
    let soft = parts[1].trim_end_matches("soft");
    let hard_num: i64 = hard.parse().unwrap_or(0);
    let soft_num: i64 = soft.parse().unwrap_or(0);

    let hard_str = if hard_num < 0 {
        format!("{}hard", hard).bright_red().to_string()
    } else {
        format!("{}hard", hard).bright_green().to_string()
    };
    let soft_str = if soft_num < 0 {
        format!("{}soft", soft).yellow().to_string()
    } else {
        format!("{}soft", soft).white().to_string()
    };

    format!("{}/{}", hard_str, soft_str)
}

/// Returns a timestamp string.
fn timestamp() -> String {
    chrono::Local::now().format("%H:%M:%S%.3f").to_string()
}
