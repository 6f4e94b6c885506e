//! Output formatting for CLI

use crate::pipeline::TrainingResult;

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Format a rate in [0, 1] as a percentage
pub fn format_rate(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print the outcome breakdown of a training run
pub fn print_training_summary(result: &TrainingResult) {
    print_section("Training Summary");
    print_kv("Episodes", &format_number(result.total_episodes));
    print_kv(
        "X wins",
        &format!(
            "{} ({})",
            format_number(result.x_wins),
            format_rate(result.x_win_rate)
        ),
    );
    print_kv(
        "O wins",
        &format!(
            "{} ({})",
            format_number(result.o_wins),
            format_rate(result.o_win_rate)
        ),
    );
    print_kv(
        "Draws",
        &format!(
            "{} ({})",
            format_number(result.draws),
            format_rate(result.draw_rate)
        ),
    );
    if result.abandoned > 0 {
        print_kv("Abandoned", &format_number(result.abandoned));
    }
    print_kv("Avg. moves", &format!("{:.2}", result.average_moves));
    print_kv("Q-values", &format_number(result.table_size));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(50_000), "50,000");
        assert_eq!(format_number(1_234_567), "1,234,567");
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(0.5), "50.0%");
        assert_eq!(format_rate(0.1234), "12.3%");
    }
}
