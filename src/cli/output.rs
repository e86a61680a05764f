//! Output formatting for CLI

use crate::q_learning::{Decay, Hyperparameters};

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

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

fn format_decay(decay: Decay) -> String {
    format!("{} (decay {}, min {})", decay.value, decay.decay, decay.min)
}

/// Print the three hyperparameter schedules
pub fn print_hyperparameters(hyperparameters: &Hyperparameters) {
    print_kv("alpha", &format_decay(hyperparameters.alpha));
    print_kv("gamma", &format_decay(hyperparameters.gamma));
    print_kv("epsilon", &format_decay(hyperparameters.epsilon));
}

/// Format an optional average return
pub fn format_average(average: Option<f64>) -> String {
    average.map_or_else(|| "n/a (window not filled)".to_string(), |v| format!("{v:.2}"))
}
