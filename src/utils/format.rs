/// Placeholder shown for fields the upstream left out.
pub const NOT_AVAILABLE: &str = "N/A";

/// Formats a population with comma-grouped thousands, e.g. `67,391,582`.
pub fn format_population(population: u64) -> String {
    let digits = population.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}
