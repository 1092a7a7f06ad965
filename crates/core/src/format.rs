//! Short human-readable rendering of large numbers.

const THOUSAND: f64 = 1_000.0;
const MILLION: f64 = 1_000_000.0;
const BILLION: f64 = 1_000_000_000.0;

/// Abbreviate a non-negative amount: `999.5`, `1.00K`, `2.50M`, `1.00B`.
///
/// Each band includes its lower bound, so exactly one million renders as `1.00M`.
pub fn format_amount(value: f64) -> String {
    if value < THOUSAND {
        format!("{value:.1}")
    } else if value < MILLION {
        format!("{:.2}K", value / THOUSAND)
    } else if value < BILLION {
        format!("{:.2}M", value / MILLION)
    } else {
        format!("{:.2}B", value / BILLION)
    }
}
