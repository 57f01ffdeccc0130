//! Display-price formatting
//!
//! The regressor predicts in log space; the display transform is
//! `exp(raw)` rounded to the nearest whole currency unit with thousands
//! separators. Formatting is presentation-only: the un-rounded exp value
//! stays authoritative for any numeric use.

/// Currency symbol the training data was priced in.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

/// Configuration for display-price formatting
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    pub currency_symbol: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

/// Formats raw log-scale predictions into user-facing price strings.
pub struct PriceFormatter {
    config: DisplayConfig,
}

impl PriceFormatter {
    pub fn new() -> Self {
        Self {
            config: DisplayConfig::default(),
        }
    }

    pub fn with_config(config: DisplayConfig) -> Self {
        Self { config }
    }

    /// The authoritative currency-scale prediction.
    pub fn price(&self, log_price: f64) -> f64 {
        log_price.exp()
    }

    /// Lossy display form: rounded to a whole unit with separators.
    pub fn display(&self, log_price: f64) -> String {
        let rounded = self.price(log_price).round() as i64;
        format!("{}{}", self.config.currency_symbol, group_thousands(rounded))
    }
}

impl Default for PriceFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Insert a separator every three digits from the right.
fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let lead = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - lead) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if n < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(49999), "49,999");
        assert_eq!(group_thousands(1234567), "1,234,567");
        assert_eq!(group_thousands(-45000), "-45,000");
    }

    #[test]
    fn test_display_round_trip() {
        let formatter = PriceFormatter::new();
        // to_display_price(ln(X)) should recover X formatted
        for x in [1.0_f64, 999.0, 50_000.0, 123_456.0, 2_500_000.0] {
            let display = formatter.display(x.ln());
            let expected = format!("₹{}", group_thousands(x as i64));
            assert_eq!(display, expected, "for X = {}", x);
        }
    }

    #[test]
    fn test_price_is_unrounded() {
        let formatter = PriceFormatter::new();
        let raw = 10.81978; // exp ≈ 49993.2
        let price = formatter.price(raw);
        assert!(price.fract().abs() > 0.0, "authoritative value keeps fraction");
        assert!((price - raw.exp()).abs() < f64::EPSILON);
    }

    #[test]
    fn test_custom_currency_symbol() {
        let formatter = PriceFormatter::with_config(DisplayConfig {
            currency_symbol: "$".to_string(),
        });
        assert_eq!(formatter.display(1000.0_f64.ln()), "$1,000");
    }
}
