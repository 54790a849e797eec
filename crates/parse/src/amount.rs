//! Monetary amount extraction
//!
//! Tries an ordered list of patterns from most to least specific; the
//! first pattern that yields a parseable, strictly positive number wins.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::date;

/// Explicit currency-marker form: "R$ 1.234,56", "R$ 230,50", "R$ 50"
static MARKER_AMOUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)r\$\s*([0-9]{1,3}(?:\.[0-9]{3})+(?:,[0-9]{1,2})?|[0-9]+(?:[.,][0-9]+)?)")
        .unwrap()
});

/// Bare numeric token at the end of the string
static TRAILING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]+(?:[.,][0-9]+)?)\s*$").unwrap());

/// Any bare numeric token
static ANY_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"([0-9]+(?:[.,][0-9]+)?)").unwrap());

/// Extract a monetary amount from free text.
///
/// Returns `0.0` when no pattern yields a positive number ("not found").
/// Total: never panics on any input.
pub fn extract_amount(text: &str) -> f64 {
    if let Some(amount) = MARKER_AMOUNT
        .captures(text)
        .and_then(|caps| parse_brazilian_number(caps.get(1).map_or("", |m| m.as_str())))
    {
        if amount > 0.0 {
            return amount;
        }
    }

    // Date tokens like "12/04" would otherwise feed the bare-number tiers,
    // so they are stripped before the fallbacks run.
    let without_dates = date::strip_date_tokens(text);

    for pattern in [&*TRAILING_NUMBER, &*ANY_NUMBER] {
        if let Some(amount) = pattern
            .captures(&without_dates)
            .and_then(|caps| parse_brazilian_number(caps.get(1).map_or("", |m| m.as_str())))
        {
            if amount > 0.0 {
                return amount;
            }
        }
    }

    0.0
}

/// Parse a Brazilian-formatted number.
///
/// A comma is always the decimal separator; dots are thousands separators
/// when every dot-delimited group after the first has exactly three
/// digits, otherwise a lone dot is read as a decimal point.
pub(crate) fn parse_brazilian_number(raw: &str) -> Option<f64> {
    let normalized = if raw.contains(',') {
        raw.replace('.', "").replace(',', ".")
    } else if raw.contains('.') {
        let groups: Vec<&str> = raw.split('.').collect();
        if groups.len() > 1 && groups[1..].iter().all(|g| g.len() == 3) {
            raw.replace('.', "")
        } else {
            raw.to_string()
        }
    } else {
        raw.to_string()
    };

    normalized.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_amount_simple() {
        assert_eq!(extract_amount("Almoço com cliente R$ 50"), 50.0);
        assert_eq!(extract_amount("r$ 35"), 35.0);
    }

    #[test]
    fn test_marker_amount_decimal_comma() {
        assert_eq!(extract_amount("Compra supermercado R$ 230,50 12/04"), 230.50);
    }

    #[test]
    fn test_marker_amount_thousands() {
        assert_eq!(extract_amount("Recebi R$ 1.000 do cliente"), 1000.0);
        assert_eq!(extract_amount("Equipamento R$ 12.345,67"), 12345.67);
    }

    #[test]
    fn test_trailing_number_fallback() {
        assert_eq!(extract_amount("Uber 35"), 35.0);
        assert_eq!(extract_amount("Mercado 150,90"), 150.90);
    }

    #[test]
    fn test_any_number_fallback() {
        assert_eq!(extract_amount("gastei 42 no mercado"), 42.0);
    }

    #[test]
    fn test_date_token_not_mistaken_for_amount() {
        // No marker, only a date: the bare-number tiers must not pick
        // the day/month digits up.
        assert_eq!(extract_amount("almoço 12/04"), 0.0);
    }

    #[test]
    fn test_not_found_is_zero() {
        assert_eq!(extract_amount(""), 0.0);
        assert_eq!(extract_amount("almoço com cliente"), 0.0);
        assert_eq!(extract_amount("R$ 0"), 0.0);
    }

    #[test]
    fn test_recovers_formatted_amounts_embedded_in_text() {
        // Thousands + decimal formatting round-trips within tolerance.
        let cases = [
            (1234.56, "pagamento fornecedor R$ 1.234,56 ontem"),
            (999999.99, "nota R$ 999.999,99 emitida"),
            (7.5, "café R$ 7,5"),
            (100.0, "assinatura R$ 100 mensal"),
        ];
        for (expected, text) in cases {
            assert!((extract_amount(text) - expected).abs() < 1e-6, "{}", text);
        }
    }

    #[test]
    fn test_lone_dot_is_decimal_point() {
        assert_eq!(extract_amount("corrida 35.5"), 35.5);
    }
}
