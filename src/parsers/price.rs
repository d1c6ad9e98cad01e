use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{rate_for_code, glyph_for_code, Offer};

// Leading float, parseFloat-style: a numeric prefix parses even when
// followed by trailing junk.
static LEADING_FLOAT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?")
        .expect("Invalid leading float regex")
});

/// Parse a raw price-like string into a number. Strips whitespace, commas
/// and the currency glyphs ¥ $ €, then parses a leading float from what is
/// left. Returns 0 on empty input or any parse failure; never errors.
pub fn parse_numeric(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',' && *c != '¥' && *c != '$' && *c != '€')
        .collect();
    if cleaned.is_empty() {
        return 0.0;
    }

    LEADING_FLOAT_REGEX
        .find(&cleaned)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Effective cost of an offer in CNY: price + shipping - discount,
/// converted through the fixed rate table. Pure function of the offer's
/// numeric fields and currency code.
pub fn effective_price_cny(offer: &Offer) -> f64 {
    let total = offer.price.value() + offer.shipping.value() - offer.discount.value();
    total * rate_for_code(&offer.currency)
}

/// Render an amount with two decimals and the currency glyph.
pub fn format_amount(value: f64, code: &str) -> String {
    format!("{}{:.2}", glyph_for_code(code), value)
}

/// Cheapest offer by effective CNY cost. Strict less-than keeps the first
/// offer that reaches the minimum; empty input means there is nothing to
/// pick, which callers render as "no offers" rather than an error.
pub fn select_best(offers: &[Offer]) -> Option<&Offer> {
    let mut best: Option<(&Offer, f64)> = None;
    for offer in offers {
        let cost = effective_price_cny(offer);
        match best {
            Some((_, min)) if cost >= min => {}
            _ => best = Some((offer, cost)),
        }
    }
    best.map(|(offer, _)| offer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Amount;

    fn offer(price: f64, currency: &str) -> Offer {
        Offer {
            price: Amount::Number(price),
            currency: currency.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn parses_symbols_and_separators() {
        assert_eq!(parse_numeric("¥1,234.50"), 1234.5);
        assert_eq!(parse_numeric("$ 799"), 799.0);
        assert_eq!(parse_numeric("€1 299,"), 1299.0);
        assert_eq!(parse_numeric("5999"), 5999.0);
    }

    #[test]
    fn garbage_parses_to_zero() {
        assert_eq!(parse_numeric(""), 0.0);
        assert_eq!(parse_numeric("abc"), 0.0);
        assert_eq!(parse_numeric("   "), 0.0);
    }

    #[test]
    fn numeric_prefix_survives_trailing_text() {
        assert_eq!(parse_numeric("12.5元"), 12.5);
        assert_eq!(parse_numeric("-3abc"), -3.0);
    }

    #[test]
    fn effective_cost_combines_fields_and_rate() {
        let o = Offer {
            price: Amount::Text("¥5,888".to_string()),
            shipping: Amount::Number(15.0),
            discount: Amount::Number(100.0),
            currency: "CNY".to_string(),
            ..Default::default()
        };
        assert_eq!(effective_price_cny(&o), 5803.0);

        let usd = Offer {
            price: Amount::Number(799.0),
            shipping: Amount::Number(20.0),
            discount: Amount::Number(30.0),
            currency: "USD".to_string(),
            ..Default::default()
        };
        assert_eq!(effective_price_cny(&usd), 789.0 * 7.2);
    }

    #[test]
    fn effective_cost_is_deterministic() {
        let o = offer(123.45, "EUR");
        assert_eq!(effective_price_cny(&o), effective_price_cny(&o.clone()));
    }

    #[test]
    fn missing_and_unknown_currency_use_unit_rate() {
        assert_eq!(effective_price_cny(&offer(100.0, "")), 100.0);
        assert_eq!(effective_price_cny(&offer(100.0, "GBP")), 100.0);
    }

    #[test]
    fn formats_with_glyph() {
        assert_eq!(format_amount(5803.0, "CNY"), "¥5803.00");
        assert_eq!(format_amount(789.0, "USD"), "$789.00");
        assert_eq!(format_amount(12.5, ""), "¥12.50");
        assert_eq!(format_amount(12.5, "GBP"), "12.50");
    }

    #[test]
    fn best_offer_first_minimum_wins() {
        let offers = vec![offer(10.0, "CNY"), offer(5.0, "CNY"), offer(5.0, "CNY")];
        let best = select_best(&offers).unwrap();
        assert!(std::ptr::eq(best, &offers[1]));
    }

    #[test]
    fn best_offer_empty_input() {
        assert!(select_best(&[]).is_none());
    }
}
