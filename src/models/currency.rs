/// Currencies the comparison understands. Everything is normalized to CNY
/// through a fixed rate table before offers are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Currency {
    Cny,
    Usd,
    Eur,
    Hkd,
}

impl Currency {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "CNY" => Some(Currency::Cny),
            "USD" => Some(Currency::Usd),
            "EUR" => Some(Currency::Eur),
            "HKD" => Some(Currency::Hkd),
            _ => None,
        }
    }

    /// Fixed conversion rate into CNY.
    pub fn rate_to_cny(&self) -> f64 {
        match self {
            Currency::Cny => 1.0,
            Currency::Usd => 7.2,
            Currency::Eur => 7.8,
            Currency::Hkd => 0.92,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Currency::Cny => "¥",
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Hkd => "$",
        }
    }
}

/// Conversion rate for a raw currency code. Unrecognized codes get rate 1,
/// the same as CNY; corpus data carries unknown codes and they pass
/// through rather than being rejected.
pub fn rate_for_code(code: &str) -> f64 {
    Currency::from_code(code).map_or(1.0, |c| c.rate_to_cny())
}

/// Display glyph for a raw currency code. A missing code means CNY; an
/// unrecognized one renders with no glyph at all.
pub fn glyph_for_code(code: &str) -> &'static str {
    let code = if code.trim().is_empty() { "CNY" } else { code };
    Currency::from_code(code).map_or("", |c| c.glyph())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_rates() {
        assert_eq!(rate_for_code("CNY"), 1.0);
        assert_eq!(rate_for_code("usd"), 7.2);
        assert_eq!(rate_for_code("EUR"), 7.8);
        assert_eq!(rate_for_code("HKD"), 0.92);
    }

    #[test]
    fn unknown_code_falls_back_to_unit_rate() {
        assert_eq!(rate_for_code("GBP"), 1.0);
        assert_eq!(rate_for_code(""), 1.0);
    }

    #[test]
    fn glyphs() {
        assert_eq!(glyph_for_code("CNY"), "¥");
        assert_eq!(glyph_for_code("USD"), "$");
        assert_eq!(glyph_for_code("EUR"), "€");
        assert_eq!(glyph_for_code("HKD"), "$");
        // missing means CNY, unknown means no glyph
        assert_eq!(glyph_for_code(""), "¥");
        assert_eq!(glyph_for_code("GBP"), "");
    }
}
