use serde::{Deserialize, Serialize};
use url::Url;

use crate::parsers::parse_numeric;

/// A numeric-ish field as it arrives from a source: corpus records carry
/// either plain numbers or strings like "¥1,234.50".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Default for Amount {
    fn default() -> Self {
        Amount::Number(0.0)
    }
}

impl Amount {
    pub fn value(&self) -> f64 {
        match self {
            Amount::Number(n) => *n,
            Amount::Text(s) => parse_numeric(s),
        }
    }
}

impl From<f64> for Amount {
    fn from(n: f64) -> Self {
        Amount::Number(n)
    }
}

impl From<&str> for Amount {
    fn from(s: &str) -> Self {
        Amount::Text(s.to_string())
    }
}

/// One merchant's priced listing for a queried product. A plain value type;
/// the URL, when present, is the sole identity used for deduplication.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    #[serde(default)]
    pub merchant: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub price: Amount,
    #[serde(default)]
    pub shipping: Amount,
    #[serde(default)]
    pub discount: Amount,
    /// Raw currency code; empty means CNY, unknown codes pass through.
    #[serde(default)]
    pub currency: String,
}

const UNKNOWN_MERCHANT: &str = "未知平台";

const MERCHANT_NAMES: &[(&str, &str)] = &[
    ("jd", "京东"),
    ("tmall", "天猫"),
    ("taobao", "淘宝"),
    ("pinduoduo", "拼多多"),
    ("amazon", "Amazon"),
    ("aliexpress", "AliExpress"),
    ("suning", "苏宁"),
    ("dangdang", "当当"),
    ("walmart", "Walmart"),
];

impl Offer {
    /// Merchant name for display, inferred from the URL host when the
    /// merchant field is blank.
    pub fn display_merchant(&self) -> String {
        let merchant = self.merchant.trim();
        if !merchant.is_empty() {
            return merchant.to_string();
        }
        infer_merchant_from_url(&self.url)
    }
}

fn infer_merchant_from_url(url: &str) -> String {
    if url.trim().is_empty() {
        return UNKNOWN_MERCHANT.to_string();
    }

    let parsed = match Url::parse(url) {
        Ok(u) => u,
        Err(_) => return UNKNOWN_MERCHANT.to_string(),
    };
    let host = match parsed.host_str() {
        Some(h) => h.trim_start_matches("www."),
        None => return UNKNOWN_MERCHANT.to_string(),
    };

    // Second-level domain is the merchant key: "shop.jd.com" -> "jd"
    let parts: Vec<&str> = host.split('.').collect();
    let name = if parts.len() > 1 {
        parts[parts.len() - 2]
    } else {
        host
    };
    let key = name.to_lowercase();

    if let Some((_, pretty)) = MERCHANT_NAMES.iter().find(|(k, _)| *k == key) {
        return pretty.to_string();
    }

    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => UNKNOWN_MERCHANT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn explicit_merchant_wins() {
        let offer = Offer {
            merchant: "京东".to_string(),
            url: "https://tmall.com/x".to_string(),
            ..Default::default()
        };
        assert_eq!(offer.display_merchant(), "京东");
    }

    #[test]
    fn merchant_inferred_from_host() {
        assert_eq!(infer_merchant_from_url("https://jd.com/example"), "京东");
        assert_eq!(infer_merchant_from_url("https://www.tmall.com/x"), "天猫");
        assert_eq!(
            infer_merchant_from_url("https://shop.amazon.com/dp/1"),
            "Amazon"
        );
        assert_eq!(infer_merchant_from_url("https://newegg.com/x"), "Newegg");
    }

    #[test]
    fn unparseable_url_is_unknown() {
        assert_eq!(infer_merchant_from_url(""), UNKNOWN_MERCHANT);
        assert_eq!(infer_merchant_from_url("not a url"), UNKNOWN_MERCHANT);
    }

    #[test]
    fn sparse_record_deserializes_with_defaults() {
        let offer: Offer =
            serde_json::from_str(r#"{"merchant":"京东","price":"¥5,999"}"#).unwrap();
        assert_eq!(offer.price, Amount::Text("¥5,999".to_string()));
        assert_eq!(offer.shipping.value(), 0.0);
        assert_eq!(offer.currency, "");
    }
}
