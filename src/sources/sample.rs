use async_trait::async_trait;
use anyhow::Result;
use std::time::Duration;

use crate::models::{Amount, Offer};
use crate::sources::OfferSource;

const FALLBACK_TITLE: &str = "示例商品";

/// Built-in demo source. Ignores the network entirely: after a fixed
/// artificial delay it returns a small catalog parameterized by the query
/// text. Never fails.
pub struct SampleSource {
    delay: Duration,
}

impl SampleSource {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl OfferSource for SampleSource {
    fn name(&self) -> &str {
        "sample"
    }

    async fn fetch(&self, query: &str) -> Result<Vec<Offer>> {
        let q = query.trim();
        // simulated network latency
        tokio::time::sleep(self.delay).await;

        let title = if q.is_empty() { FALLBACK_TITLE } else { q };

        Ok(vec![
            Offer {
                merchant: "京东".to_string(),
                title: title.to_string(),
                url: "https://jd.com/example".to_string(),
                price: Amount::Number(5999.0),
                currency: "CNY".to_string(),
                ..Default::default()
            },
            Offer {
                merchant: "天猫".to_string(),
                title: q.to_string(),
                url: "https://tmall.com/example".to_string(),
                price: Amount::Number(5888.0),
                shipping: Amount::Number(15.0),
                discount: Amount::Number(100.0),
                currency: "CNY".to_string(),
            },
            Offer {
                merchant: "拼多多".to_string(),
                title: q.to_string(),
                url: "https://pinduoduo.com/example".to_string(),
                price: Amount::Number(5799.0),
                currency: "CNY".to_string(),
                ..Default::default()
            },
            Offer {
                merchant: "Amazon US".to_string(),
                title: q.to_string(),
                url: "https://amazon.com/example".to_string(),
                price: Amount::Number(799.0),
                shipping: Amount::Number(20.0),
                discount: Amount::Number(30.0),
                currency: "USD".to_string(),
            },
        ])
    }
}
