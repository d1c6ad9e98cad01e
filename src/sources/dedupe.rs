use std::collections::HashMap;

use crate::models::Offer;

/// Identity of an offer for deduplication. Offers without a URL each get a
/// distinct counter-based key so they are always retained.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum DedupeKey {
    Url(String),
    Anonymous(u64),
}

/// Collapse a merged offer list to one entry per URL.
///
/// Insertion-order map semantics: the first occurrence of a URL fixes the
/// output position, a later occurrence replaces the stored value in place.
/// Offers without a URL are never merged with anything. Idempotent.
pub fn dedupe_by_url(offers: Vec<Offer>) -> Vec<Offer> {
    let mut index: HashMap<DedupeKey, usize> = HashMap::new();
    let mut out: Vec<Offer> = Vec::new();
    let mut anon_counter: u64 = 0;

    for offer in offers {
        let key = if offer.url.is_empty() {
            anon_counter += 1;
            DedupeKey::Anonymous(anon_counter)
        } else {
            DedupeKey::Url(offer.url.clone())
        };

        match index.get(&key) {
            Some(&pos) => out[pos] = offer,
            None => {
                index.insert(key, out.len());
                out.push(offer);
            }
        }
    }

    out
}
