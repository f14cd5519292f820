//! Curated word lists for keyword analysis.
//!
//! Stop words excluded from significance checks, and the category taxonomy
//! used by the mock category generator.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Common function words that carry no keyword signal.
pub static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "the", "a", "an", "and", "or", "but", "nor", "in", "on", "at", "to", "for", "of", "with",
        "by", "from", "up", "about", "into", "through", "during", "that", "this", "these",
        "those", "it", "its", "is", "are", "was", "were", "be", "been", "being", "have", "has",
        "had", "do", "does", "did", "will", "would", "should", "could", "may", "might", "must",
        "can", "which", "who", "whom", "when", "where", "why", "how", "if", "than", "then", "as",
        "so", "you", "your", "yours", "our", "ours", "we", "they", "them", "their", "his", "her",
        "she", "him", "not", "no", "all", "any", "each", "every", "some", "such", "very", "just",
        "also", "too", "only", "own", "same", "more", "most", "other", "here", "there", "now",
        "what", "get", "got", "out", "off", "over", "under", "again",
    ]
    .into_iter()
    .collect()
});

/// Taxonomy labels keyed by the words (and stems) that vote for them.
///
/// Labels follow the slash-delimited hierarchy of text-analytics category
/// responses.
pub static CATEGORY_TAXONOMY: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| {
        const FASHION: &str = "/style and fashion/clothing";
        const UNDERWEAR: &str = "/style and fashion/clothing/underwear";
        const SHOPPING: &str = "/shopping/retail";
        const TECH: &str = "/technology and computing";
        const HEALTH: &str = "/health and fitness";
        const BUSINESS: &str = "/business and industrial";
        const HOME: &str = "/home and garden";
        const TRAVEL: &str = "/travel";
        const FOOD: &str = "/food and drink";

        let mut map = HashMap::new();
        for word in [
            "apparel", "clothing", "clothes", "fashion", "dress", "shirt", "jeans", "jacket",
            "fabric", "cotton", "lace", "silk", "style", "wear", "outfit", "fit", "size",
        ] {
            map.insert(word, FASHION);
        }
        for word in [
            "bra", "lingerie", "underwear", "bralette", "panty", "brief", "sleepwear", "strap",
            "underwire", "cup",
        ] {
            map.insert(word, UNDERWEAR);
        }
        for word in [
            "shop", "buy", "sale", "discount", "price", "deal", "order", "store", "offer",
            "shipping", "checkout", "cart", "coupon", "purchase",
        ] {
            map.insert(word, SHOPPING);
        }
        for word in [
            "software", "app", "cloud", "data", "platform", "digital", "wireless", "device",
            "online", "mobile", "computer", "network", "analytics", "api",
        ] {
            map.insert(word, TECH);
        }
        for word in [
            "comfort", "health", "fitness", "support", "wellness", "body", "exercise", "active",
            "workout", "sport", "breathable", "posture",
        ] {
            map.insert(word, HEALTH);
        }
        for word in [
            "business", "customer", "service", "marketing", "brand", "growth", "strategy",
            "company", "sales", "revenue", "team", "product",
        ] {
            map.insert(word, BUSINESS);
        }
        for word in [
            "home", "garden", "kitchen", "furniture", "bedroom", "decor", "bed", "sofa",
        ] {
            map.insert(word, HOME);
        }
        for word in [
            "travel", "trip", "hotel", "flight", "vacation", "beach", "destination",
        ] {
            map.insert(word, TRAVEL);
        }
        for word in [
            "food", "drink", "coffee", "recipe", "restaurant", "meal", "wine", "snack",
        ] {
            map.insert(word, FOOD);
        }
        map
    });
