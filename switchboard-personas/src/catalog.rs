//! Injected demo data
//!
//! The persona suites never embed their catalogs: products, the
//! troubleshooting knowledge base, and property listings are read-only
//! data passed in at agent construction, so the personas stay testable
//! against whatever fixture an embedder supplies. The `demo()`
//! constructors provide the sample content used by the demo binary and
//! tests.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// ============================================================================
// PRODUCTS
// ============================================================================

/// One product in the support catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warranty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_period_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_cycle: Option<String>,
    pub categories: Vec<String>,
}

impl Product {
    /// Whether the product is a subscription service, which follows the
    /// digital-services cancellation policy instead of returns.
    pub fn is_subscription(&self) -> bool {
        self.categories.iter().any(|c| c == "Subscription")
    }
}

/// Read-only product catalog.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    products: Vec<Product>,
}

impl ProductCatalog {
    /// Build a catalog from products.
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Look up a product by id.
    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// All products.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// The sample catalog used by the demo binary and tests.
    pub fn demo() -> Self {
        Self::new(vec![
            Product {
                id: "P001".to_string(),
                name: "Premium Wireless Headphones".to_string(),
                price: 199.99,
                warranty: Some("1 year limited warranty".to_string()),
                return_period_days: Some(30),
                billing_cycle: None,
                categories: vec!["Electronics".to_string(), "Audio".to_string()],
            },
            Product {
                id: "P002".to_string(),
                name: "Ultra HD Smart TV 55\"".to_string(),
                price: 699.99,
                warranty: Some("2 year limited warranty".to_string()),
                return_period_days: Some(30),
                billing_cycle: None,
                categories: vec!["Electronics".to_string(), "Television".to_string()],
            },
            Product {
                id: "P003".to_string(),
                name: "Ergonomic Office Chair".to_string(),
                price: 249.99,
                warranty: Some("5 year limited warranty".to_string()),
                return_period_days: Some(60),
                billing_cycle: None,
                categories: vec!["Furniture".to_string(), "Office".to_string()],
            },
            Product {
                id: "P004".to_string(),
                name: "Premium Subscription".to_string(),
                price: 12.99,
                warranty: None,
                return_period_days: None,
                billing_cycle: Some("monthly".to_string()),
                categories: vec!["Services".to_string(), "Subscription".to_string()],
            },
        ])
    }
}

// ============================================================================
// TECHNICAL KNOWLEDGE BASE
// ============================================================================

/// One troubleshooting entry: matches when both the subject and a
/// symptom appear in the issue description.
#[derive(Debug, Clone)]
pub struct KbEntry {
    pub topic: String,
    subject: Regex,
    symptom: Regex,
    pub advice: String,
}

impl KbEntry {
    /// Create an entry from subject/symptom patterns.
    pub fn new(
        topic: impl Into<String>,
        subject: Regex,
        symptom: Regex,
        advice: impl Into<String>,
    ) -> Self {
        Self {
            topic: topic.into(),
            subject,
            symptom,
            advice: advice.into(),
        }
    }

    /// Whether the description matches this entry.
    pub fn matches(&self, description: &str) -> bool {
        self.subject.is_match(description) && self.symptom.is_match(description)
    }
}

/// Read-only troubleshooting knowledge base.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    entries: Vec<KbEntry>,
}

static HEADPHONE_SUBJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)headphone").expect("valid regex"));
static HEADPHONE_SYMPTOM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)connect|bluetooth|pair").expect("valid regex"));
static TV_SUBJECT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\btv\b").expect("valid regex"));
static TV_SYMPTOM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)picture|display|screen").expect("valid regex"));
static SUBSCRIPTION_SUBJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)subscription").expect("valid regex"));
static SUBSCRIPTION_SYMPTOM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)access|login|content").expect("valid regex"));

impl KnowledgeBase {
    /// Build a knowledge base from entries.
    pub fn new(entries: Vec<KbEntry>) -> Self {
        Self { entries }
    }

    /// First entry matching the description.
    pub fn lookup(&self, description: &str) -> Option<&KbEntry> {
        self.entries.iter().find(|e| e.matches(description))
    }

    /// The sample knowledge base used by the demo binary and tests.
    pub fn demo() -> Self {
        Self::new(vec![
            KbEntry::new(
                "headphones_not_connecting",
                HEADPHONE_SUBJECT.clone(),
                HEADPHONE_SYMPTOM.clone(),
                "If your headphones aren't connecting via Bluetooth: \
                 1. Ensure Bluetooth is enabled on your device. \
                 2. Put the headphones in pairing mode (usually by holding the power button). \
                 3. Make sure the headphones are charged. \
                 4. If previously paired, try removing the device from your Bluetooth settings and reconnect. \
                 5. Reset the headphones by holding the power button for 10 seconds.",
            ),
            KbEntry::new(
                "tv_no_picture",
                TV_SUBJECT.clone(),
                TV_SYMPTOM.clone(),
                "If your TV has power but no picture: \
                 1. Check that the correct input source is selected. \
                 2. Verify all cables are securely connected. \
                 3. Try unplugging the TV for 30 seconds, then plug it back in. \
                 4. If using external devices, try disconnecting them and connecting directly to TV. \
                 5. Try a factory reset through your TV settings.",
            ),
            KbEntry::new(
                "subscription_access_issues",
                SUBSCRIPTION_SUBJECT.clone(),
                SUBSCRIPTION_SYMPTOM.clone(),
                "If you're having trouble accessing your subscription content: \
                 1. Verify your account is active and subscription hasn't expired. \
                 2. Try logging out and back in. \
                 3. Clear your browser cache and cookies. \
                 4. Check if the service is experiencing an outage. \
                 5. Try accessing from a different device or browser.",
            ),
        ])
    }
}

// ============================================================================
// PROPERTY LISTINGS
// ============================================================================

/// One property listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: String,
    pub address: String,
    pub price: i64,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub sqft: u32,
    pub property_type: String,
    pub description: String,
}

/// Criteria for a property search. Unset fields do not filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertySearch {
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub min_bedrooms: Option<u32>,
    pub min_bathrooms: Option<u32>,
    pub property_type: Option<String>,
}

/// Read-only property listings.
#[derive(Debug, Clone, Default)]
pub struct PropertyListings {
    properties: Vec<Property>,
}

impl PropertyListings {
    /// Build listings from properties.
    pub fn new(properties: Vec<Property>) -> Self {
        Self { properties }
    }

    /// Look up a property by exact address, case-insensitively.
    pub fn find_by_address(&self, address: &str) -> Option<&Property> {
        self.properties
            .iter()
            .find(|p| p.address.eq_ignore_ascii_case(address))
    }

    /// Properties matching the search criteria.
    pub fn search(&self, criteria: &PropertySearch) -> Vec<&Property> {
        self.properties
            .iter()
            .filter(|p| criteria.min_price.is_none_or(|min| p.price >= min))
            .filter(|p| criteria.max_price.is_none_or(|max| p.price <= max))
            .filter(|p| criteria.min_bedrooms.is_none_or(|min| p.bedrooms >= min))
            .filter(|p| criteria.min_bathrooms.is_none_or(|min| p.bathrooms >= min))
            .filter(|p| {
                criteria
                    .property_type
                    .as_deref()
                    .is_none_or(|t| p.property_type.eq_ignore_ascii_case(t))
            })
            .collect()
    }

    /// The sample listings used by the demo binary and tests.
    pub fn demo() -> Self {
        Self::new(vec![
            Property {
                id: "P001".to_string(),
                address: "123 Main Street".to_string(),
                price: 350_000,
                bedrooms: 3,
                bathrooms: 2,
                sqft: 1_800,
                property_type: "Single Family Home".to_string(),
                description: "Beautiful single-family home with a spacious backyard, \
                              updated kitchen, and hardwood floors throughout."
                    .to_string(),
            },
            Property {
                id: "P002".to_string(),
                address: "456 Oak Avenue".to_string(),
                price: 275_000,
                bedrooms: 2,
                bathrooms: 2,
                sqft: 1_200,
                property_type: "Condo".to_string(),
                description: "Modern condo in the heart of downtown with stunning city views, \
                              stainless steel appliances, and a fitness center in the building."
                    .to_string(),
            },
            Property {
                id: "P003".to_string(),
                address: "789 Pine Road".to_string(),
                price: 425_000,
                bedrooms: 4,
                bathrooms: 3,
                sqft: 2_400,
                property_type: "Single Family Home".to_string(),
                description: "Spacious family home in a quiet neighborhood with a two-car \
                              garage, finished basement, and newly renovated bathrooms."
                    .to_string(),
            },
            Property {
                id: "P004".to_string(),
                address: "101 River Lane".to_string(),
                price: 550_000,
                bedrooms: 5,
                bathrooms: 4,
                sqft: 3_200,
                property_type: "Luxury Home".to_string(),
                description: "Luxurious home with an open floor plan, gourmet kitchen, master \
                              suite with walk-in closet, and a private pool in the backyard."
                    .to_string(),
            },
        ])
    }
}

/// Format a whole-dollar amount with thousands separators.
pub fn format_dollars(amount: i64) -> String {
    let digits = amount.abs().to_string();
    let mut grouped = String::new();
    for (index, ch) in digits.chars().enumerate() {
        let remaining = digits.len() - index;
        grouped.push(ch);
        if remaining > 1 && (remaining - 1) % 3 == 0 {
            grouped.push(',');
        }
    }
    if amount < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

// ============================================================================
// TESTS
// ============================================================================
