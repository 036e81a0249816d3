//! Switchboard Personas - Demo Agent Suites
//!
//! Three persona suites exercising the handoff core end to end:
//! customer support (five agents), real estate (four agents), and a
//! single-agent gaming advisor. Catalog data is injected, never
//! embedded, so every suite is testable against arbitrary fixtures.

pub mod catalog;
pub mod gaming;
pub mod real_estate;
pub mod support;

pub use catalog::{
    format_dollars, KbEntry, KnowledgeBase, Product, ProductCatalog, Property, PropertyListings,
    PropertySearch,
};
pub use gaming::{gaming_advisor, GamingProfile};
pub use real_estate::{real_estate_agents, RealEstateProfile};
pub use support::{support_agents, IssueType, SupportProfile};
