//! Real-estate persona suite
//!
//! Four agents: a greeter that routes callers, a property finder, a
//! viewing scheduler, and a mortgage advisor. Search criteria live in
//! the session's dynamic preference map; everything else is typed on
//! the profile.

use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use switchboard_agents::{decode_args, AgentDef, ToolCtx, ToolDef};
use switchboard_core::{
    ParamSpec, ParamType, Profile, SessionState, StateSnapshot, ToolOutcome, ToolSpec,
};

use crate::catalog::{format_dollars, PropertyListings, PropertySearch};

// ============================================================================
// PROFILE
// ============================================================================

/// Everything learned about a property-hunting caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RealEstateProfile {
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,

    pub viewed_properties: Vec<String>,
    pub interested_properties: Vec<String>,

    pub viewing_date: Option<String>,
    pub viewing_time: Option<String>,

    pub prequalified: bool,
    pub prequalified_amount: Option<i64>,
}

impl Profile for RealEstateProfile {
    fn snapshot(&self) -> StateSnapshot {
        let mut snapshot = StateSnapshot::new();
        snapshot.set_or_unknown("customer_name", self.customer_name.clone());
        snapshot.set_or_unknown("customer_phone", self.customer_phone.clone());
        snapshot.set_or_unknown("customer_email", self.customer_email.clone());
        snapshot.set("viewed_properties", json!(self.viewed_properties));
        snapshot.set("interested_properties", json!(self.interested_properties));
        if self.viewing_date.is_some() {
            snapshot.set_or_unknown("viewing.date", self.viewing_date.clone());
            snapshot.set_or_unknown("viewing.time", self.viewing_time.clone());
        }
        snapshot.set("prequalified.status", self.prequalified);
        snapshot.set_or_unknown("prequalified.amount", self.prequalified_amount);
        snapshot
    }
}

type Ctx<'a> = ToolCtx<'a, RealEstateProfile>;

/// Preference keys recognized by the property search.
const PREFERENCE_KEYS: [&str; 6] = [
    "min_price",
    "max_price",
    "min_bedrooms",
    "min_bathrooms",
    "property_type",
    "location",
];

fn search_from_preferences(state: &SessionState<RealEstateProfile>) -> PropertySearch {
    let int = |key: &str| state.preferences.get(key).and_then(Value::as_i64);
    PropertySearch {
        min_price: int("min_price"),
        max_price: int("max_price"),
        min_bedrooms: int("min_bedrooms").map(|v| v as u32),
        min_bathrooms: int("min_bathrooms").map(|v| v as u32),
        property_type: state
            .preferences
            .get("property_type")
            .and_then(Value::as_str)
            .map(str::to_string),
    }
}

// ============================================================================
// SHARED CONTACT TOOLS
// ============================================================================

#[derive(Deserialize)]
struct UpdateNameArgs {
    name: String,
}

fn update_name() -> ToolDef<RealEstateProfile> {
    ToolDef::new(
        ToolSpec::new(
            "update_name",
            "Called when the user provides their name. Confirm the spelling with the user \
             before calling the function.",
        )
        .with_param(ParamSpec::required(
            "name",
            ParamType::String,
            "The customer's name",
        )),
        |args, ctx: &mut Ctx| {
            let args: UpdateNameArgs = decode_args("update_name", &args)?;
            let reply = format!("Thank you, {}. I've updated your name in our system.", args.name);
            ctx.state.profile.customer_name = Some(args.name);
            Ok(ToolOutcome::narrate(reply))
        },
    )
}

#[derive(Deserialize)]
struct UpdatePhoneArgs {
    phone: String,
}

fn update_phone() -> ToolDef<RealEstateProfile> {
    ToolDef::new(
        ToolSpec::new(
            "update_phone",
            "Called when the user provides their phone number. Confirm the spelling with \
             the user before calling the function.",
        )
        .with_param(ParamSpec::required(
            "phone",
            ParamType::String,
            "The customer's phone number",
        )),
        |args, ctx: &mut Ctx| {
            let args: UpdatePhoneArgs = decode_args("update_phone", &args)?;
            let reply = format!("Got it. Your phone number ({}) has been recorded.", args.phone);
            ctx.state.profile.customer_phone = Some(args.phone);
            Ok(ToolOutcome::narrate(reply))
        },
    )
}

#[derive(Deserialize)]
struct UpdateEmailArgs {
    email: String,
}

fn update_email() -> ToolDef<RealEstateProfile> {
    ToolDef::new(
        ToolSpec::new(
            "update_email",
            "Called when the user provides their email address. Confirm the spelling with \
             the user before calling the function.",
        )
        .with_param(ParamSpec::required(
            "email",
            ParamType::String,
            "The customer's email address",
        )),
        |args, ctx: &mut Ctx| {
            let args: UpdateEmailArgs = decode_args("update_email", &args)?;
            let reply = format!("Perfect. I've saved your email address as {}.", args.email);
            ctx.state.profile.customer_email = Some(args.email);
            Ok(ToolOutcome::narrate(reply))
        },
    )
}

fn contact_tools() -> Vec<ToolDef<RealEstateProfile>> {
    vec![update_name(), update_phone(), update_email()]
}

fn transfer_tool(name: &str, target: &str, description: &str) -> ToolDef<RealEstateProfile> {
    let target = target.to_string();
    ToolDef::new(
        ToolSpec::new(name, description),
        move |_args, _ctx: &mut Ctx| Ok(ToolOutcome::handoff(target.as_str())),
    )
}

// ============================================================================
// GREETER
// ============================================================================

fn greeter_agent() -> AgentDef<RealEstateProfile> {
    AgentDef::new(
        "greeter",
        "You are a friendly virtual real estate agent. Your job is to understand what the \
         caller needs and direct them to the appropriate specialist on your team. You can \
         help with property searches, scheduling viewings, or connecting them with a \
         mortgage advisor.",
    )
    .with_voice("alloy")
    .with_parallel_tool_calls(false)
    .with_tool(transfer_tool(
        "to_property_finder",
        "propertyFinder",
        "Called when the user wants to search for properties based on their criteria. \
         This function handles transitioning to the property finder agent who will \
         collect the necessary details like price range, number of bedrooms, etc.",
    ))
    .with_tool(transfer_tool(
        "to_viewing_scheduler",
        "viewingScheduler",
        "Called when the user wants to schedule a viewing for a property they're \
         interested in. This function handles transitioning to the viewing scheduler \
         agent.",
    ))
    .with_tool(transfer_tool(
        "to_mortgage_advisor",
        "mortgageAdvisor",
        "Called when the user wants to discuss mortgage options or get pre-qualified. \
         This function handles transitioning to the mortgage advisor agent.",
    ))
}

// ============================================================================
// PROPERTY FINDER
// ============================================================================

#[derive(Deserialize)]
struct ExpressInterestArgs {
    property_address: String,
}

fn property_finder_agent(listings: Arc<PropertyListings>) -> AgentDef<RealEstateProfile> {
    let update_property_preferences = ToolDef::new(
        ToolSpec::new(
            "update_property_preferences",
            "Called when the user provides their property preferences.",
        )
        .with_param(ParamSpec::optional(
            "min_price",
            ParamType::Integer,
            "Minimum price the customer is willing to pay",
        ))
        .with_param(ParamSpec::optional(
            "max_price",
            ParamType::Integer,
            "Maximum price the customer is willing to pay",
        ))
        .with_param(ParamSpec::optional(
            "min_bedrooms",
            ParamType::Integer,
            "Minimum number of bedrooms required",
        ))
        .with_param(ParamSpec::optional(
            "min_bathrooms",
            ParamType::Integer,
            "Minimum number of bathrooms required",
        ))
        .with_param(ParamSpec::optional(
            "property_type",
            ParamType::String,
            "Type of property (e.g., 'Single Family Home', 'Condo', 'Townhouse')",
        ))
        .with_param(ParamSpec::optional(
            "location",
            ParamType::String,
            "Preferred location or neighborhood",
        )),
        |args, ctx: &mut Ctx| {
            // Schema validation already typed each field; the provided
            // ones land straight in the dynamic preference map.
            let object = args.as_object().cloned().unwrap_or_default();
            for key in PREFERENCE_KEYS {
                if let Some(value) = object.get(key) {
                    if !value.is_null() {
                        ctx.state.preferences.insert(key.to_string(), value.clone());
                    }
                }
            }
            Ok(ToolOutcome::narrate(
                "I've updated your property preferences. Now I can search for properties \
                 that match your criteria.",
            ))
        },
    );

    let search_listings = listings.clone();
    let search_properties = ToolDef::new(
        ToolSpec::new(
            "search_properties",
            "Called when the user wants to search for properties based on their \
             preferences.",
        ),
        move |_args, ctx: &mut Ctx| {
            let criteria = search_from_preferences(ctx.state);
            let matches = search_listings.search(&criteria);

            if matches.is_empty() {
                return Ok(ToolOutcome::narrate(
                    "I couldn't find any properties matching your criteria. Would you like \
                     to adjust your preferences?",
                ));
            }

            let mut reply = format!(
                "I found {} properties matching your criteria:\n\n",
                matches.len()
            );
            for (index, property) in matches.iter().enumerate() {
                reply.push_str(&format!(
                    "Property {}: {}\nPrice: {}\n{} bed, {} bath, {} sq ft\nType: {}\n\
                     Description: {}\n\n",
                    index + 1,
                    property.address,
                    format_dollars(property.price),
                    property.bedrooms,
                    property.bathrooms,
                    property.sqft,
                    property.property_type,
                    property.description,
                ));
                let viewed = &mut ctx.state.profile.viewed_properties;
                if !viewed.contains(&property.id) {
                    viewed.push(property.id.clone());
                }
            }
            Ok(ToolOutcome::narrate(reply))
        },
    );

    let interest_listings = listings.clone();
    let express_interest = ToolDef::new(
        ToolSpec::new(
            "express_interest",
            "Called when the user expresses interest in a specific property.",
        )
        .with_param(ParamSpec::required(
            "property_address",
            ParamType::String,
            "The address of the property the user is interested in",
        )),
        move |args, ctx: &mut Ctx| {
            let args: ExpressInterestArgs = decode_args("express_interest", &args)?;
            let property = match interest_listings.find_by_address(&args.property_address) {
                Some(property) => property,
                None => {
                    return Ok(ToolOutcome::narrate(format!(
                        "I couldn't find a property with the address '{}' in our database. \
                         Could you please verify the address?",
                        args.property_address
                    )))
                }
            };
            let interested = &mut ctx.state.profile.interested_properties;
            if !interested.contains(&property.id) {
                interested.push(property.id.clone());
            }
            Ok(ToolOutcome::narrate(format!(
                "Great! I've noted your interest in the property at {}. Would you like to \
                 schedule a viewing or learn more about this property?",
                args.property_address
            )))
        },
    );

    // Scheduling needs at least one interesting property to talk about;
    // the guard soft-fails instead of transferring.
    let guarded_scheduler_transfer = ToolDef::new(
        ToolSpec::new(
            "to_viewing_scheduler",
            "Called when the user wants to schedule a viewing for a property they're \
             interested in.",
        ),
        |_args, ctx: &mut Ctx| {
            if ctx.state.profile.interested_properties.is_empty() {
                return Ok(ToolOutcome::narrate(
                    "Before scheduling a viewing, please select at least one property \
                     you're interested in.",
                ));
            }
            Ok(ToolOutcome::handoff("viewingScheduler"))
        },
    );

    AgentDef::new(
        "propertyFinder",
        "You are a property finder specialist at a real estate agency. Your job is to \
         help customers find properties that match their criteria. Ask about their \
         preferences including price range, number of bedrooms and bathrooms, property \
         type, and location. Then search for and present matching properties.",
    )
    .with_voice("echo")
    .with_tools(contact_tools())
    .with_tool(update_property_preferences)
    .with_tool(search_properties)
    .with_tool(express_interest)
    .with_tool(transfer_tool(
        "to_greeter",
        "greeter",
        "Called when the user wants to return to the main menu or speak with another \
         specialist.",
    ))
    .with_tool(guarded_scheduler_transfer)
}

// ============================================================================
// VIEWING SCHEDULER
// ============================================================================

#[derive(Deserialize)]
struct ScheduleViewingArgs {
    property_address: String,
    date: String,
    time: String,
}

fn viewing_scheduler_agent(listings: Arc<PropertyListings>) -> AgentDef<RealEstateProfile> {
    let schedule_viewing = ToolDef::new(
        ToolSpec::new(
            "schedule_viewing",
            "Called when the user wants to schedule a property viewing.",
        )
        .with_param(ParamSpec::required(
            "property_address",
            ParamType::String,
            "The address of the property to view",
        ))
        .with_param(ParamSpec::required(
            "date",
            ParamType::String,
            "The preferred date for the viewing (format: YYYY-MM-DD)",
        ))
        .with_param(ParamSpec::required(
            "time",
            ParamType::String,
            "The preferred time for the viewing (format: HH:MM AM/PM)",
        )),
        move |args, ctx: &mut Ctx| {
            let args: ScheduleViewingArgs = decode_args("schedule_viewing", &args)?;

            if listings.find_by_address(&args.property_address).is_none() {
                return Ok(ToolOutcome::narrate(format!(
                    "I couldn't find a property with the address '{}' in our database. \
                     Could you please verify the address?",
                    args.property_address
                )));
            }

            let profile = &mut ctx.state.profile;
            if profile.customer_name.is_none() || profile.customer_phone.is_none() {
                return Ok(ToolOutcome::narrate(
                    "Before I can schedule a viewing, I'll need your name and phone number \
                     so our agent can contact you.",
                ));
            }

            profile.viewing_date = Some(args.date.clone());
            profile.viewing_time = Some(args.time.clone());
            let phone = profile.customer_phone.as_deref().unwrap_or_default();
            Ok(ToolOutcome::narrate(format!(
                "Great! I've scheduled a viewing for the property at {} on {} at {}. One \
                 of our agents will meet you there. They may call you at {} to confirm \
                 closer to the date.",
                args.property_address, args.date, args.time, phone
            )))
        },
    );

    AgentDef::new(
        "viewingScheduler",
        "You are a viewing scheduler at a real estate agency. Your job is to help \
         customers schedule viewings for properties they're interested in. First confirm \
         which property they want to view, then collect their preferred date and time, \
         and their contact information if we don't already have it.",
    )
    .with_voice("alloy")
    .with_tools(contact_tools())
    .with_tool(schedule_viewing)
    .with_tool(transfer_tool(
        "to_greeter",
        "greeter",
        "Called when the user wants to return to the main menu or speak with another \
         specialist.",
    ))
    .with_tool(transfer_tool(
        "to_mortgage_advisor",
        "mortgageAdvisor",
        "Called when the user wants to discuss mortgage options or get pre-qualified.",
    ))
}

// ============================================================================
// MORTGAGE ADVISOR
// ============================================================================

#[derive(Deserialize)]
struct PrequalifyArgs {
    annual_income: i64,
    credit_score: i64,
    down_payment: i64,
    monthly_debt: i64,
}

/// Estimate the maximum home price for a 30-year fixed mortgage at
/// 6.5%, capped at a 43% debt-to-income ratio and discounted for weak
/// credit. Rounded to the nearest thousand.
fn estimate_max_home_price(args: &PrequalifyArgs) -> i64 {
    let monthly_income = args.annual_income as f64 / 12.0;
    let max_monthly_payment = (monthly_income * 0.43) - args.monthly_debt as f64;

    let interest_rate: f64 = 0.065 / 12.0;
    let loan_term_months: i32 = 30 * 12;

    // Present value of an annuity.
    let loan_amount =
        max_monthly_payment * ((1.0 - (1.0 + interest_rate).powi(-loan_term_months)) / interest_rate);

    let mut max_home_price = loan_amount + args.down_payment as f64;

    if args.credit_score < 640 {
        max_home_price *= 0.8;
    } else if args.credit_score < 700 {
        max_home_price *= 0.9;
    }

    ((max_home_price / 1000.0).round() * 1000.0) as i64
}

fn mortgage_advisor_agent() -> AgentDef<RealEstateProfile> {
    let prequalify_mortgage = ToolDef::new(
        ToolSpec::new(
            "prequalify_mortgage",
            "Called when the user provides financial information for mortgage \
             pre-qualification.",
        )
        .with_param(ParamSpec::required(
            "annual_income",
            ParamType::Integer,
            "The customer's annual income before taxes",
        ))
        .with_param(
            ParamSpec::required(
                "credit_score",
                ParamType::Integer,
                "The customer's credit score (typically 300-850)",
            )
            .with_range(300.0, 850.0),
        )
        .with_param(ParamSpec::required(
            "down_payment",
            ParamType::Integer,
            "The amount the customer can put as a down payment",
        ))
        .with_param(ParamSpec::required(
            "monthly_debt",
            ParamType::Integer,
            "The customer's total monthly debt payments (excluding housing)",
        )),
        |args, ctx: &mut Ctx| {
            let args: PrequalifyArgs = decode_args("prequalify_mortgage", &args)?;
            let profile = &mut ctx.state.profile;

            if profile.customer_name.is_none()
                || profile.customer_phone.is_none()
                || profile.customer_email.is_none()
            {
                return Ok(ToolOutcome::narrate(
                    "Before I can pre-qualify you, I'll need your full contact information \
                     (name, phone, and email).",
                ));
            }

            let max_home_price = estimate_max_home_price(&args);
            profile.prequalified = true;
            profile.prequalified_amount = Some(max_home_price);

            Ok(ToolOutcome::narrate(format!(
                "Based on the information you've provided, I estimate you could qualify \
                 for a home up to {}. This is just an estimate - a formal pre-approval \
                 would require verification of your income, assets, and credit. Would you \
                 like me to connect you with a mortgage specialist to get officially \
                 pre-approved?",
                format_dollars(max_home_price)
            )))
        },
    );

    AgentDef::new(
        "mortgageAdvisor",
        "You are a mortgage advisor at a real estate agency. Your job is to help \
         customers understand mortgage options and get pre-qualified. Ask about their \
         income, credit score, down payment amount, and existing debt to determine how \
         much they might qualify for.",
    )
    .with_voice("onyx")
    .with_tools(contact_tools())
    .with_tool(prequalify_mortgage)
    .with_tool(transfer_tool(
        "to_greeter",
        "greeter",
        "Called when the user wants to return to the main menu or speak with another \
         specialist.",
    ))
    .with_tool(transfer_tool(
        "to_property_finder",
        "propertyFinder",
        "Called when the user wants to search for properties within their pre-qualified \
         amount.",
    ))
}

// ============================================================================
// SUITE
// ============================================================================

/// The full real-estate agent set, routed from "greeter".
pub fn real_estate_agents(listings: Arc<PropertyListings>) -> Vec<AgentDef<RealEstateProfile>> {
    vec![
        greeter_agent(),
        property_finder_agent(listings.clone()),
        viewing_scheduler_agent(listings),
        mortgage_advisor_agent(),
    ]
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use switchboard_core::ToolInvocation;

    fn dispatch_on(
        agent: &AgentDef<RealEstateProfile>,
        tool: &str,
        args: Value,
        state: &mut SessionState<RealEstateProfile>,
    ) -> ToolOutcome {
        switchboard_agents::dispatch(agent, &ToolInvocation::new(tool, args), state).unwrap()
    }

    fn narrated_text(outcome: &ToolOutcome) -> &str {
        match outcome {
            ToolOutcome::Narrated(value) => value.as_str().unwrap(),
            _ => panic!("expected narration"),
        }
    }

    #[test]
    fn test_suite_registers_four_agents() {
        let agents = real_estate_agents(Arc::new(PropertyListings::demo()));
        let names: Vec<_> = agents.iter().map(|a| a.name().to_string()).collect();
        assert_eq!(
            names,
            vec!["greeter", "propertyFinder", "viewingScheduler", "mortgageAdvisor"]
        );
    }

    #[test]
    fn test_preferences_land_in_dynamic_map() {
        let agent = property_finder_agent(Arc::new(PropertyListings::demo()));
        let mut state = SessionState::new(RealEstateProfile::default());
        dispatch_on(
            &agent,
            "update_property_preferences",
            json!({"max_price": 400000, "min_bedrooms": 3}),
            &mut state,
        );
        assert_eq!(state.preferences.get("max_price"), Some(&json!(400000)));
        assert_eq!(state.preferences.get("min_bedrooms"), Some(&json!(3)));
        // Dynamic preferences flow into the shared snapshot.
        assert!(state.snapshot().get("preference.max_price").is_some());
    }

    #[test]
    fn test_search_filters_and_records_viewed() {
        let agent = property_finder_agent(Arc::new(PropertyListings::demo()));
        let mut state = SessionState::new(RealEstateProfile::default());
        state.preferences.insert("max_price".to_string(), json!(400_000));
        state.preferences.insert("min_bedrooms".to_string(), json!(3));

        let outcome = dispatch_on(&agent, "search_properties", json!({}), &mut state);
        let text = narrated_text(&outcome);
        assert!(text.contains("I found 1 properties"));
        assert!(text.contains("123 Main Street"));
        assert!(text.contains("$350,000"));
        assert_eq!(state.profile.viewed_properties, vec!["P001"]);
    }

    #[test]
    fn test_search_with_no_matches_asks_to_adjust() {
        let agent = property_finder_agent(Arc::new(PropertyListings::demo()));
        let mut state = SessionState::new(RealEstateProfile::default());
        state.preferences.insert("max_price".to_string(), json!(100_000));
        let outcome = dispatch_on(&agent, "search_properties", json!({}), &mut state);
        assert!(narrated_text(&outcome).contains("adjust your preferences"));
    }

    #[test]
    fn test_express_interest_unknown_address() {
        let agent = property_finder_agent(Arc::new(PropertyListings::demo()));
        let mut state = SessionState::new(RealEstateProfile::default());
        let outcome = dispatch_on(
            &agent,
            "express_interest",
            json!({"property_address": "1 Nowhere Blvd"}),
            &mut state,
        );
        assert!(narrated_text(&outcome).contains("verify the address"));
        assert!(state.profile.interested_properties.is_empty());
    }

    #[test]
    fn test_scheduler_transfer_guarded_by_interest() {
        let agent = property_finder_agent(Arc::new(PropertyListings::demo()));
        let mut state = SessionState::new(RealEstateProfile::default());

        let outcome = dispatch_on(&agent, "to_viewing_scheduler", json!({}), &mut state);
        assert!(!outcome.is_handoff());

        state.profile.interested_properties.push("P001".to_string());
        let outcome = dispatch_on(&agent, "to_viewing_scheduler", json!({}), &mut state);
        assert!(outcome.is_handoff());
    }

    #[test]
    fn test_schedule_viewing_needs_contact_info() {
        let agent = viewing_scheduler_agent(Arc::new(PropertyListings::demo()));
        let mut state = SessionState::new(RealEstateProfile::default());
        let outcome = dispatch_on(
            &agent,
            "schedule_viewing",
            json!({"property_address": "123 Main Street", "date": "2025-07-01", "time": "2:00 PM"}),
            &mut state,
        );
        assert!(narrated_text(&outcome).contains("name and phone number"));
        assert!(state.profile.viewing_date.is_none());
    }

    #[test]
    fn test_schedule_viewing_confirms() {
        let agent = viewing_scheduler_agent(Arc::new(PropertyListings::demo()));
        let mut state = SessionState::new(RealEstateProfile {
            customer_name: Some("Ada".to_string()),
            customer_phone: Some("555-0199".to_string()),
            ..RealEstateProfile::default()
        });
        let outcome = dispatch_on(
            &agent,
            "schedule_viewing",
            json!({"property_address": "123 Main Street", "date": "2025-07-01", "time": "2:00 PM"}),
            &mut state,
        );
        let text = narrated_text(&outcome);
        assert!(text.contains("2025-07-01"));
        assert!(text.contains("555-0199"));
        assert_eq!(state.profile.viewing_date.as_deref(), Some("2025-07-01"));
    }

    #[test]
    fn test_prequalify_needs_full_contact_info() {
        let agent = mortgage_advisor_agent();
        let mut state = SessionState::new(RealEstateProfile::default());
        let outcome = dispatch_on(
            &agent,
            "prequalify_mortgage",
            json!({
                "annual_income": 120000,
                "credit_score": 720,
                "down_payment": 60000,
                "monthly_debt": 500
            }),
            &mut state,
        );
        assert!(narrated_text(&outcome).contains("full contact information"));
        assert!(!state.profile.prequalified);
    }

    #[test]
    fn test_prequalify_records_estimate() {
        let agent = mortgage_advisor_agent();
        let mut state = SessionState::new(RealEstateProfile {
            customer_name: Some("Ada".to_string()),
            customer_phone: Some("555-0199".to_string()),
            customer_email: Some("ada@example.com".to_string()),
            ..RealEstateProfile::default()
        });
        let outcome = dispatch_on(
            &agent,
            "prequalify_mortgage",
            json!({
                "annual_income": 120000,
                "credit_score": 720,
                "down_payment": 60000,
                "monthly_debt": 500
            }),
            &mut state,
        );
        assert!(state.profile.prequalified);
        let amount = state.profile.prequalified_amount.unwrap();
        // Sanity window for the annuity estimate rather than a brittle
        // exact figure.
        assert!(amount > 400_000 && amount < 800_000, "amount was {amount}");
        assert!(narrated_text(&outcome).contains(&format_dollars(amount)));
    }

    #[test]
    fn test_estimate_discounts_weak_credit() {
        let base = PrequalifyArgs {
            annual_income: 120_000,
            credit_score: 720,
            down_payment: 60_000,
            monthly_debt: 500,
        };
        let weak = PrequalifyArgs {
            credit_score: 600,
            ..base
        };
        let fair = PrequalifyArgs {
            credit_score: 660,
            ..base
        };
        let strong = estimate_max_home_price(&base);
        assert!(estimate_max_home_price(&fair) < strong);
        assert!(estimate_max_home_price(&weak) < estimate_max_home_price(&fair));
    }
}
