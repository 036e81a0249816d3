//! Scripted conversations through the persona suites.

use serde_json::json;
use std::sync::Arc;
use switchboard_core::{AgentName, ToolInvocation};
use switchboard_llm::{MockLanguageModel, ModelReply};
use switchboard_personas::{
    gaming_advisor, real_estate_agents, support_agents, GamingProfile, KnowledgeBase,
    ProductCatalog, PropertyListings, RealEstateProfile, SupportProfile,
};
use switchboard_session::Session;

fn invoke(name: &str, args: serde_json::Value) -> ModelReply {
    ModelReply::ToolCalls(vec![ToolInvocation::new(name, args)])
}

fn support_session(model: Arc<MockLanguageModel>) -> Session<SupportProfile> {
    Session::builder(SupportProfile::default())
        .with_agents(support_agents(
            Arc::new(ProductCatalog::demo()),
            Arc::new(KnowledgeBase::demo()),
        ))
        .with_llm(model)
        .build()
        .unwrap()
}

fn real_estate_session(model: Arc<MockLanguageModel>) -> Session<RealEstateProfile> {
    Session::builder(RealEstateProfile::default())
        .with_agents(real_estate_agents(Arc::new(PropertyListings::demo())))
        .with_llm(model)
        .build()
        .unwrap()
}

#[tokio::test]
async fn support_name_collected_before_handoff_reaches_billing_summary() {
    let model = Arc::new(MockLanguageModel::scripted([
        invoke("update_customer_info", json!({"name": "Ada"})),
        ModelReply::Narration("Thanks Ada.".to_string()),
        invoke("to_billing", json!({})),
    ]));
    // The shared contact tool lives on the specialists, so route the
    // conversation through the returns agent first.
    let mut session = support_session(model);
    session.start("returns").await.unwrap();

    session.push_text("I'm Ada").await.unwrap();
    let output = session.push_text("it's really a billing matter").await.unwrap();

    assert_eq!(output.handoff.unwrap().to, AgentName::new("billing"));
    let billing = session.history(&AgentName::new("billing")).unwrap();
    let summary = billing
        .iter()
        .find(|i| i.is_system_message())
        .and_then(|i| i.content())
        .unwrap();
    assert!(summary.contains("Ada"));
}

#[tokio::test]
async fn support_routing_defaults_issue_type_on_transfer() {
    let model = Arc::new(MockLanguageModel::scripted([invoke("to_returns", json!({}))]));
    let mut session = support_session(model);
    session.start("initial").await.unwrap();

    let output = session.push_text("I want to send this back").await.unwrap();

    assert_eq!(output.handoff.unwrap().to, AgentName::new("returns"));
    assert_eq!(
        session.state().profile.issue_type,
        Some(switchboard_personas::IssueType::Return)
    );
}

#[tokio::test]
async fn support_process_return_without_order_mutates_nothing() {
    let model = Arc::new(MockLanguageModel::scripted([
        invoke("process_return", json!({"return_reason": "changed my mind"})),
        ModelReply::Narration("Could I get your order number?".to_string()),
    ]));
    let mut session = support_session(model);
    session.start("returns").await.unwrap();

    session.push_text("I want to return it").await.unwrap();

    let profile = &session.state().profile;
    assert!(profile.return_reason.is_none());
    assert!(!profile.return_approved);
}

#[tokio::test]
async fn support_escalation_carries_reason_to_manager() {
    let model = Arc::new(MockLanguageModel::scripted([
        invoke("escalate_technical_issue", json!({"reason": "unit is dead on arrival"})),
        invoke("resolve_escalated_issue", json!({"resolution": "a full replacement"})),
        ModelReply::Narration("We'll make this right.".to_string()),
    ]));
    let mut session = support_session(model);
    session.start("technical").await.unwrap();

    let output = session.push_text("nothing fixes it").await.unwrap();
    assert_eq!(output.handoff.unwrap().to, AgentName::new("manager"));

    let output = session.push_text("what can you do?").await.unwrap();
    assert_eq!(output.reply, "We'll make this right.");

    let manager = session.history(&AgentName::new("manager")).unwrap();
    let resolution = manager
        .iter()
        .find_map(|item| match item {
            switchboard_core::ConversationItem::ToolResult { value, .. } => value.as_str(),
            _ => None,
        })
        .unwrap();
    assert!(resolution.contains("a full replacement"));
    assert!(session.state().profile.escalated);
}

#[tokio::test]
async fn real_estate_preferences_survive_advisor_detour() {
    let model = Arc::new(MockLanguageModel::scripted([
        // Greeter routes to the finder.
        invoke("to_property_finder", json!({})),
        // Finder collects criteria and contact details.
        invoke(
            "update_property_preferences",
            json!({"max_price": 400000, "min_bedrooms": 3}),
        ),
        ModelReply::Narration("Noted your criteria.".to_string()),
        invoke("update_name", json!({"name": "Grace"})),
        ModelReply::Narration("Thanks Grace.".to_string()),
        // Detour to the mortgage advisor and back.
        invoke("to_mortgage_advisor", json!({})),
        invoke("to_property_finder", json!({})),
        // Search still sees the criteria collected earlier.
        invoke("search_properties", json!({})),
        ModelReply::Narration("Here's what I found.".to_string()),
    ]));
    // Only the finder has preference tools; the advisor has none of
    // them, yet the shared state flows through both.
    let mut session = real_estate_session(model);
    session.start("greeter").await.unwrap();

    session.push_text("I'm house hunting").await.unwrap();
    session.push_text("under 400k, 3 bedrooms").await.unwrap();
    session.push_text("I'm Grace").await.unwrap();
    session.push_text("can I afford it though?").await.unwrap();
    session.push_text("let's look at houses again").await.unwrap();
    session.push_text("search please").await.unwrap();

    let profile = &session.state().profile;
    assert_eq!(profile.viewed_properties, vec!["P001"]);

    // The advisor's entry summary included the dynamic preferences.
    let advisor = session.history(&AgentName::new("mortgageAdvisor")).unwrap();
    let summary = advisor
        .iter()
        .find(|i| i.is_system_message())
        .and_then(|i| i.content())
        .unwrap();
    assert!(summary.contains("preference.max_price"));
    assert!(summary.contains("400000"));
}

#[tokio::test]
async fn real_estate_scheduler_guard_narrates_instead_of_transferring() {
    let model = Arc::new(MockLanguageModel::scripted([
        invoke("to_property_finder", json!({})),
        invoke("to_viewing_scheduler", json!({})),
        ModelReply::Narration("Pick a property first and I'll set it up.".to_string()),
    ]));
    let mut session = real_estate_session(model);
    session.start("greeter").await.unwrap();

    session.push_text("houses please").await.unwrap();
    let output = session.push_text("book me a viewing").await.unwrap();

    // The guard soft-failed: no transfer happened.
    assert!(output.handoff.is_none());
    assert_eq!(
        session.active_agent(),
        Some(&AgentName::new("propertyFinder"))
    );
}

#[tokio::test]
async fn gaming_advisor_greets_and_answers_from_structured_results() {
    let model = Arc::new(MockLanguageModel::scripted([
        invoke("recommend_games", json!({"genre": "RPG", "platform": "PC"})),
        ModelReply::Narration("You'd love Stellar Odyssey!".to_string()),
    ]));
    let mut session = Session::builder(GamingProfile)
        .with_agent(gaming_advisor())
        .with_llm(model.clone())
        .build()
        .unwrap();

    session.start("advisor").await.unwrap();

    // The greeting instruction rode along on the entry request.
    let entry_request = &model.requests()[0];
    assert!(entry_request
        .instructions
        .as_deref()
        .unwrap()
        .contains("NexusGuide"));

    let output = session.push_text("recommend me an RPG").await.unwrap();
    assert_eq!(output.reply, "You'd love Stellar Odyssey!");

    // The structured payload reached the advisor's own history.
    let history = session.history(&AgentName::new("advisor")).unwrap();
    let structured = history
        .iter()
        .find_map(|item| match item {
            switchboard_core::ConversationItem::ToolResult { value, .. } => {
                value.get("recommendations")
            }
            _ => None,
        })
        .unwrap();
    assert_eq!(structured.as_array().unwrap().len(), 3);
}
