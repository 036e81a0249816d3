//! Scripted customer-support conversation over the mock backends.
//!
//! Drives the five-agent support suite through a typical return flow
//! and prints the transcript. Run with `RUST_LOG=debug` to watch the
//! driver's handoff and dispatch logging.

use serde_json::json;
use std::sync::Arc;
use switchboard_core::{SwitchboardResult, ToolInvocation};
use switchboard_llm::{MockLanguageModel, ModelReply};
use switchboard_personas::{support_agents, KnowledgeBase, ProductCatalog, SupportProfile};
use switchboard_session::Session;
use tracing_subscriber::EnvFilter;

fn scripted_model() -> MockLanguageModel {
    MockLanguageModel::scripted([
        // Turn 1: the caller explains the problem; the router records it.
        ModelReply::ToolCalls(vec![ToolInvocation::new(
            "identify_issue",
            json!({
                "order_number": "ORD-12345",
                "product_id": "P001",
                "issue_type": "return",
                "description": "Headphones arrived with a cracked headband"
            }),
        )]),
        ModelReply::Narration(
            "Thanks! I'll connect you with our returns specialist.".to_string(),
        ),
        // Turn 2: route to returns.
        ModelReply::ToolCalls(vec![ToolInvocation::new("to_returns", json!({}))]),
        // Turn 3: the returns agent processes the return.
        ModelReply::ToolCalls(vec![ToolInvocation::new(
            "process_return",
            json!({"return_reason": "arrived damaged"}),
        )]),
        ModelReply::Narration(
            "Your return is approved. Shall I email you a shipping label?".to_string(),
        ),
        // Turn 4: collect the email, then send the label.
        ModelReply::ToolCalls(vec![ToolInvocation::new(
            "update_customer_info",
            json!({"name": "Ada Lovelace", "email": "ada@example.com"}),
        )]),
        ModelReply::ToolCalls(vec![ToolInvocation::new("send_return_label", json!({}))]),
        ModelReply::Narration(
            "The label is on its way to ada@example.com. Anything else?".to_string(),
        ),
        // Turn 5: satisfaction.
        ModelReply::ToolCalls(vec![ToolInvocation::new(
            "record_satisfaction",
            json!({"rating": 5}),
        )]),
        ModelReply::Narration("Thank you for calling, Ada. Goodbye!".to_string()),
    ])
}

#[tokio::main]
async fn main() -> SwitchboardResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut session = Session::builder(SupportProfile::default())
        .with_agents(support_agents(
            Arc::new(ProductCatalog::demo()),
            Arc::new(KnowledgeBase::demo()),
        ))
        .with_llm(Arc::new(scripted_model()))
        .build()?;

    let opening = session.start("initial").await?;
    println!("[initial] {}", opening.reply);

    let caller_lines = [
        "Hi, my new headphones arrived broken.",
        "Yes, I'd like to return them please.",
        "They arrived damaged.",
        "My name is Ada Lovelace, email ada@example.com.",
        "That's everything, you were great - five stars.",
    ];

    for line in caller_lines {
        println!("[caller] {line}");
        let output = session.push_text(line).await?;
        let agent = session
            .active_agent()
            .map(|name| name.to_string())
            .unwrap_or_default();
        if let Some(handoff) = &output.handoff {
            println!("  -- transferred {} -> {}", handoff.from, handoff.to);
        }
        println!("[{agent}] {}", output.reply);
    }

    let profile = &session.state().profile;
    println!();
    println!("final session record:");
    println!("  customer: {:?}", profile.customer_name);
    println!("  return approved: {}", profile.return_approved);
    println!("  label sent: {}", profile.return_label_sent);
    println!("  satisfaction: {:?}", profile.satisfaction_rating);

    Ok(())
}
