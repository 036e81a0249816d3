//! End-to-end driver flows over scripted mock backends.

use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::Arc;
use switchboard_agents::{AgentDef, ToolCtx, ToolDef};
use switchboard_core::{
    AgentError, AgentName, ItemId, ParamSpec, ParamType, SwitchboardError, ToolInvocation,
    ToolOutcome, ToolSpec,
};
use switchboard_llm::{MockLanguageModel, ModelReply};
use switchboard_session::Session;
use switchboard_test_utils::TestProfile;
use switchboard_voice::{MockSpeechToText, MockTextToSpeech};

fn update_name_tool() -> ToolDef<TestProfile> {
    ToolDef::new(
        ToolSpec::new("update_name", "Record the caller's name")
            .with_param(ParamSpec::required("name", ParamType::String, "The name")),
        |args, ctx: &mut ToolCtx<'_, TestProfile>| {
            ctx.state.profile.name = args.get("name").and_then(Value::as_str).map(str::to_string);
            Ok(ToolOutcome::narrate("Thank you, I've noted your name."))
        },
    )
}

fn lookup_order_tool() -> ToolDef<TestProfile> {
    ToolDef::new(
        ToolSpec::new("lookup_order", "Look up the caller's order"),
        |_args, ctx: &mut ToolCtx<'_, TestProfile>| {
            match &ctx.state.profile.order_number {
                Some(number) => Ok(ToolOutcome::narrate(format!("Order {number} is on its way."))),
                // Missing data is guidance, not an error.
                None => Ok(ToolOutcome::narrate(
                    "I'll need your order number first. Do you have it available?",
                )),
            }
        },
    )
}

fn transfer_tool(name: &str, target: &str) -> ToolDef<TestProfile> {
    let target = target.to_string();
    ToolDef::new(
        ToolSpec::new(name, format!("Transfer the caller to {target}")),
        move |_args, _ctx| Ok(ToolOutcome::handoff(target.as_str())),
    )
}

fn invoke(name: &str) -> ModelReply {
    ModelReply::ToolCalls(vec![ToolInvocation::new(name, json!({}))])
}

fn agents() -> Vec<AgentDef<TestProfile>> {
    vec![
        AgentDef::new("initial", "You greet callers and route them.")
            .with_voice("alloy")
            .with_tool(update_name_tool())
            .with_tool(lookup_order_tool())
            .with_tool(transfer_tool("to_billing", "billing"))
            .with_tool(transfer_tool("to_nowhere", "nowhere")),
        AgentDef::new("billing", "You handle billing.")
            .with_voice("shimmer")
            .with_tool(transfer_tool("to_initial", "initial")),
    ]
}

fn session_with(model: Arc<MockLanguageModel>) -> Session<TestProfile> {
    Session::builder(TestProfile::default())
        .with_agents(agents())
        .with_llm(model)
        .build()
        .unwrap()
}

#[tokio::test]
async fn state_written_by_one_agent_reaches_the_next_agents_summary() {
    let model = Arc::new(MockLanguageModel::scripted([
        ModelReply::ToolCalls(vec![ToolInvocation::new(
            "update_name",
            json!({"name": "Ada"}),
        )]),
        ModelReply::Narration("Noted, Ada.".to_string()),
        invoke("to_billing"),
    ]));
    let mut session = session_with(model);

    session.start("initial").await.unwrap();
    session.push_text("My name is Ada").await.unwrap();
    let output = session.push_text("I have a billing question").await.unwrap();

    let handoff = output.handoff.expect("turn should hand off");
    assert_eq!(handoff.to, AgentName::new("billing"));

    // The billing agent's entry system message must already carry the
    // name collected by the initial agent.
    let history = session.history(&AgentName::new("billing")).unwrap();
    let summary = history
        .iter()
        .find(|item| item.is_system_message())
        .and_then(|item| item.content())
        .expect("billing history must contain the entry summary");
    assert!(summary.contains("You are the billing agent"));
    assert!(summary.contains("Ada"));
}

#[tokio::test]
async fn handoff_carries_recent_history_into_target_buffer() {
    let model = Arc::new(MockLanguageModel::scripted([
        ModelReply::Narration("Hello!".to_string()),
        invoke("to_billing"),
    ]));
    let mut session = session_with(model);

    session.start("initial").await.unwrap();
    session.push_text("hi there").await.unwrap();
    session.push_text("billing please").await.unwrap();

    let billing = session.history(&AgentName::new("billing")).unwrap();
    let contents: Vec<_> = billing.iter().filter_map(|i| i.content()).collect();
    assert!(contents.contains(&"hi there"));
    assert!(contents.contains(&"Hello!"));
}

#[tokio::test]
async fn carried_history_never_duplicates_item_ids() {
    let model = Arc::new(MockLanguageModel::scripted([
        invoke("to_billing"),
        invoke("to_initial"),
        invoke("to_billing"),
    ]));
    let mut session = session_with(model);

    session.start("initial").await.unwrap();
    session.push_text("billing please").await.unwrap();
    session.push_text("back to the start").await.unwrap();
    session.push_text("billing again").await.unwrap();

    for name in ["initial", "billing"] {
        let history = session.history(&AgentName::new(name)).unwrap();
        let mut seen: HashSet<ItemId> = HashSet::new();
        for item in history {
            assert!(seen.insert(item.id()), "duplicate item id in {name} buffer");
        }
    }
}

#[tokio::test]
async fn handoff_to_unregistered_agent_is_a_loud_error() {
    let model = Arc::new(MockLanguageModel::scripted([invoke("to_nowhere")]));
    let mut session = session_with(model);

    session.start("initial").await.unwrap();
    let err = session.push_text("send me nowhere").await.unwrap_err();

    assert!(matches!(
        err,
        SwitchboardError::Agent(AgentError::UnknownAgent { .. })
    ));
    // The failed transfer leaves no previous-agent marker behind.
    assert!(session.state().previous_agent().is_none());
}

#[tokio::test]
async fn missing_precondition_narrates_guidance_without_mutation() {
    let model = Arc::new(MockLanguageModel::scripted([
        invoke("lookup_order"),
        ModelReply::Narration("Could you read me your order number?".to_string()),
    ]));
    let mut session = session_with(model);

    session.start("initial").await.unwrap();
    let output = session.push_text("where is my order?").await.unwrap();

    assert_eq!(output.reply, "Could you read me your order number?");
    assert!(session.state().profile.order_number.is_none());

    let history = session.history(&AgentName::new("initial")).unwrap();
    let guidance = history
        .iter()
        .find_map(|item| match item {
            switchboard_core::ConversationItem::ToolResult { value, .. } => value.as_str(),
            _ => None,
        })
        .unwrap();
    assert!(guidance.contains("order number"));
}

#[tokio::test]
async fn step_limit_stops_dispatch_and_still_replies() {
    let model = Arc::new(
        MockLanguageModel::scripted(
            std::iter::repeat_with(|| invoke("lookup_order")).take(7),
        )
        .with_fallback("Let me summarize where we are."),
    );
    let mut session = session_with(model.clone());

    session.start("initial").await.unwrap();
    let output = session.push_text("keep looking").await.unwrap();

    assert_eq!(output.steps, 5);
    assert_eq!(output.reply, "Let me summarize where we are.");

    // Exactly five round trips were dispatched; two scripted tool
    // batches were never consumed.
    let history = session.history(&AgentName::new("initial")).unwrap();
    let calls = history
        .iter()
        .filter(|item| matches!(item, switchboard_core::ConversationItem::ToolCall { .. }))
        .count();
    assert_eq!(calls, 5);
    assert_eq!(model.remaining_script(), 2);
}

#[tokio::test]
async fn realtime_model_skips_history_carry_over() {
    let model = Arc::new(
        MockLanguageModel::scripted([
            ModelReply::Narration("Hi!".to_string()),
            invoke("to_billing"),
        ])
        .with_realtime(true),
    );
    let mut session = session_with(model);

    session.start("initial").await.unwrap();
    session.push_text("hello").await.unwrap();
    session.push_text("billing please").await.unwrap();

    // Only the entry summary and announcement, nothing carried over.
    let billing = session.history(&AgentName::new("billing")).unwrap();
    assert_eq!(billing.len(), 2);
    assert!(billing[0].is_system_message());
}

#[tokio::test]
async fn audio_turn_transcribes_then_narrates_with_agent_voice() {
    let model = Arc::new(MockLanguageModel::scripted([invoke("to_billing")]));
    let tts = Arc::new(MockTextToSpeech::new());
    let mut session = Session::builder(TestProfile::default())
        .with_agents(agents())
        .with_llm(model)
        .with_stt(Arc::new(MockSpeechToText::new()))
        .with_tts(tts.clone())
        .build()
        .unwrap();

    session.start("initial").await.unwrap();
    let clip = MockSpeechToText::clip_for("I need billing");
    let output = session.push_audio(&clip).await.unwrap();

    assert!(output.audio.is_some());
    assert!(output.handoff.is_some());

    // The final narration is spoken with the billing agent's voice.
    let spoken = tts.spoken();
    let last = spoken.last().unwrap();
    assert_eq!(last.voice.as_str(), "shimmer");
}
