//! Customer-support persona suite
//!
//! Five agents for an electronics and home goods retailer: an initial
//! router plus returns, technical, billing, and manager specialists.
//! Tools validate their own domain preconditions and answer with
//! guidance when something is missing; they never surface a hard error
//! to the caller for an uncollected field.

use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use switchboard_agents::{decode_args, AgentDef, ToolCtx, ToolDef};
use switchboard_core::{ParamSpec, ParamType, Profile, StateSnapshot, ToolOutcome, ToolSpec};

use crate::catalog::{KnowledgeBase, ProductCatalog};

// ============================================================================
// ISSUE TYPE
// ============================================================================

/// Category of a support issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueType {
    Return,
    Technical,
    Billing,
    Other,
}

impl IssueType {
    /// Wire string, as exposed in the tool schema.
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::Return => "return",
            IssueType::Technical => "technical",
            IssueType::Billing => "billing",
            IssueType::Other => "other",
        }
    }

    const ALL: [IssueType; 4] = [
        IssueType::Return,
        IssueType::Technical,
        IssueType::Billing,
        IssueType::Other,
    ];

    fn allowed_values() -> Vec<&'static str> {
        Self::ALL.iter().map(IssueType::as_str).collect()
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// PROFILE
// ============================================================================

/// Everything learned about a support caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SupportProfile {
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,

    pub order_number: Option<String>,
    pub product_id: Option<String>,
    pub issue_type: Option<IssueType>,
    pub issue_description: Option<String>,

    // Return processing
    pub return_reason: Option<String>,
    pub return_approved: bool,
    pub return_label_sent: bool,

    // Billing
    pub refund_amount: Option<f64>,
    pub refund_approved: bool,

    // Escalation
    pub escalated: bool,
    pub escalation_reason: Option<String>,

    // Customer satisfaction
    pub satisfaction_rating: Option<i64>,
}

impl Profile for SupportProfile {
    fn snapshot(&self) -> StateSnapshot {
        let mut snapshot = StateSnapshot::new();
        snapshot.set_or_unknown("customer.name", self.customer_name.clone());
        snapshot.set_or_unknown("customer.email", self.customer_email.clone());
        snapshot.set_or_unknown("customer.phone", self.customer_phone.clone());
        snapshot.set_or_unknown("issue.order_number", self.order_number.clone());
        snapshot.set_or_unknown("issue.product_id", self.product_id.clone());
        snapshot.set_or_unknown("issue.type", self.issue_type.map(|t| t.as_str()));
        snapshot.set_or_unknown("issue.description", self.issue_description.clone());

        if self.issue_type == Some(IssueType::Return) {
            snapshot.set_or_unknown("return.reason", self.return_reason.clone());
            snapshot.set("return.approved", self.return_approved);
            snapshot.set("return.label_sent", self.return_label_sent);
        }
        if self.issue_type == Some(IssueType::Billing) {
            snapshot.set_or_unknown("billing.refund_amount", self.refund_amount);
            snapshot.set("billing.refund_approved", self.refund_approved);
        }

        snapshot.set("escalation.escalated", self.escalated);
        snapshot.set_or_unknown("escalation.reason", self.escalation_reason.clone());
        snapshot.set_or_unknown("satisfaction", self.satisfaction_rating);
        snapshot
    }
}

type Ctx<'a> = ToolCtx<'a, SupportProfile>;

// ============================================================================
// SHARED TOOLS
// ============================================================================

#[derive(Deserialize)]
struct UpdateCustomerInfoArgs {
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
}

/// Contact-info collection, shared by every agent.
fn update_customer_info() -> ToolDef<SupportProfile> {
    ToolDef::new(
        ToolSpec::new(
            "update_customer_info",
            "Called when the user provides their contact information. Confirm the \
             information with the user before calling the function.",
        )
        .with_param(ParamSpec::optional(
            "name",
            ParamType::String,
            "The customer's full name",
        ))
        .with_param(ParamSpec::optional(
            "email",
            ParamType::String,
            "The customer's email address",
        ))
        .with_param(ParamSpec::optional(
            "phone",
            ParamType::String,
            "The customer's phone number",
        )),
        |args, ctx: &mut Ctx| {
            let args: UpdateCustomerInfoArgs = decode_args("update_customer_info", &args)?;
            let mut updated = Vec::new();
            if let Some(name) = args.name {
                ctx.state.profile.customer_name = Some(name);
                updated.push("name");
            }
            if let Some(email) = args.email {
                ctx.state.profile.customer_email = Some(email);
                updated.push("email");
            }
            if let Some(phone) = args.phone {
                ctx.state.profile.customer_phone = Some(phone);
                updated.push("phone");
            }
            if updated.is_empty() {
                return Ok(ToolOutcome::narrate(
                    "I didn't catch any contact details. Could you repeat them?",
                ));
            }
            Ok(ToolOutcome::narrate(format!(
                "Thank you, I've updated your {}.",
                updated.join(", ")
            )))
        },
    )
}

#[derive(Deserialize)]
struct RecordSatisfactionArgs {
    rating: i64,
}

/// Satisfaction rating collection, shared by every agent.
fn record_satisfaction() -> ToolDef<SupportProfile> {
    ToolDef::new(
        ToolSpec::new(
            "record_satisfaction",
            "Called when the customer provides a satisfaction rating for the support \
             experience.",
        )
        .with_param(
            ParamSpec::required(
                "rating",
                ParamType::Integer,
                "Customer satisfaction rating on a scale of 1-5",
            )
            .with_range(1.0, 5.0),
        ),
        |args, ctx: &mut Ctx| {
            let args: RecordSatisfactionArgs = decode_args("record_satisfaction", &args)?;
            ctx.state.profile.satisfaction_rating = Some(args.rating);
            let reply = if args.rating >= 4 {
                "Thank you for your positive feedback! We're glad we could help you today."
            } else if args.rating == 3 {
                "Thank you for your feedback. We're always working to improve our service."
            } else {
                "I'm sorry to hear that. We take your feedback seriously and will use it to \
                 improve our service."
            };
            Ok(ToolOutcome::narrate(reply))
        },
    )
}

/// A plain transfer tool with no extra bookkeeping.
fn transfer_tool(name: &str, target: &str, description: &str) -> ToolDef<SupportProfile> {
    let target = target.to_string();
    ToolDef::new(
        ToolSpec::new(name, description),
        move |_args, _ctx: &mut Ctx| Ok(ToolOutcome::handoff(target.as_str())),
    )
}

/// A transfer to the manager that records the escalation first.
fn escalation_transfer(name: &str, reason: &str, description: &str) -> ToolDef<SupportProfile> {
    let reason = reason.to_string();
    ToolDef::new(
        ToolSpec::new(name, description),
        move |_args, ctx: &mut Ctx| {
            ctx.state.profile.escalated = true;
            ctx.state.profile.escalation_reason = Some(reason.clone());
            Ok(ToolOutcome::handoff("manager"))
        },
    )
}

/// A transfer that defaults the issue type when none was identified.
fn routing_transfer(
    name: &str,
    target: &str,
    fallback_issue: IssueType,
    description: &str,
) -> ToolDef<SupportProfile> {
    let target = target.to_string();
    ToolDef::new(
        ToolSpec::new(name, description),
        move |_args, ctx: &mut Ctx| {
            if ctx.state.profile.issue_type.is_none() {
                ctx.state.profile.issue_type = Some(fallback_issue);
            }
            Ok(ToolOutcome::handoff(target.as_str()))
        },
    )
}

// ============================================================================
// INITIAL SUPPORT
// ============================================================================

#[derive(Deserialize)]
struct IdentifyIssueArgs {
    order_number: Option<String>,
    product_id: Option<String>,
    issue_type: IssueType,
    description: String,
}

fn initial_agent() -> AgentDef<SupportProfile> {
    let identify_issue = ToolDef::new(
        ToolSpec::new(
            "identify_issue",
            "Called when the agent has identified the customer's issue type and basic \
             details.",
        )
        .with_param(ParamSpec::optional(
            "order_number",
            ParamType::String,
            "The customer's order number if applicable",
        ))
        .with_param(ParamSpec::optional(
            "product_id",
            ParamType::String,
            "The product ID if applicable",
        ))
        .with_param(
            ParamSpec::required(
                "issue_type",
                ParamType::String,
                "The type of issue the customer is experiencing",
            )
            .with_one_of(IssueType::allowed_values()),
        )
        .with_param(ParamSpec::required(
            "description",
            ParamType::String,
            "Brief description of the customer's issue",
        )),
        |args, ctx: &mut Ctx| {
            let args: IdentifyIssueArgs = decode_args("identify_issue", &args)?;
            let profile = &mut ctx.state.profile;
            if let Some(order_number) = args.order_number {
                profile.order_number = Some(order_number);
            }
            if let Some(product_id) = args.product_id {
                profile.product_id = Some(product_id);
            }
            profile.issue_type = Some(args.issue_type);
            profile.issue_description = Some(args.description);
            Ok(ToolOutcome::narrate(format!(
                "Thank you for providing those details. I understand you're having a {} \
                 issue. I'll route you to the appropriate specialist.",
                args.issue_type
            )))
        },
    );

    AgentDef::new(
        "initial",
        "You are the initial customer support agent for an electronics and home goods \
         company. Your job is to greet the customer, identify their issue, and route them \
         to the appropriate specialized agent. Be friendly and efficient in collecting the \
         basic information needed.",
    )
    .with_voice("alloy")
    .with_parallel_tool_calls(false)
    .with_tool(identify_issue)
    .with_tool(routing_transfer(
        "to_returns",
        "returns",
        IssueType::Return,
        "Called when the customer has a return or refund request.",
    ))
    .with_tool(routing_transfer(
        "to_technical",
        "technical",
        IssueType::Technical,
        "Called when the customer has a technical issue with a product.",
    ))
    .with_tool(routing_transfer(
        "to_billing",
        "billing",
        IssueType::Billing,
        "Called when the customer has a billing or payment issue.",
    ))
    .with_tool(escalation_transfer(
        "to_manager",
        "Customer requested manager",
        "Called when the customer needs to speak with a manager or has a complex issue.",
    ))
}

// ============================================================================
// RETURNS
// ============================================================================

#[derive(Deserialize)]
struct ProcessReturnArgs {
    return_reason: String,
}

fn returns_agent(catalog: Arc<ProductCatalog>) -> AgentDef<SupportProfile> {
    let process_return = ToolDef::new(
        ToolSpec::new(
            "process_return",
            "Called when the customer provides the reason for returning a product.",
        )
        .with_param(ParamSpec::required(
            "return_reason",
            ParamType::String,
            "The reason for the return",
        )),
        move |args, ctx: &mut Ctx| {
            let args: ProcessReturnArgs = decode_args("process_return", &args)?;
            let profile = &mut ctx.state.profile;

            if profile.order_number.is_none() || profile.product_id.is_none() {
                return Ok(ToolOutcome::narrate(
                    "Before I can process your return, I'll need your order number and the \
                     product ID. Do you have those available?",
                ));
            }

            let product_id = profile.product_id.as_deref().unwrap_or_default();
            let product = match catalog.find(product_id) {
                Some(product) => product,
                None => {
                    return Ok(ToolOutcome::narrate(format!(
                        "I'm unable to find product ID {product_id} in our system. Could \
                         you please verify the product ID?"
                    )))
                }
            };

            if product.is_subscription() {
                return Ok(ToolOutcome::narrate(
                    "This appears to be a subscription service, which follows our digital \
                     services cancellation policy. Let me transfer you to our billing \
                     department who can help with cancellations and refunds.",
                ));
            }

            profile.return_reason = Some(args.return_reason);
            profile.return_approved = true;
            Ok(ToolOutcome::narrate(
                "Thank you for providing that information. Based on our policy, your return \
                 has been approved. Would you like me to email you a return shipping label?",
            ))
        },
    );

    let send_return_label = ToolDef::new(
        ToolSpec::new(
            "send_return_label",
            "Called when the customer confirms they want a return shipping label sent to \
             them.",
        ),
        |_args, ctx: &mut Ctx| {
            let profile = &mut ctx.state.profile;
            if !profile.return_approved {
                return Ok(ToolOutcome::narrate(
                    "I see that your return hasn't been approved yet. Let's first verify if \
                     your product is eligible for return.",
                ));
            }
            let email = match &profile.customer_email {
                Some(email) => email.clone(),
                None => {
                    return Ok(ToolOutcome::narrate(
                        "I'll need your email address to send the return label. Could you \
                         please provide that?",
                    ))
                }
            };
            profile.return_label_sent = true;
            Ok(ToolOutcome::narrate(format!(
                "Great! I've sent a return shipping label to {email}. Once you ship the \
                 item back, your refund will be processed within 5-7 business days after we \
                 receive it. Is there anything else I can help you with today?"
            )))
        },
    );

    AgentDef::new(
        "returns",
        "You are a returns specialist for an electronics and home goods company. Your job \
         is to help customers process returns and refunds. Collect the necessary \
         information about the return reason, verify eligibility, and process the return \
         if applicable. Be empathetic but follow company policies.",
    )
    .with_voice("echo")
    .with_tool(update_customer_info())
    .with_tool(record_satisfaction())
    .with_tool(process_return)
    .with_tool(send_return_label)
    .with_tool(transfer_tool(
        "to_initial",
        "initial",
        "Called when the customer has a different issue or wants to start over.",
    ))
    .with_tool(transfer_tool(
        "to_billing",
        "billing",
        "Called when the return issue involves billing or refunds that need special \
         handling.",
    ))
    .with_tool(escalation_transfer(
        "to_manager",
        "Complex return issue",
        "Called when the customer is unsatisfied with the return policy or has a complex \
         issue.",
    ))
}

// ============================================================================
// TECHNICAL
// ============================================================================

const GENERIC_TROUBLESHOOTING: &str =
    "Based on the information you've provided, I recommend the following general \
     troubleshooting steps:\n\n\
     1. Power cycle the device (turn it off, unplug it for 30 seconds, then plug it back \
     in and turn it on).\n\
     2. Ensure all connections are secure and properly attached.\n\
     3. Check for any available software or firmware updates.\n\
     4. Try using the device in a different environment or setup if possible.\n\n\
     Did any of these steps help resolve your issue?";

#[derive(Deserialize)]
struct EscalateTechnicalArgs {
    reason: String,
}

fn technical_agent(kb: Arc<KnowledgeBase>) -> AgentDef<SupportProfile> {
    let troubleshoot_issue = ToolDef::new(
        ToolSpec::new(
            "troubleshoot_issue",
            "Called to access the knowledge base and provide troubleshooting steps for \
             the customer's issue.",
        ),
        move |_args, ctx: &mut Ctx| {
            let profile = &ctx.state.profile;
            if profile.product_id.is_none() && profile.issue_description.is_none() {
                return Ok(ToolOutcome::narrate(
                    "To help troubleshoot your issue, I'll need more details about the \
                     product and the problem you're experiencing. Could you describe \
                     what's happening?",
                ));
            }
            let description = profile.issue_description.as_deref().unwrap_or_default();
            let advice = kb
                .lookup(description)
                .map(|entry| entry.advice.clone())
                .unwrap_or_else(|| GENERIC_TROUBLESHOOTING.to_string());
            Ok(ToolOutcome::narrate(advice))
        },
    );

    let escalate_technical_issue = ToolDef::new(
        ToolSpec::new(
            "escalate_technical_issue",
            "Called when the technical issue can't be resolved with basic \
             troubleshooting.",
        )
        .with_param(ParamSpec::required(
            "reason",
            ParamType::String,
            "The reason for escalating the technical issue",
        )),
        |args, ctx: &mut Ctx| {
            let args: EscalateTechnicalArgs = decode_args("escalate_technical_issue", &args)?;
            ctx.state.profile.escalated = true;
            ctx.state.profile.escalation_reason = Some(args.reason);
            Ok(ToolOutcome::handoff("manager"))
        },
    );

    AgentDef::new(
        "technical",
        "You are a technical support specialist for an electronics and home goods \
         company. Your job is to help customers troubleshoot and resolve technical issues \
         with their products. Provide clear, step-by-step instructions and verify if the \
         suggested solutions work.",
    )
    .with_voice("nova")
    .with_tool(update_customer_info())
    .with_tool(record_satisfaction())
    .with_tool(troubleshoot_issue)
    .with_tool(escalate_technical_issue)
    .with_tool(transfer_tool(
        "to_initial",
        "initial",
        "Called when the customer has a different issue or wants to start over.",
    ))
    .with_tool(transfer_tool(
        "to_returns",
        "returns",
        "Called when the customer wants to return a product after troubleshooting.",
    ))
}

// ============================================================================
// BILLING
// ============================================================================

#[derive(Deserialize)]
struct ProcessRefundArgs {
    amount: f64,
}

#[derive(Deserialize)]
struct ManageSubscriptionArgs {
    action: String,
}

fn billing_agent() -> AgentDef<SupportProfile> {
    let process_refund = ToolDef::new(
        ToolSpec::new(
            "process_refund",
            "Called when a refund needs to be processed for the customer.",
        )
        .with_param(ParamSpec::required(
            "amount",
            ParamType::Number,
            "The amount to be refunded",
        )),
        |args, ctx: &mut Ctx| {
            let args: ProcessRefundArgs = decode_args("process_refund", &args)?;
            let profile = &mut ctx.state.profile;

            if profile.order_number.is_none() {
                return Ok(ToolOutcome::narrate(
                    "Before I can process a refund, I'll need your order number. Do you \
                     have that available?",
                ));
            }
            let email = match &profile.customer_email {
                Some(email) => email.clone(),
                None => {
                    return Ok(ToolOutcome::narrate(
                        "I'll need your email address to process the refund. Could you \
                         please provide that?",
                    ))
                }
            };

            profile.refund_amount = Some(args.amount);
            profile.refund_approved = true;
            Ok(ToolOutcome::narrate(format!(
                "I've processed a refund of ${:.2} for your order. The refund will be \
                 credited back to your original payment method within 5-7 business days. \
                 You'll receive a confirmation email at {email}. Is there anything else I \
                 can help you with today?",
                args.amount
            )))
        },
    );

    let manage_subscription = ToolDef::new(
        ToolSpec::new(
            "manage_subscription",
            "Called when the customer wants to manage their subscription service.",
        )
        .with_param(
            ParamSpec::required(
                "action",
                ParamType::String,
                "The action to take on the subscription (cancel, pause, resume)",
            )
            .with_one_of(["cancel", "pause", "resume"]),
        ),
        |args, ctx: &mut Ctx| {
            let args: ManageSubscriptionArgs = decode_args("manage_subscription", &args)?;
            let email = match &ctx.state.profile.customer_email {
                Some(email) => email.clone(),
                None => {
                    return Ok(ToolOutcome::narrate(
                        "I'll need your email address to locate your subscription. Could \
                         you please provide that?",
                    ))
                }
            };

            let reply = match args.action.to_lowercase().as_str() {
                "cancel" => format!(
                    "I've cancelled your subscription. You'll have access until the end of \
                     your current billing period. You'll receive a confirmation email at \
                     {email}. Is there anything else I can help you with today?"
                ),
                "pause" => format!(
                    "I've paused your subscription for 30 days. Your billing will resume \
                     after that period. You'll receive a confirmation email at {email}. Is \
                     there anything else I can help you with today?"
                ),
                "resume" => format!(
                    "I've resumed your subscription. Your next billing date will be \
                     updated accordingly. You'll receive a confirmation email at {email}. \
                     Is there anything else I can help you with today?"
                ),
                _ => "I'm not sure what action you want to take on your subscription. \
                      Would you like to cancel, pause, or resume your subscription?"
                    .to_string(),
            };
            Ok(ToolOutcome::narrate(reply))
        },
    );

    AgentDef::new(
        "billing",
        "You are a billing and payments specialist for an electronics and home goods \
         company. Your job is to help customers with billing inquiries, process refunds, \
         manage subscriptions, and resolve payment issues. Be precise and trustworthy when \
         handling financial matters.",
    )
    .with_voice("shimmer")
    .with_tool(update_customer_info())
    .with_tool(record_satisfaction())
    .with_tool(process_refund)
    .with_tool(manage_subscription)
    .with_tool(transfer_tool(
        "to_initial",
        "initial",
        "Called when the customer has a different issue or wants to start over.",
    ))
    .with_tool(escalation_transfer(
        "to_manager",
        "Complex billing issue",
        "Called when the billing issue is complex or requires manager approval.",
    ))
}

// ============================================================================
// MANAGER
// ============================================================================

#[derive(Deserialize)]
struct ResolveEscalatedIssueArgs {
    resolution: String,
    special_accommodation: Option<String>,
}

fn manager_agent() -> AgentDef<SupportProfile> {
    let resolve_escalated_issue = ToolDef::new(
        ToolSpec::new(
            "resolve_escalated_issue",
            "Called when the manager has determined a resolution for the escalated issue.",
        )
        .with_param(ParamSpec::required(
            "resolution",
            ParamType::String,
            "The resolution offered to the customer",
        ))
        .with_param(ParamSpec::optional(
            "special_accommodation",
            ParamType::String,
            "Any special accommodation or exception made",
        )),
        |args, ctx: &mut Ctx| {
            let args: ResolveEscalatedIssueArgs = decode_args("resolve_escalated_issue", &args)?;
            if !ctx.state.profile.escalated {
                return Ok(ToolOutcome::narrate(
                    "I'm not seeing any escalated issue in our system. Could you please \
                     explain the issue you're experiencing?",
                ));
            }
            let mut reply = format!(
                "I understand this has been a frustrating experience, and I appreciate \
                 your patience. Here's what I can do to resolve this issue: {}",
                args.resolution
            );
            if let Some(accommodation) = args.special_accommodation {
                reply.push_str(&format!(
                    " Additionally, as a one-time special accommodation, I'm also \
                     offering: {accommodation}"
                ));
            }
            reply.push_str(" Is this resolution satisfactory for you?");
            Ok(ToolOutcome::narrate(reply))
        },
    );

    AgentDef::new(
        "manager",
        "You are a customer support manager with authority to handle escalated issues and \
         exceptions. Your job is to resolve complex problems, address customer \
         dissatisfaction, and make policy exceptions when appropriate. Balance customer \
         satisfaction with company policies and be empowered to offer special \
         accommodations in reasonable situations.",
    )
    .with_voice("onyx")
    .with_tool(update_customer_info())
    .with_tool(record_satisfaction())
    .with_tool(resolve_escalated_issue)
    .with_tool(transfer_tool(
        "to_initial",
        "initial",
        "Called when the issue is resolved or the customer has a new issue.",
    ))
    .with_tool(transfer_tool(
        "to_returns",
        "returns",
        "Called when the manager determines the issue should be handled by the returns \
         department.",
    ))
    .with_tool(transfer_tool(
        "to_technical",
        "technical",
        "Called when the manager determines the issue should be handled by technical \
         support.",
    ))
    .with_tool(transfer_tool(
        "to_billing",
        "billing",
        "Called when the manager determines the issue should be handled by the billing \
         department.",
    ))
}

// ============================================================================
// SUITE
// ============================================================================

/// The full customer-support agent set, routed from "initial".
pub fn support_agents(
    catalog: Arc<ProductCatalog>,
    kb: Arc<KnowledgeBase>,
) -> Vec<AgentDef<SupportProfile>> {
    vec![
        initial_agent(),
        returns_agent(catalog),
        technical_agent(kb),
        billing_agent(),
        manager_agent(),
    ]
}

// ============================================================================
// TESTS
// ============================================================================
