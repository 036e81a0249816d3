//! Gaming-advisor persona
//!
//! A single-agent suite: no handoffs, no collected profile, but a
//! scripted greeting and tools that return structured JSON payloads
//! for the model to narrate from.

use serde::Deserialize;
use serde_json::json;
use switchboard_agents::{decode_args, AgentDef, ToolCtx, ToolDef};
use switchboard_core::{ParamSpec, ParamType, Profile, StateSnapshot, ToolOutcome, ToolSpec};
use tracing::debug;

// ============================================================================
// PROFILE
// ============================================================================

/// The gaming advisor keeps no per-caller record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GamingProfile;

impl Profile for GamingProfile {
    fn snapshot(&self) -> StateSnapshot {
        StateSnapshot::new()
    }
}

type Ctx<'a> = ToolCtx<'a, GamingProfile>;

const INSTRUCTIONS: &str = "You are NexusGuide, an advanced AI gaming assistant from the future.\n\n\
Your purpose is to provide expert gaming advice, recommendations, and assistance to players.\n\
Your tone is friendly, enthusiastic, and knowledgeable - like the ultimate gaming buddy.\n\n\
Some key personality traits:\n\
- You have extensive knowledge of video games from all eras (classic to futuristic)\n\
- You're passionate about gaming culture and esports\n\
- You provide strategic advice without being condescending\n\
- You can recommend games based on player preferences\n\
- You can troubleshoot common gaming issues\n\
- You have a good sense of humor and occasionally make gaming-related jokes\n\
- You keep responses concise and conversational since this is a voice interface\n\n\
You can assist with game recommendations, strategies, Easter eggs, achievement hunting,\n\
hardware advice, and more. When you don't know something specific, you'll be honest\n\
but try to provide general guidance that might help.";

const GREETING: &str = "Greet the user enthusiastically as NexusGuide, the future of gaming \
advice, and ask how you can help them with their gaming needs today.";

// ============================================================================
// TOOLS
// ============================================================================

fn recommend_games() -> ToolDef<GamingProfile> {
    ToolDef::new(
        ToolSpec::new(
            "recommend_games",
            "Recommends video games based on user preferences.",
        )
        .with_param(ParamSpec::optional(
            "genre",
            ParamType::String,
            "The genre of games the user is interested in (e.g., \"FPS\", \"RPG\", \
             \"Strategy\")",
        ))
        .with_param(ParamSpec::optional(
            "platform",
            ParamType::String,
            "The gaming platform (e.g., \"PC\", \"PlayStation\", \"Xbox\", \"Switch\", \
             \"Mobile\")",
        ))
        .with_param(ParamSpec::optional(
            "multiplayer",
            ParamType::Boolean,
            "Whether the user wants multiplayer games",
        ))
        .with_param(ParamSpec::optional(
            "similar_to",
            ParamType::String,
            "A game that the user already enjoys, to find similar recommendations",
        )),
        |args, _ctx: &mut Ctx| {
            debug!(%args, "recommending games");
            Ok(ToolOutcome::structured(json!({
                "recommendations": [
                    {
                        "title": "Stellar Odyssey",
                        "genre": "Space RPG",
                        "description": "An immersive open-world space exploration game with deep character progression",
                        "platforms": ["PC", "PlayStation", "Xbox"],
                        "multiplayer": true,
                        "rating": 9.2,
                    },
                    {
                        "title": "Neon Breach",
                        "genre": "Cyberpunk FPS",
                        "description": "Fast-paced shooter set in a dystopian future with unique hacking mechanics",
                        "platforms": ["PC", "PlayStation", "Xbox"],
                        "multiplayer": true,
                        "rating": 8.8,
                    },
                    {
                        "title": "Echo Realm",
                        "genre": "Puzzle Adventure",
                        "description": "Mind-bending puzzle game where sound and music control the environment",
                        "platforms": ["PC", "Switch", "Mobile"],
                        "multiplayer": false,
                        "rating": 9.0,
                    },
                ],
                "notes": "These recommendations are based on your preferences. I can provide more specific suggestions if you tell me more about what you enjoy in games."
            })))
        },
    )
}

#[derive(Deserialize)]
struct ProvideStrategyArgs {
    game: String,
    specific_challenge: Option<String>,
    character_class: Option<String>,
    difficulty: Option<String>,
}

fn provide_strategy() -> ToolDef<GamingProfile> {
    ToolDef::new(
        ToolSpec::new(
            "provide_strategy",
            "Provides gaming strategies and tips for specific games or challenges.",
        )
        .with_param(ParamSpec::required(
            "game",
            ParamType::String,
            "The name of the game the user needs help with",
        ))
        .with_param(ParamSpec::optional(
            "specific_challenge",
            ParamType::String,
            "A specific level, boss, achievement or challenge they're stuck on",
        ))
        .with_param(ParamSpec::optional(
            "character_class",
            ParamType::String,
            "If applicable, the character class or build they're using",
        ))
        .with_param(ParamSpec::optional(
            "difficulty",
            ParamType::String,
            "The difficulty level they're playing on",
        )),
        |args, _ctx: &mut Ctx| {
            let args: ProvideStrategyArgs = decode_args("provide_strategy", &args)?;
            debug!(game = %args.game, "providing strategy");

            let mut strategy = format!("Here's a strategic approach for {}", args.game);
            if let Some(challenge) = &args.specific_challenge {
                strategy.push_str(&format!(" when facing {challenge}"));
            }
            if let Some(class) = &args.character_class {
                strategy.push_str(&format!(" using {class}"));
            }
            if let Some(difficulty) = &args.difficulty {
                strategy.push_str(&format!(" on {difficulty} difficulty"));
            }
            strategy.push_str(
                ":\n\n\
                 1. Start by analyzing the pattern of the challenge\n\
                 2. Ensure your equipment is optimized for this specific encounter\n\
                 3. Consider adjusting your timing rather than being aggressive\n\
                 4. Look for environmental advantages you might have missed",
            );

            Ok(ToolOutcome::structured(json!({
                "game": args.game,
                "strategy": strategy,
                "additional_tips": [
                    "Remember that patience is often key to overcoming difficult challenges",
                    "The community has found that upgrading your defensive capabilities helps significantly",
                    "There might be optional quests that provide items specifically designed for this challenge"
                ]
            })))
        },
    )
}

fn troubleshoot_technical_issue() -> ToolDef<GamingProfile> {
    ToolDef::new(
        ToolSpec::new(
            "troubleshoot_technical_issue",
            "Helps troubleshoot technical gaming issues.",
        )
        .with_param(ParamSpec::required(
            "hardware",
            ParamType::String,
            "The gaming hardware experiencing issues (console name, PC specs, etc.)",
        ))
        .with_param(ParamSpec::optional(
            "game",
            ParamType::String,
            "The specific game having problems, if applicable",
        ))
        .with_param(
            ParamSpec::optional(
                "symptoms",
                ParamType::String,
                "Description of the technical issues being experienced",
            )
            .with_default(json!("")),
        )
        .with_param(ParamSpec::optional(
            "tried_solutions",
            ParamType::StringList,
            "Solutions the user has already attempted",
        )),
        |args, _ctx: &mut Ctx| {
            debug!(%args, "troubleshooting technical issue");
            Ok(ToolOutcome::structured(json!({
                "possible_causes": [
                    "Outdated drivers or system software",
                    "Insufficient system resources for game requirements",
                    "Corrupted game files or installation",
                    "Hardware compatibility issues",
                    "Network connectivity problems (for online features)"
                ],
                "recommended_solutions": [
                    "Update all drivers and system software to the latest version",
                    "Verify and repair game files through the launcher/store",
                    "Check for background applications consuming resources",
                    "Adjust in-game graphics settings to better match your hardware",
                    "Try a clean reinstallation if other solutions don't work"
                ],
                "preventative_tips": [
                    "Regularly update drivers and system software",
                    "Monitor system temperatures during gaming sessions",
                    "Keep storage drives uncrowded with at least 15-20% free space",
                    "Consider hardware upgrades if you're frequently encountering performance issues"
                ]
            })))
        },
    )
}

// ============================================================================
// SUITE
// ============================================================================

/// The NexusGuide gaming advisor.
pub fn gaming_advisor() -> AgentDef<GamingProfile> {
    AgentDef::new("advisor", INSTRUCTIONS)
        .with_voice("nova")
        .with_greeting(GREETING)
        .with_tool(recommend_games())
        .with_tool(provide_strategy())
        .with_tool(troubleshoot_technical_issue())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use switchboard_core::{SessionState, ToolInvocation};

    #[test]
    fn test_advisor_has_greeting_and_three_tools() {
        let advisor = gaming_advisor();
        assert!(advisor.greeting().unwrap().contains("NexusGuide"));
        assert_eq!(advisor.tool_specs().len(), 3);
    }

    #[test]
    fn test_recommendations_are_structured() {
        let advisor = gaming_advisor();
        let mut state = SessionState::new(GamingProfile);
        let outcome = switchboard_agents::dispatch(
            &advisor,
            &ToolInvocation::new("recommend_games", json!({"genre": "RPG"})),
            &mut state,
        )
        .unwrap();
        match outcome {
            ToolOutcome::Narrated(value) => {
                assert_eq!(value["recommendations"][0]["title"], "Stellar Odyssey");
                assert_eq!(value["recommendations"].as_array().unwrap().len(), 3);
            }
            _ => panic!("expected structured narration"),
        }
    }

    #[test]
    fn test_strategy_mentions_every_qualifier() {
        let advisor = gaming_advisor();
        let mut state = SessionState::new(GamingProfile);
        let outcome = switchboard_agents::dispatch(
            &advisor,
            &ToolInvocation::new(
                "provide_strategy",
                json!({
                    "game": "Neon Breach",
                    "specific_challenge": "the final boss",
                    "difficulty": "nightmare"
                }),
            ),
            &mut state,
        )
        .unwrap();
        match outcome {
            ToolOutcome::Narrated(value) => {
                let strategy = value["strategy"].as_str().unwrap();
                assert!(strategy.contains("Neon Breach"));
                assert!(strategy.contains("the final boss"));
                assert!(strategy.contains("nightmare difficulty"));
            }
            _ => panic!("expected structured narration"),
        }
    }

    #[test]
    fn test_troubleshoot_requires_hardware() {
        let advisor = gaming_advisor();
        let mut state = SessionState::new(GamingProfile);
        let err = switchboard_agents::dispatch(
            &advisor,
            &ToolInvocation::new("troubleshoot_technical_issue", json!({})),
            &mut state,
        )
        .unwrap_err();
        assert!(err.to_string().contains("hardware"));
    }

    #[test]
    fn test_tried_solutions_must_be_string_list() {
        let advisor = gaming_advisor();
        let mut state = SessionState::new(GamingProfile);
        let result = switchboard_agents::dispatch(
            &advisor,
            &ToolInvocation::new(
                "troubleshoot_technical_issue",
                json!({"hardware": "PC", "tried_solutions": ["rebooted", 42]}),
            ),
            &mut state,
        );
        assert!(result.is_err());
    }
}
