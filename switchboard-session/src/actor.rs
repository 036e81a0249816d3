//! One task per conversation
//!
//! Wraps a `Session` in a dedicated tokio task with an mpsc command
//! channel. Every turn runs to completion inside the task before the
//! next command is taken, which is what serializes all state and
//! buffer mutation for a conversation; independent conversations get
//! independent tasks and share nothing.

use crate::driver::{Session, TurnOutput};
use switchboard_core::{AgentName, Profile, SwitchboardError, SwitchboardResult};
use switchboard_voice::AudioClip;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::debug;

enum Command {
    Start {
        agent: AgentName,
        reply: oneshot::Sender<SwitchboardResult<TurnOutput>>,
    },
    Text {
        text: String,
        reply: oneshot::Sender<SwitchboardResult<TurnOutput>>,
    },
    Audio {
        clip: AudioClip,
        reply: oneshot::Sender<SwitchboardResult<TurnOutput>>,
    },
    Stop,
}

/// Handle to a spawned conversation task.
#[derive(Clone)]
pub struct SessionHandle {
    tx: mpsc::Sender<Command>,
}

impl SessionHandle {
    /// Activate the initial agent.
    pub async fn start(&self, agent: impl Into<AgentName>) -> SwitchboardResult<TurnOutput> {
        self.send(|reply| Command::Start {
            agent: agent.into(),
            reply,
        })
        .await
    }

    /// Run one turn from caller text.
    pub async fn push_text(&self, text: impl Into<String>) -> SwitchboardResult<TurnOutput> {
        self.send(|reply| Command::Text {
            text: text.into(),
            reply,
        })
        .await
    }

    /// Run one turn from caller audio.
    pub async fn push_audio(&self, clip: AudioClip) -> SwitchboardResult<TurnOutput> {
        self.send(|reply| Command::Audio { clip, reply }).await
    }

    /// Stop the conversation task. Pending commands already queued are
    /// drained first.
    pub async fn stop(&self) {
        let _ = self.tx.send(Command::Stop).await;
    }

    async fn send(
        &self,
        build: impl FnOnce(oneshot::Sender<SwitchboardResult<TurnOutput>>) -> Command,
    ) -> SwitchboardResult<TurnOutput> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(build(reply_tx))
            .await
            .map_err(|_| SwitchboardError::SessionClosed)?;
        reply_rx.await.map_err(|_| SwitchboardError::SessionClosed)?
    }
}

/// Spawn a conversation task around a session.
///
/// Returns the command handle and the task's join handle. The task
/// exits when `stop` is called or every handle is dropped.
pub fn spawn<P: Profile>(mut session: Session<P>) -> (SessionHandle, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::channel::<Command>(16);

    let join = tokio::spawn(async move {
        while let Some(command) = rx.recv().await {
            match command {
                Command::Start { agent, reply } => {
                    let _ = reply.send(session.start(agent).await);
                }
                Command::Text { text, reply } => {
                    let _ = reply.send(session.push_text(text).await);
                }
                Command::Audio { clip, reply } => {
                    let _ = reply.send(session.push_audio(&clip).await);
                }
                Command::Stop => break,
            }
        }
        debug!("conversation task finished");
    });

    (SessionHandle { tx }, join)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use switchboard_agents::AgentDef;
    use switchboard_llm::{MockLanguageModel, ModelReply};
    use switchboard_test_utils::TestProfile;

    fn session(model: Arc<MockLanguageModel>) -> Session<TestProfile> {
        Session::builder(TestProfile::default())
            .with_agent(AgentDef::new("initial", "You greet."))
            .with_llm(model)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_handle_runs_turns_in_order() {
        let model = Arc::new(MockLanguageModel::scripted([
            ModelReply::Narration("first".to_string()),
            ModelReply::Narration("second".to_string()),
        ]));
        let (handle, join) = spawn(session(model));

        handle.start("initial").await.unwrap();
        let a = handle.push_text("one").await.unwrap();
        let b = handle.push_text("two").await.unwrap();
        assert_eq!(a.reply, "first");
        assert_eq!(b.reply, "second");

        handle.stop().await;
        join.await.unwrap();
    }

    #[tokio::test]
    async fn test_handle_errors_after_stop() {
        let model = Arc::new(MockLanguageModel::new());
        let (handle, join) = spawn(session(model));
        handle.stop().await;
        join.await.unwrap();

        let err = handle.push_text("anyone there?").await.unwrap_err();
        assert!(matches!(err, SwitchboardError::SessionClosed));
    }

    #[tokio::test]
    async fn test_independent_conversations_are_isolated() {
        let model_a = Arc::new(MockLanguageModel::new().with_fallback("from a"));
        let model_b = Arc::new(MockLanguageModel::new().with_fallback("from b"));
        let (handle_a, join_a) = spawn(session(model_a));
        let (handle_b, join_b) = spawn(session(model_b));

        let a = handle_a.start("initial").await.unwrap();
        let b = handle_b.start("initial").await.unwrap();
        assert_eq!(a.reply, "from a");
        assert_eq!(b.reply, "from b");

        handle_a.stop().await;
        handle_b.stop().await;
        join_a.await.unwrap();
        join_b.await.unwrap();
    }
}
