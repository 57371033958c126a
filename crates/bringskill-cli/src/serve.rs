//! Subcommand: `bringskill serve` -- Hermes intent loop.
//!
//! Subscribes to the configured intents, routes each one to completion, and
//! publishes the spoken reply before polling the next message.  Exits on
//! Ctrl-C.

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};

use bringskill_adapters::{HermesAdapter, NluIntent, Reply};
use bringskill_intent::{IntentRouter, Response, VoiceIntent};

use crate::config::SkillConfig;
use crate::helpers::build_router;

/// Pause before polling again after a broker connection error.
const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Run the Hermes intent loop.
pub async fn cmd_serve(config: &SkillConfig) -> Result<()> {
    let router = build_router(config)?;
    let mut hermes = HermesAdapter::new(config.mqtt.clone(), config.intents.all());
    hermes.connect().context("failed to create MQTT client")?;

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        let next = tokio::select! {
            _ = &mut shutdown => {
                info!("shutdown requested");
                break;
            }
            next = hermes.next_intent() => next,
        };

        match next {
            Ok(message) => handle_message(&router, &hermes, &message).await,
            Err(e) => {
                warn!(error = %e, delay_secs = RECONNECT_DELAY.as_secs(), "Hermes connection lost");
                tokio::time::sleep(RECONNECT_DELAY).await;
            }
        }
    }

    hermes.disconnect().await?;
    Ok(())
}

/// Route one intent message and speak the reply.
async fn handle_message(router: &IntentRouter, hermes: &HermesAdapter, message: &NluIntent) {
    let response = match VoiceIntent::from_nlu(message, router.names()) {
        Ok(intent) => router.route(&intent).await,
        Err(e) => {
            warn!(error = %e, "intent not handled");
            // Outside a session nobody is waiting for an answer.
            if message.session_id.is_none() {
                return;
            }
            router.not_understood()
        }
    };

    let reply = reply_for(message, &response);
    if let Err(e) = hermes.send(&reply).await {
        warn!(error = %e, site_id = %message.site_id, "failed to publish reply");
    }
}

/// Pick how a response is spoken: inside the intent's session (closing it
/// or asking a follow-up), or on the site directly when there is none.
fn reply_for(message: &NluIntent, response: &Response) -> Reply {
    let Some(session_id) = message.session_id.as_deref() else {
        return Reply::say(&message.site_id, &response.text);
    };
    match &response.continuation {
        Some(continuation) => Reply::continue_with(
            session_id,
            &response.text,
            continuation.intent_filter.clone(),
        ),
        None => Reply::end(session_id, &response.text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(session_id: Option<&str>) -> NluIntent {
        let mut message: NluIntent =
            serde_json::from_str(r#"{"intent": {"intentName": "BringAddItem"}, "siteId": "kitchen"}"#)
                .unwrap();
        message.session_id = session_id.map(str::to_string);
        message
    }

    #[test]
    fn final_answer_ends_session() {
        let reply = reply_for(&message(Some("s-1")), &Response::end("Erledigt."));
        match reply {
            Reply::End(payload) => {
                assert_eq!(payload.session_id, "s-1");
                assert_eq!(payload.text.as_deref(), Some("Erledigt."));
            }
            other => panic!("expected endSession, got {other:?}"),
        }
    }

    #[test]
    fn follow_up_question_continues_session() {
        let response = Response::ask("Was soll ich hinzufügen?", vec!["BringAddItem".into()]);
        let reply = reply_for(&message(Some("s-1")), &response);
        match reply {
            Reply::Continue(payload) => {
                assert_eq!(payload.session_id, "s-1");
                assert_eq!(payload.text, "Was soll ich hinzufügen?");
                assert_eq!(payload.intent_filter, Some(vec!["BringAddItem".to_string()]));
            }
            other => panic!("expected continueSession, got {other:?}"),
        }
    }

    #[test]
    fn without_session_speaks_on_site() {
        let reply = reply_for(&message(None), &Response::end("Erledigt."));
        match reply {
            Reply::Say(payload) => {
                assert_eq!(payload.site_id, "kitchen");
                assert_eq!(payload.text, "Erledigt.");
            }
            other => panic!("expected tts/say, got {other:?}"),
        }
    }

    #[test]
    fn follow_up_without_session_is_still_spoken() {
        let response = Response::ask("Was?", vec!["BringAddItem".into()]);
        assert!(matches!(reply_for(&message(None), &response), Reply::Say(_)));
    }
}
