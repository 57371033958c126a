//! Hermes voice-platform transport over MQTT.
//!
//! Rhasspy publishes every recognised intent as an `NluIntent` JSON message
//! on `hermes/intent/<intentName>` and expects the skill to close the voice
//! session on `hermes/dialogueManager/endSession` (or keep it open with
//! `continueSession`).  [`HermesAdapter`] subscribes to the configured intent
//! names, yields one accepted [`NluIntent`] per call to
//! [`HermesAdapter::next_intent`], and publishes the replies.

use std::time::Duration;

use rumqttc::{AsyncClient, Event, EventLoop, MqttOptions, Packet, QoS};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{AdapterError, Result};

/// Topic prefix for recognised intents.
pub const INTENT_TOPIC_PREFIX: &str = "hermes/intent/";

/// Topic that closes a voice session with a spoken reply.
pub const END_SESSION_TOPIC: &str = "hermes/dialogueManager/endSession";

/// Topic that speaks a reply and keeps the voice session open.
pub const CONTINUE_SESSION_TOPIC: &str = "hermes/dialogueManager/continueSession";

/// Topic for speaking text outside of a dialogue session.
pub const TTS_SAY_TOPIC: &str = "hermes/tts/say";

/// Capacity of the request channel between the client and the event loop.
const REQUEST_CAPACITY: usize = 10;

// ---------------------------------------------------------------------------
// Hermes messages
// ---------------------------------------------------------------------------

/// Name and score of a recognised intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentName {
    pub intent_name: String,
    #[serde(default)]
    pub confidence_score: f64,
}

/// A named value the NLU layer extracted from the utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub slot_name: String,
    /// The value as it was spoken.
    pub raw_value: String,
    #[serde(default)]
    pub entity: String,
    /// The normalised value; its shape depends on the slot entity.
    #[serde(default)]
    pub value: serde_json::Value,
}

/// A recognised intent as published on `hermes/intent/<intentName>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NluIntent {
    #[serde(default)]
    pub input: String,
    pub intent: IntentName,
    #[serde(default)]
    pub slots: Vec<Slot>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default = "default_site_id")]
    pub site_id: String,
    #[serde(default)]
    pub custom_data: Option<String>,
}

impl NluIntent {
    /// The recognised intent name.
    pub fn intent_name(&self) -> &str {
        &self.intent.intent_name
    }

    /// Raw values of every slot with the given name, in utterance order.
    pub fn slot_values<'a>(&'a self, slot_name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.slots
            .iter()
            .filter(move |slot| slot.slot_name == slot_name)
            .map(|slot| slot.raw_value.as_str())
    }
}

fn default_site_id() -> String {
    "default".to_string()
}

/// Payload for [`END_SESSION_TOPIC`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndSession {
    pub session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<String>,
}

/// Payload for [`CONTINUE_SESSION_TOPIC`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinueSession {
    pub session_id: String,
    pub text: String,
    /// Only these intents are recognised for the follow-up utterance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent_filter: Option<Vec<String>>,
    pub send_intent_not_recognized: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<String>,
}

/// Payload for [`TTS_SAY_TOPIC`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Say {
    pub text: String,
    pub site_id: String,
    pub id: String,
}

/// Build the topic an intent is published on.
pub fn intent_topic(intent_name: &str) -> String {
    format!("{INTENT_TOPIC_PREFIX}{intent_name}")
}

/// A spoken reply, ready to publish.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Speak and close the session.
    End(EndSession),
    /// Speak and keep the session open.
    Continue(ContinueSession),
    /// Speak outside of any session.
    Say(Say),
}

impl Reply {
    /// Close `session_id` after speaking `text`.
    pub fn end(session_id: &str, text: &str) -> Self {
        Self::End(EndSession {
            session_id: session_id.to_string(),
            text: Some(text.to_string()),
            custom_data: None,
        })
    }

    /// Speak `text` and accept only `intent_filter` for the next utterance.
    pub fn continue_with(session_id: &str, text: &str, intent_filter: Vec<String>) -> Self {
        Self::Continue(ContinueSession {
            session_id: session_id.to_string(),
            text: text.to_string(),
            intent_filter: Some(intent_filter),
            send_intent_not_recognized: false,
            custom_data: None,
        })
    }

    /// Speak `text` on `site_id` without a session.
    pub fn say(site_id: &str, text: &str) -> Self {
        Self::Say(Say {
            text: text.to_string(),
            site_id: site_id.to_string(),
            id: Uuid::now_v7().to_string(),
        })
    }

    /// The topic this reply is published on.
    pub fn topic(&self) -> &'static str {
        match self {
            Self::End(_) => END_SESSION_TOPIC,
            Self::Continue(_) => CONTINUE_SESSION_TOPIC,
            Self::Say(_) => TTS_SAY_TOPIC,
        }
    }

    /// The JSON message body.
    pub fn payload(&self) -> Result<Vec<u8>> {
        let bytes = match self {
            Self::End(payload) => serde_json::to_vec(payload)?,
            Self::Continue(payload) => serde_json::to_vec(payload)?,
            Self::Say(payload) => serde_json::to_vec(payload)?,
        };
        Ok(bytes)
    }
}

/// Session id of an intent message, read even when the rest of the payload
/// does not decode.
pub fn session_of(payload: &[u8]) -> Option<String> {
    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct SessionRef {
        #[serde(default)]
        session_id: Option<String>,
    }

    serde_json::from_slice::<SessionRef>(payload)
        .ok()
        .and_then(|session| session.session_id)
        .filter(|id| !id.is_empty())
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// MQTT connection configuration, the `[mqtt]` config section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HermesConfig {
    pub host: String,
    pub port: u16,
    pub client_id: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Keep-alive interval in seconds.
    pub keep_alive: u16,
    /// Only intents from these satellites are handled.  Empty accepts all.
    pub site_ids: Vec<String>,
}

impl Default for HermesConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 1883,
            client_id: None,
            username: None,
            password: None,
            keep_alive: 60,
            site_ids: Vec::new(),
        }
    }
}

impl HermesConfig {
    /// Whether an intent from `site_id` should be handled.
    pub fn accepts_site(&self, site_id: &str) -> bool {
        self.site_ids.is_empty() || self.site_ids.iter().any(|s| s == site_id)
    }

    fn mqtt_options(&self) -> MqttOptions {
        let client_id = self
            .client_id
            .clone()
            .unwrap_or_else(|| format!("bringskill-{}", Uuid::now_v7()));
        let mut options = MqttOptions::new(client_id, &self.host, self.port);
        options.set_keep_alive(Duration::from_secs(u64::from(self.keep_alive)));
        options.set_clean_session(true);
        if let (Some(username), Some(password)) = (&self.username, &self.password) {
            options.set_credentials(username, password);
        }
        options
    }
}

// ---------------------------------------------------------------------------
// Adapter
// ---------------------------------------------------------------------------

/// Hermes adapter: receives intents and publishes spoken replies.
pub struct HermesAdapter {
    config: HermesConfig,
    /// Intent names to subscribe to.
    intents: Vec<String>,
    client: Option<AsyncClient>,
    event_loop: Option<EventLoop>,
}

impl HermesAdapter {
    /// Create an adapter for the given intent names.
    pub fn new(config: HermesConfig, intents: Vec<String>) -> Self {
        Self {
            config,
            intents,
            client: None,
            event_loop: None,
        }
    }

    /// Topics this adapter subscribes to.
    pub fn topics(&self) -> Vec<String> {
        self.intents.iter().map(|name| intent_topic(name)).collect()
    }

    /// Create the MQTT client.  The broker connection itself is established
    /// lazily by [`HermesAdapter::next_intent`], which also (re)subscribes
    /// on every successful connect.
    pub fn connect(&mut self) -> Result<()> {
        let (client, event_loop) = AsyncClient::new(self.config.mqtt_options(), REQUEST_CAPACITY);
        self.client = Some(client);
        self.event_loop = Some(event_loop);
        info!(
            host = %self.config.host,
            port = self.config.port,
            intents = ?self.intents,
            "Hermes adapter connecting"
        );
        Ok(())
    }

    /// Wait for the next intent this skill should handle.
    ///
    /// Connection errors are returned to the caller; polling again after an
    /// error makes the event loop reconnect.
    pub async fn next_intent(&mut self) -> Result<NluIntent> {
        let client = self.client.clone().ok_or_else(|| self.not_connected())?;
        let event_loop = self.event_loop.as_mut().ok_or_else(|| AdapterError::NotConnected {
            adapter_id: "hermes".into(),
        })?;

        loop {
            let event = event_loop
                .poll()
                .await
                .map_err(|e| AdapterError::Transport(format!("MQTT connection error: {e}")))?;

            match event {
                Event::Incoming(Packet::ConnAck(_)) => {
                    info!("connected to MQTT broker, subscribing to intents");
                    for name in &self.intents {
                        client
                            .try_subscribe(intent_topic(name), QoS::AtLeastOnce)
                            .map_err(|e| AdapterError::Transport(format!("failed to subscribe: {e}")))?;
                    }
                }
                Event::Incoming(Packet::Publish(publish)) => {
                    match parse_intent(&publish.topic, &publish.payload) {
                        Ok(Some(intent)) if self.config.accepts_site(&intent.site_id) => {
                            debug!(
                                intent = intent.intent_name(),
                                site_id = %intent.site_id,
                                "intent received"
                            );
                            return Ok(intent);
                        }
                        Ok(Some(intent)) => {
                            debug!(site_id = %intent.site_id, "ignoring intent from foreign site");
                        }
                        Ok(None) => {}
                        Err(e) => {
                            warn!(topic = %publish.topic, error = %e, "malformed intent message");
                            if let Some(session_id) = session_of(&publish.payload) {
                                close_session(&client, &session_id);
                            }
                        }
                    }
                }
                _ => {}
            }
        }
    }

    /// Publish a spoken reply.
    pub async fn send(&self, reply: &Reply) -> Result<()> {
        let client = self.client.as_ref().ok_or_else(|| self.not_connected())?;
        let topic = reply.topic();
        client
            .publish(topic, QoS::AtLeastOnce, false, reply.payload()?)
            .await
            .map_err(|e| AdapterError::Transport(format!("failed to publish to {topic}: {e}")))
    }

    /// Disconnect from the broker.
    pub async fn disconnect(&mut self) -> Result<()> {
        if let Some(client) = &self.client {
            let _ = client.disconnect().await;
        }
        self.client = None;
        self.event_loop = None;
        info!("Hermes adapter disconnected");
        Ok(())
    }

    fn not_connected(&self) -> AdapterError {
        AdapterError::NotConnected {
            adapter_id: "hermes".into(),
        }
    }
}

/// End a session silently from inside the event loop, where awaiting the
/// request channel could block the loop that drains it.
fn close_session(client: &AsyncClient, session_id: &str) {
    let payload = EndSession {
        session_id: session_id.to_string(),
        text: None,
        custom_data: None,
    };
    let result = serde_json::to_vec(&payload)
        .map_err(|e| e.to_string())
        .and_then(|bytes| {
            client
                .try_publish(END_SESSION_TOPIC, QoS::AtLeastOnce, false, bytes)
                .map_err(|e| e.to_string())
        });
    if let Err(e) = result {
        warn!(session_id, error = %e, "failed to close session");
    }
}

/// Decode an intent message.  Returns `Ok(None)` for non-intent topics.
pub fn parse_intent(topic: &str, payload: &[u8]) -> Result<Option<NluIntent>> {
    if !topic.starts_with(INTENT_TOPIC_PREFIX) {
        return Ok(None);
    }
    let intent = serde_json::from_slice(payload)?;
    Ok(Some(intent))
}
