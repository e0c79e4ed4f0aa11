use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, RwLock};

use dicepit::game::DiceRoller;
use dicepit::websockets::ConnectionManager;

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// Connection manager that records every frame sent to every connection id,
/// so tests can assert on broadcasts without real sockets.
#[derive(Clone)]
pub struct MockConnectionManager {
    sent_messages: Arc<RwLock<HashMap<String, Vec<String>>>>,
}

impl MockConnectionManager {
    pub fn new() -> Self {
        Self {
            sent_messages: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn messages_for(&self, connection_id: &str) -> Vec<String> {
        self.sent_messages
            .read()
            .await
            .get(connection_id)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn clear_messages(&self) {
        self.sent_messages.write().await.clear();
    }
}

#[async_trait]
impl ConnectionManager for MockConnectionManager {
    async fn add_connection(&self, _connection_id: String, _sender: mpsc::UnboundedSender<String>) {
        // The gateway resolves recipients from room membership, so the mock
        // does not need a registry
    }

    async fn remove_connection(&self, _connection_id: &str) {}

    async fn send_to_connection(&self, connection_id: &str, message: &str) {
        self.sent_messages
            .write()
            .await
            .entry(connection_id.to_string())
            .or_default()
            .push(message.to_string());
    }

    async fn send_to_connections(&self, connection_ids: &[String], message: &str) {
        for connection_id in connection_ids {
            self.send_to_connection(connection_id, message).await;
        }
    }
}

/// Dice source fed from a script, so turn flow in tests is deterministic.
/// Panics if a roll happens with no scripted value left.
pub struct ScriptedDice {
    rolls: Mutex<VecDeque<(u8, u8)>>,
}

impl ScriptedDice {
    pub fn new() -> Self {
        Self {
            rolls: Mutex::new(VecDeque::new()),
        }
    }

    pub fn push(&self, dice: (u8, u8)) {
        self.rolls.lock().unwrap().push_back(dice);
    }
}

impl DiceRoller for ScriptedDice {
    fn roll(&self) -> (u8, u8) {
        self.rolls
            .lock()
            .unwrap()
            .pop_front()
            .expect("test rolled dice with no scripted value left")
    }
}
