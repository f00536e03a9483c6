use std::collections::VecDeque;

use chrono::{Duration, NaiveDateTime, Utc};
use uuid::Uuid;

use super::booking::{BookingDraft, BookingState};
use crate::services::topics::Topic;

/// Rolling window of recent user inputs kept per session. Display and
/// logging only; never consulted by the dialogue itself.
pub const RECENT_INPUT_WINDOW: usize = 10;

/// Sessions idle longer than this are swept on the next store access.
pub const SESSION_TTL_MINUTES: i64 = 30;

/// One visitor's chat session. State and draft live here and nowhere else;
/// the dialogue transition function takes them in and hands them back.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub state: BookingState,
    pub draft: BookingDraft,
    /// Name remembered from a completed name step, used to personalize
    /// later greetings. Survives booking resets.
    pub visitor_name: Option<String>,
    pub current_topic: Option<Topic>,
    pub recent_inputs: VecDeque<String>,
    pub turn_count: u64,
    reply_seq: u64,
    pub last_activity: NaiveDateTime,
    pub expires_at: NaiveDateTime,
}

impl Session {
    pub fn new(id: Uuid) -> Self {
        let now = Utc::now().naive_utc();
        Session {
            id,
            state: BookingState::Idle,
            draft: BookingDraft::default(),
            visitor_name: None,
            current_topic: None,
            recent_inputs: VecDeque::with_capacity(RECENT_INPUT_WINDOW),
            turn_count: 0,
            reply_seq: 0,
            last_activity: now,
            expires_at: now + Duration::minutes(SESSION_TTL_MINUTES),
        }
    }

    pub fn record_input(&mut self, input: &str) {
        self.recent_inputs.push_back(input.to_string());
        while self.recent_inputs.len() > RECENT_INPUT_WINDOW {
            self.recent_inputs.pop_front();
        }
    }

    pub fn touch(&mut self) {
        let now = Utc::now().naive_utc();
        self.last_activity = now;
        self.expires_at = now + Duration::minutes(SESSION_TTL_MINUTES);
    }

    pub fn is_expired(&self, now: NaiveDateTime) -> bool {
        now > self.expires_at
    }

    /// Monotonic per-session counter stamped on each outgoing reply so the
    /// widget can always render replies in turn order.
    pub fn next_seq(&mut self) -> u64 {
        self.reply_seq += 1;
        self.reply_seq
    }
}
