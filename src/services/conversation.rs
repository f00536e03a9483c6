use std::sync::Arc;

use chrono::{Local, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{BookingState, ClinicProfile, Session};
use crate::services::dialogue;
use crate::services::topics::{self, Topic};
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct Reply {
    pub seq: u64,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatOutcome {
    pub session_id: Uuid,
    pub state: BookingState,
    pub replies: Vec<Reply>,
    pub quick_replies: Vec<String>,
    pub whatsapp_url: Option<String>,
}

/// Run one user message through the session's dialogue or the topic
/// classifier. Turns are serialized per session behind the store lock, so
/// replies can never interleave across turns.
pub fn process_message(
    state: &Arc<AppState>,
    session_id: Option<Uuid>,
    message: &str,
) -> anyhow::Result<ChatOutcome> {
    let now = Utc::now().naive_utc();
    let mut sessions = state.sessions.lock().unwrap();

    // Lazy sweep of abandoned sessions.
    sessions.retain(|_, s| !s.is_expired(now));

    let id = session_id.unwrap_or_else(Uuid::new_v4);
    let session = sessions.entry(id).or_insert_with(|| Session::new(id));

    let trimmed = message.trim();

    // A brand-new session opening with an empty message gets the welcome
    // greeting; the handler rejects empty messages on existing sessions.
    if trimmed.is_empty() {
        let text = welcome(session, &state.clinic);
        let reply = Reply {
            seq: session.next_seq(),
            text,
        };
        session.touch();
        return Ok(ChatOutcome {
            session_id: id,
            state: session.state,
            replies: vec![reply],
            quick_replies: Vec::new(),
            whatsapp_url: None,
        });
    }

    session.record_input(trimmed);

    tracing::info!(
        session = %id,
        state = session.state.as_str(),
        "processing message"
    );

    let today = Local::now().date_naive();
    let clinic = &state.clinic;

    let (texts, quick_replies, whatsapp_url) = if session.state.is_active() {
        run_dialogue(session, trimmed, today, clinic)
    } else {
        match topics::classify(trimmed) {
            Some(Topic::Booking) => {
                session.current_topic = Some(Topic::Booking);
                run_dialogue(session, trimmed, today, clinic)
            }
            Some(topic) => {
                let text = topics::respond(topic, session, clinic);
                session.current_topic = Some(topic);
                (vec![text], Vec::new(), None)
            }
            None => {
                // Service deep-dives only as a follow-up to a services reply.
                let follow_up = (session.current_topic == Some(Topic::Services))
                    .then(|| topics::service_detail(trimmed))
                    .flatten();
                let text = follow_up.unwrap_or_else(|| topics::fallback(session));
                (vec![text], Vec::new(), None)
            }
        }
    };

    session.turn_count += 1;
    session.touch();

    let replies = texts
        .into_iter()
        .map(|text| Reply {
            seq: session.next_seq(),
            text,
        })
        .collect();

    Ok(ChatOutcome {
        session_id: id,
        state: session.state,
        replies,
        quick_replies,
        whatsapp_url,
    })
}

/// Discard a session's state and draft, page-reload semantics. Unknown ids
/// are a no-op.
pub fn reset_session(state: &Arc<AppState>, session_id: Uuid) {
    let mut sessions = state.sessions.lock().unwrap();
    if sessions.remove(&session_id).is_some() {
        tracing::info!(session = %session_id, "session reset");
    }
}

fn run_dialogue(
    session: &mut Session,
    input: &str,
    today: chrono::NaiveDate,
    clinic: &ClinicProfile,
) -> (Vec<String>, Vec<String>, Option<String>) {
    let turn = dialogue::advance(session.state, session.draft.clone(), input, today, clinic);

    // Remember the visitor's name for later personalization; it survives
    // the draft reset on completion or cancellation.
    if let Some(name) = &turn.draft.name {
        session.visitor_name = Some(name.clone());
    }

    if turn.handoff.is_some() {
        tracing::info!(session = %session.id, "booking confirmed, handing off to WhatsApp");
    }

    session.state = turn.state;
    session.draft = turn.draft;
    (turn.replies, turn.quick_replies, turn.handoff)
}

fn welcome(session: &Session, clinic: &ClinicProfile) -> String {
    let variants = [
        format!(
            "Hello! Welcome to {}! \u{1F60A}<br><br>I'm your dental assistant, ready to \
             help you with:<br>\u{2022} Booking appointments<br>\u{2022} Service \
             information<br>\u{2022} Clinic details<br><br>How can I help you today?",
            clinic.name,
        ),
        format!(
            "Hi there! \u{1F44B} I'm here to make your dental care experience smooth and \
             easy.<br><br>What brings you to {} today?",
            clinic.name,
        ),
    ];
    variants[(session.turn_count as usize) % variants.len()].clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn test_state() -> Arc<AppState> {
        Arc::new(AppState::new(AppConfig::default()))
    }

    #[test]
    fn test_new_session_greeting() {
        let state = test_state();
        let outcome = process_message(&state, None, "").unwrap();
        assert_eq!(outcome.state, BookingState::Idle);
        assert_eq!(outcome.replies.len(), 1);
        assert!(outcome.replies[0].text.contains("Welcome"));
    }

    #[test]
    fn test_booking_intent_starts_dialogue() {
        let state = test_state();
        let outcome = process_message(&state, None, "I want to book an appointment").unwrap();
        assert_eq!(outcome.state, BookingState::CollectingName);
        assert!(outcome.replies[0].text.contains("name"));
    }

    #[test]
    fn test_topic_reply_outside_booking() {
        let state = test_state();
        let outcome = process_message(&state, None, "what are your hours?").unwrap();
        assert_eq!(outcome.state, BookingState::Idle);
        assert!(outcome.replies[0].text.contains("Clinic Hours"));
    }

    #[test]
    fn test_session_continuity_and_seq_order() {
        let state = test_state();
        let first = process_message(&state, None, "book appointment").unwrap();
        let id = first.session_id;

        let second = process_message(&state, Some(id), "Jane Doe").unwrap();
        assert_eq!(second.session_id, id);
        assert_eq!(second.state, BookingState::CollectingPhone);
        assert!(second.replies[0].seq > first.replies[0].seq);
    }

    #[test]
    fn test_service_follow_up_needs_services_topic() {
        let state = test_state();
        let first = process_message(&state, None, "what treatments do you offer?").unwrap();
        let id = first.session_id;

        let detail = process_message(&state, Some(id), "root canal?").unwrap();
        assert!(detail.replies[0].text.contains("Root Canal"));
    }

    #[test]
    fn test_reset_discards_draft() {
        let state = test_state();
        let first = process_message(&state, None, "book appointment").unwrap();
        let id = first.session_id;
        process_message(&state, Some(id), "Jane Doe").unwrap();

        reset_session(&state, id);

        let fresh = process_message(&state, Some(id), "book appointment").unwrap();
        assert_eq!(fresh.state, BookingState::CollectingName);
        let sessions = state.sessions.lock().unwrap();
        assert!(sessions.get(&id).unwrap().draft.is_empty());
    }
}
