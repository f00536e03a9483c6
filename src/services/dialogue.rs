use chrono::{Duration, NaiveDate};

use crate::models::{BookingDraft, BookingState, ClinicProfile};
use crate::services::render::escape_html;
use crate::services::{validate, whatsapp};

pub const SERVICE_SUGGESTIONS: &[&str] = &[
    "Root Canal",
    "Dental Implant",
    "Teeth Cleaning",
    "Smile Design",
    "Braces",
];

pub const TIME_SLOT_SUGGESTIONS: &[&str] = &[
    "10:00 AM", "11:00 AM", "5:00 PM", "6:00 PM", "7:00 PM", "8:00 PM",
];

pub const CONCERN_SUGGESTIONS: &[&str] = &[
    "Tooth Pain", "Cleaning", "Cosmetic", "Check-up", "Emergency",
];

/// Result of one dialogue turn. The caller owns the session; it stores the
/// returned state and draft back and delivers the replies in order.
#[derive(Debug, Clone)]
pub struct Turn {
    pub state: BookingState,
    pub draft: BookingDraft,
    pub replies: Vec<String>,
    pub quick_replies: Vec<String>,
    /// WhatsApp deep link, set only when a complete draft was confirmed.
    pub handoff: Option<String>,
}

impl Turn {
    fn new(state: BookingState, draft: BookingDraft) -> Self {
        Turn {
            state,
            draft,
            replies: Vec::new(),
            quick_replies: Vec::new(),
            handoff: None,
        }
    }

    fn reply(mut self, text: impl Into<String>) -> Self {
        self.replies.push(text.into());
        self
    }

    fn suggest(mut self, options: &[&str]) -> Self {
        self.quick_replies = options.iter().map(|s| s.to_string()).collect();
        self
    }
}

/// Advance the booking dialogue by one user input.
///
/// Pure transition function: no session or global state is touched, the new
/// state and draft come back in the `Turn`. Calling this with
/// `BookingState::Idle` starts a fresh booking regardless of the input (the
/// caller routes to it on booking intent). Validation failures never error;
/// they re-prompt and leave state and draft unchanged.
pub fn advance(
    state: BookingState,
    mut draft: BookingDraft,
    input: &str,
    today: NaiveDate,
    clinic: &ClinicProfile,
) -> Turn {
    let trimmed = input.trim();

    // Recognized cancellation wins over per-state validation everywhere.
    if state.is_active() && validate::is_cancellation(trimmed) {
        return cancelled_turn();
    }

    match state {
        BookingState::Idle => Turn::new(BookingState::CollectingName, BookingDraft::default())
            .reply(
                "I'd be happy to help you book an appointment! \u{1F60A}<br><br>\
                 First, let's get your name. What should I call you?",
            ),

        BookingState::CollectingName => {
            if !validate::valid_name(trimmed) {
                return Turn::new(state, draft)
                    .reply("Please enter a valid name (at least 2 characters).");
            }
            draft.name = Some(trimmed.to_string());
            let name = escape_html(trimmed);
            Turn::new(BookingState::CollectingPhone, draft).reply(format!(
                "Nice to meet you, {name}! \u{1F44B}<br><br>\
                 Could you share your phone number? (Include country code if outside India)"
            ))
        }

        BookingState::CollectingPhone => {
            if !validate::valid_phone(trimmed) {
                return Turn::new(state, draft).reply(
                    "Please enter a valid phone number (10-15 digits).<br>\
                     Example: 9876543210 or +91 9876543210",
                );
            }
            draft.phone = Some(trimmed.to_string());
            let tomorrow = today + Duration::days(1);
            Turn::new(BookingState::CollectingDate, draft).reply(format!(
                "Perfect! Which date would you prefer?<br><br>\
                 \u{1F4C5} Please enter in YYYY-MM-DD format<br>Example: {tomorrow}<br><br>\
                 Or you can simply type \"today\" or \"tomorrow\"."
            ))
        }

        BookingState::CollectingDate => {
            let Some(date) = validate::resolve_date(trimmed, today) else {
                let tomorrow = today + Duration::days(1);
                return Turn::new(state, draft).reply(format!(
                    "Please enter a valid future date.<br>Format: YYYY-MM-DD<br>Example: {tomorrow}"
                ));
            };
            draft.date = Some(date.format("%Y-%m-%d").to_string());
            Turn::new(BookingState::CollectingTime, draft)
                .reply(format!(
                    "Great choice! What time works best?<br><br>\
                     \u{1F550} <strong>Our Hours:</strong><br>\u{2022} {}<br>\u{2022} {}<br><br>\
                     Please select or type your preferred time:",
                    clinic.hours_weekdays, clinic.hours_sunday,
                ))
                .suggest(TIME_SLOT_SUGGESTIONS)
        }

        BookingState::CollectingTime => {
            if !validate::valid_time(trimmed) {
                return Turn::new(state, draft)
                    .reply("Please enter time in format: '10:30 AM' or '6:00 PM'");
            }
            draft.time = Some(trimmed.to_string());
            Turn::new(BookingState::CollectingService, draft)
                .reply(
                    "Excellent! What type of dental service do you need?<br><br>\
                     \u{1F9B7} <strong>Popular Services:</strong><br>\
                     \u{2022} General Checkup & Cleaning<br>\
                     \u{2022} Root Canal Treatment<br>\
                     \u{2022} Dental Implants<br>\
                     \u{2022} Cosmetic Dentistry<br>\
                     \u{2022} Orthodontics (Braces)<br>\
                     \u{2022} Emergency Care<br><br>\
                     You can select from above or describe your needs:",
                )
                .suggest(SERVICE_SUGGESTIONS)
        }

        BookingState::CollectingService => {
            if trimmed.is_empty() {
                return Turn::new(state, draft)
                    .reply("Please tell me which service you're looking for.");
            }
            draft.service = Some(trimmed.to_string());
            Turn::new(BookingState::CollectingConcern, draft)
                .reply(
                    "Almost done! Could you briefly describe your main concern or what \
                     brought you to seek dental care?<br><br>\
                     \u{1F4AD} <strong>For example:</strong><br>\
                     \u{2022} \"Tooth pain on left side\"<br>\
                     \u{2022} \"Routine cleaning and checkup\"<br>\
                     \u{2022} \"Want to improve my smile\"",
                )
                .suggest(CONCERN_SUGGESTIONS)
        }

        BookingState::CollectingConcern => {
            if trimmed.is_empty() {
                return Turn::new(state, draft)
                    .reply("Please describe your concern in a few words.");
            }
            draft.concern = Some(trimmed.to_string());
            let summary = summary_text(&draft);
            Turn::new(BookingState::AwaitingConfirmation, draft).reply(summary)
        }

        BookingState::AwaitingConfirmation => {
            if validate::is_affirmative(trimmed) {
                let Some(request) = draft.finalize() else {
                    // Unreachable when the state invariant holds; recover the
                    // same way a missing pending booking does upstream.
                    return cancelled_turn()
                        .reply("I'm sorry, something went wrong. Could we start over?");
                };
                let link = whatsapp::deep_link(&clinic.whatsapp_number, &request);
                let phone = escape_html(&request.phone);
                let mut turn = Turn::new(BookingState::Idle, BookingDraft::default())
                    .reply(
                        "\u{1F389} Perfect! Sending your appointment request...<br><br>\
                         \u{1F4F1} You'll be redirected to WhatsApp to complete your booking \
                         with our team.",
                    )
                    .reply(format!(
                        "\u{2705} Request sent successfully!<br><br>\
                         Our team will confirm your appointment within 2 hours at {phone}.<br><br>\
                         \u{1F4CD} <strong>{}</strong><br>\u{1F4DE} {}<br><br>\
                         Is there anything else I can help you with? \u{1F60A}",
                        clinic.name, clinic.phone,
                    ));
                turn.handoff = Some(link);
                turn
            } else if validate::is_negative(trimmed) {
                cancelled_turn()
            } else {
                Turn::new(state, draft).reply(
                    "Please type 'confirm' to proceed with WhatsApp booking or 'cancel' \
                     to start over.",
                )
            }
        }
    }
}

fn cancelled_turn() -> Turn {
    Turn::new(BookingState::Idle, BookingDraft::default()).reply(
        "No worries! Your booking has been cancelled.<br><br>\
         Feel free to start a new appointment request anytime by saying \
         'book appointment'. \u{1F60A}",
    )
}

fn summary_text(draft: &BookingDraft) -> String {
    let field = |value: &Option<String>| escape_html(value.as_deref().unwrap_or(""));
    let date = draft.date.as_deref().unwrap_or("");
    let pretty_date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%A, %d %B %Y").to_string())
        .unwrap_or_else(|_| date.to_string());

    format!(
        "Please review your appointment details:<br><br>\
         \u{1F4CB} <strong>Appointment Summary</strong><br>\
         \u{1F464} <strong>Name:</strong> {}<br>\
         \u{1F4DE} <strong>Phone:</strong> {}<br>\
         \u{1F4C5} <strong>Date:</strong> {}<br>\
         \u{1F550} <strong>Time:</strong> {}<br>\
         \u{1F9B7} <strong>Service:</strong> {}<br>\
         \u{1F4AC} <strong>Concern:</strong> {}<br><br>\
         \u{2705} Type 'confirm' to send request to WhatsApp<br>\
         \u{274C} Type 'cancel' to start over",
        field(&draft.name),
        field(&draft.phone),
        escape_html(&pretty_date),
        field(&draft.time),
        field(&draft.service),
        field(&draft.concern),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clinic() -> ClinicProfile {
        ClinicProfile::default()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    fn step(state: BookingState, draft: BookingDraft, input: &str) -> Turn {
        advance(state, draft, input, today(), &clinic())
    }

    #[test]
    fn test_start_from_idle() {
        let turn = step(BookingState::Idle, BookingDraft::default(), "book");
        assert_eq!(turn.state, BookingState::CollectingName);
        assert!(turn.draft.is_empty());
        assert!(turn.replies[0].contains("name"));
    }

    #[test]
    fn test_short_name_rejected() {
        let turn = step(BookingState::CollectingName, BookingDraft::default(), " a ");
        assert_eq!(turn.state, BookingState::CollectingName);
        assert!(turn.draft.name.is_none());
        assert!(turn.replies[0].contains("valid name"));
    }

    #[test]
    fn test_name_accepted_and_escaped_in_reply() {
        let turn = step(
            BookingState::CollectingName,
            BookingDraft::default(),
            "<b>Jane</b>",
        );
        assert_eq!(turn.state, BookingState::CollectingPhone);
        assert_eq!(turn.draft.name.as_deref(), Some("<b>Jane</b>"));
        assert!(turn.replies[0].contains("&lt;b&gt;Jane&lt;/b&gt;"));
        assert!(!turn.replies[0].contains("<b>Jane"));
    }

    #[test]
    fn test_bad_phone_keeps_state() {
        let draft = BookingDraft {
            name: Some("Jane".to_string()),
            ..Default::default()
        };
        let turn = step(BookingState::CollectingPhone, draft.clone(), "12345");
        assert_eq!(turn.state, BookingState::CollectingPhone);
        assert_eq!(turn.draft, draft);
    }

    #[test]
    fn test_date_tomorrow_resolved() {
        let draft = BookingDraft {
            name: Some("Jane".to_string()),
            phone: Some("9876543210".to_string()),
            ..Default::default()
        };
        let turn = step(BookingState::CollectingDate, draft, "tomorrow");
        assert_eq!(turn.state, BookingState::CollectingTime);
        assert_eq!(turn.draft.date.as_deref(), Some("2025-06-11"));
        assert_eq!(turn.quick_replies, TIME_SLOT_SUGGESTIONS);
    }

    #[test]
    fn test_past_date_reprompts_with_example() {
        let turn = step(BookingState::CollectingDate, BookingDraft::default(), "2000-01-01");
        assert_eq!(turn.state, BookingState::CollectingDate);
        assert!(turn.draft.date.is_none());
        assert!(turn.replies[0].contains("2025-06-11"), "example is tomorrow");
    }

    #[test]
    fn test_time_validation() {
        let turn = step(BookingState::CollectingTime, BookingDraft::default(), "10:30");
        assert_eq!(turn.state, BookingState::CollectingTime);

        let turn = step(BookingState::CollectingTime, BookingDraft::default(), "13:30 PM");
        assert_eq!(turn.state, BookingState::CollectingTime);

        let turn = step(BookingState::CollectingTime, BookingDraft::default(), "10:30 AM");
        assert_eq!(turn.state, BookingState::CollectingService);
        assert_eq!(turn.quick_replies, SERVICE_SUGGESTIONS);
    }

    #[test]
    fn test_cancel_mid_flow_clears_draft() {
        let draft = BookingDraft {
            name: Some("Jane".to_string()),
            phone: Some("9876543210".to_string()),
            ..Default::default()
        };
        let turn = step(BookingState::CollectingDate, draft, "cancel");
        assert_eq!(turn.state, BookingState::Idle);
        assert!(turn.draft.is_empty());
        assert!(turn.replies[0].contains("cancelled"));
    }

    #[test]
    fn test_unrecognized_confirmation_token_keeps_state() {
        let draft = full_draft();
        let turn = step(BookingState::AwaitingConfirmation, draft.clone(), "maybe");
        assert_eq!(turn.state, BookingState::AwaitingConfirmation);
        assert_eq!(turn.draft, draft);
        assert!(turn.handoff.is_none());
        assert!(turn.replies[0].contains("'confirm'"));
    }

    #[test]
    fn test_confirmation_hands_off_and_resets() {
        let turn = step(BookingState::AwaitingConfirmation, full_draft(), "confirm");
        assert_eq!(turn.state, BookingState::Idle);
        assert!(turn.draft.is_empty());
        let link = turn.handoff.expect("deep link on confirm");
        assert!(link.starts_with("https://wa.me/8669048892?text="));
        assert!(link.contains("Jane%20Doe"));
        assert_eq!(turn.replies.len(), 2);
    }

    #[test]
    fn test_decline_at_confirmation_resets() {
        let turn = step(BookingState::AwaitingConfirmation, full_draft(), "no");
        assert_eq!(turn.state, BookingState::Idle);
        assert!(turn.draft.is_empty());
        assert!(turn.handoff.is_none());
    }

    #[test]
    fn test_full_happy_path() {
        let clinic = clinic();
        let mut state = BookingState::Idle;
        let mut draft = BookingDraft::default();
        let inputs = [
            "book",
            "Jane Doe",
            "9876543210",
            "tomorrow",
            "10:00 AM",
            "Cleaning",
            "Routine checkup",
        ];
        for input in inputs {
            let turn = advance(state, draft, input, today(), &clinic);
            state = turn.state;
            draft = turn.draft;
        }
        assert_eq!(state, BookingState::AwaitingConfirmation);
        assert!(draft.finalize().is_some());

        let turn = advance(state, draft, "confirm", today(), &clinic);
        assert_eq!(turn.state, BookingState::Idle);
        let link = turn.handoff.unwrap();
        for fragment in ["Jane%20Doe", "9876543210", "2025%2D06%2D11", "Cleaning", "Routine%20checkup"] {
            assert!(link.contains(fragment), "missing {fragment} in {link}");
        }
    }

    fn full_draft() -> BookingDraft {
        BookingDraft {
            name: Some("Jane Doe".to_string()),
            phone: Some("9876543210".to_string()),
            date: Some("2025-06-11".to_string()),
            time: Some("10:00 AM".to_string()),
            service: Some("Cleaning".to_string()),
            concern: Some("Routine checkup".to_string()),
        }
    }
}
