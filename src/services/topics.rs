use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::models::{ClinicProfile, Session};
use crate::services::render::escape_html;

/// Informational topics handled outside an active booking. First matching
/// pattern wins, evaluated in the order of `PATTERNS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Greeting,
    Booking,
    Location,
    Services,
    Pain,
    Cost,
    Hours,
    Contact,
    Doctor,
    Help,
    Thanks,
    Goodbye,
}

static PATTERNS: LazyLock<Vec<(Topic, Regex)>> = LazyLock::new(|| {
    let table: &[(Topic, &str)] = &[
        (
            Topic::Greeting,
            r"(?i)\b(hi|hello|hey|good\s+(morning|afternoon|evening)|greetings|namaste)\b",
        ),
        (
            Topic::Booking,
            r"(?i)\b(book|schedule|appointment|visit|reserve|appoint)\b",
        ),
        (
            Topic::Location,
            r"(?i)\b(location|address|where|direction|how\s+to\s+reach|map|navigate)\b",
        ),
        (
            Topic::Services,
            r"(?i)\b(service|treatment|procedure|what\s+do\s+you\s+(do|offer)|dental\s+work|treatments)\b",
        ),
        (
            Topic::Pain,
            r"(?i)\b(pain|hurt|ache|sore|emergency|urgent|swelling|bleeding)\b",
        ),
        (
            Topic::Cost,
            r"(?i)\b(cost|price|fee|charge|expensive|affordable|how\s+much|rates)\b",
        ),
        (
            Topic::Hours,
            r"(?i)\b(hours|timing|time|open|close|when\s+are\s+you)\b",
        ),
        (
            Topic::Contact,
            r"(?i)\b(contact|phone|call|number|reach\s+you|whatsapp)\b",
        ),
        (
            Topic::Doctor,
            r"(?i)\b(doctor|dentist|specialist|who\s+is|dr\.?|physician)\b",
        ),
        (
            Topic::Help,
            r"(?i)\b(help|assist|support|guide|what\s+can\s+you\s+do)\b",
        ),
        (Topic::Thanks, r"(?i)\b(thank|thanks|appreciate|grateful)\b"),
        (
            Topic::Goodbye,
            r"(?i)\b(bye|goodbye|see\s+you|take\s+care|exit|quit)\b",
        ),
    ];
    table
        .iter()
        .map(|(topic, pattern)| (*topic, Regex::new(pattern).expect("valid topic regex")))
        .collect()
});

pub fn classify(input: &str) -> Option<Topic> {
    PATTERNS
        .iter()
        .find(|(_, re)| re.is_match(input))
        .map(|(topic, _)| *topic)
}

/// Canned reply for a classified topic. Where the original rotated random
/// variants, variants here rotate on the session's turn counter so replies
/// stay deterministic.
pub fn respond(topic: Topic, session: &Session, clinic: &ClinicProfile) -> String {
    let name_suffix = session
        .visitor_name
        .as_deref()
        .map(|n| format!(", {}", escape_html(n)))
        .unwrap_or_default();

    match topic {
        Topic::Greeting => {
            let variants = [
                format!(
                    "Hello{name_suffix}! Welcome to {}! \u{1F60A}<br><br>I'm your dental \
                     assistant, ready to help with appointments, service info, and any \
                     questions about your oral health.",
                    clinic.name,
                ),
                format!(
                    "Hi there{name_suffix}! \u{1F44B} {} and our team are excited to help \
                     you achieve your perfect smile!<br><br>How can I assist you today?",
                    clinic.doctor.name,
                ),
            ];
            pick(&variants, session)
        }

        // Booking intent is routed to the dialogue before reaching here;
        // this text covers direct calls only.
        Topic::Booking => "Let's get you booked in! Say 'book appointment' to begin.".to_string(),

        Topic::Location => format!(
            "\u{1F4CD} <strong>Our Location</strong><br><br>\
             We're in {}.<br><br>\
             \u{1F4CD} <strong>{}</strong><br>\u{1F4DE} {}",
            clinic.location, clinic.name, clinic.phone,
        ),

        Topic::Services => format!(
            "We offer comprehensive dental care!<br><br>\
             \u{1F9B7} <strong>Our Specialties:</strong><br>\u{2022} {}<br><br>\
             Which service interests you most? \u{1F60A}",
            clinic.services.join("<br>\u{2022} "),
        ),

        Topic::Pain => format!(
            "I understand dental pain can be really uncomfortable! \u{1F61F} \
             {} specializes in emergency care and pain management.<br><br>\
             \u{1F6A8} <strong>Immediate Actions:</strong><br>\
             \u{2022} Call us now: {}<br>\
             \u{2022} WhatsApp: {}<br>\
             \u{2022} We accommodate same-day emergencies<br><br>\
             \u{1F691} <strong>Need an urgent appointment?</strong> I can help you book \
             immediately!",
            clinic.doctor.name, clinic.phone, clinic.whatsapp_number,
        ),

        Topic::Cost => {
            "We believe in transparent pricing! \u{1F4B0}<br><br>\
             \u{2022} Consultation: affordable initial assessment<br>\
             \u{2022} Treatment plans: detailed cost breakdown<br>\
             \u{2022} Payment options: flexible installments<br>\
             \u{2022} Insurance: most plans accepted<br><br>\
             For accurate pricing, book a consultation where the doctor will assess \
             your needs! \u{1F4DE}"
                .to_string()
        }

        Topic::Hours => format!(
            "\u{23F0} <strong>Clinic Hours</strong><br><br>\
             \u{1F4C5} {}<br>\u{1F4C5} {}<br><br>\
             Ready to schedule your visit? \u{1F4F1}",
            clinic.hours_weekdays, clinic.hours_sunday,
        ),

        Topic::Contact => format!(
            "\u{1F4DE} <strong>Get In Touch</strong><br><br>\
             \u{260E} <strong>Phone Numbers:</strong><br>\
             \u{2022} Primary: {}<br>\u{2022} Secondary: {}<br><br>\
             \u{1F4F1} <strong>WhatsApp:</strong> {}<br>\
             \u{1F4CD} <strong>Location:</strong> {}<br><br>\
             \u{1F4AC} Or continue chatting here - I can help book appointments instantly! \
             \u{1F60A}",
            clinic.phone, clinic.secondary_phone, clinic.whatsapp_number, clinic.location,
        ),

        Topic::Doctor => format!(
            "\u{1F469}\u{200D}\u{2695}\u{FE0F} <strong>Meet {}</strong><br><br>\
             \u{1F393} <strong>Qualifications:</strong> {}<br>\
             \u{1F9B7} <strong>Specialization:</strong> {}<br><br>\
             Ready to experience expert dental care? \u{1F4C5}",
            clinic.doctor.name, clinic.doctor.qualifications, clinic.doctor.specialization,
        ),

        Topic::Help => {
            "\u{1F916} <strong>I'm here to help!</strong><br><br>\
             \u{1F4AC} <strong>What I can do:</strong><br>\
             \u{2022} Book appointments instantly<br>\
             \u{2022} Answer service questions<br>\
             \u{2022} Provide clinic information<br>\
             \u{2022} Handle emergency queries<br><br>\
             \u{1F5E3} <strong>Try saying:</strong><br>\
             \u{2022} \"Book appointment\"<br>\
             \u{2022} \"What services do you offer?\"<br>\
             \u{2022} \"I have tooth pain\"<br>\
             \u{2022} \"Contact information\"<br><br>\
             What would you like to explore? \u{1F60A}"
                .to_string()
        }

        Topic::Thanks => {
            let variants = [
                "You're absolutely welcome! \u{1F60A} Your oral health is our priority. \
                 Feel free to ask anything else!"
                    .to_string(),
                "My pleasure! \u{1F9B7} Remember, I'm here 24/7 for any dental questions \
                 or appointment bookings!"
                    .to_string(),
            ];
            pick(&variants, session)
        }

        Topic::Goodbye => format!(
            "Take care{name_suffix}! \u{1F44B} Thank you for choosing {}.<br><br>\
             Emergency support: {}<br><br>\
             Wishing you a healthy, beautiful smile! \u{1F60A}\u{1F9B7}\u{2728}",
            clinic.name, clinic.phone,
        ),
    }
}

/// Service deep-dives offered when the visitor keeps asking after a services
/// reply. Keyword containment on the lowercased input, as a follow-up only.
pub fn service_detail(input: &str) -> Option<String> {
    let lowered = input.to_lowercase();
    let detail = if lowered.contains("root canal") {
        "\u{1F9B7} <strong>Root Canal Excellence</strong><br><br>\
         We use advanced rotary endodontics:<br>\
         \u{2022} Single-visit procedures when possible<br>\
         \u{2022} Microscopic precision<br>\
         \u{2022} Virtually painless treatment<br><br>\
         Ready to book? \u{1F4F1}"
    } else if lowered.contains("implant") {
        "\u{1F527} <strong>Dental Implants</strong><br><br>\
         Transform your smile with our implant expertise:<br>\
         \u{2022} Titanium implants for permanence<br>\
         \u{2022} Computer-guided placement<br>\
         \u{2022} Natural-looking results<br><br>\
         Interested in a consultation? \u{1F4C5}"
    } else if lowered.contains("whitening") {
        "\u{2728} <strong>Teeth Whitening</strong><br><br>\
         Brighten your smile safely:<br>\
         \u{2022} Professional-grade whitening<br>\
         \u{2022} Immediate results<br>\
         \u{2022} Long-lasting effects<br><br>\
         Book your transformation! \u{1F4DE}"
    } else {
        return None;
    };
    Some(detail.to_string())
}

/// Fallback when no topic matches.
pub fn fallback(session: &Session) -> String {
    let variants = [
        "I understand you're looking for specific information! \u{1F914}<br><br>\
         \u{1F3AF} <strong>I can help with:</strong><br>\
         \u{2022} Appointment booking (\"book appointment\")<br>\
         \u{2022} Service details (\"what services?\")<br>\
         \u{2022} Location & directions (\"where are you?\")<br>\
         \u{2022} Emergency care (\"tooth pain\")<br><br>\
         What specific information would you like? \u{1F60A}"
            .to_string(),
        "Let me guide you to the right information! \u{1F5FA}<br><br>\
         \u{1F50D} <strong>Popular queries:</strong><br>\
         \u{2022} \"Book appointment\" - instant booking<br>\
         \u{2022} \"Services\" - treatment options<br>\
         \u{2022} \"Cost\" - pricing information<br>\
         \u{2022} \"Emergency\" - urgent care info<br><br>\
         Just type what you need! \u{1F4AC}"
            .to_string(),
    ];
    pick(&variants, session)
}

fn pick(variants: &[String], session: &Session) -> String {
    variants[(session.turn_count as usize) % variants.len()].clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_classify_priority_order() {
        // "hi, I'd like to book" matches greeting before booking.
        assert_eq!(classify("hi, I'd like to book"), Some(Topic::Greeting));
        assert_eq!(classify("I'd like to book a visit"), Some(Topic::Booking));
        assert_eq!(classify("what are your hours?"), Some(Topic::Hours));
        assert_eq!(classify("how much does a filling cost"), Some(Topic::Cost));
        assert_eq!(classify("I have tooth pain"), Some(Topic::Pain));
        assert_eq!(classify("where are you located"), Some(Topic::Location));
        assert_eq!(classify("who is the doctor"), Some(Topic::Doctor));
        assert_eq!(classify("thanks"), Some(Topic::Thanks));
        assert_eq!(classify("bye"), Some(Topic::Goodbye));
        assert_eq!(classify("qwerty"), None);
    }

    #[test]
    fn test_schedule_is_booking_intent() {
        // "schedule" appears in both booking and hours vocabularies; booking
        // has priority.
        assert_eq!(classify("can I schedule something"), Some(Topic::Booking));
    }

    #[test]
    fn test_visitor_name_is_escaped_in_greeting() {
        let mut session = Session::new(Uuid::new_v4());
        session.visitor_name = Some("<script>x</script>".to_string());
        let reply = respond(Topic::Greeting, &session, &ClinicProfile::default());
        assert!(reply.contains("&lt;script&gt;"));
        assert!(!reply.contains("<script>"));
    }

    #[test]
    fn test_variants_rotate_deterministically() {
        let mut session = Session::new(Uuid::new_v4());
        let clinic = ClinicProfile::default();
        let first = respond(Topic::Thanks, &session, &clinic);
        session.turn_count += 1;
        let second = respond(Topic::Thanks, &session, &clinic);
        assert_ne!(first, second);
        session.turn_count += 1;
        assert_eq!(respond(Topic::Thanks, &session, &clinic), first);
    }

    #[test]
    fn test_service_detail_keywords() {
        assert!(service_detail("tell me about root canal").is_some());
        assert!(service_detail("IMPLANT options?").is_some());
        assert!(service_detail("teeth whitening").is_some());
        assert!(service_detail("braces").is_none());
    }
}
