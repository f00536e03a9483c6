use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::models::AppointmentRequest;

/// Fixed WhatsApp message template. Plain text, not HTML; WhatsApp renders
/// `*bold*` itself, so no escaping is involved here.
pub fn appointment_message(request: &AppointmentRequest) -> String {
    format!(
        "*New Appointment Request*\n\n\
         \u{1F464} *Name:* {}\n\
         \u{1F4DE} *Phone:* {}\n\
         \u{1F4C5} *Date:* {}\n\
         \u{1F550} *Time:* {}\n\
         \u{1F9B7} *Service:* {}\n\
         \u{1F4AC} *Concern:* {}\n\n\
         *Requested via Website Chatbot*",
        request.name, request.phone, request.date, request.time, request.service, request.concern,
    )
}

/// Deep link the widget opens in a new tab. Opening it is fire-and-forget;
/// the dialogue treats it as unconditional success.
pub fn deep_link(whatsapp_number: &str, request: &AppointmentRequest) -> String {
    let message = appointment_message(request);
    let encoded = utf8_percent_encode(&message, NON_ALPHANUMERIC);
    format!("https://wa.me/{whatsapp_number}?text={encoded}")
}
