use serde::{Deserialize, Serialize};

/// Step of the appointment-booking dialogue. `Idle` is both the initial
/// state and the state after completion or cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingState {
    Idle,
    CollectingName,
    CollectingPhone,
    CollectingDate,
    CollectingTime,
    CollectingService,
    CollectingConcern,
    AwaitingConfirmation,
}

impl BookingState {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingState::Idle => "idle",
            BookingState::CollectingName => "collecting_name",
            BookingState::CollectingPhone => "collecting_phone",
            BookingState::CollectingDate => "collecting_date",
            BookingState::CollectingTime => "collecting_time",
            BookingState::CollectingService => "collecting_service",
            BookingState::CollectingConcern => "collecting_concern",
            BookingState::AwaitingConfirmation => "awaiting_confirmation",
        }
    }

    /// True while a booking conversation is in progress.
    pub fn is_active(&self) -> bool {
        !matches!(self, BookingState::Idle)
    }
}

/// The in-progress appointment request. A field is set only once the
/// corresponding collection state accepted a validated input; the whole
/// draft is cleared on every reset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingDraft {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub service: Option<String>,
    pub concern: Option<String>,
}

/// A fully collected appointment request, ready to hand off. Obtainable
/// only from a draft with all six fields set, so a partial draft can never
/// be transmitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppointmentRequest {
    pub name: String,
    pub phone: String,
    pub date: String,
    pub time: String,
    pub service: String,
    pub concern: String,
}

impl BookingDraft {
    pub fn clear(&mut self) {
        *self = BookingDraft::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == BookingDraft::default()
    }

    pub fn finalize(&self) -> Option<AppointmentRequest> {
        Some(AppointmentRequest {
            name: self.name.clone()?,
            phone: self.phone.clone()?,
            date: self.date.clone()?,
            time: self.time.clone()?,
            service: self.service.clone()?,
            concern: self.concern.clone()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finalize_requires_all_fields() {
        let mut draft = BookingDraft::default();
        assert!(draft.finalize().is_none());

        draft.name = Some("Jane".to_string());
        draft.phone = Some("9876543210".to_string());
        draft.date = Some("2099-01-01".to_string());
        draft.time = Some("10:00 AM".to_string());
        draft.service = Some("Cleaning".to_string());
        assert!(draft.finalize().is_none(), "concern still missing");

        draft.concern = Some("Routine checkup".to_string());
        let req = draft.finalize().unwrap();
        assert_eq!(req.name, "Jane");
        assert_eq!(req.concern, "Routine checkup");
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut draft = BookingDraft {
            name: Some("Jane".to_string()),
            ..Default::default()
        };
        draft.clear();
        assert!(draft.is_empty());
    }
}
