pub mod booking;
pub mod clinic;
pub mod conversation;

pub use booking::{AppointmentRequest, BookingDraft, BookingState};
pub use clinic::{ClinicProfile, DoctorProfile};
pub use conversation::{Session, RECENT_INPUT_WINDOW, SESSION_TTL_MINUTES};
