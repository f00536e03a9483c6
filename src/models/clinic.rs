use serde::Serialize;

use crate::config::AppConfig;

/// Clinic-authored profile interpolated into chat replies and served to the
/// widget's static panels. Everything here is trusted content and may carry
/// markup; user input never flows into this struct.
#[derive(Debug, Clone, Serialize)]
pub struct ClinicProfile {
    pub name: String,
    pub services: Vec<String>,
    pub hours_weekdays: String,
    pub hours_sunday: String,
    pub phone: String,
    pub secondary_phone: String,
    /// Digits-only number the WhatsApp deep link targets.
    pub whatsapp_number: String,
    pub location: String,
    pub doctor: DoctorProfile,
}

#[derive(Debug, Clone, Serialize)]
pub struct DoctorProfile {
    pub name: String,
    pub qualifications: String,
    pub specialization: String,
}

impl Default for ClinicProfile {
    fn default() -> Self {
        ClinicProfile {
            name: "Rain Dental Aesthetic and Implant Centre".to_string(),
            services: [
                "Periodontal Surgical Procedures",
                "Dental Implants",
                "Digital X-ray",
                "Smile Designing",
                "Cosmetic Dentistry",
                "Teeth Replacement",
                "Teeth Cleaning and Polishing",
                "Teeth Whitening",
                "Orthodontics (Braces & Aligners)",
                "Tooth Extraction",
                "Restorative Dentistry",
                "Root Canal Treatment",
                "Emergency Dental Care",
                "Pediatric Dentistry",
                "Oral Surgery",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            hours_weekdays: "Monday-Saturday: 10:00 AM – 1:00 PM & 5:00 PM – 9:00 PM".to_string(),
            hours_sunday: "Sunday: By Appointment Only".to_string(),
            phone: "+91 90040 15693".to_string(),
            secondary_phone: "+91 86690 48892".to_string(),
            whatsapp_number: "8669048892".to_string(),
            location: "Mumbai".to_string(),
            doctor: DoctorProfile {
                name: "Dr. Anjali Jha".to_string(),
                qualifications: "B.D.S | M.D.S".to_string(),
                specialization: "Consultant Periodontist & Oral Implantologist".to_string(),
            },
        }
    }
}

impl ClinicProfile {
    /// Defaults overlaid with whatever the environment configures.
    pub fn from_config(config: &AppConfig) -> Self {
        let mut profile = ClinicProfile::default();
        if let Some(name) = &config.clinic_name {
            profile.name = name.clone();
        }
        if let Some(phone) = &config.clinic_phone {
            profile.phone = phone.clone();
        }
        if let Some(phone) = &config.clinic_secondary_phone {
            profile.secondary_phone = phone.clone();
        }
        if let Some(location) = &config.clinic_location {
            profile.location = location.clone();
        }
        if !config.whatsapp_number.is_empty() {
            profile.whatsapp_number = config.whatsapp_number.clone();
        }
        profile
    }
}
