use std::env;

#[derive(Clone, Debug, Default)]
pub struct AppConfig {
    pub port: u16,
    pub whatsapp_number: String,
    pub clinic_name: Option<String>,
    pub clinic_phone: Option<String>,
    pub clinic_secondary_phone: Option<String>,
    pub clinic_location: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            whatsapp_number: env::var("WHATSAPP_NUMBER").unwrap_or_default(),
            clinic_name: env::var("CLINIC_NAME").ok(),
            clinic_phone: env::var("CLINIC_PHONE").ok(),
            clinic_secondary_phone: env::var("CLINIC_SECONDARY_PHONE").ok(),
            clinic_location: env::var("CLINIC_LOCATION").ok(),
        }
    }
}
