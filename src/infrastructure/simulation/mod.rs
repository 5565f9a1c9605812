//! Simulated integrations
//!
//! Telephony and site generation are demo features: they return
//! deterministic-shape payloads labeled `"simulated": true` and never leave
//! the process.

use rand::Rng;
use serde_json::{json, Value};

use crate::domain::workflow::{PhoneCallConfig, SiteGenerateConfig};

const CALL_ID_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const CALL_ID_LENGTH: usize = 9;

pub const DEFAULT_CALL_MESSAGE: &str = "Automated call from Zen Automator";

/// Generate a short call identifier, e.g. `call_x7k2m9q1a`
pub fn call_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..CALL_ID_LENGTH)
        .map(|_| CALL_ID_CHARSET[rng.gen_range(0..CALL_ID_CHARSET.len())] as char)
        .collect();
    format!("call_{}", suffix)
}

/// Simulated phone call analysis, used by `phone_call` workflow steps
pub fn phone_call_analysis(config: &PhoneCallConfig) -> Value {
    json!({
        "success": true,
        "message": "Phone call analysis simulated",
        "phone_number": config.phone_number,
        "analysis": "Call quality: Good, Duration: 5:23",
        "simulated": true,
    })
}

/// Simulated outbound call initiation, used by the bot's phone commands
pub fn initiate_phone_call(to: &str, from: &str, message: Option<&str>) -> Value {
    json!({
        "call_id": call_id(),
        "to": to,
        "from": from,
        "message": message.unwrap_or(DEFAULT_CALL_MESSAGE),
        "status": "initiated",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "simulated": true,
    })
}

/// Simulated website generation, used by `site_generate` workflow steps
pub fn site_generation(config: &SiteGenerateConfig) -> Value {
    let domain = config.domain.as_deref().unwrap_or("generated-site.com");
    let template = config.template.as_deref().unwrap_or("modern");

    json!({
        "success": true,
        "message": "Website generation simulated",
        "url": format!("https://{}", domain),
        "template": template,
        "simulated": true,
    })
}
