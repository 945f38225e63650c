pub mod groq;

use crate::domain::models::GatewayBox;

pub struct GatewayManager {}

impl GatewayManager {
    pub fn get(url: &str, token: &str) -> GatewayBox {
        return Box::new(groq::Groq::new(url, token));
    }
}
