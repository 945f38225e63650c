#[cfg(test)]
#[path = "model_discovery_test.rs"]
mod tests;

use crate::domain::models::DEFAULT_LISTING_MODEL;

const VISION_MARKERS: [&str; 4] = ["scout", "maverick", "llava", "vision"];
const LISTING_MARKER: &str = "compound-beta";

pub fn is_vision_model(model: &str) -> bool {
    let model = model.to_lowercase();
    return VISION_MARKERS.iter().any(|e| return model.contains(e));
}

pub fn vision_models(models: &[String]) -> Vec<String> {
    return models
        .iter()
        .filter(|e| return is_vision_model(e))
        .cloned()
        .collect();
}

/// Keeps the current vision model when the account still offers it,
/// otherwise falls back to the first vision capable one.
pub fn pick_vision_model(current: Option<&str>, models: &[String]) -> Option<String> {
    let vision = vision_models(models);
    if let Some(current) = current {
        if vision.iter().any(|e| return e == current) {
            return Some(current.to_string());
        }
    }

    return vision.first().cloned();
}

/// Keeps a configured listing model the account offers, otherwise prefers
/// the first compound-beta model.
pub fn pick_listing_model(configured: Option<&str>, models: &[String]) -> String {
    if let Some(configured) = configured {
        if models.iter().any(|e| return e == configured) {
            return configured.to_string();
        }
    }

    if let Some(model) = models
        .iter()
        .find(|e| return e.to_lowercase().contains(LISTING_MARKER))
    {
        return model.to_string();
    }

    return DEFAULT_LISTING_MODEL.to_string();
}

/// Resolves a vision model from a name or a 1 based index into the vision
/// capable models.
pub fn resolve_vision_model(text: &str, models: &[String]) -> Option<String> {
    let text = text.trim();
    let vision = vision_models(models);

    if let Ok(idx) = text.parse::<usize>() {
        if idx == 0 {
            return None;
        }
        return vision.get(idx - 1).cloned();
    }

    return vision.into_iter().find(|e| return e == text);
}

/// Numbered list with vision capable models marked.
pub fn format_model_list(models: &[String]) -> String {
    return models
        .iter()
        .enumerate()
        .map(|(idx, model)| {
            let n = idx + 1;
            if is_vision_model(model) {
                return format!("- ({n}) {model} [vision]");
            }
            return format!("- ({n}) {model}");
        })
        .collect::<Vec<String>>()
        .join("\n");
}
