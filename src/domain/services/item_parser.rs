#[cfg(test)]
#[path = "item_parser_test.rs"]
mod tests;

/// Instruction sent with every photo. The reply format it asks for is what
/// `parse_items` expects, though the parser accepts far looser text.
pub const ITEM_ANALYSIS_PROMPT: &str = "You are an expert at identifying items for online resale. \
Carefully analyze the image and reason step-by-step about what each distinct, complete, and sellable item is. \
For each object, consider its shape, color, size, visible logos, text, context, and any clues from the scene. \
Infer likely category, brand, model, and condition if possible. \
If multiple items are similar, group them as a set (e.g., 'set of 4 matching dinner plates'). \
Ignore background, packaging, or partial/fragmented objects. \
If you are unsure, explain your reasoning and make your best guess. \
Return a numbered list, one item per line, with a short, clear description for each (e.g., '1. Nike Air Max sneakers, men's size 10, gently used'). \
If you cannot confidently identify an item, state what you see and your reasoning.";

pub fn is_error_text(text: &str) -> bool {
    return text.trim_start().to_lowercase().starts_with("error");
}

/// True when a description reply cannot yield any items at all.
pub fn is_unusable_description(text: &str) -> bool {
    return text.trim().is_empty() || is_error_text(text);
}

fn strip_list_marker(line: &str) -> String {
    let mut text = line.trim_matches(|c: char| return c == '-' || c.is_whitespace());

    for bullet in ["* ", "• "] {
        if let Some(rest) = text.strip_prefix(bullet) {
            text = rest.trim_start();
        }
    }

    let digits = text.chars().take_while(|c| return c.is_ascii_digit()).count();
    if digits > 0 {
        let rest = &text[digits..];
        if let Some(after) = rest.strip_prefix('.').or_else(|| return rest.strip_prefix(')')) {
            if after.starts_with(char::is_whitespace) {
                text = after;
            }
        }
    }

    return text.trim().to_string();
}

/// Turns a free text item list into item descriptions, one per line. Blank
/// lines and lines that read as errors are dropped; anything else is kept
/// without judging whether it looks like an item.
pub fn parse_items(text: &str) -> Vec<String> {
    return text
        .lines()
        .filter(|line| return !line.trim().is_empty())
        .filter(|line| return !is_error_text(line))
        .map(strip_list_marker)
        .filter(|item| return !item.is_empty())
        .collect();
}
