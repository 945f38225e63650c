#[cfg(test)]
#[path = "listings_test.rs"]
mod tests;

use crate::domain::models::ChatMessage;
use crate::domain::models::ListingStyle;

fn researched_instruction(columns: &[String], with_selling_points: bool) -> String {
    let mut steps = vec![
        "1. Carefully reason about the image description to clarify what each item is, its likely condition, and any unique or notable features.",
        "2. Use web search and your knowledge to determine the most accurate and up-to-date secondhand/marketplace value for each item (not new retail).",
        "3. Generate a catchy, creative, and highly marketable title.",
        "4. Write a vivid, persuasive description that highlights unique features, benefits, and likely buyer interests.",
        "5. Suggest a realistic price in USD, based on your research.",
    ];
    if with_selling_points {
        steps.push("6. If possible, include a short bullet list of selling points.");
    }

    return format!(
        "You are a professional online seller and expert product researcher. Given the following detailed image description and a list of items to sell, do the following for each item: {}\nReturn the results as a markdown table with columns: {}.\nIf you need to clarify what the item is, use the detailed image description below.\nYou may use web search, recent pricing data, and your own knowledge.\n",
        steps.join("\n"),
        columns.join(", ")
    );
}

fn quick_instruction(columns: &[String]) -> String {
    return format!(
        "You are a professional online seller. Given the following detailed image description and a list of items to sell, generate a catchy, creative, and highly marketable title, a vivid and persuasive description that highlights unique features and benefits, and a realistic suggested price in USD (based on typical secondhand/marketplace value, not new retail). Make the listing sound exciting and appealing to buyers. Use strong, positive language and avoid repetition. Return the results as a markdown table with columns: {}.\n",
        columns.join(", ")
    );
}

/// Builds the single prompt that asks for a markdown listing table covering
/// every selected item, in selection order.
pub fn listing_prompt(style: &ListingStyle, description: &str, items: &[String]) -> String {
    let columns = style.columns();
    let instruction = match style {
        ListingStyle::Researched => researched_instruction(&columns, true),
        ListingStyle::Quick => quick_instruction(&columns),
        ListingStyle::Columns(_) => researched_instruction(&columns, false),
    };

    return format!(
        "{instruction}\nImage description: {description}\n\nList: {}",
        items.join("\n")
    );
}

pub fn listing_messages(style: &ListingStyle, description: &str, items: &[String]) -> Vec<ChatMessage> {
    return vec![ChatMessage::user(&listing_prompt(style, description, items))];
}
