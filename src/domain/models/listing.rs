#[cfg(test)]
#[path = "listing_test.rs"]
mod tests;

pub const LISTING_STYLE_PRESETS: [&str; 2] = ["researched", "quick"];

/// Decides both the instruction given to the listing model and the columns
/// of the markdown table it is asked to return.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListingStyle {
    /// Researches resale value step by step and adds selling points.
    Researched,
    /// Title, description and price only.
    Quick,
    /// Researched instruction with a caller supplied column set.
    Columns(Vec<String>),
}

impl Default for ListingStyle {
    fn default() -> ListingStyle {
        return ListingStyle::Researched;
    }
}

impl ListingStyle {
    /// Accepts a preset name or a comma separated column list such as
    /// `Item, Title, Price`.
    pub fn parse(text: &str) -> Option<ListingStyle> {
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("researched") {
            return Some(ListingStyle::Researched);
        }
        if trimmed.eq_ignore_ascii_case("quick") {
            return Some(ListingStyle::Quick);
        }
        if !trimmed.contains(',') {
            return None;
        }

        let columns = trimmed
            .split(',')
            .map(|e| return e.trim().to_string())
            .filter(|e| return !e.is_empty())
            .collect::<Vec<String>>();

        if columns.is_empty() {
            return None;
        }

        return Some(ListingStyle::Columns(columns));
    }

    pub fn columns(&self) -> Vec<String> {
        let columns: Vec<&str> = match self {
            ListingStyle::Researched => vec![
                "Item",
                "Title",
                "Description",
                "Suggested Price",
                "Selling Points",
            ],
            ListingStyle::Quick => vec!["Item", "Title", "Description", "Suggested Price"],
            ListingStyle::Columns(columns) => {
                return columns.clone();
            }
        };

        return columns.iter().map(|e| return e.to_string()).collect();
    }
}
