use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

/// The rewrites offered for a marketplace post.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum RefineIntent {
    Persuasive,
    Urgent,
    Concise,
}

impl RefineIntent {
    pub fn parse(text: &str) -> Option<RefineIntent> {
        let text = text.trim().to_lowercase();
        return RefineIntent::iter().find(|e| return e.to_string() == text);
    }

    pub fn instruction(&self) -> &'static str {
        match self {
            RefineIntent::Persuasive => {
                return "Rewrite this selling post to be more persuasive and engaging:";
            }
            RefineIntent::Urgent => {
                return "Rewrite this selling post to add urgency and encourage quick action:";
            }
            RefineIntent::Concise => {
                return "Rewrite this selling post to be concise and to the point:";
            }
        }
    }
}
