use std::path;

use super::GatewayReply;
use super::ImageUpload;
use super::ListingStyle;
use super::RefineIntent;

/// Everything that can move the workflow: requests from the person using
/// the assistant, and replies to gateway calls the workflow asked for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    SetApiKey(String),
    /// Echoes the loaded API key back in masked form.
    ConfirmApiKey(),
    DiscoverModels(),
    /// Vision model name, or its 1 based position among vision models.
    SetVisionModel(String),
    ProcessImage(ImageUpload),
    /// Zero based positions in the detected item list.
    SelectItems(Vec<usize>),
    GenerateListing(Option<ListingStyle>),
    CopyListing(),
    ExportListing(Option<path::PathBuf>),
    RefinePost(RefineIntent),
    SendChat(String),
    RegenerateChat(),
    ClearChat(),
    ShowStatus(),
    GatewayReply(GatewayReply),
}
