use std::path;

use super::GatewayRequest;
use super::Message;

/// Work a transition asks the driver to carry out on its behalf.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    Call(GatewayRequest),
    Notify(Message),
    Export {
        path: Option<path::PathBuf>,
        csv: String,
    },
    Copy(String),
}
