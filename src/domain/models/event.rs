use super::Message;
use super::Session;

#[derive(Debug)]
pub enum Event {
    Notice(Message),
    Waiting(String),
    /// Sent once an action and every call it caused have finished.
    Ready(Box<Session>),
}
