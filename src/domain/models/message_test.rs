use super::Author;
use super::Message;
use super::MessageType;

#[test]
fn it_executes_new() {
    let msg = Message::new(Author::ListGenie, "Hi there!");
    assert_eq!(msg.author, Author::ListGenie);
    assert_eq!(msg.author.to_string(), "ListGenie");
    assert_eq!(msg.text, "Hi there!".to_string());
    assert_eq!(msg.mtype, MessageType::Normal);
}

#[test]
fn it_executes_new_replacing_tabs() {
    let msg = Message::new(Author::Model, "\t\tHi there!");
    assert_eq!(msg.author.to_string(), "Model");
    assert_eq!(msg.text, "    Hi there!".to_string());
    assert_eq!(msg.mtype, MessageType::Normal);
}

#[test]
fn it_executes_new_with_type() {
    let msg = Message::new_with_type(Author::ListGenie, MessageType::Error, "It broke!");
    assert_eq!(msg.author, Author::ListGenie);
    assert_eq!(msg.text, "It broke!".to_string());
    assert_eq!(msg.mtype, MessageType::Error);
}

#[test]
fn it_executes_error() {
    let msg = Message::error("\tNo items detected.");
    assert_eq!(msg.author, Author::ListGenie);
    assert_eq!(msg.text, "  No items detected.");
    assert!(msg.is_error());
    assert_eq!(msg.mtype, MessageType::Error);
}
