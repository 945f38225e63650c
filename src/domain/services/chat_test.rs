use super::context_message;
use super::conversation;
use super::prepare_regenerate;
use super::push_user_message;
use super::SELLER_ASSISTANT_PERSONA;
use crate::domain::models::ChatMessage;
use crate::domain::models::Role;
use crate::domain::models::Session;

#[test]
fn it_uses_the_persona_without_context() {
    let session = Session::default();
    let msg = context_message(&session);

    assert_eq!(msg.role, Role::System);
    assert_eq!(msg.content, SELLER_ASSISTANT_PERSONA);
}

#[test]
fn it_prefers_the_description_over_the_persona() {
    let mut session = Session::default();
    session.replace_items("1. Red mug", vec!["Red mug".to_string()]);

    insta::assert_snapshot!(context_message(&session).content, @r###"
    Here is the detailed image description:

    1. Red mug
    "###);
}

#[test]
fn it_prefers_the_listing_over_the_description() {
    let mut session = Session::default();
    session.replace_items("1. Red mug", vec!["Red mug".to_string()]);
    session.listing_markdown = Some("| Item |\n|---|\n| Red mug |".to_string());

    let msg = context_message(&session);
    assert!(msg
        .content
        .starts_with("Here is the current listing markdown table:\n\n| Item |"));
}

#[test]
fn it_prefixes_history_with_context() {
    let mut session = Session::default();
    session.chat_history = vec![
        ChatMessage::user("Is this mug vintage?"),
        ChatMessage::assistant("Likely from the 1970s."),
    ];

    let messages = conversation(&session);
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0].role, Role::System);
    assert_eq!(messages[1], ChatMessage::user("Is this mug vintage?"));
    assert_eq!(messages[2].role, Role::Assistant);
}

#[test]
fn it_ignores_blank_user_messages() {
    let mut history = vec![];
    assert!(!push_user_message(&mut history, "   "));
    assert!(history.is_empty());

    assert!(push_user_message(&mut history, "How much for the lamp?"));
    assert_eq!(history, vec![ChatMessage::user("How much for the lamp?")]);
}

#[test]
fn it_does_nothing_on_empty_history() {
    let mut history: Vec<ChatMessage> = vec![];
    assert!(!prepare_regenerate(&mut history));
    assert!(history.is_empty());
}

#[test]
fn it_resubmits_a_trailing_user_message() {
    let mut history = vec![ChatMessage::user("A")];
    assert!(prepare_regenerate(&mut history));
    assert_eq!(history, vec![ChatMessage::user("A")]);
}

#[test]
fn it_drops_a_trailing_assistant_reply() {
    let mut history = vec![
        ChatMessage::user("A"),
        ChatMessage::assistant("B"),
        ChatMessage::user("C"),
        ChatMessage::assistant("D"),
    ];
    assert!(prepare_regenerate(&mut history));
    assert_eq!(
        history,
        vec![
            ChatMessage::user("A"),
            ChatMessage::assistant("B"),
            ChatMessage::user("C"),
        ]
    );
}

#[test]
fn it_leaves_history_alone_without_a_user_message_to_resubmit() {
    let mut history = vec![ChatMessage::assistant("Hello!")];
    assert!(!prepare_regenerate(&mut history));
    assert_eq!(history, vec![ChatMessage::assistant("Hello!")]);

    let mut history = vec![
        ChatMessage::user("A"),
        ChatMessage::assistant("B"),
        ChatMessage::assistant("C"),
    ];
    assert!(!prepare_regenerate(&mut history));
    assert_eq!(history.len(), 3);
}
