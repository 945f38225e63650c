use super::SlashCommand;

#[test]
fn it_parse_empty_string() {
    let text = "";
    assert!(SlashCommand::parse(text).is_none());
}
#[test]
fn it_parse_space_only() {
    let text = " ";
    assert!(SlashCommand::parse(text).is_none());
}
#[test]
fn it_parse_single_slash() {
    let text = "/";
    assert!(SlashCommand::parse(text).is_none());
}
#[test]
fn it_parse_invalid_prefix() {
    let text = "!q";
    assert!(SlashCommand::parse(text).is_none());
}
#[test]
fn it_parse_chat_text() {
    let text = "What is this lamp worth?";
    assert!(SlashCommand::parse(text).is_none());
}
#[test]
fn it_parse_valid_prefix() {
    let text = "/q";
    let cmd = SlashCommand::parse(text);
    assert!(cmd.is_some());
    assert_eq!(cmd.unwrap().command, "/q");
}

#[test]
fn it_is_quit() {
    for text in ["/q", "/quit", "/exit"] {
        assert!(SlashCommand::parse(text).unwrap().is_quit());
    }
}
#[test]
fn it_is_not_is_quit() {
    let cmd = SlashCommand::parse("/ml").unwrap();
    assert!(!cmd.is_quit());
}

#[test]
fn it_is_help() {
    assert!(SlashCommand::parse("/h").unwrap().is_help());
    assert!(SlashCommand::parse("/help").unwrap().is_help());
}

#[test]
fn it_is_image() {
    let cmd = SlashCommand::parse("/image ./photos/garage sale.jpg").unwrap();
    assert!(cmd.is_image());
    assert_eq!(cmd.arg_text(), "./photos/garage sale.jpg");
}
#[test]
fn it_is_short_image() {
    assert!(SlashCommand::parse("/i photo.png").unwrap().is_image());
}

#[test]
fn it_is_select() {
    assert!(SlashCommand::parse("/s").unwrap().is_select());
    assert!(SlashCommand::parse("/select 1,2").unwrap().is_select());
}

#[test]
fn it_is_listing() {
    let cmd = SlashCommand::parse("/listing Item, Title, Price").unwrap();
    assert!(cmd.is_listing());
    assert_eq!(cmd.arg_text(), "Item, Title, Price");
}

#[test]
fn it_is_refine() {
    assert!(SlashCommand::parse("/rf urgent").unwrap().is_refine());
    assert!(SlashCommand::parse("/refine concise").unwrap().is_refine());
}

#[test]
fn it_is_regenerate() {
    for text in ["/r", "/regen", "/regenerate"] {
        assert!(SlashCommand::parse(text).unwrap().is_regenerate());
    }
}
#[test]
fn it_is_not_regenerate() {
    assert!(!SlashCommand::parse("/rf").unwrap().is_regenerate());
}

#[test]
fn it_is_clear_chat() {
    assert!(SlashCommand::parse("/clear").unwrap().is_clear_chat());
}

#[test]
fn it_is_export() {
    assert!(SlashCommand::parse("/e").unwrap().is_export());
    assert!(SlashCommand::parse("/export out.csv").unwrap().is_export());
}

#[test]
fn it_is_copy() {
    assert!(SlashCommand::parse("/c").unwrap().is_copy());
    assert!(SlashCommand::parse("/copy").unwrap().is_copy());
}

#[test]
fn it_is_status() {
    assert!(SlashCommand::parse("/st").unwrap().is_status());
    assert!(SlashCommand::parse("/status").unwrap().is_status());
}

#[test]
fn it_is_api_key() {
    let cmd = SlashCommand::parse("/key gsk_123").unwrap();
    assert!(cmd.is_api_key());
    assert_eq!(cmd.arg_text(), "gsk_123");
}

#[test]
fn it_is_model_list() {
    for text in ["/ml", "/models", "/modellist"] {
        assert!(SlashCommand::parse(text).unwrap().is_model_list());
    }
}

#[test]
fn it_is_vision_model_set() {
    assert!(SlashCommand::parse("/v 2").unwrap().is_vision_model_set());
    assert!(SlashCommand::parse("/vision llava").unwrap().is_vision_model_set());
    assert!(!SlashCommand::parse("/ml").unwrap().is_vision_model_set());
}

#[test]
fn it_resolves_single_index() {
    let cmd = SlashCommand::parse("/s 2").unwrap();
    assert_eq!(cmd.indexes(3).unwrap(), vec![1]);
}

#[test]
fn it_resolves_index_lists() {
    let cmd = SlashCommand::parse("/s 1,3, 4").unwrap();
    assert_eq!(cmd.indexes(4).unwrap(), vec![0, 2, 3]);
}

#[test]
fn it_resolves_index_ranges() {
    let cmd = SlashCommand::parse("/s 2..4").unwrap();
    assert_eq!(cmd.indexes(5).unwrap(), vec![1, 2, 3]);
}

#[test]
fn it_resolves_no_indexes() {
    let cmd = SlashCommand::parse("/s").unwrap();
    assert!(cmd.indexes(5).unwrap().is_empty());
}

#[test]
fn it_fails_out_of_bounds_index() {
    let cmd = SlashCommand::parse("/s 1,9").unwrap();
    let err = cmd.indexes(3).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"9 is out of bounds.");
}

#[test]
fn it_fails_zero_index() {
    let cmd = SlashCommand::parse("/s 0").unwrap();
    assert!(cmd.indexes(3).is_err());
}

#[test]
fn it_fails_backwards_range() {
    let cmd = SlashCommand::parse("/s 3..1").unwrap();
    assert!(cmd.indexes(3).is_err());
}

#[test]
fn it_fails_non_numeric_index() {
    let cmd = SlashCommand::parse("/s mug").unwrap();
    assert!(cmd.indexes(3).is_err());
}
