use super::ListingStyle;

#[test]
fn it_parses_empty_as_researched() {
    assert_eq!(ListingStyle::parse(""), Some(ListingStyle::Researched));
    assert_eq!(ListingStyle::parse("  "), Some(ListingStyle::Researched));
}

#[test]
fn it_parses_presets_case_insensitive() {
    assert_eq!(ListingStyle::parse("Researched"), Some(ListingStyle::Researched));
    assert_eq!(ListingStyle::parse("QUICK"), Some(ListingStyle::Quick));
}

#[test]
fn it_parses_custom_columns() {
    let style = ListingStyle::parse("Item, Title ,, Price").unwrap();
    assert_eq!(
        style.columns(),
        vec!["Item".to_string(), "Title".to_string(), "Price".to_string()]
    );
}

#[test]
fn it_rejects_unknown_single_word() {
    assert!(ListingStyle::parse("fancy").is_none());
}

#[test]
fn it_rejects_columns_without_names() {
    assert!(ListingStyle::parse(", ,").is_none());
}

#[test]
fn it_has_selling_points_only_when_researched() {
    assert_eq!(ListingStyle::Researched.columns().len(), 5);
    assert_eq!(
        ListingStyle::Researched.columns().last().unwrap(),
        "Selling Points"
    );
    assert_eq!(ListingStyle::Quick.columns().len(), 4);
}
