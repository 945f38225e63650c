use super::format_model_list;
use super::is_vision_model;
use super::pick_listing_model;
use super::pick_vision_model;
use super::resolve_vision_model;
use super::vision_models;

fn models() -> Vec<String> {
    return vec![
        "llama-3.3-70b-versatile".to_string(),
        "meta-llama/llama-4-scout-17b-16e-instruct".to_string(),
        "compound-beta".to_string(),
        "llama-3.2-11b-vision-preview".to_string(),
        "meta-llama/llama-4-maverick-17b-128e-instruct".to_string(),
    ];
}

#[test]
fn it_detects_vision_models() {
    assert!(is_vision_model("meta-llama/llama-4-scout-17b-16e-instruct"));
    assert!(is_vision_model("llava-v1.5-7b-4096-preview"));
    assert!(is_vision_model("Llama-3.2-90B-Vision-Preview"));
    assert!(!is_vision_model("llama-3.3-70b-versatile"));
    assert!(!is_vision_model("compound-beta"));
}

#[test]
fn it_filters_vision_models_in_order() {
    assert_eq!(
        vision_models(&models()),
        vec![
            "meta-llama/llama-4-scout-17b-16e-instruct".to_string(),
            "llama-3.2-11b-vision-preview".to_string(),
            "meta-llama/llama-4-maverick-17b-128e-instruct".to_string(),
        ]
    );
}

#[test]
fn it_keeps_an_available_vision_model() {
    let res = pick_vision_model(Some("llama-3.2-11b-vision-preview"), &models());
    assert_eq!(res, Some("llama-3.2-11b-vision-preview".to_string()));
}

#[test]
fn it_replaces_an_unavailable_vision_model() {
    let res = pick_vision_model(Some("gone-vision"), &models());
    assert_eq!(
        res,
        Some("meta-llama/llama-4-scout-17b-16e-instruct".to_string())
    );
}

#[test]
fn it_finds_no_vision_model() {
    let res = pick_vision_model(None, &["llama-3.3-70b-versatile".to_string()]);
    assert_eq!(res, None);
}

#[test]
fn it_picks_the_compound_listing_model() {
    assert_eq!(pick_listing_model(None, &models()), "compound-beta");
    assert_eq!(
        pick_listing_model(Some("llama-3.3-70b-versatile"), &models()),
        "llama-3.3-70b-versatile"
    );
}

#[test]
fn it_matches_compound_beta_regardless_of_case() {
    let models = vec![
        "mixtral-8x7b-32768".to_string(),
        "Compound-Beta-Mini".to_string(),
    ];
    assert_eq!(pick_listing_model(None, &models), "Compound-Beta-Mini");
}

#[test]
fn it_falls_back_to_the_default_listing_model() {
    assert_eq!(pick_listing_model(None, &[]), "mixtral-8x7b-32768");
    assert_eq!(
        pick_listing_model(Some("missing"), &["llama-3.3-70b-versatile".to_string()]),
        "mixtral-8x7b-32768"
    );
}

#[test]
fn it_resolves_vision_models_by_index_or_name() {
    assert_eq!(
        resolve_vision_model("2", &models()),
        Some("llama-3.2-11b-vision-preview".to_string())
    );
    assert_eq!(
        resolve_vision_model(" llama-3.2-11b-vision-preview ", &models()),
        Some("llama-3.2-11b-vision-preview".to_string())
    );
    assert_eq!(resolve_vision_model("0", &models()), None);
    assert_eq!(resolve_vision_model("4", &models()), None);
    assert_eq!(resolve_vision_model("compound-beta", &models()), None);
}

#[test]
fn it_formats_the_model_list() {
    insta::assert_snapshot!(format_model_list(&models()), @r###"
    - (1) llama-3.3-70b-versatile
    - (2) meta-llama/llama-4-scout-17b-16e-instruct [vision]
    - (3) compound-beta
    - (4) llama-3.2-11b-vision-preview [vision]
    - (5) meta-llama/llama-4-maverick-17b-128e-instruct [vision]
    "###);
}
