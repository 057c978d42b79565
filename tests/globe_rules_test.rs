//! Rule merging across several documents, the way mods stack.

use geoscape::core::{FileMap, GlobeConfig, GlobeError, GlobeRules};
use serde_json::{json, Value};

fn load(rules: &mut GlobeRules, doc: Value) {
    rules.load_value(doc, &FileMap::new()).unwrap();
}

fn base_rules() -> GlobeRules {
    let mut rules = GlobeRules::new();
    load(
        &mut rules,
        json!({
            "textures": [
                { "id": 0, "terrain": [{ "name": "FOREST" }, { "name": "JUNGLE", "weight": 5 }] },
                { "id": 1, "terrain": [{ "name": "FARM" }] },
                { "id": 2, "terrain": [{ "name": "URBAN" }], "deployments": ["STR_TERROR"] },
                { "id": 3, "terrain": [{ "name": "FOREST" }], "deployments": ["STR_TERROR", "STR_BASE"] }
            ]
        }),
    );
    rules
}

#[test]
fn terrains_for_default_deployment_come_from_unrestricted_textures() {
    let rules = base_rules();
    assert_eq!(rules.terrains(""), vec!["FOREST", "JUNGLE", "FARM"]);
}

#[test]
fn terrains_for_named_deployment_keep_texture_then_criteria_order() {
    let rules = base_rules();
    assert_eq!(rules.terrains("STR_TERROR"), vec!["URBAN", "FOREST"]);
    assert_eq!(rules.terrains("STR_BASE"), vec!["FOREST"]);
    assert!(rules.terrains("STR_NOWHERE").is_empty());
}

#[test]
fn terrains_repeat_names_shared_by_several_textures() {
    let mut rules = base_rules();
    load(
        &mut rules,
        json!({ "textures": [{ "id": 4, "terrain": [{ "name": "FOREST" }] }] }),
    );
    assert_eq!(rules.terrains(""), vec!["FOREST", "JUNGLE", "FARM", "FOREST"]);
}

#[test]
fn later_documents_refine_textures() {
    let mut rules = base_rules();
    load(
        &mut rules,
        json!({ "textures": [{ "id": 1, "deployments": ["STR_FARMLAND"] }] }),
    );

    let farm = rules.texture(1).unwrap();
    assert_eq!(farm.terrain()[0].name, "FARM");
    assert!(farm.deployments().contains("STR_FARMLAND"));
    assert_eq!(rules.terrains(""), vec!["FOREST", "JUNGLE"]);
}

#[test]
fn terrain_criteria_fields_are_parsed() {
    let rules = base_rules();
    let jungle = &rules.texture(0).unwrap().terrain()[1];
    assert_eq!(jungle.weight, 5);
    assert!((jungle.lat_max - 90f64.to_radians()).abs() < 1e-12);
}

#[test]
fn delete_then_recreate_starts_fresh() {
    let mut rules = base_rules();
    load(
        &mut rules,
        json!({ "textures": [{ "delete": 2 }, { "id": 2, "deployments": ["STR_UFO"] }] }),
    );

    let tex = rules.texture(2).unwrap();
    assert!(tex.terrain().is_empty());
    assert_eq!(rules.terrains("STR_TERROR"), vec!["FOREST"]);
}

#[test]
fn deleting_unknown_texture_keeps_store_size() {
    let mut rules = base_rules();
    let before = rules.texture_count();
    load(&mut rules, json!({ "textures": [{ "delete": 42 }] }));
    assert_eq!(rules.texture_count(), before);
    assert!(rules.texture(42).is_none());
}

#[test]
fn polylines_replace_and_survive_unrelated_loads() {
    let mut rules = GlobeRules::new();
    load(
        &mut rules,
        json!({ "polylines": [[0, 0, 10, 10], [20, 20, 30, 30, 40, 40]] }),
    );
    load(&mut rules, json!({ "textures": [{ "id": 9 }] }));
    assert_eq!(rules.polylines().len(), 2);

    load(&mut rules, json!({ "polylines": [] }));
    assert!(rules.polylines().is_empty());
}

#[test]
fn rendering_parameters_persist_across_loads() {
    let mut rules = GlobeRules::new();
    assert_eq!(*rules.config(), GlobeConfig::default());

    load(
        &mut rules,
        json!({ "baseColor": 1, "lineColor": 2, "oceanPalette": 10 }),
    );
    load(&mut rules, json!({ "baseColor": 3 }));

    let config = rules.config();
    assert_eq!(config.base_label_color, 3);
    assert_eq!(config.line_color, 2);
    assert_eq!(config.ocean_color, 160);
    assert!(config.ocean_shading);
}

#[test]
fn ocean_palette_past_last_block_is_rejected() {
    let mut rules = GlobeRules::new();
    load(&mut rules, json!({ "oceanPalette": 15 }));
    assert_eq!(rules.config().ocean_color, 240);

    let err = rules
        .load_value(json!({ "oceanPalette": 16, "baseColor": 1 }), &FileMap::new())
        .unwrap_err();
    assert!(matches!(err, GlobeError::Parse(_)));
    assert_eq!(rules.config().ocean_color, 240);
    assert_eq!(rules.config().base_label_color, GlobeConfig::default().base_label_color);
}

#[test]
fn malformed_json_is_a_parse_error() {
    let mut rules = GlobeRules::new();
    let err = rules.load_json("{ \"textures\": 5 }", &FileMap::new()).unwrap_err();
    assert!(matches!(err, GlobeError::Parse(_)));
}
