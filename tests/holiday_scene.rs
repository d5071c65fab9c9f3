//! Building the holiday scene with real fonts

use evergreen::{
    config::AppConfig,
    gfx::geometry::{generate_text, TextGeometryOptions},
    holiday::{HolidayScene, FLOOR, STUMP, TEXT, TREE},
};

const TEXT_OBJECTS: [&str; 2] = ["text_merry", "text_christmas"];

fn font(config: &AppConfig) -> fontdue::Font {
    HolidayScene::load_font(config).expect("bundled font parses")
}

#[test]
fn text_lines_float_above_the_tree() {
    let config = AppConfig::default();
    let font = font(&config);

    let (scene, _) = HolidayScene::build(&config, Some(&font));
    assert_eq!(
        scene.get_object_names(),
        vec![TREE, STUMP, FLOOR, TEXT_OBJECTS[0], TEXT_OBJECTS[1]]
    );

    for (name, height) in [(TEXT_OBJECTS[0], 3.25), (TEXT_OBJECTS[1], 2.75)] {
        let object = scene
            .get_object(scene.find_object(name).unwrap())
            .unwrap();
        assert_eq!(object.transform.position.y, height);
        assert_eq!(object.transform.position.z, -3.0);
        assert_eq!(object.transform.rotation.x, 0.2);
        assert_eq!(scene.get_material_for_object(object).name, TEXT);
    }
}

#[test]
fn unreadable_font_path_falls_back_to_the_bundled_font() {
    let mut config = AppConfig::default();
    config.text.font_path = Some("/definitely/not/a/font.ttf".into());

    let font = font(&config);
    let (scene, _) = HolidayScene::build(&config, Some(&font));
    for name in TEXT_OBJECTS {
        assert!(scene.find_object(name).is_some(), "{} missing", name);
    }
}

#[test]
fn no_font_skips_only_the_text() {
    let config = AppConfig::default();

    let (scene, _) = HolidayScene::build(&config, None);
    assert_eq!(scene.get_object_names(), vec![TREE, STUMP, FLOOR]);
    assert!(scene.material_manager.get_material(TEXT).is_some());
}

#[test]
fn longer_line_is_wider() {
    let font = font(&AppConfig::default());

    let options = TextGeometryOptions::default();
    let width = |text: &str| {
        let (min, max) = generate_text(&font, text, &options).bounding_box().unwrap();
        max[0] - min[0]
    };

    let merry = width("M e r r y");
    let christmas = width("C h r i s t m a s !");
    assert!(christmas > merry);
    assert!(merry > options.size);
}

#[test]
fn blank_text_has_no_geometry() {
    let font = font(&AppConfig::default());

    assert!(generate_text(&font, "   ", &TextGeometryOptions::default()).is_empty());
}
