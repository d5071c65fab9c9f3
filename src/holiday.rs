//! The holiday scene: tree, stump, floor and two lines of floating text
//!
//! [`HolidayScene::build`] fills a [`Scene`] from the configuration without
//! touching the GPU. [`HolidayScene::apply`] pushes debug panel edits into
//! it, one changed value at a time.

use cgmath::{Deg, Vector3};

use crate::{
    config::AppConfig,
    gfx::{
        camera::{CameraController, CameraManager, OrbitCamera},
        geometry::{
            bundled_font, generate_cone, generate_cylinder, generate_plane, generate_text,
            load_font, TextGeometryOptions,
        },
        resources::color::hex_to_srgb,
        scene::{DirectionalLight, HemisphereLight, Lighting, Object, Scene},
    },
};

pub const TREE: &str = "tree";
pub const STUMP: &str = "stump";
pub const FLOOR: &str = "floor";
pub const TEXT: &str = "text";

const RADIAL_SEGMENTS: u32 = 32;
const TEXT_TILT: f32 = 0.2;

/// Floating text lines and their heights above the floor
const TEXT_LINES: [(&str, &str, f32); 2] = [
    ("text_merry", "M e r r y", 3.25),
    ("text_christmas", "C h r i s t m a s !", 2.75),
];

/// Values edited by the debug panel
///
/// Colors are sRGB, positions are world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugParameters {
    pub floor_color: [f32; 3],
    pub tree_color: [f32; 3],
    pub stump_color: [f32; 3],
    pub tree_position: [f32; 3],
    pub stump_position: [f32; 3],
}

impl DebugParameters {
    /// Starting values for the given configuration
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            floor_color: hex_to_srgb(config.scene.floor_color),
            tree_color: hex_to_srgb(config.scene.tree_color),
            stump_color: hex_to_srgb(config.scene.stump_color),
            tree_position: [0.0, 1.2, -3.0],
            stump_position: [0.0, 0.1, -3.0],
        }
    }
}

/// Keeps the last applied panel values so only edits reach the scene
#[derive(Debug, Clone)]
pub struct HolidayScene {
    applied: DebugParameters,
    slider_range: f32,
}

impl HolidayScene {
    /// Builds the scene and the panel state that matches it
    ///
    /// Text objects are only added when a font is given and the text
    /// produced geometry.
    pub fn build(config: &AppConfig, font: Option<&fontdue::Font>) -> (Scene, HolidayScene) {
        let params = DebugParameters::from_config(config);
        let mut scene = Scene::new(build_camera(config));

        scene.lighting = Lighting {
            hemisphere: HemisphereLight::new(0x888877, 0x777788, 1.0),
            directional: DirectionalLight::new(0xffffff, 0.5).with_position(0.0, 4.0, 0.0),
            background: hex_to_srgb(config.scene.background_color),
        };

        scene.add_material(TREE, params.tree_color, 0.0, 1.0);
        scene.add_material(STUMP, params.stump_color, 0.0, 1.0);
        scene
            .add_material(FLOOR, params.floor_color, 0.0, 1.0)
            .double_sided = true;
        scene.add_material(TEXT, hex_to_srgb(config.scene.text_color), 0.0, 1.0);

        let [x, y, z] = params.tree_position;
        scene.add_object(
            Object::from_geometry(TREE, &generate_cone(0.5, 2.0, RADIAL_SEGMENTS))
                .with_position(x, y, z)
                .with_material(TREE),
        );

        let [x, y, z] = params.stump_position;
        scene.add_object(
            Object::from_geometry(STUMP, &generate_cylinder(0.1, 0.1, 0.2, RADIAL_SEGMENTS))
                .with_position(x, y, z)
                .with_material(STUMP),
        );

        scene.add_object(
            Object::from_geometry(FLOOR, &generate_plane(6.0, 4.0, 1, 1))
                .with_position(0.0, 0.0, -3.0)
                .with_rotation_x(-std::f32::consts::FRAC_PI_2)
                .with_material(FLOOR),
        );

        match font {
            Some(font) => add_text(&mut scene, font, config),
            None => log::warn!("No font available; skipping the floating text"),
        }

        scene.update();

        let holiday = HolidayScene {
            applied: params,
            slider_range: config.scene.slider_range.abs(),
        };
        (scene, holiday)
    }

    /// Loads `text.font_path` if set, otherwise the bundled font
    ///
    /// An unreadable override falls back to the bundled font with a warning.
    pub fn load_font(config: &AppConfig) -> Option<fontdue::Font> {
        let pixel_resolution = config.text.pixel_resolution;

        if let Some(path) = &config.text.font_path {
            match load_font(path, pixel_resolution) {
                Ok(font) => return Some(font),
                Err(e) => log::warn!("{}; using the bundled font", e),
            }
        }

        match bundled_font(pixel_resolution) {
            Ok(font) => Some(font),
            Err(e) => {
                log::error!("{}", e);
                None
            }
        }
    }

    /// The values currently in the scene
    pub fn parameters(&self) -> DebugParameters {
        self.applied
    }

    pub fn slider_range(&self) -> f32 {
        self.slider_range
    }

    /// Pushes changed panel values into the scene
    ///
    /// Edited position components are clamped to the slider range; values
    /// that did not change are left alone, so a start position outside the
    /// range survives until its slider is touched. `params` is overwritten
    /// with what the scene now holds, so the panel shows clamped values.
    /// Returns true if anything was applied.
    pub fn apply(&mut self, params: &mut DebugParameters, scene: &mut Scene) -> bool {
        let mut changed = false;

        for (name, old, new) in [
            (FLOOR, &mut self.applied.floor_color, params.floor_color),
            (TREE, &mut self.applied.tree_color, params.tree_color),
            (STUMP, &mut self.applied.stump_color, params.stump_color),
        ] {
            if *old == new {
                continue;
            }
            if let Some(material) = scene.material_manager.get_material_mut(name) {
                material.set_color_srgb(new);
                *old = material.color_srgb();
                log::debug!("{} color -> {:?}", name, *old);
                changed = true;
            }
        }

        for (name, old, new) in [
            (TREE, &mut self.applied.tree_position, params.tree_position),
            (STUMP, &mut self.applied.stump_position, params.stump_position),
        ] {
            let mut position = *old;
            for axis in 0..3 {
                if new[axis] != old[axis] {
                    position[axis] = new[axis].clamp(-self.slider_range, self.slider_range);
                }
            }
            if position == *old {
                continue;
            }

            let Some(object) = scene.find_object(name).and_then(|i| scene.get_object_mut(i))
            else {
                continue;
            };
            object.set_position(Vector3::from(position));
            *old = position;
            log::debug!("{} position -> {:?}", name, position);
            changed = true;
        }

        *params = self.applied;
        changed
    }
}

fn build_camera(config: &AppConfig) -> CameraManager {
    let camera_config = &config.camera;
    let aspect = config.window.width.max(1) as f32 / config.window.height.max(1) as f32;

    let camera = OrbitCamera::from_eye_target(
        Vector3::from(camera_config.position),
        Vector3::from(camera_config.target),
        aspect,
    )
    .with_lens(
        Deg(camera_config.fov_degrees),
        camera_config.near,
        camera_config.far,
    );
    let controller = CameraController::new(camera_config.rotate_speed, camera_config.zoom_speed)
        .with_pan_speed(camera_config.pan_speed);

    CameraManager::new(camera, controller)
}

fn add_text(scene: &mut Scene, font: &fontdue::Font, config: &AppConfig) {
    let options = TextGeometryOptions {
        size: config.text.size,
        depth: config.text.depth,
        pixel_resolution: config.text.pixel_resolution,
    };

    for (name, text, height) in TEXT_LINES {
        let mut geometry = generate_text(font, text, &options);
        if geometry.is_empty() {
            log::warn!("Font produced no geometry for '{}'", text);
            continue;
        }
        geometry.center();

        scene.add_object(
            Object::from_geometry(name, &geometry)
                .with_position(0.0, height, -3.0)
                .with_rotation_x(TEXT_TILT)
                .with_material(TEXT),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build() -> (Scene, HolidayScene) {
        HolidayScene::build(&AppConfig::default(), None)
    }

    fn position(scene: &Scene, name: &str) -> [f32; 3] {
        let index = scene.find_object(name).unwrap();
        scene.get_object(index).unwrap().transform.position.into()
    }

    #[test]
    fn builds_tree_stump_and_floor() {
        let (scene, _) = build();

        assert_eq!(scene.get_object_names(), vec![TREE, STUMP, FLOOR]);
        assert_eq!(position(&scene, TREE), [0.0, 1.2, -3.0]);
        assert_eq!(position(&scene, STUMP), [0.0, 0.1, -3.0]);
        assert_eq!(position(&scene, FLOOR), [0.0, 0.0, -3.0]);

        let floor = scene.get_object(scene.find_object(FLOOR).unwrap()).unwrap();
        assert_eq!(floor.transform.rotation.x, -std::f32::consts::FRAC_PI_2);
        assert!(scene.get_material_for_object(floor).double_sided);
    }

    #[test]
    fn materials_follow_the_config() {
        let (scene, _) = build();

        let tree = scene.material_manager.get_material(TREE).unwrap();
        assert_eq!(tree.color_srgb(), hex_to_srgb(0x21a71c));
        assert_eq!((tree.metallic, tree.roughness), (0.0, 1.0));
        assert!(!tree.double_sided);

        let text = scene.material_manager.get_material(TEXT).unwrap();
        assert_eq!(text.color_srgb(), hex_to_srgb(0x147f10));
        assert_eq!(scene.lighting.background, hex_to_srgb(0xd2d2d2));
        assert_eq!(scene.lighting.directional.intensity, 0.5);
    }

    #[test]
    fn camera_starts_at_the_configured_eye() {
        let (scene, _) = build();
        let camera = &scene.camera_manager.camera;

        assert!(camera.eye.x.abs() < 1e-5);
        assert!((camera.eye.y - 1.6).abs() < 1e-5);
        assert!((camera.eye.z - 3.0).abs() < 1e-5);
        assert!((camera.aspect - 1.5).abs() < 1e-6);
        assert!((camera.znear - 0.01).abs() < 1e-9);
    }

    #[test]
    fn apply_ignores_unchanged_values() {
        let (mut scene, mut holiday) = build();
        let mut params = holiday.parameters();

        assert!(!holiday.apply(&mut params, &mut scene));
        // z starts outside the slider range and stays there
        assert_eq!(position(&scene, TREE), [0.0, 1.2, -3.0]);
    }

    #[test]
    fn apply_moves_and_clamps_edited_components() {
        let (mut scene, mut holiday) = build();
        let mut params = holiday.parameters();
        params.tree_position[0] = 5.0;
        params.stump_position[1] = -0.5;

        assert!(holiday.apply(&mut params, &mut scene));
        assert_eq!(position(&scene, TREE), [1.75, 1.2, -3.0]);
        assert_eq!(position(&scene, STUMP), [0.0, -0.5, -3.0]);
        assert_eq!(holiday.parameters().tree_position, [1.75, 1.2, -3.0]);
    }

    #[test]
    fn apply_writes_clamped_values_back() {
        let (mut scene, mut holiday) = build();
        let mut params = holiday.parameters();
        params.tree_position = [5.0, -9.0, -3.0];
        params.stump_color = [1.5, 0.5, -0.5];

        assert!(holiday.apply(&mut params, &mut scene));
        assert_eq!(params.tree_position, [1.75, -1.75, -3.0]);
        assert_eq!(params.stump_color, [1.0, 0.5, 0.0]);
        assert_eq!(params, holiday.parameters());

        // a second pass with the synced values is a no-op
        assert!(!holiday.apply(&mut params, &mut scene));
    }

    #[test]
    fn apply_recolors_materials() {
        let (mut scene, mut holiday) = build();
        let mut params = holiday.parameters();
        params.floor_color = [1.0, 0.0, 0.0];

        assert!(holiday.apply(&mut params, &mut scene));
        let floor = scene.material_manager.get_material(FLOOR).unwrap();
        assert_eq!(floor.color_srgb(), [1.0, 0.0, 0.0]);

        let tree = scene.material_manager.get_material(TREE).unwrap();
        assert_eq!(tree.color_srgb(), hex_to_srgb(0x21a71c));
    }
}
