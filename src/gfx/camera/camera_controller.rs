use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, KeyEvent, MouseButton, MouseScrollDelta},
    keyboard::{KeyCode, PhysicalKey},
};

use super::orbit_camera::OrbitCamera;

/// Orbit-style mouse controls
///
/// Left drag orbits around the target, right drag or shift + left drag pans,
/// the wheel zooms. Shift+C restores the starting pose.
pub struct CameraController {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    is_shift_held: bool,
    is_left_pressed: bool,
    is_right_pressed: bool,
}

impl CameraController {
    pub fn new(rotate_speed: f32, zoom_speed: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            pan_speed: 0.01,
            is_shift_held: false,
            is_left_pressed: false,
            is_right_pressed: false,
        }
    }

    pub fn with_pan_speed(mut self, speed: f32) -> Self {
        self.pan_speed = speed;
        self
    }

    /// Applies raw mouse input to the camera, returns true if the camera moved
    pub fn process_events(&mut self, event: &DeviceEvent, camera: &mut OrbitCamera) -> bool {
        match event {
            DeviceEvent::MouseWheel { delta } => {
                let scroll_amount = -match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => *scroll,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => {
                        *scroll as f32 / 40.0
                    }
                };
                camera.add_distance(scroll_amount * self.zoom_speed);
                true
            }
            DeviceEvent::MouseMotion { delta } => {
                if self.is_panning() {
                    camera.pan((
                        -delta.0 as f32 * self.pan_speed,
                        delta.1 as f32 * self.pan_speed,
                    ));
                    true
                } else if self.is_rotating() {
                    camera.add_yaw(-delta.0 as f32 * self.rotate_speed);
                    camera.add_pitch(delta.1 as f32 * self.rotate_speed);
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        let pressed = state == ElementState::Pressed;
        match button {
            MouseButton::Left => self.is_left_pressed = pressed,
            MouseButton::Right => self.is_right_pressed = pressed,
            _ => (),
        }
    }

    pub fn process_keyed_events(&mut self, event: &KeyEvent, camera: &mut OrbitCamera) {
        match event {
            KeyEvent {
                physical_key: PhysicalKey::Code(KeyCode::ShiftLeft | KeyCode::ShiftRight),
                state,
                ..
            } => {
                self.is_shift_held = *state == ElementState::Pressed;
            }
            KeyEvent {
                physical_key: PhysicalKey::Code(KeyCode::KeyC),
                state: ElementState::Pressed,
                repeat: false,
                ..
            } => {
                if self.is_shift_held {
                    log::info!("Resetting camera to its starting pose");
                    camera.reset_to_default();
                }
            }
            _ => (),
        }
    }

    /// Drops any held buttons, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.is_left_pressed = false;
        self.is_right_pressed = false;
        self.is_shift_held = false;
    }

    /// Returns true if currently panning
    pub fn is_panning(&self) -> bool {
        self.is_right_pressed || (self.is_left_pressed && self.is_shift_held)
    }

    /// Returns true if currently rotating
    pub fn is_rotating(&self) -> bool {
        self.is_left_pressed && !self.is_shift_held
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, Vector3, Zero};

    #[test]
    fn left_drag_rotates_right_drag_pans() {
        let mut controller = CameraController::new(0.01, 0.1);
        let mut camera = OrbitCamera::new(3.0, 0.0, 0.0, Vector3::zero(), 1.0);
        let motion = DeviceEvent::MouseMotion { delta: (10.0, 0.0) };

        assert!(!controller.process_events(&motion, &mut camera));

        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert!(controller.is_rotating());
        assert!(controller.process_events(&motion, &mut camera));
        assert!(camera.yaw < 0.0);
        assert!(camera.target.magnitude() < 1e-6);

        controller.process_mouse_button(MouseButton::Left, ElementState::Released);
        controller.process_mouse_button(MouseButton::Right, ElementState::Pressed);
        assert!(controller.is_panning());
        controller.process_events(&motion, &mut camera);
        assert!(camera.target.magnitude() > 0.0);
    }

    #[test]
    fn wheel_up_zooms_in() {
        let mut controller = CameraController::new(0.01, 0.1);
        let mut camera = OrbitCamera::new(3.0, 0.0, 0.0, Vector3::zero(), 1.0);
        let wheel = DeviceEvent::MouseWheel {
            delta: MouseScrollDelta::LineDelta(0.0, 1.0),
        };
        controller.process_events(&wheel, &mut camera);
        assert!(camera.distance < 3.0);
    }
}
