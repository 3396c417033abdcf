use std::collections::HashSet;

use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::traits::{Controller, ScrollDelta, ViewerInput};

/// Keys the viewer reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Key {
    Escape,
    Backspace,
    Home,
    End,
}

/// Adapter that bridges Winit events to viewer input
#[derive(Debug, Clone, Default)]
pub struct WinitController {
    /// Keys currently held, so auto-repeat does not re-trigger
    pressed_keys: HashSet<Key>,
    /// Current mouse position (relative to window)
    mouse_position: Option<(f32, f32)>,
    queued: Vec<ViewerInput>,
}

impl WinitController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a Winit WindowEvent and queue the matching viewer input
    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    if let Some(key) = Self::keycode_to_key(keycode) {
                        self.key_changed(key, event.state);
                    }
                }
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button,
                ..
            } => {
                if let Some(input) = Self::mouse_button_to_input(*button) {
                    self.queued.push(input);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let (x, y) = (position.x as f32, position.y as f32);
                self.mouse_position = Some((x, y));
                self.queued.push(ViewerInput::PointerMoved { x, y });
            }
            WindowEvent::CursorLeft { .. } => {
                self.mouse_position = None;
                self.queued.push(ViewerInput::PointerLeft);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.queued.push(ViewerInput::Scroll {
                    delta: Self::wheel_to_scroll(*delta),
                });
            }
            WindowEvent::Resized(size) => {
                self.queued.push(ViewerInput::Resize {
                    width: size.width,
                    height: size.height,
                });
            }
            _ => {}
        }
    }

    fn key_changed(&mut self, key: Key, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if self.pressed_keys.insert(key) {
                    self.queued.push(Self::key_to_input(key));
                }
            }
            ElementState::Released => {
                self.pressed_keys.remove(&key);
            }
        }
    }

    fn key_to_input(key: Key) -> ViewerInput {
        match key {
            Key::Escape | Key::Backspace => ViewerInput::Back,
            Key::Home => ViewerInput::ScrollTo { progress: 0.0 },
            Key::End => ViewerInput::ScrollTo { progress: 1.0 },
        }
    }

    /// Map Winit KeyCode to Key
    fn keycode_to_key(keycode: KeyCode) -> Option<Key> {
        match keycode {
            KeyCode::Escape => Some(Key::Escape),
            KeyCode::Backspace => Some(Key::Backspace),
            KeyCode::Home => Some(Key::Home),
            KeyCode::End => Some(Key::End),
            _ => None,
        }
    }

    /// Map Winit MouseButton to viewer input
    fn mouse_button_to_input(button: MouseButton) -> Option<ViewerInput> {
        match button {
            MouseButton::Left => Some(ViewerInput::Click),
            MouseButton::Right | MouseButton::Back => Some(ViewerInput::Back),
            _ => None,
        }
    }

    /// Wheel down moves forward along the path
    fn wheel_to_scroll(delta: MouseScrollDelta) -> ScrollDelta {
        match delta {
            MouseScrollDelta::LineDelta(_, y) => ScrollDelta::Lines(-y),
            MouseScrollDelta::PixelDelta(pos) => ScrollDelta::Pixels(-pos.y as f32),
        }
    }
}

impl Controller for WinitController {
    fn drain_inputs(&mut self) -> Vec<ViewerInput> {
        std::mem::take(&mut self.queued)
    }

    fn pointer(&self) -> Option<(f32, f32)> {
        self.mouse_position
    }
}
