use glam::Vec2;
use sokol::app as sapp;

/// Discrete input that happened during the current frame, in arrival order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The window asked to close.
    QuitRequested,
    KeyPressed(sapp::Keycode),
    PointerPressed { button: sapp::Mousebutton, position: Vec2 },
    PointerReleased { button: sapp::Mousebutton, position: Vec2 },
}

pub struct InputManager {
    keys_down: [bool; 512],
    mouse_position: Vec2,
    mouse_buttons_down: [bool; 8],
    events: Vec<InputEvent>,
}

/// Implementation for engine
impl InputManager {
    pub fn new() -> Self {
        Self {
            keys_down: [false; 512],
            mouse_position: Vec2::ZERO,
            mouse_buttons_down: [false; 8],
            events: Vec::new(),
        }
    }

    pub fn new_frame(&mut self) {
        self.events.clear();
    }

    pub fn handle_key_down(&mut self, key: sapp::Keycode) {
        let key_idx = key as usize;
        if key_idx < self.keys_down.len() {
            // Auto-repeat arrives as more key-downs; only the first one counts
            if !self.keys_down[key_idx] {
                self.events.push(InputEvent::KeyPressed(key));
            }
            self.keys_down[key_idx] = true;
        }
    }

    pub fn handle_key_up(&mut self, key: sapp::Keycode) {
        let key_idx = key as usize;
        if key_idx < self.keys_down.len() {
            self.keys_down[key_idx] = false;
        }
    }

    pub fn handle_mouse_move(&mut self, x: f32, y: f32) {
        self.mouse_position = Vec2::new(x, y);
    }

    pub fn handle_mouse_button_down(&mut self, button: sapp::Mousebutton) {
        let btn_idx = button as usize;
        if btn_idx < self.mouse_buttons_down.len() {
            if !self.mouse_buttons_down[btn_idx] {
                self.events.push(InputEvent::PointerPressed {
                    button,
                    position: self.mouse_position,
                });
            }
            self.mouse_buttons_down[btn_idx] = true;
        }
    }

    pub fn handle_mouse_button_up(&mut self, button: sapp::Mousebutton) {
        let btn_idx = button as usize;
        if btn_idx < self.mouse_buttons_down.len() {
            if self.mouse_buttons_down[btn_idx] {
                self.events.push(InputEvent::PointerReleased {
                    button,
                    position: self.mouse_position,
                });
            }
            self.mouse_buttons_down[btn_idx] = false;
        }
    }

    pub fn handle_quit_requested(&mut self) {
        self.events.push(InputEvent::QuitRequested);
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Public functions for Game interface
impl InputManager {
    pub fn events(&self) -> &[InputEvent] {
        &self.events
    }

    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }
}
