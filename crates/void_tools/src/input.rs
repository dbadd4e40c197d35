//! Input snapshot passed through the tool dispatch pipeline.
//!
//! One `InputState` is produced per viewport event and handed to the tool box
//! by shared reference. Nothing downstream mutates it.

bitflags::bitflags! {
    /// Keyboard modifiers held while an event was produced.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModifierKeys: u8 {
        const NONE  = 0;
        const SHIFT = 1 << 0;
        const CTRL  = 1 << 1;
        const ALT   = 1 << 2;
        const CMD   = 1 << 3;
    }
}

bitflags::bitflags! {
    /// Mouse buttons held while an event was produced.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MouseButtons: u8 {
        const NONE   = 0;
        const LEFT   = 1 << 0;
        const RIGHT  = 1 << 1;
        const MIDDLE = 1 << 2;
    }
}

/// Immutable description of pointer and keyboard state for one event.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputState {
    position: [f32; 2],
    delta: [f32; 2],
    scroll: [f32; 2],
    buttons: MouseButtons,
    modifiers: ModifierKeys,
}

impl InputState {
    /// Snapshot with the pointer at `position` and nothing pressed.
    pub fn new(position: [f32; 2]) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn with_delta(mut self, delta: [f32; 2]) -> Self {
        self.delta = delta;
        self
    }

    pub fn with_scroll(mut self, scroll: [f32; 2]) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn with_buttons(mut self, buttons: MouseButtons) -> Self {
        self.buttons = buttons;
        self
    }

    pub fn with_modifiers(mut self, modifiers: ModifierKeys) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Pointer position in viewport coordinates.
    pub fn position(&self) -> [f32; 2] {
        self.position
    }

    /// Pointer movement since the previous event.
    pub fn delta(&self) -> [f32; 2] {
        self.delta
    }

    /// Wheel movement carried by this event.
    pub fn scroll(&self) -> [f32; 2] {
        self.scroll
    }

    pub fn buttons(&self) -> MouseButtons {
        self.buttons
    }

    pub fn modifiers(&self) -> ModifierKeys {
        self.modifiers
    }

    /// True if exactly `keys` are held, no more and no less.
    pub fn modifier_keys_pressed(&self, keys: ModifierKeys) -> bool {
        self.modifiers == keys
    }

    /// True if at least `keys` are held.
    pub fn modifier_keys_down(&self, keys: ModifierKeys) -> bool {
        self.modifiers.contains(keys)
    }

    /// True if exactly `buttons` are held, no more and no less.
    pub fn mouse_buttons_pressed(&self, buttons: MouseButtons) -> bool {
        self.buttons == buttons
    }

    /// True if at least `buttons` are held.
    pub fn mouse_buttons_down(&self, buttons: MouseButtons) -> bool {
        self.buttons.contains(buttons)
    }
}
