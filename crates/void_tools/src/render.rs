//! Render boundary between tools and the renderer.
//!
//! Tools never draw. During a frame they may flip options on the
//! `RenderContext` and submit `RenderCommand`s into a `RenderBatch`; the
//! renderer consumes both afterwards.

bitflags::bitflags! {
    /// Per-frame toggles a tool may request.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RenderOptions: u8 {
        const HIDE_SELECTION             = 1 << 0;
        const TINT_SELECTION             = 1 << 1;
        const SHOW_SELECTION_GUIDE       = 1 << 2;
        const FORCE_HIDE_SELECTION_GUIDE = 1 << 3;
        const HIDE_MOUSE_INDICATORS      = 1 << 4;
    }
}

/// Options for the frame currently being rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderContext {
    options: RenderOptions,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderContext {
    /// Frame defaults: the selection is tinted, everything else off.
    pub const DEFAULT_OPTIONS: RenderOptions = RenderOptions::TINT_SELECTION;

    pub fn new() -> Self {
        Self {
            options: Self::DEFAULT_OPTIONS,
        }
    }

    /// Return to frame defaults before the next frame is configured.
    pub fn reset(&mut self) {
        self.options = Self::DEFAULT_OPTIONS;
    }

    pub fn options(&self) -> RenderOptions {
        self.options
    }

    pub fn hide_selection(&self) -> bool {
        self.options.contains(RenderOptions::HIDE_SELECTION)
    }

    pub fn set_hide_selection(&mut self) {
        self.options.insert(RenderOptions::HIDE_SELECTION);
    }

    pub fn tint_selection(&self) -> bool {
        self.options.contains(RenderOptions::TINT_SELECTION)
    }

    pub fn clear_tint_selection(&mut self) {
        self.options.remove(RenderOptions::TINT_SELECTION);
    }

    /// The guide is shown when requested unless some tool forced it hidden.
    pub fn show_selection_guide(&self) -> bool {
        self.options.contains(RenderOptions::SHOW_SELECTION_GUIDE)
            && !self.options.contains(RenderOptions::FORCE_HIDE_SELECTION_GUIDE)
    }

    pub fn set_show_selection_guide(&mut self) {
        self.options.insert(RenderOptions::SHOW_SELECTION_GUIDE);
    }

    pub fn set_force_hide_selection_guide(&mut self) {
        self.options.insert(RenderOptions::FORCE_HIDE_SELECTION_GUIDE);
    }

    pub fn show_mouse_indicators(&self) -> bool {
        !self.options.contains(RenderOptions::HIDE_MOUSE_INDICATORS)
    }

    pub fn set_hide_mouse_indicators(&mut self) {
        self.options.insert(RenderOptions::HIDE_MOUSE_INDICATORS);
    }
}

/// RGBA color, components in 0..=1.
pub type Color = [f32; 4];

/// Something a tool asks the renderer to draw this frame.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderCommand {
    /// A point handle.
    Handle { position: [f32; 2], color: Color },
    /// A line segment.
    Line { from: [f32; 2], to: [f32; 2], color: Color },
    /// A text label anchored at a position.
    Text { position: [f32; 2], text: String, color: Color },
}

/// Sink for render submissions.
pub trait RenderBatch {
    fn submit(&mut self, command: RenderCommand);
}

impl RenderBatch for Vec<RenderCommand> {
    fn submit(&mut self, command: RenderCommand) {
        self.push(command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_force_hide_wins_over_show() {
        let mut ctx = RenderContext::new();
        assert!(!ctx.show_selection_guide());

        ctx.set_show_selection_guide();
        assert!(ctx.show_selection_guide());

        ctx.set_force_hide_selection_guide();
        assert!(!ctx.show_selection_guide());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut ctx = RenderContext::new();
        ctx.set_hide_selection();
        ctx.clear_tint_selection();
        ctx.set_hide_mouse_indicators();

        ctx.reset();
        assert!(!ctx.hide_selection());
        assert!(ctx.tint_selection());
        assert!(ctx.show_mouse_indicators());
    }
}
