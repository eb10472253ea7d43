use crate::animation::{Animation, AnimationFrame, KeyFrame, Layout, Starter};
use crate::ui::Ui;

/// Cross-fades between two or more layouts, one per key frame.
///
/// Idle, only the current layout is rendered. While playing, the layouts on
/// both ends of the lap are rendered with complementary opacity.
pub struct Transition {
    layouts: Vec<Box<dyn Layout>>,
}

impl Transition {
    pub fn new(first: impl Layout + 'static, second: impl Layout + 'static) -> Self {
        Self {
            layouts: vec![Box::new(first), Box::new(second)],
        }
    }

    /// Append another layout as the next key frame.
    pub fn layout(mut self, layout: impl Layout + 'static) -> Self {
        self.layouts.push(Box::new(layout));
        self
    }

    fn build_faded(&mut self, ui: &mut dyn Ui, frame: KeyFrame, alpha: f32, starter: &dyn Starter) {
        ui.push_alpha(alpha.clamp(0.0, 1.0));
        self.layouts[frame.index()].build(ui, starter);
        ui.pop_alpha();
    }
}

impl Animation for Transition {
    fn key_frames_count(&self) -> usize {
        self.layouts.len()
    }

    fn build_normal(&mut self, ui: &mut dyn Ui, current: KeyFrame, starter: &dyn Starter) {
        self.layouts[current.index()].build(ui, starter);
    }

    fn build_animation(&mut self, ui: &mut dyn Ui, frame: AnimationFrame, starter: &dyn Starter) {
        self.build_faded(ui, frame.source, 1.0 - frame.eased, starter);
        self.build_faded(ui, frame.destination, frame.eased, starter);
    }
}
