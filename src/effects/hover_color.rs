use super::color_flow::{ColorFlow, ColorSource};
use crate::animation::{Animation, AnimationFrame, KeyFrame, PlayMode, Starter};
use crate::ui::{StyleColorId, Ui, Widget};

/// A two-color [`ColorFlow`] that plays itself: forward when the pointer
/// enters the widget, backward when it leaves.
///
/// Hover is sampled after every idle render, so a change while the color is
/// flowing is picked up as soon as the lap ends.
pub struct HoverColor<W: Widget> {
    flow: ColorFlow<W>,
}

impl<W: Widget> HoverColor<W> {
    pub fn new(
        widget: W,
        normal: impl Into<ColorSource>,
        hovered: impl Into<ColorSource>,
        targets: impl IntoIterator<Item = StyleColorId>,
    ) -> Self {
        let colors: [ColorSource; 2] = [normal.into(), hovered.into()];
        Self {
            flow: ColorFlow::new(widget, colors, targets),
        }
    }

    /// Flow the `normal` slot towards the color of the `hovered` slot, so the
    /// widget eases into its hover color instead of snapping to it.
    pub fn style(widget: W, normal: StyleColorId, hovered: StyleColorId) -> Self {
        let mut targets = vec![normal];
        if hovered != normal {
            targets.push(hovered);
        }
        Self::new(widget, normal, hovered, targets)
    }
}

impl<W: Widget> Animation for HoverColor<W> {
    fn key_frames_count(&self) -> usize {
        2
    }

    fn build_normal(&mut self, ui: &mut dyn Ui, current: KeyFrame, starter: &dyn Starter) {
        self.flow.build_normal(ui, current, starter);

        let hovered = ui.is_item_hovered();
        match (hovered, current.index()) {
            (true, 0) => starter.start(PlayMode::Forward),
            (false, 1) => starter.start(PlayMode::Backward),
            _ => {}
        }
    }

    fn build_animation(&mut self, ui: &mut dyn Ui, frame: AnimationFrame, starter: &dyn Starter) {
        self.flow.build_animation(ui, frame, starter);
    }
}
