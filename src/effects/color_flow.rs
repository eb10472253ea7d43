use crate::animation::{Animation, AnimationFrame, KeyFrame, Starter};
use crate::ui::{Color, StyleColorId, Ui, Widget};

/// Where a key frame color comes from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorSource {
    Fixed(Color),
    /// Whatever the style slot resolves to when rendering
    Style(StyleColorId),
}

impl ColorSource {
    pub fn resolve(&self, ui: &dyn Ui) -> Color {
        match *self {
            ColorSource::Fixed(color) => color,
            ColorSource::Style(id) => ui.style_color(id),
        }
    }
}

impl From<Color> for ColorSource {
    fn from(color: Color) -> Self {
        ColorSource::Fixed(color)
    }
}

impl From<StyleColorId> for ColorSource {
    fn from(id: StyleColorId) -> Self {
        ColorSource::Style(id)
    }
}

/// Flows the color of some style slots through a list of colors, one per key
/// frame, around a wrapped widget.
pub struct ColorFlow<W: Widget> {
    widget: W,
    colors: Vec<ColorSource>,
    targets: Vec<StyleColorId>,
}

impl<W: Widget> ColorFlow<W> {
    /// Flow every slot of `targets` through `colors`.
    ///
    /// # Panics
    /// If fewer than two colors are given.
    pub fn new<C, I, T>(widget: W, colors: I, targets: T) -> Self
    where
        C: Into<ColorSource>,
        I: IntoIterator<Item = C>,
        T: IntoIterator<Item = StyleColorId>,
    {
        let colors: Vec<ColorSource> = colors.into_iter().map(Into::into).collect();
        assert!(colors.len() >= 2, "a color flow needs at least two colors");

        Self {
            widget,
            colors,
            targets: targets.into_iter().collect(),
        }
    }

    /// Flow `target` from the color it has in the style to the color of
    /// `destination`.
    pub fn style(widget: W, target: StyleColorId, destination: StyleColorId) -> Self {
        Self::new(widget, [target, destination], [target])
    }

    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    fn color(&self, ui: &dyn Ui, frame: KeyFrame) -> Color {
        self.colors[frame.index()].resolve(ui)
    }

    /// Render the widget with every target slot set to `color`
    pub(crate) fn build_with(&mut self, ui: &mut dyn Ui, color: Color) {
        for id in &self.targets {
            ui.push_style_color(*id, color);
        }
        self.widget.build(ui);
        ui.pop_style_color(self.targets.len());
    }
}

impl<W: Widget> Animation for ColorFlow<W> {
    fn key_frames_count(&self) -> usize {
        self.colors.len()
    }

    fn build_normal(&mut self, ui: &mut dyn Ui, current: KeyFrame, _starter: &dyn Starter) {
        let color = self.color(ui, current);
        self.build_with(ui, color);
    }

    fn build_animation(&mut self, ui: &mut dyn Ui, frame: AnimationFrame, _starter: &dyn Starter) {
        let from = self.color(ui, frame.source);
        let to = self.color(ui, frame.destination);
        self.build_with(ui, from.mix_rgb(&to, frame.eased));
    }
}
