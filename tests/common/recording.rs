//! Recording host shared by the unit and integration tests.
//!
//! Names the crate as `guido_animations` so the same file builds inside the
//! library and from `tests/`.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use guido_animations::{Color, KeyFrame, Layout, PlayMode, Starter, StyleColorId, Ui, Vec2, Widget};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    PushColor(StyleColorId, Color),
    PopColor(usize),
    PushAlpha(f32),
    PopAlpha,
    SetCursor(Vec2),
    Draw(&'static str, Vec2),
}

/// A widget render, with the scopes in effect at that point
#[derive(Debug, Clone, PartialEq)]
pub struct Draw {
    pub name: &'static str,
    pub alpha: f32,
    pub cursor: Vec2,
    pub colors: Vec<(StyleColorId, Color)>,
}

#[derive(Default)]
pub struct RecordingUi {
    log: Rc<RefCell<Vec<Event>>>,
    pub cursor: Vec2,
    pub hovered: bool,
    pub style: HashMap<StyleColorId, Color>,
    pushed: Vec<(StyleColorId, Color)>,
}

impl RecordingUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// A widget that records a draw under `name`
    pub fn widget(&self, name: &'static str) -> impl Widget + 'static {
        let log = self.log.clone();
        move |ui: &mut dyn Ui| log.borrow_mut().push(Event::Draw(name, ui.cursor_pos()))
    }

    pub fn layout(&self, name: &'static str) -> impl Layout + 'static {
        let log = self.log.clone();
        move |ui: &mut dyn Ui, _starter: &dyn Starter| {
            log.borrow_mut().push(Event::Draw(name, ui.cursor_pos()))
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.log.borrow().clone()
    }

    pub fn clear(&mut self) {
        self.log.borrow_mut().clear();
    }

    /// Every draw since the last clear, with the alpha and colors in effect.
    ///
    /// Panics if a pop has no matching push.
    pub fn draws(&self) -> Vec<Draw> {
        let mut alpha: Vec<f32> = Vec::new();
        let mut colors: Vec<(StyleColorId, Color)> = Vec::new();
        let mut draws = Vec::new();

        for event in self.log.borrow().iter() {
            match event {
                Event::PushColor(id, color) => colors.push((*id, *color)),
                Event::PopColor(count) => {
                    let len = colors.len().checked_sub(*count).expect("unbalanced color pop");
                    colors.truncate(len);
                }
                Event::PushAlpha(a) => alpha.push(*a),
                Event::PopAlpha => {
                    alpha.pop().expect("unbalanced alpha pop");
                }
                Event::SetCursor(_) => {}
                Event::Draw(name, cursor) => draws.push(Draw {
                    name: *name,
                    alpha: alpha.iter().product(),
                    cursor: *cursor,
                    colors: colors.clone(),
                }),
            }
        }

        draws
    }

    /// Whether every push since the last clear has been popped
    pub fn is_balanced(&self) -> bool {
        let (mut alpha, mut colors) = (0isize, 0isize);
        for event in self.log.borrow().iter() {
            match event {
                Event::PushColor(..) => colors += 1,
                Event::PopColor(count) => colors -= *count as isize,
                Event::PushAlpha(_) => alpha += 1,
                Event::PopAlpha => alpha -= 1,
                _ => {}
            }
        }
        alpha == 0 && colors == 0
    }
}

impl Ui for RecordingUi {
    fn push_style_color(&mut self, id: StyleColorId, color: Color) {
        self.log.borrow_mut().push(Event::PushColor(id, color));
        self.pushed.push((id, color));
    }

    fn pop_style_color(&mut self, count: usize) {
        self.log.borrow_mut().push(Event::PopColor(count));
        let len = self.pushed.len().saturating_sub(count);
        self.pushed.truncate(len);
    }

    fn style_color(&self, id: StyleColorId) -> Color {
        self.pushed
            .iter()
            .rev()
            .find(|(pushed, _)| *pushed == id)
            .map(|(_, color)| *color)
            .or_else(|| self.style.get(&id).copied())
            .unwrap_or(Color::BLACK)
    }

    fn push_alpha(&mut self, alpha: f32) {
        self.log.borrow_mut().push(Event::PushAlpha(alpha));
    }

    fn pop_alpha(&mut self) {
        self.log.borrow_mut().push(Event::PopAlpha);
    }

    fn cursor_pos(&self) -> Vec2 {
        self.cursor
    }

    fn set_cursor_pos(&mut self, pos: Vec2) {
        self.log.borrow_mut().push(Event::SetCursor(pos));
        self.cursor = pos;
    }

    fn is_item_hovered(&self) -> bool {
        self.hovered
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Request {
    Start(PlayMode),
    KeyFrames(KeyFrame, KeyFrame, usize, PlayMode),
    Cycle(usize, PlayMode),
}

/// Starter recording the playback requests made through it
#[derive(Default)]
pub struct RecordingStarter {
    requests: RefCell<Vec<Request>>,
}

impl RecordingStarter {
    pub fn requests(&self) -> Vec<Request> {
        self.requests.borrow().clone()
    }
}

impl Starter for RecordingStarter {
    fn start(&self, mode: PlayMode) {
        self.requests.borrow_mut().push(Request::Start(mode));
    }

    fn start_key_frames(&self, begin: KeyFrame, destination: KeyFrame, cycles: usize, mode: PlayMode) {
        self.requests
            .borrow_mut()
            .push(Request::KeyFrames(begin, destination, cycles, mode));
    }

    fn start_cycle(&self, cycles: usize, mode: PlayMode) {
        self.requests.borrow_mut().push(Request::Cycle(cycles, mode));
    }
}
