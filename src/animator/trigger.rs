use std::fmt;

use crate::animation::PlayMode;

/// When a [`Trigger`] starts playback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TriggerType {
    /// Never fires
    #[default]
    Never,
    /// Fires on every idle frame the predicate holds
    OnTrue,
    /// Fires when the predicate changes value between two idle frames
    OnChange,
}

/// Auto-start policy of an animator, evaluated once per idle frame.
pub struct Trigger {
    pub(crate) kind: TriggerType,
    pub(crate) mode: PlayMode,
    predicate: Box<dyn FnMut() -> bool>,
}

impl Trigger {
    pub fn new<F>(kind: TriggerType, mode: PlayMode, predicate: F) -> Self
    where
        F: FnMut() -> bool + 'static,
    {
        Self {
            kind,
            mode,
            predicate: Box::new(predicate),
        }
    }

    pub fn on_true<F>(mode: PlayMode, predicate: F) -> Self
    where
        F: FnMut() -> bool + 'static,
    {
        Self::new(TriggerType::OnTrue, mode, predicate)
    }

    pub fn on_change<F>(mode: PlayMode, predicate: F) -> Self
    where
        F: FnMut() -> bool + 'static,
    {
        Self::new(TriggerType::OnChange, mode, predicate)
    }

    pub fn kind(&self) -> TriggerType {
        self.kind
    }

    pub fn mode(&self) -> PlayMode {
        self.mode
    }

    /// Sample the predicate and decide whether to start, given the value seen
    /// on the previous evaluation. `last` is updated in every case.
    pub(crate) fn evaluate(&mut self, last: &mut bool) -> bool {
        if self.kind == TriggerType::Never {
            return false;
        }

        let value = (self.predicate)();
        let previous = std::mem::replace(last, value);
        match self.kind {
            TriggerType::Never => false,
            TriggerType::OnTrue => value,
            TriggerType::OnChange => value != previous,
        }
    }
}

impl fmt::Debug for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trigger")
            .field("kind", &self.kind)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_never_does_not_sample() {
        let sampled = Rc::new(Cell::new(false));
        let flag = sampled.clone();
        let mut trigger = Trigger::new(TriggerType::Never, PlayMode::Forward, move || {
            flag.set(true);
            true
        });

        let mut last = false;
        assert!(!trigger.evaluate(&mut last));
        assert!(!sampled.get());
    }

    #[test]
    fn test_on_true() {
        let value = Rc::new(Cell::new(false));
        let source = value.clone();
        let mut trigger = Trigger::on_true(PlayMode::Forward, move || source.get());

        let mut last = false;
        assert!(!trigger.evaluate(&mut last));
        value.set(true);
        assert!(trigger.evaluate(&mut last));
        assert!(trigger.evaluate(&mut last));
    }

    #[test]
    fn test_on_change_fires_on_flips_only() {
        let value = Rc::new(Cell::new(false));
        let source = value.clone();
        let mut trigger = Trigger::on_change(PlayMode::Backward, move || source.get());

        let mut last = false;
        let mut fired = Vec::new();
        for v in [false, true, true, false, false, true] {
            value.set(v);
            fired.push(trigger.evaluate(&mut last));
        }
        assert_eq!(fired, [false, true, false, true, false, true]);
        assert!(last);
    }
}
