use std::fmt;

/// One of the discrete visual states an animation defines.
///
/// Key frames are ordered and an animation always moves between two
/// neighbouring ones; what a key frame looks like is up to the animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct KeyFrame(pub usize);

impl KeyFrame {
    pub const FIRST: KeyFrame = KeyFrame(0);

    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }

    /// The key frame `delta` steps away, wrapping around `count` frames.
    ///
    /// See [`step`].
    pub fn step(self, count: usize, delta: isize) -> KeyFrame {
        step(self, count, delta)
    }
}

impl fmt::Display for KeyFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyFrame({})", self.0)
    }
}

impl From<usize> for KeyFrame {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

/// Move `delta` key frames from `current` in a sequence of `count` frames,
/// wrapping around in both directions.
///
/// A single-frame sequence never moves. Otherwise `|delta|` must be smaller
/// than `count`: stepping several laps in one call is a programmer error,
/// callers that need laps step once per lap.
///
/// # Panics
/// If `count` is zero or `|delta| >= count` (except a unit step over a single
/// frame).
pub fn step(current: KeyFrame, count: usize, delta: isize) -> KeyFrame {
    assert!(count > 0, "key frame sequence cannot be empty");

    if count == 1 && delta.unsigned_abs() <= 1 {
        return KeyFrame::FIRST;
    }

    assert!(
        delta.unsigned_abs() < count,
        "multiple laps in one step are not supported (delta={} >= count={})",
        delta,
        count
    );

    let result = (current.0 as isize + delta).rem_euclid(count as isize);
    KeyFrame(result as usize)
}
