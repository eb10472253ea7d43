//! Easing curves applied to the raw progress of a running animation.
//!
//! Every family follows the usual easings catalogue (<https://easings.net/>)
//! and comes in three variants:
//!
//! - `In*` - starts slow, ends fast
//! - `Out*` - starts fast, ends slow
//! - `InOut*` - slow start and end, fast middle
//!
//! Families: sine, quad, cubic, quart, quint, expo, circ, back, elastic and
//! bounce. [`EasingAlgorithm::None`] is the identity.
//!
//! Curves are not clamped: `back` and `elastic` overshoot [0, 1] on purpose,
//! and inputs outside [0, 1] are evaluated as-is. Clamping, when wanted, is up
//! to the caller.
//!
//! ## Example
//!
//! ```ignore
//! Animator::new(&ctx, move_effect)
//!     .easing(EasingAlgorithm::OutBounce)
//!     .duration(Duration::from_millis(600))
//! ```

use std::f32::consts::PI;

/// Easing curve selected for an animator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EasingAlgorithm {
    /// Identity, progress is used unchanged
    #[default]
    None,
    InSine,
    OutSine,
    InOutSine,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    InQuart,
    OutQuart,
    InOutQuart,
    InQuint,
    OutQuint,
    InOutQuint,
    InExpo,
    OutExpo,
    InOutExpo,
    InCirc,
    OutCirc,
    InOutCirc,
    InBack,
    OutBack,
    InOutBack,
    InElastic,
    OutElastic,
    InOutElastic,
    InBounce,
    OutBounce,
    InOutBounce,
}

impl EasingAlgorithm {
    /// Every algorithm, identity first
    pub const ALL: [EasingAlgorithm; 31] = [
        EasingAlgorithm::None,
        EasingAlgorithm::InSine,
        EasingAlgorithm::OutSine,
        EasingAlgorithm::InOutSine,
        EasingAlgorithm::InQuad,
        EasingAlgorithm::OutQuad,
        EasingAlgorithm::InOutQuad,
        EasingAlgorithm::InCubic,
        EasingAlgorithm::OutCubic,
        EasingAlgorithm::InOutCubic,
        EasingAlgorithm::InQuart,
        EasingAlgorithm::OutQuart,
        EasingAlgorithm::InOutQuart,
        EasingAlgorithm::InQuint,
        EasingAlgorithm::OutQuint,
        EasingAlgorithm::InOutQuint,
        EasingAlgorithm::InExpo,
        EasingAlgorithm::OutExpo,
        EasingAlgorithm::InOutExpo,
        EasingAlgorithm::InCirc,
        EasingAlgorithm::OutCirc,
        EasingAlgorithm::InOutCirc,
        EasingAlgorithm::InBack,
        EasingAlgorithm::OutBack,
        EasingAlgorithm::InOutBack,
        EasingAlgorithm::InElastic,
        EasingAlgorithm::OutElastic,
        EasingAlgorithm::InOutElastic,
        EasingAlgorithm::InBounce,
        EasingAlgorithm::OutBounce,
        EasingAlgorithm::InOutBounce,
    ];

    /// Evaluate the curve at `t`.
    /// Returns the eased ratio (can exceed [0, 1] for back and elastic)
    pub fn apply(self, t: f32) -> f32 {
        match self {
            EasingAlgorithm::None => t,
            EasingAlgorithm::InSine => 1.0 - (t * PI / 2.0).cos(),
            EasingAlgorithm::OutSine => (t * PI / 2.0).sin(),
            EasingAlgorithm::InOutSine => -((PI * t).cos() - 1.0) / 2.0,
            EasingAlgorithm::InQuad => t.powi(2),
            EasingAlgorithm::OutQuad => 1.0 - (1.0 - t).powi(2),
            EasingAlgorithm::InOutQuad => in_out_power(t, 2),
            EasingAlgorithm::InCubic => t.powi(3),
            EasingAlgorithm::OutCubic => 1.0 - (1.0 - t).powi(3),
            EasingAlgorithm::InOutCubic => in_out_power(t, 3),
            EasingAlgorithm::InQuart => t.powi(4),
            EasingAlgorithm::OutQuart => 1.0 - (1.0 - t).powi(4),
            EasingAlgorithm::InOutQuart => in_out_power(t, 4),
            EasingAlgorithm::InQuint => t.powi(5),
            EasingAlgorithm::OutQuint => 1.0 - (1.0 - t).powi(5),
            EasingAlgorithm::InOutQuint => in_out_power(t, 5),
            EasingAlgorithm::InExpo => in_expo(t),
            EasingAlgorithm::OutExpo => out_expo(t),
            EasingAlgorithm::InOutExpo => in_out_expo(t),
            EasingAlgorithm::InCirc => 1.0 - (1.0 - t.powi(2)).sqrt(),
            EasingAlgorithm::OutCirc => (1.0 - (t - 1.0).powi(2)).sqrt(),
            EasingAlgorithm::InOutCirc => in_out_circ(t),
            EasingAlgorithm::InBack => in_back(t),
            EasingAlgorithm::OutBack => out_back(t),
            EasingAlgorithm::InOutBack => in_out_back(t),
            EasingAlgorithm::InElastic => in_elastic(t),
            EasingAlgorithm::OutElastic => out_elastic(t),
            EasingAlgorithm::InOutElastic => in_out_elastic(t),
            EasingAlgorithm::InBounce => 1.0 - out_bounce(1.0 - t),
            EasingAlgorithm::OutBounce => out_bounce(t),
            EasingAlgorithm::InOutBounce => in_out_bounce(t),
        }
    }
}

/// Free-function form of [`EasingAlgorithm::apply`]
pub fn ease(algorithm: EasingAlgorithm, t: f32) -> f32 {
    algorithm.apply(t)
}

// Easing functions

/// Shared in-out shape of the polynomial families (quad .. quint)
fn in_out_power(t: f32, n: i32) -> f32 {
    if t < 0.5 {
        2f32.powi(n - 1) * t.powi(n)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(n) / 2.0
    }
}

fn in_expo(t: f32) -> f32 {
    if t == 0.0 {
        0.0
    } else {
        2f32.powf(10.0 * t - 10.0)
    }
}

fn out_expo(t: f32) -> f32 {
    if t == 1.0 {
        1.0
    } else {
        1.0 - 2f32.powf(-10.0 * t)
    }
}

fn in_out_expo(t: f32) -> f32 {
    if t == 0.0 {
        0.0
    } else if t == 1.0 {
        1.0
    } else if t < 0.5 {
        2f32.powf(20.0 * t - 10.0) / 2.0
    } else {
        (2.0 - 2f32.powf(-20.0 * t + 10.0)) / 2.0
    }
}

fn in_out_circ(t: f32) -> f32 {
    if t < 0.5 {
        (1.0 - (1.0 - (2.0 * t).powi(2)).sqrt()) / 2.0
    } else {
        ((1.0 - (-2.0 * t + 2.0).powi(2)).sqrt() + 1.0) / 2.0
    }
}

const BACK_C1: f32 = 1.70158;
const BACK_C2: f32 = BACK_C1 * 1.525;
const BACK_C3: f32 = BACK_C1 + 1.0;

fn in_back(t: f32) -> f32 {
    BACK_C3 * t * t * t - BACK_C1 * t * t
}

fn out_back(t: f32) -> f32 {
    1.0 + BACK_C3 * (t - 1.0).powi(3) + BACK_C1 * (t - 1.0).powi(2)
}

fn in_out_back(t: f32) -> f32 {
    if t < 0.5 {
        ((2.0 * t).powi(2) * ((BACK_C2 + 1.0) * 2.0 * t - BACK_C2)) / 2.0
    } else {
        ((2.0 * t - 2.0).powi(2) * ((BACK_C2 + 1.0) * (t * 2.0 - 2.0) + BACK_C2) + 2.0) / 2.0
    }
}

const ELASTIC_C4: f32 = (2.0 * PI) / 3.0;
const ELASTIC_C5: f32 = (2.0 * PI) / 4.5;

fn in_elastic(t: f32) -> f32 {
    if t == 0.0 {
        0.0
    } else if t == 1.0 {
        1.0
    } else {
        -(2f32.powf(10.0 * t - 10.0)) * ((t * 10.0 - 10.75) * ELASTIC_C4).sin()
    }
}

fn out_elastic(t: f32) -> f32 {
    if t == 0.0 {
        0.0
    } else if t == 1.0 {
        1.0
    } else {
        2f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * ELASTIC_C4).sin() + 1.0
    }
}

fn in_out_elastic(t: f32) -> f32 {
    if t == 0.0 {
        0.0
    } else if t == 1.0 {
        1.0
    } else if t < 0.5 {
        -(2f32.powf(20.0 * t - 10.0) * ((20.0 * t - 11.125) * ELASTIC_C5).sin()) / 2.0
    } else {
        (2f32.powf(-20.0 * t + 10.0) * ((20.0 * t - 11.125) * ELASTIC_C5).sin()) / 2.0 + 1.0
    }
}

fn out_bounce(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;

    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

fn in_out_bounce(t: f32) -> f32 {
    if t < 0.5 {
        (1.0 - out_bounce(1.0 - 2.0 * t)) / 2.0
    } else {
        (1.0 + out_bounce(2.0 * t - 1.0)) / 2.0
    }
}
