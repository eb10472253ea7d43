use crate::ui::Vec2;

/// Evaluate the Bézier curve of any order defined by `points` at `t`.
///
/// The curve starts at the first point and ends at the last one; the points in
/// between are control points. Uses the Bernstein form, which is plenty for
/// the handful of points a motion path has.
/// Returns [`Vec2::ZERO`] for an empty slice.
pub fn bezier(t: f32, points: &[Vec2]) -> Vec2 {
    let Some(degree) = points.len().checked_sub(1) else {
        return Vec2::ZERO;
    };

    let mt = 1.0 - t;
    points
        .iter()
        .enumerate()
        .fold(Vec2::ZERO, |acc, (i, point)| {
            let weight =
                binomial(degree, i) * t.powi(i as i32) * mt.powi((degree - i) as i32);
            acc + *point * weight
        })
}

fn binomial(n: usize, k: usize) -> f32 {
    let k = k.min(n - k);
    (0..k).fold(1.0, |acc, i| acc * (n - i) as f32 / (i + 1) as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binomial() {
        assert_eq!(binomial(0, 0), 1.0);
        assert_eq!(binomial(3, 1), 3.0);
        assert_eq!(binomial(4, 2), 6.0);
        assert_eq!(binomial(5, 5), 1.0);
    }

    #[test]
    fn test_endpoints() {
        let points = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 40.0),
            Vec2::new(30.0, -20.0),
            Vec2::new(50.0, 0.0),
        ];
        assert_eq!(bezier(0.0, &points), points[0]);
        assert_eq!(bezier(1.0, &points), points[3]);
    }

    #[test]
    fn test_two_points_is_linear() {
        let points = [Vec2::new(0.0, 0.0), Vec2::new(10.0, 20.0)];
        assert_eq!(bezier(0.5, &points), Vec2::new(5.0, 10.0));
    }

    #[test]
    fn test_quadratic_midpoint() {
        // B(0.5) = 0.25 * p0 + 0.5 * p1 + 0.25 * p2
        let points = [Vec2::new(0.0, 0.0), Vec2::new(10.0, 20.0), Vec2::new(20.0, 0.0)];
        assert_eq!(bezier(0.5, &points), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(bezier(0.3, &[]), Vec2::ZERO);
        let single = [Vec2::new(3.0, 4.0)];
        assert_eq!(bezier(0.3, &single), single[0]);
    }
}
