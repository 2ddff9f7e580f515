//! Texture coordinates by casting corners through the vanishing point
//!
//! Every wall panel is textured with the trapezoid between a rear-wall edge
//! and the image border, along the rays that leave the vanishing point
//! through the rear-wall corners.

use super::Markers;
use glam::Vec2;

/// Point on the line through `p1` and `p2` with the given `y`.
pub(crate) fn x_at_y(y: f32, p1: Vec2, p2: Vec2) -> Vec2 {
    Vec2::new((p1.x - p2.x) / (p1.y - p2.y) * (y - p1.y) + p1.x, y)
}

/// Point on the line through `p1` and `p2` with the given `x`.
pub(crate) fn y_at_x(x: f32, p1: Vec2, p2: Vec2) -> Vec2 {
    Vec2::new(x, (p1.y - p2.y) / (p1.x - p2.x) * (x - p1.x) + p1.y)
}

/// Texture coordinates of the twelve box vertices.
///
/// Callers must have validated `markers`: a vanishing point strictly inside
/// the rectangle keeps every division away from zero.
pub fn texture_coords(markers: &Markers) -> [Vec2; 12] {
    let vp = markers.vanishing;
    let bot_left = markers.bot_left();
    let bot_right = markers.bot_right;
    let top_left = markers.top_left;
    let top_right = markers.top_right();

    [
        bot_left,
        bot_right,
        x_at_y(0.0, bot_left, vp),
        x_at_y(0.0, bot_right, vp),
        y_at_x(0.0, bot_left, vp),
        y_at_x(1.0, bot_right, vp),
        top_left,
        top_right,
        x_at_y(1.0, top_left, vp),
        x_at_y(1.0, top_right, vp),
        y_at_x(0.0, top_left, vp),
        y_at_x(1.0, top_right, vp),
    ]
}

/// Continue the ray from `from` through `through` until it leaves the unit
/// square. Returns `through` if it is already outside or the ray has no
/// direction.
pub fn ray_to_image_edge(from: Vec2, through: Vec2) -> Vec2 {
    let dir = through - from;
    if dir.length_squared() <= f32::EPSILON {
        return through;
    }

    let mut t_exit = f32::INFINITY;
    for (d, p) in [(dir.x, through.x), (dir.y, through.y)] {
        if d > 0.0 {
            t_exit = t_exit.min((1.0 - p) / d);
        } else if d < 0.0 {
            t_exit = t_exit.min(-p / d);
        }
    }

    if t_exit.is_finite() && t_exit > 0.0 {
        through + dir * t_exit
    } else {
        through
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn centered() -> Markers {
        Markers {
            top_left: Vec2::new(0.25, 0.75),
            bot_right: Vec2::new(0.75, 0.25),
            vanishing: Vec2::new(0.5, 0.5),
        }
    }

    #[test]
    fn test_rear_corners_pass_through() {
        let uv = texture_coords(&centered());
        assert_eq!(uv[0], Vec2::new(0.25, 0.25));
        assert_eq!(uv[1], Vec2::new(0.75, 0.25));
        assert_eq!(uv[6], Vec2::new(0.25, 0.75));
        assert_eq!(uv[7], Vec2::new(0.75, 0.75));
    }

    #[test]
    fn test_centered_vanishing_point_is_symmetric() {
        let m = centered();
        let uv = texture_coords(&m);
        let center = m.vanishing;

        let outer = [2, 3, 4, 5, 8, 9, 10, 11];
        let d0 = uv[outer[0]].distance(center);
        for i in outer {
            assert!((uv[i].distance(center) - d0).abs() < 1e-5, "vertex {i}");
        }

        // Mirrored about the vertical centre line
        assert!((uv[2].x + uv[3].x - 1.0).abs() < 1e-5);
        assert!((uv[2].y - uv[3].y).abs() < 1e-5);
        // Mirrored about the horizontal centre line
        assert!((uv[2].y + uv[8].y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_floor_rays_hit_bottom_edge() {
        let m = Markers {
            top_left: Vec2::new(0.3, 0.8),
            bot_right: Vec2::new(0.6, 0.4),
            vanishing: Vec2::new(0.4, 0.5),
        };
        let uv = texture_coords(&m);
        assert_eq!(uv[2].y, 0.0);
        assert_eq!(uv[3].y, 0.0);
        assert_eq!(uv[4].x, 0.0);
        assert_eq!(uv[5].x, 1.0);
        assert_eq!(uv[8].y, 1.0);
        // bottom-left corner (0.3, 0.4) seen from (0.4, 0.5) heads down-left at 45 degrees
        assert!((uv[2].x - -0.1).abs() < 1e-5);
    }

    #[test]
    fn test_ray_to_image_edge_takes_first_exit() {
        let hit = ray_to_image_edge(Vec2::new(0.5, 0.5), Vec2::new(0.25, 0.4));
        assert!((hit.x - 0.0).abs() < 1e-6);
        assert!((hit.y - 0.3).abs() < 1e-6);

        let p = Vec2::new(0.3, 0.3);
        assert_eq!(ray_to_image_edge(p, p), p);
    }
}
