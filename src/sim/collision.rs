//! Collision detection and response for circles against boxes
//!
//! The ball is swept against each static box so a fast ball cannot tunnel
//! through a thin wall between two steps.

use glam::Vec2;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Grow on every side by `amount`
    pub fn expanded(&self, amount: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(amount),
            max: self.max + Vec2::splat(amount),
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Closest point of the box to `point`
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min, self.max)
    }
}

/// Result of an overlap check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether the shapes overlap
    pub hit: bool,
    /// Contact point on the box surface
    pub point: Vec2,
    /// Surface normal pointing from the box toward the circle
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Time of impact found by a sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepHit {
    /// Fraction of the displacement travelled before contact, in [0, 1]
    pub toi: f32,
    /// Face normal of the box at the contact
    pub normal: Vec2,
}

/// Check a circle against a box
pub fn circle_aabb_overlap(center: Vec2, radius: f32, aabb: &Aabb) -> CollisionResult {
    let closest = aabb.closest_point(center);
    let offset = center - closest;
    let dist_sq = offset.length_squared();

    if dist_sq > 0.0 {
        if dist_sq >= radius * radius {
            return CollisionResult::miss();
        }
        let dist = dist_sq.sqrt();
        return CollisionResult {
            hit: true,
            point: closest,
            normal: offset / dist,
            penetration: radius - dist,
        };
    }

    // Centre inside the box: push out through the nearest face
    let faces = [
        (center.x - aabb.min.x, Vec2::NEG_X),
        (aabb.max.x - center.x, Vec2::X),
        (center.y - aabb.min.y, Vec2::NEG_Y),
        (aabb.max.y - center.y, Vec2::Y),
    ];
    let (depth, normal) = faces
        .into_iter()
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .unwrap_or((0.0, Vec2::Y));
    CollisionResult {
        hit: true,
        point: center + normal * depth,
        normal,
        penetration: radius + depth,
    }
}

/// Gap between a circle's edge and a box (negative when overlapping)
pub fn circle_aabb_gap(center: Vec2, radius: f32, aabb: &Aabb) -> f32 {
    if aabb.contains(center) {
        return -radius;
    }
    center.distance(aabb.closest_point(center)) - radius
}

/// Sweep a circle along `displacement` against a box
///
/// The box is grown by the radius and the centre is ray-cast against it
/// (slab test). Starting in contact or overlapping is not a hit; overlap is
/// resolved separately.
pub fn sweep_circle_aabb(
    center: Vec2,
    radius: f32,
    displacement: Vec2,
    aabb: &Aabb,
) -> Option<SweepHit> {
    let grown = aabb.expanded(radius);
    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut normal = Vec2::ZERO;

    for axis in 0..2 {
        let p = center[axis];
        let d = displacement[axis];
        let (lo, hi) = (grown.min[axis], grown.max[axis]);

        if d.abs() < f32::EPSILON {
            if p <= lo || p >= hi {
                return None;
            }
            continue;
        }

        let t1 = (lo - p) / d;
        let t2 = (hi - p) / d;
        let (near, far) = if t1 < t2 { (t1, t2) } else { (t2, t1) };

        if near > t_enter {
            t_enter = near;
            normal = Vec2::ZERO;
            normal[axis] = -d.signum();
        }
        t_exit = t_exit.min(far);
    }

    if t_enter > t_exit || t_exit <= 0.0 || t_enter < 0.0 || t_enter > 1.0 {
        return None;
    }

    Some(SweepHit {
        toi: t_enter,
        normal,
    })
}

/// Bounce velocity off a surface
///
/// The normal component is reversed and scaled by `restitution`; the
/// tangential component loses `friction` of its magnitude.
/// With restitution 1 and no friction this is v' = v - 2(v·n)n.
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2, restitution: f32, friction: f32) -> Vec2 {
    let normal_part = velocity.dot(normal) * normal;
    let tangent_part = velocity - normal_part;
    tangent_part * (1.0 - friction.clamp(0.0, 1.0)) - normal_part * restitution
}

#[cfg(test)]
mod tests {
    use super::*;

    fn right_wall() -> Aabb {
        Aabb::from_center(Vec2::new(79.0, -30.0), Vec2::new(1.0, 30.0))
    }

    #[test]
    fn test_overlap_from_outside() {
        let result = circle_aabb_overlap(Vec2::new(77.5, -30.0), 1.0, &right_wall());
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::NEG_X);
        assert!((result.penetration - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_overlap_miss() {
        let result = circle_aabb_overlap(Vec2::new(70.0, -30.0), 1.0, &right_wall());
        assert!(!result.hit);
    }

    #[test]
    fn test_overlap_centre_inside_uses_nearest_face() {
        let result = circle_aabb_overlap(Vec2::new(78.2, -30.0), 1.0, &right_wall());
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::NEG_X);
        assert!((result.penetration - 1.2).abs() < 1e-5);
    }

    #[test]
    fn test_gap() {
        let gap = circle_aabb_gap(Vec2::new(76.0, -30.0), 1.0, &right_wall());
        assert!((gap - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_sweep_hits_face() {
        let hit = sweep_circle_aabb(
            Vec2::new(70.0, -30.0),
            1.0,
            Vec2::new(14.0, 0.0),
            &right_wall(),
        )
        .expect("should hit the wall");
        // Contact when centre reaches x = 77
        assert!((hit.toi - 0.5).abs() < 1e-5);
        assert_eq!(hit.normal, Vec2::NEG_X);
    }

    #[test]
    fn test_sweep_too_short() {
        let hit = sweep_circle_aabb(
            Vec2::new(70.0, -30.0),
            1.0,
            Vec2::new(2.0, 0.0),
            &right_wall(),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_sweep_moving_away_from_contact() {
        let hit = sweep_circle_aabb(
            Vec2::new(77.0, -30.0),
            1.0,
            Vec2::new(-1.3, 0.0),
            &right_wall(),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_sweep_parallel_outside_slab() {
        let hit = sweep_circle_aabb(
            Vec2::new(40.0, -30.0),
            1.0,
            Vec2::new(0.0, 50.0),
            &right_wall(),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_reflect_velocity_perfect_bounce() {
        let v = reflect_velocity(Vec2::new(80.0, 5.0), Vec2::NEG_X, 1.0, 0.0);
        assert_eq!(v, Vec2::new(-80.0, 5.0));
    }

    #[test]
    fn test_reflect_velocity_inelastic_with_friction() {
        let v = reflect_velocity(Vec2::new(10.0, 4.0), Vec2::NEG_X, 0.5, 0.25);
        assert!((v.x + 5.0).abs() < 1e-5);
        assert!((v.y - 3.0).abs() < 1e-5);
    }
}
