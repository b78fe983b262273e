//! Pairwise elastic collision between two circles.
//!
//! Both velocities are rotated into a frame whose x axis runs along the line of
//! centres, the 1D elastic equation is applied on that axis, and the results are
//! rotated back. The perpendicular component is untouched.

use crate::particle::Particle;
use crate::vector::{dot, rotate, vec2};

/// Resolve a collision between `a` and `b`, mutating both velocities.
///
/// Does nothing when the pair is already separating, so a contact that spans
/// several ticks is only resolved once.
pub fn resolve(a: &mut Particle, b: &mut Particle) {
    let velocity_diff = a.velocity - b.velocity;
    let dist = b.position - a.position;

    if dot(&velocity_diff, &dist) < 0.0 {
        return;
    }

    let angle = -dist.y.atan2(dist.x);
    let m1 = a.mass;
    let m2 = b.mass;

    let u1 = rotate(&a.velocity, angle);
    let u2 = rotate(&b.velocity, angle);

    let v1 = vec2(
        (u1.x * (m1 - m2) + u2.x * 2.0 * m2) / (m1 + m2),
        u1.y,
    );
    let v2 = vec2(
        (u2.x * (m2 - m1) + u1.x * 2.0 * m1) / (m1 + m2),
        u2.y,
    );

    a.velocity = rotate(&v1, -angle);
    b.velocity = rotate(&v2, -angle);
}

/// Two distinct mutable borrows out of one slice. Panics if `i == j`.
pub fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    assert_ne!(i, j, "pair_mut needs two distinct indices");
    if i < j {
        let (head, tail) = items.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = items.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}
