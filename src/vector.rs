// Small 2D vector helpers shared by the particle and collision code

extern crate nalgebra_glm as glm;

pub type Vec2 = glm::DVec2;

pub fn vec2(x: f64, y: f64) -> Vec2 {
    glm::vec2(x, y)
}

// Counter-clockwise rotation: (x cos a - y sin a, x sin a + y cos a)
pub fn rotate(v: &Vec2, angle: f64) -> Vec2 {
    glm::rotate_vec2(v, angle)
}

pub fn distance(p1: &Vec2, p2: &Vec2) -> f64 {
    glm::distance(p1, p2)
}

pub fn dot(a: &Vec2, b: &Vec2) -> f64 {
    glm::dot(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn assert_close(a: Vec2, b: Vec2) {
        assert!(distance(&a, &b) < 1e-9, "{:?} != {:?}", a, b);
    }

    #[test]
    fn quarter_turn_maps_x_onto_y() {
        assert_close(rotate(&vec2(1.0, 0.0), PI / 2.0), vec2(0.0, 1.0));
        assert_close(rotate(&vec2(0.0, 1.0), PI / 2.0), vec2(-1.0, 0.0));
    }

    #[test]
    fn rotation_round_trips() {
        let vectors = [vec2(3.0, -4.0), vec2(0.0, 0.0), vec2(-0.25, 17.5)];
        let angles = [0.0, 0.3, -1.7, PI, 5.0 * PI / 3.0, 42.0];
        for v in vectors.iter() {
            for &theta in angles.iter() {
                assert_close(rotate(&rotate(v, theta), -theta), *v);
            }
        }
    }

    #[test]
    fn rotation_preserves_length() {
        let v = vec2(6.0, 8.0);
        let r = rotate(&v, 1.234);
        assert!((nalgebra_glm::length(&r) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn distance_is_euclidean_and_symmetric() {
        let a = vec2(1.0, 2.0);
        let b = vec2(4.0, 6.0);
        assert!((distance(&a, &b) - 5.0).abs() < 1e-12);
        assert_eq!(distance(&a, &b), distance(&b, &a));
        assert_eq!(distance(&a, &a), 0.0);
    }
}
