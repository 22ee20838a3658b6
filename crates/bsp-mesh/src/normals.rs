//! Triangle normals.

use glam::Vec3;

/// Unit normal of the triangle `(v0, v1, v2)` by the right-hand rule.
///
/// The cross product is taken in double precision. A collinear triangle has
/// no normal and gets the zero vector.
#[must_use]
pub fn face_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Vec3 {
    let origin = v0.as_dvec3();
    let n = (v1.as_dvec3() - origin).cross(v2.as_dvec3() - origin);
    let length = n.length();
    if length == 0.0 {
        return Vec3::ZERO;
    }
    (n / length).as_vec3()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn counter_clockwise_xy_points_up() {
        let n = face_normal(Vec3::ZERO, Vec3::X, Vec3::Y);
        assert_eq!(n, Vec3::Z);
    }

    #[test]
    fn clockwise_xy_points_down() {
        let n = face_normal(Vec3::ZERO, Vec3::Y, Vec3::X);
        assert_eq!(n, Vec3::NEG_Z);
    }

    #[test]
    fn collinear_is_zero() {
        let n = face_normal(Vec3::ZERO, Vec3::ONE, Vec3::splat(2.0));
        assert_eq!(n, Vec3::ZERO);
        let n = face_normal(Vec3::X, Vec3::X, Vec3::Y);
        assert_eq!(n, Vec3::ZERO);
    }

    #[test]
    fn large_world_coordinates() {
        let base = Vec3::new(-8192.0, 4096.0, 1024.0);
        let n = face_normal(base, base + Vec3::new(0.0, 64.0, 0.0), base + Vec3::new(0.0, 0.0, 64.0));
        assert!((n - Vec3::X).length() < 1e-6);
    }

    fn coord() -> impl Strategy<Value = f32> {
        -4096.0f32..4096.0
    }

    fn point() -> impl Strategy<Value = Vec3> {
        (coord(), coord(), coord()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
    }

    proptest! {
        #[test]
        fn normal_is_unit_length(v0 in point(), v1 in point(), v2 in point()) {
            let cross = (v1 - v0).as_dvec3().cross((v2 - v0).as_dvec3());
            prop_assume!(cross.length() > 1e-3);
            let n = face_normal(v0, v1, v2);
            prop_assert!((n.length() - 1.0).abs() < 1e-5);
        }

        #[test]
        fn collinear_points_give_zero(
            base in (-1000i16..1000, -1000i16..1000, -1000i16..1000),
            dir in (-8i16..8, -8i16..8, -8i16..8),
            t1 in -16i16..16,
            t2 in -16i16..16,
        ) {
            let base = Vec3::new(f32::from(base.0), f32::from(base.1), f32::from(base.2));
            let dir = Vec3::new(f32::from(dir.0), f32::from(dir.1), f32::from(dir.2));
            let n = face_normal(base, base + dir * f32::from(t1), base + dir * f32::from(t2));
            prop_assert_eq!(n, Vec3::ZERO);
        }
    }
}
