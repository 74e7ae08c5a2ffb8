//! Per-frame update step.
//!
//! Matrices are rebuilt from scratch every frame out of the accumulated
//! angle. Transforms compose by right-multiplication, so each one applies in
//! the object's current local frame: translate, then rotate, then scale.

use cgmath::{Matrix4, Rad, Vector3};

use crate::clock::Clock;
use crate::scene::Scene;

/// How an object moves relative to its base frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    /// Slides along the diagonal: translate by (cos a, cos a, 0).
    Diagonal,
    /// Translate by (cos a, sin a, 0), then spin by `a` radians about +Y.
    Orbit,
}

impl Motion {
    pub fn matrix(&self, angle: f32) -> Matrix4<f32> {
        match self {
            Motion::Diagonal => {
                Matrix4::from_translation(Vector3::new(angle.cos(), angle.cos(), 0.0))
            }
            Motion::Orbit => {
                Matrix4::from_translation(Vector3::new(angle.cos(), angle.sin(), 0.0))
                    * Matrix4::from_angle_y(Rad(angle))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaleMode {
    Fixed(Vector3<f32>),
    /// (sin a + 0.5, sin a + 0.5, 1); goes negative for part of the cycle.
    Pulse,
}

impl ScaleMode {
    pub fn factors(&self, angle: f32) -> Vector3<f32> {
        match self {
            ScaleMode::Fixed(v) => *v,
            ScaleMode::Pulse => {
                let s = angle.sin() + 0.5;
                Vector3::new(s, s, 1.0)
            }
        }
    }

    pub fn matrix(&self, angle: f32) -> Matrix4<f32> {
        let v = self.factors(angle);
        Matrix4::from_nonuniform_scale(v.x, v.y, v.z)
    }
}

/// Recomputes every object's matrices for `angle`. Parents come before
/// their children, so one front-to-back pass sees fresh parent anchors.
pub fn animate(scene: &mut Scene, angle: f32, dt: f32) {
    for index in 0..scene.len() {
        let parent_anchor = scene
            .parent_of(index)
            .and_then(|parent| scene.get(parent))
            .map(|parent| parent.anchor);

        let object = &mut scene.objects_mut()[index];
        object.position += object.movement * object.speed * dt;

        let base = parent_anchor.unwrap_or_else(|| Matrix4::from_translation(object.position));
        object.anchor = base * object.motion.matrix(angle);
        object.model_matrix = object.anchor * object.scale.matrix(angle);
    }
}

/// One simulation step: accumulate `dt` into the clock, then re-pose the scene.
pub fn update(clock: &mut Clock, scene: &mut Scene, dt: f32) {
    clock.advance(dt);
    animate(scene, clock.angle(), dt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::tests::demo_scene;
    use cgmath::{InnerSpace, Vector4};

    const EPS: f32 = 1e-5;

    fn assert_vec3_eq(actual: Vector3<f32>, expected: Vector3<f32>) {
        assert!(
            (actual - expected).magnitude() < EPS,
            "expected {expected:?}, got {actual:?}",
        );
    }

    fn translation(m: &Matrix4<f32>) -> Vector3<f32> {
        m.w.truncate()
    }

    #[test]
    fn at_angle_zero_parent_sits_at_one_one() {
        let (mut scene, a, _) = demo_scene();
        animate(&mut scene, 0.0, 0.0);
        let m = scene.get(a).unwrap().model_matrix;
        assert_vec3_eq(translation(&m), Vector3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn at_angle_zero_child_is_offset_by_one_and_half_size() {
        let (mut scene, _, b) = demo_scene();
        animate(&mut scene, 0.0, 0.0);
        let m = scene.get(b).unwrap().model_matrix;
        assert_vec3_eq(translation(&m), Vector3::new(2.0, 1.0, 0.0));
        assert!((m.x.x - 0.5).abs() < EPS);
        assert!((m.y.y - 0.5).abs() < EPS);
        assert!((m.z.z - 1.0).abs() < EPS);
    }

    #[test]
    fn parent_scale_is_constant() {
        let (mut scene, a, _) = demo_scene();
        for step in 0..50 {
            let angle = step as f32 * 0.37;
            animate(&mut scene, angle, 0.37);
            let m = scene.get(a).unwrap().model_matrix;
            assert_eq!(m.x.truncate(), Vector3::new(1.0, 0.0, 0.0));
            assert_eq!(m.y.truncate(), Vector3::new(0.0, 1.0, 0.0));
            assert_eq!(m.z, Vector4::new(0.0, 0.0, 0.0, 0.0));
        }
    }

    #[test]
    fn child_scale_follows_sine_within_range() {
        let (mut scene, _, b) = demo_scene();
        for step in 0..100 {
            let angle = step as f32 * 0.1;
            animate(&mut scene, angle, 0.1);
            let m = scene.get(b).unwrap().model_matrix;
            let expected = angle.sin() + 0.5;
            // rotation is about Y, so the Y column carries the scale untouched
            assert!((m.y.y - expected).abs() < EPS);
            assert!((m.x.truncate().magnitude() - expected.abs()).abs() < EPS);
            assert!((-0.5 - EPS..=1.5 + EPS).contains(&m.y.y));
        }
    }

    #[test]
    fn child_rotates_about_y() {
        let (mut scene, _, b) = demo_scene();
        let angle = std::f32::consts::FRAC_PI_2;
        animate(&mut scene, angle, 0.0);
        let m = scene.get(b).unwrap().model_matrix;
        let s = angle.sin() + 0.5;
        // +X of the sprite ends up pointing along -Z
        assert_vec3_eq(m.x.truncate(), Vector3::new(0.0, 0.0, -s));
        assert_vec3_eq(m.z.truncate(), Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn child_follows_parent_translation() {
        let (mut scene, a, b) = demo_scene();
        for angle in [0.0_f32, 0.5, 1.0, 2.5, 4.0] {
            animate(&mut scene, angle, 0.0);
            let pa = translation(&scene.get(a).unwrap().model_matrix);
            let pb = translation(&scene.get(b).unwrap().model_matrix);
            assert_vec3_eq(pb - pa, Vector3::new(angle.cos(), angle.sin(), 0.0));
        }
    }

    #[test]
    fn matrices_are_rebuilt_not_accumulated() {
        let (mut scene, a, b) = demo_scene();
        animate(&mut scene, 1.3, 0.016);
        let first = (
            scene.get(a).unwrap().model_matrix,
            scene.get(b).unwrap().model_matrix,
        );
        for _ in 0..10 {
            animate(&mut scene, 1.3, 0.016);
        }
        assert_eq!(scene.get(a).unwrap().model_matrix, first.0);
        assert_eq!(scene.get(b).unwrap().model_matrix, first.1);
    }

    #[test]
    fn update_advances_clock_then_poses_scene() {
        let (mut scene, a, _) = demo_scene();
        let mut clock = Clock::new();
        update(&mut clock, &mut scene, 0.25);
        update(&mut clock, &mut scene, 0.25);
        assert_eq!(clock.angle(), 0.5);
        let m = scene.get(a).unwrap().model_matrix;
        assert_vec3_eq(translation(&m), Vector3::new(0.5_f32.cos(), 0.5_f32.cos(), 0.0));
    }

    #[test]
    fn object_pointing_outside_its_scene_animates_as_a_root() {
        let (_, _, far) = demo_scene();
        let (demo, a, _) = demo_scene();
        let mut lonely = Scene::new();
        let id = lonely.add(demo.get(a).unwrap().clone()).unwrap();
        // swapping a whole object in keeps whatever parent id it carried
        *lonely.get_mut(id).unwrap() = demo.get(a).unwrap().clone().with_parent(far);

        animate(&mut lonely, 0.0, 0.0);
        let m = lonely.get(id).unwrap().model_matrix;
        assert_vec3_eq(translation(&m), Vector3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn self_parented_object_is_rebuilt_every_frame() {
        let (mut scene, a, _) = demo_scene();
        let looped = scene.get(a).unwrap().clone().with_parent(a);
        *scene.get_mut(a).unwrap() = looped;

        animate(&mut scene, 0.0, 0.0);
        let first = scene.get(a).unwrap().model_matrix;
        animate(&mut scene, 0.0, 0.0);
        assert_eq!(scene.get(a).unwrap().model_matrix, first);
        assert_vec3_eq(translation(&first), Vector3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn moving_root_carries_its_position_into_the_anchor() {
        let (mut scene, a, b) = demo_scene();
        {
            let object = scene.get_mut(a).unwrap();
            object.movement = Vector3::new(1.0, 0.0, 0.0);
            object.speed = 2.0;
        }
        animate(&mut scene, 0.0, 0.5);
        let pa = translation(&scene.get(a).unwrap().model_matrix);
        let pb = translation(&scene.get(b).unwrap().model_matrix);
        assert_vec3_eq(pa, Vector3::new(2.0, 1.0, 0.0));
        assert_vec3_eq(pb, Vector3::new(3.0, 1.0, 0.0));
    }
}
