use anyhow::{bail, Result};
use backend::Texture;
use cgmath::{Matrix4, SquareMatrix, Vector3, Zero};

use crate::animation::{Motion, ScaleMode};
use crate::render::{DrawRecord, SpriteSlice};

const DEFAULT_SPEED: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(usize);

impl ObjectId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub position: Vector3<f32>,
    pub movement: Vector3<f32>,
    pub speed: f32,
    pub motion: Motion,
    pub scale: ScaleMode,
    pub texture: Texture,
    pub slice: SpriteSlice,
    /// GPU buffer holding the tex coords for `slice`.
    pub uv_buffer: u32,
    parent: Option<ObjectId>,
    /// Placement before scaling; children build on top of it.
    pub anchor: Matrix4<f32>,
    pub model_matrix: Matrix4<f32>,
}

impl SceneObject {
    pub fn new(
        name: &str,
        texture: Texture,
        slice: SpriteSlice,
        uv_buffer: u32,
        motion: Motion,
        scale: ScaleMode,
    ) -> Self {
        Self {
            name: name.to_string(),
            position: Vector3::zero(),
            movement: Vector3::zero(),
            speed: DEFAULT_SPEED,
            motion,
            scale,
            texture,
            slice,
            uv_buffer,
            parent: None,
            anchor: Matrix4::identity(),
            model_matrix: Matrix4::identity(),
        }
    }

    /// Only settable before the object joins a scene.
    pub fn with_parent(mut self, parent: ObjectId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn parent(&self) -> Option<ObjectId> {
        self.parent
    }
}

#[derive(Debug, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `object`. Its parent, if any, must already be in the scene.
    pub fn add(&mut self, object: SceneObject) -> Result<ObjectId> {
        if let Some(parent) = object.parent {
            if parent.index() >= self.objects.len() {
                bail!(
                    "object '{}' refers to parent #{} which is not in the scene",
                    object.name,
                    parent.index()
                );
            }
        }
        let id = ObjectId(self.objects.len());
        log::debug!("scene: added '{}' as #{}", object.name, id.index());
        self.objects.push(object);
        Ok(id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.index())
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(id.index())
    }

    /// Parent of the object at `index`, if it sits strictly before it.
    /// Anything else (self, forward or foreign ids) counts as no parent.
    pub fn parent_of(&self, index: usize) -> Option<ObjectId> {
        self.objects
            .get(index)
            .and_then(|o| o.parent)
            .filter(|parent| parent.index() < index)
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub(crate) fn objects_mut(&mut self) -> &mut [SceneObject] {
        &mut self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// One draw per object, in insertion order.
    pub fn draw_batch(&self) -> Vec<DrawRecord> {
        self.objects
            .iter()
            .map(|o| DrawRecord {
                texture: o.texture,
                uv_buffer: o.uv_buffer,
                model_matrix: o.model_matrix,
            })
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    fn texture(id: u32, width: u32, height: u32) -> Texture {
        Texture { id, width, height }
    }

    /// The demo pair: a root sliding along the diagonal and an orbiting child.
    pub(crate) fn demo_scene() -> (Scene, ObjectId, ObjectId) {
        let mut scene = Scene::new();
        let a = scene
            .add(SceneObject::new(
                "chikboy",
                texture(1, 32, 192),
                SpriteSlice::new(1, 6, 0, 0),
                10,
                Motion::Diagonal,
                ScaleMode::Fixed(Vector3::new(1.0, 1.0, 0.0)),
            ))
            .unwrap();
        let b = scene
            .add(
                SceneObject::new(
                    "chicken",
                    texture(2, 128, 32),
                    SpriteSlice::new(4, 1, 0, 0),
                    11,
                    Motion::Orbit,
                    ScaleMode::Pulse,
                )
                .with_parent(a),
            )
            .unwrap();
        (scene, a, b)
    }

    #[test]
    fn ids_follow_insertion_order() {
        let (scene, a, b) = demo_scene();
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.parent_of(1), Some(a));
        assert_eq!(scene.parent_of(0), None);
    }

    #[test]
    fn unknown_parent_is_rejected() {
        let mut scene = Scene::new();
        let orphan = SceneObject::new(
            "orphan",
            texture(3, 8, 8),
            SpriteSlice::new(1, 1, 0, 0),
            0,
            Motion::Orbit,
            ScaleMode::Pulse,
        )
        .with_parent(ObjectId(0));
        let err = scene.add(orphan).unwrap_err();
        assert!(err.to_string().contains("orphan"));
        assert!(scene.is_empty());
    }

    #[test]
    fn foreign_parent_id_is_rejected() {
        let (_, _, far) = demo_scene();
        let mut scene = Scene::new();
        let object = SceneObject::new(
            "stray",
            texture(4, 8, 8),
            SpriteSlice::new(1, 1, 0, 0),
            0,
            Motion::Diagonal,
            ScaleMode::Pulse,
        )
        .with_parent(far);
        assert!(scene.add(object).is_err());
    }

    #[test]
    fn replaced_object_cannot_point_forward() {
        let (mut scene, a, b) = demo_scene();
        let forward = SceneObject::new(
            "forward",
            texture(5, 8, 8),
            SpriteSlice::new(1, 1, 0, 0),
            0,
            Motion::Diagonal,
            ScaleMode::Pulse,
        )
        .with_parent(b);
        *scene.get_mut(a).unwrap() = forward;

        assert_eq!(scene.get(a).unwrap().parent(), Some(b));
        assert_eq!(scene.parent_of(a.index()), None);
        assert_eq!(scene.parent_of(b.index()), Some(a));
        assert_eq!(scene.parent_of(7), None);
    }

    #[test]
    fn new_objects_start_at_rest() {
        let (scene, a, _) = demo_scene();
        let object = scene.get(a).unwrap();
        assert_eq!(object.position, Vector3::zero());
        assert_eq!(object.movement, Vector3::zero());
        assert_eq!(object.model_matrix, Matrix4::identity());
    }

    #[test]
    fn draw_batch_keeps_scene_order_and_state() {
        let (mut scene, a, b) = demo_scene();
        scene.get_mut(b).unwrap().model_matrix = Matrix4::from_scale(2.0);

        let batch = scene.draw_batch();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].texture, scene.get(a).unwrap().texture);
        assert_eq!(batch[0].uv_buffer, 10);
        assert_eq!(batch[0].model_matrix, Matrix4::identity());
        assert_eq!(batch[1].texture.id, 2);
        assert_eq!(batch[1].uv_buffer, 11);
        assert_eq!(batch[1].model_matrix, Matrix4::from_scale(2.0));
    }
}
