use cgmath::{ortho, Matrix4, SquareMatrix};

use crate::config::OrthoBounds;

/// Fixed view and projection. Built once and uploaded once at start-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub projection: Matrix4<f32>,
    pub view: Matrix4<f32>,
}

impl Camera {
    pub fn from_config(bounds: &OrthoBounds) -> Self {
        Self {
            projection: ortho(
                bounds.left,
                bounds.right,
                bounds.bottom,
                bounds.top,
                bounds.near,
                bounds.far,
            ),
            view: Matrix4::identity(),
        }
    }
}
