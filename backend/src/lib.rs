//! Platform layer for the scene: SDL2 window and OpenGL context, GL helpers,
//! shader program and texture loading.

pub mod glutils;
pub mod shaders;
pub mod system;
pub mod texture;

pub use shaders::ShaderProgram;
pub use system::System;
pub use texture::{load_texture, Texture};
