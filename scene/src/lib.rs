//! Simple 2D scene: two sprites from sprite sheets, one orbiting the other,
//! drawn as textured quads through an orthographic camera.
//!
//! - `config`: constants the demo runs with
//! - `clock`: frame timing and the accumulated animation angle
//! - `scene`: sprite objects and their parent links
//! - `animation`: the per-frame update step
//! - `camera`: fixed view and projection
//! - `render`: sprite-sheet UVs, draw records and the renderer
//! - `app`: application state and the main loop

pub mod animation;
pub mod app;
pub mod camera;
pub mod clock;
pub mod config;
pub mod render;
pub mod scene;

pub use app::{App, AppStatus};
pub use config::Config;
