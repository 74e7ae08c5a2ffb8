use cgmath::Vector3;
use std::path::PathBuf;

use crate::animation::{Motion, ScaleMode};
use crate::render::SpriteSlice;

const BG_RED: f32 = 0.9765625;
const BG_GREEN: f32 = 0.97265625;
const BG_BLUE: f32 = 0.9609375;
const BG_OPACITY: f32 = 1.0;

/// Window and framebuffer setup.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub width: usize,
    pub height: usize,
    /// Handed to `glClearColor` as-is.
    pub clear_color: [f32; 4],
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Simple 2D Scene".to_string(),
            width: 640,
            height: 480,
            // Blue and green swapped, as the scene has always been shipped.
            clear_color: [BG_RED, BG_BLUE, BG_GREEN, BG_OPACITY],
        }
    }
}

/// Orthographic volume in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthoBounds {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for OrthoBounds {
    fn default() -> Self {
        Self {
            left: -5.0,
            right: 5.0,
            bottom: -3.75,
            top: 3.75,
            near: -10.0,
            far: 10.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SpriteConfig {
    pub name: &'static str,
    pub path: PathBuf,
    pub slice: SpriteSlice,
    pub motion: Motion,
    pub scale: ScaleMode,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub window: WindowConfig,
    pub projection: OrthoBounds,
    pub vertex_shader: PathBuf,
    pub fragment_shader: PathBuf,
    pub chikboy: SpriteConfig,
    pub chicken: SpriteConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            projection: OrthoBounds::default(),
            vertex_shader: PathBuf::from("shaders/vertex_textured.glsl"),
            fragment_shader: PathBuf::from("shaders/fragment_textured.glsl"),
            chikboy: SpriteConfig {
                name: "chikboy",
                path: PathBuf::from("assets/sprites/ChikBoy_idle.png"),
                // six idle frames stacked vertically
                slice: SpriteSlice::new(1, 6, 0, 0),
                motion: Motion::Diagonal,
                scale: ScaleMode::Fixed(Vector3::new(1.0, 1.0, 0.0)),
            },
            chicken: SpriteConfig {
                name: "chicken",
                path: PathBuf::from("assets/sprites/chicken_idle_right.png"),
                // four idle frames side by side
                slice: SpriteSlice::new(4, 1, 0, 0),
                motion: Motion::Orbit,
                scale: ScaleMode::Pulse,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_color_keeps_shipped_channel_order() {
        let color = WindowConfig::default().clear_color;
        assert_eq!(color, [0.9765625, 0.9609375, 0.97265625, 1.0]);
    }

    #[test]
    fn default_window_is_640_by_480() {
        let window = WindowConfig::default();
        assert_eq!((window.width, window.height), (640, 480));
    }

    #[test]
    fn projection_volume_matches_4_by_3_window() {
        let b = OrthoBounds::default();
        let aspect = (b.right - b.left) / (b.top - b.bottom);
        assert!((aspect - 640.0 / 480.0).abs() < 1e-6);
        assert_eq!((b.near, b.far), (-10.0, 10.0));
    }
}
