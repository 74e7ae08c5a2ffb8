use anyhow::{Context, Result};
use backend::{load_texture, ShaderProgram, System};

use crate::animation;
use crate::camera::Camera;
use crate::clock::Clock;
use crate::config::{Config, SpriteConfig};
use crate::render::Renderer;
use crate::scene::{ObjectId, Scene, SceneObject};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppStatus {
    Running,
    Terminated,
}

impl AppStatus {
    /// Status after an input poll. `Terminated` is final.
    pub fn after_input(self, quit_requested: bool) -> AppStatus {
        match self {
            AppStatus::Running if !quit_requested => AppStatus::Running,
            _ => AppStatus::Terminated,
        }
    }
}

pub struct App {
    system: System,
    shader: ShaderProgram,
    renderer: Renderer,
    clock: Clock,
    scene: Scene,
    status: AppStatus,
}

impl App {
    pub fn new(config: &Config) -> Result<App> {
        let window = &config.window;
        let system = System::new(&window.title, window.width, window.height)
            .context("Game initialization failure")?;
        system.set_viewport(0, 0, window.width as i32, window.height as i32);

        let shader = ShaderProgram::load(&config.vertex_shader, &config.fragment_shader)?;
        let renderer = Renderer::new();

        let mut scene = Scene::new();
        let chikboy = scene.add(Self::sprite(&renderer, &config.chikboy, None)?)?;
        scene.add(Self::sprite(&renderer, &config.chicken, Some(chikboy))?)?;

        let camera = Camera::from_config(&config.projection);
        shader.set_projection_matrix(&camera.projection);
        shader.set_view_matrix(&camera.view);
        shader.use_program();

        system.set_clear_color(window.clear_color);
        system.enable_alpha_blending();

        log::info!("scene ready with {} objects", scene.len());
        Ok(App {
            system,
            shader,
            renderer,
            clock: Clock::new(),
            scene,
            status: AppStatus::Running,
        })
    }

    fn sprite(
        renderer: &Renderer,
        sprite: &SpriteConfig,
        parent: Option<ObjectId>,
    ) -> Result<SceneObject> {
        let texture = load_texture(&sprite.path)
            .with_context(|| format!("loading sprite '{}'", sprite.name))?;
        let uv_buffer = renderer.upload_tex_coords(&sprite.slice);
        let object = SceneObject::new(
            sprite.name,
            texture,
            sprite.slice,
            uv_buffer,
            sprite.motion,
            sprite.scale,
        );
        Ok(match parent {
            Some(parent) => object.with_parent(parent),
            None => object,
        })
    }

    pub fn run(&mut self) {
        while self.status == AppStatus::Running {
            self.process_input();
            self.update();
            self.render();
        }
        log::info!("main loop finished after {:.2}s", self.clock.previous_time());
    }

    fn process_input(&mut self) {
        let quit_requested = !self.system.process_io_events();
        self.status = self.status.after_input(quit_requested);
    }

    fn update(&mut self) {
        let dt = self.clock.tick(self.system.ticks_seconds());
        animation::update(&mut self.clock, &mut self.scene, dt);
    }

    fn render(&mut self) {
        let batch = self.scene.draw_batch();
        self.renderer.render(&mut self.system, &self.shader, &batch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_running_without_a_quit_signal() {
        assert_eq!(AppStatus::Running.after_input(false), AppStatus::Running);
    }

    #[test]
    fn quit_signal_terminates() {
        assert_eq!(AppStatus::Running.after_input(true), AppStatus::Terminated);
    }

    #[test]
    fn terminated_is_final() {
        assert_eq!(AppStatus::Terminated.after_input(false), AppStatus::Terminated);
        assert_eq!(AppStatus::Terminated.after_input(true), AppStatus::Terminated);
    }
}
