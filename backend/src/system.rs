use super::glutils::print_opengl_info;
use anyhow::{anyhow, Context, Result};
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::video::{GLProfile, SwapInterval};

const MILLISECONDS_IN_SECOND: f32 = 1000.0;

pub struct System {
    pub sdl_context: sdl2::Sdl,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub window: sdl2::video::Window,
    pub gl_ctx: sdl2::video::GLContext,
    event_pump: sdl2::EventPump,
    timer: sdl2::TimerSubsystem,
}

impl System {
    pub fn new(title: &str, w: usize, h: usize) -> Result<System> {
        let sdl_context = sdl2::init().map_err(|e| anyhow!("SDL init failed: {e}"))?;
        let video_subsystem = sdl_context
            .video()
            .map_err(|e| anyhow!("SDL video subsystem failed: {e}"))?;
        let timer = sdl_context
            .timer()
            .map_err(|e| anyhow!("SDL timer subsystem failed: {e}"))?;

        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(GLProfile::Core);
        gl_attr.set_context_version(3, 3);

        let window = video_subsystem
            .window(title, w as u32, h as u32)
            .position_centered()
            .opengl()
            .build()
            .context("Error while building OpenGL window")?;

        let gl_ctx = window
            .gl_create_context()
            .map_err(|e| anyhow!("Error while creating OpenGL context: {e}"))?;
        window
            .gl_make_current(&gl_ctx)
            .map_err(|e| anyhow!("Error while activating OpenGL context: {e}"))?;
        gl::load_with(|name| video_subsystem.gl_get_proc_address(name) as *const _);

        if let Err(e) = video_subsystem.gl_set_swap_interval(SwapInterval::VSync) {
            log::warn!("vsync unavailable: {e}");
        }

        debug_assert_eq!(gl_attr.context_profile(), GLProfile::Core);
        debug_assert_eq!(gl_attr.context_version(), (3, 3));

        let event_pump = sdl_context
            .event_pump()
            .map_err(|e| anyhow!("SDL event pump failed: {e}"))?;

        log::info!("SDL window '{title}' {w}x{h} with OpenGL 3.3 core context");
        print_opengl_info();

        Ok(System {
            sdl_context,
            window,
            video_subsystem,
            gl_ctx,
            event_pump,
            timer,
        })
    }

    /// Drains pending events. Returns `false` once a quit signal arrived.
    pub fn process_io_events(&mut self) -> bool {
        let mut running = true;
        for event in self.event_pump.poll_iter() {
            if is_quit_event(&event) {
                log::debug!("quit signal: {event:?}");
                running = false;
            }
        }
        running
    }

    /// Seconds since SDL was initialised, from its millisecond counter.
    pub fn ticks_seconds(&self) -> f32 {
        self.timer.ticks() as f32 / MILLISECONDS_IN_SECOND
    }

    pub fn set_viewport(&self, x: i32, y: i32, w: i32, h: i32) {
        unsafe { gl::Viewport(x, y, w, h) };
    }

    pub fn set_clear_color(&self, [r, g, b, a]: [f32; 4]) {
        unsafe { gl::ClearColor(r, g, b, a) };
    }

    pub fn enable_alpha_blending(&self) {
        unsafe {
            gl::Enable(gl::BLEND);
            gl::BlendFunc(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA);
        }
    }

    pub fn clear_screen(&mut self) {
        unsafe { gl::Clear(gl::COLOR_BUFFER_BIT) };
    }

    pub fn draw_to_screen(&mut self) {
        self.window.gl_swap_window();
    }
}

/// Window close, SDL quit or Escape.
pub fn is_quit_event(event: &Event) -> bool {
    match event {
        Event::Quit { .. }
        | Event::Window {
            win_event: WindowEvent::Close,
            ..
        } => true,
        Event::KeyDown { keycode, .. } => is_quit_key(*keycode),
        _ => false,
    }
}

pub fn is_quit_key(keycode: Option<Keycode>) -> bool {
    keycode == Some(Keycode::Escape)
}

impl Drop for System {
    fn drop(&mut self) {
        log::info!("shutting down SDL");
    }
}
