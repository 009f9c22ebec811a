//! Physual entry point
//!
//! Opens the audio device, builds the demo, then hands control to the winit
//! event loop. Each redraw runs one frame: advance, draw, respond.

use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use physual::audio::{AudioSystem, SampleCue, SynthMusic};
use physual::game::Demo;
use physual::platform::{Key, KeyboardState, Stopwatch};
use physual::renderer::{
    Drawable, RenderState, RenderSurface, load_font, overlay_drawables, scene_drawables,
    srgb_to_linear,
};
use physual::sim::World;
use physual::{PhysualError, Settings};

type PhysualDemo = Demo<World, SampleCue, SynthMusic>;

struct App {
    settings: Settings,
    stopwatch: Stopwatch,
    keys: KeyboardState,
    demo: PhysualDemo,
    /// Keeps the output stream open
    _audio: AudioSystem,
    foreground: [f32; 4],
    background: [f32; 4],
    /// Banner and legend, drawn over the walls
    overlay: Vec<Drawable>,
    window: Option<Arc<Window>>,
    render: Option<RenderState>,
    /// First fatal error, reported once the loop exits
    error: Option<PhysualError>,
}

impl App {
    fn new(
        settings: Settings,
        stopwatch: Stopwatch,
        audio: AudioSystem,
        demo: PhysualDemo,
        overlay: Vec<Drawable>,
    ) -> Self {
        let foreground = srgb_to_linear(settings.display.foreground);
        let background = srgb_to_linear(settings.display.background);
        Self {
            settings,
            stopwatch,
            keys: KeyboardState::new(),
            demo,
            _audio: audio,
            foreground,
            background,
            overlay,
            window: None,
            render: None,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: PhysualError) {
        log::error!("{error}");
        self.error.get_or_insert(error);
        event_loop.exit();
    }

    /// Create the window and GPU state
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), PhysualError> {
        let display = &self.settings.display;
        let attrs = Window::default_attributes()
            .with_title(&display.title)
            .with_inner_size(PhysicalSize::new(display.width, display.height))
            .with_resizable(false);
        let window = Arc::new(event_loop.create_window(attrs)?);

        let size = window.inner_size();
        log::info!("Window: {}x{}", size.width, size.height);

        let render = pollster::block_on(RenderState::new(window.clone(), size.width, size.height))?;
        self.window = Some(window);
        self.render = Some(render);
        Ok(())
    }

    /// One frame: drain the accumulator, draw, then react to contacts and keys
    fn frame(&mut self) {
        let Some(render) = self.render.as_mut() else {
            return;
        };

        let now = self.stopwatch.now();
        self.demo.advance(now, &self.keys);

        let scene = self.demo.scene(&self.keys);
        render.clear(self.background);
        for drawable in scene_drawables(&scene, self.foreground) {
            render.draw(&drawable);
        }
        for drawable in &self.overlay {
            render.draw(drawable);
        }
        match render.present() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => render.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => log::error!("Out of memory!"),
            Err(e) => log::warn!("Render error: {e:?}"),
        }

        self.demo.respond(&self.keys);
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.render.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            self.fail(event_loop, e);
            return;
        }
        self.demo.start(self.stopwatch.now());
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => {
                self.keys.apply(code, state);
                if state == ElementState::Pressed
                    && Key::from_key_code(code) == Some(self.settings.controls.quit)
                {
                    event_loop.exit();
                }
            }
            WindowEvent::Focused(false) => {
                self.keys.clear();
            }
            WindowEvent::Resized(size) => {
                if let Some(render) = self.render.as_mut() {
                    render.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.frame();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<(), PhysualError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Physual starting...");

    let settings = Settings::default();
    settings.validate()?;
    log::info!("{}", settings.display.legend);
    match serde_json::to_string_pretty(&settings) {
        Ok(json) => log::debug!("Settings: {json}"),
        Err(e) => log::warn!("Failed to serialize settings: {e}"),
    }

    let display = &settings.display;
    let [banner_at, legend_at] = settings.text_origins();
    let text_color = srgb_to_linear(display.text_color);
    let overlay = overlay_drawables(
        &load_font()?,
        &[
            (display.title.as_str(), banner_at),
            (display.legend.as_str(), legend_at),
        ],
        display.font_size,
        [text_color[0], text_color[1], text_color[2]],
    );
    log::debug!("Text overlay: {} runs", overlay.len());

    let audio = AudioSystem::new(&settings.audio)?;
    let stopwatch = Stopwatch::new();
    let demo = Demo::new(
        &settings,
        World::new(settings.world.gravity),
        audio.cues(),
        audio.music(),
        stopwatch.now(),
    )?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(settings, stopwatch, audio, demo, overlay);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => {
            log::info!("Goodbye");
            Ok(())
        }
    }
}
