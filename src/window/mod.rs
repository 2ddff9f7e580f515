//! Window management
//!
//! A winit event loop that owns the surface and hands each frame, with the
//! input events gathered since the previous one, to a user callback.

pub mod frame_io;
pub mod settings;

pub use frame_io::{FrameInput, FrameOutput};
pub use settings::WindowSettings;

use crate::context::WgpuContext;
use crate::coords::Viewport;
use crate::core::texture::DepthTexture;
use crate::input::{Event, Key, MouseButton};
use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::event::{DeviceEvent, DeviceId, ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{CursorGrabMode, WindowId};

/// A window with GPU rendering context.
pub struct Window {
    settings: WindowSettings,
}

impl Window {
    pub fn new(settings: WindowSettings) -> Self {
        Self { settings }
    }

    /// Run the render loop until the callback asks to exit or the window closes.
    ///
    /// The callback receives a `FrameInput` and returns a `FrameOutput`.
    pub fn render_loop<F, S>(self, state_init: S, callback: F) -> anyhow::Result<()>
    where
        F: FnMut(&mut S, FrameInput<'_>) -> FrameOutput + 'static,
        S: 'static,
    {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let now = Instant::now();
        let mut app = App {
            settings: self.settings,
            state: state_init,
            callback,
            graphics: None,
            error: None,
            events: Vec::new(),
            start_time: now,
            last_frame_time: now,
            mouse_position: (0.0, 0.0),
            cursor_grabbed: false,
        };

        event_loop.run_app(&mut app)?;
        match app.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

struct Graphics {
    window: Arc<winit::window::Window>,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    ctx: WgpuContext,
    depth_texture: DepthTexture,
}

impl Graphics {
    fn new(event_loop: &ActiveEventLoop, settings: &WindowSettings) -> anyhow::Result<Self> {
        let window_attrs = winit::window::WindowAttributes::default()
            .with_title(&settings.title)
            .with_inner_size(winit::dpi::PhysicalSize::new(
                settings.size.0,
                settings.size.1,
            ))
            .with_resizable(settings.resizable);

        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window.clone())?;
        let (ctx, adapter) = WgpuContext::for_surface_blocking(&instance, &surface)?;

        let size = window.inner_size();
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first())
            .copied()
            .ok_or_else(|| anyhow::anyhow!("surface reports no texture formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: if settings.vsync {
                wgpu::PresentMode::AutoVsync
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&ctx.device, &config);

        let depth_texture =
            DepthTexture::new(&ctx, config.width, config.height, Some("depth texture"));

        tracing::info!(width = config.width, height = config.height, ?format, "window ready");

        Ok(Self {
            window,
            surface,
            config,
            ctx,
            depth_texture,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.ctx.device, &self.config);
        self.depth_texture.resize(&self.ctx, width, height);
    }

    fn set_cursor_grab(&self, grab: bool) {
        let result = if grab {
            self.window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined))
        } else {
            self.window.set_cursor_grab(CursorGrabMode::None)
        };
        if let Err(err) = result {
            tracing::warn!("cursor grab not available: {err}");
        }
        self.window.set_cursor_visible(!grab);
    }
}

struct App<S, F> {
    settings: WindowSettings,
    state: S,
    callback: F,
    graphics: Option<Graphics>,
    error: Option<anyhow::Error>,
    events: Vec<Event>,
    start_time: Instant,
    last_frame_time: Instant,
    mouse_position: (f32, f32),
    cursor_grabbed: bool,
}

impl<S, F> App<S, F>
where
    F: FnMut(&mut S, FrameInput<'_>) -> FrameOutput + 'static,
    S: 'static,
{
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(graphics) = &mut self.graphics else {
            return;
        };

        let now = Instant::now();
        let elapsed_time = (now - self.start_time).as_secs_f64();
        let delta_time = (now - self.last_frame_time).as_secs_f64();
        self.last_frame_time = now;

        let surface_texture = match graphics.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                graphics
                    .surface
                    .configure(&graphics.ctx.device, &graphics.config);
                return;
            }
            Err(e) => {
                tracing::error!("Surface error: {:?}", e);
                return;
            }
        };

        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let frame_input = FrameInput {
            events: std::mem::take(&mut self.events),
            elapsed_time,
            delta_time,
            viewport: Viewport::from_size(graphics.config.width, graphics.config.height),
            ctx: &graphics.ctx,
            surface_view: &view,
            depth_texture: &graphics.depth_texture,
            surface_format: graphics.config.format,
        };

        let output = (self.callback)(&mut self.state, frame_input);
        surface_texture.present();

        if let Some(grab) = output.grab_cursor {
            if grab != self.cursor_grabbed {
                graphics.set_cursor_grab(grab);
                self.cursor_grabbed = grab;
            }
        }
        if output.exit {
            event_loop.exit();
        }
    }
}

impl<S, F> ApplicationHandler for App<S, F>
where
    F: FnMut(&mut S, FrameInput<'_>) -> FrameOutput + 'static,
    S: 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_some() {
            return;
        }

        match Graphics::new(event_loop, &self.settings) {
            Ok(graphics) => {
                self.graphics = Some(graphics);
                self.start_time = Instant::now();
                self.last_frame_time = self.start_time;
            }
            Err(err) => {
                tracing::error!("failed to initialise graphics: {err:#}");
                self.error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(graphics) = &mut self.graphics else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                // The next frame's viewport carries the new size
                if size.width > 0 && size.height > 0 {
                    graphics.resize(size.width, size.height);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse_position = (position.x as f32, position.y as f32);
                self.events.push(Event::CursorMoved {
                    position: self.mouse_position,
                });
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = match button {
                    winit::event::MouseButton::Left => MouseButton::Left,
                    winit::event::MouseButton::Right => MouseButton::Right,
                    winit::event::MouseButton::Middle => MouseButton::Middle,
                    _ => return,
                };
                let position = self.mouse_position;
                self.events.push(match state {
                    ElementState::Pressed => Event::MousePress { button, position },
                    ElementState::Released => Event::MouseRelease { button, position },
                });
            }
            WindowEvent::KeyboardInput {
                event: key_event, ..
            } => {
                if key_event.repeat {
                    return;
                }
                if let Some(key) = Key::from_winit(&key_event.logical_key) {
                    self.events.push(match key_event.state {
                        ElementState::Pressed => Event::KeyPress { key },
                        ElementState::Released => Event::KeyRelease { key },
                    });
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.events.push(Event::MouseMotion {
                delta: (delta.0 as f32, delta.1 as f32),
            });
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(graphics) = &self.graphics {
            graphics.window.request_redraw();
        }
    }
}
