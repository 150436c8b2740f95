// Window module - Presents the error screen in a desktop window
//
// The window shows the combined frame of both screens, scaled up by an
// integer factor, using the winit and pixels crates. Frames reach the
// pixels surface through the same VideoRefresh boundary as any other host.

use super::framebuffer::BYTES_PER_PIXEL;
use super::layout::ScreenLayoutData;
use super::video::{VideoFrame, VideoRefresh};
use crate::error_screen::ErrorScreen;
use pixels::{Pixels, SurfaceTexture};
use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

/// Window configuration
#[derive(Debug, Clone, Copy)]
pub struct WindowConfig {
    /// Scale factor (1x, 2x, 3x, 4x, etc.)
    pub scale: u32,
}

impl WindowConfig {
    /// Create a new window configuration with default values
    ///
    /// Default: 2x scale
    pub fn new() -> Self {
        Self { scale: 2 }
    }

    /// Set the scale factor
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale.clamp(1, 8); // Clamp between 1x and 8x
        self
    }

    /// Get the window size in pixels for a frame of the given size
    pub fn window_size(&self, frame_width: usize, frame_height: usize) -> (u32, u32) {
        (
            frame_width as u32 * self.scale,
            frame_height as u32 * self.scale,
        )
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Video output writing into a pixels frame
struct PixelsOutput<'a> {
    frame: &'a mut [u8],
}

impl VideoRefresh for PixelsOutput<'_> {
    fn video_refresh(&mut self, frame: VideoFrame<'_>) {
        let row_bytes = frame.width * BYTES_PER_PIXEL;
        if self.frame.len() != row_bytes * frame.height {
            log::warn!(
                "Dropping {}x{} frame that doesn't match the window surface",
                frame.width,
                frame.height
            );
            return;
        }

        for (y, row) in self.frame.chunks_exact_mut(row_bytes).enumerate() {
            row.copy_from_slice(frame.row(y));
        }
    }
}

/// Display window for the error screen
pub struct ErrorDisplayWindow {
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
    config: WindowConfig,
    screen: ErrorScreen,
    layout: ScreenLayoutData,
}

impl ErrorDisplayWindow {
    /// Create a new display window (window will be created when event loop starts)
    pub fn new(screen: ErrorScreen, layout: ScreenLayoutData, config: WindowConfig) -> Self {
        Self {
            window: None,
            pixels: None,
            config,
            screen,
            layout,
        }
    }

    /// Size of the combined frame for the current layout
    fn frame_size(&self) -> (usize, usize) {
        self.layout.layout().buffer_size(self.layout.screen_gap())
    }

    /// Present the error screen to the window
    fn render(&mut self) -> Result<(), pixels::Error> {
        if let Some(pixels) = &mut self.pixels {
            let mut output = PixelsOutput {
                frame: pixels.frame_mut(),
            };
            self.screen.render(&mut self.layout, &mut output);

            pixels.render()?;
        }
        Ok(())
    }

    /// Create the window and its pixel surface
    fn create_surface(
        &self,
        event_loop: &ActiveEventLoop,
    ) -> Result<(Arc<Window>, Pixels<'static>), Box<dyn std::error::Error>> {
        let (frame_width, frame_height) = self.frame_size();
        let (window_width, window_height) = self.config.window_size(frame_width, frame_height);

        let window_attributes = Window::default_attributes()
            .with_title(format!("duoscreen - {}", self.screen.message().summary()))
            .with_inner_size(LogicalSize::new(window_width, window_height))
            .with_resizable(false);

        // Wrap window in Arc for shared ownership
        let window = Arc::new(event_loop.create_window(window_attributes)?);
        let window_size = window.inner_size();

        // Create surface texture using Arc<Window> for safe 'static lifetime
        let surface_texture =
            SurfaceTexture::new(window_size.width, window_size.height, window.clone());

        let pixels = Pixels::new(frame_width as u32, frame_height as u32, surface_texture)?;

        Ok((window, pixels))
    }
}

impl ApplicationHandler for ErrorDisplayWindow {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        match self.create_surface(event_loop) {
            Ok((window, pixels)) => {
                window.request_redraw();
                self.window = Some(window);
                self.pixels = Some(pixels);
            }
            Err(err) => {
                log::error!("Failed to create error screen window: {}", err);
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
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting...");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                log::info!("Escape pressed, exiting...");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(pixels) = &mut self.pixels {
                    if let Err(err) = pixels.resize_surface(size.width, size.height) {
                        log::error!("Failed to resize surface: {}", err);
                        event_loop.exit();
                        return;
                    }
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(err) = self.render() {
                    log::error!("Render error: {}", err);
                    event_loop.exit();
                }
            }
            _ => {}
        }
    }
}

/// Open a window showing the error screen and wait until it is closed
///
/// # Arguments
/// * `screen` - Rendered error screen
/// * `layout` - Arrangement of the two screens
/// * `config` - Window configuration
///
/// # Returns
/// Result indicating success or error
pub fn run_error_display(
    screen: ErrorScreen,
    layout: ScreenLayoutData,
    config: WindowConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let event_loop = EventLoop::new()?;

    // The image never changes, so only redraw when the window asks for it
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut display = ErrorDisplayWindow::new(screen, layout, config);
    let (frame_width, frame_height) = display.frame_size();

    log::info!(
        "Opening error screen window: {}x{} frame, layout {}, scale {}x",
        frame_width,
        frame_height,
        display.layout.layout(),
        config.scale
    );

    event_loop.run_app(&mut display)?;

    Ok(())
}
