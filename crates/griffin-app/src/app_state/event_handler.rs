//! `ApplicationHandler` implementation for the winit event loop.

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;

use griffin_config::GriffinConfig;

use super::core::GriffinApp;
use super::init::window_bounds;
use super::types::UserEvent;

impl ApplicationHandler<UserEvent> for GriffinApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if !self.initialize(event_loop) {
            self.shutdown();
            event_loop.exit();
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: UserEvent) {
        match event {
            UserEvent::EngineWake => self.serve_engine_requests(),
            UserEvent::Host(update) => self.push_to_shell(update),
            UserEvent::ConfigReloaded(config) => self.apply_config(*config),
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
                tracing::info!("Window close requested");
                self.shutdown();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    self.resize_shell();
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => self.resize_shell(),

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.should_exit {
            self.shutdown();
            event_loop.exit();
            return;
        }
        self.poll_and_schedule(event_loop);
    }
}

impl GriffinApp {
    /// Serve everything the render engine queued. Webviews can only be
    /// touched from this thread.
    pub(super) fn serve_engine_requests(&mut self) {
        if let (Some(wry), Some(window)) = (self.wry.as_mut(), self.window.as_ref()) {
            wry.process_requests(&**window);
        }
    }

    /// The shell covers the whole client area; it reports the host region
    /// for surfaces back over IPC once its own layout settles.
    fn resize_shell(&mut self) {
        if let (Some(wry), Some(window)) = (self.wry.as_ref(), self.window.as_ref()) {
            wry.resize_shell(window_bounds(window));
        }
    }

    fn apply_config(&mut self, config: GriffinConfig) {
        if let Some(host) = &self.host {
            host.config_reloaded(config.clone());
        }
        self.config = config;
    }
}
