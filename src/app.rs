use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::config::AppConfig;
use crate::error::{AppError, GalaxyError, GalaxyResult};
use crate::galaxy::{
    ColorSlot, CurrentGalaxy, GalaxyGenerator, GalaxyParameters, ParameterEditor, ParameterField,
};
use crate::rendering::Renderer;

/// Owns the live parameters, the generator and the current galaxy slot, and
/// drives regeneration from settled keyboard edits.
pub struct App {
    config: AppConfig,
    state: Option<Renderer>,
    generator: GalaxyGenerator,
    current: CurrentGalaxy,
    editor: ParameterEditor,

    // Store modifier states at the App level
    ctrl_pressed: bool,
    shift_pressed: bool,
    last_cursor_x: f32,
    last_cursor_y: f32,

    error: Option<AppError>,
}

impl App {
    pub fn new(config: AppConfig, params: GalaxyParameters) -> Self {
        Self {
            config,
            state: None,
            generator: GalaxyGenerator::new(),
            current: CurrentGalaxy::new(),
            editor: ParameterEditor::new(params),
            ctrl_pressed: false,
            shift_pressed: false,
            last_cursor_x: 0.0,
            last_cursor_y: 0.0,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: AppError) {
        log::error!("{error}");
        self.error = Some(error);
        event_loop.exit();
    }

    /// Builds a galaxy from `params` and swaps it into the current slot. On
    /// error the galaxy already on screen stays installed.
    fn regenerate(&mut self, params: GalaxyParameters) -> GalaxyResult<()> {
        let Some(state) = self.state.as_mut() else {
            return Ok(());
        };
        let handle = self.generator.generate(&params, &mut self.current, state.scene_mut())?;
        log::debug!("{} is now current", handle.id());
        Ok(())
    }

    // Rejected edits keep the old galaxy, anything else ends the app
    fn handle_generation_error(&mut self, event_loop: &ActiveEventLoop, err: GalaxyError) {
        if err.is_recoverable() {
            log::warn!("Keeping previous galaxy: {err}");
        } else {
            self.fail(event_loop, err.into());
        }
    }

    fn release_galaxy(&mut self) {
        if let Some(state) = self.state.as_mut() {
            self.current.clear(state.scene_mut());
        }
    }

    // Returns a parameter snapshot when the key ends an edit session
    fn handle_key(
        &mut self,
        key_code: KeyCode,
        key_state: ElementState,
    ) -> Option<GalaxyParameters> {
        let field = match key_code {
            KeyCode::Digit1 => Some(ParameterField::Count),
            KeyCode::Digit2 => Some(ParameterField::Size),
            KeyCode::Digit3 => Some(ParameterField::Radius),
            KeyCode::Digit4 => Some(ParameterField::BranchCount),
            KeyCode::Digit5 => Some(ParameterField::Spin),
            KeyCode::Digit6 => Some(ParameterField::Randomness),
            KeyCode::Digit7 => Some(ParameterField::RandomnessPower),
            _ => None,
        };
        if let Some(field) = field {
            if key_state == ElementState::Pressed {
                self.editor.select(field);
                let value = field.format(self.editor.value(field));
                log::info!("Editing {} = {}", field.name(), value);
            }
            return None;
        }

        let steps = if self.shift_pressed { 10 } else { 1 };
        match (key_code, key_state) {
            // Intermediate edits while the key is held (including key repeat)
            (KeyCode::ArrowUp, ElementState::Pressed) => self.editor.nudge(steps),
            (KeyCode::ArrowDown, ElementState::Pressed) => self.editor.nudge(-steps),
            (KeyCode::KeyC, ElementState::Pressed) => self.editor.cycle_color(ColorSlot::Inward),
            (KeyCode::KeyV, ElementState::Pressed) => self.editor.cycle_color(ColorSlot::Outward),

            // Releasing an edit key settles the session
            (
                KeyCode::ArrowUp | KeyCode::ArrowDown | KeyCode::KeyC | KeyCode::KeyV,
                ElementState::Released,
            ) => {
                return self.editor.commit();
            }

            // Print the live parameter set
            (KeyCode::KeyI, ElementState::Pressed) => {
                log::info!("Galaxy parameters:\n{}", self.editor.describe())
            }

            // Reset camera to default state
            (KeyCode::KeyR, ElementState::Pressed) => {
                if let Some(state) = self.state.as_mut() {
                    state.camera_mut().reset();
                }
            }
            _ => (),
        }
        None
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        // Create window object
        let attributes = Window::default_attributes().with_title(self.config.window_title.clone());
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(err) => return self.fail(event_loop, err.into()),
        };

        match pollster::block_on(Renderer::new(window.clone(), &self.config)) {
            Ok(state) => self.state = Some(state),
            Err(err) => return self.fail(event_loop, err.into()),
        }

        // Startup generation with the initial parameter set
        let params = *self.editor.params();
        if let Err(err) = self.regenerate(params) {
            return self.fail(event_loop, err.into());
        }
        log::info!(
            "Keys: 1-7 select, Up/Down edit (Shift x10), C/V colors, I info, R reset camera"
        );

        window.request_redraw();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        match event {
            WindowEvent::CloseRequested => {
                log::info!("The close button was pressed; stopping");
                self.release_galaxy();
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => match state.render() {
                // Emits a new redraw requested event.
                Ok(()) => state.get_window().request_redraw(),
                Err(err) => self.fail(event_loop, err.into()),
            },
            WindowEvent::Resized(size) => {
                // Reconfigures the size of the surface. We do not re-render
                // here as this event is always followed up by redraw request.
                state.resize(size);
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.ctrl_pressed = modifiers.state().control_key();
                self.shift_pressed = modifiers.state().shift_key();
                state.camera_mut().handle_key_state(self.ctrl_pressed, self.shift_pressed);
            }
            WindowEvent::MouseWheel { delta, .. } => match delta {
                MouseScrollDelta::LineDelta(_, y) => state.camera_mut().handle_mouse_wheel(y),
                // Touchpad gesture - needs smaller scaling factor to feel natural
                MouseScrollDelta::PixelDelta(position) => {
                    state.camera_mut().handle_mouse_wheel(position.y as f32 * 0.003)
                }
            },
            WindowEvent::MouseInput {
                state: button_state,
                button: MouseButton::Left,
                ..
            } => match button_state {
                ElementState::Pressed => state.camera_mut().handle_mouse_press(
                    [self.last_cursor_x, self.last_cursor_y],
                    self.ctrl_pressed,
                    self.shift_pressed,
                ),
                ElementState::Released => state.camera_mut().handle_mouse_release(),
            },
            WindowEvent::CursorMoved { position, .. } => {
                self.last_cursor_x = position.x as f32;
                self.last_cursor_y = position.y as f32;
                state
                    .camera_mut()
                    .handle_mouse_move([self.last_cursor_x, self.last_cursor_y]);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key_code),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                if key_code == KeyCode::Escape {
                    self.release_galaxy();
                    event_loop.exit();
                } else if let Some(params) = self.handle_key(key_code, key_state) {
                    if let Err(err) = self.regenerate(params) {
                        self.handle_generation_error(event_loop, err);
                    }
                }
            }
            _ => (),
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.release_galaxy();
    }
}

/// Opens the viewer with the default configuration and blocks until the window closes.
pub fn run() -> Result<(), AppError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(AppConfig::default(), GalaxyParameters::default());
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
