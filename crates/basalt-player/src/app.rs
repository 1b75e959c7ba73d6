//! Player application implementing winit ApplicationHandler
//!
//! One tick per redraw: drain pad events, run the movement pass on the
//! finalized input state, step physics by elapsed time, write simulated
//! poses back, update the camera, render, present. Event callbacks only
//! translate platform events and fold them into the input router.

use crate::gamepad::GamepadInput;
use crate::movement::movement_pass;
use crate::scene::SceneHandles;
use basalt_core::{Transform, Vec2i};
use basalt_ecs::SceneWorld;
use basalt_physics::{PhysicsSync, PhysicsWorld};
use basalt_render::{Camera, RenderContext, SceneRenderer};
use basalt_runtime::{dispatch, DeviceEvent, Dispatch, FrameClock, InputRouter, LoopState};
use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::PhysicalKey;
use winit::window::{CursorGrabMode, Window, WindowId};

const WINDOW_TITLE: &str = "Basalt Player";
const WINDOW_WIDTH: u32 = 1280;
const WINDOW_HEIGHT: u32 = 720;

pub struct PlayerApp {
    // Scene state
    world: SceneWorld,
    handles: SceneHandles,

    // Systems
    physics: PhysicsWorld,
    physics_sync: PhysicsSync,
    input: InputRouter,
    gamepad: GamepadInput,
    clock: FrameClock,
    loop_state: LoopState,

    // Rendering
    window: Option<Arc<Window>>,
    render_context: Option<RenderContext>,
    scene_renderer: Option<SceneRenderer>,
    camera: Camera,

    fullscreen: bool,
}

impl PlayerApp {
    pub fn new(
        world: SceneWorld,
        physics: PhysicsWorld,
        physics_sync: PhysicsSync,
        handles: SceneHandles,
        fullscreen: bool,
    ) -> Self {
        Self {
            world,
            handles,
            physics,
            physics_sync,
            input: InputRouter::new(),
            gamepad: GamepadInput::new(),
            clock: FrameClock::new(),
            loop_state: LoopState::default(),
            window: None,
            render_context: None,
            scene_renderer: None,
            camera: Camera::new(),
            fullscreen,
        }
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) {
        let window_attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                std::process::exit(1);
            }
        };

        if self.fullscreen {
            window.set_fullscreen(Some(winit::window::Fullscreen::Borderless(None)));
        }

        // Capture the cursor for relative mouse look
        let _ = window
            .set_cursor_grab(CursorGrabMode::Confined)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked));
        window.set_cursor_visible(false);

        let render_context = match pollster::block_on(RenderContext::new(window.clone())) {
            Ok(context) => context,
            Err(e) => {
                log::error!("Failed to initialize rendering: {e}");
                std::process::exit(1);
            }
        };

        self.camera.aspect = render_context.aspect_ratio();

        let mut scene_renderer = SceneRenderer::new(&render_context);
        scene_renderer.upload_scene(&render_context, &self.world);
        log::info!("Uploaded {} renderable objects", scene_renderer.object_count());

        self.window = Some(window);
        self.render_context = Some(render_context);
        self.scene_renderer = Some(scene_renderer);
    }

    /// Fold one normalized event into the input router; quit signals flip
    /// the loop state.
    fn apply(&mut self, event: DeviceEvent) {
        if dispatch(&mut self.input, event) == Dispatch::QuitRequested {
            self.loop_state.request_quit();
        }
    }

    fn tick(&mut self) {
        // Pad events drain through the same dispatcher as window events
        for event in self.gamepad.poll() {
            self.apply(event);
        }

        // All world mutation happens here, from the finalized input state
        match movement_pass(
            &self.input,
            &mut self.world,
            &mut self.physics,
            self.handles.player,
            &mut self.gamepad,
        ) {
            Ok(outcome) => {
                if outcome.quit_requested {
                    self.loop_state.request_quit();
                }
            }
            Err(e) => log::error!("Movement pass failed: {e}"),
        }

        // Step the simulation by elapsed wall-clock time
        self.clock.tick();
        self.physics.step(self.clock.delta_time as f32);

        if let Err(e) = self.physics_sync.sync_from_physics(&mut self.world, &self.physics) {
            log::error!("Physics write-back failed: {e}");
        }

        // Camera follows the player transform
        if let Ok(t) = self.world.get::<Transform>(self.handles.player) {
            self.camera.follow(&t);
        }

        // Frame boundary: capture the edge-detection snapshot
        self.input.end_frame();
    }

    fn render(&mut self) {
        let Some(context) = &self.render_context else {
            return;
        };
        let Some(renderer) = &self.scene_renderer else {
            return;
        };

        let output = match context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                return;
            }
            Err(e) => {
                log::error!("Surface error: {e:?}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        if let Err(e) = renderer.render(context, &self.camera, &self.world, &view) {
            log::error!("Render error: {e}");
        }

        // Blocks on vsync; the tick's only bounded wait
        output.present();
    }
}

impl ApplicationHandler for PlayerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            self.initialize(event_loop);
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
                self.apply(DeviceEvent::WindowClosed);
            }

            WindowEvent::Resized(new_size) => {
                if let Some(context) = &mut self.render_context {
                    context.resize(new_size);
                    self.camera.aspect = context.aspect_ratio();
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    self.apply(DeviceEvent::Key {
                        code,
                        pressed: event.state == ElementState::Pressed,
                    });
                }
            }

            WindowEvent::RedrawRequested => {
                if self.loop_state.is_running() {
                    self.tick();
                    self.render();
                }
                if !self.loop_state.is_running() {
                    event_loop.exit();
                }
            }

            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: winit::event::DeviceEvent,
    ) {
        if let winit::event::DeviceEvent::MouseMotion { delta } = event {
            self.apply(DeviceEvent::MouseMotion {
                delta: Vec2i::new(delta.0 as i32, delta.1 as i32),
            });
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
