use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::window::WindowId;

use plato_engine::core::{App as EngineApp, AppControl, FrameCtx};
use plato_engine::device::GpuInit;
use plato_engine::input::Key;
use plato_engine::paint::Color;
use plato_engine::render::{FrameUniforms, LineRenderer, MeshRenderer};
use plato_engine::scene::DrawList;
use plato_engine::window::{Runtime, RuntimeConfig};
use plato_json::SceneDocument;

use crate::camera::{CameraRig, Projection};
use crate::controls::{ControlInput, NavigationMode, OrbitControls};
use crate::lights::LightRig;
use crate::primitives::PrimitiveRenderer;

/// Window size used when the document has no `pixel_scale`.
pub const DEFAULT_WINDOW_SIZE: (f64, f64) = (1280.0, 720.0);
/// Bounds for a window size derived from `size * pixel_scale`.
pub const WINDOW_SIZE_RANGE: (f64, f64) = (320.0, 2560.0);

// ── ViewerConfig ──────────────────────────────────────────────────────────

/// Presentation settings that do not come from the document.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub title: String,
    /// Initial window size in logical pixels.
    pub size: (f64, f64),
    pub projection: Projection,
    pub background: Color,
    /// MSAA samples; `1` disables multisampling.
    pub sample_count: u32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "plato".to_string(),
            size: DEFAULT_WINDOW_SIZE,
            projection: Projection::Orthographic,
            background: Color::WHITE,
            sample_count: 4,
        }
    }
}

/// Initial window size for `doc`: its pixel size when `pixel_scale` is set,
/// clamped per axis, otherwise [`DEFAULT_WINDOW_SIZE`].
pub fn window_size_for(doc: &SceneDocument) -> (f64, f64) {
    let (lo, hi) = WINDOW_SIZE_RANGE;
    match doc.size_pixels() {
        Some([w, h]) => ((w as f64).clamp(lo, hi), (h as f64).clamp(lo, hi)),
        None => DEFAULT_WINDOW_SIZE,
    }
}

// ── Viewer ────────────────────────────────────────────────────────────────

/// Interactive window for one scene document.
///
/// ```rust,ignore
/// let doc = plato_json::load_scene(&"1.json".into())?;
/// Viewer::new(doc)
///     .title("plato")
///     .projection(Projection::Perspective)
///     .run()?;
/// ```
pub struct Viewer {
    document: SceneDocument,
    config: ViewerConfig,
}

impl Viewer {
    pub fn new(document: SceneDocument) -> Self {
        let config = ViewerConfig {
            size: window_size_for(&document),
            ..ViewerConfig::default()
        };
        Self { document, config }
    }

    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.config.title = t.into();
        self
    }

    /// Set the initial window size in logical pixels.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.config.size = (width, height);
        self
    }

    pub fn projection(mut self, projection: Projection) -> Self {
        self.config.projection = projection;
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.config.background = color;
        self
    }

    pub fn sample_count(mut self, samples: u32) -> Self {
        self.config.sample_count = samples;
        self
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Opens the window and runs until it is closed or Escape is pressed.
    pub fn run(self) -> anyhow::Result<()> {
        let runtime_config = RuntimeConfig {
            title: self.config.title.clone(),
            initial_size: LogicalSize::new(self.config.size.0, self.config.size.1),
        };
        let gpu_init = GpuInit {
            sample_count: self.config.sample_count,
            ..GpuInit::default()
        };
        let state = ViewerState::new(self.document, &self.config);
        Runtime::run(runtime_config, gpu_init, state)
    }
}

// ── ViewerState ───────────────────────────────────────────────────────────

/// Where the viewer is in its frame cycle.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum FramePhase {
    #[default]
    Idle,
    AnimatingFrame,
}

/// Internal state that implements `plato_engine::core::App`.
///
/// The draw list is built once from the document; frames only move the
/// camera and replay it.
struct ViewerState {
    background: Color,

    draw_list: DrawList,
    mesh_renderer: MeshRenderer,
    line_renderer: LineRenderer,

    camera: CameraRig,
    lights: LightRig,
    controls: OrbitControls,

    phase: FramePhase,
}

impl ViewerState {
    fn new(document: SceneDocument, config: &ViewerConfig) -> Self {
        let aspect = (config.size.0 / config.size.1) as f32;
        let camera = CameraRig::from_document(&document, config.projection, aspect);
        let lights = LightRig::from_document(&document, config.projection);

        let mode = if document.feature("pan").is_some_and(|f| f.is_truthy()) {
            NavigationMode::Pan
        } else {
            NavigationMode::Orbit
        };

        let mut draw_list = DrawList::new();
        let summary = PrimitiveRenderer::new().render_document(&document, &mut draw_list);
        if summary.skipped > 0 {
            log::warn!(
                "{} of {} primitives could not be drawn",
                summary.skipped,
                summary.primitives
            );
        }

        log::info!(
            "viewer: {:?} camera, {mode:?} navigation, {} directional lights",
            config.projection,
            lights.directional.len()
        );

        Self {
            background: config.background,
            draw_list,
            mesh_renderer: MeshRenderer::new(),
            line_renderer: LineRenderer::new(),
            camera,
            lights,
            controls: OrbitControls::new(mode),
            phase: FramePhase::Idle,
        }
    }

    /// Refits the camera if the window aspect ratio changed.
    fn sync_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 && (aspect - self.camera.aspect()).abs() > 1e-6 {
            self.camera.resize(aspect);
        }
    }

    /// Control update for one frame; returns the uniforms to draw with.
    ///
    /// Leaves the state in `AnimatingFrame` until [`Self::end_frame`].
    fn begin_frame(&mut self, input: &ControlInput, viewport_height: f32) -> FrameUniforms {
        debug_assert_eq!(self.phase, FramePhase::Idle, "frame started while another is in progress");
        self.phase = FramePhase::AnimatingFrame;

        self.controls.update(&mut self.camera, input, viewport_height);

        FrameUniforms {
            view_proj: self.camera.view_proj(),
            ambient: self.lights.ambient,
            lights: self.lights.world_lights(self.camera.pose().orientation),
        }
    }

    fn end_frame(&mut self) {
        self.phase = FramePhase::Idle;
    }
}

impl EngineApp for ViewerState {
    fn on_window_event(&mut self, _window_id: WindowId, event: &WindowEvent) -> AppControl {
        if let WindowEvent::Resized(size) = event {
            if size.width > 0 && size.height > 0 {
                self.sync_aspect(size.width as f32 / size.height as f32);
            }
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.keys_pressed.contains(&Key::Escape) {
            log::info!("escape pressed; closing viewer");
            return AppControl::Exit;
        }

        let viewport = ctx.window.viewport();
        if viewport.is_valid() {
            self.sync_aspect(viewport.aspect());
        }

        let (_, logical_height) = ctx.window.logical_size();
        let input = ControlInput::from_frame(ctx.input, ctx.input_frame);
        let uniforms = self.begin_frame(&input, logical_height);

        let list = &self.draw_list;
        let meshes = &mut self.mesh_renderer;
        let lines = &mut self.line_renderer;

        let control = ctx.render(self.background, |rctx, target| {
            meshes.render(rctx, target, list, &uniforms);
            lines.render(rctx, target, list, &uniforms);
        });

        self.end_frame();
        control
    }
}
