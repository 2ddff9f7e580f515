use std::path::PathBuf;
use std::process::ExitCode;

use svm::{
    DepthMode, FrameContext, FrameInput, FrameOutput, ImageAsset, InputState, Key, Mode,
    ReconstructConfig, SceneRenderer, SvmConfig, Viewport, Window, WindowSettings,
};

/// Mark the rear wall and vanishing point of a photograph, then fly through it.
///
/// Drag the rectangle edges and the green dot, press Enter to reconstruct,
/// Escape to quit. In fly-through mode use WASD and the mouse.
#[derive(Debug, clap::Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// RGB or RGBA image to model.
    image: PathBuf,

    /// Vertical field of view of the photograph, in degrees.
    #[clap(long, default_value_t = svm::reconstruct::DEFAULT_FOV_DEG)]
    fov: f32,

    /// How far the open side of the box reaches toward the camera.
    #[clap(long, value_enum, default_value_t = DepthArg::Perspective)]
    depth: DepthArg,

    /// Window height in pixels; the width follows the image.
    #[clap(long, default_value_t = svm::config::DEFAULT_WINDOW_HEIGHT)]
    height: u32,

    /// Fly-through speed in world units per second.
    #[clap(long, default_value_t = 10.0)]
    speed: f32,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum DepthArg {
    Perspective,
    Constant,
}

impl From<DepthArg> for DepthMode {
    fn from(arg: DepthArg) -> Self {
        match arg {
            DepthArg::Perspective => DepthMode::Perspective,
            DepthArg::Constant => DepthMode::Constant,
        }
    }
}

impl Cli {
    fn config(&self) -> SvmConfig {
        SvmConfig::new()
            .window_height(self.height)
            .move_speed(self.speed)
            .reconstruct(
                ReconstructConfig::default()
                    .fov(self.fov)
                    .depth(self.depth.into()),
            )
    }
}

struct SvmApp {
    config: SvmConfig,
    image: ImageAsset,
    input: InputState,
    mode: Option<Mode>,
    renderer: Option<SceneRenderer>,
    viewport: Viewport,
}

impl SvmApp {
    fn new(config: SvmConfig, image: ImageAsset) -> Self {
        Self {
            config,
            image,
            input: InputState::new(),
            mode: None,
            renderer: None,
            viewport: Viewport::from_size(1, 1),
        }
    }

    fn frame(&mut self, frame: FrameInput<'_>) -> anyhow::Result<FrameOutput> {
        let viewport = frame.viewport;
        let snapshot = self.input.update(&frame.events);
        if snapshot.was_pressed(Key::Escape) {
            return Ok(FrameOutput::exit());
        }

        let mode = match self.mode.take() {
            Some(mut mode) => {
                if viewport != self.viewport {
                    mode.resize(self.viewport, viewport);
                }
                mode
            }
            None => Mode::new(viewport),
        };
        self.viewport = viewport;

        let was_flying = mode.is_flying();
        let ctx = FrameContext {
            input: &snapshot,
            viewport,
            image_aspect: self.image.aspect(),
            delta_time: frame.delta_time as f32,
        };
        let mode = self.mode.insert(mode.update(&ctx, &self.config));

        let renderer = match self.renderer.take() {
            Some(renderer) => renderer,
            None => SceneRenderer::new(frame.ctx, frame.surface_format, &self.image)?,
        };
        let renderer = self.renderer.insert(renderer);
        renderer.render(&frame.screen_target(), mode, viewport, self.config.clear_color)?;

        let output = FrameOutput::new();
        Ok(if mode.is_flying() && !was_flying {
            output.grab_cursor(true)
        } else {
            output
        })
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.config();
    let image = svm::load_image(&cli.image)?;

    let (width, height) = config.window_size_for(image.width, image.height);
    let title = format!("svm - {}", cli.image.display());
    let window = Window::new(WindowSettings::new().title(title).size(width, height));

    log::info!("annotating {} ({}x{})", cli.image.display(), image.width, image.height);

    window.render_loop(SvmApp::new(config, image), |app, frame| {
        app.frame(frame).unwrap_or_else(|err| {
            log::error!("{err:#}");
            FrameOutput::exit()
        })
    })
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = match <Cli as clap::Parser>::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version land here too
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
