use anyhow::{Context, Result};
use clap::Parser;
use lensfield::render::{render_frame, render_frame_sequential};
use lensfield::scene::{BackgroundPattern, FrameParams};
use lensfield::PixelBuffer;
use std::path::PathBuf;
use std::time::Instant;

/// Render a lensed black hole to a PNG, or explore it in a window
#[derive(Parser, Debug)]
#[command(name = "lensfield", version, about)]
struct Args {
    /// Scene JSON file (defaults to the built-in reference scene)
    #[arg(short, long)]
    scene: Option<PathBuf>,

    /// Output width in pixels
    #[arg(short = 'W', long)]
    width: Option<u32>,

    /// Output height in pixels
    #[arg(short = 'H', long)]
    height: Option<u32>,

    /// Background pattern: starfield, beams or grid
    #[arg(short, long)]
    pattern: Option<BackgroundPattern>,

    /// Global brightness multiplier
    #[arg(short, long)]
    brightness: Option<f32>,

    /// Black hole spin parameter
    #[arg(long, allow_hyphen_values = true)]
    spin: Option<f32>,

    /// PNG file to write
    #[arg(short, long, default_value = "lensfield.png")]
    output: PathBuf,

    /// Shade on a single thread
    #[arg(long)]
    sequential: bool,

    /// Write the effective scene as JSON
    #[arg(long)]
    dump_scene: Option<PathBuf>,

    /// Open an interactive window instead of writing a PNG
    #[arg(long)]
    view: bool,

    /// Disable VSync in the viewer for uncapped framerate
    #[arg(long)]
    no_vsync: bool,
}

/// Load the scene and apply command-line overrides
fn build_params(args: &Args) -> Result<FrameParams> {
    let mut params = match &args.scene {
        Some(path) => FrameParams::load(path)
            .with_context(|| format!("loading scene {}", path.display()))?,
        None => FrameParams::default(),
    };

    if args.width.is_some() || args.height.is_some() {
        let width = args.width.unwrap_or(params.camera.width);
        let height = args.height.unwrap_or(params.camera.height);
        params.camera = params.camera.with_resolution(width, height);
    }
    if let Some(pattern) = args.pattern {
        params.background.pattern = pattern;
    }
    if let Some(brightness) = args.brightness {
        params.render.brightness = brightness;
    }
    if let Some(spin) = args.spin {
        params.black_hole.spin = spin;
    }

    params.validate().context("invalid scene parameters")?;
    Ok(params)
}

fn render_png(params: &FrameParams, args: &Args) -> Result<()> {
    let mut buffer = PixelBuffer::with_size(params.camera.width, params.camera.height);

    let start = Instant::now();
    if args.sequential {
        render_frame_sequential(params, &mut buffer);
    } else {
        render_frame(params, &mut buffer);
    }
    let elapsed = start.elapsed();

    buffer
        .save_png(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    log::info!(
        "wrote {} ({}x{}, {}) in {:.1} ms",
        args.output.display(),
        buffer.width(),
        buffer.height(),
        params.background.pattern,
        elapsed.as_secs_f64() * 1000.0
    );
    Ok(())
}

#[cfg(feature = "viewer")]
fn run_viewer(params: FrameParams, vsync: bool) -> Result<()> {
    use lensfield::display::{Display, InputEvent, RenderTarget};
    use lensfield::effects::{BlackHoleEffect, Effect};
    use lensfield::util::FpsCounter;
    use sdl2::keyboard::Keycode;

    const ORBIT_STEP: f32 = 0.05;
    const FPS_REPORT_INTERVAL: f32 = 2.0;

    let (mut display, texture_creator) =
        Display::with_options("lensfield", params.camera.width, params.camera.height, vsync)
            .map_err(anyhow::Error::msg)?;
    let mut target = RenderTarget::with_size(&texture_creator, display.width(), display.height())
        .map_err(anyhow::Error::msg)?;
    let mut buffer = PixelBuffer::with_size(display.width(), display.height());

    let mut effect = BlackHoleEffect::new(params);
    let mut fps_counter = FpsCounter::new(60);
    let mut show_fps = false;
    let mut since_report = 0.0;

    log::info!("=== lensfield: {} ===", effect.name());
    log::info!("Controls:");
    log::info!("  1/2/3 - Starfield / beams / grid");
    log::info!("  +/-   - Brightness");
    log::info!("  Arrows - Orbit camera, Space - auto orbit");
    log::info!("  F     - Toggle FPS log, ESC - Quit");

    'main: loop {
        for event in display.poll_events() {
            match event {
                InputEvent::Quit => break 'main,
                InputEvent::Resized { width, height } => {
                    log::debug!("window resized to {}x{}", width, height);
                },
                InputEvent::KeyDown(key) => match key {
                    Keycode::Escape => break 'main,
                    Keycode::Num1 => effect.set_pattern(BackgroundPattern::Starfield),
                    Keycode::Num2 => effect.set_pattern(BackgroundPattern::Beams),
                    Keycode::Num3 => effect.set_pattern(BackgroundPattern::Grid),
                    Keycode::Equals | Keycode::Plus | Keycode::KpPlus => {
                        effect.scale_brightness(1.1);
                    },
                    Keycode::Minus | Keycode::KpMinus => effect.scale_brightness(1.0 / 1.1),
                    Keycode::Left => effect.nudge_orbit(-ORBIT_STEP, 0.0),
                    Keycode::Right => effect.nudge_orbit(ORBIT_STEP, 0.0),
                    Keycode::Up => effect.nudge_orbit(0.0, ORBIT_STEP),
                    Keycode::Down => effect.nudge_orbit(0.0, -ORBIT_STEP),
                    Keycode::Space => {
                        effect.toggle_auto_orbit();
                    },
                    Keycode::F => show_fps = !show_fps,
                    _ => {},
                },
            }
        }

        let (width, height) = (display.width(), display.height());
        if target.width() != width || target.height() != height {
            target = RenderTarget::with_size(&texture_creator, width, height)
                .map_err(anyhow::Error::msg)?;
            buffer.resize(width, height);
        }

        let (dt, avg_fps) = fps_counter.tick();
        effect.update(dt, width, height);
        effect.render(&mut buffer);
        display
            .present(&mut target, &buffer)
            .map_err(anyhow::Error::msg)?;

        since_report += dt;
        if show_fps && since_report >= FPS_REPORT_INTERVAL {
            log::info!(
                "{:.1} fps ({:.2} ms/frame, {}x{})",
                avg_fps,
                fps_counter.avg_frame_time_ms(),
                width,
                height
            );
            since_report = 0.0;
        }
    }

    Ok(())
}

#[cfg(not(feature = "viewer"))]
fn run_viewer(_params: FrameParams, _vsync: bool) -> Result<()> {
    anyhow::bail!("this build has no viewer; rebuild with `--features viewer`")
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let params = build_params(&args)?;

    if let Some(path) = &args.dump_scene {
        params
            .save(path)
            .with_context(|| format!("writing scene {}", path.display()))?;
        log::info!("scene written to {}", path.display());
    }

    if args.view {
        return run_viewer(params, !args.no_vsync);
    }
    render_png(&params, &args)
}
