/// Wirecube - Rotating Wireframe Cube
///
/// Spins a wireframe cube about all three axes and draws it in the terminal.
/// Controls:
///   - Q/ESC/Ctrl-C: Quit
use anyhow::Context;
use tracing::info;
use wirecube_core::{CubeWireframe, FrameClock, FrameLoop, SceneConfig};
use wirecube_terminal::{logging, TerminalPlatform};

fn main() -> anyhow::Result<()> {
    logging::init_tracing();

    let config = SceneConfig::default();
    let cube = CubeWireframe::cube();

    let platform =
        TerminalPlatform::acquire(&config).context("could not open the drawing surface")?;
    let clock = FrameClock::new(config.target_fps);

    let stats = FrameLoop::new(platform, clock, cube, &config)
        .run()
        .context("frame loop failed")?;

    info!(frames = stats.frames, "exiting");
    println!("Drew {} frames. Bye!", stats.frames);
    Ok(())
}
