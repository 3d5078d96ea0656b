// SPDX-License-Identifier: MPL-2.0
use dft_lens::config::{self, PlaybackMode};
use dft_lens::error::{Error, Result};
use dft_lens::infrastructure::PngFrameRenderer;
use dft_lens::media;
use dft_lens::playback::{InputEvent, PlaybackDriver, SessionPhase, TokioScheduler};
use dft_lens::{CoefficientGrid, ReconstructionState};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

const USAGE: &str = "\
Usage: dft_lens [OPTIONS] <IMAGE>

Options:
  --size <N>          Working size of the square image
  --mode <MODE>       burst | step | seek
  --config <DIR>      Directory holding settings.toml
  --out <DIR>         Frame output directory [default: frames]
  --save-every <K>    Keep a numbered frame every K steps
  --no-autoplay       Do not burst through the order on start

In step mode every line on stdin applies one component.
In seek mode each line is an absolute position; an empty line steps.";

struct Flags {
    image: PathBuf,
    size: Option<usize>,
    mode: Option<PlaybackMode>,
    config_dir: Option<PathBuf>,
    out: PathBuf,
    save_every: usize,
    no_autoplay: bool,
}

fn parse_flags() -> Result<Option<Flags>> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        println!("{USAGE}");
        return Ok(None);
    }

    let size = args.opt_value_from_str("--size").map_err(cli_error)?;
    let mode = args.opt_value_from_str("--mode").map_err(cli_error)?;
    let config_dir = args.opt_value_from_str("--config").map_err(cli_error)?;
    let out = args
        .opt_value_from_str("--out")
        .map_err(cli_error)?
        .unwrap_or_else(|| PathBuf::from("frames"));
    let save_every = args
        .opt_value_from_str("--save-every")
        .map_err(cli_error)?
        .unwrap_or(0);
    let no_autoplay = args.contains("--no-autoplay");

    let image = args
        .finish()
        .into_iter()
        .next()
        .map(PathBuf::from)
        .ok_or_else(|| Error::Config(format!("missing <IMAGE> argument\n\n{USAGE}")))?;

    Ok(Some(Flags {
        image,
        size,
        mode,
        config_dir,
        out,
        save_every,
        no_autoplay,
    }))
}

fn cli_error(err: pico_args::Error) -> Error {
    Error::Config(err.to_string())
}

/// Maps one stdin line to an input event for the given mode.
fn parse_input_line(mode: PlaybackMode, line: &str) -> Option<InputEvent> {
    let line = line.trim();
    match mode {
        PlaybackMode::Step => Some(InputEvent::Trigger),
        PlaybackMode::Seek if line.is_empty() => Some(InputEvent::Trigger),
        PlaybackMode::Seek => line.parse().ok().map(InputEvent::Position),
        PlaybackMode::Burst => None,
    }
}

/// True once no burst is pending and no more input can arrive.
///
/// Closing stdin does not cancel a running burst; the session ends when the
/// burst does.
fn session_finished(bursting: bool, reading_input: bool) -> bool {
    !bursting && !reading_input
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(flags) = parse_flags()? else {
        return Ok(());
    };

    let (mut config, warning) = config::load_with_override(flags.config_dir.clone());
    if let Some(warning) = warning {
        log::warn!("Falling back to default settings: {warning}");
    }
    if let Some(size) = flags.size {
        config.image.size = Some(size);
    }
    if let Some(mode) = flags.mode {
        config.playback.mode = Some(mode);
    }
    if flags.no_autoplay {
        config.playback.autoplay = Some(false);
    }

    let size = config.image_size()?;
    let pixels = media::load_grayscale(&flags.image, size)?;
    let grid = CoefficientGrid::forward(&pixels)?;
    let state = ReconstructionState::for_image(&pixels, grid, &config.engine_settings())?;
    let renderer =
        PngFrameRenderer::new(pixels, flags.out.clone())?.with_snapshots(flags.save_every);

    log::info!(
        "Loaded {} as {n}x{n}, {} components, frames in {}",
        flags.image.display(),
        state.total_steps(),
        flags.out.display(),
        n = size.get()
    );

    let (scheduler, mut ticks) = TokioScheduler::new();
    let mut driver = PlaybackDriver::new(state, scheduler, renderer, config.playback_settings());
    driver.render();
    if config.autoplay() {
        log::info!("{}", driver.status_header());
        driver.run_to_completion();
    }

    let mode = config.mode();
    let mut stdin_open = mode != PlaybackMode::Burst;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut announced_complete = false;

    loop {
        if driver.phase() == SessionPhase::Complete && !announced_complete {
            log::info!("Reconstruction complete ({} components)", driver.state().cursor());
            announced_complete = true;
        } else if driver.phase() != SessionPhase::Complete {
            announced_complete = false;
        }
        if session_finished(driver.is_bursting(), stdin_open) {
            break;
        }

        tokio::select! {
            Some(handle) = ticks.recv() => {
                driver.on_tick(handle);
            }
            line = lines.next_line(), if stdin_open => {
                let Some(line) = line? else {
                    log::debug!("stdin closed");
                    stdin_open = false;
                    continue;
                };
                match parse_input_line(mode, &line) {
                    Some(event) => driver.handle_input(event),
                    None => log::warn!("Ignoring input line {line:?}"),
                }
            }
            else => break,
        }
    }

    driver.stop_burst();
    if let Some(err) = driver.renderer().last_error() {
        log::warn!("Last frame was not written: {err}");
    }
    Ok(())
}
