mod render;

use std::io::BufReader;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use particles_core::{
    shimmer_time, spawn_classification_cycle, spawn_director, AnimatorParams, BloomParams,
    ClassificationHandle, DemoClassifier, Gesture, GestureState, JsonLinesClassifier,
    ParticleAnimator, ShapeGenerator, TargetDirector, TargetSlot, CAPTURE_INTERVAL_SECS,
    DEFAULT_PARTICLE_COUNT,
};
use winit::{
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::WindowBuilder,
};

use render::GpuState;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Source {
    /// Cycle through the built-in gesture table
    Demo,
    /// Read one JSON classification per line from stdin
    Stdin,
}

#[derive(Parser, Debug)]
#[command(name = "gesture-particles", version, about = "Gesture-driven particle field")]
struct Cli {
    /// Number of particles
    #[arg(long, default_value_t = DEFAULT_PARTICLE_COUNT as u32,
          value_parser = clap::value_parser!(u32).range(1..=1_000_000))]
    particles: u32,

    /// Seconds between classifications
    #[arg(long, default_value_t = CAPTURE_INTERVAL_SECS)]
    interval_secs: f32,

    /// Seed for shape sampling (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Where classifications come from
    #[arg(long, value_enum, default_value_t = Source::Demo)]
    source: Source,
}

fn window_title(gesture: Gesture) -> String {
    format!("Gesture Particles | {gesture}")
}

fn start_pipeline(
    cli: &Cli,
    slot: Arc<TargetSlot>,
) -> anyhow::Result<ClassificationHandle> {
    let interval = Duration::try_from_secs_f32(cli.interval_secs)
        .ok()
        .filter(|d| !d.is_zero())
        .with_context(|| format!("invalid --interval-secs {}", cli.interval_secs))?;

    let generator = match cli.seed {
        Some(seed) => ShapeGenerator::new(seed),
        None => ShapeGenerator::from_entropy(),
    };
    let mut director = TargetDirector::new(slot, generator);
    director.apply(&GestureState::initial())?;

    let (handle, states) = match cli.source {
        Source::Demo => spawn_classification_cycle(DemoClassifier::new(), interval)?,
        Source::Stdin => spawn_classification_cycle(
            JsonLinesClassifier::new(BufReader::new(std::io::stdin())),
            interval,
        )?,
    };
    // detached; exits when the classifier side hangs up
    spawn_director(states, director)?;
    Ok(handle)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    log::info!("[app] {cli:?}");

    let particle_count = cli.particles as usize;
    let slot = Arc::new(TargetSlot::new(particle_count));
    let classification = start_pipeline(&cli, Arc::clone(&slot))?;
    let mut animator = ParticleAnimator::new(slot, AnimatorParams::default());

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title(window_title(Gesture::None))
        .build(&event_loop)?;

    let mut gpu = pollster::block_on(GpuState::new(
        &window,
        particle_count,
        BloomParams::default(),
    ))
    .context("gpu init")?;

    let start = Instant::now();
    let mut last_frame = start;
    let mut shown_gesture = Gesture::None;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::Resized(size),
            ..
        } => gpu.resize(size),
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        }
        | Event::WindowEvent {
            event:
                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            logical_key: Key::Named(NamedKey::Escape),
                            state: ElementState::Pressed,
                            ..
                        },
                    ..
                },
            ..
        } => elwt.exit(),
        Event::AboutToWait => {
            let now = Instant::now();
            let dt = (now - last_frame).as_secs_f32();
            last_frame = now;
            let t = shimmer_time(
                start.elapsed().as_secs_f64(),
                animator.params().noise_time_freq,
            );
            animator.step(t, dt);

            let frame = animator.frame();
            if frame.gesture != shown_gesture {
                shown_gesture = frame.gesture;
                gpu.window().set_title(&window_title(shown_gesture));
            }
            match gpu.render(&frame) {
                Ok(()) => gpu.window().request_redraw(),
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    gpu.reconfigure()
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("[gpu] out of memory");
                    elwt.exit()
                }
                Err(e) => log::warn!("[gpu] {e}"),
            }
        }
        Event::LoopExiting => {
            log::info!("[app] exiting");
        }
        _ => {}
    })?;

    // a stdin reader may be parked in read_line; don't join it
    drop(classification);
    Ok(())
}
