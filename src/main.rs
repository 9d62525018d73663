// Separately:
// CPU: --ips times per second (700 by default), run in per-frame batches
// Display: 60 times per second, paced by the window
// Timer: 60 times per second from elapsed wall-clock time, or once per
//        instruction with --coupled-timers

use std::fs;
use std::time::Instant;

use anyhow::{Context, Result};
use chipcore::random::{RandomSource, SeededRandom, ThreadRandom};
use chipcore::timer::TimerClock;
use chipcore::Emulator;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use window::Screen;

mod config;
mod window;

fn main() -> Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let rom = fs::read(&config.rom)
        .with_context(|| format!("failed to read program image {}", config.rom.display()))?;

    let random: Box<dyn RandomSource> = match config.seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom::new()),
    };
    let mut emu = Emulator::new(random);
    emu.load_rom(&rom)
        .with_context(|| format!("failed to load {}", config.rom.display()))?;
    info!(
        rom = %config.rom.display(),
        size = rom.len(),
        ips = config.ips,
        coupled_timers = config.coupled_timers,
        "starting"
    );

    let mut screen = Screen::new(config.scale)?;
    let mut clock = TimerClock::new();
    let mut last_frame = Instant::now();

    while screen.is_open() {
        screen.poll_keys(emu.keypad_mut());

        for _ in 0..config.instructions_per_frame() {
            let result = if config.coupled_timers {
                emu.cycle()
            } else {
                emu.step()
            };
            if let Err(err) = result {
                let pc = emu.program_counter();
                return Err(anyhow::Error::from(err)
                    .context(format!("execution stopped at {pc:#05x}")));
            }
        }

        let now = Instant::now();
        if !config.coupled_timers {
            for _ in 0..clock.advance(now - last_frame) {
                emu.tick_timers();
            }
        }
        last_frame = now;

        screen.show_sound(emu.sound_active());
        let dirty = emu.take_frame_dirty();
        screen.sync(emu.frame_buffer(), dirty)?;
    }

    info!("window closed");
    Ok(())
}
