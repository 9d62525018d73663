use std::path::PathBuf;

use clap::{Parser, ValueEnum};

pub const DEFAULT_IPS: u32 = 700;

/// Runs a program image in a 64x32 window. Keys 1234/QWER/ASDF/ZXCV map onto
/// the hex keypad, ESC quits.
#[derive(Debug, Clone, Parser)]
#[command(name = "chipcore", version)]
pub struct Config {
    /// Program image to load at 0x200
    pub rom: PathBuf,

    /// Instructions executed per second
    #[arg(long, default_value_t = DEFAULT_IPS, value_parser = clap::value_parser!(u32).range(1..))]
    pub ips: u32,

    /// Window scale factor
    #[arg(long, value_enum, default_value_t = WindowScale::X16)]
    pub scale: WindowScale,

    /// Seed for RND, for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Tick the timers once per instruction instead of at 60 Hz
    #[arg(long)]
    pub coupled_timers: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WindowScale {
    #[value(name = "1")]
    X1,
    #[value(name = "2")]
    X2,
    #[value(name = "4")]
    X4,
    #[value(name = "8")]
    X8,
    #[value(name = "16")]
    X16,
    #[value(name = "32")]
    X32,
}

impl Config {
    /// Instructions to run per 60 Hz frame, at least one.
    pub fn instructions_per_frame(&self) -> u32 {
        (self.ips / 60).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["chipcore", "pong.ch8"]).unwrap();
        assert_eq!(config.rom, PathBuf::from("pong.ch8"));
        assert_eq!(config.ips, DEFAULT_IPS);
        assert_eq!(config.scale, WindowScale::X16);
        assert_eq!(config.seed, None);
        assert!(!config.coupled_timers);
        assert_eq!(config.instructions_per_frame(), 11);
    }

    #[test]
    fn all_flags() {
        let config = Config::try_parse_from([
            "chipcore",
            "--ips",
            "30",
            "--scale",
            "4",
            "--seed",
            "42",
            "--coupled-timers",
            "test.ch8",
        ])
        .unwrap();
        assert_eq!(config.scale, WindowScale::X4);
        assert_eq!(config.seed, Some(42));
        assert!(config.coupled_timers);
        assert_eq!(config.instructions_per_frame(), 1);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Config::try_parse_from(["chipcore"]).is_err());
        assert!(Config::try_parse_from(["chipcore", "--ips", "0", "a.ch8"]).is_err());
        assert!(Config::try_parse_from(["chipcore", "--scale", "3", "a.ch8"]).is_err());
    }
}
