// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "orrery")]
#[command(about = "Scroll-driven camera choreography for a 3D scene", long_about = None)]
pub struct Cli {
    /// JSON viewer configuration; defaults are used for anything missing
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Replay a JSON input script headlessly instead of opening a window
    #[arg(long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Disable UI elements and console output
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// Fixed frame rate for scripted replay
    #[arg(long, default_value_t = 60.0)]
    pub fps: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["orrery"]);
        assert!(cli.config.is_none());
        assert!(cli.script.is_none());
        assert!(!cli.no_ui);
        assert_eq!(cli.fps, 60.0);
    }

    #[test]
    fn script_mode() {
        let cli = Cli::parse_from([
            "orrery",
            "--config",
            "viewer.json",
            "--script",
            "tour.json",
            "--no-ui",
            "--fps",
            "30",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("viewer.json")));
        assert_eq!(cli.script, Some(PathBuf::from("tour.json")));
        assert!(cli.no_ui);
        assert_eq!(cli.fps, 30.0);
    }
}
