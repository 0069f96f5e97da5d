use std::path::PathBuf;

use anyhow::{Context, bail};

use fbcon::domain::primitive::GlyphSize;
use fbcon::infrastructure::tui::app_runner;
use fbcon::interface_adapter::adapter::{console_adapter_factory, pty_adapter_factory};
use fbcon::interface_adapter::controller::SimulatorController;
use fbcon::shared::config::SimulatorConfig;
use fbcon::shared::logging;
use fbcon::usecase::register_framebuffer_console;

const USAGE: &str = "usage: fbcon-sim [--config <path>] [-- command args...]";

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    config: Option<PathBuf>,
    command: Vec<String>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> anyhow::Result<Args> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().context(USAGE)?;
                parsed.config = Some(PathBuf::from(path));
            }
            "--" => {
                parsed.command = args.collect();
                break;
            }
            other => bail!("unexpected argument `{other}`\n{USAGE}"),
        }
    }
    Ok(parsed)
}

fn main() -> anyhow::Result<()> {
    let args = parse_args(std::env::args().skip(1))?;
    let mut config = match &args.config {
        Some(path) => SimulatorConfig::load(path)?,
        None => SimulatorConfig::default(),
    };
    if !args.command.is_empty() {
        config.command = args.command;
    }
    logging::init(config.log_file.as_deref())?;
    let cwd = std::env::current_dir()?;

    // Infrastructure concrete adapters
    let (framebuffer, surface) =
        console_adapter_factory::create_shared_framebuffer(&config.framebuffer)?;
    let glyphs = console_adapter_factory::create_bitmap_font(config.glyph.into());
    let mut registry = console_adapter_factory::create_console_table();
    let pty_adapter = pty_adapter_factory::create_pty_adapter();

    // Usecase
    register_framebuffer_console(&mut registry, framebuffer, glyphs, &config.console)?;

    // The pty gets the same grid the console derived from the surface.
    let glyph: GlyphSize = config.glyph.into();
    let cols = (config.framebuffer.width / glyph.width).min(u16::MAX as u32) as u16;
    let rows = (config.framebuffer.height / glyph.height).min(u16::MAX as u32) as u16;

    // Controller
    let mut controller =
        SimulatorController::new(pty_adapter, registry, config.framebuffer.name.clone());
    controller.start(&config.command, &cwd, cols, rows)?;

    // Run TUI
    app_runner::run(controller, surface, config.scale)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> anyhow::Result<Args> {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn no_arguments() {
        assert_eq!(parse(&[]).unwrap(), Args::default());
    }

    #[test]
    fn config_and_command() {
        let args = parse(&["--config", "sim.json", "--", "ls", "-l"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("sim.json")));
        assert_eq!(args.command, vec!["ls", "-l"]);
    }

    #[test]
    fn command_may_contain_flags() {
        let args = parse(&["--", "sh", "--config"]).unwrap();
        assert_eq!(args.config, None);
        assert_eq!(args.command, vec!["sh", "--config"]);
    }

    #[test]
    fn missing_config_path_is_an_error() {
        assert!(parse(&["--config"]).is_err());
    }

    #[test]
    fn unknown_flag_is_an_error() {
        assert!(parse(&["--verbose"]).is_err());
    }
}
