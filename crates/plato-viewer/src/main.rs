use std::process::ExitCode;

use clap::Parser;

use plato_draw::{Projection, Viewer};
use plato_engine::logging::{LoggingConfig, init_logging};
use plato_json::{SceneSource, load_scene};

/// Open a plato JSON scene in an interactive window.
///
/// Drag to rotate, right-drag or D+drag to pan, scroll or S+drag to zoom,
/// arrow keys to pan, R to reset the view, Escape to quit.
#[derive(Debug, Parser)]
#[command(name = "plato", version)]
struct Args {
    /// Scene file path or http(s) URL.
    #[arg(default_value = "1.json")]
    source: String,

    /// Use a perspective camera instead of the default orthographic one.
    #[arg(long)]
    perspective: bool,

    /// Window title; defaults to the scene source.
    #[arg(long)]
    title: Option<String>,

    /// Window width in logical pixels (overrides the document's pixel_scale).
    #[arg(long, requires = "height", value_parser = positive_size)]
    width: Option<f64>,

    /// Window height in logical pixels.
    #[arg(long, requires = "width", value_parser = positive_size)]
    height: Option<f64>,

    /// Log filter in env_logger syntax, e.g. "debug" or "plato_draw=trace".
    #[arg(long)]
    log: Option<String>,
}

/// Window dimension in logical pixels: a finite number greater than zero.
fn positive_size(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|e| format!("`{s}` is not a number: {e}"))?;
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(format!("`{s}` must be greater than zero"))
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut logging = LoggingConfig::default();
    if let Some(filter) = &args.log {
        logging = logging.with_filter(filter);
    }
    init_logging(logging);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            eprintln!("plato: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let source = SceneSource::parse(&args.source);
    let document = load_scene(&source)?;

    let projection = if args.perspective {
        Projection::Perspective
    } else {
        Projection::Orthographic
    };

    let mut viewer = Viewer::new(document)
        .title(args.title.unwrap_or_else(|| format!("plato: {source}")))
        .projection(projection);
    if let (Some(w), Some(h)) = (args.width, args.height) {
        viewer = viewer.size(w, h);
    }

    viewer.run()
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["plato"]).unwrap();
        assert_eq!(args.source, "1.json");
        assert!(!args.perspective);
        assert!(args.width.is_none());
    }

    #[test]
    fn size_needs_both_axes() {
        assert!(Args::try_parse_from(["plato", "--width", "800"]).is_err());
        let args = Args::try_parse_from(["plato", "s.json", "--width", "800", "--height", "600"]).unwrap();
        assert_eq!((args.width, args.height), (Some(800.0), Some(600.0)));
    }

    #[test]
    fn size_must_be_positive() {
        for bad in ["0", "-600", "nan", "inf", "wide"] {
            assert!(
                Args::try_parse_from(["plato", "--width", bad, "--height", "600"]).is_err(),
                "accepted width {bad}"
            );
        }
        assert!(Args::try_parse_from(["plato", "--width", "800", "--height", "0"]).is_err());
        assert_eq!(positive_size("0.5"), Ok(0.5));
    }
}
