//! Headless driver: mounts a map, replays a scripted drawing session and
//! prints the committed polygons as JSON.

use std::str::FromStr;

use clap::Parser;
use foundation::math::Vec2;
use runtime::PointerEvent;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use viewer::export::PolygonData;
use viewer::{AppConfig, DrawingOutcome, MapApp, MountTarget};

#[derive(Parser, Debug)]
#[command(author, version, about = "Scripted polygon drawing on the globe viewer")]
struct Args {
    /// Viewport width in pixels
    #[arg(long, default_value_t = 1000.0)]
    width: f64,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 800.0)]
    height: f64,

    /// Left-click position as x,y (repeatable, in order)
    #[arg(long = "click", value_name = "X,Y")]
    clicks: Vec<ScreenPos>,

    /// Leave edit mode with a toggle instead of a right-click (discards the polygon)
    #[arg(long)]
    discard: bool,

    /// Switch to the styled basemap before drawing
    #[arg(long)]
    toggle_basemap: bool,

    /// Skip the demo polygon
    #[arg(long)]
    no_demo: bool,
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct ScreenPos(Vec2);

#[derive(Debug, Clone, PartialEq, Eq)]
enum ParsePointerError {
    MissingComma(String),
    InvalidNumber(String),
}

impl std::fmt::Display for ParsePointerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParsePointerError::MissingComma(s) => write!(f, "expected X,Y but got {s:?}"),
            ParsePointerError::InvalidNumber(s) => write!(f, "invalid pixel coordinate {s:?}"),
        }
    }
}

impl std::error::Error for ParsePointerError {}

impl FromStr for ScreenPos {
    type Err = ParsePointerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| ParsePointerError::MissingComma(s.to_string()))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| ParsePointerError::InvalidNumber(v.to_string()))
        };
        Ok(ScreenPos(Vec2::new(parse(x)?, parse(y)?)))
    }
}

#[derive(Debug, Serialize)]
struct Report {
    alternate_basemap: bool,
    entities: usize,
    polygons: Vec<PolygonData>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = AppConfig::from_process_env();
    let mut app = MapApp::mount(config, MountTarget::new("native", args.width, args.height));

    if !args.no_demo {
        let demo = app.seed_demo();
        info!(%demo, "demo polygon seeded");
    }
    if args.toggle_basemap {
        app.toggle_basemap();
    }

    if !args.clicks.is_empty() {
        app.toggle_edit_mode();
        for ScreenPos(pos) in &args.clicks {
            match app.dispatch_pointer(PointerEvent::left_click(pos.x, pos.y)) {
                DrawingOutcome::PointAdded(n) => info!(x = pos.x, y = pos.y, points = n, "pick"),
                _ => warn!(x = pos.x, y = pos.y, "click missed the globe"),
            }
        }

        if args.discard {
            app.toggle_edit_mode();
            info!("drawing discarded");
        } else {
            let last = args.clicks.last().map(|c| c.0).unwrap_or_default();
            let outcome = app.dispatch_pointer(PointerEvent::right_click(last.x, last.y));
            info!(?outcome, "right click");
        }
    }

    let report = Report {
        alternate_basemap: app.basemap().using_alternate_basemap,
        entities: app.viewer().entities().len(),
        polygons: app.export_drawn()?,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{ParsePointerError, ScreenPos};
    use foundation::math::Vec2;

    #[test]
    fn parses_comma_separated_pixels() {
        let pos: ScreenPos = " 500, 400.5".parse().expect("parse");
        assert_eq!(pos.0, Vec2::new(500.0, 400.5));
    }

    #[test]
    fn rejects_malformed_positions() {
        assert_eq!(
            "500".parse::<ScreenPos>(),
            Err(ParsePointerError::MissingComma("500".to_string()))
        );
        assert!(matches!(
            "a,1".parse::<ScreenPos>(),
            Err(ParsePointerError::InvalidNumber(_))
        ));
        assert!(matches!(
            "1,inf".parse::<ScreenPos>(),
            Err(ParsePointerError::InvalidNumber(_))
        ));
    }
}
