use std::error::Error;
use std::str::FromStr;
use std::time::Instant;

use log::info;
use structopt::StructOpt;

use mandelzoom::coord::Viewport;
use mandelzoom::frame::Frame;
use mandelzoom::painter::{Ember, Greyscale, Palette};
use mandelzoom::solver::EscapeSolver;
use mandelzoom::{Explorer, ExplorerConfig};

#[derive(Debug, Clone, Copy)]
struct Click {
    x: u32,
    y: u32,
}

impl FromStr for Click {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| format!("expected x,y but got '{}'", s))?;
        let x = x.trim().parse().map_err(|e| format!("bad x in '{}': {}", s, e))?;
        let y = y.trim().parse().map_err(|e| format!("bad y in '{}': {}", s, e))?;
        Ok(Self { x, y })
    }
}

fn parse_bounds(s: &str) -> Result<Viewport, String> {
    let v = s
        .split(',')
        .map(|n| n.trim().parse::<f64>().map_err(|e| format!("bad bound '{}': {}", n, e)))
        .collect::<Result<Vec<f64>, String>>()?;
    match v[..] {
        [xmin, xmax, ymin, ymax] => {
            Viewport::from_bounds(xmin, xmax, ymin, ymax).map_err(|e| e.to_string())
        }
        _ => Err(format!("expected xmin,xmax,ymin,ymax but got '{}'", s)),
    }
}

#[derive(Debug, StructOpt)]
#[structopt(
    name = "mandelzoom-explore",
    about = "Render the Mandelbrot set and replay zoom clicks"
)]
struct Opt {
    /// Raster width in pixels
    #[structopt(long, default_value = "800")]
    width: u32,

    /// Raster height in pixels
    #[structopt(long, default_value = "800")]
    height: u32,

    /// Worker threads per render, 0 for one per physical CPU
    #[structopt(long, default_value = "10")]
    workers: usize,

    /// Escape-time iteration limit
    #[structopt(long, default_value = "255")]
    iterations: u16,

    /// Escape radius
    #[structopt(long, default_value = "2.0")]
    threshold: f64,

    /// Extent ratio applied per click
    #[structopt(long, default_value = "0.8")]
    ratio: f64,

    /// Color palette for escaped samples
    #[structopt(long, default_value = "ember", possible_values = &["ember", "greyscale"])]
    palette: String,

    /// Initial viewport as xmin,xmax,ymin,ymax
    #[structopt(long, parse(try_from_str = parse_bounds))]
    bounds: Option<Viewport>,

    /// Pixel to zoom toward as x,y; repeat for a sequence of clicks
    #[structopt(long = "click")]
    clicks: Vec<Click>,
}

impl Opt {
    fn config(&self) -> ExplorerConfig {
        let workers = if self.workers == 0 {
            num_cpus::get_physical()
        } else {
            self.workers
        };
        ExplorerConfig {
            width: self.width,
            height: self.height,
            workers,
            solver: EscapeSolver::new(self.iterations, self.threshold),
            ratio: self.ratio,
            viewport: self.bounds.unwrap_or_default(),
        }
    }

    fn palette(&self) -> Palette {
        match self.palette.as_str() {
            "greyscale" => Palette::Greyscale(Greyscale::new(self.iterations)),
            _ => Palette::Ember(Ember),
        }
    }
}

fn report(step: usize, viewport: &Viewport, frame: &Frame, start: Instant) {
    println!(
        "{:>3}  x [{:.17}, {:.17}]  y [{:.17}, {:.17}]  pixels {:>7}  evaluated {}/{}  {} ms",
        step,
        viewport.x().min,
        viewport.x().max,
        viewport.y().min,
        viewport.y().max,
        frame.len(),
        frame.evaluated(),
        frame.samples(),
        start.elapsed().as_millis()
    );
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let opt = Opt::from_args();
    let config = opt.config();
    info!(
        "{}x{} raster, {} workers, {} iterations",
        config.width, config.height, config.workers, opt.iterations
    );

    let start = Instant::now();
    let mut explorer = Explorer::new(config, opt.palette())?;
    report(0, explorer.viewport(), explorer.frame(), start);

    for (n, click) in opt.clicks.iter().enumerate() {
        let start = Instant::now();
        explorer.click(click.x, click.y)?;
        report(n + 1, explorer.viewport(), explorer.frame(), start);
    }
    Ok(())
}
