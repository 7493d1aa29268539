use clap::Parser;
use cut_planner::input::{parse_cut, parse_kerf, parse_sheet};
use cut_planner::packer::Packer;
use cut_planner::types::{Demand, Sheet};
use cut_planner::{render, report};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "cut_planner",
    about = "Shelf-packing cut planner for rectangular sheet stock"
)]
struct Cli {
    /// Stock sheets as WxHxT, used in the order given (e.g. 2440x1220x18)
    #[arg(long = "sheets", num_args = 1.., required = true)]
    sheets: Vec<String>,

    /// Cut pieces as WxH:qty (e.g. 800x600:3 400x300:5)
    #[arg(long = "cuts", num_args = 1..)]
    cuts: Vec<String>,

    /// Blade kerf width, kept between neighbouring pieces
    #[arg(long, default_value = "3", value_parser = parse_kerf)]
    kerf: f64,

    /// Show ASCII layout of each sheet
    #[arg(long)]
    layout: bool,

    /// Print a summary with a legend per piece type
    #[arg(long)]
    summary: bool,

    /// Print the whole solution as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Log packing progress to stderr (warnings are always shown)
    #[arg(short, long)]
    verbose: bool,
}

fn parse_all<T, E: std::fmt::Display>(
    items: &[String],
    parse: impl Fn(&str) -> Result<T, E>,
) -> Vec<T> {
    items
        .iter()
        .map(|s| parse(s.as_str()))
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        })
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let sheets: Vec<Sheet> = parse_all(&cli.sheets, parse_sheet);
    let demands: Vec<Demand> = parse_all(&cli.cuts, parse_cut);

    let solution = Packer::new(&demands, &sheets, cli.kerf).solve();

    if cli.json {
        match serde_json::to_string_pretty(&solution) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    for plan in &solution.plans {
        let thickness = sheets[plan.sheet_index - 1].thickness;
        println!("Sheet {} ({}, {} thick):", plan.sheet_index, plan.stock, thickness);
        for p in &plan.placements {
            let rot = if p.rotated { " [rotated]" } else { "" };
            println!(
                "  [{}] {} @ ({}, {}){}",
                report::legend_symbol(p.type_index),
                p.rect,
                p.x,
                p.y,
                rot
            );
        }
        if cli.layout {
            print!("{}", render::render_plan(plan));
        }
        println!();
    }

    if cli.summary {
        print!("{}", report::summary(&demands, &solution));
    } else {
        println!(
            "Summary: {} sheet{} used, {} of {} pieces placed, {:.1}% waste",
            solution.sheet_count(),
            if solution.sheet_count() == 1 { "" } else { "s" },
            solution.placed_count(),
            solution.requested,
            solution.total_waste_percent(),
        );
    }
}
