use clap::Parser;
use load_planner::error::ParseError;
use load_planner::presets;
use load_planner::render;
use load_planner::store::{CargoStore, JsonFileStore};
use load_planner::types::{BatchPlan, CargoSpec, ContainerKind, ContainerSpec, Dimensions};
use tracing::Level;

const COLORS: [&str; 8] = [
    "#3b82f6", "#10b981", "#f59e0b", "#8b5cf6", "#ec4899", "#6366f1", "#14b8a6", "#f43f5e",
];

#[derive(Parser)]
#[command(
    name = "load_planner",
    about = "Plan how many containers or pallets a cargo list needs"
)]
struct Cli {
    /// Container preset key (see --list-presets)
    #[arg(long, conflicts_with = "container")]
    preset: Option<String>,

    /// Custom container dimensions in cm (LxWxH, e.g. 589x235x239)
    #[arg(long, requires = "max_weight")]
    container: Option<String>,

    /// Maximum load of the custom container in kg
    #[arg(long)]
    max_weight: Option<f64>,

    /// Treat the custom container as a pallet
    #[arg(long)]
    pallet: bool,

    /// Cargo as NAME:LxWxH:KG:QTY (e.g. monitor:60x15x40:5:30)
    #[arg(long = "cargo", num_args = 1..)]
    cargo: Vec<String>,

    /// Load the cargo list from a JSON file
    #[arg(long)]
    cargo_file: Option<String>,

    /// Save the combined cargo list to a JSON file
    #[arg(long)]
    save_cargo: Option<String>,

    /// Disable rotation for cargo given with --cargo
    #[arg(long)]
    no_rotate: bool,

    /// Show an ASCII top view of every layer
    #[arg(long)]
    layout: bool,

    /// Print the plan as JSON
    #[arg(long)]
    json: bool,

    /// List container presets and exit
    #[arg(long)]
    list_presets: bool,

    /// Log planner progress to stderr
    #[arg(long, short)]
    verbose: bool,
}

fn fail(e: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", e);
    std::process::exit(1);
}

fn parse_number(input: &str, field: &'static str, full: &str) -> Result<f64, ParseError> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParseError::Number {
            field,
            input: full.to_string(),
        })
}

fn parse_dimensions(s: &str) -> Result<Dimensions, ParseError> {
    let parts: Vec<&str> = s.split('x').collect();
    let [length, width, height] = parts.as_slice() else {
        return Err(ParseError::Dimensions(s.to_string()));
    };
    Ok(Dimensions::new(
        parse_number(length, "length", s)?,
        parse_number(width, "width", s)?,
        parse_number(height, "height", s)?,
    ))
}

fn parse_cargo(s: &str, index: usize, allow_rotation: bool) -> Result<CargoSpec, ParseError> {
    // Split from the right so names may contain ':'
    let parts: Vec<&str> = s.rsplitn(4, ':').collect();
    let [qty, kg, dims, name] = parts.as_slice() else {
        return Err(ParseError::Cargo(s.to_string()));
    };
    let quantity = qty
        .trim()
        .parse::<i64>()
        .map_err(|_| ParseError::Number {
            field: "quantity",
            input: s.to_string(),
        })?;
    Ok(CargoSpec {
        id: (index + 1).to_string(),
        name: name.to_string(),
        dims: parse_dimensions(dims)?,
        weight: parse_number(kg, "weight", s)?,
        quantity,
        allow_rotation,
        color: COLORS[index % COLORS.len()].to_string(),
    })
}

fn container_from(cli: &Cli) -> Result<ContainerSpec, ParseError> {
    if let Some(key) = &cli.preset {
        return presets::find(key)
            .map(|p| p.spec())
            .ok_or_else(|| ParseError::UnknownPreset(key.clone()));
    }
    match (&cli.container, cli.max_weight) {
        (Some(dims), Some(max_weight)) => Ok(ContainerSpec {
            name: format!("Custom {dims}"),
            dims: parse_dimensions(dims)?,
            max_weight,
            kind: if cli.pallet {
                ContainerKind::Pallet
            } else {
                ContainerKind::Container
            },
        }),
        // Nothing given: start from the first preset
        _ => Ok(presets::all()[0].spec()),
    }
}

fn print_plan(plan: &BatchPlan, container: &ContainerSpec, layout: bool) {
    let unit = match container.kind {
        ContainerKind::Container => "container",
        ContainerKind::Pallet => "pallet",
    };
    for c in &plan.containers {
        println!(
            "{} {} ({}): {} units, {:.1}% volume, {:.1}% weight",
            unit,
            c.container_id,
            container.name,
            c.placed.len(),
            c.volume_utilization,
            c.weight_utilization,
        );
        for p in &c.placed {
            let rot = if p.rotated { " [rotated]" } else { "" };
            println!("  {} {} @ ({}, {}, {}){}", p.name, p.dims, p.x, p.y, p.z, rot);
        }
        if layout {
            for height in render::layer_heights(&c.placed) {
                println!("  layer at {height} cm:");
                print!("{}", render::render_layer(container.dims, &c.placed, height));
            }
        }
        println!();
    }

    println!(
        "Summary: {} {}{} used, {:.1}% average volume utilization",
        plan.total_containers,
        unit,
        if plan.total_containers == 1 { "" } else { "s" },
        plan.average_volume_utilization,
    );
    for u in &plan.unpacked {
        println!("  not loaded: {} x{}", u.name, u.quantity);
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    if cli.list_presets {
        for p in presets::all() {
            println!("{:<12} {:<32} {} cm, {} kg", p.key, p.name, p.dims, p.max_weight);
        }
        return;
    }

    let container = container_from(&cli).unwrap_or_else(|e| fail(e));

    let mut cargo = match &cli.cargo_file {
        Some(path) => JsonFileStore::new(path).load().unwrap_or_else(|e| fail(e)),
        None => Vec::new(),
    };
    let offset = cargo.len();
    let extra = cli
        .cargo
        .iter()
        .enumerate()
        .map(|(i, c)| parse_cargo(c, offset + i, !cli.no_rotate))
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|e| fail(e));
    cargo.extend(extra);

    if let Some(path) = &cli.save_cargo {
        let store = JsonFileStore::new(path);
        store.save(&cargo).unwrap_or_else(|e| fail(e));
        tracing::info!(path = %store.path().display(), "cargo list saved");
    }

    let plan = load_planner::plan(&container, &cargo);

    if cli.json {
        let json = serde_json::to_string_pretty(&plan).unwrap_or_else(|e| fail(e));
        println!("{json}");
    } else {
        print_plan(&plan, &container, cli.layout);
    }
}
