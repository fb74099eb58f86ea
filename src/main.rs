use iconforge::designs;
use iconforge::{DesignSpec, IconPlan, IconSet};
use std::path::PathBuf;

const DEFAULT_PLAN: &str = "icons.json";

/// Command line options; anything left unset falls back to the plan
#[derive(Default)]
struct Options {
    plan: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    design: Option<String>,
    write_plan: bool,
}

fn print_help() {
    println!("Usage: iconforge [OPTIONS]");
    println!();
    println!("Options:");
    println!(
        "  --plan FILE, -p FILE    Load icon plan from JSON (default: {} if present)",
        DEFAULT_PLAN
    );
    println!("  --out DIR, -o DIR       Output directory (overrides the plan)");
    println!(
        "  --design NAME, -d NAME  Built-in design: {}",
        designs::BUILTIN.join(", ")
    );
    println!("  --write-plan            Save the effective plan next to the icons");
    println!("  --help                  Show this help message");
}

/// Parse command line arguments
fn parse_args() -> Options {
    let args: Vec<String> = std::env::args().collect();
    let mut options = Options::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--plan" | "-p" => {
                if i + 1 < args.len() {
                    options.plan = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            },
            "--out" | "-o" => {
                if i + 1 < args.len() {
                    options.output_dir = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            },
            "--design" | "-d" => {
                if i + 1 < args.len() {
                    options.design = Some(args[i + 1].clone());
                    i += 1;
                }
            },
            "--write-plan" => options.write_plan = true,
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            },
            other => eprintln!("Ignoring unknown argument '{}'", other),
        }
        i += 1;
    }

    options
}

fn load_plan(options: &Options) -> Result<IconPlan, String> {
    let path = options.plan.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_PLAN));
    let mut plan = if options.plan.is_some() || path.exists() {
        IconPlan::load(&path).map_err(|e| format!("{}: {}", path.display(), e))?
    } else {
        IconPlan::default()
    };

    if let Some(name) = &options.design {
        let spec = DesignSpec::by_name(name).map_err(|e| e.to_string())?;
        plan = IconPlan {
            output_dir: plan.output_dir,
            base_size: plan.base_size,
            ..IconPlan::for_design(spec)
        };
    }
    if let Some(dir) = &options.output_dir {
        plan.output_dir.clone_from(dir);
    }
    Ok(plan)
}

fn main() -> Result<(), String> {
    let options = parse_args();
    let plan = load_plan(&options)?;
    let design = plan.build_design();

    println!("=== iconforge ===");
    println!("Design: {}", design.name());
    println!("Output: {}", plan.output_dir.display());

    let set = IconSet::build(design.as_ref(), &plan).map_err(|e| e.to_string())?;
    let written = set
        .write_to(&plan.output_dir)
        .map_err(|e| format!("Failed to write icons: {}", e))?;
    for (path, len) in &written {
        println!("Created {} ({} bytes)", path.display(), len);
    }

    if options.write_plan {
        let path = plan.output_dir.join(DEFAULT_PLAN);
        if let Err(e) = plan.save(&path) {
            eprintln!("Failed to save plan: {}", e);
        } else {
            println!("Plan saved to {}", path.display());
        }
    }

    Ok(())
}
