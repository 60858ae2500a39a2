//! Pixel Evolve CLI - Evolve a random image toward a target picture.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::fs;
use std::path::PathBuf;

use pixel_evolve::{
    compute::evolution::EvolutionEngine,
    schema::EvolutionConfig,
    snapshot::{SnapshotRecorder, load_target},
};

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && args[1] == "--example" {
        print_example_config();
        return;
    }

    let cli = parse_args(&args[1..]).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        eprintln!();
        print_usage(&args[0]);
        std::process::exit(1);
    });
    let target_path = cli.target;
    let out_dir = cli.out_dir;

    // Load configuration
    let config: EvolutionConfig = match &cli.config {
        Some(path) => {
            let config_str = fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("Error reading config file: {}", e);
                std::process::exit(1);
            });
            serde_json::from_str(&config_str).unwrap_or_else(|e| {
                eprintln!("Error parsing config: {}", e);
                std::process::exit(1);
            })
        }
        None => EvolutionConfig::default(),
    };

    let target = load_target(&target_path).unwrap_or_else(|e| {
        eprintln!("Error loading target: {}", e);
        std::process::exit(1);
    });

    println!("Pixel Evolve");
    println!("============");
    println!(
        "Target: {} ({}x{})",
        target_path.display(),
        target.extent().width,
        target.extent().height
    );
    println!(
        "Population: {}, pool: {}, mutation rate: {}",
        config.population_size, config.pool_size, config.mutation_rate
    );
    println!("Fitness limit: {}", config.fitness_limit);
    println!();

    let mut recorder =
        SnapshotRecorder::new(&out_dir, config.snapshot_interval).unwrap_or_else(|e| {
            eprintln!("Error creating output directory: {}", e);
            std::process::exit(1);
        });

    let mut engine = EvolutionEngine::new(config, target).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let result = engine
        .run_with_callback(|progress, best| {
            if !recorder.is_due(progress.generation) {
                return;
            }
            println!(
                "  Time: {:.1}s | generation: {} | fitness: {} | pool size: {}",
                progress.elapsed_seconds,
                progress.generation,
                progress.best_score,
                progress.pool_size
            );
            if let Err(e) = recorder.record(progress.generation, best.buffer()) {
                log::warn!("Snapshot failed: {}", e);
            }
        })
        .unwrap_or_else(|e| {
            eprintln!("Evolution failed: {}", e);
            std::process::exit(1);
        });

    match recorder.finalize(result.best.buffer()) {
        Ok(path) => println!("\nBest image: {}", path.display()),
        Err(e) => eprintln!("Error saving best image: {}", e),
    }

    let stats_path = out_dir.join("stats.json");
    match serde_json::to_string_pretty(&result.stats) {
        Ok(json) => {
            if let Err(e) = fs::write(&stats_path, json) {
                eprintln!("Error writing {}: {}", stats_path.display(), e);
            }
        }
        Err(e) => eprintln!("Error serializing stats: {}", e),
    }

    println!("Stop reason: {:?}", result.stats.stop_reason);
    println!("Generations: {}", result.stats.generations);
    println!("Best fitness: {}", result.stats.best_score);
    println!("Total time taken: {:.2}s", result.stats.elapsed_seconds);
}

/// Parsed command line.
#[derive(Debug, PartialEq)]
struct CliArgs {
    target: PathBuf,
    config: Option<PathBuf>,
    out_dir: PathBuf,
}

/// Parse `<target.png> [config.json] [--out DIR]`; `--out` may appear anywhere.
fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut positional = Vec::new();
    let mut out_dir = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--out" {
            let dir = iter.next().ok_or("--out requires a directory")?;
            out_dir = Some(PathBuf::from(dir));
        } else if arg.starts_with("--") {
            return Err(format!("Unknown option {}", arg));
        } else {
            positional.push(PathBuf::from(arg));
        }
    }

    if positional.len() > 2 {
        return Err("Too many arguments".to_string());
    }
    let mut positional = positional.into_iter();
    let target = positional.next().ok_or("Missing target image")?;

    Ok(CliArgs {
        target,
        config: positional.next(),
        out_dir: out_dir.unwrap_or_else(|| PathBuf::from("evolved")),
    })
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} <target.png> [config.json] [--out DIR]", program);
    eprintln!();
    eprintln!("Evolve a population of random images toward a target image.");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  target.png   Image to reconstruct");
    eprintln!("  config.json  Evolution configuration (default: built-in)");
    eprintln!("  --out DIR    Directory for snapshots and stats (default: ./evolved)");
    eprintln!();
    eprintln!("Print the default configuration with --example.");
}

fn print_example_config() {
    let config = EvolutionConfig::default();

    println!("Example configuration (config.json):");
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing config: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_target_only() {
        let cli = parse_args(&args(&["yui.png"])).unwrap();
        assert_eq!(cli.target, PathBuf::from("yui.png"));
        assert_eq!(cli.config, None);
        assert_eq!(cli.out_dir, PathBuf::from("evolved"));
    }

    #[test]
    fn test_out_without_config() {
        let cli = parse_args(&args(&["yui.png", "--out", "runs/a"])).unwrap();
        assert_eq!(cli.config, None);
        assert_eq!(cli.out_dir, PathBuf::from("runs/a"));
    }

    #[test]
    fn test_config_and_out_any_order() {
        let cli = parse_args(&args(&["--out", "o", "yui.png", "c.json"])).unwrap();
        assert_eq!(cli.target, PathBuf::from("yui.png"));
        assert_eq!(cli.config, Some(PathBuf::from("c.json")));
        assert_eq!(cli.out_dir, PathBuf::from("o"));
    }

    #[test]
    fn test_rejects_bad_arguments() {
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["yui.png", "--out"])).is_err());
        assert!(parse_args(&args(&["yui.png", "--verbose"])).is_err());
        assert!(parse_args(&args(&["a.png", "b.json", "c"])).is_err());
    }
}
