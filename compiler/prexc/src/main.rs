//! prex CLI.
//!
//! Runs the built-in demo programs and lists the operator registry.

use prexc::commands::{demo_names, list_operators, run_all_demos, run_demo, DemoOptions};
use prexc::tracing_setup::init_tracing;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let tree = args.iter().any(|a| a == "--tree");
    init_tracing(tree);

    let command = &args[1];

    match command.as_str() {
        "demo" => {
            let mut options = DemoOptions::default();
            let mut all = false;
            let mut name: Option<&str> = None;

            for arg in args.iter().skip(2) {
                if arg == "--force" || arg == "-f" {
                    options.force = true;
                } else if arg == "--all" {
                    all = true;
                } else if arg == "--tree" {
                    // handled above
                } else if !arg.starts_with('-') && name.is_none() {
                    name = Some(arg.as_str());
                } else {
                    eprintln!("error: unknown option '{arg}'");
                    std::process::exit(1);
                }
            }

            if all {
                print!("{}", run_all_demos(options));
                return;
            }

            let Some(name) = name else {
                eprintln!("Usage: prex demo <name>|--all [--force] [--tree]");
                eprintln!();
                eprintln!("Demos:");
                for demo in demo_names() {
                    eprintln!("  {demo}");
                }
                std::process::exit(1);
            };

            match run_demo(name, options) {
                Some(transcript) => print!("{transcript}"),
                None => {
                    eprintln!("error: unknown demo '{name}'");
                    eprintln!("Valid demos: {}", demo_names().collect::<Vec<_>>().join(", "));
                    std::process::exit(1);
                }
            }
        }
        "ops" => {
            print!("{}", list_operators());
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("prex {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("prex - lazy expression evaluator");
    println!();
    println!("Usage: prex <command> [options]");
    println!();
    println!("Commands:");
    println!("  demo <name>    Run a built-in demo program");
    println!("  demo --all     Run every demo");
    println!("  ops            List registered operators and forms");
    println!("  help           Show this message");
    println!("  version        Show version information");
    println!();
    println!("Options:");
    println!("  -f, --force    Re-evaluate every node instead of reusing caches");
    println!("  --tree         Print tracing output as an indented span tree");
    println!();
    println!("Environment:");
    println!("  PREX_LOG       Log filter (default: warn), e.g. PREX_LOG=prex_eval=trace");
}
