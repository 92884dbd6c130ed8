use std::env;
use std::sync::Arc;

use imageops_filters::{spawn_pass, FilterKind, PassOutcome};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() != 4 {
        eprintln!("Usage: {} <input_image> <filter> <output_image>", args[0]);
        eprintln!("Example: {} input.png top-hat output.png", args[0]);
        let names: Vec<&str> = FilterKind::ALL.iter().map(FilterKind::as_str).collect();
        eprintln!("Filters: {}", names.join(", "));
        std::process::exit(1);
    }

    let input_path = &args[1];
    let kind: FilterKind = args[2].parse()?;
    let output_path = &args[3];

    let source = Arc::new(image::open(input_path)?.to_rgb8());
    println!(
        "Applying {} to {}x{} image",
        kind,
        source.width(),
        source.height()
    );

    let handle = spawn_pass(kind.build(&source), Arc::clone(&source));
    for percent in handle.progress().iter() {
        print!("\r{:3}%", percent);
    }
    println!();

    match handle.join()? {
        PassOutcome::Completed(output) => {
            output.save(output_path)?;
            println!("Saved {}", output_path);
        }
        PassOutcome::Cancelled => println!("Cancelled"),
    }

    Ok(())
}
