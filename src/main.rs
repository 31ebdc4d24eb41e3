use avro_schema_to_pydantic::convert_schema_to_source;
use clap::Parser;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "avro-schema-to-pydantic")]
#[command(about = "Convert Avro schemas to pydantic model definitions", long_about = None)]
struct Cli {
    /// Input Avro schema file (use '-' for stdin)
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Read input
    let input_content = if cli.input == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(&cli.input)?
    };

    // Convert schema
    let module = convert_schema_to_source(&input_content)?;

    // Write output
    if let Some(output_path) = cli.output {
        fs::write(output_path, module)?;
    } else {
        println!("{}", module);
    }

    Ok(())
}
