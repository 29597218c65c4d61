use clap::Parser;
use log::{error, info};

use ta2nnunet::{process_dataset, Args, NnUnetJsonWriter};

fn main() {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let config = args.to_conversion_config();

    info!("Starting the conversion process...");

    match process_dataset(&config, &NnUnetJsonWriter) {
        Ok(summary) => {
            println!("Converted TA dataset -> {}", summary.output_root.display());
            println!("Training cases: {}", summary.total());
        }
        Err(e) => {
            error!("Failed to convert dataset: {}", e);
            std::process::exit(1);
        }
    }
}
