use std::path::PathBuf;

use log::info;

use super::Error;
use crate::{config::Config, session::Gesture, storage::file::FileStorage};

#[derive(clap::Parser, Debug)]
#[command(version, about = "Cut clothing photos out of their background")]
pub struct Args {
    /// Directory with `pending.json` and the wardrobe
    pub image_dir: Option<PathBuf>,

    /// JSON list of gestures to replay
    #[arg(long)]
    pub script: PathBuf,

    /// Magic eraser tolerance, overrides the config
    #[arg(long, value_parser = clap::value_parser!(u8).range(5..=60))]
    pub threshold: Option<u8>,

    #[arg(long, default_value = "config.json")]
    pub config: PathBuf,
}

pub fn run_native(args: Args) -> Result<(), Error> {
    env_logger::init();

    let config = Config::load(&args.config)?;
    info!("Run with config: {config:?}");

    let image_dir = args.image_dir.unwrap_or_else(|| {
        config
            .image_dir
            .clone()
            .unwrap_or_else(|| ".".into())
    });
    let threshold = args
        .threshold
        .map(f32::from)
        .unwrap_or(config.threshold);

    let script = std::fs::File::open(&args.script)?;
    let gestures: Vec<Gesture> = serde_json::from_reader(std::io::BufReader::new(script))
        .map_err(|source| Error::Script {
            path: args.script.clone(),
            source,
        })?;

    let storage = FileStorage::new(image_dir, config.max_side);
    super::edit_pending(&storage, threshold, gestures)?;
    Ok(())
}
