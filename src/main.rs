//! `car-lights [preset.toml]` opens the road scene, optionally with options
//! loaded from a TOML preset.

use std::path::Path;

use car_lights::{options::Options, Viewer};

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let options = match std::env::args().nth(1) {
        Some(path) => match Options::load(Path::new(&path)) {
            Ok(options) => options,
            Err(e) => {
                log::error!("Failed to load preset '{path}': {e}");
                std::process::exit(1);
            }
        },
        None => Options::default(),
    };

    if let Err(e) = Viewer::builder().with_options(options).build().run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
