//! Whorl binary: parse flags, configure logging, run the viewer.
//!
//! Usage: `whorl [--debug] [options.toml]`
//!
//! `--debug` (or a set `WHORL_DEBUG` environment variable) shows the
//! parameter panel and stats overlay; an optional TOML path loads a saved
//! options preset.

use std::path::Path;

use whorl::{Options, Viewer};

fn main() {
    env_logger::init();

    let mut debug = std::env::var_os("WHORL_DEBUG").is_some();
    let mut options = Options::default();

    for arg in std::env::args().skip(1) {
        if arg == "--debug" {
            debug = true;
        } else if arg.starts_with('-') {
            log::error!("unknown flag: {arg} (usage: whorl [--debug] [options.toml])");
            std::process::exit(1);
        } else {
            options = match Options::load(Path::new(&arg)) {
                Ok(options) => options,
                Err(e) => {
                    log::error!("failed to load options from {arg}: {e}");
                    std::process::exit(1);
                }
            };
        }
    }

    let viewer = Viewer::builder()
        .with_options(options)
        .with_debug(debug)
        .build();

    if let Err(e) = viewer.run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
