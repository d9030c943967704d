//! `lasttab`, a native messaging host which gives browser tabs an Alt-Tab.
//!

pub mod cli;
use cli::init;
use lasttab_api::{
    config::{config_path, load_config, mkdir},
    log::{parse_level, set_level},
    shortcut::Shortcut,
};
use std::path::PathBuf;

pub fn main() -> anyhow::Result<()> {
    let args = init();

    if let Some(level) = args.value_of("LOG").and_then(parse_level) {
        set_level(level);
    }

    if let Some(shortcut) = args.value_of("CHECK-SHORTCUT") {
        return match shortcut.parse::<Shortcut>() {
            Ok(shortcut) => {
                println!("{} is a valid shortcut", shortcut);
                Ok(())
            }
            Err(err) => Err(err.into()),
        };
    }

    // create the dotdir path, so the host doesn't need to worry about it.
    mkdir()?;

    let path = match args.value_of("CONFIG") {
        Some(path) => PathBuf::from(path),
        None => config_path()?,
    };
    let config = load_config(path.as_path())?;

    lasttab_host::host_main(config, path)
}
