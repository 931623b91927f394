// SPDX-License-Identifier: MPL-2.0
use iced_reel::app::{self, paths, Flags};

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("iced_reel=info"))
        .init();

    let mut args = pico_args::Arguments::from_env();

    let lang = match args.opt_value_from_str("--lang") {
        Ok(lang) => lang,
        Err(e) => {
            log::warn!("Ignoring --lang: {}", e);
            None
        }
    };
    let config_dir = match args.opt_value_from_str("--config-dir") {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!("Ignoring --config-dir: {}", e);
            None
        }
    };
    let file_path = args
        .finish()
        .into_iter()
        .next()
        .and_then(|s| s.into_string().ok());

    paths::init_cli_overrides(config_dir.clone());

    app::run(Flags {
        lang,
        file_path,
        config_dir,
    })
}
