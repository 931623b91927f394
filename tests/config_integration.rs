// SPDX-License-Identifier: MPL-2.0
use approx::assert_abs_diff_eq;
use iced_reel::config::{self, Config, GeneralConfig, VideoConfig};
use iced_reel::i18n::fluent::I18n;
use iced_reel::ui::player::PlayerSettings;
use iced_reel::video_player::{MuteRule, PlaybackSpeed};
use std::fs;
use tempfile::tempdir;

#[test]
fn language_change_via_config() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let config_path = dir.path().join("settings.toml");

    let english = Config {
        general: GeneralConfig {
            language: Some("en-US".to_string()),
        },
        ..Config::default()
    };
    config::save_to_path(&english, &config_path).expect("Failed to write initial config file");
    let loaded = config::load_from_path(&config_path).expect("Failed to load initial config");
    let i18n_en = I18n::new(None, &loaded);
    assert_eq!(i18n_en.current_locale().to_string(), "en-US");
    assert_eq!(i18n_en.tr("speed-normal"), "Normal");

    let french = Config {
        general: GeneralConfig {
            language: Some("fr".to_string()),
        },
        ..Config::default()
    };
    config::save_to_path(&french, &config_path).expect("Failed to write french config file");
    let loaded = config::load_from_path(&config_path).expect("Failed to load french config");
    let i18n_fr = I18n::new(None, &loaded);
    assert_eq!(i18n_fr.current_locale().to_string(), "fr");
}

#[test]
fn cli_language_wins_over_config() {
    let config = Config {
        general: GeneralConfig {
            language: Some("fr".to_string()),
        },
        ..Config::default()
    };

    let i18n = I18n::new(Some("en-US".to_string()), &config);

    assert_eq!(i18n.current_locale().to_string(), "en-US");
}

#[test]
fn video_section_feeds_player_settings() {
    let dir = tempdir().expect("Failed to create temporary directory");
    fs::write(
        dir.path().join("settings.toml"),
        "[video]\nvolume = 0.25\nspeed = 0.7\nskip_step_secs = 0.1\nmute_rule = \"threshold\"\nautoplay = true\n",
    )
    .expect("Failed to write config file");

    let (config, warning) = config::load_with_override(Some(dir.path().to_path_buf()));
    assert!(warning.is_none());

    let settings = PlayerSettings::from_config(&config.video);
    assert_abs_diff_eq!(settings.volume.value(), 0.25);
    assert_eq!(settings.speed, PlaybackSpeed::ThreeQuarters);
    assert_abs_diff_eq!(settings.skip_step_secs, config::MIN_SKIP_STEP_SECS);
    assert_eq!(settings.mute_rule, MuteRule::Threshold);
    assert!(settings.autoplay);
}

#[test]
fn malformed_file_falls_back_to_defaults() {
    let dir = tempdir().expect("Failed to create temporary directory");
    fs::write(dir.path().join("settings.toml"), "[video\nvolume = 1").expect("write");

    let (config, warning) = config::load_with_override(Some(dir.path().to_path_buf()));

    assert_eq!(config, Config::default());
    assert!(warning.is_some());
    assert_eq!(
        PlayerSettings::from_config(&config.video),
        PlayerSettings::from_config(&VideoConfig::default())
    );
}
