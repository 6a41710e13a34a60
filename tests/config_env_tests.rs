use beattickrs::config::{Settings, ENV_PREFIX};
use beattickrs::{Args, MetronomeError};
use clap::Parser;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

// Environment variables are process-wide; tests in this file take turns.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn lock_env() -> MutexGuard<'static, ()> {
    let guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    clear_env();
    guard
}

fn clear_env() {
    let prefix = format!("{}_", ENV_PREFIX);
    for (key, _) in env::vars() {
        if key.starts_with(&prefix) {
            env::remove_var(key);
        }
    }
}

fn write_settings_file(name: &str, contents: &str) -> PathBuf {
    let path = env::temp_dir().join(format!("beattickrs-env-{}-{}", std::process::id(), name));
    fs::write(&path, contents).unwrap();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_with_clean_environment() {
        let _guard = lock_env();
        assert_eq!(Settings::load(None).unwrap(), Settings::default());
    }

    #[test]
    fn test_environment_overrides_defaults() {
        let _guard = lock_env();
        env::set_var("BEATTICK_BEAT_UNIT", "8");
        env::set_var("BEATTICK_BEATS_PER_MEASURE", "7");
        let settings = Settings::load(None);
        clear_env();

        let settings = settings.unwrap();
        assert_eq!(settings.beat_unit, "8");
        assert_eq!(settings.beats_per_measure, 7);
        assert_eq!(settings.tempo, 120.0);
    }

    #[test]
    fn test_environment_overrides_file() {
        let _guard = lock_env();
        let path = write_settings_file("tempo.toml", "tempo = 72.5\nbeats_per_measure = 6\n");
        env::set_var("BEATTICK_TEMPO", "90");
        let settings = Settings::load(Some(path.as_path()));
        clear_env();
        fs::remove_file(&path).unwrap();

        let settings = settings.unwrap();
        assert_eq!(settings.tempo, 90.0);
        // untouched keys still come from the file
        assert_eq!(settings.beats_per_measure, 6);
    }

    #[test]
    fn test_command_line_overrides_environment() {
        let _guard = lock_env();
        let path = write_settings_file("cli.toml", "tempo = 72.5\nbeat_unit = \"4.\"\n");
        env::set_var("BEATTICK_TEMPO", "90");
        env::set_var("BEATTICK_BEAT_UNIT", "8");
        let settings = Settings::load(Some(path.as_path()));
        clear_env();
        fs::remove_file(&path).unwrap();

        let args = Args::parse_from(["beattickrs", "--tempo", "140"]);
        let settings = settings.unwrap().apply_args(&args);
        assert_eq!(settings.tempo, 140.0);
        // no --beat-unit given, so the environment value stands
        assert_eq!(settings.beat_unit, "8");
    }

    #[test]
    fn test_negative_beats_per_measure_from_environment() {
        let _guard = lock_env();
        env::set_var("BEATTICK_BEATS_PER_MEASURE", "-3");
        let result = Settings::load(None);
        clear_env();

        match result {
            Err(MetronomeError::Config(e)) => assert!(e.to_string().contains("-3")),
            other => panic!("expected a config error, got {:?}", other),
        }
    }
}
