use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::ArgMatches;
use tracing::{error, info, warn};

use okna_core::config::OknaConfig;
use okna_core::desktop::{WindowDirectory, native_backend};
use okna_core::events;
use okna_core::hotkey::{HotkeyListener, spawn_unfreeze_listener};
use okna_core::{FreezeRegistry, NameStore};

use crate::shell::Shell;

/// Load the config hierarchy and apply command-line overrides on top.
///
/// A broken or invalid config file is fatal.
fn load_config(matches: &ArgMatches) -> Result<OknaConfig, Box<dyn std::error::Error>> {
    let mut config = OknaConfig::load_hierarchy().map_err(|e| {
        eprintln!(
            "Error: Could not load config: {}\n\
             Tip: Check ~/.okna/config.toml and ./.okna/config.toml for syntax errors.",
            e
        );
        error!(event = "cli.config.load_failed", error = %e);
        e
    })?;

    apply_cli_overrides(&mut config, matches);

    config.validate().map_err(|e| {
        eprintln!("Error: {}", e);
        error!(event = "cli.config.invalid", error = %e);
        e
    })?;

    Ok(config)
}

fn apply_cli_overrides(config: &mut OknaConfig, matches: &ArgMatches) {
    if let Some(path) = matches.get_one::<String>("names-file") {
        config.storage.names_file = Some(PathBuf::from(path));
    }
    if let Some(key) = matches.get_one::<String>("hotkey") {
        config.hotkey.unfreeze_all = Some(key.clone());
    }
    if matches.get_flag("no-hotkey") {
        config.hotkey.enabled = Some(false);
    }
}

fn start_hotkey(config: &OknaConfig, registry: &Arc<FreezeRegistry>) -> Option<HotkeyListener> {
    if !config.hotkey_enabled() {
        info!(event = "cli.hotkey.disabled");
        return None;
    }

    let key = config.unfreeze_all_hotkey();
    match spawn_unfreeze_listener(Arc::clone(registry), &key) {
        Ok(listener) => {
            println!(
                "Press '{}' anywhere to unfreeze all frozen windows.",
                listener.key()
            );
            Some(listener)
        }
        Err(e) => {
            eprintln!(
                "Warning: {}. Frozen windows can still be unfrozen from the prompt.",
                e
            );
            warn!(event = "cli.hotkey.unavailable", key = %key, error = %e);
            None
        }
    }
}

fn report_names_load(names: &NameStore) {
    if let Some(message) = names.load_error() {
        eprintln!("Error loading window names: {}", message);
    }
    if names.pruned() > 0 {
        println!(
            "Removed {} invalid window handle(s) from window names",
            names.pruned()
        );
    }
}

/// Resume everything still frozen so no window is left hanging after exit.
fn release_frozen(registry: &FreezeRegistry) {
    let report = registry.unfreeze_all();
    if report.attempted() == 0 {
        return;
    }
    println!("Unfroze {} window(s) on exit.", report.unfrozen.len());
    for (handle, e) in &report.failures {
        eprintln!("Error: could not unfreeze window {}: {}", handle, e);
    }
}

pub fn run(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup();

    let config = load_config(matches)?;

    let backend = native_backend().map_err(|e| {
        eprintln!("Error: {}", e);
        events::log_app_error(&e);
        e
    })?;
    let directory = WindowDirectory::new(backend);

    let names = NameStore::load(config.names_file(), directory.clone());
    report_names_load(&names);

    let registry = Arc::new(FreezeRegistry::new(directory.clone()));
    let listener = start_hotkey(&config, &registry);

    let result = {
        let stdin = io::stdin().lock();
        let stdout = io::stdout().lock();
        let mut shell = Shell::new(
            directory,
            names,
            Arc::clone(&registry),
            stdin,
            stdout,
            Duration::from_millis(config.pause_ms()),
        );
        shell.run()
    };

    if let Some(listener) = listener {
        listener.stop();
    }
    release_frozen(&registry);
    events::log_app_shutdown();

    if let Err(e) = &result {
        events::log_app_error(e);
    }
    result?;
    Ok(())
}
