use clap::{Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("okna")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Rename, move and freeze desktop windows from an interactive prompt")
        .long_about("okna lists the visible top-level windows and lets you pick one by index or by a name you gave it earlier. Picked windows can be moved, resized, renamed, or frozen by suspending the thread that owns them. A global hotkey unfreezes every frozen window at once.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("names-file")
                .long("names-file")
                .value_name("PATH")
                .help("File where window names are stored (overrides config, default: window_names.json)"),
        )
        .arg(
            Arg::new("hotkey")
                .long("hotkey")
                .value_name("KEY")
                .help("Global key that unfreezes all windows, e.g. 'f' or 'ctrl+alt+u' (overrides config)")
                .conflicts_with("no-hotkey"),
        )
        .arg(
            Arg::new("no-hotkey")
                .long("no-hotkey")
                .help("Do not register the unfreeze-all hotkey")
                .action(ArgAction::SetTrue),
        )
}
