use clap::App;
use clap::Arg;
use clap::ArgMatches;

pub fn init() -> ArgMatches<'static> {
    app().get_matches()
}

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn app() -> App<'static, 'static> {
    App::new("Last Tab")
        .version(VERSION)
        .name("lasttab")
        .about("A native messaging host which switches each browser window to its most recently used tab.")
        .after_help("The browser launches `lasttab` through its native messaging manifest, and talks to it over stdin & stdout.")
        .arg(
            Arg::with_name("LOG")
                .long("log")
                .required(false)
                .takes_value(true)
                .possible_values(&["trace", "debug", "info", "warn", "error", "off"])
                .help("Sets the log level.  Logs are written to stderr and ~/.lasttab/host.log"),
        )
        .arg(
            Arg::with_name("CONFIG")
                .long("config")
                .required(false)
                .takes_value(true)
                .value_name("PATH")
                .help("Reads the config from PATH, instead of ~/.lasttab/lasttab.yml"),
        )
        .arg(
            Arg::with_name("CHECK-SHORTCUT")
                .long("check-shortcut")
                .required(false)
                .takes_value(true)
                .value_name("SHORTCUT")
                .help("Checks that SHORTCUT can be bound, e.g. `Ctrl+Shift+1`"),
        )
        .arg(
            // browsers pass the manifest path, and the extension origin
            Arg::with_name("BROWSER-ARGS")
                .multiple(true)
                .required(false)
                .hidden(true)
                .index(1),
        )
}
