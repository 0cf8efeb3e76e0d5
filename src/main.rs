//! burly-dev: developer tasks for the burly shell library.
//!
//! ```text
//! burly-dev [OPTIONS] <TASK> [TASK OPTIONS]
//! ```
//!
//! Runs one task and exits non-zero at the first failing step.

use std::path::PathBuf;

use burly_dev::config::Config;
use burly_dev::host::SystemHost;
use burly_dev::tasks::{self, Context};
use burly_dev::{Error, Result, logging};

fn print_help() {
    println!(
        "burly-dev {version} - developer tasks for the burly shell library

USAGE:
    burly-dev [OPTIONS] <TASK> [TASK OPTIONS]

OPTIONS:
    -h, --help               Print this help message
    -V, --version            Print version information
    -C, --root DIR           Project root (default: current directory)
    -c, --config FILE        Config overlay (default: <root>/burly-dev.toml)
        --log-level LEVEL    off, error, warn, info, debug, trace (default: info)

TASKS:",
        version = env!("CARGO_PKG_VERSION")
    );
    for (name, description) in tasks::CATALOG {
        println!("    {name:<9}{description}");
    }
    println!(
        "
TASK OPTIONS:
    test     [-v|--verbose] [--coverage]
    extract  [--json] [--list] [--balanced|--strategy NAME] [--file PATH] [NAME...]

ENVIRONMENT:
    BURLY_DEV_LOG            Log level when --log-level is not given"
    );
}

/// Parsed global options plus the task name and its arguments.
#[derive(Debug, Default)]
struct Args {
    help: bool,
    version: bool,
    root: Option<PathBuf>,
    config: Option<PathBuf>,
    log_level: Option<String>,
    task: Option<String>,
    task_args: Vec<String>,
}

impl Args {
    fn parse(args: &[String]) -> Result<Self> {
        let mut result = Args::default();
        let mut i = 0;
        while i < args.len() {
            let arg = args[i].as_str();
            if result.task.is_some() {
                result.task_args.push(arg.to_string());
                i += 1;
                continue;
            }
            match arg {
                "-h" | "--help" | "help" => result.help = true,
                "-V" | "--version" => result.version = true,
                "-C" | "--root" => result.root = Some(PathBuf::from(value(args, &mut i, arg)?)),
                "-c" | "--config" => {
                    result.config = Some(PathBuf::from(value(args, &mut i, arg)?));
                }
                "--log-level" => result.log_level = Some(value(args, &mut i, arg)?),
                a if a.starts_with("--root=") => {
                    result.root = Some(PathBuf::from(&a["--root=".len()..]));
                }
                a if a.starts_with("--config=") => {
                    result.config = Some(PathBuf::from(&a["--config=".len()..]));
                }
                a if a.starts_with("--log-level=") => {
                    result.log_level = Some(a["--log-level=".len()..].to_string());
                }
                a if a.starts_with('-') => {
                    return Err(Error::Usage(format!("unknown option: {a}")));
                }
                task => result.task = Some(task.to_string()),
            }
            i += 1;
        }
        Ok(result)
    }
}

/// Take the value following an option.
fn value(args: &[String], i: &mut usize, option: &str) -> Result<String> {
    *i += 1;
    args.get(*i)
        .cloned()
        .ok_or_else(|| Error::Usage(format!("{option} needs a value")))
}

fn run(args: Args) -> Result<()> {
    let env_level = std::env::var(logging::LOG_ENV).ok();
    let level = logging::resolve_level(args.log_level.as_deref(), env_level.as_deref())
        .map_err(Error::Usage)?;
    logging::init(level);

    let Some(task_name) = args.task else {
        print_help();
        return Err(Error::Usage("no task given".into()));
    };
    let task = tasks::from_args(&task_name, &args.task_args)?;

    let root = match args.root {
        Some(root) => root,
        None => std::env::current_dir().map_err(|e| Error::io(".", e))?,
    };
    let config = Config::load(&root, args.config.as_deref())?;

    let host = SystemHost;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut ctx = Context::new(&config, &host, &root, &mut out);
    task.run(&mut ctx)
}

fn main() {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let args = match Args::parse(&argv) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("burly-dev: {e}");
            std::process::exit(e.exit_code());
        }
    };

    if args.help {
        print_help();
        return;
    }
    if args.version {
        println!("burly-dev {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    if let Err(e) = run(args) {
        log::error!("{e}");
        if !log::log_enabled!(log::Level::Error) {
            eprintln!("burly-dev: {e}");
        }
        std::process::exit(e.exit_code());
    }
}
