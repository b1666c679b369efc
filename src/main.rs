use std::path::PathBuf;
use std::process::ExitCode;
use argh::FromArgs;
use log::LevelFilter;
use pipesh::config::ConfigLoader;
use pipesh::logging;
use pipesh::repl::Shell;

/// A small interactive shell with pipes, redirection and background jobs.
#[derive(FromArgs)]
struct Args {
    /// read settings from this key=value file
    #[argh(option)]
    config: Option<PathBuf>,

    /// log debug output to stderr (or the configured log file)
    #[argh(switch, short = 'v')]
    verbose: bool,
}

fn main() -> ExitCode {
    let args: Args = argh::from_env();

    let mut config = match &args.config {
        Some(path) => match ConfigLoader::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("pipesh: {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => ConfigLoader::default_config(),
    };
    if args.verbose {
        config.log_level = LevelFilter::Debug;
    }
    if let Err(e) = logging::init(&config) {
        eprintln!("pipesh: cannot set up logging: {}", e);
    }

    let mut shell = match Shell::new(&config) {
        Ok(shell) => shell,
        Err(e) => {
            eprintln!("pipesh: cannot determine working directory: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match shell.run(std::io::stdin().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("pipesh: {}", e);
            ExitCode::FAILURE
        }
    }
}
