use clap::Parser;
use depot::config::InstallConfig;
use depot::install::Installer;
use depot::pipeline::CommandPipeline;
use depot::runtime::RealRuntime;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

/// depot - local package installer
///
/// Publishes a built project into the shared, version-addressed package
/// depot and creates a runnable shortcut for it. The project must already
/// have been built and tested; the compiled artifact is expected at
/// outputs/<project>.jar next to the project.json descriptor.
///
/// The depot root is taken from --home or the DEPOT_HOME environment
/// variable and defaults to ~/.depot. Set DEPOT_PIPELINE to a command line
/// to (re)run the build/test pipeline before installing.
///
/// Examples:
///   depot                  # Install the project in the current directory
///   depot path/to/project  # Install a specific project
#[derive(Parser, Debug)]
#[command(author, version = env!("DEPOT_VERSION"), about)]
struct Cli {
    /// The project folder to install from (defaults to the current directory)
    #[arg(value_name = "FOLDER")]
    folder: Option<PathBuf>,

    /// The project folder to install from; wins over the positional FOLDER
    #[arg(long = "folder", value_name = "PATH")]
    folder_flag: Option<PathBuf>,

    /// Depot root directory (also via DEPOT_HOME)
    #[arg(long = "home", env = "DEPOT_HOME", value_name = "PATH")]
    home: Option<PathBuf>,

    /// Whether or not to show verbose logs
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "depot=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let runtime = RealRuntime;
    let config =
        match InstallConfig::resolve(&runtime, cli.home, cli.folder_flag, cli.folder, cli.verbose)
        {
            Ok(config) => config,
            Err(err) => {
                eprintln!("ERROR: {err:#}");
                return ExitCode::FAILURE;
            }
        };
    let pipeline = CommandPipeline::from_env(&runtime);
    let installer = Installer::new(&runtime, &pipeline, &config);

    let started = Instant::now();
    let code = match installer.install() {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ERROR: {err}");
            let status = err.exit_status();
            ExitCode::from(u8::try_from(status).unwrap_or(1))
        }
    };

    if config.show_total_duration {
        println!("Done ({:.1}s)", started.elapsed().as_secs_f64());
    }

    code
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["depot"]).unwrap();
        assert_eq!(cli.folder, None);
        assert_eq!(cli.folder_flag, None);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_positional_folder() {
        let cli = Cli::try_parse_from(["depot", "path/to/project"]).unwrap();
        assert_eq!(cli.folder, Some(PathBuf::from("path/to/project")));
    }

    #[test]
    fn test_cli_named_folder_and_verbose() {
        let cli = Cli::try_parse_from(["depot", "--folder", "/p", "--verbose"]).unwrap();
        assert_eq!(cli.folder_flag, Some(PathBuf::from("/p")));
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_home_flag() {
        let cli = Cli::try_parse_from(["depot", "--home", "/srv/depot"]).unwrap();
        assert_eq!(cli.home, Some(PathBuf::from("/srv/depot")));
    }

    #[test]
    fn test_cli_unknown_flag_fails() {
        assert!(Cli::try_parse_from(["depot", "--frobnicate"]).is_err());
    }
}
