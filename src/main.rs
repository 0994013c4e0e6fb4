use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};

use commands::GlobalArgs;

#[derive(Debug, Clone, Copy)]
enum ResponseMode {
    Json,
    Raw,
}

mod commands;
mod output;
mod tty;

use commands::{add_extension, archive, hash, render};
use scriptkit::args::PlatformParser;
use scriptkit::defaults::Defaults;
use scriptkit::platform::HostProbe;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "scriptkit")]
#[command(version = VERSION)]
#[command(about = "Small file and template utilities")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Append an extension to a text file based on its detected content type
    AddExtension(add_extension::AddExtensionArgs),
    /// Render a template with variables from a YAML file
    Render(render::RenderArgs),
    /// Print the SHA-256 digest of a file
    Hash(hash::HashArgs),
    /// Copy matching files into a content-addressed directory tree
    Archive(archive::ArchiveArgs),
}

fn response_mode(command: &Commands) -> ResponseMode {
    match command {
        Commands::Render(_) => ResponseMode::Raw,
        _ => ResponseMode::Json,
    }
}

fn main() -> std::process::ExitCode {
    let parser = PlatformParser::detect(Cli::command(), &HostProbe);
    let args = std::env::args_os().map(|arg| arg.to_string_lossy().into_owned());

    let matches = match parser.try_get_matches_from(args) {
        Ok(matches) => matches,
        Err(e) => {
            e.exit();
        }
    };

    let cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(e) => {
            e.exit();
        }
    };

    let global = GlobalArgs {
        defaults: Defaults::default(),
    };

    if let ResponseMode::Raw = response_mode(&cli.command) {
        return match commands::run_raw(cli.command, &global) {
            Ok((content, exit_code)) => {
                if let Err(err) = output::print_raw(&content) {
                    let _ = output::print_json_result(Err(err));
                    return std::process::ExitCode::from(1);
                }
                std::process::ExitCode::from(exit_code_to_u8(exit_code))
            }
            Err(err) => {
                let exit_code = output::exit_code_for_error(err.code);
                let _ = output::print_json_result(Err(err));
                std::process::ExitCode::from(exit_code_to_u8(exit_code))
            }
        };
    }

    let (json_result, exit_code) = commands::run_json(cli.command, &global);
    let _ = output::print_json_result(json_result);

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
