use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vbind::{
    commands::{
        call::{self, CallCommand},
        config::{self, ConfigAction},
        manifest, value,
    },
    init_tracing, GlobalOpts,
};
use vbind_config::Config;
use vbind_logger as logger;

#[derive(Parser)]
#[command(name = "vbind")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Dynamic values and typed process binding",
    long_about = "vbind inspects component manifests, calls bound processes with JSON arguments and renders dynamic values."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Configure the vbind tool
    #[command(subcommand_required = false, arg_required_else_help = false)]
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
    /// Print the demo component manifest, or check a process descriptor file
    Manifest {
        /// Only print the manifest of this process
        #[arg(long)]
        process: Option<String>,
        /// Parse a JSON process descriptor and print it in canonical form
        #[arg(long, value_name = "PATH", conflicts_with = "process")]
        file: Option<PathBuf>,
    },
    /// Call a demo process with JSON arguments
    Call(CallCommand),
    /// Render a JSON value
    Render {
        json: String,
        /// Dotted path to render instead of the whole value (e.g. items.0.name)
        #[arg(long)]
        path: Option<String>,
        /// Flatten nested lists by one level
        #[arg(long)]
        lift: bool,
    },
    /// Merge two JSON values; the second wins on conflicts
    Merge { a: String, b: String },
    /// Replace every regex match in the strings of a JSON value
    Replace {
        json: String,
        pattern: String,
        replacement: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config: {}", e);
        Config::default()
    });

    let verbosity = if cli.global.quiet || cli.global.verbose > 0 {
        cli.global.verbosity_level()
    } else {
        config.verbosity.unwrap_or(0)
    };

    if let Err(e) = logger::init_with_verbosity(verbosity, cli.global.quiet, config.log_dir()) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }
    init_tracing(verbosity);

    let format = match cli.global.output_format(config.output_format()) {
        Ok(format) => format,
        Err(e) => {
            logger::error(&e.to_string());
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Config { action } => config::handle_config(action, &cli.global),
        Commands::Manifest { process, file } => {
            manifest::handle_manifest(process.as_deref(), file.as_deref(), format)
        }
        Commands::Call(cmd) => match call::handle_call(&cmd, format) {
            Ok(status) if status.is_ok() => Ok(()),
            Ok(status) => {
                logger::show_log_path();
                std::process::exit(status.code().abs());
            }
            Err(e) => Err(e),
        },
        Commands::Render { json, path, lift } => {
            value::handle_render(&json, path.as_deref(), lift, format)
        }
        Commands::Merge { a, b } => value::handle_merge(&a, &b, format),
        Commands::Replace {
            json,
            pattern,
            replacement,
        } => value::handle_replace(&json, &pattern, &replacement, format),
    };

    if let Err(e) = result {
        logger::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
