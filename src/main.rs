use clap::Parser;
use std::io;
use std::path::{Path, PathBuf};
use tmplgen::{ALL_TEMPLATES, AppConfig, Finder, Processor, Result, TmplgenError};

const LONG_HELP: &str = r#"
Layout:
  Each template directory holds a template file (default template.j2) and a
  data file (default data.yaml) rendered against it.

Directives (in rendered output):
  # config x y ext=yaml separate=false   - first line only; per-block overrides
  # file: sub/path.txt                   - route the current segment to a path
  ---                                    - close the current segment

Examples:
  # Render a single template directory
  tmplgen ./templates/app
  # Render every template directory under a tree
  tmplgen --multiple ./templates
  # Render one named template from a tree
  tmplgen --multiple --template nginx ./templates
  # Keep the separator lines in a single output file
  tmplgen --no-separate ./templates/app
  # Custom output directory and config file
  tmplgen -o generated -c tmplgen.yaml ./templates/app

Configuration file (default: config.yaml, all keys optional):
  output_dir: output        # root for generated files
  output_extension: ""      # extension for default-named files
  template_file: template.j2
  data_file: data.yaml
  default_prefix: file      # base name when no '# file:' path is given
"#;

/// Render templates against YAML data and split the output into files.
#[derive(Parser, Debug)]
#[command(
    name = "tmplgen",
    version,
    about = "Render templates against YAML data and split the output into files.",
    after_long_help = LONG_HELP
)]
struct Cli {
    /// Source directory containing templates
    #[arg(value_name = "DIR")]
    source_dir: PathBuf,

    /// Template to process in --multiple mode (ALL processes every template)
    #[arg(short, long, value_name = "NAME", default_value = ALL_TEMPLATES)]
    template: String,

    /// Process a tree of template directories instead of a single one
    #[arg(short, long)]
    multiple: bool,

    /// Output directory (overrides the config file)
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Don't split output at --- separator lines
    #[arg(long)]
    no_separate: bool,

    /// Don't clean the output directory before generating
    #[arg(long)]
    no_clean: bool,

    /// Keep processing remaining templates after a failure
    #[arg(short, long)]
    keep_going: bool,

    /// Path to the configuration file
    #[arg(short, long, value_name = "FILE", env = "TMPLGEN_CONFIG", default_value = "config.yaml")]
    config: PathBuf,

    /// Increase verbosity (can be used multiple times)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    let log_level = match (cli.quiet, cli.verbose) {
        (true, _) => LogLevel::Error,
        (false, 0) => LogLevel::Warn,
        (false, 1) => LogLevel::Info,
        (false, _) => LogLevel::Debug,
    };

    if let Err(e) = run(&cli, log_level) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli, log_level: LogLevel) -> Result<()> {
    let mut config = AppConfig::load(&cli.config)?;
    if let Some(output) = &cli.output {
        config.output_dir.clone_from(output);
    }

    // Locate all units before touching the output directory, so a bad
    // invocation never wipes previous output
    let finder = Finder::new(&cli.source_dir, &config);
    let templates = if cli.multiple {
        finder.find_templates(&cli.template)?
    } else {
        finder.single_unit()?
    };
    log(
        log_level,
        LogLevel::Info,
        &format!("Found {} template(s) in {}", templates.len(), cli.source_dir.display()),
    );

    if !cli.no_clean {
        log(
            log_level,
            LogLevel::Debug,
            &format!("Cleaning output directory {}", config.output_dir.display()),
        );
        clean_output_dir(&config.output_dir)?;
    }

    let output_dir = config.output_dir.clone();
    let processor = Processor::new(config, !cli.no_separate);
    let mut first_error = None;

    for template_path in &templates {
        log(
            log_level,
            LogLevel::Info,
            &format!("Processing {}", template_path.display()),
        );
        match processor.process_template(template_path, cli.multiple) {
            Ok(()) => {}
            Err(e) if cli.keep_going => {
                log(
                    log_level,
                    LogLevel::Error,
                    &format!("{}: {e}", template_path.display()),
                );
                first_error.get_or_insert(e);
            }
            Err(e) => return Err(e),
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => {
            log(
                log_level,
                LogLevel::Info,
                &format!("Output written to {}", output_dir.display()),
            );
            Ok(())
        }
    }
}

/// Removes and recreates the output directory so repeated runs produce
/// identical trees.
fn clean_output_dir(output_dir: &Path) -> Result<()> {
    match std::fs::remove_dir_all(output_dir) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(TmplgenError::write(output_dir, e)),
    }
    std::fs::create_dir_all(output_dir).map_err(|e| TmplgenError::write(output_dir, e))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

fn log(current_level: LogLevel, message_level: LogLevel, message: &str) {
    if message_level >= current_level {
        eprintln!(
            "[{}] {}",
            match message_level {
                LogLevel::Debug => "DEBUG",
                LogLevel::Info => "INFO",
                LogLevel::Warn => "WARN",
                LogLevel::Error => "ERROR",
            },
            message
        );
    }
}
