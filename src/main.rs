use std::{path::PathBuf, process::ExitCode};

use bmfont::{compile_file, config::DEFAULT_POINTER_SIZE, CompileOptions};
use clap::Parser;

/// Compiles a binary BMFont descriptor into a C header with a static glyph
/// lookup table
#[derive(Parser)]
#[command(name = "bmfont")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Binary (version 3) .fnt file
    input: PathBuf,

    /// Output header (default: bmfont_<name>_<size>.h in the current directory)
    output: Option<PathBuf>,

    /// Pointer size of the target, in bytes, used for the size report
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_POINTER_SIZE)]
    pointer_size: usize,

    /// Don't embed the packed texture pages
    #[arg(long)]
    no_pages: bool,

    /// Directory to load pages from (default: the directory of the .fnt file)
    #[arg(long, value_name = "DIR")]
    page_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let options = CompileOptions {
        pointer_size: cli.pointer_size,
        export_pages: !cli.no_pages,
        page_dir: cli.page_dir,
    };

    match compile_file(&cli.input, cli.output.as_deref(), &options) {
        Ok(..) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
