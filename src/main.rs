use apex_pdf::{Converter, Error, FontConfig, HTML_FILE, OUTPUT_FILE, PipInstaller, WeasyPrint};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "apex-pdf", version, about = "Convert the executive summary HTML to PDF")]
struct Args {
    /// Input HTML file
    #[arg(long, default_value = HTML_FILE)]
    input: PathBuf,
    /// Output PDF file
    #[arg(long, default_value = OUTPUT_FILE)]
    output: PathBuf,
    /// WeasyPrint executable to use instead of searching PATH
    #[arg(long, env = "APEX_PDF_ENGINE")]
    engine: Option<PathBuf>,
    /// Fail instead of installing WeasyPrint when it is missing
    #[arg(long)]
    no_install: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    let mut stdout = std::io::stdout().lock();

    let engine = match args.engine {
        Some(program) => WeasyPrint::with_program(program),
        None => match WeasyPrint::discover() {
            Err(e) if !args.no_install => {
                log::info!("{e}");
                let installed = apex_pdf::install_engine("weasyprint", &PipInstaller, &mut stdout);
                if let Err(e) = installed {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                }
                std::process::exit(0);
            }
            found => found,
        },
    };
    let engine = match engine {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let work_dir = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Error: cannot read current directory: {e}");
            std::process::exit(1);
        }
    };

    let converter = Converter::new(work_dir)
        .input(args.input)
        .output(args.output)
        .fonts(FontConfig::from_env());

    match converter.convert(&engine, &mut stdout) {
        Ok(_) => {}
        // Already reported on stdout.
        Err(Error::MissingInput { .. } | Error::OutputMissing(_)) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
