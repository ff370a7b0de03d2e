use structopt::StructOpt;

use assignc::error::SourceMetadata;
use assignc::mode::{Mode, NumericType, SourceForm};

use std::io::{BufRead, Write};
use std::path::PathBuf;

use tracing_subscriber::fmt;

fn main() {
    if let Err(ref e) = run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), anyhow::Error> {
    use std::fs;
    use std::io;

    let opt = Opt::from_args();

    if let Some((_, filter)) = std::env::vars().find(|x| x.0 == "ASSIGNC_TRACE") {
        let subscriber = fmt::Subscriber::builder()
            .with_ansi(true)
            .with_writer(io::stderr)
            .with_env_filter(filter)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        // route `log` records through the same subscriber
        tracing_log::LogTracer::init()?;
    }

    let mode = Mode::new(opt.form, opt.numeric);
    let lines: Vec<String> = if !opt.expressions.is_empty() {
        opt.expressions.clone()
    } else if let Some(path) = &opt.file {
        fs::read_to_string(path)?.lines().map(str::to_string).collect()
    } else {
        io::stdin().lock().lines().collect::<Result<_, _>>()?
    };
    log::debug!("{} input lines, {mode:?}", lines.len());

    let mut out: Box<dyn Write> = match &opt.output {
        Some(path) => Box::new(io::BufWriter::new(fs::File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };

    let mut failed = 0;
    let mut compiled = 0;
    for line in lines.iter().map(|line| line.trim()).filter(|line| !line.is_empty()) {
        let meta = match &opt.file {
            Some(path) if opt.expressions.is_empty() => {
                SourceMetadata::new(line).with_file(path.clone())
            }
            _ => SourceMetadata::new(line),
        };
        match assignc::compile_source(&meta, mode) {
            Ok(report) => {
                if compiled > 0 {
                    writeln!(out)?;
                }
                write!(out, "{}", report)?;
                if opt.symbols {
                    write!(out, "\n{}", report.symbol_table())?;
                }
                compiled += 1;
            }
            Err(e) => {
                eprintln!("{}", e);
                failed += 1;
            }
        }
    }
    out.flush()?;

    if failed > 0 {
        anyhow::bail!("{} of {} expressions failed", failed, failed + compiled);
    }
    Ok(())
}

#[derive(Debug, StructOpt)]
#[structopt(name = "assignc", about = "Compiles single assignment statements")]
struct Opt {
    /// Expressions to compile, one compile each
    expressions: Vec<String>,
    /// Read expressions from this file, one per line
    #[structopt(short = "f", long = "file", parse(from_os_str))]
    file: Option<PathBuf>,
    /// Input form: source-code or math-form
    #[structopt(short = "m", long = "form", default_value = "source-code")]
    form: SourceForm,
    /// Numeric type: int or float
    #[structopt(short = "t", long = "type", default_value = "int")]
    numeric: NumericType,
    /// Write the reports here instead of stdout
    #[structopt(short = "o", long = "output", parse(from_os_str))]
    output: Option<PathBuf>,
    /// Append the symbol table to every report
    #[structopt(long)]
    symbols: bool,
}
