use std::{
    io::{self, BufWriter, IsTerminal},
    process,
};

use clap::Parser;

use chlog::{
    error::{Error, Result},
    fmt::{ChangelogFormat, FormatWriter, JsonWriter, MarkdownWriter},
    load_context, load_options,
    pipeline::{run_stdin, Orchestrator},
    wlnerr, ChangelogStream, ReleaseVersion, RenderConfig,
};

#[derive(clap::Parser)]
#[command(
    name = "chlog",
    about = "Write a conventional changelog from line delimited JSON commits"
)]
struct Args {
    /// Line delimited JSON files to read commits from; standard input is
    /// read when none are given and input is piped
    paths: Vec<String>,

    #[arg(
        short = 'v',
        long = "ver",
        help = "Version number of the up-coming release"
    )]
    ver: Option<String>,

    #[arg(
        short,
        long,
        help = "Path of a JSON file that defines template variables"
    )]
    context: Option<String>,

    #[arg(
        short,
        long,
        help = "Path of a TOML file that defines renderer options"
    )]
    options: Option<String>,
}

fn main() {
    let args = Args::parse();
    match run(&args) {
        Ok(code) => process::exit(code),
        Err(e) => {
            wlnerr!("{}", e);
            process::exit(1);
        }
    }
}

fn run(args: &Args) -> Result<i32> {
    // Cheap validation first: a bad version or side input fails the whole
    // invocation before any commit input is read.
    let version = ReleaseVersion::parse(args.ver.as_deref())?;
    let context = args.context.as_deref().map(load_context).transpose()?;
    let options = args
        .options
        .as_deref()
        .map(load_options)
        .transpose()?
        .unwrap_or_default();
    let config = RenderConfig {
        version,
        context,
        options,
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut writer: Box<dyn FormatWriter + '_> = match config.options.format {
        ChangelogFormat::Markdown => Box::new(MarkdownWriter::new(&mut out)),
        ChangelogFormat::Json => Box::new(JsonWriter::new(&mut out)),
    };
    let stream = ChangelogStream::new(&config, writer.as_mut());

    if args.paths.is_empty() {
        if io::stdin().is_terminal() {
            return Err(Error::NoInput);
        }
        let stdin = io::stdin();
        run_stdin(stream, stdin.lock())?;
        return Ok(0);
    }

    let succeeded = Orchestrator::new(stream, &args.paths).run(&mut io::stderr())?;
    Ok(if succeeded == 0 { 1 } else { 0 })
}
