use anyhow::{anyhow, bail, Context, Result};
use clap::{App, Arg, ArgMatches};
use env_logger::Env;
use json_nbt::{
    convert,
    encode_slice,
    io::StringFlavor,
    parse_slice,
    NestedLists,
    TranscodeError,
    TranscodeOptions,
};
use log::{error, info};
use std::{
    fs,
    path::{Path, PathBuf},
    process,
};

fn options(matches: &ArgMatches<'_>) -> Result<TranscodeOptions> {
    let mut options = TranscodeOptions::default();

    if matches.is_present("forbid-nested-lists") {
        options.nested_lists = NestedLists::Forbid;
    }

    if matches.is_present("java-strings") {
        options.string_flavor = StringFlavor::JavaCesu8;
    }

    if let Some(depth) = matches.value_of("max-depth") {
        let depth: usize = depth
            .parse()
            .with_context(|| format!("Invalid maximum depth {}", depth))?;
        options.max_depth = if depth == 0 { None } else { Some(depth) };
    }

    Ok(options)
}

// Parse failures are reported against the input file
fn file_error(file: &str, error: TranscodeError) -> anyhow::Error {
    match error {
        TranscodeError::Parse(error) =>
            anyhow!(error).context(format!("Syntax Error in file {}!", file)),
        error => error.into(),
    }
}

// The input must be named like a JSON file
fn check_extension(file: &str) -> Result<()> {
    if !file.ends_with(".json") {
        bail!("File is not type JSON!");
    }

    Ok(())
}

fn output_path(file: &str, output: Option<&str>) -> PathBuf {
    match output {
        Some(output) => PathBuf::from(output),
        None => Path::new(file).with_extension("nbt"),
    }
}

// Nothing is written unless the whole document transcodes
fn convert_file(
    file: &str,
    output: &Path,
    root_name: Option<&str>,
    options: &TranscodeOptions,
) -> Result<()>
{
    let contents = fs::read(file).with_context(|| format!("Could not read {}", file))?;
    let bytes =
        encode_slice(&contents, root_name, options).map_err(|error| file_error(file, error))?;

    fs::write(output, &bytes).with_context(|| format!("Could not write {}", output.display()))?;
    info!("Converted {} to {}!", file, output.display());
    Ok(())
}

fn dry_run(file: &str, options: &TranscodeOptions) -> Result<()> {
    let contents = fs::read(file).with_context(|| format!("Could not read {}", file))?;
    let document = parse_slice(&contents, options).map_err(|error| file_error(file, error))?;
    let root = convert::to_nbt(&document, options)?;
    println!("{}", root);
    Ok(())
}

fn run(matches: &ArgMatches<'_>) -> Result<()> {
    let file = matches.value_of("file").ok_or_else(|| anyhow!("File not specified!"))?;
    check_extension(file)?;

    let options = options(matches)?;
    if matches.is_present("dry-run") {
        return dry_run(file, &options);
    }

    let output = output_path(file, matches.value_of("output"));
    convert_file(file, &output, matches.value_of("name"), &options)
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let matches = App::new("json2nbt")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Converts a JSON document into an uncompressed NBT file")
        .arg(
            Arg::with_name("file")
                .help("The JSON file to convert")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::with_name("name")
                .long("name")
                .help("The name of the root compound")
                .takes_value(true)
                .required(false),
        )
        .arg(
            Arg::with_name("output")
                .long("output")
                .short("o")
                .help("Where to write the NBT file, defaults to FILE with an .nbt extension")
                .takes_value(true)
                .required(false),
        )
        .arg(
            Arg::with_name("max-depth")
                .long("max-depth")
                .help("The maximum nesting depth, 0 for no limit")
                .takes_value(true)
                .required(false),
        )
        .arg(
            Arg::with_name("forbid-nested-lists")
                .long("forbid-nested-lists")
                .help("Reject arrays nested inside arrays"),
        )
        .arg(
            Arg::with_name("java-strings")
                .long("java-strings")
                .help("Encode strings as Java modified UTF-8"),
        )
        .arg(
            Arg::with_name("dry-run")
                .long("dry-run")
                .help("Print the inferred tags as SNBT instead of writing a file"),
        )
        .get_matches();

    if let Err(e) = run(&matches) {
        error!("{:#}", e);
        process::exit(1);
    }
}
