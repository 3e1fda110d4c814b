mod fixture;
mod test_runner;

use std::path::Path;
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use log::LevelFilter;

use wall::{Block, Structure};

#[derive(Parser)]
#[command(name = "wall", version, about = "Query a wall of building blocks")]
struct Cli {
    /// Disable colored error output
    #[arg(long, global = true)]
    no_color: bool,

    /// Log more detail (-v debug, -vv trace). Defaults to RUST_LOG.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a query against a wall fixture
    Query(QueryArgs),

    /// Run .test.toml scenario files
    Test(TestArgs),
}

#[derive(clap::Args)]
struct QueryArgs {
    /// TOML file describing the wall
    file: String,

    #[command(subcommand)]
    query: Query,
}

#[derive(Subcommand)]
enum Query {
    /// Count the top-level blocks
    Count,

    /// Print the first block with this color (exit 1 if none)
    Color { color: String },

    /// Print every block made of this material
    Material { material: String },
}

#[derive(clap::Args)]
struct TestArgs {
    /// Path to a .test.toml file or directory containing them
    path: String,

    /// Run only scenarios in these categories (subfolder names). Repeatable.
    #[arg(short, long)]
    category: Vec<String>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Query(query_args) => do_query(query_args, cli.no_color),
        Command::Test(test_args) => {
            let path = Path::new(&test_args.path);
            let exit_code = test_runner::run_tests(path, cli.no_color, &test_args.category);
            process::exit(exit_code);
        }
    }
}

fn init_logging(verbose: u8) {
    let mut builder = env_logger::Builder::from_default_env();
    match verbose {
        0 => {}
        1 => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }
    if let Err(e) = builder.try_init() {
        eprintln!("warning: logger already initialized: {}", e);
    }
}

fn do_query(args: QueryArgs, no_color: bool) {
    let color_choice = if no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };

    let source = match std::fs::read_to_string(&args.file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: cannot read '{}': {}", args.file, e);
            process::exit(1);
        }
    };

    let mut files = SimpleFiles::new();
    let file_id = files.add(args.file.clone(), source.clone());

    let wall_file = match fixture::parse(&source, file_id) {
        Ok(f) => f,
        Err(error) => {
            let writer = StandardStream::stderr(color_choice);
            let config = term::Config::default();
            let diagnostic = error.to_diagnostic();
            let _ = term::emit_to_write_style(&mut writer.lock(), &config, &files, &diagnostic);
            process::exit(1);
        }
    };

    if !wall_file.checks.is_empty() {
        log::debug!(
            "ignoring {} check(s) in {}; use `wall test` to run them",
            wall_file.checks.len(),
            args.file
        );
    }

    let wall = fixture::build_wall(wall_file.blocks);
    log::info!("loaded {} top-level blocks from {}", wall.count(), args.file);

    match args.query {
        Query::Count => println!("{}", wall.count()),
        Query::Color { color } => match wall
            .find_block_by_color(&color)
            .and_then(|block| fixture::position_of(&wall, block).map(|i| (i, block)))
        {
            Some((index, block)) => println!("{}", describe(index, block)),
            None => {
                eprintln!("no block has color '{}'", color);
                process::exit(1);
            }
        },
        Query::Material { material } => {
            for block in wall.find_blocks_by_material(&material) {
                if let Some(index) = fixture::position_of(&wall, block) {
                    println!("{}", describe(index, block));
                }
            }
        }
    }
}

/// One output line per block: `#<index> <color> <material>`, with a
/// sub-block count for composites.
fn describe(index: usize, block: &dyn Block) -> String {
    let mut line = format!("#{} {} {}", index, block.color(), block.material());
    if let Some(composite) = block.as_composite() {
        line.push_str(&format!(" (composite of {})", composite.blocks().len()));
    }
    line
}
