mod ast;
mod lexer;
mod parser;
mod token;

use std::env;
use std::path::Path;
use std::str::FromStr;

use clap::Parser;
use tracing::{debug, trace};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

fn main() -> anyhow::Result<()> {
    initialize_logging();

    let sapling = Sapling::parse();

    match sapling.subcmd {
        SaplingSubcommand::Parse(opts) => {
            let current_dir = std::env::current_dir()?;
            run_parse(&current_dir, opts)?;
        }
    }

    Ok(())
}

fn run_parse(current_dir: &Path, opts: ParseOpts) -> anyhow::Result<()> {
    let target_dir = current_dir.join("target").join("sapling");
    std::fs::create_dir_all(&target_dir)?;

    let source_path = Path::new(&opts.source);
    let source = std::fs::read_to_string(source_path)?;
    trace!(source_len = source.len(), "Read input file");

    let tokens = lexer::tokenize(&source);
    let tokens_path = target_dir.join("tokens.json");
    std::fs::write(&tokens_path, serde_json::to_string_pretty(&tokens)?)?;
    trace!(tokens_path = %tokens_path.display(), "Tokenized source file");

    // Lexers are single-use, so the parser gets a fresh one.
    let mut parser = parser::Parser::new(lexer::Lexer::new(&source));
    let program = parser.parse_program();
    let ast_path = target_dir.join("ast.json");
    std::fs::write(&ast_path, serde_json::to_string_pretty(&program)?)?;
    debug!(ast_path = %ast_path.display(), "Parsed source file");

    let errors_path = target_dir.join("errors.json");
    std::fs::write(&errors_path, serde_json::to_string_pretty(parser.errors())?)?;

    for error in parser.errors() {
        eprintln!("parse error: {error}");
    }

    println!("{program}");

    if parser.errors().is_empty() {
        Ok(())
    } else {
        Err(anyhow::anyhow!(
            "parsing produced {} error(s)",
            parser.errors().len()
        ))
    }
}

fn initialize_logging() {
    let env_filter = env::var("RUST_LOG").unwrap_or_default();

    tracing_subscriber::registry()
        .with(fmt::layer().with_filter(EnvFilter::from_str(&env_filter).unwrap()))
        .init();
}

#[derive(clap::Parser)]
struct Sapling {
    #[clap(subcommand)]
    subcmd: SaplingSubcommand,
}

#[derive(clap::Subcommand)]
enum SaplingSubcommand {
    Parse(ParseOpts),
}

#[derive(clap::Parser)]
#[clap(about = "Parse a source file and print the canonical rendering.")]
struct ParseOpts {
    source: String,
}
