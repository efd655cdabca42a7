use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use gramcloud::data::export;
use gramcloud::data::loader;
use gramcloud::data::model::NgramKind;
use gramcloud::state::Session;
use gramcloud::text::aggregate::ranked;

#[derive(Parser)]
#[command(name = "gramcloud")]
#[command(about = "Extract n-gram tokens from a CSV column and build word-cloud counts", long_about = None)]
struct Cli {
    /// Input table (.csv or .json)
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Text column to extract tokens from (omit to list the columns)
    #[arg(short, long, value_name = "NAME")]
    column: Option<String>,

    /// Unigram to blacklist (repeatable)
    #[arg(short = 'x', long = "exclude", value_name = "WORD")]
    exclude: Vec<String>,

    /// Which n-gram kind to report
    #[arg(short, long, value_enum, default_value = "unigrams")]
    kind: KindArg,

    /// How many ranked tokens to print
    #[arg(short, long, default_value_t = 20)]
    top: usize,

    /// Path for the augmented CSV (default: (Extracted)<input name>)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Also write the selected kind's {text, value} list as JSON
    #[arg(long, value_name = "PATH")]
    cloud_json: Option<PathBuf>,

    /// Skip writing the augmented CSV
    #[arg(long)]
    no_export: bool,
}

#[derive(ValueEnum, Clone, Copy)]
enum KindArg {
    Unigrams,
    Bigrams,
    Trigrams,
}

impl From<KindArg> for NgramKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Unigrams => NgramKind::Unigram,
            KindArg::Bigrams => NgramKind::Bigram,
            KindArg::Trigrams => NgramKind::Trigram,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let table = loader::load_file(&cli.file)
        .with_context(|| format!("loading {}", cli.file.display()))?;
    let export_name = export::export_file_name(&table.source_name);

    // Without a column selection there is nothing to extract; show what the
    // file offers and stop.
    let Some(column) = cli.column.as_deref() else {
        println!("Columns in {} ({} rows):", table.source_name, table.len());
        for header in &table.headers {
            println!("  {header}");
        }
        return Ok(());
    };

    let mut session = Session::new();
    session.set_table(table);
    session.set_active_column(column)?;

    for word in &cli.exclude {
        if !session.add_exclusion(word) {
            log::warn!("exclusion '{word}' ignored (blank or already present)");
        }
    }

    let count = session.extract()?;

    let kind = NgramKind::from(cli.kind);
    let list = ranked(session.frequencies().kind(kind));

    println!("{count} rows extracted from column '{column}'");
    if !session.exclusions().is_empty() {
        let excluded: Vec<&str> = session.exclusions().iter().collect();
        println!("Excluded words: {}", excluded.join(", "));
    }
    println!("Top {} {kind}:", cli.top.min(list.len()));
    for wf in list.iter().take(cli.top) {
        println!("{:>6}  {}", wf.value, wf.text);
    }

    if let Some(path) = &cli.cloud_json {
        let file =
            File::create(path).with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(file, &list).context("writing word-cloud JSON")?;
        println!("Wrote word-cloud data to {}", path.display());
    }

    if !cli.no_export {
        let output_path = cli.output.clone().unwrap_or_else(|| PathBuf::from(&export_name));
        let file = File::create(&output_path)
            .with_context(|| format!("creating {}", output_path.display()))?;
        session.export(file)?;
        println!("Wrote augmented CSV to {}", output_path.display());
    }

    Ok(())
}
