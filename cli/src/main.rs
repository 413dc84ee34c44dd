//! Lemmagraph CLI: build and analyse lemma dependency graphs from token tables
//!
//! Token tables come from an external dependency parser; see
//! `lemmagraph::token::TOKEN_COLUMNS` for the expected header.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use lemmagraph::algo::{rank_terms, summarize};
use lemmagraph::token::read_tokens_path;
use lemmagraph::{
    Corpus, DependencyGraph, EdgeMode, EmbeddingCache, GraphBuilder, PipelineConfig, TagPolicy,
    TokenRecord, Vocabulary,
};
use serde_json::{json, Value};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lemmagraph", version, about = "Lemma dependency graph toolkit")]
struct Cli {
    /// Pipeline configuration file (YAML)
    #[arg(long, global = true, env = "LEMMAGRAPH_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum TagPolicyArg {
    MostFrequent,
    FirstSeen,
}

#[derive(Args)]
struct FoldArgs {
    /// Token table produced by the tagger
    #[arg(long)]
    tokens: PathBuf,

    /// Mirror every relation (undirected graph)
    #[arg(long)]
    undirected: bool,

    /// Collapse repeated relations into single unweighted edges
    #[arg(long)]
    dedupe: bool,

    /// Representative part-of-speech selection
    #[arg(long)]
    tag_policy: Option<TagPolicyArg>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the vocabulary of a token table
    Vocab {
        /// Token table produced by the tagger
        #[arg(long)]
        tokens: PathBuf,
    },
    /// Fold a token table and list the nodes by degree
    Build {
        #[command(flatten)]
        fold: FoldArgs,

        /// Number of nodes to show (all when omitted)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Graph statistics and top PageRank terms
    Stats {
        #[command(flatten)]
        fold: FoldArgs,

        /// Rank with edge weights (TextRank style)
        #[arg(long)]
        weighted_rank: bool,

        /// Number of top terms to report
        #[arg(long)]
        top: Option<usize>,

        /// Rank only nouns, proper nouns, verbs and adjectives
        #[arg(long)]
        content_words: bool,
    },
    /// Write node/edge lists and a node-link JSON document
    Export {
        #[command(flatten)]
        fold: FoldArgs,

        /// Output directory
        #[arg(long)]
        out: PathBuf,
    },
    /// Load and clean a document corpus
    Corpus {
        /// Corpus file
        #[arg(long)]
        input: PathBuf,

        /// Text column (defaults to the configured one)
        #[arg(long)]
        column: Option<String>,
    },
    /// Nearest terms in a cached embedding file
    Similar {
        /// Query term
        term: String,

        /// Embedding cache file (defaults to the configured one)
        #[arg(long)]
        cache: Option<PathBuf>,

        /// Number of neighbours
        #[arg(short, long, default_value = "10")]
        k: usize,
    },
}

/// Tabular command output
struct Output {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Output {
    fn new(columns: &[&str]) -> Self {
        Output {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    fn push(&mut self, row: Vec<Value>) {
        self.rows.push(row);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    let output = match cli.command {
        Commands::Vocab { tokens } => run_vocab(&tokens)?,
        Commands::Build { fold, limit } => run_build(&config, &fold, limit)?,
        Commands::Stats {
            fold,
            weighted_rank,
            top,
            content_words,
        } => run_stats(&config, &fold, weighted_rank, top, content_words, &cli.format)?,
        Commands::Export { fold, out } => run_export(&config, &fold, &out)?,
        Commands::Corpus { input, column } => run_corpus(&config, &input, column.as_deref())?,
        Commands::Similar { term, cache, k } => run_similar(&config, &term, cache, k)?,
    };

    if let Some(output) = output {
        print_output(&output, &cli.format)?;
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<PipelineConfig> {
    match path {
        Some(path) => PipelineConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(PipelineConfig::default()),
    }
}

fn read_tokens(path: &Path) -> Result<Vec<TokenRecord>> {
    let tokens =
        read_tokens_path(path).with_context(|| format!("reading tokens {}", path.display()))?;
    info!("Read {} tokens from {}", tokens.len(), path.display());
    Ok(tokens)
}

fn fold_graph(config: &PipelineConfig, args: &FoldArgs) -> Result<(Vocabulary, DependencyGraph)> {
    let mut fold = config.fold;
    if args.undirected {
        fold.directed = false;
    }
    if args.dedupe {
        fold.edge_mode = EdgeMode::Deduplicated;
    }
    if let Some(policy) = args.tag_policy {
        fold.tag_policy = match policy {
            TagPolicyArg::MostFrequent => TagPolicy::MostFrequent,
            TagPolicyArg::FirstSeen => TagPolicy::FirstSeen,
        };
    }

    let tokens = read_tokens(&args.tokens)?;
    let (vocab, graph) = GraphBuilder::new(fold).build(&tokens).context("folding tokens")?;
    info!(
        "Built {} graph: {} nodes, {} edges",
        if graph.directed { "directed" } else { "undirected" },
        graph.node_count(),
        graph.edge_count()
    );
    Ok((vocab, graph))
}

fn run_vocab(tokens: &Path) -> Result<Option<Output>> {
    let vocab = GraphBuilder::build_vocabulary(&read_tokens(tokens)?);
    let mut out = Output::new(&["id", "lemma"]);
    for (id, lemma) in vocab.iter() {
        out.push(vec![json!(id.as_u64()), json!(lemma)]);
    }
    Ok(Some(out))
}

fn run_build(
    config: &PipelineConfig,
    args: &FoldArgs,
    limit: Option<usize>,
) -> Result<Option<Output>> {
    let (_, graph) = fold_graph(config, args)?;
    let mut out = Output::new(&["id", "label", "upos", "degree", "size", "color"]);
    for node in graph.top_by_degree(limit.unwrap_or(usize::MAX)) {
        out.push(vec![
            json!(node.id.as_u64()),
            json!(node.label),
            json!(node.upos.as_str()),
            json!(node.degree),
            json!(node.size),
            json!(node.color),
        ]);
    }
    Ok(Some(out))
}

fn run_stats(
    config: &PipelineConfig,
    args: &FoldArgs,
    weighted_rank: bool,
    top: Option<usize>,
    content_words: bool,
    format: &OutputFormat,
) -> Result<Option<Output>> {
    let (_, graph) = fold_graph(config, args)?;
    let mut analytics = config.analytics;
    analytics.weighted |= weighted_rank;
    analytics.content_words_only |= content_words;
    if let Some(k) = top {
        analytics.top_k = k;
    }

    let summary = summarize(&graph, &analytics);
    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(None);
    }

    println!("Nodes:        {}", summary.nodes);
    println!("Edges:        {}", summary.edges);
    println!("Directed:     {}", summary.directed);
    println!("Density:      {:.6}", summary.density);
    println!("Transitivity: {:.6}", summary.transitivity);
    println!("Mean degree:  {:.3}", summary.mean_degree);
    println!(
        "Components:   {} (largest {})",
        summary.components, summary.largest_component
    );
    println!("Isolated:     {}", summary.isolated_terms);
    println!();

    let mut out = Output::new(&["rank", "term", "score"]);
    for (i, term) in summary.top_terms.iter().enumerate() {
        out.push(vec![json!(i + 1), json!(term.label), json!(term.score)]);
    }
    Ok(Some(out))
}

fn run_export(config: &PipelineConfig, args: &FoldArgs, out: &Path) -> Result<Option<Output>> {
    let (_, graph) = fold_graph(config, args)?;
    graph
        .export_dir(out)
        .with_context(|| format!("exporting to {}", out.display()))?;

    // PageRank scores next to the graph files
    let ranked = rank_terms(&graph, &config.analytics);
    let ranking = std::fs::File::create(out.join("pagerank.json"))?;
    serde_json::to_writer_pretty(ranking, &ranked)?;

    println!(
        "Exported {} nodes and {} edges to {}",
        graph.node_count(),
        graph.edge_count(),
        out.display()
    );
    Ok(None)
}

fn run_corpus(
    config: &PipelineConfig,
    input: &Path,
    column: Option<&str>,
) -> Result<Option<Output>> {
    let column = column.unwrap_or(&config.text_column);
    let corpus = Corpus::from_path(input, column)
        .with_context(|| format!("loading corpus {}", input.display()))?;

    println!("Columns:   {}", corpus.columns.join(", "));
    println!("Documents: {}", corpus.len());
    println!("Dropped:   {}", corpus.dropped_rows);
    Ok(None)
}

fn run_similar(
    config: &PipelineConfig,
    term: &str,
    cache: Option<PathBuf>,
    k: usize,
) -> Result<Option<Output>> {
    let cache = match cache {
        Some(path) => EmbeddingCache::new(path),
        None => EmbeddingCache::from_config(&config.embedding),
    };
    if !cache.is_cached() {
        anyhow::bail!("no embedding cache at {}", cache.path().display());
    }

    let table = cache.load().context("loading embeddings")?;
    let mut out = Output::new(&["term", "similarity"]);
    for (other, score) in table.most_similar(term, k)? {
        out.push(vec![json!(other), json!(score)]);
    }
    Ok(Some(out))
}

fn print_output(output: &Output, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let records: Vec<Value> = output
                .rows
                .iter()
                .map(|row| {
                    let map = output.columns.iter().cloned().zip(row.iter().cloned()).collect();
                    Value::Object(map)
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        OutputFormat::Csv => write_csv(output, std::io::stdout().lock())?,
        OutputFormat::Table => {
            if output.rows.is_empty() {
                println!("(no results)");
                return Ok(());
            }

            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(&output.columns);

            for row in &output.rows {
                let cells: Vec<String> = row.iter().map(format_table_value).collect();
                table.add_row(cells);
            }

            println!("{}", table);
            println!("{} row(s)", output.rows.len());
        }
    }
    Ok(())
}

fn format_table_value(v: &Value) -> String {
    match v {
        Value::Null => "null".to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => format!("{:.4}", f),
            _ => n.to_string(),
        },
        _ => serde_json::to_string(v).unwrap_or_default(),
    }
}

fn write_csv<W: Write>(output: &Output, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&output.columns)?;
    for row in &output.rows {
        wtr.write_record(row.iter().map(format_csv_value))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Plain cell text; quoting is left to the CSV writer
fn format_csv_value(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => serde_json::to_string(v).unwrap_or_default(),
    }
}
