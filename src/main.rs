use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use jekyll_search::loader::JsonSource;
use jekyll_search::options::{FieldSort, OptionOverrides};
use jekyll_search::search::SortOrder;
use jekyll_search::search::outputs::{SearchErrorOutput, SearchOutput};
use jekyll_search::{Widget, WidgetOptions};

/// Search a JSON document collection the way the site search widget does
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML file with widget options
    #[arg(long, env = "JEKYLL_SEARCH_CONFIG")]
    config: Option<PathBuf>,

    /// Document source: a JSON file path or an http(s) URL
    #[arg(long, env = "JEKYLL_SEARCH_JSON")]
    json: Option<String>,

    /// Match query characters in order with gaps allowed (`--fuzzy=false` turns it off)
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    fuzzy: Option<bool>,

    /// Maximum number of results per query
    #[arg(long, allow_negative_numbers = true)]
    limit: Option<i64>,

    /// Field that is never searched (repeatable)
    #[arg(long = "exclude", value_name = "FIELD")]
    exclude: Vec<String>,

    /// Order results by this field
    #[arg(long, value_name = "FIELD")]
    sort_field: Option<String>,

    /// Sort descending instead of ascending
    #[arg(long, requires = "sort_field")]
    descending: bool,

    /// Template for one result, with {field} placeholders
    #[arg(long)]
    template: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Queries to run
    #[arg(required = true)]
    queries: Vec<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl Args {
    fn overrides(&self) -> OptionOverrides {
        OptionOverrides {
            json: self.json.clone().map(JsonSource::Location),
            search_result_template: self.template.clone(),
            fuzzy: self.fuzzy,
            limit: self.limit,
            exclude: (!self.exclude.is_empty()).then(|| self.exclude.clone()),
            sort: self.sort_field.clone().map(|field| FieldSort {
                field,
                order: if self.descending {
                    SortOrder::Descending
                } else {
                    SortOrder::Ascending
                },
            }),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so stdout only carries results
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    match run(&args).await {
        Ok(()) => Ok(()),
        Err(e) if matches!(args.format, OutputFormat::Json) => {
            tracing::error!("{e:#}");
            println!("{}", SearchErrorOutput::new(format!("{e:#}")).to_json());
            std::process::exit(1);
        }
        Err(e) => Err(e),
    }
}

async fn run(args: &Args) -> Result<()> {
    let base = match &args.config {
        Some(path) => {
            tracing::info!("Using config file: {}", path.display());
            WidgetOptions::from_file(path)?
        }
        None => WidgetOptions::default(),
    };
    let options = base.merge(args.overrides());

    let widget = Widget::load(options)
        .await
        .context("Failed to initialize search widget")?;

    for query in &args.queries {
        let rendered = widget.search(query);
        match args.format {
            OutputFormat::Text => {
                println!("{}", rendered.title);
                if !rendered.body.is_empty() {
                    println!("{}", rendered.body);
                }
            }
            OutputFormat::Json => {
                let output = SearchOutput::from_hits(query, widget.options().fuzzy, &rendered.hits);
                println!("{}", output.to_json());
            }
        }
    }

    Ok(())
}
