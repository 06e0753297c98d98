use anyhow::{bail, Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use repoquery::{
    FieldTypeRegistry, IndexMapping, QueryParameters, ResponseSanitizer, SearchQueryBuilder,
    SearchSettings, TermsQueryBuilder,
};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "repoquery")]
#[command(about = "Compile repository search parameters into query DSL", long_about = None)]
struct Args {
    /// JSON settings file overriding the built-in defaults
    #[arg(long, global = true, env = "REPOQUERY_SETTINGS")]
    settings: Option<PathBuf>,

    /// Print compact instead of pretty JSON
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile an entity search query
    Search {
        /// Index mapping JSON file
        #[arg(long, env = "REPOQUERY_MAPPING")]
        mapping: PathBuf,

        /// Document type the mapping is nested under (e.g. "repo")
        #[arg(long, env = "REPOQUERY_DOC_TYPE")]
        doc_type: Option<String>,

        #[command(flatten)]
        params: ParamArgs,
    },
    /// Compile a terms-suggestion query
    Terms {
        #[command(flatten)]
        params: ParamArgs,
    },
    /// Print the cleaned first hit of a raw search response
    Sanitize {
        /// Response JSON file, stdin when omitted
        response: Option<PathBuf>,

        /// Print every hit instead of the first
        #[arg(long)]
        all: bool,
    },
}

#[derive(ClapArgs)]
struct ParamArgs {
    /// Search parameter as key=value; repeat a key to pass a list
    #[arg(long = "param", short = 'p', value_name = "KEY=VALUE")]
    params: Vec<String>,

    /// JSON file holding a parameter object, merged under --param
    #[arg(long)]
    params_json: Option<PathBuf>,
}

impl ParamArgs {
    fn load(&self) -> Result<QueryParameters> {
        let pairs = self
            .params
            .iter()
            .map(|pair| {
                pair.split_once('=')
                    .with_context(|| format!("parameter '{}' is not KEY=VALUE", pair))
            })
            .collect::<Result<Vec<_>>>()?;
        let from_pairs = QueryParameters::from_pairs(pairs);

        let mut params = match self.params_json {
            Some(ref path) => {
                let body = read_json(path)?;
                QueryParameters::from_json(&body)
                    .with_context(|| format!("reading parameters from {:?}", path))?
            }
            None => QueryParameters::new(),
        };
        for (name, value) in from_pairs.iter() {
            params.insert(name, value.clone());
        }
        Ok(params)
    }
}

fn read_json(path: &Path) -> Result<Value> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {:?}", path))
}

fn read_stdin_json() -> Result<Value> {
    let raw = std::io::read_to_string(std::io::stdin()).context("reading stdin")?;
    serde_json::from_str(&raw).context("parsing stdin")
}

fn print(value: &Value, compact: bool) -> Result<()> {
    let out = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{}", out);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let args = Args::parse();

    let settings = match args.settings {
        Some(ref path) => SearchSettings::from_file(path)
            .with_context(|| format!("loading settings from {:?}", path))?,
        None => SearchSettings::default(),
    };

    let output = match args.command {
        Command::Search {
            ref mapping,
            ref doc_type,
            ref params,
        } => {
            let mapping = IndexMapping::from_file(mapping, doc_type.as_deref())
                .with_context(|| format!("loading mapping from {:?}", mapping))?;
            let registry = FieldTypeRegistry::from_mapping(&mapping);
            if registry.is_empty() {
                bail!("mapping declares no fields");
            }
            info!("Field registry built with {} fields", registry.len());

            let builder = SearchQueryBuilder::new(Arc::new(registry), settings.entity);
            builder.compile(&params.load()?)?.to_json()
        }
        Command::Terms { ref params } => TermsQueryBuilder::new(settings.terms)
            .compile(&params.load()?)?
            .to_json(),
        Command::Sanitize { ref response, all } => {
            let response = match response {
                Some(path) => read_json(path)?,
                None => read_stdin_json()?,
            };
            let sanitizer = ResponseSanitizer::from(&settings);
            if all {
                Value::Array(sanitizer.sanitize_hits(&response))
            } else {
                sanitizer.parse_response(&response)
            }
        }
    };

    print(&output, args.compact)
}
