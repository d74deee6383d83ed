//! Entity CLI - Command line tool to inspect entities of one type in a triple store.
//!
//! Usage:
//!   entity_cli --type Job --namespace http://x/ --data jobs.ttl columns
//!   entity_cli --type Job --namespace http://x/ --data jobs.ttl all --where status=active
//!   entity_cli --type Job --namespace http://x/ --endpoint 'http://localhost:3030/{service}/query' count
//!   entity_cli --type Job --namespace http://x/ render select name owner --where status=active

use clap::{Parser, Subcommand};
use rdf_entity::query::template;
use rdf_entity::{
    Conditions, Connection, Dialect, EntityType, Finder, HttpConnection, OxigraphConnection,
    StoreConfig,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "entity_cli")]
#[command(about = "Entity CLI - Query RDF entities of one type from a triple store")]
struct Args {
    /// Entity type name, matched against rdf:type
    #[arg(short = 't', long = "type")]
    type_name: String,

    /// Namespace IRI of the type's predicates
    #[arg(short, long)]
    namespace: String,

    /// Turtle file loaded into an in-memory store
    #[arg(short, long, conflicts_with = "endpoint")]
    data: Option<PathBuf>,

    /// SPARQL query endpoint; `{service}` expands to <service>_<env>
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Base service name
    #[arg(long, default_value = "metamodl")]
    service: String,

    /// Deployment environment
    #[arg(long = "env", default_value = "development")]
    environment: String,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30")]
    timeout_secs: u64,

    /// Subject alias syntax: sparql11 (BIND) or arq (Jena LET)
    #[arg(long)]
    dialect: Option<Dialect>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    #[command(flatten)]
    Query(QueryCommand),

    /// Print the SPARQL for a query without running it
    Render {
        #[command(subcommand)]
        query: QueryCommand,
    },
}

#[derive(Subcommand, Debug, Clone)]
enum QueryCommand {
    /// Attribute names used by instances of the type
    Columns,

    /// Number of distinct uuids among matching instances
    Count {
        /// Condition as attribute=value; repeat for several values
        #[arg(short = 'w', long = "where", value_parser = parse_condition)]
        conditions: Vec<(String, String)>,
    },

    /// All matching instances with every attribute
    All {
        /// Condition as attribute=value; repeat for several values
        #[arg(short = 'w', long = "where", value_parser = parse_condition)]
        conditions: Vec<(String, String)>,
    },

    /// Selected attribute columns of matching instances
    Select {
        /// Attributes to project
        #[arg(required = true)]
        attributes: Vec<String>,

        /// Condition as attribute=value; repeat for several values
        #[arg(short = 'w', long = "where", value_parser = parse_condition)]
        conditions: Vec<(String, String)>,
    },
}

fn parse_condition(raw: &str) -> Result<(String, String), String> {
    let (attribute, value) =
        raw.split_once('=').ok_or_else(|| format!("expected attribute=value, got {:?}", raw))?;
    Ok((attribute.trim().to_string(), value.to_string()))
}

fn to_conditions(pairs: &[(String, String)]) -> Conditions {
    let mut conditions = Conditions::new();
    for (attribute, value) in pairs {
        conditions.push_value(attribute.clone(), value.clone());
    }
    conditions
}

fn open_connection(args: &Args) -> Result<(Arc<dyn Connection>, Dialect), Box<dyn std::error::Error>> {
    if let Some(path) = &args.data {
        let data = std::fs::read_to_string(path)?;
        let connection = OxigraphConnection::from_turtle(&data)?;
        tracing::info!(path = %path.display(), "loaded turtle data");
        return Ok((Arc::new(connection), args.dialect.unwrap_or_default()));
    }

    let config = match &args.endpoint {
        Some(endpoint) => StoreConfig::new(endpoint.clone())
            .with_service(args.service.clone())
            .with_environment(args.environment.clone())
            .with_timeout_secs(args.timeout_secs),
        None => StoreConfig::from_env()?,
    };
    let dialect = args.dialect.unwrap_or(config.dialect);
    let connection = HttpConnection::new(&config)?;
    tracing::info!(url = %connection.query_url(), "using SPARQL endpoint");
    Ok((Arc::new(connection), dialect))
}

fn render(
    entity_type: &EntityType,
    query: &QueryCommand,
    dialect: Dialect,
) -> Result<(), Box<dyn std::error::Error>> {
    let type_name = entity_type.type_name();
    let namespace = entity_type.namespace()?;
    let rendered = match query {
        QueryCommand::Columns => template::columns(type_name, namespace)?,
        QueryCommand::Count { conditions } => {
            template::count(type_name, namespace, &to_conditions(conditions))?
        }
        QueryCommand::All { conditions } => {
            template::enumerate_all(type_name, namespace, &to_conditions(conditions), dialect)?
        }
        QueryCommand::Select { attributes, conditions } => {
            template::select(type_name, namespace, attributes, &to_conditions(conditions))?
        }
    };
    print!("{}", rendered);
    Ok(())
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let entity_type =
        Arc::new(EntityType::new(args.type_name.clone())?.with_namespace(&args.namespace)?);

    let query = match &args.command {
        Command::Render { query } => {
            return render(&entity_type, query, args.dialect.unwrap_or_default());
        }
        Command::Query(query) => query.clone(),
    };

    let (connection, dialect) = open_connection(&args)?;
    let finder = Finder::new(connection, entity_type).with_dialect(dialect);

    let output = match query {
        QueryCommand::Columns => serde_json::to_string_pretty(finder.columns()?)?,
        QueryCommand::Count { conditions } => {
            let count = finder.count(&to_conditions(&conditions))?;
            serde_json::to_string_pretty(&serde_json::json!({ "count": count }))?
        }
        QueryCommand::All { conditions } => {
            serde_json::to_string_pretty(&finder.all(&to_conditions(&conditions))?)?
        }
        QueryCommand::Select { attributes, conditions } => {
            serde_json::to_string_pretty(&finder.select(&attributes, &to_conditions(&conditions))?)?
        }
    };
    println!("{}", output);

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
