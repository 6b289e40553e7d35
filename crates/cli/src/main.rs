//! Mykilio CLI - Command-line client for the queue registry HTTP API

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tabled::{Table, Tabled};

const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";

#[derive(Parser)]
#[command(name = "mykilio")]
#[command(about = "Mykilio queue registry CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API base URL
    #[arg(long, env = "MYKILIO_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// List all queues
    List,

    /// Create a queue and print its token
    Create {
        /// Queue name (ASCII letters and digits)
        name: String,

        /// Owner (one queue per owner)
        #[arg(short, long)]
        owner: String,

        #[arg(short, long, default_value = "")]
        title: String,

        #[arg(short, long, default_value = "")]
        description: String,

        #[arg(short, long, default_value = "0")]
        number: i64,
    },

    /// Show a queue
    Get { name: String },

    /// Update title, description or number
    Update {
        name: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        number: Option<i64>,
    },

    /// Delete a queue
    Delete { name: String },
}

#[derive(Deserialize, Tabled)]
struct QueueRow {
    id: String,
    name: String,
    owner: String,
    title: String,
    description: String,
    number: i64,
}

#[derive(Deserialize)]
struct CreatedRow {
    #[serde(flatten)]
    queue: QueueRow,
    token: String,
}

#[derive(Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ServiceError,
}

#[derive(Deserialize)]
struct ServiceError {
    title: String,
    status: u16,
    message: String,
}

struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Send a request; returns the status and raw body of a 2xx response
    async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<(StatusCode, String)> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method, &url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .context("Failed to connect to server")?;
        let status = response.status();
        let text = response.text().await.context("Failed to read response")?;

        if status.is_success() {
            return Ok((status, text));
        }

        match serde_json::from_str::<ErrorEnvelope>(&text) {
            Ok(envelope) => anyhow::bail!(
                "{} {}: {}",
                envelope.error.status,
                envelope.error.title,
                envelope.error.message
            ),
            Err(_) => anyhow::bail!("{}: {}", status, text),
        }
    }
}

fn print_queues(queues: Vec<QueueRow>) {
    if queues.is_empty() {
        println!("{}", "No queues".yellow());
    } else {
        println!("{}", Table::new(queues));
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = ApiClient::new(&cli.api_url);

    match cli.command {
        Commands::List => {
            let (_, body) = client.call(Method::GET, "/queues", None).await?;
            let queues: Vec<QueueRow> = serde_json::from_str(&body)?;
            print_queues(queues);
        }

        Commands::Create {
            name,
            owner,
            title,
            description,
            number,
        } => {
            let body = json!({
                "name": name,
                "owner": owner,
                "title": title,
                "description": description,
                "number": number,
            });

            let (_, response) = client.call(Method::POST, "/queues", Some(body)).await?;
            let created: DataEnvelope<CreatedRow> = serde_json::from_str(&response)?;

            println!("{}", "✓ Queue created".green().bold());
            println!();
            print_queues(vec![created.data.queue]);
            println!();
            println!("{}", "Token (shown once, store it now):".cyan().bold());
            println!("{}", created.data.token);
        }

        Commands::Get { name } => {
            let (_, body) = client
                .call(Method::GET, &format!("/queues/{}", name), None)
                .await?;
            let queue: QueueRow = serde_json::from_str(&body)?;
            print_queues(vec![queue]);
        }

        Commands::Update {
            name,
            title,
            description,
            number,
        } => {
            let mut body = Map::new();
            if let Some(title) = title {
                body.insert("title".to_string(), json!(title));
            }
            if let Some(description) = description {
                body.insert("description".to_string(), json!(description));
            }
            if let Some(number) = number {
                body.insert("number".to_string(), json!(number));
            }

            let path = format!("/queues/{}", name);
            let (_, response) = client
                .call(Method::PUT, &path, Some(Value::Object(body)))
                .await?;
            let queue: QueueRow = serde_json::from_str(&response)?;

            println!("{}", "✓ Queue updated".green().bold());
            print_queues(vec![queue]);
        }

        Commands::Delete { name } => {
            let (status, _) = client
                .call(Method::DELETE, &format!("/queues/{}", name), None)
                .await?;
            if status == StatusCode::NO_CONTENT {
                println!("{}", format!("✓ Queue {} deleted", name).green().bold());
            }
        }
    }

    Ok(())
}
