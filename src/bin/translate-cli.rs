use clap::Parser;
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "translate-cli")]
#[command(about = "Send a translation request to a running gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8787")]
    url: String,

    #[arg(short, long, env = "VALID_API_KEY")]
    key: String,

    /// Source language (gateway defaults to english)
    #[arg(short, long)]
    source: Option<String>,

    /// Target language
    #[arg(short, long)]
    target: String,

    /// Text to translate
    text: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    headers.insert("x-api-key", HeaderValue::from_str(&cli.key)?);

    let res = client
        .post(&cli.url)
        .headers(headers)
        .json(&request_body(&cli))
        .send()
        .await?;

    print_response(res).await
}

/// JSON sent to the gateway. `source_lang` is left out unless given.
fn request_body(cli: &Cli) -> Value {
    let mut body = json!({
        "text": cli.text,
        "target_lang": cli.target,
    });
    if let Some(source) = &cli.source {
        body["source_lang"] = Value::String(source.clone());
    }
    body
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let json: Value = res.json().await?;

    if status.is_success() {
        match json.get("translation").and_then(Value::as_str) {
            Some(text) => println!("{}", text),
            None => println!("{}", serde_json::to_string_pretty(&json)?),
        }
        Ok(())
    } else {
        let message = json
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("Unknown error");
        eprintln!("Error: gateway returned status {}: {}", status, message);
        std::process::exit(1);
    }
}
