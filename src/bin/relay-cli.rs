use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Client CLI for the chat relay service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Register { username: String, password: String },
    /// Log in and print an access token
    Login { username: String, password: String },
    /// Hit the diagnostic endpoints
    Probe,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Register { username, password } => {
            let res = client
                .post(format!("{}/register", cli.url))
                .form(&[("username", username.as_str()), ("password", password.as_str())])
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Login { username, password } => {
            let res = client
                .post(format!("{}/login", cli.url))
                .form(&[("username", username.as_str()), ("password", password.as_str())])
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Probe => {
            for path in ["/test", "/chatting"] {
                let res = client.get(format!("{}{}", cli.url, path)).send().await?;
                println!("{} -> {}", path, res.status());
            }
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: relay returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
