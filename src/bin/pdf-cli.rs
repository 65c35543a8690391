use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::json;

#[derive(Parser)]
#[command(name = "pdf-cli")]
#[command(about = "Client for the HTML-to-PDF service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8001")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the service is up
    Health,
    /// Convert an HTML file to PDF
    Convert {
        /// HTML file to convert ("-" reads stdin)
        #[arg(short, long, default_value = "-")]
        input: String,

        /// Where to write the PDF
        #[arg(short, long, default_value = "output.pdf")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Health => {
            let res = client.get(format!("{}/", cli.url)).send().await?;
            let status = res.status();
            let body = res.text().await?;
            if !status.is_success() {
                return Err(format!("service returned {}: {}", status, body).into());
            }
            println!("{}", body);
        }
        Commands::Convert { input, output } => {
            let html = read_input(&input)?;
            let res = client
                .post(format!("{}/html-to-pdf", cli.url))
                .json(&json!({ "html": html }))
                .send()
                .await?;

            let status = res.status();
            if !status.is_success() {
                let body = res.text().await.unwrap_or_default();
                return Err(format!("service returned {}: {}", status, body.trim()).into());
            }

            let pdf = res.bytes().await?;
            tokio::fs::write(&output, &pdf).await?;
            eprintln!("Wrote {} bytes to {}", pdf.len(), output.display());
        }
    }

    Ok(())
}

fn read_input(input: &str) -> std::io::Result<String> {
    if input == "-" {
        let mut html = String::new();
        std::io::stdin().read_to_string(&mut html)?;
        Ok(html)
    } else {
        std::fs::read_to_string(input)
    }
}
