use clap::{Parser, Subcommand};
use serde_json::Value;
use storeflow::{ApiClient, ClientConfig, ClientError};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("api call failed: {0}")]
    Api(#[from] ClientError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "storeflow", about = "Storeflow auth and API CLI")]
struct Cli {
    #[arg(long, env = "STOREFLOW_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[arg(long, env = "STOREFLOW_KEYRING_SERVICE")]
    keyring_service: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    Me,
    Status,
    ForgotPassword {
        #[arg(long)]
        email: String,
    },
    ResetPassword {
        #[arg(long)]
        email: String,
        #[arg(long)]
        code: String,
        #[arg(long)]
        password: String,
    },
    Get {
        path: String,
    },
    Post {
        path: String,
        #[arg(long)]
        data: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut config = ClientConfig::new(&cli.base_url);
    if let Some(service) = &cli.keyring_service {
        config = config.with_keyring_service(service);
    }

    let client = ApiClient::new(&config)?;
    client.hydrate().await;

    match cli.command {
        Command::Login { email, password } => run_login(&client, &email, &password).await,
        Command::Logout => run_logout(&client).await,
        Command::Me => run_me(&client).await,
        Command::Status => run_status(&client),
        Command::ForgotPassword { email } => run_forgot_password(&client, &email).await,
        Command::ResetPassword {
            email,
            code,
            password,
        } => run_reset_password(&client, &email, &code, &password).await,
        Command::Get { path } => run_get(&client, &path).await,
        Command::Post { path, data } => run_post(&client, &path, &data).await,
    }
}

async fn run_login(client: &ApiClient, email: &str, password: &str) -> Result<(), CliError> {
    client.login(email, password).await?;
    let profile = client.me().await?;
    print_json(&serde_json::to_value(&profile)?)
}

async fn run_logout(client: &ApiClient) -> Result<(), CliError> {
    client.logout().await;
    println!("logged out");
    Ok(())
}

async fn run_me(client: &ApiClient) -> Result<(), CliError> {
    let profile = client.me().await?;
    print_json(&serde_json::to_value(&profile)?)
}

fn run_status(client: &ApiClient) -> Result<(), CliError> {
    match client.claims() {
        Some(claims) => print_json(&serde_json::to_value(&claims)?),
        None => {
            println!("not logged in");
            Ok(())
        }
    }
}

async fn run_forgot_password(client: &ApiClient, email: &str) -> Result<(), CliError> {
    let message = client.forgot_password(email).await?;
    println!("{message}");
    Ok(())
}

async fn run_reset_password(
    client: &ApiClient,
    email: &str,
    code: &str,
    password: &str,
) -> Result<(), CliError> {
    let message = client.reset_password(email, code, password).await?;
    println!("{message}");
    Ok(())
}

async fn run_get(client: &ApiClient, path: &str) -> Result<(), CliError> {
    let data = client.get(path).await?;
    print_json(&data)
}

async fn run_post(client: &ApiClient, path: &str, data: &str) -> Result<(), CliError> {
    let body = serde_json::from_str::<Value>(data)?;
    let response = client.post(path, body).await?;
    print_json(&response)
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
