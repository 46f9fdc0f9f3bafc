//! Account authentication commands.
//!
//! Login and signup store the returned bearer token in the session
//! file; logout removes it.

use clap::Subcommand;
use daylist_core::{ApiClient, Config, Session};

#[derive(Subcommand)]
pub enum AuthAction {
    /// Log in and store the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account and store the session token
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Display name
        #[arg(long)]
        name: Option<String>,
    },
    /// Remove the stored session token
    Logout,
    /// Check authentication status
    Status,
}

pub async fn run(action: AuthAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let mut session = Session::load()?;

    match action {
        AuthAction::Login { email, password } => {
            let client = ApiClient::new(&config.api.base_url, &session)?;
            let auth = client.login(&email, &password).await?;
            session.store(&auth.token)?;
            println!("Logged in as {}", auth.user.email);
        }
        AuthAction::Signup {
            email,
            password,
            name,
        } => {
            let client = ApiClient::new(&config.api.base_url, &session)?;
            let auth = client.signup(&email, &password, name.as_deref()).await?;
            session.store(&auth.token)?;
            println!("Account created for {}", auth.user.email);
        }
        AuthAction::Logout => {
            session.clear()?;
            println!("Logged out");
        }
        AuthAction::Status => {
            if session.is_authenticated() {
                let client = ApiClient::new(&config.api.base_url, &session)?;
                match client.me().await {
                    Ok(user) => println!("Authenticated as {}", user.email),
                    Err(e) => println!("Token stored but not usable: {e}"),
                }
            } else {
                println!("Not authenticated. Run 'daylist auth login' first.");
            }
        }
    }
    Ok(())
}
