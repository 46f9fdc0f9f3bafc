//! Account profile commands.

use clap::Subcommand;

use super::api_client;

#[derive(Subcommand)]
pub enum MeAction {
    /// Show the current account
    Show,
    /// Update profile fields
    Update {
        /// New display name
        #[arg(long)]
        name: Option<String>,
        /// New email address
        #[arg(long)]
        email: Option<String>,
    },
}

pub async fn run(action: MeAction) -> Result<(), Box<dyn std::error::Error>> {
    let client = api_client()?;
    match action {
        MeAction::Show => {
            let user = client.me().await?;
            println!("{}", serde_json::to_string_pretty(&user)?);
        }
        MeAction::Update { name, email } => {
            if name.is_none() && email.is_none() {
                return Err("nothing to update (pass --name or --email)".into());
            }
            let user = client.update_me(name.as_deref(), email.as_deref()).await?;
            println!("Profile updated:");
            println!("{}", serde_json::to_string_pretty(&user)?);
        }
    }
    Ok(())
}
