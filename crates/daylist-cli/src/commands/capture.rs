//! Transcript capture command.
//!
//! Takes a free-form transcript (argument or stdin), asks Gemini for
//! actionable tasks, and creates them through the service.

use std::io::Read;

use clap::Args;
use daylist_core::{Config, GeminiClient, NewTask};

use super::api_client;

#[derive(Args)]
pub struct CaptureArgs {
    /// Transcript text to extract tasks from
    pub transcript: Option<String>,
    /// Read the transcript from stdin instead
    #[arg(long)]
    pub stdin: bool,
    /// Show the extracted tasks without creating them
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn run(args: CaptureArgs) -> Result<(), Box<dyn std::error::Error>> {
    let transcript = match (args.transcript, args.stdin) {
        (Some(text), false) => text,
        (None, true) | (Some(_), true) => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
        (None, false) => {
            return Err("no transcript given (pass text or --stdin)".into());
        }
    };
    if transcript.trim().is_empty() {
        return Err("transcript is empty".into());
    }

    let config = Config::load()?;
    let gemini = GeminiClient::from_config(&config.gemini)?;
    let captured = gemini.extract_tasks(&transcript).await?;

    if captured.is_empty() {
        println!("No actionable tasks found in the transcript.");
        return Ok(());
    }

    if args.dry_run {
        println!("Extracted {} task(s):", captured.len());
        for task in &captured {
            match task.estimated_time {
                Some(minutes) => println!("  - {} ({minutes}m)", task.title),
                None => println!("  - {}", task.title),
            }
        }
        return Ok(());
    }

    let client = api_client()?;
    let mut created = 0usize;
    for task in captured {
        let mut new_task = NewTask::new(task.title)?;
        new_task.description = task.description;
        new_task.total_estimated_time = task.estimated_time;
        let saved = client.create_task(&new_task).await?;
        println!("Task created: {} ({})", saved.title, saved.id);
        created += 1;
    }
    println!("Created {created} task(s) from your transcript.");
    Ok(())
}
