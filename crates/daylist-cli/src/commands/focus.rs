//! Focus timer command.
//!
//! Runs the countdown in-process, ticking the core timer once per
//! second. Exactly one loop drives the timer; it ends when an
//! interval completes and auto-continue is off, or on `q`.
//!
//! While the countdown runs, single-letter lines on stdin control
//! the session: `p` pause/resume, `e` add two minutes, `r` reset,
//! `q` quit.

use std::io::Write;
use std::time::Duration;

use clap::Subcommand;
use daylist_core::{Config, FocusTimer, TaskRef, TimerEvent, TimerMode};
use tokio::io::AsyncBufReadExt;

use super::api_client;

#[derive(Subcommand)]
pub enum FocusAction {
    /// Run a focus session countdown
    Start {
        /// Bind a task; its estimate becomes the focus duration
        #[arg(long)]
        task: Option<String>,
        /// Override the focus duration in minutes
        #[arg(long)]
        minutes: Option<u64>,
        /// Emit timer events as JSON lines instead of the live display
        #[arg(long)]
        json: bool,
    },
}

pub async fn run(action: FocusAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        FocusAction::Start {
            task,
            minutes,
            json,
        } => run_session(task, minutes, json).await,
    }
}

async fn run_session(
    task_id: Option<String>,
    minutes: Option<u64>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let mut timer = FocusTimer::new(config.timer_settings());

    let task_ref = match task_id {
        Some(id) => {
            let client = api_client()?;
            let task = client.get_task(&id).await?;
            let estimate = task.effective_estimated_time();
            Some(TaskRef {
                id: task.id,
                title: task.title,
                estimated_minutes: (estimate > 0).then_some(estimate),
            })
        }
        None => None,
    };

    timer.start(task_ref);
    if let Some(m) = minutes {
        // Explicit duration wins over the task estimate.
        timer.set_custom(m);
    }

    if json {
        emit(&timer.snapshot())?;
    } else {
        match timer.task() {
            Some(task) => println!("Focus session: {}", task.title),
            None => println!("Focus session"),
        }
        println!("(p = pause/resume, e = +2 minutes, r = reset, q = quit)");
    }

    let mut interval = tokio::time::interval(Duration::from_secs(1));
    interval.tick().await; // First tick completes immediately.

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        render(&timer, json)?;
        tokio::select! {
            _ = interval.tick() => {
                if let Some(event) = timer.tick() {
                    if json {
                        emit(&event)?;
                    } else if let TimerEvent::TimerCompleted { finished_mode, next_mode, .. } = &event {
                        println!(
                            "\n{} interval finished; next up: {}",
                            finished_mode.label(),
                            next_mode.label()
                        );
                    }
                    if !timer.is_running() {
                        break;
                    }
                }
            }
            line = lines.next_line(), if stdin_open => {
                match line?.as_deref().map(str::trim) {
                    None => stdin_open = false,
                    Some("p") => {
                        let event = timer.toggle();
                        if json {
                            emit(&event)?;
                        }
                    }
                    Some("e") => {
                        let event = timer.extend(2);
                        if json {
                            emit(&event)?;
                        }
                    }
                    Some("r") => {
                        let event = timer.reset();
                        if json {
                            emit(&event)?;
                        }
                    }
                    Some("q") => break,
                    Some(_) => {}
                }
            }
        }
    }

    if !json {
        println!();
        if timer.mode() == TimerMode::Break && !timer.is_running() {
            println!("Break is queued. Run 'daylist focus start' to go again.");
        } else {
            println!("Session over.");
        }
    }
    Ok(())
}

fn render(timer: &FocusTimer, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        return Ok(());
    }
    print!(
        "\r{}  {}  ({:>3.0}%)   ",
        timer.mode().label(),
        timer.format_remaining(),
        timer.progress() * 100.0
    );
    std::io::stdout().flush()?;
    Ok(())
}

fn emit(event: &TimerEvent) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string(event)?);
    Ok(())
}
