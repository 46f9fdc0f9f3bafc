//! Task management commands.
//!
//! List/get/create/update/toggle/delete are thin wrappers over the
//! service API; `agenda` renders the derived day view and `move`
//! reorders the all-day subset.

use chrono::{Local, NaiveDate};
use clap::Subcommand;
use daylist_core::task::views::{self, DayView};
use daylist_core::task::{ordering, parse_time};
use daylist_core::{NewTask, Task, TaskUpdate};

use super::api_client;

#[derive(Subcommand)]
pub enum TaskAction {
    /// List tasks in unified order
    List {
        /// Only tasks without a date
        #[arg(long)]
        inbox: bool,
        /// Only tasks on this date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Get task details
    Get {
        /// Task ID
        id: String,
    },
    /// Create a new task
    Create {
        /// Task title
        title: String,
        /// Task description
        #[arg(long)]
        description: Option<String>,
        /// Scheduled date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Scheduled time (HH:MM)
        #[arg(long)]
        time: Option<String>,
        /// Estimated minutes
        #[arg(long)]
        estimate: Option<u32>,
    },
    /// Update a task (full replace of editable fields)
    Update {
        /// Task ID
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// New time (HH:MM)
        #[arg(long)]
        time: Option<String>,
        /// Remove the scheduled date
        #[arg(long)]
        clear_date: bool,
        /// Remove the scheduled time
        #[arg(long)]
        clear_time: bool,
        /// New estimated minutes
        #[arg(long)]
        estimate: Option<u32>,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
    /// Toggle completion
    Toggle {
        /// Task ID
        id: String,
    },
    /// Move an all-day task to a new position within its view
    Move {
        /// Current position (0-based) in the all-day list
        source: usize,
        /// Target position (0-based)
        destination: usize,
        /// Reorder within this day's view instead of the inbox
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Break a task into AI-generated subtasks
    Breakdown {
        /// Task ID
        id: String,
    },
    /// Show the scheduled / all-day / done sections for a day
    Agenda {
        /// Day to show (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

pub async fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TaskAction::List { inbox, date } => {
            let client = api_client()?;
            let mut tasks = client.list_tasks().await?;
            ordering::sort_unified(&mut tasks);
            let filtered: Vec<&Task> = match (inbox, date) {
                (true, _) => views::inbox(&tasks),
                (false, Some(day)) => views::for_day(&tasks, day),
                (false, None) => tasks.iter().collect(),
            };
            println!("{}", serde_json::to_string_pretty(&filtered)?);
        }
        TaskAction::Get { id } => {
            let client = api_client()?;
            let task = client.get_task(&id).await?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::Create {
            title,
            description,
            date,
            time,
            estimate,
        } => {
            // Validation happens before any request is built.
            let mut new_task = NewTask::new(title)?;
            new_task.description = description;
            new_task.date = date;
            new_task.time = time.as_deref().map(parse_time).transpose()?;
            new_task.total_estimated_time = estimate;

            let client = api_client()?;
            let task = client.create_task(&new_task).await?;
            println!("Task created: {}", task.id);
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::Update {
            id,
            title,
            description,
            date,
            time,
            clear_date,
            clear_time,
            estimate,
        } => {
            let client = api_client()?;
            let task = client.get_task(&id).await?;

            let mut update = TaskUpdate::from_task(&task);
            if let Some(t) = title {
                update.title = t;
            }
            if let Some(d) = description {
                update.description = d;
            }
            if let Some(d) = date {
                update.date = Some(d);
            }
            if let Some(t) = time {
                update.time = Some(parse_time(&t)?);
            }
            if clear_date {
                update.date = None;
            }
            if clear_time {
                update.time = None;
            }
            if let Some(e) = estimate {
                update.total_estimated_time = Some(e);
            }
            update.has_date = update.date.is_some();
            update.has_time = update.time.is_some();
            update.validate()?;

            let task = client.update_task(&id, &update).await?;
            println!("Task updated:");
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::Delete { id } => {
            let client = api_client()?;
            client.delete_task(&id).await?;
            println!("Task deleted: {id}");
        }
        TaskAction::Toggle { id } => {
            let client = api_client()?;
            // Apply the server's answer; nothing changes locally on failure.
            let task = client.toggle_task(&id).await?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::Move {
            source,
            destination,
            date,
        } => {
            let client = api_client()?;
            let mut tasks = client.list_tasks().await?;
            ordering::sort_unified(&mut tasks);
            let view = match date {
                Some(day) => views::day_view(&tasks, day),
                None => views::inbox_view(&tasks),
            };
            let mut ids = view.all_day_ids();
            ordering::move_task(&mut ids, source, Some(destination))?;
            client.reorder_tasks(&ids).await?;

            // Re-fetch: the service owns the canonical order.
            let mut tasks = client.list_tasks().await?;
            ordering::sort_unified(&mut tasks);
            let view = match date {
                Some(day) => views::day_view(&tasks, day),
                None => views::inbox_view(&tasks),
            };
            println!("New order:");
            for (index, task) in view.all_day.iter().enumerate() {
                println!("  {index}. {} ({})", task.title, task.id);
            }
        }
        TaskAction::Breakdown { id } => {
            let client = api_client()?;
            let breakdown = client.breakdown_task(&id).await?;
            if breakdown.sub_tasks.is_empty() {
                println!("No subtasks returned.");
            } else {
                println!("Subtasks for {id}:");
                for subtask in &breakdown.sub_tasks {
                    match subtask.estimated_time {
                        Some(minutes) => println!("  - {} ({minutes}m)", subtask.title),
                        None => println!("  - {}", subtask.title),
                    }
                }
            }
            if let Some(total) = breakdown.total_estimated_time {
                println!("Revised estimate: {total}m");
            }
        }
        TaskAction::Agenda { date } => {
            let client = api_client()?;
            let mut tasks = client.list_tasks().await?;
            ordering::sort_unified(&mut tasks);
            let day = date.unwrap_or_else(|| Local::now().date_naive());
            let view = views::day_view(&tasks, day);
            print_agenda(day, &view);
        }
    }
    Ok(())
}

fn print_agenda(day: NaiveDate, view: &DayView<'_>) {
    println!("Agenda for {day}");

    let todo_count = view.scheduled.len() + view.all_day.len();
    println!("\nTo do ({todo_count})");
    for task in &view.scheduled {
        let time = task
            .time
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| "--:--".into());
        println!("  [ ] {time}  {}", describe(task));
    }
    for task in &view.all_day {
        println!("  [ ]        {}", describe(task));
    }
    if todo_count == 0 {
        println!("  No tasks for this date.");
    }

    if !view.done.is_empty() {
        println!("\nDone ({})", view.done.len());
        for task in &view.done {
            println!("  [x]        {}", describe(task));
        }
    }
}

fn describe(task: &Task) -> String {
    match task.total_estimated_time {
        Some(minutes) => format!("{} ({minutes}m)  {}", task.title, task.id),
        None => format!("{}  {}", task.title, task.id),
    }
}
