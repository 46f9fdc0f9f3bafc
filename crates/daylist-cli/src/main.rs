use clap::{CommandFactory, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "daylist", version, about = "Daylist CLI - tasks, focus timer, capture")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Account authentication
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Focus timer
    Focus {
        #[command(subcommand)]
        action: commands::focus::FocusAction,
    },
    /// Extract tasks from a free-form transcript
    Capture(commands::capture::CaptureArgs),
    /// Account profile
    Me {
        #[command(subcommand)]
        action: commands::me::MeAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        match cli.command {
            Commands::Auth { action } => commands::auth::run(action).await,
            Commands::Task { action } => commands::task::run(action).await,
            Commands::Focus { action } => commands::focus::run(action).await,
            Commands::Capture(args) => commands::capture::run(args).await,
            Commands::Me { action } => commands::me::run(action).await,
            Commands::Config { action } => commands::config::run(action),
            Commands::Completions { shell } => {
                let mut cmd = Cli::command();
                clap_complete::generate(shell, &mut cmd, "daylist", &mut std::io::stdout());
                Ok(())
            }
        }
    })
}
