use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use mailprobe::{BotConfig, TelegramBot, read_text_file};

const SETUP_HELP: &str = "\
Setting up the Telegram bot:

1. Create a bot:
   - open a chat with @BotFather
   - send /newbot and follow the instructions
   - save the bot token (looks like 1234567890:ABCdefGHIjklMNOpqrsTUVwxyz)

2. Find your chat id:
   - open a chat with @userinfobot
   - send it any message; it replies with your numeric id

3. Export the environment variables:
   export TELEGRAM_BOT_TOKEN=\"your_token\"
   export TELEGRAM_CHAT_ID=\"your_chat_id\"

Or put both into a .env file in the working directory:
   TELEGRAM_BOT_TOKEN=your_token
   TELEGRAM_CHAT_ID=your_chat_id";

/// Send the contents of a text file to a Telegram chat.
#[derive(Parser)]
#[command(name = "tgsend", after_help = SETUP_HELP)]
struct Cli {
    /// path to the text file to send
    file: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_logging();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let Some(path) = cli.file else {
        Cli::command().print_help()?;
        println!();
        std::process::exit(1);
    };

    let config = BotConfig::from_env()
        .context("set TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID (see --help for setup)")?;
    let bot = TelegramBot::new(config)?;

    println!("Reading file: {}", path.display());
    let text =
        read_text_file(&path).with_context(|| format!("cannot read {}", path.display()))?;
    if text.trim().is_empty() {
        bail!("file is empty or contains only whitespace");
    }

    println!("Sending {} characters to Telegram...", text.chars().count());
    bot.send_text(&text).context("sending failed")?;
    println!("Text delivered.");
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
