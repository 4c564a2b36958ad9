use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "pagebot")]
#[command(author, version, about = "Telegram bot with a two-page menu", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the bot
    Run {
        /// Use webhook mode instead of long polling (requires WEBHOOK_URL)
        #[arg(long)]
        webhook: bool,
    },

    /// Print the reply the bot gives for an action identifier
    Dispatch {
        /// Action identifier, e.g. start, open_page1, back_to_menu
        action: String,

        /// Print the reply as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["pagebot"]).unwrap();
        assert_eq!(cli.command, None);
    }

    #[test]
    fn test_run_webhook_flag() {
        let cli = Cli::try_parse_from(["pagebot", "run", "--webhook"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Run { webhook: true }));
    }

    #[test]
    fn test_dispatch_args() {
        let cli = Cli::try_parse_from(["pagebot", "dispatch", "open_page2", "--json"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Dispatch {
                action: "open_page2".to_string(),
                json: true
            })
        );
    }

    #[test]
    fn test_dispatch_requires_action() {
        assert!(Cli::try_parse_from(["pagebot", "dispatch"]).is_err());
    }
}
