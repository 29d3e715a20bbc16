use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;
use stackops_core::ssl::checker;
use stackops_core::{config, website, Env, TermConsole};
use std::path::PathBuf;

mod menus;

#[derive(Parser, Debug)]
#[clap(
    name = "stackops",
    version = "0.1.0",
    about = "Interactive operations console for Docker-based web hosting stacks"
)]
struct Cli {
    #[clap(subcommand)]
    command: Option<Commands>,

    #[clap(
        long,
        short,
        help = "Path to the stackops.env configuration file (defaults to ./stackops.env)"
    )]
    env_file: Option<PathBuf>,

    #[clap(long, short, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Website operations (non-interactive)
    Website {
        #[clap(subcommand)]
        command: WebsiteCommands,
    },
    /// SSL certificate operations (non-interactive)
    Ssl {
        #[clap(subcommand)]
        command: SslCommands,
    },
}

#[derive(Subcommand, Debug)]
enum WebsiteCommands {
    /// Print the managed websites, one domain per line
    List,
}

#[derive(Subcommand, Debug)]
enum SslCommands {
    /// Print certificate details for a domain
    Check { domain: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = cli
        .log_level
        .parse::<LevelFilter>()
        .unwrap_or(LevelFilter::Info);
    env_logger::Builder::new().filter_level(log_level).init();

    let env = Env::load(cli.env_file.as_deref())?;
    env.require(&[config::KEY_SITES_DIR])?;

    match cli.command {
        Some(Commands::Website {
            command: WebsiteCommands::List,
        }) => {
            for domain in website::list_websites(&env)? {
                println!("{}", domain);
            }
        }
        Some(Commands::Ssl {
            command: SslCommands::Check { domain },
        }) => {
            let info = checker::check_ssl(&env, &domain)?;
            println!("Subject:    {}", info.subject);
            println!("Issuer:     {}", info.issuer);
            println!("Valid from: {}", info.not_before);
            println!("Valid to:   {}", info.not_after);
        }
        None => {
            print_banner();
            let mut console = TermConsole::new();
            menus::main_menu(&env).display(&mut console);
            println!("👋 Goodbye!");
        }
    }

    Ok(())
}

fn print_banner() {
    println!(
        r#"
   ███████╗████████╗ █████╗  ██████╗██╗  ██╗ ██████╗ ██████╗ ███████╗
   ██╔════╝╚══██╔══╝██╔══██╗██╔════╝██║ ██╔╝██╔═══██╗██╔══██╗██╔════╝
   ███████╗   ██║   ███████║██║     █████╔╝ ██║   ██║██████╔╝███████╗
   ╚════██║   ██║   ██╔══██║██║     ██╔═██╗ ██║   ██║██╔═══╝ ╚════██║
   ███████║   ██║   ██║  ██║╚██████╗██║  ██╗╚██████╔╝██║     ███████║
   ╚══════╝   ╚═╝   ╚═╝  ╚═╝ ╚═════╝╚═╝  ╚═╝ ╚═════╝ ╚═╝     ╚══════╝
   ═══════════════════════════════════════════════════════════════════
"#
    );
}
