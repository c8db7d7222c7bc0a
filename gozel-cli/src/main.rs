#[macro_use]
extern crate tracing;

use self::description::EmailDescription;
use clap::{Args, Parser, Subcommand};
use gozel_config::Configuration;
use gozel_email::{message::SendConfig, Composer, Mailer};
use miette::Result;
use std::path::PathBuf;

mod description;

#[derive(Args)]
struct SendArgs {
    /// JSON description of the email
    description: PathBuf,

    /// Path to the TOML configuration file
    #[arg(long, env = "GOZEL_CONFIG", default_value = "gozel.toml")]
    config: PathBuf,

    /// Sender address. Defaults to the configured `from-address`
    #[arg(long)]
    from: Option<String>,

    #[arg(long, required = true)]
    to: Vec<String>,

    #[arg(long)]
    cc: Vec<String>,

    #[arg(long)]
    bcc: Vec<String>,

    #[arg(long)]
    subject: String,

    /// Only send the plain text body
    #[arg(long)]
    plain: bool,
}

#[derive(Subcommand)]
enum AppSubcommand {
    /// Render an email description to stdout
    Render {
        /// JSON description of the email
        description: PathBuf,

        /// Print the plain text body instead of the HTML body
        #[arg(long)]
        plain: bool,
    },

    /// Compose an email and hand it to the configured delivery service
    Send(SendArgs),

    /// Check that a directory is accessible
    VerifyDir {
        path: PathBuf,

        /// Create the directory if it is missing
        #[arg(long)]
        create: bool,
    },
}

/// Compose and deliver transactional emails
#[derive(Parser)]
#[command(about, author, version)]
struct App {
    #[clap(subcommand)]
    subcommand: AppSubcommand,
}

async fn compose(mut composer: Composer, description: PathBuf) -> Result<Composer> {
    let description: EmailDescription = gozel_fs::read_json_file(description).await?;
    description.compose(&mut composer);

    Ok(composer)
}

async fn send(args: SendArgs) -> Result<()> {
    let config = Configuration::load(&args.config)
        .await
        .map_err(|err| miette::miette!("{err:?}"))?;
    let mailer = Mailer::from_config(&config.email)?;
    let composer = compose(mailer.composer(), args.description).await?;

    let from = args
        .from
        .unwrap_or_else(|| config.email.from_address.to_string());
    let send_config = if args.plain {
        SendConfig::builder()
            .from(from)
            .to(args.to)
            .cc(args.cc)
            .bcc(args.bcc)
            .subject(args.subject)
            .plain_body(composer.plain_email())
            .build()
    } else {
        SendConfig::builder()
            .from(from)
            .to(args.to)
            .cc(args.cc)
            .bcc(args.bcc)
            .subject(args.subject)
            .html_body(composer.html_email())
            .plain_body(composer.plain_email())
            .build()
    };

    mailer.send(&send_config).await?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    miette::set_panic_hook();
    dotenvy::dotenv().ok();
    gozel_observability::initialise_logging().map_err(|err| miette::miette!("{err:?}"))?;

    match App::parse().subcommand {
        AppSubcommand::Render { description, plain } => {
            let composer = compose(Composer::default(), description).await?;
            let output = if plain {
                composer.plain_email()
            } else {
                composer.html_email()
            };

            println!("{output}");
        }
        AppSubcommand::Send(args) => send(args).await?,
        AppSubcommand::VerifyDir { path, create } => {
            gozel_fs::verify_dir(&path, create).await?;
            info!(path = %path.display(), "directory is accessible");
        }
    }

    Ok(())
}
