use clap::{Parser, Subcommand, ValueEnum};
use hpp_signer::infrastructure::fixed::FixedClock;
use hpp_signer::infrastructure::system::{SystemClock, UuidOrderIds};
use hpp_signer::interfaces::callback::payload_reader::{PayloadFormat, PayloadReader};
use hpp_signer::interfaces::html::form_renderer::{FormOptions, FormRenderer};
use hpp_signer::{Amount, RequestSigner, ResponseVerifier, SignRequest, config};
use miette::{IntoDiagnostic, Result, miette};
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML file with merchant settings. HPP_* environment variables override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign a payment request and print its fields.
    Sign {
        /// Currency code, e.g. EUR.
        #[arg(long)]
        currency: String,

        /// Amount in major units, e.g. 20 or 20.50.
        #[arg(long)]
        amount: String,

        /// Use this order id instead of generating one.
        #[arg(long)]
        order_id: Option<String>,

        /// Sign with a fixed YYYYMMDDHHMMSS timestamp (UTC) instead of the current time.
        #[arg(long)]
        timestamp: Option<String>,

        /// Extra field echoed back by the processor, as KEY=VALUE. Repeatable.
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Verify a callback payload and print its fields as JSON.
    Verify {
        /// Payload file. Reads stdin when omitted or "-".
        path: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = InputFormat::Form)]
        input: InputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Flat JSON object with upper-case keys.
    Json,
    /// HTML hidden inputs only.
    Fields,
    /// Complete HTML form posting to the endpoint.
    Form,
}

#[derive(Clone, Copy, ValueEnum)]
enum InputFormat {
    /// application/x-www-form-urlencoded body.
    Form,
    /// JSON object of string values.
    Json,
}

impl From<InputFormat> for PayloadFormat {
    fn from(format: InputFormat) -> Self {
        match format {
            InputFormat::Form => PayloadFormat::Form,
            InputFormat::Json => PayloadFormat::Json,
        }
    }
}

fn parse_field(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("hpp_signer=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hpp_signer=warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let signing_config = config::load(cli.config.as_deref()).into_diagnostic()?;

    match cli.command {
        Command::Sign {
            currency,
            amount,
            order_id,
            timestamp,
            fields,
            format,
        } => {
            let signer = match timestamp {
                Some(ts) => RequestSigner::with_sources(
                    signing_config,
                    Box::new(FixedClock::parse(&ts).into_diagnostic()?),
                    Box::new(UuidOrderIds),
                ),
                None => RequestSigner::with_sources(
                    signing_config,
                    Box::new(SystemClock),
                    Box::new(UuidOrderIds),
                ),
            }
            .into_diagnostic()?;

            let amount: Amount = amount.parse().into_diagnostic()?;
            let mut request = SignRequest::new(currency, amount);
            if let Some(order_id) = order_id {
                request = request.with_order_id(order_id);
            }
            for (key, value) in fields {
                request = request.with_field(key, value);
            }
            let signed = signer.sign(request).into_diagnostic()?;

            let renderer = FormRenderer::new();
            match format {
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&signed).into_diagnostic()?;
                    println!("{json}");
                }
                OutputFormat::Fields => {
                    print!("{}", renderer.render_fields(&signed, &FormOptions::new()));
                }
                OutputFormat::Form => {
                    print!("{}", renderer.render_form(&signed, &FormOptions::new()));
                }
            }
        }
        Command::Verify { path, input } => {
            let verifier = ResponseVerifier::new(&signing_config).into_diagnostic()?;

            let source: Box<dyn Read> = match path {
                Some(path) if path.as_os_str() != "-" => {
                    Box::new(File::open(&path).map_err(|e| {
                        miette!("cannot open payload {}: {e}", path.display())
                    })?)
                }
                _ => Box::new(io::stdin().lock()),
            };
            let payload = PayloadReader::new(source)
                .read(input.into())
                .into_diagnostic()?;

            let result = verifier.verify(&payload).into_diagnostic()?;
            let json = serde_json::to_string_pretty(&result).into_diagnostic()?;
            println!("{json}");
        }
    }

    Ok(())
}
