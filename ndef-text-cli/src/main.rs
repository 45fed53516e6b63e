use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use ndef_text::text::{self, TextEncoding};
use ndef_text::{LanguageTag, NdefMessage, NdefRecord, TextRecord};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "ndeftext",
    about = "Encode and decode NFC NDEF text records",
    version,
    author
)]
struct Cli {
    /// Log codec details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Which layer of the tag format to read or write
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Bare text record payload (status byte, language, text)
    Payload,
    /// A single NDEF record
    Record,
    /// A complete NDEF message, as stored on a tag
    Message,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode text into a text record
    Encode {
        /// Text to store
        #[arg(short, long)]
        text: String,

        /// Language tag (defaults to the current locale's language)
        #[arg(short, long)]
        lang: Option<String>,

        /// Store the text as UTF-16 instead of UTF-8
        #[arg(long)]
        utf16: bool,

        /// Output layer
        #[arg(short, long, value_enum, default_value_t = Format::Message)]
        format: Format,

        /// Write raw bytes to this file instead of printing hex
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Decode a text record back into text
    Decode {
        /// Hex-encoded bytes (read from stdin when neither this nor --input is given)
        hex: Option<String>,

        /// Read raw bytes from a file
        #[arg(short, long, conflicts_with = "hex")]
        input: Option<PathBuf>,

        /// Input layer
        #[arg(short, long, value_enum, default_value_t = Format::Message)]
        format: Format,

        /// Print language, encoding and text as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the records of an NDEF message
    Inspect {
        /// Hex-encoded message (read from stdin when neither this nor --input is given)
        hex: Option<String>,

        /// Read raw bytes from a file
        #[arg(short, long, conflicts_with = "hex")]
        input: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "ndef_text=trace,ndeftext=debug"
    } else {
        "ndef_text=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Encode {
            text,
            lang,
            utf16,
            format,
            output,
        } => {
            let language = match lang {
                Some(lang) => LanguageTag::new(lang)?,
                None => LanguageTag::from_env(),
            };
            let encoding = if utf16 {
                TextEncoding::Utf16
            } else {
                TextEncoding::Utf8
            };
            debug!(language = %language, encoding = %encoding, ?format, "encoding text");

            let bytes = encode(&text, &language, encoding, format)?;

            match output {
                Some(path) => {
                    std::fs::write(&path, &bytes)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!("Wrote {} bytes to {}", bytes.len(), path.display());
                }
                None => println!("{}", hex::encode(&bytes)),
            }
        }

        Commands::Decode {
            hex,
            input,
            format,
            json,
        } => {
            let bytes = read_input(hex.as_deref(), input.as_deref())?;
            let record = decode(&bytes, format)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                println!("{}", record.text);
            }
        }

        Commands::Inspect { hex, input } => {
            let bytes = read_input(hex.as_deref(), input.as_deref())?;
            let message = NdefMessage::parse(&bytes).context("invalid NDEF message")?;

            println!(
                "NDEF message: {} record(s), {} bytes",
                message.records().len(),
                bytes.len()
            );
            for (index, record) in message.records().iter().enumerate() {
                println!(
                    "Record {}: TNF {}, type \"{}\", id {} bytes, payload {} bytes",
                    index + 1,
                    record.tnf(),
                    String::from_utf8_lossy(record.record_type()),
                    record.id().len(),
                    record.payload().len()
                );
                if record.is_text() {
                    match record.as_text() {
                        Ok(text) => println!(
                            "  text [{}, {}]: {}",
                            text.language, text.encoding, text.text
                        ),
                        Err(err) => println!("  text: unreadable ({err})"),
                    }
                }
            }
        }
    }

    Ok(())
}

fn encode(
    text: &str,
    language: &LanguageTag,
    encoding: TextEncoding,
    format: Format,
) -> Result<Vec<u8>> {
    let bytes = match format {
        Format::Payload => text::encode_with(text, language.as_str(), encoding)?,
        Format::Record => NdefRecord::text_with(text, language.as_str(), encoding)?.to_bytes(),
        Format::Message => NdefMessage::text_with(text, language.as_str(), encoding)?.to_bytes(),
    };
    Ok(bytes)
}

fn decode(bytes: &[u8], format: Format) -> Result<TextRecord> {
    let record = match format {
        Format::Payload => text::decode(bytes)?,
        Format::Record => NdefRecord::parse(bytes)?.as_text()?,
        Format::Message => NdefMessage::parse(bytes)?.read_text()?,
    };
    Ok(record)
}

/// Raw bytes from a file, a hex argument or hex on stdin
fn read_input(hex_arg: Option<&str>, input: Option<&Path>) -> Result<Vec<u8>> {
    if let Some(path) = input {
        return std::fs::read(path).with_context(|| format!("failed to read {}", path.display()));
    }

    let hex_text = match hex_arg {
        Some(hex_text) => hex_text.to_string(),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            buffer
        }
    };

    parse_hex(&hex_text)
}

/// Accepts `d1 01 05`, `D1:01:05` and `0xd10105` spellings
fn parse_hex(input: &str) -> Result<Vec<u8>> {
    let trimmed = input.trim();
    let trimmed = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let digits: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':')
        .collect();

    if digits.is_empty() {
        bail!("no input bytes given");
    }

    hex::decode(&digits).with_context(|| format!("invalid hex input: {digits}"))
}
