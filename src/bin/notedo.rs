use anyhow::{Context, Result};
use notedo::alias::{AliasResolution, Resolution, resolve_alias, validate_alias};
use notedo::cli::{parse_args, print_help};
use notedo::clock::SystemClock;
use notedo::config::Config;
use notedo::context::{AppContext, StandardContext};
use notedo::model::QuickEntry;
use notedo::prefs::SEPARATOR_KEY;
use notedo::storage::FilePreferences;
use notedo::template::TemplateProcessor;
use notedo::value::Record;
use serde_json::Value;
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::env;
use std::sync::Arc;

fn init_logging() {
    let level = env::var("NOTEDO_LOG")
        .ok()
        .and_then(|v| v.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Warn);
    // A second logger (e.g. in tests) is not an error worth stopping for.
    let _ = TermLogger::init(
        level,
        ConfigBuilder::new().build(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    init_logging();

    let inv = parse_args(env::args().skip(1))?;
    let command = match inv.command {
        Some(command) if !inv.help => command,
        _ => {
            print_help("notedo");
            return Ok(());
        }
    };
    let mut args = inv.args;

    let ctx = match inv.root {
        Some(root) => StandardContext::new(Some(root)),
        None => StandardContext::from_env(),
    };

    let config = Config::load_or_default(&ctx)?;
    let prefs = Arc::new(FilePreferences::open(&ctx)?);
    let templates = TemplateProcessor::new(prefs.clone());
    let clock = SystemClock;
    let sep = inv.separator.as_deref();

    match command.as_str() {
        "resolve" => {
            let input = args.join(" ");
            match resolve_alias(&input, config.active_aliases(), &clock) {
                Resolution::Absent => println!("absent"),
                Resolution::Literal(s) => print_json(&Value::String(s))?,
                Resolution::Alias(res) => print_json(&res)?,
            }
        }
        "check" => {
            if args.len() < 2 {
                anyhow::bail!("usage: notedo check <alias> <resolved>");
            }
            let alias = args.remove(0);
            let raw = args.join(" ");
            // Structured values (eod) are passed as JSON.
            let resolved = serde_json::from_str::<Value>(&raw)
                .ok()
                .filter(Value::is_object)
                .unwrap_or(Value::String(raw));
            let stored = AliasResolution::new(&alias, resolved);
            print_json(&validate_alias(&stored, config.active_aliases(), &clock))?;
        }
        "parse" => {
            let line = args.join(" ");
            let entry = QuickEntry::new(&config, &clock, &templates);
            let record = entry.parse(&line, sep);
            for (field, result) in entry.review(&record) {
                log::debug!("{} -> {:?}", field, result);
            }
            let task = notedo::model::Task::from_record(&entry.flatten(&record))?;
            print_json(&task)?;
        }
        "format" => {
            let raw = args.join(" ");
            let record: Record =
                serde_json::from_str(&raw).context("format expects a JSON object")?;
            println!("{}", templates.object_to_text(&record, &config.template, sep));
        }
        "template" => {
            let entry = QuickEntry::new(&config, &clock, &templates);
            println!("{}", entry.template_line(sep));
        }
        "separator" => match args.first().map(String::as_str) {
            None => println!("{}", templates.separator(None)),
            Some("--reset") => {
                prefs.try_remove(SEPARATOR_KEY)?;
                println!("{}", templates.separator(None));
            }
            Some(value) => {
                if value.is_empty() {
                    anyhow::bail!("separator cannot be empty");
                }
                prefs.try_set(SEPARATOR_KEY, value)?;
                println!("{}", value);
            }
        },
        "aliases" => {
            for def in config.active_aliases() {
                println!(
                    "{:<10} {:<10} {:<9} {}",
                    def.alias,
                    def.value.to_string(),
                    def.kind.to_string(),
                    def.description.as_deref().unwrap_or("")
                );
            }
            if let Ok(path) = ctx.get_config_file_path() {
                log::debug!("config file: {}", path.display());
            }
        }
        other => {
            eprintln!("Unknown command '{}'. See 'notedo --help'.", other);
            std::process::exit(2);
        }
    }

    Ok(())
}
