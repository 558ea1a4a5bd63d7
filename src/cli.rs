// File: ./src/cli.rs
//! Shared command-line interface logic, like argument parsing and help.
use anyhow::{Context, Result};
use std::path::PathBuf;

/// A parsed command line.
///
/// Global options are only recognized before the command word, and `--sep`
/// only directly after it. Everything else, including words that look like
/// options, is passed through to the command as entry text. A `--` after the
/// command ends option parsing early.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub root: Option<PathBuf>,
    pub separator: Option<String>,
    pub help: bool,
    pub command: Option<String>,
    pub args: Vec<String>,
}

pub fn parse_args<I>(args: I) -> Result<Invocation>
where
    I: IntoIterator<Item = String>,
{
    let mut inv = Invocation::default();
    let mut iter = args.into_iter().peekable();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" | "help" => {
                inv.help = true;
                return Ok(inv);
            }
            "-r" | "--root" => {
                let root = iter.next().context("--root requires a path")?;
                inv.root = Some(PathBuf::from(root));
            }
            "--sep" => {
                inv.separator = Some(iter.next().context("--sep requires a value")?);
            }
            _ => {
                inv.command = Some(arg);
                break;
            }
        }
    }

    if inv.command.is_none() {
        inv.help = true;
        return Ok(inv);
    }

    loop {
        match iter.peek().map(String::as_str) {
            Some("--sep") => {
                iter.next();
                inv.separator = Some(iter.next().context("--sep requires a value")?);
            }
            Some("--") => {
                iter.next();
                break;
            }
            _ => break,
        }
    }

    inv.args = iter.collect();
    Ok(inv)
}

pub fn print_help(binary_name: &str) {
    println!(
        "Notedo v{} - time aliases and one-line quick entry for tasks",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [--root <path>] <command> [args]", binary_name);
    println!();
    println!("COMMANDS:");
    println!("    resolve <text>                 Resolve an alias (today, eod, tmr, ...)");
    println!("    check <alias> <resolved>       Check whether a stored value is still current");
    println!("    parse [--sep <s>] <line>       Parse a quick-entry line into a task");
    println!("    format [--sep <s>] <json>      Turn a JSON object into a quick-entry line");
    println!("    template [--sep <s>]           Show the fill-in template for tasks");
    println!("    separator [<s> | --reset]      Show, set or clear the saved separator");
    println!("    aliases                        List the active aliases");
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and data.");
    println!("    -h, --help            Show this help message.");
    println!("    --                    After the command, treat everything that follows as text.");
    println!();
    println!("LINE FORMAT:");
    println!("    key:value;key:value   Only the first colon splits key from value.");
    println!("    done:true             'true'/'false' become booleans, all else stays text.");
    println!("    Buy milk              A line without key:value pairs becomes the title.");
    println!();
    println!("EXAMPLES:");
    println!("    {} parse \"title:Ship release;due:eod;remind:noon\"", binary_name);
    println!("    {} check today 2024-07-19", binary_name);
    println!("    {} separator \" | \"", binary_name);
    println!();
    println!("ENVIRONMENT:");
    println!("    NOTEDO_ROOT           Same as --root.");
    println!("    NOTEDO_LOG            Log level (error, warn, info, debug, trace).");
}
