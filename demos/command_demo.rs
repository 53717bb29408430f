//! Replays a command stream against a `robin_hash::HashMap<i64, i64>`.
//!
//! The stream starts with a command count `n`, followed by `n` commands:
//!
//! - `+ key val` — upsert `key` to `val`
//! - `- key`     — remove `key`
//! - `? key`     — print the value for `key`, or `-1` if absent
//! - `<`         — print every `key value` pair, one per line
//! - `!`         — clear the map
//!
//! After the stream is exhausted the final map size is printed.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use robin_hash::HashMap;

#[derive(Parser, Debug)]
struct Args {
    /// Read the command stream from a file instead of stdin.
    #[arg(short = 'i', long = "input")]
    input: Option<PathBuf>,
}

fn next_int<'a>(tokens: &mut impl Iterator<Item = &'a str>) -> Result<i64, String> {
    let token = tokens.next().ok_or("unexpected end of command stream")?;
    token
        .parse()
        .map_err(|_| format!("expected an integer, got {token:?}"))
}

fn run(text: &str) -> Result<(), String> {
    let mut map: HashMap<i64, i64> = HashMap::new();
    let mut tokens = text.split_whitespace();

    let n = next_int(&mut tokens)?;
    for _ in 0..n {
        let code = tokens.next().ok_or("unexpected end of command stream")?;
        match code {
            "+" => {
                let key = next_int(&mut tokens)?;
                let val = next_int(&mut tokens)?;
                *map.entry(key).or_default() = val;
            }
            "-" => {
                let key = next_int(&mut tokens)?;
                map.remove(&key);
            }
            "?" => {
                let key = next_int(&mut tokens)?;
                match map.get(&key) {
                    Some(val) => println!("{val}"),
                    None => println!("-1"),
                }
            }
            "<" => {
                for (key, val) in &map {
                    println!("{key} {val}");
                }
            }
            "!" => map.clear(),
            other => return Err(format!("unknown command {other:?}")),
        }
    }

    println!("{}", map.len());
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let text = match &args.input {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).map(|_| buf)
        }
    };
    let text = match text {
        Ok(text) => text,
        Err(err) => {
            eprintln!("failed to read command stream: {err}");
            return ExitCode::FAILURE;
        }
    };

    match run(&text) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
