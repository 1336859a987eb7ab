//! Entry point for the **vdpager** binary.
//!
//! Either answers a single request given on the command line and prints
//! the result as plain text, or (with `--stdin`) reads newline-delimited
//! JSON requests on a background thread and prints one JSON response per
//! request.

use log::{error, info, warn};
use std::io::BufReader;
use std::sync::mpsc;
use vdpager::command::{Incoming, Number, Request, Response};
use vdpager::config::Config;
use vdpager::ipc::stream::LineSource;
use vdpager::pager::Pager;
use vdpager::traits::RequestSource;

const USAGE: &str = "usage:
  vdpager remove <id>
  vdpager rename <id> <name>
  vdpager create <position> [name]
  vdpager swap <a> <b>
  vdpager grid <count>
  vdpager preview <screen-width> <screen-height> [width]
  vdpager next <current> <count> <direction>
  vdpager --stdin";

/// Resolve the config directory (`$XDG_CONFIG_HOME/vdpager`).
fn config_dir() -> std::path::PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    std::path::PathBuf::from(base).join("vdpager")
}

/// Try to load the config from `$XDG_CONFIG_HOME/vdpager/config.json`,
/// falling back to compiled-in defaults.
fn load_config() -> Config {
    let path = config_dir().join("config.json");
    match Config::load(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) => {
            info!("no config file ({}), using defaults", e);
            Config::default()
        }
    }
}

//  Main

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let pager = Pager::new(load_config());

    if args.first().map(String::as_str) == Some("--stdin") {
        run_stream(pager);
        return;
    }

    let request = match parse_args(&args) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    match pager.handle(request) {
        Ok(response) => println!("{}", response),
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

/// `--stdin` mode: answer requests until stdin closes.
fn run_stream(pager: Pager) {
    let (tx, rx) = mpsc::channel::<Incoming>();
    std::thread::spawn(move || {
        let mut source = LineSource::new(BufReader::new(std::io::stdin()));
        if let Err(e) = source.run(tx) {
            error!("stdin source error: {}", e);
        }
    });

    for incoming in rx {
        let response = match incoming {
            Ok(request) => pager.handle(request).unwrap_or_else(|e| {
                warn!("request failed: {}", e);
                Response::Error(e.to_string())
            }),
            Err(e) => Response::Error(e.to_string()),
        };
        match serde_json::to_string(&response) {
            Ok(line) => println!("{}", line),
            Err(e) => error!("failed to encode response: {}", e),
        }
    }
    info!("stdin closed, exiting");
}

//  Argument parsing

fn number(arg: &str) -> Result<Number, String> {
    arg.trim()
        .parse::<f64>()
        .map(Number)
        .map_err(|_| format!("not a number: {:?}", arg))
}

fn positional<'a>(cmd: &str, rest: &'a [String], i: usize) -> Result<&'a str, String> {
    rest.get(i)
        .map(String::as_str)
        .ok_or_else(|| format!("{}: missing argument {}", cmd, i + 1))
}

fn parse_args(args: &[String]) -> Result<Request, String> {
    let (cmd, rest) = args.split_first().ok_or("missing command")?;
    let arg = |i: usize| positional(cmd, rest, i);

    let request = match cmd.as_str() {
        "remove" => Request::Remove {
            id: Some(arg(0)?.to_string()),
        },
        "rename" => Request::Rename {
            id: Some(arg(0)?.to_string()),
            name: Some(arg(1)?.to_string()),
        },
        "create" => Request::Create {
            position: number(arg(0)?)?,
            name: rest.get(1).cloned(),
        },
        "swap" => Request::SwapWindows {
            a: number(arg(0)?)?,
            b: number(arg(1)?)?,
            count: None,
        },
        "grid" => Request::Grid {
            count: number(arg(0)?)?,
        },
        "preview" => Request::Preview {
            screen_width: number(arg(0)?)?,
            screen_height: number(arg(1)?)?,
            width: rest.get(2).map(|w| number(w)).transpose()?,
        },
        "next" => Request::Next {
            current: number(arg(0)?)?,
            count: number(arg(1)?)?,
            direction: number(arg(2)?)?,
        },
        other => return Err(format!("unknown command: {}", other)),
    };
    Ok(request)
}
