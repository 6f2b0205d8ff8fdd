//! `sugg`: completion and suggestion tooling for Python sources.

use std::path::{Path, PathBuf};

use sugg_complete::{CompleteOptions, FsLister};
use sugg_lexer_core::IndentConfig;
use suggc::commands::{
    complete_text, find_symbol_command, read_source, scan_source, suggest_command,
    CompleteCommand, FindSymbolCommand, SuggestCommand,
};
use suggc::SuggestError;

fn main() {
    suggc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    let result = match command.as_str() {
        "scan" => {
            if args.len() < 3 {
                eprintln!("Usage: sugg scan <file>");
                std::process::exit(1);
            }
            read_source(Path::new(&args[2]))
                .map(|text| scan_source(&text, IndentConfig::default()))
        }
        "complete" => {
            let mut cmd = CompleteCommand::default();
            let mut text = None;
            for arg in args.iter().skip(2) {
                if let Some(cursor) = arg.strip_prefix("--cursor=") {
                    let Ok(cursor) = cursor.parse() else {
                        eprintln!("error: invalid cursor '{cursor}'");
                        std::process::exit(1);
                    };
                    cmd.cursor = Some(cursor);
                } else if arg == "--no-eval-calls" {
                    cmd.options = CompleteOptions {
                        evaluate_calls: false,
                    };
                } else if let Some(names) = arg.strip_prefix("--names=") {
                    cmd.names = split_list(names);
                } else if text.is_none() {
                    text = Some(arg.clone());
                }
            }
            let Some(text) = text else {
                eprintln!("Usage: sugg complete <text> [--cursor=N] [--no-eval-calls] [--names=a,b]");
                std::process::exit(1);
            };
            cmd.text = text;
            complete_text(&cmd, &FsLister)
        }
        "findsymbol" => {
            let mut cmd = FindSymbolCommand::default();
            let mut symbol = None;
            let mut rest = args.iter().skip(2);
            while let Some(arg) = rest.next() {
                if arg == "-e" {
                    cmd.exact = true;
                } else if arg == "-as" {
                    let Some(alias) = rest.next() else {
                        eprintln!("error: -as needs a name");
                        std::process::exit(1);
                    };
                    cmd.alias = Some(alias.clone());
                } else if let Some(dir) = arg.strip_prefix("--path=") {
                    cmd.roots.push(PathBuf::from(dir));
                } else if !arg.starts_with('-') && symbol.is_none() {
                    symbol = Some(arg.clone());
                }
            }
            let Some(symbol) = symbol else {
                eprintln!("Usage: sugg findsymbol [-e] [-as NAME] <symbol> [--path=DIR]...");
                std::process::exit(1);
            };
            cmd.symbol = symbol;
            find_symbol_command(&cmd)
        }
        "suggest" => {
            let mut cmd = SuggestCommand::default();
            let mut positional = Vec::new();
            for arg in args.iter().skip(2) {
                if let Some(names) = arg.strip_prefix("--names=") {
                    cmd.names = split_list(names);
                } else if let Some(pair) = arg.strip_prefix("--attrs=") {
                    let Some((expr, attrs)) = pair.split_once(':') else {
                        eprintln!("error: expected --attrs=EXPR:a,b");
                        std::process::exit(1);
                    };
                    cmd.attributes.push((expr.to_owned(), split_list(attrs)));
                } else if let Some(dir) = arg.strip_prefix("--path=") {
                    cmd.roots.push(PathBuf::from(dir));
                } else if let Some(pick) = arg.strip_prefix("--pick=") {
                    let Ok(pick) = pick.parse() else {
                        eprintln!("error: invalid suggestion index '{pick}'");
                        std::process::exit(1);
                    };
                    cmd.pick = Some(pick);
                } else {
                    positional.push(arg.clone());
                }
            }
            let [source, message] = positional.as_slice() else {
                eprintln!("Usage: sugg suggest <source> <error-message> [--names=a,b] [--attrs=EXPR:a,b] [--path=DIR] [--pick=N]");
                std::process::exit(1);
            };
            cmd.source.clone_from(source);
            cmd.message.clone_from(message);
            suggest_command(&cmd)
        }
        "help" | "--help" | "-h" => {
            print_usage();
            return;
        }
        "version" | "--version" | "-v" => {
            println!("sugg {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    report(result);
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

fn report(result: Result<String, SuggestError>) {
    match result {
        Ok(out) => print!("{out}"),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("sugg: completion and suggestions for interactive Python");
    println!();
    println!("Usage: sugg <command> [options]");
    println!();
    println!("Commands:");
    println!("  scan <file>                  Show the structural study of a buffer");
    println!("  complete <text>              Classify the cursor and list candidates");
    println!("  findsymbol <symbol>          Search the symbol index for imports");
    println!("  suggest <source> <message>   \"Did you mean\" for a failed line");
    println!("  help                         Show this help message");
    println!("  version                      Show version information");
    println!();
    println!("Complete options:");
    println!("  --cursor=N          Cursor byte offset (default: end of text)");
    println!("  --no-eval-calls     Do not evaluate expressions containing calls");
    println!("  --names=a,b         Names offered for bare-name completion");
    println!();
    println!("Findsymbol options:");
    println!("  -e                  Exact search (default: allow one edit)");
    println!("  -as NAME            Append `as NAME` to the import");
    println!("  --path=DIR          Search root, repeatable (default: $SUGG_PATH or .)");
    println!();
    println!("Suggest options:");
    println!("  --names=a,b         Names bound in the session");
    println!("  --attrs=EXPR:a,b    Attributes of EXPR, repeatable");
    println!("  --path=DIR          Also search this root for imports, repeatable");
    println!("  --pick=N            Show what suggestion N does (negative counts from the end)");
    println!();
    println!("Examples:");
    println!("  sugg scan session.py");
    println!("  sugg complete \"open('src/ma\"");
    println!("  sugg findsymbol -as np numpy");
    println!("  sugg findsymbol loads...json");
    println!("  sugg suggest \"prnt(x)\" \"name 'prnt' is not defined\" --pick=0");
}
