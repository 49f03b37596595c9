// Command-line interface for ptext
//
// This binary converts Portable Text JSON documents to Markdown and dumps the
// intermediate views the converter works with.
//
// Converting:
//
// The conversion needs a to and from pair. The from is auto-detected from the file extension,
// while being overwrittable by an explicit --from flag.
// Usage:
//  ptext <input> --to markdown [--from <format>] [--output <file>]          - Convert (default)
//  ptext convert <input> --to markdown [--from <format>] [--output <file>]  - Same as above (explicit)
//  ptext inspect <path> [<transform>]    - Execute a transform (defaults to "events")
//  ptext --list-formats                  - List formats and transforms
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the format/transform.
// Example:
//  ptext doc.json --to markdown --extra-bullet '*' --extra-list-indent 2

use ptext_cli::transforms;

use clap::{Arg, ArgAction, Command, ValueHint};
use ptext_config::{Loader, PtextConfig};
use ptext_markdown::{FormatRegistry, MarkdownFormat, MarkdownOptions};
use std::collections::HashMap;
use std::fs;

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = if let Some(key) = arg.strip_prefix("--extra-") {
            Some(key)
        } else {
            arg.strip_prefix("--extras-")
        };

        if let Some(key) = key_opt {
            // A lone "-" is a bullet value, not a flag
            let has_value = if i + 1 < args.len() {
                let next = &args[i + 1];
                next == "-" || !next.starts_with('-')
            } else {
                false
            };

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("ptext")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting Portable Text documents to Markdown")
        .long_about(
            "ptext is a command-line tool for working with Portable Text documents.\n\n\
            Commands:\n  \
            - convert: Render Portable Text JSON as Markdown (default)\n  \
            - inspect: View internal representations (mark events, lists, blocks)\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            ptext doc.json --to markdown                    # Convert (outputs to stdout)\n  \
            ptext doc.json --to markdown -o doc.md          # Convert to a file\n  \
            ptext doc.json --to markdown --extra-bullet '*' # Use '*' bullets\n  \
            ptext inspect doc.json lists                    # View list reconstruction",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats and inspect transforms")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a ptext.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect internal representations of Portable Text documents")
                .long_about(
                    "View the structures the converter derives from a document.\n\n\
                    Transforms:\n  \
                    - events:      Inline open/text/close events per text block (default)\n  \
                    - blocks-json: The decoded block model as JSON\n  \
                    - lists:       List depth and marker assigned to each block\n\n\
                    Extra Parameters:\n  \
                    --extra-show-keys <bool>  Print block keys in headers (default from config)\n\n\
                    Examples:\n  \
                    ptext inspect doc.json                 # Event dump (default)\n  \
                    ptext inspect doc.json lists           # List contexts\n  \
                    ptext inspect doc.json blocks-json     # Decoded model",
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the Portable Text JSON file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply. Defaults to 'events'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            transforms::AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats (default command)")
                .long_about(
                    "Convert documents between formats.\n\n\
                    Supported formats:\n  \
                    - portable-text: Portable Text JSON (.json, .portabletext)\n  \
                    - markdown:      CommonMark (.md), output only\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Markdown options (--extra-<name> <value>):\n  \
                    - list-indent:    Spaces per nesting level, 'tab', or literal whitespace\n  \
                    - bullet:         Bullet marker: '-', '*' or '+'\n  \
                    - code-min-ticks: Minimum backticks around inline code\n\n\
                    Examples:\n  \
                    ptext convert doc.json --to markdown         # Convert (stdout)\n  \
                    ptext convert doc.json --to markdown -o a.md # Convert to a file\n  \
                    ptext doc.json --to markdown                 # 'convert' is optional",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
}

fn main() {
    env_logger::init();

    // Try to parse args. If no subcommand is provided, inject "convert"
    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && cleaned_args[1] != "inspect"
                && cleaned_args[1] != "convert"
                && cleaned_args[1] != "help"
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);

    match matches.subcommand() {
        Some(("inspect", sub_matches)) => {
            let Some(path) = sub_matches.get_one::<String>("path") else {
                fail("missing input path");
            };
            let transform = sub_matches
                .get_one::<String>("transform")
                .map(|s| s.as_str())
                .unwrap_or(transforms::DEFAULT_TRANSFORM);
            handle_inspect_command(path, transform, &extra_params, &config);
        }
        Some(("convert", sub_matches)) => {
            let (Some(input), Some(to)) = (
                sub_matches.get_one::<String>("input"),
                sub_matches.get_one::<String>("to"),
            ) else {
                fail("convert needs an input path and --to");
            };

            // Auto-detect --from if not provided
            let from = match sub_matches.get_one::<String>("from") {
                Some(f) => f.to_string(),
                None => match FormatRegistry::default().detect_format_from_filename(input) {
                    Some(detected) => detected,
                    None => {
                        eprintln!("Error: Could not detect format from filename '{input}'");
                        eprintln!("Please specify --from explicitly");
                        std::process::exit(1);
                    }
                },
            };

            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, &from, to, output, &extra_params, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {message}");
    std::process::exit(1);
}

/// Handle the inspect command
fn handle_inspect_command(
    path: &str,
    transform: &str,
    extra_params: &HashMap<String, String>,
    config: &PtextConfig,
) {
    let source = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    });

    let params = build_inspect_params(config, extra_params);

    let output = transforms::execute_transform(&source, transform, &params).unwrap_or_else(|e| {
        eprintln!("Execution error: {e}");
        std::process::exit(1);
    });

    print!("{output}");
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
    config: &PtextConfig,
) {
    let registry = registry_from_config(config);

    // Validate formats exist
    if let Err(e) = registry.get(from) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    if let Err(e) = registry.get(to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    let blocks = registry.parse(&source, from).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
    log::debug!("decoded {} block(s) from '{input}'", blocks.len());

    // Format-specific parameters allowed via --extra-*
    let rendered = registry
        .serialize_with_options(&blocks, to, extra_params)
        .unwrap_or_else(|e| {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        });

    match output {
        Some(path) => fs::write(path, rendered).unwrap_or_else(|e| {
            eprintln!("Error writing file '{path}': {e}");
            std::process::exit(1);
        }),
        None => print!("{rendered}"),
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Conversion formats:");
    let registry = FormatRegistry::default();
    for format_name in registry.list_formats() {
        let description = registry
            .get(&format_name)
            .map(|format| format.description())
            .unwrap_or_default();
        println!("  {format_name:<14} {description}");
    }

    println!("\nInspect transforms:");
    for transform_name in transforms::AVAILABLE_TRANSFORMS {
        println!("  {transform_name}");
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> PtextConfig {
    let loader = Loader::new().with_optional_file("ptext.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

/// Default registry with the Markdown format replaced by one built from `config`.
fn registry_from_config(config: &PtextConfig) -> FormatRegistry {
    let options = MarkdownOptions::try_from(&config.markdown).unwrap_or_else(|err| {
        eprintln!("Invalid configuration: {err}");
        std::process::exit(1);
    });
    let mut registry = FormatRegistry::default();
    registry.register(MarkdownFormat::new(options));
    registry
}

fn apply_config_overrides(config: &mut PtextConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = take_override(extra_params, &["show-keys", "keys"]) {
        config.inspect.show_keys = parse_bool_arg("show-keys", &raw);
    }
}

fn build_inspect_params(
    config: &PtextConfig,
    overrides: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut params = HashMap::new();

    params.insert(
        "show-keys".to_string(),
        if config.inspect.show_keys {
            "true".to_string()
        } else {
            "false".to_string()
        },
    );

    for (key, value) in overrides {
        params.insert(key.clone(), value.clone());
    }

    params
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => true,
        "false" | "0" | "no" | "n" => false,
        other => {
            eprintln!("Invalid boolean value '{other}' for --extra-{flag}");
            std::process::exit(1);
        }
    }
}
