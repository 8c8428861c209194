use clap::{Parser, Subcommand};
use env_logger::Env;
use navdeck::session::{Session, SessionOptions};
use navdeck::{config, markup, output, script};
use serde_json::json;
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "navdeck")]
#[command(about = "Mobile navigation overlay: check, render, and replay gestures")]
#[command(long_about = "\
Mobile navigation overlay: check, render, and replay gestures

The navigation structure lives in nav.toml: a breakpoint, the root list of
links, and submenu panels linked to their parent panel.

  breakpoint = 992

  [[links]]
  label = \"Services\"
  submenu = \"services\"        # opens the 'services' panel

  [[panels]]
  id = \"services\"
  title = \"Services\"
  links = [{ label = \"Web\", href = \"web.html\" }]

Gesture scripts for 'simulate' hold one event per line:

  tap activator | tap background | tap back | tap submenu ID
  tap theme | tap mobile-theme | key NAME | resize WIDTH
  scroll TOP at MS | tick MS | dot INDEX | image-error INDEX
  focus card INDEX | blur card INDEX | mousedown

Run 'navdeck gen-config' to generate a documented nav.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Navigation config file
    #[arg(long, default_value = "nav.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate the navigation config and print its structure
    Check,
    /// Render a standalone HTML preview of the header and overlay
    Render {
        /// Path of the page being rendered, for aria-current
        #[arg(long, default_value = "/")]
        current: String,
        /// Write to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
        /// Render with the dark theme active
        #[arg(long)]
        dark: bool,
    },
    /// Replay a gesture script against an in-memory page
    Simulate {
        /// Script file, one event per line
        script: PathBuf,
        /// Viewport width at page load
        #[arg(long)]
        width: Option<u32>,
        /// System color scheme prefers dark
        #[arg(long)]
        prefers_dark: bool,
        /// Value already stored under the theme key
        #[arg(long)]
        stored_theme: Option<String>,
        /// Emit the trace and final page state as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a stock nav.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Check => {
            println!("==> Checking {}", cli.config.display());
            let nav = config::load_config(&cli.config)?;
            output::print_check_output(&nav);
            println!("==> Navigation is valid");
        }
        Command::Render { current, out, dark } => {
            let nav = config::load_config(&cli.config)?;
            let html = markup::render_document(&nav, &current, dark).into_string();
            match out {
                Some(path) => {
                    std::fs::write(&path, html)?;
                    println!("==> Wrote {}", path.display());
                }
                None => println!("{}", html),
            }
        }
        Command::Simulate {
            script: script_path,
            width,
            prefers_dark,
            stored_theme,
            json,
        } => {
            let nav = config::load_config(&cli.config)?;
            let steps = script::load_script(&script_path)?;
            let options = SessionOptions {
                viewport_width: width,
                prefers_dark,
                stored_theme,
                ..SessionOptions::default()
            };
            let mut session = Session::new(&nav, &options);
            if !json {
                output::print_enhanced(&session.enhanced());
            }

            let mut trace = Vec::new();
            for (i, step) in steps.iter().enumerate() {
                let outcome = session.dispatch(&step.event);
                if json {
                    trace.push(json!({
                        "line": step.line,
                        "step": step.text,
                        "state": session.overlay().state().to_string(),
                        "detail": output::describe_outcome(&outcome),
                    }));
                } else {
                    output::print_step(i + 1, &step.text, &outcome);
                }
            }

            if json {
                let report = json!({
                    "steps": trace,
                    "state": session.overlay().state().to_string(),
                    "enhanced": session.enhanced(),
                    "page": session.page().snapshot(),
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("==> Final state: {}", session.overlay().state());
                output::print_page_state(session.page());
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
