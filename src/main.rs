use clap::{Parser, Subcommand};
use slotweave::{config, output, site};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "slotweave")]
#[command(about = "Static site generator that fills one HTML template per content folder")]
#[command(long_about = "\
Static site generator that fills one HTML template per content folder

Every folder under content/ becomes a page. Files and folders inside it are
spliced into the template elements whose ids name a slot.

Project structure:

  config.toml                      # Optional, see 'slotweave gen-config'
  template.html                    # Shared template
  content/
  ├── home/                        # → index.html
  │   ├── large.html               # Fills #content_large
  │   └── middle/                  # Folder slot: one section per file,
  │       ├── 01-intro.html        #   plus a menu in #menu_middle
  │       └── 02-gear.md           # Markdown is rendered
  └── songs/                       # → songs.html
      ├── top.html
      └── popups/
          └── lyrics.html          # → modal #lyricsPopUp
  assets/{img,css,js,fonts}/       # Copied to the output
  assets/img/white_lines/line*.svg # Menu dividers
  favicon/  robots/  CNAME         # Copied to the output root

Template conventions:
  #container_<slot>   removed when the page has nothing for <slot>
  #content_<slot>     replaced by the page's <slot>.html / <slot>.md
  #menu_<slot>        filled with links when <slot> is a folder
  #navItems           filled with one link per page
  {page}              replaced in <title>, img src/alt, body class, <span>

Run 'slotweave gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Project root (template, content, and assets)
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "html", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compose every page and copy static assets into the output directory
    Build,
    /// Compose every page in memory and show what fills each slot
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            let site_config = config::load_config(&cli.source)?;
            println!("==> Building {} → {}", cli.source.display(), cli.output.display());
            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    output::print_build_event(&event);
                }
            });
            let result = site::build(&cli.source, &cli.output, &site_config, Some(tx));
            printer.join().ok();
            output::print_build_summary(&result?);
        }
        Command::Check => {
            let site_config = config::load_config(&cli.source)?;
            println!("==> Checking {}", cli.source.display());
            let reports = site::check(&cli.source, &site_config)?;
            output::print_check_output(&reports);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
