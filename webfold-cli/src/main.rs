//! Webfold CLI
//!
//! Batch maintenance commands for a Webflow-exported static site: extract
//! per-page critical CSS, generate a sitemap, and apply the page fixups
//! the export needs before deployment.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use webfold_common::warning::clear_warnings;
use webfold_css::extract_critical_css;
use webfold_html::{parse, serialize};
use webfold_site::{
    LinkOutcome, SitemapOptions, add_html_extension, check_links, generate_sitemap,
    inject_script_before, inline_critical_assets,
};

/// Directory names never walked when collecting pages for the sitemap.
const SKIPPED_DIRS: &[&str] = &["scripts", ".git", ".github", "images", "css", "js"];

/// Webfold — maintenance toolkit for a Webflow static export
#[derive(Parser, Debug)]
#[command(name = "webfold")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Extract critical CSS for the home page
    webfold critical --page index.html --stylesheet css/site.css --output css/critical.css

    # Regenerate sitemap.xml
    webfold sitemap --root . --base-url https://example.com --output sitemap.xml

    # Fix extension-less internal links across the export
    webfold links *.html

    # Inject the analytics loader before the Webflow bundle
    webfold inject --before webflow-script.js --script '<script src="js/analyze.js"></script>' *.html

    # Inline critical stylesheets and defer the rest
    webfold inline *.html

    # Check every internal link against the deployed site
    webfold check --base https://example.com index.html
"#)]
struct Cli {
    /// Print machine-readable JSON reports (links, inject, inline, check)
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract the critical-CSS fragment for one page
    Critical {
        /// Page to classify above-the-fold elements from
        #[arg(long)]
        page: PathBuf,
        /// Stylesheet to filter
        #[arg(long)]
        stylesheet: PathBuf,
        /// Write the fragment here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Generate sitemap XML for every page under a site root
    Sitemap {
        /// Site root directory to walk for *.html pages
        #[arg(long)]
        root: PathBuf,
        /// Production base URL for <loc> entries
        #[arg(long)]
        base_url: String,
        /// Write the sitemap here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Append .html to extension-less internal anchors, rewriting in place
    Links {
        /// Pages to rewrite
        files: Vec<PathBuf>,
    },
    /// Insert a script tag before an existing one, textually
    Inject {
        /// Suffix of the src of the script tag to inject before
        #[arg(long)]
        before: String,
        /// Full script tag to insert
        #[arg(long)]
        script: String,
        /// Pages to rewrite
        files: Vec<PathBuf>,
    },
    /// Inline critical stylesheets and defer non-critical scripts, in place
    Inline {
        /// Pages to rewrite
        files: Vec<PathBuf>,
    },
    /// Fetch every internal link on the given pages and report status
    Check {
        /// Deployed base URL to resolve internal hrefs against
        #[arg(long)]
        base: String,
        /// Pages to collect links from
        files: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Command::Critical {
            page,
            stylesheet,
            output,
        } => run_critical(page, stylesheet, output.as_deref()),
        Command::Sitemap {
            root,
            base_url,
            output,
        } => run_sitemap(root, base_url, output.as_deref()),
        Command::Links { files } => run_links(files, cli.json),
        Command::Inject {
            before,
            script,
            files,
        } => run_inject(before, script, files, cli.json),
        Command::Inline { files } => run_inline(files, cli.json),
        Command::Check { base, files } => run_check(base, files, cli.json),
    }
}

fn run_critical(page: &Path, stylesheet: &Path, output: Option<&Path>) -> Result<()> {
    let html = read_page(page)?;
    let css = fs::read_to_string(stylesheet)
        .with_context(|| format!("failed to read {}", stylesheet.display()))?;

    let tree = parse(&html);
    let critical = extract_critical_css(&tree, &css);

    match output {
        Some(path) => {
            fs::write(path, &critical)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!(
                "{} {} ({} bytes)",
                "wrote".green(),
                path.display(),
                critical.len()
            );
        }
        None => print!("{critical}"),
    }
    Ok(())
}

fn run_sitemap(root: &Path, base_url: &str, output: Option<&Path>) -> Result<()> {
    let pages = collect_pages(root)?;
    let options = SitemapOptions {
        base_url: base_url.to_string(),
        lastmod: Local::now().date_naive(),
    };
    let xml = generate_sitemap(&options, &pages);

    match output {
        Some(path) => {
            fs::write(path, &xml).with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("{} {} ({} pages)", "wrote".green(), path.display(), pages.len());
        }
        None => print!("{xml}"),
    }
    Ok(())
}

/// Walk `root` for `*.html` pages, skipping asset and tooling directories.
///
/// Paths come back relative to `root`, sorted, so sitemap output is
/// stable across runs and filesystems.
fn collect_pages(root: &Path) -> Result<Vec<String>> {
    let mut pages = Vec::new();

    let walker = walkdir::WalkDir::new(root).into_iter().filter_entry(|e| {
        !(e.file_type().is_dir()
            && e.file_name()
                .to_str()
                .is_some_and(|name| SKIPPED_DIRS.contains(&name)))
    });

    for entry in walker {
        let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().is_none_or(|ext| ext != "html") {
            continue;
        }
        let rel = path.strip_prefix(root).unwrap_or(path);
        pages.push(rel.to_string_lossy().replace('\\', "/"));
    }

    pages.sort();
    Ok(pages)
}

fn run_links(files: &[PathBuf], json: bool) -> Result<()> {
    let mut reports = Vec::new();

    for file in files {
        clear_warnings();
        let html = read_page(file)?;
        let mut tree = parse(&html);
        let rewritten = add_html_extension(&mut tree);
        if rewritten > 0 {
            write_page(file, &serialize(&tree))?;
        }

        if json {
            reports.push(serde_json::json!({
                "file": file.display().to_string(),
                "rewritten": rewritten,
            }));
        } else if rewritten > 0 {
            println!(
                "{} {} ({rewritten} links)",
                "rewrote".green(),
                file.display()
            );
        } else {
            println!("{} {}", "unchanged".dimmed(), file.display());
        }
    }

    print_json(json, &reports)
}

fn run_inject(before: &str, script: &str, files: &[PathBuf], json: bool) -> Result<()> {
    let mut reports = Vec::new();

    for file in files {
        let html = read_page(file)?;
        let injected = match inject_script_before(&html, before, script) {
            Some(out) => {
                write_page(file, &out)?;
                true
            }
            None => false,
        };

        if json {
            reports.push(serde_json::json!({
                "file": file.display().to_string(),
                "injected": injected,
            }));
        } else if injected {
            println!("{} {}", "injected".green(), file.display());
        } else {
            println!("{} {} (target script not found)", "skipped".yellow(), file.display());
        }
    }

    print_json(json, &reports)
}

fn run_inline(files: &[PathBuf], json: bool) -> Result<()> {
    let mut reports = Vec::new();

    for file in files {
        clear_warnings();
        let html = read_page(file)?;
        let mut tree = parse(&html);

        let dir = file.parent().map_or_else(PathBuf::new, Path::to_path_buf);
        let report = inline_critical_assets(&mut tree, |href| {
            fs::read_to_string(dir.join(href)).ok()
        });

        if report.changed() {
            write_page(file, &serialize(&tree))?;
        }

        if json {
            reports.push(serde_json::json!({
                "file": file.display().to_string(),
                "inlined_stylesheets": report.inlined_stylesheets,
                "deferred_scripts": report.deferred_scripts,
            }));
        } else if report.changed() {
            println!(
                "{} {} ({} inlined, {} deferred)",
                "rewrote".green(),
                file.display(),
                report.inlined_stylesheets,
                report.deferred_scripts
            );
        } else {
            println!("{} {}", "unchanged".dimmed(), file.display());
        }
    }

    print_json(json, &reports)
}

fn run_check(base: &str, files: &[PathBuf], json: bool) -> Result<()> {
    let mut all = Vec::new();

    for file in files {
        clear_warnings();
        let html = read_page(file)?;
        let tree = parse(&html);
        let statuses = check_links(&tree, base)
            .with_context(|| format!("link check failed for {}", file.display()))?;

        if !json {
            println!("{}", file.display().bold());
            for status in &statuses {
                match &status.outcome {
                    LinkOutcome::Ok(code) => {
                        println!("  {} {} {}", "ok".green(), code, status.url);
                    }
                    LinkOutcome::Failed(code) => {
                        println!("  {} {} {}", "fail".red(), code, status.url);
                    }
                    LinkOutcome::Error(e) => {
                        println!("  {} {} ({e})", "error".red(), status.url);
                    }
                }
            }
        }
        all.extend(statuses);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&all)?);
    }
    Ok(())
}

fn read_page(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn write_page(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

/// Emit the collected per-file reports when `--json` is on.
fn print_json(json: bool, reports: &[serde_json::Value]) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(reports)?);
    }
    Ok(())
}
