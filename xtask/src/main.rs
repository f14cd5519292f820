//! Build helpers for keyfit: man pages and shell completions.
//!
//! ```text
//! cargo run -p xtask -- man          # target/dist/man/*.1
//! cargo run -p xtask -- completions  # target/dist/completions/*
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

const BIN_NAME: &str = "keyfit";

#[derive(Parser)]
#[command(name = "xtask", about = "keyfit build helpers")]
struct Xtask {
    /// Output directory (default: target/dist).
    #[arg(long, global = true)]
    out_dir: Option<PathBuf>,

    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate man pages for the CLI and each subcommand
    Man,
    /// Generate shell completion scripts
    Completions {
        /// Only generate for this shell
        #[arg(long, value_enum)]
        shell: Option<Shell>,
    },
    /// Generate both man pages and completions
    Dist,
}

fn main() -> anyhow::Result<()> {
    let xtask = Xtask::parse();
    let out_dir = xtask
        .out_dir
        .unwrap_or_else(|| workspace_root().join("target").join("dist"));

    match xtask.task {
        Task::Man => man_pages(&out_dir.join("man")),
        Task::Completions { shell } => completions(&out_dir.join("completions"), shell),
        Task::Dist => {
            man_pages(&out_dir.join("man"))?;
            completions(&out_dir.join("completions"), None)
        }
    }
}

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

fn man_pages(dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let cmd = keyfit::command();
    write_man(dir, BIN_NAME, cmd.clone())?;
    for sub in cmd.get_subcommands() {
        let name = format!("{BIN_NAME}-{}", sub.get_name());
        write_man(dir, &name, sub.clone().name(name.clone()))?;
    }
    println!("man pages written to {}", dir.display());
    Ok(())
}

fn write_man(dir: &Path, name: &str, cmd: clap::Command) -> anyhow::Result<()> {
    let mut buf = Vec::new();
    clap_mangen::Man::new(cmd)
        .render(&mut buf)
        .with_context(|| format!("failed to render man page for {name}"))?;
    let path = dir.join(format!("{name}.1"));
    fs::write(&path, buf).with_context(|| format!("failed to write {}", path.display()))
}

fn completions(dir: &Path, only: Option<Shell>) -> anyhow::Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let shells = only.map_or_else(|| Shell::value_variants().to_vec(), |s| vec![s]);
    let mut cmd = keyfit::command();
    for shell in shells {
        let path = clap_complete::generate_to(shell, &mut cmd, BIN_NAME, dir)
            .with_context(|| format!("failed to generate {shell} completions"))?;
        println!("{}", path.display());
    }
    Ok(())
}
