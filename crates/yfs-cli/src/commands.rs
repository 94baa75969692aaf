use std::io::BufRead;
use std::sync::Arc;

use anyhow::{bail, Context};
use colored::Colorize;
use serde::Serialize;
use yfs_client::{
    ClientConfig, ClientError, DirEntry, FileSystemClient, InodeId, ObjectKind, Status,
};
use yfs_extent::InMemoryExtentStore;
use yfs_lock::InMemoryLockService;

use crate::cli::*;
use crate::config::CliConfig;
use crate::script::{parse_line, ScriptCommand};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::load(cli.config.as_deref())?;
    let session = Session::new(config.client)?;
    match cli.command {
        Command::Run(args) => cmd_run(&session, args, cli.format),
        Command::Shell(_) => cmd_shell(&session, cli.format),
    }
}

fn cmd_run(session: &Session, args: RunArgs, format: OutputFormat) -> anyhow::Result<()> {
    let script = std::fs::read_to_string(&args.script)
        .with_context(|| format!("reading script {}", args.script.display()))?;
    let mut failed = 0usize;
    for (n, line) in script.lines().enumerate() {
        let Some(result) = session.run_line(line) else {
            continue;
        };
        emit(format, line, &result)?;
        if result.is_err() {
            failed += 1;
            if !args.keep_going {
                bail!("{}:{}: stopped at failed command", args.script.display(), n + 1);
            }
        }
    }
    if failed > 0 {
        bail!("{failed} command(s) failed");
    }
    Ok(())
}

fn cmd_shell(session: &Session, format: OutputFormat) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        if let Some(result) = session.run_line(&line) {
            emit(format, &line, &result)?;
        }
    }
    Ok(())
}

fn emit(format: OutputFormat, line: &str, result: &anyhow::Result<Outcome>) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => println!("{}", render_text(result)),
        OutputFormat::Json => println!("{}", render_json(line, result)?),
    }
    Ok(())
}

/// What a successfully executed script command produced.
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Outcome {
    Created { path: String, id: InodeId },
    Written { path: String, bytes: usize },
    Content { path: String, text: String },
    Listing { path: String, entries: Vec<DirEntry> },
    Removed { path: String },
    Linked { path: String, target: String, id: InodeId },
    Target { path: String, target: String },
    Stat {
        path: String,
        id: InodeId,
        kind: ObjectKind,
        #[serde(skip_serializing_if = "Option::is_none")]
        size: Option<u64>,
        atime: u64,
        mtime: u64,
        ctime: u64,
    },
    Truncated { path: String, size: u64 },
}

/// A client over a private in-memory store, addressed by absolute paths.
pub struct Session {
    client: FileSystemClient,
}

impl Session {
    pub fn new(config: ClientConfig) -> anyhow::Result<Self> {
        let client = FileSystemClient::new(
            Arc::new(InMemoryExtentStore::new()),
            Arc::new(InMemoryLockService::new()),
            config,
        )?;
        Ok(Self { client })
    }

    /// Parse and execute one line. `None` for blank and comment lines.
    pub fn run_line(&self, line: &str) -> Option<anyhow::Result<Outcome>> {
        match parse_line(line) {
            Ok(None) => None,
            Ok(Some(cmd)) => Some(self.execute(cmd)),
            Err(e) => Some(Err(e)),
        }
    }

    pub fn execute(&self, cmd: ScriptCommand) -> anyhow::Result<Outcome> {
        tracing::debug!(?cmd, "execute");
        let fs = &self.client;
        let outcome = match cmd {
            ScriptCommand::Mkdir { path } => {
                let (parent, name) = self.resolve_parent(&path)?;
                let id = fs.mkdir(parent, name, 0o755)?;
                Outcome::Created { path, id }
            }
            ScriptCommand::Touch { path } => {
                let (parent, name) = self.resolve_parent(&path)?;
                let id = match fs.create(parent, name, 0o644) {
                    Ok(id) => id,
                    Err(ClientError::AlreadyExists { .. }) => fs.lookup(parent, name)?,
                    Err(e) => return Err(e.into()),
                };
                Outcome::Created { path, id }
            }
            ScriptCommand::Write { path, text } => {
                // Replaces the whole content.
                let id = self.resolve(&path)?;
                fs.setattr(id, 0)?;
                let bytes = fs.write(id, 0, text.as_bytes())?;
                Outcome::Written { path, bytes }
            }
            ScriptCommand::Cat { path } => {
                let id = self.resolve(&path)?;
                let data = fs.read(id, usize::MAX, 0)?;
                let text = String::from_utf8_lossy(&data).into_owned();
                Outcome::Content { path, text }
            }
            ScriptCommand::Ls { path } => {
                let id = self.resolve(&path)?;
                let entries = fs.readdir(id)?;
                Outcome::Listing { path, entries }
            }
            ScriptCommand::Rm { path } => {
                let (parent, name) = self.resolve_parent(&path)?;
                fs.unlink(parent, name)?;
                Outcome::Removed { path }
            }
            ScriptCommand::Symlink { target, path } => {
                let (parent, name) = self.resolve_parent(&path)?;
                let id = fs.symlink(parent, name, &target)?;
                Outcome::Linked { path, target, id }
            }
            ScriptCommand::Readlink { path } => {
                let id = self.resolve(&path)?;
                let target = fs.readlink(id)?;
                Outcome::Target { path, target }
            }
            ScriptCommand::Stat { path } => {
                let id = self.resolve(&path)?;
                if fs.is_dir(id) {
                    let info = fs.getdir(id)?;
                    Outcome::Stat {
                        path,
                        id,
                        kind: ObjectKind::Directory,
                        size: None,
                        atime: info.atime,
                        mtime: info.mtime,
                        ctime: info.ctime,
                    }
                } else {
                    let kind = if fs.is_symlink(id) {
                        ObjectKind::Symlink
                    } else {
                        ObjectKind::File
                    };
                    let info = fs.getfile(id)?;
                    Outcome::Stat {
                        path,
                        id,
                        kind,
                        size: Some(info.size),
                        atime: info.atime,
                        mtime: info.mtime,
                        ctime: info.ctime,
                    }
                }
            }
            ScriptCommand::Truncate { path, size } => {
                let id = self.resolve(&path)?;
                fs.setattr(id, size)?;
                Outcome::Truncated { path, size }
            }
        };
        Ok(outcome)
    }

    fn resolve(&self, path: &str) -> anyhow::Result<InodeId> {
        let mut id = InodeId::ROOT;
        for part in components(path)? {
            id = self.client.lookup(id, part)?;
        }
        Ok(id)
    }

    fn resolve_parent<'p>(&self, path: &'p str) -> anyhow::Result<(InodeId, &'p str)> {
        let mut parts = components(path)?;
        let Some(name) = parts.pop() else {
            bail!("{path}: the root has no parent");
        };
        let mut id = InodeId::ROOT;
        for part in parts {
            id = self.client.lookup(id, part)?;
        }
        Ok((id, name))
    }
}

fn components(path: &str) -> anyhow::Result<Vec<&str>> {
    if !path.starts_with('/') {
        bail!("{path}: paths must be absolute");
    }
    Ok(path.split('/').filter(|p| !p.is_empty()).collect())
}

/// Status class of a failed command; `None` when it never reached the client.
fn status_of(err: &anyhow::Error) -> Option<Status> {
    err.downcast_ref::<ClientError>().map(ClientError::status)
}

fn render_text(result: &anyhow::Result<Outcome>) -> String {
    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => {
            let label = status_of(e).map_or_else(|| "ERROR".to_string(), |s| s.to_string());
            return format!("{} {} {:#}", "✗".red().bold(), label.red(), e);
        }
    };
    match outcome {
        Outcome::Created { path, id } => {
            format!("{} {} {}", "✓".green(), path.bold(), format!("(id {id})").dimmed())
        }
        Outcome::Written { path, bytes } => {
            format!("{} wrote {} bytes to {}", "✓".green(), bytes, path.bold())
        }
        Outcome::Content { text, .. } => text.clone(),
        Outcome::Listing { entries, .. } => entries
            .iter()
            .map(|e| format!("{:>8}  {}", e.id.to_string().dimmed(), e.name))
            .collect::<Vec<_>>()
            .join("\n"),
        Outcome::Removed { path } => format!("{} removed {}", "✓".green(), path.bold()),
        Outcome::Linked { path, target, .. } => {
            format!("{} {} -> {}", "✓".green(), path.bold(), target.cyan())
        }
        Outcome::Target { target, .. } => target.clone(),
        Outcome::Stat {
            path,
            id,
            kind,
            size,
            atime,
            mtime,
            ctime,
        } => {
            let mut out = format!("{}: {} {}\n", path.bold(), kind.to_string().cyan(), id);
            if let Some(size) = size {
                out.push_str(&format!("  size:  {size}\n"));
            }
            out.push_str(&format!("  atime: {atime}\n  mtime: {mtime}\n  ctime: {ctime}"));
            out
        }
        Outcome::Truncated { path, size } => {
            format!("{} truncated {} to {}", "✓".green(), path.bold(), size)
        }
    }
}

fn render_json(line: &str, result: &anyhow::Result<Outcome>) -> anyhow::Result<String> {
    let value = match result {
        Ok(outcome) => {
            let mut value = serde_json::to_value(outcome)?;
            if let serde_json::Value::Object(map) = &mut value {
                map.insert("command".into(), line.trim().into());
                map.insert("status".into(), Status::Ok.to_string().into());
            }
            value
        }
        Err(e) => serde_json::json!({
            "command": line.trim(),
            "status": status_of(e).map_or_else(|| "ERROR".to_string(), |s| s.to_string()),
            "error": format!("{e:#}"),
        }),
    };
    Ok(serde_json::to_string(&value)?)
}
