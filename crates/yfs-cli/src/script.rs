//! Line-oriented command scripts.
//!
//! One command per line. Blank lines and lines starting with `#` are
//! skipped. Paths are absolute; `write` takes the rest of the line as text.

use anyhow::{bail, Context};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScriptCommand {
    Mkdir { path: String },
    Touch { path: String },
    Write { path: String, text: String },
    Cat { path: String },
    Ls { path: String },
    Rm { path: String },
    Symlink { target: String, path: String },
    Readlink { path: String },
    Stat { path: String },
    Truncate { path: String, size: u64 },
}

/// Parse one script line. Returns `None` for blank and comment lines.
pub fn parse_line(line: &str) -> anyhow::Result<Option<ScriptCommand>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (verb, rest) = split_word(line);
    let cmd = match verb {
        "mkdir" => ScriptCommand::Mkdir { path: one_arg(verb, rest)? },
        "touch" => ScriptCommand::Touch { path: one_arg(verb, rest)? },
        "cat" => ScriptCommand::Cat { path: one_arg(verb, rest)? },
        "rm" => ScriptCommand::Rm { path: one_arg(verb, rest)? },
        "readlink" => ScriptCommand::Readlink { path: one_arg(verb, rest)? },
        "stat" => ScriptCommand::Stat { path: one_arg(verb, rest)? },
        "ls" => ScriptCommand::Ls {
            path: if rest.is_empty() { "/".into() } else { one_arg(verb, rest)? },
        },
        "write" => {
            let (path, text) = split_word(rest);
            if path.is_empty() {
                bail!("usage: write <path> <text>");
            }
            ScriptCommand::Write { path: path.into(), text: text.into() }
        }
        "truncate" => {
            let [path, size] = args::<2>(verb, rest, "<path> <size>")?;
            let size = size
                .parse()
                .with_context(|| format!("truncate: bad size {size:?}"))?;
            ScriptCommand::Truncate { path, size }
        }
        "ln" => {
            let [flag, target, path] = args::<3>(verb, rest, "-s <target> <path>")?;
            if flag != "-s" {
                bail!("ln: only symbolic links are supported (ln -s)");
            }
            ScriptCommand::Symlink { target, path }
        }
        other => bail!("unknown command {other:?}"),
    };
    Ok(Some(cmd))
}

fn split_word(s: &str) -> (&str, &str) {
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (s, ""),
    }
}

fn one_arg(verb: &str, rest: &str) -> anyhow::Result<String> {
    let [path] = args::<1>(verb, rest, "<path>")?;
    Ok(path)
}

fn args<const N: usize>(verb: &str, rest: &str, usage: &str) -> anyhow::Result<[String; N]> {
    let words: Vec<String> = rest.split_whitespace().map(String::from).collect();
    words
        .try_into()
        .map_err(|_| anyhow::anyhow!("usage: {verb} {usage}"))
}
