//! Dependency manifest (requirements file) reader
//!
//! The manifest lists one package specifier per line. Supported syntax:
//! - `#` comments at line start or after whitespace
//! - blank lines
//! - `\` line continuations
//! - `-r FILE` / `--requirement FILE` includes, relative to the including file
//! - `-e URL` / `--editable URL` and direct references (`./pkg`, `git+https://...`)
//! - any other `-`/`--` option line, kept verbatim
//!
//! Every other line counts as a requirement; its syntax is left to pip. The
//! dependency stage refuses to start the installer when the manifest is
//! missing or names no packages, so the pipeline fails before anything is
//! installed.

use std::path::{Path, PathBuf};

use crate::error::{BootstrapError, Result, manifest as manifest_error};

/// Characters that may follow a package name (and its extras)
const SPECIFIER_START: &[char] = &['<', '>', '=', '!', '~', ';', '@', '(', ','];

/// A single requirement specifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    /// Specifier text with comments removed
    pub spec: String,
    /// Package name, `None` for direct references and unrecognised lines
    pub name: Option<String>,
    /// File the specifier was read from
    pub source: PathBuf,
    /// 1-based line of the specifier in `source`
    pub line: usize,
}

/// Parsed dependency manifest, includes followed
#[derive(Debug, Clone)]
pub struct Manifest {
    pub requirements: Vec<Requirement>,
    pub options: Vec<String>,
}

enum Line<'a> {
    Include(&'a str),
    Editable(&'a str),
    Option,
    Requirement,
}

impl Manifest {
    /// Read and validate the manifest at `path`
    pub fn load(path: &Path) -> Result<Self> {
        let mut manifest = Self {
            requirements: Vec::new(),
            options: Vec::new(),
        };

        let mut chain = Vec::new();
        manifest.read_file(path, &mut chain)?;

        if manifest.requirements.is_empty() {
            return Err(manifest_error::empty(path));
        }
        Ok(manifest)
    }

    /// Names of all named requirements, in file order
    pub fn package_names(&self) -> Vec<&str> {
        self.requirements
            .iter()
            .filter_map(|r| r.name.as_deref())
            .collect()
    }

    fn read_file(&mut self, path: &Path, chain: &mut Vec<PathBuf>) -> Result<()> {
        let canonical = std::fs::canonicalize(path).map_err(|e| open_error(path, &e))?;
        if chain.contains(&canonical) {
            return Err(manifest_error::include_cycle(path));
        }

        let content = std::fs::read_to_string(path).map_err(|e| open_error(path, &e))?;

        chain.push(canonical);
        for (line_no, line) in logical_lines(&content) {
            match classify(&line) {
                Line::Include(target) => {
                    let base = path.parent().unwrap_or_else(|| Path::new(""));
                    self.read_file(&base.join(target), chain)?;
                }
                Line::Editable(target) => self.requirements.push(Requirement {
                    spec: target.to_string(),
                    name: None,
                    source: path.to_path_buf(),
                    line: line_no,
                }),
                Line::Option => self.options.push(line.clone()),
                Line::Requirement => {
                    self.requirements.push(Requirement {
                        name: parse_name(&line),
                        spec: line.clone(),
                        source: path.to_path_buf(),
                        line: line_no,
                    });
                }
            }
        }
        chain.pop();

        Ok(())
    }
}

fn open_error(path: &Path, err: &std::io::Error) -> BootstrapError {
    match err.kind() {
        std::io::ErrorKind::NotFound => manifest_error::not_found(path),
        _ => BootstrapError::IoError {
            message: format!("Failed to read {}: {err}", path.display()),
        },
    }
}

/// Join continuation lines and strip comments, yielding non-empty lines with
/// the line number they start on.
fn logical_lines(content: &str) -> Vec<(usize, String)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = Vec::new();
    let mut buffer = String::new();
    let mut start = 0;

    for (idx, raw) in content.lines().enumerate() {
        if buffer.is_empty() {
            start = idx + 1;
        }
        let trimmed = raw.trim_end();
        if let Some(continued) = trimmed.strip_suffix('\\') {
            buffer.push_str(continued);
            continue;
        }
        buffer.push_str(trimmed);

        let line = strip_comment(&buffer).trim().to_string();
        if !line.is_empty() {
            lines.push((start, line));
        }
        buffer.clear();
    }

    let line = strip_comment(&buffer).trim().to_string();
    if !line.is_empty() {
        lines.push((start, line));
    }

    lines
}

fn strip_comment(line: &str) -> &str {
    let mut prev_ws = true;
    for (idx, c) in line.char_indices() {
        if c == '#' && prev_ws {
            return &line[..idx];
        }
        prev_ws = c.is_whitespace();
    }
    line
}

fn option_value<'a>(line: &'a str, short: &str, long: &str) -> Option<&'a str> {
    let rest = line
        .strip_prefix(long)
        .or_else(|| line.strip_prefix(short))?;
    let value = rest.strip_prefix('=').unwrap_or(rest).trim();
    (!value.is_empty()).then_some(value)
}

fn classify(line: &str) -> Line<'_> {
    if !line.starts_with('-') {
        return Line::Requirement;
    }
    if let Some(target) = option_value(line, "-r", "--requirement") {
        return Line::Include(target);
    }
    if let Some(target) = option_value(line, "-e", "--editable") {
        return Line::Editable(target);
    }
    Line::Option
}

/// Local paths, URLs and `${VAR}` expansions
fn is_direct_reference(line: &str) -> bool {
    line.contains(['/', '\\']) || line.starts_with(['.', '$'])
}

/// Package name of a requirement line, if it has a recognisable one
fn parse_name(line: &str) -> Option<String> {
    if is_direct_reference(line) {
        return None;
    }

    let name_len = line
        .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')))
        .unwrap_or(line.len());
    if name_len == 0 {
        return None;
    }
    let (name, rest) = line.split_at(name_len);

    let mut rest = rest.trim_start();
    if let Some(extras) = rest.strip_prefix('[') {
        let end = extras.find(']')?;
        rest = extras[end + 1..].trim_start();
    }

    match rest.chars().next() {
        Some(c) if !SPECIFIER_START.contains(&c) => None,
        _ => Some(name.to_string()),
    }
}
