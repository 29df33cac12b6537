//! Minimal CLI: schema + type name + documents → one verdict per document
use std::path::{Path as FsPath, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use rayon::prelude::*;
use serde_json::Value;

use crate::{CheckError, Definition, Kind, Schema};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// check JSON documents against a json-shape schema
#[derive(Parser, Debug)]
#[command(name = "json-shape", version)]
pub struct CommandLineInterface {
    /// log to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// check documents against a named type (or an inline JSON definition)
    Check(CheckOut),
    /// validate a schema file against the built-in meta-schema
    Lint(LintOut),
    /// list the builtin kind names
    Kinds,
    /// print the built-in meta-schema
    Meta,
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// treat input as newline-delimited JSON (NDJSON)
    #[arg(long, default_value_t = false)]
    ndjson: bool,

    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// JQ pre-process filter for each document.
    #[arg(long)]
    jq_expr: Option<String>,

    /// Inputs: literal paths, quoted glob patterns, or '-' for stdin (the default)
    #[arg(long, short, num_args = 1..)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct CheckOut {
    /// schema file: a JSON object of type name → definition
    #[arg(short, long)]
    schema: Option<PathBuf>,

    /// type to check against: a name, or a JSON definition such as '["array", {"contents": "point"}]'
    #[arg(short = 't', long = "type")]
    type_name: String,

    /// lint the schema against the meta-schema before checking
    #[arg(long)]
    lint: bool,

    #[command(flatten)]
    input_settings: InputSettings,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct LintOut {
    /// schema file to validate
    #[arg(short, long)]
    schema: PathBuf,
}

/// One decoded document plus where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub label: String,
    pub value: Value,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub passed: usize,
    pub failed: usize,
    pub broken: usize,
}

impl Tally {
    /// 2 when the schema is broken, 1 when any document fails, else 0.
    pub fn status(&self) -> u8 {
        if self.broken > 0 {
            2
        } else if self.failed > 0 {
            1
        } else {
            0
        }
    }

    pub fn exit_code(&self) -> ExitCode { ExitCode::from(self.status()) }
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_documents(&self) -> Result<Vec<Document>> {
        let mut out = Vec::new();
        let sources = if self.input.is_empty() { vec!["-".to_string()] } else { self.input.clone() };
        let (stdin, patterns): (Vec<String>, Vec<String>) = sources.into_iter().partition(|s| s == "-");
        if !stdin.is_empty() {
            let source = std::io::read_to_string(std::io::stdin()).context("failed to read stdin")?;
            self.process("<stdin>", &source, &mut out)?;
        }
        let source_paths = resolve_file_path_patterns(&patterns)
            .map_err(|e| anyhow::anyhow!("failed to resolve input file paths: {e}"))?;
        for source_path in source_paths {
            let label = source_path.to_string_lossy().to_string();
            let source = std::fs::read_to_string(&source_path)
                .with_context(|| format!("failed to read source file {label}"))?;
            self.process(&label, &source, &mut out)?;
        }
        Ok(out)
    }

    fn process(&self, label: &str, source: &str, out: &mut Vec<Document>) -> Result<()> {
        for doc in parse_documents(label, source, self.ndjson)? {
            let doc = match self.json_pointer.as_deref() {
                None => doc,
                Some(ptr) => {
                    let Some(value) = doc.value.pointer(ptr) else {
                        bail!("JSON pointer {ptr} selects nothing in {}", doc.label);
                    };
                    Document { label: doc.label, value: value.clone() }
                }
            };
            match self.jq_expr.as_deref() {
                None => out.push(doc),
                Some(jq_expr) => {
                    let results = crate::jq_exec::run_jaq(jq_expr, &doc.value).with_context(|| {
                        format!("failed to apply jq expression to {}", doc.label)
                    })?;
                    for (i, value) in results.into_iter().enumerate() {
                        out.push(Document { label: format!("{}#{i}", doc.label), value });
                    }
                }
            }
        }
        Ok(())
    }
}

impl CheckOut {
    fn definition(&self) -> Result<Definition> {
        if self.type_name.trim_start().starts_with('[') {
            let value: Value = serde_json::from_str(&self.type_name)
                .with_context(|| format!("--type is not valid JSON: {}", self.type_name))?;
            Ok(Definition::from_value(&value)?)
        } else {
            Ok(Definition::named(&self.type_name))
        }
    }

    fn run(&self) -> Result<ExitCode> {
        let schema = match &self.schema {
            Some(path) => {
                let document = read_json(path)?;
                if self.lint {
                    if let Err(error) = Schema::lint(&document) {
                        eprintln!("{} {}: {error}", "✗".red().bold(), path.display());
                        return Ok(ExitCode::from(2));
                    }
                }
                crate::path_de::from_value_with_path::<Schema>(document)
                    .map_err(|e| anyhow::anyhow!("invalid schema {}: {e}", path.display()))?
            }
            None => Schema::new(),
        };
        let definition = self.definition()?;
        let documents = self.input_settings.load_documents()?;
        tracing::info!(documents = documents.len(), types = schema.len(), %definition, "checking");

        let tally = check_all(&documents, &definition, &schema, |doc, outcome| {
            match outcome {
                Ok(()) => println!("{} {}", "✓".green().bold(), doc.label),
                Err(CheckError::Failure(failure)) => {
                    println!("{} {}: {failure}", "✗".red().bold(), doc.label)
                }
                Err(CheckError::Definition(error)) => {
                    println!("{} {}: schema error: {error}", "!".yellow().bold(), doc.label)
                }
            }
        });
        tracing::info!(passed = tally.passed, failed = tally.failed, broken = tally.broken, "done");
        Ok(tally.exit_code())
    }
}

impl LintOut {
    fn run(&self) -> Result<ExitCode> {
        let document = read_json(&self.schema)?;
        match Schema::lint(&document) {
            Ok(()) => {
                println!("{} {}", "✓".green().bold(), self.schema.display());
                Ok(ExitCode::SUCCESS)
            }
            Err(error) => {
                println!("{} {}: {error}", "✗".red().bold(), self.schema.display());
                Ok(ExitCode::from(1))
            }
        }
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn init_logging(&self) {
        let level = match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };
        let _ = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }

    pub fn run(&self) -> Result<ExitCode> {
        match &self.cmd {
            Command::Check(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(ExitCode::SUCCESS)
                }
                target.run()
            }
            Command::Lint(target) => target.run(),
            Command::Kinds => {
                for name in Kind::BUILTINS {
                    println!("{name}");
                }
                Ok(ExitCode::SUCCESS)
            }
            Command::Meta => {
                println!("{}", Schema::meta_source().trim_end());
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

/// Check every document in parallel, then report in input order.
pub fn check_all(
    documents: &[Document],
    definition: &Definition,
    schema: &Schema,
    mut report: impl FnMut(&Document, &Result<(), CheckError>),
) -> Tally {
    let outcomes: Vec<_> = documents
        .par_iter()
        .map(|doc| crate::check(&doc.value, definition, schema))
        .collect();
    let mut tally = Tally::default();
    for (doc, outcome) in documents.iter().zip(&outcomes) {
        match outcome {
            Ok(()) => tally.passed += 1,
            Err(CheckError::Failure(_)) => tally.failed += 1,
            Err(CheckError::Definition(_)) => tally.broken += 1,
        }
        report(doc, outcome);
    }
    tally
}

/// A whole file is one document; NDJSON yields one per non-blank line.
pub fn parse_documents(label: &str, source: &str, ndjson: bool) -> Result<Vec<Document>> {
    if !ndjson {
        let value = serde_json::from_str::<Value>(source)
            .with_context(|| format!("failed to parse JSON source file ({label})"))?;
        return Ok(vec![Document { label: label.to_string(), value }]);
    }
    let mut out = Vec::new();
    for (i, line) in source.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_label = format!("{label}:{}", i + 1);
        let value = serde_json::from_str::<Value>(line)
            .with_context(|| format!("failed to parse JSON line ({line_label})"))?;
        out.push(Document { label: line_label, value });
    }
    Ok(out)
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn read_json(path: &FsPath) -> Result<Value> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    crate::path_de::from_str_with_path::<Value>(&source)
        .map_err(|e| anyhow::anyhow!("failed to parse {}: {e}", path.display()))
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                matched_any = true;
                out.push(entry?);
            }
            if !matched_any {
                return Err(format!("glob pattern matched no files: {pattern}").into());
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
