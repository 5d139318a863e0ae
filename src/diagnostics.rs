use crate::{
    config::{ConfigError, USAGE},
    language::errors::SyntaxError,
    runtime::error::RuntimeError,
};
use miette::{Diagnostic, NamedSource, Report, SourceSpan};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic, Clone)]
#[error("{message}")]
#[diagnostic(code(barebones::syntax))]
pub struct SyntaxDiagnostic {
    #[source_code]
    src: NamedSource<String>,
    #[label("{label}")]
    span: SourceSpan,
    #[help]
    help: Option<String>,
    message: String,
    label: String,
}

impl SyntaxDiagnostic {
    pub fn from_error(src: NamedSource<String>, err: SyntaxError) -> Self {
        Self {
            src,
            span: err.to_source_span(),
            help: err.help,
            message: err.message,
            label: err.label,
        }
    }
}

#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(barebones::runtime))]
pub struct RuntimeDiagnostic {
    #[source_code]
    src: NamedSource<String>,
    #[label("{label}")]
    span: SourceSpan,
    #[help]
    help: Option<String>,
    message: String,
    label: String,
}

impl RuntimeDiagnostic {
    pub fn from_error(src: NamedSource<String>, err: &RuntimeError) -> Self {
        Self {
            src,
            span: err.span().into(),
            help: err.help(),
            message: err.to_string(),
            label: err.label(),
        }
    }
}

fn named_source(path: &Path, source: &str) -> NamedSource<String> {
    NamedSource::new(path.display().to_string(), source.to_string())
}

pub fn emit_syntax_errors(path: &Path, source: &str, errors: &[SyntaxError]) {
    let src = named_source(path, source);
    for err in errors {
        let diagnostic = SyntaxDiagnostic::from_error(src.clone(), err.clone());
        eprintln!("{:?}", Report::new(diagnostic));
    }
    eprintln!(
        "error: parse failed with {} error{}",
        errors.len(),
        if errors.len() == 1 { "" } else { "s" }
    );
}

pub fn report_runtime_error(path: &Path, source: &str, error: &RuntimeError) {
    let diagnostic = RuntimeDiagnostic::from_error(named_source(path, source), error);
    eprintln!("{:?}", Report::new(diagnostic));
}

pub fn report_config_error(error: &ConfigError) {
    eprintln!("error: {}", error);
    eprintln!("{}", USAGE);
}

pub fn report_io_error(path: &Path, error: &std::io::Error) {
    eprintln!("error: can't read program {}: {}", path.display(), error);
}
