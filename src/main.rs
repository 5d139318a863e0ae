use barebones::{
    config::{Command, RunConfig, USAGE},
    diagnostics, language, logging, optimizer, report,
    runtime::{Interpreter, VariableStore},
};
use std::fs;
use std::io::{self, Write};
use std::process::ExitCode;

enum Failure {
    /// Bad invocation, bad pre-seed value, or unreadable program file.
    Usage,
    Runtime,
    Syntax,
    Output(io::Error),
}

impl Failure {
    fn exit_code(&self) -> ExitCode {
        match self {
            Failure::Usage | Failure::Output(_) => ExitCode::from(1),
            Failure::Runtime => ExitCode::from(2),
            Failure::Syntax => ExitCode::from(3),
        }
    }
}

impl From<io::Error> for Failure {
    fn from(err: io::Error) -> Self {
        Failure::Output(err)
    }
}

fn main() -> ExitCode {
    logging::init_tracing();

    let config = match Command::from_args(std::env::args().skip(1)) {
        Ok(Command::Run(config)) => config,
        Ok(Command::Help) => {
            println!("{}", USAGE);
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            diagnostics::report_config_error(&err);
            return Failure::Usage.exit_code();
        }
    };

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => {
            if let Failure::Output(err) = &failure {
                eprintln!("error: can't write results: {}", err);
            }
            failure.exit_code()
        }
    }
}

fn run(config: &RunConfig) -> Result<(), Failure> {
    let source = fs::read_to_string(&config.program).map_err(|err| {
        diagnostics::report_io_error(&config.program, &err);
        Failure::Usage
    })?;

    let mut store = VariableStore::new(config.policy);
    for initializer in &config.initializers {
        let id = store.lookup_or_create(&initializer.name);
        store.set(id, initializer.value);
    }

    let mut program = language::parse(&source, &mut store).map_err(|errors| {
        diagnostics::emit_syntax_errors(&config.program, &source, &errors.errors);
        Failure::Syntax
    })?;

    if config.optimize {
        optimizer::optimize(&mut program);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report::write_initial(&mut out, &store)?;
    out.flush()?;

    let mut interpreter = Interpreter::new(store);
    if let Err(err) = interpreter.run(&program) {
        diagnostics::report_runtime_error(&config.program, &source, &err);
        return Err(Failure::Runtime);
    }

    report::write_final(&mut out, interpreter.store())?;
    out.flush()?;
    Ok(())
}
