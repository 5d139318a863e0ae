use crate::language::ast::{Program, Statement, StatementKind};
use crate::runtime::{
    environment::{VarId, VariableStore},
    error::{RuntimeError, RuntimeResult},
};

/// Tree-walking executor. Owns the variable store for the duration of a
/// run; the store can be taken back with [`Interpreter::into_store`].
pub struct Interpreter {
    store: VariableStore,
    line: usize,
    steps: u64,
}

impl Interpreter {
    pub fn new(store: VariableStore) -> Self {
        Self {
            store,
            line: 0,
            steps: 0,
        }
    }

    pub fn store(&self) -> &VariableStore {
        &self.store
    }

    pub fn into_store(self) -> VariableStore {
        self.store
    }

    /// Line of the statement most recently started, 0 before the first.
    pub fn current_line(&self) -> usize {
        self.line
    }

    /// Statements executed so far, loop bodies counted per iteration.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn run(&mut self, program: &Program) -> RuntimeResult<()> {
        let result = self.execute_block(&program.statements);
        tracing::debug!(
            steps = self.steps,
            line = self.line,
            ok = result.is_ok(),
            "execution finished"
        );
        result
    }

    pub fn execute_block(&mut self, block: &[Statement]) -> RuntimeResult<()> {
        for statement in block {
            self.execute(statement)?;
        }
        Ok(())
    }

    pub fn execute(&mut self, statement: &Statement) -> RuntimeResult<()> {
        self.line = statement.line;
        self.steps += 1;
        tracing::trace!(line = statement.line, kind = ?statement.kind, "execute");

        match &statement.kind {
            StatementKind::Clear(var) => {
                self.store.set(*var, 0);
            }
            StatementKind::Incr(var) => {
                let value = self.read(*var, statement)?;
                let next = value
                    .checked_add(1)
                    .ok_or_else(|| self.overflow(*var, statement))?;
                self.store.set(*var, next);
            }
            StatementKind::Decr(var) => {
                let value = self.read(*var, statement)?;
                self.store.set(*var, value.saturating_sub(1));
            }
            StatementKind::While { control, body } => {
                while self.read(*control, statement)? != 0 {
                    self.execute_block(body)?;
                }
            }
            StatementKind::Copy { src, dest } => {
                let value = self.read(*src, statement)?;
                self.store.set(*dest, value);
            }
            StatementKind::AddClear { src, dest } => {
                let amount = self.read(*src, statement)?;
                let total = self.read(*dest, statement)?;
                let sum = total
                    .checked_add(amount)
                    .ok_or_else(|| self.overflow(*dest, statement))?;
                self.store.set(*dest, sum);
                self.store.set(*src, 0);
            }
        }
        Ok(())
    }

    fn read(&self, var: VarId, statement: &Statement) -> RuntimeResult<u64> {
        self.store
            .value(var)
            .ok_or_else(|| RuntimeError::UninitializedVariable {
                name: self.store.name(var).to_string(),
                line: statement.line,
                span: statement.span,
            })
    }

    fn overflow(&self, var: VarId, statement: &Statement) -> RuntimeError {
        RuntimeError::Overflow {
            name: self.store.name(var).to_string(),
            line: statement.line,
            span: statement.span,
        }
    }
}
