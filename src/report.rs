use crate::runtime::environment::VariableStore;
use std::io::{self, Write};

/// Writes one `NAME: VALUE` line per variable, most recently created
/// first. Uninitialized variables are listed only when
/// `show_uninitialized` is set.
pub fn write_variables<W: Write>(
    out: &mut W,
    store: &VariableStore,
    show_uninitialized: bool,
) -> io::Result<()> {
    for variable in store.iter() {
        match variable.value() {
            Some(value) => writeln!(out, "{}: {}", variable.name(), value)?,
            None if show_uninitialized => writeln!(out, "{}: uninitialized", variable.name())?,
            None => {}
        }
    }
    Ok(())
}

pub fn write_initial<W: Write>(out: &mut W, store: &VariableStore) -> io::Result<()> {
    writeln!(out, "initial values of variables:")?;
    write_variables(out, store, false)
}

pub fn write_final<W: Write>(out: &mut W, store: &VariableStore) -> io::Result<()> {
    writeln!(out, "final values of variables:")?;
    write_variables(out, store, true)
}
