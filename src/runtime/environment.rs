/// How a variable looks the first time it is referenced.
///
/// The policy only governs creation. Reads through the interpreter check
/// initialization the same way under both policies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InitPolicy {
    /// New variables start initialized to zero.
    #[default]
    EagerZero,
    /// New variables start uninitialized; they must be `clear`ed, copied
    /// into, or pre-seeded before they are read.
    RequireExplicitInit,
}

/// Handle to a variable in a [`VariableStore`]. Only valid for the store
/// that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(usize);

impl VarId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Variable {
    name: String,
    value: Option<u64>,
}

impl Variable {
    /// Spelling used at the first reference.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `None` until the variable has been assigned.
    pub fn value(&self) -> Option<u64> {
        self.value
    }

    pub fn is_initialized(&self) -> bool {
        self.value.is_some()
    }
}

/// Every variable referenced by a run, keyed by case-insensitive name.
///
/// Programs use a handful of variables, so lookup is a linear scan and
/// handles are indices in creation order. Variables are never removed.
#[derive(Clone, Debug, Default)]
pub struct VariableStore {
    policy: InitPolicy,
    variables: Vec<Variable>,
}

impl VariableStore {
    pub fn new(policy: InitPolicy) -> Self {
        Self {
            policy,
            variables: Vec::new(),
        }
    }

    pub fn policy(&self) -> InitPolicy {
        self.policy
    }

    pub fn lookup_or_create(&mut self, name: &str) -> VarId {
        if let Some(id) = self.find(name) {
            return id;
        }
        let value = match self.policy {
            InitPolicy::EagerZero => Some(0),
            InitPolicy::RequireExplicitInit => None,
        };
        self.variables.push(Variable {
            name: name.to_string(),
            value,
        });
        let id = VarId(self.variables.len() - 1);
        tracing::trace!(name, index = id.0, "created variable");
        id
    }

    /// Looks a variable up without creating it.
    pub fn find(&self, name: &str) -> Option<VarId> {
        self.variables
            .iter()
            .position(|variable| variable.name.eq_ignore_ascii_case(name))
            .map(VarId)
    }

    pub fn get(&self, id: VarId) -> &Variable {
        &self.variables[id.0]
    }

    /// Assigns `value` and marks the variable initialized.
    pub fn set(&mut self, id: VarId, value: u64) {
        self.variables[id.0].value = Some(value);
    }

    pub fn name(&self, id: VarId) -> &str {
        &self.variables[id.0].name
    }

    pub fn value(&self, id: VarId) -> Option<u64> {
        self.variables[id.0].value
    }

    /// Variables, most recently created first.
    pub fn iter(&self) -> impl Iterator<Item = &Variable> + '_ {
        self.variables.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let mut store = VariableStore::new(InitPolicy::EagerZero);
        let first = store.lookup_or_create("Count");
        let second = store.lookup_or_create("COUNT");
        let third = store.lookup_or_create("count");
        assert_eq!(first, second);
        assert_eq!(second, third);
        assert_eq!(store.len(), 1);
        assert_eq!(store.name(first), "Count");
    }

    #[test]
    fn eager_zero_creates_initialized_variables() {
        let mut store = VariableStore::new(InitPolicy::EagerZero);
        let x = store.lookup_or_create("X");
        assert_eq!(store.value(x), Some(0));
        assert!(store.get(x).is_initialized());
    }

    #[test]
    fn explicit_init_creates_uninitialized_variables() {
        let mut store = VariableStore::new(InitPolicy::RequireExplicitInit);
        let x = store.lookup_or_create("X");
        assert_eq!(store.value(x), None);
        assert!(!store.get(x).is_initialized());
    }

    #[test]
    fn set_initializes_regardless_of_policy() {
        let mut store = VariableStore::new(InitPolicy::RequireExplicitInit);
        let x = store.lookup_or_create("X");
        store.set(x, 37);
        assert_eq!(store.value(x), Some(37));
        assert!(store.get(x).is_initialized());
    }

    #[test]
    fn unreferenced_names_are_absent() {
        let mut store = VariableStore::new(InitPolicy::EagerZero);
        store.lookup_or_create("X");
        assert_eq!(store.find("Y"), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn iteration_is_most_recent_first() {
        let mut store = VariableStore::new(InitPolicy::EagerZero);
        store.lookup_or_create("A");
        store.lookup_or_create("B");
        store.lookup_or_create("a");
        store.lookup_or_create("C");
        let names: Vec<&str> = store.iter().map(Variable::name).collect();
        assert_eq!(names, vec!["C", "B", "A"]);
    }
}
