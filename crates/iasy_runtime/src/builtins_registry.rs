use crate::Runtime;
use crate::builtins;
use crate::core::BuiltinFn;

pub struct BuiltinRegistry {
    entries: Vec<(&'static str, BuiltinFn)>,
}

impl BuiltinRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn register(&mut self, name: &'static str, fun: BuiltinFn) {
        self.entries.push((name, fun));
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(n, _)| n.to_string()).collect()
    }

    /// Define every registered builtin as a global of `rt`.
    pub fn install_into(self, rt: &mut Runtime) {
        for (name, fun) in self.entries {
            rt.define_builtin(name, fun);
        }
    }
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::new()
    }
}

pub trait BuiltinProvider {
    fn install(&self, registry: &mut BuiltinRegistry);
}

pub struct StdBuiltinProvider;

impl BuiltinProvider for StdBuiltinProvider {
    fn install(&self, registry: &mut BuiltinRegistry) {
        // object model
        registry.register("new", builtins::builtin_new);
        registry.register("extends", builtins::builtin_extends);
        registry.register("type", builtins::builtin_type);
        registry.register("same", builtins::builtin_same);
        registry.register("all", builtins::builtin_all);
        registry.register("any", builtins::builtin_any);
        // descriptors
        registry.register("getdescriptor", builtins::builtin_getdescriptor);
        registry.register("setdescriptor", builtins::builtin_setdescriptor);
        // raw access
        registry.register("rawget", builtins::builtin_rawget);
        registry.register("rawset", builtins::builtin_rawset);
        registry.register("rawequal", builtins::builtin_rawequal);
        registry.register("rawlen", builtins::builtin_rawlen);
        // iteration
        registry.register("next", builtins::builtin_next);
        registry.register("pairs", builtins::builtin_pairs);
        registry.register("ipairs", builtins::builtin_ipairs);
        // control
        registry.register("select", builtins::builtin_select);
        registry.register("assert", builtins::builtin_assert);
        registry.register("error", builtins::builtin_error);
        registry.register("pcall", builtins::builtin_pcall);
        registry.register("xpcall", builtins::builtin_xpcall);
    }
}
