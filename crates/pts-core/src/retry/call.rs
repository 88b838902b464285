//! Description of a wrapped call, kept only for log lines.

use std::fmt;

/// Identity and arguments of the operation being retried.
///
/// Arguments are rendered once with `Debug` when added. As with a method
/// call, the first positional argument is treated as the receiver and is
/// left out of [`Call::last_call`]; use [`Call::receiver`] to record it
/// without formatting it at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Call {
    module: String,
    name: String,
    args: Vec<String>,
    kwargs: Vec<(String, String)>,
}

impl Call {
    /// `module` is usually `module_path!()` at the call site.
    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
            args: Vec::new(),
            kwargs: Vec::new(),
        }
    }

    /// Placeholder for the receiver (`self`), which is never rendered.
    pub fn receiver(mut self) -> Self {
        self.args.push("self".to_string());
        self
    }

    pub fn arg(mut self, value: impl fmt::Debug) -> Self {
        self.args.push(format!("{:?}", value));
        self
    }

    pub fn kwarg(mut self, key: impl Into<String>, value: impl fmt::Debug) -> Self {
        self.kwargs.push((key.into(), format!("{:?}", value)));
        self
    }

    /// `module.name`, used in retry warnings.
    pub fn target(&self) -> String {
        format!("{}.{}", self.module, self.name)
    }

    /// `module.name([args without the first], {k: v, ...})`.
    pub fn last_call(&self) -> String {
        let args = self.args.iter().skip(1).cloned().collect::<Vec<_>>().join(", ");
        let kwargs = self
            .kwargs
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}([{}], {{{}}})", self.target(), args, kwargs)
    }
}
