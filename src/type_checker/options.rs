/// Settings for one analysis session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Label of the procedure holding the program body.
    pub entry_label: String,
    /// Bind `print`, `chr`, `substring` and the other runtime procedures.
    pub with_runtime_library: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            entry_label: String::from("main"),
            with_runtime_library: true,
        }
    }
}
