/// Settings for an [`Engine`](super::Engine).
///
/// # Example
///
/// ```
/// use ltre::{Engine, EngineConfig};
///
/// let engine = Engine::with_config(
///     EngineConfig::new()
///         .with_title("weather")
///         .with_variable_marker('$')
///         .with_debugging(true),
/// );
/// assert_eq!(engine.config().title(), "weather");
/// ```
#[derive(Debug, Clone)]
pub struct EngineConfig {
    title: String,
    variable_marker: char,
    debugging: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: "LTRE".to_owned(),
            variable_marker: '?',
            debugging: false,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Name used in log events and the engine's `Display` output.
    #[must_use]
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_owned();
        self
    }

    /// Leading character that marks a symbol as a pattern variable when
    /// reading program text.
    #[must_use]
    pub fn with_variable_marker(mut self, marker: char) -> Self {
        self.variable_marker = marker;
        self
    }

    /// Report drain summaries at `info` level instead of `debug`.
    #[must_use]
    pub fn with_debugging(mut self, on: bool) -> Self {
        self.debugging = on;
        self
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn variable_marker(&self) -> char {
        self.variable_marker
    }

    #[must_use]
    pub fn debugging(&self) -> bool {
        self.debugging
    }
}
