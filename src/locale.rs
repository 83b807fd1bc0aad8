//! Display strings injected into the renderers.
//!
//! Both renderers take a `Labels` value instead of reaching for a global
//! translation lookup, so a localized build only has to construct a different
//! set of strings.

#[derive(Debug, Clone)]
pub struct Labels {
    pub app_name: String,
    pub date: String,
    pub word_count: String,
    pub daily: String,
    pub with_unused: String,
    pub increment: String,
    pub word_count_log: String,
    pub by: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            app_name: "Daily progress log".into(),
            date: "Date".into(),
            word_count: "Word count".into(),
            daily: "Daily".into(),
            with_unused: "With unused".into(),
            increment: "increment".into(),
            word_count_log: "Word count log".into(),
            by: "by".into(),
        }
    }
}
