use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Flareline";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when RUST_LOG is not set
pub fn default_log_filter() -> &'static str {
    "flareline=info"
}

/// Get the application data directory
/// ~/Flareline/ on all platforms (user-visible)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Flareline")
}

/// Get the SQLite database path
pub fn database_path() -> PathBuf {
    app_data_dir().join("flareline.db")
}

/// Runtime settings loaded from environment variables.
///
/// All tuneable knobs (bind address, Ollama endpoint, model names) live here
/// so the rest of the codebase stays environment-agnostic.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Address the API server binds to.
    pub bind_addr: String,
    /// Base URL of the local Ollama instance.
    pub ollama_base_url: String,
    /// Model answering physician queries.
    pub doctor_model: String,
    /// Model answering patient queries.
    pub patient_model: String,
    /// Request timeout for assistant generation, in seconds.
    pub ollama_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8787".into(),
            ollama_base_url: "http://localhost:11434".into(),
            doctor_model: "gemma3-doctor:latest".into(),
            patient_model: "gemma3-patient:latest".into(),
            ollama_timeout_secs: 300,
        }
    }
}

impl Settings {
    /// Load settings, letting environment variables override the defaults.
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        if let Ok(v) = std::env::var("FLARELINE_BIND_ADDR") {
            settings.bind_addr = v;
        }
        if let Ok(v) = std::env::var("OLLAMA_BASE_URL") {
            settings.ollama_base_url = v;
        }
        if let Ok(v) = std::env::var("FLARELINE_DOCTOR_MODEL") {
            settings.doctor_model = v;
        }
        if let Ok(v) = std::env::var("FLARELINE_PATIENT_MODEL") {
            settings.patient_model = v;
        }
        if let Ok(v) = std::env::var("FLARELINE_OLLAMA_TIMEOUT_SECS") {
            if let Ok(secs) = v.parse() {
                settings.ollama_timeout_secs = secs;
            }
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("Flareline"));
    }

    #[test]
    fn database_path_under_app_data() {
        let db = database_path();
        assert!(db.starts_with(app_data_dir()));
        assert!(db.ends_with("flareline.db"));
    }

    #[test]
    fn default_settings_point_at_local_ollama() {
        let settings = Settings::default();
        assert_eq!(settings.ollama_base_url, "http://localhost:11434");
        assert_eq!(settings.doctor_model, "gemma3-doctor:latest");
        assert_eq!(settings.patient_model, "gemma3-patient:latest");
    }

    #[test]
    fn app_name_is_flareline() {
        assert_eq!(APP_NAME, "Flareline");
    }
}
