use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::summarizer::providers::HUGGINGFACE_ENDPOINT;
use crate::summarizer::{GenerationParams, SummarizerProvider, CHUNK_SIZE};

/// Configuration for the summarization service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings
    pub server: ServerConfig,

    /// yt-dlp extractor settings
    pub extractor: ExtractorConfig,

    /// Subtitle track selection and download settings
    pub subtitles: SubtitleConfig,

    /// Summarization model settings
    pub summarizer: SummarizerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Directory served under `/static`
    pub static_dir: PathBuf,

    /// File inside `static_dir` returned for `/`
    pub index_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Path or name of the yt-dlp binary
    pub ytdlp_path: PathBuf,

    /// Optional cookies file handed to yt-dlp
    pub cookies_path: Option<PathBuf>,

    /// Kill yt-dlp after this many seconds (unset = wait forever)
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtitleConfig {
    /// Language picked first when available
    pub preferred_language: String,

    /// Subtitle format requested from the extractor
    pub format: String,

    /// Timeout for the subtitle download (unset = no timeout)
    pub request_timeout_seconds: Option<u64>,
}

/// Summarization model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizerConfig {
    /// Inference backend
    pub provider: SummarizerProvider,

    /// Base endpoint; the model name is appended for Hugging Face
    pub endpoint: Option<String>,

    /// API token (Hugging Face)
    pub api_key: Option<String>,

    /// Pretrained model to use
    pub model: String,

    /// Characters per chunk fed to the model
    pub chunk_size: usize,

    /// Maximum summary length in tokens
    pub max_length: u32,

    /// Minimum summary length in tokens
    pub min_length: u32,

    /// Sampling during decoding (false = greedy, deterministic)
    pub do_sample: bool,

    /// Request timeout in seconds (unset = no timeout)
    pub timeout_seconds: Option<u64>,
}

impl SummarizerConfig {
    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams {
            max_length: self.max_length,
            min_length: self.min_length,
            do_sample: self.do_sample,
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load() -> Result<Self> {
        // Try to load from various locations
        let config_paths = [
            "yt-summarizer.toml",
            "config/yt-summarizer.toml",
            "/etc/yt-summarizer/config.toml",
        ];

        match Self::load_first(&config_paths) {
            Some(config) => Ok(config),
            None => Self::from_env(),
        }
    }

    /// First readable and parseable file among `paths`
    fn load_first<P: AsRef<Path>>(paths: &[P]) -> Option<Self> {
        for path in paths {
            let path = path.as_ref();
            if let Ok(config_str) = std::fs::read_to_string(path) {
                match toml::from_str(&config_str) {
                    Ok(config) => {
                        tracing::info!("📄 Loaded configuration from: {}", path.display());
                        return Some(config);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
                    }
                }
            }
        }
        None
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        tracing::info!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("YT_SUMMARIZER_HOST") {
            config.server.host = host;
        }

        if let Ok(port) = std::env::var("YT_SUMMARIZER_PORT") {
            config.server.port = port
                .parse()
                .with_context(|| format!("Invalid YT_SUMMARIZER_PORT: {}", port))?;
        }

        if let Ok(static_dir) = std::env::var("YT_SUMMARIZER_STATIC_DIR") {
            config.server.static_dir = PathBuf::from(static_dir);
        }

        if let Ok(ytdlp_path) = std::env::var("YT_SUMMARIZER_YTDLP_PATH") {
            config.extractor.ytdlp_path = PathBuf::from(ytdlp_path);
        }

        if let Ok(model) = std::env::var("YT_SUMMARIZER_MODEL") {
            config.summarizer.model = model;
        }

        if let Ok(endpoint) = std::env::var("YT_SUMMARIZER_ENDPOINT") {
            config.summarizer.endpoint = Some(endpoint);
        }

        if let Ok(api_key) = std::env::var("HF_API_TOKEN") {
            config.summarizer.api_key = Some(api_key);
        }

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let config_str = toml::to_string_pretty(self)?;
        std::fs::write(path, config_str)?;
        tracing::info!("💾 Configuration saved to: {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.summarizer.chunk_size == 0 {
            return Err(anyhow!("chunk_size must be greater than 0"));
        }

        if self.summarizer.min_length > self.summarizer.max_length {
            return Err(anyhow!(
                "min_length ({}) must not exceed max_length ({})",
                self.summarizer.min_length,
                self.summarizer.max_length
            ));
        }

        if self.summarizer.model.trim().is_empty() {
            return Err(anyhow!("summarizer model must be set"));
        }

        if self.summarizer.provider == SummarizerProvider::Local
            && self.summarizer.endpoint.is_none()
        {
            return Err(anyhow!("endpoint required for local summarization pipeline"));
        }

        if self.subtitles.preferred_language.trim().is_empty() {
            return Err(anyhow!("preferred_language must be set"));
        }

        if !self.server.static_dir.exists() {
            tracing::warn!(
                "Static directory {} does not exist, static routes will return 404",
                self.server.static_dir.display()
            );
        }

        tracing::info!("✅ Configuration validation passed");
        Ok(())
    }

    /// Get runtime configuration summary
    pub fn summary(&self) -> String {
        format!(
            "YouTube Summarizer Configuration:\n\
            - Listen: {}:{}\n\
            - Static Directory: {}\n\
            - yt-dlp: {}\n\
            - Subtitle Language: {} ({})\n\
            - Summarizer: {:?} / {}\n\
            - Chunk Size: {} chars\n\
            - Summary Length: {}-{} tokens",
            self.server.host,
            self.server.port,
            self.server.static_dir.display(),
            self.extractor.ytdlp_path.display(),
            self.subtitles.preferred_language,
            self.subtitles.format,
            self.summarizer.provider,
            self.summarizer.model,
            self.summarizer.chunk_size,
            self.summarizer.min_length,
            self.summarizer.max_length
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                static_dir: PathBuf::from("static"),
                index_file: "index.html".to_string(),
            },
            extractor: ExtractorConfig {
                ytdlp_path: PathBuf::from("yt-dlp"),
                cookies_path: None,
                timeout_seconds: None,
            },
            subtitles: SubtitleConfig {
                preferred_language: "en".to_string(),
                format: "json3".to_string(),
                request_timeout_seconds: None,
            },
            summarizer: SummarizerConfig {
                provider: SummarizerProvider::HuggingFace,
                endpoint: Some(HUGGINGFACE_ENDPOINT.to_string()),
                api_key: None,
                model: "facebook/bart-large-cnn".to_string(),
                chunk_size: CHUNK_SIZE,
                max_length: 150,
                min_length: 40,
                do_sample: false,
                timeout_seconds: None,
            },
        }
    }
}

/// Configuration builder for programmatic config creation
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn with_host(mut self, host: String) -> Self {
        self.config.server.host = host;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.config.server.port = port;
        self
    }

    pub fn with_static_dir(mut self, dir: PathBuf) -> Self {
        self.config.server.static_dir = dir;
        self
    }

    pub fn with_ytdlp_path(mut self, path: PathBuf) -> Self {
        self.config.extractor.ytdlp_path = path;
        self
    }

    pub fn with_provider(mut self, provider: SummarizerProvider) -> Self {
        self.config.summarizer.provider = provider;
        self
    }

    pub fn with_endpoint(mut self, endpoint: String) -> Self {
        self.config.summarizer.endpoint = Some(endpoint);
        self
    }

    pub fn with_api_key(mut self, api_key: String) -> Self {
        self.config.summarizer.api_key = Some(api_key);
        self
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.config.summarizer.model = model;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.summarizer.chunk_size, 1024);
        assert_eq!(config.summarizer.max_length, 150);
        assert_eq!(config.summarizer.min_length, 40);
        assert!(!config.summarizer.do_sample);
        assert_eq!(config.subtitles.preferred_language, "en");
        assert_eq!(config.subtitles.format, "json3");
        assert!(config.subtitles.request_timeout_seconds.is_none());
    }

    #[test]
    fn test_default_endpoint_is_hosted_inference() {
        let config = Config::default();
        assert_eq!(config.summarizer.provider, SummarizerProvider::HuggingFace);
        assert_eq!(config.summarizer.endpoint.as_deref(), Some(HUGGINGFACE_ENDPOINT));
    }

    #[test]
    fn test_config_builder() {
        let config = ConfigBuilder::new()
            .with_host("127.0.0.1".to_string())
            .with_port(9000)
            .with_static_dir(PathBuf::from("/srv/ui"))
            .with_ytdlp_path(PathBuf::from("/opt/bin/yt-dlp"))
            .with_provider(SummarizerProvider::Local)
            .with_endpoint("http://localhost:8080/summarize".to_string())
            .with_api_key("hf_secret".to_string())
            .build();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.static_dir, PathBuf::from("/srv/ui"));
        assert_eq!(config.extractor.ytdlp_path, PathBuf::from("/opt/bin/yt-dlp"));
        assert_eq!(config.summarizer.provider, SummarizerProvider::Local);
        assert_eq!(
            config.summarizer.endpoint.as_deref(),
            Some("http://localhost:8080/summarize")
        );
        assert_eq!(config.summarizer.api_key.as_deref(), Some("hf_secret"));
        assert!(config.validate().is_ok());
    }

    const ENV_VARS: [&str; 7] = [
        "YT_SUMMARIZER_HOST",
        "YT_SUMMARIZER_PORT",
        "YT_SUMMARIZER_STATIC_DIR",
        "YT_SUMMARIZER_YTDLP_PATH",
        "YT_SUMMARIZER_MODEL",
        "YT_SUMMARIZER_ENDPOINT",
        "HF_API_TOKEN",
    ];

    // Environment is process-wide, so every from_env case lives in this one test
    #[test]
    fn test_from_env() {
        for var in ENV_VARS {
            std::env::remove_var(var);
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.server.port, 8000);
        assert!(config.summarizer.api_key.is_none());

        std::env::set_var("YT_SUMMARIZER_HOST", "127.0.0.1");
        std::env::set_var("YT_SUMMARIZER_PORT", "9100");
        std::env::set_var("YT_SUMMARIZER_STATIC_DIR", "/srv/static");
        std::env::set_var("YT_SUMMARIZER_YTDLP_PATH", "/usr/local/bin/yt-dlp");
        std::env::set_var("YT_SUMMARIZER_MODEL", "sshleifer/distilbart-cnn-12-6");
        std::env::set_var("YT_SUMMARIZER_ENDPOINT", "http://localhost:8080/models");
        std::env::set_var("HF_API_TOKEN", "hf_env_token");

        let config = Config::from_env().unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.static_dir, PathBuf::from("/srv/static"));
        assert_eq!(config.extractor.ytdlp_path, PathBuf::from("/usr/local/bin/yt-dlp"));
        assert_eq!(config.summarizer.model, "sshleifer/distilbart-cnn-12-6");
        assert_eq!(
            config.summarizer.endpoint.as_deref(),
            Some("http://localhost:8080/models")
        );
        assert_eq!(config.summarizer.api_key.as_deref(), Some("hf_env_token"));

        std::env::set_var("YT_SUMMARIZER_PORT", "not-a-port");
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("Invalid YT_SUMMARIZER_PORT"));

        for var in ENV_VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_load_first_skips_missing_and_unparseable_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let broken = dir.path().join("broken.toml");
        let good = dir.path().join("good.toml");

        std::fs::write(&broken, "server = \"not a table\"").unwrap();
        ConfigBuilder::new().with_port(8555).build().save(&good).unwrap();

        let loaded = Config::load_first(&[&missing, &broken, &good]).unwrap();
        assert_eq!(loaded.server.port, 8555);

        assert!(Config::load_first(&[&missing, &broken]).is_none());
    }

    #[test]
    fn test_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());

        let mut bad = Config::default();
        bad.summarizer.min_length = 200;
        assert!(bad.validate().is_err());

        let mut local_without_endpoint = Config::default();
        local_without_endpoint.summarizer.provider = SummarizerProvider::Local;
        local_without_endpoint.summarizer.endpoint = None;
        assert!(local_without_endpoint.validate().is_err());
    }

    #[test]
    fn test_generation_params_from_config() {
        let params = Config::default().summarizer.generation_params();
        assert_eq!(params, GenerationParams::default());
    }

    #[test]
    fn test_save_and_load_roundtrip_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("yt-summarizer.toml");

        let config = ConfigBuilder::new()
            .with_port(8123)
            .with_model("sshleifer/distilbart-cnn-12-6".to_string())
            .build();
        config.save(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.server.port, 8123);
        assert_eq!(loaded.summarizer.model, "sshleifer/distilbart-cnn-12-6");
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let result = Config::load_from(Path::new("/nonexistent/yt-summarizer.toml"));
        assert!(result.is_err());
    }
}
