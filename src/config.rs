use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Precomputed course similarity matrix (JSON)
    #[serde(default = "default_similarity_matrix_path")]
    pub similarity_matrix_path: String,

    /// Skill prerequisite graph in node-link form (JSON)
    #[serde(default = "default_dependency_graph_path")]
    pub dependency_graph_path: String,

    /// Course and skill catalog seed file (JSON)
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// Origin allowed by the CORS layer
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_similarity_matrix_path() -> String {
    "models/similarity_matrix.json".to_string()
}

fn default_dependency_graph_path() -> String {
    "models/skill_dependency_graph.json".to_string()
}

fn default_catalog_path() -> String {
    "data/catalog.json".to_string()
}

fn default_cors_origin() -> String {
    "http://localhost:3000".to_string()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Address the HTTP listener binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
