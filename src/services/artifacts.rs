use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::{config::Config, error::ArtifactError, models::NodeLinkGraph};

use super::graph::DependencyGraph;
use super::similarity::{SimilarityArtifact, SimilarityIndex};

/// Offline artifacts loaded once at startup and shared read-only afterwards
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub similarity: Option<SimilarityIndex>,
    pub dependency_graph: Option<DependencyGraph>,
    pub loaded_at: DateTime<Utc>,
}

impl Artifacts {
    /// Loads every artifact named by the configuration.
    ///
    /// A missing or malformed artifact is logged and left unset so the service
    /// can still start; the features depending on it return empty results.
    pub fn load(config: &Config) -> Self {
        let similarity = load_similarity(&config.similarity_matrix_path)
            .map_err(|e| {
                tracing::warn!(
                    path = %config.similarity_matrix_path,
                    error = %e,
                    "Similarity matrix unavailable, content-based recommendations disabled"
                );
            })
            .ok();

        let dependency_graph = load_dependency_graph(&config.dependency_graph_path)
            .map_err(|e| {
                tracing::warn!(
                    path = %config.dependency_graph_path,
                    error = %e,
                    "Dependency graph unavailable, personalized paths disabled"
                );
            })
            .ok();

        Self {
            similarity,
            dependency_graph,
            loaded_at: Utc::now(),
        }
    }

    /// No artifacts at all
    pub fn empty() -> Self {
        Self {
            similarity: None,
            dependency_graph: None,
            loaded_at: Utc::now(),
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    if !path.exists() {
        return Err(ArtifactError::Missing(path.display().to_string()));
    }
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Reads `{ "item_ids": [...], "matrix": [[...]] }`
pub fn load_similarity(path: impl AsRef<Path>) -> Result<SimilarityIndex, ArtifactError> {
    let artifact: SimilarityArtifact = read_json(path.as_ref())?;
    let index = SimilarityIndex::from_artifact(artifact)?;
    tracing::info!(items = index.len(), "Similarity matrix loaded");
    Ok(index)
}

/// Reads the node-link prerequisite graph
pub fn load_dependency_graph(path: impl AsRef<Path>) -> Result<DependencyGraph, ArtifactError> {
    let data: NodeLinkGraph = read_json(path.as_ref())?;
    let graph = DependencyGraph::from_node_link(data)?;
    tracing::info!(
        skills = graph.node_count(),
        prerequisites = graph.edge_count(),
        "Dependency graph loaded"
    );
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn json_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn config_with(similarity: &str, graph: &str) -> Config {
        let vars = vec![
            ("SIMILARITY_MATRIX_PATH".to_string(), similarity.to_string()),
            ("DEPENDENCY_GRAPH_PATH".to_string(), graph.to_string()),
        ];
        envy::from_iter(vars).unwrap()
    }

    #[test]
    fn test_load_similarity() {
        let file = json_file(r#"{"item_ids": [1, 2], "matrix": [[1.0, 0.3], [0.3, 1.0]]}"#);
        let index = load_similarity(file.path()).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.get_similar(1, 10), vec![2]);
    }

    #[test]
    fn test_load_similarity_missing() {
        let result = load_similarity("/nonexistent/similarity.json");
        assert!(matches!(result, Err(ArtifactError::Missing(_))));
    }

    #[test]
    fn test_load_similarity_malformed() {
        let file = json_file("not json");
        assert!(matches!(
            load_similarity(file.path()),
            Err(ArtifactError::Parse(_))
        ));
    }

    #[test]
    fn test_load_dependency_graph() {
        let file = json_file(
            r#"{"nodes": [{"id": "sql"}, {"id": "statistics"}],
                "links": [{"source": "sql", "target": "statistics"}]}"#,
        );
        let graph = load_dependency_graph(file.path()).unwrap();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_load_degrades_when_artifacts_missing() {
        let config = config_with("/nonexistent/a.json", "/nonexistent/b.json");
        let artifacts = Artifacts::load(&config);
        assert!(artifacts.similarity.is_none());
        assert!(artifacts.dependency_graph.is_none());
    }

    #[test]
    fn test_load_keeps_valid_artifact_when_other_is_invalid() {
        let graph = json_file(r#"{"nodes": [{"id": "sql"}], "links": []}"#);
        let similarity = json_file(r#"{"item_ids": [1], "matrix": []}"#);
        let config = config_with(
            similarity.path().to_str().unwrap(),
            graph.path().to_str().unwrap(),
        );

        let artifacts = Artifacts::load(&config);
        assert!(artifacts.similarity.is_none());
        assert!(artifacts.dependency_graph.is_some());
    }
}
