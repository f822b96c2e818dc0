use serde::Deserialize;
use std::collections::HashMap;

use crate::{error::ArtifactError, models::CourseId};

/// On-disk layout of the similarity artifact
#[derive(Debug, Deserialize)]
pub struct SimilarityArtifact {
    pub item_ids: Vec<CourseId>,
    pub matrix: Vec<Vec<f64>>,
}

/// Read-only lookup over a precomputed course-to-course similarity matrix
#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    item_ids: Vec<CourseId>,
    index_of: HashMap<CourseId, usize>,
    matrix: Vec<Vec<f64>>,
}

impl SimilarityIndex {
    /// Validates the artifact: the matrix must be square, sized to the id list,
    /// and ids must map one-to-one onto rows.
    pub fn new(item_ids: Vec<CourseId>, matrix: Vec<Vec<f64>>) -> Result<Self, ArtifactError> {
        if matrix.len() != item_ids.len() {
            return Err(ArtifactError::Invalid(format!(
                "similarity matrix has {} rows but {} item ids",
                matrix.len(),
                item_ids.len()
            )));
        }

        if let Some((row, values)) = matrix
            .iter()
            .enumerate()
            .find(|(_, values)| values.len() != item_ids.len())
        {
            return Err(ArtifactError::Invalid(format!(
                "similarity matrix row {} has {} columns, expected {}",
                row,
                values.len(),
                item_ids.len()
            )));
        }

        let mut index_of = HashMap::with_capacity(item_ids.len());
        for (idx, id) in item_ids.iter().enumerate() {
            if index_of.insert(*id, idx).is_some() {
                return Err(ArtifactError::Invalid(format!(
                    "item id {} appears more than once in the similarity index",
                    id
                )));
            }
        }

        Ok(Self {
            item_ids,
            index_of,
            matrix,
        })
    }

    pub fn from_artifact(artifact: SimilarityArtifact) -> Result<Self, ArtifactError> {
        Self::new(artifact.item_ids, artifact.matrix)
    }

    pub fn len(&self) -> usize {
        self.item_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.item_ids.is_empty()
    }

    /// Returns up to `k` course ids most similar to `item_id`, best first.
    ///
    /// The query course is never part of the result. Equal scores keep matrix
    /// order. Unknown ids yield an empty list.
    pub fn get_similar(&self, item_id: CourseId, k: usize) -> Vec<CourseId> {
        let Some(&idx) = self.index_of.get(&item_id) else {
            return Vec::new();
        };

        let mut scored: Vec<(usize, f64)> = self.matrix[idx]
            .iter()
            .copied()
            .enumerate()
            .filter(|(j, score)| *j != idx && score.is_finite())
            .collect();

        // Stable: ties stay in ascending index order
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        scored
            .into_iter()
            .take(k)
            .map(|(j, _)| self.item_ids[j])
            .collect()
    }
}
