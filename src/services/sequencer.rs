use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use crate::models::CandidateScore;

use super::graph::{DependencyGraph, TopoOrder};

/// Maximum length of a personalized path
pub const MAX_PATH_LENGTH: usize = 20;

/// Which ordering strategy produced a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceStrategy {
    Topological,
    DifficultyFallback,
}

/// Ordered, truncated candidates
#[derive(Debug, Clone)]
pub struct SequencedPath {
    pub strategy: SequenceStrategy,
    pub candidates: Vec<CandidateScore>,
}

/// Orders scored candidates by where their skills fall in a topological order
/// of the prerequisite graph restricted to the skills at hand. When that
/// subgraph has a cycle, candidates are ordered by difficulty tier and score.
pub struct PathSequencer<'a> {
    graph: &'a DependencyGraph,
    limit: usize,
}

impl<'a> PathSequencer<'a> {
    pub fn new(graph: &'a DependencyGraph) -> Self {
        Self {
            graph,
            limit: MAX_PATH_LENGTH,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Orders candidates and keeps the first `limit`. Never fails: a cyclic
    /// subgraph switches to the difficulty fallback.
    pub fn sequence(&self, mut candidates: Vec<CandidateScore>) -> SequencedPath {
        let relevant: BTreeSet<String> = candidates
            .iter()
            .flat_map(|c| c.skill_names.iter().cloned())
            .collect();
        let subgraph = self.graph.induced_subgraph(&relevant);

        let strategy = match subgraph.topological_order() {
            TopoOrder::Sorted(order) => {
                let rank: HashMap<&str, usize> = order
                    .iter()
                    .enumerate()
                    .map(|(pos, skill)| (skill.as_str(), pos))
                    .collect();
                for candidate in &mut candidates {
                    candidate.topo_rank = mean_rank(&candidate.skill_names, &rank);
                }
                candidates.sort_by(by_rank_then_score);
                SequenceStrategy::Topological
            }
            TopoOrder::Cyclic(remaining) => {
                tracing::debug!(
                    relevant_skills = relevant.len(),
                    cyclic_skills = ?remaining,
                    "Prerequisite cycle among candidate skills, using difficulty order"
                );
                candidates.sort_by(by_difficulty_then_score);
                SequenceStrategy::DifficultyFallback
            }
        };

        candidates.truncate(self.limit);
        SequencedPath {
            strategy,
            candidates,
        }
    }
}

/// Mean position of the skills in the order; any unranked skill, or no skills
/// at all, yields infinity
fn mean_rank(skills: &[String], rank: &HashMap<&str, usize>) -> f64 {
    if skills.is_empty() {
        return f64::INFINITY;
    }

    let mut total = 0.0;
    for skill in skills {
        match rank.get(skill.as_str()) {
            Some(pos) => total += *pos as f64,
            None => return f64::INFINITY,
        }
    }
    total / skills.len() as f64
}

fn by_rank_then_score(a: &CandidateScore, b: &CandidateScore) -> Ordering {
    a.topo_rank
        .total_cmp(&b.topo_rank)
        .then_with(|| b.score.total_cmp(&a.score))
}

fn by_difficulty_then_score(a: &CandidateScore, b: &CandidateScore) -> Ordering {
    a.difficulty
        .fallback_order()
        .cmp(&b.difficulty.fallback_order())
        .then_with(|| b.score.total_cmp(&a.score))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CourseFormat, Difficulty};

    fn candidate(id: u64, skills: &[&str], difficulty: Difficulty, score: f64) -> CandidateScore {
        CandidateScore {
            course_id: id,
            score,
            difficulty,
            format: CourseFormat::Mixed,
            topo_rank: f64::INFINITY,
            skill_names: skills.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn graph(nodes: &[&str], edges: &[(&str, &str)]) -> DependencyGraph {
        let mut g = DependencyGraph::new();
        for n in nodes {
            g.add_node(n);
        }
        for (a, b) in edges {
            g.add_edge(a, b);
        }
        g
    }

    fn ids(path: &SequencedPath) -> Vec<u64> {
        path.candidates.iter().map(|c| c.course_id).collect()
    }

    #[test]
    fn test_chain_orders_prerequisites_first() {
        let g = graph(&["a", "b", "c"], &[("a", "b"), ("b", "c")]);
        // Higher score on the dependent course must not beat the prerequisite
        let candidates = vec![
            candidate(1, &["c"], Difficulty::Beginner, 50.0),
            candidate(2, &["a"], Difficulty::Advanced, 1.0),
        ];

        let path = PathSequencer::new(&g).sequence(candidates);
        assert_eq!(path.strategy, SequenceStrategy::Topological);
        assert_eq!(ids(&path), vec![2, 1]);
        assert_eq!(path.candidates[0].topo_rank, 0.0);
        assert_eq!(path.candidates[1].topo_rank, 1.0);
    }

    #[test]
    fn test_rank_is_mean_of_skill_positions() {
        let g = graph(&["a", "b", "c", "d"], &[("a", "b"), ("b", "c"), ("c", "d")]);
        let candidates = vec![
            candidate(1, &["a", "d"], Difficulty::Mixed, 10.0),
            candidate(2, &["c"], Difficulty::Mixed, 10.0),
            candidate(3, &["b"], Difficulty::Mixed, 10.0),
        ];

        // Full chain a=0 b=1 c=2 d=3
        let path = PathSequencer::new(&g).sequence(candidates);
        assert_eq!(ids(&path), vec![3, 1, 2]);
        assert_eq!(path.candidates[0].topo_rank, 1.0);
        assert_eq!(path.candidates[1].topo_rank, 1.5);
        assert_eq!(path.candidates[2].topo_rank, 2.0);
    }

    #[test]
    fn test_edges_through_untaught_skills_are_dropped() {
        let g = graph(&["a", "b", "c", "d"], &[("a", "b"), ("b", "c"), ("c", "d")]);
        // No candidate teaches b, so only c -> d survives: a=0 c=1 d=2
        let candidates = vec![
            candidate(1, &["a", "d"], Difficulty::Mixed, 10.0),
            candidate(2, &["c"], Difficulty::Mixed, 10.0),
        ];

        let path = PathSequencer::new(&g).sequence(candidates);
        assert_eq!(path.strategy, SequenceStrategy::Topological);
        assert_eq!(ids(&path), vec![1, 2]);
        assert_eq!(path.candidates[0].topo_rank, 1.0);
        assert_eq!(path.candidates[1].topo_rank, 1.0);
    }

    #[test]
    fn test_equal_rank_sorted_by_score_then_insertion() {
        let g = graph(&["sql"], &[]);
        let candidates = vec![
            candidate(1, &["sql"], Difficulty::Mixed, 10.0),
            candidate(2, &["sql"], Difficulty::Mixed, 12.0),
            candidate(3, &["sql"], Difficulty::Mixed, 10.0),
        ];

        let path = PathSequencer::new(&g).sequence(candidates);
        assert_eq!(ids(&path), vec![2, 1, 3]);
    }

    #[test]
    fn test_skill_missing_from_graph_sorts_last() {
        let g = graph(&["sql", "statistics"], &[("sql", "statistics")]);
        let candidates = vec![
            candidate(1, &["sql", "rust"], Difficulty::Beginner, 99.0),
            candidate(2, &["statistics"], Difficulty::Advanced, 1.0),
            candidate(3, &[], Difficulty::Beginner, 50.0),
        ];

        let path = PathSequencer::new(&g).sequence(candidates);
        assert_eq!(ids(&path), vec![2, 1, 3]);
        assert!(path.candidates[1].topo_rank.is_infinite());
        assert!(path.candidates[2].topo_rank.is_infinite());
    }

    #[test]
    fn test_cycle_falls_back_to_difficulty_order() {
        let g = graph(&["a", "b"], &[("a", "b"), ("b", "a")]);
        let candidates = vec![
            candidate(1, &["a"], Difficulty::Advanced, 40.0),
            candidate(2, &["b"], Difficulty::Beginner, 10.0),
            candidate(3, &["a"], Difficulty::Mixed, 30.0),
            candidate(4, &["b"], Difficulty::Beginner, 20.0),
            candidate(5, &["a", "b"], Difficulty::Intermediate, 5.0),
        ];

        let path = PathSequencer::new(&g).sequence(candidates);
        assert_eq!(path.strategy, SequenceStrategy::DifficultyFallback);
        assert_eq!(ids(&path), vec![4, 2, 5, 3, 1]);
    }

    #[test]
    fn test_cycle_outside_candidate_skills_is_ignored() {
        let g = graph(&["a", "b", "x", "y"], &[("a", "b"), ("x", "y"), ("y", "x")]);
        let candidates = vec![
            candidate(1, &["b"], Difficulty::Beginner, 10.0),
            candidate(2, &["a"], Difficulty::Advanced, 10.0),
        ];

        let path = PathSequencer::new(&g).sequence(candidates);
        assert_eq!(path.strategy, SequenceStrategy::Topological);
        assert_eq!(ids(&path), vec![2, 1]);
    }

    #[test]
    fn test_truncates_to_limit() {
        let g = graph(&["sql"], &[]);
        let candidates: Vec<CandidateScore> = (0..45)
            .map(|i| candidate(i, &["sql"], Difficulty::Mixed, i as f64))
            .collect();

        let path = PathSequencer::new(&g).sequence(candidates.clone());
        assert_eq!(path.candidates.len(), MAX_PATH_LENGTH);
        assert_eq!(path.candidates[0].course_id, 44);

        let short = PathSequencer::new(&g).with_limit(3).sequence(candidates);
        assert_eq!(ids(&short), vec![44, 43, 42]);
    }

    #[test]
    fn test_sequence_is_deterministic() {
        let g = graph(
            &["python", "sql", "statistics", "ml"],
            &[("python", "ml"), ("statistics", "ml"), ("sql", "statistics")],
        );
        let candidates = vec![
            candidate(1, &["ml"], Difficulty::Advanced, 20.0),
            candidate(2, &["sql", "python"], Difficulty::Beginner, 25.0),
            candidate(3, &["statistics"], Difficulty::Intermediate, 18.0),
            candidate(4, &["python"], Difficulty::Beginner, 18.0),
        ];

        let first = ids(&PathSequencer::new(&g).sequence(candidates.clone()));
        for _ in 0..5 {
            assert_eq!(ids(&PathSequencer::new(&g).sequence(candidates.clone())), first);
        }
    }

    #[test]
    fn test_empty_candidates() {
        let g = graph(&["a"], &[]);
        let path = PathSequencer::new(&g).sequence(Vec::new());
        assert!(path.candidates.is_empty());
        assert_eq!(path.strategy, SequenceStrategy::Topological);
    }
}
