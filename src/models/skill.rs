use serde::{Deserialize, Serialize};

pub type SkillId = u64;

/// A skill taught by courses and referenced by the prerequisite graph
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
}

/// Canonical form of a skill name as used by the dependency graph
pub fn normalize_skill_name(name: &str) -> String {
    name.trim().to_lowercase()
}
