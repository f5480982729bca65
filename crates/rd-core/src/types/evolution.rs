//! Evolution-chain tree and resolved stages.
//!
//! PokeAPI returns an evolution chain as a nested structure: every node has a
//! species, a list of evolution-detail records describing how it is reached,
//! and a list of nodes it evolves into. Most chains are linear, but some
//! branch (Eevee, Tyrogue, Wurmple, ...).
//!
//! The chain is kept as an [`EvolutionNode`] tree. Turning it into the
//! ordered list shown to users is an explicit projection selected by
//! [`BranchPolicy`]:
//!
//! - [`BranchPolicy::FirstBranch`] follows the first child at every step.
//!   Species on later branches are dropped; [`EvolutionNode::is_branching`]
//!   tells callers when that happened.
//! - [`BranchPolicy::AllBranches`] lists every species in pre-order.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

/// How a branching chain is flattened into stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchPolicy {
    /// Follow only the first child of each node.
    #[default]
    FirstBranch,
    /// Visit every node, depth-first, children in upstream order.
    AllBranches,
}

/// How a species is reached from its predecessor.
///
/// Only the zeroth evolution-detail record of a node is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionDetail {
    /// Minimum level, for level-based evolutions.
    pub min_level: Option<u32>,
    /// Trigger kind (`level-up`, `use-item`, `trade`, ...).
    pub trigger: Option<String>,
    /// Item involved in the evolution, if any.
    pub item: Option<String>,
}

/// One node of an evolution-chain tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionNode {
    /// Species name at this node.
    pub species: String,
    /// How this node is reached; `None` for the base form.
    pub detail: Option<EvolutionDetail>,
    /// Nodes this species evolves into, in upstream order.
    pub children: Vec<EvolutionNode>,
}

impl EvolutionNode {
    /// Creates a node with no detail and no children.
    #[must_use]
    pub fn new(species: impl Into<String>) -> Self {
        Self {
            species: species.into(),
            detail: None,
            children: Vec::new(),
        }
    }

    /// Sets the evolution detail.
    #[must_use]
    pub fn with_detail(mut self, detail: EvolutionDetail) -> Self {
        self.detail = Some(detail);
        self
    }

    /// Appends a child node.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Returns the nodes on the first-branch path, base first.
    ///
    /// # Examples
    ///
    /// ```
    /// use rd_core::EvolutionNode;
    ///
    /// let chain = EvolutionNode::new("eevee")
    ///     .with_child(EvolutionNode::new("vaporeon"))
    ///     .with_child(EvolutionNode::new("jolteon"));
    ///
    /// let names: Vec<_> = chain.first_branch().iter().map(|n| n.species.as_str()).collect();
    /// assert_eq!(names, ["eevee", "vaporeon"]);
    /// ```
    #[must_use]
    pub fn first_branch(&self) -> Vec<&Self> {
        let mut path = vec![self];
        let mut current = self;
        while let Some(next) = current.children.first() {
            path.push(next);
            current = next;
        }
        path
    }

    /// Returns every node in pre-order (parent before children).
    #[must_use]
    pub fn pre_order(&self) -> Vec<&Self> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    /// Projects the tree into an ordered node list using `policy`.
    #[must_use]
    pub fn project(&self, policy: BranchPolicy) -> Vec<&Self> {
        match policy {
            BranchPolicy::FirstBranch => self.first_branch(),
            BranchPolicy::AllBranches => self.pre_order(),
        }
    }

    /// Returns `true` if any node has more than one child.
    #[must_use]
    pub fn is_branching(&self) -> bool {
        self.pre_order().iter().any(|n| n.children.len() > 1)
    }

    /// Returns the total number of species in the tree.
    #[must_use]
    pub fn species_count(&self) -> usize {
        self.pre_order().len()
    }
}

/// An item involved in an evolution, with its sprite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSprite {
    /// Item name.
    pub name: String,
    /// Sprite URL, if the item fetch succeeded and the item has one.
    pub sprite_url: Option<String>,
}

/// One resolved stage of an evolution chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionStage {
    /// Species name.
    pub name: String,
    /// Minimum level required to reach this stage.
    pub min_level: Option<u32>,
    /// Trigger kind used to reach this stage.
    pub trigger: Option<String>,
    /// Item used to reach this stage.
    pub item: Option<ItemSprite>,
    /// Front sprite of the species, if resolved.
    pub sprite_url: Option<String>,
}

impl EvolutionStage {
    /// Builds an unenriched stage (no sprites) from a tree node.
    #[must_use]
    pub fn from_node(node: &EvolutionNode) -> Self {
        let detail = node.detail.clone().unwrap_or_default();
        Self {
            name: node.species.clone(),
            min_level: detail.min_level,
            trigger: detail.trigger,
            item: detail.item.map(|name| ItemSprite {
                name,
                sprite_url: None,
            }),
            sprite_url: None,
        }
    }

    /// Returns a short description of what is needed to reach this stage.
    ///
    /// `lv N` for level-based evolutions, otherwise the item name, otherwise
    /// the trigger. `None` for the base form.
    #[must_use]
    pub fn requirement(&self) -> Option<String> {
        if let Some(level) = self.min_level {
            return Some(format!("lv {level}"));
        }
        if let Some(item) = &self.item {
            return Some(item.name.clone());
        }
        self.trigger.clone()
    }
}

/// Formats stages as a one-line chain.
///
/// # Examples
///
/// ```
/// use rd_core::{EvolutionNode, EvolutionStage, format_chain};
///
/// let stages = vec![EvolutionStage::from_node(&EvolutionNode::new("ditto"))];
/// assert_eq!(format_chain(&stages), "ditto");
/// ```
#[must_use]
pub fn format_chain(stages: &[EvolutionStage]) -> String {
    let mut out = String::new();
    for (i, stage) in stages.iter().enumerate() {
        if i > 0 {
            out.push_str(" → ");
        }
        out.push_str(&stage.name);
        if let Some(requirement) = stage.requirement() {
            let _ = write!(out, " ({requirement})");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(min_level: u32) -> EvolutionDetail {
        EvolutionDetail {
            min_level: Some(min_level),
            trigger: Some("level-up".to_owned()),
            item: None,
        }
    }

    fn stone(item: &str) -> EvolutionDetail {
        EvolutionDetail {
            min_level: None,
            trigger: Some("use-item".to_owned()),
            item: Some(item.to_owned()),
        }
    }

    fn bulbasaur_line() -> EvolutionNode {
        EvolutionNode::new("bulbasaur").with_child(
            EvolutionNode::new("ivysaur")
                .with_detail(level(16))
                .with_child(EvolutionNode::new("venusaur").with_detail(level(32))),
        )
    }

    fn eevee() -> EvolutionNode {
        EvolutionNode::new("eevee")
            .with_child(EvolutionNode::new("vaporeon").with_detail(stone("water-stone")))
            .with_child(EvolutionNode::new("jolteon").with_detail(stone("thunder-stone")))
            .with_child(EvolutionNode::new("flareon").with_detail(stone("fire-stone")))
    }

    fn names(nodes: &[&EvolutionNode]) -> Vec<String> {
        nodes.iter().map(|n| n.species.clone()).collect()
    }

    #[test]
    fn test_first_branch_linear_chain() {
        let chain = bulbasaur_line();
        assert_eq!(
            names(&chain.first_branch()),
            ["bulbasaur", "ivysaur", "venusaur"]
        );
        assert!(!chain.is_branching());
    }

    #[test]
    fn test_single_stage_chain() {
        let chain = EvolutionNode::new("tauros");
        assert_eq!(names(&chain.first_branch()), ["tauros"]);
        assert_eq!(chain.species_count(), 1);
    }

    #[test]
    fn test_first_branch_drops_siblings() {
        let chain = eevee();
        assert!(chain.is_branching());
        assert_eq!(names(&chain.project(BranchPolicy::FirstBranch)), ["eevee", "vaporeon"]);
    }

    #[test]
    fn test_all_branches_pre_order() {
        let chain = EvolutionNode::new("oddish").with_child(
            EvolutionNode::new("gloom")
                .with_child(EvolutionNode::new("vileplume"))
                .with_child(EvolutionNode::new("bellossom")),
        );
        assert_eq!(
            names(&chain.project(BranchPolicy::AllBranches)),
            ["oddish", "gloom", "vileplume", "bellossom"]
        );
    }

    #[test]
    fn test_stage_from_node_and_requirement() {
        let chain = eevee();
        let stages: Vec<_> = chain
            .pre_order()
            .into_iter()
            .map(EvolutionStage::from_node)
            .collect();
        assert_eq!(stages[0].requirement(), None);
        assert_eq!(stages[1].requirement().as_deref(), Some("water-stone"));
        assert_eq!(stages[1].item.as_ref().map(|i| i.name.as_str()), Some("water-stone"));
    }

    #[test]
    fn test_requirement_falls_back_to_trigger() {
        let node = EvolutionNode::new("alakazam").with_detail(EvolutionDetail {
            min_level: None,
            trigger: Some("trade".to_owned()),
            item: None,
        });
        assert_eq!(
            EvolutionStage::from_node(&node).requirement().as_deref(),
            Some("trade")
        );
    }

    #[test]
    fn test_format_chain_snapshot() {
        let chain = bulbasaur_line();
        let stages: Vec<_> = chain
            .first_branch()
            .into_iter()
            .map(EvolutionStage::from_node)
            .collect();
        insta::assert_snapshot!(
            format_chain(&stages),
            @"bulbasaur → ivysaur (lv 16) → venusaur (lv 32)"
        );
    }

    #[test]
    fn test_branch_policy_serialization() {
        assert_eq!(
            serde_json::to_string(&BranchPolicy::AllBranches).unwrap(),
            r#""all_branches""#
        );
        assert_eq!(BranchPolicy::default(), BranchPolicy::FirstBranch);
    }
}
