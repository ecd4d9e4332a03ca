//! Stylesheet manager: cascade resolution, apply styles to DOM nodes.
//!
//! Compiles a parsed [`StyleSheet`] into a form ready for matching against DOM
//! nodes, computing specificity, and merging styles via the CSS cascade.
//! Pseudo-classes (`:active`, `:checked`, `:disabled`, `:focus`, `:open`)
//! match against the node's live state flags, which is how boolean widget
//! state turns into conditional styling.

use crate::css::model::{
    Combinator, CompoundSelector, Declaration, RuleSet, Selector, SelectorComponent, SelectorPart,
    StyleSheet,
};
use crate::css::properties::apply_declaration;
use crate::css::specificity::Specificity;
use crate::css::styles::Styles;
use crate::dom::node::{NodeData, NodeId};
use crate::dom::tree::Dom;

/// A compiled stylesheet ready for matching against DOM nodes.
#[derive(Debug, Default)]
pub struct CompiledStylesheet {
    /// Rules with pre-computed specificity, ordered by source order.
    rules: Vec<CompiledRule>,
}

/// A single rule with its pre-computed specificity.
#[derive(Debug)]
struct CompiledRule {
    rule: RuleSet,
    specificity: Specificity,
    /// Source order index for stable sorting.
    source_order: usize,
}

impl CompiledStylesheet {
    /// Compile a parsed [`StyleSheet`] by computing specificity for each rule.
    ///
    /// If `is_default` is true, this is a built-in widget stylesheet (lower
    /// priority than user rules).
    pub fn compile(stylesheet: &StyleSheet, is_default: bool) -> Self {
        let mut rules = Vec::with_capacity(stylesheet.rules.len());

        for (i, rule) in stylesheet.rules.iter().enumerate() {
            let has_important = rule.declarations.iter().any(|d| d.important);

            // Highest specificity among the rule's selectors.
            let specificity = rule
                .selectors
                .iter()
                .map(|sel| Specificity::from_selector(sel, i as u32, is_default, has_important))
                .max()
                .unwrap_or_default();

            rules.push(CompiledRule {
                rule: rule.clone(),
                specificity,
                source_order: i,
            });
        }

        CompiledStylesheet { rules }
    }

    /// Compute styles for a single node by matching all rules against it.
    ///
    /// Rules are applied in specificity order (lowest first, highest wins via
    /// merge). Within the same specificity, source order is preserved (later
    /// rules win).
    pub fn compute_styles(&self, node_id: NodeId, dom: &Dom) -> Styles {
        let mut matches: Vec<(Specificity, usize, &[Declaration])> = Vec::new();

        for compiled_rule in &self.rules {
            let rule = &compiled_rule.rule;
            let any_selector_matches = rule
                .selectors
                .iter()
                .any(|sel| matches_selector(sel, node_id, dom));

            if any_selector_matches {
                matches.push((
                    compiled_rule.specificity,
                    compiled_rule.source_order,
                    &rule.declarations,
                ));
            }
        }

        // Sort ascending; last applied wins via merge.
        matches.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));

        let mut result = Styles::new();
        for (_specificity, _order, declarations) in &matches {
            let mut rule_styles = Styles::new();
            for decl in *declarations {
                // Individual invalid declarations are skipped, not fatal.
                let _ = apply_declaration(&mut rule_styles, &decl.property, &decl.values);
            }
            result = result.merge(&rule_styles);
        }

        result
    }
}

/// Check whether a full selector matches a given node.
///
/// Walks the selector parts from right to left, matching compound selectors
/// and navigating the DOM tree via combinators.
fn matches_selector(selector: &Selector, node_id: NodeId, dom: &Dom) -> bool {
    let parts = &selector.parts;
    if parts.is_empty() {
        return false;
    }

    // The rightmost part must be a compound selector matching the target node.
    let mut part_idx = parts.len() - 1;

    match &parts[part_idx] {
        SelectorPart::Compound(compound) => {
            let node = match dom.get(node_id) {
                Some(n) => n,
                None => return false,
            };
            if !matches_compound(compound, node) {
                return false;
            }
        }
        SelectorPart::Combinator(_) => return false,
    }

    if part_idx == 0 {
        return true;
    }

    // Walk leftward through combinator + compound pairs.
    let mut current_node = node_id;

    loop {
        if part_idx == 0 {
            return true;
        }

        part_idx -= 1;
        let combinator = match &parts[part_idx] {
            SelectorPart::Combinator(c) => c,
            _ => return false,
        };

        if part_idx == 0 {
            // Combinator without a preceding compound — invalid.
            return false;
        }

        part_idx -= 1;
        let compound = match &parts[part_idx] {
            SelectorPart::Compound(c) => c,
            _ => return false,
        };

        match combinator {
            Combinator::Child => {
                let parent_id = match dom.parent(current_node) {
                    Some(p) => p,
                    None => return false,
                };
                let parent = match dom.get(parent_id) {
                    Some(n) => n,
                    None => return false,
                };
                if !matches_compound(compound, parent) {
                    return false;
                }
                current_node = parent_id;
            }
            Combinator::Descendant => {
                let ancestors = dom.ancestors(current_node);
                let found = ancestors.iter().find(|&&ancestor_id| {
                    dom.get(ancestor_id)
                        .is_some_and(|ancestor| matches_compound(compound, ancestor))
                });
                match found {
                    Some(&ancestor_id) => current_node = ancestor_id,
                    None => return false,
                }
            }
        }
    }
}

/// Check whether a compound selector matches a single node's data.
fn matches_compound(compound: &CompoundSelector, node: &NodeData) -> bool {
    compound.components.iter().all(|component| match component {
        SelectorComponent::Type(name) => node.widget_type == *name,
        SelectorComponent::Class(name) => node.has_class(name),
        SelectorComponent::Id(name) => node.id.as_deref() == Some(name.as_str()),
        SelectorComponent::Universal => true,
        SelectorComponent::PseudoClass(name) => matches_pseudo_class(name, node),
    })
}

/// Resolve a state pseudo-class against the node's live flags.
///
/// Unknown pseudo-classes never match.
fn matches_pseudo_class(name: &str, node: &NodeData) -> bool {
    match name {
        "active" => node.active,
        "inactive" => !node.active,
        "checked" => node.checked,
        "disabled" => node.disabled,
        "enabled" => !node.disabled,
        "focus" => node.focused,
        "open" => node.open,
        _ => false,
    }
}
