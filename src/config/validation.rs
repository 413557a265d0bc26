//! Configuration validation for graph integrity.
//!
//! # Validation Pipeline
//!
//! 1. **Engine Options**: tick rate, tick budget and queue size must be positive
//! 2. **Uniqueness Validation**: every atom id is unique
//! 3. **Reference Validation**: both ends of every link name a declared atom
//! 4. **Cycle Detection**: DFS over the link graph
//!
//! Cycle detection needs a structurally valid graph, so it only runs once the
//! reference checks pass. Errors from the other stages accumulate so that all
//! of them are reported at once.
//!
//! Channel-level checks (index range, type compatibility, double binding and
//! completeness) need the registered node types and happen when the graph is
//! built.
//!
//! # Example
//! ```rust
//! use atomflow::config::{validate_graph, AtomConfig, Config, LinkConfig};
//! use atomflow::errors::ValidationError;
//!
//! let atom = |id: &str| AtomConfig {
//!     id: id.to_string(),
//!     atom: "midi.null.sink".to_string(),
//!     options: Default::default(),
//! };
//! let link = |from: &str, to: &str| LinkConfig {
//!     from: from.to_string(),
//!     src_ch: 0,
//!     to: to.to_string(),
//!     sink_ch: 0,
//! };
//! let config = Config {
//!     engine: Default::default(),
//!     atoms: vec![atom("a"), atom("b")],
//!     links: vec![link("a", "b"), link("b", "a")],
//!     base_dir: Default::default(),
//! };
//!
//! let errors = validate_graph(&config).unwrap_err();
//! assert!(matches!(&errors[0], ValidationError::CyclicLink { cycle } if cycle.len() == 3));
//! ```

use std::collections::{HashMap, HashSet};

use crate::config::Config;
use crate::errors::ValidationError;
use crate::observability::messages::validation::{
    CyclicLinkDetected, DuplicateAtomId, InvalidEngineOption, UnresolvedLinkEndpoint,
    ValidationCompleted,
};
use crate::observability::messages::StructuredLog;

/// Validates a graph configuration, collecting every error found.
pub fn validate_graph(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(option_errors) = validate_engine_options(config) {
        errors.extend(option_errors);
    }

    let mut structural = Vec::new();
    if let Err(duplicate_errors) = validate_unique_atom_ids(config) {
        structural.extend(duplicate_errors);
    }
    if let Err(unresolved_errors) = validate_link_references(config) {
        structural.extend(unresolved_errors);
    }
    if structural.is_empty() {
        if let Err(cycle_errors) = validate_acyclic_graph(config) {
            structural.extend(cycle_errors);
        }
    }
    errors.extend(structural);

    log_errors(&errors);
    ValidationCompleted {
        atom_count: config.atoms.len(),
        link_count: config.links.len(),
        error_count: errors.len(),
    }
    .log();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn log_errors(errors: &[ValidationError]) {
    for error in errors {
        match error {
            ValidationError::CyclicLink { cycle } => {
                let cycle: Vec<&str> = cycle.iter().map(String::as_str).collect();
                CyclicLinkDetected { cycle: &cycle }.log();
            }
            ValidationError::UnresolvedLinkEndpoint {
                link_index,
                atom_id,
            } => UnresolvedLinkEndpoint {
                link_index: *link_index,
                atom_id,
            }
            .log(),
            ValidationError::DuplicateAtomId { atom_id } => DuplicateAtomId { atom_id }.log(),
            ValidationError::InvalidEngineOption { option, reason } => {
                InvalidEngineOption { option, reason }.log()
            }
        }
    }
}

fn validate_engine_options(config: &Config) -> Result<(), Vec<ValidationError>> {
    let opts = &config.engine;
    let mut errors = Vec::new();

    if !(opts.tick_rate_hz.is_finite() && opts.tick_rate_hz > 0.0) {
        errors.push(ValidationError::InvalidEngineOption {
            option: "tick_rate_hz",
            reason: format!("must be a positive number, got {}", opts.tick_rate_hz),
        });
    }
    if opts.max_ticks == 0 {
        errors.push(ValidationError::InvalidEngineOption {
            option: "max_ticks",
            reason: "must be positive".to_string(),
        });
    }
    if opts.queue_size == 0 {
        errors.push(ValidationError::InvalidEngineOption {
            option: "queue_size",
            reason: "must be positive".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_unique_atom_ids(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut seen_ids = HashSet::new();
    let mut errors = Vec::new();

    for atom in &config.atoms {
        if !seen_ids.insert(&atom.id) {
            errors.push(ValidationError::DuplicateAtomId {
                atom_id: atom.id.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_link_references(config: &Config) -> Result<(), Vec<ValidationError>> {
    let atom_ids: HashSet<&String> = config.atoms.iter().map(|a| &a.id).collect();
    let mut errors = Vec::new();

    for (link_index, link) in config.links.iter().enumerate() {
        for endpoint in [&link.from, &link.to] {
            if !atom_ids.contains(endpoint) {
                errors.push(ValidationError::UnresolvedLinkEndpoint {
                    link_index,
                    atom_id: endpoint.clone(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// DFS with a recursion stack; a back edge to a node still on the stack is a
/// cycle, reported with its full path (first atom repeated at the end).
fn validate_acyclic_graph(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut graph: HashMap<&str, Vec<&str>> = config
        .atoms
        .iter()
        .map(|a| (a.id.as_str(), Vec::new()))
        .collect();
    for link in &config.links {
        if let Some(next) = graph.get_mut(link.from.as_str()) {
            next.push(link.to.as_str());
        }
    }

    let mut visited = HashSet::new();
    let mut rec_stack = HashSet::new();
    let mut path = Vec::new();

    // Config order keeps the reported cycle deterministic.
    for atom in &config.atoms {
        if !visited.contains(atom.id.as_str()) {
            if let Some(cycle) = dfs_cycle_detection(
                &atom.id,
                &graph,
                &mut visited,
                &mut rec_stack,
                &mut path,
            ) {
                return Err(vec![ValidationError::CyclicLink { cycle }]);
            }
        }
    }

    Ok(())
}

fn dfs_cycle_detection<'a>(
    node: &'a str,
    graph: &HashMap<&'a str, Vec<&'a str>>,
    visited: &mut HashSet<&'a str>,
    rec_stack: &mut HashSet<&'a str>,
    path: &mut Vec<&'a str>,
) -> Option<Vec<String>> {
    visited.insert(node);
    rec_stack.insert(node);
    path.push(node);

    if let Some(neighbors) = graph.get(node) {
        for &neighbor in neighbors {
            if !visited.contains(neighbor) {
                if let Some(cycle) = dfs_cycle_detection(neighbor, graph, visited, rec_stack, path)
                {
                    return Some(cycle);
                }
            } else if rec_stack.contains(neighbor) {
                let cycle_start = path.iter().position(|x| *x == neighbor).unwrap_or(0);
                let mut cycle: Vec<String> =
                    path[cycle_start..].iter().map(|s| s.to_string()).collect();
                cycle.push(neighbor.to_string());
                return Some(cycle);
            }
        }
    }

    rec_stack.remove(node);
    path.pop();
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AtomConfig, EngineOptions, LinkConfig};

    fn atom(id: &str) -> AtomConfig {
        AtomConfig {
            id: id.to_string(),
            atom: "midi.null.sink".to_string(),
            options: HashMap::new(),
        }
    }

    fn link(from: &str, to: &str) -> LinkConfig {
        LinkConfig {
            from: from.to_string(),
            src_ch: 0,
            to: to.to_string(),
            sink_ch: 0,
        }
    }

    fn config(atoms: &[&str], links: &[(&str, &str)]) -> Config {
        Config {
            engine: EngineOptions::default(),
            atoms: atoms.iter().map(|id| atom(id)).collect(),
            links: links.iter().map(|(f, t)| link(f, t)).collect(),
            base_dir: Default::default(),
        }
    }

    #[test]
    fn test_valid_configs() {
        let cases = vec![
            ("empty", config(&[], &[])),
            ("single atom", config(&["a"], &[])),
            ("linear chain", config(&["a", "b", "c"], &[("a", "b"), ("b", "c")])),
            (
                "fan out and in",
                config(
                    &["src", "l", "r", "sink"],
                    &[("src", "l"), ("src", "r"), ("l", "sink"), ("r", "sink")],
                ),
            ),
            ("parallel links", config(&["a", "b"], &[("a", "b"), ("a", "b")])),
        ];

        for (name, cfg) in cases {
            assert!(validate_graph(&cfg).is_ok(), "case: {}", name);
        }
    }

    #[test]
    fn test_duplicate_atom_ids() {
        let errors = validate_graph(&config(&["a", "a", "b"], &[])).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::DuplicateAtomId {
                atom_id: "a".to_string()
            }]
        );
    }

    #[test]
    fn test_unresolved_link_endpoints() {
        let errors = validate_graph(&config(&["a"], &[("a", "ghost"), ("nope", "a")])).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::UnresolvedLinkEndpoint {
                    link_index: 0,
                    atom_id: "ghost".to_string()
                },
                ValidationError::UnresolvedLinkEndpoint {
                    link_index: 1,
                    atom_id: "nope".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_simple_cycle() {
        let errors = validate_graph(&config(&["a", "b"], &[("a", "b"), ("b", "a")])).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::CyclicLink {
                cycle: vec!["a".to_string(), "b".to_string(), "a".to_string()]
            }]
        );
    }

    #[test]
    fn test_self_link_cycle() {
        let errors = validate_graph(&config(&["a"], &[("a", "a")])).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::CyclicLink {
                cycle: vec!["a".to_string(), "a".to_string()]
            }]
        );
    }

    #[test]
    fn test_complex_cycle_reports_only_the_loop() {
        let cfg = config(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("b", "c"), ("c", "d"), ("d", "b")],
        );
        let errors = validate_graph(&cfg).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::CyclicLink {
                cycle: ["b", "c", "d", "b"].iter().map(|s| s.to_string()).collect()
            }]
        );
    }

    #[test]
    fn test_cycle_check_skipped_when_references_are_broken() {
        let cfg = config(&["a", "b"], &[("a", "b"), ("b", "a"), ("a", "ghost")]);
        let errors = validate_graph(&cfg).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ValidationError::UnresolvedLinkEndpoint { .. }));
    }

    #[test]
    fn test_engine_options() {
        let mut cfg = config(&["a", "a"], &[]);
        cfg.engine = EngineOptions {
            tick_rate_hz: 0.0,
            max_ticks: 0,
            queue_size: 0,
        };
        let errors = validate_graph(&cfg).unwrap_err();
        let options: Vec<&str> = errors
            .iter()
            .filter_map(|e| match e {
                ValidationError::InvalidEngineOption { option, .. } => Some(*option),
                _ => None,
            })
            .collect();
        assert_eq!(options, vec!["tick_rate_hz", "max_ticks", "queue_size"]);
        assert_eq!(errors.len(), 4);

        cfg.engine.tick_rate_hz = f64::NAN;
        cfg.engine.max_ticks = 1;
        cfg.engine.queue_size = 1;
        cfg.atoms.pop();
        let errors = validate_graph(&cfg).unwrap_err();
        assert_eq!(errors.len(), 1);
    }
}
