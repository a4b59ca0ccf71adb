//! Edge validation: self-loops, cycles and duplicates.

use super::TransitionGraph;
use crate::builder::ConfigError;
use crate::core::{Entity, State, Trigger};
use std::collections::HashSet;

/// Reject an edge `from -> to` that would close a cycle.
///
/// A self-loop is a cycle. Otherwise the edge closes a cycle exactly when `to`
/// already reaches `from`; that is searched depth-first from `from`, walking
/// existing edges target to source, looking for `to`. O(V + E) per check.
pub(crate) fn check_acyclic<S, T, E>(
    graph: &TransitionGraph<S, T, E>,
    from: &S,
    to: &S,
) -> Result<(), ConfigError>
where
    S: State,
    T: Trigger,
    E: Entity,
{
    if from == to || reaches_backwards(graph, from, to) {
        return Err(ConfigError::CycleDetected {
            from: from.name().to_string(),
            to: to.name().to_string(),
        });
    }
    Ok(())
}

/// Reject a `(from, trigger)` key that is already registered.
pub(crate) fn check_unique<S, T, E>(
    graph: &TransitionGraph<S, T, E>,
    from: &S,
    trigger: &T,
    to: &S,
) -> Result<(), ConfigError>
where
    S: State,
    T: Trigger,
    E: Entity,
{
    if graph.contains(from, trigger) {
        return Err(ConfigError::DuplicateTransition {
            from: from.name().to_string(),
            trigger: trigger.name().to_string(),
            to: to.name().to_string(),
        });
    }
    Ok(())
}

fn reaches_backwards<S, T, E>(graph: &TransitionGraph<S, T, E>, start: &S, goal: &S) -> bool
where
    S: State,
    T: Trigger,
    E: Entity,
{
    let mut visited: HashSet<&S> = HashSet::new();
    let mut stack = vec![start];

    while let Some(current) = stack.pop() {
        if !visited.insert(current) {
            continue;
        }
        for edge in graph.edges().filter(|edge| &edge.definition.target == current) {
            let source = &edge.key.from;
            if source == goal {
                return true;
            }
            if !visited.contains(source) {
                stack.push(source);
            }
        }
    }
    false
}
