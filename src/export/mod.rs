//! Text renderings of a transition graph for documentation and debugging.
//!
//! Both formats list edges in insertion order, one per line. Edges marked
//! final render distinctly: a bracketed target in Mermaid, a dashed edge in DOT.

use crate::builder::ConfigError;
use crate::core::{Entity, State, Trigger};
use crate::graph::TransitionGraph;
use std::fmt::Write;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Mermaid,
    Dot,
}

impl FromStr for ExportFormat {
    type Err = ConfigError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "mermaid" => Ok(Self::Mermaid),
            "dot" => Ok(Self::Dot),
            _ => Err(ConfigError::UnsupportedExportFormat(name.to_string())),
        }
    }
}

pub(crate) fn render<S: State, T: Trigger, E: Entity>(
    graph: &TransitionGraph<S, T, E>,
    format: ExportFormat,
) -> String {
    match format {
        ExportFormat::Mermaid => mermaid(graph),
        ExportFormat::Dot => dot(graph),
    }
}

// Writing into a String cannot fail.

fn mermaid<S: State, T: Trigger, E: Entity>(graph: &TransitionGraph<S, T, E>) -> String {
    let mut out = String::from("stateDiagram-v2\n");
    for edge in graph.edges() {
        let from = edge.key.from.name();
        let to = edge.definition.target.name();
        let trigger = edge.key.trigger.name();
        if edge.definition.is_final {
            let _ = writeln!(out, "    {from} --> [{to}] : {trigger}");
        } else {
            let _ = writeln!(out, "    {from} --> {to} : {trigger}");
        }
    }
    out
}

fn dot<S: State, T: Trigger, E: Entity>(graph: &TransitionGraph<S, T, E>) -> String {
    let mut out = String::from("digraph StateMachine {\n    rankdir=LR;\n");
    for edge in graph.edges() {
        let from = edge.key.from.name();
        let to = edge.definition.target.name();
        let trigger = edge.key.trigger.name();
        if edge.definition.is_final {
            let _ = writeln!(
                out,
                "    \"{from}\" -> \"{to}\" [ label = \"{trigger}\" , style = dashed ];"
            );
        } else {
            let _ = writeln!(out, "    \"{from}\" -> \"{to}\" [ label = \"{trigger}\" ];");
        }
    }
    out.push_str("}\n");
    out
}
