//! `using` directive ordering: runtime helpers first, then framework
//! namespaces, then project namespaces, each group sorted lexicographically,
//! duplicates removed, one blank line between groups.

use std::collections::BTreeSet;

const RUNTIME_NAMESPACE: &str = "Tsonic.Runtime";

fn is_framework_namespace(ns: &str) -> bool {
    ns == "System" || ns.starts_with("System.")
}

/// `project_namespaces` are the `using`s an `IrModule` actually needs beyond
/// the runtime helper namespace (its own `using_set`, folded in from
/// `DotnetNamespace` imports).
pub fn render_using_block(project_namespaces: &[String], needs_runtime_helpers: bool) -> Vec<String> {
    let mut framework: BTreeSet<&str> = BTreeSet::new();
    let mut project: BTreeSet<&str> = BTreeSet::new();
    for ns in project_namespaces {
        if ns == RUNTIME_NAMESPACE {
            continue;
        }
        if is_framework_namespace(ns) {
            framework.insert(ns);
        } else {
            project.insert(ns);
        }
    }

    let mut lines = Vec::new();
    let mut groups: Vec<Vec<String>> = Vec::new();

    if needs_runtime_helpers {
        groups.push(vec![format!("using {RUNTIME_NAMESPACE};")]);
    }
    if !framework.is_empty() {
        groups.push(framework.iter().map(|ns| format!("using {ns};")).collect());
    }
    if !project.is_empty() {
        groups.push(project.iter().map(|ns| format!("using {ns};")).collect());
    }

    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.extend(group.iter().cloned());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_runtime_then_framework_then_project_with_blank_separators() {
        let namespaces = vec!["Demo.Widgets".to_string(), "System.Text".to_string(), "System".to_string()];
        let lines = render_using_block(&namespaces, true);
        assert_eq!(
            lines,
            vec![
                "using Tsonic.Runtime;".to_string(),
                String::new(),
                "using System;".to_string(),
                "using System.Text;".to_string(),
                String::new(),
                "using Demo.Widgets;".to_string(),
            ]
        );
    }

    #[test]
    fn deduplicates_and_skips_empty_groups() {
        let namespaces = vec!["Demo.Widgets".to_string(), "Demo.Widgets".to_string()];
        let lines = render_using_block(&namespaces, false);
        assert_eq!(lines, vec!["using Demo.Widgets;".to_string()]);
    }
}
