//! Path inspection command handler

use super::utils::load_document;
use crate::cli::PathArgs;
use crate::error::Result;
use crate::output::{format_value_compact, OutputWriter};
use llm_mapper_core::mapping::path::{get, Index, Path, Step};
use serde::Serialize;
use serde_json::Value;

/// One inspected path
#[derive(Debug, Serialize)]
struct PathEntry {
    input: String,
    canonical: String,
    steps: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    resolved: Option<Resolution>,
}

/// What a path resolved to in the `--against` document
#[derive(Debug, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
enum Resolution {
    Found(Value),
    Absent,
}

fn describe_step(step: &Step) -> String {
    match step {
        Step::Property(name) => format!("property \"{}\"", name),
        Step::Index(Index::Position(position)) => format!("index {}", position),
        Step::Index(Index::Key(key)) => format!("key \"{}\"", key),
        Step::WholeArray => "whole array".to_string(),
    }
}

fn inspect(input: &str, document: Option<&Value>) -> PathEntry {
    let path = Path::parse(input);

    PathEntry {
        input: input.to_string(),
        canonical: path.to_string(),
        steps: path.steps().iter().map(describe_step).collect(),
        resolved: document.map(|doc| match get(doc, &path) {
            Some(value) => Resolution::Found(value.clone()),
            None => Resolution::Absent,
        }),
    }
}

/// Handle the path command
pub fn handle_path(args: PathArgs, output: &mut OutputWriter) -> Result<()> {
    let document = args.against.as_deref().map(load_document).transpose()?;
    let entries: Vec<PathEntry> = args
        .paths
        .iter()
        .map(|input| inspect(input, document.as_ref()))
        .collect();

    if !output.is_human() {
        return output.data(&entries);
    }

    let mut headers = vec!["Path", "Canonical", "Steps"];
    if document.is_some() {
        headers.push("Value");
    }

    let rows = entries
        .into_iter()
        .map(|entry| {
            let mut row = vec![
                entry.input,
                entry.canonical,
                if entry.steps.is_empty() {
                    "(root)".to_string()
                } else {
                    entry.steps.join(" → ")
                },
            ];
            match entry.resolved {
                Some(Resolution::Found(value)) => row.push(format_value_compact(&value)),
                Some(Resolution::Absent) => row.push("(absent)".to_string()),
                None => {}
            }
            row
        })
        .collect();

    output.table(&headers, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_inspect_describes_steps() {
        let entry = inspect("messages[0].content[]", None);
        assert_eq!(entry.canonical, "messages[0].content[]");
        assert_eq!(
            entry.steps,
            vec!["property \"messages\"", "index 0", "property \"content\"", "whole array"]
        );
        assert!(entry.resolved.is_none());
    }

    #[test]
    fn test_inspect_key_index_and_empty_segments() {
        let entry = inspect("a..b[first]", None);
        assert_eq!(entry.canonical, "a.b[first]");
        assert_eq!(entry.steps, vec!["property \"a\"", "property \"b\"", "key \"first\""]);
    }

    #[test]
    fn test_inspect_resolves_against_document() {
        let doc = json!({"messages": [{"role": "user", "content": "hi"}], "stream": null});

        assert_eq!(
            inspect("messages[0].role", Some(&doc)).resolved,
            Some(Resolution::Found(json!("user")))
        );
        assert_eq!(
            inspect("stream", Some(&doc)).resolved,
            Some(Resolution::Found(Value::Null))
        );
        assert_eq!(inspect("messages[3]", Some(&doc)).resolved, Some(Resolution::Absent));
    }

    #[test]
    fn test_resolution_serialization() {
        assert_eq!(
            serde_json::to_value(Resolution::Found(json!(1))).unwrap(),
            json!({"status": "found", "value": 1})
        );
        assert_eq!(
            serde_json::to_value(Resolution::Absent).unwrap(),
            json!({"status": "absent"})
        );
    }
}
