//! Mapper listing command handler

use crate::cli::MappersArgs;
use crate::error::Result;
use crate::output::OutputWriter;
use llm_mapper_core::{builtin_registry, get_mapper, MappingDeclaration, PathMapper};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct MapperSummary<'a> {
    name: &'a str,
    declarations: usize,
    transforms: usize,
}

#[derive(Debug, Serialize)]
struct DeclarationEntry {
    index: usize,
    external_path: String,
    internal_path: String,
    transform: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl<'a> From<&'a PathMapper> for MapperSummary<'a> {
    fn from(mapper: &'a PathMapper) -> Self {
        Self {
            name: mapper.name(),
            declarations: mapper.len(),
            transforms: mapper
                .declarations()
                .iter()
                .filter(|d| !d.is_identity())
                .count(),
        }
    }
}

impl DeclarationEntry {
    fn new(index: usize, declaration: &MappingDeclaration) -> Self {
        Self {
            index,
            external_path: declaration.external_path.to_string(),
            internal_path: declaration.internal_path.to_string(),
            transform: !declaration.is_identity(),
            description: declaration.description.clone(),
        }
    }
}

/// Handle the mappers command
pub fn handle_mappers(args: MappersArgs, output: &mut OutputWriter) -> Result<()> {
    match args.name {
        None => list_mappers(output),
        Some(name) => describe_mapper(&name, output),
    }
}

fn list_mappers(output: &mut OutputWriter) -> Result<()> {
    let summaries: Vec<MapperSummary<'_>> = builtin_registry()
        .iter()
        .map(|mapper| MapperSummary::from(mapper.as_ref()))
        .collect();

    if !output.is_human() {
        return output.data(&summaries);
    }

    output.section("Registered Mappers")?;
    let rows = summaries
        .iter()
        .map(|s| {
            vec![
                s.name.to_string(),
                s.declarations.to_string(),
                s.transforms.to_string(),
            ]
        })
        .collect();
    output.table(&["Name", "Declarations", "Transforms"], rows)
}

fn describe_mapper(name: &str, output: &mut OutputWriter) -> Result<()> {
    let mapper = get_mapper(name)?;
    let entries: Vec<DeclarationEntry> = mapper
        .declarations()
        .iter()
        .enumerate()
        .map(|(index, declaration)| DeclarationEntry::new(index, declaration))
        .collect();

    if !output.is_human() {
        return output.data(&entries);
    }

    output.section(&format!("Mapper: {}", mapper.name()))?;
    output.info(&format!("{} declarations, applied in order", entries.len()))?;

    let rows = entries
        .into_iter()
        .map(|entry| {
            vec![
                entry.index.to_string(),
                entry.external_path,
                if entry.transform { "<~>" } else { "<->" }.to_string(),
                entry.internal_path,
                entry.description.unwrap_or_default(),
            ]
        })
        .collect();
    output.table(&["#", "External", "", "Internal", "Description"], rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use crate::error::Error;

    #[test]
    fn test_builtin_summaries() {
        let summaries: Vec<MapperSummary<'_>> = builtin_registry()
            .iter()
            .map(|mapper| MapperSummary::from(mapper.as_ref()))
            .collect();

        let names: Vec<&str> = summaries.iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["anthropic-chat", "anthropic-chat-response"]);
        assert!(summaries.iter().all(|s| s.transforms > 0));
    }

    #[test]
    fn test_declaration_entries_follow_order() {
        let mapper = get_mapper("anthropic-chat").unwrap();
        let first = DeclarationEntry::new(0, &mapper.declarations()[0]);
        let second = DeclarationEntry::new(1, &mapper.declarations()[1]);

        assert_eq!(first.external_path, "model");
        assert!(!first.transform);
        assert_eq!(second.external_path, "system");
        assert_eq!(second.internal_path, "messages");
        assert!(second.transform);
        assert!(second.description.is_some());
    }

    #[test]
    fn test_unknown_mapper() {
        let mut output =
            OutputWriter::with_writer(OutputFormat::Json, false, true, 0, Box::new(std::io::sink()));
        let err = handle_mappers(
            MappersArgs {
                name: Some("openai-chat".to_string()),
            },
            &mut output,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Core(llm_mapper_core::Error::UnknownMapper { .. })));
    }
}
