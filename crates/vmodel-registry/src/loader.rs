//! Definition file parsing

use std::path::Path;
use vmodel_schema::VirtualModelDefinition;

use crate::error::CatalogError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionFormat {
    Json,
    Yaml,
}

impl DefinitionFormat {
    /// Format by file extension; `None` for files that are not definitions
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(DefinitionFormat::Json),
            "yaml" | "yml" => Some(DefinitionFormat::Yaml),
            _ => None,
        }
    }
}

/// Parse definitions from file contents. `path` is only used in errors.
pub fn parse_definitions(
    contents: &str,
    format: DefinitionFormat,
    path: &Path,
) -> Result<Vec<VirtualModelDefinition>, CatalogError> {
    let parsed = match format {
        DefinitionFormat::Json => parse_json(contents).map_err(|e| e.to_string()),
        DefinitionFormat::Yaml => parse_yaml(contents).map_err(|e| e.to_string()),
    };

    parsed.map_err(|message| CatalogError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

// A file holds one definition or a list of them. The shape is picked first so
// the definition's own error is reported instead of a generic mismatch.
fn parse_json(contents: &str) -> Result<Vec<VirtualModelDefinition>, serde_json::Error> {
    if serde_json::from_str::<serde_json::Value>(contents)?.is_array() {
        serde_json::from_str(contents)
    } else {
        serde_json::from_str(contents).map(|def| vec![def])
    }
}

fn parse_yaml(contents: &str) -> Result<Vec<VirtualModelDefinition>, serde_yaml::Error> {
    if serde_yaml::from_str::<serde_yaml::Value>(contents)?.is_sequence() {
        serde_yaml::from_str(contents)
    } else {
        serde_yaml::from_str(contents).map(|def| vec![def])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            DefinitionFormat::from_path(Path::new("a/b.yml")),
            Some(DefinitionFormat::Yaml)
        );
        assert_eq!(
            DefinitionFormat::from_path(Path::new("b.json")),
            Some(DefinitionFormat::Json)
        );
        assert_eq!(DefinitionFormat::from_path(Path::new("README.md")), None);
        assert_eq!(DefinitionFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_parse_single_and_list() {
        let single = r#"
model: acme/base
base:
  - key: acme/base-gguf
    sources:
      - type: huggingface
        user: acme
        repo: base-GGUF
"#;
        let defs = parse_definitions(single, DefinitionFormat::Yaml, Path::new("x.yaml")).unwrap();
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].model, "acme/base");

        let list = r#"[
            { "model": "acme/a", "base": "acme/base" },
            { "model": "acme/b", "base": "acme/base" }
        ]"#;
        let defs = parse_definitions(list, DefinitionFormat::Json, Path::new("x.json")).unwrap();
        assert_eq!(defs.len(), 2);
    }

    #[test]
    fn test_parse_error_names_file() {
        let err = parse_definitions("model: [", DefinitionFormat::Yaml, Path::new("broken.yaml"))
            .unwrap_err();
        assert!(err.to_string().contains("broken.yaml"));
    }

    #[test]
    fn test_parse_error_names_field() {
        let yaml = r#"
model: acme/chat
base: acme/base
metadataOverrides:
  vision: maybe
"#;
        let err = parse_definitions(yaml, DefinitionFormat::Yaml, Path::new("x.yaml"))
            .unwrap_err()
            .to_string();
        assert!(err.contains("x.yaml"), "{}", err);
        assert!(err.contains("vision"), "{}", err);
        assert!(err.contains(r#"expected true, false or "mixed""#), "{}", err);
    }

    #[test]
    fn test_parse_error_inside_list_and_base() {
        let json = r#"[
            { "model": "acme/a", "base": "acme/base" },
            { "model": "acme/b", "base": [{ "key": "acme/w" }] }
        ]"#;
        let err = parse_definitions(json, DefinitionFormat::Json, Path::new("x.json"))
            .unwrap_err()
            .to_string();
        assert!(err.contains("missing field `sources`"), "{}", err);
    }
}
