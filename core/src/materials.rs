//! Material assignment for faceting
//!
//! A materials definition comes in one of three shapes and is always
//! resolved to a [`MaterialList`], one material name per component in
//! geometry order, before the geometry backend sees it.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

use serde::Deserialize;

use fast_ctd_shared::{CtdError, FileKind, Result, validate_input};

use crate::adapter::ComponentInfo;

/// How materials are given for a faceting run.
///
/// In a `ctd.toml` manifest a string is a CSV path, an array is a list and a
/// table is a mapping.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MaterialsDef {
    /// `.csv` file with one material per row, in component order
    CsvFile(PathBuf),
    /// Material names in component order
    List(Vec<String>),
    /// Component name → material name
    Mapping(BTreeMap<String, String>),
}

/// Ordered material names, one per component
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterialList(Vec<String>);

impl MaterialList {
    pub fn new(materials: Vec<String>) -> Self {
        Self(materials)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse CSV text: the first field of every non-blank row is the
    /// material. Rows starting with `#` are comments.
    pub fn parse_csv(text: &str) -> Result<Self> {
        let mut materials = Vec::new();
        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let material = line.split(',').next().unwrap_or_default().trim();
            if material.is_empty() {
                return Err(CtdError::InvalidParameter(format!(
                    "materials CSV row {} has an empty material name",
                    index + 1
                )));
            }
            materials.push(material.to_string());
        }
        Ok(Self(materials))
    }

    /// Write as CSV, one material per row.
    pub fn write_csv<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        for material in &self.0 {
            writeln!(w, "{}", material)?;
        }
        Ok(())
    }

    /// Write to a temporary `.csv` file that lives as long as the handle.
    pub fn to_temp_csv(&self) -> Result<tempfile::NamedTempFile> {
        let mut file = tempfile::Builder::new()
            .prefix("fast-ctd-materials-")
            .suffix(".csv")
            .tempfile()?;
        self.write_csv(&mut file)?;
        file.flush()?;
        Ok(file)
    }
}

impl MaterialsDef {
    /// Check what can be checked without the component list: a CSV file must
    /// have the `.csv` extension and exist.
    pub fn validate(&self) -> Result<()> {
        match self {
            MaterialsDef::CsvFile(path) => validate_input(path, FileKind::MaterialsCsv),
            MaterialsDef::List(_) | MaterialsDef::Mapping(_) => Ok(()),
        }
    }

    /// Resolve to one material per component.
    ///
    /// `components` may be empty when the caller does not have them (for
    /// instance when faceting a BREP produced elsewhere); a mapping cannot
    /// be resolved without them.
    pub fn resolve(&self, components: &[ComponentInfo]) -> Result<MaterialList> {
        let list = match self {
            MaterialsDef::CsvFile(path) => {
                self.validate()?;
                MaterialList::parse_csv(&std::fs::read_to_string(path)?)?
            }
            MaterialsDef::List(materials) => MaterialList::new(materials.clone()),
            MaterialsDef::Mapping(mapping) => {
                if components.is_empty() {
                    return Err(CtdError::InvalidParameter(
                        "a component → material mapping needs the component list from STEP conversion"
                            .to_string(),
                    ));
                }
                let materials = components
                    .iter()
                    .map(|component| {
                        mapping.get(&component.name).cloned().ok_or_else(|| {
                            CtdError::InvalidParameter(format!(
                                "no material given for component '{}'",
                                component.name
                            ))
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                MaterialList::new(materials)
            }
        };

        if list.is_empty() {
            return Err(CtdError::InvalidParameter(
                "materials definition is empty".to_string(),
            ));
        }
        if let Some(name) = list.as_slice().iter().find(|m| m.trim().is_empty()) {
            return Err(CtdError::InvalidParameter(format!(
                "invalid material name {:?}",
                name
            )));
        }
        if !components.is_empty() && list.len() != components.len() {
            return Err(CtdError::InvalidParameter(format!(
                "{} materials given for {} components",
                list.len(),
                components.len()
            )));
        }
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn components(names: &[&str]) -> Vec<ComponentInfo> {
        names
            .iter()
            .map(|name| ComponentInfo {
                group: "0".to_string(),
                name: name.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_parse_csv_skips_blank_and_comment_rows() {
        let list = MaterialList::parse_csv("# materials\nsteel\n\nwater, coolant\n").unwrap();
        assert_eq!(list.as_slice(), &["steel", "water"]);
    }

    #[test]
    fn test_parse_csv_rejects_empty_name() {
        assert!(MaterialList::parse_csv("steel\n,oops\n").is_err());
    }

    #[test]
    fn test_csv_file_must_exist_and_be_csv() {
        let dir = tempdir().expect("Failed to create temp dir");
        let missing = MaterialsDef::CsvFile(dir.path().join("mats.csv"));
        assert!(missing.validate().unwrap_err().is_not_found());

        let txt = dir.path().join("mats.txt");
        std::fs::write(&txt, "steel\n").unwrap();
        assert!(matches!(
            MaterialsDef::CsvFile(txt).validate(),
            Err(CtdError::InvalidExtension { .. })
        ));
    }

    #[test]
    fn test_resolve_csv_file() {
        let dir = tempdir().expect("Failed to create temp dir");
        let csv = dir.path().join("mats.csv");
        std::fs::write(&csv, "steel\nwater\n").unwrap();
        let list = MaterialsDef::CsvFile(csv)
            .resolve(&components(&["a", "b"]))
            .unwrap();
        assert_eq!(list.as_slice(), &["steel", "water"]);
    }

    #[test]
    fn test_mapping_follows_component_order() {
        let mapping = BTreeMap::from([
            ("blanket".to_string(), "lithium".to_string()),
            ("coil".to_string(), "copper".to_string()),
        ]);
        let list = MaterialsDef::Mapping(mapping)
            .resolve(&components(&["coil", "blanket"]))
            .unwrap();
        assert_eq!(list.as_slice(), &["copper", "lithium"]);
    }

    #[test]
    fn test_mapping_missing_component() {
        let mapping = BTreeMap::from([("coil".to_string(), "copper".to_string())]);
        let err = MaterialsDef::Mapping(mapping)
            .resolve(&components(&["coil", "blanket"]))
            .unwrap_err();
        assert!(err.to_string().contains("blanket"));
    }

    #[test]
    fn test_mapping_without_components() {
        let mapping = BTreeMap::from([("coil".to_string(), "copper".to_string())]);
        assert!(MaterialsDef::Mapping(mapping).resolve(&[]).is_err());
    }

    #[test]
    fn test_list_length_must_match_components() {
        let def = MaterialsDef::List(vec!["steel".to_string()]);
        assert!(def.resolve(&components(&["a", "b"])).is_err());
        assert!(def.resolve(&[]).is_ok());
    }

    #[test]
    fn test_empty_list_rejected() {
        assert!(MaterialsDef::List(vec![]).resolve(&[]).is_err());
    }

    #[test]
    fn test_temp_csv_round_trips() {
        let list = MaterialList::new(vec!["steel".to_string(), "water".to_string()]);
        let file = list.to_temp_csv().unwrap();
        assert_eq!(file.path().extension().unwrap(), "csv");
        let text = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(MaterialList::parse_csv(&text).unwrap(), list);
    }

    #[test]
    fn test_deserialize_shapes() {
        #[derive(Deserialize)]
        struct Doc {
            materials: MaterialsDef,
        }

        let doc: Doc = toml::from_str(r#"materials = "mats.csv""#).unwrap();
        assert_eq!(doc.materials, MaterialsDef::CsvFile("mats.csv".into()));

        let doc: Doc = toml::from_str(r#"materials = ["steel", "water"]"#).unwrap();
        assert!(matches!(doc.materials, MaterialsDef::List(ref l) if l.len() == 2));

        let doc: Doc = toml::from_str("[materials]\ncoil = \"copper\"\n").unwrap();
        assert!(matches!(doc.materials, MaterialsDef::Mapping(ref m) if m["coil"] == "copper"));
    }
}
