use std::collections::BTreeMap;

use crate::consts::{
    ALT, ALT_ID_PREFIXES, CONTIG, DESCRIPTION, FILTER, FORMAT, FORMAT_TYPES, ID, INFO,
    INFO_TYPES, NUMBER, NUMBER_SENTINELS, SAMPLE, TYPE, reserved_tags,
};
use crate::errors::{Result, VcfError};
use crate::models::Version;

///
/// Value of a meta entry. A declaration is either a bare flag (`##flag`), a plain scalar
/// (`##reference=file.fa`) or a set of named sub-fields (`##INFO=<ID=AN,...>`).
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaValue {
    NoValue,
    Plain(String),
    KeyValue(BTreeMap<String, String>),
}

///
/// One meta section declaration. Construction validates the value against the rules of its
/// category, so any `MetaEntry` that exists is structurally sound.
///
#[derive(Debug, Clone)]
pub struct MetaEntry {
    pub line: usize,
    pub category: String,
    pub value: MetaValue,
}

impl PartialEq for MetaEntry {
    fn eq(&self, other: &Self) -> bool {
        self.category == other.category && self.value == other.value
    }
}

impl Eq for MetaEntry {}

impl MetaEntry {
    ///
    /// Create a new meta entry and check it is well-formed for its category.
    ///
    /// # Arguments
    /// - `line`: line of the file the declaration was read from
    /// - `category`: the declaration name, e.g. `INFO` or `contig`
    /// - `value`: the parsed value
    /// - `version`: revision of the file, selects the reserved-tag table
    ///
    pub fn new(line: usize, category: &str, value: MetaValue, version: Version) -> Result<Self> {
        let entry = MetaEntry {
            line,
            category: category.to_string(),
            value,
        };
        entry.check_value(version)?;
        Ok(entry)
    }

    pub fn no_value(line: usize, category: &str) -> Self {
        MetaEntry {
            line,
            category: category.to_string(),
            value: MetaValue::NoValue,
        }
    }

    pub fn plain(line: usize, category: &str, value: &str, version: Version) -> Result<Self> {
        MetaEntry::new(line, category, MetaValue::Plain(value.to_string()), version)
    }

    pub fn key_value(
        line: usize,
        category: &str,
        pairs: &[(&str, &str)],
        version: Version,
    ) -> Result<Self> {
        let map = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        MetaEntry::new(line, category, MetaValue::KeyValue(map), version)
    }

    ///
    /// The `ID` sub-field, if this is a key-value entry that declares one.
    ///
    pub fn id_field(&self) -> Option<&str> {
        match &self.value {
            MetaValue::KeyValue(map) => map.get(ID).map(String::as_str),
            _ => None,
        }
    }

    pub fn plain_value(&self) -> Option<&str> {
        match &self.value {
            MetaValue::Plain(value) => Some(value),
            _ => None,
        }
    }

    fn check_value(&self, version: Version) -> Result<()> {
        match &self.value {
            MetaValue::NoValue => Ok(()),
            MetaValue::Plain(value) => {
                if value.contains('\n') {
                    return Err(self.error("Metadata value contains a line break"));
                }
                Ok(())
            }
            MetaValue::KeyValue(map) => match self.category.as_str() {
                ALT => self.check_alt(map),
                CONTIG | SAMPLE => self.require_fields(map, &[ID]),
                FILTER => self.require_fields(map, &[ID, DESCRIPTION]),
                FORMAT => self.check_typed(map, &FORMAT_TYPES, version),
                INFO => self.check_typed(map, &INFO_TYPES, version),
                // assembly, PEDIGREE, pedigreeDB and free-form entries have no requirements
                _ => Ok(()),
            },
        }
    }

    fn error(&self, message: impl Into<String>) -> VcfError {
        VcfError::meta_section(self.line, message)
    }

    fn require_fields(&self, map: &BTreeMap<String, String>, fields: &[&str]) -> Result<()> {
        match fields.iter().find(|field| !map.contains_key(**field)) {
            Some(missing) => Err(self.error(format!(
                "{} metadata does not contain a field called '{}'",
                self.category, missing
            ))),
            None => Ok(()),
        }
    }

    fn check_alt(&self, map: &BTreeMap<String, String>) -> Result<()> {
        self.require_fields(map, &[ID, DESCRIPTION])?;

        let id = &map[ID];
        let prefix = id.split_once(':').map_or(id.as_str(), |(prefix, _)| prefix);
        if !ALT_ID_PREFIXES.contains(&prefix) {
            return Err(self.error(format!(
                "ALT metadata ID does not begin with {}",
                ALT_ID_PREFIXES.join("/")
            )));
        }
        Ok(())
    }

    fn check_typed(
        &self,
        map: &BTreeMap<String, String>,
        types: &[&str],
        version: Version,
    ) -> Result<()> {
        self.require_fields(map, &[ID, NUMBER, TYPE, DESCRIPTION])?;

        let number = &map[NUMBER];
        let is_count = !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit());
        if !is_count && !NUMBER_SENTINELS.contains(&number.as_str()) {
            return Err(self.error(format!(
                "{} metadata Number is not a number, A, R, G or dot",
                self.category
            )));
        }

        let type_ = &map[TYPE];
        if !types.contains(&type_.as_str()) {
            return Err(self.error(format!(
                "{} metadata Type is not a {}",
                self.category,
                one_of(types)
            )));
        }

        self.check_reserved_tag(map, version)
    }

    fn check_reserved_tag(&self, map: &BTreeMap<String, String>, version: Version) -> Result<()> {
        let Some(table) = reserved_tags(&self.category, version) else {
            return Ok(());
        };
        let id = &map[ID];
        let Some(constraint) = table.get(id.as_str()) else {
            return Ok(());
        };

        for (key, required) in [(TYPE, constraint.type_), (NUMBER, constraint.number)] {
            if let Some(required) = required {
                if map[key] != required {
                    return Err(self.error(format!(
                        "{} {} metadata {} is not {}",
                        self.category, id, key, required
                    )));
                }
            }
        }
        Ok(())
    }
}

/// `a, b or c`
fn one_of(values: &[&str]) -> String {
    match values.split_last() {
        Some((last, [])) => last.to_string(),
        Some((last, rest)) => format!("{} or {}", rest.join(", "), last),
        None => String::new(),
    }
}
