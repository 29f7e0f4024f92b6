//! Field normalization and classification.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::constants::defaults;

/// One column as given by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldInput {
    pub column_name: String,
    pub field_name: String,
    pub field_type: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub is_primary_key: Option<bool>,
    #[serde(default)]
    pub is_query_field: Option<bool>,
    #[serde(default)]
    pub ignore: Option<bool>,
    #[serde(default, alias = "atomEnum")]
    pub enum_def: Option<EnumDef>,
    #[serde(default, alias = "dict")]
    pub dict_ref: Option<DictRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumDef {
    pub name: String,
    #[serde(default = "default_value_type")]
    pub value_type: String,
    #[serde(default)]
    pub values: Vec<EnumValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumValue {
    pub code: String,
    pub desc: String,
}

impl EnumValue {
    /// Constant name of the value in generated enumerations: `1` -> `V1`.
    pub fn code_name(&self) -> String {
        format!("{}{}", defaults::ENUM_CODE_PREFIX, self.code)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictRef {
    pub code: String,
}

fn default_value_type() -> String {
    defaults::ENUM_VALUE_TYPE.to_string()
}

/// A field with every optional attribute filled in. This is what templates see.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub column_name: String,
    pub field_name: String,
    pub field_type: String,
    pub comment: String,
    pub string_type: bool,
    pub is_primary_key: bool,
    pub is_query_field: bool,
    pub ignore: bool,
    pub enum_def: Option<EnumDef>,
    pub dict_ref: Option<DictRef>,
}

impl From<&FieldInput> for Field {
    fn from(input: &FieldInput) -> Self {
        Field {
            column_name: input.column_name.clone(),
            field_name: input.field_name.clone(),
            field_type: input.field_type.clone(),
            comment: input.comment.clone().unwrap_or_default(),
            string_type: input.field_type == "String",
            is_primary_key: input.is_primary_key.unwrap_or(false),
            is_query_field: input.is_query_field.unwrap_or(false),
            ignore: input.ignore.unwrap_or(false),
            enum_def: input.enum_def.clone(),
            dict_ref: input.dict_ref.clone(),
        }
    }
}

/// Normalized fields and the subsets each artifact renders.
#[derive(Debug, Clone, Default)]
pub struct FieldSets {
    pub all: Vec<Field>,
    /// `isQueryField`
    pub query: Vec<Field>,
    /// not `isPrimaryKey`
    pub persistence: Vec<Field>,
    /// persistence fields that are not `ignore`d; forms share this subset
    pub transfer: Vec<Field>,
}

impl FieldSets {
    pub fn classify(inputs: &[FieldInput]) -> Self {
        let all: Vec<Field> = inputs.iter().map(Field::from).collect();
        let query = all.iter().filter(|f| f.is_query_field).cloned().collect();
        let persistence: Vec<Field> = all.iter().filter(|f| !f.is_primary_key).cloned().collect();
        let transfer = persistence.iter().filter(|f| !f.ignore).cloned().collect();
        Self { all, query, persistence, transfer }
    }

    pub fn form(&self) -> &[Field] {
        &self.transfer
    }

    /// Distinct enumerations referenced by any field, by name; the first
    /// definition of a name wins.
    pub fn enums(&self) -> Vec<&EnumDef> {
        let mut distinct: IndexMap<&str, &EnumDef> = IndexMap::new();
        for def in self.all.iter().filter_map(|f| f.enum_def.as_ref()) {
            distinct.entry(def.name.as_str()).or_insert(def);
        }
        distinct.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> Vec<FieldInput> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_normalization_fills_defaults() {
        let input = fields(json!([
            { "columnName": "user_name", "fieldName": "userName", "fieldType": "String" }
        ]));
        let field = Field::from(&input[0]);
        assert_eq!(field.comment, "");
        assert!(field.string_type);
        assert!(!field.is_primary_key && !field.is_query_field && !field.ignore);
        assert_eq!(field.enum_def, None);

        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(value["enumDef"], json!(null));
        assert_eq!(value["stringType"], json!(true));
    }

    #[test]
    fn test_aliases_and_value_type_default() {
        let input = fields(json!([{
            "columnName": "sex", "fieldName": "sex", "fieldType": "Integer",
            "atomEnum": { "name": "Gender", "values": [{ "code": "1", "desc": "Male" }] },
            "dict": { "code": "SEX" }
        }]));
        let enum_def = input[0].enum_def.as_ref().unwrap();
        assert_eq!(enum_def.value_type, "String");
        assert_eq!(enum_def.values[0].code_name(), "V1");
        assert_eq!(input[0].dict_ref.as_ref().unwrap().code, "SEX");
    }

    #[test]
    fn test_classification() {
        let input = fields(json!([
            { "columnName": "id", "fieldName": "id", "fieldType": "Long", "isPrimaryKey": true, "isQueryField": true },
            { "columnName": "name", "fieldName": "name", "fieldType": "String", "isQueryField": true },
            { "columnName": "secret", "fieldName": "secret", "fieldType": "String", "ignore": true }
        ]));
        let sets = FieldSets::classify(&input);
        let names = |list: &[Field]| list.iter().map(|f| f.field_name.clone()).collect::<Vec<_>>();

        assert_eq!(names(&sets.query), ["id", "name"]);
        assert_eq!(names(&sets.persistence), ["name", "secret"]);
        assert_eq!(names(&sets.transfer), ["name"]);
        assert_eq!(sets.form(), sets.transfer.as_slice());
        assert_eq!(sets.all.len(), 3);
    }

    #[test]
    fn test_enum_dedup_first_wins() {
        let input = fields(json!([
            { "columnName": "a", "fieldName": "a", "fieldType": "String",
              "enumDef": { "name": "Status", "values": [{ "code": "A", "desc": "first" }] } },
            { "columnName": "b", "fieldName": "b", "fieldType": "String",
              "enumDef": { "name": "Kind", "values": [] } },
            { "columnName": "c", "fieldName": "c", "fieldType": "String",
              "enumDef": { "name": "Status", "values": [{ "code": "B", "desc": "second" }] } }
        ]));
        let sets = FieldSets::classify(&input);
        let enums = sets.enums();
        assert_eq!(enums.len(), 2);
        assert_eq!(enums[0].name, "Status");
        assert_eq!(enums[0].values[0].desc, "first");
        assert_eq!(enums[1].name, "Kind");
    }
}
