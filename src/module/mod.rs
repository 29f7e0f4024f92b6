//! Module generation: renders the fixed artifact catalog of one table plus
//! one enumeration per distinct enum its fields reference.
//!
//! Every requested artifact is attempted and reported, so one missing or
//! broken template never hides the outcome of the others.

pub mod catalog;
pub mod field;

use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::GroupConfig;
use crate::constants::defaults;
use crate::error::{Error, Result};
use crate::ext::PathExt;
use crate::ioutils::write_file;
use crate::renderer::filters::lower_first;
use crate::renderer::rewrite::{rewrite_enum_values, rewrite_field_paths};
use crate::renderer::{TemplateEngine, TemplateKind};
use crate::store::TemplateStore;

pub use catalog::{catalog, collect_imports, ArtifactSpec, OutputRoot, Packages, ARTIFACT_NAMES};
pub use field::{DictRef, EnumDef, EnumValue, Field, FieldInput, FieldSets};

/// Subdirectory of the code root that receives enumerations.
const ENUM_SUBDIR: &str = "entity/enums";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ModuleRequest {
    pub group: String,
    /// Package prefix without the module name, e.g. `com.acme`.
    pub base_package: String,
    pub module_name: String,
    pub class_name: String,
    pub table_name: String,
    #[serde(default)]
    pub comment: Option<String>,
    /// Source root; the module package is appended as directories.
    pub output_dir: PathBuf,
    #[serde(default)]
    pub resources_dir: Option<PathBuf>,
    pub fields: Vec<FieldInput>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Restricts the catalog artifacts to these names. Enumerations referenced
    /// by the fields are generated regardless.
    #[serde(default)]
    pub templates: Option<Vec<String>>,
}

impl ModuleRequest {
    fn validate(&self) -> Result<()> {
        let required = [
            ("group", self.group.as_str()),
            ("basePackage", self.base_package.as_str()),
            ("moduleName", self.module_name.as_str()),
            ("className", self.class_name.as_str()),
            ("tableName", self.table_name.as_str()),
        ];
        if let Some((name, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(Error::InvalidInput(format!("'{name}' must not be empty")));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(Error::InvalidInput("'outputDir' must not be empty".into()));
        }
        if self.fields.is_empty() {
            return Err(Error::InvalidInput("'fields' must contain at least one field".into()));
        }
        Ok(())
    }

    fn wants(&self, artifact: &str) -> bool {
        self.templates
            .as_ref()
            .map_or(true, |names| names.iter().any(|name| name == artifact))
    }

    /// Source root of the module package.
    pub fn code_root(&self) -> PathBuf {
        self.output_dir.join_package(&format!("{}.{}", self.base_package, self.module_name))
    }

    pub fn resources_root(&self) -> PathBuf {
        match &self.resources_dir {
            Some(dir) => dir.clone(),
            None => self
                .output_dir
                .parent()
                .unwrap_or_else(|| Path::new(""))
                .join("resources"),
        }
    }
}

/// Header values shared by every artifact, defaults applied.
#[derive(Debug, Clone, PartialEq)]
struct Metadata {
    comment: String,
    author: String,
    date: String,
    version: String,
    email: String,
}

impl Metadata {
    fn resolve(request: &ModuleRequest) -> Self {
        let given = |value: &Option<String>| value.clone().filter(|v| !v.is_empty());
        Metadata {
            comment: given(&request.comment).unwrap_or_else(|| request.class_name.clone()),
            author: given(&request.author).unwrap_or_else(|| defaults::AUTHOR.to_string()),
            date: given(&request.date).unwrap_or_else(|| {
                chrono::Local::now().format(defaults::DATE_FORMAT).to_string()
            }),
            version: given(&request.version).unwrap_or_else(|| defaults::VERSION.to_string()),
            email: given(&request.email).unwrap_or_else(|| defaults::EMAIL.to_string()),
        }
    }
}

/// Outcome of one artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub artifact_name: String,
    /// Written file; empty when generation failed.
    pub output_path: String,
    pub success: bool,
    pub message: String,
}

impl GenerationResult {
    fn generated(artifact_name: &str, output_path: &Path, message: String) -> Self {
        GenerationResult {
            artifact_name: artifact_name.to_string(),
            output_path: output_path.display().to_string(),
            success: true,
            message,
        }
    }

    fn failed(artifact_name: &str, err: &Error) -> Self {
        warn!("Failed to generate '{artifact_name}': {err}");
        GenerationResult {
            artifact_name: artifact_name.to_string(),
            output_path: String::new(),
            success: false,
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleResult {
    /// `true` when no artifact failed.
    pub success: bool,
    pub results: Vec<GenerationResult>,
    pub success_count: usize,
    pub fail_count: usize,
    pub message: String,
}

impl ModuleResult {
    pub fn from_results(results: Vec<GenerationResult>) -> Self {
        let success_count = results.iter().filter(|r| r.success).count();
        let fail_count = results.len() - success_count;
        ModuleResult {
            success: fail_count == 0,
            message: format!("Generation finished: {success_count} succeeded, {fail_count} failed"),
            results,
            success_count,
            fail_count,
        }
    }

    /// Nothing could be attempted.
    pub fn aborted(err: &Error) -> Self {
        ModuleResult {
            success: false,
            results: Vec::new(),
            success_count: 0,
            fail_count: 0,
            message: err.to_string(),
        }
    }
}

/// Everything derived from a request before any template is touched.
struct Plan<'r> {
    request: &'r ModuleRequest,
    config: GroupConfig,
    fields: FieldSets,
    packages: Packages,
    metadata: Metadata,
    base_context: Value,
    code_root: PathBuf,
    resources_root: PathBuf,
}

/// Renders modules from the templates of one [`TemplateStore`].
pub struct ModuleGenerator<'a> {
    store: &'a TemplateStore,
    engine: TemplateEngine,
}

impl<'a> ModuleGenerator<'a> {
    pub fn new(store: &'a TemplateStore) -> Self {
        Self { store, engine: TemplateEngine::new() }
    }

    /// Generates every requested artifact and enumeration of `request`.
    ///
    /// Invalid requests and missing group configuration abort before any
    /// file is written and produce a result without entries.
    pub fn generate(&self, request: &ModuleRequest) -> ModuleResult {
        let plan = match self.plan(request) {
            Ok(plan) => plan,
            Err(err) => {
                warn!("Module generation aborted: {err}");
                return ModuleResult::aborted(&err);
            }
        };

        info!(
            "Generating module '{}' into {}",
            plan.packages.full,
            plan.code_root.display()
        );

        let mut results = Vec::new();
        for spec in catalog(&request.class_name, &request.table_name, &plan.packages, &plan.fields)
            .iter()
            .filter(|spec| request.wants(spec.name))
        {
            let result = match self.render_artifact(&plan, spec) {
                Ok(path) => GenerationResult::generated(spec.name, &path, "generated".into()),
                Err(err) => GenerationResult::failed(spec.name, &err),
            };
            results.push(result);
        }
        self.generate_enums(&plan, &mut results);

        let result = ModuleResult::from_results(results);
        info!("{}", result.message);
        result
    }

    fn plan<'r>(&self, request: &'r ModuleRequest) -> Result<Plan<'r>> {
        request.validate()?;
        if let Some(names) = &request.templates {
            for unknown in names
                .iter()
                .filter(|n| !ARTIFACT_NAMES.contains(&n.as_str()) && *n != defaults::ENUM_TEMPLATE)
            {
                warn!("Ignoring unknown artifact '{unknown}'");
            }
        }

        let config = self.store.load_group(&request.group)?;
        let fields = FieldSets::classify(&request.fields);
        let packages = Packages::new(&request.base_package, &request.module_name);
        let metadata = Metadata::resolve(request);

        let base_context = json!({
            "className": request.class_name,
            "classNameLower": lower_first(&request.class_name),
            "tableName": request.table_name,
            "comment": metadata.comment,
            "author": metadata.author,
            "date": metadata.date,
            "version": metadata.version,
            "email": metadata.email,
            "fields": fields.all,
            "queryFields": fields.query,
            "persistenceFields": fields.persistence,
            "transferFields": fields.transfer,
            "formFields": fields.form(),
            "enums": fields.enums(),
        });

        Ok(Plan {
            request,
            config,
            fields,
            packages,
            metadata,
            base_context,
            code_root: request.code_root(),
            resources_root: request.resources_root(),
        })
    }

    /// Resolves a catalog entry to its backend and template text.
    fn load_template(&self, plan: &Plan<'_>, name: &str) -> Result<(TemplateKind, String)> {
        let definition = plan.config.template(name).ok_or_else(|| Error::TemplateNotFound {
            group: plan.request.group.clone(),
            template: name.to_string(),
        })?;
        let kind = TemplateKind::detect(&definition.file)?;
        let text = self.store.read_template(&plan.request.group, &definition.file)?;
        Ok((kind, text))
    }

    fn render_artifact(&self, plan: &Plan<'_>, spec: &ArtifactSpec) -> Result<PathBuf> {
        debug!("Rendering artifact '{}'", spec.name);
        let (kind, mut text) = self.load_template(plan, spec.name)?;
        if kind.requires_path_rewrite() {
            text = rewrite_field_paths(&text);
        }

        let context = merge_context(&plan.base_context, &spec.extra_context);
        let rendered = self.engine.renderer(kind).render(&text, &context)?;

        let root = match spec.root {
            OutputRoot::Code => &plan.code_root,
            OutputRoot::Resources => &plan.resources_root,
        };
        let path = root.join(spec.output_subdir).join(&spec.file_name);
        write_file(&rendered, &path)?;
        Ok(path)
    }

    fn generate_enums(&self, plan: &Plan<'_>, results: &mut Vec<GenerationResult>) {
        let enums = plan.fields.enums();
        if enums.is_empty() {
            return;
        }
        if plan.config.template(defaults::ENUM_TEMPLATE).is_none() {
            debug!("Group '{}' declares no enum template", plan.request.group);
            return;
        }

        let (kind, text) = match self.load_template(plan, defaults::ENUM_TEMPLATE) {
            Ok((kind, text)) if kind.requires_path_rewrite() => (kind, rewrite_enum_values(&text)),
            Ok(loaded) => loaded,
            Err(err) => {
                results.push(GenerationResult::failed(defaults::ENUM_TEMPLATE, &err));
                return;
            }
        };

        for enum_def in enums {
            let result = match self.render_enum(plan, kind, &text, enum_def) {
                Ok(path) => GenerationResult::generated(
                    defaults::ENUM_TEMPLATE,
                    &path,
                    format!("generated enum {}", enum_def.name),
                ),
                Err(err) => GenerationResult::failed(defaults::ENUM_TEMPLATE, &err),
            };
            results.push(result);
        }
    }

    fn render_enum(
        &self,
        plan: &Plan<'_>,
        kind: TemplateKind,
        template: &str,
        enum_def: &EnumDef,
    ) -> Result<PathBuf> {
        debug!("Rendering enum '{}'", enum_def.name);
        let values: Vec<Value> = enum_def
            .values
            .iter()
            .map(|value| {
                json!({
                    "code": value.code,
                    "desc": value.desc,
                    "enumCodeName": value.code_name(),
                })
            })
            .collect();
        let meta = &plan.metadata;
        let context = json!({
            "packageName": plan.packages.enums,
            "enumName": enum_def.name,
            "valueType": enum_def.value_type,
            "comment": enum_def.name,
            "values": values,
            "author": meta.author,
            "date": meta.date,
            "version": meta.version,
            "email": meta.email,
        });

        let rendered = self.engine.renderer(kind).render(template, &context)?;
        let path = plan.code_root.join(ENUM_SUBDIR).join(format!("{}.java", enum_def.name));
        write_file(&rendered, &path)?;
        Ok(path)
    }
}

/// `base` with `extra`'s entries laid over it.
fn merge_context(base: &Value, extra: &Value) -> Value {
    let mut merged = base.clone();
    if let (Value::Object(target), Value::Object(extra)) = (&mut merged, extra) {
        target.extend(extra.iter().map(|(key, value)| (key.clone(), value.clone())));
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(value: Value) -> ModuleRequest {
        serde_json::from_value(value).unwrap()
    }

    fn minimal() -> Value {
        json!({
            "group": "java",
            "basePackage": "com.acme",
            "moduleName": "user",
            "className": "User",
            "tableName": "sys_user",
            "outputDir": "/out/src/main/java",
            "fields": [{ "columnName": "id", "fieldName": "id", "fieldType": "Long" }]
        })
    }

    #[test]
    fn test_output_roots() {
        let req = request(minimal());
        assert_eq!(req.code_root(), PathBuf::from("/out/src/main/java/com/acme/user"));
        assert_eq!(req.resources_root(), PathBuf::from("/out/src/main/resources"));

        let mut value = minimal();
        value["resourcesDir"] = json!("/res");
        assert_eq!(request(value).resources_root(), PathBuf::from("/res"));
    }

    #[test]
    fn test_metadata_defaults() {
        let mut value = minimal();
        value["author"] = json!("");
        value["version"] = json!("2.0.0");
        let meta = Metadata::resolve(&request(value));
        assert_eq!(meta.author, defaults::AUTHOR);
        assert_eq!(meta.version, "2.0.0");
        assert_eq!(meta.email, defaults::EMAIL);
        assert_eq!(meta.comment, "User");
        assert_eq!(meta.date.len(), "2024-01-31".len());
    }

    #[test]
    fn test_validation() {
        assert!(request(minimal()).validate().is_ok());

        let mut value = minimal();
        value["fields"] = json!([]);
        assert!(matches!(request(value).validate(), Err(Error::InvalidInput(_))));

        let mut value = minimal();
        value["className"] = json!(" ");
        assert!(matches!(
            request(value).validate(),
            Err(Error::InvalidInput(m)) if m.contains("className")
        ));
    }

    #[test]
    fn test_unknown_request_keys_are_rejected() {
        let mut value = minimal();
        value["unexpected"] = json!(true);
        assert!(serde_json::from_value::<ModuleRequest>(value).is_err());
    }

    #[test]
    fn test_restriction() {
        let mut value = minimal();
        value["templates"] = json!(["entity", "enum"]);
        let req = request(value);
        assert!(req.wants("entity") && req.wants("enum"));
        assert!(!req.wants("dto"));
        assert!(request(minimal()).wants("dto"));
    }

    #[test]
    fn test_merge_context_overrides_base() {
        let merged = merge_context(&json!({ "a": 1, "b": 2 }), &json!({ "b": 3, "c": 4 }));
        assert_eq!(merged, json!({ "a": 1, "b": 3, "c": 4 }));
    }

    #[test]
    fn test_result_summary() {
        let ok =
            GenerationResult::generated("entity", Path::new("/x/User.java"), "generated".into());
        let failed = GenerationResult::failed("dto", &Error::InvalidInput("boom".into()));
        assert_eq!(failed.output_path, "");

        let result = ModuleResult::from_results(vec![ok, failed]);
        assert!(!result.success);
        assert_eq!((result.success_count, result.fail_count), (1, 1));
        assert_eq!(result.message, "Generation finished: 1 succeeded, 1 failed");
        assert!(ModuleResult::from_results(Vec::new()).success);
    }
}
