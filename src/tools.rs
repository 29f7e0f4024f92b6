//! The operations codesmith offers to callers, each with a serializable result.
//!
//! A missing template root is not an error here: listings come back empty,
//! rule parsing falls back to the built-in rules, and generation reports an
//! unsuccessful result.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::{GroupConfig, InputParam, OutputConfig};
use crate::constants::{LOCAL_ROOT_DIR, ROOT_ENV_VAR};
use crate::error::{Error, Result};
use crate::ioutils::write_file;
use crate::module::{ModuleGenerator, ModuleRequest, ModuleResult};
use crate::renderer::{TemplateEngine, TemplateKind};
use crate::rules::{RuleDefinition, RuleRegistry};
use crate::store::TemplateStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupInfo {
    pub name: String,
    pub template_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListGroupsOutput {
    pub groups: Vec<GroupInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateInfo {
    pub name: String,
    pub file: String,
    #[serde(rename = "type")]
    pub kind: TemplateKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_params: Option<Vec<InputParam>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListTemplatesOutput {
    pub group: String,
    pub templates: Vec<TemplateInfo>,
}

/// A declared template as reported by [`CodeGenerator::get_template_config`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateEntry {
    pub name: String,
    pub file: String,
    /// `None` when the file extension is not a supported backend.
    #[serde(rename = "type")]
    pub kind: Option<TemplateKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_params: Option<Vec<InputParam>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateConfigOutput {
    pub group: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub templates: Vec<TemplateEntry>,
    /// Built-in rules with the group's custom rules merged in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<RuleDefinition>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseRulesOutput {
    pub original: Value,
    pub parsed: Value,
    pub extracted_rules: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GenerateCodeRequest {
    pub group: String,
    /// Declared template name, not file name.
    pub template: String,
    pub data: Map<String, Value>,
    pub output_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCodeOutput {
    pub success: bool,
    pub output_path: String,
    pub message: String,
}

/// Entry point of every operation.
#[derive(Debug, Clone, Default)]
pub struct CodeGenerator {
    store: Option<TemplateStore>,
}

impl CodeGenerator {
    /// Uses the discovered template root, if any.
    pub fn discover() -> Self {
        match TemplateStore::discover() {
            Ok(store) => Self::with_store(store),
            Err(err) => {
                debug!("{err}");
                Self { store: None }
            }
        }
    }

    pub fn with_root(root: PathBuf) -> Self {
        Self::with_store(TemplateStore::with_dir(root))
    }

    pub fn with_store(store: TemplateStore) -> Self {
        Self { store: Some(store) }
    }

    pub fn store(&self) -> Option<&TemplateStore> {
        self.store.as_ref()
    }

    fn require_store(&self) -> Result<&TemplateStore> {
        self.store.as_ref().ok_or_else(|| {
            Error::ConfigNotFound(format!(
                "create a {LOCAL_ROOT_DIR} directory or set {ROOT_ENV_VAR}"
            ))
        })
    }

    /// Every group of the template root with its number of template files.
    pub fn list_groups(&self) -> ListGroupsOutput {
        let Some(store) = &self.store else {
            return ListGroupsOutput { groups: Vec::new() };
        };
        let groups = store
            .groups()
            .into_iter()
            .map(|name| {
                let template_count = store.template_files(&name).map(|f| f.len()).unwrap_or(0);
                GroupInfo { name, template_count }
            })
            .collect();
        ListGroupsOutput { groups }
    }

    /// Template files of `group`, described by the group configuration when
    /// it declares them.
    pub fn list_templates(&self, group: &str) -> Result<ListTemplatesOutput> {
        let Some(store) = &self.store else {
            return Ok(ListTemplatesOutput { group: group.to_string(), templates: Vec::new() });
        };
        let config = optional_config(store, group)?;

        let templates = store
            .template_files(group)?
            .into_iter()
            .filter_map(|file| {
                let kind = TemplateKind::from_path(Path::new(&file))?;
                let declared = config.as_ref().and_then(|c| c.template_by_file(&file));
                let name = match declared {
                    Some(definition) => definition.name.clone(),
                    None => file_stem(&file),
                };
                Some(TemplateInfo {
                    name,
                    kind,
                    description: declared.and_then(|d| d.description.clone()),
                    input_params: declared.and_then(|d| d.input_params.clone()),
                    file,
                })
            })
            .collect();

        Ok(ListTemplatesOutput { group: group.to_string(), templates })
    }

    /// Configuration of `group`, optionally narrowed to one template.
    pub fn get_template_config(
        &self,
        group: &str,
        template: Option<&str>,
    ) -> Result<TemplateConfigOutput> {
        let store = self.require_store()?;
        let Some(config) = optional_config(store, group)? else {
            return Ok(TemplateConfigOutput {
                group: group.to_string(),
                name: None,
                description: None,
                version: None,
                templates: Vec::new(),
                rules: None,
            });
        };

        if let Some(name) = template {
            if config.template(name).is_none() {
                return Err(Error::TemplateNotFound {
                    group: group.to_string(),
                    template: name.to_string(),
                });
            }
        }

        let templates = config
            .templates
            .iter()
            .filter(|t| template.map_or(true, |name| t.name == name))
            .map(|t| TemplateEntry {
                name: t.name.clone(),
                file: t.file.clone(),
                kind: TemplateKind::from_path(Path::new(&t.file)),
                description: t.description.clone(),
                input_params: t.input_params.clone(),
                output: t.output.clone(),
            })
            .collect();
        let rules = config.rule_registry().into_definitions();

        Ok(TemplateConfigOutput {
            group: group.to_string(),
            name: Some(config.name),
            description: config.description,
            version: config.version,
            templates,
            rules: Some(rules),
        })
    }

    /// Strips directives out of `data` using the rules of `group`.
    pub fn parse_rules(&self, group: &str, data: Value) -> Result<ParseRulesOutput> {
        let registry = self.registry_for(group)?;
        let transformed = registry.compile().transform(&data);
        Ok(ParseRulesOutput {
            original: data,
            parsed: transformed.cleaned,
            extracted_rules: transformed.rules,
        })
    }

    fn registry_for(&self, group: &str) -> Result<RuleRegistry> {
        let config = match &self.store {
            Some(store) => optional_config(store, group)?,
            None => None,
        };
        Ok(match config {
            Some(config) => config.rule_registry(),
            None => RuleRegistry::builtin(),
        })
    }

    /// Renders one declared template with annotated `data` into `output_path`.
    pub fn generate_code(&self, request: &GenerateCodeRequest) -> GenerateCodeOutput {
        let output_path = request.output_path.display().to_string();
        match self.render_code(request) {
            Ok(()) => {
                info!("Generated {output_path}");
                GenerateCodeOutput { success: true, output_path, message: "generated".into() }
            }
            Err(err) => {
                warn!("Failed to generate {output_path}: {err}");
                GenerateCodeOutput { success: false, output_path, message: err.to_string() }
            }
        }
    }

    fn render_code(&self, request: &GenerateCodeRequest) -> Result<()> {
        if request.output_path.as_os_str().is_empty() {
            return Err(Error::InvalidInput("'outputPath' must not be empty".into()));
        }
        let store = self.require_store()?;
        let config = optional_config(store, &request.group)?;
        let definition = config
            .as_ref()
            .and_then(|c| c.template(&request.template))
            .ok_or_else(|| Error::TemplateNotFound {
                group: request.group.clone(),
                template: request.template.clone(),
            })?;

        let kind = TemplateKind::detect(&definition.file)?;
        let text = store.read_template(&request.group, &definition.file)?;
        let rules = config
            .as_ref()
            .map(GroupConfig::rule_registry)
            .unwrap_or_else(RuleRegistry::builtin)
            .compile();
        let data = rules.transform(&Value::Object(request.data.clone())).cleaned;

        let rendered = TemplateEngine::new().renderer(kind).render(&text, &data)?;
        write_file(&rendered, &request.output_path)
    }

    /// See [`ModuleGenerator::generate`].
    pub fn generate_module(&self, request: &ModuleRequest) -> ModuleResult {
        match self.require_store() {
            Ok(store) => ModuleGenerator::new(store).generate(request),
            Err(err) => ModuleResult::aborted(&err),
        }
    }
}

/// The group's configuration, or `None` when the group has none.
fn optional_config(store: &TemplateStore, group: &str) -> Result<Option<GroupConfig>> {
    match store.load_group(group) {
        Ok(config) => Ok(Some(config)),
        Err(Error::ConfigNotFound(reason)) => {
            debug!("{reason}");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

fn file_stem(file: &str) -> String {
    Path::new(file)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(file)
        .to_string()
}
