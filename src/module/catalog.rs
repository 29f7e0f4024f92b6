//! Packages, imports and the fixed artifact catalog of a module.

use indexmap::IndexSet;
use serde_json::{json, Value};

use super::field::{Field, FieldSets};

/// `fieldType` -> fully qualified import.
const TYPE_IMPORTS: &[(&str, &str)] = &[
    ("BigDecimal", "java.math.BigDecimal"),
    ("BigInteger", "java.math.BigInteger"),
    ("LocalDate", "java.time.LocalDate"),
    ("LocalDateTime", "java.time.LocalDateTime"),
    ("LocalTime", "java.time.LocalTime"),
    ("Date", "java.util.Date"),
];

/// Package names of one module, all derived from `basePackage.moduleName`.
#[derive(Debug, Clone, PartialEq)]
pub struct Packages {
    pub full: String,
    pub po: String,
    pub dto: String,
    pub form: String,
    pub query: String,
    pub converter: String,
    pub enums: String,
    pub mapper: String,
    pub service: String,
    pub service_impl: String,
    pub controller: String,
}

impl Packages {
    pub fn new(base_package: &str, module_name: &str) -> Self {
        let full = format!("{base_package}.{module_name}");
        let sub = |suffix: &str| format!("{full}.{suffix}");
        Packages {
            po: sub("entity.po"),
            dto: sub("entity.dto"),
            form: sub("entity.form"),
            query: sub("entity.query"),
            converter: sub("entity.converter"),
            enums: sub("entity.enums"),
            mapper: sub("mapper"),
            service: sub("service"),
            service_impl: sub("service.impl"),
            controller: sub("controller"),
            full,
        }
    }
}

/// Imports needed by `fields`, in first-seen order without duplicates.
pub fn collect_imports(fields: &[Field], enum_package: &str) -> Vec<String> {
    let mut imports = IndexSet::new();
    for field in fields {
        if let Some((_, import)) = TYPE_IMPORTS.iter().find(|(ty, _)| *ty == field.field_type) {
            imports.insert(import.to_string());
        }
        if let Some(enum_def) = &field.enum_def {
            imports.insert(format!("{enum_package}.{}", enum_def.name));
        }
    }
    imports.into_iter().collect()
}

/// Which output root an artifact is written under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputRoot {
    /// `outputDir` plus the module package as directories.
    Code,
    /// `resourcesDir`, or `resources` next to `outputDir`.
    Resources,
}

/// One generated artifact of a module.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactSpec {
    /// Catalog name; also the name of the template in the group configuration.
    pub name: &'static str,
    pub output_subdir: &'static str,
    pub file_name: String,
    /// Merged over the base context, winning on key collisions.
    pub extra_context: Value,
    pub root: OutputRoot,
}

impl ArtifactSpec {
    fn code(name: &'static str, subdir: &'static str, file_name: String, extra: Value) -> Self {
        ArtifactSpec {
            name,
            output_subdir: subdir,
            file_name,
            extra_context: extra,
            root: OutputRoot::Code,
        }
    }
}

/// Names of the ten catalog entries, in generation order.
pub const ARTIFACT_NAMES: &[&str] = &[
    "entity",
    "dto",
    "form",
    "query",
    "converter",
    "mapper",
    "mapper-xml",
    "service",
    "service-impl",
    "controller",
];

/// Builds the catalog for `class_name`.
pub fn catalog(
    class_name: &str,
    table_name: &str,
    packages: &Packages,
    fields: &FieldSets,
) -> Vec<ArtifactSpec> {
    let p = packages;
    let imports = |list: &[Field]| collect_imports(list, &p.enums);

    vec![
        ArtifactSpec::code(
            "entity",
            "entity/po",
            format!("{class_name}.java"),
            json!({ "packageName": p.po, "imports": imports(&fields.persistence) }),
        ),
        ArtifactSpec::code(
            "dto",
            "entity/dto",
            format!("{class_name}DTO.java"),
            json!({ "packageName": p.dto, "imports": imports(&fields.transfer) }),
        ),
        ArtifactSpec::code(
            "form",
            "entity/form",
            format!("{class_name}Form.java"),
            json!({ "packageName": p.form, "imports": imports(fields.form()) }),
        ),
        ArtifactSpec::code(
            "query",
            "entity/query",
            format!("{class_name}Query.java"),
            json!({ "packageName": p.query, "imports": imports(&fields.query) }),
        ),
        ArtifactSpec::code(
            "converter",
            "entity/converter",
            format!("{class_name}Converter.java"),
            json!({
                "packageName": p.converter,
                "entityPackage": p.po,
                "dtoPackage": p.dto,
                "formPackage": p.form,
            }),
        ),
        ArtifactSpec::code(
            "mapper",
            "mapper",
            format!("{class_name}Mapper.java"),
            json!({ "packageName": p.mapper, "entityPackage": p.po }),
        ),
        ArtifactSpec {
            name: "mapper-xml",
            output_subdir: "mapper",
            file_name: format!("{class_name}Mapper.xml"),
            extra_context: json!({
                "namespace": format!("{}.{class_name}Mapper", p.mapper),
                "entityPackage": p.po,
                "dtoPackage": p.dto,
                "queryPackage": p.query,
            }),
            root: OutputRoot::Resources,
        },
        ArtifactSpec::code(
            "service",
            "service",
            format!("{class_name}Service.java"),
            json!({
                "packageName": p.service,
                "entityPackage": p.po,
                "dtoPackage": p.dto,
                "formPackage": p.form,
                "queryPackage": p.query,
            }),
        ),
        ArtifactSpec::code(
            "service-impl",
            "service/impl",
            format!("{class_name}ServiceImpl.java"),
            json!({
                "packageName": p.service_impl,
                "entityPackage": p.po,
                "dtoPackage": p.dto,
                "formPackage": p.form,
                "queryPackage": p.query,
                "mapperPackage": p.mapper,
                "servicePackage": p.service,
                "converterPackage": p.converter,
            }),
        ),
        ArtifactSpec::code(
            "controller",
            "controller",
            format!("{class_name}Controller.java"),
            json!({
                "packageName": p.controller,
                "entityPackage": p.po,
                "dtoPackage": p.dto,
                "formPackage": p.form,
                "queryPackage": p.query,
                "servicePackage": p.service,
                "converterPackage": p.converter,
                "requestMapping": table_name.replace('_', "-"),
            }),
        ),
    ]
}
