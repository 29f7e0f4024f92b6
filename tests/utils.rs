#![allow(dead_code)]

use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Creates `<root>/<group>` with a `template.json` and the given template files.
pub fn write_group(root: &Path, group: &str, config: &Value, files: &[(&str, &str)]) {
    let dir = root.join(group);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("template.json"), serde_json::to_string_pretty(config).unwrap()).unwrap();
    for (name, content) in files {
        fs::write(dir.join(name), content).unwrap();
    }
}

pub const ENTITY_J2: &str = r#"package {{ packageName }};
{% for i in imports %}
import {{ i }};
{%- endfor %}

/** {{ comment }} by {{ author }} on {{ date }} */
public class {{ className }} {
{%- for field in persistenceFields %}
{%- if field._rules.enum %}
    private {{ field._rules.enum.name }} {{ field.fieldName }};
{%- else %}
    private {{ field.fieldType }} {{ field.fieldName }};
{%- endif %}
{%- if field._rules is defined and field._rules.dict %} // dict {{ field._rules.dict.code }}{% endif %}
{%- endfor %}
}
"#;

pub const DTO_HBS: &str = r#"package {{packageName}};
{{#each imports}}
import {{this}};
{{/each}}
public class {{className}}DTO {
{{#each transferFields}}
    private {{#if enumDef}}{{enumDef.name}}{{else}}{{fieldType}}{{/if}} {{fieldName}};
{{/each}}
}
"#;

pub const SIMPLE_HBS: &str = "package {{packageName}}; // {{className}}\n";

pub const MAPPER_XML_HBS: &str = r#"<mapper namespace="{{namespace}}" table="{{tableName}}"/>
"#;

pub const CONTROLLER_J2: &str = r#"package {{ packageName }};

@RequestMapping("/{{ requestMapping }}")
public class {{ className }}Controller {
    private {{ className }}Service {{ classNameLower }}Service;
{%- for field in queryFields %}
    // query {{ field.fieldName }}{% if not field._rules.ignore %} visible{% endif %}
{%- endfor %}
}
"#;

pub const ENUM_J2: &str = r#"package {{ packageName }};

public enum {{ enumName }} {
{%- for item in values %}
    {{ item.code|upper }}("{{ item.code }}", "{{ item.desc }}"){{ "," if not loop.last else ";" }}
{%- endfor %}
}
"#;

/// Group configuration declaring every catalog artifact plus `enum`.
pub fn java_group_config() -> Value {
    json!({
        "name": "java",
        "description": "Java CRUD module",
        "version": "1.0.0",
        "templates": [
            { "name": "entity", "file": "entity.java.j2", "description": "Persistent entity" },
            { "name": "dto", "file": "dto.java.hbs" },
            { "name": "form", "file": "form.java.hbs" },
            { "name": "query", "file": "query.java.hbs" },
            { "name": "converter", "file": "converter.java.hbs" },
            { "name": "mapper", "file": "mapper.java.hbs" },
            { "name": "mapper-xml", "file": "mapper.xml.hbs" },
            { "name": "service", "file": "service.java.hbs" },
            { "name": "service-impl", "file": "service-impl.java.hbs" },
            { "name": "controller", "file": "controller.java.j2" },
            { "name": "enum", "file": "enum.java.j2" }
        ]
    })
}

/// A template root holding a complete `java` group.
pub fn java_template_root() -> TempDir {
    let root = tempfile::tempdir().unwrap();
    write_group(
        root.path(),
        "java",
        &java_group_config(),
        &[
            ("entity.java.j2", ENTITY_J2),
            ("dto.java.hbs", DTO_HBS),
            ("form.java.hbs", SIMPLE_HBS),
            ("query.java.hbs", SIMPLE_HBS),
            ("converter.java.hbs", SIMPLE_HBS),
            ("mapper.java.hbs", SIMPLE_HBS),
            ("mapper.xml.hbs", MAPPER_XML_HBS),
            ("service.java.hbs", SIMPLE_HBS),
            ("service-impl.java.hbs", SIMPLE_HBS),
            ("controller.java.j2", CONTROLLER_J2),
            ("enum.java.j2", ENUM_J2),
        ],
    );
    root
}

/// Module request for a `sys_user` table writing under `out`.
pub fn user_module_request(out: &Path) -> Value {
    json!({
        "group": "java",
        "basePackage": "com.acme",
        "moduleName": "user",
        "className": "User",
        "tableName": "sys_user",
        "comment": "System user",
        "outputDir": out.join("src/main/java"),
        "date": "2024-01-31",
        "fields": [
            { "columnName": "id", "fieldName": "id", "fieldType": "Long",
              "isPrimaryKey": true, "isQueryField": true },
            { "columnName": "user_name", "fieldName": "userName", "fieldType": "String",
              "comment": "User name", "isQueryField": true },
            { "columnName": "sex", "fieldName": "sex", "fieldType": "String",
              "atomEnum": { "name": "Gender", "valueType": "String",
                            "values": [{ "code": "1", "desc": "Male" }, { "code": "2", "desc": "Female" }] } },
            { "columnName": "status", "fieldName": "status", "fieldType": "Integer",
              "dict": { "code": "USER_STATUS" } },
            { "columnName": "balance", "fieldName": "balance", "fieldType": "BigDecimal" },
            { "columnName": "password", "fieldName": "password", "fieldType": "String",
              "ignore": true },
            { "columnName": "gender2", "fieldName": "gender2", "fieldType": "String",
              "enumDef": { "name": "Gender", "values": [{ "code": "9", "desc": "Shadowed" }] } }
        ]
    })
}
