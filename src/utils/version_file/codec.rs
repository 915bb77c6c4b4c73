// rendering and extraction of version declarations

use super::types::VersionFileType;
use crate::error::{Error, Result};
use regex::Regex;
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::LazyLock;

static PY_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(?P<indent>\s*)__version__\s*=\s*["'](?P<version>[^"']*)["'](?P<trailer>\s*(?:#.*)?)$"#,
    )
    .expect("python declaration pattern")
});

static C_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(?P<indent>\s*)#\s*define\s+VERSION\s+"(?P<version>[^"]*)"(?P<trailer>\s*(?://.*|/\*.*\*/\s*)?)$"#,
    )
    .expect("c declaration pattern")
});

const JSON_VERSION_KEY: &str = "version";

/// the version-bearing line for `version`
pub fn render_declaration(file_type: VersionFileType, version: &str) -> String {
    match file_type {
        VersionFileType::Py => format!("__version__ = \"{}\"", version),
        VersionFileType::C => format!("#define VERSION \"{}\"", version),
        VersionFileType::Json => format!("\"{}\": \"{}\"", JSON_VERSION_KEY, version),
    }
}

/// content of a version file created from scratch
pub fn render_new_file(file_type: VersionFileType, version: &str) -> String {
    match file_type {
        VersionFileType::Py => format!("{}\n", render_declaration(file_type, version)),
        VersionFileType::C => format!(
            "#ifndef VERSION_H\n#define VERSION_H\n\n{}\n\n#endif /* VERSION_H */\n",
            render_declaration(file_type, version)
        ),
        VersionFileType::Json => format!("{{\n  {}\n}}\n", render_declaration(file_type, version)),
    }
}

/// read the declared version back out of `content`
pub fn extract_version(
    file_type: VersionFileType,
    content: &str,
    path: &Path,
) -> Result<Option<String>> {
    match line_pattern(file_type) {
        Some(pattern) => Ok(content
            .lines()
            .find_map(|line| pattern.captures(line))
            .map(|captures| captures["version"].to_string())),
        None => {
            let Some(object) = parse_json_object(content, path)? else {
                return Ok(None);
            };
            Ok(object
                .get(JSON_VERSION_KEY)
                .and_then(Value::as_str)
                .map(str::to_string))
        }
    }
}

/// replace the declaration in `content`, keeping everything else
pub fn update_content(
    file_type: VersionFileType,
    content: &str,
    version: &str,
    path: &Path,
) -> Result<String> {
    match line_pattern(file_type) {
        Some(pattern) => Ok(replace_declaration_line(
            pattern,
            content,
            &render_declaration(file_type, version),
        )),
        None => {
            let Some(mut object) = parse_json_object(content, path)? else {
                return Ok(render_new_file(file_type, version));
            };
            object.insert(
                JSON_VERSION_KEY.to_string(),
                Value::String(version.to_string()),
            );
            let rendered = serde_json::to_string_pretty(&Value::Object(object)).map_err(|e| {
                Error::VersionFileParse {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                }
            })?;
            Ok(format!("{}\n", rendered))
        }
    }
}

fn line_pattern(file_type: VersionFileType) -> Option<&'static Regex> {
    match file_type {
        VersionFileType::Py => Some(&*PY_DECLARATION),
        VersionFileType::C => Some(&*C_DECLARATION),
        VersionFileType::Json => None,
    }
}

/// swap the first matching line, append the declaration if there is none
///
/// indentation and a trailing comment of the replaced line are kept
fn replace_declaration_line(pattern: &Regex, content: &str, declaration: &str) -> String {
    let mut output = String::with_capacity(content.len() + declaration.len() + 1);
    let mut replaced = false;

    for line in content.split_inclusive('\n') {
        let body = line.trim_end_matches(['\n', '\r']);
        let ending = &line[body.len()..];

        if !replaced && let Some(captures) = pattern.captures(body) {
            output.push_str(&captures["indent"]);
            output.push_str(declaration);
            output.push_str(&captures["trailer"]);
            output.push_str(ending);
            replaced = true;
            continue;
        }

        output.push_str(line);
    }

    if !replaced {
        if !output.is_empty() && !output.ends_with('\n') {
            output.push('\n');
        }
        output.push_str(declaration);
        output.push('\n');
    }

    output
}

/// `None` for blank content, error for anything but a json object
fn parse_json_object(content: &str, path: &Path) -> Result<Option<Map<String, Value>>> {
    if content.trim().is_empty() {
        return Ok(None);
    }

    let value: Value = serde_json::from_str(content).map_err(|e| Error::VersionFileParse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    match value {
        Value::Object(object) => Ok(Some(object)),
        other => Err(Error::VersionFileParse {
            path: path.to_path_buf(),
            reason: format!("expected a json object, found {}", json_kind(&other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
