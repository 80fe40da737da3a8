//! Comment-preserving JSON-with-comments documents.
//!
//! `tsconfig.json` files are JSONC: line and block comments, trailing commas and
//! the occasional unquoted key. Semantic reads go through `jsonc-parser`'s serde
//! conversion; edits go through its concrete syntax tree, so comments, blank
//! lines and formatting outside the edited property survive untouched.

use anyhow::{anyhow, bail, Context, Result};
use jsonc_parser::cst::{CstInputValue, CstObject, CstRootNode};
use jsonc_parser::ParseOptions;
use serde::Serialize;
use serde_json::Value;

const DEFAULT_INDENT: &str = "  ";

/// A JSONC document whose root is an object.
#[derive(Debug, Clone)]
pub struct JsoncDocument {
    text: String,
    value: Value,
}

impl JsoncDocument {
    /// Parse a document, rejecting anything whose root is not an object.
    pub fn parse(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        let value = parse_value(&text)?;
        if !value.is_object() {
            bail!("expected a JSON object at the document root");
        }
        Ok(JsoncDocument { text, value })
    }

    /// The current document text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The semantic value of the document, comments stripped.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Look up a value by key path.
    pub fn get(&self, path: &[&str]) -> Option<&Value> {
        path.iter()
            .try_fold(&self.value, |current, key| current.as_object()?.get(*key))
    }

    /// Set the value at `path`, creating missing parent objects.
    ///
    /// An existing property keeps its position; a new one is appended to its
    /// parent object.
    pub fn set(&mut self, path: &[&str], value: &Value) -> Result<()> {
        let (last, parents) = path
            .split_last()
            .ok_or_else(|| anyhow!("cannot set an empty key path"))?;

        let root = self.syntax_tree()?;
        let mut object = root_object(&root)?;
        for (depth, key) in parents.iter().enumerate() {
            object = match object.get(key) {
                Some(prop) => prop
                    .object_value()
                    .ok_or_else(|| anyhow!("`{}` is not an object", path[..=depth].join(".")))?,
                None => object.object_value_or_set(key),
            };
        }

        match object.get(last) {
            Some(prop) => prop.set_value(to_input(value)),
            None => {
                object.append(last, to_input(value));
            }
        }
        self.commit(&root)
    }

    /// Remove the property at `path`. Returns whether anything was removed.
    pub fn remove(&mut self, path: &[&str]) -> Result<bool> {
        let (last, parents) = path
            .split_last()
            .ok_or_else(|| anyhow!("cannot remove an empty key path"))?;

        let root = self.syntax_tree()?;
        let mut object = root_object(&root)?;
        for key in parents {
            match object.object_value(key) {
                Some(inner) => object = inner,
                None => return Ok(false),
            }
        }

        let Some(prop) = object.get(last) else {
            return Ok(false);
        };
        prop.remove();
        self.commit(&root)?;
        Ok(true)
    }

    /// Serialize without comments, as plain pretty-printed JSON in the
    /// document's own indentation.
    pub fn to_plain_string(&self) -> Result<String> {
        let unit = self
            .syntax_tree()?
            .single_indent_text()
            .unwrap_or_else(|| DEFAULT_INDENT.to_string());

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(unit.as_bytes());
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.value.serialize(&mut serializer)?;
        let mut rendered = String::from_utf8(buf)?;
        rendered.push('\n');
        Ok(rendered)
    }

    fn syntax_tree(&self) -> Result<CstRootNode> {
        CstRootNode::parse(&self.text, &ParseOptions::default())
            .map_err(|err| anyhow!("invalid JSONC: {}", err))
    }

    fn commit(&mut self, root: &CstRootNode) -> Result<()> {
        let text = root.to_string();
        self.value = parse_value(&text).context("edit produced an unparsable document")?;
        self.text = text;
        Ok(())
    }
}

/// Parse JSONC text into a `serde_json::Value`.
pub fn parse_value(text: &str) -> Result<Value> {
    jsonc_parser::parse_to_serde_value(text, &ParseOptions::default())
        .map_err(|err| anyhow!("invalid JSONC: {}", err))?
        .ok_or_else(|| anyhow!("document is empty"))
}

fn root_object(root: &CstRootNode) -> Result<CstObject> {
    root.object_value()
        .ok_or_else(|| anyhow!("expected a JSON object at the document root"))
}

fn to_input(value: &Value) -> CstInputValue {
    match value {
        Value::Null => CstInputValue::Null,
        Value::Bool(b) => CstInputValue::Bool(*b),
        Value::Number(n) => CstInputValue::Number(n.to_string()),
        Value::String(s) => CstInputValue::String(s.clone()),
        Value::Array(items) => CstInputValue::Array(items.iter().map(to_input).collect()),
        Value::Object(map) => CstInputValue::Object(
            map.iter()
                .map(|(key, value)| (key.clone(), to_input(value)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const COMMENTED: &str = r#"{
  // shared compiler settings
  "compilerOptions": {
    "outDir": "dist", /* build output */
    "rootDir": "src"
  },
  "references": [
    { "path": "../old" }
  ]
}
"#;

    #[test]
    fn test_parse_strips_comments() {
        let doc = JsoncDocument::parse(COMMENTED).unwrap();
        assert_eq!(doc.get(&["compilerOptions", "outDir"]), Some(&json!("dist")));
        assert_eq!(doc.get(&["references"]), Some(&json!([{ "path": "../old" }])));
    }

    #[test]
    fn test_parse_rejects_non_object_root() {
        assert!(JsoncDocument::parse("[1, 2]").is_err());
        assert!(JsoncDocument::parse("").is_err());
    }

    #[test]
    fn test_replace_existing_value_keeps_comments() {
        let mut doc = JsoncDocument::parse(COMMENTED).unwrap();
        doc.set(&["references"], &json!([{ "path": "../b" }])).unwrap();

        assert_eq!(doc.get(&["references"]), Some(&json!([{ "path": "../b" }])));
        assert!(doc.text().starts_with(concat!(
            "{\n  // shared compiler settings\n",
            "  \"compilerOptions\": {\n    \"outDir\": \"dist\", /* build output */\n",
        )));
        assert!(!doc.text().contains("../old"));
        assert_eq!(parse_value(doc.text()).unwrap(), *doc.value());
    }

    #[test]
    fn test_replace_keeps_inline_comment_beside_value() {
        let text = "{\n  \"references\": /* generated */ [],\n  \"files\": []\n}\n";
        let mut doc = JsoncDocument::parse(text).unwrap();
        doc.set(&["references"], &json!([{ "path": "../b" }])).unwrap();

        assert!(doc.text().contains("\"references\": /* generated */ ["));
        assert_eq!(doc.get(&["references"]), Some(&json!([{ "path": "../b" }])));
        assert_eq!(doc.get(&["files"]), Some(&json!([])));
    }

    #[test]
    fn test_insert_appends_property() {
        let mut doc = JsoncDocument::parse("{\n  \"files\": []\n}\n").unwrap();
        doc.set(&["references"], &json!([{ "path": "a" }])).unwrap();

        assert!(doc.text().starts_with("{\n  \"files\": [],\n  \"references\": ["));
        assert!(doc.text().ends_with("]\n}\n"));
        assert_eq!(
            *doc.value(),
            json!({ "files": [], "references": [{ "path": "a" }] })
        );
    }

    #[test]
    fn test_insert_keeps_trailing_comment_on_its_line() {
        let text = "{\n  \"files\": [] // intentionally empty\n}\n";
        let mut doc = JsoncDocument::parse(text).unwrap();
        doc.set(&["references"], &json!([{ "path": "../b" }])).unwrap();

        assert!(doc
            .text()
            .starts_with("{\n  \"files\": [], // intentionally empty\n  \"references\": ["));
        assert_eq!(doc.get(&["references"]), Some(&json!([{ "path": "../b" }])));
    }

    #[test]
    fn test_insert_into_empty_object() {
        let mut doc = JsoncDocument::parse("{}").unwrap();
        doc.set(&["references"], &json!([])).unwrap();
        assert_eq!(*doc.value(), json!({ "references": [] }));
        assert!(doc.text().contains('\n'));
    }

    #[test]
    fn test_set_creates_missing_parent() {
        let mut doc = JsoncDocument::parse("{\n  \"files\": []\n}\n").unwrap();
        doc.set(&["compilerOptions", "paths"], &json!({ "b": ["../b/src"] }))
            .unwrap();

        assert_eq!(
            doc.get(&["compilerOptions", "paths", "b"]),
            Some(&json!(["../b/src"]))
        );
        assert!(doc
            .text()
            .starts_with("{\n  \"files\": [],\n  \"compilerOptions\": {"));
    }

    #[test]
    fn test_set_nested_in_existing_parent() {
        let mut doc = JsoncDocument::parse(COMMENTED).unwrap();
        doc.set(&["compilerOptions", "paths"], &json!({ "b": ["../b/src"] }))
            .unwrap();

        assert!(doc.text().contains("    \"rootDir\": \"src\",\n    \"paths\": {"));
        assert!(doc.text().contains("/* build output */"));
        assert!(doc.text().contains("// shared compiler settings"));
        assert_eq!(
            doc.get(&["compilerOptions", "paths"]),
            Some(&json!({ "b": ["../b/src"] }))
        );
        assert_eq!(doc.get(&["references"]), Some(&json!([{ "path": "../old" }])));
    }

    #[test]
    fn test_set_through_non_object_fails() {
        let mut doc = JsoncDocument::parse(r#"{ "compilerOptions": 3 }"#).unwrap();
        assert!(doc.set(&["compilerOptions", "paths"], &json!({})).is_err());
        assert_eq!(doc.text(), r#"{ "compilerOptions": 3 }"#);
    }

    #[test]
    fn test_remove_last_property() {
        let mut doc = JsoncDocument::parse(COMMENTED).unwrap();
        assert!(doc.remove(&["references"]).unwrap());

        let expected = r#"{
  // shared compiler settings
  "compilerOptions": {
    "outDir": "dist", /* build output */
    "rootDir": "src"
  }
}
"#;
        assert_eq!(doc.text(), expected);
    }

    #[test]
    fn test_remove_middle_property() {
        let text = "{\n  \"a\": 1,\n  \"references\": [],\n  \"b\": 2\n}\n";
        let mut doc = JsoncDocument::parse(text).unwrap();
        assert!(doc.remove(&["references"]).unwrap());
        assert_eq!(doc.text(), "{\n  \"a\": 1,\n  \"b\": 2\n}\n");
    }

    #[test]
    fn test_remove_keeps_sibling_trailing_comments() {
        let text = concat!(
            "{\n  \"files\": [], // intentionally empty\n",
            "  \"references\": [],\n",
            "  \"include\": [\"src\"] // sources\n}\n",
        );
        let mut doc = JsoncDocument::parse(text).unwrap();
        assert!(doc.remove(&["references"]).unwrap());

        assert_eq!(
            doc.text(),
            "{\n  \"files\": [], // intentionally empty\n  \"include\": [\"src\"] // sources\n}\n"
        );
    }

    #[test]
    fn test_remove_sole_property_collapses_object() {
        let text = "{\n  \"compilerOptions\": {\n    \"paths\": {}\n  }\n}\n";
        let mut doc = JsoncDocument::parse(text).unwrap();
        assert!(doc.remove(&["compilerOptions", "paths"]).unwrap());
        assert_eq!(doc.text(), "{\n  \"compilerOptions\": {}\n}\n");
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut doc = JsoncDocument::parse(COMMENTED).unwrap();
        assert!(!doc.remove(&["files"]).unwrap());
        assert!(!doc.remove(&["compilerOptions", "paths"]).unwrap());
        assert_eq!(doc.text(), COMMENTED);
    }

    #[test]
    fn test_detects_four_space_indent() {
        let text = "{\n    \"files\": []\n}\n";
        let mut doc = JsoncDocument::parse(text).unwrap();
        doc.set(&["references"], &json!([{ "path": "a" }])).unwrap();
        assert!(doc.text().contains("\n    \"references\": ["));

        let plain = doc.to_plain_string().unwrap();
        assert!(plain.starts_with("{\n    \"files\": []"));
    }

    #[test]
    fn test_tolerates_trailing_commas_and_strings_with_braces() {
        let text = "{\n  \"extends\": \"./base{1}.json\",\n  \"references\": [],\n}\n";
        let mut doc = JsoncDocument::parse(text).unwrap();
        doc.set(&["references"], &json!([{ "path": "x" }])).unwrap();
        assert_eq!(doc.get(&["extends"]), Some(&json!("./base{1}.json")));
        assert_eq!(doc.get(&["references"]), Some(&json!([{ "path": "x" }])));
        assert!(doc.text().ends_with("],\n}\n"));
    }

    #[test]
    fn test_to_plain_string_drops_comments() {
        let doc = JsoncDocument::parse(COMMENTED).unwrap();
        let plain = doc.to_plain_string().unwrap();
        assert!(!plain.contains("//"));
        assert!(plain.ends_with("}\n"));
        assert_eq!(parse_value(&plain).unwrap(), *doc.value());
    }
}
