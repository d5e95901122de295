//! Documentation content for setl CLI

use crate::transformer::Registry;

const OVERVIEW: &str = r#"SETLANG TRANSFORMERS

A script is one instruction per line:

  SET var1[, var2, ...] = transformer(arg1[, arg2, ...])

Arguments are field paths (address.city, items.0) or single-quoted literals
(' ', '/'). A '#' segment in the target runs the transformer once per array
element, passing that element's field as the only argument. Targets whose
first or last segment starts with '_' are removed after the script finishes.

AVAILABLE TRANSFORMERS
"#;

/// Lists every registered transformer with its usage line
pub fn get_transformers_overview(registry: &Registry) -> String {
    let mut text = OVERVIEW.to_string();
    for name in registry.names() {
        if let Some(transformer) = registry.create(name) {
            text.push_str(&format!("\n  {:<13}{}", name, transformer.usage()));
        }
    }
    text.push('\n');
    text
}
