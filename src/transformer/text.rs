use super::{Results, TransformError, Transformer, expect_args};
use crate::value::Value;

/// `uppercase(field)`
pub struct Uppercase;

impl Transformer for Uppercase {
    fn usage(&self) -> &'static str {
        "uppercase(field) - uppercases the field's text"
    }

    fn transform(&self, args: &[Value], _document: &Value) -> Result<Results, TransformError> {
        expect_args("uppercase", args, 1)?;
        Ok(vec![Value::String(args[0].to_text().to_uppercase())])
    }
}

/// `concatenate(separator, field, field, ...)`
pub struct Concatenate;

impl Transformer for Concatenate {
    fn usage(&self) -> &'static str {
        "concatenate('sep', field, field, ...) - joins two or more fields with a separator"
    }

    fn transform(&self, args: &[Value], _document: &Value) -> Result<Results, TransformError> {
        if args.len() < 3 {
            return Err(TransformError::Arity(format!(
                "concatenate requires a separator and at least two fields, got {} argument{}",
                args.len(),
                if args.len() == 1 { "" } else { "s" }
            )));
        }

        let separator = args[0].to_text();
        let parts: Vec<String> = args[1..].iter().map(Value::to_text).collect();
        Ok(vec![Value::String(parts.join(&separator))])
    }
}

/// `split(field, separator)`, one result per segment
pub struct Split;

impl Transformer for Split {
    fn usage(&self) -> &'static str {
        "split(field, 'sep') - splits the field's text, one result per segment"
    }

    fn transform(&self, args: &[Value], _document: &Value) -> Result<Results, TransformError> {
        expect_args("split", args, 2)?;

        let text = args[0].to_text();
        let separator = args[1].to_text();
        let parts: Results = if separator.is_empty() {
            text.chars().map(|c| Value::String(c.to_string())).collect()
        } else {
            text.split(separator.as_str())
                .map(|p| Value::String(p.to_string()))
                .collect()
        };
        Ok(parts)
    }
}
