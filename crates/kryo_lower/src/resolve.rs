//! Lazy value resolution and color parsing (§4.5).

use kryo_core::value::Color;
use kryo_parser::Value;

use crate::context::{ConversionContext, ParamValue};

/// Resolve a parsed `Value` to its string form. Sets `*is_unresolved` if
/// the value is an identifier referencing a parameter with no binding
/// yet, matching the spec's `resolve_value_as_string` out-flag contract.
pub fn resolve_value_as_string(conv: &ConversionContext, value: &Value, is_unresolved: &mut bool) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number { value, is_percentage } => {
            if *is_percentage {
                format!("{value}%")
            } else {
                value.to_string()
            }
        }
        Value::Identifier(name) => match conv.lookup_parameter(name) {
            Some(ParamValue::Str(s)) => s.clone(),
            Some(ParamValue::Value(v)) => resolve_value_as_string(conv, v, is_unresolved),
            None => {
                *is_unresolved = true;
                name.clone()
            }
        },
        // Raw expression bodies are not evaluated here; the runtime owns
        // expression execution, so lowering passes the text through.
        Value::Expression(raw) => raw.clone(),
        Value::Array(items) => {
            let parts: Vec<String> =
                items.iter().map(|v| resolve_value_as_string(conv, v, is_unresolved)).collect();
            format!("[{}]", parts.join(", "))
        }
        Value::Object(fields) => {
            let parts: Vec<String> = fields
                .iter()
                .map(|(k, v)| format!("{k}: {}", resolve_value_as_string(conv, v, is_unresolved)))
                .collect();
            format!("{{{}}}", parts.join(", "))
        }
        Value::StructInstance { type_name, .. } => type_name.clone(),
        Value::Range { start, end } => format!("{start}..{end}"),
    }
}

pub fn resolve_value_as_number(conv: &ConversionContext, value: &Value, is_unresolved: &mut bool) -> f32 {
    match value {
        Value::Number { value, .. } => *value as f32,
        Value::Identifier(name) => match conv.lookup_parameter(name) {
            Some(ParamValue::Value(v)) => resolve_value_as_number(conv, v, is_unresolved),
            Some(ParamValue::Str(s)) => s.parse().unwrap_or(0.0),
            None => {
                *is_unresolved = true;
                0.0
            }
        },
        _ => {
            let s = resolve_value_as_string(conv, value, is_unresolved);
            s.trim_end_matches('%').parse().unwrap_or(0.0)
        }
    }
}

pub fn resolve_value_as_bool(conv: &ConversionContext, value: &Value, is_unresolved: &mut bool) -> bool {
    match value {
        Value::Identifier(name) if name == "true" => true,
        Value::Identifier(name) if name == "false" => false,
        Value::Number { value, .. } => *value != 0.0,
        _ => {
            let s = resolve_value_as_string(conv, value, is_unresolved);
            matches!(s.as_str(), "true" | "1")
        }
    }
}

/// Parse a color value: hex (`#rrggbb[aa]`), `rgba(r, g, b, a)`, CSS
/// named colors, or a `$name`/`var(--name)` theme-variable reference
/// resolved through the parameter table.
pub fn parse_color(conv: &ConversionContext, value: &Value, is_unresolved: &mut bool) -> Color {
    let text = resolve_value_as_string(conv, value, is_unresolved);
    parse_color_str(conv, &text, is_unresolved)
}

fn parse_color_str(conv: &ConversionContext, text: &str, is_unresolved: &mut bool) -> Color {
    let text = text.trim();
    if let Some(hex) = text.strip_prefix('#') {
        return parse_hex_color(hex).unwrap_or(Color::WHITE);
    }
    if let Some(inner) = text.strip_prefix("rgba(").and_then(|s| s.strip_suffix(')')) {
        return parse_rgba_fn(inner).unwrap_or(Color::WHITE);
    }
    if let Some(inner) = text.strip_prefix("rgb(").and_then(|s| s.strip_suffix(')')) {
        return parse_rgba_fn(inner).unwrap_or(Color::WHITE);
    }
    if let Some(var_name) = text.strip_prefix('$') {
        return match conv.lookup_parameter(var_name) {
            Some(ParamValue::Str(s)) => parse_color_str(conv, s, is_unresolved),
            Some(ParamValue::Value(v)) => parse_color(conv, v, is_unresolved),
            None => {
                *is_unresolved = true;
                Color::WHITE
            }
        };
    }
    kryo_core::color_parse::parse_named_color(text)
}

fn parse_hex_color(hex: &str) -> Option<Color> {
    let bytes = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(Color::rgba(bytes(&hex[0..2])?, bytes(&hex[2..4])?, bytes(&hex[4..6])?, 255)),
        8 => Some(Color::rgba(
            bytes(&hex[0..2])?,
            bytes(&hex[2..4])?,
            bytes(&hex[4..6])?,
            bytes(&hex[6..8])?,
        )),
        _ => None,
    }
}

fn parse_rgba_fn(inner: &str) -> Option<Color> {
    let parts: Vec<&str> = inner.split(',').map(|s| s.trim()).collect();
    if parts.len() < 3 {
        return None;
    }
    let r: u8 = parts[0].parse().ok()?;
    let g: u8 = parts[1].parse().ok()?;
    let b: u8 = parts[2].parse().ok()?;
    let a: u8 = match parts.get(3) {
        Some(a_str) => {
            let a: f32 = a_str.parse().ok()?;
            (a.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        None => 255,
    };
    Some(Color::rgba(r, g, b, a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kryo_parser::Ast;

    #[test]
    fn resolves_literal_string_and_number() {
        let ast = Ast::new();
        let conv = ConversionContext::new(&ast, "/base");
        let mut unresolved = false;
        assert_eq!(resolve_value_as_string(&conv, &Value::String("hi".into()), &mut unresolved), "hi");
        assert!(!unresolved);
        assert_eq!(
            resolve_value_as_string(&conv, &Value::Number { value: 50.0, is_percentage: true }, &mut unresolved),
            "50%"
        );
    }

    #[test]
    fn unbound_identifier_sets_unresolved_flag() {
        let ast = Ast::new();
        let conv = ConversionContext::new(&ast, "/base");
        let mut unresolved = false;
        let s = resolve_value_as_string(&conv, &Value::Identifier("missing".into()), &mut unresolved);
        assert!(unresolved);
        assert_eq!(s, "missing");
    }

    #[test]
    fn bound_identifier_resolves_through_parameter_table() {
        let ast = Ast::new();
        let mut conv = ConversionContext::new(&ast, "/base");
        conv.bind_parameter("name", ParamValue::Str("Ada".into()));
        let mut unresolved = false;
        let s = resolve_value_as_string(&conv, &Value::Identifier("name".into()), &mut unresolved);
        assert!(!unresolved);
        assert_eq!(s, "Ada");
    }

    #[test]
    fn parses_hex_colors_with_and_without_alpha() {
        let ast = Ast::new();
        let conv = ConversionContext::new(&ast, "/base");
        let mut unresolved = false;
        let c = parse_color(&conv, &Value::String("#ff0000".into()), &mut unresolved);
        assert_eq!(c, Color::rgba(255, 0, 0, 255));
        let c = parse_color(&conv, &Value::String("#ff000080".into()), &mut unresolved);
        assert_eq!(c, Color::rgba(255, 0, 0, 0x80));
    }

    #[test]
    fn parses_rgba_function_syntax() {
        let ast = Ast::new();
        let conv = ConversionContext::new(&ast, "/base");
        let mut unresolved = false;
        let c = parse_color(&conv, &Value::String("rgba(10, 20, 30, 0.5)".into()), &mut unresolved);
        assert_eq!(c, Color::rgba(10, 20, 30, 128));
    }

    #[test]
    fn parses_named_colors() {
        let ast = Ast::new();
        let conv = ConversionContext::new(&ast, "/base");
        let mut unresolved = false;
        let c = parse_color(&conv, &Value::String("red".into()), &mut unresolved);
        assert_eq!(c, Color::rgba(255, 0, 0, 255));
    }

    #[test]
    fn theme_var_reference_resolves_through_parameters() {
        let ast = Ast::new();
        let mut conv = ConversionContext::new(&ast, "/base");
        conv.bind_parameter("accent", ParamValue::Str("#00ff00".into()));
        let mut unresolved = false;
        let c = parse_color(&conv, &Value::String("$accent".into()), &mut unresolved);
        assert_eq!(c, Color::rgba(0, 255, 0, 255));
        assert!(!unresolved);
    }
}
