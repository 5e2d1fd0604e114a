//! Tk option-name → IR property mapping table (§6).

use kryo_core::value::{Color, Dimension};
use kryo_core::{builder, color_parse, IRContext, Logic, LogicId, NodeHandle, SourceLanguage};
use tracing::trace;

/// Apply one `-option value` pair from a widget-creation command to the
/// already-constructed component at `handle`. Unrecognized options are
/// dropped with a trace log rather than an error — Tk has a much larger
/// option surface than this adapter's target IR models.
pub fn apply_option(ctx: &mut IRContext, handle: NodeHandle, logic_ids: &mut LogicId, name: &str, value: &str) {
    match name {
        "-text" | "-label" => builder::set_text(ctx, handle, value),
        "-bg" | "-background" => {
            let color = parse_tk_color(value);
            builder::mutate_style(ctx, handle, |s| s.background = color);
        }
        "-fg" | "-foreground" => {
            let color = parse_tk_color(value);
            builder::mutate_style(ctx, handle, |s| s.font.color = color);
        }
        "-width" => {
            if let Ok(v) = value.parse::<f32>() {
                builder::mutate_style(ctx, handle, |s| s.width = Dimension::Px(v));
            }
        }
        "-height" => {
            if let Ok(v) = value.parse::<f32>() {
                builder::mutate_style(ctx, handle, |s| s.height = Dimension::Px(v));
            }
        }
        "-state" => builder::set_disabled(ctx, handle, value == "disabled"),
        "-command" => {
            let id = LogicId(logic_ids.0);
            logic_ids.0 = logic_ids.0.wrapping_add(1);
            builder::push_logic(ctx, handle, Logic::new(id, SourceLanguage::Native, value));
            builder::push_event(
                ctx,
                handle,
                kryo_core::Event { event_type: Some(kryo_core::EventType::Click), logic_id: Some(id), ..Default::default() },
            );
        }
        other => trace!(option = other, "unmapped tk option"),
    }
}

/// Tk color values are either `#rgb`/`#rrggbb`/`#rrrgggbbb`/`#rrrrggggbbbb`
/// hex strings or X11/Tk color names; named lookup delegates to the same
/// table the KRY parser uses.
pub fn parse_tk_color(text: &str) -> Color {
    if let Some(hex) = text.strip_prefix('#') {
        if let Some(c) = parse_hex(hex) {
            return c;
        }
    }
    color_parse::parse_named_color(text)
}

fn parse_hex(hex: &str) -> Option<Color> {
    let group = hex.len() / 3;
    if group == 0 || hex.len() % 3 != 0 {
        return None;
    }
    let channel = |s: &str| -> Option<u8> {
        let v = u32::from_str_radix(s, 16).ok()?;
        let max = (16u32.pow(group as u32)) - 1;
        Some(((v * 255) / max) as u8)
    };
    let r = channel(&hex[0..group])?;
    let g = channel(&hex[group..2 * group])?;
    let b = channel(&hex[2 * group..3 * group])?;
    Some(Color::rgba(r, g, b, 255))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_six_digit_hex() {
        assert_eq!(parse_tk_color("#ff0000"), Color::rgba(255, 0, 0, 255));
    }

    #[test]
    fn parses_three_digit_hex() {
        assert_eq!(parse_tk_color("#f00"), Color::rgba(255, 0, 0, 255));
    }

    #[test]
    fn falls_back_to_named_colors() {
        assert_eq!(parse_tk_color("red"), Color::rgba(255, 0, 0, 255));
    }

    #[test]
    fn apply_option_sets_text_content() {
        use kryo_core::ids::InstanceId;
        use kryo_core::ComponentVariant;

        let mut ctx = IRContext::new(InstanceId(0));
        let handle = ctx.alloc(ComponentVariant::Text).unwrap();
        let mut ids = LogicId(0);
        apply_option(&mut ctx, handle, &mut ids, "-text", "Hello");
        assert_eq!(ctx.get(handle).unwrap().text_content.as_deref(), Some("Hello"));
    }

    #[test]
    fn apply_option_command_binds_a_click_handler() {
        use kryo_core::ids::InstanceId;
        use kryo_core::ComponentVariant;

        let mut ctx = IRContext::new(InstanceId(0));
        let handle = ctx.alloc(ComponentVariant::Button).unwrap();
        let mut ids = LogicId(0);
        apply_option(&mut ctx, handle, &mut ids, "-command", "doSomething");
        let component = ctx.get(handle).unwrap();
        assert_eq!(component.logic.len(), 1);
        assert_eq!(component.events.len(), 1);
        assert_eq!(component.events[0].event_type, Some(kryo_core::EventType::Click));
    }
}
