//! Tcl/Tk widget-command → IR variant mapping table (§6: "authoritative
//! for unknown types, falling back to Container").

use kryo_core::{ComponentVariant, TabGroupRole, TableRole};

/// Map a Tk widget-creation command name to the IR variant it plays the
/// role of. Ttk's `ttk::` namespace prefix is stripped first so `ttk::button`
/// and `button` share a mapping. Anything unrecognized falls back to
/// `Container`, per the adapter contract.
pub fn map_widget_type(command: &str) -> ComponentVariant {
    let name = command.strip_prefix("ttk::").unwrap_or(command);
    match name {
        "button" => ComponentVariant::Button,
        "label" | "message" => ComponentVariant::Text,
        "entry" | "spinbox" | "text" => ComponentVariant::Input,
        "checkbutton" => ComponentVariant::Checkbox,
        "radiobutton" => ComponentVariant::Checkbox,
        "menubutton" | "combobox" => ComponentVariant::Dropdown,
        "canvas" => ComponentVariant::Canvas,
        "listbox" | "treeview" => ComponentVariant::List,
        "notebook" => ComponentVariant::TabGroup(TabGroupRole::Content),
        "frame" | "labelframe" | "toplevel" | "panedwindow" | "scrollbar" | "separator" => {
            ComponentVariant::Container
        }
        "table" => ComponentVariant::Table(TableRole::Body),
        _ => ComponentVariant::Container,
    }
}

/// Commands recognized as widget creation at all (as opposed to geometry
/// managers like `pack`/`grid`/`place`, or other Tcl commands this
/// adapter ignores outright).
pub fn is_widget_command(command: &str) -> bool {
    let name = command.strip_prefix("ttk::").unwrap_or(command);
    matches!(
        name,
        "button"
            | "label"
            | "message"
            | "entry"
            | "spinbox"
            | "text"
            | "checkbutton"
            | "radiobutton"
            | "menubutton"
            | "combobox"
            | "canvas"
            | "listbox"
            | "treeview"
            | "notebook"
            | "frame"
            | "labelframe"
            | "toplevel"
            | "panedwindow"
            | "scrollbar"
            | "separator"
            | "table"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_widgets_map_to_their_variant() {
        assert_eq!(map_widget_type("button"), ComponentVariant::Button);
        assert_eq!(map_widget_type("ttk::button"), ComponentVariant::Button);
        assert_eq!(map_widget_type("entry"), ComponentVariant::Input);
    }

    #[test]
    fn unknown_widget_falls_back_to_container() {
        assert_eq!(map_widget_type("sizegrip"), ComponentVariant::Container);
        assert_eq!(map_widget_type("ttk::sizegrip"), ComponentVariant::Container);
    }

    #[test]
    fn geometry_managers_are_not_widget_commands() {
        assert!(!is_widget_command("pack"));
        assert!(!is_widget_command("grid"));
        assert!(is_widget_command("button"));
    }
}
