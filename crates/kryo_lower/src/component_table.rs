//! Case-sensitive, table-driven component-type lookup (§4.5).

use kryo_core::{ComponentVariant, TabGroupRole, TableRole};

const MIN_HEADING: u8 = 1;
const MAX_HEADING: u8 = 6;

/// Look up a KRY tag name, returning the matching `ComponentVariant`, or
/// `None` if no built-in type matches (the caller then checks the
/// struct table before falling back to `Custom`).
pub fn lookup_component_type(name: &str) -> Option<ComponentVariant> {
    Some(match name {
        "Container" => ComponentVariant::Container,
        "Text" => ComponentVariant::Text,
        "Button" => ComponentVariant::Button,
        "Input" => ComponentVariant::Input,
        "Checkbox" => ComponentVariant::Checkbox,
        "Dropdown" => ComponentVariant::Dropdown,
        "Row" => ComponentVariant::Row,
        "Column" => ComponentVariant::Column,
        "Center" => ComponentVariant::Center,
        "Image" => ComponentVariant::Image,
        "Canvas" => ComponentVariant::Canvas,
        "Paragraph" => ComponentVariant::Paragraph,
        "Blockquote" => ComponentVariant::Blockquote,
        "CodeBlock" => ComponentVariant::CodeBlock,
        "List" => ComponentVariant::List,
        "ListItem" => ComponentVariant::ListItem,
        "Link" => ComponentVariant::Link,
        "Markdown" => ComponentVariant::Markdown,
        "HorizontalRule" => ComponentVariant::HorizontalRule,
        "TableHead" => ComponentVariant::Table(TableRole::Head),
        "TableBody" => ComponentVariant::Table(TableRole::Body),
        "TableFoot" => ComponentVariant::Table(TableRole::Foot),
        "TableRow" => ComponentVariant::Table(TableRole::Row),
        "TableCell" => ComponentVariant::Table(TableRole::Cell),
        "TableHeaderCell" => ComponentVariant::Table(TableRole::HeaderCell),
        "TabBar" => ComponentVariant::TabGroup(TabGroupRole::Bar),
        "Tab" => ComponentVariant::TabGroup(TabGroupRole::Tab),
        "TabContent" => ComponentVariant::TabGroup(TabGroupRole::Content),
        "TabPanel" => ComponentVariant::TabGroup(TabGroupRole::Panel),
        "H1" => ComponentVariant::Heading(1),
        "H2" => ComponentVariant::Heading(2),
        "H3" => ComponentVariant::Heading(3),
        "H4" => ComponentVariant::Heading(4),
        "H5" => ComponentVariant::Heading(5),
        "H6" => ComponentVariant::Heading(6),
        _ => return None,
    })
}

/// `true` if `name` looks like a heading tag in the `H<level>` family,
/// used to special-case heading-level clamping outside the static table.
pub fn heading_level_from_name(name: &str) -> Option<u8> {
    let level: u8 = name.strip_prefix('H')?.parse().ok()?;
    (MIN_HEADING..=MAX_HEADING).contains(&level).then_some(level)
}
