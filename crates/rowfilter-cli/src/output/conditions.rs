//! Condition menu output formatting.

use owo_colors::OwoColorize;
use rowfilter::{MenuItem, ValueKind};
use serde::Serialize;

/// JSON output structure for one menu slot.
#[derive(Serialize)]
pub struct MenuItemOutput {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<&'static str>,
    pub separator: bool,
}

fn value_kind_name(kind: ValueKind) -> &'static str {
    match kind {
        ValueKind::None => "none",
        ValueKind::Text => "text",
        ValueKind::Number => "number",
        ValueKind::Date => "date",
    }
}

/// Formats the menu as JSON, separators included so indices stay meaningful.
pub fn format_menu_json(menu: &[MenuItem]) -> Result<String, serde_json::Error> {
    let items: Vec<MenuItemOutput> = menu
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            MenuItem::Condition(condition) => MenuItemOutput {
                index,
                name: Some(condition.name()),
                label: Some(condition.label()),
                value: Some(value_kind_name(condition.value_kind())),
                separator: false,
            },
            MenuItem::Separator => MenuItemOutput {
                index,
                name: None,
                label: None,
                value: None,
                separator: true,
            },
        })
        .collect();

    serde_json::to_string_pretty(&serde_json::json!({ "conditions": items }))
}

/// Formats the menu as a table. Separators become blank lines.
pub fn format_menu_table(menu: &[MenuItem], use_colors: bool) -> String {
    let mut output = String::new();

    let header = format!("{:<5} {:<28} {:<8} {}", "Index", "Name", "Value", "Label");
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for (index, item) in menu.iter().enumerate() {
        match item {
            MenuItem::Condition(condition) => {
                let line = format!(
                    "{:<5} {:<28} {:<8} {}",
                    index,
                    condition.name(),
                    value_kind_name(condition.value_kind()),
                    condition.label()
                );
                output.push_str(&line);
                output.push('\n');
            }
            MenuItem::Separator => output.push('\n'),
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowfilter::Condition;

    #[test]
    fn test_menu_table_lists_every_condition() {
        let menu = Condition::menu();
        let text = format_menu_table(&menu, false);

        assert!(text.starts_with("Index"));
        assert!(text.contains("6     text-contains-regex"));
        assert!(text.contains("23    filter-by-text"));
        // Header, 18 conditions, 6 separators.
        assert_eq!(text.lines().count(), 1 + 18 + 6);
    }

    #[test]
    fn test_menu_json_keeps_separator_slots() {
        let json = format_menu_json(&Condition::menu()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let items = value["conditions"].as_array().unwrap();

        assert_eq!(items.len(), 24);
        assert_eq!(items[1]["separator"], true);
        assert!(items[1].get("name").is_none());
        assert_eq!(items[14]["name"], "greater-than");
        assert_eq!(items[14]["value"], "number");
        assert_eq!(items[10]["value"], "none");
    }
}
