//! Rendering of models, server badges and facets.

use omx_core::{ModelItem, ServerResult, display_host};

use super::tables::{format_optional, print_separator, truncate_string};

const DASH: &str = "-";

fn context_label(item: &ModelItem) -> String {
    item.max_context
        .map_or_else(|| DASH.to_string(), |k| format!("{k}K"))
}

fn capability_label(item: &ModelItem) -> String {
    if item.capabilities.is_empty() {
        DASH.to_string()
    } else {
        item.capabilities
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One line per server: `✓ host (N models)` or `✗ host - error`.
pub fn print_server_badges(results: &[ServerResult]) {
    for result in results {
        let mark = if result.success { "✓" } else { "✗" };
        println!("{mark} {}", result.badge());
    }
}

/// One row per model.
pub fn print_table(view: &[&ModelItem]) {
    println!(
        "{:<32} {:<22} {:<10} {:<8} {:<8} {:<10} {:<12} Capabilities",
        "Name", "Server", "Size", "Params", "Context", "Quant", "Family"
    );
    print_separator(120);

    for item in view {
        println!(
            "{:<32} {:<22} {:<10} {:<8} {:<8} {:<10} {:<12} {}",
            truncate_string(&item.name, 31),
            truncate_string(&display_host(&item.server), 21),
            format_optional(item.size_formatted.as_ref(), DASH),
            truncate_string(&format_optional(item.parameters.as_ref(), DASH), 7),
            context_label(item),
            truncate_string(&format_optional(item.quantization.as_ref(), DASH), 9),
            truncate_string(&format_optional(item.family.as_ref(), DASH), 11),
            capability_label(item),
        );
    }
}

/// A block per model.
pub fn print_cards(view: &[&ModelItem]) {
    for item in view {
        println!("{}", item.name);
        println!("  Server:       {}", display_host(&item.server));
        println!(
            "  Size:         {}",
            format_optional(item.size_formatted.as_ref(), DASH)
        );
        println!(
            "  Parameters:   {}",
            format_optional(item.parameters.as_ref(), DASH)
        );
        println!(
            "  Quantization: {}",
            format_optional(item.quantization.as_ref(), DASH)
        );
        println!(
            "  Family:       {}",
            format_optional(item.family.as_ref(), DASH)
        );
        println!("  Context:      {}", context_label(item));
        println!("  Capabilities: {}", capability_label(item));
        if let Some(error) = &item.error {
            println!("  Error:        {error}");
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        let item = ModelItem::new("llava", "http://a:11434")
            .with_max_context(32)
            .with_capabilities(["vision", "completion"]);
        assert_eq!(context_label(&item), "32K");
        assert_eq!(capability_label(&item), "completion, vision");

        let bare = ModelItem::new("x", "http://a:11434");
        assert_eq!(context_label(&bare), "-");
        assert_eq!(capability_label(&bare), "-");
    }
}
