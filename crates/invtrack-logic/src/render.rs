//! Panel text rendering.
//!
//! Output is always the panel title on its own line followed by one line per
//! shown item. Full-dump panels list `name : amount` for every aggregated
//! item in name order. Filtered panels list the bare amount for each
//! configured name that is present in the counts; names that are absent
//! (mistyped, blank, or simply not in stock) produce no line at all.

use crate::aggregate::ItemCounts;
use crate::display::{DisplayDescriptor, DisplayMode};
use crate::quota::QuotaTable;

/// One matched line of a filtered panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelRow {
    pub name: String,
    pub amount: f64,
    /// Declared target for this item, if any. Not part of the rendered text.
    pub quota: Option<f64>,
}

/// Rows of a filtered panel: configured names that exist in `counts`, in
/// configuration order. Repeated names yield repeated rows.
pub fn filtered_rows(filter: &[String], counts: &ItemCounts, quotas: &QuotaTable) -> Vec<PanelRow> {
    filter
        .iter()
        .filter_map(|name| {
            counts.get(name).map(|&amount| PanelRow {
                name: name.clone(),
                amount,
                quota: quotas.get(name).copied(),
            })
        })
        .collect()
}

/// Full-dump body: one `name : amount` line per item.
pub fn render_full_dump(title: &str, counts: &ItemCounts) -> String {
    let mut text = format!("{}\n", title);
    for (name, amount) in counts {
        text.push_str(&format!("{} : {}\n", name, amount));
    }
    text
}

/// Filtered body: one amount line per matched configured name.
pub fn render_filtered(
    title: &str,
    filter: &[String],
    counts: &ItemCounts,
    quotas: &QuotaTable,
) -> String {
    let mut text = format!("{}\n", title);
    for row in filtered_rows(filter, counts, quotas) {
        text.push_str(&format!("{}\n", row.amount));
    }
    text
}

/// Render the full text for a panel.
pub fn render<P>(display: &DisplayDescriptor<P>, counts: &ItemCounts, quotas: &QuotaTable) -> String {
    match &display.mode {
        DisplayMode::FullDump => render_full_dump(&display.title, counts),
        DisplayMode::Filtered(filter) => render_filtered(&display.title, filter, counts, quotas),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts() -> ItemCounts {
        let mut c = ItemCounts::new();
        c.insert("Iron Ore".into(), 75.0);
        c.insert("Gold".into(), 10.0);
        c.insert("Uranium".into(), 2.5);
        c
    }

    fn quotas() -> QuotaTable {
        let mut q = QuotaTable::new();
        q.insert("Iron Ore".into(), 100.0);
        q.insert("Gold".into(), 5.0);
        q
    }

    fn filtered(title: &str, lines: &[&str]) -> DisplayDescriptor<()> {
        DisplayDescriptor::new(
            (),
            title,
            DisplayMode::Filtered(lines.iter().map(|s| s.to_string()).collect()),
        )
    }

    #[test]
    fn test_full_dump_sorted_by_name() {
        let display = DisplayDescriptor::new((), "Stock", DisplayMode::FullDump);
        let text = render(&display, &counts(), &quotas());
        assert_eq!(text, "Stock\nGold : 10\nIron Ore : 75\nUranium : 2.5\n");
    }

    #[test]
    fn test_full_dump_line_count() {
        let display = DisplayDescriptor::new((), "Stock", DisplayMode::FullDump);
        let c = counts();
        let text = render(&display, &c, &QuotaTable::new());
        assert_eq!(text.lines().count(), c.len() + 1);
    }

    #[test]
    fn test_full_dump_empty_counts() {
        let display = DisplayDescriptor::new((), "Stock", DisplayMode::FullDump);
        assert_eq!(render(&display, &ItemCounts::new(), &quotas()), "Stock\n");
    }

    #[test]
    fn test_filtered_skips_absent() {
        let text = render(&filtered("Ores", &["Iron Ore", "Silver"]), &counts(), &quotas());
        assert_eq!(text, "Ores\n75\n");
    }

    #[test]
    fn test_filtered_keeps_configured_order() {
        let text = render(
            &filtered("Mix", &["Uranium", "", "Gold", "iron ore", "Iron Ore"]),
            &counts(),
            &quotas(),
        );
        assert_eq!(text, "Mix\n2.5\n10\n75\n");
    }

    #[test]
    fn test_filtered_line_count_matches_present_names() {
        let names = ["Gold", "Silver", "Iron Ore", "Cobalt", "Gold"];
        let c = counts();
        let expected = names.iter().filter(|n| c.contains_key(**n)).count();
        let text = render(&filtered("T", &names), &c, &quotas());
        assert_eq!(text.lines().count(), expected + 1);
    }

    #[test]
    fn test_quota_looked_up_but_not_shown() {
        let filter: Vec<String> = vec!["Gold".into(), "Uranium".into()];
        let rows = filtered_rows(&filter, &counts(), &quotas());
        assert_eq!(rows[0].quota, Some(5.0));
        assert_eq!(rows[1].quota, None);

        let text = render_filtered("T", &filter, &counts(), &quotas());
        assert_eq!(text, "T\n10\n2.5\n");
        assert!(!text.contains('/'));
    }

    #[test]
    fn test_title_only_when_nothing_matches() {
        let text = render(&filtered("Empty", &["Nothing", ""]), &counts(), &quotas());
        assert_eq!(text, "Empty\n");
    }
}
