//! Table and bar-chart rendering for the terminal dashboard.

use std::collections::BTreeMap;

use crate::assets::Asset;
use crate::users::User;

/// Placeholder shown when an asset's owner_id no longer resolves to a user.
pub const UNKNOWN_OWNER: &str = "(unknown)";

const BAR_WIDTH: usize = 40;

const PRICE_BAND_LABELS: [&str; 5] = ["< 1", "1-10", "10-100", "100-1k", ">= 1k"];

pub fn owner_label(users: &[User], owner_id: i64) -> String {
    users
        .iter()
        .find(|u| u.id == owner_id)
        .map(|u| u.name.clone())
        .unwrap_or_else(|| UNKNOWN_OWNER.to_string())
}

pub fn render_users(users: &[User]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:>6}  NAME\n", "ID"));
    for user in users {
        out.push_str(&format!("{:>6}  {}\n", user.id, user.name));
    }
    if users.is_empty() {
        out.push_str("  (no users)\n");
    }
    out
}

pub fn render_assets(assets: &[Asset], users: &[User]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>6}  {:<8}  {:<20}  {:<10}  {:>14}  OWNER\n",
        "ID", "SYMBOL", "NAME", "KIND", "PRICE"
    ));
    for asset in assets {
        out.push_str(&format!(
            "{:>6}  {:<8}  {:<20}  {:<10}  {:>14.4}  {}\n",
            asset.id,
            asset.symbol,
            asset.name,
            asset.kind,
            asset.price,
            owner_label(users, asset.owner_id)
        ));
    }
    if assets.is_empty() {
        out.push_str("  (no assets)\n");
    }
    out
}

pub fn count_by_kind(assets: &[Asset]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for asset in assets {
        *counts.entry(asset.kind.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(kind, count)| (kind.to_string(), count))
        .collect()
}

fn price_band_index(price: f64) -> usize {
    // bands are lower-inclusive log decades
    if price < 1.0 {
        0
    } else if price < 10.0 {
        1
    } else if price < 100.0 {
        2
    } else if price < 1000.0 {
        3
    } else {
        4
    }
}

pub fn count_by_price_band(assets: &[Asset]) -> Vec<(String, usize)> {
    let mut counts = [0usize; PRICE_BAND_LABELS.len()];
    for asset in assets {
        counts[price_band_index(asset.price)] += 1;
    }
    PRICE_BAND_LABELS
        .iter()
        .zip(counts)
        .map(|(label, count)| (label.to_string(), count))
        .collect()
}

pub fn bar_chart(title: &str, rows: &[(String, usize)]) -> String {
    let mut out = String::new();
    out.push_str(title);
    out.push('\n');

    let max = rows.iter().map(|(_, count)| *count).max().unwrap_or(0);
    if max == 0 {
        out.push_str("  (no data)\n");
        return out;
    }

    let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, count) in rows {
        let len = if *count == 0 {
            0
        } else {
            (count * BAR_WIDTH / max).max(1)
        };
        out.push_str(&format!(
            "  {:<label_width$}  {} {}\n",
            label,
            "█".repeat(len),
            count
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(id: i64, symbol: &str, kind: &str, price: f64, owner_id: i64) -> Asset {
        Asset {
            id,
            name: symbol.to_string(),
            owner_id,
            symbol: symbol.to_string(),
            kind: kind.to_string(),
            price,
        }
    }

    fn users() -> Vec<User> {
        vec![
            User {
                id: 1,
                name: "alice".into(),
            },
            User {
                id: 2,
                name: "bob".into(),
            },
        ]
    }

    #[test]
    fn owner_label_resolves_known_ids() {
        assert_eq!(owner_label(&users(), 2), "bob");
    }

    #[test]
    fn owner_label_substitutes_placeholder_for_dangling_ids() {
        assert_eq!(owner_label(&users(), 99), UNKNOWN_OWNER);
    }

    #[test]
    fn render_assets_uses_placeholder_for_orphans() {
        let rendered = render_assets(&[asset(1, "BTC", "coin", 64000.0, 99)], &users());
        assert!(rendered.contains(UNKNOWN_OWNER));
    }

    #[test]
    fn count_by_kind_groups_and_sorts() {
        let assets = vec![
            asset(1, "BTC", "coin", 64000.0, 1),
            asset(2, "ETH", "coin", 3000.0, 1),
            asset(3, "USDC", "stablecoin", 1.0, 2),
        ];
        assert_eq!(
            count_by_kind(&assets),
            vec![("coin".to_string(), 2), ("stablecoin".to_string(), 1)]
        );
    }

    #[test]
    fn price_bands_are_lower_inclusive() {
        assert_eq!(price_band_index(0.99), 0);
        assert_eq!(price_band_index(1.0), 1);
        assert_eq!(price_band_index(10.0), 2);
        assert_eq!(price_band_index(999.99), 3);
        assert_eq!(price_band_index(1000.0), 4);
    }

    #[test]
    fn count_by_price_band_covers_all_bands() {
        let assets = vec![
            asset(1, "SHIB", "coin", 0.00002, 1),
            asset(2, "USDC", "stablecoin", 1.0, 1),
            asset(3, "BTC", "coin", 64000.0, 1),
        ];
        let bands = count_by_price_band(&assets);
        assert_eq!(bands.len(), 5);
        assert_eq!(bands[0], ("< 1".to_string(), 1));
        assert_eq!(bands[1], ("1-10".to_string(), 1));
        assert_eq!(bands[4], (">= 1k".to_string(), 1));
    }

    #[test]
    fn bar_chart_scales_to_fixed_width() {
        let rows = vec![("coin".to_string(), 8), ("stablecoin".to_string(), 2)];
        let chart = bar_chart("assets by kind", &rows);
        assert!(chart.contains(&"█".repeat(40)));
        assert!(chart.contains(&format!("{} 2", "█".repeat(10))));
    }

    #[test]
    fn bar_chart_without_data_says_so() {
        let chart = bar_chart("assets by kind", &[("coin".to_string(), 0)]);
        assert!(chart.contains("(no data)"));
    }
}
